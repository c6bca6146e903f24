//! Monochrome page tiling
//!
//! Rendering surfaces emit 1-bit buffers as horizontally packed rows,
//! MSB first, preceded by a fixed palette placeholder. Page-addressed
//! controllers want the transposed grouping: one byte per column
//! spanning 8 rows, least-significant bit on top.

/// Palette placeholder bytes reserved at the head of 1-bit render
/// buffers
pub const PALETTE_HEADER_BYTES: usize = 8;

/// Retile a horizontally packed monochrome bitmap into page layout
///
/// `src` is the render buffer including the palette header; `dst` is
/// the full-panel conversion buffer of `width * height / 8` bytes.
/// Every destination byte is written, so the buffer needs no clearing
/// between frames.
pub fn pack_pages(src: &[u8], dst: &mut [u8], width: usize, height: usize) {
    let bitmap = &src[PALETTE_HEADER_BYTES..];
    let stride = width.div_ceil(8);

    for y in 0..height {
        let row = &bitmap[y * stride..(y + 1) * stride];
        let mask = 1u8 << (y % 8);
        let page = &mut dst[(y / 8) * width..(y / 8 + 1) * width];
        for (x, out) in page.iter_mut().enumerate() {
            let bit = (row[x / 8] >> (7 - (x % 8))) & 1;
            if bit != 0 {
                *out |= mask;
            } else {
                *out &= !mask;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf_with_header(bitmap: &[u8]) -> Vec<u8> {
        // Junk in the header proves it is skipped
        let mut buf = vec![0xEEu8; PALETTE_HEADER_BYTES];
        buf.extend_from_slice(bitmap);
        buf
    }

    #[test]
    fn test_single_pixel() {
        // 8x8 panel, pixel at (x=3, y=5)
        let mut bitmap = [0u8; 8];
        bitmap[5] = 0b0001_0000;
        let src = buf_with_header(&bitmap);

        let mut dst = [0xFFu8; 8];
        pack_pages(&src, &mut dst, 8, 8);

        // Column 3 carries bit 5; everything else is cleared
        for (x, byte) in dst.iter().enumerate() {
            let expected = if x == 3 { 1 << 5 } else { 0 };
            assert_eq!(*byte, expected, "column {x}");
        }
    }

    #[test]
    fn test_top_row() {
        // 16x8: a fully lit top row sets bit 0 of every column byte
        let mut bitmap = [0u8; 16];
        bitmap[0] = 0xFF;
        bitmap[1] = 0xFF;
        let src = buf_with_header(&bitmap);

        let mut dst = [0u8; 16];
        pack_pages(&src, &mut dst, 16, 8);
        assert_eq!(dst, [0x01u8; 16]);
    }

    #[test]
    fn test_second_page() {
        // 8x16: row 8 is the first row of page 1
        let mut bitmap = [0u8; 16];
        bitmap[8] = 0xFF;
        let src = buf_with_header(&bitmap);

        let mut dst = [0u8; 16];
        pack_pages(&src, &mut dst, 8, 16);

        // Page 0 untouched, page 1 has bit 0 in every column
        assert_eq!(&dst[..8], &[0u8; 8]);
        assert_eq!(&dst[8..], &[0x01u8; 8]);
    }

    #[test]
    fn test_stale_conversion_bits_cleared() {
        // A cleared frame overwrites whatever the previous flush left
        let src = buf_with_header(&[0u8; 8]);
        let mut dst = [0xA5u8; 8];
        pack_pages(&src, &mut dst, 8, 8);
        assert_eq!(dst, [0u8; 8]);
    }

    #[test]
    fn test_msb_first_packing() {
        // Leftmost pixel of a row lives in the high bit of its byte
        let mut bitmap = [0u8; 8];
        bitmap[0] = 0b1000_0000;
        let src = buf_with_header(&bitmap);

        let mut dst = [0u8; 8];
        pack_pages(&src, &mut dst, 8, 8);
        assert_eq!(dst[0], 0x01);
        assert_eq!(&dst[1..], &[0u8; 7]);
    }
}
