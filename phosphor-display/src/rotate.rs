//! Pixel-buffer orientation transforms
//!
//! Pure functions over byte buffers, run on the flush thread only.
//! Quarter turns exchange the buffer's dimensions; strides are those of
//! the rotated image, with no row padding.

use phosphor_core::Rotation;

/// Swap the byte order of every 16-bit pixel in place
///
/// Corrects the endianness mismatch between rendered RGB565 and the
/// bus. Applying it twice restores the original buffer.
pub fn swap_bytes16(buf: &mut [u8]) {
    for px in buf.chunks_exact_mut(2) {
        px.swap(0, 1);
    }
}

/// Rotate a `w` x `h` image of `px_size`-byte pixels into `dst`
///
/// `dst` must hold `w * h * px_size` bytes. Quarter turns produce an
/// `h` x `w` image; a half turn keeps the dimensions. `Rotation::None`
/// copies through unchanged.
pub fn rotate(src: &[u8], dst: &mut [u8], w: usize, h: usize, px_size: usize, rotation: Rotation) {
    match rotation {
        Rotation::None => dst.copy_from_slice(src),
        Rotation::Deg90 => rotate90(src, dst, w, h, px_size),
        Rotation::Deg180 => rotate180(src, dst, w, h, px_size),
        Rotation::Deg270 => rotate270(src, dst, w, h, px_size),
    }
}

/// Clockwise quarter turn: source (x, y) lands at (h - 1 - y, x)
fn rotate90(src: &[u8], dst: &mut [u8], w: usize, h: usize, px: usize) {
    for y in 0..h {
        for x in 0..w {
            let from = (y * w + x) * px;
            let to = (x * h + (h - 1 - y)) * px;
            dst[to..to + px].copy_from_slice(&src[from..from + px]);
        }
    }
}

/// Half turn: source (x, y) lands at (w - 1 - x, h - 1 - y)
fn rotate180(src: &[u8], dst: &mut [u8], w: usize, h: usize, px: usize) {
    for y in 0..h {
        for x in 0..w {
            let from = (y * w + x) * px;
            let to = ((h - 1 - y) * w + (w - 1 - x)) * px;
            dst[to..to + px].copy_from_slice(&src[from..from + px]);
        }
    }
}

/// Counter-clockwise quarter turn: source (x, y) lands at (y, w - 1 - x)
fn rotate270(src: &[u8], dst: &mut [u8], w: usize, h: usize, px: usize) {
    for y in 0..h {
        for x in 0..w {
            let from = (y * w + x) * px;
            let to = ((w - 1 - x) * h + y) * px;
            dst[to..to + px].copy_from_slice(&src[from..from + px]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_swap_bytes16_pairs() {
        let mut buf = [0x12, 0x34, 0xAB, 0xCD];
        swap_bytes16(&mut buf);
        assert_eq!(buf, [0x34, 0x12, 0xCD, 0xAB]);
    }

    #[test]
    fn test_swap_bytes16_involution() {
        let original: Vec<u8> = (0u8..=255).collect();
        let mut buf = original.clone();
        swap_bytes16(&mut buf);
        assert_ne!(buf, original);
        swap_bytes16(&mut buf);
        assert_eq!(buf, original);
    }

    #[test]
    fn test_rotate90_known_vector() {
        // 3x2 single-byte image:
        //   a b c
        //   d e f
        let src = [b'a', b'b', b'c', b'd', b'e', b'f'];
        let mut dst = [0u8; 6];
        rotate(&src, &mut dst, 3, 2, 1, Rotation::Deg90);
        // Clockwise becomes 2x3:
        //   d a
        //   e b
        //   f c
        assert_eq!(dst, [b'd', b'a', b'e', b'b', b'f', b'c']);
    }

    #[test]
    fn test_rotate180_known_vector() {
        let src = [b'a', b'b', b'c', b'd', b'e', b'f'];
        let mut dst = [0u8; 6];
        rotate(&src, &mut dst, 3, 2, 1, Rotation::Deg180);
        assert_eq!(dst, [b'f', b'e', b'd', b'c', b'b', b'a']);
    }

    #[test]
    fn test_rotate270_known_vector() {
        let src = [b'a', b'b', b'c', b'd', b'e', b'f'];
        let mut dst = [0u8; 6];
        rotate(&src, &mut dst, 3, 2, 1, Rotation::Deg270);
        // Counter-clockwise becomes 2x3:
        //   c f
        //   b e
        //   a d
        assert_eq!(dst, [b'c', b'f', b'b', b'e', b'a', b'd']);
    }

    #[test]
    fn test_rotate_multibyte_pixels() {
        // 2x2 RGB565 image; pixel values stay contiguous
        let src = [1, 2, 3, 4, 5, 6, 7, 8];
        let mut dst = [0u8; 8];
        rotate(&src, &mut dst, 2, 2, 2, Rotation::Deg90);
        // (0,0)->(1,0), (1,0)->(1,1), (0,1)->(0,0), (1,1)->(0,1)
        assert_eq!(dst, [5, 6, 1, 2, 7, 8, 3, 4]);
    }

    proptest! {
        /// A quarter turn undone by the complementary quarter turn
        #[test]
        fn rotate90_then_270_is_identity(
            w in 1usize..16,
            h in 1usize..16,
            seed in any::<u8>(),
        ) {
            let px = 2;
            let src: Vec<u8> = (0..w * h * px).map(|i| (i as u8).wrapping_add(seed)).collect();
            let mut once = vec![0u8; src.len()];
            let mut back = vec![0u8; src.len()];

            rotate(&src, &mut once, w, h, px, Rotation::Deg90);
            // The rotated image is h x w
            rotate(&once, &mut back, h, w, px, Rotation::Deg270);
            prop_assert_eq!(&back, &src);
        }

        /// Two half turns are the identity
        #[test]
        fn rotate180_twice_is_identity(
            w in 1usize..16,
            h in 1usize..16,
            seed in any::<u8>(),
        ) {
            let px = 2;
            let src: Vec<u8> = (0..w * h * px).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect();
            let mut once = vec![0u8; src.len()];
            let mut back = vec![0u8; src.len()];

            rotate(&src, &mut once, w, h, px, Rotation::Deg180);
            rotate(&once, &mut back, w, h, px, Rotation::Deg180);
            prop_assert_eq!(&back, &src);
        }
    }
}
