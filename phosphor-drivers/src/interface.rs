//! Byte transport adapters
//!
//! SSD1306-class controllers on I2C frame every transfer with a control
//! byte: 0x00 introduces a command, 0x40 introduces RAM data. The
//! adapter hides that framing behind `PanelIo` so the driver only ever
//! speaks commands and payloads.

use embedded_hal::i2c::{I2c, Operation};
use heapless::Vec;

use phosphor_core::{PanelError, PanelIo};

/// Default 7-bit device address (0x3C, some modules strap 0x3D)
pub const DEFAULT_I2C_ADDRESS: u8 = 0x3C;

/// Control byte introducing a command
const CONTROL_CMD: u8 = 0x00;
/// Control byte introducing RAM data
const CONTROL_DATA: u8 = 0x40;

/// Largest command frame: control byte + code + two parameters
const CMD_FRAME: usize = 4;

/// I2C realization of [`PanelIo`]
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> I2cInterface<I2C> {
    /// Wrap an I2C bus for a device at `address`
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Tear down, returning the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> PanelIo for I2cInterface<I2C> {
    fn send_command(&mut self, code: u8, params: &[u8]) -> Result<(), PanelError> {
        let mut frame: Vec<u8, CMD_FRAME> = Vec::new();
        // Infallible: CMD_FRAME covers the control byte and the code
        let _ = frame.push(CONTROL_CMD);
        let _ = frame.push(code);
        frame
            .extend_from_slice(params)
            .map_err(|_| PanelError::InvalidArgument)?;
        self.i2c
            .write(self.address, &frame)
            .map_err(|_| PanelError::Transport)
    }

    fn send_pixels(&mut self, payload: &[u8]) -> Result<(), PanelError> {
        // One bus transaction: control byte, then the payload, without
        // staging the two into a contiguous buffer
        self.i2c
            .transaction(
                self.address,
                &mut [
                    Operation::Write(&[CONTROL_DATA]),
                    Operation::Write(payload),
                ],
            )
            .map_err(|_| PanelError::Transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;

    /// Minimal bus double that records each transaction's bytes
    #[derive(Default)]
    struct FakeI2c {
        transactions: std::vec::Vec<(u8, std::vec::Vec<u8>)>,
        fail: bool,
    }

    #[derive(Debug)]
    struct FakeError;

    impl embedded_hal::i2c::Error for FakeError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    impl embedded_hal::i2c::ErrorType for FakeI2c {
        type Error = FakeError;
    }

    impl I2c for FakeI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(FakeError);
            }
            let mut bytes = std::vec::Vec::new();
            for op in operations.iter() {
                match op {
                    Operation::Write(data) => bytes.extend_from_slice(data),
                    Operation::Read(_) => {}
                }
            }
            self.transactions.push((address, bytes));
            Ok(())
        }
    }

    #[test]
    fn test_command_framing() {
        let mut io = I2cInterface::new(FakeI2c::default(), DEFAULT_I2C_ADDRESS);
        io.send_command(0xA8, &[0x3F]).unwrap();

        let (addr, bytes) = &io.i2c.transactions[0];
        assert_eq!(*addr, 0x3C);
        // Control byte 0x00, then code, then parameter
        assert_eq!(bytes, &[0x00, 0xA8, 0x3F]);
    }

    #[test]
    fn test_bare_command_framing() {
        let mut io = I2cInterface::new(FakeI2c::default(), DEFAULT_I2C_ADDRESS);
        io.send_command(0xAF, &[]).unwrap();
        assert_eq!(io.i2c.transactions[0].1, vec![0x00, 0xAF]);
    }

    #[test]
    fn test_pixel_framing() {
        let mut io = I2cInterface::new(FakeI2c::default(), 0x3D);
        io.send_pixels(&[1, 2, 3, 4]).unwrap();

        let (addr, bytes) = &io.i2c.transactions[0];
        assert_eq!(*addr, 0x3D);
        // Data control byte 0x40 prefixes the payload in one transaction
        assert_eq!(bytes, &[0x40, 1, 2, 3, 4]);
    }

    #[test]
    fn test_oversized_params_rejected() {
        let mut io = I2cInterface::new(FakeI2c::default(), DEFAULT_I2C_ADDRESS);
        // Commands carry at most two parameter bytes
        assert_eq!(
            io.send_command(0x21, &[0, 1, 2]),
            Err(PanelError::InvalidArgument)
        );
        assert!(io.i2c.transactions.is_empty());
    }

    #[test]
    fn test_bus_failure_surfaces_as_transport() {
        let mut io = I2cInterface::new(
            FakeI2c {
                fail: true,
                ..Default::default()
            },
            DEFAULT_I2C_ADDRESS,
        );
        assert_eq!(io.send_command(0xAE, &[]), Err(PanelError::Transport));
        assert_eq!(io.send_pixels(&[0]), Err(PanelError::Transport));
    }
}
