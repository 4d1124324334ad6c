//! I2C bus abstractions
//!
//! The bridge driver only needs two primitives: push a block of bytes to
//! the device and pull a block of bytes back. Everything else (report
//! framing, retries, recovery) is layered on top by the driver.

/// I2C bus master
///
/// One transfer per call; implementations handle start/stop conditions
/// and addressing for the specific platform.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write `data.len()` bytes to the device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read `buf.len()` bytes from the device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;
}
