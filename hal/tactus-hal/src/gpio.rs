//! GPIO pin abstractions
//!
//! The touch sensor exposes an attention line that the driver polls to
//! find out when a reset has completed. Only input is needed here;
//! power sequencing pins belong to the platform layer.

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific platform.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}
