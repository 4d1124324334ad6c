//! Board configuration
//!
//! Values that come from the board/platform description rather than from
//! the device itself. The platform layer fills this in and hands it to
//! the driver at construction time.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Board-level description of the touch sensor wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    /// 7-bit I2C address of the sensor
    pub bus_address: u8,
    /// Register address of the fixed-location HID device descriptor block
    pub device_descriptor_addr: u16,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            // Typical wiring for Synaptics RMI-over-HID parts
            bus_address: 0x2c,
            device_descriptor_addr: 0x0020,
        }
    }
}
