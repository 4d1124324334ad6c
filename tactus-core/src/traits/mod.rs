//! Seams between the bridge driver and its collaborators
//!
//! The input/event pipeline talks to the sensor exclusively through
//! [`RmiBus`]; which bus the bytes actually travel over is the driver
//! crate's business.

pub mod bus;

pub use bus::{RmiBus, RmiError};
