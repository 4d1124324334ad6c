//! Tactus Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the bridge driver is written
//! against. Platform crates (Linux userspace, RP2040, test mocks, ...)
//! implement them; the driver itself never touches a bus or a pin
//! register directly.
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - raw bus transfers to the sensor's slave address
//! - [`gpio::InputPin`] - the attention line polled during reset

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use gpio::InputPin;
pub use i2c::I2cBus;
