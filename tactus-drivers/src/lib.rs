//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the seams defined in
//! tactus-core. Currently that is a single driver family:
//!
//! - RMI-over-HID-I2C touch sensor bridge

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

// Host-side tests need std for the harness and proptest
#[cfg(test)]
extern crate std;

pub mod touch;
