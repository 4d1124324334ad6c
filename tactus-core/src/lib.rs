//! Board-agnostic core for the Tactus touch bridge
//!
//! This crate contains everything that does not depend on a specific
//! hardware implementation:
//!
//! - The [`traits::RmiBus`] seam consumed by the input/event pipeline
//! - The shared [`traits::RmiError`] error type
//! - Board configuration ([`config::BoardConfig`])

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod traits;

pub use config::BoardConfig;
pub use traits::{RmiBus, RmiError};
