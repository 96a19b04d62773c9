//! Async driver for the Microchip MCP3427 two-channel delta-sigma ADC.
//!
//! This crate provides an `embedded-hal-async` I2C driver for the MCP3427
//! (and the pin-compatible MCP3426/MCP3428 channel subset), as found on the
//! Iowa Scaled Engineering I2C-MCP3427 board. It triggers one-shot
//! conversions, polls for completion, and converts the result to volts.
//!
//! # Architecture
//!
//! The crate is split into two layers:
//!
//! - **`driver`** (crate-private) — The one-shot conversion handshake:
//!   trigger write, conversion delay, bounded result polling.
//! - **[`Mcp3427`]** (public) — High-level API for raw and voltage reads,
//!   plus address selection from the board's strap jumpers.
//!
//! The pure building blocks are public too: [`Config`] packs and unpacks the
//! configuration register, [`Straps`] resolves the I2C address, and
//! [`convert_to_voltage`] scales a raw code.
//!
//! # Quick start
//!
//! ```ignore
//! use mcp3427_driver::{Gain, Mcp3427, Resolution, DEFAULT_ADDRESS};
//!
//! // Construct with any `embedded-hal-async` I2C and delay implementation
//! let mut adc = Mcp3427::new(i2c, delay, DEFAULT_ADDRESS);
//!
//! // 16-bit reading of channel 0 at unity gain
//! let volts = adc.try_read_voltage(0, Gain::X1, Resolution::Bits16).await?;
//! ```
//!
//! # Features
//!
//! - **`defmt`** — Enable [`defmt::Format`] implementations on public types
//!   and conversion logging for embedded targets.

#![cfg_attr(not(test), no_std)]

pub use address::{StrapPin, Straps};
pub use config::{Config, ConversionMode, Gain, Resolution};
pub use conversion::convert_to_voltage;
pub use error::Mcp3427Error;
pub use mcp3427::Mcp3427;
pub use registers::{CHANNEL_COUNT, DEFAULT_ADDRESS};

mod address;
mod config;
mod conversion;
mod driver;
mod error;
mod mcp3427;
mod registers;

#[cfg(test)]
mod mock;
