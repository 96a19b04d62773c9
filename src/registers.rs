//! Configuration register layout and protocol constants for the MCP3427.
//!
//! The MCP3427 has a single 8-bit configuration register. A write of one
//! byte updates it; a read returns the latest conversion result followed by
//! the current register contents:
//!
//! ```text
//! bit   7     6-5       4      3-2         1-0
//!     /RDY  channel  O/C mode  resolution  PGA gain
//! ```
//!
//! Writing `/RDY = 1` in one-shot mode starts a conversion. The device
//! reports `/RDY = 1` while converting and clears it once the result is
//! available.

// ---------------------------------------------------------------------------
// Configuration register fields
// ---------------------------------------------------------------------------

/// Ready flag. Written as 1 to start a one-shot conversion; read back as 1
/// while the conversion is still in progress.
pub const CONFIG_RDY: u8 = 0x80;

/// Bit offset of the two channel-select bits.
pub const CONFIG_CHANNEL_SHIFT: u8 = 5;

/// Mask of the channel-select field (after shifting down).
pub const CONFIG_CHANNEL_MASK: u8 = 0b11;

/// Conversion mode bit: 1 = continuous, 0 = one-shot.
pub const CONFIG_CONTINUOUS: u8 = 0x10;

/// Bit offset of the two sample-rate/resolution bits.
pub const CONFIG_RESOLUTION_SHIFT: u8 = 2;

/// Mask of the resolution field (after shifting down).
pub const CONFIG_RESOLUTION_MASK: u8 = 0b11;

/// Mask of the two PGA gain bits.
pub const CONFIG_GAIN_MASK: u8 = 0b11;

// ---------------------------------------------------------------------------
// Addressing
// ---------------------------------------------------------------------------

/// Base 7-bit I2C address of the MCP3427 family (`1101 A2 A1 A0`).
pub const BASE_ADDRESS: u8 = 0x68;

/// Default I2C address (both address pins low or both floating).
pub const DEFAULT_ADDRESS: u8 = BASE_ADDRESS;

/// Mask of the strap-selected low address bits.
pub const ADDRESS_OFFSET_MASK: u8 = 0b111;

// ---------------------------------------------------------------------------
// Protocol constants
// ---------------------------------------------------------------------------

/// Number of input channels on the MCP3427.
pub const CHANNEL_COUNT: u8 = 2;

/// Bytes returned by a result read in 12/14/16-bit mode:
/// `[data_hi, data_lo, config]`.
pub const RESULT_FRAME_LEN: usize = 3;

/// Result reads attempted after the conversion delay before giving up.
pub const MAX_POLL_ATTEMPTS: u8 = 8;

/// Delay in microseconds between result reads while `/RDY` is still set.
pub const POLL_INTERVAL_US: u32 = 200;
