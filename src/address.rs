//! I2C address selection from the board's address strap jumpers.
//!
//! The MCP3427 samples its two address pins (A0, A1) at power-up. Each pin
//! can be tied high, tied low, or left floating, which selects one of eight
//! addresses above [`BASE_ADDRESS`]. On breakout boards each pin is routed to
//! a pair of solder jumpers, one to VDD ("high") and one to GND ("low").

use crate::registers::{ADDRESS_OFFSET_MASK, BASE_ADDRESS};

/// Level of a single address pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StrapPin {
    /// Tied to VDD.
    High,
    /// Tied to GND.
    Low,
    /// Neither jumper bridged.
    #[default]
    Float,
}

impl StrapPin {
    /// Classify a pin from its pair of solder jumpers.
    ///
    /// A bridged low jumper wins over a bridged high jumper, so every
    /// combination maps to a defined level.
    pub fn from_jumpers(high: bool, low: bool) -> Self {
        if low {
            StrapPin::Low
        } else if high {
            StrapPin::High
        } else {
            StrapPin::Float
        }
    }
}

/// Address strap configuration of both address pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Straps {
    /// Level of address pin A0.
    pub adr0: StrapPin,
    /// Level of address pin A1.
    pub adr1: StrapPin,
}

impl Straps {
    /// Create a strap configuration from explicit pin levels.
    pub const fn new(adr0: StrapPin, adr1: StrapPin) -> Self {
        Self { adr0, adr1 }
    }

    /// Create a strap configuration from the four solder jumpers on the board.
    ///
    /// # Arguments
    /// * `adr0_high` / `adr0_low` — jumpers bridging A0 to VDD / GND
    /// * `adr1_high` / `adr1_low` — jumpers bridging A1 to VDD / GND
    pub fn from_jumpers(adr0_high: bool, adr0_low: bool, adr1_high: bool, adr1_low: bool) -> Self {
        Self {
            adr0: StrapPin::from_jumpers(adr0_high, adr0_low),
            adr1: StrapPin::from_jumpers(adr1_high, adr1_low),
        }
    }

    /// Low three address bits selected by the straps (0–7).
    ///
    /// Follows the device address table:
    ///
    /// | A0    | A1    | Offset |
    /// |-------|-------|--------|
    /// | Low   | Low   | `000`  |
    /// | Low   | Float | `001`  |
    /// | Low   | High  | `010`  |
    /// | Float | Low   | `011`  |
    /// | High  | Low   | `100`  |
    /// | High  | Float | `101`  |
    /// | High  | High  | `110`  |
    /// | Float | High  | `111`  |
    /// | Float | Float | `000`  |
    pub fn offset(&self) -> u8 {
        let adr1_bits = match self.adr1 {
            StrapPin::Low => 0b00,
            StrapPin::Float => 0b01,
            StrapPin::High => 0b10,
        };

        let offset = match self.adr0 {
            StrapPin::Low => adr1_bits,
            StrapPin::High => 0b100 | adr1_bits,
            StrapPin::Float => match self.adr1 {
                StrapPin::Low => 0b011,
                StrapPin::High => 0b111,
                // Both floating is the same as both low.
                StrapPin::Float => 0b000,
            },
        };

        offset & ADDRESS_OFFSET_MASK
    }

    /// Full 7-bit I2C address selected by the straps.
    pub fn address(&self) -> u8 {
        BASE_ADDRESS + self.offset()
    }
}
