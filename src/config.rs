//! Conversion settings and the configuration byte codec.

use crate::registers::{
    CONFIG_CHANNEL_MASK, CONFIG_CHANNEL_SHIFT, CONFIG_CONTINUOUS, CONFIG_GAIN_MASK,
    CONFIG_RESOLUTION_MASK, CONFIG_RESOLUTION_SHIFT,
};

/// Programmable gain amplifier setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gain {
    /// 1× (±2.048 V full scale)
    #[default]
    X1,
    /// 2× (±1.024 V full scale)
    X2,
    /// 4× (±0.512 V full scale)
    X4,
    /// 8× (±0.256 V full scale)
    X8,
}

impl Gain {
    /// Two-bit PGA code written to bits 1-0 of the configuration register.
    pub const fn code(self) -> u8 {
        match self {
            Gain::X1 => 0b00,
            Gain::X2 => 0b01,
            Gain::X4 => 0b10,
            Gain::X8 => 0b11,
        }
    }

    /// Decode the PGA field. Only the low two bits are looked at.
    pub const fn from_code(code: u8) -> Self {
        match code & CONFIG_GAIN_MASK {
            0b00 => Gain::X1,
            0b01 => Gain::X2,
            0b10 => Gain::X4,
            _ => Gain::X8,
        }
    }

    /// Gain from its multiplier (1, 2, 4 or 8).
    pub const fn from_multiplier(multiplier: u8) -> Option<Self> {
        match multiplier {
            1 => Some(Gain::X1),
            2 => Some(Gain::X2),
            4 => Some(Gain::X4),
            8 => Some(Gain::X8),
            _ => None,
        }
    }

    /// Amplifier multiplier (1, 2, 4 or 8).
    pub const fn multiplier(self) -> u8 {
        match self {
            Gain::X1 => 1,
            Gain::X2 => 2,
            Gain::X4 => 4,
            Gain::X8 => 8,
        }
    }

    /// Input voltage corresponding to a full-scale positive code.
    pub const fn reference_voltage(self) -> f32 {
        match self {
            Gain::X1 => 2.048,
            Gain::X2 => 1.024,
            Gain::X4 => 0.512,
            Gain::X8 => 0.256,
        }
    }
}

/// Sample resolution. Higher resolution means a slower conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// 12 bits, 240 samples/s
    Bits12,
    /// 14 bits, 60 samples/s
    Bits14,
    /// 16 bits, 15 samples/s
    #[default]
    Bits16,
}

impl Resolution {
    /// Two-bit sample rate code written to bits 3-2 of the configuration register.
    pub const fn code(self) -> u8 {
        match self {
            Resolution::Bits12 => 0b00,
            Resolution::Bits14 => 0b01,
            Resolution::Bits16 => 0b10,
        }
    }

    /// Decode the sample rate field.
    ///
    /// `0b11` is reserved on the MCP3427 and is treated as 16-bit.
    pub const fn from_code(code: u8) -> Self {
        match code & CONFIG_RESOLUTION_MASK {
            0b00 => Resolution::Bits12,
            0b01 => Resolution::Bits14,
            _ => Resolution::Bits16,
        }
    }

    /// Resolution from a bit depth. Anything other than 12 or 14 is 16-bit.
    pub const fn from_bits(bits: u8) -> Self {
        match bits {
            12 => Resolution::Bits12,
            14 => Resolution::Bits14,
            _ => Resolution::Bits16,
        }
    }

    /// Bit depth of a sample (12, 14 or 16).
    pub const fn bits(self) -> u8 {
        match self {
            Resolution::Bits12 => 12,
            Resolution::Bits14 => 14,
            Resolution::Bits16 => 16,
        }
    }

    /// Largest positive code the device returns at this resolution.
    ///
    /// This is `2^(n-1) - 1`, not `2^(n-1)`; the negative extreme is one code
    /// further from zero.
    pub const fn full_scale(self) -> i16 {
        match self {
            Resolution::Bits12 => 2047,
            Resolution::Bits14 => 8191,
            Resolution::Bits16 => 32767,
        }
    }

    /// Minimum time in milliseconds for one conversion to complete.
    pub const fn conversion_time_ms(self) -> u32 {
        match self {
            Resolution::Bits12 => 4,
            Resolution::Bits14 => 35,
            Resolution::Bits16 => 68,
        }
    }
}

/// One-shot or free-running conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionMode {
    /// Convert once per trigger, then power down.
    #[default]
    OneShot,
    /// Convert continuously.
    Continuous,
}

/// Contents of the configuration register, minus the ready flag.
///
/// # Example
///
/// ```
/// use mcp3427_driver::{Config, ConversionMode, Gain, Resolution};
///
/// let config = Config {
///     channel: 1,
///     mode: ConversionMode::OneShot,
///     resolution: Resolution::Bits14,
///     gain: Gain::X4,
/// };
/// assert_eq!(config.to_byte(), 0b0010_0110);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Input channel. The MCP3427 has channels 0 and 1; any value below 4 is
    /// written as-is, and 4 or above leaves the channel bits clear.
    pub channel: u8,
    /// Conversion mode.
    pub mode: ConversionMode,
    /// Sample resolution.
    pub resolution: Resolution,
    /// PGA gain.
    pub gain: Gain,
}

impl Config {
    /// One-shot configuration for the given channel, gain and resolution.
    pub const fn one_shot(channel: u8, gain: Gain, resolution: Resolution) -> Self {
        Self {
            channel,
            mode: ConversionMode::OneShot,
            resolution,
            gain,
        }
    }

    /// Pack the settings into a configuration byte. The ready flag is left
    /// clear.
    pub const fn to_byte(&self) -> u8 {
        let mut byte = 0;

        if self.channel < 4 {
            byte |= (self.channel & CONFIG_CHANNEL_MASK) << CONFIG_CHANNEL_SHIFT;
        }

        if let ConversionMode::Continuous = self.mode {
            byte |= CONFIG_CONTINUOUS;
        }

        byte |= self.resolution.code() << CONFIG_RESOLUTION_SHIFT;
        byte |= self.gain.code();

        byte
    }

    /// Unpack a configuration byte as read back from the device. The ready
    /// flag is ignored.
    pub const fn from_byte(byte: u8) -> Self {
        let mode = if byte & CONFIG_CONTINUOUS != 0 {
            ConversionMode::Continuous
        } else {
            ConversionMode::OneShot
        };

        Self {
            channel: (byte >> CONFIG_CHANNEL_SHIFT) & CONFIG_CHANNEL_MASK,
            mode,
            resolution: Resolution::from_code(byte >> CONFIG_RESOLUTION_SHIFT),
            gain: Gain::from_code(byte),
        }
    }
}

impl From<Config> for u8 {
    fn from(config: Config) -> Self {
        config.to_byte()
    }
}
