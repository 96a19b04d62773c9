//! Error types for the MCP3427 driver.

use core::fmt;

/// Errors that can occur while reading a conversion result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mcp3427Error<E> {
    /// Underlying I2C bus error. Carries the last error seen when no result
    /// frame could be read at all.
    I2c(E),

    /// The device still reported a conversion in progress after every poll
    /// attempt.
    ConversionTimeout,
}

// Allow ergonomic `?` propagation from raw I2C errors.
impl<E> From<E> for Mcp3427Error<E> {
    fn from(error: E) -> Self {
        Mcp3427Error::I2c(error)
    }
}

impl<E: fmt::Debug> fmt::Display for Mcp3427Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mcp3427Error::I2c(e) => write!(f, "I2C error: {:?}", e),
            Mcp3427Error::ConversionTimeout => write!(f, "Conversion did not complete"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for Mcp3427Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Mcp3427Error::I2c(e) => defmt::write!(f, "I2C error: {}", e),
            Mcp3427Error::ConversionTimeout => defmt::write!(f, "Conversion did not complete"),
        }
    }
}
