//! Low-level MCP3427 protocol driver.
//!
//! Implements the one-shot conversion handshake: write the configuration
//! byte with the ready flag set, wait out the conversion time, then poll the
//! result frame until the device clears the ready flag.
//!
//! This module is crate-private. Consumers use [`Mcp3427`] instead.
//!
//! [`Mcp3427`]: crate::Mcp3427

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::config::Config;
use crate::error::Mcp3427Error;
use crate::registers::{CONFIG_RDY, MAX_POLL_ATTEMPTS, POLL_INTERVAL_US, RESULT_FRAME_LEN};

/// One result frame as read from the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResultFrame {
    /// Signed output code.
    pub raw: i16,
    /// Configuration register contents, including the ready flag.
    pub config: u8,
}

impl ResultFrame {
    fn from_bytes(bytes: [u8; RESULT_FRAME_LEN]) -> Self {
        Self {
            raw: i16::from_be_bytes([bytes[0], bytes[1]]),
            config: bytes[2],
        }
    }

    /// `true` while the device is still converting and `raw` is stale.
    pub fn is_busy(&self) -> bool {
        self.config & CONFIG_RDY != 0
    }
}

/// Low-level MCP3427 protocol driver.
///
/// Owns the I2C peripheral and a delay source. Holds no conversion state
/// between calls; every [`one_shot`](Self::one_shot) starts from scratch.
pub(crate) struct AdcDriver<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
}

impl<I2C, D> AdcDriver<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a new protocol driver. No I2C traffic is generated.
    pub fn new(i2c: I2C, delay: D, address: u8) -> Self {
        Self { i2c, delay, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give back the I2C peripheral and delay source.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    // -----------------------------------------------------------------------
    // Core protocol primitives
    // -----------------------------------------------------------------------

    /// Write a single configuration byte.
    async fn write_config(&mut self, byte: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[byte]).await
    }

    /// Read the output code and configuration register in one transaction.
    async fn read_frame(&mut self) -> Result<ResultFrame, I2C::Error> {
        let mut buf = [0u8; RESULT_FRAME_LEN];
        self.i2c.read(self.address, &mut buf).await?;
        Ok(ResultFrame::from_bytes(buf))
    }

    // -----------------------------------------------------------------------
    // Conversion handshake
    // -----------------------------------------------------------------------

    /// Trigger a one-shot conversion and wait for its result.
    ///
    /// 1. Write `config` with the ready flag set to start the conversion.
    /// 2. Wait the minimum conversion time for the resolution.
    /// 3. Read result frames, up to [`MAX_POLL_ATTEMPTS`] times. A failed
    ///    read consumes an attempt and is retried at once; a frame with the
    ///    ready flag set waits [`POLL_INTERVAL_US`] before the next attempt.
    ///
    /// A failed trigger write does not abort the handshake. If the device
    /// never produces a fresh result, polling runs out and the failure is
    /// reported then.
    ///
    /// # Errors
    ///
    /// When every attempt fails, the last failure observed is returned:
    /// * [`Mcp3427Error::ConversionTimeout`] if the last frame read was busy
    /// * [`Mcp3427Error::I2c`] if the last bus operation failed
    pub async fn one_shot(&mut self, config: Config) -> Result<i16, Mcp3427Error<I2C::Error>> {
        let trigger = config.to_byte() | CONFIG_RDY;

        let mut failure = match self.write_config(trigger).await {
            Ok(()) => Mcp3427Error::ConversionTimeout,
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("MCP3427 {=u8:#x}: trigger write failed", self.address);
                Mcp3427Error::I2c(e)
            }
        };

        self.delay.delay_ms(config.resolution.conversion_time_ms()).await;

        for _attempt in 1..=MAX_POLL_ATTEMPTS {
            match self.read_frame().await {
                Err(e) => {
                    #[cfg(feature = "defmt")]
                    defmt::trace!("MCP3427 poll {}: read failed", _attempt);
                    failure = Mcp3427Error::I2c(e);
                }
                Ok(frame) if frame.is_busy() => {
                    #[cfg(feature = "defmt")]
                    defmt::trace!("MCP3427 poll {}: not ready", _attempt);
                    failure = Mcp3427Error::ConversionTimeout;
                    self.delay.delay_us(POLL_INTERVAL_US).await;
                }
                Ok(frame) => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("MCP3427 poll {}: raw {}", _attempt, frame.raw);
                    return Ok(frame.raw);
                }
            }
        }

        #[cfg(feature = "defmt")]
        defmt::warn!(
            "MCP3427 {=u8:#x}: no result after {} attempts",
            self.address,
            MAX_POLL_ATTEMPTS
        );

        Err(failure)
    }
}
