//! High-level interface for the MCP3427 two-channel ADC.
//!
//! [`Mcp3427`] wraps the low-level protocol driver with address selection,
//! one-shot reads and voltage conversion.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::address::Straps;
use crate::config::{Config, Gain, Resolution};
use crate::conversion::convert_to_voltage;
use crate::driver::AdcDriver;
use crate::error::Mcp3427Error;

/// High-level interface for the MCP3427 two-channel delta-sigma ADC.
///
/// Every read triggers a one-shot conversion, waits for it to complete, and
/// returns the result. The calling task is suspended for the full
/// conversion: about 4 ms at 12 bits up to about 70 ms at 16 bits.
///
/// Two flavours of each read are provided:
/// * `try_read_*` report a failed conversion as an [`Mcp3427Error`].
/// * `read_*` never fail and report a failed conversion as zero, which is
///   indistinguishable from a genuine zero reading.
///
/// # Example
///
/// ```ignore
/// use mcp3427_driver::{Gain, Mcp3427, Resolution, DEFAULT_ADDRESS};
///
/// // `i2c` is any `embedded-hal-async` I2C implementation,
/// // `delay` any `embedded-hal-async` delay source
/// let mut adc = Mcp3427::new(i2c, delay, DEFAULT_ADDRESS);
///
/// let volts = adc.try_read_voltage(0, Gain::X1, Resolution::Bits16).await?;
/// ```
pub struct Mcp3427<I2C, D> {
    driver: AdcDriver<I2C, D>,
}

impl<I2C, D> Mcp3427<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a new ADC interface at an explicit address.
    ///
    /// No I2C traffic is generated.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access)
    /// * `delay` — delay source used to wait out conversions
    /// * `address` — 7-bit I2C device address (typically 0x68)
    pub fn new(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            driver: AdcDriver::new(i2c, delay, address),
        }
    }

    /// Create a new ADC interface at the address selected by the board's
    /// address straps.
    ///
    /// No I2C traffic is generated.
    ///
    /// # Example
    /// ```ignore
    /// use mcp3427_driver::{Mcp3427, Straps};
    ///
    /// // A0 jumper bridged high, A1 jumper bridged low: address 0x6C
    /// let adc = Mcp3427::with_straps(i2c, delay, Straps::from_jumpers(true, false, false, true));
    /// ```
    pub fn with_straps(i2c: I2C, delay: D, straps: Straps) -> Self {
        Self::new(i2c, delay, straps.address())
    }

    /// 7-bit I2C address this interface talks to.
    pub fn address(&self) -> u8 {
        self.driver.address()
    }

    /// Give back the I2C peripheral and delay source.
    pub fn release(self) -> (I2C, D) {
        self.driver.release()
    }

    // -----------------------------------------------------------------------
    // Raw reads
    // -----------------------------------------------------------------------

    /// Run a one-shot conversion and return the signed output code.
    ///
    /// # Arguments
    /// * `channel` — input channel (0 or 1)
    /// * `gain` — PGA gain
    /// * `resolution` — sample resolution
    ///
    /// # Errors
    /// * [`Mcp3427Error::ConversionTimeout`] if the device kept converting
    ///   through every poll attempt
    /// * [`Mcp3427Error::I2c`] if the result could not be read at all
    pub async fn try_read_raw(
        &mut self,
        channel: u8,
        gain: Gain,
        resolution: Resolution,
    ) -> Result<i16, Mcp3427Error<I2C::Error>> {
        self.driver
            .one_shot(Config::one_shot(channel, gain, resolution))
            .await
    }

    /// Run a one-shot conversion and return the signed output code, or 0 if
    /// the conversion failed.
    pub async fn read_raw(&mut self, channel: u8, gain: Gain, resolution: Resolution) -> i16 {
        self.try_read_raw(channel, gain, resolution)
            .await
            .unwrap_or(0)
    }

    // -----------------------------------------------------------------------
    // Voltage reads
    // -----------------------------------------------------------------------

    /// Run a one-shot conversion and return the input voltage in volts.
    ///
    /// # Errors
    /// Same as [`try_read_raw`](Self::try_read_raw).
    pub async fn try_read_voltage(
        &mut self,
        channel: u8,
        gain: Gain,
        resolution: Resolution,
    ) -> Result<f32, Mcp3427Error<I2C::Error>> {
        let raw = self.try_read_raw(channel, gain, resolution).await?;
        Ok(convert_to_voltage(raw, gain, resolution))
    }

    /// Run a one-shot conversion and return the input voltage in volts, or
    /// 0.0 if the conversion failed.
    pub async fn read_voltage(&mut self, channel: u8, gain: Gain, resolution: Resolution) -> f32 {
        let raw = self.read_raw(channel, gain, resolution).await;
        convert_to_voltage(raw, gain, resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::StrapPin;
    use crate::mock::{busy, ready, MockBus, Reply};
    use crate::registers::DEFAULT_ADDRESS;
    use embassy_futures::block_on;

    #[test]
    fn construction_generates_no_traffic() {
        let bus = MockBus::new([]);
        let adc = Mcp3427::new(bus.i2c(), bus.delay(), DEFAULT_ADDRESS);
        assert_eq!(adc.address(), 0x68);
        assert!(bus.events().is_empty());
    }

    #[test]
    fn straps_select_address() {
        let bus = MockBus::new([ready(5, 0x08)]);
        let straps = Straps::new(StrapPin::Float, StrapPin::High);
        let mut adc = Mcp3427::with_straps(bus.i2c(), bus.delay(), straps);
        assert_eq!(adc.address(), 0x6F);

        block_on(adc.read_raw(0, Gain::X1, Resolution::Bits16));
        assert_eq!(
            bus.events()[0],
            crate::mock::Event::Write(0x6F, vec![0x88])
        );
    }

    #[test]
    fn trigger_byte_carries_settings_and_ready_flag() {
        let bus = MockBus::new([ready(0, 0x00), ready(0, 0x00), ready(0, 0x00)]);
        let mut adc = Mcp3427::new(bus.i2c(), bus.delay(), DEFAULT_ADDRESS);

        block_on(adc.read_raw(0, Gain::X1, Resolution::Bits16));
        block_on(adc.read_raw(1, Gain::X8, Resolution::Bits12));
        block_on(adc.read_raw(1, Gain::X2, Resolution::Bits14));

        assert_eq!(
            bus.writes(),
            [vec![0b1000_1000], vec![0b1010_0011], vec![0b1010_0101]]
        );
    }

    #[test]
    fn conversion_delay_follows_resolution() {
        let bus = MockBus::new([ready(0, 0), ready(0, 0), ready(0, 0)]);
        let mut adc = Mcp3427::new(bus.i2c(), bus.delay(), DEFAULT_ADDRESS);

        block_on(adc.read_raw(0, Gain::X1, Resolution::Bits12));
        block_on(adc.read_raw(0, Gain::X1, Resolution::Bits14));
        block_on(adc.read_raw(0, Gain::X1, Resolution::Bits16));

        assert_eq!(bus.delays(), [4_000_000, 35_000_000, 68_000_000]);
    }

    #[test]
    fn returns_sample_from_nth_attempt() {
        for n in 1..=8usize {
            let mut replies: Vec<Reply> = (1..n).map(|i| busy(i as i16, 0x08)).collect();
            replies.push(ready(-321, 0x08));
            replies.push(ready(999, 0x08));

            let bus = MockBus::new(replies);
            let mut adc = Mcp3427::new(bus.i2c(), bus.delay(), DEFAULT_ADDRESS);

            assert_eq!(block_on(adc.read_raw(0, Gain::X1, Resolution::Bits16)), -321);
            assert_eq!(bus.write_count(), 1, "attempt {}", n);
            assert_eq!(bus.read_count(), n, "attempt {}", n);
        }
    }

    #[test]
    fn poll_exhaustion_reads_zero() {
        let bus = MockBus::new((0..12).map(|_| busy(1234, 0x08)));
        let mut adc = Mcp3427::new(bus.i2c(), bus.delay(), DEFAULT_ADDRESS);

        assert_eq!(block_on(adc.read_raw(0, Gain::X1, Resolution::Bits16)), 0);
        assert_eq!(bus.read_count(), 8);
        // One conversion delay plus a poll interval after each busy frame.
        assert_eq!(bus.delays().len(), 9);
    }

    #[test]
    fn poll_exhaustion_is_distinguishable_with_try() {
        let bus = MockBus::new((0..8).map(|_| busy(1234, 0x08)));
        let mut adc = Mcp3427::new(bus.i2c(), bus.delay(), DEFAULT_ADDRESS);

        assert_eq!(
            block_on(adc.try_read_raw(0, Gain::X1, Resolution::Bits16)),
            Err(Mcp3427Error::ConversionTimeout)
        );
    }

    #[test]
    fn short_reads_are_retried() {
        let bus = MockBus::new([Reply::Nack, Reply::Nack, Reply::Nack, ready(2000, 0x08)]);
        let mut adc = Mcp3427::new(bus.i2c(), bus.delay(), DEFAULT_ADDRESS);

        assert_eq!(
            block_on(adc.try_read_raw(1, Gain::X1, Resolution::Bits16)),
            Ok(2000)
        );
        assert_eq!(bus.read_count(), 4);
    }

    #[test]
    fn write_failure_does_not_short_circuit() {
        let bus = MockBus::new([busy(0, 0x08), ready(77, 0x08)]);
        bus.fail_writes();
        let mut adc = Mcp3427::new(bus.i2c(), bus.delay(), DEFAULT_ADDRESS);

        // The device still holds a result from an earlier conversion.
        assert_eq!(block_on(adc.read_raw(0, Gain::X1, Resolution::Bits16)), 77);
        assert_eq!(bus.read_count(), 2);
    }

    #[test]
    fn voltage_read() {
        let bus = MockBus::new([ready(2047, 0x00), ready(32767, 0x0B)]);
        let mut adc = Mcp3427::new(bus.i2c(), bus.delay(), DEFAULT_ADDRESS);

        let volts = block_on(adc.read_voltage(0, Gain::X1, Resolution::Bits12));
        assert!((volts - 2.048).abs() < 1e-6);

        let volts = block_on(adc.try_read_voltage(0, Gain::X8, Resolution::Bits16)).unwrap();
        assert!((volts - 0.256).abs() < 1e-6);
    }

    #[test]
    fn failed_voltage_read() {
        let bus = MockBus::new([]);
        let mut adc = Mcp3427::new(bus.i2c(), bus.delay(), DEFAULT_ADDRESS);

        assert_eq!(block_on(adc.read_voltage(1, Gain::X4, Resolution::Bits14)), 0.0);
        assert!(matches!(
            block_on(adc.try_read_voltage(1, Gain::X4, Resolution::Bits14)),
            Err(Mcp3427Error::I2c(_))
        ));
    }

    #[test]
    fn release_returns_bus() {
        let bus = MockBus::new([]);
        let adc = Mcp3427::new(bus.i2c(), bus.delay(), DEFAULT_ADDRESS);
        let (_i2c, _delay) = adc.release();
        assert!(bus.events().is_empty());
    }
}
