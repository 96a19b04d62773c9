//! Raw code to voltage conversion.

use crate::config::{Gain, Resolution};

/// Convert a raw sample to the differential input voltage in volts.
///
/// `voltage = reference_voltage(gain) / full_scale(resolution) * raw`
///
/// The divisor is the largest positive code, so the most negative code maps
/// slightly beyond the negative reference voltage. That matches what the
/// device reports and is kept as-is.
///
/// # Example
///
/// ```
/// use mcp3427_driver::{convert_to_voltage, Gain, Resolution};
///
/// let volts = convert_to_voltage(2047, Gain::X1, Resolution::Bits12);
/// assert!((volts - 2.048).abs() < 1e-6);
/// ```
pub fn convert_to_voltage(raw: i16, gain: Gain, resolution: Resolution) -> f32 {
    let divisor = resolution.full_scale() as f32;
    (gain.reference_voltage() / divisor) * raw as f32
}
