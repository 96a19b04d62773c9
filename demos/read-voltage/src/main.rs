//! Read voltage example
//!
//! Demonstrates basic usage of the mcp3427-driver crate on the Raspberry Pi
//! Pico 2. Resolves the ADC address from the board's address jumpers, then
//! reads both input channels once a second and logs the voltages via defmt.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes                        |
//! |-----------|------------|------------------------------|
//! | I2C0 SDA  | GP20       |                              |
//! | I2C0 SCL  | GP21       |                              |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Delay, Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use mcp3427_driver::{Gain, Mcp3427, Mcp3427Error, Resolution, Straps, CHANNEL_COUNT};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

// Wire the I2C0 interrupt to Embassy's handler.
bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

// Jumper state of the ADC board: no address jumpers bridged.
const ADR0_HIGH: bool = false;
const ADR0_LOW: bool = false;
const ADR1_HIGH: bool = false;
const ADR1_LOW: bool = false;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // --- I2C bus (GP20 = SDA, GP21 = SCL) ---
    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c::Config::default(),
    );

    // --- ADC ---
    let straps = Straps::from_jumpers(ADR0_HIGH, ADR0_LOW, ADR1_HIGH, ADR1_LOW);
    let mut adc = Mcp3427::with_straps(i2c, Delay, straps);

    info!("MCP3427 at {=u8:#x}, straps {}", adc.address(), straps);

    loop {
        for channel in 0..CHANNEL_COUNT {
            match adc
                .try_read_voltage(channel, Gain::X1, Resolution::Bits16)
                .await
            {
                Ok(volts) => info!("CH{}: {} V", channel, volts),
                Err(Mcp3427Error::ConversionTimeout) => {
                    warn!("CH{}: conversion did not complete", channel)
                }
                Err(e) => error!("CH{}: read failed: {}", channel, e),
            }
        }

        Timer::after(Duration::from_millis(1000)).await;
    }
}
