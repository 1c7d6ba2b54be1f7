//! A 4-digit 7-segment clock with minute and hour set buttons.
//!
//! Runs on a Raspberry Pi Pico RP2040. See `led4_clock::hardware` for the wiring.
#![no_std]
#![no_main]
#![allow(clippy::future_not_send, reason = "Single-threaded")]

use core::convert::Infallible;

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use led4_clock::hardware::Pico1Hardware;
use led4_clock::{ClockConfig, ClockLoop, Result};
use panic_probe as _;

#[embassy_executor::main]
pub async fn main(_spawner: Spawner) -> ! {
    // If it returns, something went wrong.
    let err = inner_main().unwrap_err();
    panic!("{err}");
}

fn inner_main() -> Result<Infallible> {
    let hardware = Pico1Hardware::default();
    info!("Pico 1 clock, start {:?}", ClockConfig::DEFAULT.start);

    let mut clock = ClockLoop::new(hardware, ClockConfig::DEFAULT)?;
    // Never awaits; the loop busy-waits for all of its timing.
    clock.run()
}
