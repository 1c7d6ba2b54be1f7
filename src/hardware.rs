//! Raspberry Pi Pico (RP2040) wiring.
//!
//! | Line | GPIO |
//! |---|---|
//! | colon | 0 |
//! | positions 1-4 | 1-4 |
//! | segments A-G | 5-11 |
//! | minute button | 12 |
//! | hour button | 13 |
//!
//! Buttons connect the pin to 3V3 and rely on the internal pull-down.

use embassy_rp::gpio::{self, Level};
use embassy_time::{Delay, Instant};

use crate::clock_loop::ClockHardware;
use crate::shared_constants::TICK_PERIOD_US;
use crate::tick_counter::TickCounter;

/// The clock's hardware on a Pico 1.
pub type Pico1Hardware =
    ClockHardware<gpio::Output<'static>, gpio::Input<'static>, Delay, InstantTickCounter>;

/// Ticks of [`TICK_PERIOD_US`] counted from the embassy time driver.
pub struct InstantTickCounter {
    start: Instant,
}

impl InstantTickCounter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for InstantTickCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl TickCounter for InstantTickCounter {
    fn ticks(&mut self) -> u32 {
        let ticks = self
            .start
            .elapsed()
            .as_micros()
            .checked_div(TICK_PERIOD_US)
            .unwrap_or(0);
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }

    fn reset(&mut self) {
        self.start = Instant::now();
    }
}

impl Default for Pico1Hardware {
    fn default() -> Self {
        let peripherals: embassy_rp::Peripherals =
            embassy_rp::init(embassy_rp::config::Config::default());

        let cells = [
            gpio::Output::new(peripherals.PIN_1, Level::Low),
            gpio::Output::new(peripherals.PIN_2, Level::Low),
            gpio::Output::new(peripherals.PIN_3, Level::Low),
            gpio::Output::new(peripherals.PIN_4, Level::Low),
        ];

        let segments = [
            gpio::Output::new(peripherals.PIN_5, Level::Low),
            gpio::Output::new(peripherals.PIN_6, Level::Low),
            gpio::Output::new(peripherals.PIN_7, Level::Low),
            gpio::Output::new(peripherals.PIN_8, Level::Low),
            gpio::Output::new(peripherals.PIN_9, Level::Low),
            gpio::Output::new(peripherals.PIN_10, Level::Low),
            gpio::Output::new(peripherals.PIN_11, Level::Low),
        ];

        let colon = gpio::Output::new(peripherals.PIN_0, Level::Low);

        let minute_button = gpio::Input::new(peripherals.PIN_12, gpio::Pull::Down);
        let hour_button = gpio::Input::new(peripherals.PIN_13, gpio::Pull::Down);

        Self {
            cells,
            segments,
            colon,
            minute_button,
            hour_button,
            delay: Delay,
            ticks: InstantTickCounter::new(),
        }
    }
}
