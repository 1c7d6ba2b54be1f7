//! The clock's main loop.
//!
//! Each iteration runs the same fixed sequence:
//!
//! 1. sample both buttons and apply any new presses,
//! 2. multiplex the current time onto the display,
//! 3. check the tick counter and roll the second over when it is due.
//!
//! The display pass is what paces the loop, so the loop rate is also the
//! button sampling rate.

use core::convert::Infallible;

#[cfg(feature = "defmt")]
use defmt::info;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::Result;
use crate::button::Button;
use crate::clock_state::{ClockEvent, ClockState, TimeOfDay, TimerCheck};
use crate::config::{ClockConfig, TimerThresholds};
use crate::display::Display;
use crate::error::Error::CannotSetOutputState;
use crate::shared_constants::{CELL_COUNT, SEGMENT_COUNT};
use crate::tick_counter::TickCounter;

/// Every line and capability the clock uses.
pub struct ClockHardware<P, I, D, T> {
    /// Position lines, left to right.
    pub cells: [P; CELL_COUNT],
    /// Segment lines A to G.
    pub segments: [P; SEGMENT_COUNT],
    pub colon: P,
    pub minute_button: I,
    pub hour_button: I,
    pub delay: D,
    pub ticks: T,
}

/// What happened during one iteration.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Iteration {
    pub minute_pressed: bool,
    pub hour_pressed: bool,
    pub second_elapsed: bool,
}

/// The clock: state, buttons, display and tick counter.
///
/// # Example
///
/// ```
/// use led4_clock::clock_loop::{ClockHardware, ClockLoop};
/// use led4_clock::clock_state::TimeOfDay;
/// use led4_clock::config::ClockConfig;
/// use led4_clock::virtual_hardware::VirtualPanel;
///
/// let panel = VirtualPanel::default();
/// let config = ClockConfig {
///     start: TimeOfDay::new(12, 59, 59),
///     ..ClockConfig::DEFAULT
/// };
/// let mut clock = ClockLoop::new(
///     ClockHardware {
///         cells: panel.cell_pins(),
///         segments: panel.segment_pins(),
///         colon: panel.colon_pin(),
///         minute_button: panel.minute_button(),
///         hour_button: panel.hour_button(),
///         delay: panel.delay(),
///         ticks: panel.tick_counter(),
///     },
///     config,
/// )?;
///
/// panel.set_ticks(config.thresholds.second);
/// clock.iterate()?;
/// assert_eq!(clock.time(), TimeOfDay::new(1, 0, 0));
/// # Ok::<(), led4_clock::Error>(())
/// ```
pub struct ClockLoop<P, I, D, T> {
    state: ClockState,
    minute_button: Button<I>,
    hour_button: Button<I>,
    display: Display<P, D>,
    // Held only so the colon stays lit
    _colon: P,
    ticks: T,
    thresholds: TimerThresholds,
}

impl<P, I, D, T> ClockLoop<P, I, D, T>
where
    P: OutputPin,
    I: InputPin,
    D: DelayNs,
    T: TickCounter,
{
    /// Takes over the hardware and lights the colon.
    ///
    /// # Errors
    ///
    /// Returns an error if the colon line cannot be driven.
    pub fn new(hardware: ClockHardware<P, I, D, T>, config: ClockConfig) -> Result<Self> {
        let ClockHardware {
            cells,
            segments,
            mut colon,
            minute_button,
            hour_button,
            delay,
            ticks,
        } = hardware;
        let config = config.validated();

        colon
            .set_state(config.polarity.colon.pin_state(true))
            .map_err(|_| CannotSetOutputState)?;

        #[cfg(feature = "defmt")]
        info!(
            "clock starts at {:?}; second every {} ticks",
            config.start, config.thresholds.second
        );

        Ok(Self {
            state: ClockState::new(config.start),
            minute_button: Button::new(minute_button),
            hour_button: Button::new(hour_button),
            display: Display::from_pins(cells, segments, config.polarity, delay, config.timing),
            _colon: colon,
            ticks,
            thresholds: config.thresholds,
        })
    }

    /// Runs one pass: buttons, display, timer.
    ///
    /// # Errors
    ///
    /// Returns an error if a line cannot be read or driven.
    pub fn iterate(&mut self) -> Result<Iteration> {
        let minute_pressed = self.minute_button.poll()?;
        let hour_pressed = self.hour_button.poll()?;
        if minute_pressed {
            self.state.apply(ClockEvent::MinutePressed);
        }
        if hour_pressed {
            self.state.apply(ClockEvent::HourPressed);
        }

        let time = self.state.time();
        self.display.refresh(time.hours, time.minutes)?;

        let check = TimerCheck::from_ticks(self.ticks.ticks(), self.thresholds);
        let second_elapsed = self.state.apply_timer(check);
        if second_elapsed {
            self.ticks.reset();
        }

        Ok(Iteration {
            minute_pressed,
            hour_pressed,
            second_elapsed,
        })
    }

    /// Iterates until a line fails, which on real hardware is never.
    ///
    /// # Errors
    ///
    /// Returns the first line error.
    pub fn run(&mut self) -> Result<Infallible> {
        loop {
            self.iterate()?;
        }
    }

    #[must_use]
    pub const fn time(&self) -> TimeOfDay {
        self.state.time()
    }

    #[must_use]
    pub const fn state(&self) -> &ClockState {
        &self.state
    }

    /// Sets the time; out-of-range fields are clamped.
    pub const fn set_time(&mut self, time: TimeOfDay) {
        self.state.set_time(time);
    }

    /// Shows `number` for one pass instead of the time. Buttons and the
    /// tick counter are not touched.
    ///
    /// # Errors
    ///
    /// Returns an error if a line cannot be driven.
    pub fn show_number(&mut self, number: u16) -> Result<()> {
        self.display.refresh_number(number)
    }
}
