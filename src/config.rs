//! Runtime configuration for the clock loop.

use embedded_hal::digital::PinState;

use crate::clock_state::TimeOfDay;
use crate::shared_constants::{
    FRAME_BLANK_US, NUMBER_BLANK_US, SECOND_TICKS, SETTLE_DELAY_US, START_HOURS, START_MINUTES,
    START_SECONDS, SUB_SECOND_TICKS,
};

/// The electrical level that turns a line "on".
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActiveLevel {
    #[default]
    High,
    Low,
}

impl ActiveLevel {
    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }

    /// The pin state for a line that should be on (`true`) or off (`false`).
    #[must_use]
    pub const fn pin_state(self, active: bool) -> PinState {
        match (self, active) {
            (Self::High, true) | (Self::Low, false) => PinState::High,
            (Self::High, false) | (Self::Low, true) => PinState::Low,
        }
    }
}

/// Active levels of the line groups.
///
/// Common-cathode displays usually pull a cell low to select it; common-anode
/// displays light a segment by pulling it low.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Polarity {
    pub cells: ActiveLevel,
    pub segments: ActiveLevel,
    pub colon: ActiveLevel,
}

/// Tick counts compared against the free-running counter once per iteration.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerThresholds {
    pub sub_second: u32,
    pub second: u32,
}

impl TimerThresholds {
    pub const DEFAULT: Self = Self {
        sub_second: SUB_SECOND_TICKS,
        second: SECOND_TICKS,
    };
}

impl Default for TimerThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Busy-wait durations of a multiplex pass, in microseconds.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiplexTiming {
    pub settle_us: u32,
    pub frame_blank_us: u32,
    pub number_blank_us: u32,
}

impl MultiplexTiming {
    pub const DEFAULT: Self = Self {
        settle_us: SETTLE_DELAY_US,
        frame_blank_us: FRAME_BLANK_US,
        number_blank_us: NUMBER_BLANK_US,
    };
}

impl Default for MultiplexTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Everything the clock loop needs to know that is not wiring.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockConfig {
    pub start: TimeOfDay,
    pub thresholds: TimerThresholds,
    pub timing: MultiplexTiming,
    pub polarity: Polarity,
}

impl ClockConfig {
    /// Start time from the build environment, default thresholds and timing,
    /// active-high lines.
    pub const DEFAULT: Self = Self {
        start: TimeOfDay::new(START_HOURS, START_MINUTES, START_SECONDS),
        thresholds: TimerThresholds::DEFAULT,
        timing: MultiplexTiming::DEFAULT,
        polarity: Polarity {
            cells: ActiveLevel::High,
            segments: ActiveLevel::High,
            colon: ActiveLevel::High,
        },
    };

    /// Pulls the start time into range and keeps the second threshold above zero.
    #[must_use]
    pub const fn validated(self) -> Self {
        let second = if self.thresholds.second == 0 {
            1
        } else {
            self.thresholds.second
        };
        Self {
            start: TimeOfDay::new(self.start.hours, self.start.minutes, self.start.seconds),
            thresholds: TimerThresholds {
                sub_second: self.thresholds.sub_second,
                second,
            },
            ..self
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
