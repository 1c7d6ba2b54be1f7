//! Time of day and the rules that advance it.
//!
//! Two paths change the hour and they wrap differently: a button press wraps
//! at `hours >= 12`, the natural rollover only when `hours > 12`. Starting from
//! a valid time both land on 1 after 12. The difference is kept as is.

#[cfg(feature = "defmt")]
use defmt::{debug, trace};

use crate::config::TimerThresholds;

/// Hours (1-12), minutes (0-59) and seconds (0-59) on a 12-hour dial.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl TimeOfDay {
    /// Creates a time, pulling each field into its range.
    #[must_use]
    pub const fn new(hours: u8, minutes: u8, seconds: u8) -> Self {
        Self {
            hours: clamp(hours, 1, 12),
            minutes: clamp(minutes, 0, 59),
            seconds: clamp(seconds, 0, 59),
        }
    }

    /// Minute button: `59 -> 0`, otherwise `+1`. The hour is left alone.
    pub const fn increment_minute(&mut self) {
        self.minutes = if self.minutes >= 59 {
            0
        } else {
            self.minutes.saturating_add(1)
        };
    }

    /// Hour button: `12 -> 1`, otherwise `+1`.
    pub const fn increment_hour(&mut self) {
        self.hours = if self.hours >= 12 {
            1
        } else {
            self.hours.saturating_add(1)
        };
    }

    /// One second of real time: seconds carry into minutes, minutes into hours,
    /// and hours past 12 wrap to 1.
    pub const fn advance_second(&mut self) {
        self.seconds = self.seconds.saturating_add(1);
        if self.seconds >= 60 {
            self.minutes = self.minutes.saturating_add(1);
            self.seconds = 0;
        }
        if self.minutes >= 60 {
            self.hours = self.hours.saturating_add(1);
            self.minutes = 0;
        }
        if self.hours > 12 {
            self.hours = 1;
        }
    }
}

const fn clamp(value: u8, min: u8, max: u8) -> u8 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Something that moves the clock forward.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    MinutePressed,
    HourPressed,
    SecondElapsed,
}

/// What the timer check of one iteration found.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerCheck {
    /// The counter was at or past the sub-second threshold.
    pub sub_second: bool,
    /// The counter reached the second threshold and must be reset.
    pub second: bool,
}

impl TimerCheck {
    #[must_use]
    pub const fn from_ticks(ticks: u32, thresholds: TimerThresholds) -> Self {
        Self {
            sub_second: ticks >= thresholds.sub_second,
            second: ticks >= thresholds.second,
        }
    }
}

/// All state that outlives one iteration of the clock loop.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockState {
    time: TimeOfDay,
    fine_ticks: u32,
}

impl ClockState {
    /// Starts at `time`, clamped into range.
    #[must_use]
    pub const fn new(time: TimeOfDay) -> Self {
        Self {
            time: TimeOfDay::new(time.hours, time.minutes, time.seconds),
            fine_ticks: 0,
        }
    }

    #[must_use]
    pub const fn time(&self) -> TimeOfDay {
        self.time
    }

    /// Iterations that found the tick counter at or past the sub-second
    /// threshold. Wraps; never reset.
    #[must_use]
    pub const fn fine_ticks(&self) -> u32 {
        self.fine_ticks
    }

    /// Replaces the time, pulling each field into its range.
    pub const fn set_time(&mut self, time: TimeOfDay) {
        self.time = TimeOfDay::new(time.hours, time.minutes, time.seconds);
    }

    pub fn apply(&mut self, event: ClockEvent) {
        match event {
            ClockEvent::MinutePressed => {
                self.time.increment_minute();
                #[cfg(feature = "defmt")]
                debug!("minute button -> {:?}", self.time);
            }
            ClockEvent::HourPressed => {
                self.time.increment_hour();
                #[cfg(feature = "defmt")]
                debug!("hour button -> {:?}", self.time);
            }
            ClockEvent::SecondElapsed => {
                self.time.advance_second();
                #[cfg(feature = "defmt")]
                trace!("second -> {:?}", self.time);
            }
        }
    }

    /// Applies the timer check. Returns `true` when a second elapsed and the
    /// counter must be reset.
    pub fn apply_timer(&mut self, check: TimerCheck) -> bool {
        if check.sub_second {
            self.fine_ticks = self.fine_ticks.wrapping_add(1);
        }
        if check.second {
            self.apply(ClockEvent::SecondElapsed);
        }
        check.second
    }
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;

    #[test]
    fn test_minute_wraps_without_touching_hour() {
        let mut time = TimeOfDay::new(7, 59, 10);
        time.increment_minute();
        assert_eq!(time, TimeOfDay::new(7, 0, 10));
    }

    #[test]
    fn test_minute_increments() {
        let mut time = TimeOfDay::new(7, 9, 0);
        time.increment_minute();
        assert_eq!(time.minutes, 10);
    }

    #[test]
    fn test_hour_button_wraps_at_twelve() {
        let mut time = TimeOfDay::new(12, 30, 0);
        time.increment_hour();
        assert_eq!(time.hours, 1);
        time.increment_hour();
        assert_eq!(time.hours, 2);
    }

    #[test]
    fn test_hour_button_wraps_out_of_range_hour() {
        // The button path uses >= 12, so even a corrupt 13 goes to 1
        let mut time = TimeOfDay {
            hours: 13,
            minutes: 0,
            seconds: 0,
        };
        time.increment_hour();
        assert_eq!(time.hours, 1);
    }

    #[test]
    fn test_natural_rollover_chain() {
        let mut time = TimeOfDay::new(12, 59, 59);
        time.advance_second();
        assert_eq!(time, TimeOfDay::new(1, 0, 0));
    }

    #[test]
    fn test_natural_rollover_eleven_to_twelve() {
        // The natural path only wraps past 12, so 11:59:59 becomes 12:00:00
        let mut time = TimeOfDay::new(11, 59, 59);
        time.advance_second();
        assert_eq!(time, TimeOfDay::new(12, 0, 0));
    }

    #[test]
    fn test_second_carries_into_minute() {
        let mut time = TimeOfDay::new(3, 14, 59);
        time.advance_second();
        assert_eq!(time, TimeOfDay::new(3, 15, 0));
        time.advance_second();
        assert_eq!(time, TimeOfDay::new(3, 15, 1));
    }

    #[test]
    fn test_new_clamps() {
        assert_eq!(
            TimeOfDay::new(0, 60, 99),
            TimeOfDay {
                hours: 1,
                minutes: 59,
                seconds: 59
            }
        );
        assert_eq!(TimeOfDay::new(13, 0, 0).hours, 12);
    }

    #[test]
    fn test_timer_check() {
        let thresholds = TimerThresholds {
            sub_second: 10,
            second: 100,
        };
        assert_eq!(TimerCheck::from_ticks(9, thresholds), TimerCheck::default());
        assert_eq!(
            TimerCheck::from_ticks(10, thresholds),
            TimerCheck {
                sub_second: true,
                second: false
            }
        );
        assert_eq!(
            TimerCheck::from_ticks(100, thresholds),
            TimerCheck {
                sub_second: true,
                second: true
            }
        );
    }

    #[test]
    fn test_apply_timer() {
        let mut state = ClockState::new(TimeOfDay::new(5, 0, 35));

        assert!(!state.apply_timer(TimerCheck::default()));
        assert_eq!(state.fine_ticks(), 0);

        assert!(!state.apply_timer(TimerCheck {
            sub_second: true,
            second: false,
        }));
        assert_eq!(state.fine_ticks(), 1);
        assert_eq!(state.time(), TimeOfDay::new(5, 0, 35));

        assert!(state.apply_timer(TimerCheck {
            sub_second: true,
            second: true,
        }));
        assert_eq!(state.fine_ticks(), 2);
        assert_eq!(state.time(), TimeOfDay::new(5, 0, 36));
    }

    #[test]
    fn test_apply_button_events() {
        let mut state = ClockState::new(TimeOfDay::new(12, 59, 0));
        state.apply(ClockEvent::MinutePressed);
        state.apply(ClockEvent::HourPressed);
        assert_eq!(state.time(), TimeOfDay::new(1, 0, 0));
    }

    #[test]
    fn test_set_time_clamps() {
        let mut state = ClockState::new(TimeOfDay::new(5, 0, 35));
        state.set_time(TimeOfDay {
            hours: 0,
            minutes: 75,
            seconds: 60,
        });
        assert_eq!(state.time(), TimeOfDay::new(1, 59, 59));

        state.set_time(TimeOfDay {
            hours: 13,
            minutes: 0,
            seconds: 0,
        });
        assert_eq!(state.time().hours, 12);
    }
}
