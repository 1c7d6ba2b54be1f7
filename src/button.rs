//! Edge-triggered button sampling.
//!
//! The clock loop samples each button once per iteration. A press counts once,
//! when the line first reads pressed; holding the button does not repeat.

use embedded_hal::digital::InputPin;

use crate::Result;
use crate::error::Error::CannotReadInputState;

/// Whether the button was already down on the previous sample.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonState {
    #[default]
    Idle,
    Held,
}

impl ButtonState {
    /// Next state for a sample, and whether the sample is a new press.
    #[must_use]
    pub const fn next(self, pressed: bool) -> (Self, bool) {
        match (self, pressed) {
            (Self::Idle, true) => (Self::Held, true),
            (Self::Held, true) => (Self::Held, false),
            (Self::Idle | Self::Held, false) => (Self::Idle, false),
        }
    }
}

/// A button wired active-high: the line reads high while pressed.
pub struct Button<I> {
    input: I,
    state: ButtonState,
}

impl<I: InputPin> Button<I> {
    pub const fn new(input: I) -> Self {
        Self {
            input,
            state: ButtonState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> ButtonState {
        self.state
    }

    /// Samples the line. Returns `true` exactly once per press.
    ///
    /// # Errors
    ///
    /// Returns an error if the line cannot be read.
    pub fn poll(&mut self) -> Result<bool> {
        let pressed = self.input.is_high().map_err(|_| CannotReadInputState)?;
        let (state, is_new_press) = self.state.next(pressed);
        self.state = state;
        Ok(is_new_press)
    }
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;
    use crate::virtual_hardware::VirtualPanel;

    fn count_presses(samples: &[bool]) -> usize {
        let mut state = ButtonState::default();
        samples
            .iter()
            .filter(|&&pressed| {
                let (next, is_new_press) = state.next(pressed);
                state = next;
                is_new_press
            })
            .count()
    }

    #[test]
    fn test_transitions() {
        assert_eq!(ButtonState::Idle.next(true), (ButtonState::Held, true));
        assert_eq!(ButtonState::Idle.next(false), (ButtonState::Idle, false));
        assert_eq!(ButtonState::Held.next(true), (ButtonState::Held, false));
        assert_eq!(ButtonState::Held.next(false), (ButtonState::Idle, false));
    }

    #[test]
    fn test_long_hold_counts_once() {
        for held_for in [1, 2, 10, 500] {
            let mut samples = [false; 502];
            for sample in samples.iter_mut().skip(1).take(held_for) {
                *sample = true;
            }
            assert_eq!(count_presses(&samples), 1, "held for {held_for}");
        }
    }

    #[test]
    fn test_alternating_counts_each_press() {
        assert_eq!(count_presses(&[true, false, true, false]), 2);
        assert_eq!(count_presses(&[true, true, false, true, true, false]), 2);
    }

    #[test]
    fn test_no_presses() {
        assert_eq!(count_presses(&[false; 20]), 0);
    }

    #[test]
    fn test_poll_reads_line() {
        let panel = VirtualPanel::default();
        let mut button = Button::new(panel.minute_button());

        assert!(!button.poll().expect("virtual pins never fail"));
        panel.set_minute_button(true);
        assert!(button.poll().expect("virtual pins never fail"));
        assert_eq!(button.state(), ButtonState::Held);
        assert!(!button.poll().expect("virtual pins never fail"));
        panel.set_minute_button(false);
        assert!(!button.poll().expect("virtual pins never fail"));
        assert_eq!(button.state(), ButtonState::Idle);
        panel.set_minute_button(true);
        assert!(button.poll().expect("virtual pins never fail"));
    }
}
