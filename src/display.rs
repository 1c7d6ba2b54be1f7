//! Composing what the four cells show and multiplexing it onto the display.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::Result;
use crate::config::{MultiplexTiming, Polarity};
use crate::led4::Led4;
use crate::shared_constants::{CELL_COUNT, SEGMENT_COUNT};

/// The digit (if any) for each position, left to right.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayFrame([Option<u8>; CELL_COUNT]);

impl DisplayFrame {
    #[must_use]
    pub const fn new(cells: [Option<u8>; CELL_COUNT]) -> Self {
        Self(cells)
    }

    /// `h:mm` on a 12-hour dial. The hour's leading zero is suppressed; the
    /// minutes always take two cells.
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "Splitting a number into decimal digits"
    )]
    #[must_use]
    pub const fn from_time(hours: u8, minutes: u8) -> Self {
        let (hour_tens, hour_ones) = if hours < 10 {
            (None, Some(hours))
        } else {
            (Some(hours / 10), Some(hours % 10))
        };
        let (minute_tens, minute_ones) = if minutes < 10 {
            (Some(0), Some(minutes))
        } else {
            (Some(minutes / 10), Some(minutes % 10))
        };
        Self([hour_tens, hour_ones, minute_tens, minute_ones])
    }

    /// `number` left-aligned, without leading zeros. Past four digits only the
    /// four least-significant ones are shown.
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "Splitting a number into decimal digits"
    )]
    #[must_use]
    pub fn from_number(number: u16) -> Self {
        let width = match number {
            0..=9 => 1,
            10..=99 => 2,
            100..=999 => 3,
            _ => CELL_COUNT,
        };
        let mut cells = [None; CELL_COUNT];
        let mut rest = number;
        for cell in cells.iter_mut().take(width).rev() {
            #[expect(clippy::cast_possible_truncation, reason = "A remainder of 10 fits in u8")]
            let digit = (rest % 10) as u8;
            *cell = Some(digit);
            rest /= 10;
        }
        Self(cells)
    }

    /// The digit at `position` (1-4), if that cell is lit.
    #[must_use]
    pub fn digit_at(&self, position: u8) -> Option<u8> {
        let index = usize::from(position.checked_sub(1)?);
        self.0.get(index).copied().flatten()
    }

    /// `(position, digit)` for every lit cell, left to right.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (1_u8..)
            .zip(self.0.iter())
            .filter_map(|(position, cell)| cell.map(|digit| (position, digit)))
    }
}

/// The Display Refresher: one [`Led4`] plus the busy-wait that times the multiplexing.
///
/// Every call to [`refresh`](Display::refresh) is one complete pass. The display
/// is dark before the first cell and after the last one, so nothing stale is
/// lit between passes.
pub struct Display<P, D> {
    led4: Led4<P>,
    delay: D,
    timing: MultiplexTiming,
}

impl<P: OutputPin, D: DelayNs> Display<P, D> {
    pub const fn new(led4: Led4<P>, delay: D, timing: MultiplexTiming) -> Self {
        Self {
            led4,
            delay,
            timing,
        }
    }

    /// Builds the [`Led4`] from its pins as well.
    pub const fn from_pins(
        cell_pins: [P; CELL_COUNT],
        segment_pins: [P; SEGMENT_COUNT],
        polarity: Polarity,
        delay: D,
        timing: MultiplexTiming,
    ) -> Self {
        Self::new(Led4::new(cell_pins, segment_pins, polarity), delay, timing)
    }

    /// One pass showing `hours:minutes`, then the frame dead time.
    ///
    /// # Errors
    ///
    /// Returns an error if a line cannot be driven.
    pub fn refresh(&mut self, hours: u8, minutes: u8) -> Result<()> {
        let frame = DisplayFrame::from_time(hours, minutes);
        self.show_frame(&frame, self.timing.frame_blank_us)
    }

    /// One pass showing `number` left-aligned, then the shorter number dead time.
    ///
    /// # Errors
    ///
    /// Returns an error if a line cannot be driven.
    pub fn refresh_number(&mut self, number: u16) -> Result<()> {
        let frame = DisplayFrame::from_number(number);
        self.show_frame(&frame, self.timing.number_blank_us)
    }

    /// Clears, shows each lit cell for the settling delay, clears, and holds
    /// dark for `blank_us`.
    ///
    /// # Errors
    ///
    /// Returns an error if a line cannot be driven.
    pub fn show_frame(&mut self, frame: &DisplayFrame, blank_us: u32) -> Result<()> {
        self.led4.clear_display()?;
        for (position, digit) in frame.iter() {
            self.led4.show_digit(digit, position)?;
            self.delay.delay_us(self.timing.settle_us);
        }
        self.led4.clear_display()?;
        self.delay.delay_us(blank_us);
        Ok(())
    }

    /// Deselects all cells and blanks all segments.
    ///
    /// # Errors
    ///
    /// Returns an error if a line cannot be driven.
    pub fn clear(&mut self) -> Result<()> {
        self.led4.clear_display()
    }
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;
    use crate::segments::segments_for;
    use crate::virtual_hardware::{Glimpse, VirtualDelay, VirtualPanel, VirtualPin};

    fn display(panel: &VirtualPanel) -> Display<VirtualPin<'_>, VirtualDelay<'_>> {
        Display::from_pins(
            panel.cell_pins(),
            panel.segment_pins(),
            Polarity::default(),
            panel.delay(),
            MultiplexTiming::DEFAULT,
        )
    }

    fn glimpse(position: u8, digit: u8) -> Glimpse {
        Glimpse {
            position,
            cells_lit: 1,
            segments: segments_for(digit),
            duration_us: 200,
        }
    }

    #[test]
    fn test_frame_single_digit_hour() {
        let frame = DisplayFrame::from_time(5, 0);
        assert_eq!(frame, DisplayFrame::new([None, Some(5), Some(0), Some(0)]));
        assert_eq!(frame.digit_at(1), None);
        assert_eq!(frame.digit_at(2), Some(5));
    }

    #[test]
    fn test_frame_two_digit_hour() {
        let frame = DisplayFrame::from_time(12, 34);
        assert_eq!(frame, DisplayFrame::new([Some(1), Some(2), Some(3), Some(4)]));
    }

    #[test]
    fn test_frame_minutes_leading_zero() {
        assert_eq!(
            DisplayFrame::from_time(10, 7),
            DisplayFrame::new([Some(1), Some(0), Some(0), Some(7)])
        );
        assert_eq!(
            DisplayFrame::from_time(9, 10),
            DisplayFrame::new([None, Some(9), Some(1), Some(0)])
        );
    }

    #[test]
    fn test_frame_from_number() {
        assert_eq!(
            DisplayFrame::from_number(1234),
            DisplayFrame::new([Some(1), Some(2), Some(3), Some(4)])
        );
        assert_eq!(
            DisplayFrame::from_number(42),
            DisplayFrame::new([Some(4), Some(2), None, None])
        );
        assert_eq!(
            DisplayFrame::from_number(0),
            DisplayFrame::new([Some(0), None, None, None])
        );
        assert_eq!(
            DisplayFrame::from_number(12_345),
            DisplayFrame::new([Some(2), Some(3), Some(4), Some(5)])
        );
        assert_eq!(
            DisplayFrame::from_number(10_000),
            DisplayFrame::new([Some(0), Some(0), Some(0), Some(0)])
        );
    }

    #[test]
    fn test_digit_at_out_of_range() {
        let frame = DisplayFrame::from_time(12, 34);
        assert_eq!(frame.digit_at(0), None);
        assert_eq!(frame.digit_at(5), None);
    }

    #[test]
    fn test_refresh_shows_five_oclock() {
        let panel = VirtualPanel::default();
        let mut display = display(&panel);

        display.refresh(5, 0).expect("virtual pins never fail");

        assert_eq!(
            panel.take_glimpses().as_slice(),
            &[glimpse(2, 5), glimpse(3, 0), glimpse(4, 0)]
        );
        assert!(panel.is_dark());
    }

    #[test]
    fn test_refresh_shows_twelve_thirty_four() {
        let panel = VirtualPanel::default();
        let mut display = display(&panel);

        display.refresh(12, 34).expect("virtual pins never fail");

        assert_eq!(
            panel.take_glimpses().as_slice(),
            &[glimpse(1, 1), glimpse(2, 2), glimpse(3, 3), glimpse(4, 4)]
        );
        assert!(panel.is_dark());
    }

    #[test]
    fn test_refresh_timing() {
        let panel = VirtualPanel::default();
        let mut display = display(&panel);

        display.refresh(12, 34).expect("virtual pins never fail");
        assert_eq!(panel.elapsed_ns(), (4 * 200 + 1_000) * 1_000);

        display.refresh(5, 0).expect("virtual pins never fail");
        assert_eq!(panel.elapsed_ns(), (4 * 200 + 1_000 + 3 * 200 + 1_000) * 1_000);
    }

    #[test]
    fn test_refresh_number() {
        let panel = VirtualPanel::default();
        let mut display = display(&panel);

        display.refresh_number(42).expect("virtual pins never fail");

        assert_eq!(
            panel.take_glimpses().as_slice(),
            &[glimpse(1, 4), glimpse(2, 2)]
        );
        assert_eq!(panel.elapsed_ns(), (2 * 200 + 750) * 1_000);
        assert!(panel.is_dark());
    }

    #[test]
    fn test_clear() {
        let panel = VirtualPanel::default();
        let mut display = display(&panel);

        display.clear().expect("virtual pins never fail");
        display.clear().expect("virtual pins never fail");
        assert!(panel.is_dark());
        assert_eq!(panel.elapsed_ns(), 0);
    }
}
