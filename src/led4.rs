//! A driver for a multiplexed 4-digit, 7-segment LED display.
//!
//! All four cells share the seven segment lines. Only one cell may be selected
//! at a time, and the segment lines must be blanked between cells or the old
//! pattern bleeds into the next cell.
//!
//! See [`Led4`] for usage.

use embedded_hal::digital::OutputPin;

use crate::Result;
use crate::config::Polarity;
use crate::output_array::OutputArray;
use crate::segments::segments_for;
use crate::shared_constants::{CELL_COUNT, SEGMENT_COUNT};

/// Drives the four position lines and seven segment lines of the display.
///
/// # Hardware Requirements
///
/// - Cell lines select which digit is active (one line per position, left to right)
/// - Segment lines choose the lit segments, in the order A, B, C, D, E, F, G
///
/// Active levels come from [`Polarity`].
///
/// # Example
///
/// ```
/// use led4_clock::config::Polarity;
/// use led4_clock::led4::Led4;
/// use led4_clock::virtual_hardware::VirtualPanel;
///
/// let panel = VirtualPanel::default();
/// let mut led4 = Led4::new(panel.cell_pins(), panel.segment_pins(), Polarity::default());
///
/// // Show a '7' in the third position
/// led4.show_digit(7, 3)?;
/// assert_eq!(panel.active_positions().as_slice(), &[3]);
///
/// led4.clear_display()?;
/// assert!(panel.is_dark());
/// # Ok::<(), led4_clock::Error>(())
/// ```
pub struct Led4<P> {
    cells: OutputArray<P, CELL_COUNT>,
    segments: OutputArray<P, SEGMENT_COUNT>,
}

impl<P: OutputPin> Led4<P> {
    pub const fn new(
        cell_pins: [P; CELL_COUNT],
        segment_pins: [P; SEGMENT_COUNT],
        polarity: Polarity,
    ) -> Self {
        Self {
            cells: OutputArray::new(cell_pins, polarity.cells),
            segments: OutputArray::new(segment_pins, polarity.segments),
        }
    }

    /// Shows `digit` at `position` (1-4) and nothing anywhere else.
    ///
    /// A `position` outside 1-4 selects no cell, but the segment lines are
    /// still set.
    ///
    /// # Errors
    ///
    /// Returns an error if a line cannot be driven.
    pub fn show_digit(&mut self, digit: u8, position: u8) -> Result<()> {
        self.all_off()?;
        self.segments_off()?;
        if let Some(index) = position.checked_sub(1) {
            self.cells.activate_index(usize::from(index))?;
        }
        self.segments.set_from_bits(segments_for(digit).bits())
    }

    /// Deselects all four cells. Segment lines are left as they are.
    ///
    /// # Errors
    ///
    /// Returns an error if a line cannot be driven.
    pub fn all_off(&mut self) -> Result<()> {
        self.cells.set_all(false)
    }

    /// Turns every segment line off.
    ///
    /// # Errors
    ///
    /// Returns an error if a line cannot be driven.
    pub fn segments_off(&mut self) -> Result<()> {
        self.segments.set_all(false)
    }

    /// Deselects all cells and blanks all segments.
    ///
    /// # Errors
    ///
    /// Returns an error if a line cannot be driven.
    pub fn clear_display(&mut self) -> Result<()> {
        self.all_off()?;
        self.segments_off()
    }
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;
    use crate::config::ActiveLevel;
    use crate::virtual_hardware::VirtualPanel;

    #[test]
    fn test_show_digit_selects_one_cell() {
        let panel = VirtualPanel::default();
        let mut led4 = Led4::new(panel.cell_pins(), panel.segment_pins(), Polarity::default());

        for position in 1..=4 {
            led4.show_digit(8, position).expect("virtual pins never fail");
            assert_eq!(panel.active_positions().as_slice(), &[position]);
            assert_eq!(panel.lit_segments(), segments_for(8));
        }
    }

    #[test]
    fn test_show_digit_replaces_previous_pattern() {
        let panel = VirtualPanel::default();
        let mut led4 = Led4::new(panel.cell_pins(), panel.segment_pins(), Polarity::default());

        led4.show_digit(8, 1).expect("virtual pins never fail");
        led4.show_digit(1, 2).expect("virtual pins never fail");
        assert_eq!(panel.active_positions().as_slice(), &[2]);
        assert_eq!(panel.lit_segments(), segments_for(1));
    }

    #[test]
    fn test_out_of_range_position_selects_nothing() {
        let panel = VirtualPanel::default();
        let mut led4 = Led4::new(panel.cell_pins(), panel.segment_pins(), Polarity::default());

        led4.show_digit(3, 2).expect("virtual pins never fail");
        for position in [0, 5, 200] {
            led4.show_digit(3, position).expect("virtual pins never fail");
            assert!(panel.active_positions().is_empty());
            assert_eq!(panel.lit_segments(), segments_for(3));
        }
    }

    #[test]
    fn test_all_off_keeps_segments() {
        let panel = VirtualPanel::default();
        let mut led4 = Led4::new(panel.cell_pins(), panel.segment_pins(), Polarity::default());

        led4.show_digit(4, 4).expect("virtual pins never fail");
        led4.all_off().expect("virtual pins never fail");
        assert!(panel.active_positions().is_empty());
        assert_eq!(panel.lit_segments(), segments_for(4));
    }

    #[test]
    fn test_clear_display_is_idempotent() {
        let panel = VirtualPanel::default();
        let mut led4 = Led4::new(panel.cell_pins(), panel.segment_pins(), Polarity::default());

        led4.show_digit(0, 1).expect("virtual pins never fail");
        led4.clear_display().expect("virtual pins never fail");
        let once = (panel.cell_levels(), panel.segment_levels());
        led4.clear_display().expect("virtual pins never fail");
        assert_eq!((panel.cell_levels(), panel.segment_levels()), once);
        assert!(panel.is_dark());
    }

    #[test]
    fn test_active_low_lines() {
        let polarity = Polarity {
            cells: ActiveLevel::Low,
            segments: ActiveLevel::Low,
            colon: ActiveLevel::High,
        };
        let panel = VirtualPanel::new(polarity);
        let mut led4 = Led4::new(panel.cell_pins(), panel.segment_pins(), polarity);

        led4.clear_display().expect("virtual pins never fail");
        assert_eq!(panel.cell_levels(), [true; CELL_COUNT]);
        assert_eq!(panel.segment_levels(), [true; SEGMENT_COUNT]);

        led4.show_digit(1, 2).expect("virtual pins never fail");
        assert_eq!(panel.cell_levels(), [true, false, true, true]);
        // B and C pulled low
        assert_eq!(
            panel.segment_levels(),
            [true, false, false, true, true, true, true]
        );
    }
}
