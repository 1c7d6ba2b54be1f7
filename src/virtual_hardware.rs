//! Stand-ins for the clock's hardware, for running the clock off-target.
//!
//! A [`VirtualPanel`] owns the state of every line, the tick counter and a
//! virtual wall clock. The pins, delay and counter it hands out borrow the
//! panel, so a test can keep inspecting the panel while the clock loop owns
//! the handles.
//!
//! Each busy-wait through [`VirtualDelay`] records a [`Glimpse`]: the position
//! and segments that were lit while the wait ran. That is what a viewer sees.

use core::cell::Cell;
use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use heapless::Vec;

use crate::config::Polarity;
use crate::segments::{Segment, SegmentSet};
use crate::shared_constants::{CELL_COUNT, SEGMENT_COUNT};
use crate::tick_counter::TickCounter;

/// The most glimpses kept between two calls to [`VirtualPanel::take_glimpses`].
pub const GLIMPSE_CAPACITY: usize = 32;

/// Glimpses recorded since the last take.
pub type Glimpses = Vec<Glimpse, GLIMPSE_CAPACITY>;

/// What was lit during one busy-wait.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glimpse {
    /// 1-based position of the leftmost selected cell.
    pub position: u8,
    /// How many cells were selected. More than one means ghosting.
    pub cells_lit: u8,
    pub segments: SegmentSet,
    pub duration_us: u32,
}

/// An output line whose level lives in a [`VirtualPanel`].
pub struct VirtualPin<'a>(&'a Cell<bool>);

impl ErrorType for VirtualPin<'_> {
    type Error = Infallible;
}

impl OutputPin for VirtualPin<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set(true);
        Ok(())
    }
}

/// A button line whose level lives in a [`VirtualPanel`].
pub struct VirtualInput<'a>(&'a Cell<bool>);

impl ErrorType for VirtualInput<'_> {
    type Error = Infallible;
}

impl InputPin for VirtualInput<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }
}

/// A busy-wait that advances the panel's virtual time instead of spinning.
pub struct VirtualDelay<'a>(&'a VirtualPanel);

impl DelayNs for VirtualDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.0.pass_time(ns);
    }
}

/// The panel's free-running tick counter.
pub struct VirtualTickCounter<'a>(&'a VirtualPanel);

impl TickCounter for VirtualTickCounter<'_> {
    fn ticks(&mut self) -> u32 {
        self.0.ticks.get()
    }

    fn reset(&mut self) {
        self.0.ticks.set(0);
        self.0.resets.set(self.0.resets.get().wrapping_add(1));
    }
}

/// Line levels, buttons, tick counter and virtual time of one simulated clock.
pub struct VirtualPanel {
    polarity: Polarity,
    colon: Cell<bool>,
    cells: [Cell<bool>; CELL_COUNT],
    segments: [Cell<bool>; SEGMENT_COUNT],
    minute_button: Cell<bool>,
    hour_button: Cell<bool>,
    ticks: Cell<u32>,
    resets: Cell<u32>,
    tick_period_ns: Cell<u32>,
    pending_ns: Cell<u32>,
    elapsed_ns: Cell<u64>,
    glimpses: Cell<Glimpses>,
}

impl VirtualPanel {
    /// A panel with every line low, buttons released and a stopped counter.
    #[must_use]
    pub fn new(polarity: Polarity) -> Self {
        Self {
            polarity,
            colon: Cell::new(false),
            cells: Default::default(),
            segments: Default::default(),
            minute_button: Cell::new(false),
            hour_button: Cell::new(false),
            ticks: Cell::new(0),
            resets: Cell::new(0),
            tick_period_ns: Cell::new(0),
            pending_ns: Cell::new(0),
            elapsed_ns: Cell::new(0),
            glimpses: Cell::new(Vec::new()),
        }
    }

    pub fn colon_pin(&self) -> VirtualPin<'_> {
        VirtualPin(&self.colon)
    }

    pub fn cell_pins(&self) -> [VirtualPin<'_>; CELL_COUNT] {
        self.cells.each_ref().map(VirtualPin)
    }

    pub fn segment_pins(&self) -> [VirtualPin<'_>; SEGMENT_COUNT] {
        self.segments.each_ref().map(VirtualPin)
    }

    pub fn minute_button(&self) -> VirtualInput<'_> {
        VirtualInput(&self.minute_button)
    }

    pub fn hour_button(&self) -> VirtualInput<'_> {
        VirtualInput(&self.hour_button)
    }

    pub fn delay(&self) -> VirtualDelay<'_> {
        VirtualDelay(self)
    }

    pub fn tick_counter(&self) -> VirtualTickCounter<'_> {
        VirtualTickCounter(self)
    }

    pub fn set_minute_button(&self, pressed: bool) {
        self.minute_button.set(pressed);
    }

    pub fn set_hour_button(&self, pressed: bool) {
        self.hour_button.set(pressed);
    }

    pub fn set_ticks(&self, ticks: u32) {
        self.ticks.set(ticks);
    }

    #[must_use]
    pub fn ticks(&self) -> u32 {
        self.ticks.get()
    }

    /// How many times the clock has reset the counter.
    #[must_use]
    pub fn resets(&self) -> u32 {
        self.resets.get()
    }

    /// Makes the counter advance one tick per `period_ns` of virtual time.
    /// Zero stops it.
    pub fn run_ticks(&self, period_ns: u32) {
        self.tick_period_ns.set(period_ns);
        self.pending_ns.set(0);
    }

    /// Virtual time spent in busy-waits so far.
    #[must_use]
    pub fn elapsed_ns(&self) -> u64 {
        self.elapsed_ns.get()
    }

    /// Raw level of the colon line.
    #[must_use]
    pub fn colon_level(&self) -> bool {
        self.colon.get()
    }

    #[must_use]
    pub fn colon_lit(&self) -> bool {
        self.colon.get() == self.polarity.colon.is_high()
    }

    /// Raw levels of the four position lines.
    #[must_use]
    pub fn cell_levels(&self) -> [bool; CELL_COUNT] {
        self.cells.each_ref().map(Cell::get)
    }

    /// Raw levels of the seven segment lines.
    #[must_use]
    pub fn segment_levels(&self) -> [bool; SEGMENT_COUNT] {
        self.segments.each_ref().map(Cell::get)
    }

    /// 1-based positions whose line is active, in order.
    #[must_use]
    pub fn active_positions(&self) -> Vec<u8, CELL_COUNT> {
        let active = self.polarity.cells.is_high();
        let mut positions = Vec::new();
        for (cell, position) in self.cells.iter().zip(1_u8..) {
            if cell.get() == active {
                let _ = positions.push(position);
            }
        }
        positions
    }

    /// Segments whose line is active.
    #[must_use]
    pub fn lit_segments(&self) -> SegmentSet {
        let active = self.polarity.segments.is_high();
        self.segments
            .iter()
            .zip(Segment::ALL)
            .filter(|(line, _)| line.get() == active)
            .map(|(_, segment)| segment)
            .collect()
    }

    /// No position selected and no segment lit.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.active_positions().is_empty() && self.lit_segments().is_empty()
    }

    /// Returns and forgets the glimpses recorded so far. Once
    /// [`GLIMPSE_CAPACITY`] is reached, later glimpses are dropped.
    pub fn take_glimpses(&self) -> Glimpses {
        self.glimpses.take()
    }

    fn pass_time(&self, ns: u32) {
        self.record_glimpse(ns);
        self.elapsed_ns
            .set(self.elapsed_ns.get().saturating_add(u64::from(ns)));

        let period_ns = self.tick_period_ns.get();
        let pending_ns = self.pending_ns.get().saturating_add(ns);
        if let (Some(whole), Some(rest)) = (
            pending_ns.checked_div(period_ns),
            pending_ns.checked_rem(period_ns),
        ) {
            self.ticks.set(self.ticks.get().saturating_add(whole));
            self.pending_ns.set(rest);
        }
    }

    fn record_glimpse(&self, ns: u32) {
        let segments = self.lit_segments();
        let positions = self.active_positions();
        let Some(&position) = positions.first() else {
            return;
        };
        if segments.is_empty() {
            return;
        }
        let mut glimpses = self.glimpses.take();
        let _ = glimpses.push(Glimpse {
            position,
            cells_lit: u8::try_from(positions.len()).unwrap_or(u8::MAX),
            segments,
            duration_us: ns.div_ceil(1_000),
        });
        self.glimpses.set(glimpses);
    }
}

impl Default for VirtualPanel {
    fn default() -> Self {
        Self::new(Polarity::default())
    }
}
