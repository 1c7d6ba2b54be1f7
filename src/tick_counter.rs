/// A free-running hardware counter that the clock loop polls.
///
/// The counter advances by one tick per fixed real-time quantum. The loop reads
/// it once per iteration and resets it to zero when a second has elapsed.
pub trait TickCounter {
    /// Ticks since the last [`reset`](TickCounter::reset).
    fn ticks(&mut self) -> u32;

    /// Restarts the count at zero.
    fn reset(&mut self);
}

impl<T: TickCounter + ?Sized> TickCounter for &mut T {
    fn ticks(&mut self) -> u32 {
        T::ticks(self)
    }

    fn reset(&mut self) {
        T::reset(self);
    }
}
