use embedded_hal::digital::OutputPin;

use crate::Result;
use crate::config::ActiveLevel;
use crate::error::Error::CannotSetOutputState;

/// A fixed group of output lines that share an active level.
///
/// See the [`Led4`](crate::led4::Led4) documentation for usage.
pub struct OutputArray<P, const N: usize> {
    outputs: [P; N],
    active_level: ActiveLevel,
}

impl<P: OutputPin, const N: usize> OutputArray<P, N> {
    pub const fn new(outputs: [P; N], active_level: ActiveLevel) -> Self {
        Self {
            outputs,
            active_level,
        }
    }

    /// Turns every line in the group on or off.
    #[inline]
    pub fn set_all(&mut self, active: bool) -> Result<()> {
        let state = self.active_level.pin_state(active);
        for output in &mut self.outputs {
            output.set_state(state).map_err(|_| CannotSetOutputState)?;
        }
        Ok(())
    }

    /// Turns on the line at `index`. An index past the end selects nothing.
    #[inline]
    pub fn activate_index(&mut self, index: usize) -> Result<()> {
        let state = self.active_level.pin_state(true);
        if let Some(output) = self.outputs.get_mut(index) {
            output.set_state(state).map_err(|_| CannotSetOutputState)?;
        }
        Ok(())
    }

    /// Line `i` follows bit `i` of `bits`; bits past `N` are ignored.
    #[inline]
    pub fn set_from_bits(&mut self, mut bits: u8) -> Result<()> {
        for output in &mut self.outputs {
            let state = self.active_level.pin_state((bits & 1) == 1);
            output.set_state(state).map_err(|_| CannotSetOutputState)?;
            bits >>= 1;
        }
        Ok(())
    }
}
