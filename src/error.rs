use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
///
/// The clock logic itself cannot fail. These variants only surface when a
/// line driver reports a failure, which never happens on the RP2040 (its
/// GPIO error type is `Infallible`).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[display("Error setting output state")]
    CannotSetOutputState,

    #[display("Error reading input state")]
    CannotReadInputState,
}
