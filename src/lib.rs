//! A 4-digit 7-segment clock with two set buttons.
//!
//! The clock keeps time by polling a free-running tick counter from a single
//! loop that also multiplexes the display and samples the buttons. Hardware is
//! reached only through `embedded-hal` traits and [`TickCounter`], so the whole
//! clock runs on the host against [`virtual_hardware`].
//!
//! With the `pico1` feature, [`hardware`] wires it to a Raspberry Pi Pico.
#![no_std]

pub mod button;
pub mod clock_loop;
pub mod clock_state;
pub mod config;
pub mod display;
mod error;
#[cfg(feature = "pico1")]
pub mod hardware;
pub mod led4;
pub mod output_array;
pub mod segments;
pub mod shared_constants;
mod tick_counter;
pub mod virtual_hardware;

// Re-export commonly used items
pub use clock_loop::{ClockHardware, ClockLoop, Iteration};
pub use clock_state::{ClockState, TimeOfDay};
pub use config::ClockConfig;
pub use error::{Error, Result};
pub use tick_counter::TickCounter;
