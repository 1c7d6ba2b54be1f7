//! Geometry, timing and threshold constants shared by the display and the clock.

/// The number of cells (digit positions) in the display.
pub const CELL_COUNT: usize = 4;

/// The number of segments per cell. The colon has its own line.
pub const SEGMENT_COUNT: usize = 7;

/// Hold after each digit so the shared segment lines register before the next position.
pub const SETTLE_DELAY_US: u32 = 200;

/// Dead time after a full clock pass. This dominates the loop period.
pub const FRAME_BLANK_US: u32 = 1_000;

/// Dead time after a number pass.
pub const NUMBER_BLANK_US: u32 = 750;

/// Ticks after which the sub-second counter advances on each iteration.
pub const SUB_SECOND_TICKS: u32 = 2_972;

/// Ticks that make up (approximately) one second.
pub const SECOND_TICKS: u32 = 29_720;

/// Real time per tick: an 8 MHz clock behind a /256 prescaler.
pub const TICK_PERIOD_US: u64 = 32;

pub const START_HOURS: u8 = parse_u8(env!("CLOCK_START_HOURS"));
pub const START_MINUTES: u8 = parse_u8(env!("CLOCK_START_MINUTES"));
pub const START_SECONDS: u8 = parse_u8(env!("CLOCK_START_SECONDS"));

/// Parses a decimal number at compile time. Anything that is not a plain
/// decimal number that fits in a `u8` reads as 0.
#[must_use]
pub const fn parse_u8(text: &str) -> u8 {
    let mut rest = text.as_bytes();
    if rest.is_empty() {
        return 0;
    }
    let mut value: u8 = 0;
    while let [byte, tail @ ..] = rest {
        if !byte.is_ascii_digit() {
            return 0;
        }
        let Some(tens) = value.checked_mul(10) else {
            return 0;
        };
        let Some(sum) = tens.checked_add(byte.wrapping_sub(b'0')) else {
            return 0;
        };
        value = sum;
        rest = tail;
    }
    value
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u8() {
        assert_eq!(parse_u8("0"), 0);
        assert_eq!(parse_u8("5"), 5);
        assert_eq!(parse_u8("35"), 35);
        assert_eq!(parse_u8("255"), 255);
    }

    #[test]
    fn test_parse_u8_rejects_junk() {
        assert_eq!(parse_u8(""), 0);
        assert_eq!(parse_u8("12a"), 0);
        assert_eq!(parse_u8("-1"), 0);
        assert_eq!(parse_u8("256"), 0);
    }

    #[test]
    fn test_second_threshold_is_above_sub_second() {
        const { assert!(SECOND_TICKS > SUB_SECOND_TICKS) };
    }
}
