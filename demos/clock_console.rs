//! Runs the clock against virtual hardware and prints the display whenever it changes.
//!
//! Virtual time advances only through the clock's own busy-waits, so a
//! simulated minute takes a fraction of a second.

use led4_clock::clock_loop::{ClockHardware, ClockLoop};
use led4_clock::config::ClockConfig;
use led4_clock::segments::segments_for;
use led4_clock::shared_constants::{CELL_COUNT, TICK_PERIOD_US};
use led4_clock::virtual_hardware::{Glimpse, VirtualPanel};

/// Button presses as (first iteration, iterations held, minute or hour).
const SCRIPT: [(u32, u32, Button); 4] = [
    (2_000, 40, Button::Minute),
    (2_100, 300, Button::Minute),
    (4_000, 10, Button::Hour),
    (4_050, 10, Button::Hour),
];

const ITERATIONS: u32 = 140_000;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Button {
    Minute,
    Hour,
}

fn main() -> led4_clock::Result<()> {
    let panel = VirtualPanel::default();
    let tick_period_ns = TICK_PERIOD_US
        .checked_mul(1_000)
        .and_then(|ns| u32::try_from(ns).ok())
        .unwrap_or(u32::MAX);
    panel.run_ticks(tick_period_ns);

    let mut clock = ClockLoop::new(
        ClockHardware {
            cells: panel.cell_pins(),
            segments: panel.segment_pins(),
            colon: panel.colon_pin(),
            minute_button: panel.minute_button(),
            hour_button: panel.hour_button(),
            delay: panel.delay(),
            ticks: panel.tick_counter(),
        },
        ClockConfig::DEFAULT,
    )?;

    clock.show_number(1234)?;
    println!("lamp test  [{}]", render(&panel.take_glimpses()));

    let mut last_shown = String::new();
    for iteration in 0..ITERATIONS {
        panel.set_minute_button(is_held(Button::Minute, iteration));
        panel.set_hour_button(is_held(Button::Hour, iteration));

        let report = clock.iterate()?;
        let shown = render(&panel.take_glimpses());
        if shown != last_shown || report.minute_pressed || report.hour_pressed {
            let time = clock.time();
            println!(
                "{:>8.3}s  [{shown}]  {:02}:{:02}:{:02}{}{}",
                seconds(panel.elapsed_ns()),
                time.hours,
                time.minutes,
                time.seconds,
                if report.minute_pressed { "  minute+" } else { "" },
                if report.hour_pressed { "  hour+" } else { "" },
            );
            last_shown = shown;
        }
    }

    println!(
        "{ITERATIONS} iterations, {:.3}s of virtual time, {} seconds counted",
        seconds(panel.elapsed_ns()),
        panel.resets()
    );
    Ok(())
}

fn is_held(button: Button, iteration: u32) -> bool {
    SCRIPT.iter().any(|&(first, held, scripted)| {
        scripted == button && (first..first.saturating_add(held)).contains(&iteration)
    })
}

/// Draws the glimpses of one pass as four characters, `:` after position 2.
fn render(glimpses: &[Glimpse]) -> String {
    let mut cells = [' '; CELL_COUNT];
    for glimpse in glimpses {
        let digit = (0..10)
            .find(|&digit| segments_for(digit) == glimpse.segments)
            .and_then(|digit| char::from_digit(u32::from(digit), 10));
        let index = usize::from(glimpse.position.saturating_sub(1));
        if let (Some(cell), Some(digit)) = (cells.get_mut(index), digit) {
            *cell = digit;
        }
    }
    let [first, second, third, fourth] = cells;
    format!("{first}{second}:{third}{fourth}")
}

#[expect(clippy::cast_precision_loss, reason = "Display only")]
fn seconds(ns: u64) -> f64 {
    ns as f64 / 1e9
}
