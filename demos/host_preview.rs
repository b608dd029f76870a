#![cfg(feature = "host")]
//! Runs an animation on a simulated pair of 16×16 panels and writes an APNG preview.
//!
//! ```text
//! cargo run --features host --bin demo_host_preview -- life life.png
//! ```

use std::error::Error;
use std::time::Instant as StdInstant;

use embassy_time::{Duration, Instant};
use panel_life::animation::AnimationKind;
use panel_life::led2d::layout::PanelOrder;
use panel_life::led_matrix::LedMatrix;
use panel_life::settings::Command;
use panel_life::to_png::write_frames_apng;

// Two 16x16 panels, fed from the right, the left one mounted upside down.
const N: usize = 512;
const W: usize = 32;
const H: usize = 16;

const FRAME_COUNT: usize = 120;
const FRAME_DELAY_MS: u16 = 40;

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let kind = match args.next() {
        Some(name) => name.parse::<AnimationKind>()?,
        None => AnimationKind::Life,
    };
    let output = args.next().unwrap_or_else(|| format!("{}.png", kind.name()));

    let started = StdInstant::now();
    let start = Instant::from_millis(0);

    let mut matrix = LedMatrix::<N, W, H>::new(0x5EED);
    matrix.handle(Command::SetPanelOrder(PanelOrder::RightFirst), start)?;
    matrix.handle(Command::SetRotation { panel: 0, degrees: 180 }, start)?;
    matrix.handle(Command::SetSpeedMultiplier(2.0), start)?;
    matrix.select(kind, start)?;

    // Simulated time keeps the preview independent of how fast this machine renders.
    let mut frames = Vec::with_capacity(FRAME_COUNT);
    for index in 0..FRAME_COUNT as u64 {
        let at = start + Duration::from_millis(index * u64::from(FRAME_DELAY_MS));
        for sub_tick in 0..4 {
            matrix.tick(at + Duration::from_millis(sub_tick * 10));
        }
        frames.push(*matrix.frame());
    }

    write_frames_apng::<N, W, H>(&frames, matrix.settings().panels(), &output, 640, FRAME_DELAY_MS)?;
    println!(
        "rendered {} frames of {} in {:?}",
        FRAME_COUNT,
        kind.name(),
        started.elapsed()
    );
    Ok(())
}
