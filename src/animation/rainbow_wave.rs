//! The active palette scrolling sideways, with a gentle vertical ripple.
//!
//! Knobs are borrowed from the shared settings: `spawn_rate` sets scroll speed (×2),
//! `fade_amount / 128` sets ripple amplitude and `0.05 + tail_length * 0.01` sets how many
//! palette steps fit across one pixel.

use embassy_time::{Duration, Instant};

use crate::Result;
use crate::animation::{Animation, Pacer};
use crate::led2d::Led2d;
use crate::settings::Settings;

const DEFAULT_INTERVAL: Duration = Duration::from_millis(50);
const ROW_FREQUENCY: f32 = 0.3;

/// Scrolling palette gradient.
#[derive(Debug, Default)]
pub struct RainbowWave {
    frame_counter: u32,
    pacer: Pacer,
}

impl RainbowWave {
    /// A wave at frame zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Palette position of `(x, y)` at `frame`.
fn position(x: usize, y: usize, frame: u32, settings: &Settings) -> f32 {
    let scroll_speed = 2.0 * settings.spawn_rate();
    let amplitude = f32::from(settings.fade_amount()) / 128.0;
    let frequency = 0.05 + settings.tail_length() as f32 * 0.01;
    let offset = frame as f32 * scroll_speed;
    x as f32 * frequency + offset + libm::sinf(y as f32 * ROW_FREQUENCY) * amplitude
}

impl<const N: usize, const W: usize, const H: usize> Animation<N, W, H> for RainbowWave {
    fn begin(&mut self, _now: Instant, _settings: &Settings) -> Result<()> {
        self.frame_counter = 0;
        self.pacer.reset();
        Ok(())
    }

    fn update(
        &mut self,
        now: Instant,
        canvas: &mut Led2d<'_, N, W, H>,
        settings: &Settings,
    ) -> bool {
        if !self.pacer.ready(now, settings.update_interval(DEFAULT_INTERVAL)) {
            return false;
        }
        let palette = settings.palette();
        for y in 0..H {
            for x in 0..W {
                let color = palette.gradient(position(x, y, self.frame_counter, settings));
                canvas.set(x as i32, y as i32, color);
            }
        }
        self.frame_counter = self.frame_counter.wrapping_add(1);
        true
    }

    fn end(&mut self) {}
}
