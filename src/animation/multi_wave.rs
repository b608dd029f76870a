//! Interference of several circular waves radiating from random centers.

use embassy_time::{Duration, Instant};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::Result;
use crate::animation::{Animation, Pacer};
use crate::led2d::Led2d;
use crate::settings::Settings;

const DEFAULT_INTERVAL: Duration = Duration::from_millis(60);
/// Number of wave sources.
pub const SOURCE_COUNT: usize = 4;
const TIME_STEP: f32 = 0.05;
const MIN_AMPLITUDE: f32 = 0.1;

/// One wave source. Offsets are added to the shared base parameters each frame.
#[derive(Clone, Copy, Debug, Default)]
struct Source {
    cx: f32,
    cy: f32,
    frequency_offset: f32,
    speed_offset: f32,
    phase: f32,
    amplitude_offset: f32,
}

/// Base wave parameters derived from the shared settings.
#[derive(Clone, Copy, Debug)]
struct Base {
    frequency: f32,
    speed: f32,
    amplitude: f32,
}

impl Base {
    fn from_settings(settings: &Settings) -> Self {
        Self {
            frequency: 0.05 + settings.tail_length() as f32 * 0.01,
            speed: 1.5 * settings.spawn_rate(),
            amplitude: f32::from(settings.fade_amount()) / 128.0,
        }
    }
}

impl Source {
    fn sample(&self, x: f32, y: f32, time: f32, base: Base) -> f32 {
        let (dx, dy) = (x - self.cx, y - self.cy);
        let distance = libm::sqrtf(dx * dx + dy * dy);
        let frequency = base.frequency + self.frequency_offset;
        let speed = base.speed + self.speed_offset;
        let amplitude = (base.amplitude + self.amplitude_offset).max(MIN_AMPLITUDE);
        libm::sinf(distance * frequency - time * speed + self.phase) * amplitude
    }
}

/// Multi-source wave field.
#[derive(Debug)]
pub struct MultiWave {
    sources: [Source; SOURCE_COUNT],
    frame_counter: u32,
    rng: SmallRng,
    pacer: Pacer,
}

impl MultiWave {
    /// Sources are placed when the animation begins.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            sources: [Source::default(); SOURCE_COUNT],
            frame_counter: 0,
            rng: SmallRng::seed_from_u64(seed),
            pacer: Pacer::default(),
        }
    }

    fn place_sources(&mut self, width: usize, height: usize) {
        for source in &mut self.sources {
            *source = Source {
                cx: self.rng.gen_range(0..width) as f32,
                cy: self.rng.gen_range(0..height) as f32,
                frequency_offset: self.rng.gen_range(0..20) as f32 / 100.0,
                speed_offset: self.rng.gen_range(-10..10) as f32 / 100.0,
                phase: self.rng.gen_range(0..1000) as f32 / 100.0,
                amplitude_offset: self.rng.gen_range(-10..10) as f32 / 100.0,
            };
        }
    }

    /// Normalised field value in `[0, 1]` at `(x, y)`.
    fn field(&self, x: usize, y: usize, base: Base) -> f32 {
        let time = self.frame_counter as f32 * TIME_STEP;
        let sum: f32 = self
            .sources
            .iter()
            .map(|source| source.sample(x as f32, y as f32, time, base))
            .sum();
        let half_range = SOURCE_COUNT as f32;
        ((sum + half_range) / (2.0 * half_range)).clamp(0.0, 1.0)
    }
}

impl<const N: usize, const W: usize, const H: usize> Animation<N, W, H> for MultiWave {
    fn begin(&mut self, _now: Instant, _settings: &Settings) -> Result<()> {
        self.frame_counter = 0;
        self.pacer.reset();
        self.place_sources(W, H);
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
        let base = Base::from_settings(settings);
        let palette = settings.palette();
        for y in 0..H {
            for x in 0..W {
                canvas.set(x as i32, y as i32, palette.ramp(self.field(x, y, base)));
            }
        }
        self.frame_counter = self.frame_counter.wrapping_add(1);
        true
    }

    fn end(&mut self) {}
}
