//! Entities spawned on a random edge that drift straight across the matrix, leaving a tail.
//!
//! Snow and traffic are the same effect with different pacing.

use embassy_time::{Duration, Instant};
use heapless::Vec;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::Result;
use crate::animation::{Animation, Pacer};
use crate::led2d::Led2d;
use crate::led_strip::{Rgb, blend, scale};
use crate::settings::{MAX_POPULATION_LIMIT, Settings};

/// Color progress added per update.
const PROGRESS_STEP: f32 = 0.02;

/// Dimmest tail pixel, out of 255.
const MIN_TAIL_BRIGHTNESS: u8 = 10;

#[derive(Clone, Copy, Debug)]
struct Entity {
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    progress: f32,
    start: Rgb,
    end: Rgb,
    bounce: bool,
}

impl Entity {
    fn color(&self) -> Rgb {
        let amount = |fraction: f32| (fraction * 255.0) as u8;
        if !self.bounce {
            blend(self.start, self.end, amount(self.progress))
        } else if self.progress <= 0.5 {
            blend(self.start, self.end, amount(self.progress * 2.0))
        } else {
            blend(self.end, self.start, amount((self.progress - 0.5) * 2.0))
        }
    }
}

/// Drifting snow or traffic.
#[derive(Debug)]
pub struct Drift {
    interval: Duration,
    tail_cap: usize,
    bounce: bool,
    entities: Vec<Entity, MAX_POPULATION_LIMIT>,
    rng: SmallRng,
    pacer: Pacer,
}

impl Drift {
    /// Slow flakes with full-length tails, every 80 ms.
    #[must_use]
    pub fn snow(seed: u64) -> Self {
        Self::with_pacing(seed, Duration::from_millis(80), usize::MAX)
    }

    /// Quick cars with tails capped at 10 pixels, every 37 ms.
    #[must_use]
    pub fn traffic(seed: u64) -> Self {
        Self::with_pacing(seed, Duration::from_millis(37), 10)
    }

    fn with_pacing(seed: u64, interval: Duration, tail_cap: usize) -> Self {
        Self {
            interval,
            tail_cap,
            bounce: false,
            entities: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
            pacer: Pacer::default(),
        }
    }

    /// Colors run start → end → start instead of start → end.
    #[must_use]
    pub const fn with_bounce(mut self, bounce: bool) -> Self {
        self.bounce = bounce;
        self
    }

    /// Number of live entities.
    #[must_use]
    pub fn population(&self) -> usize {
        self.entities.len()
    }

    fn spawn(&mut self, width: i32, height: i32, settings: &Settings) {
        let palette = settings.palette();
        let start = palette.random(&mut self.rng);
        let end = palette.random_other(&mut self.rng, start);
        let (x, y, dx, dy) = match self.rng.gen_range(0..4) {
            0 => (self.rng.gen_range(0..width), 0, 0, 1),
            1 => (self.rng.gen_range(0..width), height - 1, 0, -1),
            2 => (0, self.rng.gen_range(0..height), 1, 0),
            _ => (width - 1, self.rng.gen_range(0..height), -1, 0),
        };
        // Full means the cap was reached; nothing to do.
        let _ = self.entities.push(Entity {
            x,
            y,
            dx,
            dy,
            progress: 0.0,
            start,
            end,
            bounce: self.bounce,
        });
    }
}

impl<const N: usize, const W: usize, const H: usize> Animation<N, W, H> for Drift {
    fn begin(&mut self, _now: Instant, _settings: &Settings) -> Result<()> {
        self.entities.clear();
        self.pacer.reset();
        Ok(())
    }

    fn update(
        &mut self,
        now: Instant,
        canvas: &mut Led2d<'_, N, W, H>,
        settings: &Settings,
    ) -> bool {
        if !self.pacer.ready(now, settings.update_interval(self.interval)) {
            return false;
        }
        let (width, height) = (W as i32, H as i32);

        canvas.fade_all(settings.fade_amount());

        let threshold = (settings.spawn_rate() * 1000.0) as u32;
        if self.rng.gen_range(0..1000) < threshold
            && self.entities.len() < settings.max_population()
        {
            self.spawn(width, height, settings);
        }

        let brightness = settings.brightness();
        let tail_length = settings.tail_length().min(self.tail_cap);
        self.entities.retain_mut(|entity| {
            entity.x += entity.dx;
            entity.y += entity.dy;
            entity.progress = (entity.progress + PROGRESS_STEP).min(1.0);
            if !(0..width).contains(&entity.x) || !(0..height).contains(&entity.y) {
                return false;
            }

            let head = scale(entity.color(), brightness);
            canvas.add(entity.x, entity.y, head);

            for step in 1..=tail_length {
                let offset = step as i32;
                let tail_x = entity.x - offset * entity.dx;
                let tail_y = entity.y - offset * entity.dy;
                let fraction = 1.0 - step as f32 / (tail_length + 1) as f32;
                let tail_brightness =
                    ((f32::from(brightness) * fraction) as u8).max(MIN_TAIL_BRIGHTNESS);
                if !canvas.add(tail_x, tail_y, scale(head, tail_brightness)) {
                    break;
                }
            }
            true
        });
        true
    }

    fn end(&mut self) {
        self.entities.clear();
    }
}
