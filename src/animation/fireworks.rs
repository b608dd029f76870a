//! Rockets that rise from the bottom edge, slow down, and burst into falling particles.

use core::f32::consts::PI;

use embassy_time::{Duration, Instant};
use heapless::Vec;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use smart_leds::hsv::{Hsv, hsv2rgb};

use crate::Result;
use crate::animation::{Animation, Pacer};
use crate::led2d::Led2d;
use crate::settings::Settings;

const DEFAULT_INTERVAL: Duration = Duration::from_millis(15);
/// Concurrent fireworks.
pub const MAX_FIREWORKS: usize = 10;
/// Particles per burst.
pub const PARTICLE_COUNT: usize = 40;
const GRAVITY: f32 = 0.15;
const LAUNCH_PROBABILITY: u32 = 15;
/// Rockets burst once their upward speed drops below this.
const BURST_SPEED: f32 = 0.3;
const DRAG: f32 = 0.98;

#[derive(Clone, Copy, Debug)]
struct Particle {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    hue: u8,
    life: u8,
}

impl Particle {
    fn value(&self) -> u8 {
        (u16::from(self.life) * 255 / 100).min(255) as u8
    }
}

#[derive(Clone, Debug)]
struct Firework {
    x: f32,
    y: f32,
    vy: f32,
    hue: u8,
    particles: Vec<Particle, PARTICLE_COUNT>,
}

impl Firework {
    fn exploded(&self) -> bool {
        !self.particles.is_empty()
    }

    fn explode(&mut self, rng: &mut SmallRng) {
        self.particles.clear();
        for _ in 0..PARTICLE_COUNT {
            let angle = rng.gen_range(0..360) as f32 * PI / 180.0;
            let speed = 0.1 + rng.gen_range(0..40) as f32 / 100.0;
            let particle = Particle {
                x: self.x,
                y: self.y,
                vx: libm::cosf(angle) * speed,
                vy: libm::sinf(angle) * speed,
                hue: self.hue.wrapping_add_signed(rng.gen_range(-10..10)),
                life: rng.gen_range(50..100),
            };
            // Capacity is exactly PARTICLE_COUNT.
            let _ = self.particles.push(particle);
        }
    }

    /// Advance one tick. Returns `false` once every particle has burned out.
    fn step(&mut self, rng: &mut SmallRng) -> bool {
        if !self.exploded() {
            self.y -= self.vy;
            self.vy *= DRAG;
            if self.vy < BURST_SPEED {
                self.explode(rng);
            }
            return true;
        }

        let mut any_alive = false;
        for particle in &mut self.particles {
            particle.x += particle.vx;
            particle.y += particle.vy;
            particle.vy += GRAVITY;
            if particle.life > 0 {
                particle.life -= 1;
                any_alive = true;
            }
        }
        any_alive
    }
}

/// Fireworks show.
#[derive(Debug)]
pub struct Fireworks {
    fireworks: Vec<Firework, MAX_FIREWORKS>,
    rng: SmallRng,
    pacer: Pacer,
}

impl Fireworks {
    /// A show with no rockets in the air yet.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            fireworks: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
            pacer: Pacer::default(),
        }
    }

    /// Rockets plus bursts currently alive.
    #[must_use]
    pub fn active(&self) -> usize {
        self.fireworks.len()
    }

    fn launch(&mut self, width: usize, height: usize) {
        let firework = Firework {
            x: self.rng.gen_range(0..width) as f32,
            y: (height - 1) as f32,
            vy: 0.5 + self.rng.gen_range(0..50) as f32 / 100.0,
            hue: self.rng.r#gen(),
            particles: Vec::new(),
        };
        let _ = self.fireworks.push(firework);
    }
}

impl<const N: usize, const W: usize, const H: usize> Animation<N, W, H> for Fireworks {
    fn begin(&mut self, _now: Instant, _settings: &Settings) -> Result<()> {
        self.fireworks.clear();
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
        canvas.clear();

        let rng = &mut self.rng;
        self.fireworks.retain_mut(|firework| firework.step(rng));

        for firework in &self.fireworks {
            if firework.exploded() {
                for particle in &firework.particles {
                    let color = hsv2rgb(Hsv {
                        hue: particle.hue,
                        sat: 255,
                        val: particle.value(),
                    });
                    canvas.set(
                        libm::roundf(particle.x) as i32,
                        libm::roundf(particle.y) as i32,
                        color,
                    );
                }
            } else {
                let (x, y) = (firework.x as i32, firework.y as i32);
                for (offset, val) in [(0, 255), (1, 175), (2, 95)] {
                    let color = hsv2rgb(Hsv {
                        hue: firework.hue,
                        sat: 255,
                        val,
                    });
                    canvas.set(x, y + offset, color);
                }
            }
        }

        if self.fireworks.len() < MAX_FIREWORKS
            && self.rng.gen_range(0..100) < LAUNCH_PROBABILITY
        {
            self.launch(W, H);
        }
        true
    }

    fn end(&mut self) {
        self.fireworks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::led2d::layout::PanelConfig;
    use crate::led_strip::Frame1d;

    #[test]
    fn rocket_bursts_then_burns_out() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut firework = Firework {
            x: 3.0,
            y: 15.0,
            vy: 0.99,
            hue: 0,
            particles: Vec::new(),
        };
        let mut ticks = 0;
        while !firework.exploded() {
            assert!(firework.step(&mut rng));
            ticks += 1;
            assert!(ticks < 100, "rocket never burst");
        }
        assert_eq!(firework.particles.len(), PARTICLE_COUNT);
        assert!(firework.particles.iter().all(|p| (50..100).contains(&p.life)));

        let mut burning = 0;
        while firework.step(&mut rng) {
            burning += 1;
        }
        assert!((49..=99).contains(&burning));
    }

    #[test]
    fn never_exceeds_firework_cap() {
        let settings = Settings::new::<64, 16, 4>();
        let config = PanelConfig::default();
        let mut frame = Frame1d::<64>::new();
        let mut show = Fireworks::new(4);
        Animation::<64, 16, 4>::begin(&mut show, Instant::from_millis(0), &settings)
            .expect("begins");
        let mut lit = false;
        for tick in 0..2_000_u64 {
            let mut canvas = Led2d::<64, 16, 4>::new(&mut frame, &config);
            show.update(Instant::from_millis(tick * 15), &mut canvas, &settings);
            assert!(show.active() <= MAX_FIREWORKS);
            lit |= frame.iter().any(|pixel| *pixel != smart_leds::RGB8::default());
        }
        assert!(lit);
    }
}
