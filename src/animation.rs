//! The animation contract, the built-in animations, and the [`Player`] that swaps them.
//!
//! An animation is driven by three calls:
//!
//! - [`Animation::begin`] allocates and resets state. It may fail, in which case the
//!   animation never runs.
//! - [`Animation::update`] is called every host tick; each animation rate-limits itself
//!   against its own interval and draws through the mapped [`Led2d`] canvas.
//! - [`Animation::end`] releases resources and is safe to call at any time.

pub mod blink;
pub mod drift;
pub mod fireworks;
pub mod life;
pub mod multi_wave;
pub mod rainbow_wave;

use alloc::boxed::Box;
use core::str::FromStr;

use embassy_time::{Duration, Instant};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use serde::{Deserialize, Serialize};

use crate::led2d::Led2d;
use crate::settings::Settings;
use crate::{Error, Result};

/// Lifecycle contract shared by every animation on an `N`-LED, `W × H` matrix.
pub trait Animation<const N: usize, const W: usize, const H: usize> {
    /// Allocate and reset state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] if state cannot be allocated.
    fn begin(&mut self, now: Instant, settings: &Settings) -> Result<()>;

    /// Advance and draw if this animation's interval has elapsed. Returns `true` when the
    /// canvas changed.
    fn update(&mut self, now: Instant, canvas: &mut Led2d<'_, N, W, H>, settings: &Settings)
    -> bool;

    /// Release resources. Safe to call more than once, or before `begin`.
    fn end(&mut self);
}

/// Built-in animations, selectable by name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationKind {
    /// Flakes drifting in from the edges.
    #[default]
    Snow,
    /// Faster drifting cars with capped tails.
    Traffic,
    /// Rockets bursting into particles.
    Fireworks,
    /// Palette scrolling horizontally with a vertical ripple.
    RainbowWave,
    /// Interference of several circular waves.
    MultiWave,
    /// Game of Life with wipe reveal.
    Life,
    /// Whole-matrix on/off test pattern.
    Blink,
}

impl AnimationKind {
    /// Every built-in animation, in menu order.
    pub const ALL: [Self; 7] = [
        Self::Snow,
        Self::Traffic,
        Self::Fireworks,
        Self::RainbowWave,
        Self::MultiWave,
        Self::Life,
        Self::Blink,
    ];

    /// Name accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Snow => "snow",
            Self::Traffic => "traffic",
            Self::Fireworks => "fireworks",
            Self::RainbowWave => "rainbow",
            Self::MultiWave => "multiwave",
            Self::Life => "life",
            Self::Blink => "blink",
        }
    }

    /// The following animation in menu order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Snow => Self::Traffic,
            Self::Traffic => Self::Fireworks,
            Self::Fireworks => Self::RainbowWave,
            Self::RainbowWave => Self::MultiWave,
            Self::MultiWave => Self::Life,
            Self::Life => Self::Blink,
            Self::Blink => Self::Snow,
        }
    }

    /// Construct a fresh, not yet begun, instance.
    #[must_use]
    pub fn build<const N: usize, const W: usize, const H: usize>(
        self,
        seed: u64,
    ) -> Box<dyn Animation<N, W, H>> {
        match self {
            Self::Snow => Box::new(drift::Drift::snow(seed)),
            Self::Traffic => Box::new(drift::Drift::traffic(seed)),
            Self::Fireworks => Box::new(fireworks::Fireworks::new(seed)),
            Self::RainbowWave => Box::new(rainbow_wave::RainbowWave::new()),
            Self::MultiWave => Box::new(multi_wave::MultiWave::new(seed)),
            Self::Life => Box::new(life::Life::<W, H>::new(seed)),
            Self::Blink => Box::new(blink::Blink::new()),
        }
    }
}

impl FromStr for AnimationKind {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or(Error::UnknownAnimation)
    }
}

/// Rate limiter: fires at most once per interval.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pacer {
    last: Option<Instant>,
}

impl Pacer {
    /// Returns `true` (and restarts the interval) when `interval` has elapsed since the
    /// last time it fired. The first call always fires.
    pub fn ready(&mut self, now: Instant, interval: Duration) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forget the last firing time.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Where the [`Player`] is in the animation lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerState {
    /// Nothing has been selected yet.
    #[default]
    Uninitialized,
    /// The active animation began successfully and is being updated.
    Running,
    /// The last animation ended, or failed to begin.
    Ended,
}

/// Owns the active animation and drives its lifecycle.
pub struct Player<const N: usize, const W: usize, const H: usize> {
    active: Option<Box<dyn Animation<N, W, H>>>,
    kind: Option<AnimationKind>,
    state: PlayerState,
    rng: SmallRng,
}

impl<const N: usize, const W: usize, const H: usize> Player<N, W, H> {
    /// An empty player. `seed` feeds every animation it builds.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            active: None,
            kind: None,
            state: PlayerState::Uninitialized,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> PlayerState {
        self.state
    }

    /// The running built-in animation, if any.
    #[must_use]
    pub const fn kind(&self) -> Option<AnimationKind> {
        match self.state {
            PlayerState::Running => self.kind,
            PlayerState::Uninitialized | PlayerState::Ended => None,
        }
    }

    /// End the current animation and begin a fresh instance of `kind`.
    ///
    /// # Errors
    ///
    /// Propagates the error from [`Animation::begin`]; the player is then `Ended`.
    pub fn select(&mut self, kind: AnimationKind, now: Instant, settings: &Settings) -> Result<()> {
        let animation = kind.build(self.rng.r#gen());
        self.kind = Some(kind);
        info!("selecting animation {}", kind.name());
        self.start(animation, now, settings)
    }

    /// End the current animation and begin `animation`.
    ///
    /// # Errors
    ///
    /// Propagates the error from [`Animation::begin`]; the player is then `Ended`.
    pub fn start(
        &mut self,
        mut animation: Box<dyn Animation<N, W, H>>,
        now: Instant,
        settings: &Settings,
    ) -> Result<()> {
        self.end();
        match animation.begin(now, settings) {
            Ok(()) => {
                self.active = Some(animation);
                self.state = PlayerState::Running;
                Ok(())
            }
            Err(err) => {
                error!("animation failed to begin: {}", err);
                animation.end();
                self.state = PlayerState::Ended;
                Err(err)
            }
        }
    }

    /// Update the running animation. Returns `true` when the canvas changed.
    pub fn update(
        &mut self,
        now: Instant,
        canvas: &mut Led2d<'_, N, W, H>,
        settings: &Settings,
    ) -> bool {
        match (&mut self.active, self.state) {
            (Some(animation), PlayerState::Running) => animation.update(now, canvas, settings),
            _ => false,
        }
    }

    /// End and drop the current animation, if any.
    pub fn end(&mut self) {
        if let Some(mut animation) = self.active.take() {
            animation.end();
            debug!("animation ended");
        }
        if self.state == PlayerState::Running {
            self.state = PlayerState::Ended;
        }
    }
}

impl<const N: usize, const W: usize, const H: usize> core::fmt::Debug for Player<N, W, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Player")
            .field("kind", &self.kind)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
