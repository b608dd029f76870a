//! Per-cell shadow state and the birth and death color curves.

use embassy_time::{Duration, Instant};

use crate::led_strip::{Rgb, blend, scale, scale_f32};

/// Length of the birth fade.
pub const BIRTH_DURATION: Duration = Duration::from_millis(1_600);
/// Shortest death sequence.
pub const DEATH_DURATION_MIN: Duration = Duration::from_millis(2_000);
/// Longest death sequence.
pub const DEATH_DURATION_MAX: Duration = Duration::from_millis(2_200);

/// Where newborn cells start fading from.
pub const NEAR_WHITE: Rgb = Rgb::new(240, 240, 240);
/// Over-saturation applied at the birth peak and the death flash.
const BOOST: f32 = 1.5;
/// Brightness of the dim half of a death blink, out of 255.
const DIM: u8 = 77;
/// Alternating full/dim slots in the blink phase (5 blinks).
const BLINK_SLOTS: u64 = 10;
const BLACK: Rgb = Rgb::new(0, 0, 0);

/// Lifecycle of one cell. A cell is in exactly one phase at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellPhase {
    /// Alive or dead with no transition running.
    #[default]
    Stable,
    /// Fading in toward the target color.
    Newborn {
        /// Color the fade starts from.
        from: Rgb,
        /// When the cell was born.
        start: Instant,
        /// Death sequence that was running when the cell came back to life. Unswept
        /// columns keep showing it.
        interrupted: Option<DeathFade>,
    },
    /// Died in the simulation. `start` is `None` until the wipe reveals the cell's column.
    Dying {
        /// Color the death sequence starts from.
        from: Rgb,
        /// When the death sequence began.
        start: Option<Instant>,
        /// Length of the death sequence.
        duration: Duration,
    },
}

/// A death sequence that has started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeathFade {
    /// Color the sequence starts from.
    pub from: Rgb,
    /// When the sequence began.
    pub start: Instant,
    /// Length of the sequence.
    pub duration: Duration,
}

impl DeathFade {
    /// Color of the sequence at `now`.
    #[must_use]
    pub fn color(&self, now: Instant) -> Rgb {
        death_color(self.from, now.saturating_duration_since(self.start), self.duration)
    }

    fn is_over(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }
}

/// Shadow state of one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    /// Color the cell shows while alive and stable.
    pub target: Rgb,
    /// Current lifecycle phase.
    pub phase: CellPhase,
}

impl Cell {
    /// A freshly seeded live cell, shown at full color immediately.
    #[must_use]
    pub const fn seeded(target: Rgb) -> Self {
        Self {
            target,
            phase: CellPhase::Stable,
        }
    }

    /// A cell born at `now` that fades in toward `target`.
    #[must_use]
    pub const fn born(target: Rgb, now: Instant) -> Self {
        Self {
            target,
            phase: CellPhase::Newborn {
                from: NEAR_WHITE,
                start: now,
                interrupted: None,
            },
        }
    }

    /// Bring this cell to life at `now`, keeping any running death sequence for
    /// columns the wipe has not reached yet.
    pub fn revive(&mut self, target: Rgb, now: Instant) {
        let interrupted = self.death(now);
        *self = Self::born(target, now);
        if let CellPhase::Newborn { interrupted: slot, .. } = &mut self.phase {
            *slot = interrupted;
        }
    }

    /// Flag this cell as dying; the sequence starts when [`reveal_death`](Self::reveal_death)
    /// is called, from whatever color the cell shows at `now`.
    pub fn flag_dying(&mut self, now: Instant, duration: Duration) {
        self.phase = CellPhase::Dying {
            from: self.live_color(now),
            start: None,
            duration,
        };
    }

    /// Color of the cell at `now` while it counts as alive: its birth fade, or the target.
    #[must_use]
    pub fn live_color(&self, now: Instant) -> Rgb {
        match self.phase {
            CellPhase::Newborn { from, start, .. } => {
                birth_color(from, self.target, now.saturating_duration_since(start))
            }
            _ => self.target,
        }
    }

    /// The death sequence running at `now`, if any.
    #[must_use]
    pub fn death(&self, now: Instant) -> Option<DeathFade> {
        match self.phase {
            CellPhase::Dying {
                from,
                start: Some(start),
                duration,
            } => Some(DeathFade {
                from,
                start,
                duration,
            })
            .filter(|fade| !fade.is_over(now)),
            CellPhase::Newborn { interrupted, .. } => interrupted.filter(|fade| !fade.is_over(now)),
            _ => None,
        }
    }

    /// Start a flagged death at `now`. Returns `true` if a death started.
    pub const fn reveal_death(&mut self, now: Instant) -> bool {
        if let CellPhase::Dying {
            from,
            start: None,
            duration,
        } = self.phase
        {
            self.phase = CellPhase::Dying {
                from,
                start: Some(now),
                duration,
            };
            true
        } else {
            false
        }
    }

    /// Whether this cell is flagged or running a death sequence.
    #[must_use]
    pub const fn is_dying(&self) -> bool {
        matches!(self.phase, CellPhase::Dying { .. })
    }

    /// Finish transitions whose time is up: newborns settle on their target, dead
    /// cells lose all shadow state.
    pub fn settle(&mut self, now: Instant) {
        match self.phase {
            CellPhase::Newborn {
                start, interrupted, ..
            } if now.saturating_duration_since(start) >= BIRTH_DURATION
                && interrupted.is_none_or(|fade| fade.is_over(now)) =>
            {
                self.phase = CellPhase::Stable;
            }
            CellPhase::Dying {
                start: Some(start),
                duration,
                ..
            } if now.saturating_duration_since(start) >= duration => {
                *self = Self::default();
            }
            _ => {}
        }
    }
}

fn fraction(elapsed: Duration, total: Duration) -> f32 {
    let total = total.as_micros().max(1);
    (elapsed.as_micros().min(total) as f32) / total as f32
}

fn amount(fraction: f32) -> u8 {
    (fraction.clamp(0.0, 1.0) * 255.0) as u8
}

/// Color of a newborn cell `elapsed` after birth.
///
/// The first 40 % blends near-white toward an over-saturated target, the remaining 60 %
/// settles from the over-saturated color onto `target`. From [`BIRTH_DURATION`] on it is
/// exactly `target`.
#[must_use]
pub fn birth_color(from: Rgb, target: Rgb, elapsed: Duration) -> Rgb {
    if elapsed >= BIRTH_DURATION {
        return target;
    }
    let t = fraction(elapsed, BIRTH_DURATION);
    let boosted = scale_f32(target, BOOST);
    if t < 0.4 {
        blend(from, boosted, amount(t / 0.4))
    } else {
        blend(boosted, target, amount((t - 0.4) / 0.6))
    }
}

/// Color of a dying cell `elapsed` into a death sequence of length `duration`.
///
/// First half: 5 blinks alternating full and 30 % brightness. Next 10 %: a 150 % flash.
/// Last 40 %: linear fade to black, which holds from `duration` on.
#[must_use]
pub fn death_color(from: Rgb, elapsed: Duration, duration: Duration) -> Rgb {
    if elapsed >= duration {
        return BLACK;
    }
    let t = fraction(elapsed, duration);
    if t < 0.5 {
        let slot = (elapsed.as_micros() * BLINK_SLOTS * 2) / duration.as_micros().max(1);
        if slot % 2 == 0 { from } else { scale(from, DIM) }
    } else if t < 0.6 {
        scale_f32(from, BOOST)
    } else {
        scale_f32(from, 1.0 - (t - 0.6) / 0.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: Rgb = Rgb::new(100, 40, 200);

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn birth_starts_near_white_and_lands_exactly_on_target() {
        assert_eq!(birth_color(NEAR_WHITE, TARGET, ms(0)), NEAR_WHITE);
        assert_eq!(birth_color(NEAR_WHITE, TARGET, ms(640)), Rgb::new(150, 60, 255));
        assert_eq!(birth_color(NEAR_WHITE, TARGET, ms(1_600)), TARGET);
        assert_eq!(birth_color(NEAR_WHITE, TARGET, ms(60_000)), TARGET);
    }

    #[test]
    fn death_blinks_flashes_then_fades() {
        let duration = ms(2_000);
        // Ten 100 ms slots across the first second.
        assert_eq!(death_color(TARGET, ms(50), duration), TARGET);
        assert_eq!(death_color(TARGET, ms(150), duration), scale(TARGET, DIM));
        assert_eq!(death_color(TARGET, ms(250), duration), TARGET);
        assert_eq!(death_color(TARGET, ms(950), duration), scale(TARGET, DIM));
        assert_eq!(death_color(TARGET, ms(1_100), duration), Rgb::new(150, 60, 255));
        let fading = death_color(TARGET, ms(1_600), duration);
        assert!(fading.b < TARGET.b && fading.b > 0);
        assert_eq!(death_color(TARGET, ms(2_000), duration), BLACK);
        assert_eq!(death_color(TARGET, ms(9_000), duration), BLACK);
    }

    #[test]
    fn settle_clears_finished_transitions() {
        let t0 = Instant::from_millis(1_000);
        let mut newborn = Cell::born(TARGET, t0);
        newborn.settle(t0 + ms(1_599));
        assert!(matches!(newborn.phase, CellPhase::Newborn { .. }));
        newborn.settle(t0 + ms(1_600));
        assert_eq!(newborn, Cell::seeded(TARGET));

        let mut dying = Cell::seeded(TARGET);
        dying.flag_dying(t0, ms(2_100));
        dying.settle(t0 + ms(60_000));
        assert!(dying.is_dying(), "flagged deaths wait for the wipe");
        assert!(dying.reveal_death(t0));
        assert!(!dying.reveal_death(t0 + ms(5)));
        dying.settle(t0 + ms(2_100));
        assert_eq!(dying, Cell::default());
    }

    #[test]
    fn newborn_that_dies_starts_from_its_fade_color() {
        let t0 = Instant::from_millis(0);
        let mut cell = Cell::born(TARGET, t0);
        let shown = birth_color(NEAR_WHITE, TARGET, ms(640));
        cell.flag_dying(t0 + ms(640), ms(2_000));
        assert!(matches!(cell.phase, CellPhase::Dying { from, .. } if from == shown));
    }

    #[test]
    fn revived_cell_keeps_its_running_death() {
        let t0 = Instant::from_millis(0);
        let mut cell = Cell::seeded(TARGET);
        cell.flag_dying(t0, ms(2_000));
        assert!(cell.reveal_death(t0));

        cell.revive(Rgb::new(0, 200, 0), t0 + ms(500));
        let fade = cell.death(t0 + ms(500)).expect("death still running");
        assert_eq!(fade.color(t0 + ms(1_100)), death_color(TARGET, ms(1_100), ms(2_000)));

        // The birth fade is over at 2.1 s, the death at 2 s.
        cell.settle(t0 + ms(2_099));
        assert!(matches!(cell.phase, CellPhase::Newborn { .. }));
        cell.settle(t0 + ms(2_100));
        assert_eq!(cell.phase, CellPhase::Stable);
        assert_eq!(cell.death(t0 + ms(2_100)), None);
    }
}
