//! The column cursor that reveals a new generation across the matrix.

use embassy_time::{Duration, Instant};

/// Full sweep length at speed multiplier 1.
pub const BASE_WIPE_DURATION: Duration = Duration::from_millis(750);
/// Shortest allowed sweep, however fast the speed multiplier.
pub const MIN_WIPE_DURATION: Duration = Duration::from_millis(5);

/// Sweep direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Column 0 first.
    #[default]
    LeftToRight,
    /// Last column first.
    RightToLeft,
}

impl Direction {
    /// The other direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::LeftToRight => Self::RightToLeft,
            Self::RightToLeft => Self::LeftToRight,
        }
    }
}

/// Wipe duration for a speed multiplier: `max(750 ms / speed, 5 ms)`.
#[must_use]
pub fn wipe_duration(speed_multiplier: f32) -> Duration {
    let micros = BASE_WIPE_DURATION.as_micros() as f32 / speed_multiplier.max(f32::MIN_POSITIVE);
    if !micros.is_finite() || micros >= BASE_WIPE_DURATION.as_micros() as f32 * 10.0 {
        return BASE_WIPE_DURATION * 10;
    }
    Duration::from_micros(micros as u64).max(MIN_WIPE_DURATION)
}

/// Reveal cursor over `width` columns.
///
/// Columns are revealed `skip` at a time, one step every `duration / steps`, where
/// `steps = ceil(width / skip)`. A late tick takes every step that is due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WipeCursor {
    width: usize,
    direction: Direction,
    revealed: usize,
    skip: usize,
    steps_taken: usize,
    started: Instant,
    step_interval: Duration,
}

impl WipeCursor {
    /// An idle cursor: every column counts as revealed.
    #[must_use]
    pub const fn idle(width: usize) -> Self {
        Self {
            width,
            direction: Direction::RightToLeft,
            revealed: width,
            skip: 1,
            steps_taken: 0,
            started: Instant::from_ticks(0),
            step_interval: Duration::from_ticks(0),
        }
    }

    /// Begin a sweep in the opposite direction to the last one.
    pub fn start(&mut self, now: Instant, skip: usize, duration: Duration) {
        let skip = skip.clamp(1, self.width.max(1));
        let steps = self.width.div_ceil(skip).max(1) as u64;
        self.direction = self.direction.reversed();
        self.revealed = 0;
        self.skip = skip;
        self.steps_taken = 0;
        self.started = now;
        self.step_interval = Duration::from_micros((duration.as_micros() / steps).max(1));
    }

    /// Whether a sweep is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.revealed < self.width
    }

    /// Direction of the current (or last) sweep.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Next column to be revealed, while active. Always below the width.
    #[must_use]
    pub const fn column(&self) -> Option<usize> {
        if !self.is_active() {
            return None;
        }
        Some(match self.direction {
            Direction::LeftToRight => self.revealed,
            Direction::RightToLeft => self.width - 1 - self.revealed,
        })
    }

    /// Whether column `x` shows the new generation yet.
    #[must_use]
    pub const fn is_revealed(&self, x: usize) -> bool {
        match self.direction {
            Direction::LeftToRight => x < self.revealed,
            Direction::RightToLeft => x + self.revealed >= self.width,
        }
    }

    /// Take every step due at `now`, calling `on_column` once for each newly revealed
    /// column. Returns `true` while the sweep is still active.
    pub fn advance(&mut self, now: Instant, mut on_column: impl FnMut(usize)) -> bool {
        if !self.is_active() {
            return false;
        }
        let elapsed = now.saturating_duration_since(self.started).as_micros();
        let due = (elapsed / self.step_interval.as_micros().max(1)) as usize;
        while self.steps_taken < due && self.is_active() {
            for _ in 0..self.skip {
                let Some(column) = self.column() else {
                    break;
                };
                self.revealed += 1;
                on_column(column);
            }
            self.steps_taken += 1;
        }
        self.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_scales_with_speed_and_has_floor() {
        assert_eq!(wipe_duration(1.0), Duration::from_millis(750));
        assert_eq!(wipe_duration(2.0), Duration::from_micros(375_000));
        assert_eq!(wipe_duration(1_000.0), MIN_WIPE_DURATION);
    }

    #[test]
    fn sweeps_alternate_direction() {
        let mut cursor = WipeCursor::idle(8);
        let t0 = Instant::from_millis(0);
        cursor.start(t0, 1, Duration::from_millis(80));
        assert_eq!(cursor.direction(), Direction::LeftToRight);
        assert_eq!(cursor.column(), Some(0));
        cursor.start(t0, 1, Duration::from_millis(80));
        assert_eq!(cursor.direction(), Direction::RightToLeft);
        assert_eq!(cursor.column(), Some(7));
    }

    #[test]
    fn steps_are_paced_and_catch_up() {
        let mut cursor = WipeCursor::idle(8);
        let t0 = Instant::from_millis(1_000);
        cursor.start(t0, 1, Duration::from_millis(80));

        let mut seen = Vec::new();
        assert!(cursor.advance(t0 + Duration::from_millis(9), |x| seen.push(x)));
        assert!(seen.is_empty());
        assert!(cursor.advance(t0 + Duration::from_millis(10), |x| seen.push(x)));
        assert_eq!(seen, [0]);
        assert!(cursor.is_revealed(0) && !cursor.is_revealed(1));

        // A late tick takes all overdue steps at once.
        assert!(!cursor.advance(t0 + Duration::from_millis(500), |x| seen.push(x)));
        assert_eq!(seen, [0, 1, 2, 3, 4, 5, 6, 7]);
        assert!((0..8).all(|x| cursor.is_revealed(x)));
        assert_eq!(cursor.column(), None);
    }

    #[test]
    fn column_skip_reveals_several_columns_per_step() {
        let mut cursor = WipeCursor::idle(8);
        cursor.start(Instant::from_millis(0), 1, Duration::from_millis(80));
        let t0 = Instant::from_millis(0);
        cursor.start(t0, 3, Duration::from_millis(30));

        let mut seen = Vec::new();
        cursor.advance(t0 + Duration::from_millis(10), |x| seen.push(x));
        assert_eq!(seen, [7, 6, 5]);
        cursor.advance(t0 + Duration::from_millis(30), |x| seen.push(x));
        assert_eq!(seen, [7, 6, 5, 4, 3, 2, 1, 0]);
        assert!(!cursor.is_active());
    }
}
