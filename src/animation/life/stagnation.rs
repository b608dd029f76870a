//! Detects simulations that stopped producing anything new.

use heapless::Deque;

/// Hashes remembered; oscillators with period up to this are caught.
pub const HASH_HISTORY: usize = 4;
/// Repeated-pattern generations tolerated before reseeding.
pub const REPEAT_THRESHOLD: u32 = 12;
/// Consecutive same-count generations tolerated before reseeding.
pub const UNCHANGED_LIMIT: u32 = 30;

/// Why a reseed was triggered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stagnation {
    /// No live cells remain.
    Extinct,
    /// The grid matched a recent generation too many times in a row.
    Repeating,
    /// The live count stayed the same for too long.
    Plateau,
}

/// Rolling record of recent generations.
#[derive(Clone, Debug, Default)]
pub struct StagnationTracker {
    last_count: Option<usize>,
    hashes: Deque<u32, HASH_HISTORY>,
    repeats: u32,
    unchanged: u32,
}

impl StagnationTracker {
    /// A tracker with no history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all history.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record one generation and report stagnation, if any.
    pub fn observe(&mut self, live_count: usize, hash: u32) -> Option<Stagnation> {
        if live_count == 0 {
            return Some(Stagnation::Extinct);
        }

        if self.last_count == Some(live_count) {
            self.unchanged += 1;
            if self.hashes.iter().any(|&seen| seen == hash) {
                self.repeats += 1;
            } else {
                self.repeats = 0;
            }
        } else {
            self.unchanged = 0;
            self.repeats = 0;
        }

        if self.hashes.is_full() {
            self.hashes.pop_front();
        }
        // Room was just made.
        let _ = self.hashes.push_back(hash);
        self.last_count = Some(live_count);

        if self.repeats > REPEAT_THRESHOLD {
            Some(Stagnation::Repeating)
        } else if self.unchanged >= UNCHANGED_LIMIT {
            Some(Stagnation::Plateau)
        } else {
            None
        }
    }

    /// Consecutive generations that matched a recent hash.
    #[must_use]
    pub const fn repeats(&self) -> u32 {
        self.repeats
    }

    /// Consecutive generations with an unchanged live count.
    #[must_use]
    pub const fn unchanged(&self) -> u32 {
        self.unchanged
    }
}
