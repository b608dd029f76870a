//! Packed alive/dead bitsets and the B3/S23 generation step.

use alloc::vec::Vec;

use crate::{Error, Result};

const WORD_BITS: usize = u32::BITS as usize;

/// A `W × H` grid of alive bits packed into `u32` words, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitGrid<const W: usize, const H: usize> {
    words: Vec<u32>,
}

impl<const W: usize, const H: usize> BitGrid<W, H> {
    /// Number of cells.
    pub const CELLS: usize = W * H;
    const WORDS: usize = Self::CELLS.div_ceil(WORD_BITS);

    /// An all-dead grid.
    ///
    /// # Errors
    ///
    /// [`Error::Allocation`] if the words cannot be allocated.
    pub fn new() -> Result<Self> {
        let mut words = Vec::new();
        words
            .try_reserve_exact(Self::WORDS)
            .map_err(|_| Error::Allocation)?;
        words.resize(Self::WORDS, 0);
        Ok(Self { words })
    }

    const fn locate(x: usize, y: usize) -> Option<(usize, u32)> {
        if x >= W || y >= H {
            return None;
        }
        let cell = y * W + x;
        Some((cell / WORD_BITS, 1 << (cell % WORD_BITS)))
    }

    /// Whether `(x, y)` is alive. Off-grid cells are dead.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> bool {
        Self::locate(x, y)
            .and_then(|(word, mask)| self.words.get(word).map(|bits| bits & mask != 0))
            .unwrap_or(false)
    }

    /// Set `(x, y)` alive or dead. Off-grid cells are ignored.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        let Some((word, mask)) = Self::locate(x, y) else {
            return;
        };
        if let Some(bits) = self.words.get_mut(word) {
            if alive {
                *bits |= mask;
            } else {
                *bits &= !mask;
            }
        }
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Number of live cells.
    #[must_use]
    pub fn count(&self) -> usize {
        self.words.iter().map(|bits| bits.count_ones() as usize).sum()
    }

    /// CRC-32 of the packed bits; equal grids hash equally.
    #[must_use]
    pub fn hash(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        for bits in &self.words {
            hasher.update(&bits.to_le_bytes());
        }
        hasher.finalize()
    }

    /// Live neighbors of `(x, y)`, wrapping around the edges (toroidal topology).
    #[must_use]
    pub fn count_live_neighbors(&self, x: usize, y: usize) -> u8 {
        let mut count = 0u8;
        for y_offset in [-1, 0, 1] {
            for x_offset in [-1, 0, 1] {
                if x_offset == 0 && y_offset == 0 {
                    continue;
                }
                let neighbor_x = (x as isize + x_offset).rem_euclid(W as isize) as usize;
                let neighbor_y = (y as isize + y_offset).rem_euclid(H as isize) as usize;
                if self.get(neighbor_x, neighbor_y) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Write the next generation of `self` into `next`.
    pub fn step_into(&self, next: &mut Self) {
        for y in 0..H {
            for x in 0..W {
                // Any live cell with 2 or 3 live neighbors survives;
                // any dead cell with exactly 3 live neighbors becomes alive.
                let alive = matches!(
                    (self.get(x, y), self.count_live_neighbors(x, y)),
                    (true, 2 | 3) | (false, 3)
                );
                next.set(x, y, alive);
            }
        }
    }
}

/// The current and previous generations. Stepping writes into the spare buffer and swaps.
#[derive(Clone, Debug)]
pub struct Generations<const W: usize, const H: usize> {
    current: BitGrid<W, H>,
    previous: BitGrid<W, H>,
}

impl<const W: usize, const H: usize> Generations<W, H> {
    /// Two all-dead grids.
    ///
    /// # Errors
    ///
    /// [`Error::Allocation`] if either grid cannot be allocated.
    pub fn new() -> Result<Self> {
        Ok(Self {
            current: BitGrid::new()?,
            previous: BitGrid::new()?,
        })
    }

    /// The newest generation.
    #[must_use]
    pub const fn current(&self) -> &BitGrid<W, H> {
        &self.current
    }

    /// The generation before [`current`](Self::current).
    #[must_use]
    pub const fn previous(&self) -> &BitGrid<W, H> {
        &self.previous
    }

    /// Mutable access to the newest generation, for seeding.
    pub const fn current_mut(&mut self) -> &mut BitGrid<W, H> {
        &mut self.current
    }

    /// Forget the previous generation.
    pub fn blank_previous(&mut self) {
        self.previous.clear();
    }

    /// Advance one generation: the old current becomes previous.
    pub fn advance(&mut self) {
        self.current.step_into(&mut self.previous);
        core::mem::swap(&mut self.current, &mut self.previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Grid = BitGrid<8, 6>;

    fn with_cells(cells: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new().expect("allocates");
        for &(x, y) in cells {
            grid.set(x, y, true);
        }
        grid
    }

    fn step(grid: &Grid) -> Grid {
        let mut next = Grid::new().expect("allocates");
        grid.step_into(&mut next);
        next
    }

    #[test]
    fn empty_grid_stays_empty() {
        let grid = Grid::new().expect("allocates");
        assert_eq!(step(&grid).count(), 0);
    }

    #[test]
    fn isolated_cell_dies_in_one_generation() {
        let grid = with_cells(&[(4, 3)]);
        assert_eq!(step(&grid).count(), 0);
    }

    #[test]
    fn block_is_still_life() {
        let block = with_cells(&[(2, 2), (3, 2), (2, 3), (3, 3)]);
        let mut grid = block.clone();
        for _ in 0..20 {
            grid = step(&grid);
            assert_eq!(grid, block);
        }
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let horizontal = with_cells(&[(2, 3), (3, 3), (4, 3)]);
        let vertical = with_cells(&[(3, 2), (3, 3), (3, 4)]);
        assert_eq!(step(&horizontal), vertical);
        assert_eq!(step(&vertical), horizontal);
        assert_ne!(horizontal.hash(), vertical.hash());
    }

    #[test]
    fn neighbors_wrap_around_edges() {
        let grid = with_cells(&[(7, 5), (0, 5), (7, 0)]);
        assert_eq!(grid.count_live_neighbors(0, 0), 3);
    }

    #[test]
    fn off_grid_access_is_ignored() {
        let mut grid = Grid::new().expect("allocates");
        grid.set(8, 0, true);
        grid.set(0, 6, true);
        assert_eq!(grid.count(), 0);
        assert!(!grid.get(100, 100));
    }

    #[test]
    fn advance_keeps_previous_generation() {
        let mut generations = Generations::<8, 6>::new().expect("allocates");
        generations.current_mut().set(1, 1, true);
        generations.advance();
        assert!(generations.previous().get(1, 1));
        assert_eq!(generations.current().count(), 0);
    }
}
