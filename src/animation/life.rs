//! Conway's Game of Life with a column wipe between generations.
//!
//! Each generation is computed in one step (B3/S23 on a torus), then revealed column by
//! column: swept columns show the new generation, unswept ones still show the previous.
//! Cells fade in when born; cells that die blink, flash and fade once the wipe reaches
//! them. A stagnant simulation (extinct, repeating, or stuck at one population) reseeds
//! itself.

pub mod cell;
pub mod grid;
pub mod stagnation;
pub mod wipe;

use alloc::vec::Vec;

use embassy_time::{Duration, Instant};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use self::cell::{Cell, CellPhase, DEATH_DURATION_MAX, DEATH_DURATION_MIN, death_color};
use self::grid::Generations;
use self::stagnation::{Stagnation, StagnationTracker};
use self::wipe::{WipeCursor, wipe_duration};
use crate::animation::{Animation, Pacer};
use crate::led_strip::{Rgb, colors};
use crate::led2d::Led2d;
use crate::palette::random_fallback;
use crate::settings::{MAX_SPEED_MULTIPLIER, MIN_SPEED_MULTIPLIER, Settings};
use crate::{Error, Result};

/// Time between generations at speed multiplier 1.
pub const GENERATION_INTERVAL: Duration = Duration::from_millis(300);
/// How often shadow state is checked against the alive bits.
pub const PHANTOM_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Where the engine is between generations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LifeState {
    /// The generation interval has elapsed; the next tick steps the grid.
    NeedsNewGeneration,
    /// A wipe is revealing the newest generation.
    Wiping,
    /// The newest generation is fully shown.
    #[default]
    Idle,
}

/// Starting patterns for [`Life::set_pattern`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pattern {
    /// Five-cell spaceship moving diagonally.
    Glider,
    /// Period-two oscillator.
    Blinker,
    /// 2×2 still life.
    Block,
    /// Random cells at the configured density.
    Random,
}

impl Pattern {
    /// Cells of the pattern relative to its top-left corner.
    #[must_use]
    pub const fn cells(self) -> &'static [(usize, usize)] {
        match self {
            Self::Glider => &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
            Self::Blinker => &[(0, 0), (1, 0), (2, 0)],
            Self::Block => &[(0, 0), (1, 0), (0, 1), (1, 1)],
            Self::Random => &[],
        }
    }
}

/// Everything allocated by `begin`.
struct Engine<const W: usize, const H: usize> {
    grids: Generations<W, H>,
    cells: Vec<Cell>,
}

impl<const W: usize, const H: usize> Engine<W, H> {
    fn new() -> Result<Self> {
        let grids = Generations::new()?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(W * H)
            .map_err(|_| Error::Allocation)?;
        cells.resize(W * H, Cell::default());
        Ok(Self { grids, cells })
    }

    fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        self.cells.get_mut(y * W + x)
    }
}

/// The Game of Life animation on a `W × H` torus.
pub struct Life<const W: usize, const H: usize> {
    engine: Option<Engine<W, H>>,
    tracker: StagnationTracker,
    wipe: WipeCursor,
    state: LifeState,
    rng: SmallRng,
    last_generation: Option<Instant>,
    sweep: Pacer,
    generation: u32,
}

impl<const W: usize, const H: usize> Life<W, H> {
    /// An unallocated engine; nothing is drawn until [`start`](Self::start) succeeds.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            engine: None,
            tracker: StagnationTracker::new(),
            wipe: WipeCursor::idle(W),
            state: LifeState::Idle,
            rng: SmallRng::seed_from_u64(seed),
            last_generation: None,
            sweep: Pacer::default(),
            generation: 0,
        }
    }

    /// Allocate the grids and seed them at the configured density.
    ///
    /// # Errors
    ///
    /// [`Error::Allocation`] if the grids or shadow cells cannot be allocated. The
    /// engine then stays unallocated and draws nothing.
    pub fn start(&mut self, now: Instant, settings: &Settings) -> Result<()> {
        self.stop();
        let engine = Engine::new().inspect_err(|_| {
            error!("life: cannot allocate a {}x{} grid", W, H);
        })?;
        self.engine = Some(engine);
        self.randomize(settings.density(), now, settings);
        info!("life started on {}x{}", W, H);
        Ok(())
    }

    /// Drop all allocated state.
    pub fn stop(&mut self) {
        self.engine = None;
        self.tracker.reset();
        self.wipe = WipeCursor::idle(W);
        self.state = LifeState::Idle;
        self.last_generation = None;
        self.sweep.reset();
        self.generation = 0;
    }

    /// Whether [`start`](Self::start) succeeded and [`stop`](Self::stop) was not called since.
    #[must_use]
    pub const fn is_allocated(&self) -> bool {
        self.engine.is_some()
    }

    /// Engine state.
    #[must_use]
    pub const fn state(&self) -> LifeState {
        self.state
    }

    /// The reveal cursor.
    #[must_use]
    pub const fn wipe(&self) -> &WipeCursor {
        &self.wipe
    }

    /// Generations stepped since the last reseed.
    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// Whether `(x, y)` is alive in the newest generation.
    #[must_use]
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.engine
            .as_ref()
            .is_some_and(|engine| engine.grids.current().get(x, y))
    }

    /// Live cells in the newest generation.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.engine
            .as_ref()
            .map_or(0, |engine| engine.grids.current().count())
    }

    /// Shadow state of `(x, y)`.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= W {
            return None;
        }
        self.engine
            .as_ref()
            .and_then(|engine| engine.cells.get(y * W + x).copied())
    }

    /// Reseed with `density` percent live cells, all shown at full color.
    pub fn randomize(&mut self, density: u8, now: Instant, settings: &Settings) {
        let density = u32::from(density.min(100));
        self.seed(now, settings, |_, _, rng| rng.gen_range(0..100) < density);
    }

    /// Reseed with exactly the given live cells. Coordinates wrap around the grid.
    pub fn place(&mut self, alive: &[(usize, usize)], now: Instant, settings: &Settings) {
        self.seed(now, settings, |x, y, _| {
            alive
                .iter()
                .any(|&(ax, ay)| ax % W.max(1) == x && ay % H.max(1) == y)
        });
    }

    /// Reseed with a named pattern near the middle of the grid.
    pub fn set_pattern(&mut self, pattern: Pattern, now: Instant, settings: &Settings) {
        if pattern == Pattern::Random {
            self.randomize(settings.density(), now, settings);
            return;
        }
        let left = (W / 2).saturating_sub(1);
        let top = (H / 2).saturating_sub(1);
        let mut cells: heapless::Vec<(usize, usize), 8> = heapless::Vec::new();
        for &(x, y) in pattern.cells() {
            // Patterns have at most five cells.
            let _ = cells.push((left + x, top + y));
        }
        self.place(&cells, now, settings);
    }

    fn seed(
        &mut self,
        now: Instant,
        settings: &Settings,
        mut alive: impl FnMut(usize, usize, &mut SmallRng) -> bool,
    ) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let palette = settings.palette();
        engine.grids.blank_previous();
        for y in 0..H {
            for x in 0..W {
                let live = alive(x, y, &mut self.rng);
                engine.grids.current_mut().set(x, y, live);
                let color = palette.random(&mut self.rng);
                if let Some(cell) = engine.cell_mut(x, y) {
                    *cell = if live {
                        Cell::seeded(color)
                    } else {
                        Cell::default()
                    };
                }
            }
        }
        let live = engine.grids.current().count();
        self.tracker.reset();
        self.generation = 0;
        self.begin_wipe(now, settings);
        debug!("life seeded with {} cells", live);
    }

    fn begin_wipe(&mut self, now: Instant, settings: &Settings) {
        self.wipe.start(
            now,
            settings.column_skip(),
            wipe_duration(settings.speed_multiplier()),
        );
        self.state = LifeState::Wiping;
        self.last_generation = Some(now);
    }

    /// Step one generation, then reseed if the simulation has stagnated.
    ///
    /// Births take a color right away and start fading in; deaths are only flagged
    /// until the wipe reaches their column. Returns why a reseed happened, if one did.
    pub fn step(&mut self, now: Instant, settings: &Settings) -> Option<Stagnation> {
        let engine = self.engine.as_mut()?;
        engine.grids.advance();

        let palette = settings.palette();
        let Engine { grids, cells } = engine;
        for y in 0..H {
            for x in 0..W {
                let Some(cell) = cells.get_mut(y * W + x) else {
                    continue;
                };
                match (grids.previous().get(x, y), grids.current().get(x, y)) {
                    (false, true) => {
                        let target = if settings.use_palette() {
                            palette.random(&mut self.rng)
                        } else {
                            random_fallback(&mut self.rng)
                        };
                        cell.revive(target, now);
                    }
                    (true, false) => {
                        let millis = self.rng.gen_range(
                            DEATH_DURATION_MIN.as_millis()..=DEATH_DURATION_MAX.as_millis(),
                        );
                        cell.flag_dying(now, Duration::from_millis(millis));
                    }
                    _ => {}
                }
            }
        }
        self.generation = self.generation.saturating_add(1);

        let live = grids.current().count();
        let hash = grids.current().hash();
        if let Some(reason) = self.tracker.observe(live, hash) {
            info!(
                "life reseeding after {} generations: {}",
                self.generation, reason
            );
            self.randomize(settings.density(), now, settings);
            return Some(reason);
        }
        self.begin_wipe(now, settings);
        None
    }

    /// Force shadow state to agree with the alive bits: cells neither alive nor dying
    /// become black, and live cells still flagged dying are restored.
    pub fn sweep_phantoms(&mut self) {
        let Some(Engine { grids, cells }) = self.engine.as_mut() else {
            return;
        };
        for y in 0..H {
            for x in 0..W {
                let Some(cell) = cells.get_mut(y * W + x) else {
                    continue;
                };
                let alive = grids.current().get(x, y);
                if !alive && !cell.is_dying() {
                    *cell = Cell::default();
                } else if alive && cell.is_dying() {
                    cell.phase = CellPhase::Stable;
                }
            }
        }
    }

    fn generation_interval(speed: f32) -> Duration {
        let speed = if speed.is_finite() {
            speed.clamp(MIN_SPEED_MULTIPLIER, MAX_SPEED_MULTIPLIER)
        } else {
            1.0
        };
        let micros = GENERATION_INTERVAL.as_micros() as f32 / speed;
        Duration::from_micros(micros as u64)
    }

    fn advance_wipe(&mut self, now: Instant) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if !self.wipe.is_active() {
            return;
        }
        let cells = &mut engine.cells;
        let still_wiping = self.wipe.advance(now, |x| {
            for y in 0..H {
                if let Some(cell) = cells.get_mut(y * W + x) {
                    cell.reveal_death(now);
                }
            }
        });
        if !still_wiping {
            self.state = LifeState::Idle;
        }
    }

    /// Color of `(x, y)` at `now`, or `None` when unallocated or off-grid.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize, now: Instant) -> Option<Rgb> {
        let engine = self.engine.as_ref()?;
        if x >= W {
            return None;
        }
        let cell = engine.cells.get(y * W + x)?;
        let revealed = self.wipe.is_revealed(x);
        let shown_alive = if revealed {
            engine.grids.current()
        } else {
            engine.grids.previous()
        }
        .get(x, y);
        // Unswept columns keep whatever the previous generation was showing, fades included.
        let color = match cell.phase {
            CellPhase::Dying {
                from,
                start: Some(start),
                duration,
            } => death_color(from, now.saturating_duration_since(start), duration),
            CellPhase::Dying { from, start: None, .. } if shown_alive => from,
            CellPhase::Newborn { .. } if revealed || shown_alive => cell.live_color(now),
            CellPhase::Newborn {
                interrupted: Some(fade),
                ..
            } => fade.color(now),
            _ if shown_alive => cell.target,
            _ => colors::BLACK,
        };
        Some(color)
    }

    /// Run one tick: step when due, advance the wipe, settle transitions.
    pub fn tick(&mut self, now: Instant, settings: &Settings) {
        if !self.is_allocated() {
            return;
        }
        if self.state == LifeState::Idle {
            let due = self.last_generation.is_none_or(|last| {
                now.saturating_duration_since(last) >= Self::generation_interval(settings.speed_multiplier())
            });
            if due {
                self.state = LifeState::NeedsNewGeneration;
            }
        }
        if self.state == LifeState::NeedsNewGeneration {
            self.step(now, settings);
        }
        self.advance_wipe(now);
        if self.sweep.ready(now, PHANTOM_SWEEP_INTERVAL) {
            self.sweep_phantoms();
        }
        if let Some(engine) = self.engine.as_mut() {
            for cell in &mut engine.cells {
                cell.settle(now);
            }
        }
    }
}

impl<const N: usize, const W: usize, const H: usize> Animation<N, W, H> for Life<W, H> {
    fn begin(&mut self, now: Instant, settings: &Settings) -> Result<()> {
        self.start(now, settings)
    }

    fn update(
        &mut self,
        now: Instant,
        canvas: &mut Led2d<'_, N, W, H>,
        settings: &Settings,
    ) -> bool {
        if !self.is_allocated() {
            return false;
        }
        self.tick(now, settings);
        for y in 0..H {
            for x in 0..W {
                if let Some(color) = self.pixel(x, y, now) {
                    canvas.set(x as i32, y as i32, color);
                }
            }
        }
        true
    }

    fn end(&mut self) {
        if self.is_allocated() {
            debug!("life stopped after {} generations", self.generation);
        }
        self.stop();
    }
}

impl<const W: usize, const H: usize> core::fmt::Debug for Life<W, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Life")
            .field("allocated", &self.is_allocated())
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("wipe", &self.wipe)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::led2d::layout::PanelConfig;
    use crate::led_strip::Frame1d;

    type Small = Life<8, 4>;

    fn ms(millis: u64) -> Instant {
        Instant::from_millis(millis)
    }

    fn started(settings: &Settings) -> Small {
        let mut life = Small::new(11);
        life.start(ms(0), settings).expect("allocates");
        life
    }

    /// Let the running wipe finish.
    fn finish_wipe(life: &mut Small, now: Instant) {
        life.advance_wipe(now);
        assert!(!life.wipe().is_active());
    }

    #[test]
    fn start_seeds_at_configured_density() {
        let mut settings = Settings::new::<32, 8, 4>();
        settings.set_density(100).expect("in range");
        let life = started(&settings);
        assert_eq!(life.live_count(), 32);
        assert_eq!(life.state(), LifeState::Wiping);

        settings.set_density(0).expect("in range");
        let life = started(&settings);
        assert_eq!(life.live_count(), 0);
    }

    #[test]
    fn density_zero_reseeds_immediately() {
        let mut settings = Settings::new::<32, 8, 4>();
        settings.set_density(0).expect("in range");
        let mut life = started(&settings);
        assert_eq!(life.step(ms(10), &settings), Some(Stagnation::Extinct));
    }

    #[test]
    fn unallocated_engine_draws_nothing() {
        let settings = Settings::new::<32, 8, 4>();
        let mut life = Small::new(1);
        let config = PanelConfig::default();
        let mut frame = Frame1d::<32>::new();
        let mut canvas = Led2d::<32, 8, 4>::new(&mut frame, &config);
        assert!(!life.update(ms(0), &mut canvas, &settings));
        assert_eq!(life.step(ms(0), &settings), None);
        assert_eq!(life.pixel(0, 0, ms(0)), None);
    }

    #[test]
    fn impossible_allocation_fails_closed() {
        let settings = Settings::new::<32, 8, 4>();
        let mut life = Life::<{ 1 << 62 }, 1>::new(0);
        assert!(matches!(
            life.start(ms(0), &settings),
            Err(Error::Allocation)
        ));
        assert!(!life.is_allocated());
    }

    #[test]
    fn deaths_wait_for_the_wipe() {
        let settings = Settings::new::<32, 8, 4>();
        let mut life = started(&settings);
        life.place(&[(3, 2), (4, 2), (5, 2)], ms(0), &settings);
        finish_wipe(&mut life, ms(1_000));

        // The blinker's ends die in the simulation, but the new wipe starts at column 0.
        assert_eq!(life.step(ms(1_000), &settings), None);
        assert_eq!(life.live_count(), 3);
        assert!(!life.is_alive(3, 2));
        let cell = life.cell(3, 2).expect("on grid");
        assert!(matches!(
            cell.phase,
            CellPhase::Dying { start: None, .. }
        ));
        assert_eq!(life.pixel(3, 2, ms(1_000)), Some(cell.target));

        finish_wipe(&mut life, ms(3_000));
        assert!(matches!(
            life.cell(3, 2).expect("on grid").phase,
            CellPhase::Dying { start: Some(_), .. }
        ));
    }

    #[test]
    fn births_fade_in_and_settle() {
        let mut settings = Settings::new::<32, 8, 4>();
        settings.set_use_palette(false);
        let mut life = started(&settings);
        // A horizontal blinker on row 1 turns vertical, giving births on rows 0 and 2.
        life.set_pattern(Pattern::Blinker, ms(0), &settings);
        finish_wipe(&mut life, ms(1_000));
        life.step(ms(1_000), &settings);
        finish_wipe(&mut life, ms(2_000));

        let (x, y) = (4, 0);
        assert!(life.is_alive(x, y));
        let mut cell = life.cell(x, y).expect("on grid");
        assert!(matches!(cell.phase, CellPhase::Newborn { .. }));
        assert_ne!(cell.target, colors::BLACK);
        assert_ne!(cell.target, colors::WHITE);

        assert_eq!(life.pixel(x, y, ms(1_000)), Some(super::cell::NEAR_WHITE));
        assert_eq!(life.pixel(x, y, ms(2_600)), Some(cell.target));
        assert_eq!(life.pixel(x, y, ms(9_000)), Some(cell.target));
        cell.settle(ms(2_600));
        assert_eq!(cell.phase, CellPhase::Stable);
    }

    #[test]
    fn unswept_columns_show_previous_generation() {
        let settings = Settings::new::<32, 8, 4>();
        let mut life = started(&settings);
        life.set_pattern(Pattern::Blinker, ms(0), &settings);
        finish_wipe(&mut life, ms(1_000));
        life.step(ms(1_000), &settings);

        // Column 3 lost its cell, but the new wipe has not reached it.
        assert!(!life.wipe().is_revealed(3));
        assert!(!life.is_alive(3, 1));
        let target = life.cell(3, 1).expect("on grid").target;
        assert_eq!(life.pixel(3, 1, ms(1_000)), Some(target));
    }

    #[test]
    fn phantom_sweep_clears_stale_shadow_state() {
        let settings = Settings::new::<32, 8, 4>();
        let mut life = started(&settings);
        life.place(&[], ms(0), &settings);
        let engine = life.engine.as_mut().expect("allocated");
        if let Some(cell) = engine.cell_mut(1, 1) {
            *cell = Cell::born(colors::RED, ms(0));
        }
        engine.grids.current_mut().set(2, 2, true);
        if let Some(cell) = engine.cell_mut(2, 2) {
            cell.flag_dying(ms(0), Duration::from_millis(2_000));
        }

        life.sweep_phantoms();
        assert_eq!(life.cell(1, 1), Some(Cell::default()));
        assert_eq!(life.cell(2, 2).expect("on grid").phase, CellPhase::Stable);
    }

    #[test]
    fn reseed_clears_transition_state() {
        let settings = Settings::new::<32, 8, 4>();
        let mut life = started(&settings);
        life.set_pattern(Pattern::Glider, ms(0), &settings);
        finish_wipe(&mut life, ms(1_000));
        life.step(ms(1_000), &settings);
        life.randomize(50, ms(1_100), &settings);
        for y in 0..4 {
            for x in 0..8 {
                assert_eq!(life.cell(x, y).expect("on grid").phase, CellPhase::Stable);
            }
        }
        assert_eq!(life.generation(), 0);
    }

    #[test]
    fn generation_interval_survives_any_speed() {
        assert_eq!(Small::generation_interval(1.0), GENERATION_INTERVAL);
        assert_eq!(Small::generation_interval(2.0), Duration::from_millis(150));
        for speed in [0.0, -4.0] {
            let slowest = Small::generation_interval(speed).as_millis();
            assert!((2_999..=3_001).contains(&slowest), "{speed} gave {slowest} ms");
        }
        assert_eq!(Small::generation_interval(1e9), Duration::from_millis(30));
        assert_eq!(Small::generation_interval(f32::NAN), GENERATION_INTERVAL);
        assert_eq!(Small::generation_interval(f32::INFINITY), GENERATION_INTERVAL);
    }

    #[test]
    fn surviving_newborn_keeps_fading_in_unswept_columns() {
        let settings = Settings::new::<32, 8, 4>();
        let mut life = started(&settings);
        // An L-tromino fills in to a block: (5, 2) is born in generation 1.
        life.place(&[(4, 1), (5, 1), (4, 2)], ms(0), &settings);
        finish_wipe(&mut life, ms(1_000));
        life.step(ms(1_000), &settings);
        assert!(life.is_alive(5, 2));
        assert!(matches!(
            life.cell(5, 2).expect("on grid").phase,
            CellPhase::Newborn { .. }
        ));
        finish_wipe(&mut life, ms(1_800));

        let before = life.pixel(5, 2, ms(1_800)).expect("on grid");
        assert_eq!(life.step(ms(1_800), &settings), None);
        assert!(!life.wipe().is_revealed(5));
        let after = life.pixel(5, 2, ms(1_801)).expect("on grid");
        let target = life.cell(5, 2).expect("on grid").target;
        assert_ne!(before, target, "still mid-fade");
        assert_eq!(after, life.cell(5, 2).expect("on grid").live_color(ms(1_801)));
        assert_ne!(after, target);
    }

    #[test]
    fn reborn_cell_keeps_dying_in_unswept_columns() {
        let settings = Settings::new::<32, 8, 4>();
        let mut life = started(&settings);
        // A horizontal blinker on row 0 brings (1, 1) to life in generation 1.
        life.place(&[(0, 0), (1, 0), (2, 0)], ms(0), &settings);
        finish_wipe(&mut life, ms(1_000));

        let death = Duration::from_millis(2_000);
        let engine = life.engine.as_mut().expect("allocated");
        if let Some(cell) = engine.cell_mut(1, 1) {
            *cell = Cell::seeded(colors::RED);
            cell.flag_dying(ms(1_000), death);
            cell.reveal_death(ms(1_000));
        }
        let before = life.pixel(1, 1, ms(1_500));
        assert_eq!(
            before,
            Some(death_color(colors::RED, Duration::from_millis(500), death))
        );

        assert_eq!(life.step(ms(1_500), &settings), None);
        assert!(life.is_alive(1, 1));
        assert!(!life.wipe().is_revealed(1));
        assert_eq!(
            life.pixel(1, 1, ms(1_600)),
            Some(death_color(colors::RED, Duration::from_millis(600), death))
        );
    }

    #[test]
    fn tick_steps_only_after_wipe_and_interval() {
        let settings = Settings::new::<32, 8, 4>();
        let mut life = started(&settings);
        life.set_pattern(Pattern::Glider, ms(0), &settings);
        life.tick(ms(100), &settings);
        assert_eq!(life.generation(), 0);
        assert_eq!(life.state(), LifeState::Wiping);

        life.tick(ms(750), &settings);
        assert_eq!(life.state(), LifeState::Idle);
        life.tick(ms(760), &settings);
        assert_eq!(life.generation(), 1);
        assert_eq!(life.state(), LifeState::Wiping);
    }
}
