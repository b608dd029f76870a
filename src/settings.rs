//! Runtime-adjustable parameters and the command surface used by external adapters.
//!
//! Every setter validates its input. Rejected values leave the previous value in place and
//! return [`Error::OutOfRange`] (or a more specific error); accepted values are returned as
//! the effective value. Network, menu or HTTP adapters running in other tasks send
//! [`Command`]s through a [`CommandChannel`]; the host loop applies them between ticks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::Duration;
use serde::{Deserialize, Serialize};

use crate::animation::AnimationKind;
use crate::led2d::layout::{MAX_PANELS, PanelConfig, PanelLayout, PanelOrder, Rotation};
use crate::palette::{PALETTES, Palette};
use crate::{Error, Parameter, Result};

/// Brightness applied at flush time unless changed.
pub const DEFAULT_BRIGHTNESS: u8 = 30;

/// Upper bound accepted by [`Settings::set_max_population`].
pub const MAX_POPULATION_LIMIT: usize = 500;

/// Largest [`Settings`] encoding produced by [`Settings::to_slice`].
pub const MAX_ENCODED_LEN: usize = 64;

/// Slowest accepted Life speed.
pub const MIN_SPEED_MULTIPLIER: f32 = 0.1;
/// Fastest accepted Life speed.
pub const MAX_SPEED_MULTIPLIER: f32 = 10.0;

/// Queue depth of a [`CommandChannel`].
pub const COMMAND_QUEUE_DEPTH: usize = 8;

/// Queue through which adapters in other tasks hand commands to the host loop.
pub type CommandChannel = Channel<CriticalSectionRawMutex, Command, COMMAND_QUEUE_DEPTH>;

/// Parameters shared by every animation plus the panel wiring.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    width: u16,
    panel_count: u8,
    animation: AnimationKind,
    palette: u8,
    brightness: u8,
    spawn_rate: f32,
    tail_length: u8,
    max_population: u16,
    update_interval_ms: Option<u16>,
    fade_amount: u8,
    panels: PanelConfig,
    speed_multiplier: f32,
    column_skip: u16,
    use_palette: bool,
    density: u8,
}

impl Settings {
    /// Defaults for an `N`-LED, `W × H` matrix.
    #[must_use]
    pub const fn new<const N: usize, const W: usize, const H: usize>() -> Self {
        let layout = PanelLayout::<N, W, H>::new();
        Self {
            width: layout.width() as u16,
            panel_count: layout.panel_count() as u8,
            animation: AnimationKind::Snow,
            palette: 0,
            brightness: DEFAULT_BRIGHTNESS,
            spawn_rate: 0.6,
            tail_length: 5,
            max_population: 200,
            update_interval_ms: None,
            fade_amount: 80,
            panels: PanelConfig::new(PanelOrder::LeftFirst),
            speed_multiplier: 1.0,
            column_skip: 1,
            use_palette: true,
            density: 33,
        }
    }

    /// Logical matrix width these settings were built for.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    /// Number of panels these settings were built for.
    #[must_use]
    pub const fn panel_count(&self) -> usize {
        self.panel_count as usize
    }

    /// Animation last selected through [`Command::SelectAnimation`].
    #[must_use]
    pub const fn animation(&self) -> AnimationKind {
        self.animation
    }

    /// Record the selected animation.
    pub const fn set_animation(&mut self, kind: AnimationKind) -> AnimationKind {
        self.animation = kind;
        kind
    }

    /// Index into [`PALETTES`].
    #[must_use]
    pub const fn palette_index(&self) -> usize {
        self.palette as usize
    }

    /// The active palette.
    #[must_use]
    pub fn palette(&self) -> &'static Palette {
        Palette::get(self.palette_index())
    }

    /// Select a palette by index.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] unless `index < PALETTES.len()`.
    pub fn set_palette(&mut self, index: usize) -> Result<usize> {
        if index >= PALETTES.len() {
            return Err(reject(Parameter::Palette));
        }
        self.palette = index as u8;
        Ok(index)
    }

    /// Select a palette by its name, ignoring case.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if no built-in palette has that name.
    pub fn set_palette_name(&mut self, name: &str) -> Result<usize> {
        let index = Palette::position(name).ok_or_else(|| reject(Parameter::Palette))?;
        self.set_palette(index)
    }

    /// Global brightness, applied at flush time and by additive animations.
    #[must_use]
    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// # Errors
    ///
    /// [`Error::OutOfRange`] unless `0 <= value <= 255`.
    pub fn set_brightness(&mut self, value: i32) -> Result<u8> {
        self.brightness = u8::try_from(value).map_err(|_| reject(Parameter::Brightness))?;
        Ok(self.brightness)
    }

    /// Probability of spawning an entity on each update.
    #[must_use]
    pub const fn spawn_rate(&self) -> f32 {
        self.spawn_rate
    }

    /// # Errors
    ///
    /// [`Error::OutOfRange`] unless the rate is finite and in `0.0..=1.0`.
    pub fn set_spawn_rate(&mut self, rate: f32) -> Result<f32> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(reject(Parameter::SpawnRate));
        }
        self.spawn_rate = rate;
        Ok(rate)
    }

    /// Trail length behind moving entities; also steers wave frequency.
    #[must_use]
    pub const fn tail_length(&self) -> usize {
        self.tail_length as usize
    }

    /// # Errors
    ///
    /// [`Error::OutOfRange`] unless `1 <= length <= 30`.
    pub fn set_tail_length(&mut self, length: i32) -> Result<usize> {
        if !(1..=30).contains(&length) {
            return Err(reject(Parameter::TailLength));
        }
        self.tail_length = length as u8;
        Ok(self.tail_length())
    }

    /// Cap on concurrently spawned entities.
    #[must_use]
    pub const fn max_population(&self) -> usize {
        self.max_population as usize
    }

    /// # Errors
    ///
    /// [`Error::OutOfRange`] unless `10 <= max <= 500`.
    pub fn set_max_population(&mut self, max: i32) -> Result<usize> {
        if !(10..=MAX_POPULATION_LIMIT as i32).contains(&max) {
            return Err(reject(Parameter::MaxPopulation));
        }
        self.max_population = max as u16;
        Ok(self.max_population())
    }

    /// The update interval override, or `default` (the animation's own) when none is set.
    #[must_use]
    pub fn update_interval(&self, default: Duration) -> Duration {
        self.update_interval_ms
            .map_or(default, |ms| Duration::from_millis(u64::from(ms)))
    }

    /// Override every animation's update interval.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] unless `10 <= ms <= 60000`.
    pub fn set_update_interval_ms(&mut self, ms: i64) -> Result<Duration> {
        if !(10..=60_000).contains(&ms) {
            return Err(reject(Parameter::UpdateInterval));
        }
        self.update_interval_ms = Some(ms as u16);
        Ok(Duration::from_millis(ms as u64))
    }

    /// Drop the update interval override so each animation uses its own.
    pub const fn clear_update_interval(&mut self) {
        self.update_interval_ms = None;
    }

    /// Per-update fade for trailing effects; also steers wave amplitude.
    #[must_use]
    pub const fn fade_amount(&self) -> u8 {
        self.fade_amount
    }

    /// # Errors
    ///
    /// [`Error::OutOfRange`] unless `0 <= amount <= 255`.
    pub fn set_fade_amount(&mut self, amount: i32) -> Result<u8> {
        self.fade_amount = u8::try_from(amount).map_err(|_| reject(Parameter::FadeAmount))?;
        Ok(self.fade_amount)
    }

    /// Panel wiring read by the mapper on every draw.
    #[must_use]
    pub const fn panels(&self) -> &PanelConfig {
        &self.panels
    }

    /// Set which end of the chain the data line enters.
    pub const fn set_panel_order(&mut self, order: PanelOrder) -> PanelOrder {
        self.panels.order = order;
        order
    }

    /// Flip the panel order.
    pub const fn swap_panels(&mut self) -> PanelOrder {
        let order = match self.panels.order {
            PanelOrder::LeftFirst => PanelOrder::RightFirst,
            PanelOrder::RightFirst => PanelOrder::LeftFirst,
        };
        self.set_panel_order(order)
    }

    /// Rotate one panel.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPanel`] if `panel` does not exist, [`Error::InvalidRotation`] unless
    /// `degrees` is 0, 90, 180 or 270.
    pub fn set_rotation(&mut self, panel: usize, degrees: i32) -> Result<Rotation> {
        if panel >= self.panel_count() || panel >= MAX_PANELS {
            warn!("rejected rotation for panel {}", panel);
            return Err(Error::InvalidPanel { panel });
        }
        let rotation = Rotation::try_from(degrees)?;
        self.panels = self.panels.with_rotation(panel, rotation);
        Ok(rotation)
    }

    /// Life speed; generation and wipe intervals divide by it.
    #[must_use]
    pub const fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// # Errors
    ///
    /// [`Error::OutOfRange`] unless the multiplier is finite and in `0.1..=10.0`.
    pub fn set_speed_multiplier(&mut self, multiplier: f32) -> Result<f32> {
        if !(MIN_SPEED_MULTIPLIER..=MAX_SPEED_MULTIPLIER).contains(&multiplier) {
            return Err(reject(Parameter::SpeedMultiplier));
        }
        self.speed_multiplier = multiplier;
        Ok(multiplier)
    }

    /// Columns revealed per wipe step.
    #[must_use]
    pub const fn column_skip(&self) -> usize {
        self.column_skip as usize
    }

    /// Set columns per wipe step, clamped to `1..=width`.
    pub fn set_column_skip(&mut self, skip: i32) -> usize {
        let clamped = skip.clamp(1, i32::from(self.width.max(1)));
        self.column_skip = clamped as u16;
        self.column_skip()
    }

    /// Whether newborn life cells take palette colors (otherwise saturated primaries).
    #[must_use]
    pub const fn use_palette(&self) -> bool {
        self.use_palette
    }

    /// Toggle palette colors for newborn cells.
    pub const fn set_use_palette(&mut self, use_palette: bool) -> bool {
        self.use_palette = use_palette;
        use_palette
    }

    /// Percentage of cells alive after a reseed.
    #[must_use]
    pub const fn density(&self) -> u8 {
        self.density
    }

    /// # Errors
    ///
    /// [`Error::OutOfRange`] unless `0 <= percent <= 100`.
    pub fn set_density(&mut self, percent: i32) -> Result<u8> {
        if !(0..=100).contains(&percent) {
            return Err(reject(Parameter::Density));
        }
        self.density = percent as u8;
        Ok(self.density)
    }

    /// Apply one command, returning the effective value.
    ///
    /// # Errors
    ///
    /// Whatever the matching setter rejects; the setting keeps its prior value.
    pub fn apply(&mut self, command: Command) -> Result<Reply> {
        Ok(match command {
            Command::SetPalette(index) => Reply::Palette(self.set_palette(index)?),
            Command::SetBrightness(value) => Reply::Brightness(self.set_brightness(value)?),
            Command::SetSpawnRate(rate) => Reply::SpawnRate(self.set_spawn_rate(rate)?),
            Command::SetTailLength(length) => Reply::TailLength(self.set_tail_length(length)?),
            Command::SetMaxPopulation(max) => {
                Reply::MaxPopulation(self.set_max_population(max)?)
            }
            Command::SetUpdateInterval(ms) => {
                Reply::UpdateInterval(self.set_update_interval_ms(ms)?)
            }
            Command::ClearUpdateInterval => {
                self.clear_update_interval();
                Reply::UpdateIntervalCleared
            }
            Command::SetFadeAmount(amount) => Reply::FadeAmount(self.set_fade_amount(amount)?),
            Command::SetPanelOrder(order) => Reply::PanelOrder(self.set_panel_order(order)),
            Command::SwapPanels => Reply::PanelOrder(self.swap_panels()),
            Command::SetRotation { panel, degrees } => Reply::Rotation {
                panel,
                rotation: self.set_rotation(panel, degrees)?,
            },
            Command::SetSpeedMultiplier(multiplier) => {
                Reply::SpeedMultiplier(self.set_speed_multiplier(multiplier)?)
            }
            Command::SetColumnSkip(skip) => Reply::ColumnSkip(self.set_column_skip(skip)),
            Command::SetUsePalette(use_palette) => {
                Reply::UsePalette(self.set_use_palette(use_palette))
            }
            Command::SetDensity(percent) => Reply::Density(self.set_density(percent)?),
            Command::SelectAnimation(kind) => Reply::Animation(self.set_animation(kind)),
            Command::NextAnimation => Reply::Animation(self.set_animation(self.animation.next())),
        })
    }

    /// Encode into `buffer` with `postcard`, returning the used prefix.
    ///
    /// # Errors
    ///
    /// [`Error::Serialization`] if `buffer` is too small (see [`MAX_ENCODED_LEN`]).
    pub fn to_slice<'a>(&self, buffer: &'a mut [u8]) -> Result<&'a mut [u8]> {
        postcard::to_slice(self, buffer).map_err(|_| Error::Serialization)
    }

    /// Decode settings written by [`Settings::to_slice`] for an `N`-LED, `W × H` matrix.
    ///
    /// Every decoded value goes through its setter again, so a corrupted or foreign blob
    /// cannot smuggle in a value the command surface would reject.
    ///
    /// # Errors
    ///
    /// [`Error::Serialization`] if the bytes are not a valid encoding or were saved for a
    /// different geometry; whatever a setter rejects otherwise.
    pub fn from_bytes<const N: usize, const W: usize, const H: usize>(
        bytes: &[u8],
    ) -> Result<Self> {
        let stored: Self = postcard::from_bytes(bytes).map_err(|_| Error::Serialization)?;
        let mut settings = Self::new::<N, W, H>();
        if stored.width != settings.width || stored.panel_count != settings.panel_count {
            warn!(
                "stored settings are for {} columns on {} panels",
                stored.width, stored.panel_count
            );
            return Err(Error::Serialization);
        }
        settings.set_animation(stored.animation);
        settings.set_palette(usize::from(stored.palette))?;
        settings.set_brightness(i32::from(stored.brightness))?;
        settings.set_spawn_rate(stored.spawn_rate)?;
        settings.set_tail_length(i32::from(stored.tail_length))?;
        settings.set_max_population(i32::from(stored.max_population))?;
        if let Some(ms) = stored.update_interval_ms {
            settings.set_update_interval_ms(i64::from(ms))?;
        }
        settings.set_fade_amount(i32::from(stored.fade_amount))?;
        settings.set_panel_order(stored.panels.order);
        for panel in 0..settings.panel_count() {
            settings.set_rotation(panel, stored.panels.rotation(panel).degrees())?;
        }
        settings.set_speed_multiplier(stored.speed_multiplier)?;
        settings.set_column_skip(i32::from(stored.column_skip));
        settings.set_use_palette(stored.use_palette);
        settings.set_density(i32::from(stored.density))?;
        Ok(settings)
    }
}

fn reject(parameter: Parameter) -> Error {
    warn!("rejected {}", parameter);
    Error::OutOfRange { parameter }
}

/// One parameter change, as sent by an adapter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// See [`Settings::set_palette`].
    SetPalette(usize),
    /// See [`Settings::set_brightness`].
    SetBrightness(i32),
    /// See [`Settings::set_spawn_rate`].
    SetSpawnRate(f32),
    /// See [`Settings::set_tail_length`].
    SetTailLength(i32),
    /// See [`Settings::set_max_population`].
    SetMaxPopulation(i32),
    /// See [`Settings::set_update_interval_ms`].
    SetUpdateInterval(i64),
    /// See [`Settings::clear_update_interval`].
    ClearUpdateInterval,
    /// See [`Settings::set_fade_amount`].
    SetFadeAmount(i32),
    /// See [`Settings::set_panel_order`].
    SetPanelOrder(PanelOrder),
    /// See [`Settings::swap_panels`].
    SwapPanels,
    /// See [`Settings::set_rotation`].
    SetRotation {
        /// Logical panel index, left to right.
        panel: usize,
        /// Angle in degrees.
        degrees: i32,
    },
    /// See [`Settings::set_speed_multiplier`].
    SetSpeedMultiplier(f32),
    /// See [`Settings::set_column_skip`].
    SetColumnSkip(i32),
    /// See [`Settings::set_use_palette`].
    SetUsePalette(bool),
    /// See [`Settings::set_density`].
    SetDensity(i32),
    /// Switch the running animation.
    SelectAnimation(AnimationKind),
    /// Switch to the next animation in menu order.
    NextAnimation,
}

/// The effective value after a [`Command`] was applied.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    /// Active palette index.
    Palette(usize),
    /// Brightness.
    Brightness(u8),
    /// Spawn rate.
    SpawnRate(f32),
    /// Tail length.
    TailLength(usize),
    /// Population cap.
    MaxPopulation(usize),
    /// Interval override.
    UpdateInterval(Duration),
    /// Animations use their own intervals again.
    UpdateIntervalCleared,
    /// Fade amount.
    FadeAmount(u8),
    /// Panel order.
    PanelOrder(PanelOrder),
    /// Rotation of one panel.
    Rotation {
        /// Logical panel index.
        panel: usize,
        /// Its new rotation.
        rotation: Rotation,
    },
    /// Speed multiplier.
    SpeedMultiplier(f32),
    /// Effective (clamped) column skip.
    ColumnSkip(usize),
    /// Palette use for newborn cells.
    UsePalette(bool),
    /// Seed density.
    Density(u8),
    /// Animation to run; the host loop performs the switch.
    Animation(AnimationKind),
}
