//! Compile-time panel geometry plus the runtime wiring description of a multi-panel matrix.
//!
//! See [`PanelLayout`] for the mapping rules and examples.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Largest number of panels a [`PanelConfig`] can describe.
pub const MAX_PANELS: usize = 8;

/// Rotation of one panel, in 90° steps.
///
/// Rotations turn counter-clockwise in screen coordinates (`y` grows downward). For a
/// panel of side `s`, a logical local coordinate `(x, y)` becomes:
///
/// ```text
/// Deg0:   (x, y)
/// Deg90:  (y, s-1-x)
/// Deg180: (s-1-x, s-1-y)
/// Deg270: (s-1-y, x)
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// Panel mounted as wired.
    #[default]
    Deg0,
    /// Quarter turn.
    Deg90,
    /// Half turn.
    Deg180,
    /// Three-quarter turn.
    Deg270,
}

impl Rotation {
    /// All rotations, in increasing angle.
    pub const ALL: [Self; 4] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    /// Parse an angle in degrees. Only 0, 90, 180 and 270 are accepted.
    #[must_use]
    pub const fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }

    /// The angle in degrees.
    #[must_use]
    pub const fn degrees(self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// The rotation that undoes this one.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg0,
            Self::Deg90 => Self::Deg270,
            Self::Deg180 => Self::Deg180,
            Self::Deg270 => Self::Deg90,
        }
    }

    /// Rotate a local coordinate inside a square panel of side `size`.
    ///
    /// `x` and `y` must be below `size`.
    #[must_use]
    pub const fn apply(self, x: usize, y: usize, size: usize) -> (usize, usize) {
        match self {
            Self::Deg0 => (x, y),
            Self::Deg90 => (y, size - 1 - x),
            Self::Deg180 => (size - 1 - x, size - 1 - y),
            Self::Deg270 => (size - 1 - y, x),
        }
    }
}

impl TryFrom<i32> for Rotation {
    type Error = Error;

    fn try_from(degrees: i32) -> Result<Self> {
        Self::from_degrees(degrees).ok_or(Error::InvalidRotation { degrees })
    }
}

/// Which end of the chain the data line enters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelOrder {
    /// The leftmost logical panel is the first one on the strip.
    #[default]
    LeftFirst,
    /// The rightmost logical panel is the first one on the strip.
    RightFirst,
}

impl FromStr for PanelOrder {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        if name.eq_ignore_ascii_case("left") {
            Ok(Self::LeftFirst)
        } else if name.eq_ignore_ascii_case("right") {
            Ok(Self::RightFirst)
        } else {
            Err(Error::InvalidPanelOrder)
        }
    }
}

/// Runtime wiring description: panel order plus one rotation per panel.
///
/// Mutable at runtime; the mapper reads it on every call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelConfig {
    /// Panel order along the strip.
    pub order: PanelOrder,
    /// Rotation of each logical panel, left to right. Entries past the panel count are ignored.
    pub rotations: [Rotation; MAX_PANELS],
}

impl PanelConfig {
    /// Unrotated panels in the given order.
    #[must_use]
    pub const fn new(order: PanelOrder) -> Self {
        Self {
            order,
            rotations: [Rotation::Deg0; MAX_PANELS],
        }
    }

    /// Builder-style rotation for one panel. Out-of-range panels are ignored.
    #[must_use]
    pub const fn with_rotation(mut self, panel: usize, rotation: Rotation) -> Self {
        if panel < MAX_PANELS {
            self.rotations[panel] = rotation;
        }
        self
    }

    /// Rotation of a logical panel; `Deg0` for panels this config does not describe.
    #[must_use]
    pub fn rotation(&self, panel: usize) -> Rotation {
        self.rotations.get(panel).copied().unwrap_or_default()
    }
}

/// Compile-time geometry of a matrix of `W / H` square panels, each `H × H` LEDs,
/// wired row-serpentine and chained into a strip of `N` LEDs.
///
/// Coordinates use a screen-style convention: `(0, 0)` is the top-left corner,
/// `x` increases to the right, and `y` increases downward.
///
/// [`map_to_physical`](Self::map_to_physical) turns a logical `(x, y)` into a strip index:
///
/// 1. `panel = x / H`, local `x = x % H`.
/// 2. Rotate the local coordinate by the panel's [`Rotation`].
/// 3. Odd rows run backwards (serpentine).
/// 4. [`PanelOrder::RightFirst`] reverses the panel order.
/// 5. `index = panel * H * H + y * H + x`.
///
/// Geometry is validated at **compile time**: `W` must be a multiple of `H`,
/// `W * H` must equal `N`, and there can be at most [`MAX_PANELS`] panels.
///
/// # Example
///
/// ```rust
/// use panel_life::led2d::layout::{PanelConfig, PanelLayout, PanelOrder, Rotation};
///
/// // Two 4×4 panels, the second turned upside down.
/// const LAYOUT: PanelLayout<32, 8, 4> = PanelLayout::new();
/// let config = PanelConfig::new(PanelOrder::LeftFirst).with_rotation(1, Rotation::Deg180);
///
/// assert_eq!(LAYOUT.map_to_physical(0, 0, &config), Some(0));
/// assert_eq!(LAYOUT.map_to_physical(0, 1, &config), Some(7)); // serpentine row
/// assert_eq!(LAYOUT.map_to_physical(7, 3, &config), Some(16)); // rotated panel
/// assert_eq!(LAYOUT.map_to_physical(8, 0, &config), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelLayout<const N: usize, const W: usize, const H: usize>;

impl<const N: usize, const W: usize, const H: usize> PanelLayout<N, W, H> {
    const GEOMETRY: () = {
        assert!(W > 0 && H > 0, "W and H must be positive");
        assert!(W % H == 0, "W must be a multiple of the panel size H");
        assert!(W * H == N, "W*H must equal N");
        assert!(W / H <= MAX_PANELS, "too many panels");
        assert!(W <= i32::MAX as usize && H <= i32::MAX as usize);
    };

    /// Number of panels in the chain.
    pub const PANEL_COUNT: usize = W / H;

    /// Side length of each square panel.
    pub const PANEL_SIZE: usize = H;

    /// Validate the geometry (at compile time) and return the layout.
    #[must_use]
    pub const fn new() -> Self {
        let () = Self::GEOMETRY;
        Self
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        W
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        H
    }

    /// Total number of LEDs.
    #[must_use]
    pub const fn len(&self) -> usize {
        N
    }

    /// Number of panels in the chain.
    #[must_use]
    pub const fn panel_count(&self) -> usize {
        Self::PANEL_COUNT
    }

    /// Strip index for logical `(x, y)`, or `None` when the coordinate is off the matrix.
    ///
    /// Pure: the same inputs always produce the same index.
    #[must_use]
    pub fn map_to_physical(&self, x: i32, y: i32, config: &PanelConfig) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < W)?;
        let y = usize::try_from(y).ok().filter(|&y| y < H)?;
        let size = H;

        let panel = x / size;
        let (mut local_x, local_y) = config.rotation(panel).apply(x % size, y, size);

        if local_y % 2 == 1 {
            local_x = size - 1 - local_x;
        }

        let chain_position = match config.order {
            PanelOrder::LeftFirst => panel,
            PanelOrder::RightFirst => Self::PANEL_COUNT - 1 - panel,
        };

        let index = chain_position * size * size + local_y * size + local_x;
        (index < N).then_some(index)
    }

    /// Logical `(x, y)` for a strip index; the inverse of [`map_to_physical`](Self::map_to_physical).
    #[must_use]
    pub fn map_to_logical(&self, index: usize, config: &PanelConfig) -> Option<(usize, usize)> {
        if index >= N {
            return None;
        }
        let size = H;
        let chain_position = index / (size * size);
        let within = index % (size * size);
        let wired_y = within / size;
        let mut wired_x = within % size;
        if wired_y % 2 == 1 {
            wired_x = size - 1 - wired_x;
        }

        let panel = match config.order {
            PanelOrder::LeftFirst => chain_position,
            PanelOrder::RightFirst => Self::PANEL_COUNT - 1 - chain_position,
        };

        let (local_x, local_y) = config
            .rotation(panel)
            .inverse()
            .apply(wired_x, wired_y, size);
        Some((panel * size + local_x, local_y))
    }
}

impl<const N: usize, const W: usize, const H: usize> Default for PanelLayout<N, W, H> {
    fn default() -> Self {
        Self::new()
    }
}
