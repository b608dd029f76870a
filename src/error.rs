//! Crate-wide error type.

/// Settings that can be rejected for being out of range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, derive_more::Display)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parameter {
    /// Active palette index.
    #[display("palette")]
    Palette,
    /// Global brightness.
    #[display("brightness")]
    Brightness,
    /// Spawn probability per update.
    #[display("spawn rate")]
    SpawnRate,
    /// Trail length behind moving entities.
    #[display("tail length")]
    TailLength,
    /// Population cap for spawned entities.
    #[display("max population")]
    MaxPopulation,
    /// Update interval override in milliseconds.
    #[display("update interval")]
    UpdateInterval,
    /// Per-frame fade applied by trailing effects.
    #[display("fade amount")]
    FadeAmount,
    /// Life speed multiplier.
    #[display("speed multiplier")]
    SpeedMultiplier,
    /// Seed density for the life grid, in percent.
    #[display("density")]
    Density,
}

/// Errors reported by the core.
///
/// None of these stop the host loop: a rejected setting keeps its prior value, and a
/// failed animation simply renders nothing.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A numeric setting was outside its accepted range; the prior value is unchanged.
    #[display("{parameter} out of range")]
    OutOfRange {
        /// The rejected setting.
        #[error(not(source))]
        parameter: Parameter,
    },
    /// A panel index does not exist in the configured geometry.
    #[display("panel {panel} does not exist")]
    InvalidPanel {
        /// The rejected panel index.
        #[error(not(source))]
        panel: usize,
    },
    /// A rotation was not one of 0, 90, 180 or 270 degrees.
    #[display("rotation {degrees} is not one of 0, 90, 180, 270")]
    InvalidRotation {
        /// The rejected angle.
        #[error(not(source))]
        degrees: i32,
    },
    /// A panel order name was neither `left` nor `right`.
    #[display("panel order must be 'left' or 'right'")]
    InvalidPanelOrder,
    /// An animation name did not match any built-in animation.
    #[display("unknown animation")]
    UnknownAnimation,
    /// Animation state could not be allocated; the animation refuses to start.
    #[display("allocation failed")]
    Allocation,
    /// The LED driver rejected a frame.
    #[display("LED driver write failed")]
    LedWrite,
    /// Settings could not be encoded or decoded.
    #[display("settings serialization failed")]
    Serialization,
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
