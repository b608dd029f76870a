//! Animations for LED matrices built from several square, serpentine-wired panels.
//!
//! Panels may be rotated in 90° steps and wired left-first or right-first. Everything
//! draws in logical `(x, y)` space and goes through one coordinate mapper, see
//! [`led2d::layout::PanelLayout`].
//!
//! The flagship animation is [`animation::life::Life`], a Game of Life whose generations
//! are revealed by a sweeping column wipe, with per-cell birth and death fades.
//!
//! # Glossary
//!
//! - **Panel:** one physical square tile of the matrix (for example 16×16 LEDs).
//! - **Serpentine wiring:** alternate rows of a panel run in opposite horizontal directions.
//! - **Wipe reveal:** a column-by-column reveal of a freshly computed generation.
//! - **Stagnation:** a simulation that stopped producing new information (empty grid,
//!   still life, or short oscillator).
//!
//! # Example
//!
//! ```rust,no_run
//! use embassy_time::Instant;
//! use panel_life::{animation::AnimationKind, led_matrix::LedMatrix};
//!
//! // Two 16×16 panels side by side.
//! let mut matrix = LedMatrix::<512, 32, 16>::new(7);
//! matrix.select(AnimationKind::Life, Instant::from_millis(0))?;
//! for tick in 0..100_u64 {
//!     matrix.tick(Instant::from_millis(tick * 10));
//! }
//! # Ok::<(), panel_life::Error>(())
//! ```
#![cfg_attr(not(any(test, feature = "host")), no_std)]

extern crate alloc;

// Logging macros must be declared before the modules that use them.
#[macro_use]
mod fmt;

pub mod animation;
mod error;
pub mod led2d;
pub mod led_matrix;
pub mod led_strip;
pub mod palette;
pub mod settings;
#[cfg(feature = "host")]
pub mod to_png;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Parameter, Result};
