//! The physical frame buffer: one color per LED, in strip order.
//!
//! Animations never touch a [`Frame1d`] by index; they draw through the mapped canvas in
//! [`led2d`](mod@crate::led2d). Brightness and gamma are applied only when the frame is
//! handed to a driver with [`Frame1d::flush`], so stored pixels keep full resolution.
//!
//! # Example
//!
//! ```rust
//! use panel_life::led_strip::{Frame1d, Gamma, colors};
//! # use core::convert::Infallible;
//! # struct Recorder(Vec<smart_leds::RGB8>);
//! # impl smart_leds::SmartLedsWrite for Recorder {
//! #     type Error = Infallible;
//! #     type Color = smart_leds::RGB8;
//! #     fn write<T, I>(&mut self, iterator: T) -> Result<(), Infallible>
//! #     where T: IntoIterator<Item = I>, I: Into<Self::Color> {
//! #         self.0 = iterator.into_iter().map(Into::into).collect();
//! #         Ok(())
//! #     }
//! # }
//!
//! let mut frame = Frame1d::<4>::new();
//! frame.set(0, colors::WHITE);
//! frame.add(0, colors::RED); // saturates
//! frame.fade_all(128);
//!
//! let mut driver = Recorder(Vec::new());
//! frame.flush(&mut driver, Gamma::Linear, 255)?;
//! assert_eq!(driver.0.len(), 4);
//! # Ok::<(), panel_life::Error>(())
//! ```

/// Predefined RGB color constants from the `smart_leds` crate.
///
/// Common colors include `RED`, `GREEN`, `BLUE`, `YELLOW`, `WHITE`, `BLACK`, `CYAN`, `MAGENTA`, `ORANGE`, `PURPLE`.
#[doc(inline)]
pub use smart_leds::colors;

/// 8-bit-per-channel RGB color from `embedded_graphics`.
#[doc(inline)]
pub use embedded_graphics::pixelcolor::Rgb888;

use core::ops::{Deref, DerefMut};

use embedded_graphics::prelude::RgbColor;
use smart_leds::{RGB8, SmartLedsWrite};

use crate::{Error, Result};

/// RGB color representation re-exported from the `smart_leds` crate.
pub type Rgb = RGB8;

// ============================================================================
// Gamma Correction
// ============================================================================

/// Gamma correction mode applied at flush time.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gamma {
    /// Linear gamma (no correction). Gamma = 1.0
    Linear,
    /// Standard gamma 2.2 correction for perceived brightness.
    #[default]
    Gamma2_2,
}

/// Default gamma correction curve (`Gamma::Gamma2_2`).
pub const GAMMA_DEFAULT: Gamma = Gamma::Gamma2_2;

/// Gamma 2.2 lookup table for 8-bit values.
/// Pre-computed to avoid floating point math: corrected = (value/255)^2.2 * 255
const GAMMA_2_2_TABLE: [u8; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2,
    3, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 6, 6, 6, 6, 7, 7, 7, 8, 8, 8, 9, 9, 9, 10, 10, 11, 11,
    11, 12, 12, 13, 13, 13, 14, 14, 15, 15, 16, 16, 17, 17, 18, 18, 19, 19, 20, 20, 21, 22, 22, 23,
    23, 24, 25, 25, 26, 26, 27, 28, 28, 29, 30, 30, 31, 32, 33, 33, 34, 35, 35, 36, 37, 38, 39, 39,
    40, 41, 42, 43, 43, 44, 45, 46, 47, 48, 49, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61,
    62, 63, 64, 65, 66, 67, 68, 69, 70, 71, 73, 74, 75, 76, 77, 78, 79, 81, 82, 83, 84, 85, 87, 88,
    89, 90, 91, 93, 94, 95, 97, 98, 99, 100, 102, 103, 105, 106, 107, 109, 110, 111, 113, 114, 116,
    117, 119, 120, 121, 123, 124, 126, 127, 129, 130, 132, 133, 135, 137, 138, 140, 141, 143, 145,
    146, 148, 149, 151, 153, 154, 156, 158, 159, 161, 163, 165, 166, 168, 170, 172, 173, 175, 177,
    179, 181, 182, 184, 186, 188, 190, 192, 194, 196, 197, 199, 201, 203, 205, 207, 209, 211, 213,
    215, 217, 219, 221, 223, 225, 227, 229, 231, 234, 236, 238, 240, 242, 244, 246, 248, 251, 253,
    255,
];

const fn linear_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut index = 0;
    while index < 256 {
        table[index] = index as u8;
        index += 1;
    }
    table
}

const LINEAR_TABLE: [u8; 256] = linear_table();

/// Generate a combined gamma correction and brightness scaling lookup table.
///
/// `combo_table[input_value]` gives the value written to the driver: first gamma
/// correction, then `(value * max_brightness) / 255`.
#[must_use]
pub const fn generate_combo_table(gamma: Gamma, max_brightness: u8) -> [u8; 256] {
    let gamma_table = match gamma {
        Gamma::Linear => &LINEAR_TABLE,
        Gamma::Gamma2_2 => &GAMMA_2_2_TABLE,
    };

    let mut result = [0u8; 256];
    let mut index = 0;
    while index < 256 {
        let gamma_corrected = gamma_table[index];
        let scaled = ((gamma_corrected as u16 * max_brightness as u16) / 255) as u8;
        result[index] = scaled;
        index += 1;
    }
    result
}

fn apply_correction(color: Rgb, combo_table: &[u8; 256]) -> Rgb {
    let lookup = |channel: u8| {
        combo_table
            .get(usize::from(channel))
            .copied()
            .unwrap_or(channel)
    };
    Rgb::new(lookup(color.r), lookup(color.g), lookup(color.b))
}

// ============================================================================
// Color math
// ============================================================================

/// Linear blend from `from` (`amount == 0`) to `to` (`amount == 255`).
#[must_use]
pub const fn blend(from: Rgb, to: Rgb, amount: u8) -> Rgb {
    const fn channel(from: u8, to: u8, amount: u8) -> u8 {
        let amount = amount as u16;
        ((from as u16 * (255 - amount) + to as u16 * amount) / 255) as u8
    }
    Rgb::new(
        channel(from.r, to.r, amount),
        channel(from.g, to.g, amount),
        channel(from.b, to.b, amount),
    )
}

/// Scale every channel by `brightness / 255`.
#[must_use]
pub const fn scale(color: Rgb, brightness: u8) -> Rgb {
    const fn channel(value: u8, brightness: u8) -> u8 {
        ((value as u16 * brightness as u16) / 255) as u8
    }
    Rgb::new(
        channel(color.r, brightness),
        channel(color.g, brightness),
        channel(color.b, brightness),
    )
}

/// Scale every channel by a non-negative factor, saturating at 255.
#[must_use]
pub fn scale_f32(color: Rgb, factor: f32) -> Rgb {
    let channel = |value: u8| (f32::from(value) * factor.max(0.0)).min(255.0) as u8;
    Rgb::new(channel(color.r), channel(color.g), channel(color.b))
}

/// Convert colors to [`RGB8`] for the frame buffer.
pub trait ToRgb8 {
    /// Convert this color to [`RGB8`].
    #[must_use]
    fn to_rgb8(self) -> RGB8;
}

impl ToRgb8 for RGB8 {
    #[inline(always)]
    fn to_rgb8(self) -> RGB8 {
        self
    }
}

impl ToRgb8 for Rgb888 {
    #[inline(always)]
    fn to_rgb8(self) -> RGB8 {
        RGB8::new(self.r(), self.g(), self.b())
    }
}

// ============================================================================
// Frame1d
// ============================================================================

/// [`Rgb`] pixel data for the whole strip, in wiring order.
///
/// Frames deref to `[Rgb; N]`. The mutating helpers ignore out-of-range indexes and
/// report it by returning `false`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame1d<const N: usize>(pub [Rgb; N]);

impl<const N: usize> Frame1d<N> {
    /// Number of LEDs in this frame.
    pub const LEN: usize = N;

    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([Rgb::new(0, 0, 0); N])
    }

    /// Create a frame filled with a single color.
    #[must_use]
    pub const fn filled(color: Rgb) -> Self {
        Self([color; N])
    }

    /// Color at `index`, if it exists.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.0.get(index).copied()
    }

    /// Overwrite one pixel.
    pub fn set(&mut self, index: usize, color: Rgb) -> bool {
        self.0.get_mut(index).map(|pixel| *pixel = color).is_some()
    }

    /// Add `color` to one pixel, saturating each channel at 255.
    pub fn add(&mut self, index: usize, color: Rgb) -> bool {
        self.0
            .get_mut(index)
            .map(|pixel| {
                *pixel = Rgb::new(
                    pixel.r.saturating_add(color.r),
                    pixel.g.saturating_add(color.g),
                    pixel.b.saturating_add(color.b),
                );
            })
            .is_some()
    }

    /// Dim every pixel toward black: `c -> c * (256 - amount) / 256`.
    ///
    /// `fade_all(0)` is a no-op and `fade_all(255)` blanks the frame.
    pub fn fade_all(&mut self, amount: u8) {
        let keep = 256 - u16::from(amount);
        let fade = |channel: u8| ((u16::from(channel) * keep) >> 8) as u8;
        for pixel in self.0.iter_mut() {
            *pixel = Rgb::new(fade(pixel.r), fade(pixel.g), fade(pixel.b));
        }
    }

    /// Set every pixel to black.
    pub fn clear(&mut self) {
        self.0 = [Rgb::new(0, 0, 0); N];
    }

    /// Write the frame to a driver with gamma correction and brightness scaling applied.
    ///
    /// The stored pixels are not modified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LedWrite`] if the driver rejects the frame.
    pub fn flush<D>(&self, driver: &mut D, gamma: Gamma, brightness: u8) -> Result<()>
    where
        D: SmartLedsWrite,
        Rgb: Into<D::Color>,
    {
        let combo_table = generate_combo_table(gamma, brightness);
        driver
            .write(
                self.0
                    .iter()
                    .map(|&color| apply_correction(color, &combo_table)),
            )
            .map_err(|_| Error::LedWrite)
    }
}

impl<const N: usize> Deref for Frame1d<N> {
    type Target = [Rgb; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> DerefMut for Frame1d<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const N: usize> From<[Rgb; N]> for Frame1d<N> {
    fn from(array: [Rgb; N]) -> Self {
        Self(array)
    }
}

impl<const N: usize> From<Frame1d<N>> for [Rgb; N] {
    fn from(frame: Frame1d<N>) -> Self {
        frame.0
    }
}

impl<const N: usize> Default for Frame1d<N> {
    fn default() -> Self {
        Self::new()
    }
}
