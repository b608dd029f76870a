//! Drawing in logical `(x, y)` space on a multi-panel matrix.
//!
//! [`Led2d`] borrows the physical [`Frame1d`] and the current [`PanelConfig`] for one
//! tick. Every write goes through [`PanelLayout::map_to_physical`], so animations never
//! see panel rotation, panel order or serpentine wiring.
//!
//! `Led2d` implements the [`embedded-graphics`](https://docs.rs/embedded-graphics)
//! [`DrawTarget`], so shapes and text can be drawn directly.
//!
//! # Example
//!
//! ```rust
//! use embedded_graphics::{
//!     pixelcolor::Rgb888,
//!     prelude::*,
//!     primitives::{PrimitiveStyle, Rectangle},
//! };
//! use panel_life::led2d::{Led2d, layout::{PanelConfig, PanelOrder, Rotation}};
//! use panel_life::led_strip::{Frame1d, colors};
//!
//! let mut frame = Frame1d::<32>::new();
//! let config = PanelConfig::new(PanelOrder::RightFirst).with_rotation(0, Rotation::Deg90);
//! let mut canvas = Led2d::<32, 8, 4>::new(&mut frame, &config);
//!
//! canvas.set(0, 0, colors::RED);
//! Rectangle::new(Point::new(4, 0), Size::new(4, 4))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb888::BLUE))
//!     .draw(&mut canvas)?;
//!
//! assert_eq!(canvas.get(0, 0), Some(colors::RED));
//! assert_eq!(canvas.get(7, 3), Some(colors::BLUE));
//! # Ok::<(), core::convert::Infallible>(())
//! ```

pub mod layout;

use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{DrawTarget, OriginDimensions, Pixel, Size},
};

use crate::led2d::layout::{PanelConfig, PanelLayout};
use crate::led_strip::{Frame1d, Rgb, ToRgb8};

/// A logical-coordinate view of a physical frame for the duration of one tick.
#[derive(Debug)]
pub struct Led2d<'a, const N: usize, const W: usize, const H: usize> {
    frame: &'a mut Frame1d<N>,
    config: &'a PanelConfig,
}

impl<'a, const N: usize, const W: usize, const H: usize> Led2d<'a, N, W, H> {
    /// Geometry shared by every canvas of this size.
    pub const LAYOUT: PanelLayout<N, W, H> = PanelLayout::new();

    /// Borrow `frame` for drawing under the wiring in `config`.
    #[must_use]
    pub const fn new(frame: &'a mut Frame1d<N>, config: &'a PanelConfig) -> Self {
        Self { frame, config }
    }

    /// Logical width in pixels.
    #[must_use]
    pub const fn width(&self) -> usize {
        W
    }

    /// Logical height in pixels.
    #[must_use]
    pub const fn height(&self) -> usize {
        H
    }

    /// The wiring this canvas maps through.
    #[must_use]
    pub const fn config(&self) -> &PanelConfig {
        self.config
    }

    /// The underlying physical frame.
    #[must_use]
    pub const fn frame(&self) -> &Frame1d<N> {
        self.frame
    }

    /// Strip index of `(x, y)`, or `None` if it is off the matrix.
    #[must_use]
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        Self::LAYOUT.map_to_physical(x, y, self.config)
    }

    /// Overwrite one logical pixel. Returns `false` when `(x, y)` is off the matrix.
    pub fn set(&mut self, x: i32, y: i32, color: Rgb) -> bool {
        self.index(x, y)
            .is_some_and(|index| self.frame.set(index, color))
    }

    /// Saturating add into one logical pixel. Returns `false` when `(x, y)` is off the matrix.
    pub fn add(&mut self, x: i32, y: i32, color: Rgb) -> bool {
        self.index(x, y)
            .is_some_and(|index| self.frame.add(index, color))
    }

    /// Color of one logical pixel.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<Rgb> {
        self.index(x, y).and_then(|index| self.frame.get(index))
    }

    /// See [`Frame1d::fade_all`].
    pub fn fade_all(&mut self, amount: u8) {
        self.frame.fade_all(amount);
    }

    /// Set every pixel to black.
    pub fn clear(&mut self) {
        self.frame.clear();
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Rgb) {
        self.frame.fill(color);
    }
}

impl<const N: usize, const W: usize, const H: usize> OriginDimensions for Led2d<'_, N, W, H> {
    fn size(&self) -> Size {
        Size::new(W as u32, H as u32)
    }
}

impl<const N: usize, const W: usize, const H: usize> DrawTarget for Led2d<'_, N, W, H> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            // Off-matrix pixels are clipped.
            self.set(coord.x, coord.y, color.to_rgb8());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::{
        prelude::{Point, Primitive, RgbColor},
        primitives::{Line, PrimitiveStyle},
        Drawable,
    };

    use super::*;
    use crate::led2d::layout::{PanelOrder, Rotation};
    use crate::led_strip::colors;

    #[test]
    fn writes_land_on_mapped_indexes() {
        let mut frame = Frame1d::<16>::new();
        let config = PanelConfig::default();
        let mut canvas = Led2d::<16, 4, 4>::new(&mut frame, &config);
        assert!(canvas.set(0, 1, colors::GREEN));
        assert!(!canvas.set(4, 0, colors::GREEN));
        assert!(!canvas.set(-1, 0, colors::GREEN));
        assert_eq!(frame.get(7), Some(colors::GREEN));
    }

    #[test]
    fn add_goes_through_the_mapper() {
        let mut frame = Frame1d::<32>::new();
        let config = PanelConfig::new(PanelOrder::RightFirst).with_rotation(1, Rotation::Deg180);
        let mut canvas = Led2d::<32, 8, 4>::new(&mut frame, &config);
        canvas.add(4, 0, Rgb::new(100, 0, 0));
        canvas.add(4, 0, Rgb::new(200, 0, 0));
        assert_eq!(canvas.get(4, 0), Some(Rgb::new(255, 0, 0)));
        let index = canvas.index(4, 0).expect("on matrix");
        assert_eq!(frame.get(index), Some(Rgb::new(255, 0, 0)));
    }

    #[test]
    fn draw_target_clips_off_matrix_pixels() {
        let mut frame = Frame1d::<16>::new();
        let config = PanelConfig::default();
        let mut canvas = Led2d::<16, 4, 4>::new(&mut frame, &config);
        Line::new(Point::new(-2, 0), Point::new(5, 0))
            .into_styled(PrimitiveStyle::with_stroke(Rgb888::WHITE, 1))
            .draw(&mut canvas)
            .expect("infallible");
        for x in 0..4 {
            assert_eq!(canvas.get(x, 0), Some(colors::WHITE));
        }
        assert_eq!(canvas.get(0, 1), Some(colors::BLACK));
    }
}
