//! Whole-matrix on/off test pattern for checking wiring and power.

use embassy_time::{Duration, Instant};
use embedded_graphics::{
    Drawable,
    pixelcolor::Rgb888,
    prelude::{Dimensions, Primitive, RgbColor},
    primitives::PrimitiveStyle,
};

use crate::Result;
use crate::animation::{Animation, Pacer};
use crate::led2d::Led2d;
use crate::settings::Settings;

const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Toggles every pixel between white and black.
#[derive(Debug, Default)]
pub struct Blink {
    lit: bool,
    pacer: Pacer,
}

impl Blink {
    /// Starts dark; the first update lights the matrix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<const N: usize, const W: usize, const H: usize> Animation<N, W, H> for Blink {
    fn begin(&mut self, _now: Instant, _settings: &Settings) -> Result<()> {
        self.lit = false;
        self.pacer.reset();
        Ok(())
    }

    fn update(
        &mut self,
        now: Instant,
        canvas: &mut Led2d<'_, N, W, H>,
        settings: &Settings,
    ) -> bool {
        if !self.pacer.ready(now, settings.update_interval(DEFAULT_INTERVAL)) {
            return false;
        }
        self.lit = !self.lit;
        let color = if self.lit { Rgb888::WHITE } else { Rgb888::BLACK };
        let Ok(()) = canvas
            .bounding_box()
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(canvas);
        true
    }

    fn end(&mut self) {
        self.lit = false;
    }
}
