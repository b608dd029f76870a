//! Named five-color palettes shared by every animation.

use rand::Rng;

use crate::led_strip::{Rgb, blend};

/// A named set of five colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Name used by adapters and logs.
    pub name: &'static str,
    /// The colors, in gradient order.
    pub colors: [Rgb; 5],
}

const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    Rgb::new(r, g, b)
}

/// Every built-in palette. [`Settings::palette`](crate::settings::Settings::palette) indexes this.
pub const PALETTES: [Palette; 11] = [
    Palette {
        name: "blu_orange_green",
        colors: [
            rgb(0, 128, 255),
            rgb(255, 128, 0),
            rgb(0, 200, 60),
            rgb(64, 0, 128),
            rgb(255, 255, 64),
        ],
    },
    Palette {
        name: "cool_sunset",
        colors: [
            rgb(255, 100, 0),
            rgb(255, 0, 102),
            rgb(128, 0, 128),
            rgb(0, 255, 128),
            rgb(255, 255, 128),
        ],
    },
    Palette {
        name: "neon_tropical",
        colors: [
            rgb(0, 255, 255),
            rgb(255, 0, 255),
            rgb(255, 255, 0),
            rgb(0, 255, 0),
            rgb(255, 127, 0),
        ],
    },
    Palette {
        name: "galaxy",
        colors: [
            rgb(0, 0, 128),
            rgb(75, 0, 130),
            rgb(128, 0, 128),
            rgb(0, 128, 128),
            rgb(255, 0, 128),
        ],
    },
    Palette {
        name: "forest_fire",
        colors: [
            rgb(34, 139, 34),
            rgb(255, 69, 0),
            rgb(139, 0, 139),
            rgb(205, 133, 63),
            rgb(255, 215, 0),
        ],
    },
    Palette {
        name: "cotton_candy",
        colors: [
            rgb(255, 182, 193),
            rgb(152, 251, 152),
            rgb(135, 206, 250),
            rgb(238, 130, 238),
            rgb(255, 160, 122),
        ],
    },
    Palette {
        name: "sea_shore",
        colors: [
            rgb(0, 206, 209),
            rgb(127, 255, 212),
            rgb(240, 230, 140),
            rgb(255, 160, 122),
            rgb(173, 216, 230),
        ],
    },
    Palette {
        name: "fire_and_ice",
        colors: [
            rgb(255, 0, 0),
            rgb(255, 140, 0),
            rgb(255, 69, 0),
            rgb(0, 255, 255),
            rgb(0, 128, 255),
        ],
    },
    Palette {
        name: "retro_arcade",
        colors: [
            rgb(255, 0, 128),
            rgb(128, 0, 255),
            rgb(0, 255, 128),
            rgb(255, 255, 0),
            rgb(255, 128, 0),
        ],
    },
    Palette {
        name: "royal_rainbow",
        colors: [
            rgb(139, 0, 0),
            rgb(218, 165, 32),
            rgb(255, 0, 255),
            rgb(75, 0, 130),
            rgb(0, 100, 140),
        ],
    },
    Palette {
        name: "red",
        colors: [rgb(139, 0, 0); 5],
    },
];

/// Saturated primaries and secondaries used when palette colors are turned off.
///
/// None of them is black or white.
pub const FALLBACK_COLORS: [Rgb; 6] = [
    rgb(255, 0, 0),
    rgb(0, 255, 0),
    rgb(0, 0, 255),
    rgb(255, 255, 0),
    rgb(0, 255, 255),
    rgb(255, 0, 255),
];

impl Palette {
    /// Palette by index, falling back to the first palette for unknown indexes.
    #[must_use]
    pub fn get(index: usize) -> &'static Self {
        PALETTES.get(index).unwrap_or(&PALETTES[0])
    }

    /// Index of the palette named `name`.
    #[must_use]
    pub fn position(name: &str) -> Option<usize> {
        PALETTES
            .iter()
            .position(|palette| palette.name.eq_ignore_ascii_case(name))
    }

    /// Color at `index`, wrapping around.
    #[must_use]
    pub const fn color(&self, index: usize) -> Rgb {
        self.colors[index % self.colors.len()]
    }

    /// A uniformly random color from this palette.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgb {
        self.color(rng.gen_range(0..self.colors.len()))
    }

    /// A random color different from `avoid`, when the palette has one.
    pub fn random_other<R: Rng + ?Sized>(&self, rng: &mut R, avoid: Rgb) -> Rgb {
        if self.colors.iter().all(|&color| color == avoid) {
            return avoid;
        }
        loop {
            let color = self.random(rng);
            if color != avoid {
                return color;
            }
        }
    }

    /// Sample the palette as a gradient: `position` in `[0, len - 1)` blends adjacent
    /// colors; values outside wrap.
    #[must_use]
    pub fn gradient(&self, position: f32) -> Rgb {
        let span = (self.colors.len() - 1) as f32;
        let mut wrapped = libm::fmodf(position, span);
        if wrapped < 0.0 {
            wrapped += span;
        }
        let lower = libm::floorf(wrapped);
        let index = lower as usize;
        let amount = ((wrapped - lower) * 255.0) as u8;
        blend(self.color(index), self.color(index + 1), amount)
    }

    /// Sample the palette as a clamped ramp: `0.0` is the first color, `1.0` the last.
    #[must_use]
    pub fn ramp(&self, fraction: f32) -> Rgb {
        let last = self.colors.len() - 1;
        let position = fraction.clamp(0.0, 1.0) * last as f32;
        let lower = libm::floorf(position);
        let index = lower as usize;
        if index >= last {
            return self.color(last);
        }
        let amount = ((position - lower) * 255.0) as u8;
        blend(self.color(index), self.color(index + 1), amount)
    }
}

/// A random saturated fallback color, never black or white.
pub fn random_fallback<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    FALLBACK_COLORS[rng.gen_range(0..FALLBACK_COLORS.len())]
}
