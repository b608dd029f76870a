//! Host-side previews: render frames as they would look on the matrix, as PNG or APNG.
//!
//! Frames are stored in physical strip order, so each one is first mapped back to
//! logical `(x, y)` with the panel configuration it was drawn with.
#![cfg(feature = "host")]

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use png::{BitDepth, ColorType, Encoder, ScaledFloat};

use crate::led_strip::{Frame1d, Rgb};
use crate::led2d::layout::{PanelConfig, PanelLayout};

const PREVIEW_INVERSE_GAMMA: f32 = 2.2;

/// A frame unscrambled into logical row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicalFrame<const W: usize, const H: usize> {
    pixels: Vec<Rgb>,
}

impl<const W: usize, const H: usize> LogicalFrame<W, H> {
    /// Map every LED of `frame` back to its logical position under `config`.
    #[must_use]
    pub fn from_physical<const N: usize>(frame: &Frame1d<N>, config: &PanelConfig) -> Self {
        let layout = PanelLayout::<N, W, H>::new();
        let mut pixels = vec![Rgb::default(); W * H];
        for (index, &color) in frame.iter().enumerate() {
            let Some((x, y)) = layout.map_to_logical(index, config) else {
                continue;
            };
            if let Some(pixel) = pixels.get_mut(y * W + x) {
                *pixel = color;
            }
        }
        Self { pixels }
    }

    /// Color at logical `(x, y)`.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= W {
            return None;
        }
        self.pixels.get(y * W + x).copied()
    }
}

/// Render one frame into a PNG file sized to the requested maximum dimension.
///
/// # Errors
///
/// Any I/O or encoding error.
pub fn write_frame_png<const N: usize, const W: usize, const H: usize>(
    frame: &Frame1d<N>,
    config: &PanelConfig,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
) -> Result<(), Box<dyn Error>> {
    let output_path = output_path.as_ref();
    let logical = LogicalFrame::<W, H>::from_physical(frame, config);
    let cell_size = select_cell_size(W as u32, H as u32, target_max_dimension);
    let (width, height, pixels) = matrix_pixels(&logical, cell_size, PREVIEW_INVERSE_GAMMA);
    create_parent(output_path)?;

    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Sixteen);
    encoder.set_source_gamma(ScaledFloat::new(1.0));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&pixels)?;
    println!("wrote PNG to {}", output_path.display());
    Ok(())
}

/// Render a sequence of frames into a looping APNG file.
///
/// # Errors
///
/// Any I/O or encoding error, or an empty `frames`.
pub fn write_frames_apng<const N: usize, const W: usize, const H: usize>(
    frames: &[Frame1d<N>],
    config: &PanelConfig,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
    frame_delay_ms: u16,
) -> Result<(), Box<dyn Error>> {
    if frames.is_empty() {
        return Err("frames must not be empty".into());
    }
    let output_path = output_path.as_ref();
    let cell_size = select_cell_size(W as u32, H as u32, target_max_dimension);
    let frame_count = u32::try_from(frames.len())?;

    let mut width = 0;
    let mut height = 0;
    let mut rendered = Vec::with_capacity(frames.len());
    for frame in frames {
        let logical = LogicalFrame::<W, H>::from_physical(frame, config);
        let (frame_width, frame_height, pixels) =
            matrix_pixels(&logical, cell_size, PREVIEW_INVERSE_GAMMA);
        width = frame_width;
        height = frame_height;
        rendered.push(pixels);
    }
    create_parent(output_path)?;

    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Sixteen);
    encoder.set_source_gamma(ScaledFloat::new(1.0));
    encoder.set_animated(frame_count, 0)?;
    let mut writer = encoder.write_header()?;
    for pixels in rendered {
        writer.set_frame_delay(frame_delay_ms.max(1), 1000)?;
        writer.write_image_data(&pixels)?;
    }
    writer.finish()?;
    println!("wrote APNG to {}", output_path.display());
    Ok(())
}

fn create_parent(output_path: &Path) -> std::io::Result<()> {
    match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Largest cell size (at least 4 px) whose image fits in `target_max_dimension`.
fn select_cell_size(columns: u32, rows: u32, target_max_dimension: u32) -> u32 {
    let mut cell_size = target_max_dimension.max(4);
    while cell_size > 4 {
        let led_radius = led_radius(cell_size);
        let width = columns * cell_size + led_radius * 2;
        let height = rows * cell_size + led_radius * 2;
        if width.max(height) <= target_max_dimension {
            break;
        }
        cell_size -= 1;
    }
    cell_size
}

const fn led_radius(cell_size: u32) -> u32 {
    let led_margin = if cell_size / 8 > 1 { cell_size / 8 } else { 1 };
    (cell_size - led_margin * 2) / 2
}

/// 16-bit RGB image of round LEDs with soft edges on a black board.
fn matrix_pixels<const W: usize, const H: usize>(
    frame: &LogicalFrame<W, H>,
    cell_size: u32,
    preview_inverse_gamma: f32,
) -> (u32, u32, Vec<u8>) {
    let led_radius = led_radius(cell_size).max(1);
    let fade_width = (led_radius / 3).max(1);
    let border = led_radius;
    let width = (W as u32) * cell_size + border * 2;
    let height = (H as u32) * cell_size + border * 2;
    let mut bytes = vec![0u8; (width * height * 3 * 2) as usize];
    let center = (cell_size - 1) as i32 / 2;
    let led_radius_f = led_radius as f32;
    let inner_radius_f = led_radius.saturating_sub(fade_width) as f32;
    let radius_sq = (led_radius as i32) * (led_radius as i32);

    for row in 0..H {
        for column in 0..W {
            let Some(pixel) = frame.get(column, row) else {
                continue;
            };
            let channels = [pixel.r, pixel.g, pixel.b]
                .map(|channel| inverse_gamma_to_linear(channel, preview_inverse_gamma));
            let origin_x = (column as u32) * cell_size;
            let origin_y = (row as u32) * cell_size;

            for local_y in 0..cell_size {
                let delta_y = local_y as i32 - center;
                for local_x in 0..cell_size {
                    let delta_x = local_x as i32 - center;
                    let distance_sq = delta_x * delta_x + delta_y * delta_y;
                    if distance_sq > radius_sq {
                        continue;
                    }
                    let distance = (distance_sq as f32).sqrt();
                    let intensity = if distance <= inner_radius_f {
                        1.0
                    } else {
                        (1.0 - (distance - inner_radius_f) / (led_radius_f - inner_radius_f))
                            .max(0.0)
                    };
                    let x = border + origin_x + local_x;
                    let y = border + origin_y + local_y;
                    let start = ((y * width + x) * 3 * 2) as usize;
                    let Some(out) = bytes.get_mut(start..start + 6) else {
                        continue;
                    };
                    for (chunk, linear) in out.chunks_exact_mut(2).zip(channels) {
                        chunk.copy_from_slice(&linear_to_u16(linear * intensity).to_be_bytes());
                    }
                }
            }
        }
    }

    (width, height, bytes)
}

fn inverse_gamma_to_linear(channel: u8, preview_inverse_gamma: f32) -> f32 {
    let normalized = f32::from(channel) / 255.0;
    normalized.powf(preview_inverse_gamma)
}

fn linear_to_u16(value: f32) -> u16 {
    let clamped = value.clamp(0.0, 1.0);
    (clamped * 65535.0).round() as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::led2d::Led2d;
    use crate::led2d::layout::{PanelOrder, Rotation};
    use crate::led_strip::colors;

    #[test]
    fn logical_frame_undoes_panel_mapping() {
        let config = PanelConfig::new(PanelOrder::RightFirst).with_rotation(1, Rotation::Deg90);
        let mut frame = Frame1d::<32>::new();
        let mut canvas = Led2d::<32, 8, 4>::new(&mut frame, &config);
        assert!(canvas.set(6, 1, colors::RED));

        let logical = LogicalFrame::<8, 4>::from_physical(&frame, &config);
        assert_eq!(logical.get(6, 1), Some(colors::RED));
        assert_eq!(logical.get(1, 6), None);
        let lit = (0..4)
            .flat_map(|y| (0..8).map(move |x| (x, y)))
            .filter(|&(x, y)| logical.get(x, y) != Some(colors::BLACK))
            .count();
        assert_eq!(lit, 1);
    }

    #[test]
    fn cell_size_fits_target() {
        let cell = select_cell_size(32, 16, 640);
        assert!(32 * cell + led_radius(cell) * 2 <= 640);
        assert!(cell >= 4);
    }
}
