#![cfg(feature = "host")]
#![allow(missing_docs)]
//! Host-level tests for PNG and APNG previews.

use std::error::Error;
use std::fs::File;

use embassy_time::Instant;
use panel_life::animation::AnimationKind;
use panel_life::led2d::Led2d;
use panel_life::led2d::layout::{PanelConfig, PanelOrder, Rotation};
use panel_life::led_matrix::LedMatrix;
use panel_life::led_strip::{Frame1d, colors};
use panel_life::to_png::{LogicalFrame, write_frame_png, write_frames_apng};

fn png_info(path: &std::path::Path) -> Result<png::Info<'static>, Box<dyn Error>> {
    let decoder = png::Decoder::new(File::open(path)?);
    let reader = decoder.read_info()?;
    Ok(reader.info().clone())
}

#[test]
fn still_frame_is_written_within_target_size() -> Result<(), Box<dyn Error>> {
    let config = PanelConfig::new(PanelOrder::RightFirst).with_rotation(0, Rotation::Deg180);
    let mut frame = Frame1d::<512>::new();
    let mut canvas = Led2d::<512, 32, 16>::new(&mut frame, &config);
    canvas.fill(colors::NAVY);
    canvas.set(0, 0, colors::ORANGE);

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("still.png");
    write_frame_png::<512, 32, 16>(&frame, &config, &path, 400)?;

    let info = png_info(&path)?;
    assert!(info.width <= 400 && info.height <= 400);
    assert!(info.width > info.height, "two panels side by side are wider than tall");

    let logical = LogicalFrame::<32, 16>::from_physical(&frame, &config);
    assert_eq!(logical.get(0, 0), Some(colors::ORANGE));
    assert_eq!(logical.get(31, 15), Some(colors::NAVY));
    Ok(())
}

#[test]
fn life_animation_renders_to_apng() -> Result<(), Box<dyn Error>> {
    let mut matrix = LedMatrix::<256, 16, 16>::new(3);
    matrix.select(AnimationKind::Life, Instant::from_millis(0))?;
    let mut frames = Vec::new();
    for tick in 0..30_u64 {
        matrix.tick(Instant::from_millis(tick * 50));
        frames.push(*matrix.frame());
    }

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("life.png");
    write_frames_apng::<256, 16, 16>(&frames, matrix.settings().panels(), &path, 256, 50)?;

    let info = png_info(&path)?;
    let animation = info.animation_control.ok_or("missing acTL chunk")?;
    assert_eq!(animation.num_frames, 30);
    Ok(())
}

#[test]
fn empty_apng_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let frames: [Frame1d<16>; 0] = [];
    let result = write_frames_apng::<16, 4, 4>(
        &frames,
        &PanelConfig::default(),
        dir.path().join("empty.png"),
        64,
        50,
    );
    assert!(result.is_err());
}
