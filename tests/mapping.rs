#![allow(missing_docs)]
//! Host-level tests for the panel coordinate mapper.

use panel_life::led2d::Led2d;
use panel_life::led2d::layout::{PanelConfig, PanelLayout, PanelOrder, Rotation};
use panel_life::led_strip::{Frame1d, colors};
use proptest::prelude::*;

type ThreePanels = PanelLayout<48, 12, 4>;

fn rotation() -> impl Strategy<Value = Rotation> {
    prop::sample::select(Rotation::ALL.to_vec())
}

fn order() -> impl Strategy<Value = PanelOrder> {
    prop::sample::select(vec![PanelOrder::LeftFirst, PanelOrder::RightFirst])
}

fn config() -> impl Strategy<Value = PanelConfig> {
    (order(), rotation(), rotation(), rotation()).prop_map(|(order, a, b, c)| {
        PanelConfig::new(order)
            .with_rotation(0, a)
            .with_rotation(1, b)
            .with_rotation(2, c)
    })
}

#[test]
fn default_wiring_is_serpentine_left_first() {
    let layout = ThreePanels::new();
    let config = PanelConfig::default();
    assert_eq!(layout.map_to_physical(0, 0, &config), Some(0));
    assert_eq!(layout.map_to_physical(3, 0, &config), Some(3));
    // Row 1 runs backwards.
    assert_eq!(layout.map_to_physical(0, 1, &config), Some(7));
    assert_eq!(layout.map_to_physical(3, 1, &config), Some(4));
    // Second panel starts after the first one's 16 LEDs.
    assert_eq!(layout.map_to_physical(4, 0, &config), Some(16));
}

#[test]
fn right_first_puts_last_panel_at_start_of_chain() {
    let layout = ThreePanels::new();
    let config = PanelConfig::new(PanelOrder::RightFirst);
    assert_eq!(layout.map_to_physical(8, 0, &config), Some(0));
    assert_eq!(layout.map_to_physical(0, 0, &config), Some(32));
}

#[test]
fn off_matrix_coordinates_have_no_index() {
    let layout = ThreePanels::new();
    let config = PanelConfig::default();
    for (x, y) in [(-1, 0), (0, -1), (12, 0), (0, 4), (i32::MIN, i32::MAX)] {
        assert_eq!(layout.map_to_physical(x, y, &config), None);
    }
    assert_eq!(layout.map_to_logical(48, &config), None);
}

#[test]
fn drawing_off_matrix_is_skipped() {
    let config = PanelConfig::default();
    let mut frame = Frame1d::<48>::new();
    let mut canvas = Led2d::<48, 12, 4>::new(&mut frame, &config);
    assert!(!canvas.set(12, 0, colors::RED));
    assert!(!canvas.add(-3, 2, colors::RED));
    assert!(frame.iter().all(|&pixel| pixel == colors::BLACK));
}

#[test]
fn rotation_zero_is_identity() {
    for x in 0..4 {
        for y in 0..4 {
            assert_eq!(Rotation::Deg0.apply(x, y, 4), (x, y));
        }
    }
}

#[test]
fn four_quarter_turns_are_identity() {
    for x in 0..5 {
        for y in 0..5 {
            let mut point = (x, y);
            for _ in 0..4 {
                point = Rotation::Deg90.apply(point.0, point.1, 5);
            }
            assert_eq!(point, (x, y));
        }
    }
}

#[test]
fn fade_all_full_amount_goes_black() {
    let mut frame = Frame1d::<48>::filled(colors::WHITE);
    frame.fade_all(255);
    assert!(frame.iter().all(|&pixel| pixel == colors::BLACK));
}

proptest! {
    #[test]
    fn mapping_is_a_bijection(config in config()) {
        let layout = ThreePanels::new();
        let mut seen = [false; 48];
        for y in 0..4 {
            for x in 0..12 {
                let index = layout.map_to_physical(x, y, &config);
                prop_assert!(index.is_some());
                let index = index.unwrap_or(usize::MAX);
                prop_assert!(index < 48);
                prop_assert!(!seen[index], "index {} hit twice", index);
                seen[index] = true;
            }
        }
        prop_assert!(seen.iter().all(|&hit| hit));
    }

    #[test]
    fn inverse_mapping_round_trips(config in config(), index in 0usize..48) {
        let layout = ThreePanels::new();
        let (x, y) = layout.map_to_logical(index, &config).unwrap_or((usize::MAX, 0));
        prop_assert_eq!(layout.map_to_physical(x as i32, y as i32, &config), Some(index));
    }

    #[test]
    fn rotation_then_inverse_is_identity(rotation in rotation(), x in 0usize..16, y in 0usize..16) {
        let (rx, ry) = rotation.apply(x, y, 16);
        prop_assert_eq!(rotation.inverse().apply(rx, ry, 16), (x, y));
    }
}
