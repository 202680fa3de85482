#![allow(
    missing_docs,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    reason = "test code"
)]
//! Host-level tests for the spiral fill patterns.

use dotstar_spiral::Error;
use dotstar_spiral::led_strip::{Frame1d, PixelBuffer, RGB8, colors};
use dotstar_spiral::matrix::{ArrayCount, Side, SpiralMatrix};
use dotstar_spiral::spiral::{SpiralLayout, ring_range};

type Frame = Frame1d<64>;

const OFF: RGB8 = RGB8::new(0, 0, 0);
const PURPLE: RGB8 = RGB8::new(0xA0, 0x00, 0xA0);

/// A recognizable starting state, so writes and non-writes are both visible.
fn gray_frame() -> Frame {
    let mut frame = Frame::new();
    for (slot, pixel) in frame.iter_mut().enumerate() {
        *pixel = RGB8::new(slot as u8, slot as u8, slot as u8);
    }
    frame
}

fn slots_with(frame: &Frame, color: RGB8) -> Vec<usize> {
    (0..64).filter(|&slot| frame[slot] == color).collect()
}

#[test]
fn set_one_writes_exactly_one_slot() {
    let before = gray_frame();
    let mut after = before;
    SpiralMatrix::new(&mut after)
        .unwrap()
        .set_one(5, colors::RED)
        .unwrap();

    let changed: Vec<usize> = (0..64).filter(|&slot| before[slot] != after[slot]).collect();
    let expected = SpiralLayout::DOTSTAR_8X8.physical_slot(5).unwrap();
    assert_eq!(changed, vec![expected]);
    assert_eq!(after[expected], colors::RED);
}

#[test]
fn set_one_center_is_slot_36() {
    let mut frame = Frame::new();
    SpiralMatrix::new(&mut frame)
        .unwrap()
        .set_one(0, 0xA0_00A0_u32)
        .unwrap();
    assert_eq!(slots_with(&frame, PURPLE), vec![36]);
}

#[test]
fn colors_pass_through_in_every_form() {
    let mut frame = Frame::new();
    let mut matrix = SpiralMatrix::new(&mut frame).unwrap();
    matrix.set_one(0, 0x93_A060_u32).unwrap();
    matrix.set_one(1, (0x93_u8, 0xA0_u8, 0x60_u8)).unwrap();
    matrix.set_one(2, [0x93_u8, 0xA0, 0x60]).unwrap();
    matrix.set_one(3, RGB8::new(0x93, 0xA0, 0x60)).unwrap();

    assert_eq!(slots_with(&frame, RGB8::new(0x93, 0xA0, 0x60)), vec![27, 28, 35, 36]);
}

#[test]
fn fill_disc_3_equals_fill_all() {
    let mut disc = gray_frame();
    SpiralMatrix::new(&mut disc)
        .unwrap()
        .fill_disc(3, colors::CYAN)
        .unwrap();

    let mut all = gray_frame();
    SpiralMatrix::new(&mut all).unwrap().fill_all(colors::CYAN);

    assert_eq!(disc, all);
    assert_eq!(disc, Frame::filled(colors::CYAN));
}

#[test]
fn fill_disc_counts() {
    for (radius, count) in [(0, 4), (1, 16), (2, 36), (3, 64)] {
        let mut frame = Frame::new();
        SpiralMatrix::new(&mut frame)
            .unwrap()
            .fill_disc(radius, colors::WHITE)
            .unwrap();
        assert_eq!(slots_with(&frame, colors::WHITE).len(), count, "radius {radius}");
    }
}

#[test]
fn fill_disc_0_is_the_center_square() {
    let mut frame = Frame::new();
    SpiralMatrix::new(&mut frame)
        .unwrap()
        .fill_disc(0, colors::WHITE)
        .unwrap();
    assert_eq!(slots_with(&frame, colors::WHITE), vec![27, 28, 35, 36]);
}

#[test]
fn rings_partition_the_panel() {
    let ring_colors = [colors::RED, colors::GREEN, colors::BLUE, colors::YELLOW];

    let mut by_ring = Frame::new();
    let mut matrix = SpiralMatrix::new(&mut by_ring).unwrap();
    for (radius, color) in ring_colors.into_iter().enumerate() {
        matrix.fill_ring(radius, color).unwrap();
    }

    let mut by_led = Frame::new();
    let mut matrix = SpiralMatrix::new(&mut by_led).unwrap();
    for (radius, color) in ring_colors.into_iter().enumerate() {
        for logical_index in ring_range(radius).unwrap() {
            matrix.set_one(logical_index, color).unwrap();
        }
    }

    assert_eq!(by_ring, by_led);
    assert!(by_ring.iter().all(|&pixel| pixel != OFF));
    let counts: Vec<usize> = ring_colors
        .iter()
        .map(|&color| slots_with(&by_ring, color).len())
        .collect();
    assert_eq!(counts, vec![4, 12, 20, 28]);
}

#[test]
fn outer_ring_is_the_border() {
    let mut frame = Frame::new();
    SpiralMatrix::new(&mut frame)
        .unwrap()
        .fill_ring(3, colors::WHITE)
        .unwrap();
    for slot in slots_with(&frame, colors::WHITE) {
        let (col, row) = (slot % 8, slot / 8);
        assert!(col == 0 || col == 7 || row == 0 || row == 7, "slot {slot}");
    }
}

#[test]
fn clear_all_turns_everything_off_and_is_idempotent() {
    let mut once = gray_frame();
    SpiralMatrix::new(&mut once).unwrap().clear_all();
    assert_eq!(once, Frame::new());

    let mut twice = gray_frame();
    let mut matrix = SpiralMatrix::new(&mut twice).unwrap();
    matrix.clear_all();
    matrix.clear_all();
    assert_eq!(twice, once);
}

#[test]
fn left_then_right_cover_the_panel() {
    let mut frame = gray_frame();
    let mut matrix = SpiralMatrix::new(&mut frame).unwrap();
    matrix.fill_half(colors::RED, Side::Left).unwrap();
    matrix.fill_half(colors::BLUE, 'r').unwrap();

    assert_eq!(slots_with(&frame, colors::RED), (0..32).collect::<Vec<_>>());
    assert_eq!(slots_with(&frame, colors::BLUE), (32..64).collect::<Vec<_>>());
}

#[test]
fn top_walks_columns_and_stops_before_57() {
    let mut frame = gray_frame();
    SpiralMatrix::new(&mut frame)
        .unwrap()
        .fill_half(colors::RED, "top")
        .unwrap();

    let mut expected: Vec<usize> = (0..4).flat_map(|column| (column..57).step_by(8)).collect();
    assert_eq!(expected.len(), 29);
    expected.sort_unstable();
    assert_eq!(slots_with(&frame, colors::RED), expected);
    for dark in [57, 58, 59] {
        assert_eq!(frame[dark], gray_frame()[dark], "slot {dark}");
    }
}

#[test]
fn bottom_is_top_shifted_four_columns() {
    let mut frame = Frame::new();
    SpiralMatrix::new(&mut frame)
        .unwrap()
        .fill_half(colors::BLUE, 'b')
        .unwrap();

    let mut expected: Vec<usize> = (0..4)
        .flat_map(|column| (column..57).step_by(8))
        .map(|slot| slot + 4)
        .collect();
    expected.sort_unstable();
    assert_eq!(slots_with(&frame, colors::BLUE), expected);
    assert!(!expected.contains(&61) && !expected.contains(&62) && !expected.contains(&63));
    assert!(expected.contains(&60));
}

#[test]
fn top_and_bottom_leave_only_the_short_last_row_dark() {
    let mut frame = Frame::new();
    let mut matrix = SpiralMatrix::new(&mut frame).unwrap();
    matrix.fill_half(colors::RED, Side::Top).unwrap();
    matrix.fill_half(colors::BLUE, Side::Bottom).unwrap();

    let dark = slots_with(&frame, OFF);
    assert_eq!(dark, vec![57, 58, 59, 61, 62, 63]);
    for slot in 0..56 {
        let expected = if slot % 8 < 4 { colors::RED } else { colors::BLUE };
        assert_eq!(frame[slot], expected, "slot {slot}");
    }
}

#[test]
fn side_tokens_parse() {
    assert_eq!("l".parse::<Side>(), Ok(Side::Left));
    assert_eq!("Right".parse::<Side>(), Ok(Side::Right));
    assert_eq!(Side::try_from('T'), Ok(Side::Top));
    assert_eq!(Side::try_from("BOTTOM"), Ok(Side::Bottom));
    assert_eq!("up".parse::<Side>(), Err(Error::InvalidSide));
    assert_eq!("".parse::<Side>(), Err(Error::InvalidSide));
    assert_eq!(Side::try_from('x'), Err(Error::InvalidSide));
}

#[test]
fn invalid_arguments_leave_the_buffer_untouched() {
    let before = gray_frame();
    let mut after = before;
    let mut matrix = SpiralMatrix::new(&mut after).unwrap();

    assert_eq!(
        matrix.fill_ring(4, colors::RED),
        Err(Error::InvalidRadius { radius: 4 })
    );
    assert_eq!(
        matrix.fill_disc(7, colors::RED),
        Err(Error::InvalidRadius { radius: 7 })
    );
    assert_eq!(
        matrix.set_one(64, colors::RED),
        Err(Error::InvalidIndex { index: 64 })
    );
    assert_eq!(matrix.fill_half(colors::RED, "middle"), Err(Error::InvalidSide));
    assert_eq!(
        matrix.select_panel(1),
        Err(Error::InvalidPanel {
            panel: 1,
            panels: 1
        })
    );

    assert_eq!(after, before);
}

#[test]
fn unsupported_buffer_sizes_are_rejected() {
    let mut short = [OFF; 32];
    assert_eq!(
        SpiralMatrix::new(&mut short[..]).err(),
        Some(Error::BufferLength { len: 32 })
    );
    assert_eq!(
        SpiralMatrix::new([OFF; 0]).err(),
        Some(Error::InvalidArrayCount { count: 0 })
    );
    assert_eq!(
        SpiralMatrix::new([OFF; 192]).err(),
        Some(Error::InvalidArrayCount { count: 3 })
    );
    assert_eq!(
        SpiralMatrix::new([OFF; 100]).err(),
        Some(Error::BufferLength { len: 100 })
    );
    assert_eq!(ArrayCount::try_from(0_usize), Err(Error::InvalidArrayCount { count: 0 }));
    assert_eq!(ArrayCount::try_from(2_usize), Ok(ArrayCount::Dual));
    assert_eq!(ArrayCount::Dual.pixel_count(), 128);
}

#[test]
fn dual_panel_addresses_the_selected_panel() {
    let mut frame = Frame1d::<128>::new();
    let mut matrix = SpiralMatrix::new(&mut frame).unwrap();
    assert_eq!(matrix.array_count(), ArrayCount::Dual);
    assert_eq!(matrix.panel(), 0);

    matrix.set_one(0, colors::RED).unwrap();
    matrix.select_panel(1).unwrap();
    matrix.set_one(0, colors::GREEN).unwrap();
    matrix.fill_half(colors::BLUE, Side::Left).unwrap();

    assert_eq!(frame[36], colors::RED);
    assert_eq!(frame[64 + 36], colors::GREEN);
    assert!(frame[64..96].iter().all(|&pixel| pixel == colors::BLUE));
    assert!(frame[..32].iter().all(|&pixel| pixel == OFF));
}

#[test]
fn dual_panel_fill_all_covers_both_panels() {
    let mut frame = Frame1d::<128>::new();
    let mut matrix = SpiralMatrix::new(&mut frame).unwrap();
    matrix.fill_all(colors::ORANGE);
    assert!(matrix.raw_buffer().iter().all(|&pixel| pixel == colors::ORANGE));
    matrix.clear_all();
    assert_eq!(frame, Frame1d::<128>::new());
}

#[test]
fn raw_buffer_allows_direct_slot_writes() {
    let mut matrix = SpiralMatrix::new(Frame::new()).unwrap();
    matrix.raw_buffer_mut().set_pixel(63, colors::RED);
    assert_eq!(matrix.raw_buffer().pixel(63), Some(colors::RED));
    assert_eq!(matrix.into_inner()[63], colors::RED);
}

#[test]
fn custom_layout_is_honored() {
    let mirrored = SpiralLayout::DOTSTAR_8X8.flip_h();
    let mut frame = Frame::new();
    let mut matrix = SpiralMatrix::with_layout(&mut frame, mirrored).unwrap();
    matrix.set_one(56, colors::RED).unwrap();
    assert_eq!(matrix.layout(), &mirrored);
    assert_eq!(slots_with(&frame, colors::RED), vec![7]);
}
