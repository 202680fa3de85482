#![cfg(feature = "host")]
#![allow(
    missing_docs,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    reason = "test code"
)]
//! Host-level tests for PNG previews of spiral patterns.

use dotstar_spiral::led_strip::{Frame1d, RGB8, colors};
use dotstar_spiral::matrix::SpiralMatrix;
use dotstar_spiral::spiral::RING_COUNT;
use dotstar_spiral::to_png::{write_frame_png, write_frames_apng};
use png::Decoder;
use std::error::Error;
use std::fs::File;
use std::path::Path;

fn rings_frame() -> Result<Frame1d<64>, Box<dyn Error>> {
    let mut frame = Frame1d::new();
    let mut matrix = SpiralMatrix::new(&mut frame)?;
    let ring_colors = [colors::RED, colors::GREEN, colors::BLUE, colors::WHITE];
    for (radius, color) in ring_colors.into_iter().enumerate() {
        matrix.fill_ring(radius, color)?;
    }
    Ok(frame)
}

fn png_size(path: &Path) -> Result<(u32, u32), Box<dyn Error>> {
    let reader = Decoder::new(File::open(path)?).read_info()?;
    let info = reader.info();
    Ok((info.width, info.height))
}

#[test]
fn single_panel_preview_is_square() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("rings.png");
    write_frame_png(&rings_frame()?, &path, 200)?;

    let (width, height) = png_size(&path)?;
    assert_eq!(width, height);
    assert!(width <= 200);
    Ok(())
}

#[test]
fn dual_panel_preview_is_twice_as_tall() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested/dual.png");
    let mut frame = Frame1d::<128>::new();
    let mut matrix = SpiralMatrix::new(&mut frame)?;
    matrix.select_panel(1)?;
    matrix.fill_disc(1, colors::ORANGE)?;
    write_frame_png(&frame, &path, 400)?;

    let (width, height) = png_size(&path)?;
    assert!(height > width);
    assert!(height <= 400);
    Ok(())
}

#[test]
fn disc_animation_writes_apng() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("discs.png");

    let mut frames: Vec<[RGB8; 64]> = Vec::new();
    let mut frame = Frame1d::<64>::new();
    for radius in 0..RING_COUNT {
        SpiralMatrix::new(&mut frame)?.fill_disc(radius, 0x93_A060_u32)?;
        frames.push(frame.0);
    }
    let slices: Vec<&[RGB8]> = frames.iter().map(|frame| &frame[..]).collect();
    write_frames_apng(&slices, &path, 120, 250)?;

    let reader = Decoder::new(File::open(&path)?).read_info()?;
    let animation = reader
        .info()
        .animation_control
        .as_ref()
        .ok_or("missing acTL chunk")?;
    assert_eq!(animation.num_frames, 4);
    Ok(())
}

#[test]
fn preview_keeps_stored_channel_values() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("flat.png");
    let mut frame = Frame1d::<64>::new();
    SpiralMatrix::new(&mut frame)?.fill_all(RGB8::new(128, 64, 0));
    write_frame_png(&frame, &path, 160)?;

    let mut reader = Decoder::new(File::open(&path)?).read_info()?;
    let mut buffer = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buffer)?;
    let mut brightest = [0u16; 3];
    for pixel in buffer[..info.buffer_size()].chunks_exact(6) {
        for (channel, max) in brightest.iter_mut().enumerate() {
            let value = u16::from_be_bytes([pixel[channel * 2], pixel[channel * 2 + 1]]);
            *max = (*max).max(value);
        }
    }
    assert_eq!(brightest, [128 * 257, 64 * 257, 0]);
    Ok(())
}

#[test]
fn empty_animation_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = write_frames_apng(&[], dir.path().join("empty.png"), 120, 250);
    assert!(result.is_err());
}
