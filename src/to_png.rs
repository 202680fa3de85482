#![cfg(feature = "host")]
#![allow(
    clippy::arithmetic_side_effects,
    clippy::indexing_slicing,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    reason = "image geometry is bounded by target_max_dimension"
)]
//! PNG previews of pixel buffers, for tests and docs on the host.
//!
//! Buffers are drawn as panels of 8 columns, row-major, one disc per LED. A
//! 128-pixel buffer comes out as two panels stacked vertically. Stored colors
//! are written as-is; the preview does no color correction.

use crate::led_strip::{PixelBuffer, RGB8};
use crate::spiral::PANEL_WIDTH;
use png::{BitDepth, ColorType, Encoder};
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Render a pixel buffer into a PNG file sized to the requested maximum dimension.
///
/// # Errors
///
/// Returns file-system and PNG encoder errors.
pub fn write_frame_png<B: PixelBuffer + ?Sized>(
    buffer: &B,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
) -> Result<(), Box<dyn Error>> {
    let output_path = output_path.as_ref();
    let grid = Grid::of(buffer);
    let cell_size = select_cell_size(grid.width, grid.height, target_max_dimension);
    let led_margin = (cell_size / 8).max(1);
    let (width, height, pixels) =
        panel_pixels(&grid, &snapshot(buffer), cell_size, led_margin);

    create_parent(output_path)?;
    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Sixteen);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&pixels)?;
    log::info!("wrote PNG to {}", output_path.display());
    Ok(())
}

/// Render a sequence of buffer snapshots into a looping APNG file.
///
/// Every snapshot must have the same length.
///
/// # Errors
///
/// Returns an error for an empty or ragged frame list, a delay that does not
/// fit in 16 bits, and file-system or PNG encoder errors.
pub fn write_frames_apng(
    frames: &[&[RGB8]],
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
    frame_delay_ms: u32,
) -> Result<(), Box<dyn Error>> {
    let Some(first) = frames.first() else {
        return Err("frames must not be empty".into());
    };
    assert!(frame_delay_ms > 0, "frame_delay_ms must be positive");
    let output_path = output_path.as_ref();
    let grid = Grid::of(*first);
    let cell_size = select_cell_size(grid.width, grid.height, target_max_dimension);
    let led_margin = (cell_size / 8).max(1);
    let frame_count = u32::try_from(frames.len())?;
    let delay_num = u16::try_from(frame_delay_ms)?;
    let delay_den = 1000u16;

    let mut encoded = Vec::with_capacity(frames.len());
    let mut size = (0, 0);
    for frame in frames {
        if frame.len() != first.len() {
            return Err("frame lengths must match".into());
        }
        let (width, height, pixels) =
            panel_pixels(&grid, frame, cell_size, led_margin);
        size = (width, height);
        encoded.push(pixels);
    }

    create_parent(output_path)?;
    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), size.0, size.1);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Sixteen);
    encoder.set_animated(frame_count, 0)?;
    let mut writer = encoder.write_header()?;
    for pixels in encoded {
        writer.set_frame_delay(delay_num, delay_den)?;
        writer.write_image_data(&pixels)?;
    }
    writer.finish()?;
    log::info!("wrote APNG to {}", output_path.display());
    Ok(())
}

struct Grid {
    width: u32,
    height: u32,
}

impl Grid {
    fn of<B: PixelBuffer + ?Sized>(buffer: &B) -> Self {
        let rows = buffer.len().div_ceil(PANEL_WIDTH).max(1);
        Self {
            width: PANEL_WIDTH as u32,
            height: rows as u32,
        }
    }
}

fn snapshot<B: PixelBuffer + ?Sized>(buffer: &B) -> Vec<RGB8> {
    (0..buffer.len()).filter_map(|slot| buffer.pixel(slot)).collect()
}

fn create_parent(output_path: &Path) -> std::io::Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn select_cell_size(panel_width: u32, panel_height: u32, target_max_dimension: u32) -> u32 {
    assert!(target_max_dimension > 0, "target_max_dimension must be positive");
    let mut cell_size = target_max_dimension;
    while cell_size > 1 {
        let led_margin = (cell_size / 8).max(1);
        let led_radius = (cell_size - (led_margin * 2)) / 2;
        let output_width = panel_width * cell_size + led_radius * 2;
        let output_height = panel_height * cell_size + led_radius * 2;
        let max_dimension = output_width.max(output_height);
        if max_dimension <= target_max_dimension {
            break;
        }
        cell_size -= 1;
    }
    cell_size
}

fn panel_pixels(
    grid: &Grid,
    slots: &[RGB8],
    cell_size: u32,
    led_margin: u32,
) -> (u32, u32, Vec<u8>) {
    assert!(cell_size > 0, "cell_size must be positive");
    assert!(led_margin < cell_size / 2, "led_margin must fit inside cell");
    let led_radius = (cell_size - (led_margin * 2)) / 2;
    assert!(led_radius > 0, "led_radius must be positive");
    let fade_width = (led_radius / 3).max(1);

    let border = led_radius;
    let width = grid.width * cell_size + border * 2;
    let height = grid.height * cell_size + border * 2;
    let mut bytes = vec![0u8; (width * height * 3 * 2) as usize];
    let center = (cell_size - 1) as i32 / 2;
    let led_radius_f = led_radius as f32;
    let inner_radius_f = led_radius.saturating_sub(fade_width) as f32;
    let radius_sq = (led_radius as i32) * (led_radius as i32);

    for (slot, pixel) in slots.iter().enumerate() {
        let column_index = (slot % PANEL_WIDTH) as u32;
        let row_index = (slot / PANEL_WIDTH) as u32;
        let cell_origin_x = column_index * cell_size;
        let cell_origin_y = row_index * cell_size;

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
                    let fade_span = led_radius_f - inner_radius_f;
                    (1.0 - (distance - inner_radius_f) / fade_span).max(0.0)
                };
                let x = border + cell_origin_x + local_x;
                let y = border + cell_origin_y + local_y;
                let pixel_index = ((y * width + x) * 3 * 2) as usize;
                let channels =
                    [pixel.r, pixel.g, pixel.b].map(|channel| scale_to_u16(channel, intensity));
                for (offset, channel) in channels.into_iter().enumerate() {
                    let [high, low] = channel.to_be_bytes();
                    bytes[pixel_index + offset * 2] = high;
                    bytes[pixel_index + offset * 2 + 1] = low;
                }
            }
        }
    }

    (width, height, bytes)
}

fn scale_to_u16(channel: u8, intensity: f32) -> u16 {
    let scaled = (f32::from(channel) / 255.0 * intensity).clamp(0.0, 1.0);
    (scaled * 65535.0).round() as u16
}
