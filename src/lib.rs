//! Spiral addressing and fill patterns for 8×8 DotStar/NeoPixel LED matrices.
//!
//! The LEDs of an 8×8 panel are renumbered so that logical index `0` is at the
//! center and indices grow outward, one square ring at a time. On top of that
//! numbering the crate offers a handful of fill patterns (one LED, a ring, a
//! disc, a half, everything).
//!
//! # Glossary
//!
//! - **Logical index:** spiral position from the center outward, `0..64`.
//! - **Physical slot:** position of the LED in the wired pixel buffer.
//! - **Radius:** square-ring level, `0` (innermost 2×2) to `3` (outermost ring).
//! - **Disc:** all logical indices at or within a radius.
//! - **Ring:** logical indices exactly at a radius.
//!
//! # Example
//!
//! ```rust
//! use dotstar_spiral::led_strip::{Frame1d, RGB8, colors};
//! use dotstar_spiral::matrix::{Side, SpiralMatrix};
//!
//! # fn main() -> dotstar_spiral::Result<()> {
//! let mut frame = Frame1d::<64>::new();
//! let mut matrix = SpiralMatrix::new(&mut frame)?;
//!
//! matrix.fill_disc(1, colors::BLUE)?; // center 4×4
//! matrix.fill_ring(3, 0x60A0_93_u32)?; // outermost ring, packed 0xRRGGBB
//! matrix.set_one(0, (255_u8, 0_u8, 0_u8))?; // center LED, tuple color
//! matrix.fill_half(colors::BLACK, Side::Left)?;
//!
//! assert_eq!(frame[36], RGB8::new(255, 0, 0)); // center LED
//! assert_eq!(frame[0], RGB8::new(0, 0, 0)); // left half cleared
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(any(test, feature = "host")), no_std)]

#[macro_use]
mod fmt;

mod error;
pub mod led_strip;
pub mod matrix;
pub mod spiral;
#[cfg(feature = "host")]
pub mod to_png;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
