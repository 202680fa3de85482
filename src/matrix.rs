//! Fill patterns on an 8×8 (or two chained 8×8) LED matrix, addressed in spiral order.
//!
//! [`SpiralMatrix`] wraps any [`PixelBuffer`] and translates logical (spiral)
//! indices to physical slots through a [`SpiralLayout`]. Every operation
//! checks its arguments before the first write, so an `Err` leaves the buffer
//! untouched.
//!
//! # Example: Rings from the outside in
//!
//! ```rust
//! use dotstar_spiral::led_strip::{Frame1d, PixelBuffer, RGB8, colors};
//! use dotstar_spiral::matrix::SpiralMatrix;
//! use dotstar_spiral::spiral::RING_COUNT;
//!
//! # fn main() -> dotstar_spiral::Result<()> {
//! let mut matrix = SpiralMatrix::new(Frame1d::<64>::new())?;
//! let ring_colors = [colors::RED, colors::GREEN, colors::BLUE, colors::WHITE];
//! for radius in (0..RING_COUNT).rev() {
//!     matrix.fill_ring(radius, ring_colors[radius])?;
//! }
//!
//! let frame = matrix.into_inner();
//! assert_eq!(frame.pixel(0), Some(colors::WHITE)); // corner, ring 3
//! assert_eq!(frame.pixel(36), Some(colors::RED)); // center, ring 0
//! # Ok(())
//! # }
//! ```
//!
//! # Two chained matrices
//!
//! A 128-pixel buffer is two panels back to back. [`SpiralMatrix::clear_all`]
//! and [`SpiralMatrix::fill_all`] cover the whole buffer; the spiral and half
//! operations address the panel chosen with [`SpiralMatrix::select_panel`]
//! (panel `0` by default).

use core::str::FromStr;

use derive_more::Display;

use crate::led_strip::{BLACK, PixelBuffer, RGB8, ToRgb8};
use crate::spiral::{PANEL_LEN, PANEL_WIDTH, SpiralLayout, disc_range, ring_range};
use crate::{Error, Result};

/// How many 8×8 matrices are chained on one data line.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArrayCount {
    /// One 8×8 matrix, 64 pixels.
    #[display("1 matrix")]
    Single,
    /// Two 8×8 matrices, 128 pixels.
    #[display("2 matrices")]
    Dual,
}

impl ArrayCount {
    /// Number of 8×8 panels.
    #[must_use]
    pub const fn panels(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Dual => 2,
        }
    }

    /// Pixels in a buffer holding this many panels.
    #[must_use]
    pub const fn pixel_count(self) -> usize {
        const DUAL_LEN: usize = 2 * PANEL_LEN;
        match self {
            Self::Single => PANEL_LEN,
            Self::Dual => DUAL_LEN,
        }
    }

    /// Infer the array count from a buffer length.
    ///
    /// # Errors
    ///
    /// [`Error::BufferLength`] if `len` is not a multiple of 64;
    /// [`Error::InvalidArrayCount`] if it holds other than 1 or 2 panels.
    pub fn from_pixel_count(len: usize) -> Result<Self> {
        if len % PANEL_LEN != 0 {
            return Err(Error::BufferLength { len });
        }
        Self::try_from(len / PANEL_LEN)
    }
}

impl TryFrom<usize> for ArrayCount {
    type Error = Error;

    fn try_from(count: usize) -> Result<Self> {
        match count {
            1 => Ok(Self::Single),
            2 => Ok(Self::Dual),
            _ => Err(Error::InvalidArrayCount { count }),
        }
    }
}

/// Which half of a panel [`SpiralMatrix::fill_half`] lights.
///
/// Slots are row-major (`slot = row * 8 + col`).
///
/// `Left` and `Right` are the first and last 32 slots, i.e. the upper and
/// lower four rows. `Top` and `Bottom` split by column instead: for each
/// column offset `o` in `0..4`, `Top` lights slots `o, o + 8, ...` strictly
/// below 57 and `Bottom` lights the same slots plus 4. The bound stops the
/// walk before row 7 for every column but the first, so row 7 is only partly
/// lit (`Top` leaves 57..=59 dark, `Bottom` leaves 61..=63 dark). The names
/// and the short last row come from the original wiring notes and are kept
/// so existing callers keep lighting the same LEDs.
///
/// ```text
/// Left / Right:          Top / Bottom:
///   L L L L L L L L        T T T T B B B B
///   L L L L L L L L        T T T T B B B B
///   L L L L L L L L        T T T T B B B B
///   L L L L L L L L        T T T T B B B B
///   R R R R R R R R        T T T T B B B B
///   R R R R R R R R        T T T T B B B B
///   R R R R R R R R        T T T T B B B B
///   R R R R R R R R        T . . . B . . .
/// ```
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    /// Slots `0..32`.
    #[display("left")]
    Left,
    /// Slots `32..64`.
    #[display("right")]
    Right,
    /// Columns `0..4`, row 7 only at column 0.
    #[display("top")]
    Top,
    /// Columns `4..8`, row 7 only at column 4.
    #[display("bottom")]
    Bottom,
}

impl Side {
    /// All four sides.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    /// Panel-relative slots of this half, in write order.
    ///
    /// `Top` and `Bottom` walk column by column: column 0 top to bottom, then
    /// column 1, and so on.
    pub fn slots(self) -> impl Iterator<Item = usize> {
        const HALF: usize = PANEL_LEN / 2;
        const HALF_WIDTH: usize = PANEL_WIDTH / 2;
        // Column walks stop before 57 (61 for Bottom): row 7 only gets the first column.
        const TOP_END: usize = PANEL_LEN - PANEL_WIDTH + 1;
        const BOTTOM_END: usize = TOP_END + HALF_WIDTH;
        // (column offsets, first slot, end, step)
        let (columns, base, end, step) = match self {
            Self::Left => (0..1, 0, HALF, 1),
            Self::Right => (0..1, HALF, PANEL_LEN, 1),
            Self::Top => (0..HALF_WIDTH, 0, TOP_END, PANEL_WIDTH),
            Self::Bottom => (0..HALF_WIDTH, HALF_WIDTH, BOTTOM_END, PANEL_WIDTH),
        };
        columns.flat_map(move |column| (base.saturating_add(column)..end).step_by(step))
    }
}

impl FromStr for Side {
    type Err = Error;

    /// Parse `l`/`left`, `r`/`right`, `t`/`top`, `b`/`bottom` (ASCII case-insensitive).
    fn from_str(token: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|side| {
                let (short, long) = match side {
                    Self::Left => ("l", "left"),
                    Self::Right => ("r", "right"),
                    Self::Top => ("t", "top"),
                    Self::Bottom => ("b", "bottom"),
                };
                token.eq_ignore_ascii_case(short) || token.eq_ignore_ascii_case(long)
            })
            .ok_or(Error::InvalidSide)
    }
}

impl TryFrom<&str> for Side {
    type Error = Error;

    fn try_from(token: &str) -> Result<Self> {
        token.parse()
    }
}

impl TryFrom<char> for Side {
    type Error = Error;

    fn try_from(token: char) -> Result<Self> {
        let mut utf8 = [0u8; 4];
        token.encode_utf8(&mut utf8).parse()
    }
}

/// Spiral-addressed view of a pixel buffer.
///
/// Holds the buffer (owned, or borrowed as `&mut`) for as long as you need
/// it; use [`raw_buffer_mut`](Self::raw_buffer_mut) or
/// [`into_inner`](Self::into_inner) to get at physical slots directly.
///
/// Writes within one call happen in ascending logical-index order.
pub struct SpiralMatrix<B: PixelBuffer> {
    buffer: B,
    layout: SpiralLayout,
    array_count: ArrayCount,
    panel: usize,
    panel_offset: usize,
}

impl<B: PixelBuffer> SpiralMatrix<B> {
    /// Wrap `buffer` using the stock DotStar 8×8 wiring.
    ///
    /// # Errors
    ///
    /// [`Error::BufferLength`] or [`Error::InvalidArrayCount`] unless the
    /// buffer holds exactly 64 or 128 pixels.
    pub fn new(buffer: B) -> Result<Self> {
        Self::with_layout(buffer, SpiralLayout::DOTSTAR_8X8)
    }

    /// Wrap `buffer` using a custom wiring table.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_layout(buffer: B, layout: SpiralLayout) -> Result<Self> {
        let array_count = ArrayCount::from_pixel_count(buffer.len()).inspect_err(|err| {
            warn!("SpiralMatrix::new: {}", err);
        })?;
        debug!(
            "SpiralMatrix::new: {} pixels, {} panel(s)",
            buffer.len(),
            array_count.panels()
        );
        Ok(Self {
            buffer,
            layout,
            array_count,
            panel: 0,
            panel_offset: 0,
        })
    }

    /// Light one LED by logical (spiral) index.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIndex`] if `logical_index` is not in `0..64`.
    pub fn set_one(&mut self, logical_index: usize, color: impl ToRgb8) -> Result<()> {
        let slot = self.layout.physical_slot(logical_index).inspect_err(reject)?;
        self.write_panel_slot(slot, color.to_rgb8())
    }

    /// Fill every ring up to and including `radius`.
    ///
    /// `radius` 3 covers the whole panel.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRadius`] if `radius` is not in `0..=3`.
    pub fn fill_disc(&mut self, radius: usize, color: impl ToRgb8) -> Result<()> {
        let logical_range = disc_range(radius).inspect_err(reject)?;
        trace!("SpiralMatrix::fill_disc: radius {}", radius);
        self.write_logical_range(logical_range, color.to_rgb8())
    }

    /// Fill the single ring at `radius`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRadius`] if `radius` is not in `0..=3`.
    pub fn fill_ring(&mut self, radius: usize, color: impl ToRgb8) -> Result<()> {
        let logical_range = ring_range(radius).inspect_err(reject)?;
        trace!("SpiralMatrix::fill_ring: radius {}", radius);
        self.write_logical_range(logical_range, color.to_rgb8())
    }

    /// Fill one half of the selected panel. See [`Side`] for which slots that is.
    ///
    /// `side` is a [`Side`] or a token such as `"l"`, `"bottom"` or `'t'`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSide`] if a token is not one of the recognized sides.
    pub fn fill_half<S>(&mut self, color: impl ToRgb8, side: S) -> Result<()>
    where
        S: TryInto<Side>,
        Error: From<S::Error>,
    {
        let side = side.try_into().map_err(Error::from).inspect_err(reject)?;
        let color = color.to_rgb8();
        trace!("SpiralMatrix::fill_half: {}", side);
        for slot in side.slots() {
            self.write_panel_slot(slot, color)?;
        }
        Ok(())
    }

    /// Turn every LED in the buffer off, both panels included.
    pub fn clear_all(&mut self) {
        trace!("SpiralMatrix::clear_all");
        self.buffer.fill(BLACK);
    }

    /// Set every LED in the buffer, both panels included.
    pub fn fill_all(&mut self, color: impl ToRgb8) {
        trace!("SpiralMatrix::fill_all");
        self.buffer.fill(color.to_rgb8());
    }

    /// Choose which panel the spiral and half operations address.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPanel`] if `panel` is past the last chained matrix.
    pub fn select_panel(&mut self, panel: usize) -> Result<()> {
        let panels = self.array_count.panels();
        let panel_offset = PANEL_LEN
            .checked_mul(panel)
            .filter(|_| panel < panels)
            .ok_or_else(|| reject_owned(Error::InvalidPanel { panel, panels }))?;
        debug!("SpiralMatrix::select_panel: {}", panel);
        self.panel = panel;
        self.panel_offset = panel_offset;
        Ok(())
    }

    /// Panel currently addressed by the spiral and half operations.
    #[must_use]
    pub const fn panel(&self) -> usize {
        self.panel
    }

    /// Number of chained matrices in the buffer.
    #[must_use]
    pub const fn array_count(&self) -> ArrayCount {
        self.array_count
    }

    /// Wiring table in use.
    #[must_use]
    pub const fn layout(&self) -> &SpiralLayout {
        &self.layout
    }

    /// The underlying buffer, addressed by physical slot.
    #[must_use]
    pub const fn raw_buffer(&self) -> &B {
        &self.buffer
    }

    /// The underlying buffer for direct physical-slot writes. Nothing written
    /// here is checked.
    pub const fn raw_buffer_mut(&mut self) -> &mut B {
        &mut self.buffer
    }

    /// Give the buffer back.
    #[must_use]
    pub fn into_inner(self) -> B {
        self.buffer
    }

    fn write_logical_range(
        &mut self,
        logical_range: core::ops::Range<usize>,
        color: RGB8,
    ) -> Result<()> {
        let layout = self.layout;
        let slots = layout
            .index_to_slot()
            .iter()
            .skip(logical_range.start)
            .take(logical_range.len());
        for &slot in slots {
            self.write_panel_slot(usize::from(slot), color)?;
        }
        Ok(())
    }

    fn write_panel_slot(&mut self, slot: usize, color: RGB8) -> Result<()> {
        // slot < PANEL_LEN and panel < panels, so this stays inside the buffer.
        let buffer_slot = self
            .panel_offset
            .checked_add(slot)
            .ok_or(Error::InvalidIndex { index: slot })?;
        self.buffer.set_pixel(buffer_slot, color);
        Ok(())
    }
}

fn reject(err: &Error) {
    debug!("SpiralMatrix: rejected argument: {}", err);
}

fn reject_owned(err: Error) -> Error {
    reject(&err);
    err
}

#[cfg(test)]
#[allow(
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    reason = "test assertions"
)]
mod tests {
    use super::*;

    #[test]
    fn left_and_right_are_contiguous_halves() {
        assert!(Side::Left.slots().eq(0..32));
        assert!(Side::Right.slots().eq(32..64));
    }

    #[test]
    fn top_follows_the_column_walk_bounded_at_57() {
        let expected: [usize; 29] = [
            0, 8, 16, 24, 32, 40, 48, 56, //
            1, 9, 17, 25, 33, 41, 49, //
            2, 10, 18, 26, 34, 42, 50, //
            3, 11, 19, 27, 35, 43, 51,
        ];
        assert!(Side::Top.slots().eq(expected));
    }

    #[test]
    fn bottom_is_top_shifted_by_four_columns() {
        assert!(Side::Bottom.slots().eq(Side::Top.slots().map(|slot| slot + 4)));
        assert_eq!(Side::Bottom.slots().next(), Some(4));
        assert_eq!(Side::Bottom.slots().last(), Some(55));
    }

    #[test]
    fn half_slots_are_distinct_and_in_panel() {
        for (side, count) in Side::ALL.into_iter().zip([32, 32, 29, 29]) {
            let mut seen = [false; PANEL_LEN];
            for slot in side.slots() {
                assert!(!seen[slot], "{side} repeats slot {slot}");
                seen[slot] = true;
            }
            assert_eq!(seen.iter().filter(|&&hit| hit).count(), count, "{side}");
        }
    }
}
