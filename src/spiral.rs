//! Spiral numbering for an 8×8 panel: logical index `0` at the center, growing outward.
//!
//! See [`SpiralLayout`] for the table itself and [`ring_range`] / [`disc_range`]
//! for the ring geometry the fill patterns are built on.

use core::ops::Range;

use crate::{Error, Result};

/// Columns (and rows) in one panel.
pub const PANEL_WIDTH: usize = 8;

/// LEDs in one 8×8 panel.
pub const PANEL_LEN: usize = PANEL_WIDTH * PANEL_WIDTH;

/// Number of square rings in a panel (radius `0..RING_COUNT`).
pub const RING_COUNT: usize = 4;

/// Logical-index boundaries of the rings: ring `r` is `RING_BOUNDS[r]..RING_BOUNDS[r + 1]`.
///
/// ```text
///   3  3  3  3  3  3  3  3
///   3  2  2  2  2  2  2  3
///   3  2  1  1  1  1  2  3
///   3  2  1  0  0  1  2  3
///   3  2  1  0  0  1  2  3
///   3  2  1  1  1  1  2  3
///   3  2  2  2  2  2  2  3
///   3  3  3  3  3  3  3  3
/// ```
pub const RING_BOUNDS: [usize; RING_COUNT + 1] = [0, 4, 16, 36, 64];

/// Compile-time table mapping spiral (logical) indices to wired (physical) slots.
///
/// Physical slots are numbered row-major within the panel: `slot = row * 8 + col`,
/// with `(0, 0)` at the top-left. Logical indices start with the center 2×2 and
/// walk outward one square ring at a time (see [`RING_BOUNDS`]).
///
/// The table is wiring data, not something computed, so a different panel is
/// described by listing its 64 slots with [`SpiralLayout::new`]. Tables are
/// validated at **compile time** when bound to a `const`: every slot must be
/// in `0..64` and appear exactly once.
///
/// # Example
///
/// Mount the stock panel upside down and check where the spiral starts:
///
/// ```rust
/// use dotstar_spiral::spiral::SpiralLayout;
///
/// const UPSIDE_DOWN: SpiralLayout = SpiralLayout::DOTSTAR_8X8.rotate_180();
/// const _: () = assert!(!UPSIDE_DOWN.equals(&SpiralLayout::DOTSTAR_8X8));
///
/// assert_eq!(SpiralLayout::DOTSTAR_8X8.physical_slot(0), Ok(36));
/// assert_eq!(UPSIDE_DOWN.physical_slot(0), Ok(27));
/// ```
///
/// ```text
/// Stock wiring, center 2×2 (logical → slot):
///   L1 → 28   L2 → 27        row 3
///   L0 → 36   L3 → 35        row 4
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiralLayout {
    index_to_slot: [u8; PANEL_LEN],
    slot_to_index: [u8; PANEL_LEN],
}

impl SpiralLayout {
    /// Wiring of the Adafruit 8×8 DotStar matrix.
    pub const DOTSTAR_8X8: Self = Self::new([
        36, 28, 27, 35, 43, 44, 45, 37, 29, 21, 20, 19, 18, 26, 34, 42, //
        50, 51, 52, 53, 54, 46, 38, 30, 22, 14, 13, 12, 11, 10, 9, 17, //
        25, 33, 41, 49, 57, 58, 59, 60, 61, 62, 63, 55, 47, 39, 31, 23, //
        15, 7, 6, 5, 4, 3, 2, 1, 0, 8, 16, 24, 32, 40, 48, 56,
    ]);

    /// Constructor: verifies the table is a permutation of `0..64`.
    ///
    /// ```rust
    /// use dotstar_spiral::spiral::SpiralLayout;
    ///
    /// // Identity wiring: logical order equals wire order.
    /// const IDENTITY: SpiralLayout = SpiralLayout::new({
    ///     let mut map = [0u8; 64];
    ///     let mut i = 0;
    ///     while i < 64 {
    ///         map[i] = i as u8;
    ///         i += 1;
    ///     }
    ///     map
    /// });
    /// assert_eq!(IDENTITY.physical_slot(63), Ok(63));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a `const`) if a slot is out of
    /// range, repeated, or missing.
    #[must_use]
    #[allow(
        clippy::indexing_slicing,
        clippy::arithmetic_side_effects,
        clippy::cast_possible_truncation,
        reason = "const table walk; slots are asserted below PANEL_LEN first"
    )]
    pub const fn new(index_to_slot: [u8; PANEL_LEN]) -> Self {
        let mut inverse = [None; PANEL_LEN];

        let mut logical_index = 0;
        while logical_index < PANEL_LEN {
            let slot = index_to_slot[logical_index] as usize;
            assert!(slot < PANEL_LEN, "slot out of bounds in spiral table");

            let cell = &mut inverse[slot];
            assert!(cell.is_none(), "duplicate slot in spiral table");
            *cell = Some(logical_index as u8);

            logical_index += 1;
        }

        let mut slot_to_index = [0u8; PANEL_LEN];
        let mut slot = 0;
        while slot < PANEL_LEN {
            slot_to_index[slot] = match inverse[slot] {
                Some(logical_index) => logical_index,
                None => panic!("spiral table does not cover every slot"),
            };
            slot += 1;
        }

        Self {
            index_to_slot,
            slot_to_index,
        }
    }

    /// The table in logical order: entry `i` is the slot of logical index `i`.
    #[must_use]
    pub const fn index_to_slot(&self) -> &[u8; PANEL_LEN] {
        &self.index_to_slot
    }

    /// The inverse table: entry `s` is the logical index wired to slot `s`.
    #[must_use]
    pub const fn slot_to_index(&self) -> &[u8; PANEL_LEN] {
        &self.slot_to_index
    }

    /// Physical slot of `logical_index`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIndex`] if `logical_index` is not in `0..64`.
    pub fn physical_slot(&self, logical_index: usize) -> Result<usize> {
        self.index_to_slot
            .get(logical_index)
            .map(|&slot| usize::from(slot))
            .ok_or(Error::InvalidIndex {
                index: logical_index,
            })
    }

    /// Logical index wired to `slot`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIndex`] if `slot` is not in `0..64`.
    pub fn logical_index(&self, slot: usize) -> Result<usize> {
        self.slot_to_index
            .get(slot)
            .map(|&logical_index| usize::from(logical_index))
            .ok_or(Error::InvalidIndex { index: slot })
    }

    /// Const equality helper for compile-time checks.
    #[must_use]
    #[allow(
        clippy::indexing_slicing,
        clippy::arithmetic_side_effects,
        reason = "const table walk; every index is below PANEL_LEN"
    )]
    pub const fn equals(&self, other: &Self) -> bool {
        let mut i = 0;
        while i < PANEL_LEN {
            if self.index_to_slot[i] != other.index_to_slot[i] {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Rotate the panel 90° clockwise.
    ///
    /// The logical spiral stays anchored to the LEDs; only the slots they are
    /// wired to move.
    ///
    /// ```text
    /// Before:            After:
    ///   A  B  .  .         .  .  .  A
    ///   .  .  .  .         .  .  .  B
    /// ```
    #[must_use]
    #[allow(
        clippy::indexing_slicing,
        clippy::arithmetic_side_effects,
        reason = "const table walk; every index is below PANEL_LEN"
    )]
    pub const fn rotate_cw(self) -> Self {
        let mut out = [0u8; PANEL_LEN];
        let mut i = 0;
        while i < PANEL_LEN {
            let (col, row) = slot_to_xy(self.index_to_slot[i] as usize);
            out[i] = xy_to_slot(PANEL_WIDTH - 1 - row, col);
            i += 1;
        }
        Self::new(out)
    }

    /// Flip horizontally (mirror columns).
    #[must_use]
    #[allow(
        clippy::indexing_slicing,
        clippy::arithmetic_side_effects,
        reason = "const table walk; every index is below PANEL_LEN"
    )]
    pub const fn flip_h(self) -> Self {
        let mut out = [0u8; PANEL_LEN];
        let mut i = 0;
        while i < PANEL_LEN {
            let (col, row) = slot_to_xy(self.index_to_slot[i] as usize);
            out[i] = xy_to_slot(PANEL_WIDTH - 1 - col, row);
            i += 1;
        }
        Self::new(out)
    }

    /// Rotate 180° derived from rotate_cw.
    #[must_use]
    pub const fn rotate_180(self) -> Self {
        self.rotate_cw().rotate_cw()
    }

    /// Rotate 90° counter-clockwise derived from rotate_cw.
    #[must_use]
    pub const fn rotate_ccw(self) -> Self {
        self.rotate_cw().rotate_cw().rotate_cw()
    }

    /// Flip vertically derived from rotation + horizontal flip.
    #[must_use]
    pub const fn flip_v(self) -> Self {
        self.rotate_cw().flip_h().rotate_ccw()
    }
}

impl Default for SpiralLayout {
    fn default() -> Self {
        Self::DOTSTAR_8X8
    }
}

/// `(col, row)` of a slot inside one panel.
#[must_use]
pub const fn slot_to_xy(slot: usize) -> (usize, usize) {
    (slot % PANEL_WIDTH, slot / PANEL_WIDTH)
}

#[allow(
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    reason = "callers pass col and row below PANEL_WIDTH"
)]
const fn xy_to_slot(col: usize, row: usize) -> u8 {
    (row * PANEL_WIDTH + col) as u8
}

/// Logical indices exactly at `radius`.
///
/// # Errors
///
/// [`Error::InvalidRadius`] if `radius` is not in `0..=3`.
pub fn ring_range(radius: usize) -> Result<Range<usize>> {
    match (RING_BOUNDS.get(radius), RING_BOUNDS.get(radius.saturating_add(1))) {
        (Some(&start), Some(&end)) => Ok(start..end),
        _ => Err(Error::InvalidRadius { radius }),
    }
}

/// Logical indices at or within `radius`.
///
/// # Errors
///
/// [`Error::InvalidRadius`] if `radius` is not in `0..=3`.
pub fn disc_range(radius: usize) -> Result<Range<usize>> {
    ring_range(radius).map(|ring| 0..ring.end)
}

/// Radius of the ring holding `logical_index`.
///
/// # Errors
///
/// [`Error::InvalidIndex`] if `logical_index` is not in `0..64`.
pub fn ring_of(logical_index: usize) -> Result<usize> {
    RING_BOUNDS
        .iter()
        .skip(1)
        .position(|&end| logical_index < end)
        .ok_or(Error::InvalidIndex {
            index: logical_index,
        })
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
    fn ring_bounds_are_square_rings() {
        for radius in 0..RING_COUNT {
            let side = 2 * (radius + 1);
            assert_eq!(RING_BOUNDS[radius + 1], side * side);
        }
    }

    #[test]
    fn slot_xy_round_trip_is_row_major() {
        assert_eq!(slot_to_xy(36), (4, 4));
        assert_eq!(slot_to_xy(7), (7, 0));
        assert_eq!(xy_to_slot(7, 0), 7);
        assert_eq!(xy_to_slot(0, 7), 56);
    }
}
