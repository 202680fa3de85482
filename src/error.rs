use core::convert::Infallible;

use derive_more::{Debug, Display, Error};

/// Crate-wide result type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors reported by layout lookups and pattern operations.
///
/// Every operation validates its arguments before touching the pixel buffer,
/// so an `Err` always means nothing was written.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Logical index (or physical slot of a panel) outside `0..64`.
    #[display("index {index} is outside 0..64")]
    InvalidIndex {
        /// The rejected index.
        index: usize,
    },
    /// Ring/disc radius outside `0..=3`.
    #[display("radius {radius} is outside 0..=3")]
    InvalidRadius {
        /// The rejected radius.
        radius: usize,
    },
    /// Half-fill side token is not one of left, right, top, bottom.
    #[display("side must be one of l/left, r/right, t/top, b/bottom")]
    InvalidSide,
    /// Number of chained 8×8 matrices is not 1 or 2.
    ///
    /// For a buffer this is reported once its length is a whole number of
    /// panels (0, 192, ...); other lengths are [`Error::BufferLength`].
    #[display("array count {count} is not supported (expected 1 or 2)")]
    InvalidArrayCount {
        /// The rejected number of matrices.
        count: usize,
    },
    /// Pixel buffer length is not a whole number of 8×8 panels.
    ///
    /// A finer-grained sibling of [`Error::InvalidArrayCount`]: both mean the
    /// buffer is not a supported size, and this one says the length cannot be
    /// counted in panels at all.
    #[display("buffer of {len} pixels is not a multiple of 64")]
    BufferLength {
        /// Length of the rejected buffer.
        len: usize,
    },
    /// Panel selection beyond the chained matrices.
    #[display("panel {panel} does not exist (buffer has {panels})")]
    InvalidPanel {
        /// The rejected panel.
        panel: usize,
        /// Panels available in the buffer.
        panels: usize,
    },
}

impl From<Infallible> for Error {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
