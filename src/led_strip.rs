//! Pixel buffers for NeoPixel/DotStar-style LED strips and the colors that go in them.
//!
//! [`PixelBuffer`] is the only thing the pattern operations in
//! [`matrix`](mod@crate::matrix) know about: a run of color cells addressed by
//! physical slot, with a bulk fill. It is implemented for plain arrays and
//! slices, for [`Frame1d`], and for [`LedStripBuffer`], which pushes every
//! change straight to a [`SmartLedsWrite`] driver.
//!
//! # Example: Drive a strip through `LedStripBuffer`
//!
//! ```rust
//! use core::convert::Infallible;
//! use dotstar_spiral::led_strip::{LedStripBuffer, PixelBuffer, RGB8, colors};
//! use smart_leds::SmartLedsWrite;
//!
//! // Stand-in for an SPI DotStar or PIO WS2812 driver.
//! #[derive(Default)]
//! struct Counter(usize);
//!
//! impl SmartLedsWrite for Counter {
//!     type Error = Infallible;
//!     type Color = RGB8;
//!     fn write<T, I>(&mut self, iterator: T) -> Result<(), Infallible>
//!     where
//!         T: IntoIterator<Item = I>,
//!         I: Into<RGB8>,
//!     {
//!         iterator.into_iter().for_each(drop);
//!         self.0 += 1;
//!         Ok(())
//!     }
//! }
//!
//! let mut strip = LedStripBuffer::<_, 64>::new(Counter::default());
//! strip.set_pixel(3, colors::RED); // pushed immediately
//! strip.fill(colors::BLACK); // one push for the whole strip
//! assert_eq!(strip.driver().0, 2);
//! ```

/// Predefined RGB color constants from the `smart_leds` crate.
///
/// Common colors include `RED`, `GREEN`, `BLUE`, `YELLOW`, `WHITE`, `BLACK`, `CYAN`, `MAGENTA`, `ORANGE`, `PURPLE`.
#[doc(inline)]
pub use smart_leds::colors;

/// 8-bit-per-channel RGB color from `embedded_graphics`.
#[doc(inline)]
pub use embedded_graphics::pixelcolor::Rgb888;

/// RGB color type stored in pixel buffers.
pub use smart_leds::RGB8;

use core::ops::{Deref, DerefMut};
use embedded_graphics::prelude::RgbColor;
use smart_leds::SmartLedsWrite;

/// The "off" color written by [`SpiralMatrix::clear_all`](crate::matrix::SpiralMatrix::clear_all).
pub const BLACK: RGB8 = RGB8::new(0, 0, 0);

/// Convert colors to [`RGB8`] for LED strip rendering.
///
/// Accepted forms are passed through channel for channel; nothing is scaled
/// or gamma corrected. A packed `u32` is read as `0xRRGGBB` and its top byte
/// is ignored.
///
/// # Example
///
/// ```rust
/// use dotstar_spiral::led_strip::{Rgb888, ToRgb8, RGB8};
///
/// let expected = RGB8::new(0xA0, 0x00, 0xA0);
///
/// assert_eq!(0xA0_00A0_u32.to_rgb8(), expected);
/// assert_eq!((0xA0_u8, 0x00_u8, 0xA0_u8).to_rgb8(), expected);
/// assert_eq!(Rgb888::new(0xA0, 0x00, 0xA0).to_rgb8(), expected);
/// ```
pub trait ToRgb8 {
    /// Convert this color to [`RGB8`].
    #[must_use]
    fn to_rgb8(self) -> RGB8;
}

impl ToRgb8 for RGB8 {
    #[inline(always)]
    fn to_rgb8(self) -> RGB8 {
        self
    }
}

impl ToRgb8 for Rgb888 {
    #[inline(always)]
    fn to_rgb8(self) -> RGB8 {
        RGB8::new(self.r(), self.g(), self.b())
    }
}

impl ToRgb8 for u32 {
    #[inline(always)]
    fn to_rgb8(self) -> RGB8 {
        let [_, red, green, blue] = self.to_be_bytes();
        RGB8::new(red, green, blue)
    }
}

impl ToRgb8 for (u8, u8, u8) {
    #[inline(always)]
    fn to_rgb8(self) -> RGB8 {
        RGB8::new(self.0, self.1, self.2)
    }
}

impl ToRgb8 for [u8; 3] {
    #[inline(always)]
    fn to_rgb8(self) -> RGB8 {
        let [red, green, blue] = self;
        RGB8::new(red, green, blue)
    }
}

/// Pack a color back into `0xRRGGBB`.
#[must_use]
pub const fn to_packed(color: RGB8) -> u32 {
    u32::from_be_bytes([0, color.r, color.g, color.b])
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// An ordered run of color cells addressed by physical slot.
///
/// This is the collaborator the pattern operations write through. Buffers that
/// talk to hardware decide for themselves when to push (see [`LedStripBuffer`]).
pub trait PixelBuffer {
    /// Number of cells.
    fn len(&self) -> usize;

    /// True when the buffer has no cells.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Color at `slot`, or `None` past the end.
    fn pixel(&self, slot: usize) -> Option<RGB8>;

    /// Set the color at `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= self.len()`, like slice indexing.
    fn set_pixel(&mut self, slot: usize, color: RGB8);

    /// Set every cell to `color`.
    ///
    /// The default writes one slot at a time; buffers with a cheaper bulk
    /// write override it. Either way the end state is the same.
    fn fill(&mut self, color: RGB8) {
        for slot in 0..self.len() {
            self.set_pixel(slot, color);
        }
    }
}

impl PixelBuffer for [RGB8] {
    fn len(&self) -> usize {
        <[RGB8]>::len(self)
    }

    fn pixel(&self, slot: usize) -> Option<RGB8> {
        self.get(slot).copied()
    }

    fn set_pixel(&mut self, slot: usize, color: RGB8) {
        let len = <[RGB8]>::len(self);
        match self.get_mut(slot) {
            Some(pixel) => *pixel = color,
            None => slot_out_of_range(slot, len),
        }
    }

    fn fill(&mut self, color: RGB8) {
        <[RGB8]>::fill(self, color);
    }
}

impl<const N: usize> PixelBuffer for [RGB8; N] {
    fn len(&self) -> usize {
        N
    }

    fn pixel(&self, slot: usize) -> Option<RGB8> {
        self.get(slot).copied()
    }

    fn set_pixel(&mut self, slot: usize, color: RGB8) {
        self.as_mut_slice().set_pixel(slot, color);
    }

    fn fill(&mut self, color: RGB8) {
        *self = [color; N];
    }
}

#[track_caller]
fn slot_out_of_range(slot: usize, len: usize) -> ! {
    panic!("slot {slot} is out of range for a {len}-pixel buffer")
}

impl<B: PixelBuffer + ?Sized> PixelBuffer for &mut B {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn pixel(&self, slot: usize) -> Option<RGB8> {
        (**self).pixel(slot)
    }

    fn set_pixel(&mut self, slot: usize, color: RGB8) {
        (**self).set_pixel(slot, color);
    }

    fn fill(&mut self, color: RGB8) {
        (**self).fill(color);
    }
}

// ============================================================================
// Frame1d
// ============================================================================

/// Fixed-size 1D LED strip frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame1d<const N: usize>(pub [RGB8; N]);

impl<const N: usize> Frame1d<N> {
    /// Number of LEDs in this frame.
    pub const LEN: usize = N;

    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([BLACK; N])
    }

    /// Create a frame filled with a single color.
    #[must_use]
    pub const fn filled(color: RGB8) -> Self {
        Self([color; N])
    }
}

impl<const N: usize> PixelBuffer for Frame1d<N> {
    fn len(&self) -> usize {
        N
    }

    fn pixel(&self, slot: usize) -> Option<RGB8> {
        self.0.get(slot).copied()
    }

    fn set_pixel(&mut self, slot: usize, color: RGB8) {
        self.0.set_pixel(slot, color);
    }

    fn fill(&mut self, color: RGB8) {
        self.0 = [color; N];
    }
}

impl<const N: usize> Deref for Frame1d<N> {
    type Target = [RGB8; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> DerefMut for Frame1d<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const N: usize> From<[RGB8; N]> for Frame1d<N> {
    fn from(array: [RGB8; N]) -> Self {
        Self(array)
    }
}

impl<const N: usize> From<Frame1d<N>> for [RGB8; N] {
    fn from(frame: Frame1d<N>) -> Self {
        frame.0
    }
}

impl<const N: usize> Default for Frame1d<N> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// LedStripBuffer
// ============================================================================

/// A [`Frame1d`] mirrored to a [`SmartLedsWrite`] driver.
///
/// With auto-write on (the default) every mutation through [`PixelBuffer`]
/// pushes the whole frame to the driver; [`PixelBuffer::fill`] pushes once.
/// With auto-write off, call [`show`](Self::show) when the frame is ready.
///
/// Driver failures during an automatic push are not retried. The most recent
/// one is kept for [`take_write_error`](Self::take_write_error).
pub struct LedStripBuffer<W: SmartLedsWrite, const N: usize> {
    driver: W,
    frame: Frame1d<N>,
    auto_write: bool,
    write_error: Option<W::Error>,
}

impl<W, const N: usize> LedStripBuffer<W, N>
where
    W: SmartLedsWrite,
    RGB8: Into<W::Color>,
{
    /// Wrap `driver` with an all-black frame and auto-write on.
    ///
    /// Nothing is sent until the first mutation.
    #[must_use]
    pub const fn new(driver: W) -> Self {
        Self {
            driver,
            frame: Frame1d::new(),
            auto_write: true,
            write_error: None,
        }
    }

    /// Turn automatic pushes on or off.
    pub fn set_auto_write(&mut self, auto_write: bool) {
        self.auto_write = auto_write;
    }

    /// Whether mutations are pushed immediately.
    #[must_use]
    pub const fn auto_write(&self) -> bool {
        self.auto_write
    }

    /// Push the current frame to the driver.
    ///
    /// # Errors
    ///
    /// Returns the driver's error unchanged.
    pub fn show(&mut self) -> Result<(), W::Error> {
        self.driver.write(self.frame.iter().copied())
    }

    /// Take the error from the most recent failed automatic push, if any.
    pub fn take_write_error(&mut self) -> Option<W::Error> {
        self.write_error.take()
    }

    /// The frame as last written through this buffer.
    #[must_use]
    pub const fn frame(&self) -> &Frame1d<N> {
        &self.frame
    }

    /// The wrapped driver.
    #[must_use]
    pub const fn driver(&self) -> &W {
        &self.driver
    }

    /// Give back the driver and the last frame.
    #[must_use]
    pub fn into_parts(self) -> (W, Frame1d<N>) {
        (self.driver, self.frame)
    }

    fn auto_show(&mut self) {
        if !self.auto_write {
            return;
        }
        if let Err(err) = self.show() {
            warn!("LedStripBuffer: automatic push failed");
            self.write_error = Some(err);
        }
    }
}

impl<W, const N: usize> PixelBuffer for LedStripBuffer<W, N>
where
    W: SmartLedsWrite,
    RGB8: Into<W::Color>,
{
    fn len(&self) -> usize {
        N
    }

    fn pixel(&self, slot: usize) -> Option<RGB8> {
        self.frame.pixel(slot)
    }

    fn set_pixel(&mut self, slot: usize, color: RGB8) {
        self.frame.set_pixel(slot, color);
        self.auto_show();
    }

    fn fill(&mut self, color: RGB8) {
        self.frame.fill(color);
        self.auto_show();
    }
}
