//! Pixel access traits and an owned RGB pixel buffer.
//!
//! The quantization functions read pixels through [`PixelSource`] and write through
//! [`PixelSink`], so they do not depend on any particular in-memory image layout.
//! All coordinates passed to these traits are absolute, i.e., they lie within
//! the [`Rect`] returned by [`PixelSource::bounds`].

use crate::Rect;
use palette::Srgb;
#[cfg(feature = "image")]
use {
    image::{DynamicImage, GenericImageView, RgbImage, RgbaImage},
    palette::cast::{ComponentsAs, IntoComponents},
};

/// A rectangular source of opaque RGB pixels.
pub trait PixelSource {
    /// The region of valid pixel positions.
    fn bounds(&self) -> Rect;

    /// Returns the color at the absolute position `(x, y)`.
    ///
    /// Any alpha channel is discarded. Implementations may panic if `(x, y)` is outside of
    /// [`PixelSource::bounds`].
    fn at(&self, x: u32, y: u32) -> Srgb<u8>;
}

/// A rectangular destination for RGB pixels.
pub trait PixelSink {
    /// Writes `color` to the absolute position `(x, y)`.
    fn set(&mut self, x: u32, y: u32, color: Srgb<u8>);
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }

    fn at(&self, x: u32, y: u32) -> Srgb<u8> {
        (**self).at(x, y)
    }
}

/// An owned image of RGB pixels stored row by row in a flat buffer.
///
/// The buffer covers a [`Rect`] which need not start at the origin.
///
/// # Examples
/// ```
/// # use palettefy::{PixelSink, PixelSource, Rect, RgbBuffer};
/// # use palette::Srgb;
/// let mut buffer = RgbBuffer::new(Rect::new(10, 20, 2, 2));
/// buffer.set(11, 21, Srgb::new(1, 2, 3));
/// assert_eq!(buffer.at(11, 21), Srgb::new(1, 2, 3));
/// assert_eq!(buffer.pixels()[3], Srgb::new(1, 2, 3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbBuffer {
    /// The region covered by the buffer.
    bounds: Rect,
    /// The pixels in row-major order.
    pixels: Vec<Srgb<u8>>,
}

impl RgbBuffer {
    /// Creates a new black [`RgbBuffer`] covering `bounds`.
    #[must_use]
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            pixels: vec![Srgb::new(0, 0, 0); bounds.area()],
        }
    }

    /// Creates a new [`RgbBuffer`] from row-major pixels.
    ///
    /// Returns `None` if the length of `pixels` does not match the area of `bounds`.
    #[must_use]
    pub fn from_pixels(bounds: Rect, pixels: Vec<Srgb<u8>>) -> Option<Self> {
        if pixels.len() == bounds.area() {
            Some(Self { bounds, pixels })
        } else {
            None
        }
    }

    /// Copies all pixels of `source` into a new [`RgbBuffer`].
    #[must_use]
    pub fn from_source(source: &(impl PixelSource + ?Sized)) -> Self {
        let bounds = source.bounds();
        let (min_x, min_y) = bounds.min();
        let (max_x, max_y) = bounds.max();
        let pixels = (min_y..max_y)
            .flat_map(|y| (min_x..max_x).map(move |x| (x, y)))
            .map(|(x, y)| source.at(x, y))
            .collect();

        Self { bounds, pixels }
    }

    /// The pixels in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[Srgb<u8>] {
        &self.pixels
    }

    /// The pixels in row-major order.
    pub fn pixels_mut(&mut self) -> &mut [Srgb<u8>] {
        &mut self.pixels
    }

    /// Consumes the buffer, returning the pixels in row-major order.
    #[must_use]
    pub fn into_pixels(self) -> Vec<Srgb<u8>> {
        self.pixels
    }

    /// The flat index of the absolute position `(x, y)`.
    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(self.bounds.contains(x, y));
        let Rect { x: min_x, y: min_y, width, .. } = self.bounds;
        (y - min_y) as usize * width as usize + (x - min_x) as usize
    }
}

impl PixelSource for RgbBuffer {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn at(&self, x: u32, y: u32) -> Srgb<u8> {
        self.pixels[self.offset(x, y)]
    }
}

impl PixelSink for RgbBuffer {
    fn set(&mut self, x: u32, y: u32, color: Srgb<u8>) {
        let i = self.offset(x, y);
        self.pixels[i] = color;
    }
}

#[cfg(feature = "image")]
impl PixelSource for RgbImage {
    fn bounds(&self) -> Rect {
        Rect::from_dimensions(self.width(), self.height())
    }

    fn at(&self, x: u32, y: u32) -> Srgb<u8> {
        let [r, g, b] = self.get_pixel(x, y).0;
        Srgb::new(r, g, b)
    }
}

#[cfg(feature = "image")]
impl PixelSink for RgbImage {
    fn set(&mut self, x: u32, y: u32, color: Srgb<u8>) {
        self.put_pixel(x, y, image::Rgb(color.into()));
    }
}

#[cfg(feature = "image")]
impl PixelSource for RgbaImage {
    fn bounds(&self) -> Rect {
        Rect::from_dimensions(self.width(), self.height())
    }

    fn at(&self, x: u32, y: u32) -> Srgb<u8> {
        let [r, g, b, _] = self.get_pixel(x, y).0;
        Srgb::new(r, g, b)
    }
}

#[cfg(feature = "image")]
impl PixelSource for DynamicImage {
    fn bounds(&self) -> Rect {
        let (width, height) = self.dimensions();
        Rect::from_dimensions(width, height)
    }

    fn at(&self, x: u32, y: u32) -> Srgb<u8> {
        let [r, g, b, _] = self.get_pixel(x, y).0;
        Srgb::new(r, g, b)
    }
}

#[cfg(feature = "image")]
impl From<&RgbImage> for RgbBuffer {
    fn from(image: &RgbImage) -> Self {
        let pixels = image.pixels().len();
        let colors: &[Srgb<u8>] = image.as_raw()[..(pixels * 3)].components_as();
        Self {
            bounds: PixelSource::bounds(image),
            pixels: colors.to_vec(),
        }
    }
}

#[cfg(feature = "image")]
impl From<RgbBuffer> for RgbImage {
    fn from(buffer: RgbBuffer) -> Self {
        let Rect { width, height, .. } = buffer.bounds;
        let buf: Vec<u8> = buffer.pixels.into_components();

        #[allow(clippy::expect_used)]
        {
            // buf.len() is 3 * width * height by the RgbBuffer invariant
            RgbImage::from_vec(width, height, buf).expect("large enough buffer")
        }
    }
}
