//! Contains the dither modes and the Floyd–Steinberg error diffusion implementation.

use crate::{PaletteIndex, PixelSink, PixelSource, QuantizeError, Rect};
use palette::Srgb;

/// The set of supported dither modes.
///
/// Each mode also has a numeric code, which is what [`palettefy`](crate::palettefy)
/// and the text interfaces accept. See [`DitherMode::from_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DitherMode {
    /// Replace each pixel with its nearest palette color (code `0`).
    ///
    /// Pixels are independent of each other.
    #[default]
    NearestOnly,
    /// Floyd–Steinberg error diffusion in raster order (code `1`).
    FloydSteinbergDiffusion,
}

impl DitherMode {
    /// Returns the [`DitherMode`] corresponding to the given numeric code.
    ///
    /// Returns [`QuantizeError::InvalidDitherMode`] for any code other than `0` or `1`.
    pub const fn from_code(code: u32) -> Result<Self, QuantizeError> {
        match code {
            0 => Ok(Self::NearestOnly),
            1 => Ok(Self::FloydSteinbergDiffusion),
            code => Err(QuantizeError::InvalidDitherMode(code)),
        }
    }

    /// The numeric code of this [`DitherMode`].
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::NearestOnly => 0,
            Self::FloydSteinbergDiffusion => 1,
        }
    }
}

impl TryFrom<u32> for DitherMode {
    type Error = QuantizeError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

/// Floyd–Steinberg dithering.
///
/// The quantization error of each pixel is pushed into the following not yet visited
/// neighbors, in sixteenths:
///
/// ```text
///          *   7
///      3   5   1
/// ```
///
/// Error is accumulated as integers and each share is truncated toward zero.
/// Shares that would land outside of the image are discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloydSteinberg;

impl FloydSteinberg {
    /// The neighbor offsets `(dx, dy)` and their weights in sixteenths.
    pub const WEIGHTS: [(i32, i32, i32); 4] = [(1, 0, 7), (-1, 1, 3), (0, 1, 5), (1, 1, 1)];

    /// The denominator of the weights in [`FloydSteinberg::WEIGHTS`].
    pub const DENOMINATOR: i32 = 16;

    /// Creates a new [`FloydSteinberg`].
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Dithers every pixel of `source` into `sink` in raster order.
    ///
    /// `sink` is written at the same absolute positions as `source` is read.
    pub fn dither(
        &self,
        source: &(impl PixelSource + ?Sized),
        sink: &mut (impl PixelSink + ?Sized),
        index: &PaletteIndex,
    ) {
        let bounds = source.bounds();
        if bounds.is_empty() {
            return;
        }

        let mut error = ErrorBuf::new(source);
        dither(bounds, &mut error, sink, index);
    }
}

/// The per-pixel error accumulator for one dither call.
///
/// Holds one signed `[r, g, b]` triple per pixel in a flat row-major buffer,
/// with coordinates relative to the top-left corner of the image bounds.
/// Each entry starts as the source color and then receives the error of
/// already visited neighbors.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ErrorBuf {
    /// The width of a row of pixels.
    width: usize,
    /// The number of rows.
    height: usize,
    /// The accumulated channel values.
    acc: Vec<[i32; 3]>,
}

impl ErrorBuf {
    /// Creates a new [`ErrorBuf`] initialized with the colors of `source`.
    fn new(source: &(impl PixelSource + ?Sized)) -> Self {
        let bounds = source.bounds();
        let (min_x, min_y) = bounds.min();
        let (max_x, max_y) = bounds.max();

        let mut acc = Vec::with_capacity(bounds.area());
        for y in min_y..max_y {
            for x in min_x..max_x {
                let Srgb { red, green, blue, .. } = source.at(x, y);
                acc.push([red, green, blue].map(i32::from));
            }
        }

        Self {
            width: bounds.width as usize,
            height: bounds.height as usize,
            acc,
        }
    }

    /// The accumulated value at `(x, y)`, clipped to a valid color.
    #[inline]
    fn apparent(&self, x: usize, y: usize) -> Srgb<u8> {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let [r, g, b] = self.acc[y * self.width + x].map(|c| c.clamp(0, 255) as u8);
        Srgb::new(r, g, b)
    }

    /// Propagate error using floyd steinberg dithering, going from left to right.
    #[inline]
    fn propagate(&mut self, x: usize, y: usize, err: [i32; 3]) {
        for (dx, dy, weight) in FloydSteinberg::WEIGHTS {
            let (Some(nx), Some(ny)) = (x.checked_add_signed(dx as isize), y.checked_add(dy as usize))
            else {
                continue;
            };

            if nx < self.width && ny < self.height {
                let target = &mut self.acc[ny * self.width + nx];
                for (t, e) in target.iter_mut().zip(err) {
                    *t += e * weight / FloydSteinberg::DENOMINATOR;
                }
            }
        }
    }
}

/// Signed per-channel difference `a - b`.
#[inline]
fn color_difference(a: Srgb<u8>, b: Srgb<u8>) -> [i32; 3] {
    [
        i32::from(a.red) - i32::from(b.red),
        i32::from(a.green) - i32::from(b.green),
        i32::from(a.blue) - i32::from(b.blue),
    ]
}

/// Performs dithering, consuming the error in `error` and writing each chosen color to `sink`.
fn dither(
    bounds: Rect,
    error: &mut ErrorBuf,
    sink: &mut (impl PixelSink + ?Sized),
    index: &PaletteIndex,
) {
    let (min_x, min_y) = bounds.min();

    for (y, abs_y) in (0..error.height).zip(min_y..) {
        for (x, abs_x) in (0..error.width).zip(min_x..) {
            let apparent = error.apparent(x, y);
            let nearest = index.nearest(apparent);
            sink.set(abs_x, abs_y, nearest);
            error.propagate(x, y, color_difference(apparent, nearest));
        }
        tracing::trace!(row = abs_y, "dithered row");
    }
}
