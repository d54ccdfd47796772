//! Contains the top level quantization functions.

use crate::{
    DitherMode, FloydSteinberg, Palette, PaletteIndex, PixelSink, PixelSource, QuantizeError,
    RgbBuffer,
};
use palette::Srgb;
#[cfg(feature = "threads")]
use rayon::prelude::*;

/// Restricts `source` to the colors in `palette` using the given numeric dither mode code.
///
/// Mode `0` is [`DitherMode::NearestOnly`] and mode `1` is
/// [`DitherMode::FloydSteinbergDiffusion`].
///
/// # Errors
/// Returns [`QuantizeError::EmptyPalette`] if `palette` is empty or
/// [`QuantizeError::InvalidDitherMode`] if `mode` is not a recognized code.
/// Both are checked before any pixel is read.
///
/// # Examples
/// ```
/// # use palettefy::{palettefy, PixelSource, Rect, RgbBuffer, QuantizeError};
/// # use palette::Srgb;
/// # fn main() -> Result<(), QuantizeError> {
/// let image = RgbBuffer::from_pixels(Rect::from_dimensions(1, 1), vec![Srgb::new(10, 10, 10)])
///     .unwrap();
/// let palette = [Srgb::new(0, 0, 0), Srgb::new(255, 255, 255)];
///
/// let output = palettefy(&image, &palette, 0)?;
/// assert_eq!(output.at(0, 0), Srgb::new(0, 0, 0));
///
/// assert_eq!(palettefy(&image, &[], 0), Err(QuantizeError::EmptyPalette));
/// assert_eq!(palettefy(&image, &palette, 7), Err(QuantizeError::InvalidDitherMode(7)));
/// # Ok(())
/// # }
/// ```
pub fn palettefy(
    source: &(impl PixelSource + ?Sized),
    palette: &[Srgb<u8>],
    mode: u32,
) -> Result<RgbBuffer, QuantizeError> {
    let mode = DitherMode::from_code(mode)?;
    let palette = Palette::try_from(palette)?;
    Ok(quantize(source, &palette, mode))
}

/// Restricts `source` to the colors in `palette`, returning a new image with the same bounds.
#[must_use]
pub fn quantize(
    source: &(impl PixelSource + ?Sized),
    palette: &Palette,
    mode: DitherMode,
) -> RgbBuffer {
    let mut output = RgbBuffer::new(source.bounds());
    quantize_into(source, &mut output, palette, mode);
    output
}

/// Restricts `source` to the colors in `palette`, writing the result into `sink`.
///
/// `sink` must accept writes at every position within the bounds of `source`.
pub fn quantize_into(
    source: &(impl PixelSource + ?Sized),
    sink: &mut (impl PixelSink + ?Sized),
    palette: &Palette,
    mode: DitherMode,
) {
    let bounds = source.bounds();
    tracing::debug!(%bounds, colors = palette.len(), ?mode, "quantizing image");

    let index = PaletteIndex::from(palette);
    match mode {
        DitherMode::NearestOnly => {
            let (min_x, min_y) = bounds.min();
            let (max_x, max_y) = bounds.max();
            for y in min_y..max_y {
                for x in min_x..max_x {
                    sink.set(x, y, index.nearest(source.at(x, y)));
                }
            }
        }
        DitherMode::FloydSteinbergDiffusion => FloydSteinberg::new().dither(source, sink, &index),
    }
}

/// Restricts `source` to the colors in `palette` in parallel.
///
/// [`DitherMode::NearestOnly`] remaps rows in parallel.
/// [`DitherMode::FloydSteinbergDiffusion`] depends on the order pixels are visited in,
/// so it always runs on the current thread.
/// The result is identical to [`quantize`] for both modes.
#[cfg(feature = "threads")]
#[must_use]
pub fn quantize_par(
    source: &(impl PixelSource + Sync + ?Sized),
    palette: &Palette,
    mode: DitherMode,
) -> RgbBuffer {
    match mode {
        DitherMode::NearestOnly => {
            let bounds = source.bounds();
            tracing::debug!(%bounds, colors = palette.len(), ?mode, "quantizing image in parallel");

            let index = PaletteIndex::from(palette);
            let mut output = RgbBuffer::new(bounds);
            let (min_x, min_y) = bounds.min();
            let width = bounds.width as usize;

            if width > 0 {
                output
                    .pixels_mut()
                    .par_chunks_exact_mut(width)
                    .enumerate()
                    .for_each(|(i, row)| {
                        #[allow(clippy::cast_possible_truncation)]
                        let y = min_y + i as u32;
                        for (pixel, x) in row.iter_mut().zip(min_x..) {
                            *pixel = index.nearest(source.at(x, y));
                        }
                    });
            }

            output
        }
        DitherMode::FloydSteinbergDiffusion => quantize(source, palette, mode),
    }
}
