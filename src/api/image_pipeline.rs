//! Contains the [`ImagePipeline`] builder struct for the high level API.

use crate::{quantize, DitherMode, Palette, PixelSource, RgbBuffer};
#[cfg(feature = "threads")]
use crate::quantize_par;
#[cfg(feature = "image")]
use image::RgbImage;

/// A builder struct to specify options to restrict an image to a palette.
///
/// # Examples
/// To start, create a [`ImagePipeline`] from any [`PixelSource`] and a [`Palette`]
/// (an [`RgbImage`] is used here, which needs the `image` feature):
/// ```no_run
/// # use palettefy::{ImagePipeline, parse::parse_palette};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let img = image::open("some image")?.into_rgb8();
/// let palette = parse_palette("#0f380f, #306230, #8bac0f, #9bbc0f")?;
/// let mut pipeline = ImagePipeline::new(&img, &palette);
/// # Ok(())
/// # }
/// ```
///
/// Then, choose whether to dither the image:
/// ```
/// # use palettefy::{ImagePipeline, DitherMode, Palette, Rect, RgbBuffer, QuantizeError};
/// # use palette::Srgb;
/// # fn main() -> Result<(), QuantizeError> {
/// # let img = RgbBuffer::new(Rect::from_dimensions(2, 2));
/// # let palette = Palette::new(vec![Srgb::new(0, 0, 0)])?;
/// let mut pipeline = ImagePipeline::new(&img, &palette);
/// pipeline.dither(true);
/// // or, equivalently
/// pipeline.dither_mode(DitherMode::FloydSteinbergDiffusion);
/// // or, from a numeric mode code
/// pipeline.dither_code(1)?;
/// # Ok(())
/// # }
/// ```
///
/// Finally, run the pipeline:
/// ```no_run
/// # use palettefy::{ImagePipeline, Palette, Rect, RgbBuffer, QuantizeError};
/// # use palette::Srgb;
/// # fn main() -> Result<(), QuantizeError> {
/// # let img = RgbBuffer::new(Rect::from_dimensions(2, 2));
/// # let palette = Palette::new(vec![Srgb::new(0, 0, 0)])?;
/// # let pipeline = ImagePipeline::new(&img, &palette);
/// let buffer = pipeline.quantized_buffer();
/// let image = pipeline.quantized_rgbimage();
/// # Ok(())
/// # }
/// ```
///
/// Or, in parallel across multiple threads (needs the `threads` feature):
/// ```no_run
/// # use palettefy::{ImagePipeline, Palette, Rect, RgbBuffer, QuantizeError};
/// # use palette::Srgb;
/// # fn main() -> Result<(), QuantizeError> {
/// # let img = RgbBuffer::new(Rect::from_dimensions(2, 2));
/// # let palette = Palette::new(vec![Srgb::new(0, 0, 0)])?;
/// # let pipeline = ImagePipeline::new(&img, &palette);
/// let image = pipeline.quantized_rgbimage_par();
/// # Ok(())
/// # }
/// ```
#[must_use]
#[derive(Debug)]
pub struct ImagePipeline<'a, Source: ?Sized> {
    /// The input image.
    pub(crate) source: &'a Source,
    /// The palette to restrict the image to.
    pub(crate) palette: &'a Palette,
    /// The dither mode to use.
    pub(crate) mode: DitherMode,
}

impl<'a, Source: ?Sized> Clone for ImagePipeline<'a, Source> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, Source: ?Sized> Copy for ImagePipeline<'a, Source> {}

impl<'a, Source: PixelSource + ?Sized> ImagePipeline<'a, Source> {
    /// Creates a new [`ImagePipeline`] with default options.
    pub fn new(source: &'a Source, palette: &'a Palette) -> Self {
        Self {
            source,
            palette,
            mode: DitherMode::default(),
        }
    }

    /// Sets whether or not to apply dithering to the image.
    ///
    /// The current implementation uses Floyd–Steinberg dithering.
    ///
    /// The default value is `false`.
    pub fn dither(&mut self, dither: bool) -> &mut Self {
        self.mode = if dither {
            DitherMode::FloydSteinbergDiffusion
        } else {
            DitherMode::NearestOnly
        };
        self
    }

    /// Sets the dither mode.
    ///
    /// The default mode is [`DitherMode::NearestOnly`].
    pub fn dither_mode(&mut self, mode: DitherMode) -> &mut Self {
        self.mode = mode;
        self
    }

    /// Sets the dither mode from its numeric code (see [`DitherMode::from_code`]).
    ///
    /// # Errors
    /// Returns [`QuantizeError::InvalidDitherMode`](crate::QuantizeError::InvalidDitherMode)
    /// and leaves the current mode unchanged if `code` is not recognized.
    pub fn dither_code(&mut self, code: u32) -> Result<&mut Self, crate::QuantizeError> {
        self.mode = DitherMode::from_code(code)?;
        Ok(self)
    }

    /// Runs the pipeline and returns the quantized image.
    #[must_use]
    pub fn quantized_buffer(&self) -> RgbBuffer {
        quantize(self.source, self.palette, self.mode)
    }
}

#[cfg(feature = "image")]
impl<'a, Source: PixelSource + ?Sized> ImagePipeline<'a, Source> {
    /// Runs the pipeline and returns the quantized image as an [`RgbImage`].
    #[must_use]
    pub fn quantized_rgbimage(&self) -> RgbImage {
        self.quantized_buffer().into()
    }
}

#[cfg(feature = "threads")]
impl<'a, Source: PixelSource + Sync + ?Sized> ImagePipeline<'a, Source> {
    /// Runs the pipeline in parallel and returns the quantized image.
    #[must_use]
    pub fn quantized_buffer_par(&self) -> RgbBuffer {
        quantize_par(self.source, self.palette, self.mode)
    }
}

#[cfg(all(feature = "threads", feature = "image"))]
impl<'a, Source: PixelSource + Sync + ?Sized> ImagePipeline<'a, Source> {
    /// Runs the pipeline in parallel and returns the quantized image as an [`RgbImage`].
    #[must_use]
    pub fn quantized_rgbimage_par(&self) -> RgbImage {
        self.quantized_buffer_par().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{tests::*, QuantizeError, Rect};
    use palette::Srgb;

    #[test]
    fn options() {
        let img = RgbBuffer::new(Rect::from_dimensions(2, 2));
        let palette = Palette::new(vec![Srgb::new(0, 0, 0)]).unwrap();
        let mut pipeline = ImagePipeline::new(&img, &palette);
        assert_eq!(pipeline.mode, DitherMode::NearestOnly);

        pipeline.dither(true);
        assert_eq!(pipeline.mode, DitherMode::FloydSteinbergDiffusion);

        pipeline.dither_code(0).unwrap();
        assert_eq!(pipeline.mode, DitherMode::NearestOnly);

        assert_eq!(pipeline.dither_code(3).unwrap_err(), QuantizeError::InvalidDitherMode(3));
        assert_eq!(pipeline.mode, DitherMode::NearestOnly);
    }

    #[test]
    fn runs_match_free_functions() {
        let colors = test_data_1024();
        let img = RgbBuffer::from_pixels(Rect::from_dimensions(32, 32), colors).unwrap();
        let palette = Palette::new(test_data_256()[..12].to_vec()).unwrap();

        for dither in [false, true] {
            let mut pipeline = ImagePipeline::new(&img, &palette);
            pipeline.dither(dither);
            let expected = quantize(&img, &palette, pipeline.mode);
            assert_eq!(pipeline.quantized_buffer(), expected);

            #[cfg(feature = "threads")]
            assert_eq!(pipeline.quantized_buffer_par(), expected);

            #[cfg(feature = "image")]
            assert_eq!(pipeline.quantized_rgbimage(), RgbImage::from(expected));
        }
    }
}
