//! Contains various types needed across the crate.

use palette::Srgb;
use std::{
    error::Error,
    fmt::{self, Display},
    ops::Deref,
};

/// The error type for quantization and color conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantizeError {
    /// The palette contained no colors.
    EmptyPalette,
    /// The given dither mode code is not one of the recognized codes.
    ///
    /// The inner value is the unrecognized code.
    InvalidDitherMode(u32),
    /// A [`Lab`](crate::Lab) color was converted back to RGB, which is not supported.
    UnsupportedInverseConversion,
}

impl Display for QuantizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantizeError::EmptyPalette => write!(f, "palette must contain at least one color"),
            QuantizeError::InvalidDitherMode(code) => {
                write!(f, "unrecognized dither mode {code} (expected 0 or 1)")
            }
            QuantizeError::UnsupportedInverseConversion => {
                write!(f, "conversion from CIELAB back to RGB is not supported")
            }
        }
    }
}

impl Error for QuantizeError {}

/// A rectangular region of pixels.
///
/// `x` and `y` give the top-left corner and may be non-zero,
/// for example when quantizing a sub-image.
/// `x + width` and `y + height` must not exceed `u32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// The x coordinate of the left column.
    pub x: u32,
    /// The y coordinate of the top row.
    pub y: u32,
    /// The number of columns.
    pub width: u32,
    /// The number of rows.
    pub height: u32,
}

impl Rect {
    /// Creates a new [`Rect`] with its top-left corner at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the bottom-right corner does not fit in a `u32`.
    /// See [`Rect::checked_new`] for a non-panicking version.
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        match Self::checked_new(x, y, width, height) {
            Some(rect) => rect,
            None => panic!("rect extends past u32::MAX"),
        }
    }

    /// Creates a new [`Rect`] with its top-left corner at `(x, y)`,
    /// or returns `None` if the bottom-right corner does not fit in a `u32`.
    #[must_use]
    pub const fn checked_new(x: u32, y: u32, width: u32, height: u32) -> Option<Self> {
        if x.checked_add(width).is_some() && y.checked_add(height).is_some() {
            Some(Self { x, y, width, height })
        } else {
            None
        }
    }

    /// Creates a new [`Rect`] with its top-left corner at the origin.
    #[must_use]
    pub const fn from_dimensions(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// The (inclusive) top-left corner.
    #[must_use]
    pub const fn min(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    /// The (exclusive) bottom-right corner.
    #[must_use]
    pub const fn max(&self) -> (u32, u32) {
        (self.x + self.width, self.y + self.height)
    }

    /// The number of pixels in the region.
    #[must_use]
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether the region contains no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the absolute position `(x, y)` lies inside the region.
    #[must_use]
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        let (max_x, max_y) = self.max();
        self.x <= x && x < max_x && self.y <= y && y < max_y
    }
}

impl Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// A fixed, ordered list of colors that quantized images are restricted to.
///
/// A [`Palette`] always contains at least one color and cannot be modified after construction.
///
/// # Examples
/// Use `try_into` or [`Palette::new`] to create [`Palette`]s.
/// ```
/// # use palettefy::{Palette, QuantizeError};
/// # use palette::Srgb;
/// # fn main() -> Result<(), QuantizeError> {
/// let gameboy: Palette = vec![
///     Srgb::new(0x0f, 0x38, 0x0f),
///     Srgb::new(0x30, 0x62, 0x30),
///     Srgb::new(0x8b, 0xac, 0x0f),
///     Srgb::new(0x9b, 0xbc, 0x0f),
/// ]
/// .try_into()?;
///
/// assert_eq!(gameboy.len(), 4);
/// assert!(Palette::new(Vec::new()).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette(Box<[Srgb<u8>]>);

impl Palette {
    /// Creates a new [`Palette`], returning [`QuantizeError::EmptyPalette`] if `colors` is empty.
    pub fn new(colors: Vec<Srgb<u8>>) -> Result<Self, QuantizeError> {
        if colors.is_empty() {
            Err(QuantizeError::EmptyPalette)
        } else {
            Ok(Self(colors.into_boxed_slice()))
        }
    }

    /// Returns the palette colors as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Srgb<u8>] {
        &self.0
    }
}

impl AsRef<[Srgb<u8>]> for Palette {
    fn as_ref(&self) -> &[Srgb<u8>] {
        self
    }
}

impl Deref for Palette {
    type Target = [Srgb<u8>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<Vec<Srgb<u8>>> for Palette {
    type Error = QuantizeError;

    fn try_from(colors: Vec<Srgb<u8>>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

impl TryFrom<&[Srgb<u8>]> for Palette {
    type Error = QuantizeError;

    fn try_from(colors: &[Srgb<u8>]) -> Result<Self, Self::Error> {
        Self::new(colors.to_vec())
    }
}

impl From<Palette> for Vec<Srgb<u8>> {
    fn from(palette: Palette) -> Self {
        palette.0.into_vec()
    }
}
