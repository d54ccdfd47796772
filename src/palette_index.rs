//! Contains the [`PaletteIndex`] used for nearest palette color lookups.

use crate::{Lab, Palette, QuantizeError};
use palette::Srgb;

/// Finds the perceptually closest palette color for a given color.
///
/// Each palette color is converted to [`Lab`] once when the [`PaletteIndex`] is created,
/// and every query performs a linear scan over these cached colors using the squared
/// CIE76 color difference. If multiple palette colors are equally close,
/// the one appearing first in the palette is chosen.
///
/// # Examples
/// ```
/// # use palettefy::{PaletteIndex, QuantizeError};
/// # use palette::Srgb;
/// # fn main() -> Result<(), QuantizeError> {
/// let palette = [Srgb::new(0, 0, 0), Srgb::new(255, 255, 255)];
/// let index = PaletteIndex::new(&palette)?;
///
/// assert_eq!(index.nearest_index(Srgb::new(10, 10, 10)), 0);
/// assert_eq!(index.nearest(Srgb::new(200, 200, 200)), Srgb::new(255, 255, 255));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PaletteIndex<'a> {
    /// The palette colors in their original order.
    palette: &'a [Srgb<u8>],
    /// The palette colors converted to [`Lab`], in the same order as `palette`.
    lab: Vec<Lab>,
}

impl<'a> PaletteIndex<'a> {
    /// Creates a new [`PaletteIndex`] for the given palette colors.
    ///
    /// Returns [`QuantizeError::EmptyPalette`] if `palette` is empty.
    pub fn new(palette: &'a [Srgb<u8>]) -> Result<Self, QuantizeError> {
        if palette.is_empty() {
            Err(QuantizeError::EmptyPalette)
        } else {
            Ok(Self::new_unchecked(palette))
        }
    }

    /// Creates a new [`PaletteIndex`] without checking that `palette` is non-empty.
    fn new_unchecked(palette: &'a [Srgb<u8>]) -> Self {
        let lab = palette.iter().copied().map(Lab::from_srgb).collect();
        Self { palette, lab }
    }

    /// The palette colors.
    #[must_use]
    pub fn palette(&self) -> &'a [Srgb<u8>] {
        self.palette
    }

    /// The palette colors converted to [`Lab`].
    #[must_use]
    pub fn lab_palette(&self) -> &[Lab] {
        &self.lab
    }

    /// Returns the index of the palette color closest to `color`.
    #[must_use]
    pub fn nearest_index(&self, color: Srgb<u8>) -> usize {
        self.nearest_index_lab(Lab::from_srgb(color))
    }

    /// Returns the index of the palette color closest to the given [`Lab`] color.
    #[must_use]
    pub fn nearest_index_lab(&self, color: Lab) -> usize {
        let mut min_index = 0;
        let mut min_distance = f64::INFINITY;
        for (i, &candidate) in self.lab.iter().enumerate() {
            let distance = color.distance_squared(candidate);
            if distance < min_distance {
                min_distance = distance;
                min_index = i;
            }
        }
        min_index
    }

    /// Returns the palette color closest to `color`.
    #[must_use]
    pub fn nearest(&self, color: Srgb<u8>) -> Srgb<u8> {
        self.palette[self.nearest_index(color)]
    }
}

impl<'a> From<&'a Palette> for PaletteIndex<'a> {
    fn from(palette: &'a Palette) -> Self {
        Self::new_unchecked(palette)
    }
}
