//! Conversion from sRGB to the CIELAB color space.
//!
//! Only the forward direction is provided. Nearest color matching never needs to map a
//! [`Lab`] color back to RGB, so [`TryFrom<Lab>`] for [`Srgb<u8>`] always fails with
//! [`QuantizeError::UnsupportedInverseConversion`].

use crate::QuantizeError;
use palette::Srgb;

/// The threshold below which the sRGB transfer function is linear.
const SRGB_LINEAR_THRESHOLD: f64 = 0.04045;

/// The linear-to-XYZ matrix for sRGB primaries under the D65 illuminant.
const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124, 0.3576, 0.1805],
    [0.2126, 0.7152, 0.0722],
    [0.0193, 0.1192, 0.9505],
];

/// The D65 reference white, `X` component.
const WHITE_X: f64 = 0.9505;

/// The D65 reference white, `Z` component.
const WHITE_Z: f64 = 1.0890;

/// `δ` in the CIELAB response function.
const DELTA: f64 = 6.0 / 29.0;

/// A color in the CIELAB color space (D65 white point).
///
/// `l` is nominally in `0.0..=100.0`, while `a` and `b` are roughly in `-100.0..=100.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    /// Lightness.
    pub l: f64,
    /// The green-red axis.
    pub a: f64,
    /// The blue-yellow axis.
    pub b: f64,
}

impl Lab {
    /// Converts an 8-bit sRGB color to CIELAB.
    #[must_use]
    pub fn from_srgb(color: Srgb<u8>) -> Self {
        let Srgb { red, green, blue, .. } = color.into_format::<f64>();
        let (r, g, b) = (linearize(red), linearize(green), linearize(blue));
        let [x, y, z] = RGB_TO_XYZ.map(|row| row[0] * r + row[1] * g + row[2] * b);

        let fx = lab_f(x / WHITE_X);
        let fy = lab_f(y);
        let fz = lab_f(z / WHITE_Z);

        Self {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    /// Returns the components as an `[l, a, b]` array.
    #[must_use]
    pub const fn into_array(self) -> [f64; 3] {
        [self.l, self.a, self.b]
    }

    /// The squared CIE76 color difference between two colors.
    ///
    /// The square root is omitted, since only the relative order of distances matters
    /// for nearest neighbor searches.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        squared_euclidean_distance(self.into_array(), other.into_array())
    }
}

impl From<Srgb<u8>> for Lab {
    fn from(color: Srgb<u8>) -> Self {
        Self::from_srgb(color)
    }
}

impl TryFrom<Lab> for Srgb<u8> {
    type Error = QuantizeError;

    fn try_from(_: Lab) -> Result<Self, Self::Error> {
        Err(QuantizeError::UnsupportedInverseConversion)
    }
}

/// The inverse sRGB transfer function for a single component in `0.0..=1.0`.
#[inline]
pub fn linearize(c: f64) -> f64 {
    if c <= SRGB_LINEAR_THRESHOLD {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// The CIELAB response function: a cube root with a linear segment near zero.
#[inline]
fn lab_f(t: f64) -> f64 {
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

/// Squared euclidean distance between two points.
#[inline]
fn squared_euclidean_distance<const N: usize>(x: [f64; N], y: [f64; N]) -> f64 {
    let mut dist = 0.0;
    for c in 0..N {
        let d = x[c] - y[c];
        dist += d * d;
    }
    dist
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    const EPSILON: f64 = 1e-6;

    fn assert_lab_near(actual: Lab, expected: [f64; 3]) {
        for (a, e) in actual.into_array().into_iter().zip(expected) {
            assert!((a - e).abs() < EPSILON, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn black_is_origin() {
        assert_eq!(Lab::from_srgb(Srgb::new(0, 0, 0)), Lab::default());
    }

    #[test]
    fn white_is_full_lightness() {
        assert_lab_near(Lab::from_srgb(Srgb::new(255, 255, 255)), [100.0, 0.0, 0.0]);
    }

    #[test]
    fn known_colors() {
        assert_lab_near(Lab::from_srgb(Srgb::new(128, 128, 128)), [53.585_013, 0.0, 0.0]);
        assert!((Lab::from_srgb(Srgb::new(255, 0, 0)).l - 53.232_882).abs() < EPSILON);
        assert!((Lab::from_srgb(Srgb::new(255, 0, 0)).a - 80.105_327).abs() < EPSILON);
        assert!((Lab::from_srgb(Srgb::new(255, 0, 0)).b - 67.222_782).abs() < EPSILON);
    }

    #[test]
    fn grays_are_achromatic_and_monotonic() {
        let mut prev = -1.0;
        for v in 0..=u8::MAX {
            let lab = Lab::from_srgb(Srgb::new(v, v, v));
            assert!(lab.a.abs() < 1e-9 && lab.b.abs() < 1e-9, "{v}: {lab:?}");
            assert!(lab.l > prev);
            prev = lab.l;
        }
    }

    #[test]
    fn response_function_is_continuous() {
        let knee = DELTA * DELTA * DELTA;
        assert!((lab_f(knee) - knee.cbrt()).abs() < 1e-12);
        assert!((lab_f(knee) - DELTA).abs() < 1e-12);
    }

    #[test]
    fn components_are_finite_and_bounded() {
        for color in test_data_1024() {
            let lab = Lab::from_srgb(color);
            assert!((0.0..=100.0 + EPSILON).contains(&lab.l), "{color:?}: {lab:?}");
            assert!(lab.a.is_finite() && lab.b.is_finite());
        }
    }

    #[test]
    fn inverse_conversion_is_unsupported() {
        let lab = Lab::from_srgb(Srgb::new(12, 34, 56));
        assert_eq!(
            Srgb::<u8>::try_from(lab),
            Err(QuantizeError::UnsupportedInverseConversion)
        );
        assert_eq!(
            Srgb::<u8>::try_from(Lab::default()),
            Err(QuantizeError::UnsupportedInverseConversion)
        );
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn distance_is_symmetric() {
        let x = Lab::from_srgb(Srgb::new(200, 10, 40));
        let y = Lab::from_srgb(Srgb::new(10, 200, 40));
        assert_eq!(x.distance_squared(y), y.distance_squared(x));
        assert_eq!(x.distance_squared(x), 0.0);
    }
}
