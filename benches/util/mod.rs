#![allow(dead_code)]

use palette::Srgb;
use palettefy::{Palette, Rect, RgbBuffer};

/// A smooth hue and lightness gradient, the worst case for banding.
pub fn gradient_image(width: u32, height: u32) -> RgbBuffer {
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            #[allow(clippy::cast_possible_truncation)]
            pixels.push(Srgb::new(
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                ((x + y) * 255 / (width + height).max(1)) as u8,
            ));
        }
    }
    RgbBuffer::from_pixels(Rect::from_dimensions(width, height), pixels).unwrap()
}

/// An evenly spaced palette of (about) `k` colors.
pub fn uniform_palette(k: u32) -> Palette {
    let steps = (1..=k).find(|s| s * s * s >= k).unwrap();
    let level = |i: u32| (i * 255 / (steps - 1).max(1)) as u8;

    let colors = (0..steps)
        .flat_map(|r| (0..steps).flat_map(move |g| (0..steps).map(move |b| (r, g, b))))
        .map(|(r, g, b)| Srgb::new(level(r), level(g), level(b)))
        .take(k as usize)
        .collect();

    Palette::new(colors).unwrap()
}

pub fn benchmark_images() -> Vec<(String, RgbBuffer)> {
    [(256, 256), (1024, 768)]
        .into_iter()
        .map(|(w, h)| (format!("{w}x{h}"), gradient_image(w, h)))
        .collect()
}
