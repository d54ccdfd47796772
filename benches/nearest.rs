mod util;

use util::{benchmark_images, uniform_palette};

use std::time::Duration;

use criterion::{
    criterion_group, criterion_main, measurement::WallTime, Bencher, BenchmarkId, Criterion,
    SamplingMode,
};
use palettefy::{quantize, quantize_par, DitherMode, Palette, RgbBuffer};

fn bench(
    c: &mut Criterion,
    group: &str,
    images: &[(String, RgbBuffer)],
    mut f: impl FnMut(&mut Bencher<WallTime>, &(&Palette, &RgbBuffer)),
) {
    let mut group = c.benchmark_group(group);
    group
        .sample_size(30)
        .noise_threshold(0.05)
        .sampling_mode(SamplingMode::Flat)
        .warm_up_time(Duration::from_secs(2));

    for k in [64, 16, 2] {
        let palette = uniform_palette(k);
        for (name, image) in images {
            group.bench_with_input(
                BenchmarkId::new(k.to_string(), name),
                &(&palette, image),
                &mut f,
            );
        }
    }
}

fn nearest_single(c: &mut Criterion) {
    bench(c, "nearest_single", &benchmark_images(), |b, &(palette, image)| {
        b.iter(|| quantize(image, palette, DitherMode::NearestOnly))
    })
}

fn nearest_par(c: &mut Criterion) {
    bench(c, "nearest_par", &benchmark_images(), |b, &(palette, image)| {
        b.iter(|| quantize_par(image, palette, DitherMode::NearestOnly))
    })
}

criterion_group!(benches, nearest_single, nearest_par);
criterion_main!(benches);
