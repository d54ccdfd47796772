mod util;

use util::{benchmark_images, uniform_palette};

use std::time::Duration;

use criterion::{
    criterion_group, criterion_main, measurement::WallTime, Bencher, BenchmarkId, Criterion,
    SamplingMode,
};
use palettefy::{FloydSteinberg, Palette, PaletteIndex, PixelSource, RgbBuffer};

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

fn dither_single(c: &mut Criterion) {
    bench(c, "dither_single", &benchmark_images(), |b, &(palette, image)| {
        let index = PaletteIndex::from(palette);
        b.iter(|| {
            let mut output = RgbBuffer::new(image.bounds());
            FloydSteinberg::new().dither(image, &mut output, &index);
            output
        })
    })
}

criterion_group!(benches, dither_single);
criterion_main!(benches);
