use criterion::{BenchmarkId, Criterion, SamplingMode, criterion_group, criterion_main};
use palettize::{ImageBuf, Pipeline};
use palettize::deps::palette::Srgba;
use std::time::Duration;

/// A synthetic gradient with a handful of dominant bands, so clustering sees
/// both merges and new clusters.
fn gradient_image(width: u32, height: u32) -> ImageBuf {
    let pixels = (0..width * height)
        .map(|i| {
            let x = i % width;
            let y = i / width;
            Srgba::new(
                (x * 255 / width) as u8,
                (y * 255 / height) as u8,
                ((x / 32 + y / 32) * 48 % 256) as u8,
                255,
            )
        })
        .collect();
    ImageBuf::new(width, height, pixels).unwrap()
}

fn bench_sizes(c: &mut Criterion, group: &str, f: impl Fn(&mut criterion::Bencher<'_>, &ImageBuf)) {
    let mut group = c.benchmark_group(group);
    group
        .sample_size(30)
        .noise_threshold(0.05)
        .sampling_mode(SamplingMode::Flat)
        .warm_up_time(Duration::from_millis(500))
        .measurement_time(Duration::from_secs(2));

    for side in [128u32, 512, 1024] {
        let image = gradient_image(side, side);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{side}x{side}")),
            &image,
            |b, image| f(b, image),
        );
    }
}

fn build_palette(c: &mut Criterion) {
    bench_sizes(c, "build_palette", |b, image| {
        b.iter(|| Pipeline::new().build_palette(image.as_ref()))
    });
}

fn recolor(c: &mut Criterion) {
    bench_sizes(c, "recolor", |b, image| {
        let pipeline = Pipeline::new();
        let palette = pipeline.build_palette(image.as_ref());
        b.iter(|| pipeline.recolor(image.as_ref(), &palette).unwrap())
    });
}

criterion_group!(benches, build_palette, recolor);
criterion_main!(benches);
