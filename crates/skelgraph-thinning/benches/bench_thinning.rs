use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skelgraph_image::{Image, ImageSize};
use skelgraph_thinning::{graph_based_thinning, zhang_suen_thinning, ThinningConfig};

// a filled disc with some noise on its rim, roughly like a thick stroke
fn create_blob_image(width: usize, height: usize) -> Image<u8, 1> {
    let mut rng = StdRng::seed_from_u64(42);
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    let radius = width.min(height) as f32 / 3.0;
    let data = (0..width * height)
        .map(|i| {
            let (x, y) = ((i % width) as f32, (i / width) as f32);
            let d = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
            let noise: f32 = rng.random_range(-1.5..1.5);
            u8::from(d + noise < radius)
        })
        .collect();
    Image::new(ImageSize { width, height }, data).unwrap()
}

fn bench_thinning(c: &mut Criterion) {
    let mut group = c.benchmark_group("Thinning");

    for (w, h) in [(28, 28), (64, 64), (128, 128)].iter() {
        let src = create_blob_image(*w, *h);
        let config = ThinningConfig::default();

        group.bench_with_input(
            BenchmarkId::new("graph_based", format!("{}x{}", w, h)),
            &src,
            |b, src| {
                let mut dst = Image::from_size_val(src.size(), 0).unwrap();
                b.iter(|| {
                    graph_based_thinning(src, &mut dst, &config).unwrap();
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("zhang_suen", format!("{}x{}", w, h)),
            &src,
            |b, src| {
                let mut dst = Image::from_size_val(src.size(), 0).unwrap();
                b.iter(|| {
                    zhang_suen_thinning(src, &mut dst).unwrap();
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_thinning);
criterion_main!(benches);
