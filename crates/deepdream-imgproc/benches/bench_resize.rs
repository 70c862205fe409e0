use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use deepdream_image::{Image, ImageSize};
use deepdream_imgproc::{resize::resize_bilinear, roll::roll};

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("Resize");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let image_size = ImageSize {
            width: *width,
            height: *height,
        };
        let image = Image::<f32, 3>::from_size_fn(image_size, |[y, x, c]| (y + x + c) as f32);

        // one octave down with the default scale of 1.4
        let small_size = ImageSize {
            width: (*width as f32 / 1.4) as usize,
            height: (*height as f32 / 1.4) as usize,
        };
        let small = Image::<f32, 3>::from_size_val(small_size, 0.0).unwrap();

        group.bench_with_input(
            BenchmarkId::new("resize_bilinear_down", &parameter_string),
            &(&image, &small),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                b.iter(|| {
                    black_box(resize_bilinear(src, &mut dst)).unwrap();
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("roll", &parameter_string),
            &(&image, &image),
            |b, i| {
                let (src, mut dst) = (i.0, i.1.clone());
                b.iter(|| {
                    black_box(roll(src, &mut dst, 37, 101)).unwrap();
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_resize);
criterion_main!(benches);
