use criterion::{black_box, criterion_group, criterion_main, Criterion};
use magic_contour::{find_contours, find_contours_parallel};
use magic_core::BinaryImage;

fn ring_image(size: u32, inner: i32, outer: i32) -> BinaryImage {
    let mut img = BinaryImage::new(size, size);
    let c = (size / 2) as i32;
    for y in 0..size as i32 {
        for x in 0..size as i32 {
            let d2 = (x - c) * (x - c) + (y - c) * (y - c);
            if d2 <= outer * outer && d2 >= inner * inner {
                img.set_foreground(x, y, true);
            }
        }
    }
    img
}

fn bench_sequential(c: &mut Criterion) {
    let img = ring_image(512, 150, 200);
    c.bench_function("find_contours_sequential_512", |b| {
        b.iter(|| find_contours(black_box(&img), 10.0))
    });
}

fn bench_parallel(c: &mut Criterion) {
    let img = ring_image(512, 150, 200);
    c.bench_function("find_contours_parallel_512_4strips", |b| {
        b.iter(|| find_contours_parallel(black_box(&img), 10.0, 4))
    });
}

criterion_group!(benches, bench_sequential, bench_parallel);
criterion_main!(benches);
