//! Скорость чтения и записи изображений IBW.
//!
//! Запуск:
//!   cargo bench -p ibw-benchmark

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ibw_core::{decode, encode, probe, Axis, Endian, ExportChannel, ExportConfig, Image};

/// Синтетическое изображение `res × res`.
fn test_image(res: usize) -> Image {
    Image {
        x: Axis::new(res, 10e-6, "m"),
        y: Axis::new(res, 10e-6, "m"),
        z_unit: "m".to_string(),
        data: (0..res * res).map(|i| (i as f64 * 1e-3).sin() * 1e-9).collect(),
        imaginary: None,
    }
}

fn encoded(
    res: usize,
    channels: usize,
    endian: Endian,
) -> Vec<u8> {
    let image = test_image(res);
    let list: Vec<_> = (0..channels)
        .map(|_| ExportChannel {
            title: "HeightTrace",
            image: &image,
        })
        .collect();
    encode(&list, &ExportConfig::new(endian)).expect("encode")
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for res in [64, 256, 1024] {
        for endian in [Endian::Little, Endian::Big] {
            let buf = encoded(res, 4, endian);
            group.throughput(Throughput::Bytes(buf.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("4ch_{endian}"), res),
                &buf,
                |b, buf| b.iter(|| decode(black_box(buf)).expect("decode")),
            );
        }
    }

    group.finish();
}

fn bench_probe(c: &mut Criterion) {
    let buf = encoded(64, 1, Endian::Little);
    c.bench_function("probe", |b| b.iter(|| probe(black_box(&buf))));
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for res in [64, 256, 1024] {
        let image = test_image(res);
        let channels = [ExportChannel {
            title: "HeightTrace",
            image: &image,
        }];
        let config = ExportConfig::default();

        group.throughput(Throughput::Elements((res * res) as u64));
        group.bench_with_input(BenchmarkId::new("1ch", res), &res, |b, _| {
            b.iter(|| encode(black_box(&channels), &config).expect("encode"))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode, bench_probe, bench_encode);
criterion_main!(benches);
