use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use xplane_ap::protocol::{decode_samples, encode_command, encode_direct_write, encode_subscribe};
use xplane_ap::{Field, SubscriptionRegistry, TelemetryStore};

fn response(records: usize) -> Vec<u8> {
    let mut bytes = b"RREF,".to_vec();
    for i in 0..records {
        let index = i32::try_from(i % 10).unwrap() + 1;
        bytes.extend_from_slice(&index.to_le_bytes());
        bytes.extend_from_slice(&(f32::from(u16::try_from(i).unwrap()) * 0.5).to_le_bytes());
    }
    bytes
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    group.bench_function("encode_command", |b| {
        b.iter(|| black_box(encode_command(black_box("sim/autopilot/heading"))));
    });

    group.throughput(Throughput::Bytes(509));
    group.bench_function("encode_direct_write", |b| {
        b.iter(|| {
            black_box(encode_direct_write(black_box(Field::TargetHeading.dataref()), 270.0).unwrap())
        });
    });

    group.throughput(Throughput::Bytes(413));
    group.bench_function("encode_subscribe", |b| {
        b.iter(|| {
            black_box(encode_subscribe(15, black_box(Field::AltitudeDial.dataref()), 8).unwrap())
        });
    });

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    // Full standard catalogue in one datagram
    let standard = response(10);
    group.throughput(Throughput::Bytes(standard.len() as u64));
    group.bench_function("decode_10_samples", |b| {
        b.iter(|| black_box(decode_samples(black_box(&standard)).count()));
    });

    let batched = response(250);
    group.throughput(Throughput::Bytes(batched.len() as u64));
    group.bench_function("decode_250_samples", |b| {
        b.iter(|| black_box(decode_samples(black_box(&batched)).count()));
    });

    group.finish();
}

fn bench_apply(c: &mut Criterion) {
    let registry = SubscriptionRegistry::default();
    let datagram = response(10);

    c.bench_function("store_apply_datagram", |b| {
        let mut store = TelemetryStore::default();
        b.iter(|| {
            for sample in decode_samples(&datagram) {
                if registry.contains(sample.index) {
                    black_box(store.apply_sample(sample));
                }
            }
        });
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_apply);
criterion_main!(benches);
