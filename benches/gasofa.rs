use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gasofa::{distance_km, parse_row, Coordinate};

fn bench_station_scan(c: &mut Criterion) {
    let madrid = Coordinate::new(40.4168, -3.7038).unwrap();
    let barcelona = Coordinate::new(41.3874, 2.1686).unwrap();
    let row = ["-3.7038", "40.4168", "REPSOL C/ ALCALA 123 L-D: 24H  1,459"];

    c.bench_function("distance_km", |b| {
        b.iter(|| distance_km(black_box(madrid), black_box(barcelona)))
    });
    c.bench_function("parse_row", |b| b.iter(|| parse_row(black_box(&row[..]))));
}

criterion_group!(benches, bench_station_scan);
criterion_main!(benches);
