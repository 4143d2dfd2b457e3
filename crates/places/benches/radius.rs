//! Radius queries against the in-memory R-tree store.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tourism_geo::Coordinate;
use tourism_places::{Category, MemoryStore, Place, PlaceStore};

fn hanoi_grid(count: usize) -> MemoryStore {
    MemoryStore::from_places((0..count).map(|i| {
        let lat = 20.90 + (i as f64 * 0.000_37) % 0.25;
        let lng = 105.70 + (i as f64 * 0.000_53) % 0.25;
        let place = Place::new(format!("place-{i}").as_str(), format!("Place {i}"), Category::Cuisine);
        if i % 3 == 0 {
            place.with_legacy(lat, lng)
        } else {
            place.with_point(lat, lng)
        }
    }))
}

fn bench_find_within_radius(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let center = Coordinate::new(21.0278, 105.8342);

    let mut group = c.benchmark_group("find_within_radius");
    for size in [1_000, 10_000, 100_000] {
        let store = hanoi_grid(size);
        for radius_km in [1.0, 5.0] {
            group.bench_with_input(
                BenchmarkId::new(format!("{radius_km}km"), size),
                &store,
                |b, store| {
                    b.iter(|| {
                        runtime.block_on(store.find_within_radius(
                            Category::Cuisine,
                            black_box(center),
                            black_box(radius_km),
                        ))
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_index_build(c: &mut Criterion) {
    c.bench_function("index_build_10k", |b| b.iter(|| hanoi_grid(black_box(10_000))));
}

criterion_group!(benches, bench_find_within_radius, bench_index_build);
criterion_main!(benches);
