use std::hint::black_box;

use criterion::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sectorgen_core::prelude::*;

const UNIVERSE_JSON: &str = include_str!("../../../data/universe.json");

fn context() -> WorldContext {
    WorldContext::from_json(UNIVERSE_JSON).expect("bundled universe.json parses")
}

fn generation_benchmark(c: &mut Criterion) {
    let ctx = context();
    let mut group = c.benchmark_group("generation");

    for id in ["sol", "kepler", "tau"] {
        let info = ctx
            .topology
            .sector(&SectorId::from(id))
            .cloned()
            .expect("sector exists in bundled topology");

        group.bench_function(format!("generate_{}", id), |b| {
            b.iter(|| {
                let mut sector = Sector::new(info.clone());
                sector.generate(&ctx);
                black_box(sector.entities().len())
            })
        });
    }

    group.finish();
}

fn query_benchmark(c: &mut Criterion) {
    let ctx = context();
    let info = ctx
        .topology
        .sector(&SectorId::from("tau"))
        .cloned()
        .expect("sector exists in bundled topology");
    let mut sector = Sector::new(info);
    sector.generate(&ctx);

    let mut group = c.benchmark_group("queries");
    let mut points = SeededRng::new(99);

    group.bench_function("find_nearest", |b| {
        b.iter(|| {
            let p = points.point_in_circle(4500.0);
            black_box(sector.entities().find_nearest(p.x, p.y, Some(EntityType::Asteroid)).map(|e| e.id))
        })
    });

    group.bench_function("entities_in_radius", |b| {
        b.iter(|| {
            let p = points.point_in_circle(4500.0);
            black_box(sector.entities().entities_in_radius(p.x, p.y, 800.0).len())
        })
    });

    group.finish();
}

fn update_benchmark(c: &mut Criterion) {
    let ctx = context();
    let mut universe = Universe::new(ctx);
    universe.generate_all();
    let mut rng = StdRng::seed_from_u64(1);

    c.bench_function("universe_update_60hz", |b| {
        b.iter(|| black_box(universe.update_with(1.0 / 60.0, &mut rng).len()))
    });
}

criterion_group!(benches, generation_benchmark, query_benchmark, update_benchmark);
criterion_main!(benches);
