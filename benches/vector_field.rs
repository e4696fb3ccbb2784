//! Benchmarks for the per-frame update pass.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use warpfield::{ConstantNoise, FieldVariant, Grid, RandomNoise, Scene, StringConfig, StringSet, VectorField};

fn bench_update_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_150x150");

    for variant in FieldVariant::ALL {
        let mut field = VectorField::new(Grid::new(150, 10.0).unwrap());
        let mut noise = RandomNoise::seeded(0);
        group.bench_function(variant.name(), |b| {
            let mut t = 0.0f32;
            b.iter(|| {
                t = (t + 0.016) % 10.0;
                field.update(black_box(&variant), t, &mut noise);
            })
        });
    }

    group.finish();
}

fn bench_grid_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("warp_by_grid_size");

    for size in [50u32, 100, 150, 200] {
        let mut field = VectorField::new(Grid::new(size, 5.0).unwrap());
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| field.update(&FieldVariant::Warp, black_box(0.3), &mut ConstantNoise::centered()))
        });
    }

    group.finish();
}

fn bench_grid_construction(c: &mut Criterion) {
    c.bench_function("grid_new_150", |b| b.iter(|| Grid::new(black_box(150), 10.0)));
}

fn bench_strings(c: &mut Criterion) {
    let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(1);
    let mut strings = StringSet::spawn(10.0, &StringConfig::default(), &mut rng);
    let mut out = Vec::new();

    c.bench_function("strings_update_and_fill", |b| {
        let mut t = 0.0f32;
        b.iter(|| {
            t += 0.016;
            strings.update(t);
            strings.fill_segments(&mut out);
            black_box(out.len())
        })
    });
}

fn bench_scene_step(c: &mut Criterion) {
    let config = warpfield::SceneConfig::from_preset(warpfield::Preset::LeewardWindward);
    let mut scene = Scene::from_config(&config).unwrap();

    c.bench_function("scene_step_leeward", |b| b.iter(|| scene.step(black_box(0.016))));
}

criterion_group!(
    benches,
    bench_update_variants,
    bench_grid_sizes,
    bench_grid_construction,
    bench_strings,
    bench_scene_step,
);
criterion_main!(benches);
