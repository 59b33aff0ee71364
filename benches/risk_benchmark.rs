use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fx_bond_risk::core::portfolio::Portfolio;
use fx_bond_risk::scenario::engine::ScenarioEngine;
use fx_bond_risk::sensitivity::calculator::{bond_dv01, fx_delta};
use fx_bond_risk::simulation::monte_carlo::{MonteCarloConfig, MonteCarloEngine};

fn bench_fx_curve(c: &mut Criterion) {
    c.bench_function("fx_delta_curve_21_points", |b| {
        b.iter(|| fx_delta(black_box(10_000.0), black_box(1.25)))
    });
}

fn bench_dv01(c: &mut Criterion) {
    c.bench_function("bond_dv01_5y", |b| {
        b.iter(|| bond_dv01(black_box(1_000.0), 0.04, 5, black_box(0.05)))
    });
}

fn bench_scenarios(c: &mut Criterion) {
    let portfolio = Portfolio::default();
    let engine = ScenarioEngine::default();

    c.bench_function("scenario_catalogue", |b| {
        b.iter(|| engine.run(black_box(&portfolio)))
    });
}

fn bench_monte_carlo_10k(c: &mut Criterion) {
    let portfolio = Portfolio::default();
    let engine = MonteCarloEngine::default();

    c.bench_function("monte_carlo_var_10k", |b| {
        b.iter(|| engine.run(black_box(&portfolio)))
    });
}

fn bench_monte_carlo_100k(c: &mut Criterion) {
    let portfolio = Portfolio::default();
    let engine = MonteCarloEngine::new(MonteCarloConfig {
        n_sims: 100_000,
        ..Default::default()
    });

    let mut group = c.benchmark_group("monte_carlo_large");
    group.sample_size(20);
    group.bench_function("monte_carlo_var_100k", |b| {
        b.iter(|| engine.run(black_box(&portfolio)))
    });
    group.finish();
}

fn bench_percentile(c: &mut Criterion) {
    let (_, pnl) = MonteCarloEngine::new(MonteCarloConfig {
        n_sims: 100_000,
        ..Default::default()
    })
    .run(&Portfolio::default())
    .unwrap();

    c.bench_function("percentile_100k", |b| {
        b.iter(|| pnl.percentile(black_box(5.0)))
    });
}

criterion_group!(
    benches,
    bench_fx_curve,
    bench_dv01,
    bench_scenarios,
    bench_monte_carlo_10k,
    bench_monte_carlo_100k,
    bench_percentile
);
criterion_main!(benches);
