use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ferric_vanilla::config::EngineConfig;
use ferric_vanilla::core::{PricingEngine, PricingStyle};
use ferric_vanilla::engines::analytic::BlackScholesEngine;
use ferric_vanilla::engines::numerical::AmericanBinomialEngine;
use ferric_vanilla::greeks::greek_profile;
use ferric_vanilla::instruments::VanillaOption;
use ferric_vanilla::market::Market;
use ferric_vanilla::math::PricingArena;
use std::hint::black_box;
use std::sync::{Arc, Mutex};

// Performance goals (guideline, measured on target hardware):
// - Black-Scholes European call: < 100 ns
// - American binomial (200 steps): < 100 us
// - American finite-difference Greeks (200 steps): < 1 ms

fn benchmark_market() -> Market {
    Market::builder()
        .spot(100.0)
        .rate(0.05)
        .dividend_yield(0.0)
        .flat_vol(0.20)
        .build()
        .expect("benchmark market should be valid")
}

fn bench_black_scholes_european(c: &mut Criterion) {
    let market = benchmark_market();
    let option = VanillaOption::european_call(100.0, 1.0);
    let engine = BlackScholesEngine::new();

    c.bench_function("black_scholes_european_call", |b| {
        b.iter(|| {
            let px = engine
                .price(black_box(&option), black_box(&market))
                .expect("pricing should succeed");
            black_box(px)
        })
    });

    c.bench_function("black_scholes_analytic_greeks", |b| {
        b.iter(|| {
            let g = engine
                .greeks(black_box(&option), black_box(&market))
                .expect("greeks should succeed");
            black_box(g)
        })
    });
}

fn bench_american_binomial_steps(c: &mut Criterion) {
    let market = benchmark_market();
    let option = VanillaOption::american_put(100.0, 1.0);
    let mut group = c.benchmark_group("american_binomial_put");

    for steps in [100_usize, 200, 500, 1000] {
        let engine = AmericanBinomialEngine::new(steps);
        group.bench_with_input(BenchmarkId::from_parameter(steps), &steps, |b, _| {
            b.iter(|| {
                let px = engine
                    .price(black_box(&option), black_box(&market))
                    .expect("pricing should succeed");
                black_box(px)
            })
        });
    }

    group.finish();
}

fn bench_american_binomial_arena(c: &mut Criterion) {
    let market = benchmark_market();
    let option = VanillaOption::american_put(100.0, 1.0);
    let arena = Arc::new(Mutex::new(PricingArena::with_capacity(1000)));
    let engine = AmericanBinomialEngine::with_arena(1000, arena);

    c.bench_function("american_binomial_put_arena_1000", |b| {
        b.iter(|| {
            let px = engine
                .price(black_box(&option), black_box(&market))
                .expect("pricing should succeed");
            black_box(px)
        })
    });
}

fn bench_american_greeks(c: &mut Criterion) {
    let market = benchmark_market();
    let option = VanillaOption::american_put(100.0, 1.0);
    let engine = AmericanBinomialEngine::default();

    c.bench_function("american_fd_greeks_200", |b| {
        b.iter(|| {
            let g = engine
                .greeks(black_box(&option), black_box(&market))
                .expect("greeks should succeed");
            black_box(g)
        })
    });
}

fn bench_greek_profile(c: &mut Criterion) {
    let market = benchmark_market();
    let option = VanillaOption::american_put(100.0, 1.0);
    let config = EngineConfig::default();

    c.bench_function("greek_profile_comparison", |b| {
        b.iter(|| {
            let profile = greek_profile(
                black_box(&option),
                black_box(&market),
                PricingStyle::Comparison,
                &config,
            )
            .expect("profile should succeed");
            black_box(profile)
        })
    });
}

criterion_group!(
    benches,
    bench_black_scholes_european,
    bench_american_binomial_steps,
    bench_american_binomial_arena,
    bench_american_greeks,
    bench_greek_profile
);
criterion_main!(benches);
