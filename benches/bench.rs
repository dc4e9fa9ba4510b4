// Criterion benchmarks for Team Matcher

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use team_matcher::core::{balance_teams, CandidatePool, MatchFormer, DEFAULT_BALANCE_ITERATIONS};
use team_matcher::models::{Candidate, Role};

fn create_candidates(count: usize, seed: u64) -> Vec<Candidate> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let mut roles = Role::ALL.to_vec();
            roles.shuffle(&mut rng);
            Candidate::new(
                format!("player-{}", i),
                rng.gen_range(1000..=3000),
                rng.gen_range(1..=1000),
                roles,
            )
        })
        .collect()
}

fn bench_pool_extraction(c: &mut Criterion) {
    let candidates = create_candidates(10_000, 1);

    c.bench_function("pool_insert_and_extract_10k", |b| {
        b.iter(|| {
            let mut pool: CandidatePool = candidates.iter().cloned().collect();
            while let Ok(group) = pool.extract_top(10) {
                black_box(group);
            }
        });
    });
}

fn bench_balancing(c: &mut Criterion) {
    let former = MatchFormer::with_default_config();
    let mut pool: CandidatePool = create_candidates(10, 2).into_iter().collect();
    let m = former
        .form_matches(&mut pool)
        .expect("ten candidates form one match")
        .remove(0);

    c.bench_function("balance_single_match", |b| {
        b.iter(|| {
            let mut m = m.clone();
            balance_teams(black_box(&mut m), DEFAULT_BALANCE_ITERATIONS)
        });
    });
}

fn bench_formation(c: &mut Criterion) {
    let former = MatchFormer::with_default_config();

    let mut group = c.benchmark_group("formation");

    for pool_size in [100, 1_000, 10_000].iter() {
        let candidates = create_candidates(*pool_size, 3);

        group.bench_with_input(
            BenchmarkId::new("form_matches", pool_size),
            pool_size,
            |b, _| {
                b.iter(|| {
                    let mut pool: CandidatePool = candidates.iter().cloned().collect();
                    black_box(former.form_matches(&mut pool).map(|m| m.len()))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_pool_extraction, bench_balancing, bench_formation);

criterion_main!(benches);
