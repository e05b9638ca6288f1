// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Agrigate Systems

//! Criterion benchmark suite for the Agrigate compliance engine.
//!
//! Benchmarks cover the three hot paths:
//!
//! - Single-rule evaluation against a submission
//! - The full verification pipeline (gates + evaluation + record writes)
//! - Rule-store population under a large standard
//!
//! Run with: `cargo bench --bench compliance_benchmark`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use agrigate_compliance_core::{
    config::EngineConfig,
    engine::ComplianceEngine,
    storage::InMemoryStorage,
    types::{Rule, RuleKind, Submission},
};

fn submission() -> Submission {
    Submission {
        numeric_value: 50,
        category: "BT".into(),
        duration: 500,
        data_hash: [0u8; 32],
    }
}

// ---------------------------------------------------------------------------
// Single-rule evaluation benchmark
// ---------------------------------------------------------------------------

fn rule_evaluation_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("rule_evaluation");

    let numerical = Rule {
        standard_id: 1,
        rule_id: 1,
        kind: RuleKind::Numerical { min: 0, max: 100 },
        description: "residue ppm".into(),
        active: true,
    };
    let categorical = Rule {
        standard_id: 1,
        rule_id: 2,
        kind: RuleKind::Categorical {
            allowed: (0..16).map(|index| format!("variety-{index:02}")).collect(),
        },
        description: "seed variety".into(),
        active: true,
    };

    let submission = submission();

    group.bench_function("numerical", |bencher| {
        bencher.iter(|| black_box(numerical.evaluate(black_box(&submission))));
    });
    group.bench_function("categorical_worst_case", |bencher| {
        bencher.iter(|| black_box(categorical.evaluate(black_box(&submission))));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Full pipeline benchmark
// ---------------------------------------------------------------------------

/// Measures the full verify_compliance path — pause and standard gates,
/// ascending-id evaluation, and the three state writes — at several
/// rule-set sizes.
fn verification_pipeline_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("verify_compliance");

    for rule_count in [1usize, 8, 32] {
        let config = EngineConfig { max_rules_per_standard: 64, ..EngineConfig::default() };
        let mut engine = ComplianceEngine::new(config, InMemoryStorage::new(), "admin");
        engine.add_standard("admin", 1, "EU-GMO-2024", "thresholds").unwrap();
        for rule_id in 0..rule_count as u32 {
            engine
                .add_numerical_rule("admin", 1, rule_id + 1, "residue ppm", 0, 100)
                .unwrap();
        }

        let submission = submission();
        group.bench_with_input(
            BenchmarkId::from_parameter(rule_count),
            &rule_count,
            |bencher, _| {
                let mut clock = 0u64;
                bencher.iter(|| {
                    clock += 1;
                    let record = engine
                        .verify_compliance(
                            black_box("monitor"),
                            black_box("crop-0001"),
                            black_box(1),
                            black_box(&submission),
                            clock,
                        )
                        .unwrap();
                    black_box(record);
                });
            },
        );
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Rule-store population benchmark
// ---------------------------------------------------------------------------

fn rule_store_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("rule_store");

    group.bench_function("populate_32_rules", |bencher| {
        bencher.iter(|| {
            let mut engine = ComplianceEngine::new(
                EngineConfig::default(),
                InMemoryStorage::new(),
                "admin",
            );
            engine.add_standard("admin", 1, "EU-GMO-2024", "thresholds").unwrap();
            for rule_id in 1..=32u32 {
                engine
                    .add_numerical_rule("admin", 1, rule_id, "residue ppm", 0, 100)
                    .unwrap();
            }
            black_box(engine.rule_set_version());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    rule_evaluation_benchmark,
    verification_pipeline_benchmark,
    rule_store_benchmark
);
criterion_main!(benches);
