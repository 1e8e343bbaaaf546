// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-harmonics project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Benchmarks for synthesis, spectral analysis and reconstruction.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_harmonics::reconstruction::HarmonicReconstructor;
use rust_harmonics::signal::HarmonicComponent;
use rust_harmonics::spectral::{create_spectral_analyzer, AnalyzerKind};
use rust_harmonics::synthesis::HarmonicSynthesizer;
use std::hint::black_box;

fn components() -> Vec<HarmonicComponent> {
    vec![
        HarmonicComponent::new(1.0, 50.0, 0.0),
        HarmonicComponent::new(0.3, 150.0, 0.0),
        HarmonicComponent::new(0.1, 250.0, 0.5),
    ]
}

fn bench_synthesize(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesize");

    for size in [1_000, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, &size| {
            let synthesizer = HarmonicSynthesizer::new(size, 1e-4).unwrap();
            let components = components();
            bencher.iter(|| synthesizer.synthesize(black_box(&components)).unwrap());
        });
    }

    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");

    for (kind, size) in [
        (AnalyzerKind::Dft, 1_000),
        (AnalyzerKind::Fft, 1_000),
        (AnalyzerKind::Fft, 10_007),
    ] {
        let id = BenchmarkId::new(format!("{:?}", kind), size);
        group.bench_with_input(id, &size, |bencher, &size| {
            let signal = HarmonicSynthesizer::new(size, 1e-4)
                .unwrap()
                .synthesize(&components())
                .unwrap();
            let mut analyzer = create_spectral_analyzer(kind, size);
            bencher.iter(|| {
                analyzer
                    .analyze(black_box(signal.amplitudes()), 1e-4)
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_reconstruct(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruct");

    for target in [5.0, 1.0, 0.1] {
        group.bench_with_input(
            BenchmarkId::from_parameter(target),
            &target,
            |bencher, &target| {
                let signal = HarmonicSynthesizer::new(10_000, 1e-4)
                    .unwrap()
                    .synthesize(&components())
                    .unwrap();
                let reconstructor = HarmonicReconstructor::new(target).unwrap();
                bencher.iter(|| reconstructor.reconstruct(black_box(&signal), 1e-4).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_synthesize, bench_analyze, bench_reconstruct);
criterion_main!(benches);
