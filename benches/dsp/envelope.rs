//! Benchmarks for the tone burst envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_theory::dsp::ToneEnvelope;

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let sample_rate = 48_000.0;
    let env = ToneEnvelope::burst(0.0, 1.0, 0.2, 0.05, 0.01);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Attack phase (linear ramp)
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer), black_box(0.0), sample_rate);
            })
        });

        // Decay phase (exponential)
        group.bench_with_input(BenchmarkId::new("decay", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer), black_box(0.5), sample_rate);
            })
        });
    }

    group.finish();
}
