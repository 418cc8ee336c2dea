//! Benchmarks for the tone engine under load.
//!
//! Measures a full block with many voices sounding at once, the worst case
//! for a dense grid at high tempo.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_theory::engine::{tone_engine, DEFAULT_QUEUE, DEFAULT_VOICES};
use saavy_theory::synth::{AudioSink, ToneSpec};

use crate::BLOCK_SIZES;

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");

    for &voices in &[1usize, 8, DEFAULT_VOICES] {
        for &size in BLOCK_SIZES {
            let (mut handle, mut engine) = tone_engine(48_000.0, DEFAULT_VOICES, DEFAULT_QUEUE);
            for i in 0..voices {
                let tone = ToneSpec::CHORD_PREVIEW.tone(220.0 + 55.0 * i as f32, 0.0, 1.0e6);
                let _ = handle.schedule(tone);
            }
            let mut buffer = vec![0.0f32; size];

            group.bench_with_input(
                BenchmarkId::new(format!("{}_voices", voices), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        engine.render_block(black_box(&mut buffer));
                    })
                },
            );
        }
    }

    group.finish();
}
