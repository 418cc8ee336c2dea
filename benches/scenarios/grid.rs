//! Benchmarks for compiling the polyrhythm grid.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_theory::sequencing::{compile_grid, Gate, Track, TrackId};
use saavy_theory::theory::Scale;

pub fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/grid");
    let scale = Scale::default();
    let master = Gate::new(3, 4, 0);

    // One track per degree, coprime-ish periods
    let tracks: Vec<Track> = (1..=7u8)
        .map(|degree| {
            Track::new(TrackId(degree as u64))
                .with_degree(degree)
                .with_period(degree as u32 + 1)
                .with_offset(degree as u32 % 3)
                .with_gate(Gate::new(2, 3, 0))
        })
        .collect();

    for &resolution in &[16usize, 64, 256] {
        group.bench_with_input(
            BenchmarkId::new("seven_tracks", resolution),
            &resolution,
            |b, &resolution| {
                b.iter(|| {
                    compile_grid(
                        black_box(resolution),
                        &master,
                        black_box(&tracks),
                        scale.midi_notes(),
                    )
                })
            },
        );
    }

    group.finish();
}
