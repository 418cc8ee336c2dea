//! Real-world scenario benchmarks.
//!
//! These model what the app does every frame: compile the sequencer grid
//! after an edit, and render blocks of overlapping scheduled tones.

mod engine;
mod grid;

pub use engine::bench_engine;
pub use grid::bench_grid;
