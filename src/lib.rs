pub mod config;
pub mod dsp;
#[cfg(feature = "rtrb")]
pub mod engine; // Realtime voice pool behind a lock-free queue
pub mod sequencing; // Gates, tracks, grid compilation, grooves
pub mod synth; // Tone emission and the audio sink boundary
pub mod theory; // Scales, chords, relationships
pub mod transport; // Look-ahead scheduling

pub use config::TransportConfig;

/// Largest block the engine is asked to render at once.
pub const MAX_BLOCK_SIZE: usize = 2048;
