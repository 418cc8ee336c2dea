//! Low-level DSP primitives used by the tone engine.
//!
//! These components are allocation-free and realtime-safe, so they can be
//! embedded directly in voice slots.

/// Absolute-time attack and exponential decay for one-shot tones.
pub mod envelope;
/// Phase-accumulator oscillator and waveform shapes.
pub mod oscillator;

pub use envelope::ToneEnvelope;
pub use oscillator::{Oscillator, Waveform};
