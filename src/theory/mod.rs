//! Static music-theory data and the small amount of logic built on it.
//!
//! Everything here is pure and allocation-light; the sequencer reads scale
//! pitches from it, and the UI reads names and descriptions.

/// Chord dictionary lookups and triad spelling.
pub mod chord;
/// MIDI note number to frequency conversion.
pub mod pitch;
/// Chord-to-emotion relationships and key translation.
pub mod relationship;
/// Modes, rooted scales, and relative-mode matching.
pub mod scale;
/// The read-only tables everything else indexes into.
pub mod tables;

pub use pitch::midi_to_freq;
pub use scale::{find_matching_modes, Mode, Scale};
