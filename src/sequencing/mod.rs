//! Rhythm: gates, tracks, the compiled playback grid and the session that
//! owns them, plus time-signature groupings and the groove generator.

pub mod gate;
pub mod grid;
pub mod groove;
pub mod input;
pub mod session;
pub mod time_signature;
pub mod track;

pub use gate::{is_gate_open, Gate, GateField};
pub use grid::{compile_grid, CellState, PlaybackGrid};
pub use groove::Groove;
pub use session::Session;
pub use time_signature::{AccentGrouping, Meter, NoteValue, TimeSignature};
pub use track::{Track, TrackField, TrackId};
