// Tone emission and the audio output boundary

pub mod sink;
pub mod tone;

pub use sink::{AudioSink, RecordingSink, ScheduledTone, SinkError};
pub use tone::{chord_preview, emit_tone, interval_preview, ToneSpec};
