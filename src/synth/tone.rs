//! Tone emission
//!
//! Every audible event is a single oscillator burst shaped by a
//! [`ToneEnvelope`]. The call sites differ only in their constants, which live
//! in [`ToneSpec`] presets.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use log::trace;

use super::sink::{AudioSink, ScheduledTone, SinkError};
use crate::dsp::envelope::ToneEnvelope;
use crate::dsp::oscillator::Waveform;
use crate::theory::chord::chord_midi_notes;
use crate::theory::midi_to_freq;
use crate::theory::scale::REFERENCE_MIDI;
use crate::theory::tables::ChordQuality;

/// Length of a chord preview, in seconds.
pub const CHORD_PREVIEW_SECONDS: f64 = 2.0;
/// Length of each note of an interval preview, in seconds.
pub const INTERVAL_PREVIEW_SECONDS: f64 = 1.0;
/// Delay between the two notes of an interval preview, in seconds.
pub const INTERVAL_STAGGER_SECONDS: f64 = 0.4;

/// Envelope and waveform constants for one kind of tone
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    pub waveform: Waveform,
    /// Gain reached at the end of the attack
    pub peak: f32,
    /// Attack length, seconds
    pub attack: f64,
    /// How long before the stop the decay reaches its floor, seconds
    pub tail: f64,
}

impl ToneSpec {
    /// Sequencer tick
    pub const TICK: ToneSpec = ToneSpec {
        waveform: Waveform::Sine,
        peak: 0.2,
        attack: 0.02,
        tail: 0.01,
    };

    /// Groove melody note
    pub const GROOVE: ToneSpec = ToneSpec {
        waveform: Waveform::Triangle,
        peak: 0.1,
        attack: 0.02,
        tail: 0.01,
    };

    /// Chord dictionary preview
    pub const CHORD_PREVIEW: ToneSpec = ToneSpec {
        waveform: Waveform::Triangle,
        peak: 0.15,
        attack: 0.05,
        tail: 0.0,
    };

    /// Interval preview
    pub const INTERVAL_PREVIEW: ToneSpec = ToneSpec {
        waveform: Waveform::Sine,
        peak: 0.2,
        attack: 0.05,
        tail: 0.0,
    };

    pub fn waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    pub fn peak(mut self, peak: f32) -> Self {
        self.peak = peak;
        self
    }

    /// Describe a burst of this kind without scheduling it.
    pub fn tone(&self, frequency: f32, start: f64, duration: f64) -> ScheduledTone {
        ScheduledTone {
            frequency,
            waveform: self.waveform,
            envelope: ToneEnvelope::burst(start, duration, self.peak, self.attack, self.tail),
        }
    }
}

impl Default for ToneSpec {
    fn default() -> Self {
        ToneSpec::TICK
    }
}

/// Schedule one enveloped burst on `sink`.
pub fn emit_tone(
    sink: &mut dyn AudioSink,
    spec: &ToneSpec,
    frequency: f32,
    start: f64,
    duration: f64,
) -> Result<(), SinkError> {
    trace!("tone {:.2} Hz at {:.3}s for {:.3}s", frequency, start, duration);
    sink.schedule(spec.tone(frequency, start, duration))
}

/// Play every note of `quality` on `root` at once, starting now.
///
/// Returns how many tones were scheduled.
pub fn chord_preview(
    sink: &mut dyn AudioSink,
    root: u8,
    quality: &ChordQuality,
) -> Result<usize, SinkError> {
    sink.resume()?;
    let now = sink.current_time();
    let notes = chord_midi_notes(root, quality);
    for &note in &notes {
        emit_tone(
            sink,
            &ToneSpec::CHORD_PREVIEW,
            midi_to_freq(note as f32),
            now,
            CHORD_PREVIEW_SECONDS,
        )?;
    }
    Ok(notes.len())
}

/// Play the root, then the note `semitones` above (or below) it.
pub fn interval_preview(
    sink: &mut dyn AudioSink,
    root: u8,
    semitones: u8,
    up: bool,
) -> Result<(), SinkError> {
    sink.resume()?;
    let now = sink.current_time();
    let root_midi = REFERENCE_MIDI as f32 + (root % 12) as f32;
    let target_midi = if up {
        root_midi + semitones as f32
    } else {
        root_midi - semitones as f32
    };

    for (i, midi) in [root_midi, target_midi].into_iter().enumerate() {
        emit_tone(
            sink,
            &ToneSpec::INTERVAL_PREVIEW,
            midi_to_freq(midi),
            now + i as f64 * INTERVAL_STAGGER_SECONDS,
            INTERVAL_PREVIEW_SECONDS,
        )?;
    }
    Ok(())
}
