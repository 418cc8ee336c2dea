//! The audio output boundary.
//!
//! Tones are handed to a sink as fully described one-shot bursts with absolute
//! timestamps on the sink's own clock. The realtime engine implements this
//! for a live device; `RecordingSink` implements it for offline use and tests.

use crate::dsp::envelope::ToneEnvelope;
use crate::dsp::oscillator::Waveform;
use crate::transport::clock::{Clock, ManualClock};

/// One enveloped burst, ready to be voiced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledTone {
    pub frequency: f32,
    pub waveform: Waveform,
    pub envelope: ToneEnvelope,
}

impl ScheduledTone {
    pub fn start(&self) -> f64 {
        self.envelope.start
    }

    pub fn stop(&self) -> f64 {
        self.envelope.stop
    }
}

/// Where tones go.
pub trait AudioSink {
    /// Current time on the sink's clock, in seconds.
    fn current_time(&self) -> f64;

    /// Make sure the output is running. Called before playback starts.
    fn resume(&mut self) -> Result<(), SinkError>;

    /// Queue a tone. Fire-and-forget: there is no handle and no cancellation.
    fn schedule(&mut self, tone: ScheduledTone) -> Result<(), SinkError>;
}

/// Errors raised at the audio output boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// No output device is available
    NoDevice,
    /// The output stream could not be built
    Build(String),
    /// The output stream exists but could not be started
    Resume(String),
    /// The engine's command queue is full; the tone was dropped
    QueueFull,
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkError::NoDevice => write!(f, "No audio output device available"),
            SinkError::Build(reason) => write!(f, "Failed to build output stream: {}", reason),
            SinkError::Resume(reason) => write!(f, "Failed to start output stream: {}", reason),
            SinkError::QueueFull => write!(f, "Tone queue is full, tone dropped"),
        }
    }
}

impl std::error::Error for SinkError {}

/// A sink that keeps every tone it is given, on a manually driven clock.
///
/// Useful for offline rendering and for checking what the transport emitted
/// without an audio device.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    clock: ManualClock,
    tones: Vec<ScheduledTone>,
    fail_resume: bool,
    resumed: bool,
}

impl RecordingSink {
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            ..Self::default()
        }
    }

    /// Make every `resume` call fail, like an output that cannot open.
    pub fn failing(mut self) -> Self {
        self.fail_resume = true;
        self
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.fail_resume = failing;
    }

    pub fn tones(&self) -> &[ScheduledTone] {
        &self.tones
    }

    pub fn take_tones(&mut self) -> Vec<ScheduledTone> {
        std::mem::take(&mut self.tones)
    }

    pub fn is_resumed(&self) -> bool {
        self.resumed
    }
}

impl AudioSink for RecordingSink {
    fn current_time(&self) -> f64 {
        self.clock.now()
    }

    fn resume(&mut self) -> Result<(), SinkError> {
        if self.fail_resume {
            return Err(SinkError::NoDevice);
        }
        self.resumed = true;
        Ok(())
    }

    fn schedule(&mut self, tone: ScheduledTone) -> Result<(), SinkError> {
        self.tones.push(tone);
        Ok(())
    }
}
