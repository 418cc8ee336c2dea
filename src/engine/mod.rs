//! Realtime tone engine
//!
//! The control side ([`EngineHandle`]) pushes scheduled tones through a
//! lock-free `rtrb` queue; the audio side ([`ToneEngine`]) pops them at the
//! top of every block and mixes a fixed pool of voices. Time on both sides is
//! the engine's frame count, published through [`SampleClock`].

pub mod voice;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::warn;
use rtrb::{Consumer, Producer, RingBuffer};

use self::voice::ToneVoice;
use crate::synth::sink::{AudioSink, ScheduledTone, SinkError};

/// Default number of simultaneous tones.
pub const DEFAULT_VOICES: usize = 32;
/// Default command queue length.
pub const DEFAULT_QUEUE: usize = 256;

/// Messages from the control thread to the audio thread
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineCommand {
    Play(ScheduledTone),
    /// Drop every held and sounding tone
    Silence,
}

/// Frames rendered so far, shared between the engine and its handle.
#[derive(Debug, Clone)]
pub struct SampleClock {
    frames: Arc<AtomicU64>,
    sample_rate: f32,
}

impl SampleClock {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            frames: Arc::new(AtomicU64::new(0)),
            sample_rate,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Seconds of audio rendered so far.
    pub fn seconds(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    fn advance(&self, frames: u64) {
        self.frames.fetch_add(frames, Ordering::Release);
    }
}

/// Audio-thread half: owns the voices and renders mono blocks.
pub struct ToneEngine {
    voices: Vec<ToneVoice>,
    rx: Consumer<EngineCommand>,
    clock: SampleClock,
}

impl ToneEngine {
    /// Render one block. `out` is overwritten.
    pub fn render_block(&mut self, out: &mut [f32]) {
        while let Ok(command) = self.rx.pop() {
            match command {
                EngineCommand::Play(tone) => self.allocate_voice().assign(tone),
                EngineCommand::Silence => {
                    for voice in &mut self.voices {
                        voice.silence();
                    }
                }
            }
        }

        let t0 = self.clock.seconds();
        let sample_rate = self.clock.sample_rate();
        out.fill(0.0);
        for voice in &mut self.voices {
            if !voice.is_free() {
                voice.render_add(out, t0, sample_rate);
            }
        }

        self.clock.advance(out.len() as u64);
    }

    /// Voices currently holding a tone.
    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| !v.is_free()).count()
    }

    pub fn clock(&self) -> &SampleClock {
        &self.clock
    }

    // A free slot if there is one, otherwise the voice with the earliest start.
    fn allocate_voice(&mut self) -> &mut ToneVoice {
        let index = self
            .voices
            .iter()
            .position(ToneVoice::is_free)
            .or_else(|| {
                self.voices
                    .iter()
                    .enumerate()
                    .min_by(|(_, a), (_, b)| a.start_time().total_cmp(&b.start_time()))
                    .map(|(index, _)| index)
            })
            .unwrap_or(0);
        &mut self.voices[index]
    }
}

/// Control-thread half: an [`AudioSink`] feeding the engine.
pub struct EngineHandle {
    tx: Producer<EngineCommand>,
    clock: SampleClock,
}

impl EngineHandle {
    pub fn clock(&self) -> &SampleClock {
        &self.clock
    }

    /// Cut every tone, including ones queued for the future.
    pub fn silence(&mut self) -> Result<(), SinkError> {
        self.tx
            .push(EngineCommand::Silence)
            .map_err(|_| SinkError::QueueFull)
    }
}

impl AudioSink for EngineHandle {
    fn current_time(&self) -> f64 {
        self.clock.seconds()
    }

    fn resume(&mut self) -> Result<(), SinkError> {
        Ok(())
    }

    fn schedule(&mut self, tone: ScheduledTone) -> Result<(), SinkError> {
        self.tx.push(EngineCommand::Play(tone)).map_err(|_| {
            warn!("engine queue full, dropping {:.2} Hz tone", tone.frequency);
            SinkError::QueueFull
        })
    }
}

/// Build a connected handle/engine pair.
///
/// `voices` is the size of the voice pool (at least 1); `queue` the command
/// queue length.
pub fn tone_engine(sample_rate: f32, voices: usize, queue: usize) -> (EngineHandle, ToneEngine) {
    let (tx, rx) = RingBuffer::new(queue.max(1));
    let clock = SampleClock::new(sample_rate);
    let handle = EngineHandle {
        tx,
        clock: clock.clone(),
    };
    let engine = ToneEngine {
        voices: (0..voices.max(1)).map(|_| ToneVoice::new()).collect(),
        rx,
        clock,
    };
    (handle, engine)
}
