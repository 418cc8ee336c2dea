//! Transport timing constants.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Timing knobs for the look-ahead transport.
///
/// ```ignore
/// let config = TransportConfig::new().lookahead(0.2).poll_interval(0.05);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportConfig {
    /// How far ahead of the output clock tones are queued, seconds
    pub lookahead: f64,
    /// Delay between scheduling passes, seconds. Must stay below `lookahead`.
    pub poll_interval: f64,
    /// Gap between pressing start and the first tick, seconds
    pub start_delay: f64,
    /// Grid ticks per beat
    pub ticks_per_beat: u32,
}

impl TransportConfig {
    pub fn new() -> Self {
        Self {
            lookahead: 0.1,
            poll_interval: 0.025,
            start_delay: 0.05,
            ticks_per_beat: 4,
        }
    }

    pub fn lookahead(mut self, seconds: f64) -> Self {
        self.lookahead = seconds;
        self
    }

    pub fn poll_interval(mut self, seconds: f64) -> Self {
        self.poll_interval = seconds;
        self
    }

    pub fn start_delay(mut self, seconds: f64) -> Self {
        self.start_delay = seconds;
        self
    }

    pub fn ticks_per_beat(mut self, ticks: u32) -> Self {
        self.ticks_per_beat = ticks.max(1);
        self
    }

    /// Seconds per grid tick at `bpm`.
    ///
    /// `(60 / bpm) / ticks_per_beat`. Tempos below 1 BPM are treated as 1.
    pub fn seconds_per_tick(&self, bpm: f64) -> f64 {
        (60.0 / bpm.max(1.0)) / self.ticks_per_beat.max(1) as f64
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::new()
    }
}
