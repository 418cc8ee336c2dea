use crate::dsp::oscillator::Oscillator;
use crate::synth::sink::ScheduledTone;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Free,
    /// Holding a tone whose start time has not arrived yet
    Waiting,
    Sounding,
}

/// One slot of the engine's fixed voice pool.
pub struct ToneVoice {
    osc: Oscillator,
    tone: Option<ScheduledTone>,
    state: VoiceState,
}

impl ToneVoice {
    pub fn new() -> Self {
        Self {
            osc: Oscillator::sine(),
            tone: None,
            state: VoiceState::Free,
        }
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn is_free(&self) -> bool {
        self.state == VoiceState::Free
    }

    /// Start time of the held tone; free voices sort first.
    pub fn start_time(&self) -> f64 {
        self.tone.map(|t| t.start()).unwrap_or(f64::NEG_INFINITY)
    }

    /// Take over this slot for `tone`, dropping whatever it held.
    pub fn assign(&mut self, tone: ScheduledTone) {
        self.osc = Oscillator::new(tone.waveform);
        self.tone = Some(tone);
        self.state = VoiceState::Waiting;
    }

    pub fn silence(&mut self) {
        self.tone = None;
        self.state = VoiceState::Free;
    }

    /// Add this voice into `out`, whose first sample sits at time `t0`.
    pub fn render_add(&mut self, out: &mut [f32], t0: f64, sample_rate: f32) {
        let Some(tone) = self.tone else {
            return;
        };
        let dt = 1.0 / sample_rate as f64;

        for (n, sample) in out.iter_mut().enumerate() {
            let t = t0 + n as f64 * dt;
            if t < tone.start() {
                continue;
            }
            if tone.envelope.is_finished(t) {
                self.silence();
                return;
            }
            self.state = VoiceState::Sounding;
            let gain = tone.envelope.gain_at(t);
            *sample += gain * self.osc.next_sample(tone.frequency, sample_rate);
        }
    }
}

impl Default for ToneVoice {
    fn default() -> Self {
        Self::new()
    }
}
