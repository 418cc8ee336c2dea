#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::f32::consts::TAU;

/*
Periodic Oscillator
===================

A phase accumulator driving one of four classic waveforms. Every tone the
sequencer, chord preview and interval preview play is one of these, shaped by
a ToneEnvelope.

Phase
-----

Phase runs from 0.0 to 1.0 and wraps. Each sample it advances by

    increment = frequency / sample_rate

so a 440 Hz tone at 48 kHz moves 440/48000 ≈ 0.00917 of a cycle per sample.

Waveforms (one cycle, phase 0 → 1)
----------------------------------

  Sine        sin(2π·phase)                pure tone, no overtones
  Triangle    1 - 4·|phase - 0.5|          soft, odd harmonics falling as 1/n²
  Sawtooth    2·phase - 1                  bright, all harmonics
  Square      +1 below 0.5, -1 above       hollow, odd harmonics

Triangle starts at -1 (phase 0), peaks at +1 (phase 0.5) and falls back.

These are naive (non-band-limited) shapes. At the short, quiet tick lengths the
sequencer uses, aliasing on sawtooth and square is audible only at high
pitches; sine and triangle are what the presets actually pick.
*/

/// Waveform shape of a tone voice
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Triangle,
    Sawtooth,
    Square,
}

impl Waveform {
    /// Value of one cycle of the waveform at `phase` in [0, 1).
    #[inline]
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

pub struct Oscillator {
    waveform: Waveform,
    phase: f32, // 0.0 .. 1.0
}

impl Oscillator {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
        }
    }

    pub fn sine() -> Self {
        Self::new(Waveform::Sine)
    }

    pub fn triangle() -> Self {
        Self::new(Waveform::Triangle)
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Restart the cycle from phase 0.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Produce one sample and advance the phase.
    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let value = self.waveform.sample(self.phase);
        self.phase += frequency / sample_rate;
        self.phase -= self.phase.floor();
        value
    }

    /// Fill `out` with consecutive samples.
    pub fn render(&mut self, out: &mut [f32], frequency: f32, sample_rate: f32) {
        for sample in out.iter_mut() {
            *sample = self.next_sample(frequency, sample_rate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    #[test]
    fn sine_starts_at_zero_and_stays_bounded() {
        let mut osc = Oscillator::sine();
        let mut buffer = [0.0; 512];
        osc.render(&mut buffer, 440.0, SAMPLE_RATE);

        assert!(buffer[0].abs() < 1e-6);
        assert!(buffer.iter().all(|s| (-1.0..=1.0).contains(s)));
    }

    #[test]
    fn triangle_shape_over_one_cycle() {
        assert!((Waveform::Triangle.sample(0.0) + 1.0).abs() < 1e-6);
        assert!((Waveform::Triangle.sample(0.25)).abs() < 1e-6);
        assert!((Waveform::Triangle.sample(0.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn one_cycle_returns_to_start_phase() {
        // 100 Hz at 48 kHz = 480 samples per cycle
        let mut osc = Oscillator::new(Waveform::Sawtooth);
        let first = osc.next_sample(100.0, SAMPLE_RATE);
        for _ in 0..479 {
            osc.next_sample(100.0, SAMPLE_RATE);
        }
        let again = osc.next_sample(100.0, SAMPLE_RATE);
        assert!((first - again).abs() < 1e-3, "expected {first}, got {again}");
    }

    #[test]
    fn square_has_equal_halves() {
        let mut osc = Oscillator::new(Waveform::Square);
        let mut buffer = [0.0; 480];
        osc.render(&mut buffer, 100.0, SAMPLE_RATE);
        let high = buffer.iter().filter(|&&s| s > 0.0).count();
        assert!((high as i32 - 240).abs() <= 1);
    }
}
