#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
One-Shot Tone Envelope
======================

Every tone is a fire-and-forget burst: it is scheduled once, at absolute
times on the output clock, and never released by a note-off. The envelope is
therefore a pure function of time rather than a state machine.

Breakpoints
-----------

  start       gain is set to 0
  attack_end  gain has ramped LINEARLY up to `peak`
  decay_end   gain has ramped EXPONENTIALLY down to `floor`
  stop        the voice stops and frees its slot

  Gain
   peak ┐      ╱╲
        │     ╱  ╲
        │    ╱    ╲_
        │   ╱       ╲__
  floor │  ╱           ╲___________
      0 └─┴──────────────────────┴──→ Time
        start attack_end  decay_end stop

The Math
--------

Linear attack, for start <= t < attack_end:

    gain = peak * (t - start) / (attack_end - start)

Exponential decay, for attack_end <= t < decay_end:

    gain = peak * (floor / peak) ^ ((t - attack_end) / (decay_end - attack_end))

The exponent form is what makes the decay "natural": equal steps in time give
equal RATIOS of gain, the same way acoustic sounds fade. `floor` must be
positive since an exponential never reaches zero.

Between decay_end and stop the gain holds at `floor`. Outside [start, stop)
it is 0.

Short Durations
---------------

If a tone is shorter than attack + tail, decay_end would land before
attack_end. The decay end is clamped to the attack end, so the ramp down
collapses to a step to `floor` rather than running backwards in time.
*/

/// Gain the decay ramps toward. Never zero: exponential ramps cannot reach it.
pub const DECAY_FLOOR: f32 = 0.001;

/// Absolute-time gain envelope for one scheduled tone.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneEnvelope {
    pub start: f64,
    pub attack_end: f64,
    pub decay_end: f64,
    pub stop: f64,
    pub peak: f32,
    pub floor: f32,
}

impl ToneEnvelope {
    /// Envelope for a burst at `start` lasting `duration` seconds.
    ///
    /// The attack is `attack` seconds long; the decay finishes `tail` seconds
    /// before the voice stops.
    pub fn burst(start: f64, duration: f64, peak: f32, attack: f64, tail: f64) -> Self {
        let attack_end = start + attack.max(0.0);
        let decay_end = (start + duration - tail).max(attack_end);
        Self {
            start,
            attack_end,
            decay_end,
            stop: start + duration.max(0.0),
            peak,
            floor: DECAY_FLOOR,
        }
    }

    /// Gain at absolute time `t`.
    pub fn gain_at(&self, t: f64) -> f32 {
        if t < self.start || t >= self.stop {
            return 0.0;
        }
        if t < self.attack_end {
            let progress = (t - self.start) / (self.attack_end - self.start);
            return self.peak * progress as f32;
        }
        if t < self.decay_end {
            let progress = (t - self.attack_end) / (self.decay_end - self.attack_end);
            let ratio = (self.floor / self.peak.max(self.floor)) as f64;
            return (self.peak as f64 * ratio.powf(progress)) as f32;
        }
        self.floor.min(self.peak)
    }

    /// Has the voice finished by time `t`?
    #[inline]
    pub fn is_finished(&self, t: f64) -> bool {
        t >= self.stop
    }

    /// Render gains for consecutive samples starting at `t0`.
    pub fn render(&self, out: &mut [f32], t0: f64, sample_rate: f32) {
        let dt = 1.0 / sample_rate as f64;
        for (n, sample) in out.iter_mut().enumerate() {
            *sample = self.gain_at(t0 + n as f64 * dt);
        }
    }
}
