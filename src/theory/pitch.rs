/// Reference pitch for equal-tempered tuning.
pub const A4_HZ: f32 = 440.0;
/// MIDI note number of A4.
pub const A4_MIDI: f32 = 69.0;

/// Convert a MIDI note number to frequency in Hz.
/// A4 = 440 Hz = MIDI note 69
#[inline]
pub fn midi_to_freq(note: f32) -> f32 {
    A4_HZ * 2.0_f32.powf((note - A4_MIDI) / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_is_exactly_440() {
        assert_eq!(midi_to_freq(69.0), 440.0);
    }

    #[test]
    fn middle_c() {
        let freq = midi_to_freq(60.0);
        assert!((freq - 261.626).abs() < 0.01, "got {freq}");
    }

    #[test]
    fn octave_doubles() {
        assert!((midi_to_freq(81.0) - 880.0).abs() < 1e-3);
        assert!((midi_to_freq(57.0) - 220.0).abs() < 1e-3);
    }
}
