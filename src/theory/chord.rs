//! Chord dictionary lookups and simple triad spelling.

use super::scale::REFERENCE_MIDI;
use super::tables::{ChordQuality, CHROMATIC};

/// Triad flavour used by relationship labels ("M" / "m").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Triad {
    Major,
    Minor,
}

impl Triad {
    /// Parse the single-letter quality used in relationship labels.
    pub fn from_symbol(symbol: &str) -> Option<Triad> {
        match symbol {
            "M" => Some(Triad::Major),
            "m" => Some(Triad::Minor),
            _ => None,
        }
    }

    fn third(self) -> u8 {
        match self {
            Triad::Major => 4,
            Triad::Minor => 3,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Triad::Major => "Major",
            Triad::Minor => "minor",
        }
    }
}

/// A spelled triad, e.g. name "C Major", spelling "C - E - G".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpelledChord {
    pub name: String,
    pub spelling: String,
}

/// Spell a root-position triad on a chromatic root.
pub fn build_triad(root: u8, triad: Triad) -> SpelledChord {
    let root = root % 12;
    let note = |offset: u8| CHROMATIC[((root + offset) % 12) as usize];
    SpelledChord {
        name: format!("{} {}", note(0), triad.label()),
        spelling: format!("{} - {} - {}", note(0), note(triad.third()), note(7)),
    }
}

/// Note names of a chord quality built on `root`.
pub fn chord_note_names(root: u8, quality: &ChordQuality) -> Vec<&'static str> {
    quality
        .intervals
        .iter()
        .map(|&i| CHROMATIC[((root % 12 + i) % 12) as usize])
        .collect()
}

/// MIDI pitches of a chord quality built on `root` in the reference octave.
pub fn chord_midi_notes(root: u8, quality: &ChordQuality) -> Vec<u8> {
    quality
        .intervals
        .iter()
        .map(|&i| REFERENCE_MIDI + root % 12 + i)
        .collect()
}

/// Which of the 12 semitone slots above the root a chord occupies.
pub fn chord_mask(quality: &ChordQuality) -> [bool; 12] {
    let mut mask = [false; 12];
    for &i in quality.intervals {
        if let Some(slot) = mask.get_mut(i as usize) {
            *slot = true;
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::tables::chord_quality;

    #[test]
    fn spells_major_and_minor_triads() {
        let c = build_triad(0, Triad::Major);
        assert_eq!(c.name, "C Major");
        assert_eq!(c.spelling, "C - E - G");

        let a = build_triad(9, Triad::Minor);
        assert_eq!(a.name, "A minor");
        assert_eq!(a.spelling, "A - C - E");
    }

    #[test]
    fn dominant_seventh_on_g() {
        let quality = chord_quality("Dominant Seventh").unwrap();
        assert_eq!(chord_note_names(7, quality), vec!["G", "B", "D", "F"]);
        assert_eq!(chord_midi_notes(7, quality), vec![67, 71, 74, 77]);
    }

    #[test]
    fn mask_marks_interval_slots() {
        let quality = chord_quality("Power").unwrap();
        let mask = chord_mask(quality);
        assert!(mask[0] && mask[7]);
        assert_eq!(mask.iter().filter(|&&on| on).count(), 2);
    }
}
