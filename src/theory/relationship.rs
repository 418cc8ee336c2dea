/*
Chord Relationships
===================

A relationship label reads "<quality> <interval> <quality>", for example
"m IV+ M": start on a minor chord, move up an augmented fourth, land on a
major chord. Each label in the table is tagged with an emotion and a coarse
"spectrum" (Sad ... Good Sounding).

The selector keeps chord, emotion and spectrum in sync. Picking any one of
them pulls the other two from the FIRST table row that matches, so picking the
emotion "Tragic" always lands on "m IV m" even though "m V m" is also tragic.

Translation applies the label to the current key:

    root ──(q1)──→ chord 1
    root + interval ──(q2)──→ chord 2
    relative root ──(q1)──→ relative chord 1, and so on

The relative root is the major or minor relative of the current mode. The
per-mode offset table says how far that relative sits from the mode's root.
*/

use super::chord::{build_triad, SpelledChord, Triad};
use super::scale::{find_matching_modes, Mode, Scale};
use super::tables::{interval_semitones, RelationshipEntry, CHORD_RELATIONSHIPS, CHROMATIC};

/// Which field the user changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipField {
    Chord,
    Emotion,
    Spectrum,
}

/// The three linked selections of the chord-relationship panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipSelector {
    pub chord: String,
    pub emotion: String,
    pub spectrum: String,
}

impl Default for RelationshipSelector {
    fn default() -> Self {
        let first = CHORD_RELATIONSHIPS[0];
        Self {
            chord: first.chord.to_string(),
            emotion: first.emotion.to_string(),
            spectrum: first.spectrum.to_string(),
        }
    }
}

impl RelationshipSelector {
    /// Set one field and sync the other two from the first matching row.
    ///
    /// The chosen field is stored even when no row matches.
    pub fn select(&mut self, field: RelationshipField, value: &str) {
        let matches = |entry: &&RelationshipEntry| match field {
            RelationshipField::Chord => entry.chord == value,
            RelationshipField::Emotion => entry.emotion == value,
            RelationshipField::Spectrum => entry.spectrum == value,
        };
        let found = CHORD_RELATIONSHIPS.iter().find(matches).copied();

        match field {
            RelationshipField::Chord => self.chord = value.to_string(),
            RelationshipField::Emotion => self.emotion = value.to_string(),
            RelationshipField::Spectrum => self.spectrum = value.to_string(),
        }

        if let Some(entry) = found {
            if field != RelationshipField::Chord {
                self.chord = entry.chord.to_string();
            }
            if field != RelationshipField::Emotion {
                self.emotion = entry.emotion.to_string();
            }
            if field != RelationshipField::Spectrum {
                self.spectrum = entry.spectrum.to_string();
            }
        }
    }

    /// Step to the next (or previous) row of the table, by chord label.
    pub fn cycle(&mut self, forward: bool) {
        let len = CHORD_RELATIONSHIPS.len();
        let current = CHORD_RELATIONSHIPS
            .iter()
            .position(|e| e.chord == self.chord)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.select(RelationshipField::Chord, CHORD_RELATIONSHIPS[next].chord);
    }
}

/// A relationship label split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordMovement {
    pub from: Triad,
    pub semitones: u8,
    pub to: Triad,
}

impl ChordMovement {
    /// Parse "M IV+ m". Anything but "M" reads as minor, and an unknown
    /// interval symbol reads as a unison.
    pub fn parse(label: &str) -> Option<ChordMovement> {
        let parts: Vec<&str> = label.split(' ').collect();
        let [from, interval, to] = parts.as_slice() else {
            return None;
        };
        let triad = |s: &str| match Triad::from_symbol(s) {
            Some(Triad::Major) => Triad::Major,
            _ => Triad::Minor,
        };
        Some(ChordMovement {
            from: triad(from),
            semitones: interval_semitones(interval).unwrap_or(0),
            to: triad(to),
        })
    }
}

/// Distance from a mode's root to its relative major and relative minor.
fn relative_offsets(mode: Mode) -> (u8, u8) {
    match mode {
        Mode::Ionian => (0, 9),
        Mode::Dorian => (10, 7),
        Mode::Phrygian => (8, 5),
        Mode::Lydian => (7, 4),
        Mode::Mixolydian => (5, 2),
        Mode::Aeolian => (3, 0),
        Mode::Locrian => (1, 10),
    }
}

/// A relationship label applied to the current key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub chord1: SpelledChord,
    pub chord2: SpelledChord,
    pub relative_chord1: SpelledChord,
    pub relative_chord2: SpelledChord,
    pub relative_root: u8,
    pub is_minor: bool,
    pub target_scale_name: String,
    pub target_notes: Vec<&'static str>,
    pub target_matches: Vec<String>,
}

impl Translation {
    /// Translate `label` against `scale`. `None` when the label is malformed.
    pub fn compute(scale: &Scale, label: &str) -> Option<Translation> {
        let movement = ChordMovement::parse(label)?;
        let root = scale.root();
        let second_root = (root + movement.semitones) % 12;

        let (major_offset, minor_offset) = relative_offsets(scale.mode());
        let is_minor = scale.intervals().contains(&3);
        let relative_root = (root + if is_minor { minor_offset } else { major_offset }) % 12;
        let relative_second = (relative_root + movement.semitones) % 12;

        let target_mode = match movement.to {
            Triad::Major => Mode::Ionian,
            Triad::Minor => Mode::Aeolian,
        };
        let target = Scale::new(second_root, target_mode);
        let target_scale_name = format!(
            "{} {}",
            CHROMATIC[second_root as usize],
            match movement.to {
                Triad::Major => "Major",
                Triad::Minor => "Minor",
            }
        );

        Some(Translation {
            chord1: build_triad(root, movement.from),
            chord2: build_triad(second_root, movement.to),
            relative_chord1: build_triad(relative_root, movement.from),
            relative_chord2: build_triad(relative_second, movement.to),
            relative_root,
            is_minor,
            target_scale_name,
            target_notes: target.note_names().to_vec(),
            target_matches: find_matching_modes(target.note_names()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selecting_emotion_takes_first_matching_row() {
        let mut sel = RelationshipSelector::default();
        sel.select(RelationshipField::Emotion, "Tragic");
        assert_eq!(sel.chord, "m IV m");
        assert_eq!(sel.spectrum, "Sad");
    }

    #[test]
    fn selecting_spectrum_syncs_chord_and_emotion() {
        let mut sel = RelationshipSelector::default();
        sel.select(RelationshipField::Spectrum, "Good Sounding");
        assert_eq!(sel.chord, "M II M");
        assert_eq!(sel.emotion, "Protagonism");
    }

    #[test]
    fn unknown_value_is_kept_without_sync() {
        let mut sel = RelationshipSelector::default();
        sel.select(RelationshipField::Emotion, "Bored");
        assert_eq!(sel.emotion, "Bored");
        assert_eq!(sel.chord, "M III m");
    }

    #[test]
    fn parses_augmented_fourth_label() {
        let movement = ChordMovement::parse("m IV+ M").unwrap();
        assert_eq!(movement.from, Triad::Minor);
        assert_eq!(movement.semitones, 6);
        assert_eq!(movement.to, Triad::Major);
        assert!(ChordMovement::parse("M III").is_none());
    }

    #[test]
    fn translation_in_c_major() {
        let scale = Scale::default();
        let t = Translation::compute(&scale, "M III m").unwrap();
        assert_eq!(t.chord1.name, "C Major");
        assert_eq!(t.chord2.name, "E minor");
        assert!(!t.is_minor);
        assert_eq!(t.relative_root, 0);
        assert_eq!(t.target_scale_name, "E Minor");
        assert_eq!(t.target_notes, vec!["E", "F#", "G", "A", "B", "C", "D"]);
        assert!(t.target_matches.contains(&"G Ionian (Major)".to_string()));
    }

    #[test]
    fn translation_uses_minor_relative_for_minor_modes() {
        let scale = Scale::new(9, Mode::Aeolian);
        let t = Translation::compute(&scale, "m V m").unwrap();
        assert!(t.is_minor);
        assert_eq!(t.relative_root, 9);
        assert_eq!(t.relative_chord2.name, "E minor");
    }

    #[test]
    fn cycling_wraps_around_the_table() {
        let mut sel = RelationshipSelector::default();
        sel.cycle(false);
        assert_eq!(sel.chord, "M V M");
        sel.cycle(true);
        assert_eq!(sel.chord, "M III m");
    }
}
