/*
Scales and Modes
================

A scale here is always one of the seven diatonic modes, rooted on one of the
twelve pitch classes:

    root (0-11)  +  mode intervals [0, 2, 4, 5, 7, 9, 11]
         │
         ├──→ note names   CHROMATIC[(root + s) % 12]   e.g. C D E F G A B
         └──→ MIDI pitches 60 + root + s                 e.g. 60 62 64 ...

Pitches are anchored to the octave of middle C (MIDI 60) so a root of B gives
MIDI 71 for degree 1. The seventh degree can therefore land as high as 82.

The scale is the only piece of shared musical state the sequencer reads: a
track points at a 1-indexed degree, and the grid compiler resolves that degree
through `midi_notes()`.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::tables::{CHROMATIC, MODE_INTERVALS};

/// MIDI note number of degree 1 when the root is C.
pub const REFERENCE_MIDI: u8 = 60;

/// Number of degrees in every diatonic scale.
pub const SCALE_DEGREES: usize = 7;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Ionian,
        Mode::Dorian,
        Mode::Phrygian,
        Mode::Lydian,
        Mode::Mixolydian,
        Mode::Aeolian,
        Mode::Locrian,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Display name, e.g. "Aeolian (Minor)".
    pub fn name(self) -> &'static str {
        MODE_INTERVALS[self.index()].0
    }

    /// Semitone offsets from the root for each degree.
    pub fn intervals(self) -> [u8; 7] {
        MODE_INTERVALS[self.index()].1
    }

    /// Find a mode by display name or by its short name ("dorian", "minor").
    pub fn from_name(name: &str) -> Option<Mode> {
        let needle = name.trim().to_ascii_lowercase();
        Mode::ALL.into_iter().find(|mode| {
            let full = mode.name().to_ascii_lowercase();
            full == needle
                || full.split_whitespace().next() == Some(needle.as_str())
                || full.contains(&format!("({needle})"))
        })
    }

    /// Cycle to the next mode in table order.
    pub fn next(self) -> Mode {
        Mode::ALL[(self.index() + 1) % Mode::ALL.len()]
    }

    /// Cycle to the previous mode in table order.
    pub fn prev(self) -> Mode {
        Mode::ALL[(self.index() + Mode::ALL.len() - 1) % Mode::ALL.len()]
    }
}

/// A rooted diatonic scale and its derived note names and pitches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scale {
    root: u8,
    mode: Mode,
    note_names: [&'static str; SCALE_DEGREES],
    midi_notes: [u8; SCALE_DEGREES],
}

impl Scale {
    /// Build a scale. `root` is a chromatic index and wraps into 0-11.
    pub fn new(root: u8, mode: Mode) -> Self {
        let root = root % 12;
        let intervals = mode.intervals();
        let note_names = intervals.map(|s| CHROMATIC[((root + s) % 12) as usize]);
        let midi_notes = intervals.map(|s| REFERENCE_MIDI + root + s);

        Self {
            root,
            mode,
            note_names,
            midi_notes,
        }
    }

    pub fn root(&self) -> u8 {
        self.root
    }

    pub fn root_name(&self) -> &'static str {
        CHROMATIC[self.root as usize]
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn intervals(&self) -> [u8; 7] {
        self.mode.intervals()
    }

    pub fn note_names(&self) -> &[&'static str] {
        &self.note_names
    }

    pub fn midi_notes(&self) -> &[u8] {
        &self.midi_notes
    }

    /// Pitch for a 1-indexed degree, `None` when the degree is out of range.
    pub fn degree_midi(&self, degree: u8) -> Option<u8> {
        let idx = (degree as usize).checked_sub(1)?;
        self.midi_notes.get(idx).copied()
    }

    /// Same scale, different root.
    pub fn with_root(&self, root: u8) -> Self {
        Scale::new(root, self.mode)
    }

    /// Same root, different mode.
    pub fn with_mode(&self, mode: Mode) -> Self {
        Scale::new(self.root, mode)
    }

    /// Heading line such as "C Ionian (Major): C — D — E — F — G — A — B".
    pub fn describe(&self) -> String {
        format!(
            "{} {}: {}",
            self.root_name(),
            self.mode.name(),
            self.note_names.join(" — ")
        )
    }
}

impl Default for Scale {
    fn default() -> Self {
        Scale::new(0, Mode::Ionian)
    }
}

/// Every "<root> <mode>" whose pitch-class set equals the given note names.
///
/// Ordered by root (C first), then by mode table order.
pub fn find_matching_modes(notes: &[&str]) -> Vec<String> {
    let mut target: Vec<&str> = notes.to_vec();
    target.sort_unstable();
    target.dedup();

    let mut matches = Vec::new();
    for root in 0..12u8 {
        for mode in Mode::ALL {
            let scale = Scale::new(root, mode);
            let mut generated: Vec<&str> = scale.note_names().to_vec();
            generated.sort_unstable();
            generated.dedup();
            if generated == target {
                matches.push(format!("{} {}", scale.root_name(), mode.name()));
            }
        }
    }
    matches
}
