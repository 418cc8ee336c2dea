//! Time signatures and accent groupings
//!
//! A bar of `beats` is split into accent groups written as `+`-separated
//! sizes, e.g. 7/8 as "2+2+3". The first beat of each group is accented.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::theory::tables::COMMON_GROUPINGS;

/// Largest beat count the visualizer accepts.
pub const MAX_BEATS: u8 = 32;

/// The note value that gets one beat (the denominator)
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValue {
    Half,
    Quarter,
    Eighth,
    Sixteenth,
}

impl NoteValue {
    pub const ALL: [NoteValue; 4] = [
        NoteValue::Half,
        NoteValue::Quarter,
        NoteValue::Eighth,
        NoteValue::Sixteenth,
    ];

    pub fn from_denominator(denominator: u8) -> Option<NoteValue> {
        match denominator {
            2 => Some(NoteValue::Half),
            4 => Some(NoteValue::Quarter),
            8 => Some(NoteValue::Eighth),
            16 => Some(NoteValue::Sixteenth),
            _ => None,
        }
    }

    pub fn denominator(self) -> u8 {
        match self {
            NoteValue::Half => 2,
            NoteValue::Quarter => 4,
            NoteValue::Eighth => 8,
            NoteValue::Sixteenth => 16,
        }
    }

    /// Glyph drawn under each beat number
    pub fn symbol(self) -> &'static str {
        match self {
            NoteValue::Half => "𝅗𝅥",
            NoteValue::Quarter => "♩",
            NoteValue::Eighth => "♪",
            NoteValue::Sixteenth => "𝅘𝅥𝅯",
        }
    }

    pub fn next(self) -> NoteValue {
        let index = Self::ALL.iter().position(|&v| v == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

/// Time signature as displayed (beats over note value)
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSignature {
    /// Number of beats per bar (numerator), 1..=32
    pub beats: u8,
    pub note_value: NoteValue,
}

impl TimeSignature {
    /// Standard 4/4 time
    pub const FOUR_FOUR: TimeSignature = TimeSignature {
        beats: 4,
        note_value: NoteValue::Quarter,
    };

    /// 7/8, the classic asymmetric meter
    pub const SEVEN_EIGHT: TimeSignature = TimeSignature {
        beats: 7,
        note_value: NoteValue::Eighth,
    };

    /// Beat count is clamped to 1..=32.
    pub fn new(beats: u8, note_value: NoteValue) -> Self {
        Self {
            beats: beats.clamp(1, MAX_BEATS),
            note_value,
        }
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        TimeSignature::FOUR_FOUR
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.beats, self.note_value.denominator())
    }
}

/// Canonical groupings for `beats`, most common first.
///
/// Counts without a table entry get two options: one group of `beats`, and
/// every beat on its own.
pub fn accent_groupings(beats: u8) -> Vec<String> {
    match COMMON_GROUPINGS.iter().find(|(n, _)| *n == beats) {
        Some((_, options)) => options.iter().map(|s| s.to_string()).collect(),
        None => vec![
            beats.to_string(),
            vec!["1"; beats as usize].join("+"),
        ],
    }
}

/// One beat of a rendered bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Beat {
    /// 1-based position in the bar
    pub number: u32,
    /// First beat of its group
    pub accent: bool,
    /// Which group the beat belongs to
    pub group: usize,
}

/// A parsed grouping such as "3+2+2".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccentGrouping {
    groups: Vec<u32>,
}

impl AccentGrouping {
    /// Parse `+`-delimited positive sizes. `None` on empty, zero or
    /// non-numeric parts.
    pub fn parse(text: &str) -> Option<AccentGrouping> {
        let groups = text
            .split('+')
            .map(|part| part.trim().parse::<u32>().ok().filter(|&n| n > 0))
            .collect::<Option<Vec<u32>>>()?;
        if groups.is_empty() {
            return None;
        }
        Some(AccentGrouping { groups })
    }

    pub fn groups(&self) -> &[u32] {
        &self.groups
    }

    /// Sum of the group sizes.
    pub fn total(&self) -> u32 {
        self.groups.iter().sum()
    }

    /// Numbered beats with their accents.
    pub fn beats(&self) -> Vec<Beat> {
        let mut number = 0;
        let mut beats = Vec::with_capacity(self.total() as usize);
        for (group, &size) in self.groups.iter().enumerate() {
            for i in 0..size {
                number += 1;
                beats.push(Beat {
                    number,
                    accent: i == 0,
                    group,
                });
            }
        }
        beats
    }

    /// Trigger pattern with a 1 on every accent.
    pub fn accent_pattern(&self) -> Vec<bool> {
        self.beats().iter().map(|b| b.accent).collect()
    }
}

impl fmt::Display for AccentGrouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.groups.iter().map(|g| g.to_string()).collect();
        write!(f, "{}", parts.join("+"))
    }
}

/// Signature plus the chosen grouping, as edited in the visualizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meter {
    signature: TimeSignature,
    grouping: String,
}

impl Meter {
    pub fn new(signature: TimeSignature) -> Self {
        let grouping = accent_groupings(signature.beats)
            .into_iter()
            .next()
            .unwrap_or_else(|| signature.beats.to_string());
        Self {
            signature,
            grouping,
        }
    }

    pub fn signature(&self) -> TimeSignature {
        self.signature
    }

    /// The grouping text, e.g. "2+2+3".
    pub fn grouping_text(&self) -> &str {
        &self.grouping
    }

    pub fn grouping(&self) -> Option<AccentGrouping> {
        AccentGrouping::parse(&self.grouping)
    }

    /// Options for the current beat count.
    pub fn options(&self) -> Vec<String> {
        accent_groupings(self.signature.beats)
    }

    /// Change the beat count. The grouping resets to the first option.
    pub fn set_beats(&mut self, beats: u8) {
        *self = Meter::new(TimeSignature::new(beats, self.signature.note_value));
    }

    pub fn set_note_value(&mut self, note_value: NoteValue) {
        self.signature.note_value = note_value;
    }

    /// Pick a grouping by text. Rejected unless it is one of the options.
    pub fn select_grouping(&mut self, grouping: &str) -> bool {
        if self.options().iter().any(|o| o == grouping) {
            self.grouping = grouping.to_string();
            true
        } else {
            false
        }
    }

    /// Step to the next grouping option, wrapping.
    pub fn cycle_grouping(&mut self) {
        let options = self.options();
        let current = options.iter().position(|o| *o == self.grouping).unwrap_or(0);
        if let Some(next) = options.get((current + 1) % options.len().max(1)) {
            self.grouping = next.clone();
        }
    }
}

impl Default for Meter {
    fn default() -> Self {
        Meter::new(TimeSignature::default())
    }
}
