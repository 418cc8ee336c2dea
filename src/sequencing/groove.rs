/*
Groove Melody Generator
=======================

A deterministic melody is built in two steps from a seed:

  1. Rhythm. Either a fixed preset pattern (1 = trigger, 0 = rest) or the
     current accent grouping. For a grouping, the first slot of every group
     always triggers and every other slot triggers when rng() > 0.6:

         "3+2+2"   ■ ? ? ■ ? ■ ?

  2. Pitch. Each triggered slot takes scale degree floor(rng() * 7).

Both steps draw from one generator seeded with the user's integer, so the same
seed, source and scale always give the same melody. The rhythm draws happen
before any pitch draws.

The melody compiles to a PlaybackGrid with at most one frequency per slot,
which the ordinary transport can play.
*/

use std::rc::Rc;

use log::debug;

use super::grid::PlaybackGrid;
use super::input::{clamp_bpm, DEFAULT_BPM};
use super::time_signature::AccentGrouping;
use crate::theory::midi_to_freq;
use crate::theory::scale::Scale;
use crate::transport::scheduler::TickSource;

/// Seed a new groove starts with.
pub const DEFAULT_SEED: i64 = 12345;

/// Chance threshold for the inner slots of a grouping.
const FILL_THRESHOLD: f32 = 0.6;

/// A named fixed rhythm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroovePreset {
    pub name: &'static str,
    pub description: &'static str,
    pub pattern: &'static [u8],
}

pub const GROOVE_PRESETS: [GroovePreset; 5] = [
    GroovePreset {
        name: "Folk Happy",
        description: "Bouncy major-key skip: strong downbeats with pickups into each half bar.",
        pattern: &[1, 0, 1, 1, 1, 0, 1, 0, 1, 0, 1, 1, 1, 0, 0, 0],
    },
    GroovePreset {
        name: "Four on the Floor",
        description: "A note on every beat. Steady and danceable.",
        pattern: &[1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0],
    },
    GroovePreset {
        name: "Tresillo",
        description: "The 3+3+2 cell behind habanera, reggaeton and much of pop.",
        pattern: &[1, 0, 0, 1, 0, 0, 1, 0, 1, 0, 0, 1, 0, 0, 1, 0],
    },
    GroovePreset {
        name: "Syncopated Funk",
        description: "Off-beat sixteenths that push against the pulse.",
        pattern: &[1, 0, 0, 1, 0, 1, 0, 0, 1, 0, 1, 0, 0, 1, 0, 1],
    },
    GroovePreset {
        name: "Waltz",
        description: "Three beats to the bar with a lilt on the downbeat.",
        pattern: &[1, 0, 0, 0, 1, 0, 1, 0, 0, 0, 1, 0],
    },
];

/// Look a preset up by name.
pub fn groove_preset(name: &str) -> Option<&'static GroovePreset> {
    GROOVE_PRESETS.iter().find(|p| p.name == name)
}

/// Seeded generator yielding floats in [0, 1).
pub struct GrooveRng(oorandom::Rand32);

impl GrooveRng {
    pub fn new(seed: i64) -> Self {
        Self(oorandom::Rand32::new(seed as u64))
    }

    pub fn next_f32(&mut self) -> f32 {
        self.0.rand_float()
    }
}

/// Where the rhythm comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrooveSource {
    Preset(&'static GroovePreset),
    Grouping(AccentGrouping),
}

/// One sounding slot of a melody.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MelodyNote {
    /// 0-based index into the scale
    pub degree: usize,
    pub midi: u8,
    pub name: &'static str,
}

/// Build the trigger pattern for `source`, drawing from `rng` as needed.
pub fn rhythm(source: &GrooveSource, rng: &mut GrooveRng) -> Vec<bool> {
    match source {
        GrooveSource::Preset(preset) => preset.pattern.iter().map(|&p| p != 0).collect(),
        GrooveSource::Grouping(grouping) => {
            let mut pattern = Vec::with_capacity(grouping.total() as usize);
            for &size in grouping.groups() {
                pattern.push(true);
                for _ in 1..size {
                    pattern.push(rng.next_f32() > FILL_THRESHOLD);
                }
            }
            pattern
        }
    }
}

/// Generate a melody: one optional note per slot.
pub fn generate_melody(source: &GrooveSource, seed: i64, scale: &Scale) -> Vec<Option<MelodyNote>> {
    let mut rng = GrooveRng::new(seed);
    let pattern = rhythm(source, &mut rng);
    let midi = scale.midi_notes();
    let names = scale.note_names();

    pattern
        .into_iter()
        .map(|triggered| {
            if !triggered || midi.is_empty() {
                return None;
            }
            let degree = ((rng.next_f32() * midi.len() as f32) as usize).min(midi.len() - 1);
            Some(MelodyNote {
                degree,
                midi: midi[degree],
                name: names.get(degree).copied().unwrap_or(""),
            })
        })
        .collect()
}

/// Compile a melody into a grid the transport can play.
pub fn melody_grid(melody: &[Option<MelodyNote>]) -> PlaybackGrid {
    PlaybackGrid::from_ticks(
        melody
            .iter()
            .map(|note| note.iter().map(|n| midi_to_freq(n.midi as f32)).collect())
            .collect(),
    )
}

/// Groove panel state: source choice, seed, tempo and the current melody.
pub struct Groove {
    preset: &'static GroovePreset,
    follow_grouping: bool,
    seed: i64,
    bpm: f64,
    melody: Vec<Option<MelodyNote>>,
    grid: Rc<PlaybackGrid>,
}

impl Groove {
    pub fn new() -> Self {
        Self {
            preset: &GROOVE_PRESETS[0],
            follow_grouping: false,
            seed: DEFAULT_SEED,
            bpm: DEFAULT_BPM as f64,
            melody: Vec::new(),
            grid: Rc::new(PlaybackGrid::default()),
        }
    }

    pub fn preset(&self) -> &'static GroovePreset {
        self.preset
    }

    pub fn follows_grouping(&self) -> bool {
        self.follow_grouping
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn melody(&self) -> &[Option<MelodyNote>] {
        &self.melody
    }

    /// Names of the sounding notes, joined for display.
    pub fn sequence_text(&self) -> String {
        let names: Vec<&str> = self.melody.iter().flatten().map(|n| n.name).collect();
        names.join(" - ")
    }

    pub fn select_preset(&mut self, name: &str) -> bool {
        match groove_preset(name) {
            Some(preset) => {
                self.preset = preset;
                true
            }
            None => false,
        }
    }

    pub fn cycle_preset(&mut self) {
        let index = GROOVE_PRESETS
            .iter()
            .position(|p| p.name == self.preset.name)
            .unwrap_or(0);
        self.preset = &GROOVE_PRESETS[(index + 1) % GROOVE_PRESETS.len()];
    }

    pub fn set_follow_grouping(&mut self, follow: bool) {
        self.follow_grouping = follow;
    }

    pub fn set_seed(&mut self, seed: i64) {
        self.seed = seed;
    }

    /// Non-positive or non-finite tempos fall back to 120; others are held
    /// to 1..=999.
    pub fn set_bpm(&mut self, bpm: f64) {
        self.bpm = clamp_bpm(bpm);
    }

    /// Rebuild the melody from the current settings.
    ///
    /// `grouping` is only used when following the time signature; if it is
    /// missing the preset is used instead.
    pub fn regenerate(&mut self, scale: &Scale, grouping: Option<&AccentGrouping>) {
        let source = match (self.follow_grouping, grouping) {
            (true, Some(grouping)) => GrooveSource::Grouping(grouping.clone()),
            _ => GrooveSource::Preset(self.preset),
        };
        self.melody = generate_melody(&source, self.seed, scale);
        self.grid = Rc::new(melody_grid(&self.melody));
        debug!(
            "groove regenerated: seed {}, {} slots, {}",
            self.seed,
            self.melody.len(),
            self.sequence_text()
        );
    }
}

impl Default for Groove {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for Groove {
    fn bpm(&self) -> f64 {
        self.bpm
    }

    fn grid(&self) -> Rc<PlaybackGrid> {
        Rc::clone(&self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::scale::Mode;

    #[test]
    fn same_seed_same_melody() {
        let scale = Scale::default();
        let source = GrooveSource::Preset(&GROOVE_PRESETS[0]);
        assert_eq!(
            generate_melody(&source, 42, &scale),
            generate_melody(&source, 42, &scale)
        );
    }

    #[test]
    fn preset_rhythm_is_respected() {
        let scale = Scale::new(2, Mode::Dorian);
        let preset = groove_preset("Four on the Floor").unwrap();
        let melody = generate_melody(&GrooveSource::Preset(preset), 7, &scale);
        assert_eq!(melody.len(), 16);
        for (slot, note) in melody.iter().enumerate() {
            assert_eq!(note.is_some(), slot % 4 == 0, "slot {slot}");
            if let Some(note) = note {
                assert!(note.degree < 7);
                assert_eq!(note.midi, scale.midi_notes()[note.degree]);
                assert_eq!(note.name, scale.note_names()[note.degree]);
            }
        }
    }

    #[test]
    fn grouping_accents_always_trigger() {
        let grouping = AccentGrouping::parse("3+2+2").unwrap();
        for seed in 0..20 {
            let mut rng = GrooveRng::new(seed);
            let pattern = rhythm(&GrooveSource::Grouping(grouping.clone()), &mut rng);
            assert_eq!(pattern.len(), 7);
            assert!(pattern[0] && pattern[3] && pattern[5], "seed {seed}");
        }
    }

    #[test]
    fn rng_stays_in_unit_interval() {
        let mut rng = GrooveRng::new(-3);
        for _ in 0..1000 {
            let x = rng.next_f32();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn melody_grid_has_one_tone_per_note() {
        let mut groove = Groove::new();
        groove.regenerate(&Scale::default(), None);
        let grid = groove.grid();
        assert_eq!(grid.len(), groove.melody().len());
        let notes = groove.melody().iter().flatten().count();
        assert_eq!(grid.event_count(), notes);
        assert_eq!(groove.sequence_text().split(" - ").count(), notes);
    }

    #[test]
    fn following_grouping_uses_its_length() {
        let mut groove = Groove::new();
        groove.set_follow_grouping(true);
        let grouping = AccentGrouping::parse("3+3+2").unwrap();
        groove.regenerate(&Scale::default(), Some(&grouping));
        assert_eq!(groove.melody().len(), 8);

        groove.regenerate(&Scale::default(), None);
        assert_eq!(groove.melody().len(), groove.preset().pattern.len());
    }

    #[test]
    fn preset_selection() {
        let mut groove = Groove::new();
        assert_eq!(groove.preset().name, "Folk Happy");
        assert!(groove.select_preset("Waltz"));
        assert!(!groove.select_preset("Polka"));
        groove.cycle_preset();
        assert_eq!(groove.preset().name, "Folk Happy");
    }

    #[test]
    fn tempo_is_bounded() {
        let mut groove = Groove::new();
        groove.set_bpm(1.0e7);
        assert_eq!(groove.bpm(), 999.0);
        groove.set_bpm(-3.0);
        assert_eq!(groove.bpm(), 120.0);
    }
}
