//! Read-only reference tables consumed by the rest of the crate.
//!
//! Nothing here is computed. Scales, chords, and the sequencer only index
//! into these tables.

/// The twelve chromatic pitch-class names, index 0 = C.
pub const CHROMATIC: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Diatonic mode names paired with their semitone offsets from the root.
pub const MODE_INTERVALS: [(&str, [u8; 7]); 7] = [
    ("Ionian (Major)", [0, 2, 4, 5, 7, 9, 11]),
    ("Dorian", [0, 2, 3, 5, 7, 9, 10]),
    ("Phrygian", [0, 1, 3, 5, 7, 8, 10]),
    ("Lydian", [0, 2, 4, 6, 7, 9, 11]),
    ("Mixolydian", [0, 2, 4, 5, 7, 9, 10]),
    ("Aeolian (Minor)", [0, 2, 3, 5, 7, 8, 10]),
    ("Locrian", [0, 1, 3, 5, 6, 8, 10]),
];

/// One entry of the extended chord dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordQuality {
    pub name: &'static str,
    pub intervals: &'static [u8],
    pub description: &'static str,
}

pub const EXTENDED_CHORDS: [ChordQuality; 16] = [
    ChordQuality {
        name: "Major",
        intervals: &[0, 4, 7],
        description: "Happy, stable, and resolved. The foundation of Western music.",
    },
    ChordQuality {
        name: "Major Sixth",
        intervals: &[0, 4, 7, 9],
        description: "Warm, playful, and sweet. Often used in vintage pop and Hawaiian music.",
    },
    ChordQuality {
        name: "Major Seventh",
        intervals: &[0, 4, 7, 11],
        description: "Lush, dreamy, and romantic. Very common in jazz and lo-fi.",
    },
    ChordQuality {
        name: "Minor",
        intervals: &[0, 3, 7],
        description: "Sad, melancholic, and serious.",
    },
    ChordQuality {
        name: "Minor Sixth",
        intervals: &[0, 3, 7, 9],
        description: "Mysterious and dark, often associated with spy films or noir soundtracks.",
    },
    ChordQuality {
        name: "Minor Seventh",
        intervals: &[0, 3, 7, 10],
        description: "Smooth, mellow, and slightly mournful. A staple of R&B and jazz.",
    },
    ChordQuality {
        name: "Diminished",
        intervals: &[0, 3, 6],
        description: "Tense, spooky, and highly unstable. Sounds like impending danger.",
    },
    ChordQuality {
        name: "Diminished Seventh",
        intervals: &[0, 3, 6, 9],
        description: "Dramatic, suspenseful, and classic horror-villain music.",
    },
    ChordQuality {
        name: "Half-Diminished",
        intervals: &[0, 3, 6, 10],
        description: "Tragic and wandering. Common in deeply emotional, romantic progressions.",
    },
    ChordQuality {
        name: "Augmented",
        intervals: &[0, 4, 8],
        description: "Floating, dream-like, and ambiguous. Sounds like stepping into a magical portal.",
    },
    ChordQuality {
        name: "Aug. Seventh",
        intervals: &[0, 4, 8, 10],
        description: "Highly tense and pulling, forcefully pushing the listener toward a resolution.",
    },
    ChordQuality {
        name: "Aug. Maj. Seventh",
        intervals: &[0, 4, 8, 11],
        description: "Complex, highly dissonant but lush. Often sounds sci-fi or otherworldly.",
    },
    ChordQuality {
        name: "Dominant Seventh",
        intervals: &[0, 4, 7, 10],
        description: "Bluesy, energetic, and restless. Strongly wants to resolve to a major chord.",
    },
    ChordQuality {
        name: "Suspended 2",
        intervals: &[0, 2, 7],
        description: "Open, airy, and hopeful. Lacks the definitive emotion of a Major/Minor 3rd.",
    },
    ChordQuality {
        name: "Suspended 4",
        intervals: &[0, 5, 7],
        description: "Unresolved and floating. Feels like it's holding its breath before resolving.",
    },
    ChordQuality {
        name: "Power",
        intervals: &[0, 7],
        description: "Strong, neutral, and punchy. The driving backbone of rock and heavy metal.",
    },
];

/// A two-chord movement and the feeling it tends to evoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipEntry {
    pub chord: &'static str,
    pub emotion: &'static str,
    pub spectrum: &'static str,
}

const fn rel(chord: &'static str, emotion: &'static str, spectrum: &'static str) -> RelationshipEntry {
    RelationshipEntry {
        chord,
        emotion,
        spectrum,
    }
}

pub const CHORD_RELATIONSHIPS: [RelationshipEntry; 44] = [
    rel("M III m", "Sadness", "Sad"),
    rel("m IV m", "Tragic", "Sad"),
    rel("m V m", "Tragic", "Sad"),
    rel("m V M", "Bitter Sweet", "Sad"),
    rel("m vii M", "Bitter Sweet", "Sad"),
    rel("M II m", "Bitter Sweet", "Sad"),
    rel("m ii m", "Mysterious and Tense", "Evil Sounding"),
    rel("m VII m", "Mysterious and Tense", "Evil Sounding"),
    rel("m VI M", "Mysterious and Tense", "Evil Sounding"),
    rel("M iii m", "Mysterious and Tense", "Evil Sounding"),
    rel("m II m", "A Little Uneasy", "Evil Sounding"),
    rel("m vii m", "A Little Uneasy", "Evil Sounding"),
    rel("m iii m", "Otherworldly and Ominous", "Evil Sounding"),
    rel("m VI m", "Otherworldly and Ominous", "Evil Sounding"),
    rel("m III m", "Ominous and Dark Sounding", "Evil Sounding"),
    rel("m vi m", "Ominous and Dark Sounding", "Evil Sounding"),
    rel("m IV+ m", "Antagonism and Danger", "Evil Sounding"),
    rel("m VII M", "Dramatic", "Evil/Neutral Sounding"),
    rel("M ii m", "Dramatic", "Evil/Neutral Sounding"),
    rel("m II M", "Mysterious/Dark comedy", "Evil/Neutral Sounding"),
    rel("M vii m", "Mysterious/Dark comedy", "Evil/Neutral Sounding"),
    rel("m IV+ M", "Outer Space", "Evil/Neutral Sounding"),
    rel("M IV+ m", "Outer Space", "Evil/Neutral Sounding"),
    rel("M ii M", "Exotic/Cowboy/Enchanted Forest", "Neutral Sounding"),
    rel("M VII M", "Exotic/Cowboy/Enchanted Forest", "Neutral Sounding"),
    rel("M IV+ M", "Outer Space (Neutral)", "Neutral Sounding"),
    rel("M VII m", "Cautious but Optimistic", "Neutral Sounding"),
    rel("m ii M", "Cautious but Optimistic", "Neutral Sounding"),
    rel("m iii M", "Rising Action/Tension", "Neutral Sounding"),
    rel("m III M", "Powerful and Mysterious", "Neutral Sounding"),
    rel("M vi m", "Powerful and Mysterious", "Neutral Sounding"),
    rel("m vi M", "Resolution", "Neutral Sounding"),
    rel("M IV m", "Romantic/Exotic", "Good/Neutral Sounding"),
    rel("M VI m", "Other worldly/Heavenly", "Good/Neutral Sounding"),
    rel("m IV M", "Wonder and Transcendence", "Good/Neutral Sounding"),
    rel("M V m", "Wonder and Transcendence", "Good/Neutral Sounding"),
    rel("M II M", "Protagonism", "Good Sounding"),
    rel("M vii M", "Protagonism", "Good Sounding"),
    rel("M iii M", "Heroic", "Good Sounding"),
    rel("M VI M", "Heroic", "Good Sounding"),
    rel("M III M", "Fantastical", "Good Sounding"),
    rel("M vi M", "Fantastical", "Good Sounding"),
    rel("M IV M", "Good Energy", "Good Sounding"),
    rel("M V M", "Good Energy", "Good Sounding"),
];

/// Roman-numeral interval symbols used in relationship labels, in semitones.
pub const INTERVAL_SYMBOLS: [(&str, u8); 11] = [
    ("ii", 1),
    ("II", 2),
    ("iii", 3),
    ("III", 4),
    ("IV", 5),
    ("IV+", 6),
    ("V", 7),
    ("vi", 8),
    ("VI", 9),
    ("vii", 10),
    ("VII", 11),
];

/// Canonical accent groupings keyed by beat count.
pub const COMMON_GROUPINGS: [(u8, &[&str]); 11] = [
    (2, &["2", "1+1"]),
    (3, &["3", "1+1+1"]),
    (4, &["4", "2+2", "3+1", "1+3"]),
    (5, &["3+2", "2+3"]),
    (6, &["3+3", "2+2+2"]),
    (7, &["3+2+2", "2+3+2", "2+2+3"]),
    (8, &["3+3+2", "2+3+3", "3+2+3", "2+2+2+2", "4+4"]),
    (9, &["3+3+3", "2+2+2+3", "2+2+3+2", "2+3+2+2", "3+2+2+2"]),
    (10, &["3+3+2+2", "3+2+2+3", "2+2+3+3", "2+3+3+2"]),
    (11, &["3+3+3+2", "3+3+2+3", "3+2+3+3", "2+3+3+3"]),
    (12, &["3+3+3+3", "4+4+4", "2+2+2+2+2+2"]),
];

/// Looks up the semitone distance for an interval symbol.
pub fn interval_semitones(symbol: &str) -> Option<u8> {
    INTERVAL_SYMBOLS
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|&(_, semis)| semis)
}

/// Looks up a chord quality by its dictionary name.
pub fn chord_quality(name: &str) -> Option<&'static ChordQuality> {
    EXTENDED_CHORDS.iter().find(|q| q.name == name)
}
