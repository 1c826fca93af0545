//! Static chord and scale templates
//!
//! Chords are looked up by interval signature: the sorted semitone offsets
//! from the root, comma-joined (`"0,4,7"` for a major triad). Lookup is exact;
//! there is no partial matching.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuaverError;

// ============================================================================
// Chord Qualities
// ============================================================================

/// Chord quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Sus2,
    Sus4,
    Dominant7,
    Major7,
    Minor7,
    MinorMajor7,
    HalfDiminished7,
    Sixth,
    Minor6,
}

impl ChordQuality {
    /// Every quality in the catalog, triads first.
    pub const ALL: [ChordQuality; 13] = [
        Self::Major,
        Self::Minor,
        Self::Diminished,
        Self::Augmented,
        Self::Sus2,
        Self::Sus4,
        Self::Dominant7,
        Self::Major7,
        Self::Minor7,
        Self::MinorMajor7,
        Self::HalfDiminished7,
        Self::Sixth,
        Self::Minor6,
    ];

    /// Get chord intervals from root
    pub fn intervals(&self) -> &'static [u8] {
        match self {
            Self::Major => &[0, 4, 7],
            Self::Minor => &[0, 3, 7],
            Self::Diminished => &[0, 3, 6],
            Self::Augmented => &[0, 4, 8],
            Self::Sus2 => &[0, 2, 7],
            Self::Sus4 => &[0, 5, 7],
            Self::Dominant7 => &[0, 4, 7, 10],
            Self::Major7 => &[0, 4, 7, 11],
            Self::Minor7 => &[0, 3, 7, 10],
            Self::MinorMajor7 => &[0, 3, 7, 11],
            Self::HalfDiminished7 => &[0, 3, 6, 10],
            Self::Sixth => &[0, 4, 7, 9],
            Self::Minor6 => &[0, 3, 7, 9],
        }
    }

    /// Symbol appended to the root name. Major has none.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Major => "",
            Self::Minor => "m",
            Self::Diminished => "dim",
            Self::Augmented => "aug",
            Self::Sus2 => "sus2",
            Self::Sus4 => "sus4",
            Self::Dominant7 => "7",
            Self::Major7 => "maj7",
            Self::Minor7 => "m7",
            Self::MinorMajor7 => "m(maj7)",
            Self::HalfDiminished7 => "m7b5",
            Self::Sixth => "6",
            Self::Minor6 => "m6",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Major => "Major",
            Self::Minor => "Minor",
            Self::Diminished => "Diminished",
            Self::Augmented => "Augmented",
            Self::Sus2 => "Sus2",
            Self::Sus4 => "Sus4",
            Self::Dominant7 => "Dominant 7",
            Self::Major7 => "Major 7",
            Self::Minor7 => "Minor 7",
            Self::MinorMajor7 => "Minor-Major 7",
            Self::HalfDiminished7 => "Half-Diminished 7",
            Self::Sixth => "6",
            Self::Minor6 => "Minor 6",
        }
    }

    /// Four-tone qualities (sevenths and sixths).
    pub fn is_tetrad(&self) -> bool {
        self.intervals().len() == 4
    }

    /// Lookup key for this quality, e.g. `"0,4,7,10"`.
    pub fn signature(&self) -> String {
        signature(self.intervals())
    }

    /// Exact-match lookup by signature string.
    pub fn from_signature(signature: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.signature() == signature)
    }
}

/// Build the lookup signature for a set of root-relative offsets.
///
/// Offsets are deduplicated and sorted; the caller is responsible for
/// normalizing them so the root is 0.
pub fn signature(intervals: &[u8]) -> String {
    let mut sorted = intervals.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

// ============================================================================
// Scales
// ============================================================================

/// A named scale: ordered semitone offsets from the tonic, each in 0-11.
///
/// Degree order matters to the quantizer, which resolves ties in favor of
/// the earlier degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleTemplate {
    pub name: String,
    pub degrees: Vec<u8>,
}

impl ScaleTemplate {
    pub fn new(name: impl Into<String>, degrees: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            degrees,
        }
    }

    pub fn major() -> Self {
        ScaleMode::Major.template()
    }

    pub fn natural_minor() -> Self {
        ScaleMode::NaturalMinor.template()
    }

    pub fn major_pentatonic() -> Self {
        ScaleMode::MajorPentatonic.template()
    }

    /// Whether a pitch class (0-11) belongs to the scale.
    pub fn contains(&self, pitch_class: u8) -> bool {
        self.degrees.contains(&(pitch_class % 12))
    }
}

/// Built-in scales/modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScaleMode {
    Major,
    NaturalMinor,
    MajorPentatonic,
    MinorPentatonic,
    HarmonicMinor,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Locrian,
    Blues,
    Chromatic,
}

impl ScaleMode {
    pub const ALL: [ScaleMode; 12] = [
        Self::Major,
        Self::NaturalMinor,
        Self::MajorPentatonic,
        Self::MinorPentatonic,
        Self::HarmonicMinor,
        Self::Dorian,
        Self::Phrygian,
        Self::Lydian,
        Self::Mixolydian,
        Self::Locrian,
        Self::Blues,
        Self::Chromatic,
    ];

    /// Get scale degrees (semitones from tonic)
    pub fn degrees(&self) -> &'static [u8] {
        match self {
            Self::Major => &[0, 2, 4, 5, 7, 9, 11],
            Self::NaturalMinor => &[0, 2, 3, 5, 7, 8, 10],
            Self::MajorPentatonic => &[0, 2, 4, 7, 9],
            Self::MinorPentatonic => &[0, 3, 5, 7, 10],
            Self::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
            Self::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            Self::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
            Self::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            Self::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            Self::Locrian => &[0, 1, 3, 5, 6, 8, 10],
            Self::Blues => &[0, 3, 5, 6, 7, 10],
            Self::Chromatic => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
        }
    }

    /// Identifier accepted by [`FromStr`]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::NaturalMinor => "natural-minor",
            Self::MajorPentatonic => "major-pentatonic",
            Self::MinorPentatonic => "minor-pentatonic",
            Self::HarmonicMinor => "harmonic-minor",
            Self::Dorian => "dorian",
            Self::Phrygian => "phrygian",
            Self::Lydian => "lydian",
            Self::Mixolydian => "mixolydian",
            Self::Locrian => "locrian",
            Self::Blues => "blues",
            Self::Chromatic => "chromatic",
        }
    }

    pub fn template(&self) -> ScaleTemplate {
        ScaleTemplate::new(self.name(), self.degrees().to_vec())
    }
}

impl FromStr for ScaleMode {
    type Err = QuaverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        let wanted = match wanted.as_str() {
            "minor" => "natural-minor",
            "pentatonic" => "major-pentatonic",
            other => other,
        };
        Self::ALL
            .into_iter()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| QuaverError::UnknownScale(s.to_string()))
    }
}
