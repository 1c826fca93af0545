//! Genre-driven chord progression generation
//!
//! A progression is a list of chord-root degrees, stored as semitone offsets
//! from the key's tonic (`[0, 5, 7, 0]` is I-IV-V-I). Each chord occupies
//! four steps at one step per quarter note.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::ChordQuality;
use crate::chord::build_chord;
use crate::error::{QuaverError, Result};
use crate::pitch::{pitch_class_name, Pitch, MIDDLE_C, NOTE_NAMES};
use crate::random::RandomSource;
use crate::sequence::{Note, NoteSequence};

/// Steps each chord lasts
pub const STEPS_PER_CHORD: u32 = 4;

// ============================================================================
// Key
// ============================================================================

/// One of the 12 chromatic keys, spelled with sharps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Key(u8);

impl Key {
    pub const NAMES: [&'static str; 12] = NOTE_NAMES;

    pub fn from_pitch_class(pitch_class: u8) -> Self {
        Self(pitch_class % 12)
    }

    /// Parse a key name such as `"F#"` (case-insensitive, no flats).
    pub fn from_name(name: &str) -> Result<Self> {
        let wanted = name.trim();
        NOTE_NAMES
            .iter()
            .position(|n| n.eq_ignore_ascii_case(wanted))
            .map(|pc| Self::from_pitch_class(pc as u8))
            .ok_or_else(|| QuaverError::UnknownKey(name.to_string()))
    }

    /// Parse a key name, falling back to C for anything unrecognized.
    pub fn from_name_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|e| {
            tracing::warn!("{}; using C", e);
            Self::default()
        })
    }

    pub fn pitch_class(&self) -> u8 {
        self.0
    }

    pub fn name(&self) -> &'static str {
        pitch_class_name(self.0)
    }

    /// Pitch of the tonic in octave 4 (`C -> 60`, `B -> 71`)
    pub fn offset(&self) -> Pitch {
        MIDDLE_C + self.0 as Pitch
    }
}

impl FromStr for Key {
    type Err = QuaverError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Genre
// ============================================================================

/// Progression style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    #[default]
    Pop,
    Jazz,
    Classical,
    Blues,
}

impl Genre {
    pub const ALL: [Genre; 4] = [Self::Pop, Self::Jazz, Self::Classical, Self::Blues];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pop => "pop",
            Self::Jazz => "jazz",
            Self::Classical => "classical",
            Self::Blues => "blues",
        }
    }

    /// Parse a genre name, falling back to pop for anything unrecognized.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|e| {
            tracing::warn!("{}; using pop", e);
            Self::Pop
        })
    }

    /// Degree sequences this genre picks from
    pub fn templates(&self) -> &'static [&'static [i32]] {
        match self {
            Self::Pop => &[
                &[0, 5, 7, 0], // I-IV-V-I
                &[0, 7, 9, 5], // I-V-vi-IV
                &[0, 9, 5, 7], // I-vi-IV-V
                &[9, 5, 0, 7], // vi-IV-I-V
            ],
            Self::Jazz => &[
                &[2, 7, 0],    // ii-V-I
                &[0, 9, 2, 7], // I-VI-ii-V
                &[4, 9, 2, 7], // iii-VI-ii-V
                &[2, 7, 0, 9], // ii-V-I-VI
            ],
            Self::Classical => &[
                &[0, 5, 7, 0],
                &[0, 2, 7, 0],
                &[0, 9, 2, 7, 0],
                &[0, 5, 11, 0],
            ],
            Self::Blues => &[
                &[0, 0, 0, 0, 5, 5, 0, 0, 7, 5, 0, 7], // 12-bar
                &[0, 5, 0, 0, 5, 5, 0, 0, 7, 5, 0, 0], // quick change
                &[0, 0, 5, 5, 0, 7, 0, 7],             // 8-bar
            ],
        }
    }
}

impl FromStr for Genre {
    type Err = QuaverError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|g| g.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| QuaverError::UnknownGenre(s.to_string()))
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Progression rules
// ============================================================================

/// Resize a degree sequence to `length` chords.
///
/// Shorter requests truncate. Longer requests grow the progression one chord
/// at a time, each new chord copying index `len % (len / 2)` of the
/// progression built so far, where `len` is its current length. For a
/// four-chord template this alternates the first two chords rather than
/// wrapping around the whole template.
pub fn adjust_length(template: &[i32], length: usize) -> Vec<i32> {
    let mut progression: Vec<i32> = template.iter().copied().take(length).collect();
    if progression.is_empty() {
        return progression;
    }

    while progression.len() < length {
        let len = progression.len();
        let half = len / 2;
        let idx = if half == 0 { 0 } else { len % half };
        progression.push(progression[idx]);
    }

    progression
}

/// Pick a chord quality for a degree.
///
/// The rules test the degree's semitone value mod 12. In jazz the minor-seventh
/// rule is checked first, so degree 5 gets a minor seventh. Outside jazz,
/// degree 7 flips a coin between a dominant seventh and a major triad.
pub fn quality_for_degree<R: RandomSource>(genre: Genre, degree: i32, rng: &mut R) -> ChordQuality {
    let degree = degree.rem_euclid(12);
    match genre {
        Genre::Jazz => match degree {
            1 | 2 | 5 => ChordQuality::Minor7,
            0 => ChordQuality::Major7,
            _ => ChordQuality::Dominant7,
        },
        Genre::Pop | Genre::Classical | Genre::Blues => match degree {
            1 | 2 | 5 => ChordQuality::Minor,
            11 => ChordQuality::Diminished,
            7 if rng.coin_flip() => ChordQuality::Dominant7,
            _ => ChordQuality::Major,
        },
    }
}

// ============================================================================
// Generator
// ============================================================================

/// One chord of a generated progression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressionStep {
    pub degree: i32,
    pub quality: ChordQuality,
}

/// Progression generator
pub struct ProgressionGenerator<R: RandomSource = fastrand::Rng> {
    rng: R,
}

impl ProgressionGenerator<fastrand::Rng> {
    /// Generator backed by an unseeded RNG
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }

    /// Reproducible generator
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed))
    }
}

impl Default for ProgressionGenerator<fastrand::Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> ProgressionGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Choose a template for the genre, resize it and assign qualities.
    pub fn progression(&mut self, genre: Genre, length: usize) -> Vec<ProgressionStep> {
        let templates = genre.templates();
        let template = templates[self.rng.index(templates.len())];
        let degrees = adjust_length(template, length);
        tracing::debug!(genre = %genre, ?template, ?degrees, "selected progression");

        degrees
            .into_iter()
            .map(|degree| ProgressionStep {
                degree,
                quality: quality_for_degree(genre, degree, &mut self.rng),
            })
            .collect()
    }

    /// Generate a chord progression as a note sequence.
    ///
    /// Chord `idx` spans steps `idx * 4 .. (idx + 1) * 4`; roots sit in
    /// octave 4 above the key's tonic.
    pub fn generate(&mut self, key: Key, genre: Genre, length: usize) -> NoteSequence {
        let steps = self.progression(genre, length);

        let mut seq = NoteSequence::new(1);
        for (idx, step) in steps.iter().enumerate() {
            let start = idx as u32 * STEPS_PER_CHORD;
            for pitch in build_chord(step.degree, step.quality.intervals(), key.offset()) {
                seq.notes.push(Note::new(pitch, start, start + STEPS_PER_CHORD));
            }
        }
        seq.total_quantized_steps = steps.len() as u32 * STEPS_PER_CHORD;
        seq
    }

    /// [`generate`](Self::generate) from string names.
    ///
    /// An unknown key is an error; an unknown genre falls back to pop.
    pub fn generate_named(&mut self, key: &str, genre: &str, length: usize) -> Result<NoteSequence> {
        let key = Key::from_name(key)?;
        let genre = Genre::from_name_or_default(genre);
        Ok(self.generate(key, genre, length))
    }

    /// [`generate_named`](Self::generate_named) that never fails: unknown keys
    /// fall back to C and unknown genres to pop.
    pub fn generate_named_or_default(&mut self, key: &str, genre: &str, length: usize) -> NoteSequence {
        self.generate(Key::from_name_or_default(key), Genre::from_name_or_default(genre), length)
    }
}
