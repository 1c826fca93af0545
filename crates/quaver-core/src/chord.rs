//! Chord construction from a scale degree and a quality template

use serde::{Deserialize, Serialize};

use crate::catalog::ChordQuality;
use crate::pitch::{Pitch, MIDDLE_C};

/// Expand a chord template into absolute pitches.
///
/// Each interval `i` yields `root_pitch_offset + root_degree_semitones + i`,
/// in template order. No clamping is applied.
pub fn build_chord(root_degree_semitones: i32, intervals: &[u8], root_pitch_offset: Pitch) -> Vec<Pitch> {
    intervals
        .iter()
        .map(|&i| root_pitch_offset + root_degree_semitones + i as Pitch)
        .collect()
}

/// Chord builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordBuilder {
    /// Semitones from the key's tonic to the chord root
    pub root_degree: i32,
    pub quality: ChordQuality,
    /// Pitch of the key's tonic
    pub root_pitch_offset: Pitch,
    /// Number of lowest tones raised an octave
    pub inversion: u8,
}

impl Default for ChordBuilder {
    fn default() -> Self {
        Self {
            root_degree: 0,
            quality: ChordQuality::Major,
            root_pitch_offset: MIDDLE_C,
            inversion: 0,
        }
    }
}

impl ChordBuilder {
    pub fn new(root_degree: i32, quality: ChordQuality, root_pitch_offset: Pitch) -> Self {
        Self {
            root_degree,
            quality,
            root_pitch_offset,
            ..Default::default()
        }
    }

    pub fn with_inversion(mut self, inversion: u8) -> Self {
        self.inversion = inversion;
        self
    }

    /// Generate chord pitches
    pub fn build(&self) -> Vec<Pitch> {
        let mut pitches = build_chord(self.root_degree, self.quality.intervals(), self.root_pitch_offset);

        let inv = (self.inversion as usize) % pitches.len().max(1);
        pitches.rotate_left(inv);
        let raised = pitches.len() - inv;
        for pitch in &mut pitches[raised..] {
            *pitch += 12;
        }

        pitches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_chord() {
        assert_eq!(build_chord(0, ChordQuality::Major.intervals(), 60), vec![60, 64, 67]);
        // ii in C: D minor
        assert_eq!(build_chord(2, ChordQuality::Minor.intervals(), 60), vec![62, 65, 69]);
        // V7 in G
        assert_eq!(build_chord(7, ChordQuality::Dominant7.intervals(), 67), vec![74, 78, 81, 84]);
    }

    #[test]
    fn test_build_chord_does_not_clamp() {
        assert_eq!(build_chord(0, &[0, 4, 7], 125), vec![125, 129, 132]);
    }

    #[test]
    fn test_chord_builder() {
        let chord = ChordBuilder::new(5, ChordQuality::Major7, 60);
        assert_eq!(chord.build(), vec![65, 69, 72, 76]); // Fmaj7
    }

    #[test]
    fn test_inversions() {
        let c = ChordBuilder::new(0, ChordQuality::Major, 60);
        assert_eq!(c.clone().with_inversion(1).build(), vec![64, 67, 72]);
        assert_eq!(c.clone().with_inversion(2).build(), vec![67, 72, 76]);
        // Wraps back to root position
        assert_eq!(c.with_inversion(3).build(), vec![60, 64, 67]);
    }
}
