//! Chord naming for vertical slices
//!
//! The pitch-class set is normalized against its lowest pitch-class value,
//! while the displayed root is the pitch class of the lowest-sounding note.
//! The two differ for inversions: `{E4, G4, C5}` normalizes to a major-triad
//! signature but is labelled `"E"`. Answer keys built on these labels depend
//! on this exact behavior.

use crate::catalog::{signature, ChordQuality};
use crate::pitch::{pitch_class, pitch_class_name, Pitch};
use crate::sequence::{Note, NoteSequence};

/// Result of matching a pitch set against the chord catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordMatch {
    /// Pitch class of the lowest-sounding note
    pub root_pitch_class: u8,
    /// `None` when the signature is not in the catalog
    pub quality: Option<ChordQuality>,
}

impl ChordMatch {
    /// Root name plus quality suffix, e.g. `"C#m7"`.
    ///
    /// Major and unmatched chords both render as the bare root name.
    pub fn label(&self) -> String {
        let suffix = self.quality.map_or("", |q| q.suffix());
        format!("{}{}", pitch_class_name(self.root_pitch_class), suffix)
    }
}

/// Match a simultaneous set of pitches. Returns `None` for an empty set.
pub fn analyze_pitches(pitches: &[Pitch]) -> Option<ChordMatch> {
    let bass = pitches.iter().copied().min()?;

    let mut classes: Vec<u8> = pitches.iter().map(|&p| pitch_class(p)).collect();
    classes.sort_unstable();
    classes.dedup();

    let lowest = classes[0];
    let normalized: Vec<u8> = classes.iter().map(|&pc| (pc + 12 - lowest) % 12).collect();
    let quality = ChordQuality::from_signature(&signature(&normalized));

    Some(ChordMatch {
        root_pitch_class: pitch_class(bass),
        quality,
    })
}

/// Chord label for a set of pitches; empty string for an empty set.
pub fn identify_pitches(pitches: &[Pitch]) -> String {
    analyze_pitches(pitches)
        .map(|m| m.label())
        .unwrap_or_default()
}

/// Chord label for a vertical slice, e.g. `"D"` or `"C#m7"`.
pub fn identify(slice: &[Note]) -> String {
    let pitches: Vec<Pitch> = slice.iter().map(|n| n.pitch).collect();
    identify_pitches(&pitches)
}

/// Label every vertical slice of a sequence, in time order.
pub fn identify_sequence(seq: &NoteSequence) -> Vec<(u32, String)> {
    seq.vertical_slices()
        .into_iter()
        .map(|(step, slice)| (step, identify(&slice)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_basic_qualities() {
        assert_eq!(identify_pitches(&[60, 64, 67]), "C");
        assert_eq!(identify_pitches(&[60, 63, 67]), "Cm");
        assert_eq!(identify_pitches(&[60, 64, 67, 70]), "C7");
        assert_eq!(identify_pitches(&[60, 63, 66]), "Cdim");
        assert_eq!(identify_pitches(&[60, 64, 68]), "Caug");
        assert_eq!(identify_pitches(&[62, 64, 69]), "Dsus2");
    }

    #[test]
    fn test_identify_sevenths() {
        assert_eq!(identify_pitches(&[61, 64, 68, 71]), "C#m7");
        assert_eq!(identify_pitches(&[60, 64, 67, 71]), "Cmaj7");
        assert_eq!(identify_pitches(&[60, 63, 67, 71]), "Cm(maj7)");
        assert_eq!(identify_pitches(&[60, 63, 66, 70]), "Cm7b5");
        assert_eq!(identify_pitches(&[62, 65, 69, 71]), "Dm6");
        assert_eq!(identify_pitches(&[60, 64, 67, 69]), "C6");
    }

    #[test]
    fn test_identify_ignores_order_and_doubling() {
        assert_eq!(identify_pitches(&[67, 60, 76, 64, 72]), "C");
        assert_eq!(identify_pitches(&[50, 66, 69, 62]), "D");
    }

    #[test]
    fn test_root_is_lowest_sounding_note() {
        // First inversion of C major is named after its bass note
        assert_eq!(identify_pitches(&[64, 67, 72]), "E");
        // Normalization starts at the lowest pitch-class value (C), not the bass (G)
        assert_eq!(identify_pitches(&[55, 60, 64]), "G");
    }

    #[test]
    fn test_chords_wrapping_past_b_lose_their_quality() {
        // {F, A, C, E} normalizes from C to 0,4,5,9
        assert_eq!(identify_pitches(&[65, 69, 72, 76]), "F");
        // {G, B, D, F} normalizes from D to 0,3,5,9
        assert_eq!(identify_pitches(&[67, 71, 74, 77]), "G");
        // {B, D, F, A} normalizes from D to 0,3,7,9 and reads as a minor sixth
        assert_eq!(identify_pitches(&[71, 74, 77, 81]), "Bm6");
    }

    #[test]
    fn test_unmatched_signature_is_bare_root() {
        assert_eq!(identify_pitches(&[60, 62]), "C");
        assert_eq!(identify_pitches(&[62]), "D");
        let m = analyze_pitches(&[60, 61, 62]).unwrap();
        assert_eq!(m.quality, None);
        assert_eq!(m.label(), "C");
    }

    #[test]
    fn test_empty_slice() {
        assert_eq!(identify(&[]), "");
        assert!(analyze_pitches(&[]).is_none());
    }

    #[test]
    fn test_identify_sequence() {
        let mut seq = NoteSequence::new(1);
        for p in [62, 65, 69] {
            seq.push(Note::new(p, 4, 8));
        }
        for p in [60, 64, 67] {
            seq.push(Note::new(p, 0, 4));
        }
        assert_eq!(
            identify_sequence(&seq),
            vec![(0, "C".to_string()), (4, "Dm".to_string())]
        );
    }
}
