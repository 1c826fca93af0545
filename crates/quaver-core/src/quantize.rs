//! Snap pitches to a scale
//!
//! The distance from a pitch class to a degree is the smaller of the plain
//! difference and the difference to the degree an octave up. The winning
//! degree is placed in the note's original octave, so a pitch class just
//! below the octave boundary can snap down to the tonic of its own octave
//! (B4 -> C4 in a scale without B). Ties go to the earlier degree.

use crate::catalog::ScaleTemplate;
use crate::pitch::Pitch;
use crate::sequence::NoteSequence;

/// Nearest scale degree to a pitch class, first-encountered on ties.
fn nearest_degree(pitch_class: i32, degrees: &[u8]) -> Option<i32> {
    let mut min_dist = i32::MAX;
    let mut nearest = None;

    for &degree in degrees {
        let degree = degree as i32;
        let dist = (pitch_class - degree)
            .abs()
            .min((pitch_class - (degree + 12)).abs());

        if dist < min_dist {
            min_dist = dist;
            nearest = Some(degree);
        }
    }

    nearest
}

/// Quantize one pitch to the scale (tonic C). An empty scale leaves the pitch as is.
pub fn quantize_pitch(pitch: Pitch, scale: &ScaleTemplate) -> Pitch {
    let octave = pitch.div_euclid(12);
    let pitch_class = pitch.rem_euclid(12);

    match nearest_degree(pitch_class, &scale.degrees) {
        Some(degree) => octave * 12 + degree,
        None => pitch,
    }
}

/// New sequence with every pitch snapped to the scale. Timing and other
/// note fields are copied unchanged.
pub fn quantize(seq: &NoteSequence, scale: &ScaleTemplate) -> NoteSequence {
    seq.map_pitches(|p| quantize_pitch(p, scale))
}

/// Like [`quantize`], with the scale transposed to start on `tonic` (0-11).
///
/// A tonic of 0 gives the same result as [`quantize`].
pub fn quantize_in_key(seq: &NoteSequence, scale: &ScaleTemplate, tonic: u8) -> NoteSequence {
    let tonic = (tonic % 12) as Pitch;
    seq.map_pitches(|p| quantize_pitch(p - tonic, scale) + tonic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ScaleMode;
    use crate::sequence::Note;

    fn sequence_of(pitches: &[Pitch]) -> NoteSequence {
        let mut seq = NoteSequence::new(1);
        for (i, &p) in pitches.iter().enumerate() {
            seq.push(Note::new(p, i as u32, i as u32 + 1));
        }
        seq
    }

    #[test]
    fn test_quantize_pitch_major() {
        let major = ScaleTemplate::major();
        // When equidistant, the earlier degree wins
        assert_eq!(quantize_pitch(61, &major), 60); // C# -> C
        assert_eq!(quantize_pitch(63, &major), 62); // D# -> D
        assert_eq!(quantize_pitch(66, &major), 65); // F# -> F
        assert_eq!(quantize_pitch(70, &major), 69); // A# -> A
        assert_eq!(quantize_pitch(60, &major), 60);
        assert_eq!(quantize_pitch(71, &major), 71);
    }

    #[test]
    fn test_quantize_snaps_down_across_octave_boundary() {
        let pentatonic = ScaleTemplate::major_pentatonic();
        // B is one step from the next C but lands on C of its own octave
        assert_eq!(quantize_pitch(71, &pentatonic), 60);
        assert_eq!(quantize_pitch(70, &pentatonic), 69);
    }

    #[test]
    fn test_quantize_negative_pitches() {
        let major = ScaleTemplate::major();
        assert_eq!(quantize_pitch(-11, &major), -12); // C# below C-1
    }

    #[test]
    fn test_empty_scale_is_identity() {
        let empty = ScaleTemplate::new("empty", vec![]);
        assert_eq!(quantize_pitch(61, &empty), 61);
    }

    #[test]
    fn test_quantize_sequence_copies() {
        let mut seq = sequence_of(&[61, 64, 66]);
        seq.notes[1].program = 24;
        let quantized = quantize(&seq, &ScaleTemplate::major());

        assert_eq!(seq.notes[0].pitch, 61);
        assert_eq!(
            quantized.notes.iter().map(|n| n.pitch).collect::<Vec<_>>(),
            vec![60, 64, 65]
        );
        assert_eq!(quantized.notes[1].program, 24);
        assert_eq!(quantized.notes[2].quantized_start_step, 2);
        assert_eq!(quantized.total_quantized_steps, seq.total_quantized_steps);
    }

    #[test]
    fn test_quantize_is_idempotent() {
        let seq = sequence_of(&(0..128).collect::<Vec<_>>());
        for mode in ScaleMode::ALL {
            let scale = mode.template();
            let once = quantize(&seq, &scale);
            let twice = quantize(&once, &scale);
            assert_eq!(once, twice, "{}", scale.name);
            assert!(once.notes.iter().all(|n| scale.contains(n.pitch.rem_euclid(12) as u8)));
        }
    }

    #[test]
    fn test_quantize_in_key() {
        let seq = sequence_of(&[63, 61, 68]);
        let d_major = quantize_in_key(&seq, &ScaleTemplate::major(), 2);
        // D# -> D, C# stays (leading tone), G# -> G
        assert_eq!(
            d_major.notes.iter().map(|n| n.pitch).collect::<Vec<_>>(),
            vec![62, 61, 67]
        );
        assert_eq!(
            quantize_in_key(&seq, &ScaleTemplate::major(), 0),
            quantize(&seq, &ScaleTemplate::major())
        );
    }
}
