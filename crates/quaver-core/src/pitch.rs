//! Conversions between MIDI pitches and note names
//!
//! Two textual conventions are supported:
//! - display names, e.g. `"C#4"` (upper-case letter, no separator)
//! - notation tokens, e.g. `"c#/4"` (lower-case letter, slash before octave)
//!
//! Octave 4 starts at MIDI 60 (middle C). Pitches outside 0-127 are not
//! rejected; they still format to a syntactically valid name.

use crate::error::{QuaverError, Result};

/// MIDI note number (0-127 by convention, 60 = middle C)
pub type Pitch = i32;

/// Fallback pitch substituted by the lenient parsers
pub const MIDDLE_C: Pitch = 60;

/// Chromatic pitch-class names, sharps only
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Pitch class (0-11) of a pitch.
pub fn pitch_class(pitch: Pitch) -> u8 {
    pitch.rem_euclid(12) as u8
}

/// Octave number of a pitch (60 -> 4).
pub fn octave(pitch: Pitch) -> i32 {
    pitch.div_euclid(12) - 1
}

/// Display name of a pitch class, ignoring octave (`1 -> "C#"`).
pub fn pitch_class_name(pitch_class: u8) -> &'static str {
    NOTE_NAMES[(pitch_class % 12) as usize]
}

/// `60 -> "C4"`, `61 -> "C#4"`
pub fn pitch_to_display_name(pitch: Pitch) -> String {
    format!("{}{}", pitch_class_name(pitch_class(pitch)), octave(pitch))
}

/// `60 -> "c/4"`, `61 -> "c#/4"`
pub fn pitch_to_notation_token(pitch: Pitch) -> String {
    format!(
        "{}/{}",
        pitch_class_name(pitch_class(pitch)).to_lowercase(),
        octave(pitch)
    )
}

/// Parse a notation token such as `"c#/4"` (case-insensitive).
pub fn notation_token_to_pitch(token: &str) -> Result<Pitch> {
    let trimmed = token.trim();
    trimmed
        .split_once('/')
        .and_then(|(name, octave)| parse_pitch(name, octave))
        .ok_or_else(|| QuaverError::InvalidNotationToken(token.to_string()))
}

/// Like [`notation_token_to_pitch`], falling back to middle C on bad input.
pub fn notation_token_to_pitch_or_default(token: &str) -> Pitch {
    notation_token_to_pitch(token).unwrap_or_else(|e| {
        tracing::warn!("{}; using middle C", e);
        MIDDLE_C
    })
}

/// Parse a display name such as `"C#4"` or `"a-1"` (case-insensitive).
pub fn display_name_to_pitch(name: &str) -> Result<Pitch> {
    let trimmed = name.trim();
    let name_len = match trimmed.as_bytes() {
        [_, b'#', ..] => 2,
        [_, ..] => 1,
        [] => 0,
    };
    if name_len == 0 || !trimmed.is_char_boundary(name_len) {
        return Err(QuaverError::InvalidDisplayName(name.to_string()));
    }
    let (note, octave) = trimmed.split_at(name_len);
    parse_pitch(note, octave).ok_or_else(|| QuaverError::InvalidDisplayName(name.to_string()))
}

/// Like [`display_name_to_pitch`], falling back to middle C on bad input.
pub fn display_name_to_pitch_or_default(name: &str) -> Pitch {
    display_name_to_pitch(name).unwrap_or_else(|e| {
        tracing::warn!("{}; using middle C", e);
        MIDDLE_C
    })
}

/// Semitone offset of a note letter from C.
fn letter_semitone(letter: char) -> Option<i32> {
    match letter.to_ascii_lowercase() {
        'c' => Some(0),
        'd' => Some(2),
        'e' => Some(4),
        'f' => Some(5),
        'g' => Some(7),
        'a' => Some(9),
        'b' => Some(11),
        _ => None,
    }
}

/// Combine `letter[#]` and an octave number into a pitch.
fn parse_pitch(note: &str, octave: &str) -> Option<Pitch> {
    let mut chars = note.trim().chars();
    let base = letter_semitone(chars.next()?)?;
    let accidental = match chars.as_str() {
        "" => 0,
        "#" => 1,
        _ => return None,
    };
    let octave: i32 = octave.trim().parse().ok()?;
    octave
        .checked_add(1)?
        .checked_mul(12)?
        .checked_add(base + accidental)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(pitch_to_display_name(60), "C4");
        assert_eq!(pitch_to_display_name(61), "C#4");
        assert_eq!(pitch_to_display_name(69), "A4");
        assert_eq!(pitch_to_display_name(0), "C-1");
        assert_eq!(pitch_to_display_name(127), "G9");
    }

    #[test]
    fn test_notation_tokens() {
        assert_eq!(pitch_to_notation_token(60), "c/4");
        assert_eq!(pitch_to_notation_token(66), "f#/4");
        assert_eq!(pitch_to_notation_token(47), "b/2");
    }

    #[test]
    fn test_notation_round_trip_full_midi_range() {
        for p in 0..=127 {
            let token = pitch_to_notation_token(p);
            assert_eq!(notation_token_to_pitch(&token).unwrap(), p, "token {token}");
        }
    }

    #[test]
    fn test_display_round_trip_full_midi_range() {
        for p in 0..=127 {
            let name = pitch_to_display_name(p);
            assert_eq!(display_name_to_pitch(&name).unwrap(), p, "name {name}");
        }
    }

    #[test]
    fn test_parsing_is_case_insensitive() {
        assert_eq!(notation_token_to_pitch("C#/4").unwrap(), 61);
        assert_eq!(notation_token_to_pitch(" a/4 ").unwrap(), 69);
        assert_eq!(display_name_to_pitch("d#5").unwrap(), 75);
    }

    #[test]
    fn test_out_of_range_pitches_still_format() {
        assert_eq!(pitch_to_display_name(-1), "B-2");
        assert_eq!(pitch_to_display_name(128), "G#9");
        assert_eq!(pitch_to_notation_token(-1), "b/-2");
        assert_eq!(notation_token_to_pitch("b/-2").unwrap(), -1);
    }

    #[test]
    fn test_invalid_tokens_are_errors() {
        assert!(matches!(
            notation_token_to_pitch("h/4"),
            Err(QuaverError::InvalidNotationToken(_))
        ));
        assert!(notation_token_to_pitch("c4").is_err());
        assert!(notation_token_to_pitch("c/x").is_err());
        assert!(notation_token_to_pitch("cb/4").is_err());
        assert!(matches!(
            display_name_to_pitch("X4"),
            Err(QuaverError::InvalidDisplayName(_))
        ));
        assert!(display_name_to_pitch("").is_err());
        assert!(display_name_to_pitch("C#").is_err());
    }

    #[test]
    fn test_lenient_parsers_fall_back_to_middle_c() {
        assert_eq!(notation_token_to_pitch_or_default("z/9"), MIDDLE_C);
        assert_eq!(display_name_to_pitch_or_default("??"), MIDDLE_C);
        assert_eq!(display_name_to_pitch_or_default("G4"), 67);
    }

    #[test]
    fn test_huge_octaves_are_rejected() {
        assert!(matches!(
            notation_token_to_pitch("c/999999999"),
            Err(QuaverError::InvalidNotationToken(_))
        ));
        assert!(matches!(
            display_name_to_pitch("C999999999"),
            Err(QuaverError::InvalidDisplayName(_))
        ));
        assert!(notation_token_to_pitch("b/-999999999").is_err());
        assert_eq!(notation_token_to_pitch_or_default("c/999999999"), MIDDLE_C);
        assert_eq!(display_name_to_pitch_or_default("G#2147483647"), MIDDLE_C);
    }

    #[test]
    fn test_sharpened_e_and_b_spill_into_neighbors() {
        assert_eq!(notation_token_to_pitch("e#/4").unwrap(), 65);
        assert_eq!(display_name_to_pitch("E#4").unwrap(), 65);
        // B# lands on the C of the next octave
        assert_eq!(notation_token_to_pitch("b#/4").unwrap(), 72);
        assert_eq!(display_name_to_pitch("B#3").unwrap(), 60);
    }
}
