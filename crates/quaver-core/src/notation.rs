//! Engraving notation tokens
//!
//! Grammar:
//! ```text
//! token    := chord | note "/" duration
//! chord    := "(" note ("," note)* ")" "/" duration
//! note     := letter ["#"] "/" octave
//! letter   := [a-g]            (lower-case when encoding, any case when decoding)
//! duration := "w" | "h" | "q" | ...
//! ```
//! Duration codes are passed through without validation.

use crate::error::{QuaverError, Result};
use crate::pitch::{display_name_to_pitch, pitch_to_notation_token, Pitch};
use crate::sequence::{Note, NoteSequence};

/// Duration code used by [`encode_sequence`]
pub const QUARTER: &str = "q";

// ============================================================================
// Encoding
// ============================================================================

/// Encode simultaneous pitches as one token, lowest pitch first.
///
/// Returns an empty string for an empty slice.
pub fn encode_pitches(pitches: &[Pitch], duration: &str) -> String {
    let mut sorted = pitches.to_vec();
    sorted.sort_unstable();

    match sorted.as_slice() {
        [] => String::new(),
        [single] => format!("{}/{}", pitch_to_notation_token(*single), duration),
        many => {
            let notes: Vec<String> = many.iter().map(|&p| pitch_to_notation_token(p)).collect();
            format!("({})/{}", notes.join(","), duration)
        }
    }
}

/// Encode a vertical slice: `"c/4/q"` or `"(c/4,e/4,g/4)/w"`.
pub fn encode_slice(slice: &[Note], duration: &str) -> String {
    let pitches: Vec<Pitch> = slice.iter().map(|n| n.pitch).collect();
    encode_pitches(&pitches, duration)
}

/// One quarter-note token per start step, in time order, joined by `", "`.
pub fn encode_sequence(seq: &NoteSequence) -> String {
    seq.vertical_slices()
        .iter()
        .map(|(_, slice)| encode_slice(slice, QUARTER))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Decoding
// ============================================================================

/// A decoded token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedToken {
    /// Pitches in token order
    pub pitches: Vec<Pitch>,
    /// Duration code, empty if the token had none
    pub duration: String,
}

/// `"c#/4"` -> `"c#4"` -> pitch
fn inner_note_to_pitch(note: &str, token: &str) -> Result<Pitch> {
    display_name_to_pitch(&note.replacen('/', "", 1))
        .map_err(|_| QuaverError::InvalidNotationToken(token.to_string()))
}

/// Parse a single-note or chord token.
///
/// Fails with `InvalidNotationToken` on malformed notes and with
/// `UnplayableNotation` when the token holds no notes at all.
pub fn parse_token(token: &str) -> Result<DecodedToken> {
    let trimmed = token.trim();
    let invalid = || QuaverError::InvalidNotationToken(token.to_string());

    let (notes, duration): (Vec<&str>, &str) = if let Some(rest) = trimmed.strip_prefix('(') {
        let (inner, after) = rest.split_once(')').ok_or_else(invalid)?;
        let duration = match after.trim() {
            "" => "",
            d => d.strip_prefix('/').ok_or_else(invalid)?,
        };
        let notes = inner.split(',').map(str::trim).filter(|n| !n.is_empty()).collect();
        (notes, duration)
    } else if trimmed.is_empty() {
        (Vec::new(), "")
    } else {
        let mut parts = trimmed.splitn(3, '/');
        let name = parts.next().unwrap_or_default();
        let octave = parts.next().ok_or_else(invalid)?;
        let duration = parts.next().unwrap_or_default();
        let note_len = name.len() + 1 + octave.len();
        (vec![&trimmed[..note_len]], duration)
    };

    if notes.is_empty() {
        return Err(QuaverError::UnplayableNotation(token.to_string()));
    }

    let pitches = notes
        .iter()
        .map(|n| inner_note_to_pitch(n, token))
        .collect::<Result<Vec<_>>>()?;

    Ok(DecodedToken {
        pitches,
        duration: duration.trim().to_string(),
    })
}

/// Pitches of a token, strict.
pub fn decode_token(token: &str) -> Result<Vec<Pitch>> {
    parse_token(token).map(|t| t.pitches)
}

/// Pitches of a token, or an empty set if it cannot be played.
///
/// Playback callers treat the empty set as a no-op.
pub fn decode_token_or_empty(token: &str) -> Vec<Pitch> {
    decode_token(token).unwrap_or_else(|e| {
        tracing::warn!("{}; nothing to play", e);
        Vec::new()
    })
}

/// Steps a duration code spans. Unknown or missing codes count as a quarter.
pub fn duration_steps(duration: &str, steps_per_quarter: u32) -> u32 {
    let (num, den) = match duration {
        "w" => (4, 1),
        "h" => (2, 1),
        "q" => (1, 1),
        "8" | "e" => (1, 2),
        "16" | "s" => (1, 4),
        _ => (1, 1),
    };
    (steps_per_quarter.saturating_mul(num) / den).max(1)
}

/// Split on commas outside parentheses.
fn split_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth <= 0 => {
                tokens.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    tokens.push(&text[start..]);

    tokens.into_iter().map(str::trim).filter(|t| !t.is_empty()).collect()
}

/// Rebuild a playable sequence from a comma-separated token list, such as the
/// output of [`encode_sequence`]. Tokens are laid end to end.
pub fn decode_sequence(text: &str, steps_per_quarter: u32) -> Result<NoteSequence> {
    let mut seq = NoteSequence::new(steps_per_quarter);
    let mut step: u32 = 0;

    for token in split_tokens(text) {
        let decoded = parse_token(token)?;
        let len = duration_steps(&decoded.duration, steps_per_quarter);
        let end = step
            .checked_add(len)
            .ok_or_else(|| QuaverError::SequenceOverflow(token.to_string()))?;
        for pitch in decoded.pitches {
            seq.push(Note::new(pitch, step, end));
        }
        step = end;
    }

    seq.total_quantized_steps = step;
    Ok(seq)
}
