//! quaver-core: Symbolic music-theory engine
//!
//! Pure functions over MIDI pitches: chord progression generation, chord
//! naming, scale quantization and conversion to and from engraving notation
//! tokens. The only source of nondeterminism is the [`RandomSource`] handed
//! to the progression generator.

pub mod catalog;
pub mod chord;
mod error;
pub mod identify;
pub mod notation;
pub mod pitch;
pub mod progression;
pub mod quantize;
mod random;
pub mod sequence;

pub use catalog::{signature, ChordQuality, ScaleMode, ScaleTemplate};
pub use chord::{build_chord, ChordBuilder};
pub use error::{QuaverError, Result};
pub use identify::{analyze_pitches, identify, identify_pitches, identify_sequence, ChordMatch};
pub use notation::{
    decode_sequence, decode_token, decode_token_or_empty, encode_pitches, encode_sequence,
    encode_slice, parse_token, DecodedToken,
};
pub use pitch::{
    display_name_to_pitch, display_name_to_pitch_or_default, notation_token_to_pitch,
    notation_token_to_pitch_or_default, pitch_to_display_name, pitch_to_notation_token, Pitch,
    MIDDLE_C,
};
pub use progression::{adjust_length, Genre, Key, ProgressionGenerator, ProgressionStep};
pub use quantize::{quantize, quantize_in_key, quantize_pitch};
pub use random::RandomSource;
pub use sequence::{Note, NoteSequence, QuantizationInfo};
