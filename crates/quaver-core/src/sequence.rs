//! Note sequences on a quantized step grid
//!
//! Field names serialize in camelCase to match the JSON shape exchanged with
//! the rest of the application (`quantizedStartStep`, `isDrum`, ...).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pitch::Pitch;

/// A single note on the step grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// MIDI note number (60 = middle C)
    pub pitch: Pitch,
    pub quantized_start_step: u32,
    /// Exclusive end step
    pub quantized_end_step: u32,
    /// Instrument id
    #[serde(default)]
    pub program: u32,
    #[serde(default)]
    pub is_drum: bool,
}

impl Note {
    pub fn new(pitch: Pitch, quantized_start_step: u32, quantized_end_step: u32) -> Self {
        Self {
            pitch,
            quantized_start_step,
            quantized_end_step,
            program: 0,
            is_drum: false,
        }
    }

    /// Length in steps
    pub fn duration_steps(&self) -> u32 {
        self.quantized_end_step.saturating_sub(self.quantized_start_step)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantizationInfo {
    pub steps_per_quarter: u32,
}

impl Default for QuantizationInfo {
    fn default() -> Self {
        Self { steps_per_quarter: 1 }
    }
}

/// A quantized note sequence.
///
/// Note order carries no meaning; consumers group notes by start step.
/// `quantized_end_step <= total_quantized_steps` is expected of every note but
/// not enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSequence {
    pub notes: Vec<Note>,
    pub total_quantized_steps: u32,
    #[serde(default)]
    pub quantization_info: QuantizationInfo,
}

impl NoteSequence {
    pub fn new(steps_per_quarter: u32) -> Self {
        Self {
            notes: Vec::new(),
            total_quantized_steps: 0,
            quantization_info: QuantizationInfo { steps_per_quarter },
        }
    }

    /// Add a note, growing `total_quantized_steps` to cover it
    pub fn push(&mut self, note: Note) {
        self.total_quantized_steps = self.total_quantized_steps.max(note.quantized_end_step);
        self.notes.push(note);
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Group notes by start step, in ascending time order.
    ///
    /// Within a slice, notes keep their order in `notes`.
    pub fn vertical_slices(&self) -> Vec<(u32, Vec<Note>)> {
        let mut groups: BTreeMap<u32, Vec<Note>> = BTreeMap::new();
        for note in &self.notes {
            groups.entry(note.quantized_start_step).or_default().push(*note);
        }
        groups.into_iter().collect()
    }

    /// Copy of this sequence with every pitch passed through `f`
    pub fn map_pitches(&self, mut f: impl FnMut(Pitch) -> Pitch) -> Self {
        Self {
            notes: self
                .notes
                .iter()
                .map(|n| Note { pitch: f(n.pitch), ..*n })
                .collect(),
            total_quantized_steps: self.total_quantized_steps,
            quantization_info: self.quantization_info,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
