//! Direction detection.

use serde::Serialize;

use crate::cell::is_cell_char;

/// What kind of input a string is, and therefore which way to convert it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// Only cell characters; decode it.
    CellStream,
    /// Anything else; encode it.
    PlainText,
}

/// Classify `input` by its characters alone.
///
/// A string made only of `O` and `.` is a cell stream, including the empty
/// string. Length is not considered: `"O"` classifies as a cell stream and
/// then fails to decode.
pub fn classify(input: &str) -> InputKind {
    if input.chars().all(is_cell_char) {
        InputKind::CellStream
    } else {
        InputKind::PlainText
    }
}
