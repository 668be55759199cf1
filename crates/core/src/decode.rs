//! Cell stream → text.
//!
//! The stream is cut into fixed six-character cells. A stream whose length
//! is not a multiple of six is rejected as a whole with
//! [`DecodeError::MalformedStream`]; nothing is truncated. The first cell
//! that resolves in no subtable aborts decoding with
//! [`DecodeError::UnknownGlyph`].

use std::collections::BTreeMap;

use serde::Serialize;

use braille_toolchain_diagnostics::{Diagnostic, Span, codes};

use crate::cell::{CELL_WIDTH, Cell};
use crate::mode::{Event, Mode};
use crate::table::{Context, SymbolTable, Token};

/// A cell stream that cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// A cell with no meaning in any subtable.
    #[error("unknown cell '{cell}' at position {position}")]
    UnknownGlyph {
        /// The six characters of the offending cell.
        cell: String,
        /// 0-based cell index.
        position: usize,
        /// Byte span of the cell in the input.
        span: Span,
    },
    /// Stream length (in characters) is not a multiple of six.
    #[error("malformed cell stream: length {length} is not a multiple of 6")]
    MalformedStream {
        /// Length of the stream in characters.
        length: usize,
        /// Byte span of the trailing partial cell.
        span: Span,
    },
}

impl DecodeError {
    /// Byte span the error refers to.
    pub fn span(&self) -> Span {
        match self {
            DecodeError::UnknownGlyph { span, .. } | DecodeError::MalformedStream { span, .. } => {
                *span
            }
        }
    }

    /// Diagnostic code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            DecodeError::UnknownGlyph { .. } => codes::UNKNOWN_CELL,
            DecodeError::MalformedStream { .. } => codes::MALFORMED_STREAM,
        }
    }

    /// Structured diagnostic for rendering.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let context = match self {
            DecodeError::UnknownGlyph { cell, position, .. } => BTreeMap::from([
                ("cell".into(), cell.clone()),
                ("position".into(), position.to_string()),
            ]),
            DecodeError::MalformedStream { length, span } => BTreeMap::from([
                ("length".into(), length.to_string()),
                ("trailing".into(), span.len().to_string()),
            ]),
        };
        Diagnostic::coded(self.code(), self.to_string(), Some(self.span())).with_context(context)
    }
}

/// One cell's effect on the decoder, recorded by [`Decoder::decode_traced`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceStep {
    /// 0-based cell index.
    pub index: usize,
    /// The cell.
    pub cell: Cell,
    /// What the cell was read as.
    pub event: Event,
    /// Mode before the cell.
    pub mode_before: Mode,
    /// Mode after the cell.
    pub mode_after: Mode,
    /// Character appended to the output, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emitted: Option<char>,
}

/// Output of [`Decoder::decode_detailed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// The decoded text.
    pub text: String,
    /// Warnings and notes about the stream (never errors).
    pub diagnostics: Vec<Diagnostic>,
    /// Per-cell steps; empty unless tracing was requested.
    pub trace: Vec<TraceStep>,
}

/// Converts a cell stream into text.
#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    table: &'static SymbolTable,
}

impl Decoder {
    /// Decoder over `table`.
    pub fn new(table: &'static SymbolTable) -> Self {
        Self { table }
    }

    /// Decode `input` to text.
    pub fn decode(&self, input: &str) -> Result<String, DecodeError> {
        self.run(input, false).map(|d| d.text)
    }

    /// Decode `input`, collecting warnings about markers and ambiguous cells.
    pub fn decode_detailed(&self, input: &str) -> Result<Decoded, DecodeError> {
        self.run(input, false)
    }

    /// Like [`Decoder::decode_detailed`], also recording every step.
    pub fn decode_traced(&self, input: &str) -> Result<Decoded, DecodeError> {
        self.run(input, true)
    }

    fn run(&self, input: &str, trace: bool) -> Result<Decoded, DecodeError> {
        let cells = split_cells(input)?;
        let mut out = Decoded {
            text: String::with_capacity(cells.len()),
            diagnostics: Vec::new(),
            trace: Vec::new(),
        };
        let mut mode = Mode::None;
        let mut trailing_marker: Option<(Token, usize, Span)> = None;

        for (index, (span, text)) in cells.into_iter().enumerate() {
            let unknown = || DecodeError::UnknownGlyph {
                cell: text.to_string(),
                position: index,
                span,
            };
            let cell = Cell::parse(text).ok_or_else(unknown)?;
            let (token, event) = self.resolve(cell, mode).ok_or_else(unknown)?;

            if mode.discards_capital(event) {
                out.diagnostics.push(discarded_capital(cell, index, span, token));
            }
            if let Token::Punctuation(p) = token
                && self.table.is_ambiguous(cell)
            {
                out.diagnostics.push(self.ambiguous(cell, index, span, p));
            }

            let emitted = match token {
                Token::Letter(c) if mode == Mode::CapitalPending => Some(c.to_ascii_uppercase()),
                other => other.as_char(),
            };
            if let Some(c) = emitted {
                out.text.push(c);
            }

            trailing_marker = token.is_marker().then_some((token, index, span));

            let next = mode.next(event);
            if trace {
                out.trace.push(TraceStep {
                    index,
                    cell,
                    event,
                    mode_before: mode,
                    mode_after: next,
                    emitted,
                });
            }
            mode = next;
        }

        if let Some((marker, index, span)) = trailing_marker {
            out.diagnostics.push(
                Diagnostic::coded(
                    codes::DANGLING_MARKER,
                    format!("{marker} at position {index} ends the stream"),
                    Some(span),
                )
                .with_context(BTreeMap::from([
                    ("marker".into(), marker.to_string()),
                    ("position".into(), index.to_string()),
                ])),
            );
        }

        Ok(out)
    }

    /// Resolve one cell in `mode`.
    ///
    /// Markers and space first; then digits if numeric mode is active;
    /// then letters; then punctuation.
    fn resolve(&self, cell: Cell, mode: Mode) -> Option<(Token, Event)> {
        if let Some(token) = self.table.marker_or_space(cell) {
            let event = match token {
                Token::Number => Event::NumberMarker,
                Token::Capital => Event::CapitalMarker,
                _ => Event::Space,
            };
            return Some((token, event));
        }
        if mode.context() == Context::Numeric
            && let Ok(token) = self.table.token_of(cell, Context::Numeric)
        {
            return Some((token, Event::Digit));
        }
        if let Ok(token) = self.table.token_of(cell, Context::Alphabetic) {
            return Some((token, Event::Letter));
        }
        self.table
            .token_of(cell, Context::Punctuation)
            .ok()
            .map(|token| (token, Event::Punctuation))
    }

    fn ambiguous(&self, cell: Cell, index: usize, span: Span, chosen: char) -> Diagnostic {
        let marks: String = self.table.punctuation_for(cell).into_iter().collect();
        Diagnostic::coded(
            codes::AMBIGUOUS_CELL,
            format!("cell {cell} at position {index} could be any of {marks:?}; decoded as {chosen:?}"),
            Some(span),
        )
        .with_context(BTreeMap::from([
            ("candidates".into(), marks),
            ("cell".into(), cell.to_string()),
            ("chosen".into(), chosen.to_string()),
            ("position".into(), index.to_string()),
        ]))
    }
}

fn discarded_capital(cell: Cell, index: usize, span: Span, token: Token) -> Diagnostic {
    Diagnostic::coded(
        codes::DISCARDED_CAPITAL,
        format!("capital marker before {token} at position {index} has no effect"),
        Some(span),
    )
    .with_context(BTreeMap::from([
        ("cell".into(), cell.to_string()),
        ("position".into(), index.to_string()),
    ]))
}

/// Cut `input` into six-character cells with their byte spans.
fn split_cells(input: &str) -> Result<Vec<(Span, &str)>, DecodeError> {
    let bounds: Vec<usize> = input
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(input.len()))
        .collect();
    let length = bounds.len() - 1;
    let whole = length / CELL_WIDTH;

    if length % CELL_WIDTH != 0 {
        return Err(DecodeError::MalformedStream {
            length,
            span: Span::new(bounds[whole * CELL_WIDTH], input.len()),
        });
    }

    Ok((0..whole)
        .map(|k| {
            let start = bounds[k * CELL_WIDTH];
            let end = bounds[(k + 1) * CELL_WIDTH];
            (Span::new(start, end), &input[start..end])
        })
        .collect())
}
