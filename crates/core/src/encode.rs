//! Text → cell stream.
//!
//! The encoder never fails. Characters without a cell are replaced by a
//! placeholder and reported as [`codes::UNENCODABLE_CHARACTER`] warnings.

use std::collections::BTreeMap;

use braille_toolchain_config::DEFAULT_PLACEHOLDER;
use braille_toolchain_diagnostics::{Diagnostic, Span, codes};

use crate::cell::CELL_WIDTH;
use crate::mode::{Event, Mode};
use crate::table::{SymbolTable, Token};

/// Output of [`Encoder::encode_detailed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// The cell stream, with placeholders where needed.
    pub cells: String,
    /// One warning per unencodable character.
    pub diagnostics: Vec<Diagnostic>,
}

/// Converts plain text into a cell stream.
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'a> {
    table: &'static SymbolTable,
    placeholder: &'a str,
}

impl<'a> Encoder<'a> {
    /// Encoder over `table` using the default placeholder.
    pub fn new(table: &'static SymbolTable) -> Self {
        Self {
            table,
            placeholder: DEFAULT_PLACEHOLDER,
        }
    }

    /// Replace the text written for unencodable characters.
    pub fn with_placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Encode `text`, discarding diagnostics.
    pub fn encode(&self, text: &str) -> String {
        self.encode_detailed(text).cells
    }

    /// Encode `text` and report each placeholder substitution.
    ///
    /// - A digit opens numeric mode with a number marker unless it is
    ///   already open.
    /// - A letter closes numeric mode silently and is preceded by a capital
    ///   marker when uppercase.
    /// - Space and punctuation close numeric mode.
    /// - Anything else becomes the placeholder and leaves the mode alone.
    pub fn encode_detailed(&self, text: &str) -> Encoded {
        let mut cells = String::with_capacity(text.len() * CELL_WIDTH);
        let mut diagnostics = Vec::new();
        let mut mode = Mode::None;

        for (offset, ch) in text.char_indices() {
            let Some((token, event)) = classify_char(ch) else {
                cells.push_str(self.placeholder);
                diagnostics.push(self.unencodable(ch, offset));
                continue;
            };
            let Some(cell) = self.table.glyph_of(token) else {
                cells.push_str(self.placeholder);
                diagnostics.push(self.unencodable(ch, offset));
                continue;
            };

            match event {
                Event::Digit if mode != Mode::NumericActive => {
                    self.push_marker(&mut cells, Token::Number);
                }
                Event::Letter if ch.is_ascii_uppercase() => {
                    self.push_marker(&mut cells, Token::Capital);
                }
                _ => {}
            }
            cell.write_to(&mut cells);
            mode = mode.next(event);
        }

        Encoded { cells, diagnostics }
    }

    fn push_marker(&self, out: &mut String, marker: Token) {
        if let Some(cell) = self.table.glyph_of(marker) {
            cell.write_to(out);
        }
    }

    fn unencodable(&self, ch: char, offset: usize) -> Diagnostic {
        Diagnostic::coded(
            codes::UNENCODABLE_CHARACTER,
            format!(
                "character {ch:?} has no cell; wrote placeholder {:?}",
                self.placeholder
            ),
            Some(Span::new(offset, offset + ch.len_utf8())),
        )
        .with_context(BTreeMap::from([
            ("char".into(), ch.to_string()),
            ("codepoint".into(), format!("U+{:04X}", ch as u32)),
            ("offset".into(), offset.to_string()),
            ("placeholder".into(), self.placeholder.to_string()),
        ]))
    }
}

/// Token and event for a supported character. ASCII only.
fn classify_char(ch: char) -> Option<(Token, Event)> {
    if ch.is_ascii_digit() {
        Some((Token::Digit(ch), Event::Digit))
    } else if ch.is_ascii_alphabetic() {
        Some((Token::Letter(ch.to_ascii_lowercase()), Event::Letter))
    } else if ch == ' ' {
        Some((Token::Space, Event::Space))
    } else if ch.is_ascii_punctuation() {
        Some((Token::Punctuation(ch), Event::Punctuation))
    } else {
        None
    }
}
