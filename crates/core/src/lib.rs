//! Braille toolchain core library.
//!
//! Converts between plain text and six-dot cell streams written with `O`
//! (raised) and `.` (flat). The main entry points are [`translate`], which
//! picks a direction from the input, and [`encode`] / [`decode`] for a fixed
//! direction. [`Codec`] carries a [`CodecConfig`] for the non-default table
//! variant or placeholder.

#![warn(missing_docs)]

/// Six-dot cells and their text form.
pub mod cell;
/// Cell stream → text.
pub mod decode;
/// Direction detection.
pub mod detect;
/// Text → cell stream.
pub mod encode;
/// Modifier state machine shared by both directions.
pub mod mode;
/// Token ↔ cell symbol tables.
pub mod table;

use braille_toolchain_diagnostics::Diagnostic;
use serde::Serialize;

// ── Convenience re-exports ──────────────────────────────────────────────────

pub use braille_toolchain_config::{CodecConfig, ConfigError, TableVariant};
pub use cell::{CELL_WIDTH, Cell, FLAT, RAISED};
pub use decode::{DecodeError, Decoded, Decoder, TraceStep};
pub use detect::{InputKind, classify};
pub use encode::{Encoded, Encoder};
pub use mode::{Event, Mode};
pub use table::{Collision, Context, SymbolTable, Token, UnknownCell};

/// Result of [`Codec::translate_detailed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    /// How the input was classified.
    pub kind: InputKind,
    /// Encoded cells or decoded text.
    pub output: String,
    /// Warnings and notes from the conversion.
    pub diagnostics: Vec<Diagnostic>,
}

/// An encoder/decoder pair sharing one configuration.
#[derive(Debug, Clone)]
pub struct Codec {
    table: &'static SymbolTable,
    placeholder: String,
}

impl Default for Codec {
    fn default() -> Self {
        Self::from_validated(CodecConfig::default())
    }
}

impl Codec {
    /// Build a codec from `config` after validating it.
    pub fn new(config: CodecConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: CodecConfig) -> Self {
        Self {
            table: SymbolTable::get(config.table),
            placeholder: config.placeholder,
        }
    }

    /// The symbol table in use.
    pub fn table(&self) -> &'static SymbolTable {
        self.table
    }

    /// The placeholder written for unencodable characters.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Encoder for this configuration.
    pub fn encoder(&self) -> Encoder<'_> {
        Encoder::new(self.table).with_placeholder(&self.placeholder)
    }

    /// Decoder for this configuration.
    pub fn decoder(&self) -> Decoder {
        Decoder::new(self.table)
    }

    /// Encode plain text. Never fails.
    pub fn encode(&self, text: &str) -> String {
        self.encoder().encode(text)
    }

    /// Decode a cell stream.
    pub fn decode(&self, cells: &str) -> Result<String, DecodeError> {
        self.decoder().decode(cells)
    }

    /// Classify `input` and convert it in the matching direction.
    pub fn translate(&self, input: &str) -> Result<String, DecodeError> {
        self.translate_detailed(input).map(|t| t.output)
    }

    /// Like [`Codec::translate`], keeping the classification and diagnostics.
    pub fn translate_detailed(&self, input: &str) -> Result<Translation, DecodeError> {
        let kind = classify(input);
        let (output, diagnostics) = match kind {
            InputKind::CellStream => {
                let decoded = self.decoder().decode_detailed(input)?;
                (decoded.text, decoded.diagnostics)
            }
            InputKind::PlainText => {
                let encoded = self.encoder().encode_detailed(input);
                (encoded.cells, encoded.diagnostics)
            }
        };
        Ok(Translation {
            kind,
            output,
            diagnostics,
        })
    }
}

/// Encode plain text with the default configuration.
pub fn encode(text: &str) -> String {
    Codec::default().encode(text)
}

/// Decode a cell stream with the default configuration.
pub fn decode(cells: &str) -> Result<String, DecodeError> {
    Codec::default().decode(cells)
}

/// Detect the direction of `input` and convert it with the default configuration.
pub fn translate(input: &str) -> Result<String, DecodeError> {
    Codec::default().translate(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_empty_is_empty() {
        assert_eq!(translate("").unwrap(), "");
    }

    #[test]
    fn translate_picks_direction() {
        let t = Codec::default().translate_detailed("Hi").unwrap();
        assert_eq!(t.kind, InputKind::PlainText);
        assert_eq!(t.output, ".....OO.OO...OO...");

        let t = Codec::default()
            .translate_detailed(".....OO.OO...OO...")
            .unwrap();
        assert_eq!(t.kind, InputKind::CellStream);
        assert_eq!(t.output, "Hi");
    }

    #[test]
    fn translate_surfaces_decode_errors() {
        let err = translate("O.").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedStream { length: 2, .. }));
    }

    #[test]
    fn codec_rejects_invalid_config() {
        let cfg = CodecConfig {
            placeholder: "O.".into(),
            ..CodecConfig::default()
        };
        assert!(Codec::new(cfg).is_err());
    }

    #[test]
    fn codec_uses_configured_placeholder_and_table() {
        let codec = Codec::new(CodecConfig {
            table: TableVariant::Repaired,
            placeholder: "<?>".into(),
        })
        .unwrap();
        assert_eq!(codec.table().variant(), TableVariant::Repaired);
        assert_eq!(codec.placeholder(), "<?>");
        assert_eq!(codec.encode("a~"), "O.....<?>");
    }

    #[test]
    fn placeholder_output_is_classified_as_text() {
        let encoded = encode("a@");
        assert_eq!(classify(&encoded), InputKind::PlainText);
    }

    #[test]
    fn codec_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Codec>();
        assert_send_sync::<&'static SymbolTable>();
    }
}
