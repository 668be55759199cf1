mod render;

use std::process;

use anyhow::{Context, Result};
use braille_toolchain_core::{
    Cell, Codec, CodecConfig, DecodeError, Decoded, InputKind, TableVariant, Token, TraceStep,
    classify,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use braille_toolchain_diagnostics::{self as diag, Diagnostic};

use crate::render::{Format, print_summary, print_trace, render_diagnostics};

/// Name shown for the command-line argument in rendered diagnostics.
const INPUT_NAME: &str = "<input>";

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "braille",
    version,
    about = "Translate between plain text and six-dot braille cell streams"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Path to a codec config JSON file.
    #[arg(long, global = true)]
    config: Option<String>,

    /// Symbol table variant (overrides the config file).
    #[arg(long, global = true, value_enum)]
    table: Option<TableArg>,

    /// Text written for characters that have no cell (overrides the config file).
    #[arg(long, global = true)]
    placeholder: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Detect the direction of INPUT and convert it.
    Translate {
        #[arg(allow_hyphen_values = true)]
        input: String,
        /// Print each decoded cell and the mode it leaves behind. Only
        /// applies when INPUT is a cell stream.
        #[arg(long)]
        trace: bool,
    },

    /// Encode plain text into a cell stream.
    Encode {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },

    /// Decode a cell stream into plain text.
    Decode {
        cells: String,
        /// Print each decoded cell and the mode it leaves behind.
        #[arg(long)]
        trace: bool,
    },

    /// List every token and cell of the selected symbol table.
    Table,

    /// Explain a diagnostic ID (e.g. BRL1001).
    Explain { id: String },
}

/// Symbol table variant as accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TableArg {
    /// Punctuation as in the reference data, shared cells included.
    Faithful,
    /// One distinct cell per punctuation mark.
    Repaired,
}

impl From<TableArg> for TableVariant {
    fn from(t: TableArg) -> Self {
        match t {
            TableArg::Faithful => TableVariant::Faithful,
            TableArg::Repaired => TableVariant::Repaired,
        }
    }
}

/// One row of `braille table --output json`.
#[derive(Serialize)]
struct TableRow {
    token: Token,
    cell: Cell,
    dots: Vec<u8>,
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output.as_deref());

    if let Err(err) = run(cli, format) {
        match format {
            Format::Json => {
                let out = serde_json::json!({
                    "success": false,
                    "error": "command_failed",
                    "message": format!("{err:#}"),
                });
                println!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
            }
            Format::Pretty => eprintln!("error: {err:#}"),
        }
        process::exit(1);
    }
}

fn run(cli: Cli, format: Format) -> Result<()> {
    let codec = resolve_codec(
        cli.config.as_deref(),
        cli.table.map(TableVariant::from),
        cli.placeholder,
    )?;

    match cli.cmd {
        Cmd::Translate { input, trace } => match classify(&input) {
            InputKind::CellStream => cmd_decode(&codec, &input, trace, format)?,
            InputKind::PlainText => {
                if trace {
                    eprintln!("warning: --trace only applies to cell streams; input was encoded");
                }
                cmd_encode(&codec, &input, format)?;
            }
        },
        Cmd::Encode { text } => cmd_encode(&codec, &text, format)?,
        Cmd::Decode { cells, trace } => cmd_decode(&codec, &cells, trace, format)?,
        Cmd::Table => cmd_table(&codec, format)?,
        Cmd::Explain { id } => cmd_explain(&id, format)?,
    }

    Ok(())
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_encode(codec: &Codec, text: &str, format: Format) -> Result<()> {
    let encoded = codec.encoder().encode_detailed(text);

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "ok": true,
                "kind": InputKind::PlainText,
                "output": encoded.cells,
                "diagnostics": encoded.diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            println!("{}", encoded.cells);
            render_diagnostics(text, INPUT_NAME, &encoded.diagnostics);
            print_summary(&encoded.diagnostics);
        }
    }

    Ok(())
}

fn cmd_decode(codec: &Codec, cells: &str, trace: bool, format: Format) -> Result<()> {
    let decoder = codec.decoder();
    let result: Result<Decoded, DecodeError> = if trace {
        decoder.decode_traced(cells)
    } else {
        decoder.decode_detailed(cells)
    };

    let (text, diagnostics, steps): (Option<String>, Vec<Diagnostic>, Vec<TraceStep>) =
        match result {
            Ok(decoded) => (Some(decoded.text), decoded.diagnostics, decoded.trace),
            Err(err) => (None, vec![err.to_diagnostic()], Vec::new()),
        };

    match format {
        Format::Json => {
            let mut out = serde_json::json!({
                "ok": text.is_some(),
                "kind": InputKind::CellStream,
                "output": text,
                "diagnostics": diagnostics,
            });
            if trace {
                out["trace"] = serde_json::to_value(&steps)?;
            }
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            if trace {
                print_trace(&steps);
            }
            if let Some(text) = &text {
                println!("{text}");
            }
            render_diagnostics(cells, INPUT_NAME, &diagnostics);
            print_summary(&diagnostics);
        }
    }

    exit_on_errors(&diagnostics);
    Ok(())
}

fn cmd_table(codec: &Codec, format: Format) -> Result<()> {
    let table = codec.table();
    let entries = table.entries();
    let collisions = table.collisions();

    match format {
        Format::Json => {
            let rows: Vec<TableRow> = entries
                .iter()
                .map(|&(token, cell)| TableRow {
                    token,
                    cell,
                    dots: cell.dots(),
                })
                .collect();
            let out = serde_json::json!({
                "variant": table.variant(),
                "entries": rows,
                "collisions": collisions,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            println!("table: {}", table.variant());
            for (token, cell) in &entries {
                let dots: Vec<String> = cell.dots().iter().map(u8::to_string).collect();
                println!("  {cell}  {:<18} dots {}", token.to_string(), dots.join("-"));
            }
            if collisions.is_empty() {
                println!("collisions: none");
            } else {
                println!("collisions: {}", collisions.len());
                for c in &collisions {
                    let tokens: Vec<String> = c.tokens.iter().map(|t| t.to_string()).collect();
                    println!("  {}  {}", c.cell, tokens.join(", "));
                }
            }
        }
    }

    Ok(())
}

fn cmd_explain(id: &str, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "id": id,
                "severity": diag::severity_of(id),
                "explanation": diag::explain(id),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            // Explanation is the expected output, so it goes to stdout.
            if let Some(text) = diag::explain(id) {
                use ariadne::Fmt;
                println!("{}: {}", id.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{id}: (no explanation available)");
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Exit with code 1 if any diagnostic is an error.
/// Warnings and info do not cause a non-zero exit.
fn exit_on_errors(diagnostics: &[Diagnostic]) {
    if diagnostics.iter().any(Diagnostic::is_error) {
        process::exit(1);
    }
}

/// Build the codec from (lowest to highest priority): defaults, the
/// `--config` file, then `--table` / `--placeholder`.
fn resolve_codec(
    config_path: Option<&str>,
    table: Option<TableVariant>,
    placeholder: Option<String>,
) -> Result<Codec> {
    let mut config = match config_path {
        Some(path) => braille_toolchain_config::load_config_from_path(path)
            .with_context(|| format!("failed to load config file '{path}'"))?,
        None => CodecConfig::default(),
    };
    if let Some(table) = table {
        config.table = table;
    }
    if let Some(placeholder) = placeholder {
        config.placeholder = placeholder;
    }
    Codec::new(config).context("invalid codec configuration")
}
