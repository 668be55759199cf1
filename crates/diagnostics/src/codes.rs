//! Diagnostic ID constants.
//!
//! Auto-generated from `data/diagnostics.json` at build time. Use these
//! instead of string literals so typos fail to compile.

include!(concat!(env!("OUT_DIR"), "/generated_codes.rs"));
