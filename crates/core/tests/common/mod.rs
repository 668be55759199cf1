//! Shared test helpers for `braille_toolchain_core` integration tests.

#![allow(unreachable_pub)]
#![allow(dead_code)]

use braille_toolchain_core::{Codec, CodecConfig, TableVariant};

// ─── Named cells ─────────────────────────────────────────────────────────────

pub const CAPITAL: &str = ".....O";
pub const NUMBER: &str = ".O.OOO";
pub const SPACE: &str = "......";
pub const A: &str = "O.....";
pub const B: &str = "O.O...";
pub const C: &str = "OO....";
pub const J: &str = ".OOO..";
pub const K: &str = "O...O.";

/// Concatenate cell patterns into one stream.
pub fn cells(parts: &[&str]) -> String {
    parts.concat()
}

/// Codec for a table variant with the default placeholder.
pub fn codec(variant: TableVariant) -> Codec {
    Codec::new(CodecConfig {
        table: variant,
        ..CodecConfig::default()
    })
    .expect("default placeholder is valid")
}

// ─── Simple deterministic PRNG (LCG) ────────────────────────────────────────

pub struct SimpleRng(u64);

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 16
    }

    pub fn gen_range(&mut self, max: usize) -> usize {
        (self.next() as usize) % max
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.gen_range(items.len())]
    }
}
