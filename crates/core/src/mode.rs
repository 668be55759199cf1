//! Transient modifier state carried across a cell sequence.
//!
//! Both directions walk their input left to right holding a single [`Mode`]
//! and feeding it one [`Event`] per character or cell. The transition table
//! is the same for both:
//!
//! | event           | next mode        |
//! |-----------------|------------------|
//! | capital marker  | `CapitalPending` |
//! | number marker   | `NumericActive`  |
//! | digit           | `NumericActive`  |
//! | letter          | `None`           |
//! | punctuation     | `None`           |
//! | space           | `None`           |

use serde::Serialize;

use crate::table::Context;

/// Modifier state between two cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// No modifier in effect; content cells are lowercase letters or punctuation.
    #[default]
    None,
    /// The next letter is uppercase. Applies to exactly one letter.
    CapitalPending,
    /// Cells are read as digits until a space, letter, or punctuation.
    NumericActive,
}

/// What a single character or cell turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// The capital marker.
    CapitalMarker,
    /// The number marker.
    NumberMarker,
    /// A word space.
    Space,
    /// A digit (only possible while numeric mode is active when decoding).
    Digit,
    /// A letter.
    Letter,
    /// A punctuation mark.
    Punctuation,
}

impl Mode {
    /// State after `event`.
    pub fn next(self, event: Event) -> Mode {
        match event {
            Event::CapitalMarker => Mode::CapitalPending,
            Event::NumberMarker | Event::Digit => Mode::NumericActive,
            Event::Space | Event::Letter | Event::Punctuation => Mode::None,
        }
    }

    /// Subtable consulted first for a content cell in this mode.
    pub fn context(self) -> Context {
        match self {
            Mode::NumericActive => Context::Numeric,
            Mode::None | Mode::CapitalPending => Context::Alphabetic,
        }
    }

    /// Whether `event` throws away a pending capital without using it.
    ///
    /// A repeated capital marker is not counted; it leaves the capital
    /// pending.
    pub fn discards_capital(self, event: Event) -> bool {
        self == Mode::CapitalPending
            && matches!(
                event,
                Event::NumberMarker | Event::Space | Event::Digit | Event::Punctuation
            )
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::None => write!(f, "none"),
            Mode::CapitalPending => write!(f, "capital-pending"),
            Mode::NumericActive => write!(f, "numeric-active"),
        }
    }
}
