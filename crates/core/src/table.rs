//! The symbol table: a fixed mapping between tokens and cells.
//!
//! Letters, digits, space, and the two mode markers are shared by every
//! [`TableVariant`]; only the punctuation subtable differs. Each variant is
//! built once on first use and handed out as `&'static SymbolTable`; the
//! type exposes no way to change it afterwards.
//!
//! Lookups go in two directions:
//! - [`SymbolTable::glyph_of`] maps a token to its cell.
//! - [`SymbolTable::token_of`] maps a cell back to a token within one
//!   [`Context`]. The same cell can mean a letter in [`Context::Alphabetic`]
//!   and a digit in [`Context::Numeric`].

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

use crate::cell::Cell;
use braille_toolchain_config::TableVariant;

/// A logical unit that maps to one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "char", rename_all = "snake_case")]
pub enum Token {
    /// Letter `a`–`z`. Always stored lowercase.
    Letter(char),
    /// Digit `0`–`9`.
    Digit(char),
    /// Word space.
    Space,
    /// One of `. , ? ! : ; - / ( ) < >`.
    Punctuation(char),
    /// Marks the next letter as uppercase.
    Capital,
    /// Switches following cells to digits.
    Number,
}

impl Token {
    /// The text character for content tokens; `None` for mode markers.
    pub fn as_char(self) -> Option<char> {
        match self {
            Token::Letter(c) | Token::Digit(c) | Token::Punctuation(c) => Some(c),
            Token::Space => Some(' '),
            Token::Capital | Token::Number => None,
        }
    }

    /// Whether this is the capital or number marker.
    pub fn is_marker(self) -> bool {
        matches!(self, Token::Capital | Token::Number)
    }

    fn normalized(self) -> Token {
        match self {
            Token::Letter(c) => Token::Letter(c.to_ascii_lowercase()),
            other => other,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Letter(c) => write!(f, "letter '{c}'"),
            Token::Digit(c) => write!(f, "digit '{c}'"),
            Token::Space => write!(f, "space"),
            Token::Punctuation(c) => write!(f, "punctuation '{c}'"),
            Token::Capital => write!(f, "capital marker"),
            Token::Number => write!(f, "number marker"),
        }
    }
}

/// Which subtable a cell is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Context {
    /// Letters `a`–`z`.
    Alphabetic,
    /// Digits `0`–`9` (reusing the cells of `a`–`j`).
    Numeric,
    /// Punctuation marks, space, and mode markers.
    Punctuation,
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Context::Alphabetic => write!(f, "alphabetic"),
            Context::Numeric => write!(f, "numeric"),
            Context::Punctuation => write!(f, "punctuation"),
        }
    }
}

/// A cell with no meaning in the queried context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cell {cell} has no {context} meaning")]
pub struct UnknownCell {
    /// The cell that was looked up.
    pub cell: Cell,
    /// The context it was looked up in.
    pub context: Context,
}

/// Several tokens assigned to the same cell outside the letter/digit reuse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    /// The shared cell.
    pub cell: Cell,
    /// Every token declared with that cell, in declaration order.
    pub tokens: Vec<Token>,
}

// ── Declarations ────────────────────────────────────────────────────────

const fn cell(pattern: &[u8; 6]) -> Cell {
    Cell::from_pattern(pattern)
}

const LETTERS: [(char, Cell); 26] = [
    ('a', cell(b"O.....")),
    ('b', cell(b"O.O...")),
    ('c', cell(b"OO....")),
    ('d', cell(b"OO.O..")),
    ('e', cell(b"O..O..")),
    ('f', cell(b"OOO...")),
    ('g', cell(b"OOOO..")),
    ('h', cell(b"O.OO..")),
    ('i', cell(b".OO...")),
    ('j', cell(b".OOO..")),
    ('k', cell(b"O...O.")),
    ('l', cell(b"O.O.O.")),
    ('m', cell(b"OO..O.")),
    ('n', cell(b"OO.OO.")),
    ('o', cell(b"O..OO.")),
    ('p', cell(b"OOO.O.")),
    ('q', cell(b"OOOOO.")),
    ('r', cell(b"O.OOO.")),
    ('s', cell(b".OO.O.")),
    ('t', cell(b".OOOO.")),
    ('u', cell(b"O...OO")),
    ('v', cell(b"O.O.OO")),
    ('w', cell(b".OOO.O")),
    ('x', cell(b"OO..OO")),
    ('y', cell(b"OO.OOO")),
    ('z', cell(b"O..OOO")),
];

/// Digits reuse the cells of `a`–`j`: `1` is `a`, ..., `9` is `i`, `0` is `j`.
const DIGITS: [(char, Cell); 10] = [
    ('1', LETTERS[0].1),
    ('2', LETTERS[1].1),
    ('3', LETTERS[2].1),
    ('4', LETTERS[3].1),
    ('5', LETTERS[4].1),
    ('6', LETTERS[5].1),
    ('7', LETTERS[6].1),
    ('8', LETTERS[7].1),
    ('9', LETTERS[8].1),
    ('0', LETTERS[9].1),
];

const SPACE: Cell = cell(b"......");
const CAPITAL: Cell = cell(b".....O");
const NUMBER: Cell = cell(b".O.OOO");

/// Punctuation as listed in the reference data. Several entries share a
/// cell with each other, with a letter, or with the number marker.
const FAITHFUL_PUNCTUATION: [(char, Cell); 12] = [
    ('.', cell(b".O.OOO")),
    (',', cell(b".O....")),
    ('?', cell(b".OO.OO")),
    ('!', cell(b".OOO.O")),
    (':', cell(b"OO.OO.")),
    (';', cell(b"OO.O..")),
    ('-', cell(b"..OO..")),
    ('/', cell(b"..O.OO")),
    ('(', cell(b"O.OO.O")),
    (')', cell(b"O.OO.O")),
    ('<', cell(b"O.OOO.")),
    ('>', cell(b".OOO..")),
];

/// One distinct cell per mark, none shared with letters, space, or markers.
const REPAIRED_PUNCTUATION: [(char, Cell); 12] = [
    ('.', cell(b"..OO.O")),
    (',', cell(b"..O...")),
    ('?', cell(b"..O.OO")),
    ('!', cell(b"..OOO.")),
    (':', cell(b"..OO..")),
    (';', cell(b"..O.O.")),
    ('-', cell(b"....OO")),
    ('/', cell(b".O..O.")),
    ('(', cell(b"O.O..O")),
    (')', cell(b".O.OO.")),
    ('<', cell(b".OO..O")),
    ('>', cell(b"O..O.O")),
];

static FAITHFUL: LazyLock<SymbolTable> =
    LazyLock::new(|| SymbolTable::build(TableVariant::Faithful, &FAITHFUL_PUNCTUATION));
static REPAIRED: LazyLock<SymbolTable> =
    LazyLock::new(|| SymbolTable::build(TableVariant::Repaired, &REPAIRED_PUNCTUATION));

// ── SymbolTable ─────────────────────────────────────────────────────────

/// Immutable token ↔ cell mapping for one [`TableVariant`].
#[derive(Debug)]
pub struct SymbolTable {
    variant: TableVariant,
    punctuation_decl: &'static [(char, Cell)],
    cells: HashMap<Token, Cell>,
    letters: HashMap<Cell, char>,
    digits: HashMap<Cell, char>,
    punctuation: HashMap<Cell, char>,
    punctuation_uses: HashMap<Cell, usize>,
}

impl SymbolTable {
    /// The shared table for `variant`, built on first access.
    pub fn get(variant: TableVariant) -> &'static SymbolTable {
        match variant {
            TableVariant::Faithful => &FAITHFUL,
            TableVariant::Repaired => &REPAIRED,
        }
    }

    fn build(variant: TableVariant, punctuation_decl: &'static [(char, Cell)]) -> Self {
        let mut cells = HashMap::new();
        for &(c, cell) in &LETTERS {
            cells.insert(Token::Letter(c), cell);
        }
        for &(d, cell) in &DIGITS {
            cells.insert(Token::Digit(d), cell);
        }
        for &(p, cell) in punctuation_decl {
            cells.insert(Token::Punctuation(p), cell);
        }
        cells.insert(Token::Space, SPACE);
        cells.insert(Token::Capital, CAPITAL);
        cells.insert(Token::Number, NUMBER);

        let letters = LETTERS.iter().map(|&(c, cell)| (cell, c)).collect();
        let digits = DIGITS.iter().map(|&(d, cell)| (cell, d)).collect();

        // First-listed mark wins when several share a cell.
        let mut punctuation = HashMap::new();
        let mut punctuation_uses = HashMap::new();
        for &(p, cell) in punctuation_decl {
            punctuation.entry(cell).or_insert(p);
            *punctuation_uses.entry(cell).or_insert(0usize) += 1;
        }

        Self {
            variant,
            punctuation_decl,
            cells,
            letters,
            digits,
            punctuation,
            punctuation_uses,
        }
    }

    /// Which variant this table implements.
    pub fn variant(&self) -> TableVariant {
        self.variant
    }

    /// Cell for `token`. Letters are looked up case-insensitively.
    ///
    /// Returns `None` only for tokens outside the declared domain
    /// (e.g. `Token::Letter('é')`).
    pub fn glyph_of(&self, token: Token) -> Option<Cell> {
        self.cells.get(&token.normalized()).copied()
    }

    /// Resolve `cell` within one context.
    ///
    /// [`Context::Punctuation`] also resolves space and the mode markers;
    /// markers take precedence over a punctuation mark sharing their cell.
    pub fn token_of(&self, cell: Cell, context: Context) -> Result<Token, UnknownCell> {
        let found = match context {
            Context::Alphabetic => self.letters.get(&cell).map(|&c| Token::Letter(c)),
            Context::Numeric => self.digits.get(&cell).map(|&d| Token::Digit(d)),
            Context::Punctuation => self
                .marker_or_space(cell)
                .or_else(|| self.punctuation.get(&cell).map(|&p| Token::Punctuation(p))),
        };
        found.ok_or(UnknownCell { cell, context })
    }

    /// Number marker, capital marker, or space, checked in that order.
    pub fn marker_or_space(&self, cell: Cell) -> Option<Token> {
        if cell == NUMBER {
            Some(Token::Number)
        } else if cell == CAPITAL {
            Some(Token::Capital)
        } else if cell == SPACE {
            Some(Token::Space)
        } else {
            None
        }
    }

    /// Punctuation marks declared for `cell`, in declaration order.
    pub fn punctuation_for(&self, cell: Cell) -> Vec<char> {
        self.punctuation_decl
            .iter()
            .filter(|(_, c)| *c == cell)
            .map(|(p, _)| *p)
            .collect()
    }

    /// Whether more than one punctuation mark is declared for `cell`.
    pub fn is_ambiguous(&self, cell: Cell) -> bool {
        self.punctuation_uses.get(&cell).is_some_and(|&n| n > 1)
    }

    /// Every declared pair: letters, digits, space, punctuation, markers.
    pub fn entries(&self) -> Vec<(Token, Cell)> {
        let mut out = Vec::with_capacity(self.cells.len());
        out.extend(LETTERS.iter().map(|&(c, cell)| (Token::Letter(c), cell)));
        out.extend(DIGITS.iter().map(|&(d, cell)| (Token::Digit(d), cell)));
        out.push((Token::Space, SPACE));
        out.extend(
            self.punctuation_decl
                .iter()
                .map(|&(p, cell)| (Token::Punctuation(p), cell)),
        );
        out.push((Token::Capital, CAPITAL));
        out.push((Token::Number, NUMBER));
        out
    }

    /// Cells declared for more than one token.
    ///
    /// Digits are left out: sharing the cells of `a`–`j` is how numeric
    /// context works, not a collision. Ordered by first declaration.
    pub fn collisions(&self) -> Vec<Collision> {
        let mut order: Vec<Cell> = Vec::new();
        let mut groups: HashMap<Cell, Vec<Token>> = HashMap::new();
        for (token, cell) in self.entries() {
            if matches!(token, Token::Digit(_)) {
                continue;
            }
            let group = groups.entry(cell).or_default();
            if group.is_empty() {
                order.push(cell);
            }
            group.push(token);
        }
        order
            .into_iter()
            .filter_map(|cell| {
                let tokens = groups.remove(&cell)?;
                (tokens.len() > 1).then_some(Collision { cell, tokens })
            })
            .collect()
    }
}
