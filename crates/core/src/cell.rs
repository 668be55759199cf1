//! Six-dot cells and their text form.
//!
//! A cell is written as six characters, each either [`RAISED`] (`O`) or
//! [`FLAT`] (`.`). The characters are read row by row, left column first,
//! so string position `i` holds dot number `DOT_ORDER[i]`:
//!
//! ```text
//! position  0 1      dots  1 4
//!           2 3            2 5
//!           4 5            3 6
//! ```

use serde::{Serialize, Serializer};

/// Character for a raised dot.
pub const RAISED: char = 'O';
/// Character for a flat (absent) dot.
pub const FLAT: char = '.';
/// Number of characters per cell.
pub const CELL_WIDTH: usize = 6;

/// Dot number held at each string position.
const DOT_ORDER: [u8; CELL_WIDTH] = [1, 4, 2, 5, 3, 6];

/// One six-dot cell, stored as a bit mask over string positions.
///
/// Bit `i` is set when position `i` of the text form is [`RAISED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell(u8);

impl Cell {
    /// Build a cell from its text pattern at compile time.
    ///
    /// Panics (at compile time when used in a `const`) if the pattern
    /// contains anything other than `O` and `.`.
    pub const fn from_pattern(pattern: &[u8; CELL_WIDTH]) -> Cell {
        let mut bits = 0u8;
        let mut i = 0;
        while i < CELL_WIDTH {
            match pattern[i] {
                b'O' => bits |= 1 << i,
                b'.' => {}
                _ => panic!("cell pattern may only contain 'O' and '.'"),
            }
            i += 1;
        }
        Cell(bits)
    }

    /// Parse a cell from exactly six cell characters.
    ///
    /// Returns `None` for the wrong length or any foreign character.
    pub fn parse(text: &str) -> Option<Cell> {
        let bytes = text.as_bytes();
        if bytes.len() != CELL_WIDTH {
            return None;
        }
        let mut bits = 0u8;
        for (i, b) in bytes.iter().enumerate() {
            match b {
                b'O' => bits |= 1 << i,
                b'.' => {}
                _ => return None,
            }
        }
        Some(Cell(bits))
    }

    /// Raised dot numbers in ascending order (e.g. `[1, 2, 5]` for `h`).
    pub fn dots(self) -> Vec<u8> {
        let mut dots: Vec<u8> = DOT_ORDER
            .iter()
            .enumerate()
            .filter(|(i, _)| self.0 & (1 << i) != 0)
            .map(|(_, dot)| *dot)
            .collect();
        dots.sort_unstable();
        dots
    }

    /// Append the six-character text form to `out`.
    pub fn write_to(self, out: &mut String) {
        for i in 0..CELL_WIDTH {
            out.push(if self.0 & (1 << i) != 0 { RAISED } else { FLAT });
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = String::with_capacity(CELL_WIDTH);
        self.write_to(&mut s);
        f.write_str(&s)
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Whether `c` is one of the two cell characters.
pub fn is_cell_char(c: char) -> bool {
    c == RAISED || c == FLAT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_and_parse_agree() {
        const H: Cell = Cell::from_pattern(b"O.OO..");
        assert_eq!(Cell::parse("O.OO.."), Some(H));
        assert_eq!(H.to_string(), "O.OO..");
    }

    #[test]
    fn blank_cell_has_no_dots() {
        let blank = Cell::parse("......").unwrap();
        assert_eq!(blank, Cell::from_pattern(b"......"));
        assert!(blank.dots().is_empty());
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(Cell::parse(""), None);
        assert_eq!(Cell::parse("O...."), None);
        assert_eq!(Cell::parse("O......"), None);
        assert_eq!(Cell::parse("o....."), None);
        assert_eq!(Cell::parse("O..x.."), None);
        // Six bytes but not six cell characters.
        assert_eq!(Cell::parse("é...."), None);
    }

    #[test]
    fn dots_follow_column_order() {
        // h: dots 1, 2, 5
        assert_eq!(Cell::from_pattern(b"O.OO..").dots(), vec![1, 2, 5]);
        // capital marker: dot 6
        assert_eq!(Cell::from_pattern(b".....O").dots(), vec![6]);
        // number marker: dots 3, 4, 5, 6
        assert_eq!(Cell::from_pattern(b".O.OOO").dots(), vec![3, 4, 5, 6]);
    }

    #[test]
    fn display_every_mask_round_trips() {
        for bits in 0u8..64 {
            let cell = Cell(bits);
            assert_eq!(Cell::parse(&cell.to_string()), Some(cell));
        }
    }

    #[test]
    fn serializes_as_pattern_string() {
        let json = serde_json::to_string(&Cell::from_pattern(b"OO....")).unwrap();
        assert_eq!(json, "\"OO....\"");
    }

    #[test]
    fn cell_chars() {
        assert!(is_cell_char('O'));
        assert!(is_cell_char('.'));
        assert!(!is_cell_char('0'));
        assert!(!is_cell_char('o'));
    }
}
