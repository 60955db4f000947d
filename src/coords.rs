use std::fmt::{Display, Formatter};

use crate::error::GameError;

/// A zero-based (column, row) position on a board.
///
/// In move notation a square is written as a column letter followed by a
/// 1-based row number, so `a1` is `(0, 0)` and `c4` is `(2, 3)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Parse a single square such as `b2`.
    pub fn from_uci(square: &str) -> Result<Self, GameError> {
        let mut chars = square.chars();

        let Some(letter) = chars.next() else {
            return Err(GameError::invalid_move("empty square notation"));
        };
        if !letter.is_ascii_lowercase() {
            return Err(GameError::invalid_move(format!("'{letter}' is not a column letter")));
        }

        let digits = chars.as_str();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(GameError::invalid_move(format!("'{square}' has no row number")));
        }

        let row: usize = digits
            .parse()
            .map_err(|_| GameError::invalid_move(format!("row of '{square}' is out of range")))?;
        if row == 0 {
            return Err(GameError::invalid_move("rows are numbered from 1"));
        }

        Ok(Coord::new((letter as u8 - b'a') as usize, row - 1))
    }

    /// Inverse of [Coord::from_uci]. Columns past `z` have no notation.
    pub fn to_uci(self) -> String {
        assert!(self.x < 26, "column {} has no letter", self.x);
        format!("{}{}", (b'a' + self.x as u8) as char, self.y + 1)
    }

    pub fn is_within(self, width: usize, height: usize) -> bool {
        self.x < width && self.y < height
    }
}

/// Split move notation into its squares, e.g. `c3b4` into `[c3, b4]`.
pub fn parse_squares(notation: &str) -> Result<Vec<Coord>, GameError> {
    let notation = notation.trim();
    let mut squares = Vec::new();
    let mut start = None;

    for (i, c) in notation.char_indices() {
        if c.is_ascii_lowercase() {
            if let Some(s) = start {
                squares.push(Coord::from_uci(&notation[s..i])?);
            }
            start = Some(i);
        } else if !c.is_ascii_digit() || start.is_none() {
            return Err(GameError::invalid_move(format!("unexpected '{c}' in '{notation}'")));
        }
    }

    match start {
        Some(s) => squares.push(Coord::from_uci(&notation[s..])?),
        None => return Err(GameError::invalid_move("empty move notation")),
    }

    Ok(squares)
}

impl Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.y.checked_add(1) {
            Some(row) if self.x < 26 => write!(f, "{}{row}", (b'a' + self.x as u8) as char),
            _ => write!(f, "({}, {})", self.x, self.y),
        }
    }
}
