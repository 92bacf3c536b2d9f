use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Column letters that move notation accepts. Boards only use the first `size` of them.
const COLUMN_LETTERS: &str = "abcdefghijk";

/// A square on the board, by zero-based column and row.
///
/// In notation, columns are letters starting at `a` and rows are numbers
/// starting at `1`, so `Square { column: 0, row: 0 }` is `a1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Square {
    pub column: u8,
    pub row: u8,
}

impl Square {
    pub fn new(column: u8, row: u8) -> Self {
        Self { column, row }
    }

    pub fn is_on_board(self, size: usize) -> bool {
        usize::from(self.column) < size && usize::from(self.row) < size
    }

    /// The neighbouring square in the given direction, if it is on a board of this size.
    pub fn step(self, direction: Direction, size: usize) -> Option<Square> {
        let (dc, dr) = direction.offset();
        let column = i16::from(self.column) + dc;
        let row = i16::from(self.row) + dr;
        if column < 0 || row < 0 {
            return None;
        }
        let square = Square::new(column as u8, row as u8);
        square.is_on_board(size).then_some(square)
    }

    /// All orthogonal neighbours on a board of this size.
    pub fn neighbours(self, size: usize) -> impl Iterator<Item = Square> {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| self.step(direction, size))
    }

    /// Splits a square off the front of `s`, returning it and the rest of the input.
    pub(crate) fn split_prefix(s: &str) -> Option<(Square, &str)> {
        let mut chars = s.char_indices();
        let (_, letter) = chars.next()?;
        let column = COLUMN_LETTERS.find(letter)? as u8;
        let digits_end = s[1..]
            .find(|c: char| !c.is_ascii_digit())
            .map_or(s.len(), |idx| idx + 1);
        let digits = &s[1..digits_end];
        // The row must not start with a zero
        if digits.is_empty() || digits.starts_with('0') {
            return None;
        }
        let row: u8 = digits.parse().ok()?;
        Some((Square::new(column, row - 1), &s[digits_end..]))
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = COLUMN_LETTERS
            .chars()
            .nth(usize::from(self.column))
            .unwrap_or('?');
        write!(f, "{}{}", letter, u16::from(self.row) + 1)
    }
}

/// The error type for the [`FromStr`] instance of [`Square`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidSquare(pub String);

impl std::error::Error for InvalidSquare {}

impl std::fmt::Display for InvalidSquare {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' is not a square", self.0)
    }
}

impl FromStr for Square {
    type Err = InvalidSquare;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Square::split_prefix(s) {
            Some((square, "")) => Ok(square),
            _ => Err(InvalidSquare(String::from(s))),
        }
    }
}

/// Shorthand for creating squares from their notation.
///
/// This macro is just calling the [`FromStr`] instance of [`Square`].
/// ```
/// # use tak::{sq, Square};
/// assert_eq!(sq!("c2"), Square::new(2, 1));
/// ```
#[macro_export]
macro_rules! sq {
    ($s:literal) => {
        <$crate::Square as std::str::FromStr>::from_str($s)
            .expect("Invalid square given to sq! macro")
    };
}
#[allow(unused_imports)]
pub(crate) use sq;

/// The direction of a slide.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// `+`, towards higher rows.
    #[serde(rename = "+")]
    Up,
    /// `-`, towards lower rows.
    #[serde(rename = "-")]
    Down,
    /// `<`, towards lower columns.
    #[serde(rename = "<")]
    Left,
    /// `>`, towards higher columns.
    #[serde(rename = ">")]
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(column, row)` delta of one step.
    pub fn offset(self) -> (i16, i16) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Direction::Up => '+',
            Direction::Down => '-',
            Direction::Left => '<',
            Direction::Right => '>',
        }
    }

    pub fn from_symbol(c: char) -> Option<Direction> {
        match c {
            '+' => Some(Direction::Up),
            '-' => Some(Direction::Down),
            '<' => Some(Direction::Left),
            '>' => Some(Direction::Right),
            _ => None,
        }
    }
}

/// One of the four sides of the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Column `a`.
    Left,
    /// The last column.
    Right,
    /// Row 1.
    Bottom,
    /// The last row.
    Top,
}

impl Edge {
    pub fn opposite(self) -> Edge {
        match self {
            Edge::Left => Edge::Right,
            Edge::Right => Edge::Left,
            Edge::Bottom => Edge::Top,
            Edge::Top => Edge::Bottom,
        }
    }

    pub fn contains(self, square: Square, size: usize) -> bool {
        let last = (size - 1) as u8;
        match self {
            Edge::Left => square.column == 0,
            Edge::Right => square.column == last,
            Edge::Bottom => square.row == 0,
            Edge::Top => square.row == last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squares_parse_and_print() {
        assert_eq!(sq!("a1"), Square::new(0, 0));
        assert_eq!(sq!("e6"), Square::new(4, 5));
        assert_eq!(sq!("k12"), Square::new(10, 11));
        assert_eq!(sq!("d4").to_string(), "d4");
        assert!("a0".parse::<Square>().is_err());
        assert!("a01".parse::<Square>().is_err());
        assert!("l1".parse::<Square>().is_err());
        assert!("a".parse::<Square>().is_err());
        assert!("a1+".parse::<Square>().is_err());
    }

    #[test]
    fn split_prefix_leaves_the_rest() {
        assert_eq!(Square::split_prefix("c3>12"), Some((sq!("c3"), ">12")));
        assert_eq!(Square::split_prefix("b10-"), Some((sq!("b10"), "-")));
    }

    #[test]
    fn stepping_stays_on_board() {
        assert_eq!(sq!("a1").step(Direction::Up, 5), Some(sq!("a2")));
        assert_eq!(sq!("a1").step(Direction::Right, 5), Some(sq!("b1")));
        assert_eq!(sq!("a1").step(Direction::Down, 5), None);
        assert_eq!(sq!("a1").step(Direction::Left, 5), None);
        assert_eq!(sq!("e5").step(Direction::Up, 5), None);
        assert_eq!(sq!("c3").neighbours(5).count(), 4);
        assert_eq!(sq!("a1").neighbours(5).count(), 2);
    }
}
