use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Direction, Square, StoneKind, SyntaxError};

/// A single move by one player.
///
/// Moves are parsed without looking at any board, so a successfully parsed
/// move may still be illegal in a given position.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Move {
    /// Puts a new stone from the reserve onto an empty square (or, for
    /// capstones, onto a standing stone).
    Placement { square: Square, kind: StoneKind },
    /// Lifts `count` stones from the top of the stack on `origin` and drops
    /// them one square at a time in `direction`.
    Slide {
        origin: Square,
        count: u8,
        direction: Direction,
        /// How many stones are dropped on each square passed, in order.
        /// Always sums to `count`.
        drops: Vec<u8>,
        /// The kind of the stone on top of the lifted stones, if the
        /// notation spelled it out.
        top: Option<StoneKind>,
    },
}

impl Move {
    pub fn placement(square: Square, kind: StoneKind) -> Self {
        Move::Placement { square, kind }
    }

    /// The square a stone is placed on, or the square a slide starts from.
    pub fn square(&self) -> Square {
        match self {
            Move::Placement { square, .. } => *square,
            Move::Slide { origin, .. } => *origin,
        }
    }

    pub fn is_placement(&self) -> bool {
        matches!(self, Move::Placement { .. })
    }
}

/// Parses a move in compact notation.
///
/// Placements are written `[C|S]?square`, e.g. `a1`, `Sb3` or `Cc4`.
///
/// Slides are written `[count]square direction [drops][C|S]?`, where the
/// count defaults to one and the drops default to dropping everything on the
/// next square:
/// ```
/// # use tak::{parse_move, sq, Direction, Move};
/// assert_eq!(
///     parse_move("3c3>12").unwrap(),
///     Move::Slide {
///         origin: sq!("c3"),
///         count: 3,
///         direction: Direction::Right,
///         drops: vec![1, 2],
///         top: None,
///     }
/// );
/// ```
pub fn parse_move(text: &str) -> Result<Move, SyntaxError> {
    let unrecognized = || SyntaxError::Unrecognized {
        text: String::from(text),
    };

    let first = text.chars().next().ok_or_else(unrecognized)?;
    let (count, kind_prefix, rest) = if let Some(digit) = first.to_digit(10).filter(|&d| d > 0) {
        (Some(digit as u8), None, &text[1..])
    } else if let Some(kind) = StoneKind::from_prefix(first) {
        (None, Some(kind), &text[1..])
    } else {
        (None, None, text)
    };

    let (square, rest) = Square::split_prefix(rest).ok_or_else(unrecognized)?;

    let mut chars = rest.chars();
    let Some(symbol) = chars.next() else {
        // Nothing after the square, so it's a placement
        if count.is_some() {
            return Err(unrecognized());
        }
        return Ok(Move::Placement {
            square,
            kind: kind_prefix.unwrap_or(StoneKind::Flat),
        });
    };

    if kind_prefix.is_some() {
        return Err(unrecognized());
    }
    let direction = Direction::from_symbol(symbol).ok_or_else(unrecognized)?;
    let count = count.unwrap_or(1);

    // Direction symbols are ASCII, so this slice is at a char boundary
    let rest = &rest[1..];
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let mut drops: Vec<u8> = rest[..digits_end].bytes().map(|b| b - b'0').collect();

    let mut annotation = rest[digits_end..].chars();
    let top = match annotation.next() {
        None => None,
        Some(c) => Some(StoneKind::from_prefix(c).ok_or_else(unrecognized)?),
    };
    if annotation.next().is_some() {
        return Err(unrecognized());
    }

    if drops.is_empty() {
        drops.push(count);
    }
    if drops.contains(&0) {
        return Err(SyntaxError::ZeroDrop {
            text: String::from(text),
        });
    }
    let dropped: u32 = drops.iter().map(|&d| u32::from(d)).sum();
    if dropped != u32::from(count) {
        return Err(SyntaxError::DropCountMismatch {
            text: String::from(text),
            carried: count,
            dropped,
        });
    }

    Ok(Move::Slide {
        origin: square,
        count,
        direction,
        drops,
        top,
    })
}

impl FromStr for Move {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_move(s)
    }
}

/// Writes the shortest notation that parses back to the same move.
impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Placement { square, kind } => {
                if let Some(prefix) = kind.notation_prefix() {
                    write!(f, "{}", prefix)?;
                }
                write!(f, "{}", square)
            }
            Move::Slide {
                origin,
                count,
                direction,
                drops,
                top,
            } => {
                if *count != 1 {
                    write!(f, "{}", count)?;
                }
                write!(f, "{}{}", origin, direction.symbol())?;
                if drops.len() > 1 {
                    for drop in drops {
                        write!(f, "{}", drop)?;
                    }
                }
                if let Some(prefix) = top.and_then(StoneKind::notation_prefix) {
                    write!(f, "{}", prefix)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::sq;

    quickcheck! {
        fn display_parses_back(mv: Move) -> bool {
            parse_move(&mv.to_string()) == Ok(mv)
        }

        fn parsed_slides_drop_everything_they_lift(mv: Move) -> bool {
            match parse_move(&mv.to_string()) {
                Ok(Move::Slide { count, drops, .. }) => {
                    drops.iter().map(|&d| u32::from(d)).sum::<u32>() == u32::from(count)
                }
                Ok(Move::Placement { .. }) => mv.is_placement(),
                Err(_) => false,
            }
        }
    }

    #[test]
    fn placements() {
        assert_eq!(
            parse_move("a1"),
            Ok(Move::placement(sq!("a1"), StoneKind::Flat))
        );
        assert_eq!(
            parse_move("Sb3"),
            Ok(Move::placement(sq!("b3"), StoneKind::Standing))
        );
        assert_eq!(
            parse_move("Ck10"),
            Ok(Move::placement(sq!("k10"), StoneKind::Capstone))
        );
    }

    #[test]
    fn slide_defaults() {
        assert_eq!(
            parse_move("a1+"),
            Ok(Move::Slide {
                origin: sq!("a1"),
                count: 1,
                direction: Direction::Up,
                drops: vec![1],
                top: None,
            })
        );
        assert_eq!(
            parse_move("3b2<"),
            Ok(Move::Slide {
                origin: sq!("b2"),
                count: 3,
                direction: Direction::Left,
                drops: vec![3],
                top: None,
            })
        );
    }

    #[test]
    fn slide_with_drops_and_capstone() {
        assert_eq!(
            parse_move("4e6+1111C"),
            Ok(Move::Slide {
                origin: sq!("e6"),
                count: 4,
                direction: Direction::Up,
                drops: vec![1, 1, 1, 1],
                top: Some(StoneKind::Capstone),
            })
        );
        assert_eq!(
            parse_move("4a4>121").map(|mv| mv.to_string()),
            Ok(String::from("4a4>121"))
        );
    }

    #[test]
    fn drop_mismatch_is_a_syntax_error() {
        assert_eq!(
            parse_move("3c3>11"),
            Err(SyntaxError::DropCountMismatch {
                text: String::from("3c3>11"),
                carried: 3,
                dropped: 2,
            })
        );
        assert_eq!(
            parse_move("c3-2"),
            Err(SyntaxError::DropCountMismatch {
                text: String::from("c3-2"),
                carried: 1,
                dropped: 2,
            })
        );
        assert!(matches!(
            parse_move("2c3>02"),
            Err(SyntaxError::ZeroDrop { .. })
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        for text in [
            "", "a", "1", "z1", "a0", "Fa1", "2a1", "Sa1+", "a1*", "a1+1X", "a1+CC", "0a1+",
        ] {
            assert!(
                matches!(parse_move(text), Err(SyntaxError::Unrecognized { .. })),
                "{:?} should not parse",
                text
            );
        }
    }

    #[test]
    fn canonical_display_drops_defaults() {
        assert_eq!(parse_move("1a1+1").unwrap().to_string(), "a1+");
        assert_eq!(parse_move("2b2>2").unwrap().to_string(), "2b2>");
        assert_eq!(parse_move("Cc3").unwrap().to_string(), "Cc3");
    }
}
