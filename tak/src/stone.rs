use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the two sides of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    White,
    Black,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::White => write!(f, "White"),
            Player::Black => write!(f, "Black"),
        }
    }
}

/// The kind of a [stone](Stone).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StoneKind {
    #[serde(rename = "F")]
    Flat,
    #[serde(rename = "S")]
    Standing,
    #[serde(rename = "C")]
    Capstone,
}

impl StoneKind {
    /// Whether a stone of this kind on top of a stack counts towards a road.
    pub fn is_road_stone(self) -> bool {
        match self {
            StoneKind::Flat | StoneKind::Capstone => true,
            StoneKind::Standing => false,
        }
    }

    /// Whether a stone of this kind on top of a stack stops other stones from
    /// being placed or dropped there.
    pub fn is_blocking(self) -> bool {
        match self {
            StoneKind::Flat => false,
            StoneKind::Standing | StoneKind::Capstone => true,
        }
    }

    /// The single-letter prefix used in move notation. Flats have none.
    pub fn notation_prefix(self) -> Option<char> {
        match self {
            StoneKind::Flat => None,
            StoneKind::Standing => Some('S'),
            StoneKind::Capstone => Some('C'),
        }
    }

    pub(crate) fn from_prefix(c: char) -> Option<StoneKind> {
        match c {
            'S' => Some(StoneKind::Standing),
            'C' => Some(StoneKind::Capstone),
            _ => None,
        }
    }
}

/// A single stone on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stone {
    pub kind: StoneKind,
    pub owner: Player,
}

impl Stone {
    pub fn new(kind: StoneKind, owner: Player) -> Self {
        Self { kind, owner }
    }

    pub fn flat(owner: Player) -> Self {
        Self::new(StoneKind::Flat, owner)
    }

    pub fn standing(owner: Player) -> Self {
        Self::new(StoneKind::Standing, owner)
    }

    pub fn capstone(owner: Player) -> Self {
        Self::new(StoneKind::Capstone, owner)
    }

    /// The same stone laid flat. Only standing stones actually change.
    #[must_use]
    pub fn flattened(self) -> Self {
        match self.kind {
            StoneKind::Standing => Stone::flat(self.owner),
            StoneKind::Flat | StoneKind::Capstone => self,
        }
    }
}

impl std::fmt::Display for Stone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let color = match self.owner {
            Player::White => 'W',
            Player::Black => 'B',
        };
        match self.kind.notation_prefix() {
            Some(prefix) => write!(f, "{}{}", color, prefix),
            None => write!(f, "{}", color),
        }
    }
}

/// The error type for the [`FromStr`] instance of [`Stone`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoneFromStrErr {
    Empty,
    InvalidColor,
    InvalidKind,
    TooLong,
}

impl FromStr for Stone {
    type Err = StoneFromStrErr;

    /// Parses the form produced by [`Display`](std::fmt::Display), e.g. `W`, `BS` or `WC`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let owner = match chars.next().ok_or(StoneFromStrErr::Empty)? {
            'W' => Player::White,
            'B' => Player::Black,
            _ => return Err(StoneFromStrErr::InvalidColor),
        };
        let kind = match chars.next() {
            None => StoneKind::Flat,
            Some(c) => StoneKind::from_prefix(c).ok_or(StoneFromStrErr::InvalidKind)?,
        };
        if chars.next().is_some() {
            return Err(StoneFromStrErr::TooLong);
        }
        Ok(Stone { kind, owner })
    }
}
