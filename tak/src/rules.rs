use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The smallest supported board.
pub const MIN_BOARD_SIZE: usize = 4;
/// The largest supported board.
pub const MAX_BOARD_SIZE: usize = 9;

/// How many stones each player has in reserve at the start of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allotment {
    /// Stones that can be placed flat or standing.
    pub stones: u8,
    pub capstones: u8,
}

impl Allotment {
    pub const fn new(stones: u8, capstones: u8) -> Self {
        Self { stones, capstones }
    }

    pub fn total(self) -> usize {
        usize::from(self.stones) + usize::from(self.capstones)
    }
}

// The entries for 7 and 9 are not settled; override them through `Rules` if needed.
static STANDARD_ALLOTMENTS: [(u8, Allotment); 6] = [
    (4, Allotment::new(15, 0)),
    (5, Allotment::new(21, 1)),
    (6, Allotment::new(30, 1)),
    (7, Allotment::new(40, 1)),
    (8, Allotment::new(50, 2)),
    (9, Allotment::new(60, 2)),
];

/// The standard reserve for a board size, if the size is supported.
pub fn standard_allotment(size: usize) -> Option<Allotment> {
    STANDARD_ALLOTMENTS
        .iter()
        .find(|&&(s, _)| usize::from(s) == size)
        .map(|&(_, allotment)| allotment)
}

/// Configurable parts of the rules.
///
/// Can be deserialized from a partial table, e.g.
/// `{"allotments": {"7": {"stones": 40, "capstones": 2}}}`, and then
/// [merged](Rules::merge) over the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    #[serde(default)]
    pub allotments: BTreeMap<u8, Allotment>,
}

impl Rules {
    /// Rules without any entries, so every lookup falls back to the standard table.
    pub fn empty() -> Self {
        Self {
            allotments: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_allotment(mut self, size: u8, allotment: Allotment) -> Self {
        self.allotments.insert(size, allotment);
        self
    }

    /// Overlays the entries of `other` on top of these rules.
    #[must_use]
    pub fn merge(mut self, other: Rules) -> Self {
        self.allotments.extend(other.allotments);
        self
    }

    /// The reserve per player on a board of this size.
    pub fn allotment(&self, size: usize) -> Option<Allotment> {
        u8::try_from(size)
            .ok()
            .and_then(|s| self.allotments.get(&s).copied())
            .or_else(|| standard_allotment(size))
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            allotments: STANDARD_ALLOTMENTS.iter().copied().collect(),
        }
    }
}
