use crate::{Player, Stone, StoneKind};

/// The stones on a single square, from bottom to top.
///
/// Only the top stone is visible for the purposes of the rules (who controls
/// the square, whether it blocks, whether it is part of a road). The stones
/// below it only matter when they are carried along by a slide.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stack {
    stones: Vec<Stone>,
}

impl Stack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self { stones: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stones.len()
    }

    /// The uppermost stone, if any.
    pub fn top(&self) -> Option<Stone> {
        self.stones.last().copied()
    }

    /// The owner of the uppermost stone, if any.
    pub fn controller(&self) -> Option<Player> {
        self.top().map(|stone| stone.owner)
    }

    /// Is the top stone a flat or a capstone owned by this player?
    pub fn is_road_for(&self, player: Player) -> bool {
        self.top()
            .is_some_and(|stone| stone.owner == player && stone.kind.is_road_stone())
    }

    /// Iterates over the stones from bottom to top.
    pub fn iter(&self) -> std::slice::Iter<'_, Stone> {
        self.stones.iter()
    }

    pub fn push(&mut self, stone: Stone) {
        self.stones.push(stone);
    }

    /// Removes the top `n` stones and returns them in bottom-to-top order.
    ///
    /// Panics if the stack has fewer than `n` stones; callers validate first.
    pub fn take(&mut self, n: usize) -> Vec<Stone> {
        let split_at = self.stones.len() - n;
        self.stones.split_off(split_at)
    }

    /// Puts the stones on top, keeping their bottom-to-top order.
    pub fn drop_onto(&mut self, stones: &[Stone]) {
        self.stones.extend_from_slice(stones);
    }

    /// Turns a standing stone on top into a flat of the same owner.
    pub fn flatten_top(&mut self) {
        if let Some(top) = self.stones.last_mut() {
            *top = top.flattened();
        }
    }

    /// Counts the stones of this player, buried or not, split into
    /// (normal stones, capstones).
    pub(crate) fn count_owned(&self, player: Player) -> (usize, usize) {
        self.stones
            .iter()
            .filter(|stone| stone.owner == player)
            .fold((0, 0), |(stones, capstones), stone| match stone.kind {
                StoneKind::Capstone => (stones, capstones + 1),
                StoneKind::Flat | StoneKind::Standing => (stones + 1, capstones),
            })
    }
}

impl FromIterator<Stone> for Stack {
    fn from_iter<T: IntoIterator<Item = Stone>>(iter: T) -> Self {
        Self {
            stones: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Stack {
    type Item = &'a Stone;

    type IntoIter = std::slice::Iter<'a, Stone>;

    fn into_iter(self) -> Self::IntoIter {
        self.stones.iter()
    }
}
