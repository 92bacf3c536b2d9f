use crate::{
    visualize_top_stones, Allotment, Direction, Edge, IllegalMove, IllegalPlacement, IllegalSlide,
    InvalidSize, Move, Player, Rules, Square, Stack, Stone, StoneKind, MAX_BOARD_SIZE,
    MIN_BOARD_SIZE,
};

/// A square Tak board with a stack of stones on every square.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// One entry per square in row-major order, i.e. indexed by `row * size + column`.
    stacks: Vec<Stack>,
    /// The reserve each player starts with.
    allotment: Allotment,
}

/// The change that a move effects on the board.
///
/// Indices are into `Board::stacks`.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Diff {
    Place {
        idx: usize,
        stone: Stone,
        flatten: bool,
    },
    Slide {
        origin: usize,
        count: usize,
        /// Destination index and number of stones dropped there, in order.
        steps: Vec<(usize, usize)>,
        flatten: Option<usize>,
    },
}

/// A validated move, ready to be applied.
pub struct MoveCalculation<'a> {
    /// This struct ties together the board and its diff, to prevent any possible mixups
    board: &'a Board,
    diff: Diff,
    /// The square whose standing stone gets flattened by this move, if any.
    pub flattens: Option<Square>,
}

impl Board {
    /// Creates an empty board with the standard reserves.
    pub fn new(size: usize) -> Result<Self, InvalidSize> {
        Self::with_rules(size, &Rules::default())
    }

    /// Creates an empty board whose reserves are taken from `rules`.
    pub fn with_rules(size: usize, rules: &Rules) -> Result<Self, InvalidSize> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(InvalidSize(size));
        }
        let allotment = rules.allotment(size).ok_or(InvalidSize(size))?;
        Ok(Self {
            size,
            stacks: vec![Stack::new(); size * size],
            allotment,
        })
    }

    /// The side length of the board, which is also the carry limit.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The reserve each player started the game with.
    pub fn allotment(&self) -> Allotment {
        self.allotment
    }

    /// All squares, row by row starting at `a1`.
    pub fn squares(&self) -> impl Iterator<Item = Square> {
        let size = self.size as u8;
        (0..size).flat_map(move |row| (0..size).map(move |column| Square::new(column, row)))
    }

    /// The stack on a square, or `None` if the square isn't on the board.
    pub fn stack(&self, square: Square) -> Option<&Stack> {
        self.index(square).map(|idx| &self.stacks[idx])
    }

    pub fn top_stone(&self, square: Square) -> Option<Stone> {
        self.stack(square).and_then(Stack::top)
    }

    /// The player controlling a square, i.e. the owner of its top stone.
    pub fn color(&self, square: Square) -> Option<Player> {
        self.stack(square).and_then(Stack::controller)
    }

    pub fn is_edge(&self, square: Square) -> bool {
        square.is_on_board(self.size)
            && [Edge::Left, Edge::Right, Edge::Bottom, Edge::Top]
                .into_iter()
                .any(|edge| edge.contains(square, self.size))
    }

    pub fn edge_squares(&self, edge: Edge) -> Vec<Square> {
        self.squares()
            .filter(|&square| edge.contains(square, self.size))
            .collect()
    }

    /// Is there at least one stone on every square?
    pub fn is_full(&self) -> bool {
        self.stacks.iter().all(|stack| !stack.is_empty())
    }

    /// How many of their stones and capstones the player has put on the board,
    /// including buried ones.
    pub fn placed(&self, player: Player) -> Allotment {
        let (stones, capstones) = self.stacks.iter().fold((0, 0), |(s, c), stack| {
            let (ds, dc) = stack.count_owned(player);
            (s + ds, c + dc)
        });
        Allotment {
            stones: u8::try_from(stones).unwrap_or(u8::MAX),
            capstones: u8::try_from(capstones).unwrap_or(u8::MAX),
        }
    }

    /// What is left of the player's reserve.
    pub fn reserves(&self, player: Player) -> Allotment {
        let placed = self.placed(player);
        Allotment {
            stones: self.allotment.stones.saturating_sub(placed.stones),
            capstones: self.allotment.capstones.saturating_sub(placed.capstones),
        }
    }

    /// Has the player placed their entire reserve?
    pub fn is_exhausted(&self, player: Player) -> bool {
        self.placed(player).total() >= self.allotment.total()
    }

    /// Number of squares whose top stone is a flat of this player.
    ///
    /// Capstones and buried stones don't count.
    pub fn count_flats(&self, player: Player) -> usize {
        self.stacks
            .iter()
            .filter_map(Stack::top)
            .filter(|&stone| stone == Stone::flat(player))
            .count()
    }

    /// Checks the move and plans out the changes it would make.
    ///
    /// Nothing is changed until [`MoveCalculation::execute()`] is called, and
    /// the returned struct can only be applied to this board. For changing
    /// the board in place, use [`Self::do_move()`].
    pub fn calculate(
        &self,
        mv: &Move,
        player: Player,
    ) -> Result<MoveCalculation<'_>, IllegalMove> {
        let diff = self.plan(mv, player)?;
        let flattens = match &diff {
            Diff::Place {
                idx, flatten: true, ..
            } => Some(self.square_at(*idx)),
            Diff::Slide {
                flatten: Some(idx), ..
            } => Some(self.square_at(*idx)),
            _ => None,
        };
        Ok(MoveCalculation {
            board: self,
            diff,
            flattens,
        })
    }

    /// Applies a move for `player`.
    ///
    /// For placements, `player` is the owner of the new stone. For slides,
    /// it must be the player controlling the origin.
    ///
    /// If the move is illegal, an error is returned and the board is unchanged.
    pub fn do_move(&mut self, mv: &Move, player: Player) -> Result<(), IllegalMove> {
        let diff = self.plan(mv, player)?;
        diff.apply(self);
        Ok(())
    }

    /// Is there a chain of road stones from `start` to any of the `targets`?
    ///
    /// Only orthogonally adjacent squares whose top stone is a flat or
    /// capstone of the player controlling `start` are followed. Standing
    /// stones block.
    pub fn find_road(&self, start: Square, targets: &[Square]) -> bool {
        let Some(player) = self.color(start) else {
            return false;
        };
        let is_road = |square: Square| {
            self.stack(square)
                .is_some_and(|stack| stack.is_road_for(player))
        };
        if !is_road(start) {
            return false;
        }

        let mut visited = vec![false; self.stacks.len()];
        let mut frontier = vec![start];
        visited[self.square_index(start)] = true;
        while let Some(square) = frontier.pop() {
            if targets.contains(&square) {
                return true;
            }
            for neighbour in square.neighbours(self.size) {
                let idx = self.square_index(neighbour);
                if !visited[idx] && is_road(neighbour) {
                    visited[idx] = true;
                    frontier.push(neighbour);
                }
            }
        }
        false
    }

    /// Does the player have a road between two opposite edges?
    pub fn has_road(&self, player: Player) -> bool {
        [Edge::Left, Edge::Bottom].into_iter().any(|edge| {
            let targets = self.edge_squares(edge.opposite());
            self.edge_squares(edge)
                .into_iter()
                .filter(|&square| {
                    self.stack(square)
                        .is_some_and(|stack| stack.is_road_for(player))
                })
                .any(|square| self.find_road(square, &targets))
        })
    }

    fn index(&self, square: Square) -> Option<usize> {
        square
            .is_on_board(self.size)
            .then(|| self.square_index(square))
    }

    // Only for squares known to be on the board
    fn square_index(&self, square: Square) -> usize {
        usize::from(square.row) * self.size + usize::from(square.column)
    }

    fn square_at(&self, idx: usize) -> Square {
        Square::new((idx % self.size) as u8, (idx / self.size) as u8)
    }

    fn plan(&self, mv: &Move, player: Player) -> Result<Diff, IllegalMove> {
        match mv {
            Move::Placement { square, kind } => Ok(self.plan_placement(*square, *kind, player)?),
            Move::Slide {
                origin,
                count,
                direction,
                drops,
                top,
            } => Ok(self.plan_slide(*origin, *count, *direction, drops, *top, player)?),
        }
    }

    fn plan_placement(
        &self,
        square: Square,
        kind: StoneKind,
        player: Player,
    ) -> Result<Diff, IllegalPlacement> {
        let idx = self
            .index(square)
            .ok_or(IllegalPlacement::OffBoard { square })?;

        let flatten = match self.stacks[idx].top().map(|stone| stone.kind) {
            None | Some(StoneKind::Flat) => false,
            Some(StoneKind::Standing) if kind == StoneKind::Capstone => true,
            Some(StoneKind::Standing) => return Err(IllegalPlacement::OntoStanding { square }),
            Some(StoneKind::Capstone) => return Err(IllegalPlacement::OntoCapstone { square }),
        };

        let reserves = self.reserves(player);
        match kind {
            StoneKind::Capstone if reserves.capstones == 0 => {
                return Err(IllegalPlacement::NoCapstonesLeft { player })
            }
            StoneKind::Flat | StoneKind::Standing if reserves.stones == 0 => {
                return Err(IllegalPlacement::NoStonesLeft { player })
            }
            _ => (),
        }

        Ok(Diff::Place {
            idx,
            stone: Stone::new(kind, player),
            flatten,
        })
    }

    fn plan_slide(
        &self,
        origin: Square,
        count: u8,
        direction: Direction,
        drops: &[u8],
        top: Option<StoneKind>,
        player: Player,
    ) -> Result<Diff, IllegalSlide> {
        let origin_idx = self
            .index(origin)
            .ok_or(IllegalSlide::OriginOffBoard { square: origin })?;
        let stack = &self.stacks[origin_idx];
        let moving_top = stack
            .top()
            .ok_or(IllegalSlide::EmptyOrigin { square: origin })?;
        if moving_top.owner != player {
            return Err(IllegalSlide::NotOwner {
                square: origin,
                owner: moving_top.owner,
            });
        }
        let carried = usize::from(count);
        if carried > self.size {
            return Err(IllegalSlide::CarryLimitExceeded {
                count,
                limit: self.size,
            });
        }
        if carried > stack.len() {
            return Err(IllegalSlide::NotEnoughStones {
                count,
                height: stack.len(),
            });
        }
        let dropped: usize = drops.iter().map(|&d| usize::from(d)).sum();
        if drops.is_empty() || drops.contains(&0) || dropped != carried {
            return Err(IllegalSlide::BadDrops { count });
        }
        if let Some(expected) = top.filter(|&kind| kind != moving_top.kind) {
            return Err(IllegalSlide::TopKindMismatch {
                expected,
                actual: moving_top.kind,
            });
        }

        let mut steps = Vec::with_capacity(drops.len());
        let mut flatten = None;
        let mut square = origin;
        for (step_idx, &dropped) in drops.iter().enumerate() {
            square = square
                .step(direction, self.size)
                .ok_or(IllegalSlide::RunsOffBoard { from: square })?;
            let idx = self.square_index(square);
            let is_last = step_idx + 1 == drops.len();
            match self.stacks[idx].top().map(|stone| stone.kind) {
                None | Some(StoneKind::Flat) => (),
                Some(StoneKind::Standing) if is_last && moving_top.kind == StoneKind::Capstone => {
                    // The capstone lands here, but only a lone capstone may flatten
                    if carried != 1 {
                        return Err(IllegalSlide::IllegalFlattening { square });
                    }
                    flatten = Some(idx);
                }
                Some(kind) => return Err(IllegalSlide::Blocked { square, kind }),
            }
            steps.push((idx, usize::from(dropped)));
        }

        Ok(Diff::Slide {
            origin: origin_idx,
            count: carried,
            steps,
            flatten,
        })
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", visualize_top_stones(self))
    }
}

impl<'a> MoveCalculation<'a> {
    /// Apply the computed changes to a copy of the board.
    pub fn execute(self) -> Board {
        let mut board = self.board.clone();
        self.diff.apply(&mut board);
        board
    }
}

impl Diff {
    fn apply(self, board: &mut Board) {
        match self {
            Diff::Place {
                idx,
                stone,
                flatten,
            } => {
                let stack = &mut board.stacks[idx];
                if flatten {
                    stack.flatten_top();
                }
                stack.push(stone);
            }
            Diff::Slide {
                origin,
                count,
                steps,
                flatten,
            } => {
                let carried = board.stacks[origin].take(count);
                if let Some(idx) = flatten {
                    board.stacks[idx].flatten_top();
                }
                // The first drop takes the bottom-most stones
                let mut remaining = carried.as_slice();
                for (idx, dropped) in steps {
                    let (now, later) = remaining.split_at(dropped);
                    board.stacks[idx].drop_onto(now);
                    remaining = later;
                }
            }
        }
    }
}
