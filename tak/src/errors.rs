use crate::{Player, Square, StoneKind};

/// The error type for [`parse_move()`](crate::parse_move).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyntaxError {
    /// The text doesn't match either the placement or the slide grammar.
    Unrecognized { text: String },
    /// The drop digits of a slide don't add up to the number of lifted stones.
    DropCountMismatch { text: String, carried: u8, dropped: u32 },
    /// A slide that leaves no stone on one of the squares it passes.
    ZeroDrop { text: String },
}

impl std::error::Error for SyntaxError {}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyntaxError::Unrecognized { text } => write!(f, "'{}' is not a valid move", text),
            SyntaxError::DropCountMismatch {
                text,
                carried,
                dropped,
            } => write!(
                f,
                "'{}' lifts {} stones but drops {}",
                text, carried, dropped
            ),
            SyntaxError::ZeroDrop { text } => {
                write!(f, "'{}' drops zero stones on a square", text)
            }
        }
    }
}

/// The board size is not supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidSize(pub usize);

impl std::error::Error for InvalidSize {}

impl std::fmt::Display for InvalidSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Board size {} is not supported, it must be between {} and {}",
            self.0,
            crate::MIN_BOARD_SIZE,
            crate::MAX_BOARD_SIZE
        )
    }
}

/// Why a stone can't be placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalPlacement {
    OffBoard { square: Square },
    OntoCapstone { square: Square },
    OntoStanding { square: Square },
    NoStonesLeft { player: Player },
    NoCapstonesLeft { player: Player },
}

impl std::error::Error for IllegalPlacement {}

impl std::fmt::Display for IllegalPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalPlacement::OffBoard { square } => write!(f, "{} is not on the board", square),
            IllegalPlacement::OntoCapstone { square } => {
                write!(f, "Cannot place a stone on the capstone at {}", square)
            }
            IllegalPlacement::OntoStanding { square } => write!(
                f,
                "Only a capstone can be placed on the standing stone at {}",
                square
            ),
            IllegalPlacement::NoStonesLeft { player } => {
                write!(f, "{} has no stones left to place", player)
            }
            IllegalPlacement::NoCapstonesLeft { player } => {
                write!(f, "{} has no capstones left to place", player)
            }
        }
    }
}

/// Why a stack can't be moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalSlide {
    OriginOffBoard { square: Square },
    EmptyOrigin { square: Square },
    NotOwner { square: Square, owner: Player },
    CarryLimitExceeded { count: u8, limit: usize },
    NotEnoughStones { count: u8, height: usize },
    /// The drops are empty, contain a zero or don't add up to the count.
    BadDrops { count: u8 },
    TopKindMismatch { expected: StoneKind, actual: StoneKind },
    RunsOffBoard { from: Square },
    Blocked { square: Square, kind: StoneKind },
    IllegalFlattening { square: Square },
}

impl std::error::Error for IllegalSlide {}

impl std::fmt::Display for IllegalSlide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalSlide::OriginOffBoard { square } => {
                write!(f, "{} is not on the board", square)
            }
            IllegalSlide::EmptyOrigin { square } => write!(f, "There are no stones on {}", square),
            IllegalSlide::NotOwner { square, owner } => {
                write!(f, "The stack on {} is controlled by {}", square, owner)
            }
            IllegalSlide::CarryLimitExceeded { count, limit } => write!(
                f,
                "Cannot carry {} stones, the carry limit is {}",
                count, limit
            ),
            IllegalSlide::NotEnoughStones { count, height } => write!(
                f,
                "Cannot lift {} stones from a stack of {}",
                count, height
            ),
            IllegalSlide::BadDrops { count } => {
                write!(f, "The drops don't distribute all {} stones", count)
            }
            IllegalSlide::TopKindMismatch { expected, actual } => write!(
                f,
                "The move says the top stone is {:?}, but it is {:?}",
                expected, actual
            ),
            IllegalSlide::RunsOffBoard { from } => {
                write!(f, "The stones would leave the board after {}", from)
            }
            IllegalSlide::Blocked { square, kind } => {
                write!(f, "The {:?} stone on {} blocks the way", kind, square)
            }
            IllegalSlide::IllegalFlattening { square } => write!(
                f,
                "Only a lone capstone can flatten the standing stone on {}",
                square
            ),
        }
    }
}

/// The error type for [`Board::do_move()`](crate::Board::do_move).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    Placement(IllegalPlacement),
    Slide(IllegalSlide),
}

impl From<IllegalPlacement> for IllegalMove {
    fn from(err: IllegalPlacement) -> Self {
        IllegalMove::Placement(err)
    }
}

impl From<IllegalSlide> for IllegalMove {
    fn from(err: IllegalSlide) -> Self {
        IllegalMove::Slide(err)
    }
}

impl std::error::Error for IllegalMove {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllegalMove::Placement(err) => Some(err),
            IllegalMove::Slide(err) => Some(err),
        }
    }
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::Placement(_) => write!(f, "Illegal placement"),
            IllegalMove::Slide(_) => write!(f, "Illegal slide"),
        }
    }
}

/// A move was made out of turn, or breaks the rules of the first turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnSequenceError {
    WrongPlayer { turn: u32, expected: Player },
    SlotOccupied { turn: u32, player: Player },
    IllegalFirstMove { player: Player },
    GameAlreadyOver,
    WrongTurnNumber { expected: u32, found: u32 },
}

impl std::error::Error for TurnSequenceError {}

impl std::fmt::Display for TurnSequenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnSequenceError::WrongPlayer { turn, expected } => {
                write!(f, "It is {}'s move in turn {}", expected, turn)
            }
            TurnSequenceError::SlotOccupied { turn, player } => {
                write!(f, "{} has already moved in turn {}", player, turn)
            }
            TurnSequenceError::IllegalFirstMove { player } => write!(
                f,
                "{} must place a flat stone of the opponent in the first turn",
                player
            ),
            TurnSequenceError::GameAlreadyOver => write!(f, "The game is already over"),
            TurnSequenceError::WrongTurnNumber { expected, found } => {
                write!(f, "Expected a move for turn {}, got turn {}", expected, found)
            }
        }
    }
}

/// The error type for moves made through a [`Game`](crate::Game).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    Syntax(SyntaxError),
    Illegal(IllegalMove),
    Sequence(TurnSequenceError),
}

impl From<SyntaxError> for MoveError {
    fn from(err: SyntaxError) -> Self {
        MoveError::Syntax(err)
    }
}

impl From<IllegalMove> for MoveError {
    fn from(err: IllegalMove) -> Self {
        MoveError::Illegal(err)
    }
}

impl From<TurnSequenceError> for MoveError {
    fn from(err: TurnSequenceError) -> Self {
        MoveError::Sequence(err)
    }
}

impl std::error::Error for MoveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MoveError::Syntax(err) => Some(err),
            MoveError::Illegal(err) => Some(err),
            MoveError::Sequence(err) => Some(err),
        }
    }
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveError::Syntax(_) => write!(f, "Could not parse move"),
            MoveError::Illegal(_) => write!(f, "Move is not legal"),
            MoveError::Sequence(_) => write!(f, "Move is out of sequence"),
        }
    }
}

/// Problems with the metadata tags of a transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MetadataError {
    MissingSize,
    InvalidSize { value: String },
    Board(InvalidSize),
}

impl std::error::Error for MetadataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MetadataError::Board(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for MetadataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetadataError::MissingSize => write!(f, "The Size tag is missing"),
            MetadataError::InvalidSize { value } => {
                write!(f, "The Size tag '{}' is not a number", value)
            }
            MetadataError::Board(_) => write!(f, "The Size tag names an unsupported board"),
        }
    }
}

/// The error type for [`parse_transcript()`](crate::parse_transcript).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TranscriptError {
    Metadata(MetadataError),
    Move {
        turn: u32,
        player: Player,
        source: MoveError,
    },
}

impl From<MetadataError> for TranscriptError {
    fn from(err: MetadataError) -> Self {
        TranscriptError::Metadata(err)
    }
}

impl std::error::Error for TranscriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TranscriptError::Metadata(err) => Some(err),
            TranscriptError::Move { source, .. } => Some(source),
        }
    }
}

impl std::fmt::Display for TranscriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranscriptError::Metadata(_) => write!(f, "Invalid transcript metadata"),
            TranscriptError::Move { turn, player, .. } => {
                write!(f, "Error replaying {}'s move in turn {}", player, turn)
            }
        }
    }
}

/// The error type for [`Game::replay()`](crate::Game::replay).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplayError {
    Board(InvalidSize),
    Move { index: usize, source: MoveError },
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplayError::Board(err) => Some(err),
            ReplayError::Move { source, .. } => Some(source),
        }
    }
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::Board(_) => write!(f, "Could not set up the board"),
            ReplayError::Move { index, .. } => {
                write!(f, "Error replaying record number {} of the move log", index + 1)
            }
        }
    }
}
