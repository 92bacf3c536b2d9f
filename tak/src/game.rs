use std::cmp::Ordering;

use tracing::debug;

use crate::{
    parse_move, Board, GameResult, InvalidSize, MetadataError, Move, MoveError, Player, Rules,
    StoneKind, Tag, Turn, TurnSequenceError,
};

/// A game of Tak: the board, the moves that led to it, and metadata.
///
/// Moves are applied one at a time with [`Game::do_single_move()`] or two at a
/// time with [`Game::do_turn()`]. A `Game` is plain data; callers sharing one
/// between threads have to serialize mutations themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    pub id: Option<u64>,
    pub slug: Option<String>,
    board: Board,
    /// Ordered by turn number.
    turns: Vec<Turn>,
    tags: Vec<Tag>,
    /// Decides who wins when a single move completes a road for both players.
    last_mover: Option<Player>,
}

impl Game {
    /// Starts a game on an empty board with the standard reserves.
    pub fn new(size: usize) -> Result<Self, InvalidSize> {
        Self::with_rules(size, &Rules::default())
    }

    pub fn with_rules(size: usize, rules: &Rules) -> Result<Self, InvalidSize> {
        Ok(Self::from_board(Board::with_rules(size, rules)?))
    }

    /// Wraps an existing position. No turns have been played in the new game.
    pub fn from_board(board: Board) -> Self {
        let size = board.size().to_string();
        Self {
            id: None,
            slug: None,
            board,
            turns: Vec::new(),
            tags: vec![Tag::new("Size", &size)],
            last_mover: None,
        }
    }

    /// Starts a game sized by the mandatory `Size` tag, keeping all tags.
    pub fn from_tags(tags: Vec<Tag>, rules: &Rules) -> Result<Self, MetadataError> {
        let value = tags
            .iter()
            .rev()
            .find(|tag| tag.key == "Size")
            .map(|tag| tag.value.trim())
            .ok_or(MetadataError::MissingSize)?;
        let size: usize = value.parse().map_err(|_| MetadataError::InvalidSize {
            value: String::from(value),
        })?;
        let mut game = Self::with_rules(size, rules).map_err(MetadataError::Board)?;
        for tag in tags {
            game.update_meta(&tag.key, &tag.value);
        }
        Ok(game)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn get_turn(&self, number: u32) -> Option<&Turn> {
        self.turns.iter().find(|turn| turn.number == number)
    }

    /// Replaces the turn with the same number, or appends it.
    pub fn update_turn(&mut self, turn: Turn) {
        match self.turns.iter_mut().find(|t| t.number == turn.number) {
            Some(existing) => *existing = turn,
            None => self.turns.push(turn),
        }
    }

    pub fn get_meta(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.key == key)
            .map(|tag| tag.value.as_str())
    }

    /// Sets a tag, overwriting an earlier value for the same key.
    pub fn update_meta(&mut self, key: &str, value: &str) {
        match self.tags.iter_mut().find(|tag| tag.key == key) {
            Some(tag) => tag.value = String::from(value),
            None => self.tags.push(Tag::new(key, value)),
        }
    }

    /// The turn number and player that the next move must come from.
    pub fn to_move(&self) -> (u32, Player) {
        let completed = self.turns.iter().filter(|turn| turn.is_complete()).count() as u32;
        let number = completed + 1;
        match self.get_turn(number) {
            Some(turn) if turn.first.is_some() => (number, Player::Black),
            _ => (number, Player::White),
        }
    }

    /// Parses and plays one move.
    ///
    /// In the first turn, both players must place a flat, and it is placed
    /// in the opponent's color.
    pub fn do_single_move(&mut self, text: &str, player: Player) -> Result<(), MoveError> {
        let mv = parse_move(text)?;
        self.play(mv, player)
    }

    /// Plays an already parsed move. See [`Self::do_single_move()`].
    pub fn play(&mut self, mv: Move, player: Player) -> Result<(), MoveError> {
        if self.outcome().is_some() {
            return Err(TurnSequenceError::GameAlreadyOver.into());
        }
        let (number, expected) = self.to_move();
        if player != expected {
            return Err(TurnSequenceError::WrongPlayer {
                turn: number,
                expected,
            }
            .into());
        }
        let mut turn = self
            .get_turn(number)
            .cloned()
            .unwrap_or_else(|| Turn::new(number));
        if turn.move_by(player).is_some() {
            return Err(TurnSequenceError::SlotOccupied {
                turn: number,
                player,
            }
            .into());
        }

        let stone_owner = if number == 1 {
            match mv {
                Move::Placement {
                    kind: StoneKind::Flat,
                    ..
                } => player.opponent(),
                _ => return Err(TurnSequenceError::IllegalFirstMove { player }.into()),
            }
        } else {
            player
        };

        self.board.do_move(&mv, stone_owner)?;
        self.last_mover = Some(player);
        debug!(turn = number, %player, mv = %mv, "Applied move");

        *turn.slot_mut(player) = Some(mv);
        if let Some(result) = self.outcome() {
            debug!(turn = number, %result, "Game over");
            turn.result = Some(result);
        }
        self.update_turn(turn);
        Ok(())
    }

    /// Plays a whole turn, White's move and then Black's.
    ///
    /// If either move fails, the game is left as it was.
    pub fn do_turn(&mut self, white: &str, black: &str) -> Result<(), MoveError> {
        let mut scratch = self.clone();
        scratch.do_single_move(white, Player::White)?;
        scratch.do_single_move(black, Player::Black)?;
        *self = scratch;
        Ok(())
    }

    /// The result, if the game is over.
    ///
    /// Roads are checked first, starting with the player who moved last. After
    /// that the game ends on a full board or when one player has no stones
    /// left, and whoever has more flats on top wins.
    pub fn outcome(&self) -> Option<GameResult> {
        let first = self.last_mover.unwrap_or(Player::White);
        for player in [first, first.opponent()] {
            if self.board.has_road(player) {
                return Some(GameResult::Road(player));
            }
        }

        let exhausted = [Player::White, Player::Black]
            .into_iter()
            .any(|player| self.board.is_exhausted(player));
        if !self.board.is_full() && !exhausted {
            return None;
        }
        let white = self.board.count_flats(Player::White);
        let black = self.board.count_flats(Player::Black);
        Some(match white.cmp(&black) {
            Ordering::Greater => GameResult::Flats(Player::White),
            Ordering::Less => GameResult::Flats(Player::Black),
            Ordering::Equal => GameResult::Draw,
        })
    }

    /// `(winner, is_over)`. The winner is `None` for a draw or a running game.
    pub fn game_over(&self) -> (Option<Player>, bool) {
        match self.outcome() {
            Some(result) => (result.winner(), true),
            None => (None, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sq, Stone};

    fn board_with(size: usize, white: &[&str], black: &[&str]) -> Board {
        let mut board = Board::new(size).unwrap();
        for (player, moves) in [(Player::White, white), (Player::Black, black)] {
            for text in moves {
                board.do_move(&parse_move(text).unwrap(), player).unwrap();
            }
        }
        board
    }

    #[test]
    fn first_turn_places_opponent_stones() {
        let mut game = Game::new(5).unwrap();
        game.do_single_move("a1", Player::White).unwrap();
        game.do_single_move("b1", Player::Black).unwrap();
        assert_eq!(game.board().top_stone(sq!("a1")), Some(Stone::flat(Player::Black)));
        assert_eq!(game.board().top_stone(sq!("b1")), Some(Stone::flat(Player::White)));
        assert!(game.get_turn(1).unwrap().is_complete());
        assert_eq!(game.to_move(), (2, Player::White));

        game.do_single_move("c1", Player::White).unwrap();
        assert_eq!(game.board().top_stone(sq!("c1")), Some(Stone::flat(Player::White)));
    }

    #[test]
    fn first_turn_must_be_a_flat() {
        let mut game = Game::new(5).unwrap();
        for text in ["Sa1", "Ca1"] {
            assert_eq!(
                game.do_single_move(text, Player::White),
                Err(MoveError::Sequence(TurnSequenceError::IllegalFirstMove {
                    player: Player::White
                }))
            );
        }
        game.do_single_move("a1", Player::White).unwrap();
        assert_eq!(
            game.do_single_move("a1>", Player::Black),
            Err(MoveError::Sequence(TurnSequenceError::IllegalFirstMove {
                player: Player::Black
            }))
        );
        assert!(game.get_turn(1).unwrap().second.is_none());
    }

    #[test]
    fn players_take_turns() {
        let mut game = Game::new(5).unwrap();
        assert_eq!(
            game.do_single_move("a1", Player::Black),
            Err(MoveError::Sequence(TurnSequenceError::WrongPlayer {
                turn: 1,
                expected: Player::White
            }))
        );
        game.do_single_move("a1", Player::White).unwrap();
        assert_eq!(
            game.do_single_move("b1", Player::White),
            Err(MoveError::Sequence(TurnSequenceError::WrongPlayer {
                turn: 1,
                expected: Player::Black
            }))
        );
        assert!(matches!(
            game.do_single_move("b1x", Player::Black),
            Err(MoveError::Syntax(_))
        ));
    }

    #[test]
    fn turn_is_all_or_nothing() {
        let mut game = Game::new(5).unwrap();
        game.do_turn("a1", "e5").unwrap();
        let before = game.clone();
        assert!(matches!(
            game.do_turn("c3", "f1"),
            Err(MoveError::Illegal(_))
        ));
        assert_eq!(game, before);
        assert_eq!(game.get_turn(2), None);

        // Separate moves are committed one by one
        game.do_single_move("c3", Player::White).unwrap();
        assert!(game.do_single_move("f1", Player::Black).is_err());
        assert_eq!(game.board().top_stone(sq!("c3")), Some(Stone::flat(Player::White)));
        assert_eq!(game.to_move(), (2, Player::Black));
    }

    #[test]
    fn road_ends_the_game() {
        let mut game = Game::new(4).unwrap();
        game.do_turn("a4", "a1").unwrap();
        game.do_turn("b1", "a3").unwrap();
        game.do_turn("c1", "a2").unwrap();
        assert_eq!(game.game_over(), (None, false));
        game.do_single_move("d1", Player::White).unwrap();
        assert_eq!(game.game_over(), (Some(Player::White), true));
        assert_eq!(
            game.get_turn(4).unwrap().result,
            Some(GameResult::Road(Player::White))
        );
        assert_eq!(
            game.do_single_move("b2", Player::Black),
            Err(MoveError::Sequence(TurnSequenceError::GameAlreadyOver))
        );
    }

    #[test]
    fn horizontal_road() {
        let game = Game::from_board(board_with(5, &["a1", "b1", "c1", "d1", "e1"], &[]));
        assert_eq!(game.game_over(), (Some(Player::White), true));
        assert_eq!(game.outcome(), Some(GameResult::Road(Player::White)));
    }

    #[test]
    fn standing_stone_blocks_the_road() {
        let game = Game::from_board(board_with(5, &["a1", "b1", "Sc1", "d1", "e1"], &[]));
        assert!(!game.game_over().1);
    }

    #[test]
    fn full_board_goes_to_flat_count() {
        let white = ["a1", "c1", "b2", "d2", "a3", "c3", "b4", "d4", "Sb1"];
        let black = ["d1", "a2", "c2", "b3", "d3", "a4", "c4"];
        let game = Game::from_board(board_with(4, &white, &black));
        assert!(game.board().is_full());
        assert_eq!(game.board().count_flats(Player::White), 8);
        assert_eq!(game.board().count_flats(Player::Black), 7);
        assert_eq!(game.game_over(), (Some(Player::White), true));
        assert_eq!(game.outcome(), Some(GameResult::Flats(Player::White)));
    }

    #[test]
    fn nine_against_seven_flats() {
        // Checkerboard without roads, plus one white flat on top of a black one
        let white = ["a1", "c1", "b2", "d2", "a3", "c3", "b4", "d4", "d1"];
        let black = ["b1", "a2", "c2", "b3", "d3", "a4", "c4", "d1"];
        let mut board = board_with(4, &white, &black);
        board
            .do_move(&parse_move("d1").unwrap(), Player::White)
            .unwrap();
        let game = Game::from_board(board);
        assert_eq!(game.board().count_flats(Player::White), 9);
        assert_eq!(game.board().count_flats(Player::Black), 7);
        assert_eq!(game.game_over(), (Some(Player::White), true));
    }

    #[test]
    fn equal_flats_is_a_draw() {
        let white = ["a1", "c1", "b2", "d2", "a3", "c3", "b4", "d4"];
        let black = ["b1", "d1", "a2", "c2", "b3", "d3", "a4", "c4"];
        let game = Game::from_board(board_with(4, &white, &black));
        assert_eq!(game.outcome(), Some(GameResult::Draw));
        assert_eq!(game.game_over(), (None, true));
    }

    #[test]
    fn running_out_of_stones_ends_the_game() {
        let rules = Rules::empty().with_allotment(5, crate::Allotment::new(3, 0));
        let mut board = Board::with_rules(5, &rules).unwrap();
        for text in ["a1", "c3", "e5"] {
            board
                .do_move(&parse_move(text).unwrap(), Player::Black)
                .unwrap();
        }
        board
            .do_move(&parse_move("b2").unwrap(), Player::White)
            .unwrap();
        let game = Game::from_board(board);
        assert_eq!(game.outcome(), Some(GameResult::Flats(Player::Black)));
    }

    #[test]
    fn mover_wins_when_both_complete_a_road() {
        let board = board_with(4, &["a3", "b3", "c3", "d3"], &["a4", "b4", "c4", "d3"]);
        let mut game = Game::from_board(board);
        game.update_turn(Turn {
            number: 1,
            first: Some(parse_move("a3").unwrap()),
            second: Some(parse_move("a4").unwrap()),
            ..Default::default()
        });
        game.update_turn(Turn {
            number: 2,
            first: Some(parse_move("b3").unwrap()),
            ..Default::default()
        });
        assert_eq!(game.outcome(), None);
        game.do_single_move("d3+", Player::Black).unwrap();
        assert!(game.board().has_road(Player::White));
        assert_eq!(game.outcome(), Some(GameResult::Road(Player::Black)));
    }

    #[test]
    fn metadata() {
        let mut game = Game::new(6).unwrap();
        assert_eq!(game.get_meta("Size"), Some("6"));
        game.update_meta("Player1", "alice");
        game.update_meta("Player1", "bob");
        assert_eq!(game.get_meta("Player1"), Some("bob"));
        assert_eq!(game.tags().len(), 2);
        assert_eq!(game.get_meta("Date"), None);
    }

    #[test]
    fn from_tags_requires_a_size() {
        let rules = Rules::default();
        assert_eq!(
            Game::from_tags(vec![Tag::new("Player1", "alice")], &rules),
            Err(MetadataError::MissingSize)
        );
        assert_eq!(
            Game::from_tags(vec![Tag::new("Size", "big")], &rules),
            Err(MetadataError::InvalidSize {
                value: String::from("big")
            })
        );
        assert_eq!(
            Game::from_tags(vec![Tag::new("Size", "12")], &rules),
            Err(MetadataError::Board(InvalidSize(12)))
        );
        let game = Game::from_tags(vec![Tag::new("Size", "7"), Tag::new("Site", "here")], &rules)
            .unwrap();
        assert_eq!(game.board().size(), 7);
        assert_eq!(game.get_meta("Site"), Some("here"));
    }
}
