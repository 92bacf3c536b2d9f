use serde::{Deserialize, Serialize};

use crate::{Game, MoveError, Player, ReplayError, Rules, TurnSequenceError};

/// One entry of an append-only move log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: Player,
    pub turn: u32,
    /// The move in notation, e.g. `3c3>12`.
    pub text: String,
}

impl MoveRecord {
    pub fn new(player: Player, turn: u32, text: &str) -> Self {
        Self {
            player,
            turn,
            text: String::from(text),
        }
    }
}

impl Game {
    /// Plays a whole move log on a fresh board.
    pub fn replay(size: usize, rules: &Rules, records: &[MoveRecord]) -> Result<Game, ReplayError> {
        let mut game = Game::with_rules(size, rules).map_err(ReplayError::Board)?;
        for (index, record) in records.iter().enumerate() {
            game.apply_record(record)
                .map_err(|source| ReplayError::Move { index, source })?;
        }
        Ok(game)
    }

    /// Plays the next entry of a move log, which must belong to the current turn.
    pub fn apply_record(&mut self, record: &MoveRecord) -> Result<(), MoveError> {
        let (expected, _) = self.to_move();
        if record.turn != expected {
            return Err(TurnSequenceError::WrongTurnNumber {
                expected,
                found: record.turn,
            }
            .into());
        }
        self.do_single_move(&record.text, record.player)
    }

    /// All moves played so far, in order.
    pub fn move_log(&self) -> Vec<MoveRecord> {
        let mut records = Vec::new();
        for turn in self.turns() {
            for player in [Player::White, Player::Black] {
                if let Some(mv) = turn.move_by(player) {
                    records.push(MoveRecord::new(player, turn.number, &mv.to_string()));
                }
            }
        }
        records
    }
}
