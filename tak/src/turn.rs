use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Move, Player};

/// How a finished game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// The player connected two opposite edges.
    Road(Player),
    /// The board filled up or a reserve ran out, and the player had more flats on top.
    Flats(Player),
    /// Won some other way, e.g. by resignation or on time. Only read from transcripts.
    Decision(Player),
    /// Same as [`GameResult::Flats`], but with equal flat counts.
    Draw,
}

impl GameResult {
    pub fn winner(self) -> Option<Player> {
        match self {
            GameResult::Road(player)
            | GameResult::Flats(player)
            | GameResult::Decision(player) => Some(player),
            GameResult::Draw => None,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            GameResult::Road(Player::White) => "R-0",
            GameResult::Road(Player::Black) => "0-R",
            GameResult::Flats(Player::White) => "F-0",
            GameResult::Flats(Player::Black) => "0-F",
            GameResult::Decision(Player::White) => "1-0",
            GameResult::Decision(Player::Black) => "0-1",
            GameResult::Draw => "1/2-1/2",
        };
        write!(f, "{}", text)
    }
}

/// The error type for the [`FromStr`] instance of [`GameResult`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidGameResult;

impl FromStr for GameResult {
    type Err = InvalidGameResult;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "R-0" => Ok(GameResult::Road(Player::White)),
            "0-R" => Ok(GameResult::Road(Player::Black)),
            "F-0" => Ok(GameResult::Flats(Player::White)),
            "0-F" => Ok(GameResult::Flats(Player::Black)),
            "1-0" => Ok(GameResult::Decision(Player::White)),
            "0-1" => Ok(GameResult::Decision(Player::Black)),
            "1/2-1/2" => Ok(GameResult::Draw),
            _ => Err(InvalidGameResult),
        }
    }
}

/// One round of the game: a move by White, then a move by Black.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Starts at 1.
    pub number: u32,
    /// White's move.
    pub first: Option<Move>,
    /// Black's move.
    pub second: Option<Move>,
    pub result: Option<GameResult>,
    pub comment: Option<String>,
}

impl Turn {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }

    /// Both players have moved.
    pub fn is_complete(&self) -> bool {
        self.first.is_some() && self.second.is_some()
    }

    /// The move made by this player in this turn, if any.
    pub fn move_by(&self, player: Player) -> Option<&Move> {
        match player {
            Player::White => self.first.as_ref(),
            Player::Black => self.second.as_ref(),
        }
    }

    pub(crate) fn slot_mut(&mut self, player: Player) -> &mut Option<Move> {
        match player {
            Player::White => &mut self.first,
            Player::Black => &mut self.second,
        }
    }
}

/// Written as a transcript line, e.g. `3. c3 2d4<11 {a comment}`.
impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.", self.number)?;
        match &self.first {
            Some(mv) => write!(f, " {}", mv)?,
            None => write!(f, " --")?,
        }
        if let Some(mv) = &self.second {
            write!(f, " {}", mv)?;
        }
        if let Some(result) = self.result {
            write!(f, " {}", result)?;
        }
        if let Some(comment) = &self.comment {
            write!(f, " {{{}}}", comment)?;
        }
        Ok(())
    }
}

/// A metadata entry of a game, such as `Size`, `Player1` or `Date`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: String::from(key),
            value: String::from(value),
        }
    }
}

/// Written as a transcript header line, e.g. `[Size "5"]`.
impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} \"{}\"]", self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_move, sq, StoneKind};

    #[test]
    fn results_parse_back() {
        for result in [
            GameResult::Road(Player::White),
            GameResult::Road(Player::Black),
            GameResult::Flats(Player::White),
            GameResult::Flats(Player::Black),
            GameResult::Decision(Player::Black),
            GameResult::Draw,
        ] {
            assert_eq!(result.to_string().parse::<GameResult>(), Ok(result));
        }
        assert_eq!("2-0".parse::<GameResult>(), Err(InvalidGameResult));
        assert_eq!(GameResult::Draw.winner(), None);
    }

    #[test]
    fn turn_lines() {
        let mut turn = Turn::new(4);
        assert!(!turn.is_complete());
        turn.first = Some(parse_move("2c3>11").unwrap());
        turn.comment = Some(String::from("tinue"));
        assert_eq!(turn.to_string(), "4. 2c3>11 {tinue}");
        *turn.slot_mut(Player::Black) = Some(Move::placement(sq!("a5"), StoneKind::Standing));
        turn.result = Some(GameResult::Road(Player::White));
        assert!(turn.is_complete());
        assert_eq!(turn.to_string(), "4. 2c3>11 Sa5 R-0 {tinue}");

        let black_only = Turn {
            number: 7,
            second: Some(parse_move("e1").unwrap()),
            ..Default::default()
        };
        assert_eq!(black_only.to_string(), "7. -- e1");
        assert_eq!(black_only.move_by(Player::White), None);
    }

    #[test]
    fn tag_line() {
        assert_eq!(Tag::new("Size", "6").to_string(), "[Size \"6\"]");
    }
}
