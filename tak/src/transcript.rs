//! Reading and writing game transcripts.
//!
//! A transcript is a list of metadata tags followed by turn lines:
//!
//! ```text
//! [Size "5"]
//! [Player1 "alice"]
//!
//! 1. e5 a1
//! 2. b1 e4 {the road begins}
//! 3. c1
//! 3. -- e3
//! ```

use tracing::warn;

use crate::{
    Game, GameResult, MoveError, Player, Rules, Tag, TranscriptError, Turn, TurnSequenceError,
};

/// Written in place of a missing first move.
const NO_MOVE: &str = "--";

// A turn line before any of its moves have been checked.
#[derive(Debug, Default)]
struct TurnLine<'a> {
    number: u32,
    first: Option<&'a str>,
    second: Option<&'a str>,
    result: Option<GameResult>,
    comment: Option<&'a str>,
}

/// Parses a transcript with the standard rules and replays it.
///
/// The returned game is in the final position of the transcript. Lines that
/// are neither tags nor turns, and turn lines without a valid number, are
/// skipped with a warning.
pub fn parse_transcript(text: &str) -> Result<Game, TranscriptError> {
    parse_transcript_with_rules(text, &Rules::default())
}

pub fn parse_transcript_with_rules(text: &str, rules: &Rules) -> Result<Game, TranscriptError> {
    let mut tags = Vec::new();
    let mut lines = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('[') {
            match parse_tag(line) {
                Some(tag) => tags.push(tag),
                None => warn!(line = index + 1, text = line, "Skipping malformed tag"),
            }
            continue;
        }
        match parse_turn_line(line) {
            Some(Ok(turn_line)) => lines.push(turn_line),
            Some(Err(token)) => {
                warn!(line = index + 1, token, "Skipping turn with invalid number")
            }
            None => warn!(line = index + 1, text = line, "Skipping unrecognized line"),
        }
    }

    let mut game = Game::from_tags(tags, rules)?;
    for turn_line in lines {
        replay_line(&mut game, turn_line)?;
    }
    Ok(game)
}

fn replay_line(game: &mut Game, turn_line: TurnLine<'_>) -> Result<(), TranscriptError> {
    let number = turn_line.number;
    let (expected, player) = game.to_move();
    if number != expected {
        return Err(TranscriptError::Move {
            turn: number,
            player,
            source: TurnSequenceError::WrongTurnNumber {
                expected,
                found: number,
            }
            .into(),
        });
    }
    let moves = [
        (Player::White, turn_line.first),
        (Player::Black, turn_line.second),
    ];
    for (player, text) in moves {
        if let Some(text) = text {
            game.do_single_move(text, player)
                .map_err(|source: MoveError| TranscriptError::Move {
                    turn: number,
                    player,
                    source,
                })?;
        }
    }

    if turn_line.result.is_some() || turn_line.comment.is_some() {
        let mut turn = game
            .get_turn(number)
            .cloned()
            .unwrap_or_else(|| Turn::new(number));
        if let Some(result) = turn_line.result {
            turn.result = Some(result);
        }
        if let Some(comment) = turn_line.comment {
            turn.comment = Some(String::from(comment));
        }
        game.update_turn(turn);
    }
    Ok(())
}

/// `[Key "Value"]`
fn parse_tag(line: &str) -> Option<Tag> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?.trim();
    let (key, value) = inner.split_once(char::is_whitespace)?;
    let value = value.trim().strip_prefix('"')?.strip_suffix('"')?;
    Some(Tag::new(key, value))
}

/// `None` if the line doesn't look like a turn, `Some(Err(token))` if it does
/// but the number is unusable.
fn parse_turn_line(line: &str) -> Option<Result<TurnLine<'_>, &str>> {
    let (line, comment) = match (line.find('{'), line.rfind('}')) {
        (Some(open), Some(close)) if open < close => (
            &line[..open],
            Some(line[open + 1..close].trim()),
        ),
        _ => (line, None),
    };
    let mut tokens = line.split_whitespace();
    let number_token = tokens.next()?.strip_suffix('.')?;
    let number = match number_token.parse::<u32>() {
        Ok(number) if number > 0 => number,
        _ => return Some(Err(number_token)),
    };

    let mut turn_line = TurnLine {
        number,
        comment,
        ..Default::default()
    };
    let mut seen_moves = 0;
    for token in tokens {
        if let Ok(result) = token.parse::<GameResult>() {
            turn_line.result = Some(result);
            continue;
        }
        match seen_moves {
            0 if token == NO_MOVE => {}
            0 => turn_line.first = Some(token),
            1 if token == NO_MOVE => {}
            1 => turn_line.second = Some(token),
            _ => warn!(turn = number, token, "Ignoring extra token"),
        }
        seen_moves += 1;
    }
    Some(Ok(turn_line))
}

impl Game {
    /// Writes the tags and all turns, in the format read by [`parse_transcript()`].
    pub fn to_transcript(&self) -> String {
        let mut result = String::new();
        for tag in self.tags() {
            result += &format!("{}\n", tag);
        }
        result += "\n";
        for turn in self.turns() {
            result += &format!("{}\n", turn);
        }
        result
    }
}
