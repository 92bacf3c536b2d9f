use tak::{parse_transcript_with_rules, Game, GameResult};
use tracing::info;

use crate::error::RejectedInput;
use crate::input::{GameInput, GameSource};
use crate::Config;

#[derive(Debug)]
pub enum Verdict {
    Finished(GameResult),
    Unfinished,
    Rejected(RejectedInput),
}

/// Returns an error only when the transcript can't be recorded, not when
/// the input contains an illegal move.
pub fn judge_game(input: &GameInput, config: &mut Config) -> anyhow::Result<Verdict> {
    let replayed = match &input.source {
        GameSource::Transcript(text) => {
            parse_transcript_with_rules(text, &config.rules).map_err(RejectedInput::from)
        }
        GameSource::MoveLog(log) => {
            Game::replay(log.size, &config.rules, &log.moves).map_err(RejectedInput::from)
        }
    };
    let game = match replayed {
        Ok(game) => game,
        Err(err) => return Ok(Verdict::Rejected(err)),
    };

    if config.show_board {
        info!("Final position of {}:\n{}", input.path.display(), game.board());
    }
    if let Some(recorder) = &mut config.recorder {
        recorder.write_transcript(&game)?;
    }

    let verdict = match game.outcome() {
        Some(result) => Verdict::Finished(result),
        None => Verdict::Unfinished,
    };
    Ok(verdict)
}
