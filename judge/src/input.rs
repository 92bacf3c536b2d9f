use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tak::{MoveRecord, Rules};
use tracing::debug;

/// A move log as stored in a JSON file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLog {
    pub size: usize,
    pub moves: Vec<MoveRecord>,
}

/// The contents of one input file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameSource {
    Transcript(String),
    MoveLog(MoveLog),
}

/// One game to judge, and where it came from.
#[derive(Clone, Debug)]
pub struct GameInput {
    pub path: PathBuf,
    pub source: GameSource,
}

impl GameInput {
    /// Reads a `.json` move log or a transcript, which is anything else.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        let source = if is_json {
            GameSource::MoveLog(parse_move_log(&contents)?)
        } else {
            GameSource::Transcript(contents)
        };
        debug!(path = %path.display(), is_json, "Loaded input");
        Ok(Self {
            path: path.to_path_buf(),
            source,
        })
    }
}

pub fn parse_move_log(json: &str) -> anyhow::Result<MoveLog> {
    Ok(serde_json::from_str(json)?)
}

/// Overrides from a JSON file, on top of the standard rules.
pub fn load_rules(path: &Path) -> anyhow::Result<Rules> {
    let contents = std::fs::read_to_string(path)?;
    parse_rules(&contents)
}

pub fn parse_rules(json: &str) -> anyhow::Result<Rules> {
    let overrides: Rules = serde_json::from_str(json)?;
    Ok(Rules::default().merge(overrides))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tak::{Allotment, Player};

    #[test]
    fn move_log_from_json() {
        let json = r#"{
            "size": 5,
            "moves": [
                { "player": "white", "turn": 1, "text": "a1" },
                { "player": "black", "turn": 1, "text": "e5" }
            ]
        }"#;
        let log = parse_move_log(json).unwrap();
        assert_eq!(log.size, 5);
        assert_eq!(
            log.moves,
            vec![
                MoveRecord::new(Player::White, 1, "a1"),
                MoveRecord::new(Player::Black, 1, "e5"),
            ]
        );
        assert!(parse_move_log(r#"{ "moves": [] }"#).is_err());
    }

    #[test]
    fn rules_overrides_are_merged() {
        let rules = parse_rules(r#"{ "allotments": { "7": { "stones": 40, "capstones": 2 } } }"#)
            .unwrap();
        assert_eq!(rules.allotment(7), Some(Allotment::new(40, 2)));
        assert_eq!(rules.allotment(5), Some(Allotment::new(21, 1)));
        assert_eq!(parse_rules("{}").unwrap(), Rules::default());
        assert!(parse_rules(r#"{ "allotments": { "7": 40 } }"#).is_err());
    }

    #[test]
    fn load_picks_format_by_extension() {
        let dir = std::env::temp_dir().join(format!("tak_judge_input_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let ptn = dir.join("game.ptn");
        std::fs::write(&ptn, "[Size \"4\"]\n1. a1 d4\n").unwrap();
        let json = dir.join("game.JSON");
        std::fs::write(&json, r#"{ "size": 4, "moves": [] }"#).unwrap();

        assert!(matches!(
            GameInput::load(&ptn).unwrap().source,
            GameSource::Transcript(_)
        ));
        assert_eq!(
            GameInput::load(&json).unwrap().source,
            GameSource::MoveLog(MoveLog {
                size: 4,
                moves: Vec::new()
            })
        );
        assert!(GameInput::load(&dir.join("missing.ptn")).is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
