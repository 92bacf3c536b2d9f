use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use tak::Game;
use tracing::debug;

/// Writes a normalized transcript of each judged game into a directory.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self { num: 1, directory })
    }

    /// Returns the path of the written file.
    pub fn write_transcript(&mut self, game: &Game) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("game_{:0>6}.ptn", self.num));
        let mut writer = BufWriter::new(File::create(&filepath)?);
        write!(writer, "{}", game.to_transcript())?;
        writer.flush()?;
        debug!(path = %filepath.display(), "Wrote transcript");
        self.num += 1;
        Ok(filepath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_the_files() {
        let dir = std::env::temp_dir().join(format!("tak_judge_recorder_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let mut recorder = Recorder::new(dir.clone()).unwrap();

        let mut game = Game::new(4).unwrap();
        game.do_turn("a1", "d4").unwrap();
        let first = recorder.write_transcript(&game).unwrap();
        let second = recorder.write_transcript(&game).unwrap();
        assert_eq!(first, dir.join("game_000001.ptn"));
        assert_eq!(second, dir.join("game_000002.ptn"));
        assert_eq!(
            std::fs::read_to_string(&first).unwrap(),
            "[Size \"4\"]\n\n1. a1 d4\n"
        );
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(Recorder::new(dir).is_err());
    }
}
