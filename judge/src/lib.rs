mod error;
mod game;
mod input;
mod recording;
pub use error::*;
pub use game::*;
pub use input::*;
pub use recording::*;

pub struct Config {
    pub rules: tak::Rules,
    /// Log the final position of every game.
    pub show_board: bool,
    pub recorder: Option<recording::Recorder>,
}
