//! Rules engine for the board game Tak.
//!
//! Moves are parsed with [`parse_move()`] and played on a [`Game`], which
//! enforces turn order and reports the [`GameResult`] once a player has built a
//! road or the board fills up.

pub use board::*;
pub use errors::*;
pub use game::*;
pub use notation::*;
pub use record::*;
pub use rules::*;
pub use square::*;
pub use stack::*;
pub use stone::*;
pub use transcript::*;
pub use turn::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod errors;
mod game;
mod notation;
mod record;
mod rules;
mod square;
mod stack;
mod stone;
mod transcript;
mod turn;
mod visualization;
