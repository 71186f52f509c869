//! The 2048 rule engine.
//!
//! - [`GameState`] is the plain value handed across the API boundary: a 4x4
//!   [`Board`] of optional [`Tile`]s, the cumulative score and the turn counter.
//! - [`Game`] owns a private copy of a state and mutates it through the four
//!   pull moves and [`Game::spawn`].
//!
//! All four moves run the same compaction routine (`pull` module) along one of
//! two axes in one of two visiting orders, so the single-merge-per-move lock
//! lives in exactly one place.
//!
//! ```
//! use pull_2048::engine::{Direction, Game, GameState, Tile};
//!
//! let mut state = GameState::default();
//! state.board.set(0, 0, Some(Tile::new(1, 0)));
//! state.board.set(0, 3, Some(Tile::new(1, 0)));
//!
//! let mut game = Game::from_state(&state);
//! assert!(game.pull(Direction::Left));
//! assert_eq!(game.state().board.get(0, 0).map(|t| t.value()), Some(4));
//! assert_eq!(game.state().score, 4);
//!
//! // The caller's copy is untouched.
//! assert_eq!(state.score, 0);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

mod game;
mod pull;
mod state;

pub use game::Game;
pub use state::{Board, GameState, StateError, Tile, MAX_EXPONENT};

/// Side length of the square board.
pub const SIZE: usize = 4;

/// Exponent pool sampled uniformly on spawn: three 2s for every 4.
pub const SPAWN_EXPONENTS: [u8; 4] = [1, 1, 1, 2];

pub type Exponent = u8;
pub type Turn = u32;
pub type Score = u64;

/// A direction to pull tiles toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Every direction, in the order `lost` tries them.
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized direction: {0:?}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Accepts words, WASD, vi keys and browser key names.
    ///
    /// ```
    /// use pull_2048::engine::Direction;
    /// assert_eq!("ArrowDown".parse::<Direction>().unwrap(), Direction::Down);
    /// assert_eq!("a".parse::<Direction>().unwrap(), Direction::Left);
    /// assert!("sideways".parse::<Direction>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "w" | "k" | "arrowup" => Ok(Direction::Up),
            "down" | "s" | "j" | "arrowdown" => Ok(Direction::Down),
            "left" | "a" | "h" | "arrowleft" => Ok(Direction::Left),
            "right" | "d" | "l" | "arrowright" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}
