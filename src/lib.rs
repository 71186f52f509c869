//! pull-2048: the rule engine of a 2048-style sliding-tile puzzle
//!
//! This crate provides:
//! - The board model and move rules (`engine` module): [`engine::GameState`],
//!   the four pull moves, random spawning and loss detection via [`engine::Game`]
//! - The move-then-spawn input loop a front end runs (`session` module)
//!
//! Quick start:
//! ```
//! use pull_2048::engine::{Direction, Game};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic spawns with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut game = Game::new();
//! game.spawn(&mut rng);
//! game.spawn(&mut rng);
//!
//! // Every move works on a private copy; export the state when done.
//! let mut next = Game::from_state(game.state());
//! if next.pull(Direction::Left) {
//!     next.spawn(&mut rng);
//! }
//! assert!(next.state().score >= game.state().score);
//! assert!(!next.lost());
//! ```
//!
//! Note: [`engine::Game::spawn_thread`] uses the thread-local RNG. Prefer
//! [`engine::Game::spawn`] with your own RNG when you need determinism.
//!
pub mod engine;
pub mod session;
