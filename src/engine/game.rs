use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;

use super::pull::{self, Axis};
use super::state::{GameState, StateError, Tile};
use super::{Direction, SIZE, SPAWN_EXPONENTS};

/// A private, mutable copy of a [`GameState`].
///
/// Constructing a `Game` always clones the state it is given, so moves and
/// spawns never reach back into the caller's value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Game {
    state: GameState,
}

impl Game {
    /// A fresh game: empty board, score 0, turn 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deep-copy `state` into a new game.
    pub fn from_state(state: &GameState) -> Self {
        Game { state: state.clone() }
    }

    /// Like [`Game::from_state`], but reject boards with out-of-range exponents.
    pub fn try_from_state(state: &GameState) -> Result<Self, StateError> {
        state.validate()?;
        Ok(Self::from_state(state))
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Place a 2 (3 in 4) or a 4 (1 in 4) on a uniformly chosen empty cell.
    ///
    /// Advances the turn and returns the filled position. On a full board this
    /// is a no-op that returns `None` and leaves the turn alone.
    ///
    /// ```
    /// use pull_2048::engine::Game;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let mut game = Game::new();
    /// let (row, col) = game.spawn(&mut rng).unwrap();
    /// assert_eq!(game.state().turn, 1);
    /// assert!(game.state().is_new(row, col));
    /// ```
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<(usize, usize)> {
        let exponent = SPAWN_EXPONENTS[rng.gen_range(0..SPAWN_EXPONENTS.len())];
        let empty = self.state.board.empty_cells();
        let Some(&(row, col)) = empty.choose(rng) else {
            debug!("spawn skipped: board is full at turn {}", self.state.turn);
            return None;
        };
        self.state.turn += 1;
        self.state.board.set(row, col, Some(Tile::new(exponent, self.state.turn)));
        debug!("turn {}: spawned {} at ({row}, {col})", self.state.turn, 1u64 << exponent);
        Some((row, col))
    }

    /// Convenience: like [`Game::spawn`] but uses the thread-local RNG.
    pub fn spawn_thread(&mut self) -> Option<(usize, usize)> {
        let mut rng = rand::thread_rng();
        self.spawn(&mut rng)
    }

    /// Pull every tile toward `direction`. Returns false if nothing could move.
    pub fn pull(&mut self, direction: Direction) -> bool {
        let (axis, order) = pull::plan(direction);
        self.pull_along(axis, order, direction)
    }

    /// `4 2 2 1` => `4 4 1 _` (exponents)
    pub fn pull_left(&mut self) -> bool {
        self.pull(Direction::Left)
    }

    /// `4 2 2 1` => `_ 4 4 1` (exponents)
    pub fn pull_right(&mut self) -> bool {
        self.pull(Direction::Right)
    }

    pub fn pull_up(&mut self) -> bool {
        self.pull(Direction::Up)
    }

    pub fn pull_down(&mut self) -> bool {
        self.pull(Direction::Down)
    }

    /// True if no direction changes the board. The real state is never touched.
    pub fn lost(&self) -> bool {
        let lost = Direction::ALL
            .iter()
            .all(|&direction| !Game::from_state(&self.state).pull(direction));
        if lost {
            debug!("no legal move at turn {} (score {})", self.state.turn, self.state.score);
        }
        lost
    }

    fn pull_along(&mut self, axis: Axis, order: &[usize; SIZE], direction: Direction) -> bool {
        let before = self.state.score;
        let GameState { board, score, turn } = &mut self.state;
        let moved = pull::pull(board, score, *turn, axis, order);
        trace!("pull {direction}: moved={moved}, +{} points", self.state.score - before);
        moved
    }
}
