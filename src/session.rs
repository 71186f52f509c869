//! One player's game as a front end drives it.
//!
//! Each input builds a fresh [`Game`] from the last known state, applies one
//! pull and, when the pull changed something, spawns a tile and replaces the
//! state. Inputs are processed strictly one at a time.

use log::info;
use rand::Rng;

use crate::engine::{Direction, Game, GameState, Turn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    state: GameState,
    valid_move: bool,
}

impl Session {
    /// Start a new game with one spawned tile.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut game = Game::new();
        game.spawn(rng);
        Session { state: game.into_state(), valid_move: true }
    }

    /// Pick up from an existing state.
    pub fn resume(state: GameState) -> Self {
        Session { state, valid_move: true }
    }

    /// Apply one move. Returns whether it changed the board.
    ///
    /// An ineffective move leaves the state as it was and clears
    /// [`Session::valid_move`]. Once the game is lost every move is ignored.
    ///
    /// ```
    /// use pull_2048::engine::Direction;
    /// use pull_2048::session::Session;
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let mut session = Session::new(&mut rng);
    /// let accepted = Direction::ALL.iter().any(|&d| session.apply(d, &mut rng));
    /// assert!(accepted);
    /// assert_eq!(session.state().turn, 2);
    /// ```
    pub fn apply<R: Rng + ?Sized>(&mut self, direction: Direction, rng: &mut R) -> bool {
        if self.lost() {
            self.valid_move = false;
            return false;
        }
        let mut game = Game::from_state(&self.state);
        self.valid_move = game.pull(direction);
        if self.valid_move {
            game.spawn(rng);
            self.state = game.into_state();
            if self.lost() {
                info!("game over: score {}, {} moves", self.state.score, self.moves());
            }
        }
        self.valid_move
    }

    /// Throw the current game away and start over.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        info!("restart: abandoning score {} after {} moves", self.state.score, self.moves());
        *self = Session::new(rng);
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Whether the last move changed the board.
    #[inline]
    pub fn valid_move(&self) -> bool {
        self.valid_move
    }

    pub fn lost(&self) -> bool {
        Game::from_state(&self.state).lost()
    }

    /// Accepted moves so far. The opening spawn is not a move.
    pub fn moves(&self) -> Turn {
        self.state.turn.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Board;
    use rand::{rngs::StdRng, SeedableRng};

    fn stuck_board() -> Board {
        Board::from_exponents([[1, 2, 1, 2], [2, 1, 2, 1], [1, 2, 1, 2], [2, 1, 2, 1]], 1)
    }

    #[test]
    fn it_starts_with_one_tile() {
        let mut rng = StdRng::seed_from_u64(5);
        let session = Session::new(&mut rng);
        assert_eq!(session.state().board.tile_count(), 1);
        assert_eq!(session.state().turn, 1);
        assert_eq!(session.state().score, 0);
        assert_eq!(session.moves(), 0);
        assert!(session.valid_move());
        assert!(!session.lost());
    }

    #[test]
    fn it_rejects_ineffective_moves() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = GameState::new();
        state.board = Board::from_exponents([[1, 0, 0, 0], [0; 4], [0; 4], [0; 4]], 1);
        state.turn = 1;
        let mut session = Session::resume(state.clone());

        assert!(!session.apply(Direction::Left, &mut rng));
        assert!(!session.valid_move());
        assert_eq!(session.state(), &state);

        assert!(session.apply(Direction::Right, &mut rng));
        assert!(session.valid_move());
        assert_eq!(session.state().turn, 2);
        assert_eq!(session.state().board.tile_count(), 2);
        assert_eq!(session.state().board.get(0, 3).map(|t| t.exponent), Some(1));
        assert_eq!(session.moves(), 1);
    }

    #[test]
    fn it_ignores_moves_after_loss() {
        let mut rng = StdRng::seed_from_u64(5);
        let state = GameState { board: stuck_board(), score: 100, turn: 16 };
        let mut session = Session::resume(state.clone());
        assert!(session.lost());
        for dir in Direction::ALL {
            assert!(!session.apply(dir, &mut rng));
        }
        assert_eq!(session.state(), &state);
    }

    #[test]
    fn it_restarts() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut session = Session::resume(GameState { board: stuck_board(), score: 100, turn: 16 });
        session.restart(&mut rng);
        assert!(!session.lost());
        assert_eq!(session.state().score, 0);
        assert_eq!(session.state().turn, 1);
    }

    #[test]
    fn test_random_play_reaches_game_over() {
        let mut rng = StdRng::seed_from_u64(2048);
        let mut session = Session::new(&mut rng);
        let mut last_score = 0;
        let mut steps = 0;
        while !session.lost() && steps < 10_000 {
            let dir = Direction::ALL[rng.gen_range(0..4)];
            let turn = session.state().turn;
            let accepted = session.apply(dir, &mut rng);
            assert_eq!(session.state().turn, if accepted { turn + 1 } else { turn });
            assert!(session.state().score >= last_score);
            last_score = session.state().score;
            steps += 1;
        }
        assert!(session.lost());
        assert!(session.state().board.is_full());
    }
}
