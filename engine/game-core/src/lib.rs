//! State contract for searchable sequential games.
//!
//! This crate defines the abstraction a game or planning domain must
//! implement to be searchable by the `mcts` crate: a [`GameState`] exposing
//! legal moves, move application with value semantics, terminal payoffs and
//! a random play-out. The search engine holds states by value and never
//! mutates one it did not create, so implementations are free to use plain
//! `Clone`-able structs.
//!
//! # Example
//!
//! ```rust
//! use game_core::{GameState, GameError, Outcome, PlayerId};
//!
//! #[derive(Debug, Clone)]
//! struct Countdown {
//!     remaining: u8,
//!     previous_player: PlayerId,
//! }
//!
//! impl GameState for Countdown {
//!     type Move = u8;
//!
//!     fn previous_player(&self) -> PlayerId {
//!         self.previous_player
//!     }
//!
//!     fn legal_moves(&self) -> Vec<u8> {
//!         if self.remaining == 0 { Vec::new() } else { vec![1] }
//!     }
//!
//!     fn result(&self) -> Option<Outcome> {
//!         (self.remaining == 0).then(|| Outcome::win(self.previous_player, 3 - self.previous_player))
//!     }
//!
//!     fn apply(&self, _mv: &u8) -> Result<Self, GameError> {
//!         Ok(Self {
//!             remaining: self.remaining - 1,
//!             previous_player: 3 - self.previous_player,
//!         })
//!     }
//! }
//! ```

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

/// Identifier of a player in a two-or-more-player game.
pub type PlayerId = u8;

/// Errors raised by game implementations.
#[derive(Debug, Error)]
pub enum GameError {
    /// A move was applied that is not legal in the receiving state.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// A state reported no legal moves but also produced no result.
    #[error("state has no legal moves but reports no result")]
    MissingResult,
}

/// Terminal payoff for each player, indexed by [`PlayerId`].
///
/// Payoffs are `f64` and by convention lie in `[0, 1]` (1 = win, 0 = loss,
/// 0.5 = draw); this is not enforced. Players the domain did not score are
/// treated as receiving 0.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outcome {
    payoffs: HashMap<PlayerId, f64>,
}

impl Outcome {
    /// Empty outcome; every player scores 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: set `player`'s payoff.
    pub fn with(mut self, player: PlayerId, payoff: f64) -> Self {
        let _ = self.payoffs.insert(player, payoff);
        self
    }

    /// Win for `winner`, loss for `loser`.
    pub fn win(winner: PlayerId, loser: PlayerId) -> Self {
        Self::new().with(winner, 1.0).with(loser, 0.0)
    }

    /// Draw between two players.
    pub fn draw(a: PlayerId, b: PlayerId) -> Self {
        Self::new().with(a, 0.5).with(b, 0.5)
    }

    /// Payoff for `player`, 0 if the domain did not score them.
    pub fn payoff(&self, player: PlayerId) -> f64 {
        self.payoffs.get(&player).copied().unwrap_or_default()
    }
}

impl FromIterator<(PlayerId, f64)> for Outcome {
    fn from_iter<I: IntoIterator<Item = (PlayerId, f64)>>(iter: I) -> Self {
        Self {
            payoffs: iter.into_iter().collect(),
        }
    }
}

/// A position in a sequential game, immutable from the engine's perspective.
///
/// The search engine treats every state it holds as privately owned: `apply`
/// must return a fresh value and never mutate the receiver. States are
/// cloned when a play-out needs a scratch copy, so `Clone` should be cheap.
pub trait GameState: Clone {
    /// Move identifier. Must be cheap to clone and comparable so the engine
    /// can report a best move and match it against children.
    type Move: Clone + PartialEq + std::fmt::Debug;

    /// The player whose move produced this state.
    fn previous_player(&self) -> PlayerId;

    /// Legal continuations from this state. Empty iff the state is terminal.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Payoff per player once terminal, `None` while the game is open.
    /// Must stay fixed once present.
    fn result(&self) -> Option<Outcome>;

    /// Apply `mv` and return the resulting state. Never mutates `self`.
    ///
    /// Applying a move that is not in [`legal_moves`](Self::legal_moves) is
    /// a domain error and should return [`GameError::IllegalMove`].
    fn apply(&self, mv: &Self::Move) -> Result<Self, GameError>;

    /// Play the game out to a terminal state and return its payoffs.
    ///
    /// The default picks uniformly-random legal moves until none remain.
    /// Domains with a cheaper or smarter play-out policy may override this.
    /// Termination is the domain's obligation: games with cycles must
    /// enforce a move budget, the engine does not guard against infinite
    /// play-outs.
    fn rollout(&self, rng: &mut ChaCha20Rng) -> Result<Outcome, GameError> {
        let mut state = self.clone();
        loop {
            let moves = state.legal_moves();
            let Some(mv) = moves.choose(rng) else { break };
            state = state.apply(mv)?;
        }
        state.result().ok_or(GameError::MissingResult)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    /// Two players alternate decrementing a counter; whoever makes the last
    /// move wins.
    #[derive(Debug, Clone)]
    struct Countdown {
        remaining: u8,
        previous_player: PlayerId,
        // When set, terminal states report no result (for error-path tests).
        broken: bool,
    }

    impl Countdown {
        fn new(remaining: u8) -> Self {
            Self {
                remaining,
                previous_player: 2,
                broken: false,
            }
        }
    }

    impl GameState for Countdown {
        type Move = u8;

        fn previous_player(&self) -> PlayerId {
            self.previous_player
        }

        fn legal_moves(&self) -> Vec<u8> {
            if self.remaining == 0 {
                Vec::new()
            } else {
                vec![1]
            }
        }

        fn result(&self) -> Option<Outcome> {
            if self.remaining == 0 && !self.broken {
                Some(Outcome::win(self.previous_player, 3 - self.previous_player))
            } else {
                None
            }
        }

        fn apply(&self, mv: &u8) -> Result<Self, GameError> {
            if self.remaining == 0 {
                return Err(GameError::IllegalMove(format!("{mv} on terminal state")));
            }
            Ok(Self {
                remaining: self.remaining - 1,
                previous_player: 3 - self.previous_player,
                broken: self.broken,
            })
        }
    }

    #[test]
    fn test_outcome_payoffs() {
        let outcome = Outcome::new().with(1, 1.0).with(2, 0.0);
        assert_eq!(outcome.payoff(1), 1.0);
        assert_eq!(outcome.payoff(2), 0.0);
        // Unscored players get 0, not a panic.
        assert_eq!(outcome.payoff(7), 0.0);
    }

    #[test]
    fn test_outcome_constructors() {
        assert_eq!(Outcome::win(1, 2), Outcome::new().with(1, 1.0).with(2, 0.0));
        assert_eq!(Outcome::draw(1, 2), Outcome::new().with(1, 0.5).with(2, 0.5));
        let from_pairs: Outcome = [(1u8, 0.5), (2u8, 0.5)].into_iter().collect();
        assert_eq!(from_pairs, Outcome::draw(1, 2));
    }

    #[test]
    fn test_default_rollout_terminates_and_scores_last_mover() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        // Odd count: player 1 moves first (previous is 2) and makes the
        // last, winning move.
        let outcome = Countdown::new(3).rollout(&mut rng).unwrap();
        assert_eq!(outcome.payoff(1), 1.0);
        assert_eq!(outcome.payoff(2), 0.0);
    }

    #[test]
    fn test_rollout_on_terminal_state_returns_result() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let terminal = Countdown {
            remaining: 0,
            previous_player: 1,
            broken: false,
        };
        let outcome = terminal.rollout(&mut rng).unwrap();
        assert_eq!(outcome.payoff(1), 1.0);
    }

    #[test]
    fn test_rollout_missing_result_is_a_domain_error() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let broken = Countdown {
            remaining: 1,
            previous_player: 2,
            broken: true,
        };
        let err = broken.rollout(&mut rng).unwrap_err();
        assert!(matches!(err, GameError::MissingResult));
    }
}
