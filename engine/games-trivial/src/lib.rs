//! A trivial game with arbitrary, caller-chosen outcomes.
//!
//! Each state is either terminal with a fixed [`Outcome`] or branches into
//! explicitly listed successor states. Exists so engine tests can pin exact
//! payoffs and tree shapes without real game rules.

use game_core::{GameError, GameState, Outcome, PlayerId};

/// A hand-built game state: either a fixed terminal outcome or an explicit
/// move table.
#[derive(Debug, Clone, PartialEq)]
pub struct TrivialState {
    result: Option<Outcome>,
    previous_player: PlayerId,
    moves: Vec<(u8, TrivialState)>,
}

impl TrivialState {
    /// Terminal state with the given outcome.
    pub fn terminal(outcome: Outcome, previous_player: PlayerId) -> Self {
        Self {
            result: Some(outcome),
            previous_player,
            moves: Vec::new(),
        }
    }

    /// Terminal state lost by `player` (payoff 0).
    pub fn lost_by(player: PlayerId) -> Self {
        Self::terminal(Outcome::new().with(player, 0.0), player)
    }

    /// Non-terminal state with an explicit move table. A `branching` state
    /// with an empty table is deliberately malformed (no moves, no result)
    /// for exercising the engine's domain-error path.
    pub fn branching(previous_player: PlayerId, moves: Vec<(u8, TrivialState)>) -> Self {
        Self {
            result: None,
            previous_player,
            moves,
        }
    }
}

impl Default for TrivialState {
    /// Player 1 immediately wins.
    fn default() -> Self {
        Self::terminal(Outcome::new().with(1, 1.0), 1)
    }
}

impl GameState for TrivialState {
    type Move = u8;

    fn previous_player(&self) -> PlayerId {
        self.previous_player
    }

    fn legal_moves(&self) -> Vec<u8> {
        self.moves.iter().map(|(mv, _)| *mv).collect()
    }

    fn result(&self) -> Option<Outcome> {
        self.result.clone()
    }

    fn apply(&self, mv: &u8) -> Result<Self, GameError> {
        self.moves
            .iter()
            .find(|(m, _)| m == mv)
            .map(|(_, next)| next.clone())
            .ok_or_else(|| GameError::IllegalMove(format!("no move {mv} from this state")))
    }
}
