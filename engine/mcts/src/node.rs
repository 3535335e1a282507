//! Search node payload: a game state plus accumulated search statistics.
//!
//! A `SearchNode` is what the generic [`Tree`](crate::tree::Tree) stores at
//! every position of the search tree. It tracks the move that produced it,
//! the moves not yet expanded into children, and visit/reward statistics
//! updated by backpropagation.

use game_core::GameState;

/// Payload of one search-tree node.
///
/// `visits` and `wins` are monotonically non-decreasing (payoffs are assumed
/// non-negative by convention); `untried_moves` only ever shrinks.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode<S: GameState> {
    state: S,
    mv: Option<S::Move>,
    untried_moves: Vec<S::Move>,
    visits: f64,
    wins: f64,
}

impl<S: GameState> SearchNode<S> {
    /// Root node wrapping a caller-supplied state; `mv` is `None`.
    pub fn new_root(state: S) -> Self {
        Self::new(state, None)
    }

    /// Child node created by expansion, recording the move that produced it.
    pub fn new_child(state: S, mv: S::Move) -> Self {
        Self::new(state, Some(mv))
    }

    fn new(state: S, mv: Option<S::Move>) -> Self {
        let untried_moves = state.legal_moves();
        Self {
            state,
            mv,
            untried_moves,
            visits: 0.0,
            wins: 0.0,
        }
    }

    /// The wrapped game state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Move that produced this node from its parent, `None` only for the
    /// search root.
    pub fn mv(&self) -> Option<&S::Move> {
        self.mv.as_ref()
    }

    /// Moves from this state not yet expanded into children.
    pub fn untried_moves(&self) -> &[S::Move] {
        &self.untried_moves
    }

    /// Whether any move remains unexpanded.
    pub fn has_untried_moves(&self) -> bool {
        !self.untried_moves.is_empty()
    }

    /// Number of simulations that passed through this node.
    pub fn visits(&self) -> f64 {
        self.visits
    }

    /// Accumulated payoff credited to this node's previous player.
    pub fn wins(&self) -> f64 {
        self.wins
    }

    /// Empirical value: `wins / visits`, 0 before the first visit.
    pub fn win_ratio(&self) -> f64 {
        if self.visits > 0.0 {
            self.wins / self.visits
        } else {
            0.0
        }
    }

    /// Remove and return the untried move at `index`. Order of the remaining
    /// moves is not preserved; a removed move is never reinstated.
    pub(crate) fn take_untried(&mut self, index: usize) -> S::Move {
        self.untried_moves.swap_remove(index)
    }

    /// Fold one simulation outcome into the statistics.
    pub(crate) fn record(&mut self, payoff: f64) {
        self.visits += 1.0;
        self.wins += payoff;
    }

    #[cfg(test)]
    pub(crate) fn set_stats(&mut self, visits: f64, wins: f64) {
        self.visits = visits;
        self.wins = wins;
    }
}
