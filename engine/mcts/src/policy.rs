//! Child-selection policies for the select phase.
//!
//! A policy decides which child to descend into while walking down the tree.
//! The engine is policy-agnostic: anything implementing [`SelectionPolicy`]
//! can drive a search. [`Uct`] is the standard UCB1 bandit rule;
//! [`RandomChild`] is a uniform baseline.

use game_core::GameState;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

use crate::search::SearchTree;
use crate::tree::NodeId;

/// Strategy for choosing which child of `parent` to descend into.
///
/// Policies only borrow the tree; they never mutate statistics. The engine
/// guarantees that every child considered here has been visited at least
/// once (a child is created by expansion, which is always followed by a
/// rollout and a backpropagation before the parent can be selected again).
pub trait SelectionPolicy<S: GameState> {
    /// Pick a child of `parent`, or `None` if it has no children.
    fn select_child(
        &self,
        tree: &SearchTree<S>,
        parent: NodeId,
        rng: &mut ChaCha20Rng,
    ) -> Option<NodeId>;

    /// Diagnostic weight of `child` under this policy, used by
    /// visualization to size sibling edges. Defaults to the child's visit
    /// count; not part of the search contract.
    fn selection_pressure(&self, tree: &SearchTree<S>, parent: NodeId, child: NodeId) -> f64 {
        let _ = parent;
        tree.node(child).visits()
    }
}

/// UCB1 applied to trees (UCT).
///
/// Scores a child as `wins / visits + sqrt(2 ln(parent.visits) / visits)`:
/// the first term exploits empirically strong children, the second grows
/// with parent visits and shrinks with child visits so every child keeps
/// being revisited while attention converges on the best one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uct;

impl Uct {
    /// UCB1 score of a child with the given statistics.
    ///
    /// Both visit counts must be positive; a zero-visit argument is a
    /// contract violation and panics.
    pub fn ucb1(&self, parent_visits: f64, child_wins: f64, child_visits: f64) -> f64 {
        assert!(
            parent_visits > 0.0 && child_visits > 0.0,
            "ucb1 requires visited parent and child"
        );
        child_wins / child_visits + (2.0 * parent_visits.ln() / child_visits).sqrt()
    }

    /// Marginal drop in a child's UCB1 score from one additional visit
    /// (holding wins fixed). A local sensitivity measure of the score,
    /// exposed for visualization only.
    pub fn ucb1_grad(&self, parent_visits: f64, child_wins: f64, child_visits: f64) -> f64 {
        self.ucb1(parent_visits, child_wins, child_visits)
            - self.ucb1(parent_visits, child_wins, child_visits + 1.0)
    }
}

impl<S: GameState> SelectionPolicy<S> for Uct {
    fn select_child(
        &self,
        tree: &SearchTree<S>,
        parent: NodeId,
        _rng: &mut ChaCha20Rng,
    ) -> Option<NodeId> {
        let parent_visits = tree.node(parent).visits();
        let mut best: Option<(NodeId, f64)> = None;
        for &child in tree.children(parent) {
            let node = tree.node(child);
            let score = self.ucb1(parent_visits, node.wins(), node.visits());
            // Strict comparison: the first maximal child wins ties.
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((child, score));
            }
        }
        best.map(|(id, _)| id)
    }

    fn selection_pressure(&self, tree: &SearchTree<S>, parent: NodeId, child: NodeId) -> f64 {
        let node = tree.node(child);
        self.ucb1_grad(tree.node(parent).visits(), node.wins(), node.visits())
    }
}

/// Uniform-random child selection. Baseline policy, also useful for
/// exercising the engine without UCT's statistics coupling.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomChild;

impl<S: GameState> SelectionPolicy<S> for RandomChild {
    fn select_child(
        &self,
        tree: &SearchTree<S>,
        parent: NodeId,
        rng: &mut ChaCha20Rng,
    ) -> Option<NodeId> {
        tree.children(parent).choose(rng).copied()
    }
}
