//! The four-phase MCTS loop: select, expand, simulate, backpropagate.
//!
//! [`SearchTree`] owns a [`Tree`] of [`SearchNode`]s and implements one
//! search round ([`SearchTree::mc_round`]) plus the final move choice
//! ([`SearchTree::best_move`]). [`Mcts`] bundles a tree with a selection
//! policy and a seeded RNG into a ready-to-drive session.

use game_core::{GameError, GameState};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::SearchConfig;
use crate::node::SearchNode;
use crate::policy::SelectionPolicy;
use crate::tree::{NodeId, Tree};

/// Errors that can occur during a search round.
///
/// Contract violations (expanding a fully-expanded node, scoring an
/// unvisited child) are programmer errors and panic instead.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The domain rejected a move or failed to produce a terminal result.
    /// The round that hit this applied no statistics.
    #[error("domain error: {0}")]
    Game(#[from] GameError),
}

/// Search tree over states of type `S`.
///
/// Nodes move forward through unexpanded → partially expanded → fully
/// expanded, or are terminal from construction (no legal moves); they never
/// regress. The tree is a private, exclusively-owned resource of one search
/// session; independent searches run on independent trees.
#[derive(Debug)]
pub struct SearchTree<S: GameState> {
    tree: Tree<SearchNode<S>>,
}

impl<S: GameState> SearchTree<S> {
    /// Build a single-node tree around the initial state.
    pub fn new(state: S) -> Self {
        Self {
            tree: Tree::new(SearchNode::new_root(state)),
        }
    }

    /// Root node id.
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// The underlying generic tree, for traversal and reporting.
    pub fn tree(&self) -> &Tree<SearchNode<S>> {
        &self.tree
    }

    /// Search node by id.
    pub fn node(&self, id: NodeId) -> &SearchNode<S> {
        &self.tree.get(id).value
    }

    /// Children of `id` in expansion order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.tree.children(id)
    }

    /// Whether `id` is terminal: no untried moves and no children, because
    /// the wrapped state has no legal continuation. Stable once true.
    pub fn is_terminal(&self, id: NodeId) -> bool {
        !self.node(id).has_untried_moves() && self.children(id).is_empty()
    }

    /// Select phase: walk down from `from` while the current node is fully
    /// expanded and has children, letting `policy` pick each step. Returns
    /// the path from `from` to the stopping node, inclusive.
    pub fn select<P: SelectionPolicy<S>>(
        &self,
        from: NodeId,
        policy: &P,
        rng: &mut ChaCha20Rng,
    ) -> Vec<NodeId> {
        let mut path = vec![from];
        let mut current = from;
        while !self.node(current).has_untried_moves() && !self.children(current).is_empty() {
            match policy.select_child(self, current, rng) {
                Some(child) => {
                    path.push(child);
                    current = child;
                }
                // Unreachable given the loop guard; a policy returning None
                // here just stops the descent.
                None => break,
            }
        }
        path
    }

    /// Expand phase: materialize one untried move of `id` as a new child.
    ///
    /// The move is chosen uniformly at random, applied to the node's state,
    /// and permanently removed from the untried set; later rounds reaching
    /// this node will never revisit it. Calling this on a node with no
    /// untried moves is a contract violation and panics. A domain error
    /// from `apply` leaves both the untried set and the tree unchanged.
    pub fn expand(&mut self, id: NodeId, rng: &mut ChaCha20Rng) -> Result<NodeId, SearchError> {
        let node = &self.tree.get(id).value;
        assert!(
            node.has_untried_moves(),
            "expand called on a node with no untried moves"
        );
        let index = rng.gen_range(0..node.untried_moves().len());
        let mv = node.untried_moves()[index].clone();
        let child_state = node.state().apply(&mv)?;
        let taken = self.tree.get_mut(id).value.take_untried(index);
        let child = self.tree.add_child(id, SearchNode::new_child(child_state, taken));
        Ok(child)
    }

    /// One full MCTS round starting at the root.
    ///
    /// Select, expand (if the selected leaf still has untried moves), roll
    /// the leaf's state out, then credit every node on the path:
    /// `visits += 1`, `wins += outcome[previous_player]`. Statistics are
    /// only touched after the rollout succeeds, so a failed round is
    /// invisible in the averages.
    pub fn mc_round<P: SelectionPolicy<S>>(
        &mut self,
        policy: &P,
        rng: &mut ChaCha20Rng,
    ) -> Result<(), SearchError> {
        let mut path = self.select(self.root(), policy, rng);
        let mut leaf = *path.last().expect("selection path is never empty");
        if self.node(leaf).has_untried_moves() {
            leaf = self.expand(leaf, rng)?;
            path.push(leaf);
        }
        let outcome = self.node(leaf).state().rollout(rng)?;
        for &id in &path {
            let node = &mut self.tree.get_mut(id).value;
            let payoff = outcome.payoff(node.state().previous_player());
            node.record(payoff);
        }
        trace!(
            leaf = leaf.0,
            path_len = path.len(),
            tree_size = self.tree.len(),
            "search round complete"
        );
        Ok(())
    }

    /// Best move from the root: the move of the most-visited child (visit
    /// count, not win ratio, which is noisier). `None` if the
    /// root has no children. Ties resolve to the first child in expansion
    /// order.
    pub fn best_move(&self) -> Option<S::Move> {
        let mut best: Option<(NodeId, f64)> = None;
        for &child in self.children(self.root()) {
            let visits = self.node(child).visits();
            // Strict comparison keeps the first maximal child on ties.
            if best.map_or(true, |(_, v)| visits > v) {
                best = Some((child, visits));
            }
        }
        best.and_then(|(id, _)| self.node(id).mv().cloned())
    }

    #[cfg(test)]
    pub(crate) fn set_stats_for_test(&mut self, id: NodeId, visits: f64, wins: f64) {
        self.tree.get_mut(id).value.set_stats(visits, wins);
    }
}

/// A search session: tree + injected selection policy + explicit RNG.
///
/// Single-threaded and synchronous; run independent sessions on independent
/// threads if concurrency is needed, there is no shared state.
#[derive(Debug)]
pub struct Mcts<S: GameState, P: SelectionPolicy<S>> {
    tree: SearchTree<S>,
    policy: P,
    rng: ChaCha20Rng,
}

impl<S: GameState, P: SelectionPolicy<S>> Mcts<S, P> {
    /// New session over `state`, driven by `policy` and `rng`.
    pub fn new(state: S, policy: P, rng: ChaCha20Rng) -> Self {
        Self {
            tree: SearchTree::new(state),
            policy,
            rng,
        }
    }

    /// Convenience constructor with a seed, for reproducible searches.
    pub fn from_seed(state: S, policy: P, seed: u64) -> Self {
        use rand::SeedableRng;
        Self::new(state, policy, ChaCha20Rng::seed_from_u64(seed))
    }

    /// Run one search round.
    pub fn round(&mut self) -> Result<(), SearchError> {
        self.tree.mc_round(&self.policy, &mut self.rng)
    }

    /// Run `config.rounds` rounds and return the best move found.
    pub fn run(&mut self, config: &SearchConfig) -> Result<Option<S::Move>, SearchError> {
        for _ in 0..config.rounds {
            self.round()?;
        }
        let best = self.tree.best_move();
        debug!(
            rounds = config.rounds,
            tree_size = self.tree.tree().len(),
            best_move = ?best,
            "search finished"
        );
        Ok(best)
    }

    /// Best move from the accumulated statistics so far.
    pub fn best_move(&self) -> Option<S::Move> {
        self.tree.best_move()
    }

    /// The search tree, for inspection and visualization.
    pub fn tree(&self) -> &SearchTree<S> {
        &self.tree
    }

    /// The injected selection policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }
}
