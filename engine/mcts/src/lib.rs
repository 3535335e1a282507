//! Generic Monte Carlo Tree Search (MCTS) engine.
//!
//! This crate searches any domain implementing the `game-core`
//! [`GameState`](game_core::GameState) contract by incrementally building a
//! search tree from repeated simulation. Each round runs four phases:
//!
//! 1. **Selection**: walk down from the root while the current node is
//!    fully expanded, letting the injected [`SelectionPolicy`] pick each
//!    child (UCB1 by default)
//! 2. **Expansion**: materialize one untried move of the selected leaf as a
//!    new child node
//! 3. **Simulation**: roll the leaf's state out to a terminal outcome
//! 4. **Backpropagation**: credit every node on the path with the outcome
//!    payoff of its previous player
//!
//! # Usage
//!
//! ```rust
//! use games_trivial::TrivialState;
//! use mcts::{Mcts, SearchConfig, Uct};
//!
//! // A one-ply game: move 1 wins for player 1, move 2 loses.
//! let root = TrivialState::branching(
//!     1,
//!     vec![(1, TrivialState::default()), (2, TrivialState::lost_by(1))],
//! );
//!
//! let mut search = Mcts::from_seed(root, Uct, 42);
//! let best = search.run(&SearchConfig::for_testing()).unwrap();
//! assert_eq!(best, Some(1));
//! ```
//!
//! # Design notes
//!
//! - The tree ([`Tree`]) is an arena: nodes are addressed by stable
//!   [`NodeId`] indices and owned strictly parent → children.
//! - Randomness is threaded explicitly as a `ChaCha20Rng`, injected at
//!   session construction; seeded runs are fully reproducible.
//! - Single-threaded by design. Independent searches on independent trees
//!   can run on independent threads; there is no shared state.
//! - Rollout termination is the domain's obligation; the engine imposes no
//!   timeout.

pub mod config;
pub mod graph;
pub mod node;
pub mod policy;
pub mod search;
pub mod tree;

pub use config::SearchConfig;
pub use graph::TreeGraph;
pub use node::SearchNode;
pub use policy::{RandomChild, SelectionPolicy, Uct};
pub use search::{Mcts, SearchError, SearchTree};
pub use tree::{NodeId, Traversal, Tree};
