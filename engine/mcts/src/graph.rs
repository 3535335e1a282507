//! Tree-to-graph snapshots for visualization.
//!
//! [`TreeGraph::capture`] reads a search tree through its public traversal
//! and statistics accessors and produces a flat vertex/edge snapshot, with
//! per-child selection weights normalized into probabilities. [`to_dot`]
//! renders the snapshot as Graphviz DOT. Strictly a read-only consumer of
//! the core.
//!
//! [`to_dot`]: TreeGraph::to_dot

use std::collections::HashMap;
use std::fmt::Write;

use game_core::GameState;

use crate::policy::SelectionPolicy;
use crate::search::SearchTree;
use crate::tree::{NodeId, Traversal};

/// One search-tree node as seen by the visualization.
#[derive(Debug, Clone)]
pub struct Vertex<M> {
    /// Move that produced the node, `None` for the root.
    pub mv: Option<M>,
    /// Accumulated payoff.
    pub wins: f64,
    /// Visit count.
    pub visits: f64,
    /// `wins / visits`, 0 before the first visit.
    pub ratio: f64,
    /// Number of still-unexpanded moves.
    pub untried: usize,
    /// Selection-pressure weight under the captured policy.
    pub score: f64,
    /// `score` normalized over siblings.
    pub node_prob: f64,
    /// Product of `node_prob` along the path from the root.
    pub path_prob: f64,
    /// Debug rendering of the wrapped state.
    pub label: String,
}

/// Parent → child link between vertex indices.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    /// Index of the parent vertex.
    pub parent: usize,
    /// Index of the child vertex.
    pub child: usize,
}

/// Flat snapshot of a search tree, depth-bounded.
#[derive(Debug, Clone)]
pub struct TreeGraph<M> {
    vertices: Vec<Vertex<M>>,
    edges: Vec<Edge>,
}

impl<M: Clone + PartialEq + std::fmt::Debug> TreeGraph<M> {
    /// Snapshot `tree` down to `max_depth` (root depth 1; `None` for the
    /// whole tree). Child weights come from the policy's
    /// [`selection_pressure`](SelectionPolicy::selection_pressure) and are
    /// normalized per sibling group.
    pub fn capture<S, P>(tree: &SearchTree<S>, policy: &P, max_depth: Option<u32>) -> Self
    where
        S: GameState<Move = M> + std::fmt::Debug,
        P: SelectionPolicy<S>,
    {
        let mut vertices: Vec<Vertex<M>> = Vec::new();
        let mut edges: Vec<Edge> = Vec::new();
        let mut children: Vec<Vec<usize>> = Vec::new();
        let mut index_of: HashMap<NodeId, usize> = HashMap::new();

        for (parent, id) in tree.tree().traverse_edges(Traversal::Preorder, max_depth) {
            let node = tree.node(id);
            let score = match parent {
                None => 1.0,
                Some(p) => policy.selection_pressure(tree, p, id),
            };
            let index = vertices.len();
            let _ = index_of.insert(id, index);
            children.push(Vec::new());
            vertices.push(Vertex {
                mv: node.mv().cloned(),
                wins: node.wins(),
                visits: node.visits(),
                ratio: node.win_ratio(),
                untried: node.untried_moves().len(),
                score,
                node_prob: 1.0,
                path_prob: 1.0,
                label: format!("{:?}", node.state()),
            });
            if let Some(p) = parent {
                let pi = index_of[&p];
                edges.push(Edge {
                    parent: pi,
                    child: index,
                });
                children[pi].push(index);
            }
        }

        // Preorder puts every parent before its children, so path
        // probabilities are final by the time a child group is normalized.
        for pi in 0..vertices.len() {
            let total: f64 = children[pi].iter().map(|&ci| vertices[ci].score).sum();
            if total <= 0.0 {
                continue;
            }
            let parent_path = vertices[pi].path_prob;
            for &ci in &children[pi] {
                let prob = vertices[ci].score / total;
                vertices[ci].node_prob = prob;
                vertices[ci].path_prob = prob * parent_path;
            }
        }

        Self { vertices, edges }
    }

    /// Vertices in preorder; index 0 is the root.
    pub fn vertices(&self) -> &[Vertex<M>] {
        &self.vertices
    }

    /// Parent → child links between vertex indices.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Render the snapshot as Graphviz DOT.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph mcts {\n  node [shape=box];\n");
        for (i, v) in self.vertices.iter().enumerate() {
            let _ = writeln!(
                out,
                "  n{i} [label=\"{}\\nw={:.1} v={:.0} u={}\\np={:.2}\"];",
                escape(&v.label),
                v.wins,
                v.visits,
                v.untried,
                v.path_prob
            );
        }
        for e in &self.edges {
            let label = self.vertices[e.child]
                .mv
                .as_ref()
                .map(|m| escape(&format!("{m:?}")))
                .unwrap_or_default();
            let _ = writeln!(out, "  n{} -> n{} [label=\"{label}\"];", e.parent, e.child);
        }
        out.push_str("}\n");
        out
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}
