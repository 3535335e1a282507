//! Generic ordered multi-child tree with parent back-references.
//!
//! Nodes are stored in an arena (a contiguous `Vec`) and addressed by
//! `NodeId` indices, which keeps node identity stable for the lifetime of
//! the tree and makes parent links plain indices instead of shared
//! references. The tree strictly owns its nodes: every node is the child of
//! exactly one parent, the structure is acyclic, and nodes are never
//! destroyed individually; the whole tree is dropped as a unit.

/// Index into the node arena. Identity of a node, distinct from payload
/// equality; stable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// Depth-first traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Yield a node before its children.
    Preorder,
    /// Yield a node after its children.
    Postorder,
}

/// A node in the arena: payload plus structure links.
#[derive(Debug)]
pub struct TreeNode<V> {
    /// Node payload.
    pub value: V,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl<V> TreeNode<V> {
    /// Parent of this node, `None` only for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Ordered multi-child tree over payload type `V`.
#[derive(Debug)]
pub struct Tree<V> {
    nodes: Vec<TreeNode<V>>,
    root: NodeId,
}

impl<V> Tree<V> {
    /// Create a tree consisting of a single root node.
    pub fn new(value: V) -> Self {
        Self {
            nodes: vec![TreeNode {
                value,
                parent: None,
                children: Vec::new(),
            }],
            root: NodeId(0),
        }
    }

    /// Root node id (always `NodeId(0)`).
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node by id. An out-of-arena id is a programmer error and panics.
    pub fn get(&self, id: NodeId) -> &TreeNode<V> {
        &self.nodes[id.0 as usize]
    }

    /// Mutable node access. Only the payload is mutable; structure links
    /// change exclusively through [`attach`](Self::attach).
    pub fn get_mut(&mut self, id: NodeId) -> &mut TreeNode<V> {
        &mut self.nodes[id.0 as usize]
    }

    /// Parent of `id`, `None` only for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).parent
    }

    /// Children of `id` in insertion order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    /// Allocate a detached node and return its id. The node is not part of
    /// any parent's child sequence until [`attach`](Self::attach)ed.
    pub fn allocate(&mut self, value: V) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(TreeNode {
            value,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Attach a previously allocated, detached node as the last child of
    /// `parent`. Reattachment is not supported: attaching a node that
    /// already has a parent, or the root, is a contract violation and
    /// panics.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        assert_ne!(child, self.root, "the root cannot be attached to a parent");
        assert!(
            self.get(child).parent.is_none(),
            "node {child:?} already has a parent; reattachment is not supported"
        );
        self.get_mut(child).parent = Some(parent);
        self.get_mut(parent).children.push(child);
    }

    /// Allocate a node holding `value` and attach it as the last child of
    /// `parent`.
    pub fn add_child(&mut self, parent: NodeId, value: V) -> NodeId {
        let child = self.allocate(value);
        self.attach(parent, child);
        child
    }

    /// Append one child per value, in order.
    pub fn set_children(&mut self, parent: NodeId, values: impl IntoIterator<Item = V>) {
        for value in values {
            let _ = self.add_child(parent, value);
        }
    }

    /// Lazy depth-first traversal of the whole tree.
    ///
    /// The root has depth 1; a node at exactly `max_depth` is yielded but
    /// its children are not. `max_depth == Some(0)` yields nothing.
    pub fn traverse(&self, order: Traversal, max_depth: Option<u32>) -> Traverse<'_, V> {
        self.traverse_from(self.root, order, max_depth)
    }

    /// Traversal of the subtree rooted at `start`; `start` has depth 1.
    ///
    /// The iterator borrows the tree, so structural mutation during a
    /// traversal is rejected at compile time.
    pub fn traverse_from(
        &self,
        start: NodeId,
        order: Traversal,
        max_depth: Option<u32>,
    ) -> Traverse<'_, V> {
        let mut stack = Vec::new();
        if max_depth.map_or(true, |d| d >= 1) {
            stack.push(Frame::Enter(start, 1));
        }
        Traverse {
            tree: self,
            order,
            max_depth,
            stack,
        }
    }

    /// Like [`traverse`](Self::traverse) but yields `(parent, node)` pairs;
    /// the traversal start's parent slot is `None`.
    pub fn traverse_edges(
        &self,
        order: Traversal,
        max_depth: Option<u32>,
    ) -> TraverseEdges<'_, V> {
        TraverseEdges {
            start: self.root,
            inner: self.traverse(order, max_depth),
        }
    }

    /// Structural equality: payloads equal and children sequences equal
    /// element-wise and order-wise. Order sensitivity is deliberate: two
    /// isomorphic trees whose children are listed in different order compare
    /// unequal.
    pub fn structural_eq(&self, other: &Self) -> bool
    where
        V: PartialEq,
    {
        fn eq_at<V: PartialEq>(a: &Tree<V>, ai: NodeId, b: &Tree<V>, bi: NodeId) -> bool {
            a.get(ai).value == b.get(bi).value
                && a.children(ai).len() == b.children(bi).len()
                && a.children(ai)
                    .iter()
                    .zip(b.children(bi))
                    .all(|(&x, &y)| eq_at(a, x, b, y))
        }
        eq_at(self, self.root, other, other.root)
    }
}

#[derive(Debug)]
enum Frame {
    Enter(NodeId, u32),
    Exit(NodeId),
}

/// Lazy depth-first iterator over node ids. See [`Tree::traverse`].
#[derive(Debug)]
pub struct Traverse<'a, V> {
    tree: &'a Tree<V>,
    order: Traversal,
    max_depth: Option<u32>,
    stack: Vec<Frame>,
}

impl<V> Iterator for Traverse<'_, V> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Enter(id, depth) => {
                    if self.order == Traversal::Postorder {
                        self.stack.push(Frame::Exit(id));
                    }
                    if self.max_depth.map_or(true, |d| depth < d) {
                        for &child in self.tree.children(id).iter().rev() {
                            self.stack.push(Frame::Enter(child, depth + 1));
                        }
                    }
                    if self.order == Traversal::Preorder {
                        return Some(id);
                    }
                }
                Frame::Exit(id) => return Some(id),
            }
        }
        None
    }
}

/// Iterator over `(parent, node)` pairs. See [`Tree::traverse_edges`].
#[derive(Debug)]
pub struct TraverseEdges<'a, V> {
    start: NodeId,
    inner: Traverse<'a, V>,
}

impl<V> Iterator for TraverseEdges<'_, V> {
    type Item = (Option<NodeId>, NodeId);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.inner.next()?;
        let parent = if id == self.start {
            None
        } else {
            self.inner.tree.parent(id)
        };
        Some((parent, id))
    }
}
