//! Syntax tree nodes
//!
//! Nodes live in the arena of the [`Formula`](super::Formula) that owns them
//! and refer to each other by [`NodeId`].  Children are owned by exactly one
//! parent; the `parent` link is navigation only.
//!
//! Two fields are caches: `rendered` is written when the node is built (and
//! by [`Formula::refresh_rendered`](super::Formula::refresh_rendered)), and
//! `size` is written by [`Formula::recompute_sizes`](super::Formula::recompute_sizes).
//! Neither is updated by structural edits such as child swaps.

use super::Formula;
use crate::logic::Token;
use std::fmt;

/// Index of a node inside its formula's arena
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Get the raw index value
    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single node of a syntax tree
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) token: Token,
    pub(crate) rendered: String,
    pub(crate) size: usize,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl Node {
    pub(crate) fn leaf(token: Token) -> Self {
        let rendered = token.to_string();
        Node {
            token,
            rendered,
            size: 1,
            parent: None,
            left: None,
            right: None,
        }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Cached rendering of the subtree rooted here
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    /// Cached subtree size, valid after the last size pass
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Borrowed handle to a node together with the formula that owns it
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    pub(crate) formula: &'a Formula,
    pub(crate) id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn node(&self) -> &'a Node {
        self.formula.node(self.id)
    }

    pub fn token(&self) -> &'a Token {
        &self.node().token
    }

    pub fn rendered(&self) -> &'a str {
        &self.node().rendered
    }

    pub fn size(&self) -> usize {
        self.node().size
    }

    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    pub fn left(&self) -> Option<NodeRef<'a>> {
        self.node().left.map(|id| self.formula.node_ref(id))
    }

    pub fn right(&self) -> Option<NodeRef<'a>> {
        self.node().right.map(|id| self.formula.node_ref(id))
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|id| self.formula.node_ref(id))
    }

    pub fn height(&self) -> usize {
        self.formula.height_at(self.id)
    }

    pub fn modal_depth(&self) -> usize {
        self.formula.modal_depth_at(self.id)
    }

    /// Render the subtree from its current structure
    pub fn render(&self) -> String {
        self.formula.render_at(self.id)
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("rendered", &self.rendered())
            .field("size", &self.size())
            .finish()
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
