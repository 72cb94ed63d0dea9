//! Canonical ordering of commutative operands
//!
//! At every commutative binary node the two children are ordered by their
//! root tokens (`Token::precedes`: letters by character code, operators by
//! precedence).  Only immediate siblings are reordered; nested applications
//! of the same operator are not flattened or re-associated, so formulas that
//! differ only in grouping may still normalize to different trees.

use super::node::NodeId;
use super::Formula;

impl Formula {
    /// Reorder the children of commutative nodes in place.  Idempotent.
    ///
    /// Cached renderings are not touched; call
    /// [`Formula::refresh_rendered`] if they are needed afterwards.
    pub fn normalize(&mut self) -> &mut Self {
        let root = self.root_id();
        self.normalize_at(root);
        self
    }

    fn normalize_at(&mut self, id: NodeId) {
        let (left, right, commutative) = {
            let node = self.node(id);
            (node.left, node.right, node.token.is_commutative())
        };
        if let (Some(l), Some(r)) = (left, right) {
            if commutative && !self.node(l).token.precedes(&self.node(r).token) {
                self.swap_children(id);
            }
        }
        if let Some(l) = left {
            self.normalize_at(l);
        }
        if let Some(r) = right {
            self.normalize_at(r);
        }
    }
}

/// Free-function form of [`Formula::normalize`]
pub fn normalize(formula: &mut Formula) -> &mut Formula {
    formula.normalize()
}
