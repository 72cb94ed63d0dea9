//! The formula handle and its tree queries

use super::node::{Node, NodeId, NodeRef};
use crate::logic::{Letter, Token};
use indexmap::IndexSet;
use std::fmt;

/// A syntax tree, owning every node reachable from its root
///
/// Formulas are created by the builder, the parser and the random generator.
/// Two formulas never share nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Formula {
    pub(crate) fn from_arena(nodes: Vec<Node>, root: NodeId) -> Self {
        Formula { nodes, root }
    }

    pub fn root(&self) -> NodeRef<'_> {
        self.node_ref(self.root)
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Handle to a node, if the id belongs to this formula
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.index() < self.nodes.len()).then(|| self.node_ref(id))
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub(crate) fn node_ref(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { formula: self, id }
    }

    /// Cached size of the whole tree
    pub fn size(&self) -> usize {
        self.node(self.root).size
    }

    /// Cached rendering of the whole tree
    pub fn rendered(&self) -> &str {
        &self.node(self.root).rendered
    }

    pub fn height(&self) -> usize {
        self.height_at(self.root)
    }

    pub fn modal_depth(&self) -> usize {
        self.modal_depth_at(self.root)
    }

    /// Fully parenthesized rendering computed from the current structure
    pub fn render(&self) -> String {
        self.render_at(self.root)
    }

    /// Recompute the cached size of every node; returns the root's size.
    ///
    /// This is the only place sizes are written after construction, so it
    /// must be called again after any structural edit.
    pub fn recompute_sizes(&mut self) -> usize {
        self.recompute_size_at(self.root)
    }

    pub(crate) fn recompute_size_at(&mut self, id: NodeId) -> usize {
        let (left, right) = {
            let node = self.node(id);
            (node.left, node.right)
        };
        let left_size = left.map_or(0, |l| self.recompute_size_at(l));
        let right_size = right.map_or(0, |r| self.recompute_size_at(r));
        let size = 1 + left_size + right_size;
        self.node_mut(id).size = size;
        size
    }

    pub(crate) fn height_at(&self, id: NodeId) -> usize {
        let node = self.node(id);
        if node.is_leaf() {
            return 0;
        }
        let left = node.left.map_or(0, |l| self.height_at(l));
        let right = node.right.map_or(0, |r| self.height_at(r));
        1 + left.max(right)
    }

    /// Longest chain of modal operators along any branch below `id`
    pub(crate) fn modal_depth_at(&self, id: NodeId) -> usize {
        let node = self.node(id);
        let own = usize::from(node.token.is_modal());
        let left = node.left.map_or(0, |l| self.modal_depth_at(l));
        let right = node.right.map_or(0, |r| self.modal_depth_at(r));
        own + left.max(right)
    }

    pub(crate) fn render_at(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let node = self.node(id);
        match (node.left, node.right) {
            (Some(left), Some(right)) => {
                out.push('(');
                self.write_node(left, out);
                out.push_str(&node.token.to_string());
                self.write_node(right, out);
                out.push(')');
            }
            (None, Some(child)) => {
                out.push_str(&node.token.to_string());
                self.write_node(child, out);
            }
            // A left-only node never comes out of the builder.
            (Some(child), None) => {
                self.write_node(child, out);
                out.push_str(&node.token.to_string());
            }
            (None, None) => out.push_str(&node.token.to_string()),
        }
    }

    /// Overwrite every cached rendering with the current structure's string
    pub fn refresh_rendered(&mut self) {
        self.refresh_rendered_at(self.root);
    }

    fn refresh_rendered_at(&mut self, id: NodeId) {
        let (left, right) = {
            let node = self.node(id);
            (node.left, node.right)
        };
        if let Some(l) = left {
            self.refresh_rendered_at(l);
        }
        if let Some(r) = right {
            self.refresh_rendered_at(r);
        }
        let rendered = {
            let node = self.node(id);
            let op = node.token.to_string();
            match (left, right) {
                (Some(l), Some(r)) => format!(
                    "({}{}{})",
                    self.node(l).rendered,
                    op,
                    self.node(r).rendered
                ),
                (None, Some(c)) => format!("{}{}", op, self.node(c).rendered),
                (Some(c), None) => format!("{}{}", self.node(c).rendered, op),
                (None, None) => op,
            }
        };
        self.node_mut(id).rendered = rendered;
    }

    /// Every node of the tree in in-order (left, self, right).
    ///
    /// With `sorted`, the list is stably re-ordered by ascending cached size,
    /// so leaves come first and the root comes last.
    pub fn subformulas(&self, sorted: bool) -> Vec<NodeRef<'_>> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.collect_in_order(self.root, &mut out);
        if sorted {
            out.sort_by_key(|n| n.size());
        }
        out
    }

    fn collect_in_order<'a>(&'a self, id: NodeId, out: &mut Vec<NodeRef<'a>>) {
        let node = self.node(id);
        if let Some(left) = node.left {
            self.collect_in_order(left, out);
        }
        out.push(self.node_ref(id));
        if let Some(right) = node.right {
            self.collect_in_order(right, out);
        }
    }

    /// Tokens in postfix order
    pub fn postfix(&self) -> Vec<Token> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.collect_postfix(self.root, &mut out);
        out
    }

    fn collect_postfix(&self, id: NodeId, out: &mut Vec<Token>) {
        let node = self.node(id);
        if let Some(left) = node.left {
            self.collect_postfix(left, out);
        }
        if let Some(right) = node.right {
            self.collect_postfix(right, out);
        }
        out.push(node.token.clone());
    }

    /// Distinct letters in order of first in-order occurrence
    pub fn letters(&self) -> IndexSet<Letter> {
        self.subformulas(false)
            .into_iter()
            .filter_map(|n| match n.token() {
                Token::Letter(letter) => Some(*letter),
                Token::Operator(_) => None,
            })
            .collect()
    }

    /// Number of operator applications (non-leaf nodes)
    pub fn operator_count(&self) -> usize {
        self.subformulas(false)
            .iter()
            .filter(|n| !n.is_leaf())
            .count()
    }

    /// Same tokens in the same shape, regardless of arena layout
    pub fn structurally_eq(&self, other: &Formula) -> bool {
        self.subtree_eq(self.root, other, other.root)
    }

    fn subtree_eq(&self, id: NodeId, other: &Formula, other_id: NodeId) -> bool {
        let a = self.node(id);
        let b = other.node(other_id);
        let child_eq = |x: Option<NodeId>, y: Option<NodeId>| match (x, y) {
            (Some(x), Some(y)) => self.subtree_eq(x, other, y),
            (None, None) => true,
            _ => false,
        };
        a.token == b.token && child_eq(a.left, b.left) && child_eq(a.right, b.right)
    }

    /// Exchange the children of a binary node.  The parent links are left
    /// as they are, since both children keep the same parent.
    ///
    /// Returns `false` without touching the tree when `id` is not a node of
    /// this formula or the node is not binary.
    pub fn swap_children(&mut self, id: NodeId) -> bool {
        match self.nodes.get_mut(id.index()) {
            Some(node) if node.left.is_some() && node.right.is_some() => {
                std::mem::swap(&mut node.left, &mut node.right);
                true
            }
            _ => false,
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use crate::logic::Logic;
    use crate::parser::parse;

    #[test]
    fn test_size_height_modal_depth() {
        let logic = Logic::modal();
        let formula = parse("□c∧◊d", &logic).unwrap();
        assert_eq!(formula.size(), 5);
        assert_eq!(formula.height(), 2);
        assert_eq!(formula.modal_depth(), 1);
    }

    #[test]
    fn test_modal_depth_counts_chain_not_total() {
        let logic = Logic::modal();
        let formula = parse("□□p∧◊q", &logic).unwrap();
        assert_eq!(formula.modal_depth(), 2);
    }

    #[test]
    fn test_unary_chain_height_is_size_minus_one() {
        let logic = Logic::modal();
        let formula = parse("¬□¬p", &logic).unwrap();
        assert_eq!(formula.size(), 4);
        assert_eq!(formula.height(), 3);
    }

    #[test]
    fn test_subformulas_in_order() {
        let logic = Logic::propositional();
        let formula = parse("(a∧b)∨c", &logic).unwrap();
        let rendered: Vec<&str> = formula
            .subformulas(false)
            .iter()
            .map(|n| n.rendered())
            .collect();
        assert_eq!(rendered, vec!["a", "(a∧b)", "b", "((a∧b)∨c)", "c"]);
    }

    #[test]
    fn test_subformulas_sorted_by_size_is_stable() {
        let logic = Logic::propositional();
        let formula = parse("(a∧b)∨c", &logic).unwrap();
        let rendered: Vec<&str> = formula
            .subformulas(true)
            .iter()
            .map(|n| n.rendered())
            .collect();
        assert_eq!(rendered, vec!["a", "b", "c", "(a∧b)", "((a∧b)∨c)"]);
    }

    #[test]
    fn test_recompute_sizes_matches_children() {
        let logic = Logic::modal();
        let mut formula = parse("(p→◊q)↔¬r", &logic).unwrap();
        assert_eq!(formula.recompute_sizes(), 7);
        for node in formula.subformulas(false) {
            let left = node.left().map_or(0, |n| n.size());
            let right = node.right().map_or(0, |n| n.size());
            assert_eq!(node.size(), 1 + left + right);
        }
    }

    #[test]
    fn test_parent_links() {
        let logic = Logic::propositional();
        let formula = parse("a∧¬b", &logic).unwrap();
        let root = formula.root();
        assert!(root.parent().is_none());
        let negation = root.right().unwrap();
        assert_eq!(negation.parent().unwrap().id(), root.id());
        assert_eq!(negation.right().unwrap().parent().unwrap().id(), negation.id());
    }

    #[test]
    fn test_swap_leaves_rendered_cache_stale_until_refresh() {
        let logic = Logic::propositional();
        let mut formula = parse("a→b", &logic).unwrap();
        let root = formula.root_id();
        assert!(formula.swap_children(root));
        assert_eq!(formula.render(), "(b→a)");
        assert_eq!(formula.rendered(), "(a→b)");
        formula.refresh_rendered();
        assert_eq!(formula.rendered(), "(b→a)");
    }

    #[test]
    fn test_swap_children_rejects_foreign_and_non_binary_ids() {
        let logic = Logic::propositional();
        let large = parse("(a∧b)∨(c∧d)", &logic).unwrap();
        let mut small = parse("¬a", &logic).unwrap();
        let foreign = large.root_id();
        assert!(small.get(foreign).is_none());
        assert!(!small.swap_children(foreign));
        let negation = small.root_id();
        assert!(!small.swap_children(negation));
        assert_eq!(small.render(), "¬a");
    }

    #[test]
    fn test_letters_and_operator_count() {
        let logic = Logic::propositional();
        let formula = parse("(b∧a)∨(b∧c)", &logic).unwrap();
        let letters: String = formula.letters().iter().map(|l| l.symbol()).collect();
        assert_eq!(letters, "bac");
        assert_eq!(formula.operator_count(), 3);
    }

    #[test]
    fn test_structural_equality() {
        let logic = Logic::propositional();
        let a = parse("(p∧q)", &logic).unwrap();
        let b = parse("p ∧ q", &logic).unwrap();
        let c = parse("q∧p", &logic).unwrap();
        assert!(a.structurally_eq(&b));
        assert!(!a.structurally_eq(&c));
    }
}
