//! Tree construction from postfix token sequences

use super::node::{Node, NodeId};
use super::Formula;
use crate::error::{FormulaError, Result};
use crate::logic::{Arity, Token};
use tracing::debug;

/// Incremental postfix-to-tree builder
///
/// Tokens are pushed one at a time; operands are taken from a node stack so
/// the most recently completed subtree becomes the right operand.
#[derive(Debug, Default)]
pub struct FormulaBuilder {
    nodes: Vec<Node>,
    stack: Vec<NodeId>,
}

impl FormulaBuilder {
    pub fn new() -> Self {
        FormulaBuilder {
            nodes: Vec::new(),
            stack: Vec::new(),
        }
    }

    fn alloc(&mut self, node: Node) -> Result<NodeId> {
        let index = u32::try_from(self.nodes.len()).map_err(|_| {
            FormulaError::MalformedPostfix(format!("more than {} nodes", u32::MAX))
        })?;
        self.nodes.push(node);
        Ok(NodeId(index))
    }

    fn pop_operand(&mut self, token: &Token) -> Result<NodeId> {
        self.stack.pop().ok_or_else(|| {
            FormulaError::MalformedPostfix(format!("operator '{}' is missing an operand", token))
        })
    }

    /// Push the next postfix token
    pub fn push(&mut self, token: Token) -> Result<()> {
        match token.arity() {
            Arity::Nullary => {
                let id = self.alloc(Node::leaf(token))?;
                self.stack.push(id);
            }
            Arity::Unary => {
                let child = self.pop_operand(&token)?;
                let rendered = format!("{}{}", token, self.nodes[child.index()].rendered);
                let id = self.alloc(Node {
                    token,
                    rendered,
                    size: 0,
                    parent: None,
                    left: None,
                    right: Some(child),
                })?;
                self.nodes[child.index()].parent = Some(id);
                self.stack.push(id);
            }
            Arity::Binary => {
                let right = self.pop_operand(&token)?;
                let left = self.pop_operand(&token)?;
                let rendered = format!(
                    "({}{}{})",
                    self.nodes[left.index()].rendered,
                    token,
                    self.nodes[right.index()].rendered
                );
                let id = self.alloc(Node {
                    token,
                    rendered,
                    size: 0,
                    parent: None,
                    left: Some(left),
                    right: Some(right),
                })?;
                self.nodes[left.index()].parent = Some(id);
                self.nodes[right.index()].parent = Some(id);
                self.stack.push(id);
            }
        }
        Ok(())
    }

    /// Finish construction; exactly one tree must remain on the stack.
    pub fn finish(self) -> Result<Formula> {
        let root = match self.stack.as_slice() {
            [root] => *root,
            [] => {
                return Err(FormulaError::MalformedPostfix(
                    "empty token sequence".to_string(),
                ))
            }
            rest => {
                return Err(FormulaError::MalformedPostfix(format!(
                    "{} trees left on the stack",
                    rest.len()
                )))
            }
        };
        let mut formula = Formula::from_arena(self.nodes, root);
        let size = formula.recompute_sizes();
        debug!(size, rendered = formula.rendered(), "built formula");
        Ok(formula)
    }
}

/// Build a formula from tokens in postfix order
pub fn build(postfix: impl IntoIterator<Item = Token>) -> Result<Formula> {
    let mut builder = FormulaBuilder::new();
    for token in postfix {
        builder.push(token)?;
    }
    builder.finish()
}
