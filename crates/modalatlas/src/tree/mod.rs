//! Syntax trees: construction, queries, and canonicalization

pub mod builder;
pub mod formula;
pub mod node;
pub mod normalize;

#[cfg(test)]
mod proptest_tests;

pub use builder::{build, FormulaBuilder};
pub use formula::Formula;
pub use node::{Node, NodeId, NodeRef};
pub use normalize::normalize;
