//! ModalAtlas: parsing, manipulation and random generation of propositional
//! and modal logic formulas
//!
//! Strings are tokenized against a [`Logic`] (an alphabet plus an operator
//! table), converted to postfix with an operator-precedence stack, and built
//! into arena-backed syntax trees.  Trees answer size, height and modal-depth
//! queries, list their subformulas, render back to fully parenthesized
//! strings, and can canonicalize the operand order of commutative operators.
//! Random formulas of a given height and bounded modal depth are produced by
//! the generator.

pub mod config;
pub mod error;
pub mod generating;
pub mod json;
pub mod logic;
pub mod parser;
pub mod tree;

pub use config::{GeneratorConfig, LogicConfig};
pub use error::{FormulaError, Result};
pub use generating::{generate, generate_default, generate_for_logic, generate_seeded, RngSource};
pub use json::FormulaJson;
pub use logic::{Arity, Letter, Logic, Operator, OperatorTable, Token};
pub use parser::{parse, to_postfix, tokenize, RawToken};
pub use tree::{build, normalize, Formula, FormulaBuilder, Node, NodeId, NodeRef};
