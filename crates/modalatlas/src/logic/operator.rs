//! Operator catalog entries and the symbol table that holds them
//!
//! Each operator carries the properties the parser and the tree utilities
//! consult: precedence (higher binds tighter), arity, and whether it is a
//! modal operator or a commutative one.  Operators whose symbol is wrapped
//! in one of the [`OPERATOR_BRACKETS`] pairs (e.g. `[L]`) are tokenized as a
//! single unit; every other operator symbol is a single character.

use crate::error::{FormulaError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Bracket pairs that delimit multi-character operator names
pub const OPERATOR_BRACKETS: [(char, char); 2] = [('[', ']'), ('⟨', '⟩')];

/// Closing counterpart of an operator-name opening bracket
pub fn closing_bracket(open: char) -> Option<char> {
    OPERATOR_BRACKETS
        .iter()
        .find(|(o, _)| *o == open)
        .map(|(_, c)| *c)
}

/// Number of operands an operator takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arity {
    Nullary,
    Unary,
    Binary,
}

impl Arity {
    pub fn operands(self) -> usize {
        match self {
            Arity::Nullary => 0,
            Arity::Unary => 1,
            Arity::Binary => 2,
        }
    }

    pub fn from_operands(n: usize) -> Option<Self> {
        match n {
            0 => Some(Arity::Nullary),
            1 => Some(Arity::Unary),
            2 => Some(Arity::Binary),
            _ => None,
        }
    }
}

/// An operator from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operator {
    pub symbol: String,
    pub precedence: i32,
    pub arity: Arity,
    #[serde(default)]
    pub modal: bool,
    #[serde(default)]
    pub commutative: bool,
}

impl Operator {
    pub fn new(symbol: &str, precedence: i32, arity: Arity) -> Self {
        Operator {
            symbol: symbol.to_string(),
            precedence,
            arity,
            modal: false,
            commutative: false,
        }
    }

    pub fn nullary(symbol: &str, precedence: i32) -> Self {
        Operator::new(symbol, precedence, Arity::Nullary)
    }

    pub fn unary(symbol: &str, precedence: i32) -> Self {
        Operator::new(symbol, precedence, Arity::Unary)
    }

    pub fn binary(symbol: &str, precedence: i32) -> Self {
        Operator::new(symbol, precedence, Arity::Binary)
    }

    /// Mark this operator as modal
    pub fn modal(mut self) -> Self {
        self.modal = true;
        self
    }

    /// Mark this operator as commutative
    pub fn commutative(mut self) -> Self {
        self.commutative = true;
        self
    }

    /// Whether the symbol is a bracketed multi-character name such as `[L]`
    pub fn is_bracketed(&self) -> bool {
        let mut chars = self.symbol.chars();
        match (chars.next(), chars.next_back()) {
            (Some(open), Some(close)) => closing_bracket(open) == Some(close),
            _ => false,
        }
    }
}

/// Insertion-ordered table of operators, keyed by exact symbol
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatorTable {
    operators: IndexMap<String, Operator>,
}

impl OperatorTable {
    pub fn new() -> Self {
        OperatorTable {
            operators: IndexMap::new(),
        }
    }

    /// Register an operator.  Symbols are unique within a table.
    pub fn insert(&mut self, op: Operator) -> Result<()> {
        if op.symbol.is_empty() {
            return Err(FormulaError::InvalidConfig(
                "operator symbol must not be empty".to_string(),
            ));
        }
        if self.operators.contains_key(&op.symbol) {
            return Err(FormulaError::InvalidConfig(format!(
                "duplicate operator symbol '{}'",
                op.symbol
            )));
        }
        self.operators.insert(op.symbol.clone(), op);
        Ok(())
    }

    /// Exact symbol lookup
    pub fn get(&self, symbol: &str) -> Option<&Operator> {
        self.operators.get(symbol)
    }

    /// Lookup of a single-character operator symbol
    pub fn get_char(&self, c: char) -> Option<&Operator> {
        let mut buf = [0u8; 4];
        self.operators.get(&*c.encode_utf8(&mut buf))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.operators.contains_key(symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operator> {
        self.operators.values()
    }

    /// Operators that are not modal
    pub fn non_modal(&self) -> impl Iterator<Item = &Operator> {
        self.iter().filter(|op| !op.modal)
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl FromIterator<Operator> for OperatorTable {
    /// Later duplicates replace earlier entries.
    fn from_iter<I: IntoIterator<Item = Operator>>(iter: I) -> Self {
        OperatorTable {
            operators: iter.into_iter().map(|op| (op.symbol.clone(), op)).collect(),
        }
    }
}
