//! Tokens of a formula: propositional letters and catalog operators

use super::operator::{Arity, Operator};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A propositional letter (atom)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Letter(pub char);

impl Letter {
    pub fn new(symbol: char) -> Self {
        Letter(symbol)
    }

    pub fn symbol(self) -> char {
        self.0
    }

    /// Letters are ordered by character code wherever they are compared
    /// against operators.
    pub fn precedence(self) -> i64 {
        self.0 as i64
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<char> for Letter {
    fn from(symbol: char) -> Self {
        Letter(symbol)
    }
}

/// A token of a formula, owned by the node that wraps it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    Letter(Letter),
    Operator(Operator),
}

impl Token {
    pub fn precedence(&self) -> i64 {
        match self {
            Token::Letter(letter) => letter.precedence(),
            Token::Operator(op) => op.precedence as i64,
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Token::Letter(_) => Arity::Nullary,
            Token::Operator(op) => op.arity,
        }
    }

    pub fn is_modal(&self) -> bool {
        matches!(self, Token::Operator(op) if op.modal)
    }

    pub fn is_commutative(&self) -> bool {
        matches!(self, Token::Operator(op) if op.commutative)
    }

    pub fn is_leaf(&self) -> bool {
        self.arity() == Arity::Nullary
    }

    /// Total order used to canonicalize commutative children: `self` may
    /// stay on the left of `other`.
    pub fn precedes(&self, other: &Token) -> bool {
        self.precedence() <= other.precedence()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Letter(letter) => write!(f, "{}", letter),
            Token::Operator(op) => write!(f, "{}", op.symbol),
        }
    }
}

impl From<Letter> for Token {
    fn from(letter: Letter) -> Self {
        Token::Letter(letter)
    }
}

impl From<Operator> for Token {
    fn from(op: Operator) -> Self {
        Token::Operator(op)
    }
}
