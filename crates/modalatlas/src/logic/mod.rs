//! Logic representation: letters, operators, tokens, and the logics that
//! pair an alphabet with an operator table.

pub mod language;
pub mod operator;
pub mod token;

pub use language::Logic;
pub use operator::{closing_bracket, Arity, Operator, OperatorTable, OPERATOR_BRACKETS};
pub use token::{Letter, Token};
