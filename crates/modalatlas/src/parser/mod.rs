//! Formula parsing: tokenizer, shunting-yard conversion, and the combined
//! string-to-tree entry point

pub mod shunting_yard;
pub mod tokenizer;

pub use shunting_yard::to_postfix;
pub use tokenizer::{tokenize, RawToken};

use crate::error::Result;
use crate::logic::Logic;
use crate::tree::{build, Formula};

/// Parse an infix expression into a formula over `logic`
pub fn parse(expression: &str, logic: &Logic) -> Result<Formula> {
    let tokens = tokenize(expression, logic.operators())?;
    let postfix = to_postfix(tokens, logic)?;
    build(postfix)
}
