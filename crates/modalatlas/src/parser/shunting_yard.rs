//! Infix to postfix conversion (shunting-yard)
//!
//! An incoming operator only discharges stacked operators of strictly
//! higher precedence.  Equal precedence stacks on top instead of popping,
//! so chains like `a∧b∧c` group to the right: `(a∧(b∧c))`.

use super::tokenizer::RawToken;
use crate::error::{FormulaError, Result};
use crate::logic::{Arity, Letter, Logic, Operator, Token};
use tracing::{debug, trace};

#[derive(Debug)]
enum StackItem {
    Open,
    Operator(Operator),
}

/// Convert a token sequence to postfix order using the logic's alphabet
pub fn to_postfix(tokens: Vec<RawToken>, logic: &Logic) -> Result<Vec<Token>> {
    let total = tokens.len();
    let mut output: Vec<Token> = Vec::with_capacity(total);
    let mut stack: Vec<StackItem> = Vec::new();

    for (position, raw) in tokens.into_iter().enumerate() {
        match raw {
            RawToken::Symbol(c) if logic.is_letter(c) => {
                output.push(Token::Letter(Letter(c)));
            }
            RawToken::Symbol('(') => stack.push(StackItem::Open),
            RawToken::Symbol(')') => loop {
                match stack.pop() {
                    Some(StackItem::Open) => break,
                    Some(StackItem::Operator(op)) => output.push(Token::Operator(op)),
                    None => return Err(FormulaError::UnbalancedBrackets { position }),
                }
            },
            RawToken::Symbol(c) => {
                return Err(FormulaError::UnknownToken {
                    token: c.to_string(),
                })
            }
            RawToken::Operator(op) if op.arity == Arity::Nullary => {
                output.push(Token::Operator(op));
            }
            RawToken::Operator(op) => {
                while let Some(StackItem::Operator(top)) = stack.last() {
                    if top.precedence <= op.precedence {
                        break;
                    }
                    trace!(popped = %top.symbol, incoming = %op.symbol, "discharge operator");
                    if let Some(StackItem::Operator(top)) = stack.pop() {
                        output.push(Token::Operator(top));
                    }
                }
                stack.push(StackItem::Operator(op));
            }
        }
    }

    while let Some(item) = stack.pop() {
        match item {
            StackItem::Open => return Err(FormulaError::UnbalancedBrackets { position: total }),
            StackItem::Operator(op) => output.push(Token::Operator(op)),
        }
    }

    debug!(tokens = total, postfix = output.len(), "converted to postfix");
    Ok(output)
}
