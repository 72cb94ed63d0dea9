//! Lexical splitting of formula strings
//!
//! Whitespace is ignored.  A run starting with an operator-name bracket
//! (`[` or `⟨`) up to its closing bracket is one slice and must name a
//! catalog operator.  Everything else is split into single characters;
//! characters that are operator symbols become operators, the rest are
//! passed through untouched for the converter to classify.

use crate::error::{FormulaError, Result};
use crate::logic::{closing_bracket, Operator, OperatorTable};
use nom::{
    branch::alt,
    bytes::complete::{take_till, take_till1},
    character::complete::{char, satisfy},
    combinator::{all_consuming, fail, map, peek, recognize, rest},
    multi::many0,
    sequence::tuple,
    IResult,
};
use std::fmt;
use tracing::debug;

/// A token as produced by the tokenizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawToken {
    Operator(Operator),
    /// A single character: a letter candidate or a parenthesis
    Symbol(char),
}

impl fmt::Display for RawToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawToken::Operator(op) => write!(f, "{}", op.symbol),
            RawToken::Symbol(c) => write!(f, "{}", c),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slice<'a> {
    OperatorName(&'a str),
    Plain(&'a str),
}

fn is_opening_bracket(c: char) -> bool {
    closing_bracket(c).is_some()
}

/// A bracketed operator name.  An unclosed bracket swallows the rest of the
/// input so that the lookup reports it.
fn operator_name(input: &str) -> IResult<&str, &str> {
    let (_, open) = peek(satisfy(is_opening_bracket))(input)?;
    match closing_bracket(open) {
        Some(close) => alt((
            recognize(tuple((char(open), take_till(|c: char| c == close), char(close)))),
            rest,
        ))(input),
        None => fail(input),
    }
}

fn slices(input: &str) -> IResult<&str, Vec<Slice<'_>>> {
    many0(alt((
        map(operator_name, Slice::OperatorName),
        map(take_till1(is_opening_bracket), Slice::Plain),
    )))(input)
}

/// Split `expression` into operator tokens and single-character symbols
pub fn tokenize(expression: &str, operators: &OperatorTable) -> Result<Vec<RawToken>> {
    let stripped: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
    let (_, parts) = all_consuming(slices)(stripped.as_str())
        .map_err(|e| FormulaError::UnknownToken { token: e.to_string() })?;

    let mut tokens = Vec::with_capacity(stripped.len());
    for part in parts {
        match part {
            Slice::OperatorName(name) => {
                let op = operators.get(name).ok_or_else(|| FormulaError::Lookup {
                    symbol: name.to_string(),
                })?;
                tokens.push(RawToken::Operator(op.clone()));
            }
            Slice::Plain(run) => {
                tokens.extend(run.chars().map(|c| match operators.get_char(c) {
                    Some(op) => RawToken::Operator(op.clone()),
                    None => RawToken::Symbol(c),
                }));
            }
        }
    }
    debug!(count = tokens.len(), "tokenized expression");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::Logic;

    fn symbols(tokens: &[RawToken]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_tokenize_modal_expression() {
        let logic = Logic::modal();
        let tokens = tokenize("□c∧◊d", logic.operators()).unwrap();
        assert_eq!(symbols(&tokens), vec!["□", "c", "∧", "◊", "d"]);
        assert!(matches!(&tokens[0], RawToken::Operator(op) if op.modal));
        assert_eq!(tokens[1], RawToken::Symbol('c'));
    }

    #[test]
    fn test_whitespace_is_stripped() {
        let logic = Logic::propositional();
        let tokens = tokenize(" ( a ∧\tb ) ", logic.operators()).unwrap();
        assert_eq!(symbols(&tokens), vec!["(", "a", "∧", "b", ")"]);
    }

    #[test]
    fn test_bracketed_operator_is_one_token() {
        let logic = Logic::modal();
        let tokens = tokenize("[L]p∨⟨L⟩(q)", logic.operators()).unwrap();
        assert_eq!(symbols(&tokens), vec!["[L]", "p", "∨", "⟨L⟩", "(", "q", ")"]);
        assert!(matches!(&tokens[0], RawToken::Operator(op) if op.symbol == "[L]"));
    }

    #[test]
    fn test_unknown_bracketed_operator() {
        let logic = Logic::modal();
        let err = tokenize("[M]p", logic.operators()).unwrap_err();
        assert!(matches!(err, FormulaError::Lookup { symbol } if symbol == "[M]"));
    }

    #[test]
    fn test_unclosed_bracket_reports_lookup() {
        let logic = Logic::modal();
        let err = tokenize("p∧[Lq", logic.operators()).unwrap_err();
        assert!(matches!(err, FormulaError::Lookup { symbol } if symbol == "[Lq"));
    }

    #[test]
    fn test_unknown_characters_pass_through() {
        let logic = Logic::propositional();
        let tokens = tokenize("A∧?", logic.operators()).unwrap();
        assert_eq!(tokens[0], RawToken::Symbol('A'));
        assert_eq!(tokens[2], RawToken::Symbol('?'));
    }

    #[test]
    fn test_empty_expression() {
        let logic = Logic::propositional();
        assert!(tokenize("   ", logic.operators()).unwrap().is_empty());
    }
}
