//! A logic: an atom alphabet paired with an operator table

use super::operator::{Arity, Operator, OperatorTable, OPERATOR_BRACKETS};
use super::token::Letter;
use crate::error::{FormulaError, Result};
use indexmap::IndexSet;
use serde::Serialize;

/// Alphabet and operator set that bound which tokens may appear together
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Logic {
    pub name: String,
    alphabet: IndexSet<Letter>,
    operators: OperatorTable,
}

impl Logic {
    /// Create a logic, checking that letters and operator symbols cannot be
    /// confused by the tokenizer.
    pub fn new(
        name: &str,
        alphabet: impl IntoIterator<Item = Letter>,
        operators: OperatorTable,
    ) -> Result<Self> {
        let logic = Logic {
            name: name.to_string(),
            alphabet: alphabet.into_iter().collect(),
            operators,
        };
        logic.validate()?;
        Ok(logic)
    }

    fn validate(&self) -> Result<()> {
        for letter in &self.alphabet {
            let c = letter.symbol();
            let is_bracket = OPERATOR_BRACKETS
                .iter()
                .any(|(open, close)| *open == c || *close == c);
            if c == '(' || c == ')' || c.is_whitespace() || is_bracket {
                return Err(FormulaError::InvalidConfig(format!(
                    "letter '{}' is reserved",
                    c
                )));
            }
            if self.operators.get_char(c).is_some() {
                return Err(FormulaError::InvalidConfig(format!(
                    "letter '{}' collides with an operator symbol",
                    c
                )));
            }
        }
        for op in self.operators.iter() {
            let single_char = op.symbol.chars().count() == 1;
            if !single_char && !op.is_bracketed() {
                return Err(FormulaError::InvalidConfig(format!(
                    "operator '{}' must be a single character or a bracketed name",
                    op.symbol
                )));
            }
            if op.symbol.chars().any(char::is_whitespace) {
                return Err(FormulaError::InvalidConfig(format!(
                    "operator '{}' contains whitespace",
                    op.symbol
                )));
            }
            if op.symbol == "(" || op.symbol == ")" {
                return Err(FormulaError::InvalidConfig(
                    "parentheses cannot be operators".to_string(),
                ));
            }
            let mut chars = op.symbol.chars();
            let bracket_char = match (chars.next(), chars.next()) {
                (Some(c), None) => OPERATOR_BRACKETS
                    .iter()
                    .any(|(open, close)| *open == c || *close == c),
                _ => false,
            };
            if bracket_char {
                return Err(FormulaError::InvalidConfig(format!(
                    "operator bracket '{}' cannot be an operator on its own",
                    op.symbol
                )));
            }
        }
        self.validate_precedences()
    }

    /// Prefix operators are rendered without parentheses (`¬x`), so they must
    /// all bind at one level, strictly tighter than any binary operator, for
    /// renderings to parse back to the same tree.
    fn validate_precedences(&self) -> Result<()> {
        let mut unary = self.operators.iter().filter(|op| op.arity == Arity::Unary);
        let Some(first) = unary.next() else {
            return Ok(());
        };
        if let Some(op) = unary.find(|op| op.precedence != first.precedence) {
            return Err(FormulaError::InvalidConfig(format!(
                "unary operators '{}' ({}) and '{}' ({}) must share one precedence",
                first.symbol, first.precedence, op.symbol, op.precedence
            )));
        }
        if let Some(op) = self
            .operators
            .iter()
            .find(|op| op.arity == Arity::Binary && op.precedence >= first.precedence)
        {
            return Err(FormulaError::InvalidConfig(format!(
                "binary operator '{}' ({}) must bind looser than unary operators ({})",
                op.symbol, op.precedence, first.precedence
            )));
        }
        Ok(())
    }

    pub fn alphabet(&self) -> &IndexSet<Letter> {
        &self.alphabet
    }

    pub fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    pub fn is_letter(&self, c: char) -> bool {
        self.alphabet.contains(&Letter(c))
    }

    /// Classical propositional logic over `a..z` with `¬ ∧ ∨ → ↔ ⊤ ⊥`
    pub fn propositional() -> Self {
        Logic {
            name: "propositional".to_string(),
            alphabet: ('a'..='z').map(Letter).collect(),
            operators: propositional_operators().into_iter().collect(),
        }
    }

    /// Propositional logic extended with `□`, `◊` and the bracketed
    /// modalities `[L]` and `⟨L⟩`
    pub fn modal() -> Self {
        let mut operators = propositional_operators();
        operators.extend([
            Operator::unary("□", 5).modal(),
            Operator::unary("◊", 5).modal(),
            Operator::unary("[L]", 5).modal(),
            Operator::unary("⟨L⟩", 5).modal(),
        ]);
        Logic {
            name: "modal".to_string(),
            alphabet: ('a'..='z').map(Letter).collect(),
            operators: operators.into_iter().collect(),
        }
    }

    /// Operators usable as inner nodes by the random generator
    pub fn connectives(&self) -> Vec<Operator> {
        self.operators
            .iter()
            .filter(|op| op.arity != Arity::Nullary)
            .cloned()
            .collect()
    }
}

fn propositional_operators() -> Vec<Operator> {
    vec![
        Operator::nullary("⊤", 0),
        Operator::nullary("⊥", 0),
        Operator::unary("¬", 5),
        Operator::binary("∧", 4).commutative(),
        Operator::binary("∨", 3).commutative(),
        Operator::binary("→", 2),
        Operator::binary("↔", 1).commutative(),
    ]
}
