//! JSON serialization types for formula trees

use crate::error::{FormulaError, Result};
use crate::logic::{Arity, Letter, Logic, Token};
use crate::tree::{Formula, FormulaBuilder, NodeRef};
use serde::{Deserialize, Serialize};

/// JSON representation of a formula tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FormulaJson {
    Letter {
        name: char,
    },
    Constant {
        symbol: String,
    },
    Unary {
        symbol: String,
        operand: Box<FormulaJson>,
    },
    Binary {
        symbol: String,
        left: Box<FormulaJson>,
        right: Box<FormulaJson>,
    },
}

impl FormulaJson {
    pub fn from_formula(formula: &Formula) -> Self {
        FormulaJson::from_node(formula.root())
    }

    pub fn from_node(node: NodeRef<'_>) -> Self {
        let symbol = node.token().to_string();
        match (node.left(), node.right()) {
            (Some(left), Some(right)) => FormulaJson::Binary {
                symbol,
                left: Box::new(FormulaJson::from_node(left)),
                right: Box::new(FormulaJson::from_node(right)),
            },
            (None, Some(child)) | (Some(child), None) => FormulaJson::Unary {
                symbol,
                operand: Box::new(FormulaJson::from_node(child)),
            },
            (None, None) => match node.token() {
                Token::Letter(letter) => FormulaJson::Letter {
                    name: letter.symbol(),
                },
                Token::Operator(_) => FormulaJson::Constant { symbol },
            },
        }
    }

    /// Rebuild a formula, resolving every symbol against `logic`
    pub fn to_formula(&self, logic: &Logic) -> Result<Formula> {
        let mut builder = FormulaBuilder::new();
        self.push_postfix(logic, &mut builder)?;
        builder.finish()
    }

    fn push_postfix(&self, logic: &Logic, builder: &mut FormulaBuilder) -> Result<()> {
        let (symbol, arity) = match self {
            FormulaJson::Letter { name } => {
                if !logic.is_letter(*name) {
                    return Err(FormulaError::UnknownToken {
                        token: name.to_string(),
                    });
                }
                return builder.push(Token::Letter(Letter(*name)));
            }
            FormulaJson::Constant { symbol } => (symbol, Arity::Nullary),
            FormulaJson::Unary { symbol, operand } => {
                operand.push_postfix(logic, builder)?;
                (symbol, Arity::Unary)
            }
            FormulaJson::Binary {
                symbol,
                left,
                right,
            } => {
                left.push_postfix(logic, builder)?;
                right.push_postfix(logic, builder)?;
                (symbol, Arity::Binary)
            }
        };
        let op = logic
            .operators()
            .get(symbol)
            .ok_or_else(|| FormulaError::Lookup {
                symbol: symbol.clone(),
            })?;
        if op.arity != arity {
            return Err(FormulaError::UnknownToken {
                token: format!("{} used with {} operand(s)", symbol, arity.operands()),
            });
        }
        builder.push(Token::Operator(op.clone()))
    }
}

impl Formula {
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(FormulaJson::from_formula(self))?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&FormulaJson::from_formula(self))?)
    }

    pub fn from_json(input: &str, logic: &Logic) -> Result<Formula> {
        let json: FormulaJson = serde_json::from_str(input)?;
        json.to_formula(logic)
    }
}
