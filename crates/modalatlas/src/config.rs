//! Configuration types: declarative logics and random generation settings.

use crate::error::{FormulaError, Result};
use crate::logic::{Letter, Logic, Operator, OperatorTable};
use serde::{Deserialize, Serialize};

/// Settings for the random formula generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Height of the generated tree when no branch is pruned
    pub height: usize,
    /// Longest allowed chain of modal operators along any branch
    pub max_modal_depth: usize,
    /// Probability in [0, 1] of ending a branch early with an atom
    pub pruning_factor: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            height: 3,
            max_modal_depth: 2,
            pruning_factor: 0.0,
        }
    }
}

impl GeneratorConfig {
    pub fn new(height: usize, max_modal_depth: usize, pruning_factor: f64) -> Self {
        GeneratorConfig {
            height,
            max_modal_depth,
            pruning_factor,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.pruning_factor) {
            return Err(FormulaError::InvalidConfig(format!(
                "pruning factor {} is outside [0, 1]",
                self.pruning_factor
            )));
        }
        Ok(())
    }
}

/// Declarative description of a logic, e.g. loaded from JSON:
///
/// ```json
/// {
///   "name": "k",
///   "alphabet": "pqr",
///   "operators": [
///     { "symbol": "¬", "precedence": 5, "arity": "unary" },
///     { "symbol": "∧", "precedence": 4, "arity": "binary", "commutative": true },
///     { "symbol": "□", "precedence": 5, "arity": "unary", "modal": true }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicConfig {
    pub name: String,
    /// Every character of this string is one letter
    pub alphabet: String,
    pub operators: Vec<Operator>,
}

impl LogicConfig {
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build and validate the logic described by this configuration
    pub fn to_logic(&self) -> Result<Logic> {
        let mut table = OperatorTable::new();
        for op in &self.operators {
            table.insert(op.clone())?;
        }
        Logic::new(&self.name, self.alphabet.chars().map(Letter), table)
    }
}

impl From<&Logic> for LogicConfig {
    fn from(logic: &Logic) -> Self {
        LogicConfig {
            name: logic.name.clone(),
            alphabet: logic.alphabet().iter().map(|l| l.symbol()).collect(),
            operators: logic.operators().iter().cloned().collect(),
        }
    }
}
