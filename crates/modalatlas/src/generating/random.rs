//! Random formula generation under structural constraints
//!
//! A postfix token stream is grown top-down: each branch either ends with a
//! random atom (at height zero, or early with probability `pruning_factor`)
//! or draws an operator and recurses once per operand.  Once a branch has
//! used up its modal budget only non-modal operators are drawn.  The stream
//! is then handed to the tree builder.

use crate::config::GeneratorConfig;
use crate::error::{FormulaError, Result};
use crate::logic::{Arity, Letter, Logic, Operator, Token};
use crate::tree::{build, Formula};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Where the generator's randomness comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RngSource {
    /// Deterministic stream for reproducible fixtures
    Seed(u64),
    /// Seeded from the operating system
    Entropy,
}

impl RngSource {
    pub fn into_rng(self) -> ChaCha8Rng {
        match self {
            RngSource::Seed(seed) => ChaCha8Rng::seed_from_u64(seed),
            RngSource::Entropy => ChaCha8Rng::from_entropy(),
        }
    }
}

struct Pools<'a> {
    atoms: &'a [Letter],
    connectives: Vec<&'a Operator>,
    non_modal: Vec<&'a Operator>,
    pruning_factor: f64,
}

impl<'a> Pools<'a> {
    fn new(atoms: &'a [Letter], operators: &'a [Operator], pruning_factor: f64) -> Self {
        // Nullary operators would end a branch early, so they never become
        // inner nodes.
        let connectives: Vec<&Operator> = operators
            .iter()
            .filter(|op| op.arity != Arity::Nullary)
            .collect();
        let non_modal = connectives.iter().copied().filter(|op| !op.modal).collect();
        Pools {
            atoms,
            connectives,
            non_modal,
            pruning_factor,
        }
    }

    fn emit<R: Rng + ?Sized>(
        &self,
        height: usize,
        modal_budget: usize,
        rng: &mut R,
        out: &mut Vec<Token>,
    ) -> Result<()> {
        if height == 0 || rng.gen::<f64>() < self.pruning_factor {
            let atom = self
                .atoms
                .choose(rng)
                .ok_or_else(|| FormulaError::Sampling("atom pool is empty".to_string()))?;
            out.push(Token::Letter(*atom));
            return Ok(());
        }

        let pool = if modal_budget == 0 {
            &self.non_modal
        } else {
            &self.connectives
        };
        let op = *pool.choose(rng).ok_or_else(|| {
            FormulaError::Sampling(if modal_budget == 0 {
                "no non-modal operator to draw".to_string()
            } else {
                "operator pool is empty".to_string()
            })
        })?;

        let budget = if op.modal { modal_budget - 1 } else { modal_budget };
        for _ in 0..op.arity.operands() {
            self.emit(height - 1, budget, rng, out)?;
        }
        out.push(Token::Operator(op.clone()));
        Ok(())
    }
}

/// Generate a random formula from the given atom and operator pools
pub fn generate<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    atoms: &[Letter],
    operators: &[Operator],
    rng: &mut R,
) -> Result<Formula> {
    config.validate()?;
    let pools = Pools::new(atoms, operators, config.pruning_factor);
    let mut postfix = Vec::new();
    pools.emit(config.height, config.max_modal_depth, rng, &mut postfix)?;
    debug!(
        height = config.height,
        max_modal_depth = config.max_modal_depth,
        tokens = postfix.len(),
        "generated postfix stream"
    );
    build(postfix)
}

/// Generate with a fresh `ChaCha8Rng` seeded from `seed`
pub fn generate_seeded(
    config: &GeneratorConfig,
    atoms: &[Letter],
    operators: &[Operator],
    seed: u64,
) -> Result<Formula> {
    let mut rng = RngSource::Seed(seed).into_rng();
    generate(config, atoms, operators, &mut rng)
}

/// Generate with a thread-local generator created for this call
pub fn generate_default(
    config: &GeneratorConfig,
    atoms: &[Letter],
    operators: &[Operator],
) -> Result<Formula> {
    let mut rng = rand::thread_rng();
    generate(config, atoms, operators, &mut rng)
}

/// Generate over a logic's whole alphabet and connectives
pub fn generate_for_logic<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    logic: &Logic,
    rng: &mut R,
) -> Result<Formula> {
    let atoms: Vec<Letter> = logic.alphabet().iter().copied().collect();
    generate(config, &atoms, &logic.connectives(), rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atoms() -> Vec<Letter> {
        "pqr".chars().map(Letter).collect()
    }

    #[test]
    fn test_exact_height_without_pruning() {
        let operators = Logic::modal().connectives();
        for height in 0..6 {
            let config = GeneratorConfig::new(height, 2, 0.0);
            for seed in 0..20 {
                let formula = generate_seeded(&config, &atoms(), &operators, seed).unwrap();
                assert_eq!(formula.height(), height);
            }
        }
    }

    #[test]
    fn test_modal_depth_bounded() {
        let operators = Logic::modal().connectives();
        for max_modal_depth in 0..3 {
            let config = GeneratorConfig::new(6, max_modal_depth, 0.2);
            for seed in 0..50 {
                let formula = generate_seeded(&config, &atoms(), &operators, seed).unwrap();
                assert!(formula.modal_depth() <= max_modal_depth);
            }
        }
    }

    #[test]
    fn test_same_seed_same_tree() {
        let operators = Logic::modal().connectives();
        let config = GeneratorConfig::new(5, 2, 0.3);
        let a = generate_seeded(&config, &atoms(), &operators, 42).unwrap();
        let b = generate_seeded(&config, &atoms(), &operators, 42).unwrap();
        assert!(a.structurally_eq(&b));
        assert_eq!(a.render(), b.render());
    }

    #[test]
    fn test_full_pruning_yields_single_atom() {
        let operators = Logic::modal().connectives();
        let config = GeneratorConfig::new(4, 2, 1.0);
        let formula = generate_seeded(&config, &atoms(), &operators, 7).unwrap();
        assert_eq!(formula.height(), 0);
        assert_eq!(formula.size(), 1);
    }

    #[test]
    fn test_empty_atom_pool() {
        let operators = Logic::modal().connectives();
        let config = GeneratorConfig::new(2, 1, 0.0);
        let err = generate_seeded(&config, &[], &operators, 1).unwrap_err();
        assert!(matches!(err, FormulaError::Sampling(_)));
    }

    #[test]
    fn test_empty_operator_pool() {
        let config = GeneratorConfig::new(2, 1, 0.0);
        let err = generate_seeded(&config, &atoms(), &[], 1).unwrap_err();
        assert!(matches!(err, FormulaError::Sampling(_)));
    }

    #[test]
    fn test_only_modal_operators_with_zero_budget() {
        let operators = vec![Operator::unary("□", 5).modal()];
        let config = GeneratorConfig::new(1, 0, 0.0);
        let err = generate_seeded(&config, &atoms(), &operators, 1).unwrap_err();
        assert!(matches!(err, FormulaError::Sampling(_)));
    }

    #[test]
    fn test_modal_only_pool_fills_budget_exactly() {
        let operators = vec![Operator::unary("□", 5).modal()];
        let config = GeneratorConfig::new(3, 3, 0.0);
        let formula = generate_seeded(&config, &atoms(), &operators, 3).unwrap();
        assert_eq!(formula.modal_depth(), 3);
        assert!(formula.render().starts_with("□□□"));
    }

    #[test]
    fn test_generate_for_logic_uses_alphabet() {
        let logic = Logic::propositional();
        let mut rng = RngSource::Seed(9).into_rng();
        let config = GeneratorConfig::new(3, 0, 0.0);
        let formula = generate_for_logic(&config, &logic, &mut rng).unwrap();
        assert_eq!(formula.height(), 3);
        assert!(formula.letters().iter().all(|l| logic.alphabet().contains(l)));
    }

    #[test]
    fn test_generated_formula_reparses() {
        let logic = Logic::modal();
        let mut rng = RngSource::Seed(11).into_rng();
        let config = GeneratorConfig::new(4, 2, 0.1);
        let formula = generate_for_logic(&config, &logic, &mut rng).unwrap();
        let reparsed = crate::parser::parse(&formula.render(), &logic).unwrap();
        assert!(formula.structurally_eq(&reparsed));
    }
}
