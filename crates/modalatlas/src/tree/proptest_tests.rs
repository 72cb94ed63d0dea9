//! Property-based tests for tree construction, queries and normalization.

use proptest::prelude::*;
use crate::config::GeneratorConfig;
use crate::generating::generate_seeded;
use crate::logic::{Letter, Logic, Token};
use crate::parser::parse;
use super::{build, Formula};

const UNARY: [&str; 4] = ["¬", "□", "◊", "[L]"];
const BINARY: [&str; 4] = ["∧", "∨", "→", "↔"];
const LETTERS: [char; 4] = ['p', 'q', 'r', 's'];

/// Formula description before operators are resolved
#[derive(Debug, Clone)]
enum FormulaDesc {
    Letter(u8),
    Unary(u8, Box<FormulaDesc>),
    Binary(u8, Box<FormulaDesc>, Box<FormulaDesc>),
}

fn arb_formula_desc(max_depth: u32) -> BoxedStrategy<FormulaDesc> {
    if max_depth == 0 {
        (0..4u8).prop_map(FormulaDesc::Letter).boxed()
    } else {
        prop_oneof![
            2 => (0..4u8).prop_map(FormulaDesc::Letter),
            2 => (0..4u8, arb_formula_desc(max_depth - 1))
                .prop_map(|(op, f)| FormulaDesc::Unary(op, Box::new(f))),
            3 => (0..4u8, arb_formula_desc(max_depth - 1), arb_formula_desc(max_depth - 1))
                .prop_map(|(op, l, r)| FormulaDesc::Binary(op, Box::new(l), Box::new(r))),
        ].boxed()
    }
}

fn push_postfix(desc: &FormulaDesc, logic: &Logic, out: &mut Vec<Token>) {
    let symbol = match desc {
        FormulaDesc::Letter(i) => {
            out.push(Token::Letter(Letter(LETTERS[*i as usize])));
            return;
        }
        FormulaDesc::Unary(op, f) => {
            push_postfix(f, logic, out);
            UNARY[*op as usize]
        }
        FormulaDesc::Binary(op, l, r) => {
            push_postfix(l, logic, out);
            push_postfix(r, logic, out);
            BINARY[*op as usize]
        }
    };
    let op = logic.operators().get(symbol).expect("symbol is in the modal logic");
    out.push(Token::Operator(op.clone()));
}

fn arb_formula(max_depth: u32) -> impl Strategy<Value = Formula> {
    arb_formula_desc(max_depth).prop_map(|desc| {
        let logic = Logic::modal();
        let mut postfix = Vec::new();
        push_postfix(&desc, &logic, &mut postfix);
        build(postfix).expect("well-formed postfix")
    })
}

proptest! {
    /// Cached size equals one plus the children's sizes at every node
    #[test]
    fn size_is_consistent(formula in arb_formula(5)) {
        for node in formula.subformulas(false) {
            let left = node.left().map_or(0, |n| n.size());
            let right = node.right().map_or(0, |n| n.size());
            prop_assert_eq!(node.size(), 1 + left + right);
        }
    }

    /// Height never exceeds size - 1
    #[test]
    fn height_bounded_by_size(formula in arb_formula(5)) {
        for node in formula.subformulas(false) {
            prop_assert!(node.height() + 1 <= node.size());
        }
    }

    /// Builder renderings agree with the structural renderer
    #[test]
    fn cached_rendering_matches_render(formula in arb_formula(5)) {
        for node in formula.subformulas(false) {
            prop_assert_eq!(node.rendered(), node.render());
        }
    }

    /// Rendered strings parse back to the same tree
    #[test]
    fn render_parse_roundtrip(formula in arb_formula(5)) {
        let logic = Logic::modal();
        let reparsed = parse(&formula.render(), &logic).unwrap();
        prop_assert!(formula.structurally_eq(&reparsed), "{} reparsed as {}", formula, reparsed);
    }

    /// Postfix export rebuilds the same tree
    #[test]
    fn postfix_roundtrip(formula in arb_formula(5)) {
        let rebuilt = build(formula.postfix()).unwrap();
        prop_assert!(formula.structurally_eq(&rebuilt));
    }

    /// normalize(normalize(f)) == normalize(f)
    #[test]
    fn normalize_idempotent(formula in arb_formula(5)) {
        let mut once = formula.clone();
        once.normalize();
        let mut twice = once.clone();
        twice.normalize();
        prop_assert!(once.structurally_eq(&twice));
    }

    /// Normalization only reorders: size, height and modal depth are kept
    #[test]
    fn normalize_preserves_shape_measures(formula in arb_formula(5)) {
        let mut normalized = formula.clone();
        normalized.normalize();
        prop_assert_eq!(normalized.recompute_sizes(), formula.size());
        prop_assert_eq!(normalized.height(), formula.height());
        prop_assert_eq!(normalized.modal_depth(), formula.modal_depth());
    }

    /// Unpruned generation hits the target height and respects the modal bound
    #[test]
    fn generator_respects_constraints(seed in any::<u64>(), height in 0usize..7, max_modal_depth in 0usize..4) {
        let logic = Logic::modal();
        let atoms: Vec<Letter> = LETTERS.iter().copied().map(Letter).collect();
        let config = GeneratorConfig::new(height, max_modal_depth, 0.0);
        let formula = generate_seeded(&config, &atoms, &logic.connectives(), seed).unwrap();
        prop_assert_eq!(formula.height(), height);
        prop_assert!(formula.modal_depth() <= max_modal_depth);
    }

    /// Pruned generation never exceeds the target height
    #[test]
    fn pruned_generation_bounded(seed in any::<u64>(), pruning in 0.0f64..=1.0) {
        let logic = Logic::modal();
        let atoms: Vec<Letter> = LETTERS.iter().copied().map(Letter).collect();
        let config = GeneratorConfig::new(5, 2, pruning);
        let formula = generate_seeded(&config, &atoms, &logic.connectives(), seed).unwrap();
        prop_assert!(formula.height() <= 5);
        prop_assert!(formula.modal_depth() <= 2);
    }
}
