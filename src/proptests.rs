//! Property-based tests over randomly generated expression trees.

use proptest::prelude::*;

use crate::expr::{Expr, Variable};
use crate::operators::{BinaryOp, UnaryOp};
use crate::postfix::parse_postfix;
use crate::prefix::parse_prefix;

fn variable() -> impl Strategy<Value = Variable> {
    prop::sample::select(Variable::ALL.to_vec())
}

fn constant() -> impl Strategy<Value = Box<Expr>> {
    (-1000i64..1000i64).prop_map(|n| Expr::constant(n as f64))
}

// Leaves are integer constants (the only literals the parsers produce) or variables.
fn leaf() -> impl Strategy<Value = Box<Expr>> {
    prop_oneof![constant(), variable().prop_map(Expr::var)]
}

fn tree_of<S>(leaves: S) -> impl Strategy<Value = Box<Expr>>
where
    S: Strategy<Value = Box<Expr>> + 'static,
{
    leaves.prop_recursive(5, 48, 2, |inner| {
        prop_oneof![
            (prop::sample::select(UnaryOp::ALL.to_vec()), inner.clone())
                .prop_map(|(op, arg)| Expr::unary(op, arg)),
            (
                prop::sample::select(BinaryOp::ALL.to_vec()),
                inner.clone(),
                inner
            )
                .prop_map(|(op, left, right)| Expr::binary(op, left, right)),
        ]
    })
}

fn expr() -> impl Strategy<Value = Box<Expr>> {
    tree_of(leaf())
}

fn point() -> impl Strategy<Value = (f64, f64, f64)> {
    (-10.0f64..10.0, -10.0f64..10.0, -10.0f64..10.0)
}

/// Equality that treats two NaNs as equal.
fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

proptest! {
    #[test]
    fn prefix_text_roundtrips(tree in expr()) {
        let text = tree.to_prefix_string();
        // A bare `x` only comes back when the text has no parentheses at all.
        let parsed = parse_prefix(&text).unwrap();
        prop_assert_eq!(parsed, *tree);
    }

    #[test]
    fn postfix_text_roundtrips(tree in expr()) {
        // Postfix text is unambiguous as long as no `-` operator is followed by a digit,
        // which the printer never produces because tokens are space separated.
        let parsed = parse_postfix(&tree.to_string()).unwrap();
        prop_assert_eq!(parsed, *tree);
    }

    #[test]
    fn evaluation_is_deterministic(tree in expr(), (x, y, z) in point()) {
        prop_assert!(same_value(tree.evaluate(x, y, z), tree.evaluate(x, y, z)));
        prop_assert!(same_value(tree.evaluate(x, y, z), tree.clone().evaluate_at([x, y, z])));
    }

    #[test]
    fn derivative_is_linear(a in expr(), b in expr(), v in variable()) {
        let sum = Expr::add(a.clone(), b.clone());
        prop_assert_eq!(
            sum.differentiate(v),
            Expr::add(a.differentiate(v), b.differentiate(v))
        );
    }

    #[test]
    fn derivative_of_constant_is_zero(k in -1000i64..1000i64, v in variable()) {
        prop_assert_eq!(*Expr::Const(k as f64).differentiate(v), Expr::Const(0.0));
    }

    #[test]
    fn derivative_does_not_mutate(tree in expr(), v in variable()) {
        let before = tree.clone();
        let _ = tree.differentiate(v);
        prop_assert_eq!(tree, before);
    }

    #[test]
    fn derivative_of_variable_free_tree_is_zero(tree in tree_of(constant()), (x, y, z) in point()) {
        // 0 * inf and 0 / 0 inside the unsimplified derivative give NaN
        let d = tree.differentiate(Variable::X).evaluate(x, y, z);
        prop_assert!(d == 0.0 || d.is_nan());
    }
}
