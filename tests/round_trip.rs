//! Property-based tests for printing and re-parsing equations.
//!
//! Whatever the input looks like, printing a parsed equation and parsing
//! the result again should give back the same terms in the same order.

use balance::{parse_equation, Equation, Item};
use proptest::prelude::*;

/// An unsigned number, possibly with a fractional part
fn number_strategy() -> impl Strategy<Value = String> {
    prop_oneof!["[0-9]{1,3}", "[0-9]{1,2}\\.[0-9]{1,2}", "[0-9]\\."]
}

/// An unsigned term: a constant, a variable, or a coefficient and variable
fn term_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        number_strategy(),
        "[a-z]{1,3}",
        (number_strategy(), "[a-z]{1,3}").prop_map(|(n, v)| format!("{}{}", n, v)),
    ]
}

fn sign_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(" + "), Just(" - "), Just("+"), Just("-")]
}

/// A parenthesised group, optionally negated
fn group_strategy() -> impl Strategy<Value = String> {
    (
        term_strategy(),
        prop::collection::vec((sign_strategy(), term_strategy()), 0..3),
    )
        .prop_map(|(first, rest)| {
            let inner: String = rest
                .into_iter()
                .map(|(sign, term)| format!("{}{}", sign, term))
                .collect();
            format!("({}{})", first, inner)
        })
}

fn item_strategy() -> impl Strategy<Value = String> {
    prop_oneof![4 => term_strategy(), 1 => group_strategy()]
}

fn side_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just(""), Just("-"), Just("+")],
        item_strategy(),
        prop::collection::vec((sign_strategy(), item_strategy()), 0..4),
    )
        .prop_map(|(leading, first, rest)| {
            let tail: String = rest
                .into_iter()
                .map(|(sign, item)| format!("{}{}", sign, item))
                .collect();
            format!("{}{}{}", leading, first, tail)
        })
}

fn equation_strategy() -> impl Strategy<Value = String> {
    (side_strategy(), side_strategy())
        .prop_map(|(left, right)| format!("{} = {}", left, right))
}

fn shape(equation: &Equation) -> Vec<Vec<(f64, Option<String>, bool)>> {
    vec![&equation.left, &equation.right]
        .into_iter()
        .map(|side| {
            side.terms()
                .map(|t| {
                    (
                        t.coefficient,
                        t.variable.as_ref().map(|v| v.to_string()),
                        t.is_constant(),
                    )
                })
                .collect()
        })
        .collect()
}

fn groups(equation: &Equation) -> Vec<bool> {
    equation
        .left
        .items
        .iter()
        .chain(&equation.right.items)
        .map(|item| matches!(item, Item::Group(_)))
        .collect()
}

proptest! {
    #[test]
    fn printing_then_parsing_keeps_the_terms(src in equation_strategy()) {
        let first = parse_equation(&src).unwrap();
        let printed = first.to_string();
        let second = parse_equation(&printed).unwrap();

        prop_assert!(first.same_value(&second), "{} => {}", src, printed);
        prop_assert_eq!(shape(&first), shape(&second));
        prop_assert_eq!(groups(&first), groups(&second));
    }

    #[test]
    fn printing_is_stable(src in equation_strategy()) {
        let printed = parse_equation(&src).unwrap().to_string();
        let reprinted = parse_equation(&printed).unwrap().to_string();

        prop_assert_eq!(printed, reprinted);
    }

    #[test]
    fn sides_are_never_empty(left in side_strategy()) {
        let equation = parse_equation(&format!("{} =", left)).unwrap();

        prop_assert!(!equation.left.is_empty());
        prop_assert_eq!(equation.right.to_string(), "0");
    }
}
