//! Transformations which turn one [`Equation`] into another.
//!
//! Every function here borrows its input and hands back a brand new
//! [`Equation`], leaving the original untouched.

use crate::{
    equation::Equation,
    expr::{Id, Item, Side, Term},
    parse::{ParseError, ParseOptions, Parser},
};
use arrayvec::ArrayVec;
use log::{debug, warn};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// The arithmetic an [`Operation`] performs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl OperationKind {
    pub fn symbol(self) -> &'static str {
        match self {
            OperationKind::Add => "+",
            OperationKind::Subtract => "-",
            OperationKind::Multiply => "×",
            OperationKind::Divide => "÷",
        }
    }
}

impl FromStr for OperationKind {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" | "+" => Ok(OperationKind::Add),
            "subtract" | "sub" | "-" => Ok(OperationKind::Subtract),
            "multiply" | "mul" | "*" | "×" => Ok(OperationKind::Multiply),
            "divide" | "div" | "/" | "÷" => Ok(OperationKind::Divide),
            other => Err(OperationError::Unrecognised {
                text: other.to_string(),
            }),
        }
    }
}

/// Which side(s) of the equation an [`Operation`] is applied to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Both,
    Left,
    Right,
}

impl Target {
    pub fn sides(self) -> ArrayVec<[Side; 2]> {
        let mut sides = ArrayVec::new();

        match self {
            Target::Both => {
                sides.push(Side::Left);
                sides.push(Side::Right);
            },
            Target::Left => sides.push(Side::Left),
            Target::Right => sides.push(Side::Right),
        }

        sides
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Target::Both => write!(f, "both sides"),
            Target::Left => write!(f, "left side"),
            Target::Right => write!(f, "right side"),
        }
    }
}

impl FromStr for Target {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "both" => Ok(Target::Both),
            "left" => Ok(Target::Left),
            "right" => Ok(Target::Right),
            other => Err(OperationError::Unrecognised {
                text: other.to_string(),
            }),
        }
    }
}

/// A request to add, subtract, multiply, or divide one or both sides by a
/// term.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub kind: OperationKind,
    /// The operand as text (e.g. `"5"` or `"2y"`).
    pub value: String,
    pub target: Target,
}

impl Operation {
    pub fn new<S: Into<String>>(
        kind: OperationKind,
        value: S,
        target: Target,
    ) -> Self {
        Operation {
            kind,
            value: value.into(),
            target,
        }
    }

    /// A short human readable summary, e.g. `"÷ 2 both sides"`.
    pub fn description(&self) -> String { self.to_string() }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.kind.symbol(), self.value, self.target)
    }
}

/// Things that can go wrong while transforming an [`Equation`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OperationError {
    #[error("cannot divide by zero")]
    DivisionByZero,
    #[error("\"{operation}\" makes a coefficient too large to represent")]
    Overflow { operation: String },
    #[error("invalid operand: {0}")]
    InvalidOperand(#[from] ParseError),
    #[error("\"{text}\" isn't a recognised operation or side")]
    Unrecognised { text: String },
}

/// Apply an [`Operation`] to a copy of the [`Equation`], interpreting the
/// operand leniently.
pub fn apply_operation(
    equation: &Equation,
    operation: &Operation,
) -> Result<Equation, OperationError> {
    apply_operation_with(equation, operation, ParseOptions::default())
}

pub fn apply_operation_with(
    equation: &Equation,
    operation: &Operation,
    options: ParseOptions,
) -> Result<Equation, OperationError> {
    let parser = Parser::new(options);
    let mut transformed = equation.clone();

    for side in operation.target.sides() {
        // each side gets its own copy of the operand so ids stay unique
        let operand = parser.term(&operation.value)?;
        let items = transformed.side_mut(side);

        match operation.kind {
            OperationKind::Add => items.push(operand),
            OperationKind::Subtract => items.push(operand.negated()),
            OperationKind::Multiply => {
                ignore_variable(&operand, operation);
                let factor = operand.coefficient;
                items.map_coefficients(|c| c * factor);
            },
            OperationKind::Divide => {
                ignore_variable(&operand, operation);
                let divisor = operand.coefficient;
                if divisor == 0.0 {
                    return Err(OperationError::DivisionByZero);
                }
                items.map_coefficients(|c| c / divisor);
            },
        }

        if items.terms().any(|term| !term.coefficient.is_finite()) {
            return Err(OperationError::Overflow {
                operation: operation.to_string(),
            });
        }
    }

    debug!(
        "Applied \"{}\" to \"{}\" => \"{}\"",
        operation, equation, transformed
    );

    Ok(transformed)
}

fn ignore_variable(operand: &Term, operation: &Operation) {
    if let Some(name) = &operand.variable {
        warn!(
            "Only the coefficient of \"{}\" is used by \"{}\", ignoring \"{}\"",
            operation.value, operation, name
        );
    }
}

/// Move the terms with the given [`Id`]s from one side of the equation to
/// the other, flipping their signs on the way.
///
/// Only loose terms can be moved. Groups, terms inside groups, and ids which
/// aren't on the `from` side are left where they are.
pub fn move_terms(
    equation: &Equation,
    ids: &[Id],
    from: Side,
    to: Side,
) -> Equation {
    let mut transformed = equation.clone();

    let (moving, staying): (Vec<Item>, Vec<Item>) = transformed
        .side_mut(from)
        .items
        .drain(..)
        .partition(|item| is_movable(item, ids));
    transformed.side_mut(from).items = staying;

    if moving.len() < ids.len() {
        warn!(
            "Only {} of the {} requested terms are on the {} side of \"{}\"",
            moving.len(),
            ids.len(),
            from,
            equation
        );
    }

    let destination = transformed.side_mut(to);
    for item in moving {
        if let Item::Term(term) = item {
            destination.push(term.negated());
        }
    }

    transformed
}

fn is_movable(item: &Item, ids: &[Id]) -> bool {
    match item {
        Item::Term(term) => ids.contains(&term.id),
        Item::Group(_) => false,
    }
}

/// Describe a call to [`move_terms()`] using the equation from before the
/// move, e.g. `"Moved 2x, 3 from left to right"`.
pub fn describe_move(
    equation: &Equation,
    ids: &[Id],
    from: Side,
    to: Side,
) -> String {
    let labels: Vec<String> = equation
        .side(from)
        .items
        .iter()
        .filter(|item| is_movable(item, ids))
        .filter_map(Item::as_term)
        .map(|term| term.unsigned().to_string())
        .collect();

    format!("Moved {} from {} to {}", labels.join(", "), from, to)
}
