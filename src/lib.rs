//! A symbolic engine for rearranging linear equations.
//!
//! Text like `2x + 3 = 7` is parsed into an [`Equation`], transformed by
//! [`ops::apply_operation()`] and [`ops::move_terms()`], and turned back
//! into text with [`std::fmt::Display`]. A [`HistoryLog`] keeps the last few
//! states around for undo and redo, and a [`Session`] wires everything
//! together.

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

mod equation;
mod expr;
pub mod history;
pub mod ops;
mod parse;
mod selection;
mod session;

pub use equation::Equation;
pub use expr::{EquationSide, Id, Item, Side, Term, TermGroup, Unsigned};
pub use history::{HistoryLog, HistoryStep};
pub use ops::{Operation, OperationError, OperationKind, Target};
pub use parse::{
    parse_equation, parse_equation_with, parse_term, ParseError, ParseOptions,
};
pub use selection::Selection;
pub use session::{Session, SessionConfig, INITIAL_STEP};
