//! Ties the parser, the transformations, the [`HistoryLog`], and the
//! [`Selection`] together into a single editing session.

use crate::{
    equation::Equation,
    expr::{Id, Side},
    history::{HistoryConfig, HistoryLog, HistoryStep},
    ops::{self, Operation, OperationError},
    parse::{self, ParseError, ParseOptions},
    selection::Selection,
};
use log::debug;

/// The description given to the first step after loading an equation.
pub const INITIAL_STEP: &str = "Initial equation";

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub parse: ParseOptions,
    pub history: HistoryConfig,
}

impl SessionConfig {
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    pub fn with_history(mut self, history: HistoryConfig) -> Self {
        self.history = history;
        self
    }
}

/// An equation being worked on, plus everything needed to undo and redo
/// changes to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    equation: Equation,
    history: HistoryLog,
    selection: Selection,
    config: SessionConfig,
}

impl Session {
    pub fn new(src: &str) -> Result<Self, ParseError> {
        Session::with_config(src, SessionConfig::default())
    }

    pub fn with_config(
        src: &str,
        config: SessionConfig,
    ) -> Result<Self, ParseError> {
        let equation = parse::parse_equation_with(src, config.parse)?;
        let mut history = HistoryLog::with_config(config.history);
        history.add_step(&equation, None, INITIAL_STEP);

        Ok(Session {
            equation,
            history,
            selection: Selection::new(),
            config,
        })
    }

    pub fn equation(&self) -> &Equation { &self.equation }

    pub fn history(&self) -> &HistoryLog { &self.history }

    /// The steps leading up to the current equation.
    pub fn steps(&self) -> &[HistoryStep] { self.history.history() }

    pub fn selection(&self) -> &Selection { &self.selection }

    pub fn selection_mut(&mut self) -> &mut Selection { &mut self.selection }

    pub fn config(&self) -> SessionConfig { self.config }

    /// Start again from a new equation, throwing away the old history. If
    /// the text can't be parsed nothing is changed.
    pub fn load(&mut self, src: &str) -> Result<&Equation, ParseError> {
        let equation = parse::parse_equation_with(src, self.config.parse)?;

        self.history.clear();
        self.history.add_step(&equation, None, INITIAL_STEP);
        self.selection.clear();
        self.equation = equation;

        Ok(&self.equation)
    }

    pub fn apply(
        &mut self,
        operation: Operation,
    ) -> Result<&Equation, OperationError> {
        let equation = ops::apply_operation_with(
            &self.equation,
            &operation,
            self.config.parse,
        )?;

        let description = operation.description();
        self.history.add_step(&equation, Some(operation), description);
        self.equation = equation;

        Ok(&self.equation)
    }

    /// Move terms across the `=`, deselecting them afterwards.
    pub fn move_terms(&mut self, ids: &[Id], from: Side, to: Side) -> &Equation {
        let description = ops::describe_move(&self.equation, ids, from, to);
        let equation = ops::move_terms(&self.equation, ids, from, to);

        self.history.add_step(&equation, None, description);
        self.selection.deselect(ids);
        self.equation = equation;

        &self.equation
    }

    /// Move whatever is selected on one side over to the other.
    pub fn move_selected(&mut self, from: Side) -> &Equation {
        let ids = self.selection.selected_on(self.equation.side(from));

        if ids.is_empty() {
            debug!("Nothing selected on the {} side", from);
            return &self.equation;
        }

        self.move_terms(&ids, from, from.opposite())
    }

    /// Go back a step, returning `false` if there was nowhere to go.
    pub fn undo(&mut self) -> bool {
        let restored = self.history.undo().map(|step| step.equation().clone());
        self.restore(restored)
    }

    /// Go forward a step, returning `false` if there was nowhere to go.
    pub fn redo(&mut self) -> bool {
        let restored = self.history.redo().map(|step| step.equation().clone());
        self.restore(restored)
    }

    fn restore(&mut self, equation: Option<Equation>) -> bool {
        match equation {
            Some(equation) => {
                self.equation = equation;
                self.selection.retain(&self.equation);
                true
            },
            None => false,
        }
    }
}
