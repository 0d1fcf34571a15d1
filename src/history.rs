//! A bounded undo/redo log of [`Equation`] states.

use crate::{equation::Equation, ops::Operation};
use log::{debug, trace};

/// How many steps a [`HistoryLog`] keeps unless told otherwise.
pub const DEFAULT_CAPACITY: usize = 5;

/// A snapshot of the equation after some change.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStep {
    equation: Equation,
    operation: Option<Operation>,
    description: String,
}

impl HistoryStep {
    pub fn equation(&self) -> &Equation { &self.equation }

    /// The [`Operation`] which produced this step, if there was one.
    pub fn operation(&self) -> Option<&Operation> { self.operation.as_ref() }

    pub fn description(&self) -> &str { &self.description }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// The maximum number of steps to retain (at least 1).
    pub capacity: usize,
}

impl HistoryConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// An ordered list of [`HistoryStep`]s with a cursor pointing at the
/// current one.
///
/// Adding a step after undoing throws away everything that could have been
/// redone.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryLog {
    steps: Vec<HistoryStep>,
    /// `None` when the log is empty.
    cursor: Option<usize>,
    config: HistoryConfig,
}

impl HistoryLog {
    pub fn new() -> Self { HistoryLog::with_config(HistoryConfig::default()) }

    pub fn with_config(config: HistoryConfig) -> Self {
        let config = HistoryConfig {
            capacity: config.capacity.max(1),
        };

        HistoryLog {
            steps: Vec::with_capacity(config.capacity + 1),
            cursor: None,
            config,
        }
    }

    pub fn config(&self) -> HistoryConfig { self.config }

    /// Record a copy of `equation` as the newest step.
    pub fn add_step<S>(
        &mut self,
        equation: &Equation,
        operation: Option<Operation>,
        description: S,
    ) where
        S: Into<String>,
    {
        let keep = self.cursor.map_or(0, |cursor| cursor + 1);
        if keep < self.steps.len() {
            debug!("Discarding {} redo steps", self.steps.len() - keep);
            self.steps.truncate(keep);
        }

        let description = description.into();
        debug!("Recording \"{}\" ({})", equation, description);

        self.steps.push(HistoryStep {
            equation: equation.clone(),
            operation,
            description,
        });

        if self.steps.len() > self.config.capacity {
            let evicted = self.steps.remove(0);
            debug!("Evicted the oldest step, \"{}\"", evicted.description);

            // only a log whose cursor was already on the newest step can
            // overflow, so the cursor's index now names the step just added
            debug_assert_eq!(self.cursor, Some(self.steps.len() - 1));
        } else {
            self.cursor = Some(self.steps.len() - 1);
        }
    }

    pub fn can_undo(&self) -> bool { self.cursor.map_or(false, |c| c > 0) }

    pub fn can_redo(&self) -> bool {
        match self.cursor {
            Some(cursor) => cursor + 1 < self.steps.len(),
            None => false,
        }
    }

    /// Step back, returning the step which is now current.
    pub fn undo(&mut self) -> Option<&HistoryStep> {
        if !self.can_undo() {
            return None;
        }

        let cursor = self.cursor? - 1;
        trace!("Undo, cursor is now {}", cursor);
        self.cursor = Some(cursor);
        self.steps.get(cursor)
    }

    /// Step forward again, returning the step which is now current.
    pub fn redo(&mut self) -> Option<&HistoryStep> {
        if !self.can_redo() {
            return None;
        }

        let cursor = self.cursor? + 1;
        trace!("Redo, cursor is now {}", cursor);
        self.cursor = Some(cursor);
        self.steps.get(cursor)
    }

    pub fn current_step(&self) -> Option<&HistoryStep> {
        self.cursor.and_then(|cursor| self.steps.get(cursor))
    }

    /// Every step up to and including the current one.
    pub fn history(&self) -> &[HistoryStep] {
        let end = self
            .cursor
            .map_or(0, |cursor| (cursor + 1).min(self.steps.len()));
        &self.steps[..end]
    }

    pub fn cursor(&self) -> Option<usize> { self.cursor }

    /// The number of retained steps, including any that could be redone.
    pub fn len(&self) -> usize { self.steps.len() }

    pub fn is_empty(&self) -> bool { self.steps.is_empty() }

    pub fn clear(&mut self) {
        self.steps.clear();
        self.cursor = None;
    }
}

impl Default for HistoryLog {
    fn default() -> Self { HistoryLog::new() }
}
