//! Presentation state (which items are selected, which groups are
//! collapsed), kept out of the [`Equation`] itself and keyed by [`Id`].

use crate::{
    equation::Equation,
    expr::{EquationSide, Id, Item},
};
use std::collections::HashSet;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Selection {
    selected: HashSet<Id>,
    /// Groups are expanded unless they appear here.
    collapsed: HashSet<Id>,
}

impl Selection {
    pub fn new() -> Self { Selection::default() }

    pub fn is_selected(&self, id: Id) -> bool { self.selected.contains(&id) }

    /// Flip the selection state of an item. Unless `multi` is set, anything
    /// else that was selected gets deselected first.
    pub fn toggle(&mut self, id: Id, multi: bool) {
        let was_selected = self.selected.contains(&id);

        if !multi {
            self.selected.clear();
        }

        if was_selected {
            self.selected.remove(&id);
        } else {
            self.selected.insert(id);
        }
    }

    pub fn select(&mut self, id: Id) { self.selected.insert(id); }

    pub fn deselect<'a, I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = &'a Id>,
    {
        for id in ids {
            self.selected.remove(id);
        }
    }

    /// The selected loose terms on a side, in the order they appear.
    pub fn selected_on(&self, side: &EquationSide) -> Vec<Id> {
        side.items
            .iter()
            .filter_map(Item::as_term)
            .map(|term| term.id)
            .filter(|id| self.is_selected(*id))
            .collect()
    }

    pub fn is_expanded(&self, group: Id) -> bool {
        !self.collapsed.contains(&group)
    }

    pub fn toggle_expanded(&mut self, group: Id) {
        if !self.collapsed.remove(&group) {
            self.collapsed.insert(group);
        }
    }

    /// Forget about anything which is no longer part of the equation.
    pub fn retain(&mut self, equation: &Equation) {
        let present = |id: &Id| equation.locate(*id).is_some();
        self.selected.retain(present);
        self.collapsed.retain(present);
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.collapsed.clear();
    }
}
