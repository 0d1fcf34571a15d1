use crate::{
    expr::{EquationSide, Id, Side},
    parse::{self, ParseError},
};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// Two [`EquationSide`]s joined by an `=`.
///
/// Nothing here checks that the two sides stay balanced, that is up to
/// whoever chooses which transformations to apply.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    pub id: Id,
    pub left: EquationSide,
    pub right: EquationSide,
}

impl Equation {
    pub fn new(left: EquationSide, right: EquationSide) -> Self {
        Equation {
            id: Id::fresh(),
            left,
            right,
        }
    }

    pub fn side(&self, side: Side) -> &EquationSide {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut EquationSide {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Which side (if any) holds the item with this [`Id`]?
    pub fn locate(&self, id: Id) -> Option<Side> {
        if self.left.contains(id) {
            Some(Side::Left)
        } else if self.right.contains(id) {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// Are both equations made of the same terms in the same order,
    /// ignoring identifiers?
    pub fn same_value(&self, other: &Equation) -> bool {
        self.left.same_value(&other.left) && self.right.same_value(&other.right)
    }
}

impl Display for Equation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.left, self.right)
    }
}

impl FromStr for Equation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { parse::parse_equation(s) }
}
