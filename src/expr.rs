use smol_str::SmolStr;
use std::{
    fmt::{self, Display, Formatter},
    iter::FromIterator,
    sync::atomic::{AtomicU64, Ordering},
};

/// An opaque identifier attached to equations, terms, and groups.
///
/// Identifiers survive cloning, so a term keeps its identity while it is
/// moved around an equation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(u64);

impl Id {
    /// Get an identifier that hasn't been handed out before.
    pub fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Id(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A signed constant (`-3`) or a coefficient-variable pair (`2x`).
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub id: Id,
    pub coefficient: f64,
    /// The variable's name, or `None` for a constant.
    pub variable: Option<SmolStr>,
}

impl Term {
    pub fn constant(value: f64) -> Self {
        Term {
            id: Id::fresh(),
            coefficient: value,
            variable: None,
        }
    }

    pub fn variable<S>(coefficient: f64, name: S) -> Self
    where
        S: Into<SmolStr>,
    {
        Term {
            id: Id::fresh(),
            coefficient,
            variable: Some(name.into()),
        }
    }

    pub fn is_constant(&self) -> bool { self.variable.is_none() }

    /// The same term (identifier included) with its sign flipped.
    pub fn negated(&self) -> Term {
        Term {
            coefficient: -self.coefficient,
            ..self.clone()
        }
    }

    /// Do the two terms have the same coefficient and variable, ignoring
    /// their identifiers?
    pub fn same_value(&self, other: &Term) -> bool {
        self.coefficient == other.coefficient && self.variable == other.variable
    }

    /// Render the term without its sign (e.g. `-2x` renders as `2x`).
    pub fn unsigned(&self) -> Unsigned<'_> { Unsigned(self) }
}

/// A [`Display`] adapter which writes a [`Term`]'s magnitude and variable.
#[derive(Debug, Copy, Clone)]
pub struct Unsigned<'a>(&'a Term);

impl<'a> Display for Unsigned<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.coefficient.abs();

        match &self.0.variable {
            None => write!(f, "{}", magnitude),
            Some(name) if magnitude == 1.0 => write!(f, "{}", name),
            Some(name) => write!(f, "{}{}", magnitude, name),
        }
    }
}

/// A parenthesised list of terms which is always moved as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct TermGroup {
    pub id: Id,
    pub terms: Vec<Term>,
}

impl TermGroup {
    pub fn new(terms: Vec<Term>) -> Self {
        TermGroup {
            id: Id::fresh(),
            terms,
        }
    }

    pub fn same_value(&self, other: &TermGroup) -> bool {
        self.terms.len() == other.terms.len()
            && self
                .terms
                .iter()
                .zip(&other.terms)
                .all(|(left, right)| left.same_value(right))
    }
}

/// Something which can appear on one side of an equation.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Term(Term),
    Group(TermGroup),
}

impl Item {
    pub fn id(&self) -> Id {
        match self {
            Item::Term(term) => term.id,
            Item::Group(group) => group.id,
        }
    }

    pub fn as_term(&self) -> Option<&Term> {
        match self {
            Item::Term(term) => Some(term),
            Item::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&TermGroup> {
        match self {
            Item::Group(group) => Some(group),
            Item::Term(_) => None,
        }
    }

    pub fn same_value(&self, other: &Item) -> bool {
        match (self, other) {
            (Item::Term(left), Item::Term(right)) => left.same_value(right),
            (Item::Group(left), Item::Group(right)) => left.same_value(right),
            _ => false,
        }
    }
}

impl From<Term> for Item {
    fn from(term: Term) -> Item { Item::Term(term) }
}

impl From<TermGroup> for Item {
    fn from(group: TermGroup) -> Item { Item::Group(group) }
}

/// The ordered items on one side of the `=`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EquationSide {
    pub items: Vec<Item>,
}

impl EquationSide {
    pub fn new() -> Self { EquationSide::default() }

    /// A side holding a single `0`, which is what an empty side parses to.
    pub fn zero() -> Self { EquationSide::from_iter(vec![Term::constant(0.0)]) }

    pub fn with<I: Into<Item>>(mut self, item: I) -> Self {
        self.push(item);
        self
    }

    pub fn push<I: Into<Item>>(&mut self, item: I) {
        self.items.push(item.into());
    }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn contains(&self, id: Id) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    /// Every term on this side, looking inside groups.
    pub fn terms(&self) -> impl Iterator<Item = &Term> + '_ {
        self.items.iter().flat_map(|item| match item {
            Item::Term(term) => std::slice::from_ref(term).iter(),
            Item::Group(group) => group.terms.iter(),
        })
    }

    /// Update every coefficient on this side, including those inside
    /// groups.
    pub fn map_coefficients<F>(&mut self, mut func: F)
    where
        F: FnMut(f64) -> f64,
    {
        for item in &mut self.items {
            match item {
                Item::Term(term) => term.coefficient = func(term.coefficient),
                Item::Group(group) => {
                    for term in &mut group.terms {
                        term.coefficient = func(term.coefficient);
                    }
                },
            }
        }
    }

    pub fn same_value(&self, other: &EquationSide) -> bool {
        self.items.len() == other.items.len()
            && self
                .items
                .iter()
                .zip(&other.items)
                .all(|(left, right)| left.same_value(right))
    }
}

impl<I: Into<Item>> FromIterator<I> for EquationSide {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        EquationSide {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Display for EquationSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            return write!(f, "0");
        }

        for (index, item) in self.items.iter().enumerate() {
            let first = index == 0;

            match item {
                Item::Term(term) => write_term(term, first, f)?,
                Item::Group(group) => {
                    if !first {
                        write!(f, " + ")?;
                    }
                    write_group(group, f)?;
                },
            }
        }

        Ok(())
    }
}

fn write_term(term: &Term, first: bool, f: &mut Formatter<'_>) -> fmt::Result {
    let negative = term.coefficient < 0.0;

    match (first, negative) {
        (true, true) => write!(f, "-")?,
        (true, false) => {},
        (false, true) => write!(f, " - ")?,
        (false, false) => write!(f, " + ")?,
    }

    write!(f, "{}", term.unsigned())
}

fn write_group(group: &TermGroup, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "(")?;

    if group.terms.is_empty() {
        write!(f, "0")?;
    }
    for (index, term) in group.terms.iter().enumerate() {
        write_term(term, index == 0, f)?;
    }

    write!(f, ")")
}

/// One of the two sides of an equation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let inputs = vec![
            (EquationSide::new(), "0"),
            (EquationSide::zero(), "0"),
            (EquationSide::new().with(Term::constant(3.0)), "3"),
            (EquationSide::new().with(Term::constant(-3.0)), "-3"),
            (EquationSide::new().with(Term::variable(1.0, "x")), "x"),
            (EquationSide::new().with(Term::variable(-1.0, "x")), "-x"),
            (EquationSide::new().with(Term::variable(2.5, "y")), "2.5y"),
            (EquationSide::new().with(Term::variable(0.0, "x")), "0x"),
            (
                EquationSide::new()
                    .with(Term::variable(2.0, "x"))
                    .with(Term::constant(3.0)),
                "2x + 3",
            ),
            (
                EquationSide::new()
                    .with(Term::variable(2.0, "x"))
                    .with(Term::constant(-3.0))
                    .with(Term::variable(-1.0, "y")),
                "2x - 3 - y",
            ),
            (
                EquationSide::new().with(TermGroup::new(vec![
                    Term::variable(1.0, "x"),
                    Term::constant(-1.0),
                ])),
                "(x - 1)",
            ),
            (
                EquationSide::new()
                    .with(Term::constant(4.0))
                    .with(TermGroup::new(vec![
                        Term::variable(-1.0, "x"),
                        Term::constant(1.0),
                    ])),
                "4 + (-x + 1)",
            ),
            (
                EquationSide::new().with(TermGroup::new(Vec::new())),
                "(0)",
            ),
        ];

        for (side, should_be) in inputs {
            let got = side.to_string();
            assert_eq!(got, should_be);
        }
    }

    #[test]
    fn negative_zero_renders_without_a_sign() {
        let side = EquationSide::new()
            .with(Term::constant(-0.0))
            .with(Term::variable(-0.0, "x"));

        assert_eq!(side.to_string(), "0 + 0x");
    }

    #[test]
    fn fresh_ids_are_unique() {
        let first = Id::fresh();
        let second = Id::fresh();

        assert_ne!(first, second);
    }

    #[test]
    fn negation_keeps_the_identifier() {
        let term = Term::variable(2.0, "x");

        let got = term.negated();

        assert_eq!(got.id, term.id);
        assert_eq!(got.coefficient, -2.0);
        assert_eq!(got.variable.as_deref(), Some("x"));
    }

    #[test]
    fn terms_looks_inside_groups() {
        let side = EquationSide::new()
            .with(Term::constant(1.0))
            .with(TermGroup::new(vec![
                Term::constant(2.0),
                Term::constant(3.0),
            ]));

        let got: Vec<f64> = side.terms().map(|t| t.coefficient).collect();

        assert_eq!(got, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn scale_everything_on_a_side() {
        let mut side = EquationSide::new()
            .with(Term::variable(2.0, "x"))
            .with(TermGroup::new(vec![Term::constant(-3.0)]));

        side.map_coefficients(|c| c * 2.0);

        assert_eq!(side.to_string(), "4x + (-6)");
    }

    #[test]
    fn same_value_ignores_identifiers() {
        let left = EquationSide::new()
            .with(Term::variable(2.0, "x"))
            .with(TermGroup::new(vec![Term::constant(1.0)]));
        let right = EquationSide::new()
            .with(Term::variable(2.0, "x"))
            .with(TermGroup::new(vec![Term::constant(1.0)]));

        assert_ne!(left, right);
        assert!(left.same_value(&right));
        assert!(!left.same_value(&EquationSide::zero()));
    }
}
