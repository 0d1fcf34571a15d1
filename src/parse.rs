use crate::{
    equation::Equation,
    expr::{EquationSide, Item, Term, TermGroup},
};
use log::{debug, warn};

/// Parse an [`Equation`] from some text.
///
/// Term text which can't be understood is never an error, it becomes a
/// variable named after the text instead. Use [`parse_equation_with()`]
/// and [`ParseOptions::strict()`] to reject it.
pub fn parse_equation(src: &str) -> Result<Equation, ParseError> {
    parse_equation_with(src, ParseOptions::default())
}

pub fn parse_equation_with(
    src: &str,
    options: ParseOptions,
) -> Result<Equation, ParseError> {
    Parser::new(options).equation(src)
}

/// Parse a single term (e.g. `"-2.5x"`), falling back to a variable named
/// after the raw text when it isn't a number or a coefficient followed by
/// letters.
pub fn parse_term(src: &str) -> Term {
    let (sign, rest) = strip_sign(src.trim());
    lenient_term(sign, rest)
}

/// Knobs for tweaking how text is parsed.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject terms that would otherwise fall back to being a variable
    /// named after the raw text, and reject malformed parentheses.
    pub strict: bool,
}

impl ParseOptions {
    pub fn strict() -> Self { ParseOptions { strict: true } }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Possible errors that may occur while parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("an equation needs exactly one \"=\", found {equals_signs}")]
    MalformedEquation { equals_signs: usize },
    #[error("\"{text}\" isn't a number or a coefficient followed by a variable")]
    InvalidTerm { text: String },
    #[error("unbalanced parentheses in \"{text}\"")]
    UnbalancedParenthesis { text: String },
    #[error("groups can't be nested, found \"({text})\"")]
    NestedGroup { text: String },
}

/// Turns text into an [`Equation`].
///
/// The grammar:
///
/// ```text
/// equation := side "=" side
/// side     := item (("+" | "-") item)*
/// item     := term
///           | SIGN? "(" term (("+" | "-") term)* ")"
/// term     := SIGN? NUMBER
///           | SIGN? NUMBER? LETTERS
/// ```
#[derive(Debug, Copy, Clone)]
pub(crate) struct Parser {
    options: ParseOptions,
}

impl Parser {
    pub(crate) fn new(options: ParseOptions) -> Self { Parser { options } }

    pub(crate) fn equation(&self, src: &str) -> Result<Equation, ParseError> {
        let equals_signs = src.matches('=').count();
        let (left, right) = match src.split_once('=') {
            Some(halves) if equals_signs == 1 => halves,
            _ => return Err(ParseError::MalformedEquation { equals_signs }),
        };

        let equation =
            Equation::new(self.side(left.trim())?, self.side(right.trim())?);
        debug!("Parsed \"{}\" as \"{}\"", src, equation);

        Ok(equation)
    }

    fn side(&self, src: &str) -> Result<EquationSide, ParseError> {
        let (chunks, groups_allowed) = match split_outside_parens(src) {
            Some(chunks) => (chunks, true),
            None if self.options.strict => {
                return Err(ParseError::UnbalancedParenthesis {
                    text: src.to_string(),
                });
            },
            None => {
                warn!("Unbalanced parentheses in \"{}\", ignoring them", src);
                (split_before_signs(src), false)
            },
        };

        let mut side = EquationSide::new();

        for chunk in chunks {
            side.push(self.item(chunk, groups_allowed)?);
        }

        if side.is_empty() {
            Ok(EquationSide::zero())
        } else {
            Ok(side)
        }
    }

    fn item(&self, src: &str, groups_allowed: bool) -> Result<Item, ParseError> {
        let (sign, rest) = strip_sign(src);

        if groups_allowed {
            if let Some(inner) = enclosed(rest) {
                return self.group(inner, sign).map(Item::Group);
            }
        }

        self.term(src).map(Item::Term)
    }

    fn group(&self, inner: &str, sign: f64) -> Result<TermGroup, ParseError> {
        let nested = inner.contains(|c: char| c == '(' || c == ')');
        if self.options.strict && nested {
            return Err(ParseError::NestedGroup {
                text: inner.to_string(),
            });
        }

        let mut terms = Vec::new();

        for chunk in split_before_signs(inner) {
            let mut term = self.term(chunk)?;
            term.coefficient *= sign;
            terms.push(term);
        }

        if terms.is_empty() {
            terms.push(Term::constant(0.0));
        }

        Ok(TermGroup::new(terms))
    }

    pub(crate) fn term(&self, src: &str) -> Result<Term, ParseError> {
        let (sign, rest) = strip_sign(src.trim());

        if self.options.strict {
            match classify(rest) {
                Shape::Empty | Shape::Unrecognised => {
                    return Err(ParseError::InvalidTerm {
                        text: src.trim().to_string(),
                    });
                },
                Shape::Constant(_) | Shape::Scaled(..) => {},
            }
        }

        Ok(lenient_term(sign, rest))
    }
}

/// The kinds of thing the unsigned part of a term can look like.
#[derive(Debug, Copy, Clone, PartialEq)]
enum Shape<'a> {
    Empty,
    Constant(f64),
    Scaled(f64, &'a str),
    Unrecognised,
}

fn classify(rest: &str) -> Shape<'_> {
    if rest.is_empty() {
        return Shape::Empty;
    }
    if let Some(value) = parse_number(rest) {
        return Shape::Constant(value);
    }

    let letters_start = rest
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or_else(|| rest.len());
    let (digits, name) = rest.split_at(letters_start);

    let is_name =
        !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic());
    if !is_name {
        return Shape::Unrecognised;
    }

    if digits.is_empty() {
        Shape::Scaled(1.0, name)
    } else {
        match parse_number(digits) {
            Some(coefficient) => Shape::Scaled(coefficient, name),
            None => Shape::Unrecognised,
        }
    }
}

fn lenient_term(sign: f64, rest: &str) -> Term {
    match classify(rest) {
        Shape::Empty => Term::constant(0.0),
        Shape::Constant(value) => Term::constant(sign * value),
        Shape::Scaled(coefficient, name) => {
            Term::variable(sign * coefficient, name)
        },
        Shape::Unrecognised => {
            warn!("Treating \"{}\" as the name of a variable", rest);
            Term::variable(sign, rest)
        },
    }
}

/// Digits with at most one decimal point (`3`, `3.`, `.5`, `3.14`). Numbers
/// too big to represent as a finite `f64` aren't numbers.
fn parse_number(text: &str) -> Option<f64> {
    let mut digits = 0;
    let mut points = 0;

    for c in text.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => return None,
        }
    }

    if digits == 0 || points > 1 {
        return None;
    }

    text.parse().ok().filter(|value: &f64| value.is_finite())
}

/// Split off a leading `+` or `-`, returning the sign as a multiplier and
/// the trimmed remainder.
fn strip_sign(src: &str) -> (f64, &str) {
    if let Some(rest) = src.strip_prefix('+') {
        (1.0, rest.trim())
    } else if let Some(rest) = src.strip_prefix('-') {
        (-1.0, rest.trim())
    } else {
        (1.0, src.trim())
    }
}

/// If the text is wrapped in a single pair of parentheses, get what's
/// inside them.
fn enclosed(text: &str) -> Option<&str> {
    if !text.starts_with('(') {
        return None;
    }

    let mut depth = 0_usize;

    for (index, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return if index == text.len() - 1 {
                        Some(&text[1..index])
                    } else {
                        None
                    };
                }
            },
            _ => {},
        }
    }

    None
}

/// Break text up immediately before every `+` or `-`, discarding blank
/// pieces.
fn split_before_signs(src: &str) -> Vec<&str> {
    split_at_signs(src, |_| true)
}

/// Like [`split_before_signs()`], except signs inside parentheses don't
/// count. Returns `None` when the parentheses are unbalanced.
fn split_outside_parens(src: &str) -> Option<Vec<&str>> {
    let mut depth = 0_isize;

    for c in src.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {},
        }
        if depth < 0 {
            return None;
        }
    }
    if depth != 0 {
        return None;
    }

    let mut depths = src.chars().scan(0_isize, |depth, c| {
        match c {
            '(' => *depth += 1,
            ')' => *depth -= 1,
            _ => {},
        }
        Some(*depth)
    });

    Some(split_at_signs(src, move |_| depths.next() == Some(0)))
}

/// Split `src` before each sign for which `at_top_level` says yes. The
/// predicate is called once per character, in order.
fn split_at_signs<F>(src: &str, mut at_top_level: F) -> Vec<&str>
where
    F: FnMut(char) -> bool,
{
    let mut chunks = Vec::new();
    let mut start = 0;

    for (index, c) in src.char_indices() {
        let splittable = at_top_level(c);

        if (c == '+' || c == '-') && splittable {
            chunks.push(&src[start..index]);
            start = index;
        }
    }
    chunks.push(&src[start..]);

    chunks
        .into_iter()
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect()
}
