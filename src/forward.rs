//! # Forward References
//!
//! Grammar rules routinely refer to each other before all of them exist.
//! A [`Forward`] is created unbound, handed out (cloned) to every rule that
//! needs it, and bound exactly once after the rule set is built. When invoked
//! it delegates to whatever it is bound to at call time.
//!
//! ```ignore
//! let expr = Forward::<str, i64>::new();
//! let group = literal("(").then_right(expr.clone()).then_left(literal(")"));
//! expr.bind(number().or_else(group))?;
//! ```
//!
//! Clones share the same cell, so a bound grammar forms a reference cycle and
//! lives until the process ends. Grammars are meant to be built once and reused.

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use crate::core::{BoxedParser, ParseOutcome, Parser};
use crate::error::GrammarError;
use crate::sequence::Sequence;

/// Deferred parser resolved after construction.
pub struct Forward<I: ?Sized, O> {
    target: Rc<OnceCell<BoxedParser<I, O>>>,
}

impl<I: ?Sized, O> Forward<I, O> {
    pub fn new() -> Self {
        Self {
            target: Rc::new(OnceCell::new()),
        }
    }

    /// Binds this reference (and every clone of it) to `parser`.
    ///
    /// A reference can only be bound once.
    pub fn bind(&self, parser: impl Parser<I, O> + 'static) -> Result<(), GrammarError> {
        let label = parser.label().map(str::to_string);
        self.target
            .set(Box::new(parser))
            .map_err(|_| GrammarError::AlreadyBound { label })
    }

    pub fn is_bound(&self) -> bool {
        self.target.get().is_some()
    }
}

impl<I: ?Sized, O> Default for Forward<I, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ?Sized, O> Clone for Forward<I, O> {
    fn clone(&self) -> Self {
        Self {
            target: Rc::clone(&self.target),
        }
    }
}

impl<I: ?Sized, O> fmt::Debug for Forward<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Forward")
            .field("bound", &self.is_bound())
            .finish()
    }
}

impl<I: ?Sized, O> Parser<I, O> for Forward<I, O> {
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, O> {
        match self.target.get() {
            Some(parser) => parser.parse(input),
            None => panic!(
                "forward reference invoked before it was bound (at position {})",
                input.position()
            ),
        }
    }

    fn label(&self) -> Option<&str> {
        self.target.get().and_then(|parser| parser.label())
    }
}
