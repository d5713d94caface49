//! # Core Parser Definitions
//!
//! This module defines the fundamental parser interface and the outcome type
//! that every parser returns.
//!
//! A parse never throws for bad input. It returns a [`ParseOutcome`]: a success
//! carrying a value, or one of two failure kinds. A *recoverable* failure lets
//! an enclosing ordered choice try its next alternative; a *fatal* failure
//! means the grammar already committed to this path, so siblings must not be
//! tried. All three variants carry the remainder so that failures can be
//! reported by position.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

use crate::sequence::Sequence;

/// Parser trait defines the core parsing interface.
///
/// A parser takes a positioned view of the input and returns an outcome. It
/// must be deterministic given the same position, which is what makes its
/// results safe to memoize.
///
/// # Type Parameters
///
/// * `I` - The input source type (`str`, `[T]`, ...)
/// * `O` - The output value type
pub trait Parser<I: ?Sized, O> {
    /// Attempts to parse the input starting at the view's position.
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, O>;

    /// Diagnostic name of this parser, if it was given one.
    fn label(&self) -> Option<&str> {
        None
    }
}

impl<I: ?Sized, O, P: Parser<I, O> + ?Sized> Parser<I, O> for &P {
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, O> {
        (**self).parse(input)
    }

    fn label(&self) -> Option<&str> {
        (**self).label()
    }
}

impl<I: ?Sized, O, P: Parser<I, O> + ?Sized> Parser<I, O> for Box<P> {
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, O> {
        (**self).parse(input)
    }

    fn label(&self) -> Option<&str> {
        (**self).label()
    }
}

impl<I: ?Sized, O, P: Parser<I, O> + ?Sized> Parser<I, O> for Rc<P> {
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, O> {
        (**self).parse(input)
    }

    fn label(&self) -> Option<&str> {
        (**self).label()
    }
}

/// Boxed parser used wherever heterogeneous parsers share one type.
pub type BoxedParser<I, O> = Box<dyn Parser<I, O>>;

/// Result of running a parser.
pub enum ParseOutcome<'a, I: ?Sized, O> {
    /// The parser matched and produced `value`; `rest` is what it did not consume.
    Success { value: O, rest: Sequence<'a, I> },
    /// Backtrackable mismatch.
    Recoverable {
        message: String,
        rest: Sequence<'a, I>,
    },
    /// Committed failure; ordered choice must not try further alternatives.
    Fatal {
        message: String,
        rest: Sequence<'a, I>,
    },
}

/// Kind of an outcome without its payload.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OutcomeKind {
    Success,
    Recoverable,
    Fatal,
}

impl<'a, I: ?Sized, O> ParseOutcome<'a, I, O> {
    pub fn success(value: O, rest: Sequence<'a, I>) -> Self {
        ParseOutcome::Success { value, rest }
    }

    pub fn recoverable(message: impl Into<String>, rest: Sequence<'a, I>) -> Self {
        ParseOutcome::Recoverable {
            message: message.into(),
            rest,
        }
    }

    pub fn fatal(message: impl Into<String>, rest: Sequence<'a, I>) -> Self {
        ParseOutcome::Fatal {
            message: message.into(),
            rest,
        }
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            ParseOutcome::Success { .. } => OutcomeKind::Success,
            ParseOutcome::Recoverable { .. } => OutcomeKind::Recoverable,
            ParseOutcome::Fatal { .. } => OutcomeKind::Fatal,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ParseOutcome::Success { .. })
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, ParseOutcome::Recoverable { .. })
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, ParseOutcome::Fatal { .. })
    }

    /// The produced value; `None` for failures.
    pub fn value(&self) -> Option<&O> {
        match self {
            ParseOutcome::Success { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<O> {
        match self {
            ParseOutcome::Success { value, .. } => Some(value),
            _ => None,
        }
    }

    /// The failure message; `None` for successes.
    pub fn message(&self) -> Option<&str> {
        match self {
            ParseOutcome::Success { .. } => None,
            ParseOutcome::Recoverable { message, .. } | ParseOutcome::Fatal { message, .. } => {
                Some(message)
            }
        }
    }

    /// The unconsumed remainder. Always present, also on failure.
    pub fn rest(&self) -> Sequence<'a, I> {
        match self {
            ParseOutcome::Success { rest, .. }
            | ParseOutcome::Recoverable { rest, .. }
            | ParseOutcome::Fatal { rest, .. } => *rest,
        }
    }

    /// Position of the remainder in the input.
    pub fn position(&self) -> usize {
        self.rest().position()
    }

    /// Transforms a success value, leaving failures untouched.
    pub fn map_value<U>(self, f: impl FnOnce(O) -> U) -> ParseOutcome<'a, I, U> {
        match self {
            ParseOutcome::Success { value, rest } => ParseOutcome::Success {
                value: f(value),
                rest,
            },
            ParseOutcome::Recoverable { message, rest } => {
                ParseOutcome::Recoverable { message, rest }
            }
            ParseOutcome::Fatal { message, rest } => ParseOutcome::Fatal { message, rest },
        }
    }

    /// Splits the outcome into the uniform public shape.
    pub fn into_result(self) -> Result<(O, Sequence<'a, I>), ParseError> {
        match self {
            ParseOutcome::Success { value, rest } => Ok((value, rest)),
            ParseOutcome::Recoverable { message, rest } => Err(ParseError::Recoverable {
                message,
                position: rest.position(),
            }),
            ParseOutcome::Fatal { message, rest } => Err(ParseError::Fatal {
                message,
                position: rest.position(),
            }),
        }
    }
}

impl<I: ?Sized, O: Clone> Clone for ParseOutcome<'_, I, O> {
    fn clone(&self) -> Self {
        match self {
            ParseOutcome::Success { value, rest } => ParseOutcome::Success {
                value: value.clone(),
                rest: *rest,
            },
            ParseOutcome::Recoverable { message, rest } => ParseOutcome::Recoverable {
                message: message.clone(),
                rest: *rest,
            },
            ParseOutcome::Fatal { message, rest } => ParseOutcome::Fatal {
                message: message.clone(),
                rest: *rest,
            },
        }
    }
}

impl<I: ?Sized, O: PartialEq> PartialEq for ParseOutcome<'_, I, O> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                ParseOutcome::Success { value: a, rest: ra },
                ParseOutcome::Success { value: b, rest: rb },
            ) => a == b && ra == rb,
            (
                ParseOutcome::Recoverable {
                    message: a,
                    rest: ra,
                },
                ParseOutcome::Recoverable {
                    message: b,
                    rest: rb,
                },
            )
            | (
                ParseOutcome::Fatal {
                    message: a,
                    rest: ra,
                },
                ParseOutcome::Fatal {
                    message: b,
                    rest: rb,
                },
            ) => a == b && ra == rb,
            _ => false,
        }
    }
}

impl<I: ?Sized, O: fmt::Debug> fmt::Debug for ParseOutcome<'_, I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseOutcome::Success { value, rest } => f
                .debug_struct("Success")
                .field("value", value)
                .field("position", &rest.position())
                .finish(),
            ParseOutcome::Recoverable { message, rest } => f
                .debug_struct("Recoverable")
                .field("message", message)
                .field("position", &rest.position())
                .finish(),
            ParseOutcome::Fatal { message, rest } => f
                .debug_struct("Fatal")
                .field("message", message)
                .field("position", &rest.position())
                .finish(),
        }
    }
}

/// Error type for parsing operations.
///
/// The public, lifetime-free failure shape: a message and the position of
/// the remainder where the parse gave up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No alternative matched
    #[error("{message} at position {position}")]
    Recoverable { message: String, position: usize },
    /// A committed rule was malformed
    #[error("{message} at position {position} (committed)")]
    Fatal { message: String, position: usize },
}

impl ParseError {
    pub fn message(&self) -> &str {
        match self {
            ParseError::Recoverable { message, .. } | ParseError::Fatal { message, .. } => message,
        }
    }

    pub fn position(&self) -> usize {
        match self {
            ParseError::Recoverable { position, .. } | ParseError::Fatal { position, .. } => {
                *position
            }
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, ParseError::Fatal { .. })
    }
}
