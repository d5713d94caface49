//! # Primitive Recognizers
//!
//! Leaf parsers that consume input directly. Everything alphabet-specific
//! lives here; the combinators never look at elements themselves.
//!
//! * **Token-level**: `Equal`, `Satisfy`, `Any`, `Succeed`, `Fail`, `FromFn`
//!   work over any [`Input`].
//! * **Character-level**: `Literal`, `Pattern`, `Whitespace`, `Lexeme` work
//!   over `str` and match anchored at the current position.
//!
//! Unmatched primitives always fail recoverably and never consume input.

use std::fmt;
use std::marker::PhantomData;

use regex::Regex;

use crate::core::{ParseOutcome, Parser};
use crate::error::GrammarError;
use crate::sequence::{Input, Sequence};

/// Equal: Matches one element equal to the given value
pub struct Equal<I: ?Sized, E> {
    value: E,
    _phantom: PhantomData<fn(&I)>,
}

impl<I: ?Sized, E> Equal<I, E> {
    pub fn new(value: E) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }
}

impl<I: ?Sized, E: Clone> Clone for Equal<I, E> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<I, E> Parser<I, E> for Equal<I, E>
where
    I: ?Sized + Input<Element = E>,
    E: Clone + PartialEq + fmt::Display,
{
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, E> {
        match input.first() {
            Ok(found) if found == self.value => match input.rest() {
                Ok(rest) => ParseOutcome::success(found, rest),
                Err(e) => ParseOutcome::recoverable(e.to_string(), input),
            },
            Ok(found) => ParseOutcome::recoverable(
                format!("expected {}, found {}", self.value, found),
                input,
            ),
            Err(_) => ParseOutcome::recoverable(
                format!("expected {}, found end of input", self.value),
                input,
            ),
        }
    }
}

/// Satisfy: Consumes one element the function accepts, producing its result
pub struct Satisfy<I: ?Sized, F> {
    f: F,
    _phantom: PhantomData<fn(&I)>,
}

impl<I: ?Sized, F> Satisfy<I, F> {
    pub fn new(f: F) -> Self {
        Self {
            f,
            _phantom: PhantomData,
        }
    }
}

impl<I: ?Sized, F: Clone> Clone for Satisfy<I, F> {
    fn clone(&self) -> Self {
        Self::new(self.f.clone())
    }
}

impl<I, O, F> Parser<I, O> for Satisfy<I, F>
where
    I: ?Sized + Input,
    F: Fn(&I::Element) -> Option<O>,
{
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, O> {
        let Ok(element) = input.first() else {
            return ParseOutcome::recoverable("unexpected end of input", input);
        };
        match ((self.f)(&element), input.rest()) {
            (Some(value), Ok(rest)) => ParseOutcome::success(value, rest),
            _ => ParseOutcome::recoverable("unexpected element", input),
        }
    }
}

/// Any: Consumes and returns the current element
pub struct Any<I: ?Sized> {
    _phantom: PhantomData<fn(&I)>,
}

impl<I: ?Sized> Any<I> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<I: ?Sized> Default for Any<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ?Sized> Clone for Any<I> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<I: ?Sized + Input> Parser<I, I::Element> for Any<I> {
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, I::Element> {
        match (input.first(), input.rest()) {
            (Ok(element), Ok(rest)) => ParseOutcome::success(element, rest),
            _ => ParseOutcome::recoverable("unexpected end of input", input),
        }
    }
}

/// Succeed: Always succeeds with a copy of the value, consuming nothing
pub struct Succeed<I: ?Sized, O> {
    value: O,
    _phantom: PhantomData<fn(&I)>,
}

impl<I: ?Sized, O> Succeed<I, O> {
    pub fn new(value: O) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }
}

impl<I: ?Sized, O: Clone> Clone for Succeed<I, O> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<I: ?Sized, O: Clone> Parser<I, O> for Succeed<I, O> {
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, O> {
        ParseOutcome::success(self.value.clone(), input)
    }
}

/// Fail: Always fails recoverably with the given message
pub struct Fail<I: ?Sized, O> {
    message: String,
    _phantom: PhantomData<fn(&I) -> O>,
}

impl<I: ?Sized, O> Fail<I, O> {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            _phantom: PhantomData,
        }
    }
}

impl<I: ?Sized, O> Clone for Fail<I, O> {
    fn clone(&self) -> Self {
        Self::new(&self.message)
    }
}

impl<I: ?Sized, O> Parser<I, O> for Fail<I, O> {
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, O> {
        ParseOutcome::recoverable(self.message.clone(), input)
    }
}

/// FromFn: Adapts a function into a parser
#[derive(Clone)]
pub struct FromFn<F> {
    f: F,
}

impl<I, O, F> Parser<I, O> for FromFn<F>
where
    I: ?Sized,
    F: for<'a> Fn(Sequence<'a, I>) -> ParseOutcome<'a, I, O>,
{
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, O> {
        (self.f)(input)
    }
}

/// Literal: Matches an exact piece of text
#[derive(Clone, Debug)]
pub struct Literal {
    text: String,
}

impl Literal {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl Parser<str, String> for Literal {
    fn parse<'a>(&self, input: Sequence<'a, str>) -> ParseOutcome<'a, str, String> {
        if input.as_str().starts_with(self.text.as_str()) {
            if let Ok(rest) = input.advance(self.text.len()) {
                return ParseOutcome::success(self.text.clone(), rest);
            }
        }
        ParseOutcome::recoverable(format!("expected '{}'", self.text), input)
    }
}

/// Pattern: Matches a regular expression anchored at the current position
#[derive(Clone, Debug)]
pub struct Pattern {
    regex: Regex,
    source: String,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, GrammarError> {
        let regex = Regex::new(&format!("^(?:{})", pattern))?;
        Ok(Self {
            regex,
            source: pattern.to_string(),
        })
    }
}

impl Parser<str, String> for Pattern {
    fn parse<'a>(&self, input: Sequence<'a, str>) -> ParseOutcome<'a, str, String> {
        let text = input.as_str();
        if let Some(found) = self.regex.find(text) {
            if let Ok(rest) = input.advance(found.end()) {
                return ParseOutcome::success(found.as_str().to_string(), rest);
            }
        }
        ParseOutcome::recoverable(format!("expected /{}/", self.source), input)
    }
}

/// Whitespace: Skips any run of whitespace, possibly empty
#[derive(Clone, Copy, Debug, Default)]
pub struct Whitespace;

impl Parser<str, ()> for Whitespace {
    fn parse<'a>(&self, input: Sequence<'a, str>) -> ParseOutcome<'a, str, ()> {
        let text = input.as_str();
        let skipped = text.len() - text.trim_start().len();
        ParseOutcome::success((), input.at(input.position() + skipped))
    }
}

/// Lexeme: Skips leading whitespace, then runs the wrapped parser
#[derive(Clone)]
pub struct Lexeme<P> {
    parser: P,
}

impl<P> Lexeme<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<O, P: Parser<str, O>> Parser<str, O> for Lexeme<P> {
    fn parse<'a>(&self, input: Sequence<'a, str>) -> ParseOutcome<'a, str, O> {
        self.parser.parse(Whitespace.parse(input).rest())
    }

    fn label(&self) -> Option<&str> {
        self.parser.label()
    }
}

pub fn equal<I: ?Sized, E>(value: E) -> Equal<I, E> {
    Equal::new(value)
}

pub fn satisfy<I: ?Sized, F>(f: F) -> Satisfy<I, F> {
    Satisfy::new(f)
}

pub fn any<I: ?Sized>() -> Any<I> {
    Any::new()
}

pub fn succeed<I: ?Sized, O: Clone>(value: O) -> Succeed<I, O> {
    Succeed::new(value)
}

pub fn fail<I: ?Sized, O>(message: &str) -> Fail<I, O> {
    Fail::new(message)
}

pub fn from_fn<I, O, F>(f: F) -> FromFn<F>
where
    I: ?Sized,
    F: for<'a> Fn(Sequence<'a, I>) -> ParseOutcome<'a, I, O>,
{
    FromFn { f }
}

pub fn literal(text: &str) -> Literal {
    Literal::new(text)
}

pub fn pattern(pattern: &str) -> Result<Pattern, GrammarError> {
    Pattern::new(pattern)
}

pub fn whitespace() -> Whitespace {
    Whitespace
}

pub fn lexeme<O, P: Parser<str, O>>(parser: P) -> Lexeme<P> {
    Lexeme::new(parser)
}
