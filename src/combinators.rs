//! # Parser Combinators
//!
//! This module implements the combinators that build new parsers out of
//! existing ones. Every combinator is a small struct wrapping its children and
//! implementing [`Parser`]; composition is by value.
//!
//! ## Combinator Types
//!
//! * **Sequential Combinators**: `Then`, `ThenLeft`, `ThenRight`, `Delimited`
//! * **Alternative Combinators**: `OrElse`, `Choice` (ordered, first success wins)
//! * **Repetition Combinators**: `Many`, `Many1`, `Optional`, `SeparatedList`
//! * **Transformation Combinators**: `Map`, `TryMap`, `Cast`, `AsUnit`
//! * **Failure Control Combinators**: `Commit`, `Relax`, `Phrase`, `WithContext`
//! * **Diagnostic Combinators**: `Named` (plus `Memo` and `Traced` in their own modules)
//!
//! ## Failure propagation
//!
//! A recoverable failure lets `OrElse`/`Choice` try the next alternative and
//! stops repetitions. A fatal failure passes through every combinator here
//! unchanged, except `Relax`, which turns it back into a recoverable one.

use std::marker::PhantomData;
use std::rc::Rc;

use crate::core::{BoxedParser, ParseOutcome, Parser};
use crate::memo::Memo;
use crate::sequence::{Input, Sequence};
use crate::trace::Traced;

/// Then: Runs two parsers in sequence and pairs their values
///
/// The second parser starts where the first one stopped. Any failure of
/// either parser is returned as-is.
#[derive(Clone)]
pub struct Then<P1, P2> {
    parser1: P1,
    parser2: P2,
}

impl<P1, P2> Then<P1, P2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Self { parser1, parser2 }
    }
}

impl<I, O1, O2, P1, P2> Parser<I, (O1, O2)> for Then<P1, P2>
where
    I: ?Sized,
    P1: Parser<I, O1>,
    P2: Parser<I, O2>,
{
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, (O1, O2)> {
        let (first, rest) = match self.parser1.parse(input) {
            ParseOutcome::Success { value, rest } => (value, rest),
            ParseOutcome::Recoverable { message, rest } => {
                return ParseOutcome::Recoverable { message, rest };
            }
            ParseOutcome::Fatal { message, rest } => return ParseOutcome::Fatal { message, rest },
        };
        self.parser2
            .parse(rest)
            .map_value(|second| (first, second))
    }
}

/// ThenLeft: Runs two parsers in sequence and keeps the left value
///
/// Typically used to require trailing punctuation without keeping it.
#[derive(Clone)]
pub struct ThenLeft<P1, P2, O2> {
    parser1: P1,
    parser2: P2,
    _phantom: PhantomData<O2>,
}

impl<P1, P2, O2> ThenLeft<P1, P2, O2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Self {
            parser1,
            parser2,
            _phantom: PhantomData,
        }
    }
}

impl<I, O1, O2, P1, P2> Parser<I, O1> for ThenLeft<P1, P2, O2>
where
    I: ?Sized,
    P1: Parser<I, O1>,
    P2: Parser<I, O2>,
{
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, O1> {
        match self.parser1.parse(input) {
            ParseOutcome::Success { value, rest } => {
                self.parser2.parse(rest).map_value(|_| value)
            }
            ParseOutcome::Recoverable { message, rest } => {
                ParseOutcome::Recoverable { message, rest }
            }
            ParseOutcome::Fatal { message, rest } => ParseOutcome::Fatal { message, rest },
        }
    }
}

/// ThenRight: Runs two parsers in sequence and keeps the right value
///
/// Typically used to require leading punctuation without keeping it.
#[derive(Clone)]
pub struct ThenRight<P1, P2, O1> {
    parser1: P1,
    parser2: P2,
    _phantom: PhantomData<O1>,
}

impl<P1, P2, O1> ThenRight<P1, P2, O1> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Self {
            parser1,
            parser2,
            _phantom: PhantomData,
        }
    }
}

impl<I, O1, O2, P1, P2> Parser<I, O2> for ThenRight<P1, P2, O1>
where
    I: ?Sized,
    P1: Parser<I, O1>,
    P2: Parser<I, O2>,
{
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, O2> {
        match self.parser1.parse(input) {
            ParseOutcome::Success { rest, .. } => self.parser2.parse(rest),
            ParseOutcome::Recoverable { message, rest } => {
                ParseOutcome::Recoverable { message, rest }
            }
            ParseOutcome::Fatal { message, rest } => ParseOutcome::Fatal { message, rest },
        }
    }
}

/// Delimited: Parses content between left and right delimiters
///
/// This parser handles common patterns like parenthesized expressions,
/// quoted strings, or bracketed lists. It applies the left delimiter parser,
/// then the content parser, then the right delimiter parser, returning only
/// the content parser's result.
#[derive(Clone)]
pub struct Delimited<L, P, R, OL, OR> {
    /// Parser for the left delimiter
    left: L,
    /// Parser for the content between delimiters
    parser: P,
    /// Parser for the right delimiter
    right: R,
    _phantom: PhantomData<(OL, OR)>,
}

impl<L, P, R, OL, OR> Delimited<L, P, R, OL, OR> {
    /// Creates a new Delimited parser
    ///
    /// # Arguments
    ///
    /// * `left` - Parser for the left delimiter
    /// * `parser` - Parser for the content between delimiters
    /// * `right` - Parser for the right delimiter
    pub fn new(left: L, parser: P, right: R) -> Self {
        Self {
            left,
            parser,
            right,
            _phantom: PhantomData,
        }
    }
}

impl<I, O, OL, OR, L, P, R> Parser<I, O> for Delimited<L, P, R, OL, OR>
where
    I: ?Sized,
    L: Parser<I, OL>,
    P: Parser<I, O>,
    R: Parser<I, OR>,
{
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, O> {
        let rest = match self.left.parse(input) {
            ParseOutcome::Success { rest, .. } => rest,
            ParseOutcome::Recoverable { message, rest } => {
                return ParseOutcome::Recoverable { message, rest };
            }
            ParseOutcome::Fatal { message, rest } => return ParseOutcome::Fatal { message, rest },
        };
        match self.parser.parse(rest) {
            ParseOutcome::Success { value, rest } => {
                self.right.parse(rest).map_value(|_| value)
            }
            failure => failure,
        }
    }
}

/// OrElse: Ordered choice between two parsers
///
/// The second parser runs on the original input only if the first one fails
/// recoverably. A fatal failure of the first parser is returned immediately.
/// The first success wins even if the second parser would consume more.
#[derive(Clone)]
pub struct OrElse<P1, P2> {
    parser1: P1,
    parser2: P2,
}

impl<P1, P2> OrElse<P1, P2> {
    pub fn new(parser1: P1, parser2: P2) -> Self {
        Self { parser1, parser2 }
    }
}

impl<I, O, P1, P2> Parser<I, O> for OrElse<P1, P2>
where
    I: ?Sized,
    P1: Parser<I, O>,
    P2: Parser<I, O>,
{
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, O> {
        match self.parser1.parse(input) {
            ParseOutcome::Recoverable { .. } => self.parser2.parse(input),
            outcome => outcome,
        }
    }
}

/// Choice: Tries multiple parsers and succeeds with the first successful one
///
/// This parser tries each of its child parsers in order, each on the original
/// input. A fatal failure stops the search. If every parser fails
/// recoverably, the last parser's failure is returned.
pub struct Choice<I: ?Sized, O> {
    /// The list of parsers to try
    parsers: Vec<BoxedParser<I, O>>,
}

impl<I: ?Sized, O> Choice<I, O> {
    /// Creates a new Choice parser
    ///
    /// # Arguments
    ///
    /// * `parsers` - A vector of boxed parsers to try in order
    pub fn new(parsers: Vec<BoxedParser<I, O>>) -> Self {
        Self { parsers }
    }
}

impl<I: ?Sized, O> Parser<I, O> for Choice<I, O> {
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, O> {
        let mut last = None;
        for parser in &self.parsers {
            match parser.parse(input) {
                failure @ ParseOutcome::Recoverable { .. } => last = Some(failure),
                outcome => return outcome,
            }
        }
        last.unwrap_or_else(|| ParseOutcome::recoverable("no alternative matched", input))
    }
}

/// Map: Transforms the output of a parser using a function
///
/// This parser applies a transformation function to the result of another parser.
/// Failures pass through unchanged.
#[derive(Clone)]
pub struct Map<P, F, A> {
    /// The parser whose output will be transformed
    parser: P,
    /// The transformation function
    f: F,
    _phantom: PhantomData<A>,
}

impl<P, F, A> Map<P, F, A> {
    /// Creates a new Map parser
    ///
    /// # Arguments
    ///
    /// * `parser` - The parser whose output will be transformed
    /// * `f` - The transformation function to apply to the parser's output
    pub fn new(parser: P, f: F) -> Self {
        Self {
            parser,
            f,
            _phantom: PhantomData,
        }
    }
}

impl<I, A, B, P, F> Parser<I, B> for Map<P, F, A>
where
    I: ?Sized,
    P: Parser<I, A>,
    F: Fn(A) -> B,
{
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, B> {
        self.parser.parse(input).map_value(&self.f)
    }
}

/// TryMap: Transforms the output with a function that may reject it
///
/// A rejection becomes a recoverable failure positioned where the wrapped
/// parser started, carrying the function's message.
#[derive(Clone)]
pub struct TryMap<P, F, A> {
    parser: P,
    f: F,
    _phantom: PhantomData<A>,
}

impl<P, F, A> TryMap<P, F, A> {
    pub fn new(parser: P, f: F) -> Self {
        Self {
            parser,
            f,
            _phantom: PhantomData,
        }
    }
}

impl<I, A, B, P, F> Parser<I, B> for TryMap<P, F, A>
where
    I: ?Sized,
    P: Parser<I, A>,
    F: Fn(A) -> Result<B, String>,
{
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, B> {
        match self.parser.parse(input) {
            ParseOutcome::Success { value, rest } => match (self.f)(value) {
                Ok(mapped) => ParseOutcome::success(mapped, rest),
                Err(message) => ParseOutcome::recoverable(message, input),
            },
            ParseOutcome::Recoverable { message, rest } => {
                ParseOutcome::Recoverable { message, rest }
            }
            ParseOutcome::Fatal { message, rest } => ParseOutcome::Fatal { message, rest },
        }
    }
}

/// Cast: Widens the output to a supertype through `Into`
///
/// Lets alternatives with different concrete outputs meet at a common type.
#[derive(Clone)]
pub struct Cast<P, A, B> {
    parser: P,
    _phantom: PhantomData<(A, B)>,
}

impl<P, A, B> Cast<P, A, B> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            _phantom: PhantomData,
        }
    }
}

impl<I, A, B, P> Parser<I, B> for Cast<P, A, B>
where
    I: ?Sized,
    P: Parser<I, A>,
    A: Into<B>,
{
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, B> {
        self.parser.parse(input).map_value(Into::into)
    }

    fn label(&self) -> Option<&str> {
        self.parser.label()
    }
}

#[derive(Clone)]
pub struct AsUnit<P, O> {
    parser: P,
    _phantom: PhantomData<O>,
}

impl<P, O> AsUnit<P, O> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            _phantom: PhantomData,
        }
    }
}

impl<I, P, O> Parser<I, ()> for AsUnit<P, O>
where
    I: ?Sized,
    P: Parser<I, O>,
{
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, ()> {
        self.parser.parse(input).map_value(|_| ())
    }
}

// Event targets are static per callsite, so pick the one matching the
// repetition's lower bound.
macro_rules! repetition_stopped {
    ($min:expr, $($fields:tt)+) => {
        if $min == 0 {
            tracing::debug!(target: "parser::many", $($fields)+)
        } else {
            tracing::debug!(target: "parser::many1", $($fields)+)
        }
    };
}

/// Runs `parser` repeatedly, collecting values until it fails recoverably.
///
/// Fewer than `min` successes yields the stopping failure. A success that
/// consumes nothing is kept and ends the loop, so nullable parsers terminate.
fn repeat<'a, I, O, P>(
    parser: &P,
    input: Sequence<'a, I>,
    min: usize,
) -> ParseOutcome<'a, I, Vec<O>>
where
    I: ?Sized,
    P: Parser<I, O>,
{
    let mut results = Vec::new();
    let mut current = input;

    loop {
        match parser.parse(current) {
            ParseOutcome::Success { value, rest } => {
                results.push(value);
                if rest.position() == current.position() {
                    repetition_stopped!(
                        min,
                        position = current.position(),
                        items_collected = results.len(),
                        "repetition stopped: element consumed no input"
                    );
                    break;
                }
                current = rest;
            }
            ParseOutcome::Recoverable { message, rest } => {
                repetition_stopped!(
                    min,
                    position = current.position(),
                    items_collected = results.len(),
                    message = %message,
                    "repetition stopped"
                );
                if results.len() < min {
                    return ParseOutcome::Recoverable { message, rest };
                }
                break;
            }
            ParseOutcome::Fatal { message, rest } => return ParseOutcome::Fatal { message, rest },
        }
    }

    ParseOutcome::success(results, current)
}

/// Many: Applies a parser zero or more times
///
/// This parser repeatedly applies the inner parser until it fails
/// recoverably, collecting all successful results into a vector. It never
/// fails recoverably itself (returning an empty vector when nothing matched);
/// a fatal failure of the inner parser is propagated.
#[derive(Clone)]
pub struct Many<P> {
    /// The parser to apply repeatedly
    parser: P,
}

impl<P> Many<P> {
    /// Creates a new Many parser
    ///
    /// # Arguments
    ///
    /// * `parser` - The parser to apply repeatedly
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<I, O, P> Parser<I, Vec<O>> for Many<P>
where
    I: ?Sized,
    P: Parser<I, O>,
{
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, Vec<O>> {
        repeat(&self.parser, input, 0)
    }
}

/// Many1: Applies a parser one or more times
///
/// Similar to Many, but requires the inner parser to succeed at least once.
/// It fails with the inner parser's failure if the first attempt fails.
#[derive(Clone)]
pub struct Many1<P> {
    /// The parser to apply repeatedly
    parser: P,
}

impl<P> Many1<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<I, O, P> Parser<I, Vec<O>> for Many1<P>
where
    I: ?Sized,
    P: Parser<I, O>,
{
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, Vec<O>> {
        repeat(&self.parser, input, 1)
    }
}

#[derive(Clone)]
pub struct Optional<P> {
    parser: P,
}

impl<P> Optional<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<I, O, P> Parser<I, Option<O>> for Optional<P>
where
    I: ?Sized,
    P: Parser<I, O>,
{
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, Option<O>> {
        match self.parser.parse(input) {
            ParseOutcome::Success { value, rest } => ParseOutcome::success(Some(value), rest),
            ParseOutcome::Recoverable { message, .. } => {
                tracing::debug!(
                    target: "parser::optional",
                    message = %message,
                    position = input.position(),
                    "Optional parser suppressed a failure"
                );
                ParseOutcome::success(None, input)
            }
            ParseOutcome::Fatal { message, rest } => ParseOutcome::Fatal { message, rest },
        }
    }
}

/// SeparatedList: Parses a list of items separated by a delimiter
///
/// This parser handles common list patterns like comma-separated values.
/// An empty list is accepted. A separator that is not followed by an item
/// is left unconsumed. Fatal failures of either parser are propagated.
#[derive(Clone)]
pub struct SeparatedList<P, S, OS> {
    /// Parser for list items
    item_parser: P,
    /// Parser for the separator between items
    separator_parser: S,
    _phantom: PhantomData<OS>,
}

impl<P, S, OS> SeparatedList<P, S, OS> {
    /// Creates a new SeparatedList parser
    ///
    /// # Arguments
    ///
    /// * `item_parser` - Parser for list items
    /// * `separator_parser` - Parser for the separator between items
    pub fn new(item_parser: P, separator_parser: S) -> Self {
        Self {
            item_parser,
            separator_parser,
            _phantom: PhantomData,
        }
    }
}

impl<I, O, OS, P, S> Parser<I, Vec<O>> for SeparatedList<P, S, OS>
where
    I: ?Sized,
    P: Parser<I, O>,
    S: Parser<I, OS>,
{
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, Vec<O>> {
        let mut results = Vec::new();
        let mut current = match self.item_parser.parse(input) {
            ParseOutcome::Success { value, rest } => {
                results.push(value);
                rest
            }
            ParseOutcome::Recoverable { .. } => return ParseOutcome::success(results, input),
            ParseOutcome::Fatal { message, rest } => return ParseOutcome::Fatal { message, rest },
        };

        loop {
            let after_separator = match self.separator_parser.parse(current) {
                ParseOutcome::Success { rest, .. } => rest,
                ParseOutcome::Recoverable { .. } => break,
                ParseOutcome::Fatal { message, rest } => {
                    return ParseOutcome::Fatal { message, rest };
                }
            };
            match self.item_parser.parse(after_separator) {
                ParseOutcome::Success { value, rest } => {
                    results.push(value);
                    current = rest;
                }
                ParseOutcome::Recoverable { .. } => break,
                ParseOutcome::Fatal { message, rest } => {
                    return ParseOutcome::Fatal { message, rest };
                }
            }
        }

        ParseOutcome::success(results, current)
    }
}

/// Commit: Turns any failure of the wrapped parser into a fatal one
///
/// Marks a point of no return: once the grammar is sure which alternative it
/// is in, a malformed remainder must not make an enclosing choice silently
/// try something else.
#[derive(Clone)]
pub struct Commit<P> {
    parser: P,
}

impl<P> Commit<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<I, O, P> Parser<I, O> for Commit<P>
where
    I: ?Sized,
    P: Parser<I, O>,
{
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, O> {
        match self.parser.parse(input) {
            ParseOutcome::Recoverable { message, rest } => ParseOutcome::Fatal { message, rest },
            outcome => outcome,
        }
    }

    fn label(&self) -> Option<&str> {
        self.parser.label()
    }
}

/// Relax: Turns a fatal failure of the wrapped parser back into a recoverable one
///
/// Applied at a grammar's root so callers see a single failure shape.
#[derive(Clone)]
pub struct Relax<P> {
    parser: P,
}

impl<P> Relax<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<I, O, P> Parser<I, O> for Relax<P>
where
    I: ?Sized,
    P: Parser<I, O>,
{
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, O> {
        match self.parser.parse(input) {
            ParseOutcome::Fatal { message, rest } => ParseOutcome::Recoverable { message, rest },
            outcome => outcome,
        }
    }

    fn label(&self) -> Option<&str> {
        self.parser.label()
    }
}

/// Phrase: Requires the wrapped parser to consume the whole input
///
/// A success that leaves input behind becomes a recoverable failure at the
/// first unconsumed position.
#[derive(Clone)]
pub struct Phrase<P> {
    parser: P,
}

impl<P> Phrase<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<I, O, P> Parser<I, O> for Phrase<P>
where
    I: ?Sized + Input,
    P: Parser<I, O>,
{
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, O> {
        match self.parser.parse(input) {
            ParseOutcome::Success { rest, .. } if !rest.is_empty() => {
                ParseOutcome::recoverable("trailing input", rest)
            }
            outcome => outcome,
        }
    }

    fn label(&self) -> Option<&str> {
        self.parser.label()
    }
}

/// Named: Gives a parser a diagnostic name
///
/// The name is reported through [`Parser::label`] and shows up in traces and
/// memo diagnostics. Parsing is unaffected.
#[derive(Clone)]
pub struct Named<P> {
    parser: P,
    name: String,
}

impl<P> Named<P> {
    pub fn new(parser: P, name: &str) -> Self {
        Self {
            parser,
            name: name.to_string(),
        }
    }
}

impl<I, O, P> Parser<I, O> for Named<P>
where
    I: ?Sized,
    P: Parser<I, O>,
{
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, O> {
        self.parser.parse(input)
    }

    fn label(&self) -> Option<&str> {
        Some(&self.name)
    }
}

/// WithContext: Prefixes failure messages with a description
#[derive(Clone)]
pub struct WithContext<P, C> {
    parser: P,
    context: C,
}

impl<P, C> WithContext<P, C> {
    pub fn new(parser: P, context: C) -> Self {
        Self { parser, context }
    }
}

impl<I, O, P, C: ToString> Parser<I, O> for WithContext<P, C>
where
    I: ?Sized,
    P: Parser<I, O>,
{
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, O> {
        match self.parser.parse(input) {
            ParseOutcome::Recoverable { message, rest } => ParseOutcome::Recoverable {
                message: format!("{}: {}", self.context.to_string(), message),
                rest,
            },
            ParseOutcome::Fatal { message, rest } => ParseOutcome::Fatal {
                message: format!("{}: {}", self.context.to_string(), message),
                rest,
            },
            success => success,
        }
    }

    fn label(&self) -> Option<&str> {
        self.parser.label()
    }
}

/// Extension trait adding fluent construction methods to every parser.
pub trait ParserExt<I: ?Sized, O>: Parser<I, O> + Sized {
    fn then<O2, P: Parser<I, O2>>(self, other: P) -> Then<Self, P> {
        Then::new(self, other)
    }

    fn then_left<O2, P: Parser<I, O2>>(self, other: P) -> ThenLeft<Self, P, O2> {
        ThenLeft::new(self, other)
    }

    fn then_right<O2, P: Parser<I, O2>>(self, other: P) -> ThenRight<Self, P, O> {
        ThenRight::new(self, other)
    }

    fn or_else<P: Parser<I, O>>(self, other: P) -> OrElse<Self, P> {
        OrElse::new(self, other)
    }

    fn map<B, F: Fn(O) -> B>(self, f: F) -> Map<Self, F, O> {
        Map::new(self, f)
    }

    fn try_map<B, F: Fn(O) -> Result<B, String>>(self, f: F) -> TryMap<Self, F, O> {
        TryMap::new(self, f)
    }

    fn many(self) -> Many<Self> {
        Many::new(self)
    }

    fn many1(self) -> Many1<Self> {
        Many1::new(self)
    }

    fn optional(self) -> Optional<Self> {
        Optional::new(self)
    }

    fn separated_by<OS, S: Parser<I, OS>>(self, separator: S) -> SeparatedList<Self, S, OS> {
        SeparatedList::new(self, separator)
    }

    fn commit(self) -> Commit<Self> {
        Commit::new(self)
    }

    fn relax(self) -> Relax<Self> {
        Relax::new(self)
    }

    fn phrase(self) -> Phrase<Self> {
        Phrase::new(self)
    }

    fn named(self, name: &str) -> Named<Self> {
        Named::new(self, name)
    }

    fn with_context<C: ToString>(self, context: C) -> WithContext<Self, C> {
        WithContext::new(self, context)
    }

    fn cast<B>(self) -> Cast<Self, O, B>
    where
        O: Into<B>,
    {
        Cast::new(self)
    }

    fn as_unit(self) -> AsUnit<Self, O> {
        AsUnit::new(self)
    }

    fn memo(self) -> Memo<Self, O> {
        Memo::new(self)
    }

    /// Records invocations under this parser's own label.
    fn log(self) -> Traced<Self> {
        Traced::new(self)
    }

    fn traced(self, label: &str) -> Traced<Self> {
        Traced::labeled(self, label)
    }

    fn boxed(self) -> BoxedParser<I, O>
    where
        Self: 'static,
    {
        Box::new(self)
    }

    fn shared(self) -> Rc<dyn Parser<I, O>>
    where
        Self: 'static,
    {
        Rc::new(self)
    }
}

impl<I: ?Sized, O, P: Parser<I, O>> ParserExt<I, O> for P {}
