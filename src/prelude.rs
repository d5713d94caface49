//! Free-function constructors for every combinator, plus the items a grammar
//! module usually needs in scope.
//!
//! ```ignore
//! use packrat::prelude::*;
//!
//! let digit = satisfy(|c: &char| c.to_digit(10));
//! let digits = many1(digit);
//! ```

pub use crate::combinators::ParserExt;
pub use crate::core::{BoxedParser, ParseError, ParseOutcome, Parser};
pub use crate::forward::Forward;
pub use crate::memo::MemoTable;
pub use crate::primitives::{
    any, equal, fail, from_fn, lexeme, literal, pattern, satisfy, succeed, whitespace,
};
pub use crate::sequence::{Input, Sequence};
pub use crate::session::ParseSession;
pub use crate::trace::TraceLog;

use crate::combinators::*;
use crate::memo::Memo;
use crate::trace::Traced;

pub fn then<P1, P2, I, O1, O2>(parser1: P1, parser2: P2) -> Then<P1, P2>
where
    I: ?Sized,
    P1: Parser<I, O1>,
    P2: Parser<I, O2>,
{
    Then::new(parser1, parser2)
}

pub fn left<P1, P2, I, O1, O2>(parser1: P1, parser2: P2) -> ThenLeft<P1, P2, O2>
where
    I: ?Sized,
    P1: Parser<I, O1>,
    P2: Parser<I, O2>,
{
    ThenLeft::new(parser1, parser2)
}

pub fn right<P1, P2, I, O1, O2>(parser1: P1, parser2: P2) -> ThenRight<P1, P2, O1>
where
    I: ?Sized,
    P1: Parser<I, O1>,
    P2: Parser<I, O2>,
{
    ThenRight::new(parser1, parser2)
}

pub fn delimited<L, P, R, I, O, OL, OR>(left: L, parser: P, right: R) -> Delimited<L, P, R, OL, OR>
where
    I: ?Sized,
    L: Parser<I, OL>,
    P: Parser<I, O>,
    R: Parser<I, OR>,
{
    Delimited::new(left, parser, right)
}

pub fn or_else<P1, P2, I, O>(parser1: P1, parser2: P2) -> OrElse<P1, P2>
where
    I: ?Sized,
    P1: Parser<I, O>,
    P2: Parser<I, O>,
{
    OrElse::new(parser1, parser2)
}

pub fn choice<I: ?Sized, O>(parsers: Vec<BoxedParser<I, O>>) -> Choice<I, O> {
    Choice::new(parsers)
}

pub fn map<P, F, A, B, I>(parser: P, f: F) -> Map<P, F, A>
where
    I: ?Sized,
    P: Parser<I, A>,
    F: Fn(A) -> B,
{
    Map::new(parser, f)
}

pub fn try_map<P, F, A, B, I>(parser: P, f: F) -> TryMap<P, F, A>
where
    I: ?Sized,
    P: Parser<I, A>,
    F: Fn(A) -> Result<B, String>,
{
    TryMap::new(parser, f)
}

pub fn cast<P, I, A, B>(parser: P) -> Cast<P, A, B>
where
    I: ?Sized,
    P: Parser<I, A>,
    A: Into<B>,
{
    Cast::new(parser)
}

pub fn as_unit<I, O, P>(parser: P) -> AsUnit<P, O>
where
    I: ?Sized,
    P: Parser<I, O>,
{
    AsUnit::new(parser)
}

pub fn many<P, I, O>(parser: P) -> Many<P>
where
    I: ?Sized,
    P: Parser<I, O>,
{
    Many::new(parser)
}

pub fn many1<P, I, O>(parser: P) -> Many1<P>
where
    I: ?Sized,
    P: Parser<I, O>,
{
    Many1::new(parser)
}

pub fn optional<P, I, O>(parser: P) -> Optional<P>
where
    I: ?Sized,
    P: Parser<I, O>,
{
    Optional::new(parser)
}

pub fn separated_list<P, S, I, O, OS>(item_parser: P, separator_parser: S) -> SeparatedList<P, S, OS>
where
    I: ?Sized,
    P: Parser<I, O>,
    S: Parser<I, OS>,
{
    SeparatedList::new(item_parser, separator_parser)
}

pub fn commit<P, I, O>(parser: P) -> Commit<P>
where
    I: ?Sized,
    P: Parser<I, O>,
{
    Commit::new(parser)
}

pub fn relax<P, I, O>(parser: P) -> Relax<P>
where
    I: ?Sized,
    P: Parser<I, O>,
{
    Relax::new(parser)
}

pub fn phrase<P, I, O>(parser: P) -> Phrase<P>
where
    I: ?Sized + Input,
    P: Parser<I, O>,
{
    Phrase::new(parser)
}

pub fn named<P, I, O>(parser: P, name: &str) -> Named<P>
where
    I: ?Sized,
    P: Parser<I, O>,
{
    Named::new(parser, name)
}

pub fn with_context<P, I, O, C>(parser: P, c: C) -> WithContext<P, C>
where
    I: ?Sized,
    P: Parser<I, O>,
    C: ToString,
{
    WithContext::new(parser, c)
}

pub fn memo<P, I, O>(parser: P) -> Memo<P, O>
where
    I: ?Sized,
    O: Clone + 'static,
    P: Parser<I, O>,
{
    Memo::new(parser)
}

pub fn trace<P, I, O>(parser: P, label: &str) -> Traced<P>
where
    I: ?Sized,
    P: Parser<I, O>,
{
    Traced::labeled(parser, label)
}

pub fn forward<I: ?Sized, O>() -> Forward<I, O> {
    Forward::new()
}
