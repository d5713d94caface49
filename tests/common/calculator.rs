//! Integer arithmetic grammar used as a client of the combinator API.
//!
//! ```text
//! expr   := term (("+" | "-") term)*
//! term   := factor (("*" | "/") factor)*
//! factor := number | "(" expr ")"
//! ```
//!
//! Operators are folded left to right. Everything after an operator or an
//! opening parenthesis is committed.
//!
//! The backtracking variant accepts the same language with
//! `expr := term "+" expr | term "-" expr | term` (and likewise for `term`),
//! so each failed alternative re-parses the operand it started with.

use std::rc::Rc;

use packrat::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    fn apply(self, lhs: i64, rhs: i64) -> Result<i64, String> {
        let result = match self {
            Op::Add => lhs.checked_add(rhs),
            Op::Sub => lhs.checked_sub(rhs),
            Op::Mul => lhs.checked_mul(rhs),
            Op::Div => lhs.checked_div(rhs),
        };
        result.ok_or_else(|| format!("arithmetic error in {lhs} {self:?} {rhs}"))
    }
}

fn fold(first: i64, rest: Vec<(Op, i64)>) -> Result<i64, String> {
    rest.into_iter()
        .try_fold(first, |acc, (op, rhs)| op.apply(acc, rhs))
}

fn token(text: &'static str) -> impl Parser<str, String> + Clone + 'static {
    lexeme(literal(text))
}

fn operator(first: (&'static str, Op), second: (&'static str, Op)) -> impl Parser<str, Op> + 'static {
    let (first_text, first_op) = first;
    let (second_text, second_op) = second;
    token(first_text)
        .map(move |_| first_op)
        .or_else(token(second_text).map(move |_| second_op))
}

fn rule(parser: BoxedParser<str, i64>, name: &str, memoize: bool) -> Rc<dyn Parser<str, i64>> {
    if memoize {
        parser.memo().named(name).log().shared()
    } else {
        parser.named(name).log().shared()
    }
}

fn factor(expr: &Forward<str, i64>, memoize: bool) -> Rc<dyn Parser<str, i64>> {
    let number = lexeme(pattern(r"\d+").expect("number pattern compiles"))
        .try_map(|digits: String| digits.parse::<i64>().map_err(|e| e.to_string()));
    let group = token("(")
        .then_right(expr.clone().commit())
        .then_left(token(")").commit());
    rule(number.or_else(group).boxed(), "factor", memoize)
}

/// Builds the grammar, optionally memoizing every named rule.
fn build(memoize: bool) -> BoxedParser<str, i64> {
    let expr = Forward::<str, i64>::new();
    let factor = factor(&expr, memoize);

    let term = rule(
        factor
            .clone()
            .then(
                operator(("*", Op::Mul), ("/", Op::Div))
                    .then(factor.with_context("expected operand").commit())
                    .many(),
            )
            .try_map(|(first, rest): (i64, Vec<(Op, i64)>)| fold(first, rest))
            .boxed(),
        "term",
        memoize,
    );

    let sum = term
        .clone()
        .then(
            operator(("+", Op::Add), ("-", Op::Sub))
                .then(term.with_context("expected operand").commit())
                .many(),
        )
        .try_map(|(first, rest): (i64, Vec<(Op, i64)>)| fold(first, rest))
        .named("expr");
    expr.bind(sum).expect("expression is bound once");

    expr.then_left(whitespace()).relax().phrase().boxed()
}

type Chain = (i64, Vec<(Op, i64)>);

/// `operand op1 chain | operand op2 chain | operand`, folded left to right.
///
/// Every alternative starts by re-parsing the same operand at the same
/// position, which is where a memoized operand pays off.
fn chain(
    operand: Rc<dyn Parser<str, i64>>,
    operators: [(&'static str, Op); 2],
) -> impl Parser<str, i64> + 'static {
    let chain = Forward::<str, Chain>::new();
    let mut alternatives: Vec<BoxedParser<str, Chain>> = operators
        .into_iter()
        .map(|(text, op)| {
            operand
                .clone()
                .then_left(token(text))
                .then(chain.clone().with_context("expected operand").commit())
                .map(move |(lhs, (rhs, mut rest)): (i64, Chain)| {
                    rest.insert(0, (op, rhs));
                    (lhs, rest)
                })
                .boxed()
        })
        .collect();
    alternatives.push(operand.map(|value: i64| (value, Vec::new())).boxed());
    chain
        .bind(choice(alternatives))
        .expect("chain is bound once");

    chain.try_map(|(first, rest): Chain| fold(first, rest))
}

/// Same language as [`build`], written with ordered choices whose
/// alternatives share their leading operand instead of repetition.
fn build_backtracking(memoize: bool) -> BoxedParser<str, i64> {
    let expr = Forward::<str, i64>::new();
    let factor = factor(&expr, memoize);
    let term = rule(
        chain(factor, [("*", Op::Mul), ("/", Op::Div)]).boxed(),
        "term",
        memoize,
    );
    expr.bind(chain(term, [("+", Op::Add), ("-", Op::Sub)]).named("expr"))
        .expect("expression is bound once");

    expr.then_left(whitespace()).relax().phrase().boxed()
}

/// Whole-input arithmetic grammar with memoized rules.
pub fn calculator() -> BoxedParser<str, i64> {
    build(true)
}

/// The same grammar without memo wrappers.
pub fn calculator_without_memo() -> BoxedParser<str, i64> {
    build(false)
}

/// Arithmetic grammar built from ordered choices over a shared memoized operand.
pub fn backtracking_calculator() -> BoxedParser<str, i64> {
    build_backtracking(true)
}

/// [`backtracking_calculator`] without memo wrappers.
pub fn backtracking_calculator_without_memo() -> BoxedParser<str, i64> {
    build_backtracking(false)
}

/// Evaluates `source` in a fresh default session.
pub fn evaluate(source: &str) -> Result<i64, ParseError> {
    let grammar = calculator();
    let mut session = ParseSession::default();
    session
        .parse(&grammar, source)
        .into_result()
        .map(|(value, _)| value)
}
