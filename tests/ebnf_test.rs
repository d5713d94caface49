mod common;

use std::rc::Rc;

use packrat::prelude::*;
use packrat::EngineConfig;
use pretty_assertions::assert_eq;

#[derive(Debug, Clone, PartialEq)]
enum Expression {
    Terminal(String),
    Identifier(String),
    Option(Box<Expression>),
    Repetition(Box<Expression>),
    Repetition1(Box<Expression>),
    Concatenation(Box<Expression>, Box<Expression>),
    Alternation(Box<Expression>, Box<Expression>),
}

#[derive(Debug, Clone, PartialEq)]
struct Rule {
    name: String,
    expression: Expression,
}

#[derive(Debug, Clone, PartialEq)]
struct Grammar {
    rules: Vec<Rule>,
}

fn terminal(text: &str) -> Expression {
    Expression::Terminal(text.to_string())
}

fn ident(name: &str) -> Expression {
    Expression::Identifier(name.to_string())
}

/// Whitespace and `/* ... */` comments.
fn skip() -> impl Parser<str, String> + Clone + 'static {
    pattern(r"(?:\s|/\*(?s:.*?)\*/)*").expect("skip pattern compiles")
}

fn token(text: &'static str) -> impl Parser<str, String> + Clone + 'static {
    skip().then_right(literal(text))
}

fn quoted(quote: &'static str, body: &'static str) -> impl Parser<str, String> + 'static {
    literal(quote)
        .then_right(pattern(body).expect("terminal pattern compiles"))
        .then_left(literal(quote).commit())
}

fn grammar() -> BoxedParser<str, Grammar> {
    let alternatives = Forward::<str, Expression>::new();

    let identifier = skip()
        .then_right(pattern("[A-Za-z][0-9A-Za-z_]*").expect("identifier pattern compiles"))
        .named("ident")
        .log()
        .shared();

    let terminal_expr = skip()
        .then_right(quoted("'", "[^']*").or_else(quoted("\"", "[^\"]*")))
        .map(Expression::Terminal)
        .named("termExpr")
        .log();
    let identifier_expr = identifier
        .clone()
        .map(Expression::Identifier)
        .named("identExpr")
        .log();
    let group_expr = token("(")
        .then_right(alternatives.clone())
        .then_left(token(")").commit())
        .named("groupExpr")
        .log();
    let primary = terminal_expr.or_else(identifier_expr).or_else(group_expr);

    let suffix = skip().then_right(pattern(r"[?*+]").expect("suffix pattern compiles"));
    let quantified = primary
        .then(suffix.many())
        .map(|(expression, suffixes): (Expression, Vec<String>)| {
            suffixes
                .iter()
                .fold(expression, |inner, suffix| match suffix.as_str() {
                    "?" => Expression::Option(Box::new(inner)),
                    "*" => Expression::Repetition(Box::new(inner)),
                    _ => Expression::Repetition1(Box::new(inner)),
                })
        })
        .memo()
        .named("quantExpr")
        .log();

    let concatenation: Rc<dyn Parser<str, Expression>> = quantified
        .many1()
        .map(|items: Vec<Expression>| {
            items
                .into_iter()
                .reduce(|left, right| Expression::Concatenation(Box::new(left), Box::new(right)))
                .expect("many1 yields at least one item")
        })
        .memo()
        .named("concatExpr")
        .log()
        .shared();

    let alternation = concatenation
        .clone()
        .then(token("|").then_right(concatenation.commit()).many())
        .map(|(first, rest): (Expression, Vec<Expression>)| {
            rest.into_iter().fold(first, |left, right| {
                Expression::Alternation(Box::new(left), Box::new(right))
            })
        })
        .memo()
        .named("altExpr")
        .log();
    alternatives
        .bind(alternation)
        .expect("alternatives are bound once");

    let rule = identifier
        .then_left(token(":").commit())
        .then(alternatives)
        .then_left(token(";").commit())
        .map(|(name, expression): (String, Expression)| Rule { name, expression })
        .named("rule")
        .log();

    rule.many1()
        .then_left(skip())
        .map(|rules: Vec<Rule>| Grammar { rules })
        .relax()
        .named("grammar")
        .log()
        .boxed()
}

fn parse(source: &str) -> Result<Grammar, ParseError> {
    let grammar = grammar();
    let mut session = ParseSession::default();
    session.parse_phrase(&grammar, source)
}

#[test]
fn it_parses_a_single_rule() {
    let parsed = parse("greeting : 'hello' name ;").unwrap();

    assert_eq!(
        parsed,
        Grammar {
            rules: vec![Rule {
                name: "greeting".to_string(),
                expression: Expression::Concatenation(
                    Box::new(terminal("hello")),
                    Box::new(ident("name"))
                ),
            }]
        }
    );
}

#[test]
fn it_binds_concatenation_tighter_than_alternation() {
    let parsed = parse(r#"x : "a" b | c ;"#).unwrap();

    assert_eq!(
        parsed.rules[0].expression,
        Expression::Alternation(
            Box::new(Expression::Concatenation(
                Box::new(terminal("a")),
                Box::new(ident("b"))
            )),
            Box::new(ident("c"))
        )
    );
}

#[test]
fn it_applies_suffixes_and_groups() {
    let parsed = parse("list : item ( ',' item )* ';'? ;").unwrap();

    assert_eq!(
        parsed.rules[0].expression,
        Expression::Concatenation(
            Box::new(Expression::Concatenation(
                Box::new(ident("item")),
                Box::new(Expression::Repetition(Box::new(
                    Expression::Concatenation(Box::new(terminal(",")), Box::new(ident("item")))
                )))
            )),
            Box::new(Expression::Option(Box::new(terminal(";"))))
        )
    );
}

#[test]
fn it_parses_several_rules_with_comments() {
    let source = r#"
        /* entry point */
        grammar : rule+ ;
        rule    : ident ':' alternatives ';' ; /* one production */
        ident   : letter ( letter | digit | '_' )* ;
    "#;

    let parsed = parse(source).unwrap();

    let names: Vec<&str> = parsed.rules.iter().map(|rule| rule.name.as_str()).collect();
    assert_eq!(names, vec!["grammar", "rule", "ident"]);
    assert_eq!(
        parsed.rules[0].expression,
        Expression::Repetition1(Box::new(ident("rule")))
    );
}

#[test]
fn it_reports_a_missing_semicolon() {
    let source = "a : 'x' b : 'y' ;";
    let error = parse(source).unwrap_err();

    assert_eq!(error.message(), "expected ';'");
    // the second rule's ':' is where the first rule should have ended
    assert_eq!(error.position(), 10);
}

#[test]
fn it_reports_an_unterminated_terminal() {
    let error = parse("a : 'x ;").unwrap_err();

    assert_eq!(error.message(), "expected '''");
}

#[test]
fn it_traces_rule_invocations() {
    let grammar = grammar();
    let mut session = ParseSession::new(EngineConfig::default().with_trace(true));

    session.parse_phrase(&grammar, "a : b ;").unwrap();

    let entries = session.trace_log().entries();
    let outermost = entries.last().expect("grammar is traced");
    assert_eq!(outermost.label, "grammar");
    assert_eq!(outermost.depth, 0);
    assert!(entries.iter().any(|entry| entry.label == "rule" && entry.depth == 1));
    assert!(session.trace_log().render().contains("quantExpr @"));
}
