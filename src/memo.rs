//! # Packrat Memoization
//!
//! [`Memo`] caches the outcome of a parser by `(rule identity, position)` in
//! the [`MemoTable`] reachable from the input view. Identity comes from a
//! [`RuleId`] assigned when the memoizing wrapper is built, never from the
//! grammar's structure, so two structurally identical rules get separate
//! entries.
//!
//! The table is owned by one top-level parse. It must be cleared (or created
//! fresh) before parsing a different input; entries are only meaningful for
//! the source they were computed on.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::core::{ParseOutcome, Parser};
use crate::sequence::Sequence;

static NEXT_RULE_ID: AtomicUsize = AtomicUsize::new(0);

/// Stable identity of a memoized rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(usize);

impl RuleId {
    /// Allocates an identity no other rule in the process shares.
    pub fn fresh() -> Self {
        RuleId(NEXT_RULE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule#{}", self.0)
    }
}

/// Lifetime-free form of an outcome; positions stand in for remainders.
enum Entry {
    InProgress,
    Success { value: Box<dyn Any>, end: usize },
    Recoverable { message: String, end: usize },
    Fatal { message: String, end: usize },
}

/// Cache of parse outcomes keyed by rule identity and input position.
#[derive(Default)]
pub struct MemoTable {
    entries: RefCell<HashMap<(RuleId, usize), Entry>>,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl MemoTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every entry and resets the statistics.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
        self.hits.set(0);
        self.misses.set(0);
    }

    /// Number of cached outcomes.
    pub fn len(&self) -> usize {
        self.entries
            .borrow()
            .values()
            .filter(|entry| !matches!(entry, Entry::InProgress))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hits(&self) -> usize {
        self.hits.get()
    }

    pub fn misses(&self) -> usize {
        self.misses.get()
    }

    fn lookup<'a, I: ?Sized, O: Clone + 'static>(
        &self,
        rule: RuleId,
        input: Sequence<'a, I>,
    ) -> Lookup<'a, I, O> {
        let entries = self.entries.borrow();
        let Some(entry) = entries.get(&(rule, input.position())) else {
            return Lookup::Miss;
        };
        let outcome = match entry {
            Entry::InProgress => return Lookup::Reentered,
            Entry::Success { value, end } => match value.downcast_ref::<O>() {
                Some(value) => ParseOutcome::success(value.clone(), input.at(*end)),
                None => return Lookup::Miss,
            },
            Entry::Recoverable { message, end } => {
                ParseOutcome::recoverable(message.clone(), input.at(*end))
            }
            Entry::Fatal { message, end } => ParseOutcome::fatal(message.clone(), input.at(*end)),
        };
        Lookup::Hit(outcome)
    }

    fn begin(&self, rule: RuleId, position: usize) {
        self.entries
            .borrow_mut()
            .insert((rule, position), Entry::InProgress);
    }

    fn store<I: ?Sized, O: Clone + 'static>(
        &self,
        rule: RuleId,
        position: usize,
        outcome: &ParseOutcome<'_, I, O>,
    ) {
        let entry = match outcome {
            ParseOutcome::Success { value, rest } => Entry::Success {
                value: Box::new(value.clone()),
                end: rest.position(),
            },
            ParseOutcome::Recoverable { message, rest } => Entry::Recoverable {
                message: message.clone(),
                end: rest.position(),
            },
            ParseOutcome::Fatal { message, rest } => Entry::Fatal {
                message: message.clone(),
                end: rest.position(),
            },
        };
        self.entries.borrow_mut().insert((rule, position), entry);
    }
}

impl fmt::Debug for MemoTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoTable")
            .field("entries", &self.len())
            .field("hits", &self.hits())
            .field("misses", &self.misses())
            .finish()
    }
}

enum Lookup<'a, I: ?Sized, O> {
    Hit(ParseOutcome<'a, I, O>),
    Reentered,
    Miss,
}

/// Memo: Caches the wrapped parser's outcome per input position
///
/// Without a memo table on the input view this parser simply delegates, so
/// memoization never changes results, only cost. Clones share the rule
/// identity, and with it the cache entries.
#[derive(Clone)]
pub struct Memo<P, O> {
    parser: P,
    id: RuleId,
    _phantom: PhantomData<O>,
}

impl<P, O> Memo<P, O> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            id: RuleId::fresh(),
            _phantom: PhantomData,
        }
    }

    pub fn id(&self) -> RuleId {
        self.id
    }
}

impl<I, O, P> Parser<I, O> for Memo<P, O>
where
    I: ?Sized,
    O: Clone + 'static,
    P: Parser<I, O>,
{
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, O> {
        let Some(table) = input.memo_table() else {
            return self.parser.parse(input);
        };

        match table.lookup::<I, O>(self.id, input) {
            Lookup::Hit(outcome) => {
                table.hits.set(table.hits.get() + 1);
                tracing::trace!(
                    target: "parser::memo",
                    rule = %self.id,
                    label = self.parser.label(),
                    position = input.position(),
                    "memo hit"
                );
                return outcome;
            }
            Lookup::Reentered => {
                tracing::warn!(
                    target: "parser::memo",
                    rule = %self.id,
                    label = self.parser.label(),
                    position = input.position(),
                    "rule re-entered at the same position; failing the left-recursive path"
                );
                return ParseOutcome::recoverable("left recursion", input);
            }
            Lookup::Miss => {}
        }

        table.misses.set(table.misses.get() + 1);
        tracing::trace!(
            target: "parser::memo",
            rule = %self.id,
            label = self.parser.label(),
            position = input.position(),
            "memo miss"
        );
        table.begin(self.id, input.position());
        let outcome = self.parser.parse(input);
        table.store(self.id, input.position(), &outcome);
        outcome
    }

    fn label(&self) -> Option<&str> {
        self.parser.label()
    }
}
