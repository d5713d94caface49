//! # Execution Tracing
//!
//! [`Traced`] records every invocation of the wrapped parser in the
//! [`TraceLog`] reachable from the input view: the label, where the parser
//! started, how it ended, and how deeply it was nested inside other traced
//! parsers. Entries are appended when the invocation finishes, so inner rules
//! appear before the rules that called them.
//!
//! Tracing is purely observational. Independently of the log, each entry is
//! also emitted as a `tracing` event under the `parser::trace` target.

use std::cell::{Cell, RefCell};
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::core::{OutcomeKind, ParseOutcome, Parser};
use crate::sequence::Sequence;

/// A single recorded rule invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub label: String,
    /// Position at entry
    pub position: usize,
    /// Position of the remainder the rule returned
    pub end: usize,
    pub outcome: OutcomeKind,
    /// Number of enclosing traced invocations
    pub depth: usize,
}

/// Ordered, resettable record of traced invocations.
#[derive(Debug, Default)]
pub struct TraceLog {
    entries: RefCell<Vec<TraceEntry>>,
    depth: Cell<usize>,
    limit: Option<usize>,
    dropped: Cell<usize>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log that keeps at most `limit` entries and counts the rest as dropped.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
        self.depth.set(0);
        self.dropped.set(0);
    }

    pub fn entries(&self) -> Vec<TraceEntry> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Entries not recorded because the limit was reached.
    pub fn dropped(&self) -> usize {
        self.dropped.get()
    }

    /// Indented text dump, one line per entry.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in self.entries.borrow().iter() {
            let _ = writeln!(
                out,
                "{}{} @{} -> {} @{}",
                "  ".repeat(entry.depth),
                entry.label,
                entry.position,
                entry.outcome,
                entry.end
            );
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&*self.entries.borrow())
    }

    fn enter(&self) -> usize {
        let depth = self.depth.get();
        self.depth.set(depth + 1);
        depth
    }

    fn exit(&self, entry: TraceEntry) {
        self.depth.set(entry.depth);
        let mut entries = self.entries.borrow_mut();
        match self.limit {
            Some(limit) if entries.len() >= limit => self.dropped.set(self.dropped.get() + 1),
            _ => entries.push(entry),
        }
    }
}

/// Traced: Records each invocation of the wrapped parser
///
/// Uses the explicit label when one was given, otherwise the wrapped
/// parser's own label.
#[derive(Clone)]
pub struct Traced<P> {
    parser: P,
    label: Option<String>,
}

impl<P> Traced<P> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            label: None,
        }
    }

    pub fn labeled(parser: P, label: impl Into<String>) -> Self {
        Self {
            parser,
            label: Some(label.into()),
        }
    }
}

impl<I, O, P> Parser<I, O> for Traced<P>
where
    I: ?Sized,
    P: Parser<I, O>,
{
    fn parse<'a>(&self, input: Sequence<'a, I>) -> ParseOutcome<'a, I, O> {
        let label = <Self as Parser<I, O>>::label(self).unwrap_or("<anonymous>");
        let log = input.trace_log();
        let depth = log.map(TraceLog::enter).unwrap_or_default();

        let outcome = self.parser.parse(input);

        tracing::trace!(
            target: "parser::trace",
            label,
            position = input.position(),
            end = outcome.position(),
            outcome = %outcome.kind(),
            depth,
        );
        if let Some(log) = log {
            log.exit(TraceEntry {
                label: label.to_string(),
                position: input.position(),
                end: outcome.position(),
                outcome: outcome.kind(),
                depth,
            });
        }
        outcome
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref().or_else(|| self.parser.label())
    }
}
