//! # Parse Sessions
//!
//! A [`ParseSession`] owns the per-parse services (memo table and trace log)
//! and wires them into the input view according to its [`EngineConfig`].
//! Both are reset at the start of every parse, so one session can be reused
//! for many inputs.

use crate::combinators::{Phrase, Relax};
use crate::config::EngineConfig;
use crate::core::{ParseError, ParseOutcome, Parser};
use crate::memo::MemoTable;
use crate::sequence::{Input, Sequence};
use crate::trace::TraceLog;

/// Long-lived runner for top-level parses.
#[derive(Debug)]
pub struct ParseSession {
    config: EngineConfig,
    memo: MemoTable,
    trace: TraceLog,
}

impl ParseSession {
    pub fn new(config: EngineConfig) -> Self {
        let trace = match config.trace_limit {
            Some(limit) => TraceLog::with_limit(limit),
            None => TraceLog::new(),
        };
        Self {
            config,
            memo: MemoTable::new(),
            trace,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Memo table of the most recent parse.
    pub fn memo_table(&self) -> &MemoTable {
        &self.memo
    }

    /// Trace log of the most recent parse.
    pub fn trace_log(&self) -> &TraceLog {
        &self.trace
    }

    /// Runs `parser` from the start of `source`.
    ///
    /// The outcome borrows the session, so the tables cannot be reset while
    /// views into this parse are still alive.
    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(memoize = self.config.memoize, trace = self.config.trace)
    )]
    pub fn parse<'a, I, O, P>(&'a mut self, parser: &P, source: &'a I) -> ParseOutcome<'a, I, O>
    where
        I: ?Sized + Input,
        P: Parser<I, O> + ?Sized,
    {
        self.memo.clear();
        self.trace.clear();

        let mut input = Sequence::new(source);
        if self.config.memoize {
            input = input.with_memo(&self.memo);
        }
        if self.config.trace {
            input = input.with_trace(&self.trace);
        }

        let outcome = parser.parse(input);
        tracing::debug!(
            outcome = %outcome.kind(),
            position = outcome.position(),
            memo_hits = self.memo.hits(),
            memo_misses = self.memo.misses(),
            trace_entries = self.trace.len(),
            "parse finished"
        );
        outcome
    }

    /// Runs `parser` and requires it to consume the whole of `source`.
    ///
    /// Fatal failures are reported like recoverable ones.
    pub fn parse_phrase<I, O, P>(&mut self, parser: &P, source: &I) -> Result<O, ParseError>
    where
        I: ?Sized + Input,
        P: Parser<I, O> + ?Sized,
    {
        let whole = Phrase::new(Relax::new(parser));
        self.parse(&whole, source)
            .into_result()
            .map(|(value, _)| value)
    }
}

impl Default for ParseSession {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
