//! # packrat: Memoizing Parser Combinators
//!
//! A small, generic parser-combinator engine. Grammars are ordinary values
//! built by composing parsers; running one over an input yields a three-way
//! outcome instead of an exception.
//!
//! ## Building Blocks
//!
//! ### 1. Input Views
//! Parsers read from an immutable, positioned [`Sequence`] over any source
//! implementing [`Input`] (`str` and slices out of the box). Advancing never
//! copies input, and a view's position is its identity.
//!
//! ### 2. Outcomes
//! Every parse returns a [`ParseOutcome`]:
//! - `Success` with a value and the unconsumed remainder
//! - `Recoverable` failure: an enclosing ordered choice may try the next alternative
//! - `Fatal` failure: the grammar committed to this path, so alternatives are skipped
//!
//! ### 3. Combinators
//! Sequencing, ordered choice, mapping, repetition, commitment and full-match
//! checks live in [`combinators`], available fluently through
//! [`ParserExt`](combinators::ParserExt) or as free functions in [`prelude`].
//!
//! ### 4. Packrat Memoization and Tracing
//! - [`memo`]: caches outcomes per rule and position in a [`MemoTable`]
//! - [`trace`]: records labelled invocations in a [`TraceLog`]
//!
//! Both are observational: they never change what a grammar accepts.
//!
//! ### 5. Recursive Grammars
//! A [`Forward`] reference is created unbound, used inside other rules, and
//! bound once the rule it stands for exists.
//!
//! ## Running a Grammar
//!
//! ```text
//! EngineConfig → ParseSession → Sequence (+ MemoTable, TraceLog) → ParseOutcome
//! ```
//!
//! [`ParseSession`] owns the per-parse tables and resets them for each input.

pub mod combinators;
pub mod config;
pub mod core;
pub mod error;
pub mod forward;
pub mod memo;
pub mod prelude;
pub mod primitives;
pub mod sequence;
pub mod session;
pub mod trace;

// Re-exports
pub use crate::core::{BoxedParser, OutcomeKind, ParseError, ParseOutcome, Parser};
pub use config::{ConfigError, EngineConfig};
pub use error::*;
pub use forward::Forward;
pub use memo::{Memo, MemoTable, RuleId};
pub use sequence::{Input, Sequence, SequenceError};
pub use session::ParseSession;
pub use trace::{TraceEntry, TraceLog, Traced};

#[cfg(test)]
mod tests {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    #[ctor::ctor]
    fn init_tests() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
    }
}
