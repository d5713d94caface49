use thiserror::Error;

use crate::config::ConfigError;
use crate::core::ParseError;
use crate::sequence::SequenceError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Grammar error: {0}")]
    Grammar(#[from] GrammarError),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Sequence error: {0}")]
    Sequence(#[from] SequenceError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

pub type EngineResult<T> = Result<T, Error>;

/// Errors raised while building a grammar, before any input is parsed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GrammarError {
    #[error("Forward reference already bound (rejected target: {label:?})")]
    AlreadyBound { label: Option<String> },
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
