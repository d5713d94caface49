//! # Input Sequences
//!
//! A [`Sequence`] is an immutable, positioned view over an input source. Views
//! are `Copy`: advancing produces a new view over the same source without
//! copying any input. The position (an index in the source's own units) is
//! the view's identity, which is what makes it usable as a memoization key.
//!
//! A view may carry references to a [`MemoTable`] and a [`TraceLog`]. Those
//! references travel with every view derived from it, so all parsers invoked
//! during one top-level parse share the same table and log.

use std::fmt;
use std::hash::{Hash, Hasher};

use thiserror::Error;

use crate::memo::MemoTable;
use crate::trace::TraceLog;

/// Adapts a concrete input source to element-at-a-time access.
///
/// Positions are measured in the source's native units: elements for slices,
/// bytes for `str` (always on a char boundary when produced by this crate).
pub trait Input {
    /// The element type yielded at each position
    type Element: Clone;

    /// Returns the element at `pos` and the position right after it,
    /// or `None` when `pos` is at (or past) the end of the input.
    fn element_at(&self, pos: usize) -> Option<(Self::Element, usize)>;

    /// Total length of the input in position units
    fn input_len(&self) -> usize;

    /// Whether `pos` starts an element (or is the end of the input).
    fn is_boundary(&self, pos: usize) -> bool {
        pos <= self.input_len()
    }
}

impl<T: Clone> Input for [T] {
    type Element = T;

    fn element_at(&self, pos: usize) -> Option<(T, usize)> {
        self.get(pos).map(|element| (element.clone(), pos + 1))
    }

    fn input_len(&self) -> usize {
        self.len()
    }
}

impl Input for str {
    type Element = char;

    fn element_at(&self, pos: usize) -> Option<(char, usize)> {
        self.get(pos..)
            .and_then(|rest| rest.chars().next())
            .map(|c| (c, pos + c.len_utf8()))
    }

    fn input_len(&self) -> usize {
        self.len()
    }

    fn is_boundary(&self, pos: usize) -> bool {
        self.is_char_boundary(pos)
    }
}

/// Error raised when a view cannot yield or reach the requested position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("End of input at position {position}")]
    EndOfInput { position: usize },
    #[error("Position {position} is not on an element boundary")]
    NotOnBoundary { position: usize },
}

/// A read-only, positioned view over an input source.
pub struct Sequence<'a, I: ?Sized> {
    source: &'a I,
    position: usize,
    memo: Option<&'a MemoTable>,
    trace: Option<&'a TraceLog>,
}

impl<'a, I: ?Sized + Input> Sequence<'a, I> {
    /// Creates a view at the start of `source` with no memo table or trace log.
    pub fn new(source: &'a I) -> Self {
        Self {
            source,
            position: 0,
            memo: None,
            trace: None,
        }
    }

    /// Returns this view wired to a memo table for packrat parsing.
    pub fn with_memo(self, memo: &'a MemoTable) -> Self {
        Self {
            memo: Some(memo),
            ..self
        }
    }

    /// Returns this view wired to a trace log.
    pub fn with_trace(self, trace: &'a TraceLog) -> Self {
        Self {
            trace: Some(trace),
            ..self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.position >= self.source.input_len()
    }

    /// Element at the current position.
    pub fn first(&self) -> Result<I::Element, SequenceError> {
        self.source
            .element_at(self.position)
            .map(|(element, _)| element)
            .ok_or(SequenceError::EndOfInput {
                position: self.position,
            })
    }

    /// The view advanced by one element.
    pub fn rest(&self) -> Result<Self, SequenceError> {
        self.source
            .element_at(self.position)
            .map(|(_, next)| self.at(next))
            .ok_or(SequenceError::EndOfInput {
                position: self.position,
            })
    }

    /// The view advanced by `units` position units.
    ///
    /// Fails when the advance would run past the end of the input or land
    /// inside an element (a multi-byte char for `str`).
    pub fn advance(&self, units: usize) -> Result<Self, SequenceError> {
        let target = self.position + units;
        if target > self.source.input_len() {
            return Err(SequenceError::EndOfInput {
                position: self.source.input_len(),
            });
        }
        if !self.source.is_boundary(target) {
            return Err(SequenceError::NotOnBoundary { position: target });
        }
        Ok(self.at(target))
    }

    /// Remaining length in position units.
    pub fn len(&self) -> usize {
        self.source.input_len().saturating_sub(self.position)
    }
}

impl<'a, I: ?Sized> Sequence<'a, I> {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn source(&self) -> &'a I {
        self.source
    }

    pub fn memo_table(&self) -> Option<&'a MemoTable> {
        self.memo
    }

    pub fn trace_log(&self) -> Option<&'a TraceLog> {
        self.trace
    }

    /// A view over the same source (and the same memo/trace wiring) at `position`.
    pub(crate) fn at(&self, position: usize) -> Self {
        Self {
            position,
            ..*self
        }
    }

    fn source_addr(&self) -> *const () {
        self.source as *const I as *const ()
    }
}

impl<'a> Sequence<'a, str> {
    /// The remaining text from the current position.
    ///
    /// Used by pattern recognizers to match anchored at the current position
    /// without copying the input.
    pub fn as_str(&self) -> &'a str {
        self.source.get(self.position..).unwrap_or("")
    }
}

impl<'a, T> Sequence<'a, [T]> {
    /// The remaining elements from the current position.
    pub fn as_slice(&self) -> &'a [T] {
        self.source.get(self.position..).unwrap_or(&[])
    }
}

impl<I: ?Sized> Clone for Sequence<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: ?Sized> Copy for Sequence<'_, I> {}

// Two views are the same view when they point into the same source at the
// same position; memo/trace wiring does not take part in identity.
impl<I: ?Sized> PartialEq for Sequence<'_, I> {
    fn eq(&self, other: &Self) -> bool {
        self.source_addr() == other.source_addr() && self.position == other.position
    }
}

impl<I: ?Sized> Eq for Sequence<'_, I> {}

impl<I: ?Sized> Hash for Sequence<'_, I> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source_addr().hash(state);
        self.position.hash(state);
    }
}

impl<I: ?Sized> fmt::Debug for Sequence<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("position", &self.position)
            .field("memo", &self.memo.is_some())
            .field("trace", &self.trace.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_first_and_rest_over_slice() {
        let input = [1, 2, 3];
        let seq = Sequence::new(&input[..]);

        assert_eq!(seq.first(), Ok(1));
        let rest = seq.rest().unwrap();
        assert_eq!(rest.position(), 1);
        assert_eq!(rest.first(), Ok(2));
        assert_eq!(rest.len(), 2);
        assert_eq!(rest.as_slice(), &[2, 3]);
    }

    #[test]
    fn test_empty_sequence_fails_with_end_of_input() {
        let input: [i32; 0] = [];
        let seq = Sequence::new(&input[..]);

        assert!(seq.is_empty());
        assert_eq!(seq.first(), Err(SequenceError::EndOfInput { position: 0 }));
        assert_eq!(
            seq.rest().unwrap_err(),
            SequenceError::EndOfInput { position: 0 }
        );
    }

    #[test]
    fn test_str_positions_are_byte_offsets() {
        let seq = Sequence::new("héllo");

        let after_h = seq.rest().unwrap();
        assert_eq!(after_h.first(), Ok('é'));
        let after_e = after_h.rest().unwrap();
        assert_eq!(after_e.position(), 3);
        assert_eq!(after_e.as_str(), "llo");
    }

    #[test]
    fn test_advance_checks_bounds() {
        let seq = Sequence::new("abc");

        assert_eq!(seq.advance(3).unwrap().as_str(), "");
        assert!(seq.advance(3).unwrap().is_empty());
        assert_eq!(
            seq.advance(4).unwrap_err(),
            SequenceError::EndOfInput { position: 3 }
        );
    }

    #[test]
    fn test_advance_rejects_positions_inside_a_char() {
        let seq = Sequence::new("éa");

        assert_eq!(
            seq.advance(1).unwrap_err(),
            SequenceError::NotOnBoundary { position: 1 }
        );
        let after_e = seq.advance(2).unwrap();
        assert!(!after_e.is_empty());
        assert_eq!(after_e.first(), Ok('a'));
        assert_eq!(after_e.as_str(), "a");
    }

    #[test]
    fn test_views_at_same_position_are_interchangeable() {
        let text = String::from("abcd");
        let a = Sequence::new(text.as_str()).advance(2).unwrap();
        let b = Sequence::new(text.as_str()).rest().unwrap().rest().unwrap();

        assert_eq!(a, b);
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_views_over_different_sources_differ() {
        let first = String::from("abc");
        let second = String::from("abc");

        assert_ne!(
            Sequence::new(first.as_str()),
            Sequence::new(second.as_str())
        );
    }

    #[test]
    fn test_wiring_travels_with_derived_views() {
        let memo = MemoTable::new();
        let trace = TraceLog::new();
        let seq = Sequence::new("xy").with_memo(&memo).with_trace(&trace);

        let rest = seq.rest().unwrap();
        assert!(rest.memo_table().is_some());
        assert!(rest.trace_log().is_some());
    }
}
