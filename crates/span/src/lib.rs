//! This module contains the implementation of spans for jackc,
//! and various utilities for working with them.

use std::ops::Range;

/// Represents a span of bytes in some source string.
///
/// This type is just like [`std::ops::Range<usize>`],
/// but unlike the standard Range, it is marked [`std::marker::Copy`].
///
/// It is used for highlighting code in emitted diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
  pub start: usize,
  pub end: usize,
}

impl Span {
  /// Create a new span which starts at `self.start` and ends at `other.end`.
  pub fn join(&self, other: Span) -> Span {
    Span {
      start: self.start,
      end: other.end,
    }
  }

  pub fn range(&self) -> Range<usize> {
    Range {
      start: self.start,
      end: self.end,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.start == self.end
  }

  /// 1-based line number of `self.start` within `src`.
  ///
  /// Used by the terse `<file>:<line>: <error>` diagnostic format; the rich
  /// `jackc_diag` renderer computes its own via `Snippet`.
  pub fn line_in(&self, src: &str) -> usize {
    src[..self.start.min(src.len())].split('\n').count()
  }
}

impl From<Range<usize>> for Span {
  fn from(value: Range<usize>) -> Self {
    Self {
      start: value.start,
      end: value.end,
    }
  }
}

impl From<Span> for Range<usize> {
  fn from(value: Span) -> Self {
    Range {
      start: value.start,
      end: value.end,
    }
  }
}

impl From<(usize, usize)> for Span {
  fn from(value: (usize, usize)) -> Self {
    Span {
      start: value.0,
      end: value.1,
    }
  }
}

impl From<Span> for (usize, usize) {
  fn from(value: Span) -> Self {
    (value.start, value.end)
  }
}

impl std::fmt::Display for Span {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}..{}", self.start, self.end)
  }
}
