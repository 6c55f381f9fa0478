//! Byte spans and a sorted, disjoint span index answering membership
//! queries by binary search.

use serde::{Deserialize, Serialize};

/// A half-open byte span `[begin, end)` of the source text.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub begin: usize,
    pub end: usize,
}

impl Span {
    pub fn new(begin: usize, end: usize) -> Self {
        Self {
            begin,
            end: end.max(begin),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

/// Disjoint spans sorted by start. Overlapping or touching input spans are
/// merged on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanSet {
    spans: Vec<Span>,
}

impl SpanSet {
    pub fn new(mut spans: Vec<Span>) -> Self {
        spans.retain(|s| !s.is_empty());
        spans.sort();

        let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
        for span in spans {
            match merged.last_mut() {
                Some(last) if span.begin <= last.end => last.end = last.end.max(span.end),
                _ => merged.push(span),
            }
        }
        Self { spans: merged }
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// The last span starting at or before `index`.
    fn candidate(&self, index: usize) -> Option<&Span> {
        let idx = self.spans.partition_point(|s| s.begin <= index);
        idx.checked_sub(1).map(|i| &self.spans[i])
    }

    /// True when the character at `index` belongs to a span: `begin <= index < end`.
    pub fn covers(&self, index: usize) -> bool {
        self.candidate(index).is_some_and(|s| index < s.end)
    }

    /// True when a cursor at `offset` sits strictly inside a span:
    /// `begin < offset < end`.
    pub fn surrounds(&self, offset: usize) -> bool {
        self.candidate(offset)
            .is_some_and(|s| s.begin < offset && offset < s.end)
    }

    /// True when a cursor at `offset` falls in `(begin, end]`. A cursor on
    /// the opening delimiter is outside; a cursor at the very end is inside.
    pub fn trails(&self, offset: usize) -> bool {
        let idx = self.spans.partition_point(|s| s.begin < offset);
        idx.checked_sub(1)
            .is_some_and(|i| offset <= self.spans[i].end)
    }
}

impl FromIterator<Span> for SpanSet {
    fn from_iter<I: IntoIterator<Item = Span>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
