//! Byte positions and ranges within a template source.

use std::fmt;

/// A byte offset into template source.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BytePos(pub u32);

impl BytePos {
    pub const ZERO: BytePos = BytePos(0);

    pub fn offset(self, offset: u32) -> BytePos {
        BytePos(self.0 + offset)
    }
}

impl fmt::Debug for BytePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BytePos({})", self.0)
    }
}

impl From<usize> for BytePos {
    fn from(pos: usize) -> Self {
        BytePos(u32::try_from(pos).unwrap_or(u32::MAX))
    }
}

impl From<BytePos> for usize {
    fn from(pos: BytePos) -> Self {
        pos.0 as usize
    }
}

/// A half-open byte range covering one expression inside a tag.
///
/// Expressions built by hand (tests, programmatic templates) carry
/// `Span::DUMMY`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start position.
    pub start: BytePos,
    /// End position (exclusive).
    pub end: BytePos,
}

impl Span {
    pub const DUMMY: Span = Span {
        start: BytePos::ZERO,
        end: BytePos::ZERO,
    };

    pub fn new(start: BytePos, end: BytePos) -> Self {
        Span { start, end }
    }

    pub fn from_usize(start: usize, end: usize) -> Self {
        Span {
            start: BytePos::from(start),
            end: BytePos::from(end),
        }
    }

    /// Create a span that covers both `self` and `other`.
    ///
    /// A dummy span never widens a real one.
    pub fn merge(self, other: Span) -> Span {
        if self.is_dummy() {
            return other;
        }
        if other.is_dummy() {
            return self;
        }
        Span {
            start: std::cmp::min(self.start, other.start),
            end: std::cmp::max(self.end, other.end),
        }
    }

    /// Returns true for spans of synthesized expressions.
    pub fn is_dummy(&self) -> bool {
        *self == Span::DUMMY
    }

    /// Returns the length of this span in bytes.
    pub fn len(&self) -> usize {
        (self.end.0.saturating_sub(self.start.0)) as usize
    }

    /// Returns true if this span has zero length.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns the byte range for this span.
    pub fn range(&self) -> std::ops::Range<usize> {
        usize::from(self.start)..usize::from(self.end)
    }

    /// The slice of `source` this span covers, if it lies on char boundaries.
    pub fn text<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.range())
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start.0, self.end.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_ignores_dummy() {
        let real = Span::from_usize(4, 9);
        assert_eq!(real.merge(Span::DUMMY), real);
        assert_eq!(Span::DUMMY.merge(real), real);
    }

    #[test]
    fn test_text() {
        let source = "{{ upper(name) }}";
        let span = Span::from_usize(3, 14);
        assert_eq!(span.text(source), Some("upper(name)"));
        assert_eq!(Span::from_usize(3, 40).text(source), None);
    }
}
