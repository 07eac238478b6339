use guide_stepper_syntax::SyntaxNode;
use serde::Serialize;

/// A byte range `[start, end)` into the source document.
///
/// Slicing the source with a span reproduces the exact text the node was
/// parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    pub fn of(node: &SyntaxNode) -> Self {
        let range = node.text_range();
        Self {
            start: usize::from(range.start()),
            end: usize::from(range.end()),
        }
    }

    /// The source text covered by this span.
    pub fn slice(self, source: &str) -> &str {
        &source[self.start..self.end]
    }
}
