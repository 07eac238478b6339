//! # Code-fence range detection
//!
//! A line-level scan for fenced code blocks, independent of the syntax tree.
//! The preprocessor uses it as a guard: no GuideStepper block that starts on a
//! line inside a fence is ever rewritten.
//!
//! Opening and closing follow the CommonMark rules in
//! [`guide_stepper_syntax::fence`]: a closer must use the opener's character, be
//! at least as long, and carry no info string. Fences still open at the end of
//! the document yield no range.

use guide_stepper_syntax::fence::CodeFence;
use serde::Serialize;

/// Zero-based line indices of a fence's opening and closing lines, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FenceRange {
    pub start: usize,
    pub end: usize,
}

impl FenceRange {
    pub fn contains(&self, line: usize) -> bool {
        self.start <= line && line <= self.end
    }
}

/// Returns the ranges of all complete fenced code blocks, in document order.
pub fn code_fence_ranges(source: &str) -> Vec<FenceRange> {
    let mut ranges = Vec::new();
    let mut open: Option<(CodeFence, usize)> = None;

    for (index, line) in source.split('\n').enumerate() {
        match open {
            Some((fence, start)) => {
                if fence.closes(line) {
                    ranges.push(FenceRange { start, end: index });
                    open = None;
                }
            }
            None => open = CodeFence::open(line).map(|fence| (fence, index)),
        }
    }

    ranges
}

/// Whether `line` lies inside any of `ranges`.
pub fn in_code_fence(ranges: &[FenceRange], line: usize) -> bool {
    ranges.iter().any(|range| range.contains(line))
}

/// Maps byte offsets to zero-based line indices.
#[derive(Debug, Clone)]
pub struct LineIndex {
    newlines: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        Self {
            newlines: source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i)
                .collect(),
        }
    }

    pub fn line_of(&self, offset: usize) -> usize {
        self.newlines.partition_point(|&nl| nl < offset)
    }
}
