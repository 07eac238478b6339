//! CommonMark fence rules shared by the grammar and line-level scanners.
//!
//! An opening fence is up to three spaces of indentation followed by a run of
//! at least three backticks or tildes; anything after the run is the info
//! string. A closing fence uses the same character, a run at least as long as
//! the opener, and carries no info string.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    pub fn from_marker(c: char) -> Option<Self> {
        match c {
            '`' => Some(Self::Backticks),
            '~' => Some(Self::Tildes),
            _ => None,
        }
    }

    pub fn marker(self) -> char {
        match self {
            Self::Backticks => '`',
            Self::Tildes => '~',
        }
    }
}

/// An open code fence: which character it uses and how long its run was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeFence {
    pub kind: FenceKind,
    pub len: usize,
}

impl CodeFence {
    pub const MIN_LEN: usize = 3;
    pub const MAX_INDENT: usize = 3;

    /// Returns the fence opened by `line`, if it is an opening fence line.
    pub fn open(line: &str) -> Option<Self> {
        let (kind, len, _info) = Self::run(line)?;
        Some(Self { kind, len })
    }

    /// Whether `line` closes this fence.
    pub fn closes(&self, line: &str) -> bool {
        match Self::run(line) {
            Some((kind, len, rest)) => kind == self.kind && len >= self.len && rest.trim().is_empty(),
            None => false,
        }
    }

    /// Splits a fence line into its kind, run length and the text after the run.
    fn run(line: &str) -> Option<(FenceKind, usize, &str)> {
        let line = line.trim_end_matches(['\r', '\n']);
        let body = line.trim_start_matches(' ');
        if line.len() - body.len() > Self::MAX_INDENT {
            return None;
        }

        let kind = FenceKind::from_marker(body.chars().next()?)?;
        let rest = body.trim_start_matches(kind.marker());
        // Fence markers are ASCII, so byte length equals run length.
        let len = body.len() - rest.len();
        if len < Self::MIN_LEN {
            return None;
        }

        Some((kind, len, rest))
    }
}
