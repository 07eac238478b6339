//! # Parser - Event-Based Tree Construction
//!
//! Transforms the token stream into a syntax tree using the event-based
//! architecture from rust-analyzer: grammar functions emit a flat list of
//! [`Event`]s and the [`Sink`] builds the Rowan tree from them afterwards.
//!
//! ## The Marker System
//!
//! `parser.start()` returns a [`Marker`] that must be completed with a node
//! kind. Dropping it unresolved panics, which catches grammar bugs before they
//! produce a corrupt tree.
//!
//! ```ignore
//! let m = p.start();
//! p.bump(); // <
//! p.bump(); // >
//! m.complete(p, SyntaxKind::OPEN_TAG);
//! ```
//!
//! A [`CompletedMarker`] can be wrapped after the fact with
//! [`CompletedMarker::precede`]; the grammar uses this to turn a close tag
//! that matches no open element into an `ERROR` node.
//!
//! ## Lookahead
//!
//! Tags and expressions are recognized with bounded lookahead (`nth`,
//! `nth_text`) before anything is emitted, so a `<` that does not start a
//! well-formed tag stays plain text without any backtracking.
//!
//! ## Public API
//!
//! ```
//! use guide_stepper_syntax::{parse, SyntaxKind};
//!
//! let tree = parse("<GuideStepper.Prompt>Be brief.</GuideStepper.Prompt>\n");
//! assert_eq!(tree.kind(), SyntaxKind::ROOT);
//! assert_eq!(tree.children().next().unwrap().kind(), SyntaxKind::ELEMENT);
//! ```

pub mod event;
pub mod sink;

mod grammar;

use crate::lexer::{Token, lex};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;
use sink::Sink;

/// Elements nest at most this deep; deeper open tags stay plain text.
pub const MAX_ELEMENT_DEPTH: usize = 256;

/// The parser state machine.
///
/// Holds the token stream, current position, accumulated events and the names
/// of the elements currently open, innermost last.
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    pos: usize,
    events: Vec<Event>,
    open_elements: Vec<String>,
}

impl<'t, 'input> Parser<'t, 'input> {
    pub fn new(tokens: &'t [Token<'input>]) -> Self {
        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
            open_elements: Vec::new(),
        }
    }

    /// Parse the tokens and return a syntax tree.
    pub fn parse(mut self) -> SyntaxNode {
        grammar::root(&mut self);
        let sink = Sink::new(self.tokens, self.events);
        sink.finish()
    }

    /// Start a new node and return a marker.
    pub fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker::new(pos)
    }

    /// Current token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n tokens.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    /// Text of the token n ahead, or "" past the end.
    pub fn nth_text(&self, n: usize) -> &'input str {
        self.tokens.get(self.pos + n).map(|t| t.text).unwrap_or("")
    }

    pub fn current_text(&self) -> &'input str {
        self.nth_text(0)
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token unconditionally.
    pub fn bump(&mut self) {
        if !self.at_end() {
            let kind = self.current();
            self.events.push(Event::token(kind));
            self.pos += 1;
        }
    }

    /// Consume the next n tokens unconditionally.
    pub fn bump_times(&mut self, n: usize) {
        for _ in 0..n {
            self.bump();
        }
    }

    /// Check if we're at the start of a line (after newline or at start).
    pub fn at_line_start(&self) -> bool {
        if self.pos == 0 {
            return true;
        }
        self.tokens
            .get(self.pos - 1)
            .map(|t| t.kind == SyntaxKind::NEWLINE)
            .unwrap_or(false)
    }

    /// Text from the current token up to (not including) the next newline.
    pub fn line_text(&self) -> String {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .take_while(|t| t.kind != SyntaxKind::NEWLINE)
            .map(|t| t.text)
            .collect()
    }

    pub fn push_element(&mut self, name: String) {
        self.open_elements.push(name);
    }

    pub fn pop_element(&mut self) {
        self.open_elements.pop();
    }

    /// Number of elements currently open.
    pub fn element_depth(&self) -> usize {
        self.open_elements.len()
    }

    /// Whether an element with this name is open at any depth.
    pub fn is_open_element(&self, name: &str) -> bool {
        self.open_elements.iter().any(|open| open == name)
    }
}

/// An open node: the index of the `Placeholder` event reserved for it.
#[must_use = "an open node must be completed"]
pub struct Marker {
    pos: usize,
    done: bool,
}

impl Marker {
    fn new(pos: usize) -> Self {
        Self { pos, done: false }
    }

    /// Close the node as `kind`.
    pub fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) -> CompletedMarker {
        self.done = true;
        let slot = &mut p.events[self.pos];
        debug_assert!(matches!(slot, Event::Placeholder));
        *slot = Event::start(kind);
        p.events.push(Event::Finish);
        CompletedMarker { pos: self.pos }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.done && !std::thread::panicking() {
            panic!("node started at event {} was never completed", self.pos);
        }
    }
}

/// A finished node that a later node can still wrap.
#[derive(Debug, Clone, Copy)]
pub struct CompletedMarker {
    pos: usize,
}

impl CompletedMarker {
    /// Start a node that becomes the parent of this one once completed.
    pub fn precede(self, p: &mut Parser<'_, '_>) -> Marker {
        let parent = p.start();
        if let Event::Start { forward_parent, .. } = &mut p.events[self.pos] {
            *forward_parent = Some(parent.pos);
        }
        parent
    }
}

/// Parse MDX source into a syntax tree.
pub fn parse(source: &str) -> SyntaxNode {
    let tokens = lex(source);
    let parser = Parser::new(&tokens);
    parser.parse()
}
