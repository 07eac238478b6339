//! # Parser Events
//!
//! The grammar never touches Rowan directly. It emits a flat list of events
//! that the [`Sink`](super::sink::Sink) replays into a green tree:
//!
//! ```text
//! Start(ELEMENT)
//!   Start(OPEN_TAG)
//!     Token(LT)
//!     Start(TAG_NAME) Token(TEXT) Finish
//!     Token(GT)
//!   Finish
//!   Start(CONTENT) ... Finish
//!   Start(CLOSE_TAG) ... Finish
//! Finish
//! ```
//!
//! `Start` pushes a node, `Finish` pops it, `Token` attaches lexer tokens to
//! the innermost open node.

use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Begin a composite node.
    ///
    /// `forward_parent` points at a later `Start` that must wrap this one;
    /// see `CompletedMarker::precede`.
    Start {
        kind: SyntaxKind,
        forward_parent: Option<usize>,
    },

    /// Attach the next lexer token to the current node.
    Token { kind: SyntaxKind },

    /// Close the current node.
    Finish,

    /// Reserved slot for a node that has not been completed yet.
    Placeholder,
}

impl Event {
    pub fn start(kind: SyntaxKind) -> Self {
        Event::Start {
            kind,
            forward_parent: None,
        }
    }

    pub fn token(kind: SyntaxKind) -> Self {
        Event::Token { kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_has_no_forward_parent() {
        assert_eq!(
            Event::start(SyntaxKind::ELEMENT),
            Event::Start {
                kind: SyntaxKind::ELEMENT,
                forward_parent: None
            }
        );
    }
}
