//! Replays parser events into a Rowan green tree.

use rowan::GreenNodeBuilder;

use crate::lexer::Token;
use crate::parser::event::Event;
use crate::syntax_kind::{SyntaxKind, SyntaxNode};

/// Walks the event list once, pairing every `Token` event with the next
/// lexer token.
pub struct Sink<'t, 'input> {
    builder: GreenNodeBuilder<'static>,
    tokens: std::slice::Iter<'t, Token<'input>>,
    events: Vec<Event>,
}

impl<'t, 'input> Sink<'t, 'input> {
    pub fn new(tokens: &'t [Token<'input>], events: Vec<Event>) -> Self {
        Self {
            builder: GreenNodeBuilder::new(),
            tokens: tokens.iter(),
            events,
        }
    }

    pub fn finish(mut self) -> SyntaxNode {
        for idx in 0..self.events.len() {
            match std::mem::replace(&mut self.events[idx], Event::Placeholder) {
                Event::Start {
                    kind,
                    forward_parent,
                } => {
                    for kind in self.wrapping_kinds(kind, forward_parent) {
                        self.builder.start_node(kind.into());
                    }
                }
                Event::Token { kind } => self.token(kind),
                Event::Finish => self.builder.finish_node(),
                Event::Placeholder => {}
            }
        }

        SyntaxNode::new_root(self.builder.finish())
    }

    /// `kind` plus every node that precedes it, outermost first.
    ///
    /// The wrapping `Start` events are consumed so they are not opened twice.
    fn wrapping_kinds(&mut self, kind: SyntaxKind, mut next: Option<usize>) -> Vec<SyntaxKind> {
        let mut kinds = vec![kind];
        while let Some(idx) = next {
            match std::mem::replace(&mut self.events[idx], Event::Placeholder) {
                Event::Start {
                    kind,
                    forward_parent,
                } => {
                    kinds.push(kind);
                    next = forward_parent;
                }
                other => unreachable!("forward parent must be a Start event, got {other:?}"),
            }
        }
        kinds.reverse();
        kinds
    }

    fn token(&mut self, kind: SyntaxKind) {
        if let Some(token) = self.tokens.next() {
            self.builder.token(kind.into(), token.text);
        }
    }
}
