//! # Grammar Rules
//!
//! Each function takes a `&mut Parser` and uses its methods to inspect tokens
//! (`current`, `at`, `nth`), consume them (`bump`, `eat`) and build structure
//! (`start` → marker → `complete`).
//!
//! - [`flow`] - document and element content: fenced code, code spans, dispatch
//! - [`jsx`] - tags, attributes, expressions and element nesting
//!
//! ## Error Recovery
//!
//! Grammar functions never fail. Anything that does not form a well-formed
//! construct is consumed as plain tokens of the enclosing node; a close tag
//! that matches no open element becomes an `ERROR` node; an element whose
//! close tag never arrives ends where its parent ends.

mod flow;
mod jsx;

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse the root document.
pub fn root(p: &mut Parser<'_, '_>) {
    let m = p.start();
    flow::content(p);
    m.complete(p, SyntaxKind::ROOT);
}
