//! # guide-stepper-syntax
//!
//! A lossless MDX syntax tree using [Rowan] + [Logos], following the
//! [rust-analyzer] architecture model.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! ## Scope
//!
//! This is not a full MDX parser. It recognizes exactly what GuideStepper
//! content processing needs to tell real component usage apart from prose and
//! examples:
//!
//! - **Raw zones**: fenced code blocks (CommonMark fence rules, see [`fence`])
//!   and inline code spans. Nothing inside them is structured.
//! - **JSX elements**: open tags with attributes, content, close tags,
//!   self-closing tags and fragments, nested up to
//!   [`parser::MAX_ELEMENT_DEPTH`] levels. Deeper open tags stay text.
//! - **Expressions**: `{...}` in flow content and as attribute values,
//!   balanced over braces while skipping JavaScript strings and comments.
//!
//! Everything else stays as flat tokens of the enclosing node.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Events → Sink → Rowan Tree
//!               (Logos)          (Grammar)        (GreenNodeBuilder)
//! ```
//!
//! The tree is lossless: every byte of the input is in exactly one token, so
//! `tree.text()` reproduces the source and every node's `text_range()` is a
//! valid byte range into it.
//!
//! ## Quick Start
//!
//! ```
//! use guide_stepper_syntax::{parse, ast::{AstNode, Element}};
//!
//! let source = "<GuideStepper.Checkpoint title=\"Install\">\nRun it.\n</GuideStepper.Checkpoint>\n";
//! let tree = parse(source);
//! assert_eq!(tree.text().to_string(), source);
//!
//! let checkpoint = tree.descendants().find_map(Element::cast).unwrap();
//! assert_eq!(checkpoint.name().as_deref(), Some("GuideStepper.Checkpoint"));
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! guide-stepper-syntax/
//! ├── lib.rs           # This file - public API and integration tests
//! ├── syntax_kind.rs   # SyntaxKind enum (tokens + nodes) and Rowan integration
//! ├── lexer.rs         # Logos-based tokenizer
//! ├── fence.rs         # CommonMark opening/closing fence rules
//! ├── ast.rs           # Typed wrappers: Element, OpenTag, Attribute, Content
//! └── parser/
//!     ├── mod.rs       # Parser struct, Marker system, public parse() function
//!     ├── event.rs     # Event enum (Start, Token, Finish, Placeholder)
//!     ├── sink.rs      # Converts events to Rowan GreenNode
//!     └── grammar/
//!         ├── mod.rs   # Root document parsing
//!         ├── flow.rs  # Content dispatch, fenced code, code spans
//!         └── jsx.rs   # Elements, tags, attributes, expressions
//! ```

pub mod ast;
pub mod fence;
pub mod lexer;
pub mod parser;
pub mod syntax_kind;

pub use parser::parse;
pub use syntax_kind::{MdxLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
