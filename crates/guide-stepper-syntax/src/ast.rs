//! Typed views over the untyped CST.
//!
//! Each wrapper holds a [`SyntaxNode`] of a known kind and exposes accessors
//! for its parts. Wrappers are cheap to create and clone.

use rowan::TextRange;

use crate::syntax_kind::{SyntaxKind, SyntaxNode};

pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                Self::can_cast(node.kind()).then(|| Self(node))
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(Element, ELEMENT);
ast_node!(OpenTag, OPEN_TAG);
ast_node!(Attribute, ATTRIBUTE);
ast_node!(Content, CONTENT);

fn child<N: AstNode>(parent: &SyntaxNode) -> Option<N> {
    parent.children().find_map(N::cast)
}

fn child_of_kind(parent: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    parent.children().find(|n| n.kind() == kind)
}

impl Element {
    pub fn open_tag(&self) -> Option<OpenTag> {
        child(&self.0)
    }

    /// Element name; `None` for fragments.
    pub fn name(&self) -> Option<String> {
        self.open_tag()?.name()
    }

    pub fn attributes(&self) -> impl Iterator<Item = Attribute> {
        self.open_tag()
            .into_iter()
            .flat_map(|tag| tag.0.children().filter_map(Attribute::cast))
    }

    /// First attribute with this name.
    pub fn attribute(&self, name: &str) -> Option<Attribute> {
        self.attributes()
            .find(|attr| attr.name().as_deref() == Some(name))
    }

    pub fn content(&self) -> Option<Content> {
        child(&self.0)
    }

    pub fn has_close_tag(&self) -> bool {
        child_of_kind(&self.0, SyntaxKind::CLOSE_TAG).is_some()
    }

    pub fn is_self_closing(&self) -> bool {
        self.content().is_none()
    }

    pub fn is_fragment(&self) -> bool {
        self.open_tag().is_some_and(|tag| tag.name_range().is_none())
    }
}

impl OpenTag {
    pub fn name(&self) -> Option<String> {
        child_of_kind(&self.0, SyntaxKind::TAG_NAME).map(|n| n.text().to_string())
    }

    /// Source range of the tag name, used as the insertion point for new props.
    pub fn name_range(&self) -> Option<TextRange> {
        child_of_kind(&self.0, SyntaxKind::TAG_NAME).map(|n| n.text_range())
    }
}

/// The value side of an attribute, with delimiters stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// `name="text"` or `name='text'`
    String(String),
    /// `name={expr}`; holds the source between the braces.
    Expression(String),
}

impl Attribute {
    /// Attribute name; `None` for a spread `{...props}`.
    pub fn name(&self) -> Option<String> {
        child_of_kind(&self.0, SyntaxKind::ATTR_NAME).map(|n| n.text().to_string())
    }

    /// `None` for a bare flag attribute such as `<Tab default>`.
    pub fn value(&self) -> Option<AttributeValue> {
        if let Some(literal) = child_of_kind(&self.0, SyntaxKind::STRING_LITERAL) {
            let text = literal.text().to_string();
            return Some(AttributeValue::String(strip_delimiters(&text).to_string()));
        }
        if self.name().is_none() {
            return None;
        }
        child_of_kind(&self.0, SyntaxKind::EXPRESSION).map(|expr| {
            let text = expr.text().to_string();
            AttributeValue::Expression(strip_delimiters(&text).to_string())
        })
    }
}

/// Drops the first and last character; both are ASCII delimiters.
fn strip_delimiters(text: &str) -> &str {
    if text.len() >= 2 {
        &text[1..text.len() - 1]
    } else {
        ""
    }
}

impl Content {
    pub fn text_range(&self) -> TextRange {
        self.0.text_range()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use pretty_assertions::assert_eq;

    fn element(input: &str) -> Element {
        parse(input).descendants().find_map(Element::cast).unwrap()
    }

    #[test]
    fn element_name_and_attributes() {
        let el = element(
            "<GuideStepper.Checkpoint id=\"check\" title='Check' rawContent={\"x\"}>\nBody\n</GuideStepper.Checkpoint>",
        );
        assert_eq!(el.name().as_deref(), Some("GuideStepper.Checkpoint"));
        assert_eq!(
            el.attribute("id").and_then(|a| a.value()),
            Some(AttributeValue::String("check".into()))
        );
        assert_eq!(
            el.attribute("title").and_then(|a| a.value()),
            Some(AttributeValue::String("Check".into()))
        );
        assert_eq!(
            el.attribute("rawContent").and_then(|a| a.value()),
            Some(AttributeValue::Expression("\"x\"".into()))
        );
        assert!(el.has_close_tag());
    }

    #[test]
    fn flag_and_spread_attributes_have_no_value() {
        let el = element("<Tab default {...props} />");
        let attrs: Vec<_> = el.attributes().map(|a| (a.name(), a.value())).collect();
        assert_eq!(attrs, vec![(Some("default".into()), None), (None, None)]);
        assert!(el.is_self_closing());
    }

    #[test]
    fn content_range_covers_inner_text() {
        let input = "<Tip>inner</Tip>";
        let el = element(input);
        let range = el.content().unwrap().text_range();
        assert_eq!(&input[range], "inner");
    }

    #[test]
    fn name_range_is_after_less_than() {
        let el = element("<Tip a=\"b\">x</Tip>");
        let range = el.open_tag().unwrap().name_range().unwrap();
        assert_eq!(u32::from(range.start()), 1);
        assert_eq!(u32::from(range.end()), 4);
    }

    #[test]
    fn fragment_has_no_name() {
        let el = element("<>x</>");
        assert!(el.is_fragment());
        assert_eq!(el.name(), None);
    }
}
