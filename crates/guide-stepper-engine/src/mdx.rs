//! Owned element tree lowered from the MDX syntax tree.
//!
//! The step parser works on this tree instead of the CST: every element keeps
//! its name, decoded attributes, lowered children and the exact source text of
//! its content. Everything that is not an element (prose, fenced code, code
//! spans, flow expressions, stray close tags) is merged into [`MdxNode::Markdown`]
//! runs.

use guide_stepper_syntax::SyntaxNode;
use guide_stepper_syntax::ast::{AstNode, AttributeValue, Element};
use rowan::NodeOrToken;
use serde::Serialize;

use crate::component::GuideStepperKind;
use crate::span::Span;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MdxNode {
    Element(MdxElement),
    Markdown(String),
}

impl MdxNode {
    pub fn as_element(&self) -> Option<&MdxElement> {
        match self {
            Self::Element(element) => Some(element),
            Self::Markdown(_) => None,
        }
    }

    /// Markdown that renders nothing.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Markdown(text) if text.trim().is_empty())
    }

    pub fn component(&self) -> Option<GuideStepperKind> {
        self.as_element().and_then(MdxElement::component)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MdxElement {
    /// `None` for fragments (`<>...</>`).
    pub name: Option<String>,
    pub attributes: Vec<MdxAttribute>,
    pub children: Vec<MdxNode>,
    /// Source text between the open and close tags, untrimmed.
    pub content: String,
    pub span: Span,
}

impl MdxElement {
    pub fn component(&self) -> Option<GuideStepperKind> {
        self.name
            .as_deref()
            .and_then(GuideStepperKind::from_element_name)
    }

    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| &attr.value)
    }

    /// The attribute decoded as a string, from `"..."` or `{"..."}`.
    pub fn string_attribute(&self, name: &str) -> Option<String> {
        self.attribute(name).and_then(AttrValue::string_value)
    }

    /// Fragments that only group their children.
    pub fn is_transparent_group(&self) -> bool {
        matches!(
            self.name.as_deref(),
            None | Some("Fragment") | Some("React.Fragment")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MdxAttribute {
    pub name: String,
    pub value: AttrValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum AttrValue {
    /// Bare attribute, e.g. `<Tab default>`.
    Flag,
    String(String),
    /// Source between the braces of `name={...}`.
    Expression(String),
}

impl AttrValue {
    pub fn string_value(&self) -> Option<String> {
        match self {
            Self::Flag => None,
            Self::String(value) => Some(value.clone()),
            Self::Expression(expr) => js_string(expr.trim()),
        }
    }

    /// Decodes `{["a", "b"]}`.
    pub fn string_list(&self) -> Option<Vec<String>> {
        match self {
            Self::Expression(expr) => js_string_array(expr.trim()),
            _ => None,
        }
    }
}

fn js_string(literal: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<String>(literal) {
        return Some(value);
    }
    for quote in ['\'', '`'] {
        if let Some(inner) = literal
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            if quote == '`' && inner.contains("${") {
                return None;
            }
            return Some(unescape(inner));
        }
    }
    None
}

fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn js_string_array(literal: &str) -> Option<Vec<String>> {
    if let Ok(values) = serde_json::from_str::<Vec<String>>(literal) {
        return Some(values);
    }
    let inner = literal.strip_prefix('[')?.strip_suffix(']')?;
    inner
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(js_string)
        .collect()
}

/// Lowers the children of a document root.
pub fn lower(root: &SyntaxNode) -> Vec<MdxNode> {
    lower_children(root)
}

fn lower_children(parent: &SyntaxNode) -> Vec<MdxNode> {
    let mut nodes = Vec::new();
    let mut markdown = String::new();

    for child in parent.children_with_tokens() {
        match child {
            NodeOrToken::Node(node) => match Element::cast(node.clone()) {
                Some(element) => {
                    flush_markdown(&mut markdown, &mut nodes);
                    nodes.push(MdxNode::Element(lower_element(&element)));
                }
                None => markdown.push_str(&node.text().to_string()),
            },
            NodeOrToken::Token(token) => markdown.push_str(token.text()),
        }
    }

    flush_markdown(&mut markdown, &mut nodes);
    nodes
}

fn flush_markdown(markdown: &mut String, nodes: &mut Vec<MdxNode>) {
    if !markdown.is_empty() {
        nodes.push(MdxNode::Markdown(std::mem::take(markdown)));
    }
}

fn lower_element(element: &Element) -> MdxElement {
    let attributes = element
        .attributes()
        .filter_map(|attr| {
            let value = match attr.value() {
                None => AttrValue::Flag,
                Some(AttributeValue::String(value)) => AttrValue::String(value),
                Some(AttributeValue::Expression(expr)) => AttrValue::Expression(expr),
            };
            Some(MdxAttribute {
                name: attr.name()?,
                value,
            })
        })
        .collect();

    let content = element.content();

    MdxElement {
        name: element.name(),
        attributes,
        children: content
            .as_ref()
            .map(|c| lower_children(c.syntax()))
            .unwrap_or_default(),
        content: content
            .map(|c| c.syntax().text().to_string())
            .unwrap_or_default(),
        span: Span::of(element.syntax()),
    }
}
