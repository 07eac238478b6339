//! JSX grammar: elements, tags, attributes and `{...}` expressions.
//!
//! Recognition happens in two passes over the same tokens. The `*_ahead` and
//! `*_end` functions are pure lookahead and decide whether a well-formed
//! construct starts here; only then do the emitting functions consume tokens.
//!
//! | Source | Tree |
//! |--------|------|
//! | `<A b="c">..</A>` | `ELEMENT(OPEN_TAG, CONTENT, CLOSE_TAG)` |
//! | `<A />` | `ELEMENT(OPEN_TAG)` |
//! | `<>..</>` | fragment: `OPEN_TAG` without `TAG_NAME` |
//! | `{expr}` | `EXPRESSION` |

use crate::parser::{CompletedMarker, Parser};
use crate::syntax_kind::SyntaxKind;

use super::flow;

/// A close tag found by lookahead.
pub(super) struct CloseTagAhead {
    /// Empty for a fragment close tag `</>`.
    pub name: String,
}

/// Element and attribute names: `Tip`, `GuideStepper.Checkpoint`, `data-id`, `xlink:href`.
fn is_name(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | '_' | ':' | '$'))
}

fn skip_trivia(p: &Parser<'_, '_>, mut i: usize) -> usize {
    while p.nth(i).is_trivia() {
        i += 1;
    }
    i
}

fn eat_trivia(p: &mut Parser<'_, '_>) {
    while p.current().is_trivia() {
        p.bump();
    }
}

// === Lookahead ===

pub(super) fn close_tag_ahead(p: &Parser<'_, '_>) -> Option<CloseTagAhead> {
    close_tag_at(p, 0)
}

/// Like [`close_tag_ahead`], for a `<` that is `at` tokens ahead.
pub(super) fn close_tag_at(p: &Parser<'_, '_>, at: usize) -> Option<CloseTagAhead> {
    if p.nth(at) != SyntaxKind::LT || p.nth(at + 1) != SyntaxKind::SLASH {
        return None;
    }

    let mut i = skip_trivia(p, at + 2);
    let mut name = String::new();
    if p.nth(i) == SyntaxKind::TEXT {
        if !is_name(p.nth_text(i)) {
            return None;
        }
        name = p.nth_text(i).to_string();
        i = skip_trivia(p, i + 1);
    }

    (p.nth(i) == SyntaxKind::GT).then_some(CloseTagAhead { name })
}

/// Token count of a well-formed open tag starting at the current `<`.
pub(super) fn open_tag_ahead(p: &Parser<'_, '_>) -> Option<usize> {
    open_tag_at(p, 0)
}

/// Like [`open_tag_ahead`], for a `<` that is `at` tokens ahead.
pub(super) fn open_tag_at(p: &Parser<'_, '_>, at: usize) -> Option<usize> {
    if p.nth(at) != SyntaxKind::LT {
        return None;
    }

    let mut i = match p.nth(at + 1) {
        SyntaxKind::GT => return Some(2),
        SyntaxKind::TEXT if is_name(p.nth_text(at + 1)) => at + 2,
        _ => return None,
    };

    loop {
        i = skip_trivia(p, i);
        match p.nth(i) {
            SyntaxKind::GT => return Some(i + 1 - at),
            SyntaxKind::SLASH => {
                return (p.nth(i + 1) == SyntaxKind::GT).then_some(i + 2 - at);
            }
            SyntaxKind::LBRACE => i = expression_end(p, i)?,
            SyntaxKind::TEXT if is_name(p.nth_text(i)) => i = attribute_end(p, i)?,
            _ => return None,
        }
    }
}

fn attribute_end(p: &Parser<'_, '_>, name: usize) -> Option<usize> {
    let eq = skip_trivia(p, name + 1);
    if p.nth(eq) != SyntaxKind::EQ {
        return Some(name + 1);
    }

    let value = skip_trivia(p, eq + 1);
    match p.nth(value) {
        SyntaxKind::DQUOTE | SyntaxKind::SQUOTE => string_end(p, value),
        SyntaxKind::LBRACE => expression_end(p, value),
        _ => None,
    }
}

/// JSX attribute strings have no escapes; they end at the next matching quote.
fn string_end(p: &Parser<'_, '_>, open: usize) -> Option<usize> {
    let quote = p.nth(open);
    let mut i = open + 1;
    loop {
        match p.nth(i) {
            SyntaxKind::EOF => return None,
            k if k == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
}

/// Index one past the `}` balancing the `{` at `open`.
///
/// Braces inside JavaScript strings, template literals and comments do not count.
pub(super) fn expression_end(p: &Parser<'_, '_>, open: usize) -> Option<usize> {
    if p.nth(open) != SyntaxKind::LBRACE {
        return None;
    }

    let mut depth = 0usize;
    let mut i = open;
    loop {
        match p.nth(i) {
            SyntaxKind::EOF => return None,
            SyntaxKind::LBRACE => {
                depth += 1;
                i += 1;
            }
            SyntaxKind::RBRACE => {
                depth -= 1;
                i += 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            SyntaxKind::DQUOTE | SyntaxKind::SQUOTE | SyntaxKind::BACKTICK => {
                i = js_string_end(p, i)?;
            }
            SyntaxKind::SLASH if p.nth(i + 1) == SyntaxKind::SLASH => {
                i = line_comment_end(p, i);
            }
            SyntaxKind::SLASH
                if p.nth(i + 1) == SyntaxKind::TEXT && p.nth_text(i + 1).starts_with('*') =>
            {
                i = block_comment_end(p, i)?;
            }
            _ => i += 1,
        }
    }
}

fn js_string_end(p: &Parser<'_, '_>, open: usize) -> Option<usize> {
    let quote = p.nth(open);
    let mut i = open + 1;
    loop {
        match p.nth(i) {
            SyntaxKind::EOF => return None,
            SyntaxKind::BACKSLASH => i += 2,
            k if k == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
}

fn line_comment_end(p: &Parser<'_, '_>, open: usize) -> usize {
    let mut i = open + 2;
    while !matches!(p.nth(i), SyntaxKind::NEWLINE | SyntaxKind::EOF) {
        i += 1;
    }
    i
}

/// `/*` lexes as SLASH + TEXT("*..."), `*/` as TEXT("...*") + SLASH.
fn block_comment_end(p: &Parser<'_, '_>, open: usize) -> Option<usize> {
    let first = p.nth_text(open + 1);
    if first.len() >= 2 && first.ends_with('*') && p.nth(open + 2) == SyntaxKind::SLASH {
        return Some(open + 3);
    }

    let mut i = open + 2;
    loop {
        match p.nth(i) {
            SyntaxKind::EOF => return None,
            SyntaxKind::TEXT if p.nth_text(i).ends_with('*') && p.nth(i + 1) == SyntaxKind::SLASH => {
                return Some(i + 2);
            }
            _ => i += 1,
        }
    }
}

// === Emission ===

/// Parse an element. The caller has checked [`open_tag_ahead`].
pub(super) fn element(p: &mut Parser<'_, '_>) {
    let m = p.start();
    let (name, self_closing) = open_tag(p);

    if !self_closing {
        let content = p.start();
        p.push_element(name.clone());
        flow::content(p);
        p.pop_element();
        content.complete(p, SyntaxKind::CONTENT);

        if let Some(close) = close_tag_ahead(p)
            && close.name == name
        {
            close_tag(p);
        }
    }

    m.complete(p, SyntaxKind::ELEMENT);
}

fn open_tag(p: &mut Parser<'_, '_>) -> (String, bool) {
    let m = p.start();
    p.bump(); // <

    let name = if p.at(SyntaxKind::TEXT) {
        let name = p.current_text().to_string();
        tag_name(p);
        name
    } else {
        String::new()
    };

    let self_closing = loop {
        eat_trivia(p);
        match p.current() {
            SyntaxKind::GT => {
                p.bump();
                break false;
            }
            SyntaxKind::SLASH => {
                p.bump();
                p.eat(SyntaxKind::GT);
                break true;
            }
            SyntaxKind::LBRACE => {
                let spread = p.start();
                expression(p);
                spread.complete(p, SyntaxKind::ATTRIBUTE);
            }
            SyntaxKind::TEXT => attribute(p),
            _ => break false,
        }
    };

    m.complete(p, SyntaxKind::OPEN_TAG);
    (name, self_closing)
}

/// Parse a close tag. The caller has checked [`close_tag_ahead`].
pub(super) fn close_tag(p: &mut Parser<'_, '_>) -> CompletedMarker {
    let m = p.start();
    p.bump(); // <
    p.bump(); // /
    eat_trivia(p);
    if p.at(SyntaxKind::TEXT) {
        tag_name(p);
        eat_trivia(p);
    }
    p.eat(SyntaxKind::GT);
    m.complete(p, SyntaxKind::CLOSE_TAG)
}

fn tag_name(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump();
    m.complete(p, SyntaxKind::TAG_NAME);
}

fn attribute(p: &mut Parser<'_, '_>) {
    let m = p.start();

    let name = p.start();
    p.bump();
    name.complete(p, SyntaxKind::ATTR_NAME);

    if p.nth(skip_trivia(p, 0)) == SyntaxKind::EQ {
        eat_trivia(p);
        p.bump(); // =
        eat_trivia(p);
        match p.current() {
            SyntaxKind::DQUOTE | SyntaxKind::SQUOTE => string_literal(p),
            SyntaxKind::LBRACE => expression(p),
            _ => {}
        }
    }

    m.complete(p, SyntaxKind::ATTRIBUTE);
}

fn string_literal(p: &mut Parser<'_, '_>) {
    let m = p.start();
    let quote = p.current();
    p.bump();
    while !p.at_end() && !p.at(quote) {
        p.bump();
    }
    p.eat(quote);
    m.complete(p, SyntaxKind::STRING_LITERAL);
}

/// Parse an expression. The caller has checked [`expression_end`].
pub(super) fn expression(p: &mut Parser<'_, '_>) {
    let len = expression_end(p, 0).unwrap_or(1);
    let m = p.start();
    p.bump_times(len);
    m.complete(p, SyntaxKind::EXPRESSION);
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use crate::syntax_kind::{SyntaxKind, SyntaxNode};
    use pretty_assertions::assert_eq;

    fn first(input: &str) -> SyntaxNode {
        parse(input).children().next().unwrap()
    }

    fn child_kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
        node.children().map(|n| n.kind()).collect()
    }

    #[test]
    fn element_with_content() {
        let el = first("<Tip>hello</Tip>");
        assert_eq!(el.kind(), SyntaxKind::ELEMENT);
        assert_eq!(
            child_kinds(&el),
            vec![
                SyntaxKind::OPEN_TAG,
                SyntaxKind::CONTENT,
                SyntaxKind::CLOSE_TAG
            ]
        );
    }

    #[test]
    fn self_closing_element() {
        let el = first("<Tip title=\"x\" />");
        assert_eq!(child_kinds(&el), vec![SyntaxKind::OPEN_TAG]);
    }

    #[test]
    fn attribute_kinds() {
        let el = first("<A s=\"str\" e={[\"a\", \"b\"]} flag {...rest}></A>");
        let tag = el.children().next().unwrap();
        let attrs: Vec<String> = tag
            .children()
            .filter(|n| n.kind() == SyntaxKind::ATTRIBUTE)
            .map(|n| n.text().to_string())
            .collect();
        assert_eq!(
            attrs,
            vec!["s=\"str\"", "e={[\"a\", \"b\"]}", "flag", "{...rest}"]
        );
    }

    #[test]
    fn multi_line_open_tag() {
        let el = first("<GuideStepper.Checkpoint\n  id=\"one\"\n  title=\"One\"\n>\nbody\n</GuideStepper.Checkpoint>\n");
        assert_eq!(el.kind(), SyntaxKind::ELEMENT);
        assert_eq!(child_kinds(&el).last(), Some(&SyntaxKind::CLOSE_TAG));
    }

    #[test]
    fn nested_same_name_elements_pair_correctly() {
        let el = first("<A><A>inner</A>tail</A>");
        let content = el
            .children()
            .find(|n| n.kind() == SyntaxKind::CONTENT)
            .unwrap();
        assert_eq!(content.text().to_string(), "<A>inner</A>tail");
        assert_eq!(child_kinds(&el).last(), Some(&SyntaxKind::CLOSE_TAG));
    }

    #[test]
    fn fragment() {
        let el = first("<><Tip /></>");
        assert_eq!(el.kind(), SyntaxKind::ELEMENT);
        let tag = el.children().next().unwrap();
        assert!(tag.children().all(|n| n.kind() != SyntaxKind::TAG_NAME));
        assert_eq!(child_kinds(&el).last(), Some(&SyntaxKind::CLOSE_TAG));
    }

    #[test]
    fn stray_close_tag_is_error() {
        let tree = parse("text </Tip> more");
        assert_eq!(child_kinds(&tree), vec![SyntaxKind::ERROR]);
    }

    #[test]
    fn unclosed_element_ends_at_parent_close() {
        let el = first("<A><B>body</A>");
        let content = el
            .children()
            .find(|n| n.kind() == SyntaxKind::CONTENT)
            .unwrap();
        let inner = content.children().next().unwrap();
        assert_eq!(inner.kind(), SyntaxKind::ELEMENT);
        assert_eq!(
            child_kinds(&inner),
            vec![SyntaxKind::OPEN_TAG, SyntaxKind::CONTENT]
        );
        assert_eq!(child_kinds(&el).last(), Some(&SyntaxKind::CLOSE_TAG));
    }

    #[test]
    fn less_than_in_prose_is_text() {
        let tree = parse("a < b and <3 and <https://example.com>\n");
        assert_eq!(child_kinds(&tree), vec![]);
    }

    #[test]
    fn comment_expression_hides_tags() {
        let tree = parse("{/* don't render <Tip /> */}\n");
        assert_eq!(child_kinds(&tree), vec![SyntaxKind::EXPRESSION]);
    }

    #[test]
    fn expression_braces_inside_strings() {
        let el = first("<A v={\"}\"} />");
        let tag = el.children().next().unwrap();
        let attr = tag
            .children()
            .find(|n| n.kind() == SyntaxKind::ATTRIBUTE)
            .unwrap();
        assert_eq!(attr.text().to_string(), "v={\"}\"}");
    }

    #[test]
    fn escaped_quote_in_expression_string() {
        let el = first(r#"<A rawContent={"say \"hi\""}>x</A>"#);
        assert_eq!(child_kinds(&el).last(), Some(&SyntaxKind::CLOSE_TAG));
    }

    #[test]
    fn fence_inside_element_is_raw() {
        let el = first("<A>\n```\n</A>\n```\n</A>\n");
        let content = el
            .children()
            .find(|n| n.kind() == SyntaxKind::CONTENT)
            .unwrap();
        assert_eq!(child_kinds(&content), vec![SyntaxKind::FENCED_CODE]);
        assert_eq!(child_kinds(&el).last(), Some(&SyntaxKind::CLOSE_TAG));
    }
}
