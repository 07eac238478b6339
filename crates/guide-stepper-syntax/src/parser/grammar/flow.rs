//! Flow-level grammar: the content of the document and of every element.

use crate::fence::CodeFence;
use crate::parser::{MAX_ELEMENT_DEPTH, Parser};
use crate::syntax_kind::SyntaxKind;

use super::jsx;

/// Parse content until EOF or a close tag belonging to an open element.
pub(super) fn content(p: &mut Parser<'_, '_>) {
    while !p.at_end() {
        if let Some(close) = jsx::close_tag_ahead(p) {
            if p.is_open_element(&close.name) {
                break;
            }
            let stray = jsx::close_tag(p);
            stray.precede(p).complete(p, SyntaxKind::ERROR);
            continue;
        }
        item(p);
    }
}

fn item(p: &mut Parser<'_, '_>) {
    if p.at_line_start()
        && let Some(fence) = CodeFence::open(&p.line_text())
    {
        fenced_code(p, fence);
        return;
    }

    match p.current() {
        SyntaxKind::LT => match jsx::open_tag_ahead(p) {
            Some(_) if p.element_depth() < MAX_ELEMENT_DEPTH => jsx::element(p),
            Some(len) => p.bump_times(len),
            None => p.bump(),
        },
        SyntaxKind::LBRACE => {
            if jsx::expression_end(p, 0).is_some() {
                jsx::expression(p);
            } else {
                p.bump();
            }
        }
        SyntaxKind::BACKTICK => code_span_or_text(p),
        _ => p.bump(),
    }
}

/// Parse a fenced code block. The block runs to its closing fence line or EOF.
fn fenced_code(p: &mut Parser<'_, '_>, fence: CodeFence) {
    let m = p.start();
    bump_line(p);

    while !p.at_end() {
        let closes = fence.closes(&p.line_text());
        bump_line(p);
        if closes {
            break;
        }
    }

    m.complete(p, SyntaxKind::FENCED_CODE);
}

/// Consume the rest of the current line including its newline.
fn bump_line(p: &mut Parser<'_, '_>) {
    while !p.at_end() && !p.at(SyntaxKind::NEWLINE) {
        p.bump();
    }
    p.eat(SyntaxKind::NEWLINE);
}

/// Parse an inline code span, or the backtick run as text when it is unmatched.
///
/// The closing run must have exactly the opening length. A span does not
/// cross a blank line or a line break followed by a JSX tag, since a tag
/// starting a line begins a new flow construct.
fn code_span_or_text(p: &mut Parser<'_, '_>) {
    let open = backtick_run(p, 0);

    match code_span_end(p, open) {
        Some(end) => {
            let m = p.start();
            p.bump_times(end);
            m.complete(p, SyntaxKind::CODE_SPAN);
        }
        None => p.bump_times(open),
    }
}

fn code_span_end(p: &Parser<'_, '_>, open: usize) -> Option<usize> {
    let mut i = open;
    loop {
        match p.nth(i) {
            SyntaxKind::EOF => return None,
            SyntaxKind::BACKTICK => {
                let run = backtick_run(p, i);
                if run == open {
                    return Some(i + run);
                }
                i += run;
            }
            SyntaxKind::NEWLINE => {
                let mut j = i + 1;
                if p.nth(j) == SyntaxKind::WHITESPACE {
                    j += 1;
                }
                if matches!(p.nth(j), SyntaxKind::NEWLINE | SyntaxKind::EOF)
                    || jsx::close_tag_at(p, j).is_some()
                    || jsx::open_tag_at(p, j).is_some()
                {
                    return None;
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
}

fn backtick_run(p: &Parser<'_, '_>, from: usize) -> usize {
    let mut n = 0;
    while p.nth(from + n) == SyntaxKind::BACKTICK {
        n += 1;
    }
    n
}

#[cfg(test)]
mod tests {
    use crate::parser::{MAX_ELEMENT_DEPTH, parse};
    use crate::syntax_kind::SyntaxKind;
    use pretty_assertions::assert_eq;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        parse(input).children().map(|n| n.kind()).collect()
    }

    #[test]
    fn fenced_code_is_one_node() {
        let input = "```mdx\n<GuideStepper.Checkpoint>\n</GuideStepper.Checkpoint>\n```\n";
        assert_eq!(kinds(input), vec![SyntaxKind::FENCED_CODE]);
    }

    #[test]
    fn fence_with_info_string_does_not_close() {
        let input = "```mdx\n```js\n<Tip></Tip>\n```\nafter\n";
        let tree = parse(input);
        let fence = tree.children().next().unwrap();
        assert_eq!(fence.kind(), SyntaxKind::FENCED_CODE);
        assert_eq!(fence.text().to_string(), "```mdx\n```js\n<Tip></Tip>\n```\n");
    }

    #[test]
    fn tilde_line_does_not_close_backtick_fence() {
        let input = "```\n~~~\n<Tip></Tip>\n```\n";
        assert_eq!(kinds(input), vec![SyntaxKind::FENCED_CODE]);
    }

    #[test]
    fn unclosed_fence_runs_to_eof() {
        let input = "```\n<Tip>hidden</Tip>\n";
        assert_eq!(kinds(input), vec![SyntaxKind::FENCED_CODE]);
    }

    #[test]
    fn indented_fence() {
        let input = "   ~~~\n<Tip></Tip>\n   ~~~\n";
        assert_eq!(kinds(input), vec![SyntaxKind::FENCED_CODE]);
    }

    #[test]
    fn code_span_hides_tags() {
        let input = "Use `<GuideStepper.Prompt>` here.";
        assert_eq!(kinds(input), vec![SyntaxKind::CODE_SPAN]);
    }

    #[test]
    fn double_backtick_code_span() {
        let tree = parse("``a ` b`` rest");
        let span = tree.children().next().unwrap();
        assert_eq!(span.kind(), SyntaxKind::CODE_SPAN);
        assert_eq!(span.text().to_string(), "``a ` b``");
    }

    #[test]
    fn unmatched_backtick_is_text() {
        let input = "a ` b <Tip />";
        assert_eq!(kinds(input), vec![SyntaxKind::ELEMENT]);
    }

    #[test]
    fn code_span_stops_before_tag_line() {
        let input = "<A>\nPress ` here.\n</A>\n<B>\nRun `ls`.\n</B>\n";
        let tree = parse(input);
        assert_eq!(kinds(input), vec![SyntaxKind::ELEMENT, SyntaxKind::ELEMENT]);
        let second = tree.children().nth(1).unwrap();
        assert!(
            second
                .descendants()
                .any(|n| n.kind() == SyntaxKind::CODE_SPAN && n.text() == "`ls`")
        );
    }

    #[test]
    fn code_span_continues_over_plain_line_break() {
        let input = "`a\nb` <Tip />";
        assert_eq!(
            kinds(input),
            vec![SyntaxKind::CODE_SPAN, SyntaxKind::ELEMENT]
        );
    }

    #[test]
    fn deep_nesting_past_the_cap_is_text() {
        let depth = MAX_ELEMENT_DEPTH + 50;
        let input = format!("{}x{}", "<a>".repeat(depth), "</a>".repeat(depth));
        let tree = parse(&input);
        assert_eq!(tree.text().to_string(), input);
        let elements = tree
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::ELEMENT)
            .count();
        assert_eq!(elements, MAX_ELEMENT_DEPTH);
    }

    #[test]
    fn very_deep_nesting_does_not_overflow() {
        let input = "<a>".repeat(20_000);
        assert_eq!(parse(&input).text().to_string(), input);
    }

    #[test]
    fn code_span_does_not_cross_blank_line() {
        let input = "`open\n\n<Tip />`\n";
        assert_eq!(kinds(input), vec![SyntaxKind::ELEMENT]);
    }
}
