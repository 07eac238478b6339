//! # rawContent injection
//!
//! Copies the authored markdown of every `GuideStepper.Checkpoint` and
//! `GuideStepper.Prompt` block into a `rawContent` prop so the rendered page
//! can offer the original text for "copy as AI prompt":
//!
//! ```text
//! <GuideStepper.Checkpoint id="install">      <GuideStepper.Checkpoint rawContent={"Run `npm i`."} id="install">
//! Run `npm i`.                           →    Run `npm i`.
//! </GuideStepper.Checkpoint>                  </GuideStepper.Checkpoint>
//! ```
//!
//! Blocks are found by walking the syntax tree, so repeated and nested blocks
//! pair correctly and tags inside code spans or fenced code are never blocks.
//! As a second guard, any block whose opening line lies inside a fence found by
//! [`code_fence_ranges`] is left alone.
//!
//! The transform is idempotent: a block that already declares `rawContent` is
//! never touched, and every other byte of the document is copied verbatim.

use guide_stepper_syntax::SyntaxNode;
use guide_stepper_syntax::ast::{AstNode, Element};

use crate::component::GuideStepperKind;
use crate::fences::{LineIndex, code_fence_ranges, in_code_fence};
use crate::span::Span;

const RAW_CONTENT: &str = "rawContent";

/// A closed Checkpoint or Prompt element found in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideStepperBlock {
    pub component: GuideStepperKind,
    /// The whole element, open tag through close tag.
    pub span: Span,
    /// Byte offset just past the tag name; new props are inserted here.
    pub name_end: usize,
    /// Inner content between the tags, untrimmed.
    pub content: Span,
    pub has_raw_content: bool,
}

impl GuideStepperBlock {
    fn from_element(element: &Element) -> Option<Self> {
        let component = GuideStepperKind::from_element_name(&element.name()?)?;
        if !component.carries_raw_content() || !element.has_close_tag() {
            return None;
        }
        let name_range = element.open_tag()?.name_range()?;
        let content = element.content()?;

        Some(Self {
            component,
            span: Span::of(element.syntax()),
            name_end: usize::from(name_range.end()),
            content: Span::of(content.syntax()),
            has_raw_content: element.attribute(RAW_CONTENT).is_some(),
        })
    }

    /// The trimmed inner markdown that becomes `rawContent`.
    pub fn raw_content<'a>(&self, source: &'a str) -> &'a str {
        self.content.slice(source).trim()
    }
}

/// All Checkpoint and Prompt blocks in document order, nested ones included.
pub fn find_blocks(tree: &SyntaxNode) -> Vec<GuideStepperBlock> {
    tree.descendants()
        .filter_map(Element::cast)
        .filter_map(|element| GuideStepperBlock::from_element(&element))
        .collect()
}

/// Result of one preprocessing pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreprocessOutcome {
    pub text: String,
    /// Blocks that received a new `rawContent` prop.
    pub injected: usize,
    /// Blocks left alone because they already declare `rawContent`.
    pub already_present: usize,
    /// Blocks left alone because they start inside a fenced code block.
    pub skipped_in_fence: usize,
}

impl PreprocessOutcome {
    pub fn changed(&self) -> bool {
        self.injected > 0
    }
}

/// Injects `rawContent` into every eligible block and returns the new text.
pub fn preprocess(source: &str) -> String {
    preprocess_with_report(source).text
}

pub fn preprocess_with_report(source: &str) -> PreprocessOutcome {
    let tree = guide_stepper_syntax::parse(source);
    let fences = code_fence_ranges(source);
    let lines = LineIndex::new(source);

    let mut outcome = PreprocessOutcome::default();
    let mut insertions: Vec<(usize, String)> = Vec::new();

    for block in find_blocks(&tree) {
        let line = lines.line_of(block.span.start);

        if block.has_raw_content {
            log::debug!(
                "line {}: {} already has {RAW_CONTENT}",
                line + 1,
                block.component.element_name()
            );
            outcome.already_present += 1;
            continue;
        }

        if in_code_fence(&fences, line) {
            log::debug!(
                "line {}: {} is inside a code fence, skipping",
                line + 1,
                block.component.element_name()
            );
            outcome.skipped_in_fence += 1;
            continue;
        }

        insertions.push((block.name_end, raw_content_prop(block.raw_content(source))));
        outcome.injected += 1;
    }

    // Insert back to front so earlier offsets stay valid.
    insertions.sort_by(|a, b| b.0.cmp(&a.0));
    let mut text = source.to_string();
    for (offset, prop) in insertions {
        text.insert_str(offset, &prop);
    }

    outcome.text = text;
    outcome
}

/// ` rawContent={"..."}`, with the content escaped as a JSON string.
fn raw_content_prop(raw: &str) -> String {
    let literal = serde_json::Value::String(raw.to_string()).to_string();
    format!(" {RAW_CONTENT}={{{literal}}}")
}
