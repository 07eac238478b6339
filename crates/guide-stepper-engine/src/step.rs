//! # Step children
//!
//! Decomposes the children of one `GuideStepper.Step` into the parts a step
//! renderer needs: checkpoints (each with an optional visibility rule), the
//! "what you need" / "what you get" blocks, system-prompt fragments, and the
//! remaining body content in its original order.
//!
//! A conditional wrapper whose meaningful children are all checkpoints is
//! unwrapped: its checkpoints become ordinary entries carrying the wrapper's
//! visibility, so consumers counting or listing checkpoints never see the
//! wrapper itself.
//!
//! ```text
//! <Conditional whenId="source-database" whenValue="postgres">
//!   <GuideStepper.Checkpoint title="Enable logical replication">...</GuideStepper.Checkpoint>
//! </Conditional>
//!   → CheckpointEntry { visibility: Some(source-database = postgres), .. }
//! ```

use serde::Serialize;

use crate::component::GuideStepperKind;
use crate::mdx::{AttrValue, MdxElement, MdxNode};
use crate::prompt::{PromptCheckpoint, build_prompt_markdown};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
    pub id: Option<String>,
    pub title: Option<String>,
    /// Trimmed markdown source of `children`; only used for prompt assembly.
    pub raw_content: Option<String>,
    pub children: Vec<MdxNode>,
}

impl Checkpoint {
    fn from_element(element: &MdxElement) -> Self {
        Self {
            id: element.string_attribute("id"),
            title: element.string_attribute("title"),
            raw_content: element.string_attribute("rawContent"),
            children: element.children.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WhenValue {
    One(String),
    Any(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    Equals,
    Includes,
}

impl MatchMode {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "equals" => Some(Self::Equals),
            "includes" => Some(Self::Includes),
            _ => None,
        }
    }
}

/// Display condition attached to checkpoints inside a conditional wrapper.
///
/// Evaluation against the reader's guide settings happens in the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Visibility {
    pub when_id: String,
    pub when_value: WhenValue,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_mode: Option<MatchMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<AttrValue>,
}

impl Visibility {
    /// Reads the wrapper props; `None` unless `whenId` is a string,
    /// `whenValue` a string or string array, and `match` absent or valid.
    pub fn from_element(element: &MdxElement) -> Option<Self> {
        let when_id = element.string_attribute("whenId")?;
        let when_value = element.attribute("whenValue").and_then(|value| {
            value
                .string_value()
                .map(WhenValue::One)
                .or_else(|| value.string_list().map(WhenValue::Any))
        })?;
        let match_mode = match element.attribute("match") {
            None => None,
            Some(value) => Some(MatchMode::parse(&value.string_value()?)?),
        };

        Some(Self {
            when_id,
            when_value,
            match_mode,
            fallback: element.attribute("fallback").cloned(),
        })
    }
}

/// One classified child of a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepChild {
    Checkpoint(Checkpoint),
    WhatYouNeed(MdxElement),
    WhatYouGet(MdxElement),
    /// Raw content of a `GuideStepper.Prompt`; empty when it has none.
    Prompt(String),
    /// A conditional wrapper holding only checkpoints.
    Conditional {
        visibility: Visibility,
        checkpoints: Vec<Checkpoint>,
    },
    Body(MdxNode),
}

impl StepChild {
    /// `None` for markdown that renders nothing.
    pub fn classify(node: &MdxNode) -> Option<Self> {
        if node.is_blank() {
            return None;
        }
        let Some(element) = node.as_element() else {
            return Some(Self::Body(node.clone()));
        };

        let child = match element.component() {
            Some(GuideStepperKind::Checkpoint) => Self::Checkpoint(Checkpoint::from_element(element)),
            Some(GuideStepperKind::WhatYouNeed) => Self::WhatYouNeed(element.clone()),
            Some(GuideStepperKind::WhatYouGet) => Self::WhatYouGet(element.clone()),
            Some(GuideStepperKind::Prompt) => {
                Self::Prompt(element.string_attribute("rawContent").unwrap_or_default())
            }
            _ => conditional(element).unwrap_or_else(|| Self::Body(node.clone())),
        };
        Some(child)
    }
}

fn conditional(element: &MdxElement) -> Option<StepChild> {
    let visibility = Visibility::from_element(element)?;

    let mut meaningful = Vec::new();
    flatten_groups(&element.children, &mut meaningful);
    if meaningful.is_empty() {
        return None;
    }

    let checkpoints = meaningful
        .into_iter()
        .map(|node| match node.component() {
            Some(GuideStepperKind::Checkpoint) => {
                node.as_element().map(Checkpoint::from_element)
            }
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;

    Some(StepChild::Conditional {
        visibility,
        checkpoints,
    })
}

/// Collects non-blank children, looking through transparent groups.
fn flatten_groups<'a>(children: &'a [MdxNode], out: &mut Vec<&'a MdxNode>) {
    for child in children {
        match child.as_element() {
            Some(group) if group.is_transparent_group() => flatten_groups(&group.children, out),
            _ if child.is_blank() => {}
            _ => out.push(child),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointEntry {
    pub checkpoint: Checkpoint,
    pub visibility: Option<Visibility>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedStepChildren {
    pub checkpoints: Vec<CheckpointEntry>,
    pub what_you_need_blocks: Vec<MdxElement>,
    pub what_you_get_blocks: Vec<MdxElement>,
    pub body_children: Vec<MdxNode>,
    pub prompt_to_copy: String,
}

pub fn parse_step_children(children: &[MdxNode]) -> ParsedStepChildren {
    let mut parsed = ParsedStepChildren::default();
    let mut prompt_raw_contents = Vec::new();

    for child in children.iter().filter_map(StepChild::classify) {
        match child {
            StepChild::Checkpoint(checkpoint) => parsed.checkpoints.push(CheckpointEntry {
                checkpoint,
                visibility: None,
            }),
            StepChild::WhatYouNeed(block) => parsed.what_you_need_blocks.push(block),
            StepChild::WhatYouGet(block) => parsed.what_you_get_blocks.push(block),
            StepChild::Prompt(raw) => prompt_raw_contents.push(raw),
            StepChild::Conditional {
                visibility,
                checkpoints,
            } => {
                parsed
                    .checkpoints
                    .extend(checkpoints.into_iter().map(|checkpoint| CheckpointEntry {
                        checkpoint,
                        visibility: Some(visibility.clone()),
                    }));
            }
            StepChild::Body(node) => parsed.body_children.push(node),
        }
    }

    let prompt_checkpoints: Vec<PromptCheckpoint<'_>> = parsed
        .checkpoints
        .iter()
        .map(|entry| PromptCheckpoint {
            title: entry.checkpoint.title.as_deref(),
            raw_content: entry.checkpoint.raw_content.as_deref(),
        })
        .collect();
    parsed.prompt_to_copy = build_prompt_markdown(&prompt_raw_contents, &prompt_checkpoints);

    parsed
}
