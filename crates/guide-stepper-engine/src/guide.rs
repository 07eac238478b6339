use serde::Serialize;

use crate::component::GuideStepperKind;
use crate::fences::{LineIndex, code_fence_ranges, in_code_fence};
use crate::mdx::{MdxElement, MdxNode, lower};
use crate::preprocess::preprocess;
use crate::step::{ParsedStepChildren, parse_step_children};

/// Every `GuideStepper.Step` of a document, parsed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Guide {
    pub steps: Vec<GuideStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideStep {
    pub id: Option<String>,
    pub title: Option<String>,
    pub children: ParsedStepChildren,
}

impl GuideStep {
    fn from_element(element: &MdxElement) -> Self {
        Self {
            id: element.string_attribute("id"),
            title: element.string_attribute("title"),
            children: parse_step_children(&element.children),
        }
    }
}

impl Guide {
    /// Preprocesses `source` and parses every step in document order.
    ///
    /// Steps are not searched for inside other steps or inside code fences.
    pub fn parse(source: &str) -> Self {
        let processed = preprocess(source);
        let tree = guide_stepper_syntax::parse(&processed);
        let fences = code_fence_ranges(&processed);
        let lines = LineIndex::new(&processed);

        let mut steps = Vec::new();
        collect_steps(&lower(&tree), &mut |element: &MdxElement| {
            let line = lines.line_of(element.span.start);
            if in_code_fence(&fences, line) {
                log::debug!("line {}: step inside a code fence, skipping", line + 1);
            } else {
                steps.push(GuideStep::from_element(element));
            }
        });

        Self { steps }
    }

    pub fn step(&self, id: &str) -> Option<&GuideStep> {
        self.steps.iter().find(|step| step.id.as_deref() == Some(id))
    }
}

fn collect_steps(nodes: &[MdxNode], found: &mut impl FnMut(&MdxElement)) {
    for element in nodes.iter().filter_map(MdxNode::as_element) {
        if element.component() == Some(GuideStepperKind::Step) {
            found(element);
        } else {
            collect_steps(&element.children, found);
        }
    }
}
