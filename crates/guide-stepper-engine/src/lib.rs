//! # guide-stepper-engine
//!
//! The GuideStepper content pipeline, built on the lossless MDX tree from
//! `guide-stepper-syntax`:
//!
//! ```text
//! MDX source ─┬─ fences::code_fence_ranges ─┐
//!             └─ syntax tree ───────────────┴─ preprocess ─→ MDX with rawContent props
//!                                                              │
//!                                         mdx::lower ←─────────┘
//!                                              │
//!                            step::parse_step_children ─→ prompt::build_prompt_markdown
//! ```
//!
//! [`Guide::parse`] runs the whole chain for one document. Every function in
//! the pipeline is total: malformed input gives a best-effort result, never an
//! error. Only [`io`] can fail.

pub mod component;
pub mod fences;
pub mod guide;
pub mod io;
pub mod mdx;
pub mod preprocess;
pub mod prompt;
pub mod span;
pub mod step;

pub use component::GuideStepperKind;
pub use fences::{FenceRange, code_fence_ranges};
pub use guide::{Guide, GuideStep};
pub use io::*;
pub use mdx::{AttrValue, MdxAttribute, MdxElement, MdxNode};
pub use preprocess::{PreprocessOutcome, preprocess, preprocess_with_report};
pub use prompt::{PromptCheckpoint, SECTION_SEPARATOR, build_prompt_markdown};
pub use span::Span;
pub use step::{
    Checkpoint, CheckpointEntry, MatchMode, ParsedStepChildren, StepChild, Visibility, WhenValue,
    parse_step_children,
};
