//! Builds the "copy as AI prompt" markdown for one step.

use regex::Regex;
use std::sync::OnceLock;

/// Line between the system-prompt section and the checkpoint section.
pub const SECTION_SEPARATOR: &str = "\n\n-------------\n\n";

/// Title and raw markdown of one checkpoint, as fed to the builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromptCheckpoint<'a> {
    pub title: Option<&'a str>,
    pub raw_content: Option<&'a str>,
}

/// Joins system-prompt fragments and checkpoint segments into one string.
///
/// Empty fragments and empty segments are dropped. When a checkpoint's raw
/// content already opens with a heading matching its title, no second heading
/// is added.
pub fn build_prompt_markdown<S: AsRef<str>>(
    prompt_raw_contents: &[S],
    checkpoints: &[PromptCheckpoint<'_>],
) -> String {
    let system = prompt_raw_contents
        .iter()
        .map(|raw| raw.as_ref().trim())
        .filter(|raw| !raw.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    let steps = checkpoints
        .iter()
        .map(checkpoint_segment)
        .filter(|segment| !segment.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    match (system.is_empty(), steps.is_empty()) {
        (true, _) => steps,
        (false, true) => system,
        (false, false) => format!("{system}{SECTION_SEPARATOR}{steps}"),
    }
}

fn checkpoint_segment(checkpoint: &PromptCheckpoint<'_>) -> String {
    let title = checkpoint.title.map(str::trim).unwrap_or_default();
    let raw = checkpoint.raw_content.unwrap_or_default();

    if title.is_empty() {
        return raw.to_string();
    }
    if raw.trim().is_empty() {
        return format!("### {title}");
    }
    if leading_heading(raw).is_some_and(|heading| heading.to_lowercase() == title.to_lowercase()) {
        return raw.to_string();
    }
    format!("### {title}\n\n{raw}")
}

/// Text of the ATX heading on the first non-blank line, if that line is one.
fn leading_heading(markdown: &str) -> Option<String> {
    static HEADING_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = HEADING_REGEX.get_or_init(|| {
        Regex::new(r"^ {0,3}#{1,6}[ \t]+(.*?)(?:[ \t]+#+)?[ \t]*$").expect("Invalid heading regex")
    });

    let line = markdown.lines().find(|line| !line.trim().is_empty())?;
    let captures = regex.captures(line.trim_end_matches('\r'))?;
    Some(captures.get(1)?.as_str().trim().to_string())
}
