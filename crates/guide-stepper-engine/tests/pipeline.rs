//! End-to-end checks of the content pipeline on realistic guide pages.

use guide_stepper_engine::{
    Guide, MatchMode, Visibility, WhenValue, build_prompt_markdown, code_fence_ranges, preprocess,
    preprocess_with_report,
};
use pretty_assertions::assert_eq;

const CDC_GUIDE: &str = r#"---
title: Stream CDC events
---

# Stream CDC events

This guide documents `<GuideStepper.Checkpoint>` usage. For example:

```mdx
<GuideStepper.Checkpoint id="example" title="Example">
Illustrative only.
</GuideStepper.Checkpoint>
```

<GuideStepper>

<GuideStepper.Step id="source" title="Configure the source">

<GuideStepper.Prompt>
You are helping a user configure change data capture.
Answer with shell commands where possible.
</GuideStepper.Prompt>

<Conditional whenId="source-database" whenValue="postgres">
  <GuideStepper.Checkpoint id="wal" title="Enable logical replication">
  Set `wal_level = logical` in `postgresql.conf`.
  </GuideStepper.Checkpoint>
</Conditional>

<Conditional whenId="source-database" whenValue={["mysql", "mariadb"]} match="includes">
  <GuideStepper.Checkpoint id="binlog" title="Enable the binlog">
  Set `binlog_format = ROW`.
  </GuideStepper.Checkpoint>
</Conditional>

<GuideStepper.Checkpoint id="status" title="Verify CDC Status">
### Verify CDC Status

Run the status command and confirm no lag.
</GuideStepper.Checkpoint>

</GuideStepper.Step>

</GuideStepper>
"#;

#[test]
fn preprocess_injects_real_blocks_only() {
    let outcome = preprocess_with_report(CDC_GUIDE);
    assert_eq!(outcome.injected, 4);
    assert_eq!(outcome.skipped_in_fence, 0);
    assert!(outcome.text.contains(
        "<GuideStepper.Checkpoint id=\"example\" title=\"Example\">\nIllustrative only."
    ));
    assert!(
        outcome
            .text
            .contains("<GuideStepper.Checkpoint rawContent={\"Set `binlog_format = ROW`.\"} id=\"binlog\"")
    );
}

#[test]
fn preprocess_twice_is_a_no_op() {
    let once = preprocess(CDC_GUIDE);
    let report = preprocess_with_report(&once);
    assert_eq!(report.text, once);
    assert_eq!(report.injected, 0);
    assert_eq!(report.already_present, 4);
}

#[test]
fn fence_ranges_cover_the_example() {
    let ranges = code_fence_ranges(CDC_GUIDE);
    assert_eq!(ranges.len(), 1);
    let lines: Vec<&str> = CDC_GUIDE.split('\n').collect();
    assert_eq!(lines[ranges[0].start], "```mdx");
    assert_eq!(lines[ranges[0].end], "```");
}

#[test]
fn guide_model_unwraps_conditional_checkpoints() {
    let guide = Guide::parse(CDC_GUIDE);
    assert_eq!(guide.steps.len(), 1);

    let step = guide.step("source").unwrap();
    let children = &step.children;
    let ids: Vec<_> = children
        .checkpoints
        .iter()
        .filter_map(|entry| entry.checkpoint.id.as_deref())
        .collect();
    assert_eq!(ids, vec!["wal", "binlog", "status"]);
    assert!(children.body_children.is_empty());

    assert_eq!(
        children.checkpoints[1].visibility,
        Some(Visibility {
            when_id: "source-database".into(),
            when_value: WhenValue::Any(vec!["mysql".into(), "mariadb".into()]),
            match_mode: Some(MatchMode::Includes),
            fallback: None,
        })
    );
    assert_eq!(children.checkpoints[2].visibility, None);
}

#[test]
fn guide_prompt_has_one_heading_per_checkpoint() {
    let guide = Guide::parse(CDC_GUIDE);
    let prompt = &guide.steps[0].children.prompt_to_copy;

    assert!(prompt.starts_with(
        "You are helping a user configure change data capture.\nAnswer with shell commands where possible.\n\n-------------\n\n"
    ));
    assert_eq!(prompt.matches("### Verify CDC Status").count(), 1);
    assert_eq!(prompt.matches("### Enable logical replication").count(), 1);
    assert!(prompt.ends_with("Run the status command and confirm no lag."));
}

#[test]
fn empty_prompt_inputs() {
    let no_prompts: [&str; 0] = [];
    assert_eq!(build_prompt_markdown(&no_prompts, &[]), "");
}

#[test]
fn guide_serializes_with_component_prop_names() {
    let guide = Guide::parse(CDC_GUIDE);
    let json = serde_json::to_value(&guide).unwrap();
    let entry = &json["steps"][0]["children"]["checkpoints"][0];
    assert_eq!(entry["checkpoint"]["rawContent"], "Set `wal_level = logical` in `postgresql.conf`.");
    assert_eq!(entry["visibility"]["whenId"], "source-database");
    assert_eq!(entry["visibility"]["whenValue"], "postgres");
}
