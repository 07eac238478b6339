use criterion::{Criterion, criterion_group, criterion_main};
use guide_stepper_engine::{Guide, code_fence_ranges, preprocess};

fn generate_guide(steps: usize) -> String {
    let mut content = String::from("# Guide\n\n```mdx\n<GuideStepper.Checkpoint>\nExample\n</GuideStepper.Checkpoint>\n```\n\n<GuideStepper>\n");

    for step in 0..steps {
        content.push_str(&format!(
            "<GuideStepper.Step id=\"step-{step}\" title=\"Step {step}\">\n\n\
             <GuideStepper.Prompt>\nYou are assisting with step {step}.\n</GuideStepper.Prompt>\n\n\
             <Conditional whenId=\"os\" whenValue=\"linux\">\n\
             <GuideStepper.Checkpoint id=\"a-{step}\" title=\"Install\">\nRun `apt install pkg`.\n</GuideStepper.Checkpoint>\n\
             </Conditional>\n\n\
             <GuideStepper.Checkpoint id=\"b-{step}\" title=\"Verify\">\n### Verify\n\n```bash\npkg --version\n```\n</GuideStepper.Checkpoint>\n\n\
             </GuideStepper.Step>\n\n"
        ));
    }

    content.push_str("</GuideStepper>\n");
    content
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);

    let content = generate_guide(200);
    let processed = preprocess(&content);

    group.bench_function("code_fence_ranges", |b| {
        b.iter(|| code_fence_ranges(std::hint::black_box(&content)));
    });

    group.bench_function("preprocess", |b| {
        b.iter(|| preprocess(std::hint::black_box(&content)));
    });

    group.bench_function("preprocess_already_processed", |b| {
        b.iter(|| preprocess(std::hint::black_box(&processed)));
    });

    group.bench_function("guide_parse", |b| {
        b.iter(|| Guide::parse(std::hint::black_box(&content)));
    });

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
