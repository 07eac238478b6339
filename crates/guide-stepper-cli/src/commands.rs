use anyhow::{Context, Result, bail};
use guide_stepper_config::{Config, LOCAL_CONFIG_FILE};
use guide_stepper_engine::{Guide, code_fence_ranges, io, preprocess_with_report};
use relative_path::RelativePathBuf;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(clap::Args)]
pub struct PreprocessArgs {
    /// Files or directories to process (default: the configured content directory)
    paths: Vec<PathBuf>,

    /// Rewrite changed files in place
    #[arg(long, conflicts_with = "check")]
    write: bool,

    /// Exit with status 1 if any file would change
    #[arg(long)]
    check: bool,
}

#[derive(clap::Args)]
pub struct FencesArgs {
    /// Document to scan
    file: PathBuf,
}

#[derive(clap::Args)]
pub struct PromptArgs {
    /// Guide document
    file: PathBuf,

    /// Only the step with this id
    #[arg(long)]
    step: Option<String>,

    /// Print the parsed guide as JSON instead of prompt text
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
pub struct InitArgs {
    /// Content directory, relative to the config file
    #[arg(long, default_value = ".")]
    content_dir: PathBuf,

    /// Document extensions to scan, without the dot
    #[arg(long = "extension", value_name = "EXT")]
    extensions: Vec<String>,

    /// Overwrite an existing config file
    #[arg(long)]
    force: bool,
}

/// A document addressed by its content root and a path relative to it.
struct Target {
    root: PathBuf,
    path: RelativePathBuf,
}

impl Target {
    fn display(&self) -> String {
        self.path.to_path(&self.root).display().to_string()
    }
}

fn collect_targets(args: &PreprocessArgs, config_path: Option<&Path>) -> Result<Vec<Target>> {
    let config = Config::load(config_path)?;
    let extensions = config
        .as_ref()
        .map(|c| c.extensions.clone())
        .unwrap_or_else(|| Config::default().extensions);

    let roots = if args.paths.is_empty() {
        match &config {
            Some(config) => vec![config.content_dir.clone()],
            None => bail!("no paths given and no config file found"),
        }
    } else {
        args.paths.clone()
    };

    let mut targets = Vec::new();
    for root in roots {
        if root.is_dir() {
            let documents = io::scan_documents(&root, &extensions)
                .with_context(|| format!("scanning {}", root.display()))?;
            log::info!("{}: {} documents", root.display(), documents.len());
            targets.extend(documents.into_iter().map(|path| Target {
                root: root.clone(),
                path,
            }));
        } else {
            targets.push(single_file_target(&root)?);
        }
    }
    Ok(targets)
}

fn single_file_target(file: &Path) -> Result<Target> {
    let name = file
        .file_name()
        .with_context(|| format!("{} is not a file", file.display()))?;
    let root = file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let path = RelativePathBuf::from_path(name)
        .with_context(|| format!("invalid file name {}", file.display()))?;
    Ok(Target { root, path })
}

pub fn preprocess(args: PreprocessArgs, config_path: Option<&Path>) -> Result<ExitCode> {
    let targets = collect_targets(&args, config_path)?;
    let print_text = !args.write
        && !args.check
        && targets.len() == 1
        && matches!(args.paths.as_slice(), [path] if !path.is_dir());

    let mut changed = 0usize;
    for target in &targets {
        let source = io::read_document(&target.path, &target.root)
            .with_context(|| format!("reading {}", target.display()))?;
        let outcome = preprocess_with_report(&source);
        log::info!(
            "{}: {} injected, {} already present, {} in code fences",
            target.display(),
            outcome.injected,
            outcome.already_present,
            outcome.skipped_in_fence
        );

        if print_text {
            print!("{}", outcome.text);
            continue;
        }
        if !outcome.changed() {
            continue;
        }
        changed += 1;

        if args.write {
            io::write_document(&target.path, &target.root, &outcome.text)
                .with_context(|| format!("writing {}", target.display()))?;
            println!("updated {}", target.display());
        } else if args.check {
            println!("would update {}", target.display());
        } else {
            println!("{}: {} blocks to inject", target.display(), outcome.injected);
        }
    }

    if args.check && changed > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn read_file(file: &Path) -> Result<String> {
    let target = single_file_target(file)?;
    io::read_document(&target.path, &target.root)
        .with_context(|| format!("reading {}", file.display()))
}

pub fn fences(args: FencesArgs) -> Result<ExitCode> {
    let source = read_file(&args.file)?;
    for range in code_fence_ranges(&source) {
        println!("{}..={}", range.start + 1, range.end + 1);
    }
    Ok(ExitCode::SUCCESS)
}

pub fn prompt(args: PromptArgs) -> Result<ExitCode> {
    let source = read_file(&args.file)?;
    let guide = Guide::parse(&source);

    if let Some(id) = &args.step {
        let Some(step) = guide.step(id) else {
            bail!("no step with id {id:?} in {}", args.file.display());
        };
        if args.json {
            println!("{}", serde_json::to_string_pretty(step)?);
        } else {
            println!("{}", step.children.prompt_to_copy);
        }
        return Ok(ExitCode::SUCCESS);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&guide)?);
        return Ok(ExitCode::SUCCESS);
    }

    for (index, step) in guide.steps.iter().enumerate() {
        if index > 0 {
            println!();
        }
        let label = step.id.as_deref().unwrap_or("(no id)");
        println!("<!-- step: {label} -->");
        println!("{}", step.children.prompt_to_copy);
    }
    Ok(ExitCode::SUCCESS)
}

pub fn init(args: InitArgs, config_path: Option<&Path>) -> Result<ExitCode> {
    let config_path = config_path.unwrap_or(Path::new(LOCAL_CONFIG_FILE));
    if config_path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    let mut config = Config {
        content_dir: args.content_dir,
        ..Config::default()
    };
    if !args.extensions.is_empty() {
        config.extensions = args.extensions;
    }

    config
        .save_to_path(config_path)
        .with_context(|| format!("writing {}", config_path.display()))?;
    println!("wrote {}", config_path.display());
    Ok(ExitCode::SUCCESS)
}
