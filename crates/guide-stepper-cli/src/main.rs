mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "guide-stepper",
    version,
    about = "Preprocess GuideStepper MDX content and build copy-as-prompt text"
)]
struct Cli {
    /// Config file (default: ./guide-stepper.toml, then ~/.config/guide-stepper/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inject rawContent props into Checkpoint and Prompt blocks
    Preprocess(commands::PreprocessArgs),

    /// Print the 1-based line range of every complete fenced code block
    Fences(commands::FencesArgs),

    /// Print the copy-as-prompt markdown of each step
    Prompt(commands::PromptArgs),

    /// Write a starter config file (default: ./guide-stepper.toml)
    Init(commands::InitArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Preprocess(args) => commands::preprocess(args, cli.config.as_deref()),
        Command::Fences(args) => commands::fences(args),
        Command::Prompt(args) => commands::prompt(args),
        Command::Init(args) => commands::init(args, cli.config.as_deref()),
    }
}
