use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use essay_score::{AnalysisInput, Engine, EngineConfig, UserAggregate};

#[derive(Parser)]
#[command(
    name = "essay-score",
    about = "Analyze, score and rank essays",
    version
)]
struct Cli {
    /// TOML file overriding the built-in rule tables, weights and ranking policy
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze and score essays (reads stdin if no files are given)
    Analyze {
        files: Vec<PathBuf>,

        /// Language tag recorded with each analysis
        #[arg(long)]
        lang: Option<String>,
    },
    /// Rank a JSON array of user aggregates (reads stdin if no file is given)
    Leaderboard { file: Option<PathBuf> },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_stdin() -> anyhow::Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    Ok(input)
}

fn read_source(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => read_stdin(),
    }
}

fn print_report(engine: &Engine, text: String, lang: Option<&String>) -> anyhow::Result<()> {
    let mut input = AnalysisInput::new(text);
    input.language_tag = lang.cloned();
    let report = engine.evaluate(&input);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let engine = Engine::new(config);

    match &cli.command {
        Command::Analyze { files, lang } => {
            if files.is_empty() {
                print_report(&engine, read_stdin()?, lang.as_ref())?;
            }
            for path in files {
                print_report(&engine, read_source(Some(path))?, lang.as_ref())?;
            }
        }
        Command::Leaderboard { file } => {
            let raw = read_source(file.as_ref())?;
            let aggregates: Vec<UserAggregate> =
                serde_json::from_str(&raw).context("expected a JSON array of user aggregates")?;
            let entries = engine.recompute_leaderboard(&aggregates);
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}
