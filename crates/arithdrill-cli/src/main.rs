//! arithdrill CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "arithdrill", version, about = "Arithmetic drill trainer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Batch settings shared by commands that start a session.
#[derive(Args, Debug, Clone, Default)]
pub struct DrillArgs {
    /// Operator: +, -, x, / (or add, subtract, multiply, divide)
    #[arg(long, short = 'o')]
    pub operator: Option<String>,

    /// Number of problems (1-100)
    #[arg(long, short = 'n')]
    pub count: Option<usize>,

    /// Fewest digits per operand (1-9)
    #[arg(long)]
    pub min_digits: Option<u32>,

    /// Most digits per operand (1-9)
    #[arg(long)]
    pub max_digits: Option<u32>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a batch of problems interactively, then grade it
    Practice {
        #[command(flatten)]
        drill: DrillArgs,

        /// Output directory for exports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Export formats: csv, html, json, all, none (comma-separated)
        #[arg(long)]
        format: Option<String>,
    },

    /// Generate a batch and save it as a session file
    Generate {
        #[command(flatten)]
        drill: DrillArgs,

        /// Where to write the session JSON
        #[arg(long, default_value = "session.json")]
        session: PathBuf,
    },

    /// Grade answers against a saved session file
    Grade {
        /// Session JSON written by `generate`
        #[arg(long)]
        session: PathBuf,

        /// Answers, comma or whitespace separated, or @path to read them from a file
        #[arg(long, allow_hyphen_values = true)]
        answers: String,

        /// Output directory for exports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Export formats: csv, html, json, all, none (comma-separated)
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config file
    Init,
}

/// `RUST_LOG` when set, otherwise info-level events from the arithdrill crates.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("arithdrill=info"))
}

fn main() {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(rust_log.as_deref()))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Practice {
            drill,
            output,
            format,
        } => commands::practice::execute(drill, output, format),
        Commands::Generate { drill, session } => commands::generate::execute(drill, session),
        Commands::Grade {
            session,
            answers,
            output,
            format,
            config,
        } => commands::grade::execute(session, answers, output, format, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
