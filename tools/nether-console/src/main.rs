//! Nether Console - drive the debug console from a terminal
//!
//! Runs the console core against a small demo scene. Each input line is a
//! console command; `:`-prefixed lines stand in for the overlay keys.
//!
//! # Usage
//!
//! ```bash
//! # Interactive session using console.toml from the config directory
//! nether-console
//!
//! # Replay a script of commands
//! nether-console --script commands.txt
//!
//! # Write the demo command list as a starting console.toml
//! nether-console init
//! ```
//!
//! # Directives
//!
//! - `:toggle` - Show/hide the console (commands are ignored while hidden)
//! - `:help` - Show/hide the command list
//! - `:type <text>` - Set the input line without committing, list suggestions
//! - `:suggest <n>` - Insert the format of suggestion `n` into the input line
//! - `:view` - Print the help and suggestion lists
//! - `:quit` - Exit

mod repl;
mod scene;

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use nethercore_devconsole::ConsoleConfig;
use nethercore_devconsole::ConsoleSession;
use nethercore_devconsole::config::default_config_path;

use repl::Driver;

/// Nether Console - in-game debug console in a terminal
#[derive(Parser)]
#[command(name = "nether-console")]
#[command(about = "Run debug console commands against a demo scene")]
#[command(version)]
struct Cli {
    /// Path to console.toml (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Read commands from a file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the demo command list to console.toml
    Init(InitArgs),
}

/// Arguments for the init command
#[derive(Args)]
struct InitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.clone().or_else(default_config_path);

    match cli.command {
        Some(Commands::Init(args)) => init(config_path.as_deref(), args),
        None => run(config_path.as_deref(), cli.script.as_deref()),
    }
}

fn init(path: Option<&Path>, args: InitArgs) -> Result<()> {
    let path = path.context("could not determine a config directory, pass --config")?;
    if path.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    scene::demo_config()
        .save_to_path(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ConsoleConfig> {
    match path {
        Some(path) if path.exists() => ConsoleConfig::load_from_path(path)
            .with_context(|| format!("failed to load {}", path.display())),
        Some(path) => {
            tracing::info!(
                "No console config at {}, using demo commands",
                path.display()
            );
            Ok(scene::demo_config())
        }
        None => Ok(scene::demo_config()),
    }
}

fn run(config_path: Option<&Path>, script: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let session = ConsoleSession::from_config(&config).context("invalid command list")?;
    let host = scene::build_host();
    let stdout = io::stdout().lock();

    match script {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            Driver::new(session, host, BufReader::new(file), stdout).run()
        }
        None => {
            let interactive = io::stdin().is_terminal();
            Driver::new(session, host, io::stdin().lock(), stdout)
                .with_prompt(interactive)
                .run()
        }
    }
}
