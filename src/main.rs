//! skinedit - replay edit scripts against a skin
//!
//! This is the main entry point for the command-line tool.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use skinedit::config::Settings;
use skinedit::replay;

/// skinedit - undo/redo core for a UI skin editor
#[derive(Parser, Debug)]
#[command(name = "skinedit")]
#[command(about = "Replay skin edits through the undo/redo history", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Dispatch every step of a JSON edit script and print the menu labels
    Replay {
        /// Script file: {"skin": ..., "steps": [...]}
        script: PathBuf,
        /// Override the configured history capacity
        #[arg(long)]
        max_undos: Option<usize>,
        /// Print the resulting skin as JSON
        #[arg(long)]
        dump: bool,
    },
    /// Show the settings file location and effective settings
    Config,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            script,
            max_undos,
            dump,
        } => run_replay(&script, max_undos, dump),
        Commands::Config => show_config(),
        Commands::Completions { shell } => {
            print_completions(shell);
            Ok(())
        }
    }
}

fn load_settings(max_undos: Option<usize>) -> Result<Settings> {
    let mut settings = Settings::load().context("failed to load settings")?;
    if let Some(max_undos) = max_undos {
        settings.max_undos = max_undos;
        settings.validate()?;
    }
    Ok(settings)
}

/// Replay a script and report each step
fn run_replay(path: &Path, max_undos: Option<usize>, dump: bool) -> Result<()> {
    let settings = load_settings(max_undos)?;
    let script = replay::load_script(path)
        .with_context(|| format!("failed to load script {}", path.display()))?;

    let report = replay::run(script, settings);
    for (idx, step) in report.steps.iter().enumerate() {
        match &step.result {
            Ok(()) => println!(
                "{:>3} {:<24} [{}] [{}]",
                idx + 1,
                step.op,
                step.menu.undo_text,
                step.menu.redo_text
            ),
            Err(e) => println!("{:>3} {:<24} rejected: {}", idx + 1, step.op, e),
        }
    }

    if dump {
        println!("{}", serde_json::to_string_pretty(&report.skin)?);
    }

    let failures = report.failures();
    if failures > 0 {
        bail!("{} of {} steps rejected", failures, report.steps.len());
    }
    Ok(())
}

fn show_config() -> Result<()> {
    let path = Settings::config_path();
    let settings = Settings::load().context("failed to load settings")?;
    println!("Settings file: {}", path.display());
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

/// Print shell completions
fn print_completions(shell: clap_complete::Shell) {
    clap_complete::generate(
        shell,
        &mut Cli::command(),
        "skinedit",
        &mut std::io::stdout(),
    );
}
