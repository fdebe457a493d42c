//! kith CLI: encode person rosters to cycle-preserving JSON and inspect the result.

mod commands;
mod config;
mod roster;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use commands::encode::EncodeArgs;
use config::KithConfig;

#[derive(Parser)]
#[command(name = "kith", version, about = "Cycle-preserving person graph codec")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create kith.toml and a sample roster
    Init {
        /// Project directory (default: current directory)
        dir: Option<String>,
    },
    /// Encode a roster to JSON
    Encode {
        /// Roster file (default: [paths] roster from kith.toml)
        #[arg(long)]
        roster: Option<String>,
        /// Start encoding from this person instead of the roster's root
        #[arg(long)]
        root: Option<String>,
        /// Output file (default: [paths] output from kith.toml, else stdout)
        #[arg(long)]
        output: Option<String>,
        /// Emit compact JSON
        #[arg(long)]
        compact: bool,
    },
    /// Decode a file and list its people
    Inspect {
        /// Encoded JSON file
        input: PathBuf,
        /// Output format (text, json)
        #[arg(long)]
        export: Option<String>,
        /// Show the stored object table without decoding it
        #[arg(long)]
        raw: bool,
    },
    /// Verify a file survives decode, re-encode and decode unchanged
    Check {
        /// Encoded JSON file
        input: PathBuf,
    },
    /// Round-trip the four-person sample through a file
    Demo {
        /// Output file (default: person_data.json)
        #[arg(long)]
        output: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { dir } => commands::init::run(dir.as_deref()),

        Commands::Encode {
            roster,
            root,
            output,
            compact,
        } => {
            let (config, project_dir) = load_config(&cwd)?;
            let args = EncodeArgs {
                roster: roster.as_deref(),
                root: root.as_deref(),
                output: output.as_deref(),
                compact,
            };
            commands::encode::run(&project_dir, &config, &args)
        }

        Commands::Inspect { input, export, raw } => {
            commands::inspect::run(&input, export.as_deref(), raw)
        }

        Commands::Check { input } => commands::check::run(&input),

        Commands::Demo { output } => commands::demo::run(output.as_deref()),
    }
}

/// Load `kith.toml` from the working directory upward, falling back to
/// defaults rooted at the working directory.
fn load_config(cwd: &Path) -> anyhow::Result<(KithConfig, PathBuf)> {
    match KithConfig::find_and_load(cwd)? {
        Some((config, dir)) => Ok((config, dir)),
        None => {
            log::debug!("no kith.toml found, using defaults");
            Ok((KithConfig::default(), cwd.to_path_buf()))
        }
    }
}
