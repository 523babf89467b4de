mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fairway_core::config::EngineConfig;
use fairway_engine::input::{InputError, InputFormat, RoundInput};
use fairway_engine::{LiveMoneyTracker, RoundSnapshot, catalog, evaluate};

#[derive(Parser, Debug)]
#[command(name = "fairway", about = "Settle the side games of a golf round")]
struct Cli {
    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Game results and the netted settlement for a round file.
    Report { file: PathBuf },
    /// Running balances as of the last completed hole.
    Live {
        file: PathBuf,
        /// Show the state after every completed hole instead of only the last.
        #[arg(long)]
        replay: bool,
    },
    /// List the supported games.
    Games,
}

#[derive(Debug)]
enum CliError {
    Read(PathBuf, std::io::Error),
    Input(InputError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(path, e) => write!(f, "cannot read {}: {e}", path.display()),
            Self::Input(e) => write!(f, "{e}"),
            Self::Json(e) => write!(f, "cannot encode output: {e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<InputError> for CliError {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::load();
    config.validate();

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("fairway: {e}");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: &Cli, config: &EngineConfig) -> Result<(), CliError> {
    match &cli.command {
        Command::Report { file } => {
            let snapshot = load_round(file, config)?;
            let report = evaluate(&snapshot);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::report(&snapshot, &report));
            }
        },
        Command::Live { file, replay } => {
            let snapshot = load_round(file, config)?;
            let mut tracker = LiveMoneyTracker::new();
            let states = if *replay {
                hole_by_hole(&snapshot)
                    .iter()
                    .map(|step| tracker.update(step))
                    .collect()
            } else {
                vec![tracker.update(&snapshot)]
            };
            for state in &states {
                if cli.json {
                    println!("{}", serde_json::to_string(state)?);
                } else {
                    print!("{}", render::live(state));
                }
            }
        },
        Command::Games => {
            let games = catalog();
            if cli.json {
                let metadata: Vec<_> = games.iter().map(|entry| &entry.metadata).collect();
                println!("{}", serde_json::to_string_pretty(&metadata)?);
            } else {
                print!("{}", render::catalog(&games));
            }
        },
    }
    Ok(())
}

fn load_round(path: &Path, config: &EngineConfig) -> Result<RoundSnapshot, CliError> {
    let format = InputFormat::from_path(path)?;
    let content =
        std::fs::read_to_string(path).map_err(|e| CliError::Read(path.to_path_buf(), e))?;
    let snapshot = RoundInput::parse(&content, format)?.into_snapshot(config)?;
    tracing::info!(
        path = %path.display(),
        players = snapshot.players.len(),
        games = snapshot.games.len(),
        "Round loaded"
    );
    Ok(snapshot)
}

/// The round as it stood after each hole that has any score, in hole order.
fn hole_by_hole(snapshot: &RoundSnapshot) -> Vec<RoundSnapshot> {
    let mut holes: Vec<u8> = snapshot.scores.iter().map(|s| s.hole).collect();
    holes.sort_unstable();
    holes.dedup();
    holes
        .into_iter()
        .map(|hole| {
            let mut step = snapshot.clone();
            step.scores.retain(|s| s.hole <= hole);
            step
        })
        .collect()
}
