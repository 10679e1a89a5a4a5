//! # Cavern Main Entry Point
//!
//! Loads the map, sets up input and presentation, and runs the session.

use cavern::{
    load_map_file, CavernResult, ChoiceSource, ConsolePresenter, GameConfig,
    GameController, GameState, LineInput, ScriptedChoices,
};
use clap::Parser;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::process::ExitCode;

/// Command line arguments for Cavern.
#[derive(Parser, Debug)]
#[command(name = "cavern")]
#[command(about = "A turn-based cave escape: clear monsters, beat the flood, open the hatch")]
#[command(version)]
struct Args {
    /// Path to the JSON cave map
    map: PathBuf,

    /// Where to write the session history CSV
    #[arg(long, default_value = cavern::config::DEFAULT_HISTORY_PATH)]
    history: PathBuf,

    /// Time budget per run in seconds (decimal)
    #[arg(long)]
    budget: Option<Decimal>,

    /// Location every run starts at
    #[arg(long, default_value = cavern::config::DEFAULT_START_LOCATION)]
    start: String,

    /// Replay choices from a file instead of reading stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    log::info!("Starting Cavern v{}", cavern::VERSION);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initializes env_logger; `RUST_LOG` takes precedence over the flag.
fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        "off" => log::LevelFilter::Off,
        _ => log::LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .init();
}

fn run(args: &Args) -> CavernResult<()> {
    let mut config = GameConfig::default()
        .with_start_location(args.start.clone())
        .with_history_path(args.history.clone());
    if let Some(budget) = args.budget {
        config = config.with_budget(budget);
    }

    let graph = load_map_file(&args.map)?;
    let state = GameState::new(graph, config)?;
    let presenter = ConsolePresenter::stdout(!args.no_color);

    match &args.script {
        Some(path) => {
            log::info!("Replaying choices from {}", path.display());
            play(state, ScriptedChoices::from_file(path)?, presenter)
        }
        None => play(state, LineInput::stdin(), presenter),
    }
}

fn play<S: ChoiceSource>(
    state: GameState,
    input: S,
    presenter: ConsolePresenter<std::io::Stdout>,
) -> CavernResult<()> {
    let mut controller = GameController::new(state, input, presenter);
    let summary = controller.run()?;
    log::info!(
        "Session finished: {:?}, {} history records",
        summary.outcome,
        summary.records
    );
    Ok(())
}
