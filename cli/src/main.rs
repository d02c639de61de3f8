use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pairlink_core::*;
use rand::Rng;

mod autoplay;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with the level table to use instead of the built-in one
    #[arg(short, long)]
    levels: Option<PathBuf>,

    /// Print machine readable JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Action {
    /// Generate the board of a level and show its first hint
    Show {
        #[arg(short = 'n', long, default_value_t = 1)]
        level: u8,
    },
    /// Let the hint finder play a whole game
    Autoplay {
        /// Never pick tiles, only let the clock run
        #[arg(long)]
        idle: bool,
    },
    /// List the level table
    Levels,
}

fn load_config(args: &Args) -> Result<SessionConfig> {
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::debug!("seed: {}", seed);

    let mut config = SessionConfig::new(seed);
    if let Some(path) = &args.levels {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        config.levels = serde_json::from_str(&text)
            .with_context(|| format!("Invalid level table in {}", path.display()))?;
    }
    Ok(config)
}

fn show(config: &SessionConfig, level: u8, json: bool) -> Result<()> {
    let level_config = config.levels.get(level)?;
    let board = RandomBoardGenerator::new(config.seed).generate(level_config.into())?;
    let hint = find_hint(&board);

    if json {
        let value = serde_json::json!({
            "level": level,
            "config": level_config,
            "stats": board.stats(),
            "hint": hint,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!(
        "Level {}: {} s, {} piece types",
        level, level_config.time_limit, level_config.piece_types
    );
    print!("{board}");
    match hint {
        Some(hint) => println!(
            "Hint: {} - {} ({} turns)",
            hint.first,
            hint.second,
            hint.path.turns()
        ),
        None => println!("No moves, the board needs a shuffle"),
    }
    Ok(())
}

fn levels(config: &SessionConfig, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&config.levels)?);
        return Ok(());
    }
    for (level, level_config) in config.levels.iter() {
        println!(
            "{:>3}: {}x{} board, {:>2} piece types, {:>4} s",
            level,
            level_config.board_size,
            level_config.board_size,
            level_config.piece_types,
            level_config.time_limit
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = load_config(&args)?;
    match args.action {
        Action::Show { level } => show(&config, level, args.json),
        Action::Levels => levels(&config, args.json),
        Action::Autoplay { idle } => {
            let session = Session::new(config)?;
            let snapshot = autoplay::Autoplay::new(session, idle).run()?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                println!(
                    "{:?} on level {} with {} points",
                    snapshot.status, snapshot.level, snapshot.total_score
                );
            }
            Ok(())
        }
    }
}
