//! Self-play CLI.
//!
//! Plays derby memory games between bots and prints one line per game.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Set `RUST_LOG` to change verbosity (default: info).

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use flexi_logger::Logger;

use derby_memory::selfplay::{self, SelfPlayConfig, SelfPlayStats, Strategy};

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum StrategyArg {
    Random,
    Recall,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Random => Strategy::Random,
            StrategyArg::Recall => Strategy::Recall,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "selfplay", about = "Play derby memory games between bots")]
struct Args {
    /// Number of games to play
    #[arg(short = 'g', long, default_value_t = 10)]
    games: usize,

    /// Players at the table (1-8)
    #[arg(short = 'p', long, default_value_t = 2)]
    players: usize,

    /// Seed of the first game; random when omitted
    #[arg(short = 's', long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value = "recall")]
    strategy: StrategyArg,

    /// Mismatch pause in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,

    /// Give up on a game after this many selections
    #[arg(long, default_value_t = 10_000)]
    max_selections: usize,

    /// Only print the batch summary
    #[arg(short = 'q', long, default_value_t = false)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let _logger = match Logger::try_with_env_or_str("info").and_then(|logger| logger.start()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("failed to start logger: {e}");
            None
        }
    };

    let config = SelfPlayConfig {
        games: args.games,
        players: args.players,
        seed: args.seed.unwrap_or_else(rand::random),
        strategy: args.strategy.into(),
        max_selections: args.max_selections,
        mismatch_delay: Duration::from_millis(args.delay_ms),
    };

    let records = match selfplay::run(&config) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("selfplay: {e}");
            return ExitCode::FAILURE;
        }
    };

    if !args.quiet {
        for record in &records {
            let result = record
                .result
                .as_ref()
                .map_or_else(|| "unfinished".to_string(), |r| r.to_string());
            println!(
                "game {:>3}  seed {:>20}  selections {:>4}  scores {:?}  {}",
                record.game_id, record.seed, record.selections, record.scores, result
            );
        }
    }
    println!("{}", SelfPlayStats::from_records(&records));

    ExitCode::SUCCESS
}
