//! Self-play CLI.
//!
//! Plays random checkers games and writes one JSON summary per game.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N       Number of games to play (default: 10)
//!   --max-plies N   Ply cap before a game is scored a draw (default: 400)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --output FILE   Output file path (default: stdout)
//!   --log FILTER    Log filter (default: $CHECKERS_LOG, $RUST_LOG, info)
//!   --quiet         Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process::ExitCode;
use std::time::Instant;

use tracing::{error, info};

use checkers::config::{self, parse_value, ConfigError};
use checkers::selfplay::{self, SelfPlayConfig, Summary};

struct Cli {
    config: SelfPlayConfig,
    output_path: Option<String>,
    log_filter: Option<String>,
}

fn parse_args(args: Vec<String>) -> Result<Option<Cli>, ConfigError> {
    let mut cli = Cli {
        config: SelfPlayConfig::default(),
        output_path: None,
        log_filter: None,
    };

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--games" => cli.config.num_games = parse_value(&arg, args.next())?,
            "--max-plies" => cli.config.max_plies = parse_value(&arg, args.next())?,
            "--threads" => cli.config.threads = parse_value(&arg, args.next())?,
            "--seed" => cli.config.seed = parse_value(&arg, args.next())?,
            "--output" => cli.output_path = Some(parse_value(&arg, args.next())?),
            "--log" => cli.log_filter = Some(parse_value(&arg, args.next())?),
            "--quiet" => cli.config.quiet = true,
            "--help" | "-h" => return Ok(None),
            other => return Err(ConfigError::UnknownArgument(other.to_string())),
        }
    }
    Ok(Some(cli))
}

fn main() -> ExitCode {
    let cli = match parse_args(env::args().skip(1).collect()) {
        Ok(Some(cli)) => cli,
        Ok(None) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            return ExitCode::FAILURE;
        }
    };
    config::init_tracing(cli.log_filter.as_deref());
    let config = cli.config;

    if !config.quiet {
        info!(
            games = config.num_games,
            max_plies = config.max_plies,
            threads = config.threads,
            seed = config.seed,
            "starting self-play"
        );
    }

    let start = Instant::now();
    let games = selfplay::run_self_play(&config);
    let elapsed = start.elapsed().as_secs_f64();

    if !config.quiet {
        let summary = Summary::from_games(&games);
        info!(
            games = summary.games,
            white_wins = summary.white_wins,
            black_wins = summary.black_wins,
            draws = summary.draws,
            avg_plies = format!("{:.1}", summary.avg_plies()),
            elapsed_s = format!("{:.2}", elapsed),
            "self-play complete"
        );
    }

    let written = match &cli.output_path {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            selfplay::write_jsonl(&games, &mut writer)
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)
        }
    };

    match written {
        Ok(()) => {
            if let (Some(path), false) = (&cli.output_path, config.quiet) {
                info!(games = games.len(), %path, "wrote games");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "failed to write output");
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games to play (default: 10)");
    eprintln!("  --max-plies N    Ply cap before a game is scored a draw (default: 400)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --log FILTER     Log filter (default: $CHECKERS_LOG, $RUST_LOG, info)");
    eprintln!("  --quiet          Suppress progress and summary output");
    eprintln!("  --help           Show this help");
}
