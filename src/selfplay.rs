//! Random self-play.
//!
//! Plays complete games by picking a random movable piece and a random
//! legal destination each ply, driving every move through `GameState`.
//! Useful for soak-testing the rules and for benchmarking.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{error, info};

use crate::board::{Board, Cell, Color};
use crate::game::GameState;
use crate::protocol::diagram::encode_diagram;
use crate::rules;

/// Configuration for self-play runs.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Plies after which an unfinished game is scored a draw.
    pub max_plies: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            max_plies: 400,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// Summary of one finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub plies: usize,
    pub captures: usize,
    pub promotions: usize,
    /// `None` when the ply cap was reached.
    pub winner: Option<Color>,
    pub final_board: String,
    pub white_pieces: usize,
    pub black_pieces: usize,
}

/// Every piece of `color` that has at least one legal destination.
fn movable_pieces(board: &Board, color: Color) -> Vec<(Cell, Vec<Cell>)> {
    board
        .pieces()
        .filter(|(_, piece)| piece.color == color)
        .filter_map(|(cell, _)| match rules::possible_moves(board, color, cell) {
            Ok(moves) if !moves.is_empty() => Some((cell, moves)),
            _ => None,
        })
        .collect()
}

/// Plays a single game and returns its record.
pub fn play_game(config: &SelfPlayConfig, game_id: usize, rng: &mut SmallRng) -> GameRecord {
    let mut game = GameState::new();
    let mut plies = 0;
    let mut captures = 0;
    let mut promotions = 0;

    while plies < config.max_plies && !game.is_game_over() {
        let mover = game.current_player();
        let movable = movable_pieces(game.board(), mover);
        let Some((from, destinations)) = movable.choose(rng) else {
            // check_game_over ends the game before a side runs out of moves.
            error!(game_id, %mover, "side to move has no legal moves");
            break;
        };
        let Some(&to) = destinations.choose(rng) else {
            break;
        };

        if let Err(e) = game.select_piece(*from) {
            error!(game_id, %from, error = %e, "reselection failed");
            break;
        }
        match game.move_to(to) {
            Ok(outcome) => {
                plies += 1;
                captures += usize::from(outcome.captured.is_some());
                promotions += usize::from(outcome.promoted);
            }
            Err(e) => {
                error!(game_id, %from, %to, error = %e, "generated move rejected");
                break;
            }
        }
    }

    let board = game.board();
    GameRecord {
        game_id,
        plies,
        captures,
        promotions,
        winner: game.winner(),
        final_board: encode_diagram(board),
        white_pieces: board.count(Color::White),
        black_pieces: board.count(Color::Black),
    }
}

fn game_rng(config: &SelfPlayConfig, game_id: usize) -> SmallRng {
    if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn log_game(config: &SelfPlayConfig, n: usize, game: &GameRecord, elapsed: f64) {
    if config.quiet {
        return;
    }
    let outcome = match game.winner {
        Some(w) => format!("{} wins", w),
        None => "draw".to_string(),
    };
    info!(
        game = n,
        total = config.num_games,
        plies = game.plies,
        elapsed_ms = (elapsed * 1000.0) as u64,
        "{}",
        outcome
    );
}

/// Runs self-play generation, producing one record per game.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Vec<GameRecord> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| {
        games.push(game);
    });
    games
}

/// Runs self-play generation, calling `on_game` with each completed record.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        run_self_play_parallel(config, on_game);
    } else {
        run_self_play_sequential(config, on_game);
    }
}

fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let mut rng = game_rng(config, i);
        let start = Instant::now();
        let game = play_game(config, i, &mut rng);
        log_game(config, i + 1, &game, start.elapsed().as_secs_f64());
        on_game(game);
    }
}

/// Plays games on a rayon pool and hands them to `on_game` on this thread
/// as they finish. Falls back to sequential play if the pool cannot be built.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
    {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, "failed to build thread pool, playing sequentially");
            return run_self_play_sequential(config, on_game);
        }
    };

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    std::thread::scope(|scope| {
        scope.spawn(move || {
            pool.install(|| {
                (0..config.num_games)
                    .into_par_iter()
                    .for_each_with(tx, |tx, i| {
                        let mut rng = game_rng(config, i);
                        let start = Instant::now();
                        let game = play_game(config, i, &mut rng);
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        log_game(config, n, &game, start.elapsed().as_secs_f64());
                        let _ = tx.send(game);
                    });
            });
        });

        for game in rx {
            on_game(game);
        }
    });
}

/// Writes game records as JSONL, one object per line.
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Aggregate results across a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub games: usize,
    pub white_wins: usize,
    pub black_wins: usize,
    pub draws: usize,
    pub total_plies: usize,
}

impl Summary {
    pub fn from_games(games: &[GameRecord]) -> Self {
        let mut summary = Summary {
            games: games.len(),
            ..Default::default()
        };
        for game in games {
            summary.total_plies += game.plies;
            match game.winner {
                Some(Color::White) => summary.white_wins += 1,
                Some(Color::Black) => summary.black_wins += 1,
                None => summary.draws += 1,
            }
        }
        summary
    }

    pub fn avg_plies(&self) -> f64 {
        self.total_plies as f64 / self.games.max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::diagram::parse_diagram;

    #[test]
    fn play_single_game_completes() {
        let config = SelfPlayConfig {
            num_games: 1,
            max_plies: 200,
            seed: 42,
            ..Default::default()
        };
        let mut rng = SmallRng::seed_from_u64(42);
        let game = play_game(&config, 0, &mut rng);

        assert!(game.plies > 0);
        assert!(game.plies <= config.max_plies);
        if game.winner.is_none() {
            assert_eq!(game.plies, config.max_plies);
        }
    }

    #[test]
    fn movable_pieces_in_opening() {
        let board = crate::rules::initial_board();
        let movable = movable_pieces(&board, Color::White);
        let cells: Vec<Cell> = movable.iter().map(|(cell, _)| *cell).collect();
        assert_eq!(
            cells,
            vec![Cell::new(5, 0), Cell::new(5, 2), Cell::new(5, 4), Cell::new(5, 6)]
        );
        assert_eq!(movable[1].1, vec![Cell::new(4, 1), Cell::new(4, 3)]);
    }

    #[test]
    fn listing_movable_pieces_leaves_selection_alone() {
        let mut game = GameState::new();
        game.select_piece(Cell::new(5, 2)).unwrap();
        let before = game.clone();
        assert_eq!(movable_pieces(game.board(), Color::White).len(), 4);
        assert_eq!(game, before);
    }

    #[test]
    fn same_seed_replays_same_game() {
        let config = SelfPlayConfig::default();
        let a = play_game(&config, 3, &mut SmallRng::seed_from_u64(9));
        let b = play_game(&config, 3, &mut SmallRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn final_board_is_a_valid_diagram() {
        let config = SelfPlayConfig {
            max_plies: 60,
            ..Default::default()
        };
        let game = play_game(&config, 0, &mut SmallRng::seed_from_u64(5));
        let board = parse_diagram(&game.final_board).unwrap();
        assert_eq!(board.count(Color::White), game.white_pieces);
        assert_eq!(board.count(Color::Black), game.black_pieces);
        assert!(game.white_pieces <= 12 && game.black_pieces <= 12);
        assert_eq!(24 - game.white_pieces - game.black_pieces, game.captures);
    }

    #[test]
    fn winner_has_pieces_left() {
        let config = SelfPlayConfig {
            max_plies: 2000,
            ..Default::default()
        };
        for seed in 1..6 {
            let game = play_game(&config, 0, &mut SmallRng::seed_from_u64(seed));
            match game.winner {
                Some(Color::White) => assert!(game.white_pieces > 0),
                Some(Color::Black) => assert!(game.black_pieces > 0),
                None => assert_eq!(game.plies, config.max_plies),
            }
        }
    }

    #[test]
    fn sequential_run_produces_correct_count() {
        let config = SelfPlayConfig {
            num_games: 3,
            max_plies: 80,
            threads: 1,
            seed: 99,
            quiet: true,
        };
        let games = run_self_play(&config);
        assert_eq!(games.len(), 3);
        let ids: Vec<usize> = games.iter().map(|g| g.game_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn parallel_run_matches_sequential_per_game() {
        let base = SelfPlayConfig {
            num_games: 4,
            max_plies: 80,
            threads: 1,
            seed: 77,
            quiet: true,
        };
        let mut sequential = run_self_play(&base);
        let mut parallel = run_self_play(&SelfPlayConfig { threads: 2, ..base });
        sequential.sort_by_key(|g| g.game_id);
        parallel.sort_by_key(|g| g.game_id);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn jsonl_output_is_valid() {
        let config = SelfPlayConfig {
            num_games: 2,
            max_plies: 40,
            threads: 1,
            seed: 55,
            quiet: true,
        };
        let games = run_self_play(&config);
        let mut buf = Vec::new();
        write_jsonl(&games, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();

        assert_eq!(output.lines().count(), 2);
        for line in output.lines() {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value["game_id"].is_u64());
            assert!(value["plies"].is_u64());
            assert!(value["final_board"].is_string());
        }
    }

    #[test]
    fn summary_counts_outcomes() {
        let record = |winner, plies| GameRecord {
            game_id: 0,
            plies,
            captures: 0,
            promotions: 0,
            winner,
            final_board: String::new(),
            white_pieces: 0,
            black_pieces: 0,
        };
        let summary = Summary::from_games(&[
            record(Some(Color::White), 10),
            record(Some(Color::Black), 20),
            record(None, 30),
        ]);
        assert_eq!(summary.white_wins, 1);
        assert_eq!(summary.black_wins, 1);
        assert_eq!(summary.draws, 1);
        assert_eq!(summary.avg_plies(), 20.0);
        assert_eq!(Summary::default().avg_plies(), 0.0);
    }
}
