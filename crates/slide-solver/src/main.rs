//! CLI entry point for the slide solver.
//!
//! Usage:
//!   slide-solver solve <board.json> [options]
//!   slide-solver solve --stdin [options]
//!   slide-solver check <board.json>
//!   slide-solver replay <board.json> --moves "D13 L13 U14"
//!
//! A board file is a JSON array of four rows, e.g.
//! `[[1,2,3,4],[5,6,7,8],[9,10,15,11],[13,14,0,12]]`, with 0 as the empty cell.
//!
//! Options:
//!   --timeout <seconds>       Maximum search time (default: none)
//!   --max-expansions <n>      Maximum node expansions (default: none)

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::info;
use serde::Serialize;

use slide_solver::heuristic::estimate;
use slide_solver::{parse_moves, Board, Solution, SolveError, Solver, SolverConfig};

#[derive(Parser)]
#[command(name = "slide-solver")]
#[command(about = "Optimal solver for the 4x4 sliding-tile puzzle with multi-tile moves")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct BoardInput {
    /// Path to board JSON file (use --stdin to read from stdin)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Read board from stdin instead of file
    #[arg(long)]
    stdin: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a shortest move sequence to the solved board
    Solve {
        #[command(flatten)]
        input: BoardInput,

        /// Maximum search time in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Maximum number of node expansions
        #[arg(long)]
        max_expansions: Option<usize>,
    },
    /// Report solvability and the heuristic estimate without searching
    Check {
        #[command(flatten)]
        input: BoardInput,
    },
    /// Apply a move list to a board and print every intermediate board
    Replay {
        #[command(flatten)]
        input: BoardInput,

        /// Moves in compact notation, e.g. "D13 L13 U14"
        #[arg(long)]
        moves: String,
    },
}

/// Output format for a solve run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    solvable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    moves: Vec<String>,
    move_count: usize,
    expanded: usize,
    generated: usize,
    time_elapsed_ms: u64,
}

/// Output format for a check run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckOutput {
    solvable: bool,
    inversions: usize,
    blank_row: usize,
    estimate: f64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the command succeeded.
fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Solve {
            input,
            timeout,
            max_expansions,
        } => {
            let board = read_board(&input)?;
            let solver = Solver::new(SolverConfig {
                timeout: timeout.map(Duration::from_secs),
                max_expansions,
            });

            let result = solver.solve(&board);
            match &result {
                Ok(solution) => info!(
                    "Solved in {} moves ({} expansions)",
                    solution.len(),
                    solution.stats.expanded
                ),
                Err(err) => info!("No solution: {}", err),
            }

            let output = format_result(&result);
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(result.is_ok())
        }
        Commands::Check { input } => {
            let board = read_board(&input)?;
            let output = CheckOutput {
                solvable: board.is_solvable(),
                inversions: board.inversions(),
                blank_row: board.blank().row,
                estimate: estimate(&board),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(output.solvable)
        }
        Commands::Replay { input, moves } => {
            let mut board = read_board(&input)?;
            let moves = parse_moves(&moves)?;
            println!("Start:\n{}", board);
            for mv in moves {
                board = match board.apply(&mv) {
                    Some(next) => next,
                    None => bail!("move {} is not legal from\n{}", mv, board),
                };
                println!("{}:\n{}", mv, board);
            }
            info!("Replay finished, solved: {}", board.is_goal());
            Ok(board.is_goal())
        }
    }
}

fn read_board(input: &BoardInput) -> Result<Board> {
    let json_content = if input.stdin {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    } else if let Some(path) = &input.file {
        fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))?
    } else {
        bail!("Must provide either a file path or --stdin");
    };

    serde_json::from_str(&json_content).context("Error parsing board JSON")
}

fn format_result(result: &Result<Solution, SolveError>) -> SolveOutput {
    match result {
        Ok(solution) => SolveOutput {
            solvable: true,
            reason: None,
            moves: solution.moves.iter().map(ToString::to_string).collect(),
            move_count: solution.len(),
            expanded: solution.stats.expanded,
            generated: solution.stats.generated,
            time_elapsed_ms: solution.stats.elapsed_ms,
        },
        Err(err) => {
            let stats = err.stats().cloned().unwrap_or_default();
            SolveOutput {
                solvable: !matches!(err, SolveError::Unsolvable { .. }),
                reason: Some(err.reason().to_string()),
                moves: Vec::new(),
                move_count: 0,
                expanded: stats.expanded,
                generated: stats.generated,
                time_elapsed_ms: stats.elapsed_ms,
            }
        }
    }
}
