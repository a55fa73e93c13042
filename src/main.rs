//! Block Puzzle Round Solver
//!
//! Reads an 8x8 occupancy grid and up to three pending figures from a text
//! file (or stdin), finds the placement sequence clearing the most full
//! rows/columns, and prints the solution: flat diagnostic dump lines for
//! external tooling plus a human-readable step-by-step rendering.

use std::fs;
use std::io::Read;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use blockfit::{encode, SolveError, Solution, Solver, Strategy};

/// Solves one round of an 8x8 block-placement puzzle.
#[derive(Parser)]
#[command(name = "blockfit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input file with the board block followed by figure blocks ("-" reads stdin).
    input: String,

    /// Search strategy.
    #[arg(long, value_enum, default_value = "exhaustive")]
    strategy: StrategyArg,

    /// Print the board after every step.
    #[arg(long)]
    steps: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Consider any subset of the figures, clearing lines once at the end.
    Bounded,
    /// Place every figure in order, clearing lines after each placement.
    Exhaustive,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Bounded => Strategy::Bounded,
            StrategyArg::Exhaustive => Strategy::Exhaustive,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let text = read_input(&cli.input)?;
    let (board, figures) = encode::parse_input(&text)?;

    println!("{}", encode::figures_log_line(&figures));
    println!("InitialGrid:{}", encode::board_dump(&board));

    let solver = Solver::new(cli.strategy.into());
    info!("solving with {:?} strategy", solver.strategy());

    match solver.solve(board, &figures) {
        Ok(solution) => print_solution(&solution, cli.steps),
        Err(SolveError::NoPlacementPossible) => {
            println!("SolutionGrid:No solution found");
            println!("No lines possible with current figures");
        }
        Err(err) => return Err(err).context("invalid figure set"),
    }

    Ok(())
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {path}"))
    }
}

fn print_solution(solution: &Solution, show_steps: bool) {
    if show_steps {
        for (i, step) in solution.steps().iter().enumerate() {
            println!("Step {}:", i + 1);
            print!("{}", encode::render_board(&step.after));
            if !step.cleared.is_empty() {
                println!("Completed lines this step: {}", step.cleared.len());
            }
            println!();
        }
    }

    let lines = solution.completed_line_count();
    let movements = solution.movement_count();
    println!(
        "You can get {} line{} in {} movement{}",
        lines,
        plural(lines),
        movements,
        plural(movements),
    );
    println!("SolutionGrid:{}", encode::board_dump(&solution.final_board()));
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
