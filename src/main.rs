use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use log::{debug, info};

use tileswap::{
    Board, Evaluation, Heuristic, HeuristicKind, MisplacedTiles, MoveRule, Puzzle, Puzzles,
    SearchConfig, SearchLimits, SolveResult, Solver, Step, TaxiDistance,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HeuristicType {
    Misplaced,
    Taxi,
}

impl From<HeuristicType> for HeuristicKind {
    fn from(heuristic: HeuristicType) -> Self {
        match heuristic {
            HeuristicType::Misplaced => HeuristicKind::Misplaced,
            HeuristicType::Taxi => HeuristicKind::Taxi,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EvaluationType {
    Greedy,
    Uniform,
    Astar,
}

impl From<EvaluationType> for Evaluation {
    fn from(evaluation: EvaluationType) -> Self {
        match evaluation {
            EvaluationType::Greedy => Evaluation::Greedy,
            EvaluationType::Uniform => Evaluation::UniformCost,
            EvaluationType::Astar => Evaluation::AStar,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RuleType {
    Blank,
    Typed,
}

impl From<RuleType> for MoveRule {
    fn from(rule: RuleType) -> Self {
        match rule {
            RuleType::Blank => MoveRule::Blank,
            RuleType::Typed => MoveRule::Typed,
        }
    }
}

fn print_board(board: &Board, ruled: bool) {
    if ruled {
        println!("{:#}", board);
    } else {
        println!("{}", board);
    }
}

fn print_solution(path: &[Step], ruled: bool) {
    let total = path.len() - 1;
    for (count, step) in path.iter().enumerate() {
        if count == 0 {
            println!("\nStarting position (h={}):", step.cost.h);
        } else {
            println!(
                "Swap {}/{} (g={}, h={}, f={}):",
                count, total, step.cost.g, step.cost.h, step.cost.f
            );
        }
        print_board(&step.board, ruled);
    }
}

struct PuzzleStats {
    solved: bool,
    steps: usize,
    states_expanded: usize,
    states_generated: usize,
    elapsed_ms: u128,
}

struct SolveOpts {
    puzzle_num: usize,
    config: SearchConfig,
    print_solution: bool,
    ruled: bool,
}

fn solve_puzzle_helper<H: Heuristic>(
    puzzle: &Puzzle,
    opts: SolveOpts,
    heuristic: H,
) -> anyhow::Result<PuzzleStats> {
    let mut solver = Solver::new(
        puzzle.initial.clone(),
        puzzle.goal.clone(),
        heuristic,
        opts.config,
    )
    .with_context(|| format!("Invalid configuration for puzzle {}", opts.puzzle_num))?;

    let result = solver.solve();
    let stats = solver.stats();
    let elapsed_ms = stats.elapsed.as_millis();

    let (solved_char, solved) = match &result {
        SolveResult::Solved(_) => ('Y', true),
        SolveResult::Cutoff(limit) => {
            info!("puzzle {} cut off at {}", opts.puzzle_num, limit);
            ('N', false)
        }
        SolveResult::Exhausted => ('X', false),
    };

    println!(
        "puzzle: {:<3}  solved: {}  steps: {:<5}  states: {:<12}  generated: {:<12}  elapsed: {} ms",
        opts.puzzle_num, solved_char, stats.swaps, stats.expanded, stats.generated, elapsed_ms
    );

    if opts.print_solution {
        match &result {
            SolveResult::Solved(path) => print_solution(path, opts.ruled),
            _ => {
                println!("\nNo solution from:");
                print_board(&puzzle.initial, opts.ruled);
            }
        }
    }

    Ok(PuzzleStats {
        solved,
        steps: stats.swaps,
        states_expanded: stats.expanded,
        states_generated: stats.generated,
        elapsed_ms,
    })
}

fn solve_puzzle(
    puzzle: &Puzzle,
    opts: SolveOpts,
    heuristic: HeuristicKind,
) -> anyhow::Result<PuzzleStats> {
    match heuristic {
        HeuristicKind::Misplaced => {
            solve_puzzle_helper(puzzle, opts, MisplacedTiles::new(&puzzle.goal))
        }
        HeuristicKind::Taxi => solve_puzzle_helper(puzzle, opts, TaxiDistance::new(&puzzle.goal)),
    }
}

#[derive(Parser)]
#[command(name = "tileswap")]
#[command(about = "An A* solver for tile-swap puzzles", long_about = None)]
struct Args {
    /// Path to the puzzle file
    #[arg(value_name = "FILE")]
    puzzles_file: String,

    /// Puzzle number to solve (1-indexed), or start of range; all puzzles if omitted
    #[arg(value_name = "PUZZLE")]
    puzzle_start: Option<usize>,

    /// Optional end of puzzle range (inclusive, 1-indexed)
    #[arg(value_name = "PUZZLE_END")]
    puzzle_end: Option<usize>,

    /// Print the solution step-by-step
    #[arg(short, long)]
    print_solution: bool,

    /// Draw grid lines between cells when printing boards
    #[arg(long)]
    ruled: bool,

    /// Maximum number of expansions before giving up
    #[arg(short = 'n', long, default_value = "5000000")]
    max_expansions: usize,

    /// Time limit per puzzle in seconds
    #[arg(short = 't', long)]
    time_limit: Option<f64>,

    /// Heuristic to use, overriding the puzzle file
    #[arg(short = 'H', long, value_enum)]
    heuristic: Option<HeuristicType>,

    /// Evaluation policy to use, overriding the puzzle file
    #[arg(short = 'e', long, value_enum)]
    evaluation: Option<EvaluationType>,

    /// Move rule; detected from the initial board if omitted
    #[arg(short = 'r', long, value_enum)]
    rule: Option<RuleType>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let puzzles = Puzzles::from_file(&args.puzzles_file)
        .with_context(|| format!("Error loading puzzles from {}", args.puzzles_file))?;

    if puzzles.is_empty() {
        bail!("{} contains no puzzles", args.puzzles_file);
    }

    // Determine the range of puzzles to solve
    let puzzle_start = args.puzzle_start.unwrap_or(1);
    let puzzle_end = match (args.puzzle_start, args.puzzle_end) {
        (_, Some(end)) => end,
        (Some(start), None) => start,
        (None, None) => puzzles.len(),
    };

    if puzzle_start == 0 {
        bail!("puzzle numbers must be at least 1");
    }
    if puzzle_end < puzzle_start {
        bail!("puzzle end must be >= puzzle start");
    }
    if puzzle_end > puzzles.len() {
        bail!(
            "puzzle {} not found (file contains {} puzzles)",
            puzzle_end,
            puzzles.len()
        );
    }

    let num_puzzles = puzzle_end - puzzle_start + 1;
    if args.print_solution && num_puzzles > 1 {
        bail!("solution printing only supported when solving a single puzzle");
    }

    let time_limit = match args.time_limit {
        Some(secs) => Some(
            Duration::try_from_secs_f64(secs)
                .with_context(|| format!("invalid time limit {}", secs))?,
        ),
        None => None,
    };
    let limits = SearchLimits {
        max_expansions: Some(args.max_expansions),
        time_limit,
    };

    let mut total_solved = 0;
    let mut total_steps = 0;
    let mut total_expanded = 0;
    let mut total_generated = 0;
    let mut total_time_ms = 0;

    for puzzle_num in puzzle_start..=puzzle_end {
        let Some(puzzle) = puzzles.get(puzzle_num - 1) else {
            bail!("puzzle {} not found", puzzle_num);
        };

        let evaluation = args
            .evaluation
            .map(Evaluation::from)
            .or(puzzle.evaluation)
            .unwrap_or_default();
        let heuristic = args
            .heuristic
            .map(HeuristicKind::from)
            .or(puzzle.heuristic)
            .unwrap_or_default();
        let rule = args
            .rule
            .map(MoveRule::from)
            .unwrap_or_else(|| MoveRule::detect(&puzzle.initial));
        debug!(
            "puzzle {}: evaluation={:?} heuristic={:?} rule={:?}",
            puzzle_num, evaluation, heuristic, rule
        );

        let opts = SolveOpts {
            puzzle_num,
            config: SearchConfig::new(evaluation, rule).with_limits(limits),
            print_solution: args.print_solution,
            ruled: args.ruled,
        };
        let stats = solve_puzzle(puzzle, opts, heuristic)?;

        if stats.solved {
            total_solved += 1;
        }
        total_steps += stats.steps;
        total_expanded += stats.states_expanded;
        total_generated += stats.states_generated;
        total_time_ms += stats.elapsed_ms;
    }

    // Print summary statistics if multiple puzzles were solved
    if num_puzzles > 1 {
        println!("---");
        println!(
            "solved: {:>3}/{:<3}         steps: {:<5}  states: {:<12}  generated: {:<12}  elapsed: {} ms",
            total_solved, num_puzzles, total_steps, total_expanded, total_generated, total_time_ms
        );
    }

    Ok(())
}
