use clap::{Parser, ValueEnum};
use sokoban_astar::game::Board;
use sokoban_astar::heuristic::{Heuristic, ManhattanHeuristic, NullHeuristic};
use sokoban_astar::levels::Levels;
use sokoban_astar::solver::{SearchLimits, SolveResult, Solution, Solver};
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HeuristicType {
    Manhattan,
    Null,
}

#[derive(Parser)]
#[command(name = "sokoban-astar")]
#[command(about = "Finds move-optimal solutions to Sokoban levels", long_about = None)]
struct Args {
    /// Levels file in XSB format
    #[arg(value_name = "FILE")]
    levels_file: PathBuf,

    /// First level to solve, counting from 1
    #[arg(value_name = "LEVEL", value_parser = clap::value_parser!(u64).range(1..))]
    first: u64,

    /// Last level to solve (defaults to LEVEL)
    #[arg(value_name = "LAST")]
    last: Option<u64>,

    /// Print every position along the solution
    #[arg(short, long)]
    print_solution: bool,

    /// Node budget per level
    #[arg(short = 'n', long, default_value = "5000000")]
    max_nodes: usize,

    /// Time budget per level, in milliseconds
    #[arg(short = 't', long)]
    timeout_ms: Option<u64>,

    #[arg(short = 'H', long, value_enum, default_value = "manhattan")]
    heuristic: HeuristicType,
}

impl Args {
    /// Level indices (0-based) to solve, checked against the file.
    fn level_indices(&self, available: usize) -> Result<RangeInclusive<usize>, String> {
        let first = self.first as usize;
        let last = self.last.map_or(first, |last| last as usize);
        if last < first {
            return Err(format!("last level {} comes before first level {}", last, first));
        }
        if last > available {
            return Err(format!(
                "level {} requested but {} holds {} levels",
                last,
                self.levels_file.display(),
                available
            ));
        }
        if self.print_solution && last != first {
            return Err("--print-solution takes a single level".to_string());
        }
        Ok(first - 1..=last - 1)
    }

    fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_nodes: Some(self.max_nodes),
            max_elapsed: self.timeout_ms.map(Duration::from_millis),
        }
    }
}

#[derive(Default)]
struct Totals {
    levels: usize,
    solved: usize,
    moves: usize,
    states: usize,
    elapsed: Duration,
}

fn print_solution(solution: &Solution) {
    let path = solution.path();
    let total = solution.len();
    println!("\nStarting position:\n{}", path[0].board);
    for (count, state) in path.iter().enumerate().skip(1) {
        if let Some(direction) = state.last_move {
            println!("Move {}/{}: {}\n{}", count, total, direction, state.board);
        }
    }
    println!("Solution: {}", solution.move_string());
}

fn run_level<H: Heuristic>(level_num: usize, board: &Board, args: &Args, totals: &mut Totals) {
    let mut solver = Solver::<H>::new(board.clone(), args.limits());
    let start = Instant::now();
    let result = solver.solve();
    let elapsed = start.elapsed();
    let states = solver.nodes_explored();

    let (mark, moves) = match &result {
        SolveResult::Solved(solution) => ('Y', solution.len()),
        SolveResult::Cutoff => ('N', 0),
        SolveResult::Impossible => ('X', 0),
    };
    println!(
        "level: {:<3}  solved: {}  moves: {:<5}  states: {:<12}  elapsed: {} ms",
        level_num,
        mark,
        moves,
        states,
        elapsed.as_millis()
    );

    totals.levels += 1;
    totals.moves += moves;
    totals.states += states;
    totals.elapsed += elapsed;

    if let SolveResult::Solved(solution) = result {
        totals.solved += 1;
        if args.print_solution {
            print_solution(&solution);
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let levels = match Levels::from_file(&args.levels_file) {
        Ok(levels) => levels,
        Err(e) => {
            eprintln!("Error loading levels: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let indices = match args.level_indices(levels.len()) {
        Ok(indices) => indices,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut totals = Totals::default();
    for index in indices {
        let Some(board) = levels.get(index) else {
            continue;
        };
        match args.heuristic {
            HeuristicType::Manhattan => {
                run_level::<ManhattanHeuristic>(index + 1, board, &args, &mut totals)
            }
            HeuristicType::Null => run_level::<NullHeuristic>(index + 1, board, &args, &mut totals),
        }
    }

    if totals.levels > 1 {
        println!("---");
        println!(
            "solved: {}/{}  moves: {}  states: {}  elapsed: {} ms",
            totals.solved,
            totals.levels,
            totals.moves,
            totals.states,
            totals.elapsed.as_millis()
        );
    }
    ExitCode::SUCCESS
}
