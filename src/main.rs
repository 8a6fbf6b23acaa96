use docopt::Docopt;
use error_chain::bail;
use log::{info, warn};
use path_mazes::{
    cells::CellKind,
    difficulty::{Difficulty, ALL_DIFFICULTIES},
    generators::{self, BoardSpec, GenerationOutcome, GeneratorConfig, Maze},
    grid_displays::{render_grid, PathDisplay},
    pathing::{self, SolutionPath},
    units::{BoardSize, ObstacleCount},
};
use serde_derive::{Deserialize, Serialize};
use std::{
    fs::File,
    io::prelude::*,
    path::Path,
};

const USAGE: &str = "Path mazes

Usage:
    path_mazes_driver -h | --help
    path_mazes_driver [--difficulty=<d> | --grid-size=<n> [--obstacles=<k>]] [--seed=<s>] [--max-attempts=<m>] [--show-path] [--json-out=<path>]
    path_mazes_driver stress [--runs=<r>] [--max-attempts=<m>]

Options:
    -h --help              Show this screen.
    --difficulty=<d>       Board tier: easy (5x5), normal (7x7) or hard (9x9) [default: easy].
    --grid-size=<n>        Generate an n * n board instead of a difficulty tier.
    --obstacles=<k>        Obstacle count for a --grid-size board [default: 0].
    --seed=<s>             Seed the generator for a reproducible board.
    --max-attempts=<m>     Random walk attempts before using the serpentine board [default: 50000].
    --show-path            Number the cells of the solution instead of showing the bare board.
    --json-out=<path>      Also write the board, solution and outcome as JSON to this file.
    --runs=<r>             Boards generated per difficulty tier in stress mode [default: 1000].
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_stress: bool,
    flag_difficulty: String,
    flag_grid_size: Option<usize>,
    flag_obstacles: usize,
    flag_seed: Option<u64>,
    flag_max_attempts: usize,
    flag_show_path: bool,
    flag_json_out: String,
    flag_runs: usize,
}

#[derive(Debug, Serialize)]
struct MazeReport<'a> {
    size: usize,
    rows: Vec<Vec<CellKind>>,
    solution: &'a SolutionPath,
    outcome: GenerationOutcome,
}

// The driver's errors chain onto the library's `errors` module.
mod errors {
    #![allow(deprecated)]
    use error_chain::*;
    error_chain! {

        links {
            Mazes(::path_mazes::errors::Error, ::path_mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            Json(::serde_json::Error);
        }
    }
}
use crate::errors::*;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(ref e) = run() {
        eprintln!("error: {}", e);
        for cause in e.iter().skip(1) {
            eprintln!("caused by: {}", cause);
        }
        ::std::process::exit(1);
    }
}

fn run() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;
    let config = GeneratorConfig::default().with_max_attempts(args.flag_max_attempts);

    if args.cmd_stress {
        return stress(&config, args.flag_runs);
    }

    let spec = board_spec_from_args(&args)?;
    let maze = match args.flag_seed {
        Some(seed) => generators::generate_seeded(&spec, &config, seed),
        None => generators::generate_with_rng(&spec, &config, &mut rand::thread_rng()),
    };
    info!("{:?}", maze.outcome());

    if args.flag_show_path {
        let grid = maze.grid();
        print!("{}", render_grid(grid, &PathDisplay::new(grid, maze.solution().as_slice())));
    } else {
        print!("{}", maze.grid());
    }

    if !args.flag_json_out.is_empty() {
        write_json_to_file(&maze, &args.flag_json_out)
            .chain_err(|| format!("Failed to write maze to json file {}", args.flag_json_out))?;
        info!("Saved board to {}", args.flag_json_out);
    }

    Ok(())
}

fn board_spec_from_args(args: &MazeArgs) -> Result<BoardSpec> {
    if let Some(n) = args.flag_grid_size {
        Ok(BoardSpec::new(BoardSize(n), ObstacleCount(args.flag_obstacles))?)
    } else {
        let difficulty: Difficulty = args.flag_difficulty.parse()?;
        Ok(difficulty.board_spec())
    }
}

fn write_json_to_file(maze: &Maze, file_name: &str) -> Result<()> {
    let report = MazeReport {
        size: maze.grid().dimension(),
        rows: maze.grid().kind_rows(),
        solution: maze.solution(),
        outcome: maze.outcome(),
    };

    let path = Path::new(file_name);
    let mut file = File::create(&path)?;
    serde_json::to_writer_pretty(&mut file, &report)?;
    file.write_all(b"\n")?;
    Ok(())
}

/// Generate `runs` boards per tier and check every one of them.
fn stress(config: &GeneratorConfig, runs: usize) -> Result<()> {
    let mut rng = rand::thread_rng();
    let mut defects = 0;

    for difficulty in &ALL_DIFFICULTIES {
        let spec = difficulty.board_spec();
        let mut fallbacks = 0;
        let mut total_attempts = 0;

        for _ in 0..runs {
            let maze = generators::generate_with_rng(&spec, config, &mut rng);
            match maze.outcome() {
                GenerationOutcome::Generated { attempts } => total_attempts += attempts,
                GenerationOutcome::Fallback => fallbacks += 1,
            }
            if let Err(defect) = pathing::validate_board(maze.grid(), maze.solution()) {
                warn!("{} board failed validation: {}\n{}", difficulty, defect, maze.grid());
                defects += 1;
            }
        }

        let generated = runs - fallbacks;
        let mean_attempts = if generated > 0 { total_attempts as f64 / generated as f64 } else { 0.0 };
        info!("{}: {} boards, {} fallbacks, {:.2} attempts per generated board",
              difficulty, runs, fallbacks, mean_attempts);
    }

    if defects > 0 {
        bail!("{} boards broke the one-stroke rules", defects);
    }
    info!("All boards valid");
    Ok(())
}
