//! Animated terminal run of one search.
//!
//! Run: cargo run --bin ascii -- [bfs|dijkstra|astar] [--map FILE]
//!      [--walls DENSITY] [--weights MAX] [--seed N] [--speed MS] [--instant]
//!
//! Set `RUST_LOG=debug` to see the run log on stderr.

use std::io::Write;
use std::sync::mpsc;
use std::thread;

use pathviz_core::Grid;
use pathviz_demos::{Board, scatter_walls, scatter_weights};
use pathviz_paths::Algorithm;
use pathviz_run::{NoPacing, Pacer, RunConfig, RunController, RunEvent, RunOutcome, ThreadPacer};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

struct Options {
    algorithm: Algorithm,
    map: Option<String>,
    walls: f64,
    weights: Option<i32>,
    seed: u64,
    speed_ms: u64,
    instant: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Bfs,
            map: None,
            walls: 0.25,
            weights: None,
            seed: 1,
            speed_ms: 20,
            instant: false,
        }
    }
}

fn parse_args() -> Result<Options, String> {
    let mut opts = Options::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |name: &str| args.next().ok_or_else(|| format!("{name} needs a value"));
        match arg.as_str() {
            "--map" => opts.map = Some(value("--map")?),
            "--walls" => {
                opts.walls = value("--walls")?.parse().map_err(|e| format!("--walls: {e}"))?;
                if !opts.walls.is_finite() {
                    return Err("--walls must be a finite number".to_string());
                }
            }
            "--weights" => {
                opts.weights = Some(value("--weights")?.parse().map_err(|e| format!("--weights: {e}"))?);
            }
            "--seed" => opts.seed = value("--seed")?.parse().map_err(|e| format!("--seed: {e}"))?,
            "--speed" => {
                opts.speed_ms = value("--speed")?.parse().map_err(|e| format!("--speed: {e}"))?;
            }
            "--instant" => opts.instant = true,
            name => opts.algorithm = name.parse().map_err(|e| format!("{e}"))?,
        }
    }
    Ok(opts)
}

fn build_grid(opts: &Options) -> Result<Grid, String> {
    if let Some(path) = &opts.map {
        let text = std::fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
        return Grid::parse(&text).map_err(|e| format!("{path}: {e}"));
    }
    let mut rng = StdRng::seed_from_u64(opts.seed);
    let mut grid = scatter_walls(&Grid::standard(), opts.walls, &mut rng);
    if let Some(max) = opts.weights {
        grid = scatter_weights(&grid, max, &mut rng);
    }
    Ok(grid)
}

fn run_config(opts: &Options) -> RunConfig {
    let mut config = RunConfig::default();
    config.set_weighted(opts.algorithm.accepts(true));
    config.set_algorithm(opts.algorithm);
    config.set_speed_ms(opts.speed_ms);
    config
}

fn redraw(board: &Board) {
    let mut out = std::io::stdout().lock();
    // Cursor home, then clear the screen.
    writeln!(out, "\x1b[H\x1b[2J{}", board.render()).ok();
    out.flush().ok();
}

fn run<P: Pacer + Send + 'static>(grid: Grid, config: RunConfig, pacer: P, animate: bool) -> Result<Board, String> {
    let (tx, rx) = mpsc::channel();
    let mut controller = RunController::new(grid.clone(), config, tx, pacer);
    let worker = thread::spawn(move || controller.start());

    let mut board = Board::new(grid);
    for event in rx {
        board.apply(&event);
        if animate && matches!(event, RunEvent::Visit(_) | RunEvent::Path(_)) {
            redraw(&board);
        }
    }

    match worker.join() {
        Ok(Ok(_)) => Ok(board),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err("search thread panicked".to_string()),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let result = parse_args().and_then(|opts| {
        let grid = build_grid(&opts)?;
        let config = run_config(&opts);
        log::info!("{} on {}x{} grid", config.algorithm.label(), grid.rows(), grid.cols());
        if opts.instant {
            run(grid, config, NoPacing, false)
        } else {
            run(grid, config, ThreadPacer, true)
        }
    });

    let board = match result {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    redraw(&board);
    match board.outcome() {
        Some(RunOutcome::Found { path, cost }) => {
            println!("path: {} cells, cost {cost}", path.len());
        }
        Some(RunOutcome::NotFound) => println!("no path"),
        Some(RunOutcome::Cancelled) | None => println!("cancelled"),
    }
}
