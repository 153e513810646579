mod renderer;

use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::mpsc::SyncSender,
    time::{Duration, Instant},
};

use anyhow::anyhow;
use clap::Parser;
use crossterm::{
    queue,
    style::{self, Attribute, Color, Stylize},
};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;

use crate::{
    app::renderer::Renderer,
    error::Result,
    generators::{Generator, generate_maze},
    maze::{Maze, grid::GridEvent},
    solvers::{Solution, Solver, solve_maze},
};

/// Maximum number of grid events to buffer in the channel between compute and render threads
const MAX_EVENTS_IN_CHANNEL_BUFFER: usize = 1000;

/// Generate a perfect maze and watch it being solved in the terminal
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct AppConfig {
    /// Side length of the square maze, in cells
    #[arg(long, short, default_value_t = 10)]
    pub size: usize,

    /// Maze generation algorithm
    #[arg(long, short, value_enum, default_value_t = Generator::Wilson)]
    pub generator: Generator,

    /// Comma separated solvers, run one after another on the same maze
    #[arg(long, value_enum, value_delimiter = ',', default_values_t = Solver::ALL)]
    pub solvers: Vec<Solver>,

    /// Random seed for reproducible generation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Delay between animation steps, in milliseconds
    #[arg(long, default_value_t = 50)]
    pub delay_ms: u64,

    /// Only draw the maze when a phase completes
    #[arg(long)]
    pub no_animation: bool,

    /// File that receives the log output
    #[arg(long, default_value = "mazewalk.log")]
    pub log_file: PathBuf,

    /// Maximum log level
    #[arg(long, default_value_t = Level::INFO)]
    pub log_level: Level,
}

/// Send logs to a file, since the terminal belongs to the renderer.
/// The returned guard flushes pending logs when dropped.
pub fn init_logging(log_file: &Path, level: Level) -> anyhow::Result<WorkerGuard> {
    let directory = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = log_file
        .file_name()
        .ok_or_else(|| anyhow!("Log file path {:?} has no file name", log_file))?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .map_err(|e| anyhow!("Failed to install the tracing subscriber: {}", e))?;
    Ok(guard)
}

/// Generate the maze and run every solver on it, in order.
/// Each solver starts from cleared overlays.
pub fn compute(
    size: usize,
    generator: Generator,
    solvers: &[Solver],
    seed: Option<u64>,
    grid_event_tx: Option<SyncSender<GridEvent>>,
) -> Result<Vec<(Solver, Solution)>> {
    let mut maze = Maze::new(size, grid_event_tx)?;
    generate_maze(&mut maze, generator, seed)?;

    solvers
        .iter()
        .map(|&solver| solve_maze(&mut maze, solver).map(|solution| (solver, solution)))
        .collect()
    // Maze is dropped here, as well as the grid_event_tx sender
}

/// Entry point of the visualizer
pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    let (grid_event_tx, grid_event_rx) =
        std::sync::mpsc::sync_channel::<GridEvent>(MAX_EVENTS_IN_CHANNEL_BUFFER);

    let render_refresh_time = Duration::from_millis(config.delay_ms);
    let animate = !config.no_animation;
    // Spawn a thread to listen for grid updates and render the maze
    let render_thread_handle = std::thread::spawn(move || {
        Renderer::new(render_refresh_time, animate).render(grid_event_rx)
    });

    // Spawn a thread to generate the maze and solve it
    let compute_config = config.clone();
    let compute_thread_handle = std::thread::spawn(move || {
        compute(
            compute_config.size,
            compute_config.generator,
            &compute_config.solvers,
            compute_config.seed,
            Some(grid_event_tx),
        )
    });

    let results = compute_thread_handle
        .join()
        .map_err(|_| anyhow!("Compute thread panicked"))??;
    render_thread_handle
        .join()
        .map_err(|_| anyhow!("Render thread panicked"))??;

    let mut stdout = std::io::stdout();
    for (solver, solution) in &results {
        let line = if solution.goal_reached {
            format!(
                "{}: route length {}, {} cells expanded\n",
                solver,
                solution.length(),
                solution.expanded
            )
            .with(Color::Green)
        } else {
            format!("{}: no path found\n", solver).with(Color::Red)
        };
        queue!(
            stdout,
            style::PrintStyledContent(line.attribute(Attribute::Bold))
        )?;
    }
    stdout.flush()?;
    Ok(())
}

/// Profiling mode: run generation and solving without rendering to the terminal
pub fn profile(
    size: usize,
    generator: Generator,
    solvers: &[Solver],
    num_iterations: Option<usize>,
) -> anyhow::Result<()> {
    let (grid_event_tx, grid_event_rx) =
        std::sync::mpsc::sync_channel::<GridEvent>(MAX_EVENTS_IN_CHANNEL_BUFFER);

    // Drain events so the compute side sees the same back-pressure as when rendering
    let render_thread_handle = std::thread::spawn(move || grid_event_rx.iter().count());

    let iterations = num_iterations.unwrap_or(1);
    for iteration in 0..iterations {
        let started = Instant::now();
        let results = compute(size, generator, solvers, None, Some(grid_event_tx.clone()))?;
        let elapsed = started.elapsed();
        let solved = results.iter().filter(|(_, s)| s.goal_reached).count();
        tracing::info!(
            "Iteration {}: {}x{} maze, {}/{} solvers reached the goal in {:?}",
            iteration,
            size,
            size,
            solved,
            results.len(),
            elapsed
        );
        println!("iteration {}: {:?}", iteration, elapsed);
    }
    drop(grid_event_tx);

    let events = render_thread_handle
        .join()
        .map_err(|_| anyhow!("Render thread panicked"))?;
    tracing::info!("Drained {} grid events", events);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::parse_from(["mazewalk"]);
        assert_eq!(config.size, 10);
        assert_eq!(config.generator, Generator::Wilson);
        assert_eq!(config.solvers, Solver::ALL.to_vec());
        assert_eq!(config.seed, None);
        assert!(!config.no_animation);
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn test_parse_config() {
        let config = AppConfig::parse_from([
            "mazewalk",
            "--size",
            "25",
            "--generator",
            "random-dfs",
            "--solvers",
            "a-star,wall-follower",
            "--seed",
            "7",
            "--no-animation",
            "--log-level",
            "debug",
        ]);
        assert_eq!(config.size, 25);
        assert_eq!(config.generator, Generator::RandomDfs);
        assert_eq!(config.solvers, vec![Solver::AStar, Solver::WallFollower]);
        assert_eq!(config.seed, Some(7));
        assert!(config.no_animation);
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn test_unknown_solver_rejected() {
        assert!(AppConfig::try_parse_from(["mazewalk", "--solvers", "teleport"]).is_err());
    }

    #[test]
    fn test_compute_runs_every_solver() {
        let results = compute(8, Generator::RandomDfs, &Solver::ALL, Some(1), None).unwrap();
        assert_eq!(results.len(), Solver::ALL.len());
        assert!(results.iter().all(|(_, s)| s.goal_reached));
    }

    #[test]
    fn test_compute_rejects_empty_maze() {
        assert!(compute(0, Generator::Wilson, &Solver::ALL, None, None).is_err());
    }

    #[test]
    fn test_compute_streams_to_mirror() {
        let (tx, rx) = std::sync::mpsc::sync_channel(MAX_EVENTS_IN_CHANNEL_BUFFER);
        let watcher = std::thread::spawn(move || {
            let mut mirror = Maze::new(1, None).unwrap();
            for event in rx.iter() {
                mirror.apply(&event).unwrap();
            }
            mirror
        });
        let results = compute(6, Generator::Wilson, &[Solver::Bfs], Some(5), Some(tx)).unwrap();
        let mirror = watcher.join().unwrap();

        let (_, bfs) = &results[0];
        assert!(mirror.is_generated());
        assert_eq!(mirror.open_passages(), 35);
        for &cell in &bfs.route {
            assert_eq!(mirror.path_mark(cell), crate::maze::PathMark::OnPath);
        }
    }
}
