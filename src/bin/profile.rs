use mazewalk::{app, generators::Generator, solvers::Solver};

const PROFILE_MAZE_SIZE: usize = 64;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args.next().and_then(|s| s.parse::<usize>().ok());
    app::profile(PROFILE_MAZE_SIZE, Generator::Wilson, &Solver::ALL, num_iters)
}
