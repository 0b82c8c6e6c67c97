//! Interactive shortest path finder.
//!
//! Prompts for an obstacle and two endpoints, prints the grid with the shortest path and
//! writes PNG frames plus a GIF animation of the path.
//!
//! Usage:
//!   cargo run -- --config grid_dijkstra.toml
//!   RUST_LOG=info cargo run -- --size 20
use clap::Parser;
use grid_dijkstra::config::{Config, DEFAULT_CONFIG_PATH};
use grid_dijkstra::prompt::Prompter;
use grid_dijkstra::render::raster::save_all;
use grid_dijkstra::render::text::write_report;
use grid_dijkstra::{search, Result};
use log::info;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Grid side length, overrides the configuration
    #[arg(short, long)]
    size: Option<usize>,

    /// Directory for the rendered images, overrides the configuration
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let mut config = Config::load_or_default(&args.config);
    config.apply_overrides(args.size, args.output_dir.clone())?;
    let size = config.grid.size;

    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
    let grid = prompter.prompt_for_obstacle(size)?;
    prompter.say("\nPlease enter the start coordinates:")?;
    let start = prompter.prompt_for_cell(size, "Start")?;
    prompter.say("Please enter the goal coordinates:")?;
    let goal = prompter.prompt_for_cell(size, "Goal")?;

    if let Err(e) = grid
        .ensure_passable(&start)
        .and_then(|_| grid.ensure_passable(&goal))
    {
        info!("{}", e);
        println!("Start or goal is on an obstacle, please choose different coordinates!");
        return Ok(ExitCode::FAILURE);
    }
    if grid.unreachable(&start, &goal) {
        info!("{} and {} lie in different components", start, goal);
    }

    let path = search(&grid, start, goal);
    write_report(&mut io::stdout().lock(), &grid, &path, start, goal)?;

    let saved = save_all(&config, &grid, &path, start, goal)?;
    println!("Final path image saved to {}", saved.final_image.display());
    match saved.animation {
        Ok(Some(file)) => println!("Animation saved to {}", file.display()),
        Ok(None) => {}
        Err(e) => println!("Warning: could not create the animation: {}", e),
    }
    Ok(ExitCode::SUCCESS)
}
