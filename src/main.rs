use std::env::temp_dir;
use std::fs;
use std::panic;
use std::sync::Mutex;
use std::thread;

use anyhow::Result;
use backtrace::Backtrace;
use dirs::home_dir;

mod cell;
mod config;
mod grid;
mod position;
mod properties;
mod renderer;
mod simulation;

use crate::grid::Grid;
use crate::renderer::Renderer;

fn init_logging() -> Result<()> {
    let path = temp_dir().join("gol.log");
    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let writer = Mutex::new(log_file);
    tracing_subscriber::fmt()
        .pretty()
        .with_writer(writer)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let config = home_dir()
        .and_then(|home| config::parse(home.join(".config/gol/config.toml")).ok())
        .unwrap_or_default();

    if config.debug {
        init_logging()?;
    }

    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |e| {
        tracing::error!("{:?}", Backtrace::new());
        tracing::error!("{}", e);
        default_hook(e);
    }));

    let game = properties::load()?;
    tracing::info!(
        width = game.width,
        height = game.height,
        spawn_probability = game.spawn_probability,
        max_steps = game.max_steps,
        "loaded configuration"
    );

    let mut grid = Grid::random(
        game.width,
        game.height,
        game.spawn_probability,
        &mut rand::thread_rng(),
    );
    tracing::debug!(
        width = grid.width(),
        height = grid.height(),
        population = grid.population(),
        "seeded grid"
    );

    let mut renderer = Renderer::new()?;
    let delay = config.frame_delay();

    simulation::run(&mut grid, &mut renderer, game.max_steps, || {
        thread::sleep(delay)
    })
}
