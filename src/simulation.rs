use anyhow::{Context, Result};

use crate::grid::Grid;
use crate::renderer::Screen;

/// Shows and advances `grid` `steps` times, calling `pause` after every step.
pub(crate) fn run<S, F>(grid: &mut Grid, screen: &mut S, steps: u32, mut pause: F) -> Result<()>
where
    S: Screen,
    F: FnMut(),
{
    for _ in 0..steps {
        screen.clear().context("failed to clear screen")?;
        screen
            .draw(&grid.render())
            .with_context(|| format!("failed to draw generation {}", grid.generation()))?;
        grid.step();
        pause();
    }
    tracing::info!(generations = grid.generation(), "simulation finished");
    Ok(())
}
