use std::fmt;
use std::mem;

use hashbrown::HashMap;
use rand::Rng;

use crate::cell::Cell;
use crate::position::Position;

const ALIVE: &str = " 0 ";
const DEAD: &str = " . ";

/// A bounded Game of Life board.
///
/// `cells` holds exactly one entry per position in `width x height`.
/// `step` writes the next generation into `next` while reading `cells`
/// and then swaps them, so neighbor counts always see the previous
/// generation.
#[derive(Debug, Clone)]
pub(crate) struct Grid {
    width: usize,
    height: usize,
    generation: u64,
    cells: HashMap<Position, Cell>,
    next: HashMap<Position, Cell>,
}

impl Grid {
    #[cfg(test)]
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self::from_fn(width, height, |_| Cell::default())
    }

    /// Seeds every cell alive independently with probability `spawn_probability`.
    /// `spawn_probability` must be within `[0, 1]`.
    pub(crate) fn random<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        spawn_probability: f64,
        rng: &mut R,
    ) -> Self {
        Self::from_fn(width, height, |_| {
            Cell::new(rng.gen_bool(spawn_probability))
        })
    }

    /// Positions outside the grid are ignored.
    #[cfg(test)]
    pub(crate) fn with_live_cells<I>(width: usize, height: usize, live: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let mut grid = Self::new(width, height);
        for p in live {
            if let Some(cell) = grid.cells.get_mut(&p) {
                cell.spawn();
            }
        }
        grid
    }

    fn from_fn<F: FnMut(Position) -> Cell>(width: usize, height: usize, mut f: F) -> Self {
        let mut cells = HashMap::with_capacity(width.saturating_mul(height));
        for row in 0..height {
            for col in 0..width {
                let p = Position::new(row, col);
                cells.insert(p, f(p));
            }
        }
        Self {
            width,
            height,
            generation: 0,
            next: HashMap::with_capacity(cells.len()),
            cells,
        }
    }
}

impl Grid {
    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn population(&self) -> usize {
        self.cells.values().filter(|c| c.alive).count()
    }

    pub(crate) fn is_alive(&self, p: Position) -> bool {
        self.cells.get(&p).map_or(false, |c| c.alive)
    }

    pub(crate) fn live_neighbors(&self, p: Position) -> usize {
        p.neighbors(self.width, self.height)
            .filter(|n| self.is_alive(*n))
            .count()
    }

    #[cfg(test)]
    pub(crate) fn live_cells(&self) -> Vec<Position> {
        self.positions().filter(|p| self.is_alive(*p)).collect()
    }

    /// Every position in row-major order.
    fn positions(&self) -> impl Iterator<Item = Position> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| Position::new(row, col)))
    }

    /// Advances one generation.
    pub(crate) fn step(&mut self) {
        let mut next = mem::take(&mut self.next);
        next.clear();
        for (&p, &cell) in self.cells.iter() {
            next.insert(p, cell.next(self.live_neighbors(p)));
        }
        self.next = mem::replace(&mut self.cells, next);
        self.generation += 1;

        tracing::debug!(
            generation = self.generation,
            population = self.population(),
            "step"
        );
    }

    pub(crate) fn render(&self) -> String {
        let capacity = self
            .width
            .checked_mul(ALIVE.len())
            .and_then(|w| w.checked_add(1))
            .and_then(|w| w.checked_mul(self.height))
            .unwrap_or(0);
        let mut s = String::with_capacity(capacity);
        for p in self.positions() {
            s.push_str(if self.is_alive(p) { ALIVE } else { DEAD });
            if p.col + 1 == self.width {
                s.push('\n');
            }
        }
        s
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board(width: usize, height: usize, live: &[(usize, usize)]) -> Grid {
        Grid::with_live_cells(width, height, live.iter().map(|&p| Position::from(p)))
    }

    fn live(grid: &Grid) -> Vec<(usize, usize)> {
        grid.live_cells().into_iter().map(|p| (p.row, p.col)).collect()
    }

    #[test]
    fn new_grid_covers_every_position() {
        let grid = Grid::new(7, 3);
        assert_eq!(grid.cells.len(), 21);
        for row in 0..3 {
            for col in 0..7 {
                assert!(grid.cells.contains_key(&Position::new(row, col)));
            }
        }
        assert!(!grid.cells.contains_key(&Position::new(3, 0)));
        assert!(!grid.cells.contains_key(&Position::new(0, 7)));
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.generation(), 0);
    }

    #[test]
    fn random_respects_probability_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let empty = Grid::random(6, 4, 0.0, &mut rng);
        assert_eq!(empty.population(), 0);
        assert_eq!(empty.cells.len(), 24);

        let full = Grid::random(6, 4, 1.0, &mut rng);
        assert_eq!(full.population(), 24);
    }

    #[test]
    fn random_population_tracks_probability() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = Grid::random(100, 100, 0.4, &mut rng);
        let population = grid.population();
        assert!(population > 3500 && population < 4500, "{}", population);
    }

    #[test]
    fn with_live_cells_ignores_out_of_bounds() {
        let grid = board(3, 3, &[(0, 0), (2, 2), (3, 1), (1, 9)]);
        assert_eq!(live(&grid), vec![(0, 0), (2, 2)]);
        assert_eq!(grid.cells.len(), 9);
    }

    #[test]
    fn all_dead_stays_dead() {
        let mut grid = Grid::new(8, 5);
        for _ in 0..3 {
            grid.step();
            assert_eq!(grid.population(), 0);
        }
        assert_eq!(grid.generation(), 3);
    }

    #[test]
    fn isolated_cell_dies() {
        let mut grid = board(5, 5, &[(2, 2)]);
        grid.step();
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn blinker_oscillates() {
        let vertical = [(1, 2), (2, 2), (3, 2)];
        let mut grid = board(5, 5, &vertical);

        grid.step();
        assert_eq!(live(&grid), vec![(2, 1), (2, 2), (2, 3)]);

        grid.step();
        assert_eq!(live(&grid), vertical);
    }

    #[test]
    fn block_is_still_life() {
        let block = [(2, 2), (2, 3), (3, 2), (3, 3)];
        let mut grid = board(6, 6, &block);
        for _ in 0..10 {
            grid.step();
            assert_eq!(live(&grid), block);
        }
    }

    #[test]
    fn block_in_corner_is_still_life() {
        let block = [(0, 0), (0, 1), (1, 0), (1, 1)];
        let mut grid = board(2, 2, &block);
        grid.step();
        assert_eq!(live(&grid), block);
    }

    #[test]
    fn dead_cell_with_three_neighbors_spawns() {
        // Every choice of 3 live neighbors around (1,1) brings it to life.
        let around: Vec<Position> = Position::new(1, 1).neighbors(3, 3).collect();
        for a in 0..around.len() {
            for b in a + 1..around.len() {
                for c in b + 1..around.len() {
                    let mut grid = Grid::with_live_cells(3, 3, vec![around[a], around[b], around[c]]);
                    assert_eq!(grid.live_neighbors(Position::new(1, 1)), 3);
                    grid.step();
                    assert!(grid.is_alive(Position::new(1, 1)));
                }
            }
        }
    }

    #[test]
    fn live_cell_over_and_under_population() {
        let center = Position::new(1, 1);

        let mut lonely = board(3, 3, &[(1, 1), (0, 0)]);
        assert_eq!(lonely.live_neighbors(center), 1);
        lonely.step();
        assert!(!lonely.is_alive(center));

        let mut crowded = board(3, 3, &[(1, 1), (0, 0), (0, 1), (0, 2), (1, 0)]);
        assert_eq!(crowded.live_neighbors(center), 4);
        crowded.step();
        assert!(!crowded.is_alive(center));
    }

    #[test]
    fn step_reads_only_previous_generation() {
        // A row of three on the top edge: an in-place update would see (0,0)
        // already dead when visiting (0,1) and (1,1).
        let mut grid = board(3, 3, &[(0, 0), (0, 1), (0, 2)]);
        grid.step();
        assert_eq!(live(&grid), vec![(0, 1), (1, 1)]);
    }

    #[test]
    fn step_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut a = Grid::random(12, 9, 0.5, &mut rng);
        let mut b = Grid::with_live_cells(12, 9, a.live_cells());
        for _ in 0..5 {
            a.step();
            b.step();
            assert_eq!(a.live_cells(), b.live_cells());
        }
    }

    #[test]
    fn render_uses_independent_width_and_height() {
        let grid = board(4, 2, &[(0, 1), (1, 3)]);
        assert_eq!(
            grid.render(),
            " .  0  .  . \n .  .  .  0 \n"
        );
        assert_eq!(grid.to_string(), grid.render());
    }

    #[test]
    fn render_breaks_rows_on_last_column() {
        let grid = board(1, 3, &[(1, 0)]);
        assert_eq!(grid.render(), " . \n 0 \n . \n");
    }

    #[test]
    fn render_does_not_mutate() {
        let grid = board(3, 3, &[(1, 1)]);
        let before = grid.live_cells();
        let _ = grid.render();
        assert_eq!(grid.live_cells(), before);
        assert_eq!(grid.generation(), 0);
    }

    #[test]
    fn dimensions() {
        let grid = Grid::new(20, 10);
        assert_eq!(grid.width(), 20);
        assert_eq!(grid.height(), 10);
        assert_eq!(grid.render().lines().count(), 10);
        assert!(grid.render().lines().all(|l| l.len() == 60));
    }
}
