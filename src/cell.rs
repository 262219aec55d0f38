#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) alive: bool,
}

impl Cell {
    pub(crate) fn new(alive: bool) -> Self {
        Self { alive }
    }

    pub(crate) fn spawn(&mut self) {
        self.alive = true;
    }

    pub(crate) fn kill(&mut self) {
        self.alive = false;
    }

    /// State of this cell in the next generation given its live neighbor count.
    pub(crate) fn next(self, live_neighbors: usize) -> Cell {
        let mut next = self;
        match (self.alive, live_neighbors) {
            (true, 2) | (true, 3) => {}
            (true, _) => next.kill(),
            (false, 3) => next.spawn(),
            (false, _) => {}
        }
        next
    }
}
