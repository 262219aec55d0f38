use std::fmt;

static OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Position {
    pub(crate) row: usize,
    pub(crate) col: usize,
}

impl Position {
    pub(crate) fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub(crate) fn in_bounds(&self, width: usize, height: usize) -> bool {
        self.row < height && self.col < width
    }

    /// Adjacent positions inside `width x height`, diagonals included.
    /// The grid has no wraparound.
    pub(crate) fn neighbors(
        self,
        width: usize,
        height: usize,
    ) -> impl Iterator<Item = Position> {
        OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let row = self.row as isize + dr;
            let col = self.col as isize + dc;
            if row < 0 || col < 0 {
                return None;
            }
            let p = Position::new(row as usize, col as usize);
            if p.in_bounds(width, height) {
                Some(p)
            } else {
                None
            }
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}
