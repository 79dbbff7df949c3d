//! Shared model for the terminal demos.
//!
//! A [`Board`] folds the event stream of a run into per-cell marks and
//! draws the grid with those marks on top.

use pathviz_core::{Cell, Grid, MAX_WEIGHT, Point};
use pathviz_run::{RunEvent, RunOutcome};
use rand::Rng;

/// Overlay mark of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mark {
    #[default]
    None,
    Visited,
    Path,
}

/// A grid plus the marks a run has painted over it.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    marks: Vec<Mark>,
    outcome: Option<RunOutcome>,
}

impl Board {
    pub fn new(grid: Grid) -> Self {
        let len = grid.len();
        Self {
            grid,
            marks: vec![Mark::None; len],
            outcome: None,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The outcome reported by the last `Finished` event.
    #[inline]
    pub fn outcome(&self) -> Option<&RunOutcome> {
        self.outcome.as_ref()
    }

    pub fn mark(&self, p: Point) -> Mark {
        self.grid
            .bounds()
            .index(p)
            .map_or(Mark::None, |i| self.marks[i])
    }

    /// Number of cells currently marked as visited or on the path.
    pub fn marked(&self) -> usize {
        self.marks.iter().filter(|m| **m != Mark::None).count()
    }

    /// Apply one run event.
    pub fn apply(&mut self, event: &RunEvent) {
        match event {
            RunEvent::Cleared => {
                self.marks.fill(Mark::None);
                self.outcome = None;
            }
            RunEvent::Visit(p) => self.paint(*p, Mark::Visited),
            RunEvent::Path(p) => self.paint(*p, Mark::Path),
            RunEvent::Finished(outcome) => self.outcome = Some(outcome.clone()),
        }
    }

    fn paint(&mut self, p: Point, mark: Mark) {
        if let Some(i) = self.grid.bounds().index(p) {
            self.marks[i] = mark;
        }
    }

    /// Draw the board: `*` on the path, `o` on visited cells, and the map
    /// alphabet everywhere else.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.grid.len() + self.grid.rows() as usize);
        for (p, cell) in self.grid.iter() {
            if p.col == 0 && p.row > 0 {
                out.push('\n');
            }
            out.push(self.rune(p, cell));
        }
        out
    }

    fn rune(&self, p: Point, cell: Cell) -> char {
        if cell.is_start() {
            return 'S';
        }
        if cell.is_end() {
            return 'E';
        }
        if cell.is_wall() {
            return '#';
        }
        match self.mark(p) {
            Mark::Path => '*',
            Mark::Visited => 'o',
            Mark::None => match cell.weight() {
                1 => '.',
                MAX_WEIGHT => '0',
                w => char::from_digit(w as u32, 10).unwrap_or('?'),
            },
        }
    }
}

/// Turn each open, unmarked cell into a wall with probability `density`,
/// clamped to `[0, 1]`. NaN scatters nothing.
pub fn scatter_walls<R: Rng>(grid: &Grid, density: f64, rng: &mut R) -> Grid {
    if density.is_nan() {
        return grid.clone();
    }
    let density = density.clamp(0.0, 1.0);
    let mut out = grid.clone();
    for (p, cell) in grid.iter() {
        if cell.marker().is_some() || cell.is_wall() {
            continue;
        }
        if rng.random_bool(density) {
            // Markers were skipped above, so this cannot fail.
            if let Ok(g) = out.set_wall(p, true) {
                out = g;
            }
        }
    }
    out
}

/// Give each open, unmarked cell a random weight in `[1, max]`.
pub fn scatter_weights<R: Rng>(grid: &Grid, max: i32, rng: &mut R) -> Grid {
    let max = max.clamp(1, MAX_WEIGHT);
    let mut out = grid.clone();
    for (p, cell) in grid.iter() {
        if cell.marker().is_some() || cell.is_wall() {
            continue;
        }
        if let Ok(g) = out.set_weight(p, rng.random_range(1..=max)) {
            out = g;
        }
    }
    out
}
