//! [`GridPather`]: the pather traits implemented over a [`Grid`] snapshot.

use pathviz_core::{Grid, Point};

use crate::distance::manhattan;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Walks a 4-connected [`Grid`]: walls are impassable, and when weighting
/// is enabled stepping onto a cell costs that cell's weight.
#[derive(Debug, Clone, Copy)]
pub struct GridPather<'a> {
    grid: &'a Grid,
    weighted: bool,
}

impl<'a> GridPather<'a> {
    pub fn new(grid: &'a Grid, weighted: bool) -> Self {
        Self { grid, weighted }
    }

    #[inline]
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    #[inline]
    pub fn weighted(&self) -> bool {
        self.weighted
    }
}

impl Pather for GridPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(self.grid.neighbors(p).filter(|&n| self.grid.is_traversable(n)));
    }

    fn passable(&self, p: Point) -> bool {
        self.grid.is_traversable(p)
    }
}

impl WeightedPather for GridPather<'_> {
    fn cost(&self, _from: Point, to: Point) -> i32 {
        if self.weighted { self.grid.weight(to) } else { 1 }
    }
}

impl AstarPather for GridPather<'_> {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}
