use pathviz_core::Point;

/// Minimal pathfinding interface: provides neighbor enumeration.
pub trait Pather {
    /// Append traversable neighbors of `p` into `buf`, in expansion order.
    /// The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);

    /// Whether `p` may be expanded at all. The search loop checks every
    /// node it takes off the frontier and skips impassable ones without a
    /// visit, which is what stops a search started on a wall.
    fn passable(&self, _p: Point) -> bool {
        true
    }
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> i32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Point, to: Point) -> i32;
}
