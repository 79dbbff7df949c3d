use pathviz_core::{Context, Point};

use crate::search::SearchOutcome;
use crate::space::{Frontier, SearchSpace};
use crate::traits::AstarPather;

/// Min-heap frontier keyed by `g + h` towards a fixed goal.
struct Guided {
    goal: Point,
}

impl<P: AstarPather + ?Sized> Frontier<P> for Guided {
    fn seed(&mut self, space: &mut SearchSpace, pather: &P, start: Point) {
        space.open.enqueue(start, pather.estimate(start, self.goal));
    }

    fn next(&mut self, space: &mut SearchSpace) -> Option<Point> {
        space.pop_open()
    }

    fn relax(&mut self, space: &mut SearchSpace, pather: &P, from: Point, to: Point) {
        space.relax_weighted(from, to, pather.cost(from, to), pather.estimate(to, self.goal));
    }
}

impl SearchSpace {
    /// A* search from `start` to `end`.
    ///
    /// Same relaxation as [`dijkstra`](Self::dijkstra), but the frontier is
    /// ordered by accumulated cost plus the pather's estimate to `end`. With
    /// an admissible estimate the found path costs the same as Dijkstra's.
    pub fn astar<P: AstarPather + ?Sized>(
        &mut self,
        pather: &P,
        start: Point,
        end: Point,
        ctx: &Context,
        mut on_visit: impl FnMut(Point),
    ) -> SearchOutcome {
        self.drive(&mut Guided { goal: end }, pather, start, end, ctx, &mut on_visit)
    }
}
