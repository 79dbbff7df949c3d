use pathviz_core::{Context, Point};

use crate::search::SearchOutcome;
use crate::space::{Frontier, SearchSpace};
use crate::traits::WeightedPather;

/// Min-heap frontier keyed by accumulated cost.
struct Uniform;

impl<P: WeightedPather + ?Sized> Frontier<P> for Uniform {
    fn seed(&mut self, space: &mut SearchSpace, _pather: &P, start: Point) {
        space.open.enqueue(start, 0);
    }

    fn next(&mut self, space: &mut SearchSpace) -> Option<Point> {
        space.pop_open()
    }

    fn relax(&mut self, space: &mut SearchSpace, pather: &P, from: Point, to: Point) {
        space.relax_weighted(from, to, pather.cost(from, to), 0);
    }
}

impl SearchSpace {
    /// Dijkstra's shortest-path search from `start` to `end`.
    ///
    /// Nodes are closed when dequeued and never expanded twice. A cheaper
    /// route to a node that is still queued repositions it in the heap.
    pub fn dijkstra<P: WeightedPather + ?Sized>(
        &mut self,
        pather: &P,
        start: Point,
        end: Point,
        ctx: &Context,
        mut on_visit: impl FnMut(Point),
    ) -> SearchOutcome {
        self.drive(&mut Uniform, pather, start, end, ctx, &mut on_visit)
    }
}
