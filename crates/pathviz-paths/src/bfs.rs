use pathviz_core::{Context, Point};

use crate::search::SearchOutcome;
use crate::space::{Frontier, SearchSpace};
use crate::traits::Pather;

/// FIFO frontier. A node is marked seen when it is queued, so it is queued
/// at most once and its first predecessor sticks.
struct Fifo;

impl<P: Pather + ?Sized> Frontier<P> for Fifo {
    fn seed(&mut self, space: &mut SearchSpace, _pather: &P, start: Point) {
        if let Some(i) = space.range.index(start) {
            space.closed[i] = true;
        }
        space.fifo.push_back(start);
    }

    fn next(&mut self, space: &mut SearchSpace) -> Option<Point> {
        space.fifo.pop_front()
    }

    fn relax(&mut self, space: &mut SearchSpace, _pather: &P, from: Point, to: Point) {
        let (Some(fi), Some(ti)) = (space.range.index(from), space.range.index(to)) else {
            return;
        };
        if space.closed[ti] {
            return;
        }
        space.closed[ti] = true;
        space.cost[ti] = space.cost[fi] + 1;
        space.preds.insert(to, from);
        space.fifo.push_back(to);
    }
}

impl SearchSpace {
    /// Breadth-first search from `start` to `end`.
    ///
    /// Every step costs 1, so a found path has the fewest possible edges.
    /// Neighbours are explored in the order the pather yields them, which
    /// decides between equally short paths. `on_visit` fires for every
    /// expanded node other than `start` and `end`.
    pub fn bfs<P: Pather + ?Sized>(
        &mut self,
        pather: &P,
        start: Point,
        end: Point,
        ctx: &Context,
        mut on_visit: impl FnMut(Point),
    ) -> SearchOutcome {
        self.drive(&mut Fifo, pather, start, end, ctx, &mut on_visit)
    }
}
