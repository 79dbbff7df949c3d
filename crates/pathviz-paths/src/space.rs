use std::collections::VecDeque;

use pathviz_core::{Context, Grid, Point, Range};

use crate::queue::MinQueue;
use crate::search::SearchOutcome;
use crate::trace::{Predecessors, TraceError, reconstruct};
use crate::traits::Pather;

/// Sentinel cost meaning "not reached" in the cost map.
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// Frontier
// ---------------------------------------------------------------------------

/// The part of a search strategy that differs between BFS, Dijkstra and
/// A*: how the frontier is seeded, which node comes out next, and how a
/// neighbour is relaxed. Everything else lives in [`SearchSpace::drive`].
pub(crate) trait Frontier<P: ?Sized> {
    fn seed(&mut self, space: &mut SearchSpace, pather: &P, start: Point);
    fn next(&mut self, space: &mut SearchSpace) -> Option<Point>;
    fn relax(&mut self, space: &mut SearchSpace, pather: &P, from: Point, to: Point);
}

// ---------------------------------------------------------------------------
// SearchSpace
// ---------------------------------------------------------------------------

/// Owns every per-run buffer of a search over one grid rectangle.
///
/// The predecessor map, cost map, closed flags, FIFO and heap are reset at
/// the start of each run and reused across runs, so repeated searches on
/// same-sized grids do not reallocate. After a run, the results stay
/// readable through [`predecessors`](Self::predecessors) and
/// [`cost_at`](Self::cost_at) until the next one starts.
#[derive(Debug, Clone)]
pub struct SearchSpace {
    pub(crate) range: Range,
    pub(crate) preds: Predecessors,
    pub(crate) cost: Vec<i32>,
    pub(crate) closed: Vec<bool>,
    pub(crate) fifo: VecDeque<Point>,
    pub(crate) open: MinQueue<Point>,
    nbuf: Vec<Point>,
    visited: usize,
}

impl SearchSpace {
    /// Create a search space for the given rectangle.
    pub fn new(range: Range) -> Self {
        let len = range.len();
        Self {
            range,
            preds: Predecessors::new(range),
            cost: vec![UNREACHABLE; len],
            closed: vec![false; len],
            fifo: VecDeque::new(),
            open: MinQueue::new(),
            nbuf: Vec::with_capacity(4),
            visited: 0,
        }
    }

    /// Create a search space sized for `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.bounds())
    }

    /// Replace the underlying range. Buffers are resized at the start of
    /// the next run.
    pub fn set_range(&mut self, range: Range) {
        self.range = range;
        self.preds.reset(range);
        self.visited = 0;
    }

    /// The grid rectangle being searched.
    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    /// Predecessor map of the last run.
    #[inline]
    pub fn predecessors(&self) -> &Predecessors {
        &self.preds
    }

    /// Accumulated cost to `p` in the last run: edge count for BFS, path
    /// weight for Dijkstra and A*. [`UNREACHABLE`] if `p` was not reached.
    pub fn cost_at(&self, p: Point) -> i32 {
        match self.range.index(p) {
            Some(i) => self.cost.get(i).copied().unwrap_or(UNREACHABLE),
            None => UNREACHABLE,
        }
    }

    /// Number of visitation events emitted by the last run.
    #[inline]
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Reconstruct the path found by the last run.
    pub fn trace(&self, start: Point, end: Point, ctx: &Context) -> Result<Vec<Point>, TraceError> {
        reconstruct(&self.preds, start, end, ctx)
    }

    fn prepare(&mut self, start: Point) {
        let len = self.range.len();
        self.preds.reset(self.range);
        self.cost.clear();
        self.cost.resize(len, UNREACHABLE);
        self.closed.clear();
        self.closed.resize(len, false);
        self.fifo.clear();
        self.open.clear();
        self.visited = 0;
        if let Some(i) = self.range.index(start) {
            self.cost[i] = 0;
        }
    }

    /// The expansion loop shared by every strategy.
    pub(crate) fn drive<P, F>(
        &mut self,
        frontier: &mut F,
        pather: &P,
        start: Point,
        end: Point,
        ctx: &Context,
        on_visit: &mut dyn FnMut(Point),
    ) -> SearchOutcome
    where
        P: Pather + ?Sized,
        F: Frontier<P>,
    {
        self.prepare(start);
        if start == end {
            return SearchOutcome::Found;
        }
        if !self.range.contains(start) || !self.range.contains(end) {
            return SearchOutcome::NotFound;
        }

        frontier.seed(self, pather, start);
        let mut nbuf = std::mem::take(&mut self.nbuf);

        let outcome = loop {
            if ctx.is_cancelled() {
                break SearchOutcome::Cancelled;
            }
            let Some(current) = frontier.next(self) else {
                break SearchOutcome::NotFound;
            };
            // Walls are never queued; a wall start is the only way here.
            if !pather.passable(current) {
                continue;
            }
            if current == end {
                break SearchOutcome::Found;
            }
            if current != start {
                self.visited += 1;
                log::trace!("expand {current}");
                on_visit(current);
            }

            nbuf.clear();
            pather.neighbors(current, &mut nbuf);
            for &n in nbuf.iter() {
                frontier.relax(self, pather, current, n);
            }
        };

        self.nbuf = nbuf;
        self.fifo.clear();
        self.open.clear();
        outcome
    }

    // -----------------------------------------------------------------------
    // Helpers shared by the cost-aware strategies
    // -----------------------------------------------------------------------

    /// Pop the cheapest open node, closing it. Nodes closed earlier are
    /// skipped.
    pub(crate) fn pop_open(&mut self) -> Option<Point> {
        while let Some((p, _)) = self.open.dequeue() {
            let Some(i) = self.range.index(p) else {
                continue;
            };
            if self.closed[i] {
                continue;
            }
            self.closed[i] = true;
            return Some(p);
        }
        None
    }

    /// Relax the edge `from → to` of weight `step`. On improvement `to` is
    /// queued (or repositioned) at its new cost plus `estimate`.
    pub(crate) fn relax_weighted(&mut self, from: Point, to: Point, step: i32, estimate: i32) {
        let (Some(fi), Some(ti)) = (self.range.index(from), self.range.index(to)) else {
            return;
        };
        if self.closed[ti] {
            return;
        }
        let tentative = self.cost[fi].saturating_add(step);
        if tentative >= self.cost[ti] {
            return;
        }
        self.cost[ti] = tentative;
        self.preds.insert(to, from);
        self.open.push_or_decrease(to, tentative.saturating_add(estimate));
    }
}
