//! Predecessor maps and path reconstruction.

use std::fmt;

use pathviz_core::{Context, Point, Range};

use crate::traits::WeightedPather;

/// For each reached cell, the cell it was first (or most cheaply) reached
/// from. Cleared at the start of every search.
#[derive(Debug, Clone)]
pub struct Predecessors {
    range: Range,
    links: Vec<Option<Point>>,
}

impl Predecessors {
    /// An empty map covering `range`.
    pub fn new(range: Range) -> Self {
        Self {
            range,
            links: vec![None; range.len()],
        }
    }

    /// Forget every link and cover `range` from now on.
    pub fn reset(&mut self, range: Range) {
        self.range = range;
        self.links.clear();
        self.links.resize(range.len(), None);
    }

    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    /// Record that `p` was reached from `from`. Ignored outside the range.
    #[inline]
    pub fn insert(&mut self, p: Point, from: Point) {
        if let Some(i) = self.range.index(p) {
            self.links[i] = Some(from);
        }
    }

    /// The predecessor of `p`, if any.
    #[inline]
    pub fn get(&self, p: Point) -> Option<Point> {
        self.range.index(p).and_then(|i| self.links[i])
    }

    /// Number of cells with a predecessor.
    pub fn len(&self) -> usize {
        self.links.iter().filter(|l| l.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.links.iter().all(Option::is_none)
    }
}

/// Why a path could not be traced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceError {
    /// The context was cancelled mid-walk.
    Cancelled,
    /// The chain stopped at a cell that is not the start.
    Broken { at: Point },
    /// The walk exceeded the number of cells in the grid, so the chain
    /// loops.
    Cycle { steps: usize },
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => f.write_str("trace: cancelled"),
            Self::Broken { at } => write!(f, "trace: predecessor chain broken at {at}"),
            Self::Cycle { steps } => {
                write!(f, "trace: predecessor chain loops (gave up after {steps} steps)")
            }
        }
    }
}

impl std::error::Error for TraceError {}

/// Walk `preds` backwards from `end` to `start` and return the path in
/// start-to-end order, both endpoints included.
///
/// The walk is capped at one step per cell of the map's range, so a
/// malformed map fails with [`TraceError::Cycle`] instead of looping.
/// `ctx` is checked before every step.
pub fn reconstruct(
    preds: &Predecessors,
    start: Point,
    end: Point,
    ctx: &Context,
) -> Result<Vec<Point>, TraceError> {
    let limit = preds.range().len().max(1);
    let mut path = Vec::new();
    let mut current = end;

    loop {
        if ctx.is_cancelled() {
            return Err(TraceError::Cancelled);
        }
        if path.len() >= limit {
            return Err(TraceError::Cycle { steps: path.len() });
        }
        path.push(current);
        if current == start {
            break;
        }
        match preds.get(current) {
            Some(prev) => current = prev,
            None => return Err(TraceError::Broken { at: current }),
        }
    }

    path.reverse();
    log::debug!("traced path of {} cells from {start} to {end}", path.len());
    Ok(path)
}

/// Total cost of walking `path` under `pather`, not counting the first
/// cell.
pub fn path_cost<P: WeightedPather>(pather: &P, path: &[Point]) -> i32 {
    path.windows(2).map(|w| pather.cost(w[0], w[1])).sum()
}
