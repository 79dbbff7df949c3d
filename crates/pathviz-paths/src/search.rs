//! Strategy selection: [`Algorithm`] and the shared [`SearchOutcome`].

use std::fmt;
use std::str::FromStr;

use pathviz_core::{Context, Point};

use crate::space::SearchSpace;
use crate::traits::AstarPather;

/// How a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The end was reached; the predecessor map holds a path to it.
    Found,
    /// The reachable region was exhausted without reaching the end.
    NotFound,
    /// The context was cancelled before the search finished.
    Cancelled,
}

/// One of the three interchangeable search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Bfs,
    Dijkstra,
    AStar,
}

impl Algorithm {
    /// Every algorithm, in menu order.
    pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dijkstra, Algorithm::AStar];

    /// Whether this algorithm may run in the given weighting mode: BFS only
    /// on unweighted grids, Dijkstra and A* only on weighted ones.
    #[inline]
    pub fn accepts(self, weighted: bool) -> bool {
        match self {
            Self::Bfs => !weighted,
            Self::Dijkstra | Self::AStar => weighted,
        }
    }

    /// The algorithms offered for a weighting mode.
    pub fn available(weighted: bool) -> &'static [Algorithm] {
        if weighted {
            &[Algorithm::Dijkstra, Algorithm::AStar]
        } else {
            &[Algorithm::Bfs]
        }
    }

    /// The algorithm selected when switching into a weighting mode.
    #[inline]
    pub fn default_for(weighted: bool) -> Self {
        if weighted { Self::Dijkstra } else { Self::Bfs }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bfs => "Breadth-First Search (BFS)",
            Self::Dijkstra => "Dijkstra's Algorithm",
            Self::AStar => "A* Search",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bfs => "bfs",
            Self::Dijkstra => "dijkstra",
            Self::AStar => "astar",
        })
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown algorithm \u{201c}{}\u{201d}", self.0)
    }
}

impl std::error::Error for UnknownAlgorithm {}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::Bfs),
            "dijkstra" => Ok(Self::Dijkstra),
            "astar" | "a*" => Ok(Self::AStar),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

impl SearchSpace {
    /// Run `algorithm` from `start` to `end`.
    ///
    /// `ctx` is polled before every expansion; `on_visit` fires once per
    /// expanded node other than the endpoints, in expansion order.
    pub fn search<P: AstarPather + ?Sized>(
        &mut self,
        algorithm: Algorithm,
        pather: &P,
        start: Point,
        end: Point,
        ctx: &Context,
        on_visit: impl FnMut(Point),
    ) -> SearchOutcome {
        match algorithm {
            Algorithm::Bfs => self.bfs(pather, start, end, ctx, on_visit),
            Algorithm::Dijkstra => self.dijkstra(pather, start, end, ctx, on_visit),
            Algorithm::AStar => self.astar(pather, start, end, ctx, on_visit),
        }
    }
}
