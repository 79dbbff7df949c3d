use std::fmt;

use pathviz_paths::Algorithm;

/// Why a `start` request was refused. A refused request changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestError {
    /// A run is already in flight.
    Busy,
    /// The grid has no start marker.
    MissingStart,
    /// The grid has no end marker.
    MissingEnd,
    /// The start marker has no traversable neighbour.
    StartBlocked,
    /// The end marker has no traversable neighbour.
    EndBlocked,
    /// The algorithm cannot run in the current weighting mode.
    AlgorithmMismatch { algorithm: Algorithm, weighted: bool },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => f.write_str("a search is already running"),
            Self::MissingStart | Self::MissingEnd => {
                f.write_str("start and end nodes are required")
            }
            Self::StartBlocked => f.write_str("start node is blocked by walls"),
            Self::EndBlocked => f.write_str("end node is blocked by walls"),
            Self::AlgorithmMismatch { algorithm, weighted } => {
                let mode = if *weighted { "weighted" } else { "unweighted" };
                write!(f, "{} cannot run on a {mode} grid", algorithm.label())
            }
        }
    }
}

impl std::error::Error for RequestError {}
