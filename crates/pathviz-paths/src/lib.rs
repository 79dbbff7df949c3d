//! Shortest-path search over a 4-connected grid.
//!
//! This crate provides the three strategies the visualizer animates:
//!
//! - **BFS** fewest-edges search ([`SearchSpace::bfs`])
//! - **Dijkstra** cheapest-path search ([`SearchSpace::dijkstra`])
//! - **A\*** heuristic cheapest-path search ([`SearchSpace::astar`])
//!
//! All strategies run through [`SearchSpace`], which owns and reuses the
//! per-run buffers, share one expansion loop, and report each expanded
//! node through a callback while polling a cancellation
//! [`Context`](pathviz_core::Context). The resulting [`Predecessors`] map is
//! turned into a path by [`reconstruct`].
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS |
//! | [`WeightedPather`] : [`Pather`] | Dijkstra |
//! | [`AstarPather`] : [`WeightedPather`] | A*, [`SearchSpace::search`] |

mod astar;
mod bfs;
mod dijkstra;
mod distance;
mod pather;
mod queue;
mod search;
mod space;
mod trace;
mod traits;

pub use distance::manhattan;
pub use pather::GridPather;
pub use queue::MinQueue;
pub use search::{Algorithm, SearchOutcome, UnknownAlgorithm};
pub use space::{SearchSpace, UNREACHABLE};
pub use trace::{Predecessors, TraceError, path_cost, reconstruct};
pub use traits::{AstarPather, Pather, WeightedPather};
