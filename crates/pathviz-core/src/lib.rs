//! **pathviz-core**: grid model for the path-search visualizer.
//!
//! This crate provides the foundational types shared by the search engine
//! and the run controller: geometry primitives, the copy-on-write [`Grid`]
//! of [`Cell`]s, ASCII map parsing, and the cooperative cancellation
//! [`Context`].

pub mod cell;
pub mod context;
pub mod geom;
pub mod grid;
pub mod map;

pub use cell::{Cell, MAX_WEIGHT, MIN_WEIGHT, Marker, clamp_weight};
pub use context::Context;
pub use geom::{Point, Range};
pub use grid::{EditError, Grid, GridError};
