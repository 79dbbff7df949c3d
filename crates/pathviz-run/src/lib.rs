//! Run control for the path-search visualizer.
//!
//! [`RunController`] is the single coordination point a UI calls into. It
//! owns the current [`Grid`](pathviz_core::Grid), validates edits and run
//! requests, and for each run sequences:
//!
//! 1. clear the previous visualization,
//! 2. search a snapshot of the grid with the configured
//!    [`Algorithm`](pathviz_paths::Algorithm), emitting visit events,
//! 3. trace the path and emit path events,
//! 4. report a [`RunOutcome`].
//!
//! Events go to a [`RunObserver`]; delays between them go through a
//! [`Pacer`]. Cancellation is cooperative through the controller's
//! [`Context`](pathviz_core::Context).

pub mod config;
pub mod controller;
pub mod error;
pub mod observer;

pub use config::RunConfig;
pub use controller::{RunController, RunOutcome, RunState};
pub use error::RequestError;
pub use observer::{NoPacing, Pacer, RunEvent, RunObserver, ThreadPacer};
