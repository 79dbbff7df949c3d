//! The [`RunController`]: the single entry point a UI drives.
//!
//! ```text
//!            start() ok                 found / not found
//!   Idle ───────────────▶ Running ──────────────────────▶ Idle
//!    ▲                       │
//!    │ stop() / cancel()     │ context cancelled
//!    └──────────────────── Cancelled ◀─┘
//! ```
//!
//! Every accepted `start()` ends in exactly one terminal state. While a run
//! is in flight, grid and configuration edits are refused with
//! [`EditError::Busy`].

use pathviz_core::{Context, EditError, Grid, Point};
use pathviz_paths::{GridPather, SearchOutcome, SearchSpace, TraceError, path_cost};

use crate::config::{RunConfig, SETTLE_DELAY};
use crate::error::RequestError;
use crate::observer::{Pacer, RunObserver, ThreadPacer};

/// Lifecycle state of a [`RunController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Cancelled,
}

/// Terminal result of an accepted run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// A path was found. `path` runs from start to end inclusive; `cost`
    /// is its edge count (unweighted) or total weight (weighted).
    Found { path: Vec<Point>, cost: i32 },
    /// No path exists, or the traced path was malformed.
    NotFound,
    /// The run was cancelled before it finished.
    Cancelled,
}

impl RunOutcome {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// Owns the current grid, configuration and cancellation token, and
/// sequences clear → search → trace → report.
pub struct RunController<O: RunObserver = (), P: Pacer = ThreadPacer> {
    grid: Grid,
    config: RunConfig,
    state: RunState,
    ctx: Context,
    space: SearchSpace,
    observer: O,
    pacer: P,
}

impl<O: RunObserver, P: Pacer> RunController<O, P> {
    /// Create a controller in the `Idle` state.
    pub fn new(grid: Grid, config: RunConfig, observer: O, pacer: P) -> Self {
        Self {
            space: SearchSpace::for_grid(&grid),
            grid,
            config: config.normalized(),
            state: RunState::Idle,
            ctx: Context::new(),
            observer,
            pacer,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The current grid snapshot.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// A handle on the cancellation token, for cancelling a run that is
    /// executing on another thread.
    ///
    /// Cancelling it stops the current run at its next suspension point. A
    /// cancel raised before `start()` reaches its first suspension point,
    /// including one raised between runs, is consumed by the next run,
    /// which then ends `Cancelled` without visiting anything. The token is
    /// lowered again when a run ends and by [`stop`](Self::stop).
    ///
    /// This only interrupts the search; walls and weights stay. Call
    /// [`cancel`](Self::cancel) once `start()` has returned to also clear
    /// them.
    pub fn context(&self) -> Context {
        self.ctx.clone()
    }

    #[inline]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    #[inline]
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Consume the controller, returning its observer.
    pub fn into_observer(self) -> O {
        self.observer
    }

    // -----------------------------------------------------------------------
    // Grid edits
    // -----------------------------------------------------------------------

    fn guard(&self) -> Result<(), EditError> {
        if self.is_running() {
            return Err(EditError::Busy);
        }
        Ok(())
    }

    fn apply(&mut self, edit: impl FnOnce(&Grid) -> Result<Grid, EditError>) -> Result<(), EditError> {
        self.guard()?;
        self.grid = edit(&self.grid)?;
        Ok(())
    }

    /// Replace the whole grid.
    pub fn replace_grid(&mut self, grid: Grid) -> Result<(), EditError> {
        self.guard()?;
        if grid.bounds() != self.space.range() {
            self.space.set_range(grid.bounds());
        }
        self.grid = grid;
        Ok(())
    }

    pub fn set_wall(&mut self, p: Point, wall: bool) -> Result<(), EditError> {
        self.apply(|g| g.set_wall(p, wall))
    }

    pub fn toggle_wall(&mut self, p: Point) -> Result<(), EditError> {
        self.apply(|g| g.toggle_wall(p))
    }

    pub fn set_weight(&mut self, p: Point, weight: i32) -> Result<(), EditError> {
        self.apply(|g| g.set_weight(p, weight))
    }

    /// Paint the configured weight onto `p`. Only allowed in weighted mode.
    pub fn paint_weight(&mut self, p: Point) -> Result<(), EditError> {
        self.guard()?;
        if !self.config.weighted {
            return Err(EditError::Unweighted);
        }
        let w = self.config.weight_value;
        self.apply(|g| g.set_weight(p, w))
    }

    pub fn move_start(&mut self, p: Point) -> Result<(), EditError> {
        self.apply(|g| g.move_start(p))
    }

    pub fn move_end(&mut self, p: Point) -> Result<(), EditError> {
        self.apply(|g| g.move_end(p))
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Switch weighting on or off; the algorithm follows the mode.
    pub fn set_weighted(&mut self, weighted: bool) -> Result<(), EditError> {
        self.guard()?;
        self.config.set_weighted(weighted);
        Ok(())
    }

    pub fn set_algorithm(&mut self, algorithm: pathviz_paths::Algorithm) -> Result<(), EditError> {
        self.guard()?;
        self.config.set_algorithm(algorithm);
        Ok(())
    }

    pub fn set_speed_ms(&mut self, ms: u64) -> Result<(), EditError> {
        self.guard()?;
        self.config.set_speed_ms(ms);
        Ok(())
    }

    pub fn set_weight_value(&mut self, w: i32) -> Result<(), EditError> {
        self.guard()?;
        self.config.set_weight_value(w);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Runs
    // -----------------------------------------------------------------------

    /// Check that a run could start now, returning the marker positions.
    pub fn validate(&self) -> Result<(Point, Point), RequestError> {
        if self.is_running() {
            return Err(RequestError::Busy);
        }
        let start = self.grid.start().ok_or(RequestError::MissingStart)?;
        let end = self.grid.end().ok_or(RequestError::MissingEnd)?;
        if !self.grid.is_traversable(start) || !self.grid.has_open_neighbor(start) {
            return Err(RequestError::StartBlocked);
        }
        if !self.grid.is_traversable(end) || !self.grid.has_open_neighbor(end) {
            return Err(RequestError::EndBlocked);
        }
        let algorithm = self.config.algorithm;
        if !algorithm.accepts(self.config.weighted) {
            return Err(RequestError::AlgorithmMismatch {
                algorithm,
                weighted: self.config.weighted,
            });
        }
        Ok((start, end))
    }

    /// Run the configured algorithm on the current grid.
    ///
    /// Clears previous marks, searches a snapshot of the grid while emitting
    /// visit events, traces the path and emits path events, then reports the
    /// outcome. Refused requests return an error and change nothing.
    pub fn start(&mut self) -> Result<RunOutcome, RequestError> {
        let (start, end) = self.validate().inspect_err(|e| {
            log::warn!("run rejected: {e}");
        })?;

        self.state = RunState::Running;
        let snapshot = self.grid.clone();
        let config = self.config;
        log::debug!(
            "starting {} from {start} to {end} on {}x{} grid (weighted: {})",
            config.algorithm,
            snapshot.rows(),
            snapshot.cols(),
            config.weighted
        );

        self.observer.on_clear();
        self.pacer.pause(SETTLE_DELAY);

        let outcome = self.execute(&snapshot, config, start, end);
        self.ctx.rearm();

        self.state = match outcome {
            RunOutcome::Cancelled => RunState::Cancelled,
            _ => RunState::Idle,
        };
        match &outcome {
            RunOutcome::Found { path, cost } => {
                log::info!("{}: path of {} cells, cost {cost}", config.algorithm, path.len());
            }
            RunOutcome::NotFound => log::info!("{}: no path found", config.algorithm),
            RunOutcome::Cancelled => log::info!("{}: cancelled", config.algorithm),
        }
        self.observer.on_finish(&outcome);
        Ok(outcome)
    }

    fn execute(&mut self, grid: &Grid, config: RunConfig, start: Point, end: Point) -> RunOutcome {
        let Self {
            space,
            ctx,
            observer,
            pacer,
            ..
        } = self;

        if space.range() != grid.bounds() {
            space.set_range(grid.bounds());
        }
        let pather = GridPather::new(grid, config.weighted);
        let visit_delay = config.visit_delay();

        let searched = space.search(config.algorithm, &pather, start, end, ctx, |p| {
            observer.on_visit(p);
            pacer.pause(visit_delay);
        });
        match searched {
            SearchOutcome::Found => {}
            SearchOutcome::NotFound => return RunOutcome::NotFound,
            SearchOutcome::Cancelled => return RunOutcome::Cancelled,
        }

        let path = match settle_trace(space.trace(start, end, ctx)) {
            Ok(path) => path,
            Err(outcome) => return outcome,
        };

        let path_delay = config.path_delay();
        for &p in &path {
            if ctx.is_cancelled() {
                return RunOutcome::Cancelled;
            }
            if p == start || p == end {
                continue;
            }
            observer.on_path(p);
            pacer.pause(path_delay);
        }

        let cost = path_cost(&pather, &path);
        RunOutcome::Found { path, cost }
    }

    /// Abandon the current run, return to `Idle` and clear the marks.
    /// Walls and weights are kept.
    ///
    /// No run can be executing while the controller is borrowed here, so
    /// there is nothing left to interrupt: the token is lowered, a cancel
    /// left pending through [`context`](Self::context) is dropped, and the
    /// next `start()` runs normally.
    pub fn stop(&mut self) {
        self.ctx.rearm();
        self.state = RunState::Idle;
        self.observer.on_clear();
    }

    /// [`stop`](Self::stop), then remove every wall and weight. Markers
    /// stay in place.
    ///
    /// Takes `&mut self`, so it applies between runs. To interrupt a run
    /// executing on another thread, cancel its [`context`](Self::context)
    /// and call this after `start()` returns.
    pub fn cancel(&mut self) {
        self.stop();
        self.grid = self.grid.cleared();
    }

    /// Same as [`cancel`](Self::cancel).
    pub fn reset(&mut self) {
        self.cancel();
    }
}

/// Map a trace result onto the run: a cancelled walk ends the run
/// `Cancelled`; a malformed predecessor chain is logged and reported as
/// `NotFound`.
fn settle_trace(traced: Result<Vec<Point>, TraceError>) -> Result<Vec<Point>, RunOutcome> {
    match traced {
        Ok(path) => Ok(path),
        Err(TraceError::Cancelled) => Err(RunOutcome::Cancelled),
        Err(e) => {
            log::warn!("discarding malformed path: {e}");
            Err(RunOutcome::NotFound)
        }
    }
}

impl<O: RunObserver + Default> RunController<O, ThreadPacer> {
    /// A controller on the default 20×40 grid with default settings.
    pub fn standard() -> Self {
        Self::new(Grid::standard(), RunConfig::default(), O::default(), ThreadPacer)
    }
}
