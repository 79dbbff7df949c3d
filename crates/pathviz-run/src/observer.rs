//! Outbound events: what a run reports to whoever is drawing it.

use std::sync::mpsc::Sender;
use std::time::Duration;

use pathviz_core::Point;

use crate::controller::RunOutcome;

/// A single animation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// Drop every visitation and path mark.
    Cleared,
    /// A non-marker cell was expanded.
    Visit(Point),
    /// A non-marker cell lies on the found path (emitted start to end).
    Path(Point),
    /// The run ended.
    Finished(RunOutcome),
}

/// Receives run events. All methods default to no-ops.
pub trait RunObserver {
    /// Previous marks should be cleared.
    fn on_clear(&mut self) {}

    /// `p` was expanded.
    fn on_visit(&mut self, _p: Point) {}

    /// `p` is the next cell of the path.
    fn on_path(&mut self, _p: Point) {}

    /// The run reached a terminal outcome.
    fn on_finish(&mut self, _outcome: &RunOutcome) {}
}

/// Discards every event.
impl RunObserver for () {}

/// Records every event, in order.
impl RunObserver for Vec<RunEvent> {
    fn on_clear(&mut self) {
        self.push(RunEvent::Cleared);
    }

    fn on_visit(&mut self, p: Point) {
        self.push(RunEvent::Visit(p));
    }

    fn on_path(&mut self, p: Point) {
        self.push(RunEvent::Path(p));
    }

    fn on_finish(&mut self, outcome: &RunOutcome) {
        self.push(RunEvent::Finished(outcome.clone()));
    }
}

/// Forwards events to a UI on another thread. A hung-up receiver is
/// ignored; the run carries on until cancelled.
impl RunObserver for Sender<RunEvent> {
    fn on_clear(&mut self) {
        self.send(RunEvent::Cleared).ok();
    }

    fn on_visit(&mut self, p: Point) {
        self.send(RunEvent::Visit(p)).ok();
    }

    fn on_path(&mut self, p: Point) {
        self.send(RunEvent::Path(p)).ok();
    }

    fn on_finish(&mut self, outcome: &RunOutcome) {
        self.send(RunEvent::Finished(outcome.clone())).ok();
    }
}

// ---------------------------------------------------------------------------
// Pacing
// ---------------------------------------------------------------------------

/// Suspends the run between events so a renderer can keep up.
pub trait Pacer {
    fn pause(&mut self, delay: Duration);
}

/// Sleeps the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

/// Never pauses; for tests and batch use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn pause(&mut self, _delay: Duration) {}
}
