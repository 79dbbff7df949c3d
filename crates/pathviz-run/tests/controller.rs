use std::sync::mpsc;

use pathviz_core::{Context, EditError, Grid, Point};
use pathviz_paths::Algorithm;
use pathviz_run::{
    NoPacing, RequestError, RunConfig, RunController, RunEvent, RunObserver, RunOutcome, RunState,
    ThreadPacer,
};

fn recorder(map: &str, config: RunConfig) -> RunController<Vec<RunEvent>, NoPacing> {
    RunController::new(Grid::parse(map).unwrap(), config, Vec::new(), NoPacing)
}

fn weighted(algorithm: Algorithm) -> RunConfig {
    let mut config = RunConfig::default();
    config.set_weighted(true);
    config.set_algorithm(algorithm);
    config
}

fn visits(events: &[RunEvent]) -> Vec<Point> {
    events
        .iter()
        .filter_map(|e| match e {
            RunEvent::Visit(p) => Some(*p),
            _ => None,
        })
        .collect()
}

fn path_events(events: &[RunEvent]) -> Vec<Point> {
    events
        .iter()
        .filter_map(|e| match e {
            RunEvent::Path(p) => Some(*p),
            _ => None,
        })
        .collect()
}

#[test]
fn found_run_emits_events_in_order() {
    let mut c = recorder(
        "
S###E
.....
.....",
        RunConfig::default(),
    );
    let outcome = c.start().unwrap();
    let expected: Vec<Point> = [(0, 0), (1, 0), (1, 1), (1, 2), (1, 3), (1, 4), (0, 4)]
        .into_iter()
        .map(|(r, c)| Point::new(r, c))
        .collect();
    assert_eq!(
        outcome,
        RunOutcome::Found {
            path: expected.clone(),
            cost: 6
        }
    );
    assert_eq!(c.state(), RunState::Idle);

    let events = c.observer();
    assert_eq!(events.first(), Some(&RunEvent::Cleared));
    assert_eq!(events.last(), Some(&RunEvent::Finished(outcome.clone())));
    assert_eq!(path_events(events), expected[1..expected.len() - 1].to_vec());

    // Markers never show up as visits; all visits precede the path.
    let v = visits(events);
    assert!(!v.contains(&Point::new(0, 0)) && !v.contains(&Point::new(0, 4)));
    let last_visit = events.iter().rposition(|e| matches!(e, RunEvent::Visit(_))).unwrap();
    let first_path = events.iter().position(|e| matches!(e, RunEvent::Path(_))).unwrap();
    assert!(last_visit < first_path);
}

#[test]
fn weighted_runs_route_around_heavy_cells() {
    for algorithm in [Algorithm::Dijkstra, Algorithm::AStar] {
        let mut c = recorder("S..\n.0.\n..E", weighted(algorithm));
        match c.start().unwrap() {
            RunOutcome::Found { path, cost } => {
                assert_eq!(cost, 4);
                assert!(!path.contains(&Point::new(1, 1)));
            }
            other => panic!("{algorithm}: unexpected {other:?}"),
        }
    }
}

#[test]
fn unweighted_cost_counts_edges() {
    let mut c = recorder("S9E", RunConfig::default());
    assert_eq!(
        c.start().unwrap(),
        RunOutcome::Found {
            path: vec![Point::new(0, 0), Point::new(0, 1), Point::new(0, 2)],
            cost: 2
        }
    );
}

#[test]
fn unreachable_end_is_not_found() {
    let mut c = recorder(
        "
S.#..
..#.E
..#..",
        RunConfig::default(),
    );
    assert_eq!(c.start().unwrap(), RunOutcome::NotFound);
    let events = c.observer();
    assert!(path_events(events).is_empty());
    // Five open cells besides the start on the left of the wall.
    assert_eq!(visits(events).len(), 5);
    assert_eq!(c.state(), RunState::Idle);
}

#[test]
fn invalid_requests_are_refused_without_side_effects() {
    let mut no_start = RunController::new(
        Grid::blank(2, 2).unwrap().move_end(Point::new(1, 1)).unwrap(),
        RunConfig::default(),
        Vec::new(),
        NoPacing,
    );
    assert_eq!(no_start.start(), Err(RequestError::MissingStart));
    assert!(no_start.observer().is_empty());

    let mut blocked = recorder("S#.\n#..\n..E", RunConfig::default());
    assert_eq!(blocked.start(), Err(RequestError::StartBlocked));

    let mut end_blocked = recorder("S..\n..#\n.#E", RunConfig::default());
    assert_eq!(end_blocked.start(), Err(RequestError::EndBlocked));

    let mut mismatch = recorder("S.E", RunConfig::default());
    mismatch.set_algorithm(Algorithm::AStar).unwrap();
    assert_eq!(
        mismatch.start(),
        Err(RequestError::AlgorithmMismatch {
            algorithm: Algorithm::AStar,
            weighted: false
        })
    );
    let mut bfs_weighted = recorder("S.E", weighted(Algorithm::Bfs));
    assert!(matches!(
        bfs_weighted.start(),
        Err(RequestError::AlgorithmMismatch { .. })
    ));
    assert_eq!(mismatch.state(), RunState::Idle);
    assert!(mismatch.observer().is_empty());
}

/// Records events and cancels the run after a fixed number of visits.
struct CancelAfter {
    ctx: Option<Context>,
    limit: usize,
    events: Vec<RunEvent>,
}

impl RunObserver for CancelAfter {
    fn on_visit(&mut self, p: Point) {
        self.events.push(RunEvent::Visit(p));
        if self.events.len() == self.limit {
            if let Some(ctx) = &self.ctx {
                ctx.cancel();
            }
        }
    }

    fn on_path(&mut self, p: Point) {
        self.events.push(RunEvent::Path(p));
    }
}

#[test]
fn cancellation_mid_search() {
    for (weighted_mode, algorithm) in [
        (false, Algorithm::Bfs),
        (true, Algorithm::Dijkstra),
        (true, Algorithm::AStar),
    ] {
        let mut config = RunConfig::default();
        config.set_weighted(weighted_mode);
        config.set_algorithm(algorithm);
        let observer = CancelAfter {
            ctx: None,
            limit: 4,
            events: Vec::new(),
        };
        let mut c = RunController::new(Grid::standard(), config, observer, NoPacing);
        let ctx = c.context();
        c.observer_mut().ctx = Some(ctx);

        assert_eq!(c.start().unwrap(), RunOutcome::Cancelled);
        assert_eq!(c.state(), RunState::Cancelled);
        assert_eq!(c.observer().events.len(), 4);
        assert!(path_events(&c.observer().events).is_empty());

        // A new run after cancellation starts from a re-armed token.
        c.observer_mut().ctx = None;
        assert!(c.start().unwrap().is_found());
        assert_eq!(c.state(), RunState::Idle);
    }
}

#[test]
fn reset_is_idempotent() {
    let mut c = recorder("S.#\n.3.\n#.E", RunConfig::default());
    c.reset();
    let once = c.grid().clone();
    c.reset();
    assert_eq!(c.grid(), &once);
    assert_eq!(c.state(), RunState::Idle);
    assert_eq!(once.render(), "S..\n...\n..E");
    assert_eq!(c.observer().as_slice(), &[RunEvent::Cleared, RunEvent::Cleared]);
}

#[test]
fn stop_keeps_walls() {
    let mut c = recorder("S.#\n...\n..E", RunConfig::default());
    c.stop();
    assert_eq!(c.grid().render(), "S.#\n...\n..E");
    assert!(!c.context().is_cancelled());
    assert!(c.start().unwrap().is_found());
}

#[test]
fn edits_go_through_grid_validation() {
    let mut c = recorder("S..\n...\n..E", RunConfig::default());
    c.toggle_wall(Point::new(1, 1)).unwrap();
    assert!(c.grid().at(Point::new(1, 1)).unwrap().is_wall());
    assert!(matches!(
        c.set_wall(Point::new(0, 0), true),
        Err(EditError::Occupied { .. })
    ));
    assert_eq!(
        c.move_start(Point::new(1, 1)),
        Err(EditError::Wall(Point::new(1, 1)))
    );
    c.move_start(Point::new(0, 2)).unwrap();
    assert_eq!(c.grid().start(), Some(Point::new(0, 2)));

    assert_eq!(c.paint_weight(Point::new(1, 0)), Err(EditError::Unweighted));
    c.set_weighted(true).unwrap();
    assert_eq!(c.config().algorithm, Algorithm::Dijkstra);
    c.set_weight_value(12).unwrap();
    c.paint_weight(Point::new(1, 0)).unwrap();
    assert_eq!(c.grid().weight(Point::new(1, 0)), 10);
}

#[test]
fn edits_after_a_run_do_not_touch_its_result() {
    let mut c = recorder("S...\n....\n...E", RunConfig::default());
    let before = c.grid().clone();
    let outcome = c.start().unwrap();
    assert!(outcome.is_found());
    assert_eq!(c.grid(), &before);
    c.set_wall(Point::new(1, 1), true).unwrap();
    assert!(!before.at(Point::new(1, 1)).unwrap().is_wall());
}

#[test]
fn channel_observer_with_remote_cancel() {
    let (tx, rx) = mpsc::channel();
    let mut config = RunConfig::default();
    config.set_speed_ms(10);
    let mut c = RunController::new(Grid::standard(), config, tx, ThreadPacer);
    let ctx = c.context();

    let worker = std::thread::spawn(move || c.start());

    // Wait for the first visit, then cancel from this thread.
    for event in rx.iter() {
        if matches!(event, RunEvent::Visit(_)) {
            ctx.cancel();
            break;
        }
    }
    let outcome = worker.join().unwrap().unwrap();
    assert_eq!(outcome, RunOutcome::Cancelled);

    let rest: Vec<RunEvent> = rx.iter().collect();
    assert_eq!(rest.last(), Some(&RunEvent::Finished(RunOutcome::Cancelled)));
    assert!(!rest.iter().any(|e| matches!(e, RunEvent::Path(_))));
}

#[test]
fn cancel_right_after_spawn_is_not_lost() {
    for _ in 0..5 {
        let mut c: RunController<(), ThreadPacer> =
            RunController::new(Grid::standard(), RunConfig::default(), (), ThreadPacer);
        let ctx = c.context();
        let worker = std::thread::spawn(move || {
            let outcome = c.start();
            (outcome, c.state(), c.context().is_cancelled())
        });
        ctx.cancel();

        let (outcome, state, still_raised) = worker.join().unwrap();
        assert_eq!(outcome, Ok(RunOutcome::Cancelled));
        assert_eq!(state, RunState::Cancelled);
        assert!(!still_raised);
    }
}

#[test]
fn cancel_before_start_ends_the_run_without_visits() {
    let mut c = recorder("S....\n.....\n....E", RunConfig::default());
    c.context().cancel();
    assert_eq!(c.start(), Ok(RunOutcome::Cancelled));
    assert!(visits(c.observer()).is_empty());
    assert!(path_events(c.observer()).is_empty());
}
