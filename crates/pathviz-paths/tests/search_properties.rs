//! Cross-checks between the three strategies on seeded random grids.

use pathviz_core::{Context, Grid, Point};
use pathviz_paths::{
    Algorithm, GridPather, MinQueue, SearchOutcome, SearchSpace, UNREACHABLE, WeightedPather,
    path_cost,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_grid(rng: &mut StdRng, rows: i32, cols: i32, wall_chance: f64) -> Grid {
    let start = Point::new(rng.random_range(0..rows), rng.random_range(0..cols));
    let mut end = start;
    while end == start {
        end = Point::new(rng.random_range(0..rows), rng.random_range(0..cols));
    }
    let mut g = Grid::new(rows, cols, start, end).unwrap();
    for p in g.bounds() {
        if rng.random_bool(wall_chance) {
            if let Ok(next) = g.set_wall(p, true) {
                g = next;
            }
        } else if let Ok(next) = g.set_weight(p, rng.random_range(1..=10)) {
            g = next;
        }
    }
    g
}

/// Cheapest cost from `start` to every cell by repeated relaxation until
/// nothing changes.
fn reference_costs(grid: &Grid, pather: &GridPather<'_>, start: Point) -> Vec<i32> {
    let range = grid.bounds();
    let mut cost = vec![UNREACHABLE; range.len()];
    cost[range.index(start).unwrap()] = 0;
    let mut changed = true;
    while changed {
        changed = false;
        for p in range {
            let pc = cost[range.index(p).unwrap()];
            if pc == UNREACHABLE || !grid.is_traversable(p) {
                continue;
            }
            for n in grid.neighbors(p).filter(|&n| grid.is_traversable(n)) {
                let ni = range.index(n).unwrap();
                let c = pc + pather.cost(p, n);
                if c < cost[ni] {
                    cost[ni] = c;
                    changed = true;
                }
            }
        }
    }
    cost
}

fn run(space: &mut SearchSpace, algorithm: Algorithm, grid: &Grid, weighted: bool) -> (SearchOutcome, usize) {
    let pather = GridPather::new(grid, weighted);
    let mut visits = 0;
    let outcome = space.search(
        algorithm,
        &pather,
        grid.start().unwrap(),
        grid.end().unwrap(),
        &Context::new(),
        |_| visits += 1,
    );
    (outcome, visits)
}

#[test]
fn astar_matches_dijkstra_and_reference() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let rows = rng.random_range(1..12);
        let cols = rng.random_range(2..12);
        let g = random_grid(&mut rng, rows, cols, 0.25);
        let (s, e) = (g.start().unwrap(), g.end().unwrap());
        let pather = GridPather::new(&g, true);
        let reference = reference_costs(&g, &pather, s)[g.bounds().index(e).unwrap()];
        let mut space = SearchSpace::for_grid(&g);

        let (d, _) = run(&mut space, Algorithm::Dijkstra, &g, true);
        let dijkstra_cost = space.cost_at(e);
        let (a, _) = run(&mut space, Algorithm::AStar, &g, true);
        let astar_cost = space.cost_at(e);

        assert_eq!(d, a, "\n{}", g.render());
        if reference == UNREACHABLE {
            assert_eq!(d, SearchOutcome::NotFound, "\n{}", g.render());
            continue;
        }
        assert_eq!(d, SearchOutcome::Found, "\n{}", g.render());
        assert_eq!(dijkstra_cost, reference, "\n{}", g.render());
        assert_eq!(astar_cost, reference, "\n{}", g.render());

        let path = space.trace(s, e, &Context::new()).unwrap();
        assert_eq!(path_cost(&pather, &path), reference);
        assert!(path.windows(2).all(|w| pathviz_paths::manhattan(w[0], w[1]) == 1));
        assert!(path.iter().all(|&p| g.is_traversable(p)));
    }
}

#[test]
fn bfs_matches_unit_weight_dijkstra() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let rows = rng.random_range(2..10);
        let cols = rng.random_range(2..10);
        let g = random_grid(&mut rng, rows, cols, 0.3);
        let e = g.end().unwrap();
        let mut space = SearchSpace::for_grid(&g);

        let (b, _) = run(&mut space, Algorithm::Bfs, &g, false);
        let bfs_cost = space.cost_at(e);
        let (d, _) = run(&mut space, Algorithm::Dijkstra, &g, false);
        assert_eq!(b, d);
        if b == SearchOutcome::Found {
            assert_eq!(bfs_cost, space.cost_at(e));
            let path = space.trace(g.start().unwrap(), e, &Context::new()).unwrap();
            assert_eq!(path.len() as i32 - 1, bfs_cost);
        }
    }
}

#[test]
fn start_equal_to_end_is_found_without_visits() {
    let g = Grid::parse("S..\n...").unwrap();
    let s = g.start().unwrap();
    let pather = GridPather::new(&g, true);
    let mut space = SearchSpace::for_grid(&g);
    for algorithm in Algorithm::ALL {
        let mut visits = 0;
        let outcome = space.search(algorithm, &pather, s, s, &Context::new(), |_| visits += 1);
        assert_eq!(outcome, SearchOutcome::Found);
        assert_eq!(visits, 0);
        assert!(space.predecessors().is_empty());
        assert_eq!(space.trace(s, s, &Context::new()).unwrap(), vec![s]);
    }
}

#[test]
fn enclosed_end_exhausts_reachable_region() {
    let g = Grid::parse(
        "
S....#...
.....#.#.
.....#.#E
.....#.##
.....#...",
    )
    .unwrap();
    // Columns 0..=4 minus the start.
    let reachable = 5 * 5 - 1;
    let mut space = SearchSpace::for_grid(&g);
    for algorithm in Algorithm::ALL {
        let weighted = algorithm != Algorithm::Bfs;
        let (outcome, visits) = run(&mut space, algorithm, &g, weighted);
        assert_eq!(outcome, SearchOutcome::NotFound);
        assert_eq!(visits, reachable);
        assert_eq!(space.visited(), visits);
    }
}

#[test]
fn bfs_detour_is_deterministic() {
    let g = Grid::parse(
        "
S###E
.....
.....
.....
.....",
    )
    .unwrap();
    let mut space = SearchSpace::for_grid(&g);
    let (outcome, _) = run(&mut space, Algorithm::Bfs, &g, false);
    assert_eq!(outcome, SearchOutcome::Found);
    let path = space
        .trace(g.start().unwrap(), g.end().unwrap(), &Context::new())
        .unwrap();
    let expected: Vec<Point> = [(0, 0), (1, 0), (1, 1), (1, 2), (1, 3), (1, 4), (0, 4)]
        .into_iter()
        .map(|(r, c)| Point::new(r, c))
        .collect();
    assert_eq!(path, expected);
}

#[test]
fn heavy_center_is_avoided() {
    let g = Grid::parse("S..\n.0.\n..E").unwrap();
    let pather = GridPather::new(&g, true);
    for algorithm in [Algorithm::Dijkstra, Algorithm::AStar] {
        let mut space = SearchSpace::for_grid(&g);
        let (outcome, _) = run(&mut space, algorithm, &g, true);
        assert_eq!(outcome, SearchOutcome::Found);
        let path = space
            .trace(g.start().unwrap(), g.end().unwrap(), &Context::new())
            .unwrap();
        assert!(!path.contains(&Point::new(1, 1)));
        assert_eq!(path_cost(&pather, &path), 4);
    }
}

#[test]
fn cancellation_stops_within_one_expansion() {
    let g = Grid::standard();
    let mut space = SearchSpace::for_grid(&g);
    let pather = GridPather::new(&g, true);
    for algorithm in Algorithm::ALL {
        let ctx = Context::new();
        let mut visits = 0;
        let outcome = space.search(
            algorithm,
            &pather,
            g.start().unwrap(),
            g.end().unwrap(),
            &ctx,
            |_| {
                visits += 1;
                if visits == 3 {
                    ctx.cancel();
                }
            },
        );
        assert_eq!(outcome, SearchOutcome::Cancelled);
        assert_eq!(visits, 3);
    }
}

#[test]
fn queue_dequeues_non_decreasing() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut q = MinQueue::new();
    for k in 0..500u32 {
        q.enqueue(k, rng.random_range(-1000..1000));
    }
    // Duplicates never grow the queue.
    for k in 0..500u32 {
        assert!(!q.enqueue(k, 0));
    }
    assert_eq!(q.len(), 500);
    let mut last = i32::MIN;
    while let Some((_, p)) = q.dequeue() {
        assert!(p >= last);
        last = p;
    }
}
