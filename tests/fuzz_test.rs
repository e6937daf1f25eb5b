/// Fuzzes the pathfinding system by checking for many random grids that a path is found exactly
/// when the target is reachable according to an independent flood fill, and that A* and Dijkstra
/// agree on the cost of the shortest path. Both movement modes and all corner cutting policies
/// are tested.
use rand::prelude::*;
use std::collections::VecDeque;
use tile_pathfinding::{
    Algorithm, AstarSolver, CornerCutting, DijkstraSolver, GridSolver, Pathfinder, TileGrid,
};

fn random_grid(w: usize, h: usize, rng: &mut StdRng, corner_cutting: CornerCutting) -> TileGrid {
    let walkable = (0..w * h).map(|_| !rng.gen_bool(0.4)).collect();
    TileGrid::from_walkable(w, h, walkable)
        .unwrap()
        .with_corner_cutting(corner_cutting)
}

/// Breadth-first flood fill over the grid's own neighbour relation.
fn flood_fill(grid: &TileGrid, start: usize, allow_diagonals: bool) -> Vec<bool> {
    let mut seen = vec![false; grid.len()];
    if !grid.is_walkable(start) {
        return seen;
    }
    let mut queue = VecDeque::from([start]);
    seen[start] = true;
    while let Some(ix) = queue.pop_front() {
        for (n, _) in grid.neighbours(ix, allow_diagonals) {
            if !seen[n] {
                seen[n] = true;
                queue.push_back(n);
            }
        }
    }
    seen
}

fn visualize_grid(grid: &TileGrid, start: usize, end: usize) {
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let ix = grid.index(x, y).unwrap();
            if ix == start {
                print!("S");
            } else if ix == end {
                print!("G");
            } else if !grid.is_walkable(ix) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

const POLICIES: [CornerCutting; 3] = [
    CornerCutting::Never,
    CornerCutting::OneSide,
    CornerCutting::Always,
];

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for corner_cutting in POLICIES {
        for diagonal in [false, true] {
            let astar = AstarSolver::new(diagonal);
            for _ in 0..N_GRIDS {
                let grid = random_grid(N, N, &mut rng, corner_cutting);
                let dijkstra = DijkstraSolver::with_diagonals(&grid, diagonal);
                let start = rng.gen_range(0..grid.len());
                let end = rng.gen_range(0..grid.len());
                let reachable = start != end
                    && grid.is_walkable(end)
                    && flood_fill(&grid, start, diagonal)[end];
                let astar_path = astar.find_path(&grid, start, end);
                let dijkstra_path = dijkstra.find_path(&grid, start, end);
                // Show the grid if the outcome is wrong
                if astar_path.is_empty() == reachable || dijkstra_path.is_empty() == reachable {
                    visualize_grid(&grid, start, end);
                }
                assert_eq!(!astar_path.is_empty(), reachable);
                assert_eq!(!dijkstra_path.is_empty(), reachable);
                let same_walkable_cell = start == end && grid.is_walkable(start);
                assert_eq!(
                    grid.reachable(start, end, diagonal),
                    reachable || same_walkable_cell
                );
            }
        }
    }
}

#[test]
fn fuzz_distance() {
    const N: usize = 8;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(1);
    for corner_cutting in POLICIES {
        for diagonal in [false, true] {
            let astar = AstarSolver::new(diagonal);
            for _ in 0..N_GRIDS {
                let grid = random_grid(N, N, &mut rng, corner_cutting);
                let dijkstra = DijkstraSolver::with_diagonals(&grid, diagonal);
                let start = rng.gen_range(0..grid.len());
                let end = rng.gen_range(0..grid.len());
                let astar_path = astar.find_path(&grid, start, end);
                let dijkstra_path = dijkstra.find_path(&grid, start, end);
                assert_eq!(astar_path.is_empty(), dijkstra_path.is_empty());
                if astar_path.is_empty() {
                    continue;
                }
                let astar_cost = astar.get_path_cost(&grid, start, &astar_path.path);
                let dijkstra_cost = dijkstra.get_path_cost(&grid, start, &dijkstra_path.path);
                if astar_cost != dijkstra_cost {
                    println!("Astar cost: {astar_cost}; Dijkstra cost: {dijkstra_cost}");
                    println!(
                        "Astar path: {:?}\nDijkstra path: {:?}",
                        astar_path.path, dijkstra_path.path
                    );
                    visualize_grid(&grid, start, end);
                }
                assert_eq!(astar_cost, dijkstra_cost);
                assert_eq!(astar_path.path.last(), Some(&end));
                assert!(!astar_path.path.contains(&start));
            }
        }
    }
}

#[test]
fn repeated_queries_are_deterministic() {
    let mut rng = StdRng::seed_from_u64(2);
    let grid = random_grid(16, 16, &mut rng, CornerCutting::OneSide);
    let mut pathfinder = Pathfinder::new(grid);
    for diagonal in [false, true] {
        pathfinder.set_diagonal_policy(diagonal);
        for _ in 0..50 {
            let start = rng.gen_range(0..pathfinder.grid().len());
            let end = rng.gen_range(0..pathfinder.grid().len());
            for algorithm in [Algorithm::AStar, Algorithm::Dijkstra] {
                let first = pathfinder.find_path(start, end, algorithm, diagonal).path;
                for _ in 0..3 {
                    assert_eq!(pathfinder.find_path(start, end, algorithm, diagonal).path, first);
                }
            }
        }
    }
}
