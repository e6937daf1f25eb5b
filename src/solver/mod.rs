use crate::search::best_first_search;
use crate::tile_grid::TileGrid;
use crate::{C, D, E};
use core::fmt;
use log::{debug, warn};
use std::time::{Duration, Instant};

pub mod astar;
pub mod dijkstra;

/// Converts the integer cost to an approximate floating point equivalent where cardinal directions have cost 1.0.
pub fn convert_cost_to_unit_cost_float(cost: i32) -> f64 {
    (cost as f64) / (C as f64)
}

/// Cost of the cheapest obstacle free route between two cells: the Manhattan distance on a
/// 4-grid and the octile distance on an 8-grid. Out of range cells have distance 0.
pub fn grid_distance(grid: &TileGrid, from: usize, to: usize, allow_diagonals: bool) -> i32 {
    let (Some(p1), Some(p2)) = (grid.point(from), grid.point(to)) else {
        return 0;
    };
    let delta_x = (p1.x - p2.x).abs();
    let delta_y = (p1.y - p2.y).abs();
    if allow_diagonals {
        // Formula from https://github.com/riscy/a_star_on_grids
        // to efficiently compute the cost of a path taking the maximal amount
        // of diagonal steps before going straight
        (E * (delta_x - delta_y).abs() + D * (delta_x + delta_y)) / 2
    } else {
        (delta_x + delta_y) * C
    }
}

/// Outcome of a path query: the cells to visit in order, excluding the start and including the
/// target, and the time the query took.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathResult {
    pub path: Vec<usize>,
    pub duration: Duration,
}

impl PathResult {
    pub fn empty(duration: Duration) -> PathResult {
        PathResult {
            path: Vec::new(),
            duration,
        }
    }
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
    pub fn len(&self) -> usize {
        self.path.len()
    }
}

/// Why a query produced no path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathError {
    /// The index lies outside the grid.
    InvalidIndex(usize),
    /// The start cell is not walkable.
    BlockedStart(usize),
    /// The target cell is not walkable.
    BlockedTarget(usize),
    /// Both cells are walkable but not connected.
    Unreachable { start: usize, target: usize },
    /// Start and target are the same cell.
    DegenerateQuery(usize),
    /// The solver was built for a grid of other dimensions, as `(width, height)`.
    GridMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::InvalidIndex(ix) => write!(f, "cell {} is outside the grid", ix),
            PathError::BlockedStart(ix) => write!(f, "start cell {} is not walkable", ix),
            PathError::BlockedTarget(ix) => write!(f, "target cell {} is not walkable", ix),
            PathError::Unreachable { start, target } => {
                write!(f, "{} is not reachable from {}", target, start)
            }
            PathError::DegenerateQuery(ix) => write!(f, "start and target are both cell {}", ix),
            PathError::GridMismatch { expected, found } => write!(
                f,
                "solver was built for a {}x{} grid, queried with {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
        }
    }
}

impl std::error::Error for PathError {}

/// Rejects queries no search is needed for.
pub fn check_query(grid: &TileGrid, start: usize, target: usize) -> Result<(), PathError> {
    for ix in [start, target] {
        if ix >= grid.len() {
            return Err(PathError::InvalidIndex(ix));
        }
    }
    if !grid.is_walkable(start) {
        return Err(PathError::BlockedStart(start));
    }
    if !grid.is_walkable(target) {
        return Err(PathError::BlockedTarget(target));
    }
    if start == target {
        return Err(PathError::DegenerateQuery(start));
    }
    Ok(())
}

/// A search engine over a [TileGrid]. Implementors supply the successors of a cell and an
/// admissible heuristic; the query handling is shared.
pub trait GridSolver {
    type Successors: IntoIterator<Item = (usize, i32)>;

    /// Whether diagonal steps are taken.
    fn allow_diagonals(&self) -> bool;

    fn successors(&self, grid: &TileGrid, node: usize) -> Self::Successors;

    fn heuristic(&self, grid: &TileGrid, from: usize, to: usize) -> i32;

    /// Rejects grids the solver cannot answer queries on. Any grid is accepted by default.
    fn check_grid(&self, _grid: &TileGrid) -> Result<(), PathError> {
        Ok(())
    }

    /// Uses C as cost for cardinal (straight) moves and D for diagonal moves.
    fn cost(&self, grid: &TileGrid, from: usize, to: usize) -> i32 {
        grid_distance(grid, from, to, self.allow_diagonals())
    }

    /// Summed step cost of walking `path` from `start`, where `path` excludes `start` as in
    /// [PathResult].
    fn get_path_cost(&self, grid: &TileGrid, start: usize, path: &[usize]) -> i32 {
        let mut v = start;
        let mut total_cost_int = 0;
        for &next in path {
            total_cost_int += self.cost(grid, v, next);
            v = next;
        }
        total_cost_int
    }

    fn get_path_cost_float(&self, grid: &TileGrid, start: usize, path: &[usize]) -> f64 {
        convert_cost_to_unit_cost_float(self.get_path_cost(grid, start, path))
    }

    /// Computes a shortest path from `start` to `target`, reporting why none exists.
    fn try_find_path(
        &self,
        grid: &TileGrid,
        start: usize,
        target: usize,
    ) -> Result<PathResult, PathError> {
        let timer = Instant::now();
        self.check_grid(grid)?;
        check_query(grid, start, target)?;
        // Check if start and target are on the same connected component.
        if grid.unreachable(start, target, self.allow_diagonals()) {
            return Err(PathError::Unreachable { start, target });
        }
        let (path, _cost) = best_first_search(
            &start,
            |node| self.successors(grid, *node),
            |node| self.heuristic(grid, *node, target),
            |node| *node == target,
        )
        .ok_or_else(|| {
            warn!(
                "Reachable target {} could not be pathed to from {}, are the components correct?",
                target, start
            );
            PathError::Unreachable { start, target }
        })?;
        Ok(PathResult {
            // The caller already occupies the start cell.
            path: path.into_iter().skip(1).collect(),
            duration: timer.elapsed(),
        })
    }

    /// Like [try_find_path](Self::try_find_path), but every failure yields an empty path.
    fn find_path(&self, grid: &TileGrid, start: usize, target: usize) -> PathResult {
        let timer = Instant::now();
        self.try_find_path(grid, start, target)
            .unwrap_or_else(|e| {
                debug!("No path: {}", e);
                PathResult::empty(timer.elapsed())
            })
    }
}
