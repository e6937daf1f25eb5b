use core::fmt;
use core::str::FromStr;
use log::{debug, info};
use std::time::Instant;

use crate::solver::{
    astar::AstarSolver, dijkstra::DijkstraSolver, GridSolver, PathError, PathResult,
};
use crate::tile_grid::TileGrid;

/// Selects the engine that answers a query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    #[default]
    AStar,
    Dijkstra,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::AStar => write!(f, "astar"),
            Algorithm::Dijkstra => write!(f, "dijkstra"),
        }
    }
}

/// Returned when an algorithm name is not recognised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseAlgorithmError(pub String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown pathfinding algorithm '{}'", self.0)
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "astar" | "a*" => Ok(Algorithm::AStar),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            _ => Err(ParseAlgorithmError(s.to_owned())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PathfinderConfig {
    /// Initial diagonal policy of the Dijkstra adjacency graph.
    pub allow_diagonals: bool,
}

/// Entry point for callers: owns the grid and the Dijkstra graph built from it, and dispatches
/// queries by [Algorithm]. A* takes the diagonal policy per query, while Dijkstra uses the
/// policy its graph was last built with.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    grid: TileGrid,
    dijkstra: DijkstraSolver,
}

impl Pathfinder {
    pub fn new(grid: TileGrid) -> Pathfinder {
        Pathfinder::with_config(grid, PathfinderConfig::default())
    }

    pub fn with_config(grid: TileGrid, config: PathfinderConfig) -> Pathfinder {
        info!(
            "Creating pathfinder for {}x{} grid ({:?} corner cutting, diagonals: {})",
            grid.width(),
            grid.height(),
            grid.corner_cutting(),
            config.allow_diagonals
        );
        let dijkstra = DijkstraSolver::with_diagonals(&grid, config.allow_diagonals);
        Pathfinder { grid, dijkstra }
    }

    /// Pathfinder over the 10x10 demo world.
    pub fn demo() -> Pathfinder {
        Pathfinder::new(TileGrid::demo())
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Diagonal policy of the Dijkstra graph.
    pub fn diagonal_policy(&self) -> bool {
        self.dijkstra.allow_diagonals()
    }

    /// A target is valid when it lies on the grid and is walkable.
    pub fn is_valid_target(&self, index: usize) -> bool {
        self.grid.is_walkable(index)
    }

    /// Rebuilds the Dijkstra graph if the policy changes. Has no effect on A*.
    pub fn set_diagonal_policy(&mut self, allow_diagonals: bool) {
        if self.dijkstra.allow_diagonals() == allow_diagonals {
            return;
        }
        debug!("Diagonal policy changed to {}, rebuilding graph", allow_diagonals);
        self.dijkstra.rebuild(&self.grid, allow_diagonals);
    }

    /// Shortest path from `start` to `target`, or the reason there is none.
    pub fn try_find_path(
        &self,
        start: usize,
        target: usize,
        algorithm: Algorithm,
        allow_diagonals: bool,
    ) -> Result<PathResult, PathError> {
        debug!(
            "Finding path from {} to {} with {} (diagonals: {})",
            start, target, algorithm, allow_diagonals
        );
        match algorithm {
            Algorithm::AStar => {
                AstarSolver::new(allow_diagonals).try_find_path(&self.grid, start, target)
            }
            Algorithm::Dijkstra => {
                if allow_diagonals != self.dijkstra.allow_diagonals() {
                    debug!(
                        "Dijkstra graph was built with diagonals: {}, ignoring requested {}",
                        self.dijkstra.allow_diagonals(),
                        allow_diagonals
                    );
                }
                self.dijkstra.try_find_path(&self.grid, start, target)
            }
        }
    }

    /// Shortest path from `start` to `target`, empty when there is none.
    pub fn find_path(
        &self,
        start: usize,
        target: usize,
        algorithm: Algorithm,
        allow_diagonals: bool,
    ) -> PathResult {
        let timer = Instant::now();
        self.try_find_path(start, target, algorithm, allow_diagonals)
            .unwrap_or_else(|e| {
                debug!("No path: {}", e);
                PathResult::empty(timer.elapsed())
            })
    }

    /// Cost of walking `path` from `start` in [crate::C] units per straight step.
    pub fn path_cost(&self, start: usize, path: &[usize]) -> i32 {
        // Diagonal distance also prices straight steps correctly.
        AstarSolver::new(true).get_path_cost(&self.grid, start, path)
    }
}
