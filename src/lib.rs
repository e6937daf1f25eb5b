//! # tile_pathfinding
//!
//! Shortest paths between the cells of a fixed-size tile grid. Two interchangeable engines are
//! provided: [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) guided by an admissible
//! grid-distance heuristic, and
//! [Dijkstra](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) over a precomputed adjacency
//! graph that is rebuilt whenever the diagonal movement policy changes. Movement is either
//! 4-directional or 8-directional. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists.
//!
//! Cells are addressed by their row-major index `x + y * width`. Paths are returned as the
//! ordered cell indices to visit, excluding the start cell and including the target.
//!
//! ```
//! use tile_pathfinding::{Algorithm, Pathfinder, TileGrid};
//!
//! let grid = TileGrid::parse("...\n.#.\n...").unwrap();
//! let pathfinder = Pathfinder::new(grid);
//! let result = pathfinder.find_path(0, 8, Algorithm::AStar, false);
//! assert_eq!(result.path.len(), 4);
//! assert_eq!(result.path.last(), Some(&8));
//! ```
pub mod pathfinder;
mod search;
pub mod solver;
pub mod tile_grid;

pub use pathfinder::{Algorithm, ParseAlgorithmError, Pathfinder, PathfinderConfig};
pub use solver::{
    astar::AstarSolver, dijkstra::DijkstraSolver, GridSolver, PathError, PathResult,
};
pub use tile_grid::{CornerCutting, GridError, Tile, TileGrid};

/// Cost of a cardinal (straight) step.
pub const C: i32 = 99;
/// Cost of a diagonal step, 99 * sqrt(2) rounded.
pub const D: i32 = 140;
/// Helper constant for the octile distance formula.
pub const E: i32 = 2 * C - D;

/// Inline capacity of neighbourhood buffers, large enough for a full Moore neighbourhood.
pub const N_SMALLVEC_SIZE: usize = 8;
