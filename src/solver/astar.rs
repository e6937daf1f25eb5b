use smallvec::SmallVec;

use crate::{
    solver::{grid_distance, GridSolver},
    tile_grid::TileGrid,
    N_SMALLVEC_SIZE,
};

/// A* over the neighbours of the [TileGrid], expanded on the fly. The diagonal policy is part
/// of the solver, so a solver is cheap to create per query.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver {
    pub allow_diagonal_move: bool,
}

impl AstarSolver {
    pub fn new(allow_diagonal_move: bool) -> AstarSolver {
        AstarSolver {
            allow_diagonal_move,
        }
    }
}

impl GridSolver for AstarSolver {
    type Successors = SmallVec<[(usize, i32); N_SMALLVEC_SIZE]>;

    fn allow_diagonals(&self) -> bool {
        self.allow_diagonal_move
    }

    fn successors(&self, grid: &TileGrid, node: usize) -> Self::Successors {
        grid.neighbours(node, self.allow_diagonal_move)
    }

    /// Manhattan distance on a 4-grid, octile distance on an 8-grid. Both equal the step costs of
    /// an unobstructed route, so the heuristic never overestimates.
    fn heuristic(&self, grid: &TileGrid, from: usize, to: usize) -> i32 {
        grid_distance(grid, from, to, self.allow_diagonal_move)
    }
}
