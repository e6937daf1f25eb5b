use log::debug;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use smallvec::SmallVec;

use crate::solver::{GridSolver, PathError};
use crate::{tile_grid::TileGrid, N_SMALLVEC_SIZE};

/// Uniform-cost search over an adjacency graph precomputed from a [TileGrid]. Node `i` of the
/// graph is the cell with index `i`. The graph only changes through [rebuild](Self::rebuild),
/// which is needed whenever the diagonal policy changes, and it must be queried with the grid
/// it was built from. Queries on a grid of other dimensions fail with
/// [PathError::GridMismatch].
#[derive(Clone, Debug)]
pub struct DijkstraSolver {
    graph: DiGraph<(), i32>,
    dimensions: (usize, usize),
    allow_diagonal_move: bool,
}

impl DijkstraSolver {
    /// Builds the graph without diagonal edges.
    pub fn new(grid: &TileGrid) -> DijkstraSolver {
        DijkstraSolver::with_diagonals(grid, false)
    }

    pub fn with_diagonals(grid: &TileGrid, allow_diagonal_move: bool) -> DijkstraSolver {
        let mut solver = DijkstraSolver {
            graph: DiGraph::new(),
            dimensions: (0, 0),
            allow_diagonal_move,
        };
        solver.build(grid);
        solver
    }

    /// Clears the graph and constructs it again with the given diagonal policy.
    pub fn rebuild(&mut self, grid: &TileGrid, allow_diagonal_move: bool) {
        self.allow_diagonal_move = allow_diagonal_move;
        self.build(grid);
    }

    fn build(&mut self, grid: &TileGrid) {
        self.graph.clear();
        self.dimensions = (grid.width(), grid.height());
        self.graph.reserve_nodes(grid.len());
        for _ in 0..grid.len() {
            self.graph.add_node(());
        }
        for ix in 0..grid.len() {
            // petgraph yields the outgoing edges of a node newest first, so edges are added in
            // reverse to be walked in the grid's neighbour order.
            for (n, cost) in grid
                .neighbours(ix, self.allow_diagonal_move)
                .into_iter()
                .rev()
            {
                self.graph
                    .add_edge(NodeIndex::new(ix), NodeIndex::new(n), cost);
            }
        }
        debug!(
            "Built adjacency graph with {} nodes and {} edges (diagonals: {})",
            self.graph.node_count(),
            self.graph.edge_count(),
            self.allow_diagonal_move
        );
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of directed edges, two per pair of adjacent walkable cells.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl GridSolver for DijkstraSolver {
    type Successors = SmallVec<[(usize, i32); N_SMALLVEC_SIZE]>;

    fn allow_diagonals(&self) -> bool {
        self.allow_diagonal_move
    }

    fn check_grid(&self, grid: &TileGrid) -> Result<(), PathError> {
        let found = (grid.width(), grid.height());
        if found != self.dimensions {
            return Err(PathError::GridMismatch {
                expected: self.dimensions,
                found,
            });
        }
        Ok(())
    }

    fn successors(&self, _grid: &TileGrid, node: usize) -> Self::Successors {
        if node >= self.graph.node_count() {
            return SmallVec::new();
        }
        self.graph
            .edges(NodeIndex::new(node))
            .map(|e| (e.target().index(), *e.weight()))
            .collect()
    }

    /// No heuristic, which turns the search into plain uniform-cost search.
    fn heuristic(&self, _: &TileGrid, _: usize, _: usize) -> i32 {
        0
    }
}
