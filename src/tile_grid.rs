use crate::{C, D, N_SMALLVEC_SIZE};
use core::fmt;
use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Offsets in the fixed enumeration order N, S, E, W. The y axis points down.
const CARDINAL_OFFSETS: [(i32, i32); 4] = [(0, -1), (0, 1), (1, 0), (-1, 0)];
/// Offsets in the fixed enumeration order NE, SE, SW, NW.
const DIAGONAL_OFFSETS: [(i32, i32); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];

/// The fixed 10x10 layout of the demo world, `.` is grass and `T` is a tree.
pub const DEMO_LAYOUT: &str = "\
...T.TT.T.
.T.....T.T
....T....T
...T.TT...
..........
.T........
.......T.T
..T.T.....
........T.
TT...T....";

/// Kind of tile a cell holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Grass,
    Tree,
}

impl Tile {
    pub fn is_walkable(self) -> bool {
        matches!(self, Tile::Grass)
    }

    /// Parses the single character notation used by [TileGrid::parse].
    pub fn from_char(c: char) -> Option<Tile> {
        match c {
            '.' => Some(Tile::Grass),
            '#' | 'T' => Some(Tile::Tree),
            _ => None,
        }
    }
}

/// Determines when a diagonal step past blocked cells is allowed. The two cells flanking a
/// diagonal step are the orthogonal neighbours shared by its origin and destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CornerCutting {
    /// Both flanking cells must be walkable.
    Never,
    /// At least one flanking cell must be walkable, so no squeezing between two blocked cells.
    #[default]
    OneSide,
    /// Only the origin and destination need to be walkable.
    Always,
}

/// Reasons a [TileGrid] cannot be constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// Width or height is zero.
    Empty,
    /// The number of cells does not match `width * height`.
    LengthMismatch { expected: usize, actual: usize },
    /// A row of a textual layout has a different length than the first row.
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// A character of a textual layout is not a known tile.
    UnknownTile { ch: char, row: usize, col: usize },
    /// A dimension exceeds [i32::MAX] or the cell count overflows [usize].
    TooLarge { width: usize, height: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::Empty => write!(f, "grid must have a non-zero width and height"),
            GridError::LengthMismatch { expected, actual } => {
                write!(f, "expected {} cells but got {}", expected, actual)
            }
            GridError::RaggedRow {
                row,
                expected,
                actual,
            } => write!(f, "row {} has {} tiles, expected {}", row, actual, expected),
            GridError::UnknownTile { ch, row, col } => {
                write!(f, "unknown tile '{}' at row {}, column {}", ch, row, col)
            }
            GridError::TooLarge { width, height } => {
                write!(f, "{}x{} grid is too large", width, height)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Number of cells of a `width` by `height` grid whose coordinates fit in [i32].
fn cell_count(width: usize, height: usize) -> Result<usize, GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::Empty);
    }
    let too_large = GridError::TooLarge { width, height };
    if width > i32::MAX as usize || height > i32::MAX as usize {
        return Err(too_large);
    }
    width.checked_mul(height).ok_or(too_large)
}

/// [TileGrid] is the immutable walkability model both search engines share. The raw [bool]
/// values in the [BoolGrid] determine whether a cell is blocked ([true]) or walkable ([false]).
/// Connected components are kept in one [UnionFind] per adjacency mode so that unreachable
/// queries can be rejected without searching.
#[derive(Clone, Debug)]
pub struct TileGrid {
    grid: BoolGrid,
    width: usize,
    height: usize,
    corner_cutting: CornerCutting,
    components: UnionFind<usize>,
    diagonal_components: UnionFind<usize>,
}

impl TileGrid {
    /// Builds a grid from row-major walkability flags.
    pub fn from_walkable(
        width: usize,
        height: usize,
        walkable: Vec<bool>,
    ) -> Result<TileGrid, GridError> {
        let len = cell_count(width, height)?;
        if walkable.len() != len {
            return Err(GridError::LengthMismatch {
                expected: len,
                actual: walkable.len(),
            });
        }
        let mut grid = BoolGrid::new(width, height, false);
        for (ix, open) in walkable.into_iter().enumerate() {
            grid.set((ix % width) as i32, (ix / width) as i32, !open);
        }
        let mut tile_grid = TileGrid {
            grid,
            width,
            height,
            corner_cutting: CornerCutting::default(),
            components: UnionFind::new(0),
            diagonal_components: UnionFind::new(0),
        };
        tile_grid.generate_components();
        Ok(tile_grid)
    }

    /// Builds a grid from row-major tiles.
    pub fn from_tiles(
        width: usize,
        height: usize,
        tiles: Vec<Tile>,
    ) -> Result<TileGrid, GridError> {
        let walkable = tiles.into_iter().map(Tile::is_walkable).collect();
        TileGrid::from_walkable(width, height, walkable)
    }

    /// Parses a layout with one line per row, `.` for walkable cells and `#` or `T` for blocked
    /// ones. Blank lines and surrounding whitespace are ignored.
    pub fn parse(layout: &str) -> Result<TileGrid, GridError> {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut tiles = Vec::with_capacity(cell_count(width, rows.len())?);
        for (row, line) in rows.iter().enumerate() {
            let count = line.chars().count();
            if count != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    actual: count,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let tile = Tile::from_char(ch).ok_or(GridError::UnknownTile { ch, row, col })?;
                tiles.push(tile);
            }
        }
        TileGrid::from_tiles(width, rows.len(), tiles)
    }

    /// The 10x10 world of the demo, see [DEMO_LAYOUT].
    pub fn demo() -> TileGrid {
        match TileGrid::parse(DEMO_LAYOUT) {
            Ok(grid) => grid,
            Err(e) => unreachable!("demo layout is well formed: {}", e),
        }
    }

    /// Returns the grid with a different corner cutting policy, regenerating the diagonal
    /// components accordingly.
    pub fn with_corner_cutting(mut self, corner_cutting: CornerCutting) -> TileGrid {
        if self.corner_cutting != corner_cutting {
            self.corner_cutting = corner_cutting;
            self.generate_components();
        }
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    /// Number of cells, one past the largest valid index.
    pub fn len(&self) -> usize {
        self.width * self.height
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn corner_cutting(&self) -> CornerCutting {
        self.corner_cutting
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Row-major index of the cell at `(x, y)`, [None] when out of bounds.
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y).then(|| x as usize + y as usize * self.width)
    }

    /// Coordinates of the cell with the given index, [None] when out of range.
    pub fn point(&self, index: usize) -> Option<Point> {
        (index < self.len())
            .then(|| Point::new((index % self.width) as i32, (index / self.width) as i32))
    }

    fn walkable_at(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && !self.grid.get(x, y)
    }

    /// Out of range indices are never walkable.
    pub fn is_walkable(&self, index: usize) -> bool {
        self.point(index).map_or(false, |p| self.walkable_at(p.x, p.y))
    }

    /// Checks a single step from `start` to the adjacent `pos`, applying the corner cutting
    /// policy to diagonal steps.
    fn can_move_to(&self, pos: Point, start: Point) -> bool {
        debug_assert!((start.x - pos.x).abs() <= 1 && (start.y - pos.y).abs() <= 1);
        if !self.walkable_at(pos.x, pos.y) {
            return false;
        }
        if pos.x == start.x || pos.y == start.y {
            return true;
        }
        let flank_a = self.walkable_at(start.x, pos.y);
        let flank_b = self.walkable_at(pos.x, start.y);
        match self.corner_cutting {
            CornerCutting::Never => flank_a && flank_b,
            CornerCutting::OneSide => flank_a || flank_b,
            CornerCutting::Always => true,
        }
    }

    /// Walkable neighbours of a walkable cell paired with the step cost, always enumerated in the
    /// order N, S, E, W followed by NE, SE, SW, NW when diagonals are allowed.
    pub fn neighbours(
        &self,
        index: usize,
        allow_diagonals: bool,
    ) -> SmallVec<[(usize, i32); N_SMALLVEC_SIZE]> {
        let mut result = SmallVec::new();
        let Some(p) = self.point(index) else {
            return result;
        };
        if !self.walkable_at(p.x, p.y) {
            return result;
        }
        let diagonals: &[(i32, i32)] = if allow_diagonals {
            &DIAGONAL_OFFSETS
        } else {
            &[]
        };
        for &(dx, dy) in CARDINAL_OFFSETS.iter().chain(diagonals) {
            let n = Point::new(p.x + dx, p.y + dy);
            if self.can_move_to(n, p) {
                let cost = if dx != 0 && dy != 0 { D } else { C };
                result.push((n.x as usize + n.y as usize * self.width, cost));
            }
        }
        result
    }

    fn components_for(&self, allow_diagonals: bool) -> &UnionFind<usize> {
        if allow_diagonals {
            &self.diagonal_components
        } else {
            &self.components
        }
    }

    /// Retrieves the component id a given cell belongs to.
    pub fn get_component(&self, index: usize, allow_diagonals: bool) -> Option<usize> {
        (index < self.len()).then(|| self.components_for(allow_diagonals).find(index))
    }

    /// Checks if start and target are walkable and on the same component.
    pub fn reachable(&self, start: usize, target: usize, allow_diagonals: bool) -> bool {
        self.is_walkable(start)
            && self.is_walkable(target)
            && self.components_for(allow_diagonals).equiv(start, target)
    }

    /// Checks if start and target are not on the same component.
    pub fn unreachable(&self, start: usize, target: usize, allow_diagonals: bool) -> bool {
        !self.reachable(start, target, allow_diagonals)
    }

    /// Generates new [UnionFind] structures for both adjacency modes and links up walkable
    /// neighbours to the same components.
    fn generate_components(&mut self) {
        let n = self.len();
        self.components = UnionFind::new(n);
        self.diagonal_components = UnionFind::new(n);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if !self.walkable_at(x, y) {
                    continue;
                }
                let point = Point::new(x, y);
                let parent_ix = x as usize + y as usize * self.width;
                // Looking forward (E, S, SE, SW) is enough since moves are symmetric.
                for (dx, dy, diagonal) in
                    [(1, 0, false), (0, 1, false), (1, 1, true), (-1, 1, true)]
                {
                    let n = Point::new(x + dx, y + dy);
                    if !self.can_move_to(n, point) {
                        continue;
                    }
                    let ix = n.x as usize + n.y as usize * self.width;
                    if !diagonal {
                        self.components.union(parent_ix, ix);
                    }
                    self.diagonal_components.union(parent_ix, ix);
                }
            }
        }
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height as i32 {
            let row = (0..self.width as i32)
                .map(|x| if self.walkable_at(x, y) { '.' } else { '#' })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
