use tile_pathfinding::{Algorithm, CornerCutting, PathError, Pathfinder, TileGrid};

const ALGORITHMS: [Algorithm; 2] = [Algorithm::AStar, Algorithm::Dijkstra];

/// Cell 9 in the top right corner is walled in by the trees at 8 and 19.
#[test]
fn top_right_corner_is_enclosed() {
    let pathfinder = Pathfinder::demo();
    assert!(pathfinder.is_valid_target(9));
    assert!(!pathfinder.is_valid_target(8));
    assert!(!pathfinder.is_valid_target(19));
    for algorithm in ALGORITHMS {
        for diagonal in [false, true] {
            let result = pathfinder.find_path(0, 9, algorithm, diagonal);
            assert!(result.is_empty());
        }
        assert_eq!(
            pathfinder.try_find_path(0, 9, algorithm, false),
            Err(PathError::Unreachable {
                start: 0,
                target: 9
            })
        );
    }
}

#[test]
fn tree_is_not_a_target() {
    let pathfinder = Pathfinder::demo();
    assert!(!pathfinder.is_valid_target(3));
    for algorithm in ALGORITHMS {
        for diagonal in [false, true] {
            assert!(pathfinder.find_path(0, 3, algorithm, diagonal).is_empty());
            assert_eq!(
                pathfinder.try_find_path(0, 3, algorithm, diagonal),
                Err(PathError::BlockedTarget(3))
            );
        }
    }
}

#[test]
fn squeezing_past_the_corner() {
    let grid = TileGrid::demo().with_corner_cutting(CornerCutting::Always);
    let mut pathfinder = Pathfinder::new(grid);
    pathfinder.set_diagonal_policy(true);
    for algorithm in ALGORITHMS {
        let result = pathfinder.find_path(0, 9, algorithm, true);
        assert!(!result.is_empty());
        assert_eq!(result.path.last(), Some(&9));
        assert!(!result.path.contains(&3));
        // The only way in is the diagonal step from 18.
        assert_eq!(result.path[result.len() - 2], 18);
    }
    assert!(pathfinder.find_path(0, 9, Algorithm::AStar, false).is_empty());
}

#[test]
fn walk_around_the_first_tree() {
    let pathfinder = Pathfinder::demo();
    for algorithm in ALGORITHMS {
        let result = pathfinder.find_path(0, 4, algorithm, false);
        // 0 -> 1 -> 2 -> 12 -> 13 -> 14 -> 4
        assert_eq!(result.len(), 6);
        assert_eq!(result.path.last(), Some(&4));
        assert!(!result.path.contains(&3));
        assert!(!result.path.contains(&0));
    }
    let astar = pathfinder.find_path(0, 4, Algorithm::AStar, false);
    let dijkstra = pathfinder.find_path(0, 4, Algorithm::Dijkstra, false);
    assert_eq!(
        pathfinder.path_cost(0, &astar.path),
        pathfinder.path_cost(0, &dijkstra.path)
    );
}

#[test]
fn diagonals_shorten_routes() {
    let mut pathfinder = Pathfinder::demo();
    let straight = pathfinder.find_path(0, 99, Algorithm::Dijkstra, false);
    pathfinder.set_diagonal_policy(true);
    let diagonal = pathfinder.find_path(0, 99, Algorithm::Dijkstra, true);
    assert!(!straight.is_empty());
    assert!(!diagonal.is_empty());
    assert!(diagonal.len() < straight.len());
    assert!(pathfinder.path_cost(0, &diagonal.path) < pathfinder.path_cost(0, &straight.path));
    let astar = pathfinder.find_path(0, 99, Algorithm::AStar, true);
    assert_eq!(
        pathfinder.path_cost(0, &astar.path),
        pathfinder.path_cost(0, &diagonal.path)
    );
}
