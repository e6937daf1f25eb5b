use tile_pathfinding::{Algorithm, Pathfinder};

// Walks the demo world from the top left corner to a few targets with both algorithms.
// Trees are marked with #, the path with *.
//
// Nodes have a 4-neighborhood first, then an 8-neighborhood after the diagonal policy is switched.

fn print_path(pathfinder: &Pathfinder, start: usize, path: &[usize]) {
    let grid = pathfinder.grid();
    for y in 0..grid.height() as i32 {
        let row = (0..grid.width() as i32)
            .map(|x| {
                let ix = x as usize + y as usize * grid.width();
                if ix == start {
                    'S'
                } else if path.contains(&ix) {
                    '*'
                } else if grid.is_walkable(ix) {
                    '.'
                } else {
                    '#'
                }
            })
            .collect::<String>();
        println!("{}", row);
    }
}

fn main() {
    let mut pathfinder = Pathfinder::demo();
    println!("{}", pathfinder.grid());
    let start = 0;
    for allow_diagonals in [false, true] {
        pathfinder.set_diagonal_policy(allow_diagonals);
        for target in [3, 9, 99] {
            if !pathfinder.is_valid_target(target) {
                println!("{} is not a valid target\n", target);
                continue;
            }
            for algorithm in [Algorithm::AStar, Algorithm::Dijkstra] {
                match pathfinder.try_find_path(start, target, algorithm, allow_diagonals) {
                    Ok(result) => {
                        println!(
                            "{} to {} with {} (diagonals: {}) in {:?}: {:?}",
                            start, target, algorithm, allow_diagonals, result.duration, result.path
                        );
                        print_path(&pathfinder, start, &result.path);
                    }
                    Err(e) => println!("{} (diagonals: {})", e, allow_diagonals),
                }
                println!();
            }
        }
    }
}
