use crate::dijkstra::dijkstra;
use crate::obstacle_grid::ObstacleGrid;
use grid_util::point::Point;
use log::info;

/// Ordered cells from start to goal inclusive. Empty when the goal cannot be reached.
pub type Path = Vec<Point>;

/// Computes a shortest 4-connected path from `start` to `goal` on `grid`.
///
/// Every move costs 1, so this is equivalent to a breadth-first search; among equally short
/// paths the one discovered first (neighbours are expanded up, down, left, right) is returned.
/// The caller is responsible for passing in-bounds, unblocked endpoints.
pub fn search(grid: &ObstacleGrid, start: Point, goal: Point) -> Path {
    match dijkstra(
        &start,
        |point| grid.neighbors(point).into_iter().map(|p| (p, 1u32)),
        |point| *point == goal,
    ) {
        Some((path, cost)) => {
            info!("Found path from {} to {} of length {}", start, goal, cost);
            path
        }
        None => {
            info!("{} is not reachable from {}", goal, start);
            Path::new()
        }
    }
}

/// Number of moves in a path, which is one less than the number of cells.
pub fn path_length(path: &[Point]) -> usize {
    path.len().saturating_sub(1)
}

/// Checks that `path` runs from `start` to `goal`, only takes 4-connected steps and never
/// enters a blocked cell.
pub fn is_valid_path(grid: &ObstacleGrid, path: &[Point], start: Point, goal: Point) -> bool {
    match (path.first(), path.last()) {
        (Some(first), Some(last)) if *first == start && *last == goal => {
            path.iter().all(|p| grid.can_move_to(p))
                && path
                    .windows(2)
                    .all(|step| step[0].manhattan_distance(&step[1]) == 1)
        }
        _ => false,
    }
}
