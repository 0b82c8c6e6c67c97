//! Output collaborators: the search result drawn as characters, PNG frames and a GIF.
//!
//! All renderers share the categorical cell scale of [CellKind], computed once by [classify].
pub mod raster;
pub mod text;

use crate::obstacle_grid::ObstacleGrid;
use grid_util::point::Point;

/// Categorical colour scale used by every renderer. The discriminants are the scale values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellKind {
    Empty = 0,
    Obstacle = 1,
    Path = 2,
    Start = 3,
    Goal = 4,
}

impl CellKind {
    pub fn value(self) -> u8 {
        self as u8
    }
    pub fn symbol(self) -> char {
        match self {
            CellKind::Empty => '.',
            CellKind::Obstacle => '#',
            CellKind::Path => '*',
            CellKind::Start => 'S',
            CellKind::Goal => 'G',
        }
    }
    pub fn rgb(self) -> [u8; 3] {
        match self {
            CellKind::Empty => [255, 255, 255],
            CellKind::Obstacle => [40, 40, 40],
            CellKind::Path => [66, 135, 245],
            CellKind::Start => [46, 184, 46],
            CellKind::Goal => [220, 50, 47],
        }
    }
}

/// Row-major category matrix of `grid` with `path` drawn over the obstacle map and the
/// endpoints drawn last, so a start or goal cell is never hidden by the path.
pub fn classify(grid: &ObstacleGrid, path: &[Point], start: Point, goal: Point) -> Vec<CellKind> {
    let size = grid.size();
    let mut cells = Vec::with_capacity(size * size);
    for y in 0..size as i32 {
        for x in 0..size as i32 {
            let kind = if grid.is_blocked(&Point::new(x, y)) {
                CellKind::Obstacle
            } else {
                CellKind::Empty
            };
            cells.push(kind);
        }
    }
    let mut mark = |p: &Point, kind: CellKind| {
        if grid.in_bounds(p) {
            cells[p.y as usize * size + p.x as usize] = kind;
        }
    };
    for p in path {
        mark(p, CellKind::Path);
    }
    mark(&start, CellKind::Start);
    mark(&goal, CellKind::Goal);
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacle_grid::ObstacleRect;

    #[test]
    fn endpoints_override_path() {
        let grid = ObstacleGrid::build(3, ObstacleRect::new(1, 1, 1, 1)).unwrap();
        let start = Point::new(0, 0);
        let goal = Point::new(2, 0);
        let path = vec![start, Point::new(1, 0), goal];
        let cells = classify(&grid, &path, start, goal);
        let values = cells.iter().map(|c| c.value()).collect::<Vec<_>>();
        assert_eq!(values, vec![3, 2, 4, 0, 1, 0, 0, 0, 0]);
    }
}
