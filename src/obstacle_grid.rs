use crate::error::{Error, Result};
use core::fmt;
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Axis-aligned rectangle describing the single obstacle. `(x, y)` is the top-left cell,
/// `width` counts columns and `height` counts rows. The fields are signed so that
/// malformed input can be represented and rejected by [ObstacleGrid::build].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObstacleRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl ObstacleRect {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> ObstacleRect {
        ObstacleRect {
            x,
            y,
            width,
            height,
        }
    }
    /// Whether the rectangle has positive extent and lies entirely within a `size` x `size` grid.
    pub fn fits(&self, size: usize) -> bool {
        let size = i64::try_from(size).unwrap_or(i64::MAX);
        // Offsets are compared against the room left after the origin, so no sum can overflow.
        self.x >= 0
            && self.y >= 0
            && self.width > 0
            && self.height > 0
            && self.x <= size
            && self.y <= size
            && self.width <= size - self.x
            && self.height <= size - self.y
    }
    pub fn contains(&self, point: &Point) -> bool {
        let within = |p: i64, origin: i64, extent: i64| {
            p.checked_sub(origin)
                .map_or(false, |offset| offset >= 0 && offset < extent)
        };
        within(point.x as i64, self.x, self.width) && within(point.y as i64, self.y, self.height)
    }
}

/// Square occupancy map holding exactly one rectangular obstacle. Cells are addressed by
/// [Point] where `x` is the column and `y` is the row, with `(0, 0)` in the top-left corner.
/// The grid is immutable once built; connected components of the passable cells are
/// computed up front so reachability can be answered without searching.
#[derive(Clone, Debug)]
pub struct ObstacleGrid {
    grid: BoolGrid,
    size: usize,
    obstacle: ObstacleRect,
    components: UnionFind<usize>,
}

impl ObstacleGrid {
    /// Builds a `size` x `size` grid with `obstacle` marked as blocked. Fails with
    /// [Error::InvalidObstacle] if the origin is negative, the extent is not positive or the
    /// rectangle reaches past the grid.
    pub fn build(size: usize, obstacle: ObstacleRect) -> Result<ObstacleGrid> {
        if !obstacle.fits(size) {
            return Err(Error::InvalidObstacle {
                x: obstacle.x,
                y: obstacle.y,
                width: obstacle.width,
                height: obstacle.height,
                size,
            });
        }
        let mut grid = BoolGrid::new(size, size, false);
        for y in obstacle.y..obstacle.y + obstacle.height {
            for x in obstacle.x..obstacle.x + obstacle.width {
                grid.set(x as usize, y as usize, true);
            }
        }
        let mut obstacle_grid = ObstacleGrid {
            grid,
            size,
            obstacle,
            components: UnionFind::new(size * size),
        };
        obstacle_grid.generate_components();
        info!(
            "Built {}x{} grid with obstacle at ({}, {}) of size {}x{}",
            size, size, obstacle.x, obstacle.y, obstacle.width, obstacle.height
        );
        Ok(obstacle_grid)
    }
    pub fn size(&self) -> usize {
        self.size
    }
    pub fn obstacle(&self) -> ObstacleRect {
        self.obstacle
    }
    pub fn in_bounds(&self, point: &Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.size
            && (point.y as usize) < self.size
    }
    /// Out-of-bounds cells count as blocked.
    pub fn is_blocked(&self, point: &Point) -> bool {
        !self.in_bounds(point) || self.grid.get(point.x as usize, point.y as usize)
    }
    pub fn can_move_to(&self, point: &Point) -> bool {
        !self.is_blocked(point)
    }
    /// Fails with [Error::BlockedEndpoint] if `point` cannot be used as a start or goal.
    pub fn ensure_passable(&self, point: &Point) -> Result<()> {
        if self.is_blocked(point) {
            Err(Error::BlockedEndpoint(*point))
        } else {
            Ok(())
        }
    }
    /// The passable 4-neighbours of `point`, always in the order up, down, left, right.
    /// The search relies on this order for deterministic tie-breaking.
    pub fn neighbors(&self, point: &Point) -> SmallVec<[Point; 4]> {
        [
            Point::new(point.x, point.y - 1),
            Point::new(point.x, point.y + 1),
            Point::new(point.x - 1, point.y),
            Point::new(point.x + 1, point.y),
        ]
        .into_iter()
        .filter(|p| self.can_move_to(p))
        .collect()
    }
    pub(crate) fn ix(&self, point: &Point) -> usize {
        point.y as usize * self.size + point.x as usize
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.ix(point))
    }
    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }
    /// Checks if start and goal are not on the same component. Blocked or out-of-bounds
    /// endpoints are unreachable unless they are the same cell.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if !self.in_bounds(start) || !self.in_bounds(goal) {
            return true;
        }
        if start == goal {
            return false;
        }
        if self.is_blocked(start) || self.is_blocked(goal) {
            return true;
        }
        !self.components.equiv(self.ix(start), self.ix(goal))
    }

    /// Links up every passable cell with its passable right and lower neighbour.
    fn generate_components(&mut self) {
        self.components = UnionFind::new(self.size * self.size);
        for y in 0..self.size as i32 {
            for x in 0..self.size as i32 {
                let point = Point::new(x, y);
                if self.is_blocked(&point) {
                    continue;
                }
                let parent_ix = self.ix(&point);
                for p in [Point::new(x + 1, y), Point::new(x, y + 1)] {
                    if self.can_move_to(&p) {
                        let ix = self.ix(&p);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for ObstacleGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.size {
            let row = (0..self.size)
                .map(|x| if self.grid.get(x, y) { "#" } else { "." })
                .collect::<Vec<_>>();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
