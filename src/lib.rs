//! # grid_dijkstra
//!
//! Shortest paths on a square grid holding a single rectangular obstacle. The search is
//! [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) over
//! 4-connected cells with unit move costs, which makes it equivalent to a breadth-first
//! search. Connected components of the free cells are computed when the grid is built, so
//! reachability can be checked without searching.
//!
//! Cells are [Point]s with `x` as the column and `y` as the row, `(0, 0)` being the top-left
//! corner. The same convention is used for prompted input and for every renderer.
//!
//! ```
//! use grid_dijkstra::{search, ObstacleGrid, ObstacleRect, Point};
//!
//! let grid = ObstacleGrid::build(5, ObstacleRect::new(1, 1, 3, 1)).unwrap();
//! let path = search(&grid, Point::new(0, 0), Point::new(4, 4));
//! assert_eq!(path.len(), 9);
//! ```
pub mod config;
pub mod dijkstra;
pub mod error;
pub mod obstacle_grid;
pub mod prompt;
pub mod render;
pub mod solver;

pub use error::{Error, Result};
pub use grid_util::point::Point;
pub use obstacle_grid::{ObstacleGrid, ObstacleRect};
pub use solver::{is_valid_path, path_length, search, Path};
