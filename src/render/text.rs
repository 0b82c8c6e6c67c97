use super::classify;
use crate::obstacle_grid::ObstacleGrid;
use crate::solver::path_length;
use grid_util::point::Point;
use itertools::Itertools;
use std::io::{self, Write};

pub const LEGEND: &str =
    "Grid and path representation (S=Start, G=Goal, *=Path, #=Obstacle, .=Empty):";

/// Draws the grid as space separated characters, one row per line.
pub fn render_text(grid: &ObstacleGrid, path: &[Point], start: Point, goal: Point) -> String {
    let cells = classify(grid, path, start, goal);
    let size = grid.size().max(1);
    cells
        .chunks(size)
        .map(|row| row.iter().map(|kind| kind.symbol()).join(" "))
        .map(|line| line + "\n")
        .collect()
}

/// Writes the legend, the drawn grid and either the path length or a notice that no path
/// exists.
pub fn write_report<W: Write>(
    out: &mut W,
    grid: &ObstacleGrid,
    path: &[Point],
    start: Point,
    goal: Point,
) -> io::Result<()> {
    writeln!(out, "{}", LEGEND)?;
    write!(out, "{}", render_text(grid, path, start, goal))?;
    if path.is_empty() {
        writeln!(out, "\nNo path found!")
    } else {
        writeln!(out, "\nPath length: {}", path_length(path))
    }
}
