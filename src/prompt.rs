//! Console input for the obstacle and the two endpoints. Every prompt repeats until it
//! receives well-formed input; running out of input is reported as an error rather than
//! looping forever.
use crate::error::{Error, Result};
use crate::obstacle_grid::{ObstacleGrid, ObstacleRect};
use grid_util::point::Point;
use log::debug;
use std::io::{self, BufRead, Write};

/// Reads answers from `input` and writes prompts and complaints to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Prompter<R, W> {
        Prompter { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Writes a line that is not a prompt, such as a section header.
    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    fn read_line(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            )));
        }
        Ok(line.trim().to_owned())
    }

    /// Asks for an integer until one is given.
    pub fn read_int(&mut self, label: &str) -> Result<i64> {
        loop {
            let line = self.read_line(label)?;
            match parse_int(&line) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    debug!("{}", e);
                    writeln!(self.output, "Please enter a valid integer!")?;
                }
            }
        }
    }

    /// Asks for an `(x, y)` cell until both coordinates lie in `0..size`. `x` is the column
    /// and `y` the row, matching [Point].
    pub fn prompt_for_cell(&mut self, size: usize, label: &str) -> Result<Point> {
        let max = size as i64 - 1;
        loop {
            let x = self.read_int(&format!("{} x coordinate (0-{}): ", label, max))?;
            let y = self.read_int(&format!("{} y coordinate (0-{}): ", label, max))?;
            match cell_in_bounds(x, y, size) {
                Ok(point) => return Ok(point),
                Err(e) => {
                    debug!("{}", e);
                    writeln!(
                        self.output,
                        "Coordinates must be between 0 and {}, please try again!",
                        max
                    )?;
                }
            }
        }
    }

    /// Asks for the obstacle rectangle until it fits in a `size` x `size` grid, and builds
    /// that grid.
    pub fn prompt_for_obstacle(&mut self, size: usize) -> Result<ObstacleGrid> {
        let max = size as i64 - 1;
        loop {
            writeln!(
                self.output,
                "Please enter the starting coordinates and size of the obstacle:"
            )?;
            let x = self.read_int(&format!("Obstacle starting x coordinate (0-{}): ", max))?;
            let y = self.read_int(&format!("Obstacle starting y coordinate (0-{}): ", max))?;
            let width = self.read_int("Obstacle width (1-remaining space): ")?;
            let height = self.read_int("Obstacle height (1-remaining space): ")?;
            match ObstacleGrid::build(size, ObstacleRect::new(x, y, width, height)) {
                Ok(grid) => return Ok(grid),
                Err(e @ Error::InvalidObstacle { .. }) => {
                    writeln!(self.output, "{}", e)?;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn parse_int(text: &str) -> Result<i64> {
    text.parse::<i64>()
        .map_err(|_| Error::invalid_coordinate(format!("{:?} is not an integer", text)))
}

fn cell_in_bounds(x: i64, y: i64, size: usize) -> Result<Point> {
    let range = 0..size as i64;
    if range.contains(&x) && range.contains(&y) {
        Ok(Point::new(x as i32, y as i32))
    } else {
        Err(Error::invalid_coordinate(format!(
            "({}, {}) lies outside 0..{}",
            x, y, size
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(prompter: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.into_inner().1).unwrap()
    }

    #[test]
    fn reads_int_after_garbage() {
        let mut p = prompter("abc\n 1.5\n  42 \n");
        assert_eq!(p.read_int("n: ").unwrap(), 42);
        let out = output(p);
        assert_eq!(out.matches("Please enter a valid integer!").count(), 2);
    }

    #[test]
    fn cell_reprompts_until_in_bounds() {
        let mut p = prompter("10\n0\n-1\n3\n2\n3\n");
        let cell = p.prompt_for_cell(5, "Start").unwrap();
        assert_eq!(cell, Point::new(2, 3));
        let out = output(p);
        assert_eq!(
            out.matches("Coordinates must be between 0 and 4").count(),
            2
        );
        assert!(out.contains("Start x coordinate (0-4): "));
    }

    #[test]
    fn obstacle_reprompts_until_valid() {
        let mut p = prompter("3\n3\n5\n1\n1\n1\n3\n1\n");
        let grid = p.prompt_for_obstacle(5).unwrap();
        assert_eq!(grid.obstacle(), ObstacleRect::new(1, 1, 3, 1));
        let out = output(p);
        assert_eq!(
            out.matches("Please enter the starting coordinates").count(),
            2
        );
        assert!(out.contains("invalid obstacle"));
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut p = prompter("7\n");
        let result = p.prompt_for_cell(10, "Goal");
        assert!(matches!(result, Err(Error::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof));
    }
}
