//! Error types for grid construction, input collection and rendering.
use grid_util::point::Point;
use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a grid, reading input or writing output.
///
/// An unreachable goal is not an error: [search](crate::solver::search) returns an empty path.
#[derive(Debug, Error)]
pub enum Error {
    /// The obstacle rectangle does not fit inside the grid or has a non-positive extent.
    #[error(
        "invalid obstacle at ({x}, {y}) with size {width}x{height}: must lie within 0..{size} and have positive width and height"
    )]
    InvalidObstacle {
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        size: usize,
    },

    /// A coordinate was not an integer or was out of range.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// The start or goal lies on the obstacle.
    #[error("endpoint {0} lies on the obstacle")]
    BlockedEndpoint(Point),

    /// A `size` x `size` grid drawn with `cell_pixels` per cell is wider than an image can be.
    #[error("a {size}x{size} grid at {cell_pixels} pixels per cell is too large to render")]
    ImageTooLarge { size: usize, cell_pixels: u32 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid coordinate error.
    #[must_use]
    pub fn invalid_coordinate(details: impl Into<String>) -> Self {
        Self::InvalidCoordinate(details.into())
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(details: impl Into<String>) -> Self {
        Self::Config(details.into())
    }
}
