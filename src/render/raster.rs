use super::classify;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::obstacle_grid::ObstacleGrid;
use grid_util::point::Point;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame, Rgb, RgbImage};
use log::{info, warn};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub const FINAL_IMAGE_NAME: &str = "final_path.png";
pub const ANIMATION_NAME: &str = "path_animation.gif";

pub fn step_image_name(step: usize) -> String {
    format!("step_{:03}.png", step)
}

/// Edge length in pixels of the image of a `size` x `size` grid, if it fits in a `u32`.
pub fn image_side(size: usize, cell_pixels: u32) -> Option<u32> {
    u32::try_from(size).ok()?.checked_mul(cell_pixels)
}

/// Rasterises grids with every cell drawn as a `cell_pixels` x `cell_pixels` square.
#[derive(Clone, Copy, Debug)]
pub struct RasterRenderer {
    pub cell_pixels: u32,
}

/// Files written by [save_all]. A failed animation is kept apart from the images that were
/// written successfully.
#[derive(Debug)]
pub struct SavedImages {
    pub steps: Vec<PathBuf>,
    pub final_image: PathBuf,
    pub animation: Result<Option<PathBuf>>,
}

impl RasterRenderer {
    pub fn new(cell_pixels: u32) -> RasterRenderer {
        RasterRenderer {
            cell_pixels: cell_pixels.max(1),
        }
    }

    /// Fails with [Error::ImageTooLarge] if the image side does not fit in a `u32`.
    pub fn render_frame(
        &self,
        grid: &ObstacleGrid,
        path: &[Point],
        start: Point,
        goal: Point,
    ) -> Result<RgbImage> {
        let side = image_side(grid.size(), self.cell_pixels).ok_or(Error::ImageTooLarge {
            size: grid.size(),
            cell_pixels: self.cell_pixels,
        })?;
        let cells = classify(grid, path, start, goal);
        let size = grid.size();
        Ok(RgbImage::from_fn(side, side, |px, py| {
            let x = (px / self.cell_pixels) as usize;
            let y = (py / self.cell_pixels) as usize;
            Rgb(cells[y * size + x].rgb())
        }))
    }

    /// One frame per path step: frame `i` shows the first `i + 1` cells of the path.
    pub fn step_frames<'a>(
        &'a self,
        grid: &'a ObstacleGrid,
        path: &'a [Point],
        start: Point,
        goal: Point,
    ) -> impl Iterator<Item = Result<RgbImage>> + 'a {
        (1..=path.len()).map(move |n| self.render_frame(grid, &path[..n], start, goal))
    }

    /// Writes one PNG per path step into `dir` and returns the written files in step order.
    pub fn save_step_images(
        &self,
        dir: &Path,
        grid: &ObstacleGrid,
        path: &[Point],
        start: Point,
        goal: Point,
    ) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(path.len());
        for (step, frame) in self.step_frames(grid, path, start, goal).enumerate() {
            let file = dir.join(step_image_name(step));
            frame?.save(&file)?;
            written.push(file);
        }
        info!("Saved {} step images to {}", written.len(), dir.display());
        Ok(written)
    }

    /// Writes the complete path, or only the obstacle and endpoints if `path` is empty.
    pub fn save_final_image(
        &self,
        dir: &Path,
        grid: &ObstacleGrid,
        path: &[Point],
        start: Point,
        goal: Point,
    ) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let file = dir.join(FINAL_IMAGE_NAME);
        self.render_frame(grid, path, start, goal)?.save(&file)?;
        info!("Saved final image to {}", file.display());
        Ok(file)
    }

    /// Assembles the step frames into an endlessly looping GIF. Returns [None] without
    /// writing anything when there is no path to animate.
    pub fn save_animation(
        &self,
        dir: &Path,
        grid: &ObstacleGrid,
        path: &[Point],
        start: Point,
        goal: Point,
        frame_delay_ms: u32,
    ) -> Result<Option<PathBuf>> {
        if path.is_empty() {
            warn!("Empty path, skipping animation");
            return Ok(None);
        }
        fs::create_dir_all(dir)?;
        let file = dir.join(ANIMATION_NAME);
        let delay = Delay::from_numer_denom_ms(frame_delay_ms, 1);
        let frames = self
            .step_frames(grid, path, start, goal)
            .map(|frame| {
                let rgba = DynamicImage::ImageRgb8(frame?).into_rgba8();
                Ok(Frame::from_parts(rgba, 0, 0, delay))
            })
            .collect::<Result<Vec<_>>>()?;
        let mut encoder = GifEncoder::new(BufWriter::new(File::create(&file)?));
        encoder.set_repeat(Repeat::Infinite)?;
        encoder.encode_frames(frames)?;
        info!(
            "Saved animation with {} frames to {}",
            path.len(),
            file.display()
        );
        Ok(Some(file))
    }
}

/// Writes every image `config` asks for into its output directory. Failing to write a PNG
/// is an error; a failed animation is logged and handed back in [SavedImages::animation]
/// so the PNGs already on disk stay valid.
pub fn save_all(
    config: &Config,
    grid: &ObstacleGrid,
    path: &[Point],
    start: Point,
    goal: Point,
) -> Result<SavedImages> {
    let renderer = RasterRenderer::new(config.render.cell_pixels);
    let dir = config.render.output_dir.as_path();
    let steps = if config.render.save_steps {
        renderer.save_step_images(dir, grid, path, start, goal)?
    } else {
        Vec::new()
    };
    let final_image = renderer.save_final_image(dir, grid, path, start, goal)?;
    let animation = if config.render.animate {
        let delay = config.animation.frame_delay_ms;
        let animation = renderer.save_animation(dir, grid, path, start, goal, delay);
        if let Err(e) = &animation {
            warn!("Animation failed: {}", e);
        }
        animation
    } else {
        Ok(None)
    };
    Ok(SavedImages {
        steps,
        final_image,
        animation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacle_grid::ObstacleRect;
    use crate::render::CellKind;
    use crate::solver::search;
    use std::io::Read;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "grid_dijkstra_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn setup() -> (ObstacleGrid, Vec<Point>, Point, Point) {
        let grid = ObstacleGrid::build(4, ObstacleRect::new(1, 1, 2, 2)).unwrap();
        let start = Point::new(0, 0);
        let goal = Point::new(3, 3);
        let path = search(&grid, start, goal);
        (grid, path, start, goal)
    }

    #[test]
    fn frame_uses_categorical_colours() {
        let (grid, path, start, goal) = setup();
        let renderer = RasterRenderer::new(3);
        let frame = renderer.render_frame(&grid, &path, start, goal).unwrap();
        assert_eq!(frame.dimensions(), (12, 12));
        assert_eq!(frame.get_pixel(1, 1).0, CellKind::Start.rgb());
        assert_eq!(frame.get_pixel(10, 10).0, CellKind::Goal.rgb());
        assert_eq!(frame.get_pixel(4, 4).0, CellKind::Obstacle.rgb());
        // path leaves the start downwards
        assert_eq!(frame.get_pixel(1, 4).0, CellKind::Path.rgb());
        assert_eq!(frame.get_pixel(10, 1).0, CellKind::Empty.rgb());
    }

    #[test]
    fn steps_grow_the_path() {
        let (grid, path, start, goal) = setup();
        let renderer = RasterRenderer::new(1);
        let frames = renderer
            .step_frames(&grid, &path, start, goal)
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(frames.len(), path.len());
        assert_eq!(frames[0].get_pixel(0, 1).0, CellKind::Empty.rgb());
        assert_eq!(frames[1].get_pixel(0, 1).0, CellKind::Path.rgb());
    }

    #[test]
    fn saves_images_and_animation() {
        let (grid, path, start, goal) = setup();
        let dir = scratch_dir("render");
        let renderer = RasterRenderer::new(2);
        let steps = renderer
            .save_step_images(&dir, &grid, &path, start, goal)
            .unwrap();
        assert_eq!(steps.len(), 7);
        assert!(steps[0].ends_with("step_000.png"));
        let final_image = renderer
            .save_final_image(&dir, &grid, &path, start, goal)
            .unwrap();
        let decoded = image::open(&final_image).unwrap().into_rgb8();
        assert_eq!(decoded.dimensions(), (8, 8));

        let gif = renderer
            .save_animation(&dir, &grid, &path, start, goal, 500)
            .unwrap()
            .unwrap();
        let mut header = [0u8; 6];
        File::open(&gif).unwrap().read_exact(&mut header).unwrap();
        assert_eq!(&header, b"GIF89a");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn oversized_frame_is_an_error() {
        let grid = ObstacleGrid::build(100, ObstacleRect::new(0, 0, 1, 1)).unwrap();
        let renderer = RasterRenderer::new(u32::MAX / 10);
        let result = renderer.render_frame(&grid, &[], Point::new(5, 5), Point::new(6, 6));
        assert!(matches!(result, Err(Error::ImageTooLarge { size: 100, .. })));
        assert_eq!(image_side(100, 5), Some(500));
        assert_eq!(image_side(100, u32::MAX), None);
    }

    #[test]
    fn failed_animation_keeps_images() {
        let (grid, path, start, goal) = setup();
        let dir = scratch_dir("failed_animation");
        // a directory in place of the GIF makes creating the file fail
        fs::create_dir_all(dir.join(ANIMATION_NAME)).unwrap();
        let mut config = Config::default();
        config.render.cell_pixels = 1;
        config.render.output_dir = dir.clone();
        let saved = save_all(&config, &grid, &path, start, goal).unwrap();
        assert!(saved.animation.is_err());
        assert_eq!(saved.steps.len(), path.len());
        assert!(saved.steps.iter().all(|file| file.is_file()));
        assert!(saved.final_image.is_file());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn save_all_writes_everything() {
        let (grid, path, start, goal) = setup();
        let dir = scratch_dir("save_all");
        let mut config = Config::default();
        config.render.cell_pixels = 1;
        config.render.output_dir = dir.clone();
        let saved = save_all(&config, &grid, &path, start, goal).unwrap();
        assert_eq!(saved.steps.len(), 7);
        assert_eq!(
            saved.animation.unwrap(),
            Some(dir.join(ANIMATION_NAME))
        );
        config.render.save_steps = false;
        config.render.animate = false;
        let saved = save_all(&config, &grid, &path, start, goal).unwrap();
        assert!(saved.steps.is_empty());
        assert!(matches!(saved.animation, Ok(None)));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn unreachable_goal_only_gets_final_image() {
        let grid = ObstacleGrid::build(3, ObstacleRect::new(0, 1, 3, 1)).unwrap();
        let start = Point::new(0, 0);
        let goal = Point::new(0, 2);
        let path = search(&grid, start, goal);
        let dir = scratch_dir("unreachable");
        let renderer = RasterRenderer::new(1);
        assert!(renderer
            .save_step_images(&dir, &grid, &path, start, goal)
            .unwrap()
            .is_empty());
        assert!(renderer
            .save_animation(&dir, &grid, &path, start, goal, 500)
            .unwrap()
            .is_none());
        assert!(!dir.join(ANIMATION_NAME).exists());
        let final_image = renderer
            .save_final_image(&dir, &grid, &path, start, goal)
            .unwrap();
        let decoded = image::open(&final_image).unwrap().into_rgb8();
        assert_eq!(decoded.get_pixel(1, 1).0, CellKind::Obstacle.rgb());
        fs::remove_dir_all(&dir).unwrap();
    }
}
