use crate::error::{Error, Result};
use crate::render::raster::image_side;
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "grid_dijkstra.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_size")]
    pub size: usize,
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    /// Edge length in pixels of one grid cell in the rendered images.
    #[serde(default = "default_cell_pixels")]
    pub cell_pixels: u32,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_true")]
    pub save_steps: bool,
    #[serde(default = "default_true")]
    pub animate: bool,
}

#[derive(Debug, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "default_frame_delay_ms")]
    pub frame_delay_ms: u32,
}

fn default_size() -> usize { 100 }
fn default_cell_pixels() -> u32 { 5 }
fn default_output_dir() -> PathBuf { PathBuf::from("output") }
fn default_true() -> bool { true }
fn default_frame_delay_ms() -> u32 { 500 }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_pixels: default_cell_pixels(),
            output_dir: default_output_dir(),
            save_steps: true,
            animate: true,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_delay_ms: default_frame_delay_ms(),
        }
    }
}

impl Config {
    /// Parses a configuration from TOML text and checks the values are usable.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).map_err(|e| Error::config(format!("invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses the configuration file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&contents)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Like [load](Self::load), but falls back to the defaults when the file is missing or
    /// malformed.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No configuration at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Replaces the grid size and output directory where given and checks the result again.
    pub fn apply_overrides(
        &mut self,
        size: Option<usize>,
        output_dir: Option<PathBuf>,
    ) -> Result<()> {
        if let Some(size) = size {
            self.grid.size = size;
        }
        if let Some(dir) = output_dir {
            self.render.output_dir = dir;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid.size == 0 {
            return Err(Error::config("grid.size must be positive"));
        }
        if self.render.cell_pixels == 0 {
            return Err(Error::config("render.cell_pixels must be positive"));
        }
        if image_side(self.grid.size, self.render.cell_pixels).is_none() {
            return Err(Error::config(format!(
                "a {}x{} grid at {} pixels per cell is too large to render",
                self.grid.size, self.grid.size, self.render.cell_pixels
            )));
        }
        Ok(())
    }
}
