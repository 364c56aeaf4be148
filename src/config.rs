//! YAML configuration for the render host and scene defaults.
//!
//! Precedence: CLI > prompt answers > file > defaults. Every field has a
//! default, so an empty file is a valid configuration.

use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::math::{translate, Mat4, Vec3};
use crate::raster::Endpoint;
use crate::render::{Palette, Style};
use crate::scene::CartesianAxes;

/// Surface size used when the prompt answer is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_width() -> u32 {
    800
}
fn default_height() -> u32 {
    600
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { width: default_width(), height: default_height() }
    }
}

/// Cartesian plane extents; each must exceed 50.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneConfig {
    /// Half-length of the x axis.
    #[serde(default = "default_x_extent")]
    pub x_extent: f64,
    /// Half-length of the y axis.
    #[serde(default = "default_yz_extent")]
    pub y_extent: f64,
    /// Half-length of the z axis.
    #[serde(default = "default_yz_extent")]
    pub z_extent: f64,
}

fn default_x_extent() -> f64 {
    51.0
}
fn default_yz_extent() -> f64 {
    99.9
}

impl Default for PlaneConfig {
    fn default() -> Self {
        Self { x_extent: default_x_extent(), y_extent: default_yz_extent(), z_extent: default_yz_extent() }
    }
}

/// Colors and point size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Clear color.
    #[serde(default = "default_background")]
    pub background: Rgba,
    /// Pixel color.
    #[serde(default = "default_point_color")]
    pub point_color: Rgba,
    /// Polyline color.
    #[serde(default = "default_line_color")]
    pub line_color: Rgba,
    /// Axis color.
    #[serde(default = "default_axis_color")]
    pub axis_color: Rgba,
    /// Side of each pixel square.
    #[serde(default = "default_point_size")]
    pub point_size: u32,
}

fn default_background() -> Rgba {
    Rgba::VIOLET
}
fn default_point_color() -> Rgba {
    Palette::default().points
}
fn default_line_color() -> Rgba {
    Palette::default().lines
}
fn default_axis_color() -> Rgba {
    Palette::default().axes
}
fn default_point_size() -> u32 {
    3
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            point_color: default_point_color(),
            line_color: default_line_color(),
            axis_color: default_axis_color(),
            point_size: default_point_size(),
        }
    }
}

/// Render loop and projection settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Frames drawn by the headless loop.
    #[serde(default = "default_frames")]
    pub frames: u32,
    /// Frame pacing; 0 renders as fast as possible.
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Emit the terminal pixel of basic incremental lines.
    #[serde(default)]
    pub inclusive_endpoints: bool,
    /// World-unit margin around the fitted scene.
    #[serde(default = "default_padding")]
    pub padding: f64,
    /// Translation applied to every vertex.
    #[serde(default)]
    pub model_offset: [f64; 3],
}

fn default_frames() -> u32 {
    1
}
fn default_fps() -> u32 {
    60
}
fn default_padding() -> f64 {
    2.0
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            fps: default_fps(),
            inclusive_endpoints: false,
            padding: default_padding(),
            model_offset: [0.0; 3],
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Surface size defaults.
    #[serde(default)]
    pub window: WindowConfig,
    /// Axis extents.
    #[serde(default)]
    pub plane: PlaneConfig,
    /// Colors.
    #[serde(default)]
    pub style: StyleConfig,
    /// Render loop.
    #[serde(default)]
    pub render: RenderConfig,
}

impl Config {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Config`] if it cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] carrying the offending line.
    pub fn parse(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::Config { line, message: e.to_string() }
        })
    }

    /// Loads configuration, falling back to defaults with a warning.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                warn!("ignoring config {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// `<config dir>/trueno-raster/config.yaml`, when the platform has one.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("trueno-raster").join("config.yaml"))
    }

    /// Serialize back to YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).map_err(|e| Error::Config { line: 0, message: e.to_string() })
    }

    /// Axes overlay from the plane extents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Domain`] if any extent is 50 or less.
    pub fn axes(&self) -> Result<CartesianAxes> {
        CartesianAxes::new(self.plane.x_extent, self.plane.y_extent, self.plane.z_extent)
    }

    /// Host style.
    #[must_use]
    pub fn host_style(&self) -> Style {
        Style {
            background: self.style.background,
            point_color: self.style.point_color,
            line_color: self.style.line_color,
            point_size: self.style.point_size,
        }
    }

    /// Renderable colors.
    #[must_use]
    pub fn palette(&self) -> Palette {
        Palette {
            points: self.style.point_color,
            lines: self.style.line_color,
            axes: self.style.axis_color,
        }
    }

    /// Endpoint policy for basic incremental lines.
    #[must_use]
    pub fn endpoint(&self) -> Endpoint {
        if self.render.inclusive_endpoints {
            Endpoint::Inclusive
        } else {
            Endpoint::Exclusive
        }
    }

    /// Model matrix from `model_offset`.
    #[must_use]
    pub fn model(&self) -> Mat4 {
        translate(Vec3::from(self.render.model_offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!((config.window.width, config.window.height), (800, 600));
        assert_eq!(config.plane.x_extent, 51.0);
        assert_eq!(config.style.background, Rgba::VIOLET);
        assert_eq!(config.render.frames, 1);
        assert_eq!(config.endpoint(), Endpoint::Exclusive);
        assert!(config.axes().is_ok());
    }

    #[test]
    fn test_config_parse_empty() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_config_parse_partial() {
        let yaml = r##"
window:
  width: 320
style:
  point_color: "#ff0000"
  point_size: 5
render:
  inclusive_endpoints: true
  model_offset: [1.0, 2.0, 0.0]
"##;
        let config = Config::parse(yaml).unwrap();
        assert_eq!(config.window.width, 320);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.style.point_color, Rgba::RED);
        assert_eq!(config.host_style().point_size, 5);
        assert_eq!(config.palette().points, Rgba::RED);
        assert_eq!(config.endpoint(), Endpoint::Inclusive);
        assert_eq!(config.model().column(3), [1.0, 2.0, 0.0, 1.0]);
    }

    #[test]
    fn test_config_parse_error_includes_line() {
        let yaml = "window:\n  width: 320\n  height: tall\n";
        match Config::parse(yaml) {
            Err(Error::Config { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_config_bad_color() {
        let err = Config::parse("style:\n  background: chartreuse\n").unwrap_err();
        assert!(err.to_string().contains("chartreuse"));
    }

    #[test]
    fn test_config_small_plane_rejected() {
        let config = Config::parse("plane:\n  x_extent: 50\n").unwrap();
        assert!(matches!(config.axes(), Err(Error::Domain(_))));
    }

    #[test]
    fn test_config_load_roundtrip() {
        let mut config = Config::default();
        config.render.fps = 30;
        config.style.axis_color = Rgba::new(1, 2, 3, 4);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_yaml().unwrap().as_bytes()).unwrap();
        assert_eq!(Config::load(file.path()).unwrap(), config);
    }

    #[test]
    fn test_config_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert_eq!(Config::load_or_default(&missing), Config::default());

        let broken = dir.path().join("broken.yaml");
        std::fs::write(&broken, "window: [").unwrap();
        assert_eq!(Config::load_or_default(&broken), Config::default());
    }

    #[test]
    fn test_default_path_suffix() {
        if let Some(path) = Config::default_path() {
            assert!(path.ends_with("trueno-raster/config.yaml"));
        }
    }
}
