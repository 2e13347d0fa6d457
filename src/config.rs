//! Viewer settings

use std::path::PathBuf;

use crate::gfx::geometry::Bounds;

/// Environment variable naming the directory the OBJ files are read from
pub const ASSET_DIR_ENV: &str = "TABLEAU_ASSET_DIR";
/// Environment variable that turns vsync off when set to `0`, `false` or `off`
pub const VSYNC_ENV: &str = "TABLEAU_VSYNC";

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub asset_dir: PathBuf,
    pub window_width: u32,
    pub window_height: u32,
    pub title: String,
    pub vsync: bool,
    /// Rough extent of the scene, used to frame the initial view
    pub scene_bounds: Bounds,
    /// Animation frames per second of wall time
    pub animation_fps: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            window_width: 1000,
            window_height: 800,
            title: "Hierarchical Scene".to_string(),
            vsync: true,
            scene_bounds: Bounds::default(),
            animation_fps: 30.0,
        }
    }
}

impl ViewerConfig {
    /// Defaults overridden by the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = lookup(ASSET_DIR_ENV).filter(|dir| !dir.is_empty()) {
            config.asset_dir = PathBuf::from(dir);
        }
        if let Some(value) = lookup(VSYNC_ENV) {
            config.vsync = !matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "0" | "false" | "off" | "no"
            );
        }
        config
    }

    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = dir.into();
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_scene_bounds(mut self, bounds: Bounds) -> Self {
        self.scene_bounds = bounds;
        self
    }

    pub fn with_animation_fps(mut self, fps: f32) -> Self {
        self.animation_fps = fps;
        self
    }
}
