//! Sprite manager configuration.
//!
//! Settings loaded from an INI file. Defaults are safe for startup, and keys
//! missing from the file keep them.
//!
//! # Configuration File Format
//!
//! ```ini
//! [assets]
//! directory = ./Textures
//! manifest = ./Textures/sprites.json
//!
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 60
//! ```
//!
//! The asset directory is read once at startup and handed to the
//! [`SpriteRegistry`](crate::resources::spriteregistry::SpriteRegistry); it
//! cannot change while sprites are loaded.

use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_ASSET_DIRECTORY: &str = "./Textures";
const DEFAULT_MANIFEST: &str = "./Textures/sprites.json";
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Debug, Clone)]
pub struct SpriteConfig {
    /// Base directory relative sprite names are resolved against.
    pub asset_directory: PathBuf,
    /// JSON manifest of sprites to load at startup.
    pub manifest: PathBuf,
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            asset_directory: PathBuf::from(DEFAULT_ASSET_DIRECTORY),
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);

        info!(
            "Loaded config: assets in {:?}, manifest {:?}, {}x{} window, fps={}",
            self.asset_directory,
            self.manifest,
            self.window_width,
            self.window_height,
            self.target_fps
        );

        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [assets] section
        if let Some(dir) = config.get("assets", "directory") {
            self.asset_directory = PathBuf::from(dir);
        }
        if let Some(manifest) = config.get("assets", "manifest") {
            self.manifest = PathBuf::from(manifest);
        }

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [assets] section
        config.set(
            "assets",
            "directory",
            Some(self.asset_directory.display().to_string()),
        );
        config.set("assets", "manifest", Some(self.manifest.display().to_string()));

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SpriteConfig::new();
        assert_eq!(config.asset_directory, PathBuf::from("./Textures"));
        assert_eq!(config.window_width, 1280);
        assert_eq!(config.target_fps, 60);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut config = SpriteConfig::new();
        config
            .load_from_str("[assets]\ndirectory = ./art\n\n[window]\nwidth = 640\n")
            .unwrap();
        assert_eq!(config.asset_directory, PathBuf::from("./art"));
        assert_eq!(config.manifest, PathBuf::from("./Textures/sprites.json"));
        assert_eq!(config.window_width, 640);
        assert_eq!(config.window_height, 720);
    }

    #[test]
    fn test_missing_file_is_error() {
        let mut config = SpriteConfig::with_path("./does/not/exist.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.window_width, 1280);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join("spritemanager_config_roundtrip.ini");
        let mut saved = SpriteConfig::with_path(&path);
        saved.asset_directory = PathBuf::from("./sheets");
        saved.target_fps = 30;
        saved.save_to_file().unwrap();

        let mut loaded = SpriteConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded.asset_directory, PathBuf::from("./sheets"));
        assert_eq!(loaded.target_fps, 30);
        let _ = std::fs::remove_file(path);
    }
}
