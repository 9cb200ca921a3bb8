//! Application configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use std::fmt;
use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::viewport::ViewportSettings;

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width
    pub width: f64,
    /// Window height
    pub height: f64,
    /// Whether the window should be fullscreen
    pub fullscreen: bool,
    /// Whether the window should be resizable
    pub resizable: bool,
    /// Whether the window should be decorated (has title bar, borders, etc.)
    pub decorated: bool,
    /// Whether to enable vsync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Starmap".to_string(),
            width: 1280.0,
            height: 800.0,
            fullscreen: false,
            resizable: true,
            decorated: true,
            vsync: true,
        }
    }
}

/// Which map the window shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MapKind {
    #[default]
    Galaxy,
    Provinces,
}

impl MapKind {
    /// The other map
    pub fn toggled(self) -> Self {
        match self {
            MapKind::Galaxy => MapKind::Provinces,
            MapKind::Provinces => MapKind::Galaxy,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MapKind::Galaxy => "Galaxy",
            MapKind::Provinces => "Provinces",
        }
    }
}

impl fmt::Display for MapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Procedural scene parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed shared by both generators
    pub seed: u64,
    /// Number of stars in the galaxy
    pub star_count: usize,
    /// Province grid columns
    pub province_cols: usize,
    /// Province grid rows
    pub province_rows: usize,
    /// Map shown at startup
    pub initial_map: MapKind,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 1977,
            star_count: 400,
            province_cols: 12,
            province_rows: 8,
            initial_map: MapKind::Galaxy,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    /// Window configuration
    pub window: WindowConfig,
    /// Viewport interaction settings
    pub viewport: ViewportSettings,
    /// Scene generation
    pub scene: SceneConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: "release".to_string(),
            window: WindowConfig::default(),
            viewport: ViewportSettings::default(),
            scene: SceneConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Profiles are loaded from config files in the following order:
    /// 1. config/{profile}.toml (profile-specific configuration)
    /// 2. Environment variables with prefix APP_ (e.g., APP_VIEWPORT__MAX_ZOOM=20)
    ///
    /// Config files are searched for in:
    /// 1. Next to the executable (target/debug/config or target/release/config)
    /// 2. In the current directory (./config)
    ///
    /// Missing keys take their built-in defaults. Viewport settings are
    /// validated after loading.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        match Self::find_config_dir() {
            Some(dir) => {
                let profile_path = dir.join(profile);
                builder = builder.add_source(File::from(profile_path.as_path()).required(false));
            }
            None => {
                builder = builder
                    .add_source(File::with_name(&format!("config/{}", profile)).required(false));
            }
        }

        // Use __ as separator for nested fields (e.g., APP_WINDOW__WIDTH)
        builder = builder.add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: Self = builder.set_override("profile", profile)?.build()?.try_deserialize()?;
        config.viewport = config.viewport.validated();
        Ok(config)
    }

    /// Finds the config directory by searching in multiple locations
    fn find_config_dir() -> Option<PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = PathBuf::from("config");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        None
    }

    /// The profile named by `APP_PROFILE`, defaulting to "release"
    pub fn profile_from_env() -> String {
        std::env::var("APP_PROFILE").unwrap_or_else(|_| "release".to_string())
    }

    /// Loads configuration using the APP_PROFILE environment variable
    pub fn load_from_env() -> Result<Self, ConfigError> {
        Self::load(&Self::profile_from_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_usable() {
        let config = AppConfig::default();
        assert_eq!(config.viewport, ViewportSettings::default());
        assert!(config.scene.star_count > 0);
        assert_eq!(config.scene.initial_map, MapKind::Galaxy);
    }

    #[test]
    fn test_missing_profile_falls_back_to_defaults() {
        let config = AppConfig::load("no-such-profile").unwrap_or_default();
        assert_eq!(config.window.title, WindowConfig::default().title);
        assert!(config.viewport.min_zoom > 0.0);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config: AppConfig = Config::builder()
            .add_source(config::File::from_str(
                "[viewport]\nmax_zoom = 4.0\n[scene]\ninitial_map = \"provinces\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .and_then(|c| c.try_deserialize())
            .unwrap_or_default();
        assert_eq!(config.viewport.max_zoom, 4.0);
        assert_eq!(config.viewport.min_zoom, 0.1);
        assert_eq!(config.scene.initial_map, MapKind::Provinces);
        assert_eq!(config.scene.star_count, SceneConfig::default().star_count);
    }

    #[test]
    fn test_shipped_profiles_need_no_repair() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config");
        for profile in ["debug.toml", "release.toml"] {
            let config: AppConfig = Config::builder()
                .add_source(File::from(dir.join(profile)))
                .build()
                .and_then(|c| c.try_deserialize())
                .unwrap_or_else(|e| panic!("{profile}: {e}"));
            assert_eq!(config.viewport.validated(), config.viewport, "{profile}");
            assert!(config.viewport.max_zoom <= 10.0, "{profile}");
        }
    }

    #[test]
    fn test_map_kind_toggles() {
        assert_eq!(MapKind::Galaxy.toggled(), MapKind::Provinces);
        assert_eq!(MapKind::Provinces.toggled().to_string(), "Galaxy");
    }
}
