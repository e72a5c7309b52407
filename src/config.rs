// src/config.rs

//! Configuration for `curve-trace`.
//!
//! The structs below deserialize from a JSON file whose path is taken from the
//! `CURVE_TRACE_CONFIG` environment variable. Every section and field has a
//! default, so a config file only needs to mention what it changes, e.g.
//!
//! ```json
//! { "animation": { "scale": 150.0, "max_hist": 400 },
//!   "colors": { "trail": "blue" } }
//! ```

use crate::animator::AnimatorConfig;
use crate::color::NamedColor;
use log::{info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming the JSON config file.
pub const CONFIG_PATH_ENV: &str = "CURVE_TRACE_CONFIG";

/// Process-wide configuration, loaded on first access.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

// --- Top-Level Configuration Structure ---

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub animation: AnimationConfig,
    pub colors: ColorScheme,
}

impl Config {
    /// Parses a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses the JSON file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Loads the file named by `CURVE_TRACE_CONFIG`, falling back to defaults
    /// when the variable is unset or the file cannot be used.
    pub fn from_env() -> Self {
        match std::env::var_os(CONFIG_PATH_ENV) {
            None => {
                info!("{} not set, using default configuration.", CONFIG_PATH_ENV);
                Config::default()
            }
            Some(path) => match Config::load(Path::new(&path)) {
                Ok(config) => {
                    info!("Configuration loaded from {}.", Path::new(&path).display());
                    config
                }
                Err(e) => {
                    warn!("{:#}. Using default configuration.", e);
                    Config::default()
                }
            },
        }
    }

    /// The animator parameters this configuration describes.
    pub fn animator_config(&self) -> AnimatorConfig {
        AnimatorConfig {
            scale: self.animation.scale,
            window_width: self.window.width,
            window_height: self.window.height,
            ds: self.animation.ds,
            fps: self.animation.fps,
            max_hist: self.animation.max_hist,
        }
    }
}

// --- Window Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 800,
            height: 600,
            title: "curve-trace".to_string(),
        }
    }
}

// --- Animation Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Initial zoom: device pixels per curve unit.
    pub scale: f64,
    /// Parameter step per frame. Must be positive.
    pub ds: f64,
    /// Target frame rate. 0 runs uncapped.
    pub fps: u32,
    /// Number of past curve points kept on screen.
    pub max_hist: usize,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            scale: 100.0,
            ds: 0.05,
            fps: 30,
            max_hist: 200,
        }
    }
}

// --- Color Scheme Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorScheme {
    pub background: NamedColor,
    pub trail: NamedColor,
    /// Colour of the first-derivative (velocity) vector.
    pub first_derivative: NamedColor,
    /// Colour of the second-derivative (acceleration) vector.
    pub second_derivative: NamedColor,
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme {
            background: NamedColor::Black,
            trail: NamedColor::White,
            first_derivative: NamedColor::Red,
            second_derivative: NamedColor::Green,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = Config::from_json_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.animation.ds, 0.05);
        assert_eq!(config.animation.max_hist, 200);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_json_str(
            r#"{ "animation": { "scale": 150.0 }, "colors": { "trail": "blue" } }"#,
        )
        .unwrap();
        assert_eq!(config.animation.scale, 150.0);
        assert_eq!(config.animation.fps, 30);
        assert_eq!(config.colors.trail, NamedColor::Blue);
        assert_eq!(config.colors.background, NamedColor::Black);
    }

    #[test]
    fn malformed_documents_are_errors() {
        assert!(Config::from_json_str("{ \"animation\": { \"fps\": -3 } }").is_err());
        assert!(Config::from_json_str("{ \"colors\": { \"trail\": \"mauve\" } }").is_err());
        assert!(Config::from_json_str("not json").is_err());
    }

    #[test]
    fn missing_file_is_an_error_with_the_path_in_context() {
        let err = Config::load(Path::new("/nonexistent/curve-trace.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/curve-trace.json"));
    }

    #[test]
    fn animator_config_mirrors_the_sections() {
        let config = Config::default();
        let animator = config.animator_config();
        assert_eq!(animator.scale, 100.0);
        assert_eq!(animator.window_width, 800);
        assert_eq!(animator.window_height, 600);
        assert_eq!(animator.ds, 0.05);
        assert_eq!(animator.fps, 30);
        assert_eq!(animator.max_hist, 200);
    }
}
