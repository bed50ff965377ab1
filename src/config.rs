//! Application configuration
//!
//! Uses RON for a human-editable settings file. A missing or broken file is
//! never fatal: the application logs what happened and runs with defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rasterizer::Color;
use crate::surface::PresentMode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub background: Color,
    pub wire: Color,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub backface_cull: bool,
    pub orbit_distance: f32,
    pub presentation: PresentMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            wire: Color::WHITE,
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
            backface_cull: true,
            orbit_distance: 6.0,
            presentation: PresentMode::Stream,
        }
    }
}

impl AppConfig {
    /// Clamp projection parameters a hand-edited file may have broken.
    fn sanitize(mut self) -> Self {
        let defaults = Self::default();
        if !(self.near > 0.0) || !self.near.is_finite() {
            log::warn!("config: near plane {} rejected, using {}", self.near, defaults.near);
            self.near = defaults.near;
        }
        if !(self.far > self.near) || !self.far.is_finite() {
            log::warn!("config: far plane {} rejected, using {}", self.far, defaults.far);
            self.far = defaults.far.max(self.near * 2.0);
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            log::warn!(
                "config: fov {} rejected, using {}",
                self.fov_degrees,
                defaults.fov_degrees
            );
            self.fov_degrees = defaults.fov_degrees;
        }
        self
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: AppConfig = ron::from_str(&contents)?;
    Ok(config)
}

/// Load the config, falling back to defaults when the file is absent or
/// unreadable.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> AppConfig {
    let path = path.as_ref();
    match load_config(path) {
        Ok(config) => {
            log::info!("loaded config from {}", path.display());
            config.sanitize()
        }
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("no config at {}, using defaults", path.display());
            AppConfig::default()
        }
        Err(e) => {
            log::warn!("{e}; using defaults");
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config: AppConfig = ron::from_str("(fov_degrees: 75.0)").unwrap();
        assert_eq!(config.fov_degrees, 75.0);
        assert_eq!(config.near, AppConfig::default().near);
        assert_eq!(config.wire, Color::WHITE);
    }

    #[test]
    fn test_default_round_trips_through_ron() {
        let config = AppConfig::default();
        let text = ron::ser::to_string(&config).unwrap();
        let back: AppConfig = ron::from_str(&text).unwrap();
        assert_eq!(back.fov_degrees, config.fov_degrees);
        assert_eq!(back.background, config.background);
        assert_eq!(back.presentation, config.presentation);
    }

    #[test]
    fn test_sanitize_rejects_bad_planes() {
        let config = AppConfig {
            near: -1.0,
            far: -2.0,
            ..AppConfig::default()
        }
        .sanitize();
        assert!(config.near > 0.0);
        assert!(config.far > config.near);
    }

    #[test]
    fn test_sanitize_rejects_bad_fov() {
        let config = AppConfig {
            fov_degrees: 0.0,
            ..AppConfig::default()
        }
        .sanitize();
        assert_eq!(config.fov_degrees, AppConfig::default().fov_degrees);
    }
}
