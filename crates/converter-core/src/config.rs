//! Converter settings.
//!
//! Settings live in a JSON file. The path comes from `--config`, then the
//! `IMAGE_CONVERTER_CONFIG` environment variable, then
//! `<config dir>/image-converter/config.json`. Missing fields fall back to
//! their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "IMAGE_CONVERTER_CONFIG";

/// Config file name inside the per-user config directory.
pub const CONFIG_FILENAME: &str = "config.json";

const APP_DIR: &str = "image-converter";

/// Resampling filters allowed for resizing.
///
/// Nearest-neighbor is not offered: it aliases badly at icon sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleFilter {
    #[default]
    Lanczos3,
    CatmullRom,
    Gaussian,
    Triangle,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Triangle => FilterType::Triangle,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Filter used for ICO and icon-set resizing.
    pub resize_filter: ResampleFilter,
    /// JPEG encoder quality, 1 to 100.
    pub jpeg_quality: u8,
    /// Program invoked to package an iconset into an ICNS file.
    pub iconutil_program: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            resize_filter: ResampleFilter::Lanczos3,
            jpeg_quality: 75,
            iconutil_program: "iconutil".to_string(),
        }
    }
}

impl ConverterConfig {
    /// Load settings from an explicit file. The file must exist.
    pub fn load(path: &Path) -> Result<Self, ConvertError> {
        let content = fs::read_to_string(path).map_err(|e| ConvertError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: ConverterConfig =
            serde_json::from_str(&content).map_err(|e| ConvertError::Config {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        config.validate(path)?;
        Ok(config)
    }

    /// Resolve and load settings.
    ///
    /// An explicit path (argument or environment) must exist; the per-user
    /// default file is optional.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConvertError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load(Path::new(&path));
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn validate(&self, path: &Path) -> Result<(), ConvertError> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConvertError::Config {
                path: path.to_path_buf(),
                reason: format!("jpeg_quality must be 1-100, got {}", self.jpeg_quality),
            });
        }
        if self.iconutil_program.trim().is_empty() {
            return Err(ConvertError::Config {
                path: path.to_path_buf(),
                reason: "iconutil_program must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Per-user config file location, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}
