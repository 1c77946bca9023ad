//! Configuration persistence for barscope settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Directions, ExpectedBarcodeCount, OptionState, ScanInterval, Symbologies};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No configuration directory available")]
    NoConfigDir,

    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Selected symbologies, by display name
    pub symbologies: Vec<String>,
    /// Selected scan directions, by display name
    pub directions: Vec<String>,
    /// Scan line spacing (1-20)
    pub scan_interval: i32,
    /// Number of barcodes to look for (at least 1)
    pub expected_barcodes: i64,
    /// Binarise the image automatically before decoding
    pub thresholding: bool,
    pub show_bounding_rects: bool,
    pub show_bounding_boxes: bool,
    pub shrink_to_fit: bool,
    /// Directory the open dialog starts in
    pub last_directory: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            // The bundled engine reads QR only
            symbologies: vec!["QR".to_string()],
            directions: vec!["Left to Right".to_string()],
            scan_interval: ScanInterval::DEFAULT as i32,
            expected_barcodes: ExpectedBarcodeCount::MIN as i64,
            thresholding: true,
            show_bounding_rects: true,
            show_bounding_boxes: true,
            shrink_to_fit: false,
            last_directory: None,
        }
    }
}

impl AppConfig {
    /// Directory name under the user config dir
    pub const ID: &'static str = "barscope";

    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("Could not determine config directory, using defaults");
            return Self::default();
        };
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {}", err);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let result = Self::path()
            .ok_or(ConfigError::NoConfigDir)
            .and_then(|path| self.save_to(&path));
        if let Err(err) = result {
            log::error!("Failed to save config: {}", err);
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Build the startup option state, keeping only symbologies the engine supports
    pub fn option_state(&self, supported: Symbologies) -> OptionState {
        let mut symbologies = Symbologies::empty();
        for name in &self.symbologies {
            match Symbologies::from_display_name(name) {
                Ok(sym) if supported.contains(sym) => symbologies |= sym,
                Ok(_) => log::warn!("Symbology {} is not supported by this engine", name),
                Err(err) => log::warn!("Ignoring config entry: {}", err),
            }
        }

        let mut directions = Directions::empty();
        for name in &self.directions {
            match Directions::from_label(name) {
                Ok(dir) => directions |= dir,
                Err(err) => log::warn!("Ignoring config entry: {}", err),
            }
        }

        let mut options = OptionState::new(symbologies, directions);
        options.set_scan_interval(ScanInterval::clamped(self.scan_interval));
        options.set_expected_count(ExpectedBarcodeCount::clamped(self.expected_barcodes));
        options.set_thresholding(self.thresholding);
        options
    }

    /// Copy the current options back for persisting
    pub fn store_options(&mut self, options: &OptionState) {
        self.symbologies = options
            .symbologies()
            .names()
            .into_iter()
            .map(String::from)
            .collect();
        self.directions = options
            .directions()
            .names()
            .into_iter()
            .map(String::from)
            .collect();
        self.scan_interval = options.scan_interval().get() as i32;
        self.expected_barcodes = options.expected_count().get() as i64;
        self.thresholding = options.thresholding();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AppConfig {
            scan_interval: 12,
            thresholding: false,
            last_directory: Some(PathBuf::from("/tmp/scans")),
            ..AppConfig::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{ "scan_interval": 3 }"#).unwrap();
        assert_eq!(config.scan_interval, 3);
        assert!(config.thresholding);
        assert_eq!(config.symbologies, vec!["QR".to_string()]);
    }

    #[test]
    fn test_option_state_filters_and_clamps() {
        let config = AppConfig {
            symbologies: vec!["QR".into(), "Code 39".into(), "Bogus".into()],
            directions: vec!["East".into(), "Top to Bottom".into()],
            scan_interval: 25,
            expected_barcodes: 0,
            thresholding: false,
            ..AppConfig::default()
        };
        let options = config.option_state(Symbologies::QR);
        assert_eq!(options.symbologies(), Symbologies::QR);
        assert_eq!(options.directions(), Directions::EAST | Directions::SOUTH);
        assert_eq!(options.scan_interval().get(), 20);
        assert_eq!(options.expected_count().get(), 1);
        assert!(!options.thresholding());
    }

    #[test]
    fn test_store_options_round_trips() {
        let mut options = OptionState::new(Symbologies::QR, Directions::NORTH_WEST);
        options.set_scan_interval(ScanInterval::new(7).unwrap());
        let mut config = AppConfig::default();
        config.store_options(&options);
        assert_eq!(config.option_state(Symbologies::all()), options);
    }
}
