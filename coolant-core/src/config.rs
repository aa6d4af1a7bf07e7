//! Application configuration.
//!
//! Loaded from an optional TOML file; every field has a default so an
//! absent file or a partial one is valid.
//!
//! ```toml
//! database_path = "coolant_pro.db"
//!
//! [targets]
//! target_conc_pct = 8.0
//! target_min_ph = 8.8
//!
//! [defaults]
//! coolant_product = "Coolant A"
//! sump_volume_gal = 100.0
//! ri_factor = 1.0
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::chemistry::Targets;
use crate::error::{CoolantError, Result};

pub const DEFAULT_DATABASE_PATH: &str = "coolant_pro.db";

/// Values used for a machine with no recorded history.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShopDefaults {
    /// Shop-wide coolant product.
    pub coolant_product: String,
    /// Sump volume in gallons.
    pub sump_volume_gal: f64,
    pub ri_factor: f64,
}

impl Default for ShopDefaults {
    fn default() -> Self {
        Self {
            coolant_product: "Coolant A".to_string(),
            sump_volume_gal: 100.0,
            ri_factor: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub targets: Targets,
    pub defaults: ShopDefaults,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            targets: Targets::default(),
            defaults: ShopDefaults::default(),
        }
    }
}

impl AppConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CoolantError::Config(e.to_string()))
    }

    /// Load the configuration at `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!(
                "[Coolant] config: {} not found, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| CoolantError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml(&text)?;
        log::info!("[Coolant] config: loaded {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.targets.target_conc_pct, 8.0);
        assert_eq!(config.targets.target_min_ph, 8.8);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = AppConfig::from_toml("[targets]\ntarget_min_ph = 9.0\n").unwrap();
        assert_eq!(config.targets.target_min_ph, 9.0);
        assert_eq!(config.targets.target_conc_pct, 8.0);
        assert_eq!(config.defaults.coolant_product, "Coolant A");
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = AppConfig::from_toml("targets = [").unwrap_err();
        assert!(matches!(err, CoolantError::Config(_)));
    }

    #[test]
    fn load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "database_path = \"shop.db\"\n[defaults]\nsump_volume_gal = 250.0"
        )
        .unwrap();
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.database_path, PathBuf::from("shop.db"));
        assert_eq!(config.defaults.sump_volume_gal, 250.0);
        assert_eq!(config.defaults.ri_factor, 1.0);
    }
}
