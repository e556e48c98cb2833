//! # Application Configuration
//!
//! Settings read from a TOML file. Every field is optional in the file;
//! missing keys keep their defaults.
//!
//! The file is located in this order:
//!
//! 1. an explicit path (the CLI `--config` flag)
//! 2. the `O86_CONFIG` environment variable
//! 3. `o86.toml` in the current directory
//! 4. none, built-in defaults
//!
//! ## Example
//!
//! ```rust
//! use o86_core::config::AppConfig;
//!
//! let config = AppConfig::from_toml_str(r#"
//!     log_filter = "o86_core=debug"
//!     default_subfloor = "OSB 3/4"
//! "#).unwrap();
//! assert_eq!(config.default_subfloor, "OSB 3/4");
//! assert!(config.tables.is_none());
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::calculations::vibration::DEFAULT_JOIST_SPACING_M;
use crate::errors::{CalcError, CalcResult};
use crate::project::GlobalSettings;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "O86_CONFIG";

/// Config file looked up in the working directory
pub const LOCAL_CONFIG: &str = "o86.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Property table file replacing the builtin tables
    pub tables: Option<PathBuf>,

    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,

    pub default_subfloor: String,

    pub default_joist_spacing_m: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            tables: None,
            log_filter: "warn".to_string(),
            default_subfloor: "CSP 5/8".to_string(),
            default_joist_spacing_m: DEFAULT_JOIST_SPACING_M,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        let config: AppConfig =
            toml::from_str(text).map_err(|e| CalcError::serialization(format!("Invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> CalcResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read config", path.display().to_string(), e.to_string()))?;
        let mut config = Self::from_toml_str(&text)?;

        // Relative table paths are relative to the config file
        if let (Some(tables), Some(dir)) = (config.tables.as_ref(), path.parent()) {
            if tables.is_relative() {
                config.tables = Some(dir.join(tables));
            }
        }
        Ok(config)
    }

    /// Load the configuration following the lookup order.
    ///
    /// Returns the path that was read, if any.
    pub fn load(explicit: Option<&Path>) -> CalcResult<(Self, Option<PathBuf>)> {
        let local = Path::new(LOCAL_CONFIG);
        let local = local.is_file().then(|| local.to_path_buf());

        match config_path(explicit, std::env::var_os(CONFIG_ENV), local) {
            Some(path) => {
                let config = Self::from_path(&path)?;
                tracing::debug!(path = %path.display(), "configuration loaded");
                Ok((config, Some(path)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.default_joist_spacing_m <= 0.0 {
            return Err(CalcError::invalid_input(
                "default_joist_spacing_m",
                self.default_joist_spacing_m.to_string(),
                "Joist spacing must be positive",
            ));
        }
        if self.default_subfloor.trim().is_empty() {
            return Err(CalcError::missing_field("default_subfloor"));
        }
        Ok(())
    }

    /// Project settings seeded from this configuration
    pub fn project_settings(&self) -> GlobalSettings {
        GlobalSettings {
            default_subfloor: self.default_subfloor.clone(),
            default_joist_spacing_m: self.default_joist_spacing_m,
            ..GlobalSettings::default()
        }
    }
}

/// Pick the config file: explicit path, then environment, then local file.
pub fn config_path(explicit: Option<&Path>, env: Option<OsString>, local: Option<PathBuf>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .or(local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_file_is_default() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_relative_eq!(config.default_joist_spacing_m, 0.4064);
    }

    #[test]
    fn test_full_file() {
        let config = AppConfig::from_toml_str(
            r#"
            tables = "/opt/o86/tables.toml"
            log_filter = "debug"
            default_subfloor = "DFP 1/2"
            default_joist_spacing_m = 0.6096
            "#,
        )
        .unwrap();
        assert_eq!(config.tables, Some(PathBuf::from("/opt/o86/tables.toml")));
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.default_subfloor, "DFP 1/2");
        assert_relative_eq!(config.default_joist_spacing_m, 0.6096);
    }

    #[test]
    fn test_rejects_unknown_key_and_bad_values() {
        assert!(matches!(
            AppConfig::from_toml_str("colour = \"red\""),
            Err(CalcError::SerializationError { .. })
        ));
        assert!(AppConfig::from_toml_str("default_joist_spacing_m = 0.0").unwrap_err().is_input_error());
        assert!(AppConfig::from_toml_str("default_subfloor = \" \"").is_err());
    }

    #[test]
    fn test_lookup_order() {
        let explicit = Path::new("a.toml");
        let env = Some(OsString::from("b.toml"));
        let local = Some(PathBuf::from("o86.toml"));

        assert_eq!(
            config_path(Some(explicit), env.clone(), local.clone()),
            Some(PathBuf::from("a.toml"))
        );
        assert_eq!(config_path(None, env, local.clone()), Some(PathBuf::from("b.toml")));
        assert_eq!(config_path(None, Some(OsString::new()), local.clone()), local);
        assert_eq!(config_path(None, None, None), None);
    }

    #[test]
    fn test_relative_tables_resolved_against_config_dir() {
        let dir = std::env::temp_dir().join(format!("o86_config_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("o86.toml");
        std::fs::write(&path, "tables = \"custom.toml\"").unwrap();

        let config = AppConfig::from_path(&path).unwrap();
        assert_eq!(config.tables, Some(dir.join("custom.toml")));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_project_settings() {
        let config = AppConfig {
            default_subfloor: "OSB 3/4".to_string(),
            ..AppConfig::default()
        };
        let settings = config.project_settings();
        assert_eq!(settings.default_subfloor, "OSB 3/4");
        assert_eq!(settings.code, "CSA O86:19");
    }
}
