//! Global omniprof configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{OmniprofError, OmniprofResult};
use crate::event::OwnerId;

static DEFAULT_DATA_DIR: &str = "~/.local/share/omniprof";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_product() -> String {
    "OmniProf".to_string()
}

fn default_locale() -> String {
    "FR".to_string()
}

fn default_uid_domain() -> String {
    "omniprof.app".to_string()
}

/// Global configuration at ~/.config/omniprof/config.toml
///
/// Every key can be overridden with an `OMNIPROF_`-prefixed environment
/// variable (e.g. `OMNIPROF_DEFAULT_OWNER=3`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OmniprofConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_owner: Option<String>,

    #[serde(default = "default_product")]
    pub product: String,

    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default = "default_uid_domain")]
    pub uid_domain: String,
}

impl Default for OmniprofConfig {
    fn default() -> Self {
        OmniprofConfig {
            data_dir: default_data_dir(),
            default_owner: None,
            product: default_product(),
            locale: default_locale(),
            uid_domain: default_uid_domain(),
        }
    }
}

impl OmniprofConfig {
    pub fn config_path() -> OmniprofResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| OmniprofError::Config("Could not determine config directory".into()))?
            .join("omniprof");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, creating a commented default file on first run.
    pub fn load() -> OmniprofResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load config from a specific file layered with environment overrides.
    pub fn load_from(path: &Path) -> OmniprofResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("OMNIPROF"))
            .build()
            .map_err(|e| OmniprofError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| OmniprofError::Config(e.to_string()))
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn default_owner(&self) -> Option<OwnerId> {
        self.default_owner.as_deref().map(OwnerId::from)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> OmniprofResult<()> {
        let contents = format!(
            "\
# omniprof configuration

# Where imported events are stored:
# data_dir = \"{}\"

# Owner used when --owner is not given:
# default_owner = \"1\"

# PRODID and UID values of exported .ics files:
# product = \"OmniProf\"
# locale = \"FR\"
# uid_domain = \"omniprof.app\"
",
            DEFAULT_DATA_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                OmniprofError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| OmniprofError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("omniprof/config.toml");

        OmniprofConfig::create_default_config(&path).unwrap();
        let config = OmniprofConfig::load_from(&path).unwrap();

        assert_eq!(config.data_dir, default_data_dir());
        assert_eq!(config.product, "OmniProf");
        assert_eq!(config.locale, "FR");
        assert_eq!(config.uid_domain, "omniprof.app");
    }

    #[test]
    fn test_values_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/srv/omniprof\"\ndefault_owner = \"12\"\nuid_domain = \"lycee.example\"\n",
        )
        .unwrap();

        let config = OmniprofConfig::load_from(&path).unwrap();

        assert_eq!(config.data_path(), PathBuf::from("/srv/omniprof"));
        assert_eq!(config.default_owner(), Some(OwnerId::from("12")));
        assert_eq!(config.uid_domain, "lycee.example");
        assert_eq!(config.locale, "FR");
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "data_dir = [unclosed").unwrap();

        let err = OmniprofConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, OmniprofError::Config(_)));
    }
}
