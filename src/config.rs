//! Configuration file support for hubtheme
//!
//! Handles `.hubtheme.toml` configuration file loading and saving.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::registry::ThemeRegistry;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = ".hubtheme.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// JSON file backing the preference store
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// System color scheme handling
    #[serde(default)]
    pub system: SystemConfig,

    /// Bootstrap script output
    #[serde(default)]
    pub script: ScriptConfig,

    /// Theme catalog
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            system: SystemConfig::default(),
            script: ScriptConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".hubtheme/preferences.json")
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SystemConfig {
    /// Fixed answer to "does the system prefer dark?", skipping OS detection
    #[serde(default)]
    pub prefers_dark: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptConfig {
    /// Wrap output in a `<script>` element
    #[serde(default = "default_tag")]
    pub tag: bool,

    /// CSP nonce for the `<script>` element
    #[serde(default)]
    pub nonce: Option<String>,
}

fn default_tag() -> bool {
    true
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            tag: default_tag(),
            nonce: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// TOML file with themes appended to the built-in catalog
    #[serde(default)]
    pub extra: Option<PathBuf>,
}

impl Config {
    /// Load configuration file (returns default if not found)
    ///
    /// Searches for `.hubtheme.toml` in the current directory.
    pub fn load() -> Result<Self> {
        let config_path = PathBuf::from(CONFIG_FILE_NAME);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from specified path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to specified path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default(path: &Path) -> Result<()> {
        Config::default().save_to(path)
    }

    /// Built-in catalog, extended by `catalog.extra` when set
    pub fn registry(&self) -> Result<ThemeRegistry> {
        match &self.catalog.extra {
            Some(path) => ThemeRegistry::with_catalog_file(path),
            None => Ok(ThemeRegistry::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.store_path, PathBuf::from(".hubtheme/preferences.json"));
        assert!(config.system.prefers_dark.is_none());
        assert!(config.script.tag);
        assert!(config.script.nonce.is_none());
        assert!(config.catalog.extra.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
store_path = "prefs.json"

[system]
prefers_dark = false

[script]
nonce = "abc123"
"#
        )
        .unwrap();

        let config = Config::load_from(temp_file.path()).unwrap();

        assert_eq!(config.store_path, PathBuf::from("prefs.json"));
        assert_eq!(config.system.prefers_dark, Some(false));
        assert_eq!(config.script.nonce.as_deref(), Some("abc123"));
        // Default values should be used for unspecified keys
        assert!(config.script.tag);
        assert!(config.catalog.extra.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        let mut config = Config::default();
        config.script.tag = false;
        config.system.prefers_dark = Some(true);

        config.save_to(path).unwrap();

        let loaded = Config::load_from(path).unwrap();
        assert!(!loaded.script.tag);
        assert_eq!(loaded.system.prefers_dark, Some(true));
    }

    #[test]
    fn test_generate_default() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        Config::generate_default(path).unwrap();

        let loaded = Config::load_from(path).unwrap();
        assert_eq!(loaded.store_path, PathBuf::from(".hubtheme/preferences.json"));
        assert!(loaded.script.tag);
    }

    #[test]
    fn test_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "store_path = [").unwrap();

        let err = Config::load_from(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse configuration file"));
    }

    #[test]
    fn test_registry_builtin() {
        let registry = Config::default().registry().unwrap();
        assert_eq!(registry.len(), 6);
        assert_eq!(registry.default_id(), "midnight");
    }

    #[test]
    fn test_registry_with_extra_catalog() {
        let mut catalog = NamedTempFile::new().unwrap();
        let mut content = String::from("[[theme]]\nid = \"slate\"\nmode = \"dark\"\n\n[theme.colors]\n");
        for (key, value) in crate::theme::MIDNIGHT.colors {
            content.push_str(&format!("\"{key}\" = \"{value}\"\n"));
        }
        write!(catalog, "{content}").unwrap();

        let mut config = Config::default();
        config.catalog.extra = Some(catalog.path().to_path_buf());

        let registry = config.registry().unwrap();
        assert_eq!(registry.len(), 7);
        assert_eq!(registry.get("slate").map(|t| t.name.as_str()), Some("slate"));
    }

    #[test]
    fn test_registry_missing_catalog() {
        let mut config = Config::default();
        config.catalog.extra = Some(PathBuf::from("/nonexistent/hubtheme-catalog.toml"));

        let err = config.registry().unwrap_err();
        assert!(err.to_string().contains("Failed to read theme catalog"));
    }
}
