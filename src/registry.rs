//! Theme catalog
//!
//! [`ThemeRegistry`] is the read-only catalog every other component looks
//! themes up in. It is validated once at construction: ids are unique and
//! every theme defines exactly the default theme's color keys.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use crate::debug;
use crate::theme::{DEFAULT_THEME_ID, ThemeDefinition, ThemeMode, builtin_themes};

/// Immutable catalog of theme definitions
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: Vec<ThemeDefinition>,
    default_id: String,
}

impl ThemeRegistry {
    /// Build a registry, validating ids and color key sets
    ///
    /// A registry whose default id names no theme is still returned, but
    /// [`is_misconfigured`](Self::is_misconfigured) reports it and every
    /// application path turns into a no-op.
    pub fn new(themes: Vec<ThemeDefinition>, default_id: impl Into<String>) -> Result<Self> {
        let registry = Self {
            themes,
            default_id: default_id.into(),
        };
        registry.validate()?;

        if registry.is_misconfigured() {
            debug::log_category(
                "REGISTRY",
                &format!("default theme '{}' is not in the catalog", registry.default_id),
            );
        }

        Ok(registry)
    }

    /// The built-in catalog with Midnight as the hard default
    pub fn builtin() -> Self {
        Self {
            themes: builtin_themes(),
            default_id: DEFAULT_THEME_ID.to_string(),
        }
    }

    /// Built-in catalog followed by the themes of a TOML catalog file
    pub fn with_catalog_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme catalog: {}", path.display()))?;
        let extra = parse_catalog(&content)
            .with_context(|| format!("Failed to parse theme catalog: {}", path.display()))?;

        let mut themes = builtin_themes();
        themes.extend(extra);
        Self::new(themes, DEFAULT_THEME_ID)
    }

    /// Check id uniqueness and key-set equality against the default theme
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for theme in &self.themes {
            if !seen.insert(theme.id.as_str()) {
                bail!("Duplicate theme id: {}", theme.id);
            }
        }

        let Some(default) = self.default_theme() else {
            return Ok(());
        };

        for theme in &self.themes {
            if let Some(missing) = default.colors.keys().find(|k| !theme.colors.contains_key(k)) {
                bail!("Theme '{}' is missing color {}", theme.id, missing);
            }
            if let Some(extra) = theme.colors.keys().find(|k| !default.colors.contains_key(k)) {
                bail!(
                    "Theme '{}' defines color {} which '{}' does not",
                    theme.id,
                    extra,
                    default.id
                );
            }
        }

        Ok(())
    }

    /// All themes in catalog order
    pub fn list_themes(&self) -> &[ThemeDefinition] {
        &self.themes
    }

    pub fn list_dark_themes(&self) -> Vec<&ThemeDefinition> {
        self.list_by_mode(ThemeMode::Dark)
    }

    pub fn list_light_themes(&self) -> Vec<&ThemeDefinition> {
        self.list_by_mode(ThemeMode::Light)
    }

    pub fn list_by_mode(&self, mode: ThemeMode) -> Vec<&ThemeDefinition> {
        self.themes.iter().filter(|t| t.mode == mode).collect()
    }

    pub fn get(&self, id: &str) -> Option<&ThemeDefinition> {
        self.themes.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn default_id(&self) -> &str {
        &self.default_id
    }

    pub fn default_theme(&self) -> Option<&ThemeDefinition> {
        self.get(&self.default_id)
    }

    /// True when the hard default itself is missing from the catalog
    pub fn is_misconfigured(&self) -> bool {
        self.default_theme().is_none()
    }

    /// The closed set of CSS variables any theme may write
    pub fn canonical_keys(&self) -> Vec<&str> {
        self.default_theme()
            .map(|t| t.colors.keys().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

// ==================== Catalog file ====================

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "theme")]
    themes: Vec<CatalogTheme>,
}

#[derive(Debug, Deserialize)]
struct CatalogTheme {
    id: String,
    mode: ThemeMode,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    bg_preview: Option<String>,
    #[serde(default)]
    accent_preview: Option<String>,
    colors: BTreeMap<String, String>,
}

impl From<CatalogTheme> for ThemeDefinition {
    fn from(entry: CatalogTheme) -> Self {
        let bg_preview = entry
            .bg_preview
            .or_else(|| entry.colors.get("--background").cloned())
            .unwrap_or_default();
        let accent_preview = entry
            .accent_preview
            .or_else(|| entry.colors.get("--primary").cloned())
            .unwrap_or_default();

        Self {
            name: entry.name.unwrap_or_else(|| entry.id.clone()),
            id: entry.id,
            mode: entry.mode,
            description: entry.description,
            bg_preview,
            accent_preview,
            colors: entry.colors.into(),
        }
    }
}

/// Parse `[[theme]]` tables from a catalog file
pub fn parse_catalog(content: &str) -> Result<Vec<ThemeDefinition>> {
    let file: CatalogFile = toml::from_str(content).context("Invalid theme catalog")?;
    Ok(file.themes.into_iter().map(ThemeDefinition::from).collect())
}
