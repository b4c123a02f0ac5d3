//! Preference storage
//!
//! [`KeyValueStore`] is the persistent backend (browser storage in the page,
//! a JSON file for the CLI, a map in tests). [`Preferences`] layers typed
//! accessors over it: reads never fail and writes are fire-and-forget.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::debug;
use crate::theme::ThemeMode;

#[cfg(test)]
use mockall::automock;

// ==================== Keys ====================

/// Persisted key surface; names are stable and must not change
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrefKey {
    /// Last resolved active theme id
    ColorTheme,
    /// Remembered preferred dark theme
    DarkTheme,
    /// Remembered preferred light theme
    LightTheme,
    /// Cached mode of the active theme
    Mode,
    /// Code viewer overrides, JSON
    CodeThemePrefs,
}

impl PrefKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrefKey::ColorTheme => "color-theme",
            PrefKey::DarkTheme => "dark-theme",
            PrefKey::LightTheme => "light-theme",
            PrefKey::Mode => "theme",
            PrefKey::CodeThemePrefs => "code-theme-prefs",
        }
    }

    pub fn all() -> &'static [PrefKey] {
        &[
            PrefKey::ColorTheme,
            PrefKey::DarkTheme,
            PrefKey::LightTheme,
            PrefKey::Mode,
            PrefKey::CodeThemePrefs,
        ]
    }

    /// Slot holding the preferred theme for a mode
    pub fn preferred_for(mode: ThemeMode) -> PrefKey {
        match mode {
            ThemeMode::Dark => PrefKey::DarkTheme,
            ThemeMode::Light => PrefKey::LightTheme,
        }
    }
}

impl fmt::Display for PrefKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==================== Code viewer prefs ====================

/// CSS variables written from `code-theme-prefs`
pub const CODE_BG_VAR: &str = "--code-theme-bg";
pub const CODE_FONT_VAR: &str = "--code-font-override";
pub const CODE_FONT_SIZE_VAR: &str = "--code-font-size";

/// Font size as stored by the code viewer, either a number of pixels or text
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FontSize {
    Pixels(f64),
    Text(String),
}

impl FontSize {
    /// CSS length, or `None` for values the viewer treats as unset
    pub fn to_css(&self) -> Option<String> {
        match self {
            FontSize::Pixels(px) if *px != 0.0 && px.is_finite() => Some(format!("{px}px")),
            FontSize::Pixels(_) => None,
            FontSize::Text(text) if !text.is_empty() => Some(format!("{text}px")),
            FontSize::Text(_) => None,
        }
    }
}

/// Opaque code viewer preferences, only read here
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeThemePrefs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSize>,
}

impl CodeThemePrefs {
    /// Pick each field out of a JSON object on its own
    ///
    /// A field of the wrong type is ignored without affecting its siblings,
    /// the same as the bootstrap script. `None` when `value` is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);
        let font_size = match object.get("fontSize") {
            Some(Value::Number(n)) => n.as_f64().map(FontSize::Pixels),
            Some(Value::String(s)) => Some(FontSize::Text(s.clone())),
            _ => None,
        };

        Some(Self {
            bg: text("bg"),
            font: text("font"),
            font_size,
        })
    }

    /// Variables to set, skipping empty entries
    pub fn css_overrides(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if let Some(bg) = self.bg.as_deref().filter(|v| !v.is_empty()) {
            out.push((CODE_BG_VAR, bg.to_string()));
        }
        if let Some(font) = self.font.as_deref().filter(|v| !v.is_empty()) {
            out.push((CODE_FONT_VAR, font.to_string()));
        }
        if let Some(size) = self.font_size.as_ref().and_then(FontSize::to_css) {
            out.push((CODE_FONT_SIZE_VAR, size));
        }
        out
    }
}

// ==================== Backends ====================

/// Persistent string key-value backend (allows mocking)
#[cfg_attr(test, automock)]
pub trait KeyValueStore {
    /// Read a key; `Ok(None)` when absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a key
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for seeding state
    pub fn with(mut self, key: PrefKey, value: impl Into<String>) -> Self {
        self.values.insert(key.as_str().to_string(), value.into());
        self
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|v| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object file, read on every access
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file; a missing file is an empty store
    pub fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read preference file: {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse preference file: {}", self.path.display()))
    }

    fn save(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        let content =
            serde_json::to_string_pretty(values).context("Failed to serialize preferences")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write preference file: {}", self.path.display()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        self.save(&values)
    }
}

// ==================== Typed accessors ====================

/// Typed view of the persisted theme preferences
#[derive(Debug, Clone, Default)]
pub struct Preferences<S> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read a key; backend failures and empty strings read as absent
    pub fn get(&self, key: PrefKey) -> Option<String> {
        match self.store.get(key.as_str()) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                debug::log_store_error("get", key.as_str(), &e);
                None
            }
        }
    }

    /// Write a key; backend failures are logged and dropped
    pub fn set(&mut self, key: PrefKey, value: &str) {
        if let Err(e) = self.store.set(key.as_str(), value) {
            debug::log_store_error("set", key.as_str(), &e);
        }
    }

    pub fn color_theme(&self) -> Option<String> {
        self.get(PrefKey::ColorTheme)
    }

    pub fn set_color_theme(&mut self, id: &str) {
        self.set(PrefKey::ColorTheme, id);
    }

    pub fn dark_theme(&self) -> String {
        self.preferred_theme(ThemeMode::Dark)
    }

    pub fn light_theme(&self) -> String {
        self.preferred_theme(ThemeMode::Light)
    }

    /// Remembered theme for a mode, or that mode's default
    pub fn preferred_theme(&self, mode: ThemeMode) -> String {
        self.get(PrefKey::preferred_for(mode))
            .unwrap_or_else(|| mode.default_theme_id().to_string())
    }

    pub fn set_preferred_theme(&mut self, mode: ThemeMode, id: &str) {
        self.set(PrefKey::preferred_for(mode), id);
    }

    /// Cached mode; diagnostic only, never used for resolution
    pub fn active_mode(&self) -> Option<ThemeMode> {
        self.get(PrefKey::Mode).and_then(|m| m.parse().ok())
    }

    pub fn set_active_mode(&mut self, mode: ThemeMode) {
        self.set(PrefKey::Mode, mode.as_str());
    }

    /// Parsed code viewer prefs; malformed JSON reads as absent
    pub fn code_theme_prefs(&self) -> Option<CodeThemePrefs> {
        let raw = self.get(PrefKey::CodeThemePrefs)?;
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => CodeThemePrefs::from_value(&value),
            Err(e) => {
                debug::log_category("STORE", &format!("ignoring malformed code-theme-prefs: {e}"));
                None
            }
        }
    }

    pub fn set_code_theme_prefs(&mut self, prefs: &CodeThemePrefs) {
        match serde_json::to_string(prefs) {
            Ok(json) => self.set(PrefKey::CodeThemePrefs, &json),
            Err(e) => debug::log_category("STORE", &format!("failed to encode code-theme-prefs: {e}")),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
