//! Theme definitions for hubtheme
//!
//! A theme is a named, immutable bundle of a light/dark [`ThemeMode`] and a
//! complete set of CSS custom property values. The built-in catalog ships
//! Midnight (the hard default), Hub Dark, Hub Light, Ember, Arctic and Dawn.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::str::FromStr;

// ==================== Well-known ids ====================

/// Hard default theme, used whenever resolution cannot produce a valid id
pub const DEFAULT_THEME_ID: &str = "midnight";

/// Preferred dark theme when nothing has been remembered yet
pub const DEFAULT_DARK_THEME_ID: &str = "midnight";

/// Preferred light theme when nothing has been remembered yet
pub const DEFAULT_LIGHT_THEME_ID: &str = "hub-light";

// ==================== ThemeMode ====================

/// The binary light/dark partition every theme belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    /// Stored and serialized form (`"dark"` / `"light"`)
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    /// Class name set on the document element while this mode is active
    pub fn class_name(&self) -> &'static str {
        self.as_str()
    }

    /// Value of the `color-scheme` hint while this mode is active
    pub fn color_scheme(&self) -> &'static str {
        self.as_str()
    }

    pub fn opposite(&self) -> ThemeMode {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn all() -> &'static [ThemeMode] {
        &[ThemeMode::Dark, ThemeMode::Light]
    }

    /// Preferred theme used for this mode when none has been remembered
    pub fn default_theme_id(&self) -> &'static str {
        match self {
            ThemeMode::Dark => DEFAULT_DARK_THEME_ID,
            ThemeMode::Light => DEFAULT_LIGHT_THEME_ID,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dark" => Ok(ThemeMode::Dark),
            "light" => Ok(ThemeMode::Light),
            _ => Err(()),
        }
    }
}

impl Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==================== ThemeColors ====================

/// Ordered mapping from CSS custom property name to color value
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThemeColors {
    entries: Vec<(String, String)>,
}

impl ThemeColors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value, keeping the original position on replace
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<&[(&str, &str)]> for ThemeColors {
    fn from(pairs: &[(&str, &str)]) -> Self {
        let mut colors = ThemeColors::new();
        for (key, value) in pairs {
            colors.insert(*key, *value);
        }
        colors
    }
}

impl From<BTreeMap<String, String>> for ThemeColors {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self {
            entries: map.into_iter().collect(),
        }
    }
}

impl Serialize for ThemeColors {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// ==================== ThemeDefinition ====================

/// Complete theme definition: identity, mode, colors and display metadata
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeDefinition {
    pub id: String,
    pub mode: ThemeMode,
    pub colors: ThemeColors,
    pub name: String,
    pub description: String,
    /// Swatch shown in the theme picker
    pub bg_preview: String,
    pub accent_preview: String,
}

impl ThemeDefinition {
    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }
}

/// Compile-time theme table, converted to a [`ThemeDefinition`] at startup
#[derive(Debug)]
pub struct BuiltinTheme {
    pub id: &'static str,
    pub mode: ThemeMode,
    pub name: &'static str,
    pub description: &'static str,
    pub bg_preview: &'static str,
    pub accent_preview: &'static str,
    pub colors: &'static [(&'static str, &'static str)],
}

impl From<&BuiltinTheme> for ThemeDefinition {
    fn from(theme: &BuiltinTheme) -> Self {
        Self {
            id: theme.id.to_string(),
            mode: theme.mode,
            colors: ThemeColors::from(theme.colors),
            name: theme.name.to_string(),
            description: theme.description.to_string(),
            bg_preview: theme.bg_preview.to_string(),
            accent_preview: theme.accent_preview.to_string(),
        }
    }
}

// ==================== Theme Definitions ====================

/// Midnight - neutral near-black, the stylesheet's own palette
pub const MIDNIGHT: BuiltinTheme = BuiltinTheme {
    id: "midnight",
    mode: ThemeMode::Dark,
    name: "Midnight",
    description: "Neutral dark, the default look",
    bg_preview: "#0a0a0b",
    accent_preview: "#ededed",
    colors: &[
        ("--background", "#0a0a0b"),
        ("--foreground", "#ededed"),
        ("--card", "#111113"),
        ("--card-foreground", "#ededed"),
        ("--primary", "#ededed"),
        ("--primary-foreground", "#0a0a0b"),
        ("--secondary", "#1a1a1d"),
        ("--secondary-foreground", "#d4d4d8"),
        ("--muted", "#18181b"),
        ("--muted-foreground", "#8b8b93"),
        ("--accent", "#1f1f23"),
        ("--accent-foreground", "#f4f4f5"),
        ("--destructive", "#ef4444"),
        ("--border", "#27272a"),
        ("--input", "#27272a"),
        ("--ring", "#52525b"),
    ],
};

/// Hub Dark - GitHub's dark dimmed palette
pub const HUB_DARK: BuiltinTheme = BuiltinTheme {
    id: "hub-dark",
    mode: ThemeMode::Dark,
    name: "Hub Dark",
    description: "Familiar GitHub dark colors",
    bg_preview: "#0d1117",
    accent_preview: "#2f81f7",
    colors: &[
        ("--background", "#0d1117"),
        ("--foreground", "#e6edf3"),
        ("--card", "#161b22"),
        ("--card-foreground", "#e6edf3"),
        ("--primary", "#2f81f7"),
        ("--primary-foreground", "#ffffff"),
        ("--secondary", "#21262d"),
        ("--secondary-foreground", "#c9d1d9"),
        ("--muted", "#161b22"),
        ("--muted-foreground", "#7d8590"),
        ("--accent", "#1f6feb"),
        ("--accent-foreground", "#ffffff"),
        ("--destructive", "#f85149"),
        ("--border", "#30363d"),
        ("--input", "#30363d"),
        ("--ring", "#388bfd"),
    ],
};

/// Hub Light - GitHub's light palette, the default light theme
pub const HUB_LIGHT: BuiltinTheme = BuiltinTheme {
    id: "hub-light",
    mode: ThemeMode::Light,
    name: "Hub Light",
    description: "Familiar GitHub light colors",
    bg_preview: "#ffffff",
    accent_preview: "#0969da",
    colors: &[
        ("--background", "#ffffff"),
        ("--foreground", "#1f2328"),
        ("--card", "#f6f8fa"),
        ("--card-foreground", "#1f2328"),
        ("--primary", "#0969da"),
        ("--primary-foreground", "#ffffff"),
        ("--secondary", "#eaeef2"),
        ("--secondary-foreground", "#24292f"),
        ("--muted", "#f6f8fa"),
        ("--muted-foreground", "#656d76"),
        ("--accent", "#ddf4ff"),
        ("--accent-foreground", "#0969da"),
        ("--destructive", "#cf222e"),
        ("--border", "#d0d7de"),
        ("--input", "#d0d7de"),
        ("--ring", "#0969da"),
    ],
};

/// Ember - warm paper tones with an orange accent
pub const EMBER: BuiltinTheme = BuiltinTheme {
    id: "ember",
    mode: ThemeMode::Light,
    name: "Ember",
    description: "Warm paper with an ember accent",
    bg_preview: "#fdf8f3",
    accent_preview: "#c2410c",
    colors: &[
        ("--background", "#fdf8f3"),
        ("--foreground", "#2b1d14"),
        ("--card", "#f8efe6"),
        ("--card-foreground", "#2b1d14"),
        ("--primary", "#c2410c"),
        ("--primary-foreground", "#fff7ed"),
        ("--secondary", "#f3e5d8"),
        ("--secondary-foreground", "#4a3426"),
        ("--muted", "#f5ebe1"),
        ("--muted-foreground", "#8a6d5a"),
        ("--accent", "#fed7aa"),
        ("--accent-foreground", "#7c2d12"),
        ("--destructive", "#b91c1c"),
        ("--border", "#e7d5c4"),
        ("--input", "#e7d5c4"),
        ("--ring", "#ea580c"),
    ],
};

/// Arctic - cold navy with ice-blue highlights
pub const ARCTIC: BuiltinTheme = BuiltinTheme {
    id: "arctic",
    mode: ThemeMode::Dark,
    name: "Arctic",
    description: "Deep navy with ice-blue highlights",
    bg_preview: "#0b1220",
    accent_preview: "#7dd3fc",
    colors: &[
        ("--background", "#0b1220"),
        ("--foreground", "#e2e8f0"),
        ("--card", "#111a2e"),
        ("--card-foreground", "#e2e8f0"),
        ("--primary", "#7dd3fc"),
        ("--primary-foreground", "#0b1220"),
        ("--secondary", "#1e293b"),
        ("--secondary-foreground", "#cbd5e1"),
        ("--muted", "#15203a"),
        ("--muted-foreground", "#8094b4"),
        ("--accent", "#164e63"),
        ("--accent-foreground", "#e0f2fe"),
        ("--destructive", "#f87171"),
        ("--border", "#1f2d47"),
        ("--input", "#1f2d47"),
        ("--ring", "#38bdf8"),
    ],
};

/// Dawn - soft lilac morning light
pub const DAWN: BuiltinTheme = BuiltinTheme {
    id: "dawn",
    mode: ThemeMode::Light,
    name: "Dawn",
    description: "Soft lilac morning light",
    bg_preview: "#faf7fb",
    accent_preview: "#907aa9",
    colors: &[
        ("--background", "#faf7fb"),
        ("--foreground", "#26233a"),
        ("--card", "#f2edf5"),
        ("--card-foreground", "#26233a"),
        ("--primary", "#907aa9"),
        ("--primary-foreground", "#ffffff"),
        ("--secondary", "#ebe4f0"),
        ("--secondary-foreground", "#3b3652"),
        ("--muted", "#f0ebf3"),
        ("--muted-foreground", "#797593"),
        ("--accent", "#f6c1c7"),
        ("--accent-foreground", "#575279"),
        ("--destructive", "#b4637a"),
        ("--border", "#dfdad9"),
        ("--input", "#dfdad9"),
        ("--ring", "#907aa9"),
    ],
};

/// Built-in catalog in display order
pub fn builtin_themes() -> Vec<ThemeDefinition> {
    [&MIDNIGHT, &HUB_DARK, &HUB_LIGHT, &EMBER, &ARCTIC, &DAWN]
        .into_iter()
        .map(ThemeDefinition::from)
        .collect()
}

// ==================== Tests ====================
