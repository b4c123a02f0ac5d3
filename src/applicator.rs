//! Runtime theme application
//!
//! [`ThemeApplicator`] owns the document and is its only writer. Every
//! application writes the color overrides, the mode class pair and the
//! `color-scheme` hint in one synchronous call, and the mode indicators are
//! always taken from the applied theme.
//!
//! Applying never persists anything; remembering a choice is the job of
//! [`crate::controller::ThemeController`].

use crate::debug;
use crate::document::Document;
use crate::registry::ThemeRegistry;
use crate::store::CodeThemePrefs;
use crate::theme::{ThemeDefinition, ThemeMode};

/// Single writer of theme state into a [`Document`]
#[derive(Debug)]
pub struct ThemeApplicator<'r, D> {
    registry: &'r ThemeRegistry,
    document: D,
}

impl<'r, D: Document> ThemeApplicator<'r, D> {
    pub fn new(registry: &'r ThemeRegistry, document: D) -> Self {
        Self { registry, document }
    }

    /// Apply a theme by id
    ///
    /// Unknown ids and the default id clear every override so the
    /// stylesheet's own palette shows through. Returns the theme whose mode
    /// was applied, or `None` (with the document untouched) when the
    /// registry has no hard default.
    pub fn apply(&mut self, theme_id: &str) -> Option<&'r ThemeDefinition> {
        let registry = self.registry;
        let Some(default) = registry.default_theme() else {
            debug::log_category(
                "APPLY",
                &format!("skipping '{theme_id}': default theme missing"),
            );
            return None;
        };

        let keys = registry.canonical_keys();
        let theme = match registry.get(theme_id) {
            Some(theme) if theme.id != default.id => {
                for key in &keys {
                    if let Some(value) = theme.colors.get(key) {
                        self.document.set_property(key, value);
                    }
                }
                theme
            }
            _ => {
                for key in &keys {
                    self.document.remove_property(key);
                }
                default
            }
        };

        self.set_mode(theme.mode);
        debug::log_apply(&theme.id, theme.mode.as_str());
        Some(theme)
    }

    /// Write the code viewer variables from `code-theme-prefs`
    pub fn apply_code_prefs(&mut self, prefs: &CodeThemePrefs) {
        for (name, value) in prefs.css_overrides() {
            self.document.set_property(name, &value);
        }
    }

    fn set_mode(&mut self, mode: ThemeMode) {
        self.document.add_class(mode.class_name());
        self.document.remove_class(mode.opposite().class_name());
        self.document.set_color_scheme(mode.color_scheme());
    }

    pub fn registry(&self) -> &'r ThemeRegistry {
        self.registry
    }

    /// Read-only view of the document
    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }
}
