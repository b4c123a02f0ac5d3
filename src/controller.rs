//! Mode controller
//!
//! [`ThemeController`] is the one entry point UI code uses to change the
//! theme. It ties the preference store, the resolver and the applicator
//! together so that a selection is always remembered and applied in the
//! same call.

use anyhow::{Result, bail};

use crate::applicator::ThemeApplicator;
use crate::debug;
use crate::document::Document;
use crate::registry::ThemeRegistry;
use crate::resolver;
use crate::store::{KeyValueStore, Preferences};
use crate::theme::{ThemeDefinition, ThemeMode};

/// Owns the preferences and the document for one page
#[derive(Debug)]
pub struct ThemeController<'r, S, D> {
    registry: &'r ThemeRegistry,
    prefs: Preferences<S>,
    applicator: ThemeApplicator<'r, D>,
    active: Option<&'r ThemeDefinition>,
}

impl<'r, S: KeyValueStore, D: Document> ThemeController<'r, S, D> {
    pub fn new(registry: &'r ThemeRegistry, store: S, document: D) -> Self {
        Self {
            registry,
            prefs: Preferences::new(store),
            applicator: ThemeApplicator::new(registry, document),
            active: None,
        }
    }

    /// Resolve and apply the stored theme, as the bootstrap script does
    pub fn init(&mut self, system_prefers_dark: bool) -> Option<&'r ThemeDefinition> {
        let id = resolver::resolve_id(&mut self.prefs, self.registry, system_prefers_dark);
        let theme = self.applicator.apply(&id)?;
        self.prefs.set_active_mode(theme.mode);
        if let Some(code) = self.prefs.code_theme_prefs() {
            self.applicator.apply_code_prefs(&code);
        }
        self.active = Some(theme);
        Some(theme)
    }

    /// Mode of the applied theme, `None` until a theme has been applied
    pub fn mode(&self) -> Option<ThemeMode> {
        self.active.map(|t| t.mode)
    }

    pub fn active_theme(&self) -> Option<&'r ThemeDefinition> {
        self.active
    }

    /// Switch to the remembered theme of the opposite mode
    ///
    /// Leaves `dark-theme` and `light-theme` untouched. With nothing applied
    /// yet, the stylesheet's own palette counts as the current one.
    pub fn toggle_mode(&mut self) -> Option<ThemeMode> {
        let current = self.active.or_else(|| self.registry.default_theme())?;
        let target = current.mode.opposite();
        let id = self.prefs.preferred_theme(target);

        if let Some(theme) = self.applicator.apply(&id) {
            self.prefs.set_color_theme(&theme.id);
            self.prefs.set_active_mode(theme.mode);
            self.active = Some(theme);
            debug::log_category("TOGGLE", &format!("{target} -> {}", theme.id));
        }

        self.mode()
    }

    /// Select a theme explicitly and remember it for its own mode
    pub fn set_color_theme(&mut self, id: &str) -> Result<()> {
        let Some(theme) = self.registry.get(id) else {
            bail!("Unknown theme: {id}");
        };

        self.prefs.set_color_theme(&theme.id);
        self.prefs.set_preferred_theme(theme.mode, &theme.id);
        self.prefs.set_active_mode(theme.mode);

        if let Some(applied) = self.applicator.apply(&theme.id) {
            self.active = Some(applied);
        }
        Ok(())
    }

    /// Remembered dark theme, for the settings screen
    pub fn dark_theme_id(&self) -> String {
        self.prefs.dark_theme()
    }

    /// Remembered light theme, for the settings screen
    pub fn light_theme_id(&self) -> String {
        self.prefs.light_theme()
    }

    pub fn registry(&self) -> &'r ThemeRegistry {
        self.registry
    }

    pub fn preferences(&self) -> &Preferences<S> {
        &self.prefs
    }

    pub fn document(&self) -> &D {
        self.applicator.document()
    }

    /// Hand back the store and document, e.g. to persist or render them
    pub fn into_parts(self) -> (S, D) {
        (self.prefs.into_inner(), self.applicator.into_document())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DisplayState;
    use crate::store::{CODE_BG_VAR, MemoryStore, PrefKey};
    use crate::theme::{EMBER, builtin_themes};

    fn controller(
        registry: &ThemeRegistry,
        store: MemoryStore,
    ) -> ThemeController<'_, MemoryStore, DisplayState> {
        ThemeController::new(registry, store, DisplayState::new())
    }

    fn applied(registry: &ThemeRegistry, id: &str) -> DisplayState {
        let mut applicator = ThemeApplicator::new(registry, DisplayState::new());
        applicator.apply(id);
        applicator.into_document()
    }

    #[test]
    fn test_first_visit_dark() {
        let registry = ThemeRegistry::builtin();
        let mut ctl = controller(&registry, MemoryStore::new());

        let theme = ctl.init(true).unwrap();
        assert_eq!(theme.id, "midnight");
        assert_eq!(ctl.preferences().store().raw("color-theme"), Some("midnight"));
        assert_eq!(ctl.preferences().store().raw("theme"), Some("dark"));
        assert_eq!(ctl.mode(), Some(ThemeMode::Dark));
    }

    #[test]
    fn test_saved_light_theme() {
        let registry = ThemeRegistry::builtin();
        let mut ctl = controller(&registry, MemoryStore::new().with(PrefKey::ColorTheme, "ember"));
        ctl.init(true);

        let doc = ctl.document();
        assert!(doc.has_class("light"));
        assert!(!doc.has_class("dark"));
        assert_eq!(doc.color_scheme(), Some("light"));
        for (key, value) in EMBER.colors {
            assert_eq!(doc.property(key), Some(*value));
        }
        assert_eq!(ctl.mode(), Some(ThemeMode::Light));
    }

    #[test]
    fn test_removed_theme_matches_default() {
        let registry = ThemeRegistry::builtin();
        let mut ctl = controller(
            &registry,
            MemoryStore::new().with(PrefKey::ColorTheme, "removed-theme"),
        );
        ctl.init(false);

        assert_eq!(ctl.document(), &applied(&registry, "midnight"));
        assert_eq!(ctl.active_theme().map(|t| t.id.as_str()), Some("midnight"));
    }

    #[test]
    fn test_toggle_uses_remembered_variants() {
        let registry = ThemeRegistry::builtin();
        let store = MemoryStore::new()
            .with(PrefKey::ColorTheme, "hub-dark")
            .with(PrefKey::DarkTheme, "hub-dark")
            .with(PrefKey::LightTheme, "dawn");
        let mut ctl = controller(&registry, store);
        ctl.init(true);

        assert_eq!(ctl.toggle_mode(), Some(ThemeMode::Light));
        assert_eq!(ctl.active_theme().map(|t| t.id.as_str()), Some("dawn"));
        assert_eq!(ctl.preferences().store().raw("color-theme"), Some("dawn"));
        assert_eq!(ctl.preferences().store().raw("theme"), Some("light"));

        assert_eq!(ctl.toggle_mode(), Some(ThemeMode::Dark));
        assert_eq!(ctl.active_theme().map(|t| t.id.as_str()), Some("hub-dark"));
        assert_eq!(ctl.document(), &applied(&registry, "hub-dark"));
    }

    #[test]
    fn test_toggle_leaves_variant_slots() {
        let registry = ThemeRegistry::builtin();
        let mut ctl = controller(&registry, MemoryStore::new());
        ctl.init(true);
        ctl.toggle_mode();
        ctl.toggle_mode();

        let store = ctl.preferences().store();
        assert_eq!(store.raw("dark-theme"), None);
        assert_eq!(store.raw("light-theme"), None);
        assert_eq!(store.raw("color-theme"), Some("midnight"));
    }

    #[test]
    fn test_toggle_twice_restores_document() {
        let registry = ThemeRegistry::builtin();
        for id in ["midnight", "hub-dark", "hub-light", "ember", "arctic", "dawn"] {
            let mut ctl = controller(&registry, MemoryStore::new());
            ctl.set_color_theme(id).unwrap();
            let before = ctl.document().clone();

            ctl.toggle_mode();
            ctl.toggle_mode();
            assert_eq!(ctl.document(), &before, "{id}");
        }
    }

    #[test]
    fn test_toggle_with_stale_variant_falls_back() {
        let registry = ThemeRegistry::builtin();
        let mut ctl = controller(&registry, MemoryStore::new().with(PrefKey::LightTheme, "gone"));
        ctl.init(true);

        assert_eq!(ctl.toggle_mode(), Some(ThemeMode::Dark));
        assert_eq!(ctl.preferences().store().raw("color-theme"), Some("midnight"));
    }

    #[test]
    fn test_set_color_theme_updates_same_mode_slot_only() {
        let registry = ThemeRegistry::builtin();
        let mut ctl = controller(&registry, MemoryStore::new());
        ctl.init(true);

        ctl.set_color_theme("arctic").unwrap();
        assert_eq!(ctl.dark_theme_id(), "arctic");
        assert_eq!(ctl.light_theme_id(), "hub-light");
        assert_eq!(ctl.preferences().store().raw("light-theme"), None);

        ctl.set_color_theme("ember").unwrap();
        assert_eq!(ctl.dark_theme_id(), "arctic");
        assert_eq!(ctl.light_theme_id(), "ember");
        assert_eq!(ctl.mode(), Some(ThemeMode::Light));
    }

    #[test]
    fn test_set_unknown_theme_writes_nothing() {
        let registry = ThemeRegistry::builtin();
        let mut ctl = controller(&registry, MemoryStore::new());

        let err = ctl.set_color_theme("nope").unwrap_err();
        assert!(err.to_string().contains("nope"));
        assert!(ctl.preferences().store().is_empty());
        assert_eq!(ctl.document(), &DisplayState::new());
    }

    #[test]
    fn test_round_trip_through_store() {
        let registry = ThemeRegistry::builtin();
        for theme in registry.list_themes() {
            let mut ctl = controller(&registry, MemoryStore::new());
            ctl.set_color_theme(&theme.id).unwrap();
            let (store, doc) = ctl.into_parts();

            // A fresh page load with the opposite system signal
            let mut reload = controller(&registry, store);
            reload.init(!theme.is_dark());
            assert_eq!(reload.active_theme().map(|t| t.id.as_str()), Some(theme.id.as_str()));
            assert_eq!(reload.document(), &doc);
        }
    }

    #[test]
    fn test_init_applies_code_prefs() {
        let registry = ThemeRegistry::builtin();
        let store = MemoryStore::new()
            .with(PrefKey::ColorTheme, "dawn")
            .with(PrefKey::CodeThemePrefs, r##"{"bg":"#101010","fontSize":13}"##);
        let mut ctl = controller(&registry, store);
        ctl.init(false);

        assert_eq!(ctl.document().property(CODE_BG_VAR), Some("#101010"));
        assert_eq!(ctl.document().property("--code-font-size"), Some("13px"));
    }

    #[test]
    fn test_mode_unknown_until_applied() {
        let registry = ThemeRegistry::builtin();
        let mut ctl = controller(&registry, MemoryStore::new().with(PrefKey::ColorTheme, "ember"));
        assert_eq!(ctl.mode(), None);
        assert_eq!(ctl.document().mode(), None);

        ctl.init(true);
        assert_eq!(ctl.mode(), Some(ThemeMode::Light));
        assert_eq!(ctl.document().mode(), ctl.mode());
    }

    #[test]
    fn test_toggle_before_init_starts_from_default() {
        let registry = ThemeRegistry::builtin();
        let mut ctl = controller(&registry, MemoryStore::new());

        assert_eq!(ctl.toggle_mode(), Some(ThemeMode::Light));
        assert_eq!(ctl.active_theme().map(|t| t.id.as_str()), Some("hub-light"));
        assert_eq!(ctl.document().mode(), ctl.mode());
    }

    #[test]
    fn test_misconfigured_registry() {
        let themes = builtin_themes()
            .into_iter()
            .filter(|t| t.id != "midnight")
            .collect();
        let registry = ThemeRegistry::new(themes, "midnight").unwrap();
        let mut ctl = controller(&registry, MemoryStore::new().with(PrefKey::ColorTheme, "ember"));

        assert!(ctl.init(false).is_none());
        assert_eq!(ctl.toggle_mode(), None);
        assert_eq!(ctl.mode(), None);
        assert_eq!(ctl.document(), &DisplayState::new());
        assert!(ctl.active_theme().is_none());
    }
}
