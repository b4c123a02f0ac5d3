//! Theme resolution
//!
//! Turns persisted preferences plus the system light/dark signal into one
//! concrete theme id:
//!
//! 1. A stored `color-theme` always wins; the system signal is not consulted.
//! 2. Otherwise the remembered preferred theme for the system's mode is used
//!    and written back into `color-theme`, so step 1 short-circuits on every
//!    later call.
//! 3. An id the catalog does not know is replaced by the hard default.
//!
//! The generated bootstrap script runs the same steps; see [`crate::script`].

use crate::debug;
use crate::registry::ThemeRegistry;
use crate::store::{KeyValueStore, Preferences};
use crate::theme::{ThemeDefinition, ThemeMode};

/// Resolve the active theme id, writing the system-derived choice back
pub fn resolve_id<S: KeyValueStore>(
    prefs: &mut Preferences<S>,
    registry: &ThemeRegistry,
    system_prefers_dark: bool,
) -> String {
    let id = match prefs.color_theme() {
        Some(saved) => {
            debug::log_resolve("saved", &saved);
            saved
        }
        None => {
            let mode = if system_prefers_dark {
                ThemeMode::Dark
            } else {
                ThemeMode::Light
            };
            let provisional = prefs.preferred_theme(mode);
            prefs.set_color_theme(&provisional);
            debug::log_resolve(&format!("system {mode}"), &provisional);
            provisional
        }
    };

    if registry.contains(&id) {
        id
    } else {
        debug::log_resolve(&format!("unknown '{id}'"), registry.default_id());
        registry.default_id().to_string()
    }
}

/// Resolve to a catalog entry
///
/// `None` only when the registry's hard default is missing; callers must
/// then leave the document untouched.
pub fn resolve<'r, S: KeyValueStore>(
    prefs: &mut Preferences<S>,
    registry: &'r ThemeRegistry,
    system_prefers_dark: bool,
) -> Option<&'r ThemeDefinition> {
    let id = resolve_id(prefs, registry, system_prefers_dark);
    registry.default_theme()?;
    registry.get(&id)
}
