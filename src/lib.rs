//! hubtheme - theme engine for the Better Hub web front end
//!
//! Resolves the active color theme from persisted preferences and the system
//! light/dark signal, applies it to the document root, and generates the
//! inline bootstrap script that does the same before first paint.
//!
//! # Modules
//!
//! - [`theme`] - Theme definitions and the built-in catalog
//! - [`registry`] - Validated, read-only theme catalog
//! - [`store`] - Preference keys, storage backends and typed accessors
//! - [`system`] - System light/dark detection
//! - [`resolver`] - Preferences to theme id
//! - [`document`] - Root element surfaces a theme is written to
//! - [`applicator`] - Single writer of theme state into a document
//! - [`script`] - Pre-paint bootstrap script generation
//! - [`controller`] - Mode toggling and explicit theme selection
//! - [`config`] - `.hubtheme.toml` configuration

pub mod applicator;
pub mod config;
pub mod controller;
pub mod debug;
pub mod document;
pub mod registry;
pub mod resolver;
pub mod script;
pub mod store;
pub mod system;
pub mod theme;

// Re-export commonly used types
pub use applicator::ThemeApplicator;
pub use config::Config;
pub use controller::ThemeController;
pub use document::{DisplayState, Document};
pub use registry::ThemeRegistry;
pub use script::{BootstrapScriptGenerator, generate_theme_script};
pub use store::{CodeThemePrefs, FileStore, KeyValueStore, MemoryStore, PrefKey, Preferences};
pub use theme::{ThemeColors, ThemeDefinition, ThemeMode};
