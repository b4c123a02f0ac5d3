//! Preference commands: resolve, apply, set and toggle
//!
//! Each command replays one page interaction against the file-backed
//! preference store named in the config.

use anyhow::{Result, bail};
use hubtheme::{
    Config, DisplayState, FileStore, Preferences, ThemeController, ThemeRegistry, resolver, system,
};

fn open(config: &Config) -> Result<(ThemeRegistry, FileStore)> {
    Ok((config.registry()?, FileStore::new(&config.store_path)))
}

fn prefers_dark(config: &Config, cli_override: Option<bool>) -> bool {
    system::prefers_dark_with_override(cli_override.or(config.system.prefers_dark))
}

/// Run the resolve command
pub fn run_resolve(config: &Config, cli_override: Option<bool>) -> Result<()> {
    let (registry, store) = open(config)?;
    let mut prefs = Preferences::new(store);

    let id = resolver::resolve_id(&mut prefs, &registry, prefers_dark(config, cli_override));
    println!("{id}");
    Ok(())
}

/// Run the apply command
pub fn run_apply(config: &Config, cli_override: Option<bool>) -> Result<()> {
    let (registry, store) = open(config)?;
    let mut controller = ThemeController::new(&registry, store, DisplayState::new());

    if controller.init(prefers_dark(config, cli_override)).is_none() {
        bail!(
            "Default theme '{}' is missing from the catalog; nothing applied",
            registry.default_id()
        );
    }

    println!("<html {}>", controller.document().to_html_attributes());
    Ok(())
}

/// Run the set command
pub fn run_set(config: &Config, id: &str) -> Result<()> {
    let (registry, store) = open(config)?;
    let mut controller = ThemeController::new(&registry, store, DisplayState::new());

    controller.set_color_theme(id)?;
    match controller.mode() {
        Some(mode) => println!("✅ Theme set to {id} ({mode} mode)"),
        None => println!("✅ Theme set to {id}"),
    }
    Ok(())
}

/// Run the toggle command
pub fn run_toggle(config: &Config, cli_override: Option<bool>) -> Result<()> {
    let (registry, store) = open(config)?;
    let mut controller = ThemeController::new(&registry, store, DisplayState::new());

    let Some(before) = controller.init(prefers_dark(config, cli_override)) else {
        bail!(
            "Default theme '{}' is missing from the catalog; nothing applied",
            registry.default_id()
        );
    };

    controller.toggle_mode();
    if let Some(after) = controller.active_theme() {
        println!("🌓 {} -> {} ({} mode)", before.id, after.id, after.mode);
    }
    Ok(())
}
