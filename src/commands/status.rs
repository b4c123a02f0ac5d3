//! Status command implementation

use anyhow::Result;
use hubtheme::{Config, FileStore, PrefKey, Preferences, system};
use std::path::Path;

/// Run the status command
pub fn run_status(config: &Config, config_path: &Path) -> Result<()> {
    println!("hubtheme Status\n");

    // Config
    if config_path.exists() {
        println!("⚙️  Configuration: ✅ {}", config_path.display());
    } else {
        println!("⚙️  Configuration: ⚠️  Using defaults");
    }

    // Catalog
    match config.registry() {
        Ok(registry) => {
            println!(
                "🎨 Catalog: {} themes ({} dark, {} light)",
                registry.len(),
                registry.list_dark_themes().len(),
                registry.list_light_themes().len()
            );
            if registry.is_misconfigured() {
                println!(
                    "   ❌ Default theme '{}' is missing; themes will not be applied",
                    registry.default_id()
                );
            } else {
                println!("   Default: {}", registry.default_id());
            }
        }
        Err(e) => println!("🎨 Catalog: ❌ {e:#}"),
    }

    // System preference
    let scheme = |dark: bool| if dark { "dark" } else { "light" };
    match config.system.prefers_dark {
        Some(dark) => println!("🖥️  System scheme: {} (from config)", scheme(dark)),
        None => println!("🖥️  System scheme: {}", scheme(system::system_prefers_dark())),
    }

    // Stored preferences
    let store = FileStore::new(&config.store_path);
    println!("\n💾 Preferences: {}", store.path().display());
    if let Err(e) = store.load() {
        println!("   ❌ {e:#}");
        return Ok(());
    }

    let prefs = Preferences::new(store);
    for key in PrefKey::all() {
        match prefs.get(*key) {
            Some(value) => println!("   {:<17} {value}", key.as_str()),
            None => println!("   {:<17} (unset)", key.as_str()),
        }
    }

    Ok(())
}
