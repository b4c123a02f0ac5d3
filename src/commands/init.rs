//! Init command implementation

use anyhow::{Context, Result};
use hubtheme::Config;
use hubtheme::debug::DEBUG_LOG_FILE;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Run the init command
pub fn run_init(config_path: &Path, force: bool) -> Result<()> {
    println!("🚀 Initializing hubtheme...\n");

    // 1. Create config if not exists
    if !config_path.exists() || force {
        Config::generate_default(config_path)?;
        println!("✅ Created configuration: {}", config_path.display());
    } else {
        println!("📄 Configuration file already exists (use --force to overwrite)");
    }

    // 2. Create the preference store directory
    let config = Config::load_from(config_path)?;
    if let Some(store_dir) = config.store_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !store_dir.exists() {
            fs::create_dir_all(store_dir)
                .with_context(|| format!("Failed to create directory: {}", store_dir.display()))?;
            println!("✅ Created {}/ directory", store_dir.display());
        } else {
            println!("📁 {}/ directory already exists", store_dir.display());
        }
    }

    // 3. Update .gitignore
    let store_entry = config.store_path.to_string_lossy().into_owned();
    update_gitignore(Path::new(".gitignore"), &[store_entry.as_str(), DEBUG_LOG_FILE])?;

    println!("\n🎉 hubtheme initialization complete!");
    println!("\nNext steps:");
    println!("  1. 'hubtheme script --out head.html' and include it first in <head>");
    println!("  2. 'hubtheme list' to see the available themes");

    Ok(())
}

/// Append missing entries under a `# hubtheme` header
fn update_gitignore(gitignore_path: &Path, entries: &[&str]) -> Result<()> {
    let existing = fs::read_to_string(gitignore_path).unwrap_or_default();
    let added: Vec<&str> = entries
        .iter()
        .copied()
        .filter(|entry| !existing.lines().any(|line| line.trim() == *entry))
        .collect();

    if added.is_empty() {
        return Ok(());
    }

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(gitignore_path)
        .with_context(|| format!("Failed to open {}", gitignore_path.display()))?;

    if !existing.is_empty() && !existing.ends_with('\n') {
        writeln!(file)?;
    }
    writeln!(file, "\n# hubtheme")?;
    for entry in &added {
        writeln!(file, "{entry}")?;
    }
    println!("✅ Updated .gitignore with hubtheme entries");

    Ok(())
}
