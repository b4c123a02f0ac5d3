//! Script command implementation

use anyhow::{Context, Result};
use hubtheme::{BootstrapScriptGenerator, Config};
use std::fs;
use std::path::Path;

/// Run the script command
pub fn run_script(config: &Config, raw: bool, nonce: Option<&str>, out: Option<&Path>) -> Result<()> {
    let registry = config.registry()?;
    if registry.is_misconfigured() {
        eprintln!(
            "⚠️  Default theme '{}' is missing; the script will leave the page untouched",
            registry.default_id()
        );
    }

    let generator = BootstrapScriptGenerator::new(&registry);
    let output = if raw || !config.script.tag {
        generator.generate()?
    } else {
        generator.generate_tag(nonce.or(config.script.nonce.as_deref()))?
    };

    match out {
        Some(path) => {
            fs::write(path, format!("{output}\n"))
                .with_context(|| format!("Failed to write script: {}", path.display()))?;
            eprintln!("✅ Wrote bootstrap script to {}", path.display());
        }
        None => println!("{output}"),
    }

    Ok(())
}
