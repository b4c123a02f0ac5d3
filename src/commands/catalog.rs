//! List command implementation

use anyhow::Result;
use hubtheme::{Config, ThemeDefinition, ThemeMode};

/// Run the list command
pub fn run_list(config: &Config, mode: Option<ThemeMode>) -> Result<()> {
    let registry = config.registry()?;

    let themes: Vec<&ThemeDefinition> = match mode {
        Some(mode) => registry.list_by_mode(mode),
        None => registry.list_themes().iter().collect(),
    };

    if themes.is_empty() {
        println!("No themes found.");
        return Ok(());
    }

    let id_width = themes.iter().map(|t| t.id.len()).max().unwrap_or(0);
    for theme in themes {
        println!("{}", format_row(theme, theme.id == registry.default_id(), id_width));
    }

    Ok(())
}

fn format_row(theme: &ThemeDefinition, is_default: bool, id_width: usize) -> String {
    let marker = if is_default { "*" } else { " " };
    let mut row = format!(
        "{marker} {:<id_width$}  {:<5}  {} {}  {}",
        theme.id,
        theme.mode.as_str(),
        theme.bg_preview,
        theme.accent_preview,
        theme.name
    );
    if !theme.description.is_empty() {
        row.push_str(&format!(" - {}", theme.description));
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubtheme::theme::EMBER;

    #[test]
    fn test_format_row() {
        let theme = ThemeDefinition::from(&EMBER);
        let row = format_row(&theme, false, 9);

        assert!(row.starts_with("  ember      light  "));
        assert!(row.contains(&theme.bg_preview));
        assert!(row.ends_with("Ember - Warm paper with an ember accent"));
    }

    #[test]
    fn test_default_marker() {
        let theme = ThemeDefinition::from(&EMBER);
        assert!(format_row(&theme, true, 5).starts_with("* ember"));
    }
}
