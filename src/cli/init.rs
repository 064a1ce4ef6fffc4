//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// Prompts for the API key, directory source and region suffix, keeping any
/// existing values as defaults. Nothing is contacted during setup.
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to sheltermap!".bold().green());
    println!("Let's set up shelter geocoding.\n");

    let mut config = Config::load_at(opts.config_ref()).unwrap_or_default();
    let theme = ColorfulTheme::default();

    let api_key: String = Password::with_theme(&theme)
        .with_prompt("Geocoding API key (leave empty for offline lookup)")
        .allow_empty_password(true)
        .interact()?;
    if !api_key.trim().is_empty() {
        config.geocoding.api_key = Some(api_key.trim().to_string());
    }

    let source: String = Input::with_theme(&theme)
        .with_prompt("Shelter directory (JSON file path or URL)")
        .with_initial_text(config.directory.source.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    config.directory.source = Some(source.trim().to_string()).filter(|s| !s.is_empty());

    let region_suffix: String = Input::with_theme(&theme)
        .with_prompt("Region appended to every address")
        .default(config.geocoding.region_suffix.clone())
        .interact_text()?;
    config.geocoding.region_suffix = region_suffix.trim().to_string();

    let path = config.save_at(opts.config_ref())?;
    println!("\n{} Configuration saved to: {}", "✓".green(), path.display());

    if config.geocoding.api_key.is_none() {
        println!(
            "{} No API key set; shelters will be placed by neighborhood",
            "⚠".yellow()
        );
    }

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "sheltermap status".cyan());
    println!("  {} - Place every shelter on the map", "sheltermap resolve".cyan());

    Ok(())
}
