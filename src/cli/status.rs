//! Status command implementation

use colored::Colorize;

use crate::cache::now_millis;
use crate::cli::args::GlobalOptions;
use crate::cli::context::CommandContext;
use crate::config::Config;
use crate::directory::load_shelters;
use crate::error::Result;

/// Show configuration, credential, directory and cache status
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "sheltermap Status".bold());

    let config_path = Config::path_or_default(opts.config_ref())?;
    let config = match Config::load_at(opts.config_ref()) {
        Ok(config) => {
            println!("Config file: {}", config_path.display().to_string().cyan());
            config
        }
        Err(e) if config_path.exists() => return Err(e),
        Err(_) => {
            println!("{} Configuration not found", "✗".red());
            println!(
                "  → Run {} to create {}",
                "sheltermap init".cyan(),
                config_path.display()
            );
            Config::default()
        }
    };
    println!();

    let ctx = CommandContext::with_config(config, opts);
    let geocoding = &ctx.config.geocoding;

    // Geocoding service
    if geocoding
        .api_key
        .as_deref()
        .is_some_and(|k| !k.trim().is_empty())
    {
        println!("{} Geocoding API key configured", "✓".green());
    } else {
        println!(
            "{} No geocoding API key (offline neighborhood lookup only)",
            "⚠".yellow()
        );
    }
    if let Some(host) = &geocoding.api_host {
        println!("{} Custom API host: {}", "○".dimmed(), host.cyan());
    }
    println!(
        "{} Region suffix: {}",
        "○".dimmed(),
        geocoding.region_suffix
    );
    if geocoding.min_interval_ms > 0 {
        println!(
            "{} At most one request every {} ms",
            "○".dimmed(),
            geocoding.min_interval_ms
        );
    } else {
        println!("{} Request throttling disabled", "⚠".yellow());
    }

    // Directory
    match ctx.directory() {
        Ok(directory) => match load_shelters(directory.as_ref()).await {
            Ok(listing) => println!(
                "{} Directory {}: {} shelters ({} excluded)",
                "✓".green(),
                directory.describe().cyan(),
                listing.shelters.len(),
                listing.excluded
            ),
            Err(e) => println!("{} Directory {}: {}", "✗".red(), directory.describe(), e),
        },
        Err(e) => println!("{} {}", "✗".red(), e),
    }

    // Cache
    match ctx.sqlite_cache() {
        Ok(cache) => match cache.stats(now_millis()) {
            Ok(stats) => {
                println!(
                    "{} Cache {}: {} entries ({} fresh, {} stale)",
                    "✓".green(),
                    cache.db_path().display().to_string().cyan(),
                    stats.total_entries,
                    stats.fresh_entries,
                    stats.stale_entries
                );
                if stats.corrupt_entries > 0 {
                    println!(
                        "{} {} unreadable cache entries (run `sheltermap cache clear`)",
                        "⚠".yellow(),
                        stats.corrupt_entries
                    );
                }
            }
            Err(e) => println!("{} Cache unreadable: {}", "✗".red(), e),
        },
        Err(e) => println!("{} Cache unavailable: {}", "✗".red(), e),
    }

    println!();
    Ok(())
}
