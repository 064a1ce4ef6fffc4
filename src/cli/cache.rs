//! Cache management commands

use std::collections::HashSet;

use crate::cache::now_millis;
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::cli::context::CommandContext;
use crate::directory::load_shelters;
use crate::error::Result;
use crate::models::display::CacheEntryDisplay;
use crate::output::Formattable;
use crate::output::formatters::format_epoch_millis_local;
use crate::output::table::format_key_values;

/// Show cache status/statistics
pub fn status(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let cache = ctx.sqlite_cache()?;
    let stats = cache.stats(now_millis())?;

    match ctx.format {
        OutputFormat::Json | OutputFormat::GeoJson => {
            let json = serde_json::json!({
                "total_entries": stats.total_entries,
                "fresh_entries": stats.fresh_entries,
                "stale_entries": stats.stale_entries,
                "corrupt_entries": stats.corrupt_entries,
                "oldest_entry_timestamp": stats.oldest_entry,
                "newest_entry_timestamp": stats.newest_entry,
                "path": cache.db_path().display().to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Table => {
            let mut rows = vec![
                ("Location", cache.db_path().display().to_string()),
                ("Entries", stats.total_entries.to_string()),
                ("Fresh", stats.fresh_entries.to_string()),
                ("Stale", stats.stale_entries.to_string()),
            ];
            if stats.corrupt_entries > 0 {
                rows.push(("Corrupt", stats.corrupt_entries.to_string()));
            }
            if let Some(oldest) = stats.oldest_entry {
                rows.push(("Oldest", format_epoch_millis_local(oldest)));
            }
            if let Some(newest) = stats.newest_entry {
                rows.push(("Newest", format_epoch_millis_local(newest)));
            }
            println!("{}", format_key_values(&rows));
        }
        OutputFormat::Pretty => {
            println!("Coordinate Cache");
            println!("────────────────────────────────────────");
            println!("Location:       {}", cache.db_path().display());
            println!("Entries:        {}", stats.total_entries);
            println!("Fresh:          {}", stats.fresh_entries);
            println!("Stale:          {}", stats.stale_entries);
            if stats.corrupt_entries > 0 {
                println!("Corrupt:        {}", stats.corrupt_entries);
            }

            if let Some(oldest) = stats.oldest_entry {
                println!("Oldest entry:   {}", format_epoch_millis_local(oldest));
            }
            if let Some(newest) = stats.newest_entry {
                println!("Newest entry:   {}", format_epoch_millis_local(newest));
            }
        }
    }

    Ok(())
}

/// List cached coordinates, most recent first
pub fn list(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let cache = ctx.sqlite_cache()?;
    let now = now_millis();

    let mut entries = cache.entries()?;
    entries.sort_by(|a, b| b.1.resolved_at_epoch_millis.cmp(&a.1.resolved_at_epoch_millis));

    let rows: Vec<CacheEntryDisplay> = entries
        .iter()
        .map(|(address, entry)| CacheEntryDisplay::new(address, entry, now))
        .collect();

    rows.print(ctx.format)
}

/// Clear all cache entries
pub fn clear(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let stats = ctx.sqlite_cache()?.clear_all()?;

    match ctx.format {
        OutputFormat::Json | OutputFormat::GeoJson => {
            let json = serde_json::json!({
                "entries_removed": stats.entries_removed,
                "success": true,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            if stats.entries_removed > 0 {
                println!("Cleared {} cache entries", stats.entries_removed);
            } else {
                println!("Cache was already empty");
            }
        }
    }

    Ok(())
}

/// Show cache path
pub fn path(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    println!("{}", ctx.cache_dir()?.display());
    Ok(())
}

/// Remove entries whose address no longer appears in the directory
pub async fn prune(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let directory = ctx.directory()?;
    let listing = load_shelters(directory.as_ref()).await?;

    let keep: HashSet<String> = listing
        .shelters
        .into_iter()
        .map(|shelter| shelter.address)
        .collect();

    let stats = ctx.sqlite_cache()?.retain_addresses(&keep)?;

    match ctx.format {
        OutputFormat::Json | OutputFormat::GeoJson => {
            let json = serde_json::json!({
                "entries_removed": stats.entries_removed,
                "addresses_kept": keep.len(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => println!(
            "Pruned {} cache entries ({} directory addresses kept)",
            stats.entries_removed,
            keep.len()
        ),
    }

    Ok(())
}
