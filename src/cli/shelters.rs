//! Shelters command implementation

use colored::Colorize;
use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::cli::context::CommandContext;
use crate::directory::load_shelters;
use crate::error::{Error, Result};
use crate::models::display::ShelterDisplay;
use crate::models::{ShelterRecord, ShelterStatus};
use crate::output::Formattable;
use crate::output::{json, table};

/// Directory records in load order
pub struct ShelterListing<'a>(pub &'a [ShelterRecord]);

impl Formattable for ShelterListing<'_> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => Ok(pretty(self.0)),
            OutputFormat::Table => {
                let rows: Vec<ShelterDisplay> = self.0.iter().map(ShelterDisplay::from).collect();
                Ok(table::format_table(&rows))
            }
            OutputFormat::Json => Ok(json::format_json(self.0)?),
            OutputFormat::GeoJson => Err(Error::Other(
                "GeoJSON needs coordinates; use `sheltermap resolve --format geojson`".to_string(),
            )),
        }
    }
}

fn status_label(status: ShelterStatus) -> String {
    match status {
        ShelterStatus::Active => status.as_str().green().to_string(),
        ShelterStatus::Pending => status.as_str().yellow().to_string(),
        ShelterStatus::Inactive => status.as_str().dimmed().to_string(),
    }
}

fn pretty(shelters: &[ShelterRecord]) -> String {
    if shelters.is_empty() {
        return "No shelters found.".to_string();
    }

    let mut out = Vec::new();
    for shelter in shelters {
        out.push(format!(
            "{} {} [{}]",
            "●".cyan(),
            shelter.name.bold(),
            status_label(shelter.status)
        ));
        out.push(format!("  {}", shelter.address));
        out.push(format!("  {}", shelter.location.dimmed()));
        if let Some(phone) = shelter.contact.as_ref().and_then(|c| c.phone.as_deref()) {
            out.push(format!("  ☎ {}", phone));
        }
    }
    out.join("\n")
}

/// List every usable shelter in the directory
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let directory = ctx.directory()?;

    debug!("Loading shelters from {}", directory.describe());
    let listing = load_shelters(directory.as_ref()).await?;

    ShelterListing(&listing.shelters).print(ctx.format)?;

    if listing.excluded > 0 {
        eprintln!(
            "{} {} directory records skipped (missing name or address)",
            "⚠".yellow(),
            listing.excluded
        );
    }

    Ok(())
}
