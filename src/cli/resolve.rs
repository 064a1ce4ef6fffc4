//! Resolve command implementation

use colored::Colorize;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::cli::context::CommandContext;
use crate::error::Result;
use crate::models::display::ResolvedShelterDisplay;
use crate::models::{ResolutionSource, ResolvedShelter};
use crate::output::Formattable;
use crate::output::{geojson, json, table};
use crate::resolver::ResolutionReport;

/// Resolved shelters in directory order
pub struct ResolvedListing<'a>(pub &'a [ResolvedShelter]);

impl Formattable for ResolvedListing<'_> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => Ok(pretty(self.0)),
            OutputFormat::Table => {
                let rows: Vec<ResolvedShelterDisplay> =
                    self.0.iter().map(ResolvedShelterDisplay::from).collect();
                Ok(table::format_table(&rows))
            }
            OutputFormat::Json => Ok(json::format_json(self.0)?),
            OutputFormat::GeoJson => Ok(geojson::format_geojson(self.0)?),
        }
    }
}

/// Colored source label
pub fn source_label(source: ResolutionSource) -> String {
    match source {
        ResolutionSource::Cache => source.as_str().dimmed().to_string(),
        ResolutionSource::Service => source.as_str().green().to_string(),
        ResolutionSource::Heuristic => source.as_str().yellow().to_string(),
        ResolutionSource::Default => source.as_str().red().to_string(),
    }
}

fn pretty(shelters: &[ResolvedShelter]) -> String {
    if shelters.is_empty() {
        return "No shelters found.".to_string();
    }

    let mut out = Vec::new();
    for resolved in shelters {
        out.push(format!("{} {}", "●".cyan(), resolved.shelter.name.bold()));
        out.push(format!("  {}", resolved.shelter.address));
        out.push(format!(
            "  {} ({})",
            resolved.coordinates.to_string().cyan(),
            source_label(resolved.source)
        ));
    }
    out.join("\n")
}

/// One-line summary of a pass, written to stderr
pub fn summary(report: &ResolutionReport) -> String {
    let mut line = format!(
        "Resolved {} shelters: {} cached, {} geocoded, {} fallback",
        report.shelters.len(),
        report.cache_hits(),
        report.geocoded(),
        report.fallbacks()
    );
    if report.excluded > 0 {
        line.push_str(&format!(", {} excluded", report.excluded));
    }
    line
}

/// Resolve every directory shelter and print the result
pub async fn run(opts: &GlobalOptions, refresh: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let directory = ctx.directory()?;
    let resolver = ctx.resolver()?;

    let report = resolver
        .resolve_directory(directory.as_ref(), refresh)
        .await?;

    ResolvedListing(&report.shelters).print(ctx.format)?;

    eprintln!("{}", summary(&report).dimmed());
    if report.cache_write_failures > 0 {
        eprintln!(
            "{} {} coordinates could not be cached and will be resolved again next run",
            "⚠".yellow(),
            report.cache_write_failures
        );
    }

    Ok(())
}
