//! Geocode command implementation

use colored::Colorize;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::cli::context::CommandContext;
use crate::cli::resolve::source_label;
use crate::error::Result;
use crate::models::display::AddressResolutionDisplay;
use crate::output::Formattable;
use crate::output::{json, table};
use crate::resolver::AddressResolution;

/// A single resolved address
pub struct AddressOutput<'a> {
    pub address: &'a str,
    pub outcome: AddressResolution,
}

impl AddressOutput<'_> {
    fn display(&self) -> AddressResolutionDisplay {
        let resolution = &self.outcome.resolution;
        AddressResolutionDisplay {
            address: self.address.to_string(),
            latitude: resolution.coordinates.latitude,
            longitude: resolution.coordinates.longitude,
            source: resolution.source,
        }
    }
}

impl Formattable for AddressOutput<'_> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        let resolution = &self.outcome.resolution;
        match format {
            OutputFormat::Pretty => Ok(format!(
                "{}\n  {} ({})",
                self.address.bold(),
                resolution.coordinates.to_string().cyan(),
                source_label(resolution.source)
            )),
            OutputFormat::Table => Ok(table::format_table(&[self.display()])),
            OutputFormat::Json => Ok(json::format_json_value(&self.display())?),
            OutputFormat::GeoJson => {
                let feature = serde_json::json!({
                    "type": "Feature",
                    "geometry": {
                        "type": "Point",
                        "coordinates": [
                            resolution.coordinates.longitude,
                            resolution.coordinates.latitude
                        ],
                    },
                    "properties": {
                        "address": self.address,
                        "source": resolution.source,
                    },
                });
                Ok(serde_json::to_string_pretty(&feature)?)
            }
        }
    }
}

/// Resolve one address through the same chain as a directory pass
pub async fn run(opts: &GlobalOptions, address: &str, refresh: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let resolver = ctx.resolver()?;

    let outcome = resolver.resolve_address(address, refresh).await;

    AddressOutput { address, outcome }.print(ctx.format)?;

    if outcome.cache_write_failed {
        eprintln!("{} Coordinates could not be cached", "⚠".yellow());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeoCoordinates, ResolutionSource};
    use crate::resolver::Resolution;

    fn output(address: &str) -> AddressOutput<'_> {
        AddressOutput {
            address,
            outcome: AddressResolution {
                resolution: Resolution {
                    coordinates: GeoCoordinates::fixed(45.454, -73.57),
                    source: ResolutionSource::Heuristic,
                },
                cache_write_failed: false,
            },
        }
    }

    #[test]
    fn test_json_output() {
        let out = output("4000 Rue Wellington, Verdun")
            .format(OutputFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["data"]["address"], "4000 Rue Wellington, Verdun");
        assert_eq!(value["data"]["latitude"], 45.454);
        assert_eq!(value["data"]["source"], "heuristic");
    }

    #[test]
    fn test_geojson_feature() {
        let out = output("Verdun").format(OutputFormat::GeoJson).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["type"], "Feature");
        assert_eq!(value["geometry"]["coordinates"][0], -73.57);
    }
}
