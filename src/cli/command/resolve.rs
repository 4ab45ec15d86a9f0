//! Print the brackets of both families without touching the archive.

use anyhow::Result;

use crate::{
    bracket::{identifiers, Bracket},
    config::Config,
    family::DataFamily,
    input::timestamp_from_name,
};

pub fn resolve(config: &Config, input: &str, offset: usize) -> Result<Vec<String>> {
    let at = timestamp_from_name(input, offset)?;
    let mut lines = vec![format!("TIME {at}")];

    for family in [DataFamily::Meteorological, DataFamily::Ozone] {
        lines.extend(describe(&config.archive, &Bracket::resolve(&at, family)));
    }

    Ok(lines)
}

fn describe(archive: &str, bracket: &Bracket) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {} .. {} factor {:.4}",
        bracket.family, bracket.start.instant, bracket.end.instant, bracket.factor
    )];

    for boundary in [&bracket.start, &bracket.end] {
        for (rank, identifier) in identifiers(archive, boundary).iter().enumerate() {
            let role = if rank == 0 { "primary" } else { "fallback" };
            lines.push(format!("  {role:<8} {}", identifier.path));
        }
    }

    lines
}

// -- Tests -------------------------------------------------------------------
