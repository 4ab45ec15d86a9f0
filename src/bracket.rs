//! Maps a query instant onto the two bracketing datasets of a family.

use chrono::{NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::family::{DataFamily, NamingScheme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One of the two aligned instants that bound a query within a family's cadence.
pub struct BracketBoundary {
    pub family: DataFamily,
    pub instant: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A remote dataset path and the naming scheme that produced it.
pub struct DatasetIdentifier {
    pub scheme: NamingScheme,
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Both boundaries of a family around a query instant, with the query's weight.
pub struct Bracket {
    pub family: DataFamily,
    pub start: BracketBoundary,
    pub end: BracketBoundary,
    pub factor: f64,
}

impl Bracket {
    pub fn resolve(at: &NaiveDateTime, family: DataFamily) -> Self {
        let (start, end) = resolve_boundaries(at, family);
        let factor = interpolation_factor(at, &start, &end);

        Bracket {
            family,
            start,
            end,
            factor,
        }
    }
}

/// Floors `at` to the family's cadence and adds one cadence step.
pub fn resolve_boundaries(
    at: &NaiveDateTime,
    family: DataFamily,
) -> (BracketBoundary, BracketBoundary) {
    let midnight = at.date().and_time(NaiveTime::MIN);
    let start = match family {
        DataFamily::Ozone => midnight,
        DataFamily::Meteorological => {
            midnight + TimeDelta::hours(6 * i64::from(at.hour() / 6))
        }
    };
    let end = start + family.cadence();

    (
        BracketBoundary {
            family,
            instant: start,
        },
        BracketBoundary {
            family,
            instant: end,
        },
    )
}

/// Normalised position of `at` between the two boundaries.
pub fn interpolation_factor(
    at: &NaiveDateTime,
    start: &BracketBoundary,
    end: &BracketBoundary,
) -> f64 {
    let elapsed = nanoseconds(*at - start.instant);
    let span = nanoseconds(end.instant - start.instant);

    elapsed / span
}

// Cadence spans fit in i64 nanoseconds; microseconds cover anything longer.
fn nanoseconds(delta: TimeDelta) -> f64 {
    match delta.num_nanoseconds() {
        Some(ns) => ns as f64,
        None => delta.num_microseconds().unwrap_or(i64::MAX) as f64 * 1_000.0,
    }
}

/// Candidate archive paths for a boundary, primary first.
///
/// Every scheme is produced; which one exists is decided at materialization.
pub fn identifiers(base: &str, boundary: &BracketBoundary) -> Vec<DatasetIdentifier> {
    boundary
        .family
        .naming_schemes()
        .iter()
        .map(|scheme| DatasetIdentifier {
            scheme: *scheme,
            path: scheme.path(base, &boundary.instant),
        })
        .collect()
}

// -- Tests -------------------------------------------------------------------
