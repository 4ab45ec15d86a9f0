//! Runs bracket resolution, materialization and interpolation for both families.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::NaiveDateTime;
use tracing::{debug, error, info, warn};

use crate::{
    bracket::Bracket,
    config::Config,
    error::{AuxError, Result},
    family::DataFamily,
    interpolate::interpolate,
    materialize::Materializer,
    store::RemoteStore,
};

#[derive(Debug, Clone, PartialEq)]
/// Paths of the two interpolated containers.
pub struct Interpolated {
    pub meteo: PathBuf,
    pub ozone: PathBuf,
}

impl Interpolated {
    /// Lines reported to the caller, meteo first.
    pub fn report_lines(&self) -> [String; 2] {
        [
            format!(
                "{} {}",
                DataFamily::Meteorological.report_label(),
                self.meteo.display()
            ),
            format!("{} {}", DataFamily::Ozone.report_label(), self.ozone.display()),
        ]
    }
}

#[derive(Debug)]
/// How a run ended. Only `Complete` leaves output files behind.
pub enum RunOutcome {
    Complete(Interpolated),
    /// No dataset in the archive for at least one boundary of these families.
    Unavailable(Vec<DataFamily>),
    /// A transfer, schema or container failure aborted the run.
    Fatal(AuxError),
}

impl RunOutcome {
    pub fn into_result(self) -> std::result::Result<Interpolated, RunOutcome> {
        match self {
            RunOutcome::Complete(interpolated) => Ok(interpolated),
            other => Err(other),
        }
    }
}

/// Interpolates meteo and ozone ancillary data to a requested instant.
pub struct Driver<S> {
    store: S,
    config: Config,
}

impl<S: RemoteStore> Driver<S> {
    pub fn new(store: S, config: Config) -> Self {
        Driver { store, config }
    }

    /// Produces both interpolated containers for `at`, or none at all.
    pub async fn run(&self, at: &NaiveDateTime) -> RunOutcome {
        let mut produced = Vec::new();
        let outcome = match self.try_run(at, &mut produced).await {
            Ok(outcome) => outcome,
            Err(e) => RunOutcome::Fatal(e),
        };

        match &outcome {
            RunOutcome::Complete(interpolated) => {
                info!(
                    meteo = %interpolated.meteo.display(),
                    ozone = %interpolated.ozone.display(),
                    "interpolation complete"
                );
            }
            RunOutcome::Unavailable(families) => {
                warn!(?families, "brackets unavailable, no output");
                discard(&produced);
            }
            RunOutcome::Fatal(e) => {
                error!(error = %e, "run aborted, no output");
                discard(&produced);
            }
        }

        outcome
    }

    async fn try_run(&self, at: &NaiveDateTime, produced: &mut Vec<PathBuf>) -> Result<RunOutcome> {
        let brackets = [
            Bracket::resolve(at, DataFamily::Meteorological),
            Bracket::resolve(at, DataFamily::Ozone),
        ];
        let materializer =
            Materializer::new(&self.store, &self.config.archive, &self.config.work_dir);

        let mut materialized = Vec::with_capacity(brackets.len());
        for bracket in &brackets {
            info!(
                family = %bracket.family,
                start = %bracket.start.instant,
                end = %bracket.end.instant,
                factor = bracket.factor,
                "resolved bracket"
            );
            materialized.push(materializer.materialize_bracket(bracket).await?);
        }

        let mut meteo = None;
        let mut ozone = None;
        let mut missing = Vec::new();

        for (bracket, datasets) in brackets.iter().zip(materialized) {
            let Some((start, end)) = datasets else {
                info!(family = %bracket.family, "skipping family");
                missing.push(bracket.family);
                continue;
            };
            debug!(
                family = %bracket.family,
                start = ?start.identifier.scheme,
                end = ?end.identifier.scheme,
                "bracket materialized"
            );

            let output = self.output_path(bracket.family)?;
            produced.push(output.clone());
            let path = interpolate(
                &start.path,
                &end.path,
                bracket.factor,
                bracket.family.variables(),
                &output,
            )?;

            match bracket.family {
                DataFamily::Meteorological => meteo = Some(path),
                DataFamily::Ozone => ozone = Some(path),
            }
        }

        match (meteo, ozone) {
            (Some(meteo), Some(ozone)) => Ok(RunOutcome::Complete(Interpolated { meteo, ozone })),
            _ => Ok(RunOutcome::Unavailable(missing)),
        }
    }

    // Reserves a uniquely named file in the output directory.
    fn output_path(&self, family: DataFamily) -> Result<PathBuf> {
        let (_, path) = tempfile::Builder::new()
            .prefix(family.output_prefix())
            .suffix(".parquet")
            .tempfile_in(&self.config.output_dir)?
            .keep()
            .map_err(|e| e.error)?;

        Ok(path)
    }
}

fn discard(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = remove(path) {
            warn!(path = %path.display(), error = %e, "cannot remove partial output");
        }
    }
}

fn remove(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

// -- Tests -------------------------------------------------------------------
