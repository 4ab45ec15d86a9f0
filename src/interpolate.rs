//! Linear interpolation in time between two bracket containers.

use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::{
    container::{ContainerReader, ContainerWriter, Variable, VariableData},
    error::{AuxError, Result},
};

/// Writes `(1 - factor) * file0 + factor * file1` for every variable in
/// `variable_names` into a new container at `output`.
///
/// Each output variable keeps the encoding and shape it has in `file0`. The
/// container is closed before its path is returned.
pub fn interpolate(
    file0: &Path,
    file1: &Path,
    factor: f64,
    variable_names: &[&str],
    output: &Path,
) -> Result<PathBuf> {
    let start = ContainerReader::open(file0)?;
    let end = ContainerReader::open(file1)?;
    let mut writer = ContainerWriter::create(output);

    for name in variable_names {
        let v0 = select(&start, name)?;
        let v1 = select(&end, name)?;
        check_schema(&v0, &v1)?;

        let values = blend(&v0.data.to_f64(), &v1.data.to_f64(), factor);
        writer.create_variable(name, v0.tag(), &v0.shape)?;
        writer.write(name, VariableData::cast(v0.tag(), &values))?;

        debug!(variable = name, tag = %v0.tag(), shape = ?v0.shape, "interpolated");
    }

    writer.close()
}

fn select(reader: &ContainerReader, name: &str) -> Result<Variable> {
    reader.select(name).map_err(|e| {
        if let AuxError::MissingVariable { .. } = e {
            error!(
                path = %reader.path().display(),
                available = ?reader.variable_names(),
                "error loading {name}"
            );
        }
        e
    })
}

fn check_schema(v0: &Variable, v1: &Variable) -> Result<()> {
    let mismatch = |detail: String| AuxError::SchemaMismatch {
        variable: v0.name.clone(),
        detail,
    };

    if v0.tag() != v1.tag() {
        return Err(mismatch(format!("type {} vs {}", v0.tag(), v1.tag())));
    }
    if v0.shape != v1.shape {
        return Err(mismatch(format!("shape {:?} vs {:?}", v0.shape, v1.shape)));
    }

    Ok(())
}

fn blend(a: &[f64], b: &[f64], factor: f64) -> Vec<f64> {
    a.iter()
        .zip(b)
        .map(|(x0, x1)| (1.0 - factor) * x0 + factor * x1)
        .collect()
}

// -- Tests -------------------------------------------------------------------
