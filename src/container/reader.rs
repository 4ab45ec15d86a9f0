//! Opens a container and selects variables from it.

use std::{
    collections::HashMap,
    fs::File,
    path::{Path, PathBuf},
};

use arrow::{
    array::{Array, AsArray},
    datatypes::{DataType, Float32Type, Float64Type, Int16Type},
    record_batch::RecordBatch,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::{
    parse_shape, shape_key,
    variable::{element_count, Variable, VariableData},
};
use crate::error::{AuxError, Result};

/// A container opened for reading. The whole file is loaded on open.
pub struct ContainerReader {
    path: PathBuf,
    batch: RecordBatch,
    metadata: HashMap<String, String>,
}

impl ContainerReader {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
        let metadata = builder.schema().metadata().clone();

        let mut batches = builder
            .build()?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if batches.len() != 1 || batches[0].num_rows() != 1 {
            return Err(AuxError::Container(format!(
                "{} does not hold exactly one row of variables",
                path.display()
            )));
        }

        Ok(ContainerReader {
            path: path.to_path_buf(),
            batch: batches.remove(0),
            metadata,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of every variable in the container, in file order.
    pub fn variable_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|field| field.name().clone())
            .collect()
    }

    /// Reads the type, shape and values of variable `name`.
    pub fn select(&self, name: &str) -> Result<Variable> {
        let column = self
            .batch
            .column_by_name(name)
            .ok_or_else(|| AuxError::MissingVariable {
                variable: name.to_string(),
                path: self.path.clone(),
            })?;

        let list = column
            .as_list_opt::<i32>()
            .ok_or_else(|| AuxError::Container(format!("`{name}` is not an array variable")))?;
        let values = list.value(0);

        let data = match values.data_type() {
            DataType::Int16 => {
                VariableData::Int16(values.as_primitive::<Int16Type>().values().to_vec())
            }
            DataType::Float32 => {
                VariableData::Float32(values.as_primitive::<Float32Type>().values().to_vec())
            }
            DataType::Float64 => {
                VariableData::Float64(values.as_primitive::<Float64Type>().values().to_vec())
            }
            other => {
                return Err(AuxError::Container(format!(
                    "`{name}` has unsupported element type {other}"
                )))
            }
        };

        let shape = match self.metadata.get(&shape_key(name)) {
            Some(encoded) => parse_shape(encoded)
                .ok_or_else(|| AuxError::Container(format!("`{name}` has bad shape `{encoded}`")))?,
            None => vec![data.len()],
        };
        if element_count(&shape) != data.len() {
            return Err(AuxError::Container(format!(
                "`{name}` has shape {shape:?} but holds {} elements",
                data.len()
            )));
        }

        Ok(Variable {
            name: name.to_string(),
            shape,
            data,
        })
    }
}
