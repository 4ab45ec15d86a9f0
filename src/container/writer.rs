//! Creates a container and writes variables into it.

use std::{collections::HashMap, fs::File, path::{Path, PathBuf}, sync::Arc};

use arrow::{
    array::{ArrayRef, ArrowPrimitiveType, ListArray, PrimitiveArray},
    buffer::OffsetBuffer,
    datatypes::{Field, Float32Type, Float64Type, Int16Type, Schema},
    record_batch::RecordBatch,
};
use parquet::{
    arrow::ArrowWriter,
    basic::{Compression, ZstdLevel},
    file::properties::WriterProperties,
};
use tracing::debug;

use super::{
    format_shape, shape_key,
    variable::{element_count, TypeTag, VariableData},
};
use crate::error::{AuxError, Result};

struct PendingVariable {
    name: String,
    tag: TypeTag,
    shape: Vec<usize>,
    data: Option<VariableData>,
}

/// A container being assembled. Nothing touches the disk until [`close`].
///
/// [`close`]: ContainerWriter::close
pub struct ContainerWriter {
    path: PathBuf,
    variables: Vec<PendingVariable>,
}

impl ContainerWriter {
    pub fn create(path: &Path) -> Self {
        ContainerWriter {
            path: path.to_path_buf(),
            variables: Vec::new(),
        }
    }

    /// Declares a variable with its encoding and shape.
    pub fn create_variable(&mut self, name: &str, tag: TypeTag, shape: &[usize]) -> Result<()> {
        if self.variables.iter().any(|v| v.name == name) {
            return Err(AuxError::Container(format!(
                "variable `{name}` declared twice"
            )));
        }

        self.variables.push(PendingVariable {
            name: name.to_string(),
            tag,
            shape: shape.to_vec(),
            data: None,
        });

        Ok(())
    }

    /// Stores the values of a declared variable.
    pub fn write(&mut self, name: &str, data: VariableData) -> Result<()> {
        let variable = self
            .variables
            .iter_mut()
            .find(|v| v.name == name)
            .ok_or_else(|| AuxError::Container(format!("variable `{name}` was not declared")))?;

        if data.tag() != variable.tag {
            return Err(AuxError::Container(format!(
                "variable `{name}` declared as {} but written as {}",
                variable.tag,
                data.tag()
            )));
        }
        let expected = element_count(&variable.shape);
        if data.len() != expected {
            return Err(AuxError::Container(format!(
                "variable `{name}` has shape {:?} ({expected} elements) but {} were written",
                variable.shape,
                data.len()
            )));
        }

        variable.data = Some(data);

        Ok(())
    }

    /// Writes every variable to disk and closes the file.
    pub fn close(self) -> Result<PathBuf> {
        if self.variables.is_empty() {
            return Err(AuxError::Container("container has no variables".to_string()));
        }

        let mut fields = Vec::with_capacity(self.variables.len());
        let mut columns = Vec::with_capacity(self.variables.len());
        let mut metadata = HashMap::new();

        for variable in self.variables {
            let data = variable.data.ok_or_else(|| {
                AuxError::Container(format!(
                    "variable `{}` was declared but never written",
                    variable.name
                ))
            })?;
            let column = list_column(data)?;

            fields.push(Field::new(&variable.name, column.data_type().clone(), false));
            metadata.insert(shape_key(&variable.name), format_shape(&variable.shape));
            columns.push(column);
        }

        let schema = Arc::new(Schema::new_with_metadata(fields, metadata));
        let batch = RecordBatch::try_new(schema.clone(), columns)?;

        let props = WriterProperties::builder()
            .set_compression(Compression::ZSTD(ZstdLevel::default()))
            .build();

        let file = File::create(&self.path)?;
        let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
        writer.write(&batch)?;
        writer.close()?;

        debug!(path = %self.path.display(), "container written");

        Ok(self.path)
    }
}

fn list_column(data: VariableData) -> Result<ArrayRef> {
    match data {
        VariableData::Int16(v) => single_row_list::<Int16Type>(v.into()),
        VariableData::Float32(v) => single_row_list::<Float32Type>(v.into()),
        VariableData::Float64(v) => single_row_list::<Float64Type>(v.into()),
    }
}

// Packs the flattened array into one list row.
fn single_row_list<T: ArrowPrimitiveType>(values: PrimitiveArray<T>) -> Result<ArrayRef> {
    let item = Arc::new(Field::new("item", T::DATA_TYPE, false));
    let offsets = OffsetBuffer::from_lengths([values.len()]);
    let list = ListArray::try_new(item, offsets, Arc::new(values), None)?;

    Ok(Arc::new(list))
}
