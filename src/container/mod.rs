//! Self-describing container of named, typed, shaped arrays.
//!
//! A container is a _parquet_ file with one column per variable. Each column
//! holds a single list row with the flattened array; the list element type is
//! the variable's [`TypeTag`] and the shape is kept in the schema metadata
//! under `shape.<name>` as comma separated dimensions.

pub mod reader;
pub mod variable;
pub mod writer;

pub use reader::ContainerReader;
pub use variable::{TypeTag, Variable, VariableData};
pub use writer::ContainerWriter;

fn shape_key(name: &str) -> String {
    format!("shape.{name}")
}

fn format_shape(shape: &[usize]) -> String {
    shape
        .iter()
        .map(|dim| dim.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn parse_shape(encoded: &str) -> Option<Vec<usize>> {
    if encoded.is_empty() {
        return Some(Vec::new());
    }

    encoded.split(',').map(|dim| dim.trim().parse().ok()).collect()
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use tempfile::TempDir;

    use super::*;
    use crate::error::AuxError;

    #[test]
    fn should_keep_type_shape_and_values() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("met.parquet");

        let mut writer = ContainerWriter::create(&path);
        writer.create_variable("press", TypeTag::Int16, &[2, 3]).unwrap();
        writer
            .write("press", VariableData::Int16(vec![1000, 1001, 1002, 1003, 1004, -5]))
            .unwrap();
        writer.create_variable("z_wind", TypeTag::Float32, &[3]).unwrap();
        writer
            .write("z_wind", VariableData::Float32(vec![0.5, -1.25, 3.0]))
            .unwrap();
        writer.close().unwrap();

        let reader = ContainerReader::open(&path).unwrap();
        assert_eq!(reader.variable_names(), vec!["press", "z_wind"]);

        let press = reader.select("press").unwrap();
        assert_eq!(press.tag(), TypeTag::Int16);
        assert_eq!(press.shape, vec![2, 3]);
        assert_eq!(
            press.data,
            VariableData::Int16(vec![1000, 1001, 1002, 1003, 1004, -5])
        );

        let wind = reader.select("z_wind").unwrap();
        assert_eq!(wind.tag(), TypeTag::Float32);
        assert_eq!(wind.shape, vec![3]);
    }

    #[test]
    fn should_report_missing_variable() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("oz.parquet");

        let mut writer = ContainerWriter::create(&path);
        writer.create_variable("ozone", TypeTag::Float64, &[1]).unwrap();
        writer.write("ozone", VariableData::Float64(vec![310.0])).unwrap();
        writer.close().unwrap();

        let reader = ContainerReader::open(&path).unwrap();
        let err = reader.select("press").unwrap_err();
        assert!(matches!(err, AuxError::MissingVariable { ref variable, .. } if variable == "press"));
    }

    #[test]
    fn should_reject_write_with_wrong_length() {
        let tmp_dir = TempDir::new().unwrap();
        let mut writer = ContainerWriter::create(&tmp_dir.path().join("x.parquet"));

        writer.create_variable("press", TypeTag::Float64, &[2, 2]).unwrap();
        let err = writer
            .write("press", VariableData::Float64(vec![1.0, 2.0, 3.0]))
            .unwrap_err();
        assert!(matches!(err, AuxError::Container(_)));
    }

    #[test]
    fn should_not_write_file_with_unwritten_variable() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("x.parquet");

        let mut writer = ContainerWriter::create(&path);
        writer.create_variable("press", TypeTag::Float64, &[1]).unwrap();
        assert!(writer.close().is_err());
        assert!(!path.exists());
    }

    #[test]
    fn should_parse_shapes() {
        assert_eq!(parse_shape("181,360"), Some(vec![181, 360]));
        assert_eq!(parse_shape(""), Some(vec![]));
        assert_eq!(parse_shape("a,1"), None);
        assert_eq!(format_shape(&[181, 360]), "181,360");
    }
}
