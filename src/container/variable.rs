//! Typed, shaped numeric arrays held in a container.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Element encoding of a variable.
pub enum TypeTag {
    Int16,
    Float32,
    Float64,
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Int16 => write!(f, "int16"),
            TypeTag::Float32 => write!(f, "float32"),
            TypeTag::Float64 => write!(f, "float64"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Flattened element values, tagged by their encoding.
pub enum VariableData {
    Int16(Vec<i16>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl VariableData {
    pub fn tag(&self) -> TypeTag {
        match self {
            VariableData::Int16(_) => TypeTag::Int16,
            VariableData::Float32(_) => TypeTag::Float32,
            VariableData::Float64(_) => TypeTag::Float64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            VariableData::Int16(v) => v.len(),
            VariableData::Float32(v) => v.len(),
            VariableData::Float64(v) => v.len(),
        }
    }

    /// Widens every element to `f64`.
    pub fn to_f64(&self) -> Vec<f64> {
        match self {
            VariableData::Int16(v) => v.iter().map(|&x| f64::from(x)).collect(),
            VariableData::Float32(v) => v.iter().map(|&x| f64::from(x)).collect(),
            VariableData::Float64(v) => v.clone(),
        }
    }

    /// Narrows `values` to the encoding named by `tag`.
    ///
    /// Integers are truncated toward zero and saturate at the type's range.
    pub fn cast(tag: TypeTag, values: &[f64]) -> Self {
        match tag {
            TypeTag::Int16 => VariableData::Int16(values.iter().map(|&x| x.trunc() as i16).collect()),
            TypeTag::Float32 => VariableData::Float32(values.iter().map(|&x| x as f32).collect()),
            TypeTag::Float64 => VariableData::Float64(values.to_vec()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A named array read from a container.
pub struct Variable {
    pub name: String,
    pub shape: Vec<usize>,
    pub data: VariableData,
}

impl Variable {
    pub fn tag(&self) -> TypeTag {
        self.data.tag()
    }
}

/// Number of elements implied by `shape`.
pub fn element_count(shape: &[usize]) -> usize {
    shape.iter().product()
}
