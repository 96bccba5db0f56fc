//! Output representation layer.
//!
//! Assembly produces raw `f64`/`i64` arrays; a conversion function is then
//! applied uniformly to every output field to pick the downstream numeric
//! representation. The default, [`to_field`], narrows real arrays to `f32`
//! and keeps index arrays as `i64`, which is what a typical accelerator
//! pipeline consumes. [`to_field_f64`] keeps full double precision instead.

use ndarray::ArrayD;

/// An assembled array before representation conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawArray {
    /// Real-valued data (positions, label fields).
    Real(ArrayD<f64>),
    /// Integer-valued data (atomic numbers, index arrays, segment labels).
    Index(ArrayD<i64>),
}

/// A batch output array in its final representation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldArray {
    Float(ArrayD<f32>),
    Double(ArrayD<f64>),
    Long(ArrayD<i64>),
}

impl FieldArray {
    pub fn as_float(&self) -> Option<&ArrayD<f32>> {
        match self {
            Self::Float(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<&ArrayD<f64>> {
        match self {
            Self::Double(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<&ArrayD<i64>> {
        match self {
            Self::Long(a) => Some(a),
            _ => None,
        }
    }

    /// Number of elements in the array.
    pub fn len(&self) -> usize {
        match self {
            Self::Float(a) => a.len(),
            Self::Double(a) => a.len(),
            Self::Long(a) => a.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Conversion from assembled raw arrays to the output representation,
/// applied uniformly to every field of a batch.
pub type PostFn = fn(RawArray) -> FieldArray;

/// Default conversion: real arrays become `f32`, index arrays stay `i64`.
pub fn to_field(raw: RawArray) -> FieldArray {
    match raw {
        RawArray::Real(a) => FieldArray::Float(a.mapv(|v| v as f32)),
        RawArray::Index(a) => FieldArray::Long(a),
    }
}

/// Full-precision conversion: real arrays stay `f64`, index arrays stay `i64`.
pub fn to_field_f64(raw: RawArray) -> FieldArray {
    match raw {
        RawArray::Real(a) => FieldArray::Double(a),
        RawArray::Index(a) => FieldArray::Long(a),
    }
}
