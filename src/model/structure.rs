use ndarray::Array1;
use std::collections::BTreeMap;

/// A label attached to a whole structure or to each of its atoms.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelValue {
    /// One value per structure (e.g. total energy, HOMO-LUMO gap).
    Scalar(f64),
    /// One value per atom (e.g. Mulliken charges). Length must equal the
    /// structure's atom count.
    PerAtom(Array1<f64>),
}

/// One molecule instance: atom positions, atomic numbers, and optional labels.
///
/// Positions are stored flat (`[x0, y0, z0, x1, y1, z1, ...]`) exactly as
/// they arrive from tabular storage; they are reshaped to one 3D point per
/// atom during batch assembly, and a length that is not three times the atom
/// count is reported as a shape error at that point.
///
/// `positions_orig` holds the pre-perturbation coordinates when the structure
/// has been augmented (see [`crate::augment`]); `None` means positions were
/// never perturbed and the batch output will carry identical `R` and `R_orig`.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub positions: Vec<f64>,
    pub positions_orig: Option<Vec<f64>>,
    pub types: Vec<i64>,
    pub labels: BTreeMap<String, LabelValue>,
}

impl Structure {
    pub fn new(positions: Vec<f64>, types: Vec<i64>) -> Self {
        Self {
            positions,
            positions_orig: None,
            types,
            labels: BTreeMap::new(),
        }
    }

    /// Attaches a label field, replacing any previous value under that name.
    pub fn with_label(mut self, name: impl Into<String>, value: LabelValue) -> Self {
        self.labels.insert(name.into(), value);
        self
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.types.len()
    }
}
