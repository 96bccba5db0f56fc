use super::field::FieldArray;
use std::collections::BTreeMap;

/// One assembled batch: a flat mapping from field name to output array.
///
/// Always contains the required fields listed below; any label fields
/// declared on the input structures pass through under their own names.
///
/// | Field | Shape | Meaning |
/// |---|---|---|
/// | `batch_seg` | `[n_atoms]` | owning structure index per atom, non-decreasing |
/// | `R` | `[n_atoms, 3]` | atom positions (possibly perturbed) |
/// | `R_orig` | `[n_atoms, 3]` | pre-perturbation positions (`== R` if never perturbed) |
/// | `Z` | `[n_atoms]` | atomic numbers |
/// | `idnb_i` | `[n_edges]` | edge target atom (global index) |
/// | `idnb_j` | `[n_edges]` | edge source atom (global index) |
/// | `id3dnb_i` | `[n_triplets]` | triplet outer target atom |
/// | `id3dnb_j` | `[n_triplets]` | triplet middle atom |
/// | `id3dnb_k` | `[n_triplets]` | triplet origin atom (`!= id3dnb_i`) |
/// | `id_expand_kj` | `[n_triplets]` | edge id of the inner edge j←k |
/// | `id_reduce_ji` | `[n_triplets]` | edge id of the outer edge i←j |
///
/// Edge ids are positions in the row-major enumeration of the merged batch
/// adjacency matrix, so `idnb_i[e]`/`idnb_j[e]` are the endpoints of edge `e`.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomsBatch {
    fields: BTreeMap<String, FieldArray>,
}

impl AtomsBatch {
    pub(crate) fn new(fields: BTreeMap<String, FieldArray>) -> Self {
        Self { fields }
    }

    /// Looks up a field by name, including pass-through label fields.
    pub fn get(&self, name: &str) -> Option<&FieldArray> {
        self.fields.get(name)
    }

    /// Iterates over all fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldArray)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Consumes the batch, yielding the underlying name → array mapping.
    pub fn into_fields(self) -> BTreeMap<String, FieldArray> {
        self.fields
    }

    pub fn batch_seg(&self) -> &FieldArray {
        &self.fields["batch_seg"]
    }

    pub fn r(&self) -> &FieldArray {
        &self.fields["R"]
    }

    pub fn r_orig(&self) -> &FieldArray {
        &self.fields["R_orig"]
    }

    pub fn z(&self) -> &FieldArray {
        &self.fields["Z"]
    }

    pub fn idnb_i(&self) -> &FieldArray {
        &self.fields["idnb_i"]
    }

    pub fn idnb_j(&self) -> &FieldArray {
        &self.fields["idnb_j"]
    }

    pub fn id3dnb_i(&self) -> &FieldArray {
        &self.fields["id3dnb_i"]
    }

    pub fn id3dnb_j(&self) -> &FieldArray {
        &self.fields["id3dnb_j"]
    }

    pub fn id3dnb_k(&self) -> &FieldArray {
        &self.fields["id3dnb_k"]
    }

    pub fn id_expand_kj(&self) -> &FieldArray {
        &self.fields["id_expand_kj"]
    }

    pub fn id_reduce_ji(&self) -> &FieldArray {
        &self.fields["id_reduce_ji"]
    }
}
