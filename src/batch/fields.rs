//! Label field concatenation and schema validation.
//!
//! Every structure in a batch must declare the same label fields with the
//! same kind; the check runs once per batch, before any graph work. Scalar
//! labels concatenate to one value per structure, per-atom labels
//! concatenate along the atom axis, both preserving input order.

use super::error::Error;
use crate::model::field::RawArray;
use crate::model::structure::{LabelValue, Structure};
use ndarray::Array1;
use std::collections::BTreeMap;

fn kind(value: &LabelValue) -> &'static str {
    match value {
        LabelValue::Scalar(_) => "scalar",
        LabelValue::PerAtom(_) => "per-atom",
    }
}

/// Checks that every structure declares the label fields of the first, with
/// matching kinds and per-atom lengths.
pub(crate) fn validate_schema(structures: &[Structure]) -> Result<(), Error> {
    let first = &structures[0];

    for (index, s) in structures.iter().enumerate() {
        for name in first.labels.keys() {
            if !s.labels.contains_key(name) {
                return Err(Error::schema(index, format!("missing label '{name}'")));
            }
        }
        for (name, value) in &s.labels {
            let Some(reference) = first.labels.get(name) else {
                return Err(Error::schema(index, format!("unexpected label '{name}'")));
            };
            if kind(value) != kind(reference) {
                return Err(Error::schema(
                    index,
                    format!(
                        "label '{name}' is {} here but {} in structure 0",
                        kind(value),
                        kind(reference)
                    ),
                ));
            }
            if let LabelValue::PerAtom(a) = value {
                if a.len() != s.atom_count() {
                    return Err(Error::schema(
                        index,
                        format!(
                            "per-atom label '{name}' has {} values for {} atoms",
                            a.len(),
                            s.atom_count()
                        ),
                    ));
                }
            }
        }
    }

    Ok(())
}

/// Concatenates every declared label field across the batch.
///
/// Assumes [`validate_schema`] has passed.
pub(crate) fn concat_labels(structures: &[Structure]) -> BTreeMap<String, RawArray> {
    let mut out = BTreeMap::new();

    for name in structures[0].labels.keys() {
        let mut values = Vec::new();
        for s in structures {
            match &s.labels[name] {
                LabelValue::Scalar(v) => values.push(*v),
                LabelValue::PerAtom(a) => values.extend(a.iter().copied()),
            }
        }
        out.insert(
            name.clone(),
            RawArray::Real(Array1::from(values).into_dyn()),
        );
    }

    out
}
