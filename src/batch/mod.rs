mod config;
mod error;
mod fields;
mod graph;
mod merge;
mod triplets;

pub use config::BatchConfig;
pub use error::Error;

use crate::model::batch::AtomsBatch;
use crate::model::field::RawArray;
use crate::model::structure::Structure;
use ndarray::{concatenate, Array1, Array2, ArrayD, Axis};
use std::collections::BTreeMap;

/// Assembles a sequence of structures into one block-diagonal batch graph.
///
/// Runs the full pipeline: schema and shape validation, per-structure
/// cutoff adjacency, block-diagonal merge, global edge numbering, triplet
/// derivation, and segment labeling. The call is pure — identical input
/// yields an identical batch, and no state is retained between calls.
pub fn assemble(structures: &[Structure], config: &BatchConfig) -> Result<AtomsBatch, Error> {
    if structures.is_empty() {
        return Err(Error::EmptyBatch);
    }
    fields::validate_schema(structures)?;

    let coords = reshape_positions(structures)?;
    let coords_orig = reshape_orig_positions(structures, &coords)?;

    let graphs: Vec<_> = coords
        .iter()
        .map(|c| graph::neighbor_graph(c.view(), config.cutoff))
        .collect();
    let adj = merge::block_diagonal(&graphs);
    let lookup = merge::edge_id_lookup(&adj);
    let (target, source) = merge::edge_endpoints(&adj);
    let trip = triplets::triplet_indices(&adj, &lookup, &target, &source);

    let mut batch_seg = Vec::with_capacity(adj.rows());
    for (b, s) in structures.iter().enumerate() {
        batch_seg.extend(std::iter::repeat(b as i64).take(s.atom_count()));
    }

    let types: Vec<i64> = structures
        .iter()
        .flat_map(|s| s.types.iter().copied())
        .collect();

    let mut raw = fields::concat_labels(structures);
    raw.insert("R".into(), RawArray::Real(concat_coords(&coords)?));
    raw.insert("R_orig".into(), RawArray::Real(concat_coords(&coords_orig)?));
    raw.insert("Z".into(), RawArray::Index(Array1::from(types).into_dyn()));
    raw.insert(
        "batch_seg".into(),
        RawArray::Index(Array1::from(batch_seg).into_dyn()),
    );
    raw.insert("idnb_i".into(), index_array(target));
    raw.insert("idnb_j".into(), index_array(source));
    raw.insert("id3dnb_i".into(), index_array(trip.id3dnb_i));
    raw.insert("id3dnb_j".into(), index_array(trip.id3dnb_j));
    raw.insert("id3dnb_k".into(), index_array(trip.id3dnb_k));
    raw.insert("id_expand_kj".into(), index_array(trip.id_expand_kj));
    raw.insert("id_reduce_ji".into(), index_array(trip.id_reduce_ji));

    let converted: BTreeMap<_, _> = raw
        .into_iter()
        .map(|(name, array)| (name, (config.post)(array)))
        .collect();

    Ok(AtomsBatch::new(converted))
}

/// Reshapes every structure's flat positions to one 3D point per atom.
///
/// Rejects zero-atom structures and length mismatches before any graph
/// construction begins.
fn reshape_positions(structures: &[Structure]) -> Result<Vec<Array2<f64>>, Error> {
    structures
        .iter()
        .enumerate()
        .map(|(index, s)| {
            if s.atom_count() == 0 {
                return Err(Error::EmptyStructure { index });
            }
            to_coords(&s.positions, index, s.atom_count())
        })
        .collect()
}

fn reshape_orig_positions(
    structures: &[Structure],
    coords: &[Array2<f64>],
) -> Result<Vec<Array2<f64>>, Error> {
    structures
        .iter()
        .enumerate()
        .map(|(index, s)| match &s.positions_orig {
            Some(orig) => to_coords(orig, index, s.atom_count()),
            None => Ok(coords[index].clone()),
        })
        .collect()
}

fn to_coords(flat: &[f64], index: usize, atoms: usize) -> Result<Array2<f64>, Error> {
    if flat.len() != 3 * atoms {
        return Err(Error::shape(index, flat.len(), atoms));
    }
    Array2::from_shape_vec((atoms, 3), flat.to_vec())
        .map_err(|e| Error::Conversion(e.to_string()))
}

fn concat_coords(coords: &[Array2<f64>]) -> Result<ArrayD<f64>, Error> {
    let views: Vec<_> = coords.iter().map(|c| c.view()).collect();
    concatenate(Axis(0), &views)
        .map(|a| a.into_dyn())
        .map_err(|e| Error::Conversion(e.to_string()))
}

fn index_array(indices: Vec<usize>) -> RawArray {
    let as_i64: Vec<i64> = indices.into_iter().map(|v| v as i64).collect();
    RawArray::Index(Array1::from(as_i64).into_dyn())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::{to_field_f64, FieldArray};
    use crate::model::structure::LabelValue;

    /// Two atoms 1.0 apart on the x axis.
    fn make_dimer() -> Structure {
        Structure::new(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0], vec![1, 1])
    }

    /// Equilateral triangle with side 1.0 in the xy plane.
    fn make_triangle() -> Structure {
        Structure::new(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.5, 0.75f64.sqrt(), 0.0],
            vec![8, 8, 8],
        )
    }

    fn longs(field: &FieldArray) -> Vec<i64> {
        field.as_long().unwrap().iter().copied().collect()
    }

    #[test]
    fn two_dimers_make_four_edges_and_no_triplets() {
        let batch = assemble(&[make_dimer(), make_dimer()], &BatchConfig::default()).unwrap();

        assert_eq!(longs(batch.batch_seg()), vec![0, 0, 1, 1]);
        assert_eq!(longs(batch.idnb_i()), vec![0, 1, 2, 3]);
        assert_eq!(longs(batch.idnb_j()), vec![1, 0, 3, 2]);
        assert!(batch.id3dnb_i().is_empty());
        assert!(batch.id_expand_kj().is_empty());
        assert!(batch.id_reduce_ji().is_empty());
    }

    #[test]
    fn triangle_makes_six_edges_and_six_triplets() {
        let batch = assemble(&[make_triangle()], &BatchConfig { cutoff: 2.0, ..Default::default() })
            .unwrap();

        assert_eq!(batch.idnb_i().len(), 6);
        assert_eq!(batch.id3dnb_i().len(), 6);

        // One triplet per destination edge, and never the back-and-forth path.
        let i = longs(batch.id3dnb_i());
        let k = longs(batch.id3dnb_k());
        let reduce = longs(batch.id_reduce_ji());
        for t in 0..6 {
            assert_ne!(i[t], k[t]);
            assert_eq!(reduce[t], t as i64);
        }
    }

    #[test]
    fn expand_kj_references_the_inner_edge() {
        let batch = assemble(
            &[make_triangle(), make_dimer()],
            &BatchConfig { cutoff: 2.0, ..Default::default() },
        )
        .unwrap();

        let idnb_i = longs(batch.idnb_i());
        let idnb_j = longs(batch.idnb_j());
        let expand = longs(batch.id_expand_kj());
        let j = longs(batch.id3dnb_j());
        let k = longs(batch.id3dnb_k());

        for t in 0..expand.len() {
            let e = expand[t] as usize;
            assert_eq!(idnb_i[e], j[t]);
            assert_eq!(idnb_j[e], k[t]);
        }
    }

    #[test]
    fn tight_cutoff_yields_empty_arrays_not_an_error() {
        let batch = assemble(
            &[make_dimer()],
            &BatchConfig { cutoff: 0.5, ..Default::default() },
        )
        .unwrap();

        assert!(batch.idnb_i().is_empty());
        assert!(batch.idnb_j().is_empty());
        assert!(batch.id3dnb_k().is_empty());
        assert_eq!(longs(batch.batch_seg()), vec![0, 0]);
    }

    #[test]
    fn structure_order_is_preserved_in_every_per_atom_array() {
        let a = Structure::new(vec![0.0; 6], vec![1, 6]);
        let b = Structure::new(vec![0.0; 3], vec![8]);
        let batch = assemble(&[a, b], &BatchConfig::default()).unwrap();

        assert_eq!(longs(batch.z()), vec![1, 6, 8]);
        let seg = longs(batch.batch_seg());
        assert_eq!(seg, vec![0, 0, 1]);
        assert!(seg.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn positions_concatenate_along_the_atom_axis() {
        let batch = assemble(&[make_dimer(), make_dimer()], &BatchConfig::default()).unwrap();
        let r = batch.r().as_float().unwrap();
        assert_eq!(r.shape(), &[4, 3]);
        assert_eq!(r[[1, 0]], 1.0);
        assert_eq!(r[[3, 0]], 1.0);
    }

    #[test]
    fn r_orig_equals_r_without_augmentation() {
        let batch = assemble(&[make_triangle()], &BatchConfig::default()).unwrap();
        assert_eq!(batch.r(), batch.r_orig());
    }

    #[test]
    fn r_orig_carries_preserved_positions() {
        let mut dimer = make_dimer();
        dimer.positions_orig = Some(vec![0.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
        let batch = assemble(&[dimer], &BatchConfig::default()).unwrap();

        let r = batch.r().as_float().unwrap();
        let r_orig = batch.r_orig().as_float().unwrap();
        assert_eq!(r[[1, 0]], 1.0);
        assert_eq!(r_orig[[1, 0]], 2.0);
    }

    #[test]
    fn labels_pass_through() {
        let s = make_dimer().with_label("U0", LabelValue::Scalar(-76.4));
        let t = make_dimer().with_label("U0", LabelValue::Scalar(-75.1));
        let batch = assemble(&[s, t], &BatchConfig::default()).unwrap();

        let u0 = batch.get("U0").unwrap().as_float().unwrap();
        assert_eq!(u0.len(), 2);
        assert_eq!(u0[[0]], -76.4f32);
        assert_eq!(u0[[1]], -75.1f32);
    }

    #[test]
    fn custom_conversion_keeps_double_precision() {
        let config = BatchConfig {
            post: to_field_f64,
            ..Default::default()
        };
        let batch = assemble(&[make_dimer()], &config).unwrap();
        assert!(batch.r().as_double().is_some());
        assert!(batch.z().as_long().is_some());
    }

    #[test]
    fn assembly_is_deterministic() {
        let input = [make_triangle(), make_dimer()];
        let first = assemble(&input, &BatchConfig::default()).unwrap();
        let second = assemble(&input, &BatchConfig::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_batch_is_rejected() {
        let err = assemble(&[], &BatchConfig::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyBatch));
    }

    #[test]
    fn zero_atom_structure_is_rejected() {
        let err = assemble(
            &[make_dimer(), Structure::new(vec![], vec![])],
            &BatchConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::EmptyStructure { index: 1 }));
    }

    #[test]
    fn malformed_positions_are_rejected() {
        let broken = Structure::new(vec![0.0, 0.0], vec![1]);
        let err = assemble(&[broken], &BatchConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Shape {
                index: 0,
                len: 2,
                atoms: 1
            }
        ));
    }

    #[test]
    fn inconsistent_labels_are_rejected() {
        let s = make_dimer().with_label("U0", LabelValue::Scalar(-1.0));
        let t = make_dimer();
        let err = assemble(&[s, t], &BatchConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Schema { index: 1, .. }));
    }
}
