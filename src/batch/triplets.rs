//! Triplet (directed 2-path) derivation for angular message passing.
//!
//! For every edge e = (i←j) of the merged batch graph, every edge (j←k) with
//! the same middle atom j spawns a candidate path k→j→i; the degenerate
//! back-and-forth path with `k == i` is dropped. Candidates are enumerated
//! edge by edge in edge-id order, and within one edge in the source row's
//! column order, so the triplet arrays group triplets of one destination
//! edge contiguously.
//!
//! Two auxiliary index arrays accompany the atom-index triplets:
//!
//! - `id_expand_kj[t]` — batch-global edge id of the inner edge (j←k), used
//!   to gather the inner edge's feature for triplet t.
//! - `id_reduce_ji[t]` — batch-global edge id of the outer edge (i←j), used
//!   to scatter triplet t's contribution back onto its destination edge.

use sprs::CsMat;

/// Index arrays for all surviving triplets of one batch, parallel over the
/// triplet dimension.
#[derive(Debug, Default)]
pub(crate) struct TripletIndices {
    pub id3dnb_i: Vec<usize>,
    pub id3dnb_j: Vec<usize>,
    pub id3dnb_k: Vec<usize>,
    pub id_expand_kj: Vec<usize>,
    pub id_reduce_ji: Vec<usize>,
}

/// Derives all k→j→i triplets with `k != i` from the merged adjacency
/// matrix, its edge-id lookup, and the per-edge endpoint arrays.
pub(crate) fn triplet_indices(
    adj: &CsMat<u8>,
    lookup: &CsMat<usize>,
    target: &[usize],
    source: &[usize],
) -> TripletIndices {
    let mut out = TripletIndices::default();

    for (e, (&i, &j)) in target.iter().zip(source).enumerate() {
        let (Some(adj_row), Some(id_row)) = (adj.outer_view(j), lookup.outer_view(j)) else {
            continue;
        };
        for (&k, &edge_kj) in adj_row.indices().iter().zip(id_row.data()) {
            if k == i {
                continue;
            }
            out.id3dnb_i.push(i);
            out.id3dnb_j.push(j);
            out.id3dnb_k.push(k);
            out.id_expand_kj.push(edge_kj);
            out.id_reduce_ji.push(e);
        }
    }

    out
}
