//! Cutoff-based adjacency construction for a single structure.
//!
//! Builds a directed neighbor graph over a structure's atom indices as a
//! sparse CSR matrix: entry (i, j) is present iff
//! `distance(position[i], position[j]) <= cutoff` and `i != j`. The diagonal
//! is excluded explicitly — a self-distance of zero always satisfies the
//! cutoff predicate but a self-loop carries no distance or angular
//! information.
//!
//! The row-major order of the stored nonzeros is the canonical edge
//! numbering consumed by the merge and triplet stages: the position of an
//! entry in the CSR index array *is* its edge id.

use ndarray::ArrayView2;
use sprs::CsMat;

/// Builds the directed adjacency matrix of one structure.
///
/// Distinct atoms at identical coordinates are connected (distance zero
/// satisfies the predicate); only `i == j` is excluded. A non-positive
/// cutoff therefore still connects coincident atom pairs, and otherwise
/// yields an empty graph.
pub(crate) fn neighbor_graph(coords: ArrayView2<'_, f64>, cutoff: f64) -> CsMat<u8> {
    let n = coords.nrows();
    let mut indptr = Vec::with_capacity(n + 1);
    let mut indices = Vec::new();
    indptr.push(0);

    if cutoff < 0.0 {
        // No pair can satisfy the predicate; keep an all-empty row structure.
        indptr.resize(n + 1, 0);
        return CsMat::new((n, n), indptr, indices, Vec::new());
    }

    let cutoff_sq = cutoff * cutoff;
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let dx = coords[[i, 0]] - coords[[j, 0]];
            let dy = coords[[i, 1]] - coords[[j, 1]];
            let dz = coords[[i, 2]] - coords[[j, 2]];
            let dist_sq = dx * dx + dy * dy + dz * dz;
            if dist_sq <= cutoff_sq {
                indices.push(j);
            }
        }
        indptr.push(indices.len());
    }

    let data = vec![1u8; indices.len()];
    CsMat::new((n, n), indptr, indices, data)
}
