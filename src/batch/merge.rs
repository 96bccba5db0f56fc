//! Block-diagonal merge of per-structure adjacency matrices.
//!
//! The merge operates directly on each block's CSR storage — values, column
//! indices, and row pointers are concatenated with index offsets — so it is
//! O(total nonzeros) and never materializes the dense batch matrix. Structure
//! `b`'s atom indices land at an offset equal to the cumulative atom count of
//! structures `0..b`.
//!
//! The merged matrix's row-major nonzero order defines the batch-global edge
//! numbering; [`edge_id_lookup`] materializes that numbering as a second CSR
//! matrix with the same sparsity pattern whose stored values are the edge ids
//! themselves, so a (target, source) pair can be translated back to its edge
//! id by row lookup.

use sprs::CsMat;

/// Merges square CSR blocks into one block-diagonal CSR matrix.
pub(crate) fn block_diagonal(blocks: &[CsMat<u8>]) -> CsMat<u8> {
    let total: usize = blocks.iter().map(|b| b.rows()).sum();
    let nnz: usize = blocks.iter().map(|b| b.nnz()).sum();

    let mut indptr = Vec::with_capacity(total + 1);
    let mut indices = Vec::with_capacity(nnz);
    let mut data = Vec::with_capacity(nnz);
    indptr.push(0);

    let mut offset = 0;
    for block in blocks {
        for row in block.outer_iterator() {
            for (col, &value) in row.iter() {
                indices.push(col + offset);
                data.push(value);
            }
            indptr.push(indices.len());
        }
        offset += block.rows();
    }

    CsMat::new((total, total), indptr, indices, data)
}

/// Builds the edge-id lookup matrix for a merged adjacency matrix.
///
/// Shares the adjacency matrix's sparsity pattern; the value stored at
/// (i, j) is the edge id of edge (i←j), i.e. that entry's position in the
/// row-major nonzero enumeration.
pub(crate) fn edge_id_lookup(adj: &CsMat<u8>) -> CsMat<usize> {
    let mut indptr = Vec::with_capacity(adj.rows() + 1);
    let mut indices = Vec::with_capacity(adj.nnz());
    indptr.push(0);
    for row in adj.outer_iterator() {
        indices.extend_from_slice(row.indices());
        indptr.push(indices.len());
    }
    let edge_ids = (0..adj.nnz()).collect();
    CsMat::new((adj.rows(), adj.cols()), indptr, indices, edge_ids)
}

/// Enumerates the merged matrix's nonzeros in row-major order, yielding the
/// per-edge target (row) and source (column) atom index arrays.
pub(crate) fn edge_endpoints(adj: &CsMat<u8>) -> (Vec<usize>, Vec<usize>) {
    let mut target = Vec::with_capacity(adj.nnz());
    let mut source = Vec::with_capacity(adj.nnz());
    for (i, row) in adj.outer_iterator().enumerate() {
        for &j in row.indices() {
            target.push(i);
            source.push(j);
        }
    }
    (target, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::graph::neighbor_graph;
    use ndarray::array;

    fn pair_graph() -> CsMat<u8> {
        // Two atoms 1.0 apart, cutoff 5.0: edges (0,1) and (1,0).
        let coords = array![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
        neighbor_graph(coords.view(), 5.0)
    }

    #[test]
    fn merge_offsets_block_indices() {
        let merged = block_diagonal(&[pair_graph(), pair_graph()]);
        assert_eq!(merged.rows(), 4);
        assert_eq!(merged.nnz(), 4);

        let (target, source) = edge_endpoints(&merged);
        assert_eq!(target, vec![0, 1, 2, 3]);
        assert_eq!(source, vec![1, 0, 3, 2]);
    }

    #[test]
    fn merge_keeps_blocks_disconnected() {
        let merged = block_diagonal(&[pair_graph(), pair_graph()]);
        let (target, source) = edge_endpoints(&merged);
        for (i, j) in target.into_iter().zip(source) {
            // No edge may cross the block boundary between atoms 1 and 2.
            assert_eq!(i < 2, j < 2);
        }
    }

    #[test]
    fn merge_handles_edgeless_blocks() {
        let lone = neighbor_graph(array![[0.0, 0.0, 0.0]].view(), 5.0);
        let merged = block_diagonal(&[lone.clone(), pair_graph(), lone]);
        assert_eq!(merged.rows(), 4);
        assert_eq!(merged.nnz(), 2);

        let (target, source) = edge_endpoints(&merged);
        assert_eq!(target, vec![1, 2]);
        assert_eq!(source, vec![2, 1]);
    }

    #[test]
    fn merge_of_single_block_is_identity() {
        let block = pair_graph();
        let merged = block_diagonal(&[block.clone()]);
        assert_eq!(merged.rows(), block.rows());
        assert_eq!(merged.nnz(), block.nnz());
        assert_eq!(edge_endpoints(&merged), edge_endpoints(&block));
    }

    #[test]
    fn lookup_shares_pattern_and_counts_edges() {
        let merged = block_diagonal(&[pair_graph(), pair_graph()]);
        let lookup = edge_id_lookup(&merged);

        assert_eq!(lookup.indices(), merged.indices());
        assert_eq!(lookup.data(), &[0, 1, 2, 3]);
    }

    #[test]
    fn lookup_maps_atom_pair_to_edge_id() {
        let coords = array![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
        ];
        let adj = neighbor_graph(coords.view(), 1.5);
        let lookup = edge_id_lookup(&adj);
        let (target, source) = edge_endpoints(&adj);

        for (e, (&i, &j)) in target.iter().zip(&source).enumerate() {
            let row = lookup.outer_view(i).unwrap();
            let id = row
                .iter()
                .find(|(col, _)| *col == j)
                .map(|(_, &id)| id)
                .unwrap();
            assert_eq!(id, e);
        }
    }
}
