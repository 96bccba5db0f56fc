//! Error types for batch assembly.
//!
//! All variants are fatal: assembly is all-or-nothing and raises before any
//! partial batch exists. Assembly is also pure and deterministic, so
//! retrying the same input can never succeed where a first attempt failed.

use thiserror::Error;

/// Errors that can occur while assembling a batch.
#[derive(Debug, Error)]
pub enum Error {
    /// A structure's flat position data cannot be reshaped to one 3D point
    /// per declared atom.
    ///
    /// Raised before any graph construction begins.
    #[error("structure {index}: positions length {len} is not 3 × atom count {atoms}")]
    Shape {
        /// Position of the structure in the input sequence.
        index: usize,
        /// Length of the flat position array.
        len: usize,
        /// Declared atom count (length of the types array).
        atoms: usize,
    },

    /// Structures within one batch expose inconsistent label field sets.
    ///
    /// Every structure in a batch must declare the same label names with the
    /// same per-structure/per-atom kind as the first structure.
    #[error("structure {index}: label schema mismatch: {detail}")]
    Schema {
        /// Position of the offending structure in the input sequence.
        index: usize,
        /// Description of the mismatch.
        detail: String,
    },

    /// A structure has zero atoms.
    ///
    /// Downstream edge and triplet index arithmetic has no valid definition
    /// for an empty structure, so these are rejected outright.
    #[error("structure {index} has no atoms: at least one atom is required")]
    EmptyStructure {
        /// Position of the structure in the input sequence.
        index: usize,
    },

    /// The input sequence contains no structures.
    #[error("batch contains no structures: at least one is required")]
    EmptyBatch,

    /// Internal array conversion error.
    #[error("internal conversion error: {0}")]
    Conversion(String),
}

impl Error {
    /// Creates a [`Schema`](Error::Schema) error.
    pub fn schema(index: usize, detail: impl Into<String>) -> Self {
        Self::Schema {
            index,
            detail: detail.into(),
        }
    }

    /// Creates a [`Shape`](Error::Shape) error.
    pub fn shape(index: usize, len: usize, atoms: usize) -> Self {
        Self::Shape { index, len, atoms }
    }
}
