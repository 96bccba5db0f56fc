//! A pure Rust library for assembling batches of 3D atomic structures into a
//! single block-diagonal graph representation for directional message-passing
//! neural networks. It derives cutoff-based neighbor graphs per structure,
//! merges them without ever materializing the dense batch matrix, and emits
//! the edge and triplet index arrays a downstream interaction layer needs to
//! gather and scatter features efficiently.
//!
//! # Features
//!
//! - **Neighbor graphs** — Directed cutoff adjacency per structure as sparse
//!   CSR, with self-loops excluded and a stable row-major edge numbering
//! - **Block-diagonal batching** — O(nonzeros) merge of per-structure graphs
//!   into one batch graph with globally offset atom indices
//! - **Triplet indices** — All directed 2-paths k→j→i with `k != i`, plus the
//!   edge-index mappings (`id_expand_kj`, `id_reduce_ji`) that drive angular
//!   message passing
//! - **Label pass-through** — Per-structure scalar and per-atom label fields,
//!   schema-checked once per batch and concatenated in input order
//! - **Augmentation** — Seeded random rotation and Gaussian coordinate noise,
//!   preserving the unperturbed geometry alongside the perturbed one
//!
//! # Quick Start
//!
//! The main entry point is the [`assemble`] function, which takes a slice of
//! [`Structure`]s and a [`BatchConfig`] and produces one [`AtomsBatch`]:
//!
//! ```
//! use atomgraph::{assemble, BatchConfig, LabelValue, Structure};
//!
//! // Two hydrogen dimers, 1 Å bond length, with an energy label each.
//! let batch = assemble(
//!     &[
//!         Structure::new(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0], vec![1, 1])
//!             .with_label("U0", LabelValue::Scalar(-1.17)),
//!         Structure::new(vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0], vec![1, 1])
//!             .with_label("U0", LabelValue::Scalar(-1.17)),
//!     ],
//!     &BatchConfig::default(),
//! )?;
//!
//! // Each dimer contributes two directed edges; atom indices are global.
//! let idnb_i = batch.idnb_i().as_long().unwrap();
//! let idnb_j = batch.idnb_j().as_long().unwrap();
//! assert_eq!(idnb_i.as_slice().unwrap(), &[0, 1, 2, 3]);
//! assert_eq!(idnb_j.as_slice().unwrap(), &[1, 0, 3, 2]);
//!
//! // Two atoms per structure leave no room for a k != i triplet.
//! assert!(batch.id3dnb_k().is_empty());
//!
//! // Segment labels map each atom back to its structure for pooling.
//! let seg = batch.batch_seg().as_long().unwrap();
//! assert_eq!(seg.as_slice().unwrap(), &[0, 0, 1, 1]);
//!
//! // Labels concatenate one value per structure.
//! assert_eq!(batch.get("U0").unwrap().len(), 2);
//! # Ok::<(), atomgraph::BatchError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`assemble`] — Batch assembly entry point
//! - [`BatchConfig`] — Cutoff distance and output representation settings
//! - [`augment`] — Caller-side coordinate augmentation (rotation, noise)
//!
//! # Data Types
//!
//! ## Input
//!
//! - [`Structure`] — One molecule's flat positions, atomic numbers, and labels
//! - [`LabelValue`] — Per-structure scalar or per-atom label field
//!
//! ## Output
//!
//! - [`AtomsBatch`] — Flat field-name → array mapping with typed accessors
//! - [`FieldArray`] — Output array in its converted representation
//! - [`RawArray`] — Assembled array before representation conversion
//! - [`PostFn`], [`to_field`], [`to_field_f64`] — Conversion applied uniformly
//!   to every output field

mod batch;
mod model;

pub mod augment;

pub use model::batch::AtomsBatch;
pub use model::field::{to_field, to_field_f64, FieldArray, PostFn, RawArray};
pub use model::structure::{LabelValue, Structure};

pub use batch::{assemble, BatchConfig};

pub use batch::Error as BatchError;
