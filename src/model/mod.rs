//! Core data structures flowing through batch assembly.
//!
//! - [`structure`] – Input molecule records: flat positions, atomic numbers,
//!   and a declared set of optional label fields.
//! - [`field`] – Output representation: raw arrays, converted arrays, and the
//!   conversion function applied uniformly to every batch field.
//! - [`batch`] – The assembled output record mapping field names to arrays.
//!
//! The data model deliberately separates raw input records ([`Structure`])
//! from the assembled batch ([`AtomsBatch`]) so the [`crate::assemble`]
//! pipeline transforms one into the other without retaining state.
//!
//! [`Structure`]: structure::Structure
//! [`AtomsBatch`]: batch::AtomsBatch

pub mod batch;
pub mod field;
pub mod structure;
