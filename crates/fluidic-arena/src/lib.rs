//! Double-buffered field storage for the Fluidic grid fluid solver.
//!
//! Every field slot owns two interchangeable buffers. The *front* buffer
//! is the externally visible current value; the *back* buffer is free
//! scratch and the only place a kernel may write.
//!
//! # Architecture
//!
//! ```text
//! FieldStore<B>
//! ├── front: [B; 4]  ←─── read by kernels (previous generation)
//! ├── back:  [B; 4]  ←─── written by exactly one kernel, then swapped
//! └── generation: [u64; 4] (swap counters)
//! ```
//!
//! Writes go through [`FieldStore::write_with`], which hands the closure
//! a [`FieldReader`] over the front buffers and `&mut` to one back buffer,
//! then swaps. The two arrays are disjoint borrows, so a kernel can never
//! read and write the same physical buffer.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod read;
pub mod store;

pub use config::StoreConfig;
pub use error::StoreError;
pub use read::FieldReader;
pub use store::FieldStore;
