//! Kernel programs and the solve-step executor for Fluidic.
//!
//! A kernel is loaded once: its source is assembled from a
//! [`SourceResolver`](fluidic_core::SourceResolver), compiled by the
//! [`Device`](fluidic_core::Device), and scanned for parameter
//! declarations to build a [`ParamSchema`]. Each invocation then binds a
//! transient [`Bindings`] set against that schema.
//!
//! ```text
//! KernelLoader ──load──► Program { name, schema, kernel }
//!                            │
//!            SolveStep::go ──┤  store.write_with(target, |fields, back| ..)
//!                            ▼
//!             bind(fields, bindings) → KernelArgs ──► Device::dispatch
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod binding;
pub mod executor;
pub mod loader;
pub mod program;
pub mod report;
pub mod schema;
pub mod source;

pub use binding::{Bindings, Value};
pub use executor::SolveStep;
pub use loader::KernelLoader;
pub use program::Program;
pub use report::{BindReport, BindWarning};
pub use schema::ParamSchema;
pub use source::{KernelSource, PROLOG};
