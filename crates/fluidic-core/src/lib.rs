//! Core types and traits for the Fluidic grid fluid solver.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other crate in the workspace: field
//! slot identifiers, kernel parameter types, the [`Device`] execution
//! backend trait, the [`SourceResolver`] collaborator, and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod edge;
pub mod error;
pub mod id;
pub mod param;
pub mod traits;

pub use edge::EdgeMode;
pub use error::{BackendError, LoadError};
pub use id::{FieldSlot, GridSize, Resolution, TextureUnit};
pub use param::{ParamType, Uniform};
pub use traits::{Device, GridBuffer, KernelArgs, SourceResolver, Target};
