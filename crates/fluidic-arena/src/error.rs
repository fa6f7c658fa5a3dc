//! Field store error types.

use std::error::Error;
use std::fmt;

use fluidic_core::{BackendError, FieldSlot, GridSize, Resolution};

/// Errors that can occur while building or mutating the field store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The device failed to allocate a field buffer.
    Device(BackendError),
    /// A resolution class has a zero-length axis.
    EmptyGrid {
        /// The offending resolution class.
        resolution: Resolution,
    },
    /// A replacement buffer does not match the slot's fixed size.
    SizeMismatch {
        /// The slot being replaced.
        slot: FieldSlot,
        /// The slot's fixed size.
        expected: GridSize,
        /// The size of the offered buffer.
        found: GridSize,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device(e) => write!(f, "device: {e}"),
            Self::EmptyGrid { resolution } => {
                write!(f, "{resolution} grid has a zero-length axis")
            }
            Self::SizeMismatch {
                slot,
                expected,
                found,
            } => {
                write!(
                    f,
                    "buffer for field '{slot}' must be {expected}, got {found}"
                )
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Device(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BackendError> for StoreError {
    fn from(e: BackendError) -> Self {
        Self::Device(e)
    }
}
