//! Error types shared across the workspace.
//!
//! Organised by subsystem: the execution backend ([`BackendError`]) and
//! kernel loading ([`LoadError`]). Store, configuration, and
//! initialisation errors live in their own crates and wrap these.

use std::error::Error;
use std::fmt;

/// Errors reported by a [`Device`](crate::Device) implementation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendError {
    /// The kernel source failed to compile.
    Compile {
        /// Backend diagnostic text.
        log: String,
    },
    /// The compiled kernel failed to link into a program.
    Link {
        /// Backend diagnostic text.
        log: String,
    },
    /// A required device capability is missing.
    Unsupported {
        /// Name of the missing capability.
        capability: String,
    },
    /// A buffer could not be allocated.
    Allocation {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compile { log } => write!(f, "compile failed: {log}"),
            Self::Link { log } => write!(f, "link failed: {log}"),
            Self::Unsupported { capability } => {
                write!(f, "device does not support {capability}")
            }
            Self::Allocation { reason } => write!(f, "buffer allocation failed: {reason}"),
        }
    }
}

impl Error for BackendError {}

/// Errors from loading a kernel program. All are fatal at initialisation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadError {
    /// The resolver has no source for the named kernel.
    MissingSource {
        /// Kernel name.
        name: String,
    },
    /// The resolver has no source for an auxiliary fragment.
    MissingAuxiliary {
        /// Kernel that requested the fragment.
        kernel: String,
        /// Fragment name.
        name: String,
    },
    /// The assembled source failed to compile.
    Compile {
        /// Kernel name.
        kernel: String,
        /// Backend diagnostic text.
        diagnostic: String,
        /// The assembled source, one `N: line` entry per line.
        listing: String,
    },
    /// The compiled program failed to link.
    Link {
        /// Kernel name.
        kernel: String,
        /// Backend diagnostic text.
        diagnostic: String,
    },
    /// The backend failed for a reason other than compile or link.
    Backend {
        /// Kernel name.
        kernel: String,
        /// The underlying backend error.
        source: BackendError,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSource { name } => write!(f, "no source for kernel '{name}'"),
            Self::MissingAuxiliary { kernel, name } => {
                write!(f, "kernel '{kernel}' requires missing auxiliary '{name}'")
            }
            Self::Compile {
                kernel,
                diagnostic,
                listing,
            } => {
                write!(
                    f,
                    "failed to compile kernel '{kernel}': {diagnostic}\n{listing}"
                )
            }
            Self::Link { kernel, diagnostic } => {
                write!(f, "failed to link kernel '{kernel}': {diagnostic}")
            }
            Self::Backend { kernel, source } => {
                write!(f, "backend failure loading kernel '{kernel}': {source}")
            }
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Backend { source, .. } => Some(source),
            _ => None,
        }
    }
}
