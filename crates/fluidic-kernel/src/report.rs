//! Non-fatal outcomes of parameter binding.

use std::fmt;

use fluidic_core::ParamType;

/// A binding that was skipped. The invocation still runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindWarning {
    /// The kernel declares no parameter with this name.
    UnknownParameter {
        /// Kernel name.
        kernel: String,
        /// Binding name.
        name: String,
    },
    /// The value's shape does not match the declared type.
    TypeMismatch {
        /// Kernel name.
        kernel: String,
        /// Parameter name.
        name: String,
        /// Declared type.
        expected: ParamType,
        /// Shape of the supplied value.
        found: &'static str,
    },
}

impl fmt::Display for BindWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownParameter { kernel, name } => {
                write!(f, "kernel '{kernel}' has no parameter '{name}'")
            }
            Self::TypeMismatch {
                kernel,
                name,
                expected,
                found,
            } => write!(
                f,
                "kernel '{kernel}' parameter '{name}' is {expected}, got {found}"
            ),
        }
    }
}

/// What happened when one binding set was applied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct BindReport {
    /// Bindings handed to the device.
    pub applied: usize,
    /// Bindings skipped, in binding order.
    pub warnings: Vec<BindWarning>,
}

impl BindReport {
    /// Whether every binding was applied.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: BindReport) {
        self.applied += other.applied;
        self.warnings.extend(other.warnings);
    }
}
