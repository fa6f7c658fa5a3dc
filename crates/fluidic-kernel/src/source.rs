//! Kernel source assembly.
//!
//! A kernel's full text is: a fixed precision prolog, then each requested
//! auxiliary fragment in caller order, then the kernel body. Every piece
//! starts on its own line so diagnostics line up with the listing.

use fluidic_core::{LoadError, SourceResolver};

/// Precision header prepended to every kernel.
pub const PROLOG: &str = "precision mediump float;";

/// Assembled, ready-to-compile kernel source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KernelSource {
    name: String,
    text: String,
}

impl KernelSource {
    /// Resolve and concatenate the source for kernel `name`.
    ///
    /// # Errors
    ///
    /// [`LoadError::MissingSource`] if the resolver does not know the
    /// kernel, [`LoadError::MissingAuxiliary`] if it does not know one of
    /// the fragments.
    pub fn assemble<R>(resolver: &R, name: &str, auxiliaries: &[&str]) -> Result<Self, LoadError>
    where
        R: SourceResolver + ?Sized,
    {
        let mut text = String::from(PROLOG);
        text.push('\n');

        for aux in auxiliaries {
            let fragment = resolver
                .auxiliary(aux)
                .ok_or_else(|| LoadError::MissingAuxiliary {
                    kernel: name.to_string(),
                    name: (*aux).to_string(),
                })?;
            push_piece(&mut text, &fragment);
        }

        let body = resolver
            .kernel(name)
            .ok_or_else(|| LoadError::MissingSource {
                name: name.to_string(),
            })?;
        push_piece(&mut text, &body);

        Ok(Self {
            name: name.to_string(),
            text,
        })
    }

    /// Wrap already-assembled text.
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Kernel name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full assembled text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text with every line prefixed by its zero-based number.
    pub fn listing(&self) -> String {
        self.text
            .lines()
            .enumerate()
            .map(|(i, line)| format!("{i}: {line}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn push_piece(text: &mut String, piece: &str) {
    text.push_str(piece);
    if !piece.ends_with('\n') {
        text.push('\n');
    }
}
