//! Test utilities and mock types for Fluidic development.
//!
//! Provides [`RecordingDevice`], a [`Device`](fluidic_core::Device) that
//! allocates opaque numbered buffers and records every dispatch instead of
//! computing anything, and [`MapSources`], an in-memory kernel source
//! resolver with stubs for every standard kernel.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod device;
pub mod sources;

pub use device::{Dispatch, MockBuffer, MockKernel, RecordingDevice};
pub use sources::MapSources;
