//! Infrastructure adapters for hexgen.
//!
//! This crate implements the ports defined in `hexgen_core::application::ports`:
//! spec documents are read from disk, artifacts are rendered with minijinja
//! and written through a [`Filesystem`](hexgen_core::application::ports::Filesystem).

pub mod filesystem;
pub mod renderer;
pub mod spec_source;

pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::MiniJinjaRenderer;
pub use spec_source::DirectorySpecSource;
