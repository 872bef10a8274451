//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `hexgen-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `SpecSource`: Spec document discovery and parsing
//!   - `TemplateRenderer`: Template rendering
//!   - `Filesystem`: File operations
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Filesystem, RejectedSpec, SpecBatch, SpecSource, TemplateRenderer};

#[cfg(test)]
pub use output::{MockFilesystem, MockSpecSource, MockTemplateRenderer};
