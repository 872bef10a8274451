//! Application layer for Hexgen.
//!
//! This layer contains:
//! - **Services**: the generation pipeline ([`GenerationService`])
//! - **Extractor**: turns ingested specs into entity models
//! - **Emitters**: one module per output stage
//! - **Ports**: traits for spec sources, rendering and the filesystem
//!
//! Naming rules, package layout and the Java type mapping live in
//! `crate::domain`.

pub mod emitters;
pub mod error;
pub mod extractor;
pub mod ports;
pub mod services;

pub use extractor::{ExtractedModel, ModelExtractor, SkippedEntity};
pub use services::{EntityPlan, GenerationPlan, GenerationReport, GenerationService, SkipNote};

pub use ports::{Filesystem, RejectedSpec, SpecBatch, SpecSource, TemplateRenderer};

pub use error::ApplicationError;
