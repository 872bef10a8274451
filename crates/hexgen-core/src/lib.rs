//! Hexgen Core - Hexagonal Architecture Implementation
//!
//! Domain and application layers for Hexgen, a generator that turns a
//! directory of OpenAPI-style service specs into a Spring WebFlux project
//! laid out in hexagonal (ports and adapters) style.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           hexgen-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          GenerationService              │
//! │   ingest → extract → emit stages        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  SpecSource, TemplateRenderer, Filesystem│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     hexgen-adapters (Infrastructure)    │
//! │  DirectorySpecSource, MiniJinjaRenderer │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hexgen_core::prelude::*;
//!
//! let service = GenerationService::new(specs, renderer, filesystem);
//! let report = service.generate(&ProjectSettings::default())?;
//! println!("{} artifacts", report.artifacts_written);
//! ```

pub mod domain;

pub mod application;

pub mod error;

pub mod prelude {
    pub use crate::application::{
        GenerationPlan, GenerationReport, GenerationService,
        ports::{Filesystem, SpecSource, TemplateRenderer},
    };
    pub use crate::domain::{
        ArtifactKind, EntityModel, Layer, PackageMap, ProjectSettings, ServiceSpec,
    };
    pub use crate::error::{HexgenError, HexgenResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
