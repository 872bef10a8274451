//! Application services - orchestrate use cases.
//!
//! A single service drives the whole run: settings and spec ingestion up
//! front, then one emitter stage after another.

pub mod generation_service;

pub use generation_service::{
    EntityPlan, GenerationPlan, GenerationReport, GenerationService, SkipNote,
};
