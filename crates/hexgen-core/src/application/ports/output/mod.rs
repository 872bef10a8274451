//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `hexgen-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::ServiceSpec;
use crate::error::HexgenResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `hexgen_adapters::filesystem::LocalFilesystem` (production)
/// - `hexgen_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> HexgenResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> HexgenResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> HexgenResult<()>;
}

/// A spec document that was found but could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedSpec {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of reading a spec directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecBatch {
    pub specs: Vec<ServiceSpec>,
    pub rejected: Vec<RejectedSpec>,
}

/// Port for loading service specs.
///
/// Implemented by:
/// - `hexgen_adapters::spec_source::DirectorySpecSource` (JSON/YAML documents on disk)
#[cfg_attr(test, mockall::automock)]
pub trait SpecSource: Send + Sync {
    /// Load every spec document under `specs_dir`.
    ///
    /// An unreadable directory is an error; individual bad documents are
    /// reported in [`SpecBatch::rejected`] and skipped.
    fn load_all(&self, specs_dir: &Path) -> HexgenResult<SpecBatch>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `hexgen_adapters::renderer::MiniJinjaRenderer` (embedded Java templates)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render the named template with `context`.
    ///
    /// Unknown templates and substitution failures are
    /// `ApplicationError::TemplateRender`.
    fn render(&self, template: &str, context: &Value) -> HexgenResult<String>;

    /// Whether a template with this name is available.
    fn has_template(&self, template: &str) -> bool;
}
