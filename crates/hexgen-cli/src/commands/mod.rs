//! Command handlers.  Each module exposes one `execute` function.

pub mod completions;
pub mod entities;
pub mod generate;
pub mod init;

use std::path::Path;

use hexgen_adapters::{DirectorySpecSource, LocalFilesystem, MiniJinjaRenderer};
use hexgen_core::application::GenerationService;
use hexgen_core::domain::ProjectSettings;

use crate::{cli::SourceArgs, config::AppConfig, error::CliResult};

/// Manifest settings with command-line overrides applied.
pub(crate) fn resolve_settings(config: &AppConfig, source: &SourceArgs) -> ProjectSettings {
    let mut settings = config.settings();
    if let Some(specs) = &source.specs {
        settings.paths.specs_dir = specs.clone();
    }
    if let Some(base_package) = &source.base_package {
        settings.project.base_package = base_package.clone();
    }
    settings
}

/// Generation service over the production adapters.
pub(crate) fn build_service(templates: Option<&Path>) -> CliResult<GenerationService> {
    let mut renderer = MiniJinjaRenderer::new()?;
    if let Some(dir) = templates {
        renderer = renderer.with_override_dir(dir)?;
    }
    Ok(GenerationService::new(
        Box::new(DirectorySpecSource::new()),
        Box::new(renderer),
        Box::new(LocalFilesystem::new()),
    ))
}
