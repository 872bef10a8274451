//! `hexgen init`: write a default generation manifest.

use crate::{
    cli::InitArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(args: InitArgs, output: OutputManager) -> CliResult<()> {
    let path = args.path;

    if path.exists() && !args.force {
        return Err(CliError::ManifestExists { path });
    }

    let manifest = AppConfig::default()
        .to_manifest()
        .with_cli_context(|| "Failed to build default manifest")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create directory '{}'", parent.display())
        })?;
    }
    std::fs::write(&path, manifest)
        .with_cli_context(|| format!("Failed to write manifest to '{}'", path.display()))?;

    output.success(&format!("Manifest created at {}", path.display()))?;
    output.detail("Edit [project] and [paths], then run 'hexgen generate'")?;
    Ok(())
}
