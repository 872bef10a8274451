//! `hexgen generate`: run the whole pipeline, or just plan it with `--dry-run`.

use tracing::{info, instrument};

use crate::{
    cli::GenerateArgs,
    commands::{build_service, resolve_settings},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(dry_run = args.dry_run))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let mut settings = resolve_settings(&config, &args.source);
    if let Some(dir) = &args.output {
        settings.paths.output_dir = dir.clone();
    }
    let templates = args.templates.as_deref().or(config.templates.dir.as_deref());
    let service = build_service(templates)?;

    if args.dry_run {
        let plan = service.plan(&settings)?;
        info!(entities = plan.list_entities().len(), "dry run, nothing written");
        if !output.is_json() {
            output.info(&format!(
                "Dry run: {} would be written from {} specs",
                plan.project_root.display(),
                plan.spec_count
            ))?;
        }
        output.entities(&plan.entities(), &plan.skipped(), true)?;
        return Ok(());
    }

    if !output.is_json() {
        output.header(&format!(
            "Generating {} from {}",
            settings.project.name,
            settings.paths.specs_dir.display()
        ))?;
    }
    let report = service.generate(&settings)?;
    output.report(&report)?;
    Ok(())
}
