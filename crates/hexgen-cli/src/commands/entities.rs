//! `hexgen entities`: ingest and extract, then list what would be generated.

use crate::{
    cli::EntitiesArgs,
    commands::{build_service, resolve_settings},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: EntitiesArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let settings = resolve_settings(&config, &args.source);
    let plan = build_service(config.templates.dir.as_deref())?.plan(&settings)?;
    output.entities(&plan.entities(), &plan.skipped(), args.paths)?;
    Ok(())
}
