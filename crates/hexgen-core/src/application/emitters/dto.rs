//! DTO stage: one transfer object per object schema.

use serde_json::json;
use tracing::debug;

use super::{EmitContext, StageOutput};
use crate::domain::ArtifactKind;
use crate::error::HexgenResult;

pub fn emit(ctx: &EmitContext<'_>, out: &mut StageOutput) -> HexgenResult<()> {
    for (service, schema) in ctx.model.dto_schemas() {
        let name = &schema.original_name;
        if !schema.is_object() || name.contains("Error") {
            debug!(schema = %name, "not a DTO");
            continue;
        }
        let package = ctx.locator.packages().dto_package(service);
        let subject = format!("{service}.{name}");
        out.render(
            ctx,
            ArtifactKind::Dto,
            Some(&subject),
            ctx.locator.dto_path(service, name),
            json!({
                "dto": {
                    "name": name,
                    "package": package,
                    "service": service,
                    "description": schema.description.clone().unwrap_or_default(),
                    "fields": ctx.field_contexts(schema),
                    "imports": ctx.field_imports(schema),
                }
            }),
        )?;
    }
    Ok(())
}
