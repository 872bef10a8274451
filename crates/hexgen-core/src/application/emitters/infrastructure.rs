//! Infrastructure stage.
//!
//! Split in two passes: [`emit`] produces persistence, REST and shared
//! config artifacts; [`emit_wiring`] runs after those are written and wires
//! only the entities the ledger reports as complete.

use serde_json::{Value, json};
use tracing::info;

use super::{EmitContext, StageOutput};
use crate::domain::{ArtifactKind, GenerationLedger, LayerKey};
use crate::error::HexgenResult;

/// Shared exception types: kind, class name, HTTP status.
const EXCEPTIONS: [(ArtifactKind, &str, &str); 3] = [
    (ArtifactKind::NotFoundException, "NotFoundException", "NOT_FOUND"),
    (ArtifactKind::ConflictException, "ConflictException", "CONFLICT"),
    (
        ArtifactKind::InternalServerErrorException,
        "InternalServerErrorException",
        "INTERNAL_SERVER_ERROR",
    ),
];

pub fn emit(ctx: &EmitContext<'_>, out: &mut StageOutput) -> HexgenResult<()> {
    for entity in ctx.model.entities() {
        out.render_entity(
            ctx,
            ArtifactKind::PersistenceRecord,
            entity,
            json!({ "package_name": ctx.package(LayerKey::InfraPersistenceEntity) }),
        )?;
        out.render_entity(
            ctx,
            ArtifactKind::Repository,
            entity,
            json!({ "package_name": ctx.package(LayerKey::InfraPersistenceRepository) }),
        )?;
        out.render_entity(
            ctx,
            ArtifactKind::RepositoryAdapter,
            entity,
            json!({ "package_name": ctx.package(LayerKey::InfraPersistenceAdapter) }),
        )?;
        if entity.has_operations() {
            out.render_entity(
                ctx,
                ArtifactKind::RestController,
                entity,
                json!({ "package_name": ctx.package(LayerKey::InfraRest) }),
            )?;
        }
    }

    for (kind, class_name, status) in EXCEPTIONS {
        out.render_shared(
            ctx,
            kind,
            json!({
                "package_name": ctx.package(LayerKey::InfraConfigExceptions),
                "class_name": class_name,
                "http_status": status,
            }),
        )?;
    }
    out.render_shared(
        ctx,
        ArtifactKind::ExceptionHandler,
        json!({ "package_name": ctx.package(LayerKey::InfraConfigExceptions) }),
    )?;
    out.render_shared(
        ctx,
        ArtifactKind::LoggingUtils,
        json!({ "package_name": ctx.package(LayerKey::Utils) }),
    )?;
    Ok(())
}

/// Render `ApplicationConfiguration` and `SecurityConfiguration` for the
/// entities `ledger` reports as wireable.
pub fn emit_wiring(
    ctx: &EmitContext<'_>,
    ledger: &GenerationLedger,
    out: &mut StageOutput,
) -> HexgenResult<Vec<String>> {
    let wired: Vec<&str> = ledger
        .wireable_entities()
        .into_iter()
        .filter(|name| ctx.model.entity(name).is_some())
        .collect();
    info!(wired = wired.len(), "wiring entities");

    let wired_models: Vec<_> = wired.iter().filter_map(|name| ctx.model.entity(name)).collect();
    let entities: Vec<Value> = wired_models
        .iter()
        .map(|entity| ctx.entity_context(entity))
        .collect();
    let public_paths: Vec<String> = wired_models
        .iter()
        .map(|entity| format!("/{}/**", entity.collection_name()))
        .collect();

    out.render_shared(
        ctx,
        ArtifactKind::Configuration,
        json!({
            "package_name": ctx.package(LayerKey::InfraConfig),
            "wired_entities": entities,
        }),
    )?;
    out.render_shared(
        ctx,
        ArtifactKind::SecurityConfiguration,
        json!({
            "package_name": ctx.package(LayerKey::InfraConfig),
            "public_paths": public_paths,
        }),
    )?;
    Ok(wired.into_iter().map(str::to_string).collect())
}
