//! Project stage: main class, build descriptor, runtime and CI files.

use serde_json::{Value, json};

use super::{EmitContext, StageOutput};
use crate::domain::{ArtifactKind, LayerKey};
use crate::error::HexgenResult;

const PROJECT_FILES: [ArtifactKind; 7] = [
    ArtifactKind::BuildDescriptor,
    ArtifactKind::ApplicationProperties,
    ArtifactKind::Readme,
    ArtifactKind::CiPipeline,
    ArtifactKind::GitIgnore,
    ArtifactKind::Dockerfile,
    ArtifactKind::DockerCompose,
];

pub fn emit(ctx: &EmitContext<'_>, out: &mut StageOutput) -> HexgenResult<()> {
    out.render_shared(
        ctx,
        ArtifactKind::MainApplication,
        json!({ "package_name": ctx.package(LayerKey::Root) }),
    )?;

    let endpoints: Vec<Value> = ctx
        .model
        .entities()
        .filter(|e| e.has_operations())
        .map(|e| {
            json!({
                "name": e.name(),
                "collection": e.collection_name(),
                "operations": e.operation_ids(),
            })
        })
        .collect();
    let extra = json!({ "endpoints": endpoints });

    for kind in PROJECT_FILES {
        out.render_shared(ctx, kind, extra.clone())?;
    }
    Ok(())
}
