//! Domain stage: status enum, domain models, output ports.

use serde_json::json;

use super::{EmitContext, StageOutput};
use crate::domain::{ArtifactKind, LayerKey};
use crate::error::HexgenResult;

/// Values of the generated `EntityStatus` enum.
pub const STATUS_VALUES: [&str; 3] = ["ACTIVE", "INACTIVE", "DELETED"];

pub fn emit(ctx: &EmitContext<'_>, out: &mut StageOutput) -> HexgenResult<()> {
    out.render_shared(
        ctx,
        ArtifactKind::StatusEnum,
        json!({
            "package_name": ctx.package(LayerKey::DomainModel),
            "statuses": STATUS_VALUES,
        }),
    )?;

    for entity in ctx.model.entities() {
        out.render_entity(
            ctx,
            ArtifactKind::DomainModel,
            entity,
            json!({ "package_name": ctx.package(LayerKey::DomainModel) }),
        )?;
        out.render_entity(
            ctx,
            ArtifactKind::OutputPort,
            entity,
            json!({ "package_name": ctx.package(LayerKey::DomainPortsOutput) }),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::domain::ProjectSettings;

    #[test]
    fn status_enum_plus_model_and_port_per_entity() {
        let model = model();
        let settings = ProjectSettings::default();
        let locator = locator();
        let renderer = echo_renderer();
        let ctx = EmitContext::new(&model, &settings, &locator, &renderer);

        let mut out = StageOutput::new();
        emit(&ctx, &mut out).unwrap();

        let kinds: Vec<_> = out.artifacts.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![ArtifactKind::StatusEnum, ArtifactKind::DomainModel, ArtifactKind::OutputPort]
        );
        assert!(out.artifacts[2].target_path.ends_with("domain/ports/output/UserRepositoryPort.java"));
    }
}
