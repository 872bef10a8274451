//! Application stage: use-case ports, services, mappers.

use serde_json::json;
use tracing::debug;

use super::{EmitContext, StageOutput};
use crate::domain::{ArtifactKind, LayerKey};
use crate::error::HexgenResult;

pub fn emit(ctx: &EmitContext<'_>, out: &mut StageOutput) -> HexgenResult<()> {
    for entity in ctx.model.entities() {
        // Every extracted entity is backed by a validated object schema.
        out.render_entity(
            ctx,
            ArtifactKind::Mapper,
            entity,
            json!({ "package_name": ctx.package(LayerKey::ApplicationMapper) }),
        )?;

        if !entity.has_operations() {
            debug!(entity = entity.name(), "no operations, skipping use case and service");
            continue;
        }
        out.render_entity(
            ctx,
            ArtifactKind::UseCase,
            entity,
            json!({ "package_name": ctx.package(LayerKey::DomainPortsInput) }),
        )?;
        out.render_entity(
            ctx,
            ArtifactKind::Service,
            entity,
            json!({ "package_name": ctx.package(LayerKey::ApplicationService) }),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::application::extractor::ModelExtractor;
    use crate::domain::{ProjectSettings, PropertyDef, SchemaDef, ServiceSpec};

    #[test]
    fn mapper_use_case_and_service_for_entity_with_operations() {
        let model = model();
        let settings = ProjectSettings::default();
        let locator = locator();
        let renderer = echo_renderer();
        let ctx = EmitContext::new(&model, &settings, &locator, &renderer);

        let mut out = StageOutput::new();
        emit(&ctx, &mut out).unwrap();

        let kinds: Vec<_> = out.artifacts.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![ArtifactKind::Mapper, ArtifactKind::UseCase, ArtifactKind::Service]);
    }

    #[test]
    fn entity_without_operations_only_gets_mapper() {
        let spec = ServiceSpec::new(
            "catalog",
            [(
                "TagResponse".to_string(),
                SchemaDef::new("TagResponse")
                    .with_type("object")
                    .with_property("label", PropertyDef::of_type("string")),
            )]
            .into_iter()
            .collect(),
            vec![],
        );
        let model = ModelExtractor::default().extract(vec![spec]);
        let settings = ProjectSettings::default();
        let locator = locator();
        let renderer = echo_renderer();
        let ctx = EmitContext::new(&model, &settings, &locator, &renderer);

        let mut out = StageOutput::new();
        emit(&ctx, &mut out).unwrap();
        assert_eq!(out.artifacts.len(), 1);
        assert_eq!(out.artifacts[0].kind, ArtifactKind::Mapper);
    }
}
