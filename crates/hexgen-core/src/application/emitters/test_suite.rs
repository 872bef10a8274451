//! Test stage: per-entity test classes and the H2 test schema.

use serde_json::{Value, json};

use super::{EmitContext, StageOutput};
use crate::domain::naming::camel_to_snake;
use crate::domain::property::TIMESTAMP_FIELDS;
use crate::domain::{ArtifactKind, EntityModel, GenerationLedger, LayerKey, PropertyDef};
use crate::error::HexgenResult;

pub fn emit(
    ctx: &EmitContext<'_>,
    ledger: &GenerationLedger,
    out: &mut StageOutput,
) -> HexgenResult<()> {
    for entity in ctx.model.entities() {
        if ledger.is_wireable(entity.name()) {
            out.render_entity(
                ctx,
                ArtifactKind::ServiceTest,
                entity,
                json!({ "package_name": ctx.package(LayerKey::ApplicationService) }),
            )?;
            out.render_entity(
                ctx,
                ArtifactKind::MapperTest,
                entity,
                json!({ "package_name": ctx.package(LayerKey::ApplicationMapper) }),
            )?;
        }
        if ledger.has(entity.name(), ArtifactKind::RestController) {
            out.render_entity(
                ctx,
                ArtifactKind::ControllerTest,
                entity,
                json!({ "package_name": ctx.package(LayerKey::InfraRest) }),
            )?;
        }
    }

    let tables: Vec<Value> = ctx.model.entities().map(table_definition).collect();
    out.render_shared(ctx, ArtifactKind::TestSchema, json!({ "tables": tables }))?;
    out.render_shared(ctx, ArtifactKind::TestProperties, json!({}))?;
    Ok(())
}

/// H2 column type for a property.
pub fn sql_type(def: &PropertyDef) -> &'static str {
    match (def.type_or_default(), def.format.as_deref()) {
        ("string", Some("date-time")) => "TIMESTAMP",
        ("string", Some("uuid")) => "UUID",
        ("string", _) => "VARCHAR(255)",
        ("integer", Some("int64")) => "BIGINT",
        ("integer", _) => "INTEGER",
        ("number", _) => "DOUBLE PRECISION",
        ("boolean", _) => "BOOLEAN",
        ("array", _) => "VARCHAR(1000)",
        ("object", _) => "VARCHAR(2000)",
        _ => "VARCHAR(255)",
    }
}

/// Table layout for one entity: primary key first, then the remaining
/// properties in name order.
pub fn table_definition(entity: &EntityModel) -> Value {
    let schema = entity.schema();
    let columns: Vec<Value> = schema
        .properties
        .iter()
        .filter(|(name, _)| !entity.is_primary_key(name))
        .map(|(name, def)| {
            let is_timestamp = TIMESTAMP_FIELDS.contains(&name.as_str())
                || def.format.as_deref() == Some("date-time");
            json!({
                "name": camel_to_snake(name),
                "sql_type": sql_type(def),
                "not_null": schema.is_required(name) && !is_timestamp,
            })
        })
        .collect();
    json!({
        "name": entity.collection_name(),
        "primary_key": camel_to_snake(&entity.primary_key_name()),
        "columns": columns,
    })
}
