//! Layer emitters.
//!
//! Each emitter turns the extracted model into rendered artifacts for one
//! stage. Emitters never touch the filesystem; the generation service writes
//! what they produce and records it in the ledger.

pub mod application;
pub mod domain;
pub mod dto;
pub mod infrastructure;
pub mod project;
pub mod test_suite;

use std::path::PathBuf;

use serde_json::{Map, Value, json};
use tracing::warn;

use crate::application::extractor::ExtractedModel;
use crate::application::ports::TemplateRenderer;
use crate::domain::naming::camel_to_snake;
use crate::domain::{
    ArtifactKind, ArtifactLocator, CrudVerb, EntityModel, GeneratedArtifact, LayerKey,
    ProjectSettings, PropertyMapper, SchemaDef,
};
use crate::error::HexgenResult;

/// Substrings that mark a text field as searchable.
const SEARCHABLE_HINTS: [&str; 6] = ["name", "title", "description", "status", "username", "email"];

/// Read-only inputs shared by every emitter.
pub struct EmitContext<'a> {
    pub model: &'a ExtractedModel,
    pub settings: &'a ProjectSettings,
    pub locator: &'a ArtifactLocator,
    pub renderer: &'a dyn TemplateRenderer,
    mapper: PropertyMapper,
    base: Map<String, Value>,
}

impl<'a> EmitContext<'a> {
    pub fn new(
        model: &'a ExtractedModel,
        settings: &'a ProjectSettings,
        locator: &'a ArtifactLocator,
        renderer: &'a dyn TemplateRenderer,
    ) -> Self {
        let mut base = match settings.to_context() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        base.insert(
            "packages".into(),
            Value::Object(locator.packages().to_context()),
        );
        Self {
            model,
            settings,
            locator,
            renderer,
            mapper: PropertyMapper::new(),
            base,
        }
    }

    pub fn mapper(&self) -> &PropertyMapper {
        &self.mapper
    }

    pub fn package(&self, key: LayerKey) -> &str {
        self.locator.packages().get(key)
    }

    /// Shared context with `extra`'s top-level keys layered on top.
    pub fn context_with(&self, extra: Value) -> Value {
        let mut ctx = self.base.clone();
        if let Value::Object(extra) = extra {
            ctx.extend(extra);
        }
        Value::Object(ctx)
    }

    /// Field contexts for every property of `schema`.
    pub fn field_contexts(&self, schema: &SchemaDef) -> Vec<Value> {
        schema
            .properties
            .iter()
            .map(|(name, def)| {
                self.mapper
                    .map(name, def, schema.is_required(name))
                    .to_context()
            })
            .collect()
    }

    /// Sorted, deduplicated imports needed by the fields of `schema`.
    pub fn field_imports(&self, schema: &SchemaDef) -> Vec<String> {
        let mut imports: Vec<String> = schema
            .properties
            .iter()
            .flat_map(|(name, def)| self.mapper.map(name, def, schema.is_required(name)).imports())
            .collect();
        imports.sort();
        imports.dedup();
        imports
    }

    /// Everything templates need to know about one entity.
    pub fn entity_context(&self, entity: &EntityModel) -> Value {
        let schema = entity.schema();
        let name = entity.name();
        let fields: Vec<Value> = schema
            .properties
            .iter()
            .map(|(prop, def)| {
                let field = self.mapper.map(prop, def, schema.is_required(prop));
                let mut ctx = field.to_context();
                if let Value::Object(map) = &mut ctx {
                    map.insert("is_primary_key".into(), entity.is_primary_key(prop).into());
                    map.insert("is_relation".into(), entity.is_relation_field(prop).into());
                }
                ctx
            })
            .collect();

        let persisted: Vec<Value> = entity
            .persisted_properties()
            .filter_map(|prop| {
                schema
                    .properties
                    .get(prop)
                    .map(|def| self.mapper.map(prop, def, schema.is_required(prop)).to_context())
            })
            .collect();

        let search_columns = search_columns(entity, &self.mapper);
        let primary_key_column = camel_to_snake(&entity.primary_key_name());
        let search_clause = search_clause(&search_columns, &primary_key_column);

        let lookups: Vec<Value> = entity
            .complex_operations()
            .iter()
            .map(|op| {
                json!({
                    "operation_id": op.operation_id,
                    "method_name": op.method_name,
                    "finder_name": op.finder_name,
                    "parameter_name": op.parameter_name,
                    "parameter_column": camel_to_snake(&op.parameter_name),
                    "has_column": entity.has_property(&op.parameter_name),
                    "path_segment": op.path_segment,
                    "response_type": op.response_type,
                })
            })
            .collect();

        let class = |kind| ArtifactLocator::class_name(kind, name);
        let timestamp_type = |prop: &str| {
            schema
                .properties
                .get(prop)
                .map(|def| self.mapper.map(prop, def, false).type_name())
        };

        json!({
            "name": name,
            "var": entity.var_name(),
            "collection": entity.collection_name(),
            "service": entity.service(),
            "primary_key": entity.primary_key_name(),
            "primary_key_column": primary_key_column,
            "primary_key_field": schema.properties.keys().find(|p| entity.is_primary_key(p)),
            "dto_package": self.locator.packages().dto_package(entity.service()),
            "item_dto": schema.original_name,
            "fields": fields,
            "persisted_fields": persisted,
            "imports": self.field_imports(schema),
            "search_columns": search_columns,
            "search_clause": search_clause,
            "has_status": entity.has_property("status"),
            "has_created_at": entity.has_property("createdAt"),
            "has_updated_at": entity.has_property("updatedAt"),
            "created_at_type": timestamp_type("createdAt"),
            "updated_at_type": timestamp_type("updatedAt"),
            "crud": {
                "create": entity.has_verb(CrudVerb::Create),
                "get": entity.has_verb(CrudVerb::Get),
                "update": entity.has_verb(CrudVerb::Update),
                "delete": entity.has_verb(CrudVerb::Delete),
                "list": entity.has_verb(CrudVerb::List),
            },
            "dto_imports": dto_imports(entity),
            "lookups": lookups,
            "classes": {
                "model": class(ArtifactKind::DomainModel),
                "port": class(ArtifactKind::OutputPort),
                "use_case": class(ArtifactKind::UseCase),
                "service": class(ArtifactKind::Service),
                "mapper": class(ArtifactKind::Mapper),
                "dbo": class(ArtifactKind::PersistenceRecord),
                "repository": class(ArtifactKind::Repository),
                "adapter": class(ArtifactKind::RepositoryAdapter),
                "controller": class(ArtifactKind::RestController),
            },
        })
    }
}

/// DTO class names referenced by an entity's use case and controller.
pub fn dto_imports(entity: &EntityModel) -> Vec<String> {
    let name = entity.name();
    let mut imports = Vec::new();
    for verb in entity.crud_operations() {
        match verb {
            CrudVerb::Create => {
                imports.push(format!("Create{name}RequestContent"));
                imports.push(format!("Create{name}ResponseContent"));
            }
            CrudVerb::Get => imports.push(format!("Get{name}ResponseContent")),
            CrudVerb::Update => {
                imports.push(format!("Update{name}RequestContent"));
                imports.push(format!("Update{name}ResponseContent"));
            }
            CrudVerb::Delete => imports.push(format!("Delete{name}ResponseContent")),
            CrudVerb::List => imports.push(format!("List{name}sResponseContent")),
        }
    }
    imports.extend(
        entity
            .complex_operations()
            .iter()
            .map(|op| op.response_type.clone()),
    );
    imports
}

/// Text columns whose name suggests free-text search. Every property but
/// the primary key is a candidate, `status` included.
pub fn search_columns(entity: &EntityModel, mapper: &PropertyMapper) -> Vec<String> {
    entity
        .schema()
        .properties
        .iter()
        .filter(|(prop, _)| !entity.is_primary_key(prop))
        .filter(|(prop, _)| {
            let lower = prop.to_lowercase();
            SEARCHABLE_HINTS.iter().any(|hint| lower.contains(hint))
        })
        .filter_map(|(prop, def)| {
            let field = mapper.map(prop, def, false);
            field.target_type.is_text().then_some(field.column_name)
        })
        .collect()
}

/// SQL predicate matching `:search` against `columns`, or against the
/// primary key cast to text when no column is searchable.
pub fn search_clause(columns: &[String], primary_key_column: &str) -> String {
    let like = |expr: String| format!("LOWER({expr}) LIKE LOWER(CONCAT('%', :search, '%'))");
    if columns.is_empty() {
        return like(format!("CAST({primary_key_column} AS TEXT)"));
    }
    columns
        .iter()
        .map(|column| like(column.clone()))
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// Artifacts and warnings collected by one stage.
#[derive(Debug, Default)]
pub struct StageOutput {
    pub artifacts: Vec<GeneratedArtifact>,
    pub warnings: Vec<String>,
}

impl StageOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render one artifact.
    ///
    /// Artifact-local failures become warnings and the artifact is dropped;
    /// anything else aborts the stage.
    pub fn render(
        &mut self,
        ctx: &EmitContext<'_>,
        kind: ArtifactKind,
        subject: Option<&str>,
        target_path: PathBuf,
        extra: Value,
    ) -> HexgenResult<()> {
        let context = ctx.context_with(extra);
        match ctx.renderer.render(kind.template(), &context) {
            Ok(content) => {
                self.artifacts.push(GeneratedArtifact {
                    kind,
                    subject: subject.map(str::to_string),
                    target_path,
                    content,
                });
                Ok(())
            }
            Err(e) if e.is_artifact_local() => {
                warn!(
                    template = kind.template(),
                    subject = subject.unwrap_or("-"),
                    error = %e,
                    "artifact skipped"
                );
                self.warnings.push(format!(
                    "{} skipped for {}: {}",
                    target_path.display(),
                    subject.unwrap_or("project"),
                    e
                ));
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Render a per-entity artifact at its located path.
    pub fn render_entity(
        &mut self,
        ctx: &EmitContext<'_>,
        kind: ArtifactKind,
        entity: &EntityModel,
        extra: Value,
    ) -> HexgenResult<()> {
        let Some(path) = ctx.locator.entity_artifact_path(kind, entity.name()) else {
            self.warnings
                .push(format!("no location for {:?} of {}", kind, entity.name()));
            return Ok(());
        };
        let mut extra = extra;
        if let Value::Object(map) = &mut extra {
            map.entry("entity")
                .or_insert_with(|| ctx.entity_context(entity));
        }
        self.render(ctx, kind, Some(entity.name()), path, extra)
    }

    /// Render a project-wide artifact at its located path.
    pub fn render_shared(
        &mut self,
        ctx: &EmitContext<'_>,
        kind: ArtifactKind,
        extra: Value,
    ) -> HexgenResult<()> {
        let Some(path) = ctx.locator.shared_artifact_path(kind) else {
            self.warnings.push(format!("no location for {kind:?}"));
            return Ok(());
        };
        self.render(ctx, kind, None, path, extra)
    }

    pub fn extend(&mut self, other: StageOutput) {
        self.artifacts.extend(other.artifacts);
        self.warnings.extend(other.warnings);
    }
}
