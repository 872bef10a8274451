//! Spec → entity model extraction.
//!
//! Entity names are found with the naming grammar in
//! [`crate::domain::naming`]; operations are then grouped onto entities:
//! exact CRUD ids first, `Get…By…` lookups second.

use std::collections::BTreeMap;

use tracing::{debug, instrument, warn};

use crate::domain::{
    ComplexOperation, CrudVerb, DomainError, EntityModel, Operation, RelationshipTable, SchemaDef,
    ServiceSpec, derive_entity_name,
};

/// An entity found in the specs that will not be generated.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntity {
    pub entity: String,
    pub reason: DomainError,
}

/// Everything downstream stages need from the ingested specs.
#[derive(Debug, Clone, Default)]
pub struct ExtractedModel {
    specs: Vec<ServiceSpec>,
    entities: BTreeMap<String, EntityModel>,
    skipped: Vec<SkippedEntity>,
}

impl ExtractedModel {
    /// Entity names in order.
    pub fn list_entities(&self) -> Vec<&str> {
        self.entities.keys().map(String::as_str).collect()
    }

    pub fn entity(&self, name: &str) -> Option<&EntityModel> {
        self.entities.get(name)
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityModel> {
        self.entities.values()
    }

    pub fn skipped(&self) -> &[SkippedEntity] {
        &self.skipped
    }

    /// Specs sorted by service name.
    pub fn specs(&self) -> &[ServiceSpec] {
        &self.specs
    }

    /// Every `(service, schema)` pair, in service then schema order.
    pub fn dto_schemas(&self) -> impl Iterator<Item = (&str, &SchemaDef)> {
        self.specs.iter().flat_map(|spec| {
            spec.schemas()
                .values()
                .map(move |schema| (spec.service_name(), schema))
        })
    }

    pub fn operation_count(&self) -> usize {
        self.specs.iter().map(|s| s.operations().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Groups spec operations onto entities.
#[derive(Debug, Clone, Default)]
pub struct ModelExtractor {
    relationships: RelationshipTable,
}

impl ModelExtractor {
    pub fn new(relationships: RelationshipTable) -> Self {
        Self { relationships }
    }

    #[instrument(skip_all, fields(specs = specs.len()))]
    pub fn extract(&self, mut specs: Vec<ServiceSpec>) -> ExtractedModel {
        specs.sort_by(|a, b| a.service_name().cmp(b.service_name()));

        let candidates = Self::find_candidates(&specs);
        let operations: Vec<&Operation> = specs.iter().flat_map(|s| s.operations()).collect();

        let mut entities = BTreeMap::new();
        let mut skipped = Vec::new();

        for (name, (service, schema)) in candidates {
            if let Err(reason) = Self::check_schema(&name, schema) {
                warn!(entity = %name, error = %reason, "skipping entity");
                skipped.push(SkippedEntity { entity: name, reason });
                continue;
            }

            let crud = operations
                .iter()
                .filter_map(|op| CrudVerb::match_operation(&op.operation_id, &name));
            let complex = operations
                .iter()
                .map(|op| op.operation_id.as_str())
                .filter(|id| self.is_complex_for(&name, id));

            let entity = EntityModel::new(name.clone(), service, schema.clone())
                .with_crud(crud)
                .with_complex(complex);
            debug!(
                entity = %name,
                crud = entity.crud_operations().len(),
                lookups = entity.complex_operations().len(),
                "entity extracted"
            );
            entities.insert(name, entity);
        }

        ExtractedModel {
            specs,
            entities,
            skipped,
        }
    }

    /// First schema per entity name; an object schema replaces an earlier
    /// malformed one.
    fn find_candidates(specs: &[ServiceSpec]) -> BTreeMap<String, (&str, &SchemaDef)> {
        let mut candidates: BTreeMap<String, (&str, &SchemaDef)> = BTreeMap::new();
        for spec in specs {
            for (schema_name, schema) in spec.schemas() {
                let Some((entity, _rule)) = derive_entity_name(schema_name) else {
                    continue;
                };
                let entry = candidates
                    .entry(entity)
                    .or_insert((spec.service_name(), schema));
                if !entry.1.is_object() && schema.is_object() {
                    *entry = (spec.service_name(), schema);
                }
            }
        }
        candidates
    }

    fn check_schema(entity: &str, schema: &SchemaDef) -> Result<(), DomainError> {
        let reason = if !schema.is_object() {
            format!("schema '{}' is not an object", schema.original_name)
        } else if schema.properties.is_empty() {
            format!("schema '{}' declares no properties", schema.original_name)
        } else {
            return Ok(());
        };
        Err(DomainError::SchemaResolution {
            entity: entity.to_string(),
            reason,
        })
    }

    fn is_complex_for(&self, entity: &str, operation_id: &str) -> bool {
        ComplexOperation::is_lookup(operation_id)
            && (operation_id
                .to_lowercase()
                .contains(&entity.to_lowercase())
                || self.relationships.matches(entity, operation_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HttpMethod, PropertyDef, RelationshipRule};

    fn object(name: &str, props: &[&str]) -> (String, SchemaDef) {
        let schema = props.iter().fold(SchemaDef::new(name).with_type("object"), |s, p| {
            s.with_property(*p, PropertyDef::of_type("string"))
        });
        (name.to_string(), schema)
    }

    fn op(id: &str, service: &str) -> Operation {
        Operation::new(id, service, "/", HttpMethod::Get)
    }

    fn user_spec() -> ServiceSpec {
        ServiceSpec::new(
            "user",
            [
                object("UserResponse", &["userId", "email"]),
                object("CreateUserResponseContent", &["userId"]),
                object("ErrorResponse", &["message"]),
            ]
            .into_iter()
            .collect(),
            ["CreateUser", "GetUser", "UpdateUser", "DeleteUser", "ListUsers", "GetUsersByEmail"]
                .iter()
                .map(|id| op(id, "user"))
                .collect(),
        )
    }

    // ── entity discovery ──

    #[test]
    fn finds_entities_from_response_schemas() {
        let model = ModelExtractor::default().extract(vec![user_spec()]);
        assert_eq!(model.list_entities(), vec!["User"]);
        assert!(model.skipped().is_empty());
    }

    #[test]
    fn groups_crud_and_lookups() {
        let model = ModelExtractor::default().extract(vec![user_spec()]);
        let user = model.entity("User").unwrap();
        assert_eq!(user.crud_operations().len(), 5);
        let lookups: Vec<_> = user.complex_operations().iter().map(|o| o.operation_id.as_str()).collect();
        assert_eq!(lookups, vec!["GetUsersByEmail"]);
    }

    #[test]
    fn malformed_schema_is_skipped_with_reason() {
        let spec = ServiceSpec::new(
            "inventory",
            [
                ("WidgetResponse".to_string(), SchemaDef::new("WidgetResponse").with_type("array")),
                object("GadgetResponse", &["gadgetId"]),
            ]
            .into_iter()
            .collect(),
            vec![],
        );
        let model = ModelExtractor::default().extract(vec![spec]);
        assert_eq!(model.list_entities(), vec!["Gadget"]);
        assert_eq!(model.skipped().len(), 1);
        assert!(matches!(
            &model.skipped()[0].reason,
            DomainError::SchemaResolution { entity, .. } if entity == "Widget"
        ));
    }

    #[test]
    fn object_schema_wins_over_malformed_duplicate() {
        let spec = ServiceSpec::new(
            "user",
            [
                ("GetUserResponseContent".to_string(), SchemaDef::new("GetUserResponseContent")),
                object("UserResponse", &["userId"]),
            ]
            .into_iter()
            .collect(),
            vec![],
        );
        let model = ModelExtractor::default().extract(vec![spec]);
        assert_eq!(model.entity("User").unwrap().schema().original_name, "UserResponse");
    }

    // ── relationships ──

    #[test]
    fn relationship_keywords_attach_lookups() {
        let spec = ServiceSpec::new(
            "location",
            [object("LocationResponse", &["locationId"]), object("CityResponse", &["cityId"])]
                .into_iter()
                .collect(),
            vec![op("GetRegionsByCountry", "location"), op("GetCitiesByRegion", "location")],
        );
        let extractor = ModelExtractor::new(RelationshipTable::from_rules(&[RelationshipRule {
            entity: "Location".into(),
            keywords: vec!["region".into()],
        }]));
        let model = extractor.extract(vec![spec]);

        let location = model.entity("Location").unwrap();
        let ids: Vec<_> = location.complex_operations().iter().map(|o| o.operation_id.as_str()).collect();
        assert_eq!(ids, vec!["GetCitiesByRegion", "GetRegionsByCountry"]);

        // "cities" does not contain "city", and no keyword is configured for City.
        assert!(model.entity("City").unwrap().complex_operations().is_empty());
    }

    // ── determinism ──

    #[test]
    fn spec_order_does_not_matter() {
        let location = ServiceSpec::new(
            "location",
            [object("CityResponse", &["cityId"])].into_iter().collect(),
            vec![op("CreateCity", "location")],
        );
        let a = ModelExtractor::default().extract(vec![user_spec(), location.clone()]);
        let b = ModelExtractor::default().extract(vec![location, user_spec()]);
        assert_eq!(a.list_entities(), b.list_entities());
        assert_eq!(a.specs()[0].service_name(), "location");
        assert_eq!(a.operation_count(), 7);
    }

    #[test]
    fn dto_schemas_cover_every_schema() {
        let model = ModelExtractor::default().extract(vec![user_spec()]);
        let names: Vec<_> = model.dto_schemas().map(|(_, s)| s.original_name.as_str()).collect();
        assert_eq!(names, vec!["CreateUserResponseContent", "ErrorResponse", "UserResponse"]);
    }
}
