//! Integration tests for hexgen-core, driven through the public API with
//! in-memory port implementations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use hexgen_core::application::{ApplicationError, SpecBatch};
use hexgen_core::domain::{
    HttpMethod, Operation, PropertyDef, RelationshipRule, SchemaDef,
};
use hexgen_core::prelude::*;
use serde_json::Value;

#[derive(Clone, Default)]
struct SharedFs {
    files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
}

impl SharedFs {
    fn snapshot(&self) -> BTreeMap<PathBuf, String> {
        self.files.lock().unwrap().clone()
    }

    fn has(&self, path: &str) -> bool {
        self.files.lock().unwrap().contains_key(Path::new(path))
    }
}

impl Filesystem for SharedFs {
    fn create_dir_all(&self, _path: &Path) -> HexgenResult<()> {
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> HexgenResult<()> {
        self.files
            .lock()
            .map_err(|_| ApplicationError::StoreLockError)?
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files
            .lock()
            .unwrap()
            .keys()
            .any(|p| p.starts_with(path))
    }

    fn remove_dir_all(&self, path: &Path) -> HexgenResult<()> {
        self.files
            .lock()
            .map_err(|_| ApplicationError::StoreLockError)?
            .retain(|p, _| !p.starts_with(path));
        Ok(())
    }
}

struct FixedSpecs(Vec<ServiceSpec>);

impl SpecSource for FixedSpecs {
    fn load_all(&self, _specs_dir: &Path) -> HexgenResult<SpecBatch> {
        Ok(SpecBatch {
            specs: self.0.clone(),
            rejected: vec![],
        })
    }
}

/// Writes the template name and, for entity artifacts, the entity name.
struct NameRenderer;

impl TemplateRenderer for NameRenderer {
    fn render(&self, template: &str, context: &Value) -> HexgenResult<String> {
        let entity = context["entity"]["name"].as_str().unwrap_or("-");
        let wired = context["wired_entities"]
            .as_array()
            .map(|a| a.iter().filter_map(|e| e["name"].as_str()).collect::<Vec<_>>().join(","))
            .unwrap_or_default();
        Ok(format!("{template} {entity} {wired}\n"))
    }

    fn has_template(&self, _template: &str) -> bool {
        true
    }
}

fn object(name: &str, props: &[&str]) -> SchemaDef {
    props.iter().fold(
        SchemaDef::new(name).with_type("object"),
        |schema, prop| schema.with_property(*prop, PropertyDef::of_type("string")),
    )
}

fn spec(service: &str, schemas: Vec<SchemaDef>, ops: &[&str]) -> ServiceSpec {
    ServiceSpec::new(
        service,
        schemas
            .into_iter()
            .map(|s| (s.original_name.clone(), s))
            .collect(),
        ops.iter()
            .map(|id| Operation::new(*id, service, format!("/{service}"), HttpMethod::Get))
            .collect(),
    )
}

fn catalog() -> Vec<ServiceSpec> {
    vec![
        spec(
            "user",
            vec![
                object("GetUserResponseContent", &["userId", "username", "email"]),
                object("CreateUserRequestContent", &["username", "email"]),
                object("ErrorResponseContent", &["message"]),
            ],
            &["CreateUser", "GetUser", "UpdateUser", "DeleteUser", "ListUsers"],
        ),
        spec(
            "location",
            vec![
                object("CityResponse", &["cityId", "name", "regionId"]),
                SchemaDef::new("RegionResponse").with_type("string"),
            ],
            &["GetCity", "GetCitiesByRegion"],
        ),
    ]
}

fn service(specs: Vec<ServiceSpec>, fs: SharedFs) -> GenerationService {
    GenerationService::new(Box::new(FixedSpecs(specs)), Box::new(NameRenderer), Box::new(fs))
}

#[test]
fn generates_layers_for_every_entity() {
    let fs = SharedFs::default();
    let report = service(catalog(), fs.clone())
        .generate(&ProjectSettings::default())
        .unwrap();

    assert_eq!(report.entities, vec!["City", "User"]);
    assert_eq!(report.wired_entities, vec!["City", "User"]);
    assert_eq!(report.skipped_entities.len(), 1);
    assert_eq!(report.skipped_entities[0].subject, "Region");

    let base = "projects/generated-service/src/main/java/com/example/service";
    assert!(fs.has(&format!("{base}/domain/model/User.java")));
    assert!(fs.has(&format!(
        "{base}/infrastructure/adapters/input/rest/UserController.java"
    )));
    assert!(fs.has("projects/generated-service/pom.xml"));
    assert!(fs.has("projects/generated-service/src/test/resources/schema.sql"));

    let config = fs
        .snapshot()
        .into_iter()
        .find(|(p, _)| p.ends_with("ApplicationConfiguration.java"))
        .map(|(_, c)| c)
        .unwrap();
    assert!(config.contains("City,User"));
}

#[test]
fn lookup_attaches_only_with_relationship_rule() {
    let plan_without = service(catalog(), SharedFs::default())
        .plan(&ProjectSettings::default())
        .unwrap();
    let city = plan_without
        .entities()
        .into_iter()
        .find(|e| e.name == "City")
        .unwrap();
    assert!(city.lookups.is_empty());

    let mut settings = ProjectSettings::default();
    settings.relationships.push(RelationshipRule {
        entity: "City".into(),
        keywords: vec!["cities".into()],
    });
    let plan_with = service(catalog(), SharedFs::default()).plan(&settings).unwrap();
    let city = plan_with
        .entities()
        .into_iter()
        .find(|e| e.name == "City")
        .unwrap();
    assert_eq!(city.lookups, vec!["GetCitiesByRegion"]);
}

#[test]
fn regeneration_is_byte_identical() {
    let first = SharedFs::default();
    service(catalog(), first.clone())
        .generate(&ProjectSettings::default())
        .unwrap();

    let second = SharedFs::default();
    service(catalog(), second.clone())
        .generate(&ProjectSettings::default())
        .unwrap();

    assert_eq!(first.snapshot(), second.snapshot());
}

#[test]
fn previous_output_is_replaced() {
    let fs = SharedFs::default();
    fs.write_file(
        Path::new("projects/generated-service/stale.txt"),
        "left over",
    )
    .unwrap();

    service(catalog(), fs.clone())
        .generate(&ProjectSettings::default())
        .unwrap();
    assert!(!fs.has("projects/generated-service/stale.txt"));
}

#[test]
fn empty_catalog_still_produces_project_shell() {
    let fs = SharedFs::default();
    let report = service(vec![], fs.clone())
        .generate(&ProjectSettings::default())
        .unwrap();

    assert!(report.entities.is_empty());
    assert!(report.wired_entities.is_empty());
    assert!(fs.has("projects/generated-service/pom.xml"));
}
