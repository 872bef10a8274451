//! End-to-end generation with the real adapters: spec documents on disk,
//! embedded templates, output written to a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use hexgen_adapters::{DirectorySpecSource, LocalFilesystem, MiniJinjaRenderer};
use hexgen_core::domain::RelationshipRule;
use hexgen_core::prelude::*;
use tempfile::TempDir;
use walkdir::WalkDir;

const USER_SPEC: &str = r##"
openapi: 3.0.1
info:
  title: Users
  version: 1.0.0
paths:
  /users:
    post:
      operationId: CreateUser
    get:
      operationId: ListUsers
  /users/{userId}:
    get:
      operationId: GetUser
    put:
      operationId: UpdateUser
    delete:
      operationId: DeleteUser
components:
  schemas:
    GetUserResponseContent:
      type: object
      required: [username, email]
      properties:
        userId:
          type: string
        username:
          type: string
          minLength: 3
          maxLength: 40
        email:
          type: string
          pattern: "^[^@]+@[^@]+$"
        status:
          type: string
        createdAt:
          type: string
          format: date-time
        updatedAt:
          type: string
          format: date-time
    CreateUserRequestContent:
      type: object
      required: [username]
      properties:
        username:
          type: string
        email:
          type: string
    ErrorResponseContent:
      type: object
      properties:
        message:
          type: string
"##;

const LOCATION_SPEC: &str = r#"{
  "paths": {
    "/cities/{cityId}": { "get": { "operationId": "GetCity" } },
    "/regions/{regionId}/cities": { "get": { "operationId": "GetCitiesByRegion" } }
  },
  "components": {
    "schemas": {
      "CityResponse": {
        "type": "object",
        "properties": {
          "cityId": { "type": "string" },
          "name": { "type": "string" },
          "regionId": { "type": "string" },
          "population": { "type": "integer", "format": "int64" }
        }
      },
      "RegionResponse": { "type": "string" }
    }
  }
}"#;

struct Workspace {
    _tmp: TempDir,
    specs: PathBuf,
    output: PathBuf,
}

fn workspace() -> Workspace {
    let tmp = TempDir::new().unwrap();
    let specs = tmp.path().join("specs");
    fs::create_dir_all(&specs).unwrap();
    fs::write(specs.join("user.yaml"), USER_SPEC).unwrap();
    fs::write(specs.join("location.json"), LOCATION_SPEC).unwrap();
    let output = tmp.path().join("out");
    Workspace { _tmp: tmp, specs, output }
}

fn settings(ws: &Workspace) -> ProjectSettings {
    let mut settings = ProjectSettings::default();
    settings.paths.specs_dir = ws.specs.clone();
    settings.paths.output_dir = ws.output.clone();
    settings.relationships.push(RelationshipRule {
        entity: "City".into(),
        keywords: vec!["cities".into()],
    });
    settings
}

fn service() -> GenerationService {
    GenerationService::new(
        Box::new(DirectorySpecSource::new()),
        Box::new(MiniJinjaRenderer::new().unwrap()),
        Box::new(LocalFilesystem::new()),
    )
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative))
        .unwrap_or_else(|e| panic!("{relative}: {e}"))
}

fn tree(root: &Path) -> Vec<(PathBuf, String)> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            (rel, fs::read_to_string(e.path()).unwrap())
        })
        .collect()
}

const JAVA: &str = "src/main/java/com/example/service";

#[test]
fn renders_every_template_without_warnings() {
    let ws = workspace();
    let report = service().generate(&settings(&ws)).unwrap();

    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    assert!(report.rejected_specs.is_empty());
    assert_eq!(report.entities, vec!["City", "User"]);
    assert_eq!(report.wired_entities, vec!["City", "User"]);
    assert_eq!(report.skipped_entities.len(), 1);

    let root = ws.output.join("generated-service");
    for relative in [
        "pom.xml",
        "README.md",
        "Dockerfile",
        "docker-compose.yml",
        ".gitignore",
        "src/main/resources/application.properties",
        "src/test/resources/schema.sql",
        "src/test/resources/application-test.properties",
    ] {
        assert!(root.join(relative).is_file(), "{relative} missing");
    }
    assert!(root.join(format!("{JAVA}/domain/model/User.java")).is_file());
    assert!(
        root.join(format!("{JAVA}/infrastructure/adapters/input/rest/CityController.java"))
            .is_file()
    );
}

#[test]
fn generated_sources_reference_each_other() {
    let ws = workspace();
    service().generate(&settings(&ws)).unwrap();
    let root = ws.output.join("generated-service");

    let config = read(&root, &format!("{JAVA}/infrastructure/config/ApplicationConfiguration.java"));
    assert!(config.contains("new UserRepositoryAdapter(repository, mapper)"));
    assert!(config.contains("new CityRepositoryAdapter(repository, mapper)"));

    let repository = read(
        &root,
        &format!(
            "{JAVA}/infrastructure/adapters/output/persistence/repository/JpaCityRepository.java"
        ),
    );
    assert!(repository.contains("region_id = :regionId"));

    let pom = read(&root, "pom.xml");
    assert!(pom.contains("<artifactId>generated-service</artifactId>"));
    assert!(pom.contains("<java.version>21</java.version>"));

    let schema = read(&root, "src/test/resources/schema.sql");
    assert!(schema.contains("CREATE TABLE"));
    assert!(schema.contains("users"));
    assert!(schema.contains("cities"));
}

#[test]
fn dto_keeps_schema_constraints() {
    let ws = workspace();
    service().generate(&settings(&ws)).unwrap();
    let root = ws.output.join("generated-service");

    let dto = tree(&root)
        .into_iter()
        .find(|(p, _)| p.ends_with("GetUserResponseContent.java"))
        .map(|(_, c)| c)
        .unwrap();
    assert!(dto.contains("@Size(min = 3, max = 40)"));
    assert!(dto.contains("@NotNull"));
}

#[test]
fn regeneration_is_byte_identical() {
    let ws = workspace();
    let settings = settings(&ws);
    let root = ws.output.join("generated-service");

    service().generate(&settings).unwrap();
    let first = tree(&root);
    fs::write(root.join("stale.txt"), "left over").unwrap();

    service().generate(&settings).unwrap();
    let second = tree(&root);

    assert_eq!(first, second);
    assert!(!root.join("stale.txt").exists());
}

#[test]
fn broken_document_is_reported_and_skipped() {
    let ws = workspace();
    fs::write(ws.specs.join("broken.json"), "{ nope").unwrap();

    let report = service().generate(&settings(&ws)).unwrap();
    assert_eq!(report.rejected_specs.len(), 1);
    assert_eq!(report.entities, vec!["City", "User"]);
}

#[test]
fn missing_specs_dir_is_fatal() {
    let ws = workspace();
    let mut settings = settings(&ws);
    settings.paths.specs_dir = ws.specs.join("nope");

    let err = service().generate(&settings).unwrap_err();
    assert!(!err.is_artifact_local());
    assert!(!ws.output.exists());
}

const MOVIE_SPEC: &str = r##"
paths:
  /movies:
    post:
      operationId: CreateMovie
    get:
      operationId: ListMovies
  /movies/{movieId}:
    get:
      operationId: GetMovie
    put:
      operationId: UpdateMovie
    delete:
      operationId: DeleteMovie
components:
  schemas:
    MovieResponse:
      type: object
      properties:
        movieId:
          type: string
        title:
          type: string
"##;

fn file_named(root: &Path, name: &str) -> String {
    tree(root)
        .into_iter()
        .find(|(p, _)| p.file_name().is_some_and(|f| f == name))
        .map(|(_, c)| c)
        .unwrap_or_else(|| panic!("{name} not generated"))
}

#[test]
fn consolidated_use_case_has_exactly_the_crud_methods() {
    let ws = workspace();
    fs::write(ws.specs.join("movie.yaml"), MOVIE_SPEC).unwrap();
    service().generate(&settings(&ws)).unwrap();
    let root = ws.output.join("generated-service");

    let use_case = file_named(&root, "MovieUseCase.java");
    let methods: Vec<&str> = use_case
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("Mono<"))
        .filter_map(|line| line.split_whitespace().nth(1))
        .filter_map(|signature| signature.split('(').next())
        .collect();
    assert_eq!(methods, vec!["create", "get", "update", "delete", "list"]);

    let service = file_named(&root, "MovieService.java");
    assert_eq!(service.matches("@Override").count(), 5);
}

#[test]
fn security_permits_only_wired_entities() {
    let ws = workspace();
    fs::write(ws.specs.join("movie.yaml"), MOVIE_SPEC).unwrap();
    let overrides = ws.output.with_file_name("templates");
    fs::create_dir_all(&overrides).unwrap();
    fs::write(
        overrides.join("repository.java.j2"),
        format!(
            "{{% if entity.name == \"City\" %}}{{{{ entity.not_a_field }}}}{{% else %}}{}{{% endif %}}",
            include_str!("../templates/repository.java.j2")
        ),
    )
    .unwrap();

    let service = GenerationService::new(
        Box::new(DirectorySpecSource::new()),
        Box::new(MiniJinjaRenderer::new().unwrap().with_override_dir(&overrides).unwrap()),
        Box::new(LocalFilesystem::new()),
    );
    let report = service.generate(&settings(&ws)).unwrap();
    assert_eq!(report.wired_entities, vec!["Movie", "User"]);
    assert_eq!(report.warnings.len(), 1);

    let root = ws.output.join("generated-service");
    let security = file_named(&root, "SecurityConfiguration.java");
    assert!(security.contains("\"/movies/**\""));
    assert!(security.contains("\"/users/**\""));
    assert!(!security.contains("/cities/**"));

    let config = file_named(&root, "ApplicationConfiguration.java");
    assert!(!config.contains("CityRepositoryAdapter"));
}
