//! Generated artifacts, their locations, and the per-run ledger.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::packages::{LayerKey, PackageMap, package_dir};

// ── Layer / ArtifactKind ─────────────────────────────────────────────────────

/// Generation stage an artifact belongs to. Stages run in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Dto,
    Domain,
    Application,
    Infrastructure,
    Test,
    Project,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dto => "dto",
            Self::Domain => "domain",
            Self::Application => "application",
            Self::Infrastructure => "infrastructure",
            Self::Test => "test",
            Self::Project => "project",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    // dto
    Dto,
    // domain
    StatusEnum,
    DomainModel,
    OutputPort,
    // application
    UseCase,
    Service,
    Mapper,
    // infrastructure
    PersistenceRecord,
    Repository,
    RepositoryAdapter,
    RestController,
    NotFoundException,
    ConflictException,
    InternalServerErrorException,
    ExceptionHandler,
    LoggingUtils,
    Configuration,
    SecurityConfiguration,
    // test
    ServiceTest,
    MapperTest,
    ControllerTest,
    TestSchema,
    TestProperties,
    // project
    MainApplication,
    BuildDescriptor,
    ApplicationProperties,
    Readme,
    CiPipeline,
    GitIgnore,
    Dockerfile,
    DockerCompose,
}

impl ArtifactKind {
    /// Kinds that must all exist for an entity before it is wired into the
    /// application configuration.
    pub const WIRING_PREREQUISITES: [ArtifactKind; 5] = [
        ArtifactKind::UseCase,
        ArtifactKind::Service,
        ArtifactKind::Mapper,
        ArtifactKind::Repository,
        ArtifactKind::RepositoryAdapter,
    ];

    pub const fn layer(&self) -> Layer {
        use ArtifactKind::*;
        match self {
            Dto => Layer::Dto,
            StatusEnum | DomainModel | OutputPort => Layer::Domain,
            UseCase | Service | Mapper => Layer::Application,
            PersistenceRecord
            | Repository
            | RepositoryAdapter
            | RestController
            | NotFoundException
            | ConflictException
            | InternalServerErrorException
            | ExceptionHandler
            | LoggingUtils
            | Configuration
            | SecurityConfiguration => Layer::Infrastructure,
            ServiceTest | MapperTest | ControllerTest | TestSchema | TestProperties => Layer::Test,
            MainApplication | BuildDescriptor | ApplicationProperties | Readme | CiPipeline
            | GitIgnore | Dockerfile | DockerCompose => Layer::Project,
        }
    }

    /// Template used to render this kind.
    pub const fn template(&self) -> &'static str {
        use ArtifactKind::*;
        match self {
            Dto => "dto.java",
            StatusEnum => "entity_status.java",
            DomainModel => "domain_model.java",
            OutputPort => "repository_port.java",
            UseCase => "use_case.java",
            Service => "service.java",
            Mapper => "mapper.java",
            PersistenceRecord => "dbo.java",
            Repository => "repository.java",
            RepositoryAdapter => "repository_adapter.java",
            RestController => "controller.java",
            NotFoundException | ConflictException | InternalServerErrorException => {
                "exception.java"
            }
            ExceptionHandler => "global_exception_handler.java",
            LoggingUtils => "logging_utils.java",
            Configuration => "application_configuration.java",
            SecurityConfiguration => "security_configuration.java",
            ServiceTest => "service_test.java",
            MapperTest => "mapper_test.java",
            ControllerTest => "controller_test.java",
            TestSchema => "schema.sql",
            TestProperties => "application-test.properties",
            MainApplication => "main_application.java",
            BuildDescriptor => "pom.xml",
            ApplicationProperties => "application.properties",
            Readme => "README.md",
            CiPipeline => "ci-cd.yml",
            GitIgnore => "gitignore",
            Dockerfile => "Dockerfile",
            DockerCompose => "docker-compose.yml",
        }
    }

    /// Whether an artifact of this kind is produced once per entity.
    pub const fn is_per_entity(&self) -> bool {
        use ArtifactKind::*;
        matches!(
            self,
            DomainModel
                | OutputPort
                | UseCase
                | Service
                | Mapper
                | PersistenceRecord
                | Repository
                | RepositoryAdapter
                | RestController
                | ServiceTest
                | MapperTest
                | ControllerTest
        )
    }
}

// ── GeneratedArtifact ────────────────────────────────────────────────────────

/// A rendered file, ready to be written under the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    /// Entity (or DTO schema) this artifact belongs to; `None` for project-wide files.
    pub subject: Option<String>,
    /// Path relative to the project root.
    pub target_path: PathBuf,
    pub content: String,
}

impl GeneratedArtifact {
    pub fn layer(&self) -> Layer {
        self.kind.layer()
    }

    /// Identity used to enforce one artifact per (subject, kind).
    pub fn key(&self) -> (ArtifactKind, Option<String>) {
        (self.kind, self.subject.clone())
    }
}

// ── ArtifactLocator ──────────────────────────────────────────────────────────

/// Deterministic file locations for every artifact kind.
#[derive(Debug, Clone)]
pub struct ArtifactLocator {
    packages: PackageMap,
    main_class: String,
}

impl ArtifactLocator {
    pub fn new(packages: PackageMap, main_class: impl Into<String>) -> Self {
        Self {
            packages,
            main_class: main_class.into(),
        }
    }

    pub fn packages(&self) -> &PackageMap {
        &self.packages
    }

    /// Class name of an entity-scoped artifact: `(Repository, "User")` → `JpaUserRepository`.
    pub fn class_name(kind: ArtifactKind, entity: &str) -> String {
        use ArtifactKind::*;
        match kind {
            DomainModel => entity.to_string(),
            OutputPort => format!("{entity}RepositoryPort"),
            UseCase => format!("{entity}UseCase"),
            Service => format!("{entity}Service"),
            Mapper => format!("{entity}Mapper"),
            PersistenceRecord => format!("{entity}Dbo"),
            Repository => format!("Jpa{entity}Repository"),
            RepositoryAdapter => format!("{entity}RepositoryAdapter"),
            RestController => format!("{entity}Controller"),
            ServiceTest => format!("{entity}ServiceTest"),
            MapperTest => format!("{entity}MapperTest"),
            ControllerTest => format!("{entity}ControllerTest"),
            other => format!("{entity}{other:?}"),
        }
    }

    /// Package the artifact's class lives in (Java kinds only).
    pub fn package_of(&self, kind: ArtifactKind) -> Option<&str> {
        self.layer_key(kind).map(|key| self.packages.get(key))
    }

    fn layer_key(&self, kind: ArtifactKind) -> Option<LayerKey> {
        use ArtifactKind::*;
        let key = match kind {
            StatusEnum | DomainModel => LayerKey::DomainModel,
            OutputPort => LayerKey::DomainPortsOutput,
            UseCase => LayerKey::DomainPortsInput,
            Service | ServiceTest => LayerKey::ApplicationService,
            Mapper | MapperTest => LayerKey::ApplicationMapper,
            Dto => LayerKey::ApplicationDto,
            PersistenceRecord => LayerKey::InfraPersistenceEntity,
            Repository => LayerKey::InfraPersistenceRepository,
            RepositoryAdapter => LayerKey::InfraPersistenceAdapter,
            RestController | ControllerTest => LayerKey::InfraRest,
            NotFoundException | ConflictException | InternalServerErrorException
            | ExceptionHandler => LayerKey::InfraConfigExceptions,
            Configuration | SecurityConfiguration => LayerKey::InfraConfig,
            LoggingUtils => LayerKey::Utils,
            MainApplication => LayerKey::Root,
            _ => return None,
        };
        Some(key)
    }

    /// Path of a per-entity artifact. `None` for kinds that are not per-entity.
    pub fn entity_artifact_path(&self, kind: ArtifactKind, entity: &str) -> Option<PathBuf> {
        if !kind.is_per_entity() {
            return None;
        }
        let key = self.layer_key(kind)?;
        let dir = match kind.layer() {
            Layer::Test => self.packages.test_dir(key),
            _ => self.packages.main_dir(key),
        };
        Some(dir.join(format!("{}.java", Self::class_name(kind, entity))))
    }

    /// `src/main/java/<base>/application/dto/<service>/<Schema>.java`.
    pub fn dto_path(&self, service: &str, schema: &str) -> PathBuf {
        package_dir("src/main/java", &self.packages.dto_package(service)).join(format!("{schema}.java"))
    }

    /// Path of a project-wide artifact. `None` for per-entity kinds and DTOs.
    pub fn shared_artifact_path(&self, kind: ArtifactKind) -> Option<PathBuf> {
        use ArtifactKind::*;
        let java = |class: &str| -> Option<PathBuf> {
            let key = self.layer_key(kind)?;
            Some(self.packages.main_dir(key).join(format!("{class}.java")))
        };
        match kind {
            StatusEnum => java("EntityStatus"),
            NotFoundException => java("NotFoundException"),
            ConflictException => java("ConflictException"),
            InternalServerErrorException => java("InternalServerErrorException"),
            ExceptionHandler => java("GlobalExceptionHandler"),
            LoggingUtils => java("LoggingUtils"),
            Configuration => java("ApplicationConfiguration"),
            SecurityConfiguration => java("SecurityConfiguration"),
            MainApplication => java(&self.main_class),
            TestSchema => Some(PathBuf::from("src/test/resources/schema.sql")),
            TestProperties => Some(PathBuf::from("src/test/resources/application-test.properties")),
            BuildDescriptor => Some(PathBuf::from("pom.xml")),
            ApplicationProperties => Some(PathBuf::from("src/main/resources/application.properties")),
            Readme => Some(PathBuf::from("README.md")),
            CiPipeline => Some(PathBuf::from(".github/workflows/ci-cd.yml")),
            GitIgnore => Some(PathBuf::from(".gitignore")),
            Dockerfile => Some(PathBuf::from("Dockerfile")),
            DockerCompose => Some(PathBuf::from("docker-compose.yml")),
            _ => None,
        }
    }
}

// ── GenerationLedger ─────────────────────────────────────────────────────────

/// Which artifact kinds were actually written for each entity in this run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationLedger {
    produced: BTreeMap<String, BTreeSet<ArtifactKind>>,
}

impl GenerationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entity: &str, kind: ArtifactKind) {
        self.produced.entry(entity.to_string()).or_default().insert(kind);
    }

    pub fn forget(&mut self, entity: &str, kind: ArtifactKind) {
        if let Some(kinds) = self.produced.get_mut(entity) {
            kinds.remove(&kind);
            if kinds.is_empty() {
                self.produced.remove(entity);
            }
        }
    }

    pub fn has(&self, entity: &str, kind: ArtifactKind) -> bool {
        self.produced
            .get(entity)
            .is_some_and(|kinds| kinds.contains(&kind))
    }

    pub fn kinds(&self, entity: &str) -> impl Iterator<Item = ArtifactKind> + '_ {
        self.produced.get(entity).into_iter().flatten().copied()
    }

    /// All of [`ArtifactKind::WIRING_PREREQUISITES`] were recorded for `entity`.
    pub fn is_wireable(&self, entity: &str) -> bool {
        ArtifactKind::WIRING_PREREQUISITES
            .iter()
            .all(|kind| self.has(entity, *kind))
    }

    /// Wireable entities in name order.
    pub fn wireable_entities(&self) -> Vec<&str> {
        self.produced
            .keys()
            .map(String::as_str)
            .filter(|entity| self.is_wireable(entity))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locator() -> ArtifactLocator {
        ArtifactLocator::new(PackageMap::resolve("com.example").unwrap(), "UsersApplication")
    }

    // ── locator ──

    #[test]
    fn entity_paths_use_package_directories() {
        let loc = locator();
        assert_eq!(
            loc.entity_artifact_path(ArtifactKind::Repository, "User").unwrap(),
            PathBuf::from(
                "src/main/java/com/example/infrastructure/adapters/output/persistence/repository/JpaUserRepository.java"
            )
        );
        assert_eq!(
            loc.entity_artifact_path(ArtifactKind::ServiceTest, "User").unwrap(),
            PathBuf::from("src/test/java/com/example/application/service/UserServiceTest.java")
        );
    }

    #[test]
    fn entity_paths_reject_shared_kinds() {
        assert!(locator().entity_artifact_path(ArtifactKind::Readme, "User").is_none());
        assert!(locator().shared_artifact_path(ArtifactKind::Service).is_none());
    }

    #[test]
    fn shared_paths() {
        let loc = locator();
        assert_eq!(
            loc.shared_artifact_path(ArtifactKind::MainApplication).unwrap(),
            PathBuf::from("src/main/java/com/example/UsersApplication.java")
        );
        assert_eq!(
            loc.shared_artifact_path(ArtifactKind::CiPipeline).unwrap(),
            PathBuf::from(".github/workflows/ci-cd.yml")
        );
    }

    #[test]
    fn dto_path_includes_service() {
        assert_eq!(
            locator().dto_path("location", "GetCityResponseContent"),
            PathBuf::from("src/main/java/com/example/application/dto/location/GetCityResponseContent.java")
        );
    }

    #[test]
    fn every_kind_has_a_location() {
        let loc = locator();
        let kinds = [
            ArtifactKind::StatusEnum,
            ArtifactKind::DomainModel,
            ArtifactKind::OutputPort,
            ArtifactKind::UseCase,
            ArtifactKind::Service,
            ArtifactKind::Mapper,
            ArtifactKind::PersistenceRecord,
            ArtifactKind::Repository,
            ArtifactKind::RepositoryAdapter,
            ArtifactKind::RestController,
            ArtifactKind::NotFoundException,
            ArtifactKind::ExceptionHandler,
            ArtifactKind::Configuration,
            ArtifactKind::ControllerTest,
            ArtifactKind::TestSchema,
            ArtifactKind::DockerCompose,
        ];
        for kind in kinds {
            let path = loc
                .entity_artifact_path(kind, "User")
                .or_else(|| loc.shared_artifact_path(kind));
            assert!(path.is_some(), "{kind:?} has no location");
        }
    }

    // ── ledger ──

    #[test]
    fn ledger_wireable_requires_all_prerequisites() {
        let mut ledger = GenerationLedger::new();
        for kind in ArtifactKind::WIRING_PREREQUISITES {
            ledger.record("User", kind);
        }
        ledger.record("City", ArtifactKind::UseCase);
        ledger.record("City", ArtifactKind::Service);

        assert!(ledger.is_wireable("User"));
        assert!(!ledger.is_wireable("City"));
        assert!(!ledger.is_wireable("Ghost"));
        assert_eq!(ledger.wireable_entities(), vec!["User"]);
    }

    #[test]
    fn ledger_forget_revokes_wireability() {
        let mut ledger = GenerationLedger::new();
        for kind in ArtifactKind::WIRING_PREREQUISITES {
            ledger.record("User", kind);
        }
        ledger.forget("User", ArtifactKind::Mapper);
        assert!(!ledger.is_wireable("User"));
        assert!(!ledger.has("User", ArtifactKind::Mapper));
    }

    #[test]
    fn layers_are_ordered_by_stage() {
        assert!(Layer::Dto < Layer::Domain);
        assert!(Layer::Infrastructure < Layer::Test);
        assert_eq!(ArtifactKind::Configuration.layer(), Layer::Infrastructure);
        assert_eq!(ArtifactKind::TestSchema.layer(), Layer::Test);
    }
}
