//! Generation Service - main application orchestrator.
//!
//! This service coordinates the whole pipeline:
//! 1. Validate settings and resolve packages
//! 2. Ingest specs and extract the entity model
//! 3. Emit and write each stage in order: DTOs, domain, application,
//!    infrastructure (wiring last), tests, project files
//!
//! Everything up to step 2 can fail the run without touching the output
//! directory. After that, only filesystem errors are fatal.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::application::emitters::{self, EmitContext, StageOutput};
use crate::application::extractor::{ExtractedModel, ModelExtractor};
use crate::application::ports::{Filesystem, RejectedSpec, SpecSource, TemplateRenderer};
use crate::domain::{
    ArtifactKind, ArtifactLocator, GenerationLedger, Layer, PackageMap, ProjectSettings,
};
use crate::error::HexgenResult;

/// Per-entity kinds listed in a plan, in generation order.
const ENTITY_KINDS: [ArtifactKind; 12] = [
    ArtifactKind::DomainModel,
    ArtifactKind::OutputPort,
    ArtifactKind::Mapper,
    ArtifactKind::UseCase,
    ArtifactKind::Service,
    ArtifactKind::PersistenceRecord,
    ArtifactKind::Repository,
    ArtifactKind::RepositoryAdapter,
    ArtifactKind::RestController,
    ArtifactKind::ServiceTest,
    ArtifactKind::MapperTest,
    ArtifactKind::ControllerTest,
];

/// Something that was left out of a run, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkipNote {
    pub subject: String,
    pub reason: String,
}

/// One entity as it will be generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityPlan {
    pub name: String,
    pub service: String,
    pub crud: Vec<String>,
    pub lookups: Vec<String>,
    pub artifacts: BTreeMap<ArtifactKind, PathBuf>,
}

/// Result of ingestion and extraction, before anything is written.
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub project_root: PathBuf,
    pub spec_count: usize,
    pub rejected: Vec<RejectedSpec>,
    pub model: ExtractedModel,
    pub locator: ArtifactLocator,
}

impl GenerationPlan {
    pub fn list_entities(&self) -> Vec<&str> {
        self.model.list_entities()
    }

    /// Where `kind` for `entity` will be written, relative to the project root.
    pub fn artifact_path(&self, kind: ArtifactKind, entity: &str) -> Option<PathBuf> {
        self.locator.entity_artifact_path(kind, entity)
    }

    pub fn entities(&self) -> Vec<EntityPlan> {
        self.model
            .entities()
            .map(|entity| EntityPlan {
                name: entity.name().to_string(),
                service: entity.service().to_string(),
                crud: entity
                    .crud_operations()
                    .iter()
                    .map(|verb| verb.operation_id(entity.name()))
                    .collect(),
                lookups: entity
                    .complex_operations()
                    .iter()
                    .map(|op| op.operation_id.clone())
                    .collect(),
                artifacts: ENTITY_KINDS
                    .iter()
                    .filter_map(|kind| {
                        self.artifact_path(*kind, entity.name())
                            .map(|path| (*kind, path))
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn skipped(&self) -> Vec<SkipNote> {
        self.rejected
            .iter()
            .map(|r| SkipNote {
                subject: r.path.display().to_string(),
                reason: r.reason.clone(),
            })
            .chain(self.model.skipped().iter().map(|s| SkipNote {
                subject: s.entity.clone(),
                reason: s.reason.to_string(),
            }))
            .collect()
    }
}

/// Run summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub project_name: String,
    pub project_version: String,
    pub project_root: PathBuf,
    pub spec_count: usize,
    pub dto_count: usize,
    pub operation_count: usize,
    pub entity_count: usize,
    pub entities: Vec<String>,
    pub wired_entities: Vec<String>,
    pub artifacts_written: usize,
    pub artifacts_by_layer: BTreeMap<Layer, usize>,
    pub rejected_specs: Vec<SkipNote>,
    pub skipped_entities: Vec<SkipNote>,
    pub warnings: Vec<String>,
}

/// Mutable bookkeeping for one run.
#[derive(Default)]
struct RunState {
    ledger: GenerationLedger,
    seen: BTreeSet<(ArtifactKind, Option<String>)>,
    by_layer: BTreeMap<Layer, usize>,
    written: usize,
    warnings: Vec<String>,
}

/// Main generation service.
pub struct GenerationService {
    specs: Box<dyn SpecSource>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl GenerationService {
    pub fn new(
        specs: Box<dyn SpecSource>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            specs,
            renderer,
            filesystem,
        }
    }

    /// Validate, ingest and extract. Writes nothing.
    #[instrument(skip_all, fields(specs_dir = %settings.paths.specs_dir.display()))]
    pub fn plan(&self, settings: &ProjectSettings) -> HexgenResult<GenerationPlan> {
        settings.validate()?;
        let packages = PackageMap::resolve(&settings.project.base_package)?;

        let batch = self.specs.load_all(&settings.paths.specs_dir)?;
        for rejected in &batch.rejected {
            warn!(path = %rejected.path.display(), reason = %rejected.reason, "spec skipped");
        }
        let spec_count = batch.specs.len();
        info!(specs = spec_count, rejected = batch.rejected.len(), "specs ingested");

        let model = ModelExtractor::new(settings.relationship_table()).extract(batch.specs);
        info!(
            entities = model.list_entities().len(),
            skipped = model.skipped().len(),
            "model extracted"
        );

        Ok(GenerationPlan {
            project_root: settings.project_root(),
            spec_count,
            rejected: batch.rejected,
            model,
            locator: ArtifactLocator::new(packages, settings.project.main_class.clone()),
        })
    }

    /// Regenerate the project from scratch.
    ///
    /// The project directory is removed and rewritten wholesale.
    #[instrument(skip_all, fields(project = %settings.project.name))]
    pub fn generate(&self, settings: &ProjectSettings) -> HexgenResult<GenerationReport> {
        let plan = self.plan(settings)?;
        let root = plan.project_root.clone();

        if self.filesystem.exists(&root) {
            info!(path = %root.display(), "removing previous output");
            self.filesystem.remove_dir_all(&root)?;
        }
        self.filesystem.create_dir_all(&root)?;

        let ctx = EmitContext::new(&plan.model, settings, &plan.locator, self.renderer.as_ref());
        let mut run = RunState::default();

        let mut out = StageOutput::new();
        emitters::dto::emit(&ctx, &mut out)?;
        self.write_stage(&root, Layer::Dto, out, &mut run)?;

        let mut out = StageOutput::new();
        emitters::domain::emit(&ctx, &mut out)?;
        self.write_stage(&root, Layer::Domain, out, &mut run)?;

        let mut out = StageOutput::new();
        emitters::application::emit(&ctx, &mut out)?;
        self.write_stage(&root, Layer::Application, out, &mut run)?;

        let mut out = StageOutput::new();
        emitters::infrastructure::emit(&ctx, &mut out)?;
        self.write_stage(&root, Layer::Infrastructure, out, &mut run)?;

        let mut out = StageOutput::new();
        let wired = emitters::infrastructure::emit_wiring(&ctx, &run.ledger, &mut out)?;
        self.write_stage(&root, Layer::Infrastructure, out, &mut run)?;

        let mut out = StageOutput::new();
        emitters::test_suite::emit(&ctx, &run.ledger, &mut out)?;
        self.write_stage(&root, Layer::Test, out, &mut run)?;

        let mut out = StageOutput::new();
        emitters::project::emit(&ctx, &mut out)?;
        self.write_stage(&root, Layer::Project, out, &mut run)?;

        let skipped_entities = plan
            .model
            .skipped()
            .iter()
            .map(|s| SkipNote {
                subject: s.entity.clone(),
                reason: s.reason.to_string(),
            })
            .collect();
        let rejected_specs = plan
            .rejected
            .iter()
            .map(|r| SkipNote {
                subject: r.path.display().to_string(),
                reason: r.reason.clone(),
            })
            .collect();
        let entities: Vec<String> = plan.list_entities().iter().map(|s| s.to_string()).collect();

        info!(
            artifacts = run.written,
            warnings = run.warnings.len(),
            "generation complete"
        );

        Ok(GenerationReport {
            project_name: settings.project.name.clone(),
            project_version: settings.project.version.clone(),
            project_root: root,
            spec_count: plan.spec_count,
            dto_count: run.by_layer.get(&Layer::Dto).copied().unwrap_or(0),
            operation_count: plan.model.operation_count(),
            entity_count: entities.len(),
            entities,
            wired_entities: wired,
            artifacts_written: run.written,
            artifacts_by_layer: run.by_layer,
            rejected_specs,
            skipped_entities,
            warnings: run.warnings,
        })
    }

    fn write_stage(
        &self,
        root: &Path,
        layer: Layer,
        out: StageOutput,
        run: &mut RunState,
    ) -> HexgenResult<()> {
        let StageOutput { artifacts, warnings } = out;
        run.warnings.extend(warnings);

        for artifact in artifacts {
            if !run.seen.insert(artifact.key()) {
                warn!(
                    kind = ?artifact.kind,
                    subject = artifact.subject.as_deref().unwrap_or("-"),
                    "duplicate artifact dropped"
                );
                run.warnings.push(format!(
                    "duplicate {:?} for {} dropped",
                    artifact.kind,
                    artifact.subject.as_deref().unwrap_or("project")
                ));
                continue;
            }

            let path = root.join(&artifact.target_path);
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, &artifact.content)?;
            debug!(path = %artifact.target_path.display(), "artifact written");

            if let Some(entity) = artifact.subject.as_deref() {
                if artifact.kind.is_per_entity() {
                    run.ledger.record(entity, artifact.kind);
                }
            }
            *run.by_layer.entry(artifact.layer()).or_default() += 1;
            run.written += 1;
        }
        info!(stage = %layer, written = run.written, "stage complete");
        Ok(())
    }
}
