//! Filesystem-based spec ingestion.
//!
//! Reads one OpenAPI-style document per service from a specs directory and
//! converts it into a core [`ServiceSpec`].
//!
//! # Directory layout expected
//!
//! ```text
//! specs/
//! ├── user.yaml                  ← service "user"
//! ├── movie.openapi.json         ← service "movie"
//! └── location/
//!     └── openapi.yml            ← service "location" (named after the folder)
//! ```
//!
//! Only `components.schemas` (or a top-level `schemas` map) and `paths` are
//! read. Everything else in the document is ignored.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use hexgen_core::{
    application::{
        ApplicationError,
        ports::{RejectedSpec, SpecBatch, SpecSource},
    },
    domain::{HttpMethod, Operation, PropertyDef, SchemaDef, ServiceSpec, spec::ref_name},
    error::{HexgenError, HexgenResult},
};

const SPEC_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

// ── Raw document types ────────────────────────────────────────────────────────

/// The subset of an OpenAPI document the generator reads.
#[derive(Debug, Default, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub components: RawComponents,
    /// Some hand-written specs put schemas at the top level.
    #[serde(default)]
    pub schemas: BTreeMap<String, RawSchema>,
    #[serde(default)]
    pub paths: BTreeMap<String, BTreeMap<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawComponents {
    #[serde(default)]
    pub schemas: BTreeMap<String, RawSchema>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSchema {
    #[serde(rename = "type")]
    pub schema_type: Option<Value>,
    #[serde(default)]
    pub properties: BTreeMap<String, RawProperty>,
    #[serde(default)]
    pub required: Vec<String>,
    pub description: Option<String>,
    #[serde(rename = "enum", default)]
    pub enum_values: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawProperty {
    #[serde(rename = "type")]
    pub prop_type: Option<Value>,
    pub format: Option<String>,
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    pub items: Option<RawItems>,
    #[serde(rename = "minLength")]
    pub min_length: Option<u64>,
    #[serde(rename = "maxLength")]
    pub max_length: Option<u64>,
    pub pattern: Option<String>,
    #[serde(rename = "enum", default)]
    pub enum_values: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawItems {
    #[serde(rename = "type")]
    pub item_type: Option<Value>,
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
}

/// `type` is either a string or, in OpenAPI 3.1, a list such as
/// `["string", "null"]`.
fn type_name(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null")
            .map(str::to_string),
        _ => None,
    }
}

fn enum_strings(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}

impl RawProperty {
    fn into_def(self) -> PropertyDef {
        let (items_ref, items_type) = match self.items {
            Some(items) => (
                items.reference.as_deref().map(|r| ref_name(r).to_string()),
                type_name(items.item_type.as_ref()),
            ),
            None => (None, None),
        };
        PropertyDef {
            prop_type: type_name(self.prop_type.as_ref()),
            format: self.format,
            reference: self.reference.as_deref().map(|r| ref_name(r).to_string()),
            items_ref,
            items_type,
            min_length: self.min_length,
            max_length: self.max_length,
            pattern: self.pattern,
            enum_values: enum_strings(&self.enum_values),
        }
    }
}

impl RawSchema {
    fn into_def(self, name: &str) -> SchemaDef {
        SchemaDef {
            original_name: name.to_string(),
            schema_type: type_name(self.schema_type.as_ref()),
            properties: self
                .properties
                .into_iter()
                .map(|(prop, raw)| (prop, raw.into_def()))
                .collect(),
            required: self.required.into_iter().collect(),
            description: self.description,
            enum_values: enum_strings(&self.enum_values),
        }
    }
}

impl RawDocument {
    /// Convert into a [`ServiceSpec`].
    ///
    /// Path entries whose key is not an HTTP method (`parameters`, `summary`,
    /// vendor extensions) are ignored, as are operations without an
    /// `operationId`.
    pub fn into_spec(self, service: &str) -> ServiceSpec {
        let mut raw_schemas = self.schemas;
        raw_schemas.extend(self.components.schemas);
        let schemas = raw_schemas
            .into_iter()
            .map(|(name, raw)| {
                let def = raw.into_def(&name);
                (name, def)
            })
            .collect();

        let mut operations = Vec::new();
        for (path, methods) in self.paths {
            for (method, body) in methods {
                let Ok(http_method) = method.parse::<HttpMethod>() else {
                    continue;
                };
                let Some(operation_id) = body.get("operationId").and_then(Value::as_str) else {
                    continue;
                };
                let mut op = Operation::new(operation_id, service, path.clone(), http_method);
                op.description = body
                    .get("description")
                    .or_else(|| body.get("summary"))
                    .and_then(Value::as_str)
                    .map(str::to_string);
                operations.push(op);
            }
        }

        ServiceSpec::new(service, schemas, operations)
    }

    fn is_empty(&self) -> bool {
        self.components.schemas.is_empty() && self.schemas.is_empty() && self.paths.is_empty()
    }
}

// ── Source ────────────────────────────────────────────────────────────────────

/// Loads every spec document under a directory.
///
/// Files directly in the directory are named by their stem; files one level
/// down are named by their folder. Unparseable documents are returned as
/// [`RejectedSpec`]s without stopping the batch.
///
/// # Example
///
/// ```no_run
/// use hexgen_adapters::DirectorySpecSource;
/// use hexgen_core::application::ports::SpecSource;
///
/// let batch = DirectorySpecSource::new().load_all("./specs".as_ref())?;
/// println!("Loaded {} specs", batch.specs.len());
/// # Ok::<(), hexgen_core::error::HexgenError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectorySpecSource;

impl DirectorySpecSource {
    pub fn new() -> Self {
        Self
    }

    /// Parse one document, choosing the format by extension.
    pub fn parse_document(path: &Path, raw: &str) -> HexgenResult<RawDocument> {
        let parsed = match extension(path).as_deref() {
            Some("json") => serde_json::from_str::<RawDocument>(raw).map_err(|e| e.to_string()),
            _ => serde_yaml::from_str::<RawDocument>(raw).map_err(|e| e.to_string()),
        };
        let document = parsed.map_err(|reason| spec_parse(path, reason))?;
        if document.is_empty() {
            return Err(spec_parse(path, "document has no schemas and no paths"));
        }
        Ok(document)
    }

    fn load_one(&self, root: &Path, path: &Path) -> HexgenResult<ServiceSpec> {
        let service = service_name(root, path);
        if service.is_empty() {
            return Err(spec_parse(path, "cannot derive a service name from the file name"));
        }
        let raw = fs::read_to_string(path).map_err(|e| spec_parse(path, e.to_string()))?;
        let spec = Self::parse_document(path, &raw)?.into_spec(&service);
        debug!(
            path = %path.display(),
            service = %service,
            schemas = spec.schemas().len(),
            operations = spec.operations().len(),
            "loaded spec"
        );
        Ok(spec)
    }
}

impl SpecSource for DirectorySpecSource {
    #[instrument(skip(self), fields(dir = %specs_dir.display()))]
    fn load_all(&self, specs_dir: &Path) -> HexgenResult<SpecBatch> {
        fs::read_dir(specs_dir).map_err(|e| ApplicationError::SpecDirectoryUnreadable {
            path: specs_dir.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut batch = SpecBatch::default();
        let walker = WalkDir::new(specs_dir)
            .min_depth(1)
            .max_depth(2)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    batch.rejected.push(RejectedSpec {
                        path,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || !is_spec_file(path) {
                continue;
            }

            match self.load_one(specs_dir, path) {
                Ok(spec) => batch.specs.push(spec),
                Err(e) => batch.rejected.push(RejectedSpec {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }),
            }
        }

        debug!(
            loaded = batch.specs.len(),
            rejected = batch.rejected.len(),
            "finished loading specs"
        );
        Ok(batch)
    }
}

fn spec_parse(path: &Path, reason: impl Into<String>) -> HexgenError {
    ApplicationError::SpecParse {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

fn is_spec_file(path: &Path) -> bool {
    extension(path).is_some_and(|ext| SPEC_EXTENSIONS.contains(&ext.as_str()))
}

/// `user-service.openapi.yaml` → `userservice`; `location/openapi.yml` → `location`.
pub fn service_name(root: &Path, path: &Path) -> String {
    let in_root = path.parent() == Some(root);
    let raw = if in_root {
        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.split('.').next())
    } else {
        path.parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
    };
    raw.unwrap_or_default()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase()
}

/// All candidate spec files, sorted. Used by `hexgen entities` before loading.
pub fn spec_files(specs_dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(specs_dir)
        .min_depth(1)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() && is_spec_file(e.path()))
        .map(|e| e.into_path())
        .collect()
}
