//! Ingested API specification model.
//!
//! These types are the read-only input of a generation run. Adapters build
//! them from raw documents; nothing downstream mutates them.
//!
//! All maps are `BTreeMap`/`BTreeSet` so that iteration order is stable
//! across runs regardless of the order keys appeared in the source document.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::error::DomainError;

// ── ServiceSpec ──────────────────────────────────────────────────────────────

/// One service's API description: its schemas and operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceSpec {
    service_name: String,
    schemas: BTreeMap<String, SchemaDef>,
    operations: Vec<Operation>,
}

impl ServiceSpec {
    pub fn new(
        service_name: impl Into<String>,
        schemas: BTreeMap<String, SchemaDef>,
        operations: Vec<Operation>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            schemas,
            operations,
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn schemas(&self) -> &BTreeMap<String, SchemaDef> {
        &self.schemas
    }

    pub fn schema(&self, name: &str) -> Option<&SchemaDef> {
        self.schemas.get(name)
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }
}

// ── SchemaDef ────────────────────────────────────────────────────────────────

/// A named schema fragment (`components.schemas.<name>`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaDef {
    pub original_name: String,
    pub schema_type: Option<String>,
    pub properties: BTreeMap<String, PropertyDef>,
    pub required: BTreeSet<String>,
    pub description: Option<String>,
    pub enum_values: Vec<String>,
}

impl SchemaDef {
    pub fn new(original_name: impl Into<String>) -> Self {
        Self {
            original_name: original_name.into(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, schema_type: impl Into<String>) -> Self {
        self.schema_type = Some(schema_type.into());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, def: PropertyDef) -> Self {
        self.properties.insert(name.into(), def);
        self
    }

    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        self.required.insert(name.into());
        self
    }

    /// An explicit `object`, or an untyped fragment that declares properties.
    pub fn is_object(&self) -> bool {
        match self.schema_type.as_deref() {
            Some("object") => true,
            None => !self.properties.is_empty(),
            Some(_) => false,
        }
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required.contains(property)
    }
}

// ── PropertyDef ──────────────────────────────────────────────────────────────

/// One schema property.
///
/// `reference` holds the last path segment of a `$ref` on the property itself;
/// `items_ref` / `items_type` describe array elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PropertyDef {
    pub prop_type: Option<String>,
    pub format: Option<String>,
    pub reference: Option<String>,
    pub items_ref: Option<String>,
    pub items_type: Option<String>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<String>,
    pub enum_values: Vec<String>,
}

impl PropertyDef {
    pub fn of_type(prop_type: impl Into<String>) -> Self {
        Self {
            prop_type: Some(prop_type.into()),
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_length(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn array_of_ref(reference: impl Into<String>) -> Self {
        Self {
            prop_type: Some("array".into()),
            items_ref: Some(ref_name(&reference.into()).to_string()),
            ..Self::default()
        }
    }

    pub fn type_or_default(&self) -> &str {
        self.prop_type.as_deref().unwrap_or("string")
    }
}

/// Last segment of a JSON reference: `#/components/schemas/City` → `City`.
pub fn ref_name(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

// ── Operation ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operation {
    pub operation_id: String,
    pub service: String,
    pub http_path: String,
    pub http_method: HttpMethod,
    pub description: Option<String>,
}

impl Operation {
    pub fn new(
        operation_id: impl Into<String>,
        service: impl Into<String>,
        http_path: impl Into<String>,
        http_method: HttpMethod,
    ) -> Self {
        Self {
            operation_id: operation_id.into(),
            service: service.into(),
            http_path: http_path.into(),
            http_method,
            description: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "patch" => Ok(Self::Patch),
            "delete" => Ok(Self::Delete),
            "head" => Ok(Self::Head),
            "options" => Ok(Self::Options),
            other => Err(DomainError::InvalidNamingInput(format!(
                "unknown HTTP method: {other}"
            ))),
        }
    }
}
