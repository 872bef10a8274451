//! Entity model extracted from service specs.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::domain::naming::{
    finder_method_name, lookup_parameter_name, lookup_path_segment, lower_first, pluralize,
};
use crate::domain::spec::SchemaDef;

/// Fields handled by the persistence templates themselves.
pub const MANAGED_FIELDS: [&str; 3] = ["createdAt", "updatedAt", "status"];

// ── CrudVerb ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CrudVerb {
    Create,
    Get,
    Update,
    Delete,
    List,
}

impl CrudVerb {
    pub const ALL: [CrudVerb; 5] = [
        CrudVerb::Create,
        CrudVerb::Get,
        CrudVerb::Update,
        CrudVerb::Delete,
        CrudVerb::List,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Get => "Get",
            Self::Update => "Update",
            Self::Delete => "Delete",
            Self::List => "List",
        }
    }

    /// The operation id this verb expects for `entity`: `ListUsers`, `GetUser`.
    ///
    /// List uses a naive `s` suffix, so `City` expects `ListCitys`.
    pub fn operation_id(&self, entity: &str) -> String {
        match self {
            Self::List => format!("List{entity}s"),
            _ => format!("{}{entity}", self.as_str()),
        }
    }

    /// Which verb, if any, `operation_id` is for `entity`.
    pub fn match_operation(operation_id: &str, entity: &str) -> Option<CrudVerb> {
        Self::ALL
            .into_iter()
            .find(|verb| verb.operation_id(entity) == operation_id)
    }
}

impl fmt::Display for CrudVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ComplexOperation ─────────────────────────────────────────────────────────

/// A `Get…By…` lookup attached to an entity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ComplexOperation {
    pub operation_id: String,
    pub method_name: String,
    pub finder_name: String,
    pub parameter_name: String,
    pub path_segment: String,
    pub response_type: String,
}

impl ComplexOperation {
    pub fn from_operation_id(operation_id: &str) -> Self {
        Self {
            operation_id: operation_id.to_string(),
            method_name: lower_first(operation_id),
            finder_name: finder_method_name(operation_id),
            parameter_name: lookup_parameter_name(operation_id),
            path_segment: lookup_path_segment(operation_id),
            response_type: format!("{operation_id}ResponseContent"),
        }
    }

    /// `Get…By…` shape check on an operation id.
    pub fn is_lookup(operation_id: &str) -> bool {
        operation_id.starts_with("Get") && operation_id.contains("By")
    }
}

// ── EntityModel ──────────────────────────────────────────────────────────────

/// A domain entity and everything generated for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityModel {
    name: String,
    service: String,
    schema: SchemaDef,
    crud_operations: BTreeSet<CrudVerb>,
    complex_operations: Vec<ComplexOperation>,
}

impl EntityModel {
    pub fn new(name: impl Into<String>, service: impl Into<String>, schema: SchemaDef) -> Self {
        Self {
            name: name.into(),
            service: service.into(),
            schema,
            crud_operations: BTreeSet::new(),
            complex_operations: Vec::new(),
        }
    }

    pub fn with_crud(mut self, verbs: impl IntoIterator<Item = CrudVerb>) -> Self {
        self.crud_operations.extend(verbs);
        self
    }

    /// Attach lookup operations; stored sorted and without duplicates.
    pub fn with_complex<I, S>(mut self, operation_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ids: BTreeSet<String> = self
            .complex_operations
            .iter()
            .map(|op| op.operation_id.clone())
            .collect();
        ids.extend(operation_ids.into_iter().map(|s| s.as_ref().to_string()));
        self.complex_operations = ids
            .iter()
            .map(|id| ComplexOperation::from_operation_id(id))
            .collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn schema(&self) -> &SchemaDef {
        &self.schema
    }

    pub fn crud_operations(&self) -> &BTreeSet<CrudVerb> {
        &self.crud_operations
    }

    pub fn complex_operations(&self) -> &[ComplexOperation] {
        &self.complex_operations
    }

    pub fn has_verb(&self, verb: CrudVerb) -> bool {
        self.crud_operations.contains(&verb)
    }

    pub fn has_operations(&self) -> bool {
        !self.crud_operations.is_empty() || !self.complex_operations.is_empty()
    }

    /// `UserProfile` → `userProfile`.
    pub fn var_name(&self) -> String {
        lower_first(&self.name)
    }

    /// Table name and REST path segment: `City` → `cities`.
    pub fn collection_name(&self) -> String {
        pluralize(&self.name.to_lowercase())
    }

    /// `User` → `userId`.
    pub fn primary_key_name(&self) -> String {
        format!("{}Id", self.var_name())
    }

    pub fn is_primary_key(&self, property: &str) -> bool {
        property == "id" || property == self.primary_key_name()
    }

    /// `*Id` properties other than the primary key.
    pub fn is_relation_field(&self, property: &str) -> bool {
        property.len() > 2 && property.ends_with("Id") && !self.is_primary_key(property)
    }

    /// Properties stored as plain columns on the persistence record.
    pub fn persisted_properties(&self) -> impl Iterator<Item = &str> {
        self.schema
            .properties
            .keys()
            .map(String::as_str)
            .filter(|p| !self.is_primary_key(p) && !MANAGED_FIELDS.contains(p))
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.schema.properties.keys().map(String::as_str)
    }

    pub fn has_property(&self, property: &str) -> bool {
        self.schema.properties.contains_key(property)
    }

    /// CRUD ids in verb order, then lookup ids.
    pub fn operation_ids(&self) -> Vec<String> {
        self.crud_operations
            .iter()
            .map(|verb| verb.operation_id(&self.name))
            .chain(self.complex_operations.iter().map(|op| op.operation_id.clone()))
            .collect()
    }
}
