//! Project settings and the entity relationship table.
//!
//! The CLI loads these from `hexgen.toml` (plus environment overrides) and
//! hands a fully-populated [`ProjectSettings`] to the generation service.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    pub project: ProjectInfo,
    pub paths: PathSettings,
    pub database: DatabaseSettings,
    pub relationships: Vec<RelationshipRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
    pub group_id: String,
    pub artifact_id: String,
    pub base_package: String,
    pub main_class: String,
    pub java_version: String,
    pub spring_boot_version: String,
    pub server_port: u16,
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            name: "generated-service".into(),
            version: "1.0.0".into(),
            description: "Hexagonal Spring Boot service".into(),
            author: "hexgen".into(),
            group_id: "com.example".into(),
            artifact_id: "generated-service".into(),
            base_package: "com.example.service".into(),
            main_class: "GeneratedServiceApplication".into(),
            java_version: "21".into(),
            spring_boot_version: "3.2.5".into(),
            server_port: 8080,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Directory containing one spec document per service.
    pub specs_dir: PathBuf,
    /// Parent directory; the project is written to `<output_dir>/<project.name>`.
    pub output_dir: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            specs_dir: PathBuf::from("specs"),
            output_dir: PathBuf::from("projects"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseKind {
    #[default]
    Postgresql,
    Mysql,
    H2,
}

impl DatabaseKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Postgresql => "postgresql",
            Self::Mysql => "mysql",
            Self::H2 => "h2",
        }
    }

    pub const fn default_port(&self) -> u16 {
        match self {
            Self::Postgresql => 5432,
            Self::Mysql => 3306,
            Self::H2 => 0,
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub kind: DatabaseKind,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub username: String,
    pub password: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            kind: DatabaseKind::Postgresql,
            host: "localhost".into(),
            port: DatabaseKind::Postgresql.default_port(),
            name: "app".into(),
            username: "app".into(),
            password: "app".into(),
        }
    }
}

/// `[[relationships]]` entry: lookups mentioning any keyword attach to `entity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipRule {
    pub entity: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl ProjectSettings {
    /// Check everything that would make generation meaningless.
    pub fn validate(&self) -> Result<(), DomainError> {
        let project = &self.project;
        if project.name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: "project.name" });
        }
        if project.name.contains(['/', '\\']) || project.name == "." || project.name == ".." {
            return Err(DomainError::InvalidSettings(format!(
                "project name '{}' must be a single directory name",
                project.name
            )));
        }
        if project.base_package.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: "project.base_package" });
        }
        let main_ok = project
            .main_class
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase())
            && project.main_class.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !main_ok {
            return Err(DomainError::InvalidSettings(format!(
                "main class '{}' must be a Java class name",
                project.main_class
            )));
        }
        for rule in &self.relationships {
            if rule.entity.trim().is_empty() {
                return Err(DomainError::InvalidSettings(
                    "relationship rule with empty entity".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn project_root(&self) -> PathBuf {
        self.paths.output_dir.join(&self.project.name)
    }

    pub fn relationship_table(&self) -> RelationshipTable {
        RelationshipTable::from_rules(&self.relationships)
    }

    /// Template context shared by every artifact.
    pub fn to_context(&self) -> Value {
        let p = &self.project;
        let db = &self.database;
        json!({
            "project": {
                "name": p.name,
                "version": p.version,
                "description": p.description,
                "author": p.author,
                "group_id": p.group_id,
                "artifact_id": p.artifact_id,
                "base_package": p.base_package,
                "main_class": p.main_class,
                "java_version": p.java_version,
                "spring_boot_version": p.spring_boot_version,
                "server_port": p.server_port,
            },
            "database": {
                "kind": db.kind.as_str(),
                "host": db.host,
                "port": db.port,
                "name": db.name,
                "username": db.username,
                "password": db.password,
            },
        })
    }
}

// ── RelationshipTable ────────────────────────────────────────────────────────

/// Configured entity → keyword associations for lookup operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipTable {
    keywords: BTreeMap<String, Vec<String>>,
}

impl RelationshipTable {
    pub fn from_rules(rules: &[RelationshipRule]) -> Self {
        let mut keywords: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for rule in rules {
            keywords
                .entry(rule.entity.clone())
                .or_default()
                .extend(rule.keywords.iter().map(|k| k.to_lowercase()));
        }
        Self { keywords }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Whether a configured keyword for `entity` appears in `operation_id`.
    pub fn matches(&self, entity: &str, operation_id: &str) -> bool {
        let op = operation_id.to_lowercase();
        self.keywords
            .get(entity)
            .is_some_and(|keywords| keywords.iter().any(|k| !k.is_empty() && op.contains(k)))
    }
}
