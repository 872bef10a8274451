//! Package layout of a generated project.
//!
//! A [`PackageMap`] is derived from the base package alone; every generated
//! artifact asks it for its package and source directory.

use std::fmt;
use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::domain::error::DomainError;

/// Java keywords that cannot appear as package segments.
const RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while", "true", "false", "null",
];

/// Logical location in the hexagonal layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LayerKey {
    Root,
    Utils,
    DomainModel,
    DomainPortsInput,
    DomainPortsOutput,
    ApplicationService,
    ApplicationDto,
    ApplicationMapper,
    InfraRest,
    InfraPersistence,
    InfraPersistenceEntity,
    InfraPersistenceRepository,
    InfraPersistenceAdapter,
    InfraConfig,
    InfraConfigExceptions,
}

impl LayerKey {
    pub const COUNT: usize = 15;

    pub const ALL: [LayerKey; Self::COUNT] = [
        LayerKey::Root,
        LayerKey::Utils,
        LayerKey::DomainModel,
        LayerKey::DomainPortsInput,
        LayerKey::DomainPortsOutput,
        LayerKey::ApplicationService,
        LayerKey::ApplicationDto,
        LayerKey::ApplicationMapper,
        LayerKey::InfraRest,
        LayerKey::InfraPersistence,
        LayerKey::InfraPersistenceEntity,
        LayerKey::InfraPersistenceRepository,
        LayerKey::InfraPersistenceAdapter,
        LayerKey::InfraConfig,
        LayerKey::InfraConfigExceptions,
    ];

    /// Dotted key, as used in docs and the run summary.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Utils => "utils",
            Self::DomainModel => "domain.model",
            Self::DomainPortsInput => "domain.ports.input",
            Self::DomainPortsOutput => "domain.ports.output",
            Self::ApplicationService => "application.service",
            Self::ApplicationDto => "application.dto",
            Self::ApplicationMapper => "application.mapper",
            Self::InfraRest => "infra.adapters.input.rest",
            Self::InfraPersistence => "infra.adapters.output.persistence",
            Self::InfraPersistenceEntity => "infra.adapters.output.persistence.entity",
            Self::InfraPersistenceRepository => "infra.adapters.output.persistence.repository",
            Self::InfraPersistenceAdapter => "infra.adapters.output.persistence.adapter",
            Self::InfraConfig => "infra.config",
            Self::InfraConfigExceptions => "infra.config.exceptions",
        }
    }

    /// Package suffix appended to the base package.
    const fn suffix(&self) -> Option<&'static str> {
        match self {
            Self::Root => None,
            Self::Utils => Some("utils"),
            Self::DomainModel => Some("domain.model"),
            Self::DomainPortsInput => Some("domain.ports.input"),
            Self::DomainPortsOutput => Some("domain.ports.output"),
            Self::ApplicationService => Some("application.service"),
            Self::ApplicationDto => Some("application.dto"),
            Self::ApplicationMapper => Some("application.mapper"),
            Self::InfraRest => Some("infrastructure.adapters.input.rest"),
            Self::InfraPersistence => Some("infrastructure.adapters.output.persistence"),
            Self::InfraPersistenceEntity => {
                Some("infrastructure.adapters.output.persistence.entity")
            }
            Self::InfraPersistenceRepository => {
                Some("infrastructure.adapters.output.persistence.repository")
            }
            Self::InfraPersistenceAdapter => {
                Some("infrastructure.adapters.output.persistence.adapter")
            }
            Self::InfraConfig => Some("infrastructure.config"),
            Self::InfraConfigExceptions => Some("infrastructure.config.exceptions"),
        }
    }

    /// Identifier-safe key for template contexts: `domain.model` → `domain_model`.
    pub fn context_key(&self) -> String {
        self.as_str().replace('.', "_")
    }

    const fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for LayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully-qualified package for every [`LayerKey`] under one base package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMap {
    base: String,
    packages: [String; LayerKey::COUNT],
}

impl PackageMap {
    /// Resolve every package for `base`.
    ///
    /// The same base always yields the same map. Fails if `base` is not a
    /// dot-separated sequence of valid Java identifiers.
    pub fn resolve(base: &str) -> Result<Self, DomainError> {
        validate_base_package(base)?;
        let packages = LayerKey::ALL.map(|key| match key.suffix() {
            Some(suffix) => format!("{base}.{suffix}"),
            None => base.to_string(),
        });
        Ok(Self {
            base: base.to_string(),
            packages,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn get(&self, key: LayerKey) -> &str {
        &self.packages[key.index()]
    }

    /// Package of the DTOs generated for one service.
    pub fn dto_package(&self, service: &str) -> String {
        format!("{}.{}", self.get(LayerKey::ApplicationDto), service)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LayerKey, &str)> {
        LayerKey::ALL.iter().map(|key| (*key, self.get(*key)))
    }

    /// `src/main/java/<package path>`.
    pub fn main_dir(&self, key: LayerKey) -> PathBuf {
        package_dir("src/main/java", self.get(key))
    }

    /// `src/test/java/<package path>`.
    pub fn test_dir(&self, key: LayerKey) -> PathBuf {
        package_dir("src/test/java", self.get(key))
    }

    /// Template context: `{ "domain_model": "com.example.domain.model", ... }`.
    pub fn to_context(&self) -> Map<String, Value> {
        self.iter()
            .map(|(key, package)| (key.context_key(), Value::String(package.to_string())))
            .collect()
    }
}

/// Directory of a dotted package under `source_root`.
pub fn package_dir(source_root: &str, package: &str) -> PathBuf {
    let mut dir = PathBuf::from(source_root);
    dir.extend(package.split('.'));
    dir
}

fn validate_base_package(base: &str) -> Result<(), DomainError> {
    let invalid = |reason: String| DomainError::InvalidBasePackage {
        package: base.to_string(),
        reason,
    };

    if base.trim().is_empty() {
        return Err(invalid("base package is empty".into()));
    }

    for segment in base.split('.') {
        if segment.is_empty() {
            return Err(invalid("empty segment between dots".into()));
        }
        let mut chars = segment.chars();
        let starts_ok = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
        if !starts_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
            return Err(invalid(format!("'{segment}' is not a Java identifier")));
        }
        if RESERVED.contains(&segment) {
            return Err(invalid(format!("'{segment}' is a reserved word")));
        }
    }
    Ok(())
}
