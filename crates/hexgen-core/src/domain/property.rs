//! Schema property → Java field mapping.

use serde_json::{Value, json};

use crate::domain::naming::{camel_to_snake, getter_name, setter_name};
use crate::domain::spec::PropertyDef;

/// Pattern shorthand for e-mail addresses, as it appears in specs.
pub const EMAIL_PATTERN: &str = r"^[^@]+@[^@]+\.[^@]+$";

/// [`EMAIL_PATTERN`] escaped for a Java string literal.
pub const EMAIL_PATTERN_JAVA: &str = r"^[^@]+@[^@]+\\.[^@]+$";

/// Audit timestamps; when mistyped as numbers they are rendered as text.
pub const TIMESTAMP_FIELDS: [&str; 2] = ["createdAt", "updatedAt"];

/// Target-language type of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetType {
    Text,
    Timestamp,
    Decimal,
    Double,
    Integer,
    Long,
    Boolean,
    Uuid,
    ListOf(Box<TargetType>),
    Reference(String),
}

impl TargetType {
    pub fn type_name(&self) -> String {
        match self {
            Self::Text => "String".into(),
            Self::Timestamp => "OffsetDateTime".into(),
            Self::Decimal => "BigDecimal".into(),
            Self::Double => "Double".into(),
            Self::Integer => "Integer".into(),
            Self::Long => "Long".into(),
            Self::Boolean => "Boolean".into(),
            Self::Uuid => "UUID".into(),
            Self::ListOf(inner) => format!("List<{}>", inner.type_name()),
            Self::Reference(name) => name.clone(),
        }
    }

    /// Imports needed to use this type, outermost first.
    pub fn imports(&self) -> Vec<&'static str> {
        match self {
            Self::Timestamp => vec!["java.time.OffsetDateTime"],
            Self::Decimal => vec!["java.math.BigDecimal"],
            Self::Uuid => vec!["java.util.UUID"],
            Self::ListOf(inner) => {
                let mut imports = vec!["java.util.List"];
                imports.extend(inner.imports());
                imports
            }
            _ => Vec::new(),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }
}

/// Bean-validation constraint on a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    NotNull,
    Size { min: Option<u64>, max: Option<u64> },
    Pattern(String),
}

impl Constraint {
    pub fn annotation(&self) -> String {
        match self {
            Self::NotNull => "@NotNull".into(),
            Self::Size { min, max } => {
                let bounds: Vec<String> = [min.map(|v| format!("min = {v}")), max.map(|v| format!("max = {v}"))]
                    .into_iter()
                    .flatten()
                    .collect();
                format!("@Size({})", bounds.join(", "))
            }
            Self::Pattern(regexp) => format!("@Pattern(regexp = \"{regexp}\")"),
        }
    }

    pub fn import(&self) -> &'static str {
        match self {
            Self::NotNull => "jakarta.validation.constraints.NotNull",
            Self::Size { .. } => "jakarta.validation.constraints.Size",
            Self::Pattern(_) => "jakarta.validation.constraints.Pattern",
        }
    }
}

/// Mapped description of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub column_name: String,
    pub target_type: TargetType,
    pub constraints: Vec<Constraint>,
    pub required: bool,
}

impl FieldDescriptor {
    pub fn type_name(&self) -> String {
        self.target_type.type_name()
    }

    pub fn getter(&self) -> String {
        getter_name(&self.name)
    }

    pub fn setter(&self) -> String {
        setter_name(&self.name)
    }

    pub fn annotations(&self) -> Vec<String> {
        self.constraints.iter().map(Constraint::annotation).collect()
    }

    /// Type and constraint imports, deduplicated and sorted.
    pub fn imports(&self) -> Vec<String> {
        let mut imports: Vec<String> = self
            .target_type
            .imports()
            .into_iter()
            .chain(self.constraints.iter().map(Constraint::import))
            .map(str::to_string)
            .collect();
        imports.sort();
        imports.dedup();
        imports
    }

    /// Template context for this field.
    pub fn to_context(&self) -> Value {
        json!({
            "name": self.name,
            "column_name": self.column_name,
            "type": self.type_name(),
            "is_text": self.target_type.is_text(),
            "annotations": self.annotations(),
            "getter": self.getter(),
            "setter": self.setter(),
            "required": self.required,
        })
    }
}

/// Maps schema properties to [`FieldDescriptor`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyMapper;

impl PropertyMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn map(&self, name: &str, def: &PropertyDef, required: bool) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            column_name: camel_to_snake(name),
            target_type: Self::target_type(name, def),
            constraints: Self::constraints(name, def, required),
            required,
        }
    }

    fn target_type(name: &str, def: &PropertyDef) -> TargetType {
        if let Some(reference) = &def.reference {
            return TargetType::Reference(reference.clone());
        }
        match def.type_or_default() {
            "string" => match def.format.as_deref() {
                Some("date-time") => TargetType::Timestamp,
                Some("uuid") => TargetType::Uuid,
                _ => TargetType::Text,
            },
            // Timestamps mistyped as numbers stay text.
            "number" if TIMESTAMP_FIELDS.contains(&name) => TargetType::Text,
            "number" => match def.format.as_deref() {
                Some("double") => TargetType::Double,
                _ => TargetType::Decimal,
            },
            "integer" => match def.format.as_deref() {
                Some("int64") => TargetType::Long,
                _ => TargetType::Integer,
            },
            "boolean" => TargetType::Boolean,
            "array" => {
                let element = match (&def.items_ref, def.items_type.as_deref()) {
                    (Some(reference), _) => TargetType::Reference(reference.clone()),
                    (None, Some("integer")) => TargetType::Integer,
                    (None, Some("number")) => TargetType::Decimal,
                    (None, Some("boolean")) => TargetType::Boolean,
                    _ => TargetType::Text,
                };
                TargetType::ListOf(Box::new(element))
            }
            _ => TargetType::Text,
        }
    }

    fn constraints(name: &str, def: &PropertyDef, required: bool) -> Vec<Constraint> {
        let mut constraints = Vec::new();
        if required {
            constraints.push(Constraint::NotNull);
        }
        if def.min_length.is_some() || def.max_length.is_some() {
            constraints.push(Constraint::Size {
                min: def.min_length,
                max: def.max_length,
            });
        }
        if let Some(pattern) = &def.pattern {
            let regexp = if name.to_lowercase().contains("email") || pattern == EMAIL_PATTERN {
                EMAIL_PATTERN_JAVA.to_string()
            } else {
                java_string_escape(pattern)
            };
            constraints.push(Constraint::Pattern(regexp));
        }
        constraints
    }
}

/// Escape `raw` for use inside a Java string literal.
fn java_string_escape(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}
