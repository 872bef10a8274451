//! Naming grammar.
//!
//! Turns schema names and operation ids into entity names, and entity names
//! into the identifiers the generated Java code uses (tables, paths, getters).
//!
//! Entity names come from exactly two schema-name forms:
//!
//! | Rule                                   | Example                         |
//! |----------------------------------------|---------------------------------|
//! | [`NamingRule::GetResponseContent`]     | `GetUserResponseContent` → User |
//! | [`NamingRule::ResponseSuffix`]         | `UserResponse` → User           |
//!
//! Every other shape (other `*ResponseContent` forms, lookup responses such as
//! `GetCitiesByCountryResponseContent`, error payloads) is not an entity.

/// Verb prefixes that appear on operation ids and response schemas.
pub const VERB_PREFIXES: [&str; 5] = ["Create", "Get", "Update", "Delete", "List"];

const RESPONSE_CONTENT: &str = "ResponseContent";
const RESPONSE: &str = "Response";

// ── Schema-name grammar ──────────────────────────────────────────────────────

/// One rule of the schema-name → entity-name grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingRule {
    /// `Get{E}ResponseContent` → `E`.
    GetResponseContent,
    /// `{E}Response` → `E`, stripping one leading verb prefix if present.
    ResponseSuffix,
}

impl NamingRule {
    /// Rules in the order they are tried.
    pub const ALL: [NamingRule; 2] = [NamingRule::GetResponseContent, NamingRule::ResponseSuffix];

    /// Apply this rule alone. Returns `None` when the rule does not match or
    /// the derived name is excluded.
    pub fn apply(&self, schema_name: &str) -> Option<String> {
        let candidate = match self {
            Self::GetResponseContent => {
                let inner = schema_name
                    .strip_prefix("Get")?
                    .strip_suffix(RESPONSE_CONTENT)?;
                if is_lookup_name(inner) {
                    return None;
                }
                inner
            }
            Self::ResponseSuffix => {
                let inner = schema_name.strip_suffix(RESPONSE)?;
                strip_verb_prefix(inner)
            }
        };

        if is_excluded(candidate) {
            None
        } else {
            Some(candidate.to_string())
        }
    }
}

/// Derive the entity name for a schema, trying each rule in order.
pub fn derive_entity_name(schema_name: &str) -> Option<(String, NamingRule)> {
    NamingRule::ALL
        .iter()
        .find_map(|rule| rule.apply(schema_name).map(|name| (name, *rule)))
}

fn strip_verb_prefix(name: &str) -> &str {
    VERB_PREFIXES
        .iter()
        .filter_map(|verb| name.strip_prefix(verb))
        .find(|rest| rest.starts_with(|c: char| c.is_ascii_uppercase()))
        .unwrap_or(name)
}

fn is_excluded(candidate: &str) -> bool {
    candidate.is_empty()
        || candidate.contains("Error")
        || candidate.contains("Content")
        || VERB_PREFIXES.contains(&candidate)
        || !candidate.starts_with(|c: char| c.is_ascii_uppercase())
}

/// `CitiesByCountry` is a lookup; `Bylaw` and `Abbey` are not.
fn is_lookup_name(name: &str) -> bool {
    name.match_indices("By").any(|(idx, _)| {
        idx > 0
            && name[idx + 2..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_uppercase())
    })
}

// ── Complex-operation naming ─────────────────────────────────────────────────

/// `GetRegionsByCountry` → `findRegionsByCountry`.
pub fn finder_method_name(operation_id: &str) -> String {
    let rest = operation_id.strip_prefix("Get").unwrap_or(operation_id);
    format!("find{rest}")
}

/// `GetRegionsByCountry` → `countryId`.
pub fn lookup_parameter_name(operation_id: &str) -> String {
    match operation_id.rfind("By") {
        Some(idx) if idx + 2 < operation_id.len() => {
            format!("{}Id", lower_first(&operation_id[idx + 2..]))
        }
        _ => "id".to_string(),
    }
}

/// `GetRegionsByCountry` → `regions-by-country`.
pub fn lookup_path_segment(operation_id: &str) -> String {
    let rest = operation_id.strip_prefix("Get").unwrap_or(operation_id);
    match rest.rfind("By") {
        Some(idx) if idx > 0 => format!(
            "{}-by-{}",
            camel_to_kebab(&rest[..idx]),
            camel_to_kebab(&rest[idx + 2..])
        ),
        _ => camel_to_kebab(rest),
    }
}

// ── Case helpers ─────────────────────────────────────────────────────────────

/// Split camel/Pascal case into words, keeping acronyms together:
/// `HTTPRequestId` → `["HTTP", "Request", "Id"]`.
fn split_camel(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_ascii_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// `firstName` → `first_name`, `HTTPRequest` → `http_request`.
pub fn camel_to_snake(name: &str) -> String {
    split_camel(name)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// `UserProfiles` → `user-profiles`.
pub fn camel_to_kebab(name: &str) -> String {
    split_camel(name)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Uppercase the first character, leave the rest unchanged.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the first character, leave the rest unchanged.
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `firstName` → `getFirstName`.
pub fn getter_name(field: &str) -> String {
    format!("get{}", capitalize(field))
}

/// `firstName` → `setFirstName`.
pub fn setter_name(field: &str) -> String {
    format!("set{}", capitalize(field))
}

/// English plural used for table names and REST paths.
///
/// The suffix rule applies to the input as given; case is preserved.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lower = word.to_lowercase();

    if let Some(stem) = word.strip_suffix(['y', 'Y']) {
        return format!("{stem}ies");
    }
    if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        return format!("{word}es");
    }
    format!("{word}s")
}
