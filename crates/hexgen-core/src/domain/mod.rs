// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for hexgen.
//!
//! Pure naming and modelling rules: how specs become entities, where each
//! artifact lives, which Java types and annotations a property maps to.
//! All I/O and templating happen behind the ports in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Deterministic**: ordered collections only, no clocks or randomness
//! - **Immutable inputs**: spec types are built once and only read afterwards
//!
pub mod artifact;
pub mod error;
pub mod model;
pub mod naming;
pub mod packages;
pub mod property;
pub mod settings;
pub mod spec;

pub use artifact::{ArtifactKind, ArtifactLocator, GeneratedArtifact, GenerationLedger, Layer};
pub use error::{DomainError, ErrorCategory};
pub use model::{ComplexOperation, CrudVerb, EntityModel};
pub use naming::{NamingRule, derive_entity_name, pluralize};
pub use packages::{LayerKey, PackageMap};
pub use property::{Constraint, FieldDescriptor, PropertyMapper, TargetType};
pub use settings::{
    DatabaseKind, DatabaseSettings, PathSettings, ProjectInfo, ProjectSettings, RelationshipRule,
    RelationshipTable,
};
pub use spec::{HttpMethod, Operation, PropertyDef, SchemaDef, ServiceSpec};
