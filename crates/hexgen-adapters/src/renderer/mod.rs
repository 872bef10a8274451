//! Template renderer adapters.

mod jinja;

pub use jinja::{EMBEDDED_TEMPLATES, MiniJinjaRenderer};
