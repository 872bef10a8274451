//! Template renderer backed by minijinja.
//!
//! The Java, SQL and project templates are compiled into the binary. An
//! override directory may replace any of them by name (`<name>.j2`); names
//! with no file in that directory keep the embedded source.

use std::path::Path;

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde_json::Value;
use tracing::{debug, instrument};

use hexgen_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    error::{HexgenError, HexgenResult},
};

macro_rules! embedded {
    ($($name:literal),* $(,)?) => {
        &[$(($name, include_str!(concat!("../../templates/", $name, ".j2")))),*]
    };
}

/// `(name, source)` for every template shipped with hexgen.
pub const EMBEDDED_TEMPLATES: &[(&str, &str)] = embedded![
    "dto.java",
    "entity_status.java",
    "domain_model.java",
    "repository_port.java",
    "use_case.java",
    "service.java",
    "mapper.java",
    "dbo.java",
    "repository.java",
    "repository_adapter.java",
    "controller.java",
    "exception.java",
    "global_exception_handler.java",
    "logging_utils.java",
    "application_configuration.java",
    "security_configuration.java",
    "service_test.java",
    "mapper_test.java",
    "controller_test.java",
    "schema.sql",
    "application-test.properties",
    "main_application.java",
    "pom.xml",
    "application.properties",
    "README.md",
    "ci-cd.yml",
    "gitignore",
    "Dockerfile",
    "docker-compose.yml",
];

/// Renders artifacts from named minijinja templates.
///
/// Undefined variables are errors, so a template referring to a key the
/// emitters never provide fails loudly instead of writing empty text.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Renderer over the embedded templates.
    pub fn new() -> HexgenResult<Self> {
        let mut env = base_environment();
        for &(name, source) in EMBEDDED_TEMPLATES {
            env.add_template(name, source)
                .map_err(|e| template_error(name, &e))?;
        }
        Ok(Self { env })
    }

    /// Replace embedded templates with `dir/<name>.j2` where such a file exists.
    #[instrument(skip_all, fields(dir = %dir.display()))]
    pub fn with_override_dir(mut self, dir: &Path) -> HexgenResult<Self> {
        if !dir.is_dir() {
            return Err(HexgenError::Configuration {
                message: format!("template directory {} does not exist", dir.display()),
            });
        }
        for &(name, _) in EMBEDDED_TEMPLATES {
            let path = dir.join(format!("{name}.j2"));
            if !path.is_file() {
                continue;
            }
            let source = std::fs::read_to_string(&path).map_err(|e| {
                ApplicationError::FilesystemError {
                    path: path.clone(),
                    reason: format!("failed to read template: {e}"),
                }
            })?;
            self.env
                .add_template_owned(name.to_string(), source)
                .map_err(|e| template_error(name, &e))?;
            debug!(template = name, path = %path.display(), "template overridden");
        }
        Ok(self)
    }
}

fn base_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    // Generated sources are not HTML; `pom.xml` must keep its markup.
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env
}

fn template_error(template: &str, e: &minijinja::Error) -> HexgenError {
    ApplicationError::TemplateRender {
        template: template.to_string(),
        reason: format!("{e:#}"),
    }
    .into()
}

impl TemplateRenderer for MiniJinjaRenderer {
    #[instrument(skip(self, context))]
    fn render(&self, template: &str, context: &Value) -> HexgenResult<String> {
        let tmpl = self
            .env
            .get_template(template)
            .map_err(|e| template_error(template, &e))?;
        tmpl.render(context).map_err(|e| template_error(template, &e))
    }

    fn has_template(&self, template: &str) -> bool {
        self.env.get_template(template).is_ok()
    }
}
