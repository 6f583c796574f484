//! Tera template registry backed by embedded templates

use std::collections::HashMap;
use std::error::Error as _;
use std::path::Path;

use rust_embed::RustEmbed;
use serde::Serialize;
use tera::{Context, Tera, Value};
use tracing::debug;

use super::ArtifactKind;
use crate::core::error::{Error, Result};
use crate::core::utils::{to_camel_case, to_command_name, to_pascal_case, to_snake_case};

/// Templates embedded at compile time
#[derive(RustEmbed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

/// Templates for one generation run
pub struct TemplateRegistry {
    tera: Tera,
}

impl TemplateRegistry {
    /// Registry holding only the embedded templates
    pub fn embedded() -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        register_filters(&mut tera);

        for kind in ArtifactKind::ALL {
            let id = kind.template_id();
            let file = EmbeddedTemplates::get(id)
                .ok_or_else(|| Error::template(format!("missing embedded template {id}")))?;
            let content = std::str::from_utf8(file.data.as_ref())
                .map_err(|e| Error::template(format!("{id} is not valid UTF-8: {e}")))?;
            tera.add_raw_template(id, content)?;
        }

        Ok(Self { tera })
    }

    /// Embedded templates, replaced by any same-named file under `template_dir`
    pub async fn load(template_dir: Option<&Path>) -> Result<Self> {
        let mut registry = Self::embedded()?;
        let Some(dir) = template_dir else {
            return Ok(registry);
        };

        for kind in ArtifactKind::ALL {
            let path = dir.join(kind.template_id());
            if !tokio::fs::try_exists(&path).await? {
                continue;
            }
            let content = tokio::fs::read_to_string(&path).await?;
            registry.tera.add_raw_template(kind.template_id(), &content)?;
            debug!(
                template = kind.template_id(),
                path = %path.display(),
                "using template override"
            );
        }

        Ok(registry)
    }

    /// Render the template of `kind` with `model` as context
    pub fn render<T: Serialize>(&self, kind: ArtifactKind, model: &T) -> Result<Vec<u8>> {
        let id = kind.template_id();
        let context = Context::from_serialize(model)
            .map_err(|e| Error::template(format!("{id}: {}", error_chain(&e))))?;
        let rendered = self
            .tera
            .render(id, &context)
            .map_err(|e| Error::template(format!("{id}: {}", error_chain(&e))))?;
        debug!(template = id, bytes = rendered.len(), "rendered template");
        Ok(rendered.into_bytes())
    }
}

fn register_filters(tera: &mut Tera) {
    tera.register_filter("snake_case", case_filter(to_snake_case));
    tera.register_filter("pascal_case", case_filter(to_pascal_case));
    tera.register_filter("camel_case", case_filter(to_camel_case));
    tera.register_filter("command_name", case_filter(to_command_name));
}

/// Wrap an identifier helper as a string-only tera filter
fn case_filter(
    convert: fn(&str) -> String,
) -> impl Fn(&Value, &HashMap<String, Value>) -> tera::Result<Value> + Send + Sync {
    move |value: &Value, _: &HashMap<String, Value>| match value.as_str() {
        Some(s) => Ok(Value::String(convert(s))),
        None => Err(tera::Error::msg(format!(
            "case filters expect a string, got {value}"
        ))),
    }
}

/// Tera reports the useful detail in nested sources
fn error_chain(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
