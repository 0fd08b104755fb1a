//! Template rendering with named `{{ placeholder }}` substitution.
//!
//! Templates are looked up by name as `{dir}/{name}.html` when a directory is configured,
//! falling back to the built-in `layout`, `page` and `index` templates. Values are
//! inserted verbatim: they are already markup, so auto-escaping is off.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use tracing::debug;

use crate::contract::{TemplateRenderer, TemplateValues};
use crate::error::TemplateError;

const LAYOUT: &str = include_str!("../templates/layout.html");
const PAGE: &str = include_str!("../templates/page.html");
const INDEX: &str = include_str!("../templates/index.html");

#[derive(Debug, Clone, Default)]
pub struct MiniJinjaTemplates {
    dir: Option<PathBuf>,
}

impl MiniJinjaTemplates {
    /// Only the built-in templates.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Templates from `dir`, with built-ins for names the directory lacks.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    fn source(&self, name: &str) -> Result<Cow<'static, str>, TemplateError> {
        if let Some(dir) = &self.dir {
            let path = dir.join(format!("{name}.html"));
            if path.is_file() {
                debug!(template = name, path = %path.display(), "Loading template from disk");
                return std::fs::read_to_string(&path)
                    .map(Cow::Owned)
                    .map_err(|source| TemplateError::Io { path, source });
            }
        }

        match name {
            "layout" => Ok(Cow::Borrowed(LAYOUT)),
            "page" => Ok(Cow::Borrowed(PAGE)),
            "index" => Ok(Cow::Borrowed(INDEX)),
            _ => Err(TemplateError::NotFound(name.to_string())),
        }
    }
}

impl TemplateRenderer for MiniJinjaTemplates {
    fn render(&self, name: &str, values: &TemplateValues) -> Result<String, TemplateError> {
        let source = self.source(name)?;

        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        env.render_str(&source, values)
            .map_err(|source| TemplateError::Render {
                name: name.to_string(),
                source,
            })
    }
}
