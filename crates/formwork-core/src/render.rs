#![forbid(unsafe_code)]

//! Template execution collaborator boundary.
//!
//! The engines never stamp templates themselves. They hand a [`Template`],
//! a target location, and serialized view data to a [`TemplateExecutor`]
//! supplied by the host. Named templates are fetched through a
//! [`TemplateSource`].

use std::fmt;

/// A named template body in the host's template syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    source: String,
}

impl Template {
    #[must_use]
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "template '{}' ({} bytes)", self.name, self.source.len())
    }
}

/// Failure reported by the host's template engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error("template '{template}' does not parse: {message}")]
    Syntax { template: String, message: String },
    #[error("no render target matches '{target}'")]
    TargetMissing { target: String },
    #[error("template execution failed: {0}")]
    Failed(String),
}

/// Errors from the render entry points of the form and grid views.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no template named '{name}'")]
    TemplateNotFound { name: String },
    #[error("cannot serialize view data: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Execute(#[from] ExecuteError),
}

/// Stamps a template into a UI subtree.
pub trait TemplateExecutor {
    fn execute(
        &mut self,
        template: &Template,
        target: &str,
        data: &serde_json::Value,
    ) -> Result<(), ExecuteError>;
}

impl<E: TemplateExecutor + ?Sized> TemplateExecutor for &mut E {
    fn execute(
        &mut self,
        template: &Template,
        target: &str,
        data: &serde_json::Value,
    ) -> Result<(), ExecuteError> {
        (**self).execute(template, target, data)
    }
}

/// Looks up template bodies by name.
pub trait TemplateSource {
    fn load(&self, name: &str) -> Option<String>;

    /// Load `name` as a [`Template`], or report it missing.
    fn template(&self, name: &str) -> Result<Template, RenderError> {
        self.load(name)
            .map(|source| Template::new(name, source))
            .ok_or_else(|| RenderError::TemplateNotFound {
                name: name.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct One;

    impl TemplateSource for One {
        fn load(&self, name: &str) -> Option<String> {
            (name == "edit").then(|| "{{.Title}}".to_owned())
        }
    }

    #[test]
    fn source_resolves_templates() {
        let t = One.template("edit").unwrap();
        assert_eq!(t.name(), "edit");
        assert_eq!(t.source(), "{{.Title}}");
        assert!(matches!(
            One.template("list"),
            Err(RenderError::TemplateNotFound { .. })
        ));
    }

    #[test]
    fn display_names_template() {
        let t = Template::new("row", "abc");
        assert_eq!(t.to_string(), "template 'row' (3 bytes)");
    }
}
