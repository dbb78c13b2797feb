#![forbid(unsafe_code)]

//! Template collaborators for tests: an executor that records what it was
//! asked to stamp, and a loader backed by a map.

use ahash::{AHashMap, AHashSet};
use formwork_core::{ExecuteError, Template, TemplateExecutor, TemplateSource};

/// One recorded `execute` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    pub template: String,
    pub source: String,
    pub target: String,
    pub data: serde_json::Value,
}

/// Records every execution. When targets are declared, executing into any
/// other target fails with [`ExecuteError::TargetMissing`]. Templates marked
/// broken fail with [`ExecuteError::Syntax`] and are not recorded.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    executions: Vec<Execution>,
    targets: Option<AHashSet<String>>,
    /// Parse error message per broken template name.
    broken: AHashMap<String, String>,
}

impl RecordingExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept only the listed targets.
    #[must_use]
    pub fn with_targets(targets: &[&str]) -> Self {
        Self {
            targets: Some(targets.iter().map(|t| (*t).to_owned()).collect()),
            ..Self::default()
        }
    }

    /// Fail every execution of `template` as if its body did not parse.
    #[must_use]
    pub fn with_syntax_error(mut self, template: &str, message: &str) -> Self {
        self.broken.insert(template.to_owned(), message.to_owned());
        self
    }

    #[must_use]
    pub fn executions(&self) -> &[Execution] {
        &self.executions
    }

    #[must_use]
    pub fn last(&self) -> Option<&Execution> {
        self.executions.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.executions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.executions.is_empty()
    }
}

impl TemplateExecutor for RecordingExecutor {
    fn execute(
        &mut self,
        template: &Template,
        target: &str,
        data: &serde_json::Value,
    ) -> Result<(), ExecuteError> {
        if let Some(message) = self.broken.get(template.name()) {
            tracing::debug!(template = template.name(), %message, "template refused to parse");
            return Err(ExecuteError::Syntax {
                template: template.name().to_owned(),
                message: message.clone(),
            });
        }
        if self.targets.as_ref().is_some_and(|t| !t.contains(target)) {
            return Err(ExecuteError::TargetMissing {
                target: target.to_owned(),
            });
        }
        tracing::debug!(template = template.name(), target, "recorded execution");
        self.executions.push(Execution {
            template: template.name().to_owned(),
            source: template.source().to_owned(),
            target: target.to_owned(),
            data: data.clone(),
        });
        Ok(())
    }
}

/// Template bodies keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MapLoader {
    templates: AHashMap<String, String>,
}

impl MapLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: &str, source: &str) -> Self {
        self.templates.insert(name.to_owned(), source.to_owned());
        self
    }
}

impl TemplateSource for MapLoader {
    fn load(&self, name: &str) -> Option<String> {
        self.templates.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;

    #[test]
    fn records_executions() {
        let mut exec = RecordingExecutor::new();
        let t = Template::new("edit", "{{.Title}}");
        exec.execute(&t, "#main", &json!({"Title": "x"})).unwrap();
        assert_eq!(exec.len(), 1);
        let last = exec.last().unwrap();
        assert_eq!(last.template, "edit");
        assert_eq!(last.data["Title"], "x");
    }

    #[test]
    #[traced_test]
    fn executions_are_logged() {
        let mut exec = RecordingExecutor::new();
        exec.execute(&Template::new("list", ""), "#grid", &json!([]))
            .unwrap();
        assert!(logs_contain("recorded execution"));
        assert!(logs_contain("#grid"));
    }

    #[test]
    fn declared_targets_are_enforced() {
        let mut exec = RecordingExecutor::with_targets(&["#main"]);
        let t = Template::new("edit", "");
        assert!(exec.execute(&t, "#main", &json!(null)).is_ok());
        assert_eq!(
            exec.execute(&t, "#side", &json!(null)),
            Err(ExecuteError::TargetMissing {
                target: "#side".into()
            })
        );
        assert_eq!(exec.len(), 1);
    }

    #[test]
    #[traced_test]
    fn broken_templates_fail_to_parse() {
        let mut exec = RecordingExecutor::new().with_syntax_error("edit", "unexpected '}}'");
        let err = exec
            .execute(&Template::new("edit", "{{.Title}"), "#main", &json!(null))
            .unwrap_err();
        assert_eq!(
            err,
            ExecuteError::Syntax {
                template: "edit".into(),
                message: "unexpected '}}'".into()
            }
        );
        assert!(exec.is_empty());
        assert!(logs_contain("template refused to parse"));

        exec.execute(&Template::new("list", ""), "#main", &json!(null))
            .unwrap();
        assert_eq!(exec.len(), 1);
    }

    #[test]
    fn loader_resolves_names() {
        let loader = MapLoader::new().with("edit", "body");
        assert_eq!(loader.template("edit").unwrap().source(), "body");
        assert!(loader.template("list").is_err());
    }
}
