#![forbid(unsafe_code)]

//! Non-fatal outcome collection for the projection and binding walks.
//!
//! Nothing the engines do is fatal. Every problem becomes a [`Diagnostic`]
//! pushed onto a [`Report`], and is logged at the moment it is pushed.
//!
//! # Failure Modes
//!
//! | Kind | Cause | Walk behavior | Log level |
//! |------|-------|---------------|-----------|
//! | [`DiagnosticKind::Shape`] | Missing or mis-shaped record | Aborted, no writes | `warn` |
//! | [`DiagnosticKind::Lookup`] | No member / no UI element for a field | Field skipped | `warn` |
//! | [`DiagnosticKind::Coercion`] | Unparseable input | Zero written | `warn` |
//! | [`DiagnosticKind::Unsupported`] | Kind outside the coercion matrix | Fallback written | `error` |

use core::fmt;

use crate::coerce::CoerceError;
use crate::record::MemberError;

/// The record handed to a walk cannot be walked at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("{scope}: no record to bind into")]
    MissingRecord { scope: String },
    #[error("{scope}: swapper has no panel named '{panel}'")]
    UnknownPanel { scope: String, panel: String },
}

/// Diagnostic taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    Shape,
    Lookup,
    Coercion,
    Unsupported,
}

impl DiagnosticKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shape => "shape",
            Self::Lookup => "lookup",
            Self::Coercion => "coercion",
            Self::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single non-fatal outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// UI name of the field involved (empty for whole-walk problems).
    pub field: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "[{}] {}", self.kind, self.message)
        } else {
            write!(f, "[{}] {}: {}", self.kind, self.field, self.message)
        }
    }
}

/// Accumulated diagnostics of one walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and log it.
    pub fn push(&mut self, kind: DiagnosticKind, field: &str, message: impl Into<String>) {
        let message = message.into();
        match kind {
            DiagnosticKind::Unsupported => {
                tracing::error!(kind = kind.as_str(), field, %message, "unsupported kind");
            }
            _ => tracing::warn!(kind = kind.as_str(), field, %message, "form diagnostic"),
        }
        self.diagnostics.push(Diagnostic {
            kind,
            field: field.to_owned(),
            message,
        });
    }

    pub fn shape(&mut self, error: &ShapeError) {
        self.push(DiagnosticKind::Shape, "", error.to_string());
    }

    pub fn lookup(&mut self, field: &str, message: impl Into<String>) {
        self.push(DiagnosticKind::Lookup, field, message);
    }

    /// Classify a member error: kind mismatches of unsupported members are
    /// defects, the rest are lookup problems.
    pub fn member(&mut self, field: &str, error: &MemberError) {
        let kind = match error {
            MemberError::KindMismatch { .. } => DiagnosticKind::Unsupported,
            _ => DiagnosticKind::Lookup,
        };
        self.push(kind, field, error.to_string());
    }

    /// Record a coercion issue, routing defects to `Unsupported`.
    pub fn coercion(&mut self, field: &str, error: &CoerceError) {
        let kind = if error.is_defect() {
            DiagnosticKind::Unsupported
        } else {
            DiagnosticKind::Coercion
        };
        self.push(kind, field, error.to_string());
    }

    /// Append another report's diagnostics (already logged).
    pub fn merge(&mut self, other: Report) {
        self.diagnostics.extend(other.diagnostics);
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    #[must_use]
    pub fn has(&self, kind: DiagnosticKind) -> bool {
        self.diagnostics.iter().any(|d| d.kind == kind)
    }

    /// Whether any diagnostic concerns `field`.
    #[must_use]
    pub fn mentions(&self, field: &str) -> bool {
        self.diagnostics.iter().any(|d| d.field == field)
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn push_logs_warning() {
        let mut report = Report::new();
        report.lookup("Name", "no such member");
        assert_eq!(report.len(), 1);
        assert!(report.has(DiagnosticKind::Lookup));
        assert!(logs_contain("form diagnostic"));
    }

    #[test]
    #[traced_test]
    fn defects_are_logged_as_errors() {
        let mut report = Report::new();
        report.coercion(
            "Shape",
            &CoerceError::UnsupportedTarget {
                from: "text",
                target: ValueKind::Unsupported,
            },
        );
        assert!(report.has(DiagnosticKind::Unsupported));
        assert!(logs_contain("unsupported kind"));
    }

    #[test]
    fn parse_issue_is_coercion() {
        let mut report = Report::new();
        report.coercion(
            "Age",
            &CoerceError::Parse {
                input: "x".into(),
                target: ValueKind::Int,
                reason: "invalid digit".into(),
            },
        );
        assert_eq!(report.of_kind(DiagnosticKind::Coercion).count(), 1);
        assert!(report.mentions("Age"));
    }

    #[test]
    fn shape_has_no_field() {
        let mut report = Report::new();
        report.shape(&ShapeError::MissingRecord {
            scope: "Edit".into(),
        });
        let d = report.iter().next().unwrap();
        assert_eq!(d.field, "");
        assert_eq!(d.to_string(), "[shape] Edit: no record to bind into");
    }

    #[test]
    fn merge_keeps_order() {
        let mut a = Report::new();
        a.lookup("A", "x");
        let mut b = Report::new();
        b.lookup("B", "y");
        a.merge(b);
        let fields: Vec<_> = a.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, ["A", "B"]);
    }
}
