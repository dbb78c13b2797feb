#![forbid(unsafe_code)]

//! Projection engine: record → view.
//!
//! Walk order is rows, fields, then for swappers every panel's rows and
//! fields. All swapper panels are projected from the same top-level
//! record, regardless of which one is shown.
//!
//! # Invariants
//!
//! 1. Only `value`, `checked` are written.
//! 2. Fields without a model, `div` fields, and `photo` fields are never
//!    projected (photos are resolved separately, see
//!    [`EditForm::photo_previews`]).
//! 3. A missing record projects nothing and reports nothing.
//! 4. A standalone panel projection ([`Panel::project`],
//!    [`Swapper::project_panel`]) stops at swappers nested in the panel.

use formwork_core::{DisplayHint, Projected, Record, Report, ShapeError, to_display};

use crate::field::{Field, FieldType};
use crate::form::EditForm;
use crate::panel::{Panel, Swapper};
use crate::row::Row;
use crate::ui::UiSink;

fn qualify(prefix: Option<&str>, model: &str) -> String {
    match prefix {
        Some(p) => format!("{p}-{model}"),
        None => model.to_owned(),
    }
}

fn project_field<R: Record>(field: &mut Field, name: &str, record: &R, report: &mut Report) {
    let schema = R::schema();
    let Some(member) = schema.member(&field.model) else {
        report.lookup(
            name,
            format!("{} has no member '{}'", schema.type_name(), field.model),
        );
        return;
    };
    let out = to_display(&member.get(record), DisplayHint::float(field.is_float()));
    if let Some(issue) = &out.issue {
        report.coercion(name, issue);
    }
    match out.value {
        Projected::Text(s) => field.value = s,
        Projected::Checked(b) => field.checked = b,
    }
}

pub(crate) fn project_rows<R: Record>(
    rows: &mut [Row],
    prefix: Option<&str>,
    record: &R,
    report: &mut Report,
) {
    for row in rows {
        for field in row.fields_mut() {
            if field.field_type == FieldType::Swapper {
                if let Some(swapper) = field.swapper.as_mut().filter(|_| prefix.is_none()) {
                    for panel in swapper.panels_mut() {
                        project_rows(panel.rows_mut(), prefix, record, report);
                    }
                }
                continue;
            }
            if field.model.is_empty() || matches!(field.field_type, FieldType::Div | FieldType::Photo)
            {
                continue;
            }
            let name = qualify(prefix, &field.model);
            project_field(field, &name, record, report);
        }
    }
}

impl EditForm {
    /// Fill every projectable field's `value`/`checked` from `record`.
    pub fn project<R: Record>(&mut self, record: Option<&R>) -> Report {
        let mut report = Report::new();
        let Some(record) = record else {
            tracing::debug!(title = %self.title(), "no record to project");
            return report;
        };
        let _span = tracing::debug_span!(
            "project",
            title = %self.title(),
            rows = self.rows().len(),
            record = R::schema().type_name()
        )
        .entered();
        project_rows(self.rows_mut(), None, record, &mut report);
        report
    }
}

impl Panel {
    /// Project only this panel's rows. Diagnostics name fields as
    /// `panel-model`. Swappers nested in the panel are left untouched.
    pub fn project<R: Record>(&mut self, record: Option<&R>) -> Report {
        let mut report = Report::new();
        let Some(record) = record else {
            return report;
        };
        let name = self.name().to_owned();
        project_rows(self.rows_mut(), Some(&name), record, &mut report);
        report
    }

    /// Project, then push text/number/textarea/select values into the live
    /// UI under `panel-model` names.
    pub fn paint<R: Record, S: UiSink + ?Sized>(
        &mut self,
        record: Option<&R>,
        sink: &mut S,
    ) -> Report {
        if record.is_none() {
            return Report::new();
        }
        let mut report = self.project(record);
        for field in self.rows().iter().flat_map(Row::fields) {
            if field.model().is_empty()
                || !matches!(
                    field.field_type(),
                    FieldType::Text | FieldType::Number | FieldType::Textarea | FieldType::Select
                )
            {
                continue;
            }
            let name = self.qualified(field.model());
            if !sink.set_value(&name, field.value()) {
                report.lookup(&name, "no element to paint");
            }
        }
        report
    }
}

impl Swapper {
    /// Project the panel called `panel` on its own, as [`Panel::project`].
    ///
    /// An unknown name reports [`ShapeError::UnknownPanel`], even without a
    /// record.
    pub fn project_panel<R: Record>(&mut self, panel: &str, record: Option<&R>) -> Report {
        let scope = self.name().to_owned();
        match self.panel_mut(panel) {
            Some(found) => found.project(record),
            None => {
                let mut report = Report::new();
                report.shape(&ShapeError::UnknownPanel {
                    scope,
                    panel: panel.to_owned(),
                });
                report
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use formwork_core::{DiagnosticKind, FileField, Schema, record};

    #[derive(Debug, Default)]
    struct Person {
        name: String,
        age: i64,
        rate: f64,
        active: bool,
        born: Option<NaiveDate>,
        score: Option<f64>,
        pic: FileField,
    }

    record!(Person {
        "Name" => name,
        "Age" => age,
        "Rate" => rate,
        "Active" => active,
        "Born" => born,
        "Score" => score,
        "Pic" => pic,
    });

    fn person() -> Person {
        Person {
            name: "Ada".into(),
            age: 36,
            rate: 3.14159,
            active: true,
            born: NaiveDate::from_ymd_opt(2024, 3, 15),
            score: Some(2.5),
            pic: FileField::default(),
        }
    }

    fn form() -> EditForm {
        let mut f = EditForm::new("", "Person");
        f.row(3)
            .add_input(1, "Name", "Name")
            .add_number(1, "Age", "Age", "1")
            .add_decimal(1, "Rate", "Rate", 2, "0.01");
        f.row(3)
            .add_check(1, "Active", "Active")
            .add_date(1, "Born", "Born")
            .add_decimal(1, "Score", "Score", 1, "0.1");
        f.row(2).add_photo(1, "Pic", "Pic").add_custom(1, "", "Name", "x");
        f
    }

    #[test]
    fn projects_scalars() {
        let mut f = form();
        let report = f.project(Some(&person()));
        assert!(report.is_clean(), "{report:?}");
        assert_eq!(f.get_field("Name").unwrap().value(), "Ada");
        assert_eq!(f.get_field("Age").unwrap().value(), "36");
        assert_eq!(f.get_field("Rate").unwrap().value(), "3.14");
        assert!(f.get_field("Active").unwrap().checked());
        assert_eq!(f.get_field("Born").unwrap().value(), "2024-03-15");
        assert_eq!(f.get_field("Score").unwrap().value(), "2.5");
    }

    #[test]
    fn absent_optionals_project_empty() {
        let mut f = form();
        let p = Person {
            born: None,
            score: None,
            ..person()
        };
        let _ = f.project(Some(&p));
        assert_eq!(f.get_field("Born").unwrap().value(), "");
        assert_eq!(f.get_field("Score").unwrap().value(), "");
    }

    #[test]
    fn photo_and_div_are_skipped() {
        let mut f = form();
        let _ = f.project(Some(&person()));
        let row = &f.rows()[2];
        assert_eq!(row.fields()[0].value(), "");
        assert_eq!(row.fields()[1].value(), "");
    }

    #[test]
    fn missing_record_is_a_no_op() {
        let mut f = form();
        let report = f.project::<Person>(None);
        assert!(report.is_clean());
        assert_eq!(f.get_field("Name").unwrap().value(), "");
    }

    #[test]
    fn missing_member_is_a_lookup_diagnostic() {
        let mut f = EditForm::new("", "T");
        f.row(1).add_input(1, "Ghost", "Ghost");
        let report = f.project(Some(&person()));
        assert!(report.has(DiagnosticKind::Lookup));
        assert!(report.mentions("Ghost"));
    }

    #[test]
    fn swapper_panels_project_from_top_level_record() {
        let mut f = EditForm::new("", "T");
        let mut s = Swapper::new("mode");
        s.add_panel("a").row(1).add_input(1, "Name", "Name");
        s.add_panel("b")
            .set_bind_with_form(false)
            .row(1)
            .add_number(1, "Age", "Age", "1");
        f.row(1).add_swapper(1, "Mode", s);
        let _ = f.project(Some(&person()));
        let s = f.swapper("mode").unwrap();
        assert_eq!(s.panels()[0].rows()[0].fields()[0].value(), "Ada");
        assert_eq!(s.panels()[1].rows()[0].fields()[0].value(), "36");
    }

    #[test]
    fn unsupported_member_projects_repr() {
        struct Shape {
            wkt: String,
        }
        impl Record for Shape {
            fn schema() -> &'static Schema<Self> {
                static SCHEMA: std::sync::OnceLock<Schema<Shape>> = std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| {
                    Schema::builder("Shape")
                        .opaque(
                            "Geo",
                            "Geometry",
                            |s: &Shape| s.wkt.clone(),
                            |s: &mut Shape, v: String| {
                                s.wkt = v;
                                Ok(())
                            },
                        )
                        .build()
                        .unwrap()
                })
            }
        }
        let mut f = EditForm::new("", "T");
        f.row(1).add_input(1, "Geo", "Geo");
        let report = f.project(Some(&Shape {
            wkt: "POINT(1 2)".into(),
        }));
        assert_eq!(f.get_field("Geo").unwrap().value(), "POINT(1 2)");
        assert!(report.has(DiagnosticKind::Unsupported));
    }

    #[test]
    fn panel_project_uses_qualified_names() {
        let mut p = Panel::new("extra");
        p.row(1).add_input(1, "Ghost", "Ghost");
        let report = p.project(Some(&person()));
        assert!(report.mentions("extra-Ghost"));
    }

    #[test]
    fn swapper_projects_panel_by_name() {
        let mut s = Swapper::new("mode");
        s.add_panel("a").row(1).add_input(1, "Name", "Name");
        s.add_panel("b").row(1).add_number(1, "Age", "Age", "1");
        let report = s.project_panel("b", Some(&person()));
        assert!(report.is_clean(), "{report:?}");
        assert_eq!(s.panels()[0].rows()[0].fields()[0].value(), "");
        assert_eq!(s.panels()[1].rows()[0].fields()[0].value(), "36");
    }

    #[test]
    fn unknown_panel_projection_is_shape_error() {
        let mut s = Swapper::new("mode");
        s.add_panel("a").row(1).add_input(1, "Name", "Name");
        let report = s.project_panel::<Person>("z", None);
        assert_eq!(report.len(), 1);
        assert!(report.has(DiagnosticKind::Shape));
        assert_eq!(
            report.iter().next().unwrap().message,
            "mode: swapper has no panel named 'z'"
        );
        assert_eq!(s.panels()[0].rows()[0].fields()[0].value(), "");
    }

    #[test]
    fn panel_project_stops_at_nested_swappers() {
        let mut inner = Swapper::new("inner");
        inner.add_panel("deep").row(1).add_input(1, "Ghost", "Ghost");
        let mut outer = Panel::new("outer");
        outer.row(2).add_input(1, "Name", "Name").add_swapper(1, "Inner", inner);

        let report = outer.project(Some(&person()));
        assert!(report.is_clean(), "{report:?}");
        let fields = outer.rows()[0].fields();
        assert_eq!(fields[0].value(), "Ada");
        let deep = &fields[1].swapper().unwrap().panels()[0];
        assert_eq!(deep.rows()[0].fields()[0].value(), "");
    }
}
