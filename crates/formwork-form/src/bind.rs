#![forbid(unsafe_code)]

//! Binding engine: view → record.
//!
//! Reads each bindable field back from a [`UiSource`] and writes it into
//! the same-named record member through the coercion matrix.
//!
//! | Field type | UI value | Written as |
//! |------------|----------|------------|
//! | text, textarea | text | text coerced to the member kind |
//! | date | text | strict `YYYY-MM-DD`, invalid input per [`InvalidDatePolicy`] |
//! | number | text | empty → member zero; float or int parse otherwise |
//! | select | selected index | `options[index].key` |
//! | groupselect | selected index | the raw index |
//! | checkbox | checked | boolean |
//! | radio | same-named inputs | first checked input's value as an integer |
//! | photo (upload) | preview + file input | `FileField { data, filename }` |
//! | swapper | - | panels flagged `bind_with_form`, bare names |
//!
//! A standalone panel walk ([`Panel::bind`], [`Swapper::bind_panel`]) reads
//! only the panel's own fields. Swappers nested inside it are not visited.
//!
//! # Invariants
//!
//! 1. Readonly and `div` fields are never read, at any depth.
//! 2. A missing record aborts the walk before any write.
//! 3. A lookup problem skips one field; a coercion problem writes the zero
//!    value; both are reported, neither stops the walk.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Shape | `record` is `None` | Walk aborted, [`DiagnosticKind::Shape`](formwork_core::DiagnosticKind::Shape) |
//! | Shape | Unknown panel name | Nothing bound, [`ShapeError::UnknownPanel`] |
//! | Lookup | No member, no element, index out of range | Field skipped |
//! | Coercion | Unparseable text | Zero written |
//! | Unsupported | No rule for the field or member kind | Field left unbound, logged at `error` |

use formwork_core::{
    DiagnosticKind, DisplayHint, DisplayValue, EngineConfig, InvalidDatePolicy, Member, Record,
    Report, Schema, ShapeError, Value, ValueKind, from_display,
};

use formwork_core::coerce::{parse_float, parse_int};

use crate::field::{Field, FieldType};
use crate::form::EditForm;
use crate::panel::{Panel, Swapper};
use crate::row::Row;
use crate::ui::{PhotoInput, UiSource, UiValue, bare_filename};

/// Knobs of a binding walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindOptions {
    /// Descend into swapper panels flagged `bind_with_form`.
    pub bind_nested: bool,
    pub invalid_date: InvalidDatePolicy,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            bind_nested: true,
            invalid_date: InvalidDatePolicy::default(),
        }
    }
}

impl From<&EngineConfig> for BindOptions {
    fn from(config: &EngineConfig) -> Self {
        Self {
            bind_nested: config.bind_nested,
            invalid_date: config.invalid_date,
        }
    }
}

impl BindOptions {
    #[must_use]
    pub fn nested(mut self, bind_nested: bool) -> Self {
        self.bind_nested = bind_nested;
        self
    }

    #[must_use]
    pub fn invalid_date(mut self, policy: InvalidDatePolicy) -> Self {
        self.invalid_date = policy;
        self
    }
}

/// What a field's UI value turned into before coercion.
enum Input {
    Display(DisplayValue),
    /// Empty number input: the member's zero value, no diagnostic.
    Zero,
}

struct Binder<'a, R: 'static, U: ?Sized> {
    ui: &'a U,
    schema: &'static Schema<R>,
    opts: &'a BindOptions,
    prefix: Option<&'a str>,
    report: Report,
}

impl<R: Record, U: UiSource + ?Sized> Binder<'_, R, U> {
    fn name(&self, model: &str) -> String {
        match self.prefix {
            Some(p) => format!("{p}-{model}"),
            None => model.to_owned(),
        }
    }

    fn rows(&mut self, rows: &[Row], record: &mut R) {
        for field in rows.iter().flat_map(Row::fields) {
            self.field(field, record);
        }
    }

    fn field(&mut self, field: &Field, record: &mut R) {
        if !field.is_bindable() {
            return;
        }
        match field.field_type() {
            FieldType::Swapper => return self.swapper(field, record),
            FieldType::Photo if !field.is_photo_upload() => return,
            FieldType::Button => {
                let name = self.name(field.model());
                self.report.push(
                    DiagnosticKind::Unsupported,
                    &name,
                    "no binding rule for button fields",
                );
                return;
            }
            _ => {}
        }

        let name = self.name(field.model());
        let schema = self.schema;
        let Some(member) = schema.member(field.model()) else {
            self.report.lookup(
                &name,
                format!("{} has no member '{}'", schema.type_name(), field.model()),
            );
            return;
        };
        let Some(ui_value) = self.ui.read(&name, field.field_type()) else {
            self.report.lookup(&name, "no UI element with this name");
            return;
        };

        if field.field_type() == FieldType::Photo {
            match ui_value {
                UiValue::Photo(photo) => self.photo(&name, member, record, photo),
                other => self.unexpected(&name, field, &other),
            }
            return;
        }

        match self.input(field, &name, ui_value) {
            Some(Input::Display(display)) => self.write(field, &name, member, record, &display),
            Some(Input::Zero) => match member.kind().zero_value() {
                Some(zero) => self.store(&name, member, record, zero),
                None => self.report.push(
                    DiagnosticKind::Unsupported,
                    &name,
                    format!("no zero value for {} member", member.kind()),
                ),
            },
            None => {}
        }
    }

    fn swapper(&mut self, field: &Field, record: &mut R) {
        if !self.opts.bind_nested {
            return;
        }
        let Some(swapper) = field.swapper() else {
            return;
        };
        if self.prefix.is_some() {
            tracing::debug!(swapper = swapper.name(), "nested swapper left to its own panel binds");
            return;
        }
        for panel in swapper.panels().iter().filter(|p| p.binds_with_form()) {
            let _span = tracing::debug_span!("bind_nested_panel", panel = %panel.name()).entered();
            let mut nested = Binder {
                ui: self.ui,
                schema: self.schema,
                opts: self.opts,
                prefix: None,
                report: Report::new(),
            };
            nested.rows(panel.rows(), record);
            self.report.merge(nested.report);
        }
    }

    fn input(&mut self, field: &Field, name: &str, ui_value: UiValue) -> Option<Input> {
        let display = match (field.field_type(), ui_value) {
            (FieldType::Text | FieldType::Textarea, UiValue::Text(s)) => DisplayValue::Text(s),
            (FieldType::Date, UiValue::Text(s)) => DisplayValue::Date(s),
            (FieldType::Checkbox, UiValue::Checked(b)) => DisplayValue::Bool(b),
            (FieldType::Select, UiValue::SelectedIndex(Some(i))) => match field.options().get(i) {
                Some(option) => DisplayValue::Int(option.key),
                None => {
                    self.report.lookup(
                        name,
                        format!(
                            "selected index {i} outside {} options",
                            field.options().len()
                        ),
                    );
                    return None;
                }
            },
            (FieldType::GroupSelect, UiValue::SelectedIndex(Some(i))) => {
                DisplayValue::Int(i64::try_from(i).unwrap_or(i64::MAX))
            }
            (FieldType::Select | FieldType::GroupSelect, UiValue::SelectedIndex(None)) => {
                self.report.lookup(name, "nothing selected");
                return None;
            }
            (FieldType::Radio, UiValue::Group(inputs)) => {
                let Some(checked) = inputs.into_iter().find(|r| r.checked) else {
                    tracing::debug!(field = name, "no radio input checked");
                    return None;
                };
                match parse_int(&checked.value) {
                    Ok(v) => DisplayValue::Int(v),
                    Err(e) => {
                        self.report.coercion(name, &e);
                        DisplayValue::Int(0)
                    }
                }
            }
            (FieldType::Number, UiValue::Text(s)) if s.trim().is_empty() => return Some(Input::Zero),
            (FieldType::Number, UiValue::Text(s)) if field.is_float() => {
                match parse_float(&s) {
                    Ok(v) => DisplayValue::Float(v),
                    Err(e) => {
                        self.report.coercion(name, &e);
                        DisplayValue::Float(0.0)
                    }
                }
            }
            (FieldType::Number, UiValue::Text(s)) => match parse_int(&s) {
                Ok(v) => DisplayValue::Int(v),
                Err(e) => {
                    self.report.coercion(name, &e);
                    DisplayValue::Int(0)
                }
            },
            (_, other) => {
                self.unexpected(name, field, &other);
                return None;
            }
        };
        Some(Input::Display(display))
    }

    fn write(
        &mut self,
        field: &Field,
        name: &str,
        member: &Member<R>,
        record: &mut R,
        display: &DisplayValue,
    ) {
        let coerced = from_display(display, member.kind(), DisplayHint::float(field.is_float()));
        if let Some(issue) = &coerced.issue {
            self.report.coercion(name, issue);
            if issue.is_defect() && member.kind() != ValueKind::Unsupported {
                return;
            }
        }
        let value = if field.field_type() == FieldType::Date {
            match self.opts.invalid_date.resolve(&coerced) {
                Some(v) => v,
                None => return,
            }
        } else {
            coerced.value
        };
        self.store(name, member, record, value);
    }

    fn photo(&mut self, name: &str, member: &Member<R>, record: &mut R, photo: PhotoInput) {
        let mut file = match member.get(record) {
            Value::File(f) => f,
            other => {
                self.report.push(
                    DiagnosticKind::Unsupported,
                    name,
                    format!("photo field needs a file member, found {}", other.kind()),
                );
                return;
            }
        };
        file.filename = bare_filename(&photo.input_value).to_owned();
        file.data = photo.preview_src;
        self.store(name, member, record, Value::File(file));
    }

    fn store(&mut self, name: &str, member: &Member<R>, record: &mut R, value: Value) {
        if let Err(e) = member.set(record, value) {
            self.report.member(name, &e);
        }
    }

    fn unexpected(&mut self, name: &str, field: &Field, value: &UiValue) {
        self.report.lookup(
            name,
            format!(
                "unexpected {} value for {} field",
                value.variant_name(),
                field.field_type()
            ),
        );
    }
}

fn walk<R: Record, U: UiSource + ?Sized>(
    scope: &str,
    rows: &[Row],
    prefix: Option<&str>,
    ui: &U,
    record: Option<&mut R>,
    opts: &BindOptions,
) -> Report {
    let mut binder = Binder {
        ui,
        schema: R::schema(),
        opts,
        prefix,
        report: Report::new(),
    };
    let Some(record) = record else {
        binder.report.shape(&ShapeError::MissingRecord {
            scope: scope.to_owned(),
        });
        return binder.report;
    };
    binder.rows(rows, record);
    binder.report
}

impl EditForm {
    /// Read the whole form back into `record` with default options.
    pub fn bind<R: Record, U: UiSource + ?Sized>(&self, ui: &U, record: Option<&mut R>) -> Report {
        self.bind_with(ui, record, &BindOptions::default())
    }

    /// As [`EditForm::bind`], descending into swapper panels only when
    /// `all` is set.
    pub fn bind_part<R: Record, U: UiSource + ?Sized>(
        &self,
        ui: &U,
        record: Option<&mut R>,
        all: bool,
    ) -> Report {
        self.bind_with(ui, record, &BindOptions::default().nested(all))
    }

    pub fn bind_with<R: Record, U: UiSource + ?Sized>(
        &self,
        ui: &U,
        record: Option<&mut R>,
        opts: &BindOptions,
    ) -> Report {
        let _span = tracing::debug_span!(
            "bind",
            title = %self.title(),
            rows = self.rows().len(),
            nested = opts.bind_nested
        )
        .entered();
        walk(self.title(), self.rows(), None, ui, record, opts)
    }
}

impl Panel {
    /// Read only this panel back into `record`, using `panel-model` names.
    /// Ignores `bind_with_form`. Swappers nested in the panel are skipped.
    pub fn bind<R: Record, U: UiSource + ?Sized>(
        &self,
        ui: &U,
        record: Option<&mut R>,
        opts: &BindOptions,
    ) -> Report {
        let _span = tracing::debug_span!("bind_panel", panel = %self.name()).entered();
        walk(self.name(), self.rows(), Some(self.name()), ui, record, opts)
    }
}

impl Swapper {
    /// Bind the panel called `panel` on its own, as [`Panel::bind`].
    ///
    /// An unknown name binds nothing and reports
    /// [`ShapeError::UnknownPanel`].
    pub fn bind_panel<R: Record, U: UiSource + ?Sized>(
        &self,
        panel: &str,
        ui: &U,
        record: Option<&mut R>,
        opts: &BindOptions,
    ) -> Report {
        match self.panel(panel) {
            Some(found) => found.bind(ui, record, opts),
            None => {
                let mut report = Report::new();
                report.shape(&ShapeError::UnknownPanel {
                    scope: self.name().to_owned(),
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
    use crate::ui::RadioInput;
    use chrono::NaiveDate;
    use formwork_core::{FileField, record};
    use std::collections::HashMap;
    use tracing_test::traced_test;

    #[derive(Default)]
    struct Ui(HashMap<String, UiValue>);

    impl Ui {
        fn with(mut self, name: &str, v: UiValue) -> Self {
            self.0.insert(name.to_owned(), v);
            self
        }
        fn text(self, name: &str, v: &str) -> Self {
            self.with(name, UiValue::Text(v.to_owned()))
        }
    }

    impl UiSource for Ui {
        fn read(&self, name: &str, _: FieldType) -> Option<UiValue> {
            self.0.get(name).cloned()
        }
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Order {
        name: String,
        qty: i64,
        price: f64,
        rush: bool,
        due: Option<NaiveDate>,
        colour: i64,
        size: i64,
        shipping: i64,
        discount: Option<f64>,
        scan: FileField,
        note: String,
    }

    record!(Order {
        "Name" => name,
        "Qty" => qty,
        "Price" => price,
        "Rush" => rush,
        "Due" => due,
        "Colour" => colour,
        "Size" => size,
        "Shipping" => shipping,
        "Discount" => discount,
        "Scan" => scan,
        "Note" => note,
    });

    fn form() -> EditForm {
        let colours = serde_json::json!([{"ID": 3, "Name": "Red"}, {"ID": 8, "Name": "Blue"}]);
        let ships = serde_json::json!([{"ID": 1, "Name": "Post"}, {"ID": 2, "Name": "Courier"}]);
        let mut f = EditForm::new("", "Order");
        f.row(3)
            .add_input(1, "Name", "Name")
            .add_number(1, "Qty", "Qty", "1")
            .add_decimal(1, "Price", "Price", 2, "0.01");
        f.row(3)
            .add_check(1, "Rush", "Rush")
            .add_date(1, "Due", "Due")
            .add_select(1, "Colour", "Colour", &colours, "ID", "Name", 0, 0);
        f.row(3)
            .add_grouped_select(1, "Size", "Size", Vec::new(), 0)
            .add_radio(1, "Ship", "Shipping", &ships, "ID", "Name", 1)
            .add_decimal(1, "Discount", "Discount", 2, "0.01");
        f.row(2)
            .add_photo(1, "Scan", "Scan")
            .add_display(1, "Note", "Note");
        f
    }

    fn ui() -> Ui {
        Ui::default()
            .text("Name", "Widget")
            .text("Qty", "12")
            .text("Price", "9.995")
            .with("Rush", UiValue::Checked(true))
            .text("Due", "2024-03-15")
            .with("Colour", UiValue::SelectedIndex(Some(2)))
            .with("Size", UiValue::SelectedIndex(Some(4)))
            .with(
                "Shipping",
                UiValue::Group(vec![RadioInput::new("1", false), RadioInput::new("2", true)]),
            )
            .text("Discount", "")
            .with(
                "Scan",
                UiValue::Photo(PhotoInput {
                    preview_src: "data:image/png;base64,AAAA".into(),
                    input_value: "C:\\fakepath\\scan.png".into(),
                }),
            )
            .text("Note", "must not be read")
    }

    #[test]
    fn binds_every_kind() {
        let mut order = Order {
            discount: Some(1.0),
            ..Default::default()
        };
        let report = form().bind(&ui(), Some(&mut order));
        assert!(report.is_clean(), "{report:?}");
        assert_eq!(order.name, "Widget");
        assert_eq!(order.qty, 12);
        assert_eq!(order.price, 9.995);
        assert!(order.rush);
        assert_eq!(order.due, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(order.colour, 8);
        assert_eq!(order.size, 4);
        assert_eq!(order.shipping, 2);
        assert_eq!(order.discount, None);
        assert_eq!(order.scan.filename, "scan.png");
        assert_eq!(order.scan.data, "data:image/png;base64,AAAA");
        assert_eq!(order.note, "");
    }

    #[test]
    fn select_blank_binds_zero() {
        let mut order = Order {
            colour: 5,
            ..Default::default()
        };
        let ui = ui().with("Colour", UiValue::SelectedIndex(Some(0)));
        let _ = form().bind(&ui, Some(&mut order));
        assert_eq!(order.colour, 0);
    }

    #[test]
    fn missing_record_is_shape_error() {
        let report = form().bind::<Order, _>(&ui(), None);
        assert_eq!(report.len(), 1);
        assert!(report.has(DiagnosticKind::Shape));
    }

    #[test]
    fn invalid_number_writes_zero_and_reports() {
        let mut order = Order {
            qty: 4,
            ..Default::default()
        };
        let ui = ui().text("Qty", "twelve");
        let report = form().bind(&ui, Some(&mut order));
        assert_eq!(order.qty, 0);
        assert_eq!(report.of_kind(DiagnosticKind::Coercion).count(), 1);
        assert!(report.mentions("Qty"));
    }

    #[test]
    fn empty_number_is_zero_without_error() {
        let mut order = Order {
            qty: 4,
            ..Default::default()
        };
        let ui = ui().text("Qty", "");
        let report = form().bind(&ui, Some(&mut order));
        assert_eq!(order.qty, 0);
        assert!(report.is_clean());
    }

    #[test]
    fn invalid_date_follows_policy() {
        let ui = ui().text("Due", "15/03/2024");

        let mut order = Order::default();
        let report = form().bind(&ui, Some(&mut order));
        assert_eq!(order.due, NaiveDate::from_ymd_opt(1, 1, 1));
        assert!(report.has(DiagnosticKind::Coercion));

        let keep = NaiveDate::from_ymd_opt(2020, 1, 1);
        let mut order = Order {
            due: keep,
            ..Default::default()
        };
        let opts = BindOptions::default().invalid_date(InvalidDatePolicy::Skip);
        let _ = form().bind_with(&ui, Some(&mut order), &opts);
        assert_eq!(order.due, keep);

        let opts = BindOptions::default().invalid_date(InvalidDatePolicy::StoreNone);
        let _ = form().bind_with(&ui, Some(&mut order), &opts);
        assert_eq!(order.due, None);
    }

    #[test]
    fn out_of_range_select_is_skipped() {
        let mut order = Order {
            colour: 5,
            ..Default::default()
        };
        let ui = ui().with("Colour", UiValue::SelectedIndex(Some(7)));
        let report = form().bind(&ui, Some(&mut order));
        assert_eq!(order.colour, 5);
        assert!(report.has(DiagnosticKind::Lookup));
    }

    #[test]
    fn missing_element_is_lookup() {
        let mut order = Order::default();
        let mut ui = ui();
        ui.0.remove("Name");
        let report = form().bind(&ui, Some(&mut order));
        assert!(report.mentions("Name"));
        assert_eq!(order.name, "");
        assert_eq!(order.qty, 12);
    }

    #[test]
    #[traced_test]
    fn no_radio_checked_leaves_member() {
        let mut order = Order {
            shipping: 9,
            ..Default::default()
        };
        let ui = ui().with("Shipping", UiValue::Group(vec![RadioInput::new("1", false)]));
        let _ = form().bind(&ui, Some(&mut order));
        assert_eq!(order.shipping, 9);
        assert!(logs_contain("no radio input checked"));
    }

    fn nested_form() -> EditForm {
        let mut f = EditForm::new("", "Nested");
        let mut s = Swapper::new("mode");
        s.add_panel("main").row(1).add_input(1, "Name", "Name");
        s.add_panel("side")
            .set_bind_with_form(false)
            .row(1)
            .add_number(1, "Qty", "Qty", "1");
        s.add_panel("ro").row(1).add_display(1, "Note", "Note");
        f.row(1).add_swapper(1, "Mode", s);
        f
    }

    #[test]
    fn nested_bind_respects_bind_with_form() {
        let ui = Ui::default()
            .text("Name", "inner")
            .text("Qty", "3")
            .text("Note", "x");
        let mut order = Order::default();
        let report = nested_form().bind(&ui, Some(&mut order));
        assert!(report.is_clean(), "{report:?}");
        assert_eq!(order.name, "inner");
        assert_eq!(order.qty, 0);
        assert_eq!(order.note, "");

        let mut order = Order::default();
        let _ = nested_form().bind_part(&ui, Some(&mut order), false);
        assert_eq!(order.name, "");
    }

    #[test]
    fn standalone_panel_bind_uses_qualified_names() {
        let f = nested_form();
        let side = f.swapper("mode").unwrap().panel("side").unwrap();
        let ui = Ui::default().text("side-Qty", "41").text("Qty", "1");
        let mut order = Order::default();
        let report = side.bind(&ui, Some(&mut order), &BindOptions::default());
        assert!(report.is_clean());
        assert_eq!(order.qty, 41);
    }

    #[test]
    fn swapper_binds_panel_by_name() {
        let f = nested_form();
        let mode = f.swapper("mode").unwrap();
        let ui = Ui::default().text("side-Qty", "7");
        let mut order = Order::default();
        let report = mode.bind_panel("side", &ui, Some(&mut order), &BindOptions::default());
        assert!(report.is_clean(), "{report:?}");
        assert_eq!(order.qty, 7);
    }

    #[test]
    fn unknown_panel_name_is_shape_error() {
        let f = nested_form();
        let mode = f.swapper("mode").unwrap();
        let ui = Ui::default().text("Qty", "7").text("extra-Qty", "7");
        let mut order = Order::default();
        let report = mode.bind_panel("extra", &ui, Some(&mut order), &BindOptions::default());
        assert_eq!(report.len(), 1);
        assert!(report.has(DiagnosticKind::Shape));
        let message = &report.iter().next().unwrap().message;
        assert_eq!(message, "mode: swapper has no panel named 'extra'");
        assert_eq!(order, Order::default());
    }

    #[test]
    fn nested_panel_diagnostics_follow_outer_fields() {
        let mut f = EditForm::new("", "Nested");
        f.row(1).add_number(1, "Qty", "Qty", "1");
        let mut s = Swapper::new("mode");
        s.add_panel("main").row(1).add_input(1, "Ghost", "Ghost");
        s.add_panel("more").row(1).add_number(1, "Size", "Size", "1");
        f.row(1).add_swapper(1, "Mode", s);
        f.row(1).add_input(1, "Name", "Name");

        let ui = Ui::default().text("Qty", "x").text("Size", "y").text("Name", "ok");
        let mut order = Order::default();
        let report = f.bind(&ui, Some(&mut order));
        let fields: Vec<&str> = report.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, ["Qty", "Ghost", "Size"]);
        assert_eq!(order.name, "ok");
    }

    #[test]
    #[traced_test]
    fn panel_bind_does_not_enter_nested_swappers() {
        let mut outer = Panel::new("outer");
        let mut inner = Swapper::new("inner");
        inner.add_panel("deep").row(1).add_input(1, "Name", "Name");
        outer.row(2).add_number(1, "Qty", "Qty", "1").add_swapper(1, "Inner", inner);

        let ui = Ui::default()
            .text("outer-Qty", "5")
            .text("outer-Name", "wrong")
            .text("Name", "wrong");
        let mut order = Order::default();
        let report = outer.bind(&ui, Some(&mut order), &BindOptions::default());
        assert!(report.is_clean(), "{report:?}");
        assert_eq!(order.qty, 5);
        assert_eq!(order.name, "");
        assert!(logs_contain("nested swapper left to its own panel binds"));
    }

    #[test]
    fn unexpected_ui_value_is_lookup() {
        let mut order = Order::default();
        let ui = ui().with("Rush", UiValue::Text("yes".into()));
        let report = form().bind(&ui, Some(&mut order));
        assert!(!order.rush);
        assert!(report.mentions("Rush"));
    }

    #[test]
    fn text_into_typed_mismatch_is_defect_without_write() {
        let mut f = EditForm::new("", "T");
        f.row(1).add_date(1, "Qty", "Qty");
        let mut order = Order {
            qty: 2,
            ..Default::default()
        };
        let ui = Ui::default().text("Qty", "2024-01-01");
        let report = f.bind(&ui, Some(&mut order));
        assert_eq!(order.qty, 2);
        assert!(report.has(DiagnosticKind::Unsupported));
    }
}
