#![forbid(unsafe_code)]

//! Rows and the append-only field builders.
//!
//! Every `add_*` call appends one field and returns the row, so a form is
//! described as a chain:
//!
//! ```
//! use formwork_form::EditForm;
//!
//! let mut form = EditForm::new("fa-user", "Person");
//! form.row(2)
//!     .add_input(1, "Name", "Name")
//!     .add_date(1, "Born", "Born");
//! form.row(1).add_textarea(1, "Notes", "Notes");
//! assert_eq!(form.rows().len(), 2);
//! ```
//!
//! # Invariants
//!
//! 1. Spans are at least one.
//! 2. `display`-flavoured builders produce readonly fields.
//! 3. Two fields of one row binding the same model is reported as a warning
//!    at build time; binding would write the member twice.

use crate::field::{EditOption, Field, FieldFlags, FieldType, SelectGroup};
use crate::options::{OptionSource, build_options};
use crate::panel::Swapper;

/// An ordered run of fields sharing a span.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    span: u16,
    fields: Vec<Field>,
}

impl Row {
    #[must_use]
    pub fn new(span: u16) -> Self {
        Self {
            span: span.max(1),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn span(&self) -> u16 {
        self.span
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn push(&mut self, field: Field) -> &mut Self {
        if !field.model.is_empty() && self.fields.iter().any(|f| f.model == field.model) {
            tracing::warn!(
                model = %field.model,
                "model bound twice within one row"
            );
        }
        self.fields.push(field);
        self
    }

    fn base(span: u16, label: &str, field_type: FieldType, model: &str) -> Field {
        Field::new(field_type, model)
            .with_span(span)
            .with_label(label)
    }

    /// Append a prebuilt field.
    pub fn add_field(&mut self, field: Field) -> &mut Self {
        let span = field.span;
        self.push(field.with_span(span))
    }

    /// Append a field of any type with inline style `extras`.
    pub fn add(
        &mut self,
        span: u16,
        label: &str,
        field_type: FieldType,
        model: &str,
        extras: &str,
    ) -> &mut Self {
        self.push(Self::base(span, label, field_type, model).with_extras(extras))
    }

    pub fn add_input(&mut self, span: u16, label: &str, model: &str) -> &mut Self {
        self.push(Self::base(span, label, FieldType::Text, model))
    }

    /// Readonly text.
    pub fn add_display(&mut self, span: u16, label: &str, model: &str) -> &mut Self {
        self.push(Self::base(span, label, FieldType::Text, model).readonly())
    }

    pub fn add_date(&mut self, span: u16, label: &str, model: &str) -> &mut Self {
        self.push(Self::base(span, label, FieldType::Date, model))
    }

    /// Integer number input.
    pub fn add_number(&mut self, span: u16, label: &str, model: &str, step: &str) -> &mut Self {
        self.push(Self::base(span, label, FieldType::Number, model).with_step(step))
    }

    /// Float number input shown with `decimals` places.
    pub fn add_decimal(
        &mut self,
        span: u16,
        label: &str,
        model: &str,
        decimals: u8,
        step: &str,
    ) -> &mut Self {
        self.push(
            Self::base(span, label, FieldType::Number, model)
                .with_step(step)
                .float(decimals),
        )
    }

    /// Radio group populated from `source`; no blank entry.
    #[allow(clippy::too_many_arguments)]
    pub fn add_radio<S: OptionSource + ?Sized>(
        &mut self,
        span: u16,
        label: &str,
        model: &str,
        source: &S,
        key: &str,
        value: &str,
        selected_key: i64,
    ) -> &mut Self {
        let options = options_or_none(model, source, key, value, 1, selected_key);
        self.push(
            Self::base(span, label, FieldType::Radio, model)
                .with_options(options)
                .with_selected(selected_key),
        )
    }

    pub fn add_check(&mut self, span: u16, label: &str, model: &str) -> &mut Self {
        self.push(Self::base(span, label, FieldType::Checkbox, model))
    }

    /// Readonly checkbox.
    pub fn add_display_check(&mut self, span: u16, label: &str, model: &str) -> &mut Self {
        self.push(Self::base(span, label, FieldType::Checkbox, model).readonly())
    }

    /// Structural field hosting a panel swapper.
    pub fn add_swapper(&mut self, span: u16, label: &str, swapper: Swapper) -> &mut Self {
        self.push(Self::base(span, label, FieldType::Swapper, "").with_swapper(swapper))
    }

    /// Select populated from `source`, with a blank entry when `min == 0`.
    #[allow(clippy::too_many_arguments)]
    pub fn add_select<S: OptionSource + ?Sized>(
        &mut self,
        span: u16,
        label: &str,
        model: &str,
        source: &S,
        key: &str,
        value: &str,
        min: i64,
        selected_key: i64,
    ) -> &mut Self {
        let options = options_or_none(model, source, key, value, min, selected_key);
        self.push(
            Self::base(span, label, FieldType::Select, model)
                .with_options(options)
                .with_selected(selected_key),
        )
    }

    pub fn add_grouped_select(
        &mut self,
        span: u16,
        label: &str,
        model: &str,
        group: Vec<SelectGroup>,
        selected_key: i64,
    ) -> &mut Self {
        self.push(
            Self::base(span, label, FieldType::GroupSelect, model)
                .with_group(group)
                .with_selected(selected_key),
        )
    }

    pub fn add_textarea(&mut self, span: u16, label: &str, model: &str) -> &mut Self {
        self.push(Self::base(span, label, FieldType::Textarea, model))
    }

    pub fn add_big_textarea(&mut self, span: u16, label: &str, model: &str) -> &mut Self {
        self.push(Self::base(span, label, FieldType::Textarea, model).with_flags(FieldFlags::BIG_TEXT))
    }

    /// Readonly textarea.
    pub fn add_display_area(&mut self, span: u16, label: &str, model: &str) -> &mut Self {
        self.push(Self::base(span, label, FieldType::Textarea, model).readonly())
    }

    /// Readonly monospace textarea.
    pub fn add_code_block(&mut self, span: u16, label: &str, model: &str) -> &mut Self {
        self.push(
            Self::base(span, label, FieldType::Textarea, model)
                .readonly()
                .with_flags(FieldFlags::CODE_BLOCK),
        )
    }

    pub fn add_button(&mut self, span: u16, label: &str, model: &str) -> &mut Self {
        self.push(Self::base(span, label, FieldType::Button, model).readonly())
    }

    /// Placeholder div carrying a CSS class; never bound.
    pub fn add_custom(&mut self, span: u16, label: &str, model: &str, class: &str) -> &mut Self {
        self.push(Self::base(span, label, FieldType::Div, model).with_class(class))
    }

    /// Photo upload. The member must hold a `FileField`.
    pub fn add_photo(&mut self, span: u16, label: &str, model: &str) -> &mut Self {
        self.push(Self::base(span, label, FieldType::Photo, model).with_flags(FieldFlags::PHOTO_UPLOAD))
    }

    /// Photo preview without an upload input.
    pub fn add_preview(&mut self, span: u16, label: &str, model: &str) -> &mut Self {
        self.push(Self::base(span, label, FieldType::Photo, model).with_flags(FieldFlags::PREVIEW))
    }

    pub fn add_thumbnail(&mut self, span: u16, label: &str, model: &str) -> &mut Self {
        self.push(Self::base(span, label, FieldType::Photo, model).with_flags(FieldFlags::THUMBNAIL))
    }
}

fn options_or_none<S: OptionSource + ?Sized>(
    model: &str,
    source: &S,
    key: &str,
    value: &str,
    min: i64,
    selected_key: i64,
) -> Vec<EditOption> {
    build_options(source, key, value, min, selected_key).unwrap_or_else(|err| {
        tracing::debug!(model, %err, "option source yielded no options");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn builders_set_types_and_flags() {
        let mut row = Row::new(0);
        row.add_input(1, "Name", "Name")
            .add_display(1, "Id", "ID")
            .add_number(1, "Age", "Age", "1")
            .add_decimal(1, "Rate", "Rate", 2, "0.01")
            .add_code_block(2, "Log", "Log")
            .add_custom(1, "", "Chart", "chart-box")
            .add_photo(1, "Pic", "Pic")
            .add_button(0, "Go", "Go");
        assert_eq!(row.span(), 1);
        let f = row.fields();
        assert_eq!(f[0].field_type(), FieldType::Text);
        assert!(!f[0].is_readonly());
        assert!(f[1].is_readonly());
        assert_eq!(f[2].step(), "1");
        assert!(f[3].is_float());
        assert_eq!(f[3].decimals(), 2);
        assert!(f[4].flags().contains(FieldFlags::CODE_BLOCK | FieldFlags::READONLY));
        assert_eq!(f[5].class(), "chart-box");
        assert!(f[6].is_photo_upload());
        assert_eq!(f[7].span(), 1);
        assert!(f[7].is_readonly());
    }

    #[test]
    fn add_field_raises_zero_span() {
        let mut row = Row::new(1);
        let mut field = Field::new(FieldType::Text, "A");
        field.span = 0;
        row.add_field(field);
        assert_eq!(row.fields()[0].span(), 1);
    }

    #[test]
    fn select_from_json() {
        let src = serde_json::json!([{"ID": 1, "Name": "a"}, {"ID": 2, "Name": "b"}]);
        let mut row = Row::new(1);
        row.add_select(1, "Pick", "Pick", &src, "ID", "Name", 0, 2);
        let f = &row.fields()[0];
        assert_eq!(f.options().len(), 3);
        assert_eq!(f.options()[0].key, 0);
        assert!(f.options()[2].selected);
        assert_eq!(f.selected(), 2);
    }

    #[test]
    fn radio_has_no_blank() {
        let src = serde_json::json!([{"ID": 7, "Name": "x"}]);
        let mut row = Row::new(1);
        row.add_radio(1, "R", "R", &src, "ID", "Name", 0);
        assert_eq!(row.fields()[0].options().len(), 1);
    }

    #[test]
    fn bad_source_leaves_no_options() {
        let mut row = Row::new(1);
        row.add_select(1, "Pick", "Pick", &serde_json::json!("nope"), "ID", "Name", 0, 0);
        assert!(row.fields()[0].options().is_empty());
    }

    #[test]
    #[traced_test]
    fn duplicate_model_warns() {
        let mut row = Row::new(2);
        row.add_input(1, "A", "Name").add_input(1, "B", "Name");
        assert_eq!(row.fields().len(), 2);
        assert!(logs_contain("model bound twice within one row"));
    }
}
