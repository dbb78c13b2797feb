#![forbid(unsafe_code)]

//! Field descriptors.
//!
//! A [`Field`] names a record member (`model`), the kind of control that
//! edits it ([`FieldType`]) and the presentation knobs the template needs.
//! The engines only ever write `value`, `checked` and `options`.

use core::fmt;

use bitflags::bitflags;
use serde::{Serialize, Serializer};

use crate::panel::Swapper;

/// Closed set of control kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Date,
    Select,
    GroupSelect,
    Radio,
    Checkbox,
    Photo,
    Swapper,
    Div,
    Button,
}

impl FieldType {
    /// Name used in templates and diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Date => "date",
            Self::Select => "select",
            Self::GroupSelect => "groupselect",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Photo => "photo",
            Self::Swapper => "swapper",
            Self::Div => "div",
            Self::Button => "button",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

bitflags! {
    /// Boolean presentation switches of a field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FieldFlags: u16 {
        /// Shown but never bound.
        const READONLY     = 1 << 0;
        /// Receives initial focus.
        const FOCUS        = 1 << 1;
        /// Number field holding a float.
        const FLOAT        = 1 << 2;
        const CODE_BLOCK   = 1 << 3;
        const BIG_TEXT     = 1 << 4;
        /// Photo field with a file input; the only photo flavour that binds.
        const PHOTO_UPLOAD = 1 << 5;
        const IS_UPLOADED  = 1 << 6;
        const PREVIEW      = 1 << 7;
        const THUMBNAIL    = 1 << 8;
    }
}

/// One entry of a select or radio field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EditOption {
    pub key: i64,
    pub display: String,
    pub selected: bool,
}

impl EditOption {
    #[must_use]
    pub fn new(key: i64, display: impl Into<String>) -> Self {
        Self {
            key,
            display: display.into(),
            selected: false,
        }
    }

    /// The "nothing selected" entry prepended when `min == 0`.
    #[must_use]
    pub fn blank() -> Self {
        Self::new(0, "")
    }
}

/// An entry inside a [`SelectGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SelectOption {
    #[serde(rename = "ID")]
    pub id: i64,
    pub name: String,
}

/// A titled block of options for a grouped select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SelectGroup {
    pub title: String,
    pub options: Vec<SelectOption>,
}

impl SelectGroup {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            options: Vec::new(),
        }
    }

    #[must_use]
    pub fn option(mut self, id: i64, name: impl Into<String>) -> Self {
        self.options.push(SelectOption {
            id,
            name: name.into(),
        });
        self
    }
}

/// A field descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub(crate) span: u16,
    pub(crate) label: String,
    pub(crate) field_type: FieldType,
    pub(crate) model: String,
    pub(crate) value: String,
    pub(crate) checked: bool,
    pub(crate) flags: FieldFlags,
    pub(crate) extras: String,
    pub(crate) class: String,
    pub(crate) step: String,
    pub(crate) decimals: u8,
    pub(crate) options: Vec<EditOption>,
    pub(crate) selected: i64,
    pub(crate) group: Vec<SelectGroup>,
    pub(crate) swapper: Option<Swapper>,
}

impl Field {
    /// A field of `field_type` bound to `model`, spanning one column.
    #[must_use]
    pub fn new(field_type: FieldType, model: impl Into<String>) -> Self {
        Self {
            span: 1,
            label: String::new(),
            field_type,
            model: model.into(),
            value: String::new(),
            checked: false,
            flags: FieldFlags::empty(),
            extras: String::new(),
            class: String::new(),
            step: String::new(),
            decimals: 0,
            options: Vec::new(),
            selected: 0,
            group: Vec::new(),
            swapper: None,
        }
    }

    /// Column span; zero is raised to one.
    #[must_use]
    pub fn with_span(mut self, span: u16) -> Self {
        self.span = span.max(1);
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: FieldFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[must_use]
    pub fn readonly(self) -> Self {
        self.with_flags(FieldFlags::READONLY)
    }

    #[must_use]
    pub fn focused(self) -> Self {
        self.with_flags(FieldFlags::FOCUS)
    }

    /// Mark as a float number field shown with `decimals` places.
    #[must_use]
    pub fn float(mut self, decimals: u8) -> Self {
        self.decimals = decimals;
        self.with_flags(FieldFlags::FLOAT)
    }

    #[must_use]
    pub fn with_step(mut self, step: impl Into<String>) -> Self {
        self.step = step.into();
        self
    }

    /// Inline style passed through to the template.
    #[must_use]
    pub fn with_extras(mut self, extras: impl Into<String>) -> Self {
        self.extras = extras.into();
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: Vec<EditOption>) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: Vec<SelectGroup>) -> Self {
        self.group = group;
        self
    }

    #[must_use]
    pub fn with_selected(mut self, selected: i64) -> Self {
        self.selected = selected;
        self
    }

    #[must_use]
    pub fn with_swapper(mut self, swapper: Swapper) -> Self {
        self.swapper = Some(swapper);
        self
    }

    #[must_use]
    pub fn span(&self) -> u16 {
        self.span
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Projected display value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Projected checked state (checkbox fields).
    #[must_use]
    pub fn checked(&self) -> bool {
        self.checked
    }

    #[must_use]
    pub fn flags(&self) -> FieldFlags {
        self.flags
    }

    #[must_use]
    pub fn is_readonly(&self) -> bool {
        self.flags.contains(FieldFlags::READONLY)
    }

    #[must_use]
    pub fn is_float(&self) -> bool {
        self.flags.contains(FieldFlags::FLOAT)
    }

    #[must_use]
    pub fn is_photo_upload(&self) -> bool {
        self.flags.contains(FieldFlags::PHOTO_UPLOAD)
    }

    #[must_use]
    pub fn extras(&self) -> &str {
        &self.extras
    }

    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    #[must_use]
    pub fn step(&self) -> &str {
        &self.step
    }

    #[must_use]
    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    #[must_use]
    pub fn options(&self) -> &[EditOption] {
        &self.options
    }

    #[must_use]
    pub fn selected(&self) -> i64 {
        self.selected
    }

    #[must_use]
    pub fn group(&self) -> &[SelectGroup] {
        &self.group
    }

    #[must_use]
    pub fn swapper(&self) -> Option<&Swapper> {
        self.swapper.as_ref()
    }

    pub fn swapper_mut(&mut self) -> Option<&mut Swapper> {
        self.swapper.as_mut()
    }

    /// Whether the binding engine ever reads this field.
    #[must_use]
    pub fn is_bindable(&self) -> bool {
        !self.is_readonly() && self.field_type != FieldType::Div
    }

    pub(crate) fn set_options(&mut self, options: Vec<EditOption>, selected: i64) {
        self.options = options;
        self.selected = selected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_template_names() {
        assert_eq!(FieldType::GroupSelect.to_string(), "groupselect");
        assert_eq!(FieldType::Textarea.to_string(), FieldType::Textarea.as_str());
    }

    #[test]
    fn span_is_at_least_one() {
        assert_eq!(Field::new(FieldType::Text, "A").with_span(0).span(), 1);
        assert_eq!(Field::new(FieldType::Text, "A").with_span(3).span(), 3);
    }

    #[test]
    fn bindable_excludes_readonly_and_div() {
        assert!(Field::new(FieldType::Text, "A").is_bindable());
        assert!(!Field::new(FieldType::Text, "A").readonly().is_bindable());
        assert!(!Field::new(FieldType::Div, "A").is_bindable());
    }

    #[test]
    fn float_sets_flag_and_decimals() {
        let f = Field::new(FieldType::Number, "Rate").float(3);
        assert!(f.is_float());
        assert_eq!(f.decimals(), 3);
    }

    #[test]
    fn option_serializes_pascal_case() {
        let json = serde_json::to_value(EditOption::new(4, "Four")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"Key": 4, "Display": "Four", "Selected": false})
        );
    }

    #[test]
    fn group_builder() {
        let g = SelectGroup::new("Fruit").option(1, "Apple").option(2, "Pear");
        assert_eq!(g.options.len(), 2);
        assert_eq!(g.options[1].name, "Pear");
    }
}
