#![forbid(unsafe_code)]

//! UI collaborator traits.
//!
//! The binding engine reads the live UI through a [`UiSource`]; panel
//! painting and swapper visibility write through a [`UiSink`]. Names are
//! the bare model name for whole-form walks and `panel-model` for
//! standalone panel walks.

use crate::field::FieldType;

/// One input of a same-named radio group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioInput {
    pub value: String,
    pub checked: bool,
}

impl RadioInput {
    #[must_use]
    pub fn new(value: impl Into<String>, checked: bool) -> Self {
        Self {
            value: value.into(),
            checked,
        }
    }
}

/// What a photo upload control holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoInput {
    /// `src` of the `<model>Preview` element (usually a data URL).
    pub preview_src: String,
    /// Raw value of the file input, possibly carrying a path prefix.
    pub input_value: String,
}

/// A value read back from the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiValue {
    /// Input, textarea, number or date contents.
    Text(String),
    /// Checkbox state.
    Checked(bool),
    /// Select index; `None` when nothing is selected.
    SelectedIndex(Option<usize>),
    /// Every input sharing the field's name, in document order.
    Group(Vec<RadioInput>),
    Photo(PhotoInput),
}

impl UiValue {
    pub(crate) fn variant_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Checked(_) => "checked",
            Self::SelectedIndex(_) => "selected-index",
            Self::Group(_) => "group",
            Self::Photo(_) => "photo",
        }
    }
}

/// Reads control state by name.
pub trait UiSource {
    /// `None` when no element carries `name`.
    fn read(&self, name: &str, field_type: FieldType) -> Option<UiValue>;
}

impl<U: UiSource + ?Sized> UiSource for &U {
    fn read(&self, name: &str, field_type: FieldType) -> Option<UiValue> {
        (**self).read(name, field_type)
    }
}

/// Writes control state by name.
pub trait UiSink {
    /// Set the value of the element called `name`. Returns `false` when
    /// there is no such element.
    fn set_value(&mut self, name: &str, value: &str) -> bool;

    /// Add (`on`) or remove a CSS class. Returns `false` when there is no
    /// such element.
    fn toggle_class(&mut self, _name: &str, _class: &str, _on: bool) -> bool {
        false
    }

    /// Replace the form's visible title.
    fn set_title(&mut self, _title: &str) -> bool {
        false
    }
}

/// Strip everything up to the last `\` or `/` from a file input value.
#[must_use]
pub fn bare_filename(input: &str) -> &str {
    match input.rfind(['\\', '/']) {
        Some(i) => &input[i + 1..],
        None => input,
    }
}
