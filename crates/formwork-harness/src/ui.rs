#![forbid(unsafe_code)]

//! An in-memory UI standing in for a rendered view.
//!
//! [`MemoryUi`] answers reads from a name → [`UiValue`] table and records
//! every read, so tests can assert which fields a walk touched. As a sink
//! it accepts writes only for elements it knows about, mirroring a page
//! where painting into a missing element fails.

use std::cell::RefCell;

use ahash::{AHashMap, AHashSet};
use formwork_form::{FieldType, PhotoInput, RadioInput, UiSink, UiSource, UiValue};

#[derive(Debug, Default)]
pub struct MemoryUi {
    values: AHashMap<String, UiValue>,
    elements: AHashSet<String>,
    written: AHashMap<String, String>,
    classes: AHashMap<String, AHashSet<String>>,
    has_title: bool,
    title: Option<String>,
    reads: RefCell<Vec<String>>,
}

impl MemoryUi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value a read of `name` returns. The element also becomes
    /// writable.
    pub fn set(&mut self, name: &str, value: UiValue) -> &mut Self {
        self.elements.insert(name.to_owned());
        self.values.insert(name.to_owned(), value);
        self
    }

    #[must_use]
    pub fn with(mut self, name: &str, value: UiValue) -> Self {
        self.set(name, value);
        self
    }

    #[must_use]
    pub fn text(self, name: &str, value: &str) -> Self {
        self.with(name, UiValue::Text(value.to_owned()))
    }

    #[must_use]
    pub fn checked(self, name: &str, on: bool) -> Self {
        self.with(name, UiValue::Checked(on))
    }

    #[must_use]
    pub fn selected(self, name: &str, index: Option<usize>) -> Self {
        self.with(name, UiValue::SelectedIndex(index))
    }

    /// A radio group of `(value, checked)` inputs sharing `name`.
    #[must_use]
    pub fn radios(self, name: &str, inputs: &[(&str, bool)]) -> Self {
        let group = inputs
            .iter()
            .map(|(v, on)| RadioInput::new(*v, *on))
            .collect();
        self.with(name, UiValue::Group(group))
    }

    #[must_use]
    pub fn photo(self, name: &str, preview_src: &str, input_value: &str) -> Self {
        self.with(
            name,
            UiValue::Photo(PhotoInput {
                preview_src: preview_src.to_owned(),
                input_value: input_value.to_owned(),
            }),
        )
    }

    /// Declare an element that can be written to and styled but has no
    /// readable value.
    #[must_use]
    pub fn element(mut self, name: &str) -> Self {
        self.elements.insert(name.to_owned());
        self
    }

    /// Declare the title element.
    #[must_use]
    pub fn title_element(mut self) -> Self {
        self.has_title = true;
        self
    }

    /// Names read so far, in order.
    #[must_use]
    pub fn reads(&self) -> Vec<String> {
        self.reads.borrow().clone()
    }

    #[must_use]
    pub fn was_read(&self, name: &str) -> bool {
        self.reads.borrow().iter().any(|r| r == name)
    }

    pub fn clear_reads(&self) {
        self.reads.borrow_mut().clear();
    }

    /// The last value written into `name`.
    #[must_use]
    pub fn written(&self, name: &str) -> Option<&str> {
        self.written.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn has_class(&self, name: &str, class: &str) -> bool {
        self.classes.get(name).is_some_and(|c| c.contains(class))
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

impl UiSource for MemoryUi {
    fn read(&self, name: &str, field_type: FieldType) -> Option<UiValue> {
        tracing::trace!(name, %field_type, "ui read");
        self.reads.borrow_mut().push(name.to_owned());
        self.values.get(name).cloned()
    }
}

impl UiSink for MemoryUi {
    fn set_value(&mut self, name: &str, value: &str) -> bool {
        if !self.elements.contains(name) {
            return false;
        }
        self.written.insert(name.to_owned(), value.to_owned());
        true
    }

    fn toggle_class(&mut self, name: &str, class: &str, on: bool) -> bool {
        if !self.elements.contains(name) {
            return false;
        }
        let classes = self.classes.entry(name.to_owned()).or_default();
        if on {
            classes.insert(class.to_owned());
        } else {
            classes.remove(class);
        }
        true
    }

    fn set_title(&mut self, title: &str) -> bool {
        if !self.has_title {
            return false;
        }
        self.title = Some(title.to_owned());
        true
    }
}
