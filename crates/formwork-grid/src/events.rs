#![forbid(unsafe_code)]

//! Grid callbacks and row-click resolution.
//!
//! The UI collaborator wires clicks on the rendered table and its header
//! affordances to [`GridCallbacks::dispatch`]. A click on a table row is
//! first described as a [`RowClick`] so the clicked element can be mapped
//! back to the row key the template stamped on it.

use std::fmt;
use std::rc::Rc;

/// Signal raised by the UI collaborator on a list or tree view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    /// A row was clicked; carries the row key.
    Row(String),
    Cancel,
    NewRow,
    Print,
}

pub type RowCallback = Rc<dyn Fn(&str)>;
pub type ActionCallback = Rc<dyn Fn()>;

#[derive(Clone, Default)]
pub struct GridCallbacks {
    pub(crate) row: Option<RowCallback>,
    pub(crate) cancel: Option<ActionCallback>,
    pub(crate) new_row: Option<ActionCallback>,
    pub(crate) print: Option<ActionCallback>,
}

impl GridCallbacks {
    #[must_use]
    pub fn has_row(&self) -> bool {
        self.row.is_some()
    }

    #[must_use]
    pub fn has_cancel(&self) -> bool {
        self.cancel.is_some()
    }

    /// Whether the header shows an add button.
    #[must_use]
    pub fn has_new_row(&self) -> bool {
        self.new_row.is_some()
    }

    /// Whether the header shows a print button.
    #[must_use]
    pub fn has_print(&self) -> bool {
        self.print.is_some()
    }

    /// Invoke the callback for `event`. Returns whether one was registered.
    pub fn dispatch(&self, event: &GridEvent) -> bool {
        let ran = match event {
            GridEvent::Row(key) => self.row.as_ref().map(|cb| cb(key)),
            GridEvent::Cancel => self.cancel.as_ref().map(|cb| cb()),
            GridEvent::NewRow => self.new_row.as_ref().map(|cb| cb()),
            GridEvent::Print => self.print.as_ref().map(|cb| cb()),
        };
        if ran.is_none() {
            tracing::debug!(?event, "no grid callback registered");
        }
        ran.is_some()
    }

    /// Resolve `click` to a row key and raise [`GridEvent::Row`].
    /// Returns the key when a row callback ran.
    pub fn click(&self, click: &RowClick) -> Option<String> {
        let key = click.row_key()?.to_owned();
        self.dispatch(&GridEvent::Row(key.clone())).then_some(key)
    }
}

impl fmt::Debug for GridCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridCallbacks")
            .field("row", &self.row.is_some())
            .field("cancel", &self.cancel.is_some())
            .field("new_row", &self.new_row.is_some())
            .field("print", &self.print.is_some())
            .finish()
    }
}

/// The element a click landed on inside a rendered table.
///
/// Row elements (`TR`, and `LI` in tree views) carry the key themselves;
/// any other element inside a row takes the key of its parent. Clicks on
/// inputs belong to the input and never select the row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowClick {
    /// Tag name of the clicked element.
    pub tag: String,
    /// `key` attribute of the clicked element.
    pub key: Option<String>,
    /// `key` attribute of its parent element.
    pub parent_key: Option<String>,
}

impl RowClick {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_parent_key(mut self, key: impl Into<String>) -> Self {
        self.parent_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn row_key(&self) -> Option<&str> {
        let tag = self.tag.as_str();
        if tag.eq_ignore_ascii_case("input") {
            return None;
        }
        if tag.eq_ignore_ascii_case("tr") || tag.eq_ignore_ascii_case("li") {
            self.key.as_deref()
        } else {
            self.parent_key.as_deref()
        }
    }
}
