#![forbid(unsafe_code)]

//! Panels and panel swappers.
//!
//! A [`Swapper`] owns an ordered set of named [`Panel`]s, exactly one of
//! which is shown. Panels carry their own rows and can be projected and
//! bound on their own, in which case UI names are qualified as
//! `panel-model`.
//!
//! # Invariants
//!
//! 1. `selected` is always within `[0, len)` (zero for an empty swapper).
//! 2. New panels bind with the whole form unless told otherwise.

use crate::row::Row;
use crate::ui::UiSink;

/// CSS class toggled on the shown panel.
pub const SHOW_CLASS: &str = "swapper-show";

/// A named sub-view with its own rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    name: String,
    rows: Vec<Row>,
    bind_with_form: bool,
}

impl Panel {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
            bind_with_form: true,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    /// Whether whole-form binding descends into this panel.
    #[must_use]
    pub fn binds_with_form(&self) -> bool {
        self.bind_with_form
    }

    pub fn set_bind_with_form(&mut self, bind: bool) -> &mut Self {
        self.bind_with_form = bind;
        self
    }

    /// Append a row.
    pub fn row(&mut self, span: u16) -> &mut Row {
        self.rows.push(Row::new(span));
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    /// Alias of [`Panel::row`].
    pub fn add_row(&mut self, span: u16) -> &mut Row {
        self.row(span)
    }

    /// UI name of one of this panel's fields in standalone mode.
    #[must_use]
    pub fn qualified(&self, model: &str) -> String {
        format!("{}-{}", self.name, model)
    }
}

/// A named collection of panels with one shown at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Swapper {
    name: String,
    selected: usize,
    panels: Vec<Panel>,
}

impl Swapper {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selected: 0,
            panels: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub(crate) fn panels_mut(&mut self) -> &mut [Panel] {
        &mut self.panels
    }

    #[must_use]
    pub fn panel(&self, name: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.name == name)
    }

    pub fn panel_mut(&mut self, name: &str) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| p.name == name)
    }

    /// Append a panel that binds with the form.
    pub fn add_panel(&mut self, name: impl Into<String>) -> &mut Panel {
        self.panels.push(Panel::new(name));
        let last = self.panels.len() - 1;
        &mut self.panels[last]
    }

    /// Select a panel by index, clamped into range. Returns the index
    /// actually selected.
    pub fn select(&mut self, idx: usize) -> usize {
        self.selected = idx.min(self.panels.len().saturating_sub(1));
        self.selected
    }

    /// Select a panel by name. Unknown names leave the selection alone.
    pub fn select_by_name(&mut self, name: &str) -> Option<usize> {
        let idx = self.panels.iter().position(|p| p.name == name)?;
        self.selected = idx;
        Some(idx)
    }

    /// DOM name of panel `idx`: `swapper-panel`.
    #[must_use]
    pub fn panel_dom_name(&self, idx: usize) -> Option<String> {
        self.panels
            .get(idx)
            .map(|p| format!("{}-{}", self.name, p.name))
    }

    /// Toggle [`SHOW_CLASS`] so only the selected panel is visible.
    /// Panels without a matching element are skipped.
    pub fn apply<S: UiSink + ?Sized>(&self, sink: &mut S) {
        for (i, p) in self.panels.iter().enumerate() {
            let dom_name = format!("{}-{}", self.name, p.name);
            if !sink.toggle_class(&dom_name, SHOW_CLASS, i == self.selected) {
                tracing::debug!(panel = %dom_name, "no element for swapper panel");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swapper() -> Swapper {
        let mut s = Swapper::new("kind");
        s.add_panel("basic");
        s.add_panel("extra").set_bind_with_form(false);
        s
    }

    #[test]
    fn select_is_clamped() {
        let mut s = swapper();
        assert_eq!(s.select(1), 1);
        assert_eq!(s.select(9), 1);
        assert_eq!(s.select(0), 0);
        let mut empty = Swapper::new("e");
        assert_eq!(empty.select(3), 0);
    }

    #[test]
    fn select_by_name() {
        let mut s = swapper();
        assert_eq!(s.select_by_name("extra"), Some(1));
        assert_eq!(s.selected(), 1);
        assert_eq!(s.select_by_name("missing"), None);
        assert_eq!(s.selected(), 1);
    }

    #[test]
    fn panels_bind_with_form_by_default() {
        let s = swapper();
        assert!(s.panel("basic").unwrap().binds_with_form());
        assert!(!s.panel("extra").unwrap().binds_with_form());
    }

    #[test]
    fn dom_names() {
        let s = swapper();
        assert_eq!(s.panel_dom_name(1).as_deref(), Some("kind-extra"));
        assert_eq!(s.panel_dom_name(2), None);
        assert_eq!(s.panels()[0].qualified("Name"), "basic-Name");
    }

    #[test]
    fn rows_append() {
        let mut p = Panel::new("p");
        p.row(1).add_input(1, "A", "A");
        p.add_row(2).add_input(1, "B", "B");
        assert_eq!(p.rows().len(), 2);
        assert_eq!(p.rows()[1].span(), 2);
    }
}
