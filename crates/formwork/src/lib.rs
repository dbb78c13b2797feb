#![forbid(unsafe_code)]

//! Formwork: declarative forms over typed records.
//!
//! Re-exports the member crates and a [`prelude`] for the common case:
//!
//! - [`core`]: value kinds, the coercion matrix, record tables, config
//! - [`form`]: edit forms, projection and binding
//! - [`grid`] (feature `grid`): list and tree forms with synthesized
//!   templates
//!
//! ```
//! use formwork::prelude::*;
//!
//! #[derive(Default)]
//! struct Note {
//!     title: String,
//!     pinned: bool,
//! }
//!
//! formwork::record!(Note {
//!     "Title" => title,
//!     "Pinned" => pinned,
//! });
//!
//! let mut form = EditForm::new("fa-sticky-note", "Note");
//! form.row(2)
//!     .add_input(1, "Title", "Title")
//!     .add_check(1, "Pinned", "Pinned");
//!
//! let note = Note { title: "Groceries".into(), pinned: true };
//! assert!(form.project(Some(&note)).is_clean());
//! assert_eq!(form.get_field("Title").map(|f| f.value()), Some("Groceries"));
//! assert_eq!(form.get_field("Pinned").map(|f| f.checked()), Some(true));
//! ```

pub use formwork_core as core;
pub use formwork_form as form;
#[cfg(feature = "grid")]
pub use formwork_grid as grid;

pub use formwork_core::record;

pub mod prelude {
    pub use formwork_core::{
        DiagnosticKind, EngineConfig, FileField, InvalidDatePolicy, Record, RenderError, Report,
        Template, TemplateExecutor, TemplateSource, Value, ValueKind,
    };
    pub use formwork_form::{
        BindOptions, EditForm, FormEvent, OptionSource, Panel, Swapper, UiSink, UiSource, UiValue,
    };
    #[cfg(feature = "grid")]
    pub use formwork_grid::{
        GridEvent, ListForm, RenderOptions, RowClick, TemplateCache, TreeData, TreeForm, TreeNode,
    };
}
