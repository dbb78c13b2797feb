#![forbid(unsafe_code)]

//! List and tree forms for Formwork.
//!
//! A [`ListForm`] is a table described by [`Column`]s; a [`TreeForm`]
//! shows a [`TreeData`] hierarchy. Neither ships templates: the row
//! template is synthesized from the form's layout on the first render of a
//! name and kept in a [`TemplateCache`], shared process-wide through
//! [`TemplateCache::global`].
//!
//! ```
//! use formwork_core::{ExecuteError, Template, TemplateExecutor};
//! use formwork_grid::{ListForm, RenderOptions, TemplateCache, TemplateState};
//!
//! struct Noop;
//! impl TemplateExecutor for Noop {
//!     fn execute(&mut self, _: &Template, _: &str, _: &serde_json::Value) -> Result<(), ExecuteError> {
//!         Ok(())
//!     }
//! }
//!
//! let mut list = ListForm::new("fa-users", "People");
//! list.column("Name", "Name").date_column("Born", "Born");
//!
//! let cache = TemplateCache::new();
//! let rows: Vec<serde_json::Value> = Vec::new();
//! list.render("people", "#main", &rows, &cache, &mut Noop, &RenderOptions::default())
//!     .unwrap();
//! assert_eq!(cache.state("people"), TemplateState::Cached);
//! ```

pub mod cache;
pub mod column;
pub mod events;
pub mod list;
pub mod synth;
pub mod tree;

pub use cache::{TemplateCache, TemplateState};
pub use column::{Column, ColumnKind, format_date, truncate};
pub use events::{ActionCallback, GridCallbacks, GridEvent, RowCallback, RowClick};
pub use list::ListForm;
pub use synth::{RenderOptions, SynthOptions};
pub use tree::{TreeData, TreeForm, TreeNode};
