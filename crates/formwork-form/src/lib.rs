#![forbid(unsafe_code)]

//! Edit forms for Formwork.
//!
//! An [`EditForm`] describes an editable view as rows of typed
//! [`Field`]s. [`EditForm::project`] fills the fields from a record,
//! the host stamps the form through a template, and after the user edits
//! [`EditForm::bind`] reads the controls back into the record.
//!
//! ```
//! use formwork_core::record;
//! use formwork_form::{EditForm, FieldType, UiSource, UiValue};
//!
//! #[derive(Default)]
//! struct Person {
//!     name: String,
//!     age: i64,
//! }
//! record!(Person { "Name" => name, "Age" => age });
//!
//! struct Ui;
//! impl UiSource for Ui {
//!     fn read(&self, name: &str, _: FieldType) -> Option<UiValue> {
//!         Some(UiValue::Text(if name == "Age" { "42".into() } else { "Ada".into() }))
//!     }
//! }
//!
//! let mut form = EditForm::new("fa-user", "Person");
//! form.row(2).add_input(1, "Name", "Name").add_number(1, "Age", "Age", "1");
//!
//! let mut person = Person::default();
//! let report = form.bind(&Ui, Some(&mut person));
//! assert!(report.is_clean());
//! assert_eq!((person.name.as_str(), person.age), ("Ada", 42));
//! ```

pub mod bind;
pub mod field;
pub mod form;
pub mod lifecycle;
pub mod options;
pub mod panel;
pub mod photo;
pub mod project;
pub mod row;
pub mod ui;
pub mod view;

pub use bind::BindOptions;
pub use field::{EditOption, Field, FieldFlags, FieldType, SelectGroup, SelectOption};
pub use form::{EditForm, RenderOutcome};
pub use lifecycle::{
    AttachCallback, AttachOutcome, AttachTask, Callback, Callbacks, FormEvent, ViewLifetime,
};
pub use options::{OptionSource, OptionsError, build_options};
pub use panel::{Panel, Swapper};
pub use photo::PhotoPreview;
pub use row::Row;
pub use ui::{PhotoInput, RadioInput, UiSink, UiSource, UiValue, bare_filename};
pub use view::FormView;
