#![forbid(unsafe_code)]

//! The edit form: title, icon, rows and lifecycle callbacks.

use std::rc::Rc;
use std::sync::Arc;

use formwork_core::{Record, RenderError, Report, TemplateExecutor, TemplateSource};

use crate::field::{Field, FieldType};
use crate::lifecycle::{AttachTask, Callbacks, FormEvent, ViewLifetime};
use crate::options::{OptionSource, OptionsError, build_options};
use crate::panel::Swapper;
use crate::photo::PhotoPreview;
use crate::row::Row;
use crate::ui::UiSink;
use crate::view::FormView;

/// What [`EditForm::render`] produced besides the stamped template.
#[derive(Debug, Default)]
pub struct RenderOutcome {
    /// Diagnostics of the projection walk and preview resolution.
    pub report: Report,
    /// Instructions for the photo preview elements, in field order.
    pub previews: Vec<PhotoPreview>,
}

/// A declarative edit view over one record.
#[derive(Debug, Default)]
pub struct EditForm {
    title: String,
    icon: String,
    id: i64,
    rows: Vec<Row>,
    callbacks: Callbacks,
    lifetime: ViewLifetime,
}

impl EditForm {
    #[must_use]
    pub fn new(icon: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: icon.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    #[must_use]
    pub fn callbacks(&self) -> &Callbacks {
        &self.callbacks
    }

    #[must_use]
    pub fn lifetime(&self) -> &ViewLifetime {
        &self.lifetime
    }

    /// Append a row.
    pub fn row(&mut self, span: u16) -> &mut Row {
        self.rows.push(Row::new(span));
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    // ── Callbacks ───────────────────────────────────────────────────

    pub fn cancel_event(&mut self, cb: impl Fn(&FormEvent) + 'static) -> &mut Self {
        self.callbacks.cancel = Some(Rc::new(cb));
        self
    }

    pub fn save_event(&mut self, cb: impl Fn(&FormEvent) + 'static) -> &mut Self {
        self.callbacks.save = Some(Rc::new(cb));
        self
    }

    pub fn delete_event(&mut self, cb: impl Fn(&FormEvent) + 'static) -> &mut Self {
        self.callbacks.delete = Some(Rc::new(cb));
        self
    }

    pub fn print_event(&mut self, cb: impl Fn(&FormEvent) + 'static) -> &mut Self {
        self.callbacks.print = Some(Rc::new(cb));
        self
    }

    pub fn attach_event(&mut self, cb: impl Fn() + Send + Sync + 'static) -> &mut Self {
        self.callbacks.attach = Some(Arc::new(cb));
        self
    }

    /// Forward a collaborator event to its callback.
    pub fn dispatch(&self, event: &FormEvent) -> bool {
        self.callbacks.dispatch(event)
    }

    /// A click on the preview of photo field `model`: re-dispatches save
    /// when the field is an upload and a save callback is registered.
    pub fn confirm_preview(&self, model: &str) -> bool {
        let upload = self
            .get_field(model)
            .is_some_and(|f| f.field_type() == FieldType::Photo && f.is_photo_upload());
        if !upload || !self.callbacks.has_save() {
            return false;
        }
        self.callbacks.dispatch(&FormEvent::PreviewConfirmed {
            field: model.to_owned(),
        })
    }

    /// A photo input changed: run the attach callback in the background.
    ///
    /// Returns `Ok(None)` when no attach callback is registered.
    pub fn notify_attach(&self) -> std::io::Result<Option<AttachTask>> {
        match &self.callbacks.attach {
            Some(cb) => AttachTask::spawn(Arc::clone(cb), self.lifetime.child_token()).map(Some),
            None => Ok(None),
        }
    }

    /// Close the view, cancelling attach tasks that have not started.
    pub fn close_view(&self) {
        self.lifetime.close();
    }

    // ── Lookup ──────────────────────────────────────────────────────

    /// First top-level field binding `model`.
    #[must_use]
    pub fn get_field(&self, model: &str) -> Option<&Field> {
        self.rows
            .iter()
            .flat_map(Row::fields)
            .find(|f| f.model() == model)
    }

    pub fn get_field_mut(&mut self, model: &str) -> Option<&mut Field> {
        self.rows
            .iter_mut()
            .flat_map(Row::fields_mut)
            .find(|f| f.model() == model)
    }

    /// Top-level fields in row order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.rows.iter().flat_map(Row::fields)
    }

    #[must_use]
    pub fn swapper(&self, name: &str) -> Option<&Swapper> {
        self.fields()
            .filter_map(Field::swapper)
            .find(|s| s.name() == name)
    }

    pub fn swapper_mut(&mut self, name: &str) -> Option<&mut Swapper> {
        self.rows
            .iter_mut()
            .flat_map(Row::fields_mut)
            .filter_map(Field::swapper_mut)
            .find(|s| s.name() == name)
    }

    // ── Options ─────────────────────────────────────────────────────

    /// Replace the options of select/radio field `model` from `source`.
    ///
    /// On a source error the field is left without options and the error
    /// is returned.
    pub fn set_select_options<S: OptionSource + ?Sized>(
        &mut self,
        model: &str,
        source: &S,
        key: &str,
        value: &str,
        min: i64,
        selected_key: i64,
    ) -> Result<(), OptionsError> {
        let Some(field) = self.get_field_mut(model) else {
            tracing::warn!(model, "no field to receive options");
            return Err(OptionsError::UnknownField {
                name: model.to_owned(),
            });
        };
        match build_options(source, key, value, min, selected_key) {
            Ok(options) => {
                field.set_options(options, selected_key);
                Ok(())
            }
            Err(err) => {
                tracing::debug!(model, %err, "option source yielded no options");
                field.set_options(Vec::new(), selected_key);
                Err(err)
            }
        }
    }

    // ── Rendering ───────────────────────────────────────────────────

    /// Change the title, in the model and in the rendered view.
    pub fn set_title<S: UiSink + ?Sized>(&mut self, title: &str, sink: &mut S) {
        self.title = title.to_owned();
        if !sink.set_title(title) {
            tracing::debug!("no title element to update");
        }
    }

    /// Serializable snapshot handed to template execution.
    #[must_use]
    pub fn view(&self) -> FormView<'_> {
        FormView::new(self)
    }

    /// Project `record`, stamp template `template` at `target`, and resolve
    /// photo previews.
    pub fn render<R, L, E>(
        &mut self,
        template: &str,
        target: &str,
        record: Option<&R>,
        loader: &L,
        executor: &mut E,
    ) -> Result<RenderOutcome, RenderError>
    where
        R: Record,
        L: TemplateSource + ?Sized,
        E: TemplateExecutor + ?Sized,
    {
        let _span = tracing::debug_span!("render_edit_form", title = %self.title, template).entered();
        let mut report = self.project(record);
        let template = loader.template(template)?;
        let data = serde_json::to_value(self.view())?;
        executor.execute(&template, target, &data)?;
        let previews = match record {
            Some(record) => self.photo_previews(record, &mut report),
            None => Vec::new(),
        };
        Ok(RenderOutcome { report, previews })
    }
}
