#![forbid(unsafe_code)]

//! List forms: a titled table of rows described by [`Column`]s.
//!
//! The row template is synthesized from the columns on the first render of
//! a name and cached by that name (see [`TemplateCache`]). The data handed
//! to the template is the form itself, serialized with PascalCase keys
//! (`Title`, `Icon`, `ID`, `Cols`, `Data`), so rows are addressed as
//! `{{range .Data}}`. Each row is expected to expose an `ID` member, which
//! becomes the row key.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Data not serializable | Row type's `Serialize` fails | [`RenderError::Serialize`] |
//! | Target missing | Executor finds no target | [`RenderError::Execute`] |
//! | Custom template missing | Loader has no such name | [`RenderError::TemplateNotFound`] |

use std::rc::Rc;

use formwork_core::config::DEFAULT_MAX_CHARS;
use formwork_core::{EngineConfig, RenderError, Template, TemplateExecutor, TemplateSource};
use serde::Serialize;

use crate::cache::TemplateCache;
use crate::column::{Column, ColumnKind, ColumnView, truncate};
use crate::events::{GridCallbacks, GridEvent, RowClick};
use crate::synth::{Header, ListLayout, RenderOptions};

#[derive(Debug, Clone)]
pub struct ListForm {
    title: String,
    icon: String,
    id: i64,
    columns: Vec<Column>,
    callbacks: GridCallbacks,
    has_set_width: bool,
    draggable: bool,
    has_images: bool,
    max_chars: usize,
}

impl ListForm {
    #[must_use]
    pub fn new(icon: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: icon.into(),
            id: 0,
            columns: Vec::new(),
            callbacks: GridCallbacks::default(),
            has_set_width: false,
            draggable: false,
            has_images: false,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    /// A list form whose columns truncate at the configured length.
    #[must_use]
    pub fn with_config(icon: impl Into<String>, title: impl Into<String>, config: &EngineConfig) -> Self {
        let mut form = Self::new(icon, title);
        form.max_chars = config.max_chars.max(1);
        form
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
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn callbacks(&self) -> &GridCallbacks {
        &self.callbacks
    }

    /// Whether any column renders images or glyphs.
    #[must_use]
    pub fn has_images(&self) -> bool {
        self.has_images
    }

    #[must_use]
    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    #[must_use]
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Truncate cell text at this form's limit.
    #[must_use]
    pub fn truncate(&self, s: &str) -> String {
        truncate(s, self.max_chars)
    }

    // ── Columns ─────────────────────────────────────────────────────

    fn push(&mut self, heading: &str, model: &str, kind: ColumnKind) -> &mut Self {
        self.has_images |= kind.is_decorated();
        let column = Column::new(heading, model, kind).with_max_chars(self.max_chars);
        self.columns.push(column);
        self
    }

    pub fn column(&mut self, heading: &str, model: &str) -> &mut Self {
        self.push(heading, model, ColumnKind::Plain)
    }

    /// A plain column whose cell CSS class is read from row member `class`.
    /// An empty `class` gives a plain column.
    pub fn column_format(&mut self, heading: &str, model: &str, class: &str) -> &mut Self {
        let kind = if class.is_empty() {
            ColumnKind::Plain
        } else {
            ColumnKind::Class(class.to_owned())
        };
        self.push(heading, model, kind)
    }

    pub fn date_column(&mut self, heading: &str, model: &str) -> &mut Self {
        self.push(heading, model, ColumnKind::Date)
    }

    pub fn avatar_column(&mut self, heading: &str, model: &str) -> &mut Self {
        self.push(heading, model, ColumnKind::Avatar)
    }

    pub fn email_avatar_column(&mut self, heading: &str, model: &str) -> &mut Self {
        self.push(heading, model, ColumnKind::EmailAvatar)
    }

    pub fn img_column(&mut self, heading: &str, model: &str) -> &mut Self {
        self.push(heading, model, ColumnKind::Image)
    }

    pub fn edit_column(&mut self, heading: &str, model: &str) -> &mut Self {
        self.push(heading, model, ColumnKind::Edit)
    }

    /// One image per element of the array member `model`, sourced from each
    /// element's `field`.
    pub fn multi_img_column(&mut self, heading: &str, model: &str, field: &str) -> &mut Self {
        self.push(
            heading,
            model,
            ColumnKind::MultiImage {
                field: field.to_owned(),
            },
        )
    }

    pub fn bool_column(&mut self, heading: &str, model: &str) -> &mut Self {
        self.push(heading, model, ColumnKind::Bool)
    }

    pub fn icon_column(&mut self, heading: &str, model: &str) -> &mut Self {
        self.push(heading, model, ColumnKind::Icon)
    }

    /// Assign widths to the existing columns in order. Extra widths are
    /// ignored; columns past the end keep no width.
    pub fn set_widths<S: AsRef<str>>(&mut self, widths: &[S]) -> &mut Self {
        self.has_set_width = true;
        for (col, w) in self.columns.iter_mut().zip(widths) {
            col.width = Some(w.as_ref().to_owned());
        }
        self
    }

    pub fn draggable(&mut self) -> &mut Self {
        self.draggable = true;
        self
    }

    // ── Callbacks ───────────────────────────────────────────────────

    pub fn row_event(&mut self, cb: impl Fn(&str) + 'static) -> &mut Self {
        self.callbacks.row = Some(Rc::new(cb));
        self
    }

    pub fn cancel_event(&mut self, cb: impl Fn() + 'static) -> &mut Self {
        self.callbacks.cancel = Some(Rc::new(cb));
        self
    }

    pub fn new_row_event(&mut self, cb: impl Fn() + 'static) -> &mut Self {
        self.callbacks.new_row = Some(Rc::new(cb));
        self
    }

    pub fn print_event(&mut self, cb: impl Fn() + 'static) -> &mut Self {
        self.callbacks.print = Some(Rc::new(cb));
        self
    }

    pub fn dispatch(&self, event: &GridEvent) -> bool {
        self.callbacks.dispatch(event)
    }

    /// Resolve a click inside the table to a row and raise the row event.
    pub fn click(&self, click: &RowClick) -> Option<String> {
        self.callbacks.click(click)
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn layout(&self, container: bool, opts: &RenderOptions) -> ListLayout<'_> {
        ListLayout {
            columns: &self.columns,
            header: Header {
                titled: !self.title.is_empty() || !self.icon.is_empty(),
                add: self.callbacks.has_new_row(),
                print: self.callbacks.has_print(),
            },
            draggable: self.draggable,
            set_widths: self.has_set_width,
            container,
            narrow: opts.synth.is_narrow(),
        }
    }

    /// The template for `name`, synthesized from this form's layout when the
    /// cache does not hold it yet.
    pub fn template(
        &self,
        name: &str,
        container: bool,
        cache: &TemplateCache,
        opts: &RenderOptions,
    ) -> std::sync::Arc<Template> {
        if opts.refresh {
            cache.invalidate(name);
        }
        let layout = self.layout(container, opts);
        cache.get_or_build(name, cache.fingerprint(&layout), || layout.source())
    }

    fn stamp<T, E>(
        &self,
        name: &str,
        target: &str,
        data: &[T],
        container: bool,
        cache: &TemplateCache,
        executor: &mut E,
        opts: &RenderOptions,
    ) -> Result<(), RenderError>
    where
        T: Serialize,
        E: TemplateExecutor + ?Sized,
    {
        let _span = tracing::debug_span!(
            "render_list_form",
            title = %self.title,
            template = name,
            rows = data.len()
        )
        .entered();
        let template = self.template(name, container, cache, opts);
        let view = serde_json::to_value(ListView {
            title: &self.title,
            icon: &self.icon,
            id: self.id,
            cols: self.columns.iter().map(Column::view).collect(),
            data,
        })?;
        executor.execute(&template, target, &view)?;
        Ok(())
    }

    /// Render `data` at `target` with the synthesized template `name`,
    /// wrapped in the outer container with an action-grid slot.
    pub fn render<T, E>(
        &self,
        name: &str,
        target: &str,
        data: &[T],
        cache: &TemplateCache,
        executor: &mut E,
        opts: &RenderOptions,
    ) -> Result<(), RenderError>
    where
        T: Serialize,
        E: TemplateExecutor + ?Sized,
    {
        self.stamp(name, target, data, true, cache, executor, opts)
    }

    /// Like [`render`](Self::render), without the outer container and the
    /// action-grid slot.
    pub fn render_no_container<T, E>(
        &self,
        name: &str,
        target: &str,
        data: &[T],
        cache: &TemplateCache,
        executor: &mut E,
        opts: &RenderOptions,
    ) -> Result<(), RenderError>
    where
        T: Serialize,
        E: TemplateExecutor + ?Sized,
    {
        self.stamp(name, target, data, false, cache, executor, opts)
    }

    /// Render `data` itself with the caller's template `name`.
    pub fn render_custom<T, L, E>(
        &self,
        name: &str,
        target: &str,
        data: &T,
        loader: &L,
        executor: &mut E,
    ) -> Result<(), RenderError>
    where
        T: Serialize + ?Sized,
        L: TemplateSource + ?Sized,
        E: TemplateExecutor + ?Sized,
    {
        let template = loader.template(name)?;
        let data = serde_json::to_value(data)?;
        executor.execute(&template, target, &data)?;
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ListView<'a, T> {
    title: &'a str,
    icon: &'a str,
    #[serde(rename = "ID")]
    id: i64,
    cols: Vec<ColumnView<'a>>,
    data: &'a [T],
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwork_core::ExecuteError;
    use std::cell::Cell;

    #[derive(Default)]
    struct Capture {
        calls: Vec<(String, String, serde_json::Value)>,
    }

    impl TemplateExecutor for Capture {
        fn execute(
            &mut self,
            template: &Template,
            target: &str,
            data: &serde_json::Value,
        ) -> Result<(), ExecuteError> {
            if target.is_empty() {
                return Err(ExecuteError::TargetMissing {
                    target: target.to_owned(),
                });
            }
            self.calls
                .push((template.source().to_owned(), target.to_owned(), data.clone()));
            Ok(())
        }
    }

    #[derive(Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct Task {
        #[serde(rename = "ID")]
        id: i64,
        name: String,
        done: bool,
    }

    fn tasks() -> Vec<Task> {
        vec![
            Task {
                id: 1,
                name: "write".into(),
                done: true,
            },
            Task {
                id: 2,
                name: "test".into(),
                done: false,
            },
        ]
    }

    fn form() -> ListForm {
        let mut f = ListForm::new("fa-list", "Tasks").with_id(5);
        f.column("Name", "Name").bool_column("Done", "Done");
        f
    }

    #[test]
    fn builders_record_columns() {
        let mut f = ListForm::new("", "");
        f.column("A", "A")
            .column_format("B", "B", "BClass")
            .date_column("C", "C")
            .multi_img_column("D", "D", "Url");
        assert!(f.has_images());
        let kinds: Vec<_> = f.columns().iter().map(|c| c.kind().clone()).collect();
        assert_eq!(kinds[1], ColumnKind::Class("BClass".into()));
        assert_eq!(kinds[2], ColumnKind::Date);
        assert!(kinds[3].is_image());
        assert!(f.columns().iter().all(|c| c.max_chars() == DEFAULT_MAX_CHARS));
    }

    #[test]
    fn plain_columns_leave_has_images_unset() {
        let mut f = ListForm::new("", "");
        f.column("A", "A").date_column("B", "B").avatar_column("C", "C");
        assert!(!f.has_images());
    }

    #[test]
    fn set_widths_zips_columns() {
        let mut f = form();
        f.set_widths(&["40%", "10%", "50%"]);
        assert_eq!(f.columns()[0].width(), Some("40%"));
        assert_eq!(f.columns()[1].width(), Some("10%"));

        let mut g = form();
        g.set_widths(&["40%"]);
        assert_eq!(g.columns()[1].width(), None);
    }

    #[test]
    fn config_sets_truncation() {
        let cfg = EngineConfig::default().with_max_chars(4);
        let mut f = ListForm::with_config("", "T", &cfg);
        f.column("A", "A");
        assert_eq!(f.columns()[0].max_chars(), 4);
        assert_eq!(f.truncate("abcdef"), "abcd ...");
    }

    #[test]
    fn render_serializes_form_and_rows() {
        let cache = TemplateCache::new();
        let mut exec = Capture::default();
        form()
            .render("tasks", "#main", &tasks(), &cache, &mut exec, &RenderOptions::default())
            .unwrap();
        let (src, target, data) = &exec.calls[0];
        assert_eq!(target, "#main");
        assert!(src.contains("data-container"));
        assert!(src.contains("{{if .Done}}"));
        assert_eq!(data["Title"], "Tasks");
        assert_eq!(data["ID"], 5);
        assert_eq!(data["Cols"][1]["IsBool"], true);
        assert_eq!(data["Data"][1]["Name"], "test");
        assert_eq!(data["Data"][0]["ID"], 1);
    }

    #[test]
    fn second_render_reuses_cached_template() {
        let cache = TemplateCache::new();
        let mut exec = Capture::default();
        let opts = RenderOptions::default();
        let f = form();
        f.render("tasks", "#a", &tasks(), &cache, &mut exec, &opts).unwrap();
        let first = cache.get("tasks").unwrap();
        f.render("tasks", "#b", &tasks(), &cache, &mut exec, &opts).unwrap();
        assert!(std::sync::Arc::ptr_eq(&first, &cache.get("tasks").unwrap()));
        assert_eq!(exec.calls[0].0, exec.calls[1].0);
    }

    #[test]
    fn name_reuse_serves_stale_until_refresh() {
        let cache = TemplateCache::new();
        let mut exec = Capture::default();
        let opts = RenderOptions::default();
        form()
            .render("shared", "#a", &tasks(), &cache, &mut exec, &opts)
            .unwrap();

        let mut other = ListForm::new("", "");
        other.column("Only", "Name");
        other
            .render("shared", "#a", &tasks(), &cache, &mut exec, &opts)
            .unwrap();
        assert_eq!(exec.calls[1].0, exec.calls[0].0);
        let fp = cache.fingerprint(&other.layout(true, &opts));
        assert!(cache.is_stale("shared", fp));

        other
            .render("shared", "#a", &tasks(), &cache, &mut exec, &opts.refresh())
            .unwrap();
        assert!(!exec.calls[2].0.contains("{{if .Done}}"));
        assert!(!cache.is_stale("shared", fp));
    }

    #[test]
    fn no_container_variant() {
        let cache = TemplateCache::new();
        let mut exec = Capture::default();
        form()
            .render_no_container("bare", "#x", &tasks(), &cache, &mut exec, &RenderOptions::default())
            .unwrap();
        assert!(!exec.calls[0].0.contains("data-container"));
        assert!(!exec.calls[0].0.contains("action-grid"));
    }

    #[test]
    fn header_follows_callbacks() {
        let cache = TemplateCache::new();
        let mut exec = Capture::default();
        let mut f = form();
        f.new_row_event(|| {}).print_event(|| {});
        f.render("hdr", "#x", &tasks(), &cache, &mut exec, &RenderOptions::default())
            .unwrap();
        assert!(exec.calls[0].0.contains("data-add-btn"));
        assert!(exec.calls[0].0.contains("data-print-btn"));
    }

    #[test]
    fn narrow_viewport_uses_short_dates() {
        let cache = TemplateCache::new();
        let mut f = ListForm::new("", "");
        f.date_column("Due", "Due");
        let t = f.template("d", true, &cache, &RenderOptions::default().with_viewport(400));
        assert!(t.source().contains(crate::column::SHORT_DATE));
    }

    #[test]
    fn render_custom_passes_data_through() {
        struct Loader;
        impl TemplateSource for Loader {
            fn load(&self, name: &str) -> Option<String> {
                (name == "cards").then(|| "{{range .}}{{.Name}}{{end}}".to_owned())
            }
        }
        let mut exec = Capture::default();
        let f = form();
        f.render_custom("cards", "#c", &tasks(), &Loader, &mut exec).unwrap();
        assert_eq!(exec.calls[0].2[0]["Name"], "write");
        assert!(matches!(
            f.render_custom("nope", "#c", &tasks(), &Loader, &mut exec),
            Err(RenderError::TemplateNotFound { .. })
        ));
    }

    #[test]
    fn missing_target_is_an_error() {
        let cache = TemplateCache::new();
        let mut exec = Capture::default();
        let err = form()
            .render("t", "", &tasks(), &cache, &mut exec, &RenderOptions::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::Execute(ExecuteError::TargetMissing { .. })));
    }

    #[test]
    fn row_clicks_reach_callback() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let mut f = form();
        f.row_event(move |key| {
            assert_eq!(key, "2");
            counter.set(counter.get() + 1);
        });
        assert_eq!(f.click(&RowClick::new("TD").with_parent_key("2")).as_deref(), Some("2"));
        assert!(f.click(&RowClick::new("INPUT").with_parent_key("2")).is_none());
        assert!(f.dispatch(&GridEvent::Row("2".into())));
        assert!(!f.dispatch(&GridEvent::Cancel));
        assert_eq!(hits.get(), 2);
    }
}
