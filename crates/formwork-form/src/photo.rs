#![forbid(unsafe_code)]

//! Photo preview resolution.
//!
//! Photo fields are not projected with the other fields; once the form is
//! stamped, each one gets a [`PhotoPreview`] telling the collaborator what
//! to show in the `<model>Preview` image and its `<model>PreviewHint`.

use formwork_core::{DiagnosticKind, Record, Report, Value};

use crate::field::FieldType;
use crate::form::EditForm;
use crate::ui::UiSink;

/// CSS class hiding an empty preview and its hint.
pub const HIDDEN_CLASS: &str = "hidden";

/// Preview instructions for one photo field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoPreview {
    pub model: String,
    /// Name of the preview image element.
    pub preview_name: String,
    /// Name of the hint element shown alongside the preview.
    pub hint_name: String,
    /// Image source; `None` hides the preview and hint.
    pub src: Option<String>,
    /// A click on the preview should re-dispatch save
    /// (see [`EditForm::confirm_preview`]).
    pub confirm_saves: bool,
    /// Changes to the file input should trigger the attach callback
    /// (see [`EditForm::notify_attach`]).
    pub watch_attach: bool,
}

impl PhotoPreview {
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.src.is_none()
    }

    /// Write the preview into the live UI. Returns `false` when there is no
    /// preview element.
    pub fn apply<S: UiSink + ?Sized>(&self, sink: &mut S) -> bool {
        let src = self.src.as_deref().unwrap_or("");
        if !sink.set_value(&self.preview_name, src) {
            tracing::debug!(preview = %self.preview_name, "no preview element to write into");
            return false;
        }
        let hidden = self.is_hidden();
        sink.toggle_class(&self.preview_name, HIDDEN_CLASS, hidden);
        sink.toggle_class(&self.hint_name, HIDDEN_CLASS, hidden);
        true
    }
}

impl EditForm {
    /// Resolve a preview for every top-level photo field.
    ///
    /// Text members are used as the image source directly; file members
    /// contribute their `data`. A missing member shows nothing.
    pub fn photo_previews<R: Record>(&self, record: &R, report: &mut Report) -> Vec<PhotoPreview> {
        let schema = R::schema();
        let callbacks = self.callbacks();
        self.fields()
            .filter(|f| f.field_type() == FieldType::Photo && !f.model().is_empty())
            .map(|field| {
                let model = field.model();
                let src = match schema.member(model).map(|m| m.get(record)) {
                    Some(Value::Text(s)) => s,
                    Some(Value::File(f)) => f.data,
                    None => String::new(),
                    Some(other) => {
                        report.push(
                            DiagnosticKind::Unsupported,
                            model,
                            format!("cannot preview a {} member", other.kind()),
                        );
                        String::new()
                    }
                };
                PhotoPreview {
                    model: model.to_owned(),
                    preview_name: format!("{model}Preview"),
                    hint_name: format!("{model}PreviewHint"),
                    src: (!src.is_empty()).then_some(src),
                    confirm_saves: callbacks.has_save() && field.is_photo_upload(),
                    watch_attach: callbacks.has_attach(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwork_core::{FileField, record};

    #[derive(Default)]
    struct Profile {
        avatar: FileField,
        banner: String,
        count: i64,
    }

    record!(Profile {
        "Avatar" => avatar,
        "Banner" => banner,
        "Count" => count,
    });

    fn form() -> EditForm {
        let mut f = EditForm::new("", "Member");
        f.row(4)
            .add_photo(1, "Avatar", "Avatar")
            .add_preview(1, "Banner", "Banner")
            .add_thumbnail(1, "Count", "Count")
            .add_thumbnail(1, "Ghost", "Ghost");
        f
    }

    #[test]
    fn resolves_sources() {
        let m = Profile {
            avatar: FileField {
                data: "data:a".into(),
                ..Default::default()
            },
            banner: "http://img/b.png".into(),
            count: 3,
        };
        let mut report = Report::new();
        let previews = form().photo_previews(&m, &mut report);
        assert_eq!(previews.len(), 4);
        assert_eq!(previews[0].src.as_deref(), Some("data:a"));
        assert_eq!(previews[0].preview_name, "AvatarPreview");
        assert_eq!(previews[0].hint_name, "AvatarPreviewHint");
        assert_eq!(previews[1].src.as_deref(), Some("http://img/b.png"));
        assert!(previews[2].is_hidden());
        assert!(previews[3].is_hidden());
        assert!(report.has(DiagnosticKind::Unsupported));
        assert!(report.mentions("Count"));
    }

    #[test]
    fn confirm_and_attach_flags() {
        let mut f = form();
        let mut report = Report::new();
        let previews = f.photo_previews(&Profile::default(), &mut report);
        assert!(!previews[0].confirm_saves);
        assert!(!previews[0].watch_attach);

        f.save_event(|_| {}).attach_event(|| {});
        let previews = f.photo_previews(&Profile::default(), &mut report);
        assert!(previews[0].confirm_saves);
        assert!(!previews[1].confirm_saves);
        assert!(previews[1].watch_attach);
    }
}
