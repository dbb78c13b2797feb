#![forbid(unsafe_code)]

//! Column descriptors for list forms.
//!
//! A [`Column`] names a heading, the row member it displays, and a
//! [`ColumnKind`] choosing the cell renderer. Image columns that iterate an
//! array are a distinct kind, so an array column is always an image column.

use chrono::NaiveDate;
use serde::Serialize;

/// Date layout used in wide viewports ("Mon, Jan 2 2006").
pub const LONG_DATE: &str = "%a, %b %-d %Y";
/// Date layout used in narrow viewports ("2 Jan").
pub const SHORT_DATE: &str = "%-d %b";
/// Edge of the image in an avatar cell, in pixels.
pub const AVATAR_PX: u32 = 64;
/// Edge of the image in an email-avatar cell, in pixels.
pub const EMAIL_AVATAR_PX: u32 = 40;

/// Cell renderer for a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Raw value when truthy.
    Plain,
    /// Raw value, with the cell's CSS class read from the named row member.
    Class(String),
    Date,
    Avatar,
    /// Small avatar followed by the value.
    EmailAvatar,
    /// Glyph whose class is the value.
    Icon,
    /// Check glyph when truthy.
    Bool,
    /// Inline text input holding the value.
    Edit,
    /// Image whose source is the value.
    Image,
    /// One image per array element, sourced from the element's `field`.
    MultiImage { field: String },
}

impl ColumnKind {
    /// The format tag exposed to templates.
    #[must_use]
    pub fn format(&self) -> &str {
        match self {
            Self::Class(member) => member,
            Self::Date => "date",
            Self::Avatar => "avatar",
            Self::EmailAvatar => "email-avatar",
            _ => "",
        }
    }

    #[must_use]
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::Image | Self::MultiImage { .. })
    }

    /// Whether the column renders anything besides plain text. Forms track
    /// this to know the table carries images or glyphs.
    #[must_use]
    pub const fn is_decorated(&self) -> bool {
        matches!(
            self,
            Self::Image | Self::MultiImage { .. } | Self::Bool | Self::Icon | Self::Edit
        )
    }
}

/// One column of a list form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    pub(crate) heading: String,
    pub(crate) model: String,
    pub(crate) kind: ColumnKind,
    pub(crate) width: Option<String>,
    pub(crate) max_chars: usize,
}

impl Column {
    #[must_use]
    pub fn new(heading: impl Into<String>, model: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            heading: heading.into(),
            model: model.into(),
            kind,
            width: None,
            max_chars: formwork_core::config::DEFAULT_MAX_CHARS,
        }
    }

    #[must_use]
    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    #[must_use]
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars.max(1);
        self
    }

    #[must_use]
    pub fn heading(&self) -> &str {
        &self.heading
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn kind(&self) -> &ColumnKind {
        &self.kind
    }

    #[must_use]
    pub fn width(&self) -> Option<&str> {
        self.width.as_deref()
    }

    #[must_use]
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub(crate) fn view(&self) -> ColumnView<'_> {
        let field = match &self.kind {
            ColumnKind::MultiImage { field } => field.as_str(),
            _ => "",
        };
        ColumnView {
            heading: &self.heading,
            model: &self.model,
            format: self.kind.format(),
            width: self.width.as_deref().unwrap_or(""),
            is_img: self.kind.is_image(),
            is_array: matches!(self.kind, ColumnKind::MultiImage { .. }),
            fieldname: field,
            is_bool: self.kind == ColumnKind::Bool,
            is_icon: self.kind == ColumnKind::Icon,
            can_edit: self.kind == ColumnKind::Edit,
            max_chars: self.max_chars,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ColumnView<'a> {
    heading: &'a str,
    model: &'a str,
    format: &'a str,
    width: &'a str,
    is_img: bool,
    is_array: bool,
    fieldname: &'a str,
    is_bool: bool,
    is_icon: bool,
    can_edit: bool,
    max_chars: usize,
}

/// Cut `s` to `max_chars` characters, marking the cut with `" ..."`.
#[must_use]
pub fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{} ...", &s[..end]),
        None => s.to_owned(),
    }
}

/// Format a date cell the way the synthesized templates lay it out.
/// Absent dates render empty.
#[must_use]
pub fn format_date(date: Option<NaiveDate>, narrow: bool) -> String {
    let layout = if narrow { SHORT_DATE } else { LONG_DATE };
    date.map(|d| d.format(layout).to_string()).unwrap_or_default()
}
