#![forbid(unsafe_code)]

//! Template synthesis for list and tree views.
//!
//! Sources are produced in the host's template dialect: `{{.Member}}` reads
//! a member of the current datum, `{{range}}`/`{{if}}`/`{{define}}` are
//! the usual control actions, and cells call three host functions:
//! `date <value> <layout>` (chrono layout), `avatar <value> <px>`, and
//! `safeURL`.
//!
//! The layout types derive `Hash`; the cache fingerprints them to detect a
//! name being reused for a different layout.

use formwork_core::EngineConfig;
use formwork_core::config::DEFAULT_NARROW_BREAKPOINT_PX;

use crate::column::{AVATAR_PX, Column, ColumnKind, EMAIL_AVATAR_PX, LONG_DATE, SHORT_DATE};

/// Synthesis inputs that come from the host environment rather than the
/// form definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthOptions {
    /// Viewport width below which dates use the short layout.
    pub narrow_breakpoint_px: u32,
    /// Current viewport width, when known. Unknown counts as wide.
    pub viewport_px: Option<u32>,
}

impl Default for SynthOptions {
    fn default() -> Self {
        Self {
            narrow_breakpoint_px: DEFAULT_NARROW_BREAKPOINT_PX,
            viewport_px: None,
        }
    }
}

impl From<&EngineConfig> for SynthOptions {
    fn from(config: &EngineConfig) -> Self {
        Self {
            narrow_breakpoint_px: config.narrow_breakpoint_px,
            viewport_px: None,
        }
    }
}

impl SynthOptions {
    #[must_use]
    pub fn with_viewport(mut self, px: u32) -> Self {
        self.viewport_px = Some(px);
        self
    }

    #[must_use]
    pub fn is_narrow(&self) -> bool {
        self.viewport_px.is_some_and(|w| w < self.narrow_breakpoint_px)
    }
}

/// Options for one render call of a list or tree form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub synth: SynthOptions,
    /// Drop any template cached under the render name before building.
    pub refresh: bool,
}

impl From<&EngineConfig> for RenderOptions {
    fn from(config: &EngineConfig) -> Self {
        Self {
            synth: SynthOptions::from(config),
            refresh: false,
        }
    }
}

impl RenderOptions {
    #[must_use]
    pub fn refresh(mut self) -> Self {
        self.refresh = true;
        self
    }

    #[must_use]
    pub fn with_viewport(mut self, px: u32) -> Self {
        self.synth = self.synth.with_viewport(px);
        self
    }
}

/// Title block of a synthesized view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub(crate) struct Header {
    /// Title or icon configured; without either there is no title block.
    pub(crate) titled: bool,
    pub(crate) add: bool,
    pub(crate) print: bool,
}

impl Header {
    fn open(&self, src: &mut String, container: bool) {
        if !self.titled {
            return;
        }
        if container {
            src.push_str("\n<div class=\"data-container\">");
        }
        src.push_str(
            r#"
<div class="row data-table-header">
  <h3 class="column column-90" id="legend">
    <i class="fa {{.Icon}} fa-lg" style="font-size: 3rem"></i>
    {{.Title}}
  </h3>
"#,
        );
        if self.add {
            src.push_str(
                r#"  <div class="column col-center">
    <i class="data-add-btn fa fa-plus-circle fa-lg no-print"></i>
  </div>
"#,
            );
        }
        if self.print {
            src.push_str(
                r#"  <div class="column col-center">
    <i class="data-print-btn fa fa-print fa-lg no-print"></i>
  </div>
"#,
            );
        }
        src.push_str("</div>\n");
    }

    fn close(&self, src: &mut String, container: bool) {
        if self.titled && container {
            src.push_str("</div>\n");
        }
    }
}

/// Everything a list template depends on.
#[derive(Debug, Hash)]
pub(crate) struct ListLayout<'a> {
    pub(crate) columns: &'a [Column],
    pub(crate) header: Header,
    pub(crate) draggable: bool,
    pub(crate) set_widths: bool,
    /// Wrap in the outer container and emit the action-grid slot.
    pub(crate) container: bool,
    pub(crate) narrow: bool,
}

impl ListLayout<'_> {
    pub(crate) fn source(&self) -> String {
        let mut src = String::new();
        self.header.open(&mut src, self.container);
        src.push_str(
            r#"<table class="data-table" id="list-form">
  <thead>
    <tr>
      {{range .Cols}}<th>{{.Heading}}</th>{{end}}
    </tr>
  </thead>
  <tbody>
{{range .Data}}
    <tr class="data-row"#,
        );
        if self.draggable {
            src.push_str(r#" draggable" draggable="true""#);
        } else {
            src.push('"');
        }
        src.push_str(" key=\"{{.ID}}\">\n");
        for col in self.columns {
            src.push_str(&self.cell(col));
        }
        src.push_str("    </tr>\n{{end}}\n  </tbody>\n</table>\n");
        if self.container {
            src.push_str("<div id=\"action-grid\" class=\"no-print hidden\"></div>\n");
        }
        self.header.close(&mut src, self.container);
        src
    }

    fn cell(&self, col: &Column) -> String {
        let width = match (self.set_widths, col.width()) {
            (true, Some(w)) => format!(" width=\"{w}\""),
            _ => String::new(),
        };
        let m = col.model();
        match col.kind() {
            ColumnKind::Image => format!(
                "<td{width}>{{{{if .{m}}}}}<img name=\"{m}-{{{{.ID}}}}\" src=\"{{{{.{m} | safeURL}}}}\">{{{{end}}}}</td>\n"
            ),
            ColumnKind::MultiImage { field } => format!(
                "<td{width}>{{{{$id := .ID}}}}{{{{range $k, $v := .{m}}}}}{{{{if $v.{field}}}}}<img name=\"{m}-{{{{$k}}}}-{{{{$id}}}}\" src=\"{{{{$v.{field} | safeURL}}}}\">{{{{end}}}}{{{{end}}}}</td>\n"
            ),
            ColumnKind::Bool => format!(
                "<td{width}>{{{{if .{m}}}}}<i class=\"fa fa-check fa-lg\"></i>{{{{end}}}}</td>\n"
            ),
            ColumnKind::Icon => format!("<td{width}><i class=\"{{{{.{m}}}}}\"></i></td>\n"),
            ColumnKind::Date => {
                let layout = if self.narrow { SHORT_DATE } else { LONG_DATE };
                format!("<td{width}>{{{{if .{m}}}}}{{{{date .{m} \"{layout}\"}}}}{{{{end}}}}</td>\n")
            }
            ColumnKind::Avatar => format!(
                "<td{width}>{{{{if .{m}}}}}<img src=\"{{{{avatar .{m} {AVATAR_PX}}}}}\">{{{{end}}}}</td>\n"
            ),
            ColumnKind::EmailAvatar => format!(
                "<td{width}>{{{{if .{m}}}}}<img src=\"{{{{avatar .{m} {EMAIL_AVATAR_PX}}}}}\"> {{{{.{m}}}}}{{{{end}}}}</td>\n"
            ),
            ColumnKind::Edit => format!(
                "<td{width}>{{{{if .{m}}}}}<input type=\"text\" value=\"{{{{.{m}}}}}\">{{{{end}}}}</td>\n"
            ),
            ColumnKind::Class(class) => format!(
                "<td{width} class=\"{{{{.{class}}}}}\">{{{{if .{m}}}}}{{{{.{m}}}}}{{{{end}}}}</td>\n"
            ),
            ColumnKind::Plain => {
                format!("<td{width}>{{{{if .{m}}}}}{{{{.{m}}}}}{{{{end}}}}</td>\n")
            }
        }
    }
}

/// Everything a tree template depends on.
#[derive(Debug, Hash)]
pub(crate) struct TreeLayout<'a> {
    pub(crate) name: &'a str,
    pub(crate) header: Header,
}

impl TreeLayout<'_> {
    /// A recursive template: each node renders its label, and nodes with
    /// children render a collapsible nested list.
    pub(crate) fn source(&self) -> String {
        let node = format!("{}-node", self.name);
        let mut src = String::new();
        self.header.open(&mut src, true);
        src.push_str(&format!(
            r#"<ul class="css-treeview data-table">
{{{{range .Data}}}}{{{{template "{node}" .}}}}{{{{end}}}}
</ul>
"#
        ));
        self.header.close(&mut src, true);
        src.push_str(&format!(
            r#"{{{{define "{node}"}}}}<li key="{{{{.Key}}}}">{{{{if .Children}}}}<input type="checkbox" id="item-{{{{.Key}}}}" />
<label for="item-{{{{.Key}}}}">{{{{.Label}}}}</label>
<ul>{{{{range .Children}}}}{{{{template "{node}" .}}}}{{{{end}}}}</ul>{{{{else}}}}{{{{.Label}}}}{{{{end}}}}</li>{{{{end}}}}
"#
        ));
        src
    }
}
