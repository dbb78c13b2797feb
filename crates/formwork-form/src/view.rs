#![forbid(unsafe_code)]

//! Serializable snapshot of an edit form, handed to template execution.
//!
//! Keys are PascalCase (`Title`, `Rows`, `Fields`, `Value`, `Checked`, ...)
//! so templates address them as `.Title`, `.Rows` and so on.

use serde::Serialize;

use crate::field::{EditOption, Field, FieldFlags, FieldType, SelectGroup};
use crate::form::EditForm;
use crate::panel::{Panel, Swapper};
use crate::row::Row;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FormView<'a> {
    title: &'a str,
    icon: &'a str,
    #[serde(rename = "ID")]
    id: i64,
    rows: Vec<RowView<'a>>,
}

impl<'a> FormView<'a> {
    pub(crate) fn new(form: &'a EditForm) -> Self {
        Self {
            title: form.title(),
            icon: form.icon(),
            id: form.id(),
            rows: rows(form.rows()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RowView<'a> {
    span: u16,
    fields: Vec<FieldView<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FieldView<'a> {
    span: u16,
    label: &'a str,
    #[serde(rename = "Type")]
    field_type: FieldType,
    model: &'a str,
    value: &'a str,
    checked: bool,
    focusme: bool,
    readonly: bool,
    extras: &'a str,
    class: &'a str,
    step: &'a str,
    is_float: bool,
    decimals: u8,
    options: &'a [EditOption],
    swapper: Option<SwapperView<'a>>,
    selected: i64,
    group: &'a [SelectGroup],
    code_block: bool,
    big_text: bool,
    photo_upload: bool,
    is_uploaded: bool,
    preview: bool,
    thumbnail: bool,
}

impl<'a> From<&'a Field> for FieldView<'a> {
    fn from(f: &'a Field) -> Self {
        let flag = |bit: FieldFlags| f.flags.contains(bit);
        Self {
            span: f.span,
            label: &f.label,
            field_type: f.field_type,
            model: &f.model,
            value: &f.value,
            checked: f.checked,
            focusme: flag(FieldFlags::FOCUS),
            readonly: flag(FieldFlags::READONLY),
            extras: &f.extras,
            class: &f.class,
            step: &f.step,
            is_float: flag(FieldFlags::FLOAT),
            decimals: f.decimals,
            options: &f.options,
            swapper: f.swapper.as_ref().map(SwapperView::from),
            selected: f.selected,
            group: &f.group,
            code_block: flag(FieldFlags::CODE_BLOCK),
            big_text: flag(FieldFlags::BIG_TEXT),
            photo_upload: flag(FieldFlags::PHOTO_UPLOAD),
            is_uploaded: flag(FieldFlags::IS_UPLOADED),
            preview: flag(FieldFlags::PREVIEW),
            thumbnail: flag(FieldFlags::THUMBNAIL),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SwapperView<'a> {
    name: &'a str,
    selected: usize,
    panels: Vec<PanelView<'a>>,
}

impl<'a> From<&'a Swapper> for SwapperView<'a> {
    fn from(s: &'a Swapper) -> Self {
        Self {
            name: s.name(),
            selected: s.selected(),
            panels: s.panels().iter().map(PanelView::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PanelView<'a> {
    name: &'a str,
    rows: Vec<RowView<'a>>,
    bind_with_form: bool,
}

impl<'a> From<&'a Panel> for PanelView<'a> {
    fn from(p: &'a Panel) -> Self {
        Self {
            name: p.name(),
            rows: rows(p.rows()),
            bind_with_form: p.binds_with_form(),
        }
    }
}

fn rows(rows: &[Row]) -> Vec<RowView<'_>> {
    rows.iter()
        .map(|r| RowView {
            span: r.span(),
            fields: r.fields().iter().map(FieldView::from).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn form_serializes_pascal_case() {
        let mut form = EditForm::new("fa-cog", "Settings").with_id(3);
        form.row(2)
            .add_input(1, "Name", "Name")
            .add_code_block(1, "Log", "Log");
        let v = serde_json::to_value(form.view()).unwrap();
        assert_eq!(v["Title"], json!("Settings"));
        assert_eq!(v["Icon"], json!("fa-cog"));
        assert_eq!(v["ID"], json!(3));
        let fields = &v["Rows"][0]["Fields"];
        assert_eq!(fields[0]["Type"], json!("text"));
        assert_eq!(fields[0]["Readonly"], json!(false));
        assert_eq!(fields[1]["CodeBlock"], json!(true));
        assert_eq!(fields[1]["Readonly"], json!(true));
        assert_eq!(fields[0]["Swapper"], json!(null));
    }

    #[test]
    fn swapper_serializes_panels() {
        let mut s = Swapper::new("mode");
        s.add_panel("a").row(1).add_input(1, "X", "X");
        s.add_panel("b").set_bind_with_form(false);
        s.select(1);
        let mut form = EditForm::new("", "T");
        form.row(1).add_swapper(1, "Mode", s);
        let v = serde_json::to_value(form.view()).unwrap();
        let sw = &v["Rows"][0]["Fields"][0]["Swapper"];
        assert_eq!(sw["Name"], json!("mode"));
        assert_eq!(sw["Selected"], json!(1));
        assert_eq!(sw["Panels"][1]["BindWithForm"], json!(false));
        assert_eq!(sw["Panels"][0]["Rows"][0]["Fields"][0]["Model"], json!("X"));
    }
}
