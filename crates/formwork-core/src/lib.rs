#![forbid(unsafe_code)]

//! Core value model for Formwork.
//!
//! This crate provides:
//! - [`Value`] / [`ValueKind`]: the closed set of runtime kinds a record
//!   member can hold
//! - [`coerce`]: the coercion matrix between display values and record values
//! - [`Record`] / [`Schema`]: explicit per-type binding tables that replace
//!   runtime name resolution
//! - [`Report`] / [`Diagnostic`]: non-fatal outcome collection for the
//!   projection and binding walks
//! - [`EngineConfig`]: engine-wide policy knobs
//! - [`TemplateExecutor`] / [`TemplateSource`]: the template execution
//!   collaborator boundary

pub mod coerce;
pub mod config;
pub mod diag;
pub mod record;
pub mod render;
pub mod value;

pub use coerce::{
    CoerceError, Coerced, DisplayHint, DisplayValue, InvalidDatePolicy, Projected, from_display,
    to_display,
};
pub use config::{ConfigError, EngineConfig};
pub use diag::{Diagnostic, DiagnosticKind, Report, ShapeError};
pub use record::{FieldValue, Member, MemberError, Record, Schema, SchemaBuilder};
pub use render::{ExecuteError, RenderError, Template, TemplateExecutor, TemplateSource};
pub use value::{FileField, Number, Value, ValueKind};

/// Layout used for calendar dates on both sides of the coercion matrix.
pub const DATE_LAYOUT: &str = "%Y-%m-%d";
