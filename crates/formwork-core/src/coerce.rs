#![forbid(unsafe_code)]

//! The coercion matrix between display values and record values.
//!
//! Two directions:
//!
//! - [`to_display`]: record value → what a control shows ([`Projected`]).
//! - [`from_display`]: what a control holds ([`DisplayValue`]) → a value of
//!   the destination member's [`ValueKind`].
//!
//! # Invariants
//!
//! 1. Coercion never fails hard. [`Coerced::value`] is always usable; a
//!    failed parse yields the destination's zero value and an issue.
//! 2. Floats project with two decimals. Parsing back into a float keeps full
//!    precision, so only the parse direction round-trips exactly.
//! 3. `"false"`, `"False"`, `"no"`, `"No"` and `""` are the only strings that
//!    coerce to `false`.
//! 4. A destination outside the matrix receives a string write of the input
//!    and an [`CoerceError::UnsupportedTarget`] issue.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Numeric parse | Non-numeric text | Zero value + [`CoerceError::Parse`] |
//! | Date parse | Not `YYYY-MM-DD` | Zero date wrapper + [`CoerceError::InvalidDate`] |
//! | Unknown source | [`Value::Unsupported`] projected | Its string form + defect issue |
//! | Unknown destination | Pairing outside the matrix | String write + defect issue |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::DATE_LAYOUT;
use crate::value::{Number, Value, ValueKind, zero_date};

/// What a control holds when the binding engine reads it back.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Raw contents of a date input, parsed strictly as `YYYY-MM-DD`.
    Date(String),
}

impl DisplayValue {
    fn variant_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Date(_) => "date",
        }
    }

    /// String written when the destination falls outside the matrix.
    fn fallback_text(&self) -> String {
        match self {
            Self::Text(s) | Self::Date(s) => s.clone(),
            Self::Int(v) => v.to_string(),
            Self::Float(v) => format_fixed6(*v),
            Self::Bool(b) => bool_text(*b).to_owned(),
        }
    }
}

/// What projection produces for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Projected {
    /// Goes into the field's `value`.
    Text(String),
    /// Goes into the field's `checked` flag.
    Checked(bool),
}

/// Per-field refinement consulted by both directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayHint {
    /// The field holds a floating point number (affects optional numbers).
    pub is_float: bool,
}

impl DisplayHint {
    #[must_use]
    pub const fn float(is_float: bool) -> Self {
        Self { is_float }
    }
}

/// Non-fatal coercion problems.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoerceError {
    #[error("cannot parse {input:?} as {target}: {reason}")]
    Parse {
        input: String,
        target: ValueKind,
        reason: String,
    },
    #[error("invalid calendar date {input:?} (expected YYYY-MM-DD)")]
    InvalidDate { input: String },
    #[error("no display rule for member of type {type_name}")]
    UnsupportedSource { type_name: &'static str },
    #[error("no coercion from {from} display value into {target} destination")]
    UnsupportedTarget {
        from: &'static str,
        target: ValueKind,
    },
}

impl CoerceError {
    /// Unsupported-kind signals indicate a missing case in the matrix rather
    /// than bad user input.
    #[must_use]
    pub fn is_defect(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedSource { .. } | Self::UnsupportedTarget { .. }
        )
    }
}

/// A coercion outcome: always a value, sometimes an issue.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "a coercion issue must be reported, not dropped"]
pub struct Coerced<T> {
    pub value: T,
    pub issue: Option<CoerceError>,
}

impl<T> Coerced<T> {
    pub fn ok(value: T) -> Self {
        Self { value, issue: None }
    }

    pub fn with_issue(value: T, issue: CoerceError) -> Self {
        Self {
            value,
            issue: Some(issue),
        }
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issue.is_none()
    }
}

/// What the binding engine does with a date input that fails to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidDatePolicy {
    /// Store the zero date (`0001-01-01`), wrapped for optional members.
    #[default]
    StoreZero,
    /// Store an absent value for optional members; non-optional members
    /// fall back to the zero date.
    StoreNone,
    /// Leave the member untouched.
    Skip,
}

impl InvalidDatePolicy {
    /// Apply the policy to the outcome of a date coercion, returning the
    /// value to write (if any).
    ///
    /// Outcomes without an [`CoerceError::InvalidDate`] issue pass through.
    #[must_use]
    pub fn resolve(self, coerced: &Coerced<Value>) -> Option<Value> {
        if !matches!(coerced.issue, Some(CoerceError::InvalidDate { .. })) {
            return Some(coerced.value.clone());
        }
        match (self, &coerced.value) {
            (Self::StoreZero, v) => Some(v.clone()),
            (Self::StoreNone, Value::OptDate(_)) => Some(Value::OptDate(None)),
            (Self::StoreNone, v) => Some(v.clone()),
            (Self::Skip, _) => None,
        }
    }
}

impl ValueKind {
    /// The value a destination of this kind receives when its input is empty
    /// or unparseable. `None` for kinds without a meaningful zero.
    #[must_use]
    pub fn zero_value(self) -> Option<Value> {
        match self {
            Self::Bool => Some(Value::Bool(false)),
            Self::Int => Some(Value::Int(0)),
            Self::Float => Some(Value::Float(0.0)),
            Self::Text => Some(Value::Text(String::new())),
            Self::Date => Some(Value::Date(zero_date())),
            Self::OptDate => Some(Value::OptDate(None)),
            Self::OptNumber => Some(Value::OptNumber(None)),
            Self::File => Some(Value::File(Default::default())),
            Self::Unsupported => None,
        }
    }
}

/// Project a record value into display form.
pub fn to_display(value: &Value, hint: DisplayHint) -> Coerced<Projected> {
    match value {
        Value::Bool(b) => Coerced::ok(Projected::Checked(*b)),
        Value::Int(v) => Coerced::ok(Projected::Text(v.to_string())),
        Value::Float(v) => Coerced::ok(Projected::Text(format!("{v:.2}"))),
        Value::Text(s) => Coerced::ok(Projected::Text(s.clone())),
        Value::Date(d) => Coerced::ok(Projected::Text(format_date(*d))),
        Value::OptDate(d) => Coerced::ok(Projected::Text(d.map(format_date).unwrap_or_default())),
        Value::OptNumber(n) => Coerced::ok(Projected::Text(match n {
            Some(n) if hint.is_float => format_full(n.as_f64()),
            Some(n) => n.as_i64().to_string(),
            None => String::new(),
        })),
        Value::File(f) => Coerced::with_issue(
            Projected::Text(f.filename.clone()),
            CoerceError::UnsupportedSource {
                type_name: "FileField",
            },
        ),
        Value::Unsupported { type_name, repr } => Coerced::with_issue(
            Projected::Text(repr.clone()),
            CoerceError::UnsupportedSource {
                type_name: *type_name,
            },
        ),
    }
}

/// Coerce a display value into a destination of kind `target`.
pub fn from_display(input: &DisplayValue, target: ValueKind, hint: DisplayHint) -> Coerced<Value> {
    match input {
        DisplayValue::Text(s) => from_text(s, target, hint),
        DisplayValue::Int(v) => from_int(*v, target)
            .map(Coerced::ok)
            .unwrap_or_else(|| unsupported(input, target)),
        DisplayValue::Float(v) => from_float(*v, target)
            .map(Coerced::ok)
            .unwrap_or_else(|| unsupported(input, target)),
        DisplayValue::Bool(b) => from_bool(*b, target)
            .map(Coerced::ok)
            .unwrap_or_else(|| unsupported(input, target)),
        DisplayValue::Date(s) => from_date(s, target).unwrap_or_else(|| unsupported(input, target)),
    }
}

/// Boolean reading of a string: everything outside the false set is true.
#[must_use]
pub fn parse_bool(s: &str) -> bool {
    !matches!(s, "false" | "False" | "no" | "No" | "")
}

/// Strict `YYYY-MM-DD` parse.
pub fn parse_date(s: &str) -> Result<NaiveDate, CoerceError> {
    NaiveDate::parse_from_str(s, DATE_LAYOUT).map_err(|_| CoerceError::InvalidDate {
        input: s.to_owned(),
    })
}

/// Locale-independent base-10 integer parse.
pub fn parse_int(s: &str) -> Result<i64, CoerceError> {
    s.trim().parse::<i64>().map_err(|e| CoerceError::Parse {
        input: s.to_owned(),
        target: ValueKind::Int,
        reason: e.to_string(),
    })
}

/// Locale-independent decimal parse at full precision.
pub fn parse_float(s: &str) -> Result<f64, CoerceError> {
    s.trim().parse::<f64>().map_err(|e| CoerceError::Parse {
        input: s.to_owned(),
        target: ValueKind::Float,
        reason: e.to_string(),
    })
}

fn from_text(s: &str, target: ValueKind, hint: DisplayHint) -> Coerced<Value> {
    match target {
        ValueKind::Bool => Coerced::ok(Value::Bool(parse_bool(s))),
        ValueKind::Int => match parse_int(s) {
            Ok(v) => Coerced::ok(Value::Int(v)),
            Err(e) => Coerced::with_issue(Value::Int(0), e),
        },
        ValueKind::Float => match parse_float(s) {
            Ok(v) => Coerced::ok(Value::Float(v)),
            Err(e) => Coerced::with_issue(Value::Float(0.0), e),
        },
        ValueKind::Text => Coerced::ok(Value::Text(s.to_owned())),
        ValueKind::OptNumber if s.is_empty() => Coerced::ok(Value::OptNumber(None)),
        ValueKind::OptNumber => {
            let parsed = if hint.is_float {
                parse_float(s).map(Number::Float)
            } else {
                parse_int(s).map(Number::Int)
            };
            match parsed {
                Ok(n) => Coerced::ok(Value::OptNumber(Some(n))),
                Err(e) => Coerced::with_issue(Value::OptNumber(None), e),
            }
        }
        ValueKind::Date | ValueKind::OptDate => {
            from_date(s, target).unwrap_or_else(|| unsupported_text(s, "text", target))
        }
        ValueKind::File | ValueKind::Unsupported => unsupported_text(s, "text", target),
    }
}

fn from_int(v: i64, target: ValueKind) -> Option<Value> {
    Some(match target {
        ValueKind::Bool => Value::Bool(v != 0),
        ValueKind::Int => Value::Int(v),
        ValueKind::Float => Value::Float(v as f64),
        ValueKind::Text => Value::Text(v.to_string()),
        ValueKind::OptNumber => Value::OptNumber(Some(Number::Int(v))),
        _ => return None,
    })
}

fn from_float(v: f64, target: ValueKind) -> Option<Value> {
    Some(match target {
        ValueKind::Bool => Value::Bool(v != 0.0),
        ValueKind::Int => Value::Int(v as i64),
        ValueKind::Float => Value::Float(v),
        ValueKind::Text => Value::Text(format_fixed6(v)),
        ValueKind::OptNumber => Value::OptNumber(Some(Number::Float(v))),
        _ => return None,
    })
}

fn from_bool(b: bool, target: ValueKind) -> Option<Value> {
    Some(match target {
        ValueKind::Bool => Value::Bool(b),
        ValueKind::Int => Value::Int(i64::from(b)),
        ValueKind::Float => Value::Float(if b { 1.0 } else { 0.0 }),
        ValueKind::Text => Value::Text(bool_text(b).to_owned()),
        _ => return None,
    })
}

fn from_date(s: &str, target: ValueKind) -> Option<Coerced<Value>> {
    if target == ValueKind::OptDate && s.trim().is_empty() {
        return Some(Coerced::ok(Value::OptDate(None)));
    }
    let parsed = parse_date(s);
    let wrap = |d: NaiveDate| match target {
        ValueKind::OptDate => Value::OptDate(Some(d)),
        _ => Value::Date(d),
    };
    match target {
        ValueKind::Date | ValueKind::OptDate => Some(match parsed {
            Ok(d) => Coerced::ok(wrap(d)),
            Err(e) => Coerced::with_issue(wrap(zero_date()), e),
        }),
        ValueKind::Text => Some(Coerced::ok(Value::Text(s.to_owned()))),
        _ => None,
    }
}

fn unsupported(input: &DisplayValue, target: ValueKind) -> Coerced<Value> {
    Coerced::with_issue(
        Value::Text(input.fallback_text()),
        CoerceError::UnsupportedTarget {
            from: input.variant_name(),
            target,
        },
    )
}

fn unsupported_text(s: &str, from: &'static str, target: ValueKind) -> Coerced<Value> {
    Coerced::with_issue(
        Value::Text(s.to_owned()),
        CoerceError::UnsupportedTarget { from, target },
    )
}

fn format_date(d: NaiveDate) -> String {
    d.format(DATE_LAYOUT).to_string()
}

/// Shortest representation that parses back to the same `f64`.
fn format_full(v: f64) -> String {
    v.to_string()
}

fn format_fixed6(v: f64) -> String {
    format!("{v:.6}")
}

const fn bool_text(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}
