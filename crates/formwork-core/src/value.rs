#![forbid(unsafe_code)]

//! Runtime values held by record members.
//!
//! [`Value`] is the closed set of kinds the coercion matrix understands.
//! Anything else a record wants to expose goes through
//! [`Value::Unsupported`], which carries a best-effort string form so the
//! engines can fall back without guessing at the underlying type.
//!
//! Optional members are modelled as `Option<_>` payloads
//! ([`Value::OptDate`], [`Value::OptNumber`]) with explicit present/absent
//! states.

use core::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind tag for a [`Value`], used to describe record members and
/// coercion destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Text,
    Date,
    OptDate,
    OptNumber,
    File,
    Unsupported,
}

impl ValueKind {
    /// Stable lowercase name, used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
            Self::Date => "date",
            Self::OptDate => "optional-date",
            Self::OptNumber => "optional-number",
            Self::File => "file",
            Self::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of an optional numeric member.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Integer view; floats are truncated toward zero.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Int(v) => v,
            Self::Float(v) => v as i64,
        }
    }

    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }
}

/// Two-attribute upload record written by photo fields.
///
/// `data` is the raw image payload (typically a data URL read back from the
/// preview element) and `filename` is the bare file name with any path
/// prefix stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileField {
    pub data: String,
    pub filename: String,
    pub mime_type: String,
    pub size: u64,
}

/// A record member value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    OptDate(Option<NaiveDate>),
    OptNumber(Option<Number>),
    File(FileField),
    /// A member whose type sits outside the closed kind set.
    Unsupported {
        type_name: &'static str,
        repr: String,
    },
}

impl Value {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::Date(_) => ValueKind::Date,
            Self::OptDate(_) => ValueKind::OptDate,
            Self::OptNumber(_) => ValueKind::OptNumber,
            Self::File(_) => ValueKind::File,
            Self::Unsupported { .. } => ValueKind::Unsupported,
        }
    }
}

/// The zero calendar date (`0001-01-01`), stored when a date input fails to
/// parse under [`InvalidDatePolicy::StoreZero`](crate::InvalidDatePolicy).
#[must_use]
pub fn zero_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Value::Bool(true).kind(), ValueKind::Bool);
        assert_eq!(Value::OptDate(None).kind(), ValueKind::OptDate);
        assert_eq!(
            Value::Unsupported {
                type_name: "Blob",
                repr: String::new()
            }
            .kind(),
            ValueKind::Unsupported
        );
    }

    #[test]
    fn number_views() {
        assert_eq!(Number::Float(2.9).as_i64(), 2);
        assert_eq!(Number::Int(3).as_f64(), 3.0);
    }

    #[test]
    fn zero_date_is_year_one() {
        assert_eq!(zero_date().to_string(), "0001-01-01");
    }
}
