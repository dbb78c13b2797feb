#![forbid(unsafe_code)]

//! Populating select and radio options from arbitrary ordered sources.
//!
//! An [`OptionSource`] yields `(key, display)` pairs by reading two named
//! members of each element. Record slices read through their binding
//! table; JSON arrays read object members.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | [`OptionsError::Nil`] | `None` / JSON `null` source | Field left without options |
//! | [`OptionsError::NotASequence`] | JSON scalar or object | Field left without options |
//! | [`OptionsError::Malformed`] | Element lacks a member or has the wrong kind | Field left without options |

use formwork_core::{DisplayHint, Projected, Record, Value, to_display};

use crate::field::EditOption;

/// Why a source produced no options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    #[error("no field named '{name}'")]
    UnknownField { name: String },
    #[error("option source is nil")]
    Nil,
    #[error("option source is not a sequence (found {found})")]
    NotASequence { found: &'static str },
    #[error("option element {index}: {reason}")]
    Malformed { index: usize, reason: String },
}

/// An ordered collection that can produce `(key, display)` pairs.
pub trait OptionSource {
    fn option_pairs(&self, key: &str, value: &str) -> Result<Vec<(i64, String)>, OptionsError>;
}

impl<S: OptionSource + ?Sized> OptionSource for &S {
    fn option_pairs(&self, key: &str, value: &str) -> Result<Vec<(i64, String)>, OptionsError> {
        (**self).option_pairs(key, value)
    }
}

impl<S: OptionSource> OptionSource for Option<S> {
    fn option_pairs(&self, key: &str, value: &str) -> Result<Vec<(i64, String)>, OptionsError> {
        match self {
            Some(s) => s.option_pairs(key, value),
            None => Err(OptionsError::Nil),
        }
    }
}

impl<R: Record> OptionSource for [R] {
    fn option_pairs(&self, key: &str, value: &str) -> Result<Vec<(i64, String)>, OptionsError> {
        let schema = R::schema();
        let malformed = |index, reason: String| OptionsError::Malformed { index, reason };
        self.iter()
            .enumerate()
            .map(|(i, item)| {
                let k = schema
                    .get(item, key)
                    .map_err(|e| malformed(i, e.to_string()))?;
                let k = match k {
                    Value::Int(k) => k,
                    Value::OptNumber(Some(n)) => n.as_i64(),
                    other => {
                        return Err(malformed(
                            i,
                            format!("key member '{key}' holds {}", other.kind()),
                        ));
                    }
                };
                let v = schema
                    .get(item, value)
                    .map_err(|e| malformed(i, e.to_string()))?;
                let display = match v {
                    Value::Text(s) => s,
                    other => match to_display(&other, DisplayHint::default()).value {
                        Projected::Text(s) => s,
                        Projected::Checked(b) => b.to_string(),
                    },
                };
                Ok((k, display))
            })
            .collect()
    }
}

impl<R: Record> OptionSource for Vec<R> {
    fn option_pairs(&self, key: &str, value: &str) -> Result<Vec<(i64, String)>, OptionsError> {
        self.as_slice().option_pairs(key, value)
    }
}

impl OptionSource for serde_json::Value {
    fn option_pairs(&self, key: &str, value: &str) -> Result<Vec<(i64, String)>, OptionsError> {
        use serde_json::Value as Json;

        let items = match self {
            Json::Array(items) => items,
            Json::Null => return Err(OptionsError::Nil),
            Json::Object(_) => return Err(OptionsError::NotASequence { found: "object" }),
            _ => return Err(OptionsError::NotASequence { found: "scalar" }),
        };
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let Json::Object(obj) = item else {
                    return Err(OptionsError::Malformed {
                        index,
                        reason: "element is not an object".into(),
                    });
                };
                let k = obj.get(key).and_then(Json::as_i64).ok_or_else(|| {
                    OptionsError::Malformed {
                        index,
                        reason: format!("missing integer member '{key}'"),
                    }
                })?;
                let v = match obj.get(value) {
                    Some(Json::String(s)) => s.clone(),
                    Some(Json::Null) | None => {
                        return Err(OptionsError::Malformed {
                            index,
                            reason: format!("missing member '{value}'"),
                        });
                    }
                    Some(other) => other.to_string(),
                };
                Ok((k, v))
            })
            .collect()
    }
}

/// Build the option list of a select/radio field.
///
/// A blank `Key = 0` option leads the list when `min == 0`. Options whose
/// key equals `selected_key` are marked selected.
pub fn build_options<S: OptionSource + ?Sized>(
    source: &S,
    key: &str,
    value: &str,
    min: i64,
    selected_key: i64,
) -> Result<Vec<EditOption>, OptionsError> {
    let pairs = source.option_pairs(key, value)?;
    let mut options = Vec::with_capacity(pairs.len() + 1);
    if min == 0 {
        options.push(EditOption::blank());
    }
    options.extend(pairs.into_iter().map(|(k, display)| EditOption {
        key: k,
        display,
        selected: k == selected_key,
    }));
    Ok(options)
}
