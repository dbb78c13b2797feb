#![forbid(unsafe_code)]

//! Per-record-type binding tables.
//!
//! A [`Schema<R>`] maps member names to typed accessor/mutator pairs for a
//! record type `R`. Schemas are built once per type (usually through the
//! [`record!`](crate::record!) macro) and looked up by the engines when they
//! walk a form, so "bind by name" keeps working while a misspelled or
//! duplicated member surfaces at registration time.
//!
//! # Usage
//!
//! ```
//! use formwork_core::{Record, Value, record};
//!
//! #[derive(Default)]
//! struct Person {
//!     name: String,
//!     age: i64,
//! }
//!
//! record!(Person {
//!     "Name" => name,
//!     "Age" => age,
//! });
//!
//! let mut p = Person::default();
//! let schema = Person::schema();
//! schema.set(&mut p, "Age", Value::Int(41)).unwrap();
//! assert_eq!(p.age, 41);
//! assert_eq!(schema.get(&p, "Name").unwrap(), Value::Text(String::new()));
//! ```
//!
//! # Invariants
//!
//! 1. Member names are unique within a schema; [`SchemaBuilder::build`]
//!    rejects duplicates.
//! 2. A member's [`ValueKind`] never changes after registration.
//! 3. Setters only accept values of the member's kind (opaque members accept
//!    text).

use ahash::AHashMap;
use chrono::NaiveDate;

use crate::value::{FileField, Number, Value, ValueKind};

/// Errors raised while registering or addressing record members.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MemberError {
    #[error("{record}: member '{name}' registered twice")]
    Duplicate { record: &'static str, name: String },
    #[error("{record}: no member named '{name}'")]
    Unknown { record: &'static str, name: String },
    #[error("{record}: member '{name}' holds {expected}, cannot store {found}")]
    KindMismatch {
        record: &'static str,
        name: String,
        expected: ValueKind,
        found: ValueKind,
    },
    #[error("{record}: member '{name}' rejected value: {reason}")]
    Rejected {
        record: &'static str,
        name: String,
        reason: String,
    },
}

/// Conversion between a Rust member type and [`Value`].
pub trait FieldValue: Sized {
    /// Kind reported for members of this type.
    const KIND: ValueKind;

    fn to_value(&self) -> Value;

    /// Convert back, handing the value back on a kind mismatch.
    fn from_value(value: Value) -> Result<Self, Value>;
}

impl FieldValue for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(other),
        }
    }
}

impl FieldValue for i64 {
    const KIND: ValueKind = ValueKind::Int;

    fn to_value(&self) -> Value {
        Value::Int(*self)
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Int(v) => Ok(v),
            other => Err(other),
        }
    }
}

macro_rules! narrow_int_field {
    ($($t:ty),*) => {
        $(
            impl FieldValue for $t {
                const KIND: ValueKind = ValueKind::Int;

                fn to_value(&self) -> Value {
                    Value::Int(i64::from(*self))
                }

                fn from_value(value: Value) -> Result<Self, Value> {
                    match value {
                        Value::Int(v) => <$t>::try_from(v).map_err(|_| Value::Int(v)),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

narrow_int_field!(i32, u32, i16, u16, u8);

impl FieldValue for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Float(v) => Ok(v),
            other => Err(other),
        }
    }
}

impl FieldValue for f32 {
    const KIND: ValueKind = ValueKind::Float;

    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Float(v) => Ok(v as f32),
            other => Err(other),
        }
    }
}

impl FieldValue for String {
    const KIND: ValueKind = ValueKind::Text;

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(other),
        }
    }
}

impl FieldValue for NaiveDate {
    const KIND: ValueKind = ValueKind::Date;

    fn to_value(&self) -> Value {
        Value::Date(*self)
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Date(d) => Ok(d),
            other => Err(other),
        }
    }
}

impl FieldValue for Option<NaiveDate> {
    const KIND: ValueKind = ValueKind::OptDate;

    fn to_value(&self) -> Value {
        Value::OptDate(*self)
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::OptDate(d) => Ok(d),
            other => Err(other),
        }
    }
}

impl FieldValue for Option<i64> {
    const KIND: ValueKind = ValueKind::OptNumber;

    fn to_value(&self) -> Value {
        Value::OptNumber(self.map(Number::Int))
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::OptNumber(n) => Ok(n.map(Number::as_i64)),
            other => Err(other),
        }
    }
}

impl FieldValue for Option<f64> {
    const KIND: ValueKind = ValueKind::OptNumber;

    fn to_value(&self) -> Value {
        Value::OptNumber(self.map(Number::Float))
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::OptNumber(n) => Ok(n.map(Number::as_f64)),
            other => Err(other),
        }
    }
}

impl FieldValue for FileField {
    const KIND: ValueKind = ValueKind::File;

    fn to_value(&self) -> Value {
        Value::File(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::File(f) => Ok(f),
            other => Err(other),
        }
    }
}

type Getter<R> = Box<dyn Fn(&R) -> Value + Send + Sync>;
type Setter<R> = Box<dyn Fn(&mut R, Value) -> Result<(), MemberError> + Send + Sync>;

/// A named accessor/mutator pair on record type `R`.
pub struct Member<R> {
    name: &'static str,
    kind: ValueKind,
    get: Getter<R>,
    set: Setter<R>,
}

impl<R> Member<R> {
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Read the member's current value.
    #[must_use]
    pub fn get(&self, record: &R) -> Value {
        (self.get)(record)
    }

    /// Store `value` into the member.
    pub fn set(&self, record: &mut R, value: Value) -> Result<(), MemberError> {
        (self.set)(record, value)
    }
}

impl<R> std::fmt::Debug for Member<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Binding table for record type `R`.
pub struct Schema<R> {
    type_name: &'static str,
    members: Vec<Member<R>>,
    index: AHashMap<&'static str, usize>,
}

impl<R: 'static> Schema<R> {
    /// Start building a schema for the record type named `type_name`.
    #[must_use]
    pub fn builder(type_name: &'static str) -> SchemaBuilder<R> {
        SchemaBuilder {
            type_name,
            members: Vec::new(),
            duplicate: None,
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Look up a member by name.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Member<R>> {
        self.index.get(name).map(|&i| &self.members[i])
    }

    /// Members in registration order.
    pub fn members(&self) -> impl Iterator<Item = &Member<R>> {
        self.members.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Read a member by name.
    pub fn get(&self, record: &R, name: &str) -> Result<Value, MemberError> {
        self.member(name)
            .map(|m| m.get(record))
            .ok_or_else(|| self.unknown(name))
    }

    /// Write a member by name.
    pub fn set(&self, record: &mut R, name: &str, value: Value) -> Result<(), MemberError> {
        match self.member(name) {
            Some(m) => m.set(record, value),
            None => Err(self.unknown(name)),
        }
    }

    fn unknown(&self, name: &str) -> MemberError {
        MemberError::Unknown {
            record: self.type_name,
            name: name.to_owned(),
        }
    }
}

impl<R> std::fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("type_name", &self.type_name)
            .field("members", &self.members)
            .finish()
    }
}

/// Builder for [`Schema`].
pub struct SchemaBuilder<R> {
    type_name: &'static str,
    members: Vec<Member<R>>,
    duplicate: Option<&'static str>,
}

impl<R: 'static> SchemaBuilder<R> {
    /// Register a typed member through a pair of field projections.
    #[must_use]
    pub fn field<T: FieldValue + 'static>(
        self,
        name: &'static str,
        get: fn(&R) -> &T,
        get_mut: fn(&mut R) -> &mut T,
    ) -> Self {
        let record = self.type_name;
        self.push(Member {
            name,
            kind: T::KIND,
            get: Box::new(move |r| get(r).to_value()),
            set: Box::new(move |r, v| {
                let found = v.kind();
                match T::from_value(v) {
                    Ok(t) => {
                        *get_mut(r) = t;
                        Ok(())
                    }
                    Err(rejected) if rejected.kind() == T::KIND => Err(MemberError::Rejected {
                        record,
                        name: name.to_owned(),
                        reason: format!("{rejected:?} out of range"),
                    }),
                    Err(_) => Err(MemberError::KindMismatch {
                        record,
                        name: name.to_owned(),
                        expected: T::KIND,
                        found,
                    }),
                }
            }),
        })
    }

    /// Register a member whose type sits outside the value kinds.
    ///
    /// Projection shows `get`'s string form (and reports a defect); binding
    /// hands the raw input string to `set`.
    #[must_use]
    pub fn opaque<G, S>(self, name: &'static str, type_name: &'static str, get: G, set: S) -> Self
    where
        G: Fn(&R) -> String + Send + Sync + 'static,
        S: Fn(&mut R, String) -> Result<(), String> + Send + Sync + 'static,
    {
        let record = self.type_name;
        self.push(Member {
            name,
            kind: ValueKind::Unsupported,
            get: Box::new(move |r| Value::Unsupported {
                type_name,
                repr: get(r),
            }),
            set: Box::new(move |r, v| match v {
                Value::Text(s) => set(r, s).map_err(|reason| MemberError::Rejected {
                    record,
                    name: name.to_owned(),
                    reason,
                }),
                other => Err(MemberError::KindMismatch {
                    record,
                    name: name.to_owned(),
                    expected: ValueKind::Text,
                    found: other.kind(),
                }),
            }),
        })
    }

    fn push(mut self, member: Member<R>) -> Self {
        if self.members.iter().any(|m| m.name == member.name) {
            self.duplicate.get_or_insert(member.name);
        } else {
            self.members.push(member);
        }
        self
    }

    /// Finish the table, rejecting duplicate member names.
    pub fn build(self) -> Result<Schema<R>, MemberError> {
        if let Some(name) = self.duplicate {
            return Err(MemberError::Duplicate {
                record: self.type_name,
                name: name.to_owned(),
            });
        }
        let index = self
            .members
            .iter()
            .enumerate()
            .map(|(i, m)| (m.name, i))
            .collect();
        Ok(Schema {
            type_name: self.type_name,
            members: self.members,
            index,
        })
    }
}

/// A record type with a binding table.
pub trait Record: Sized + 'static {
    fn schema() -> &'static Schema<Self>;
}

/// Implement [`Record`] for a struct by listing `"MemberName" => field`
/// pairs.
///
/// The schema is built on first use and kept for the process lifetime.
/// Registering the same member name twice panics on first use.
#[macro_export]
macro_rules! record {
    ($ty:ty { $($name:literal => $field:ident),* $(,)? }) => {
        impl $crate::record::Record for $ty {
            fn schema() -> &'static $crate::record::Schema<Self> {
                static SCHEMA: ::std::sync::OnceLock<$crate::record::Schema<$ty>> =
                    ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| {
                    match $crate::record::Schema::<$ty>::builder(stringify!($ty))
                        $(.field($name, |r: &$ty| &r.$field, |r: &mut $ty| &mut r.$field))*
                        .build()
                    {
                        Ok(schema) => schema,
                        Err(e) => panic!("invalid record schema: {e}"),
                    }
                })
            }
        }
    };
}
