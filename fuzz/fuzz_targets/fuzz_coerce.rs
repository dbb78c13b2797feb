#![no_main]

use arbitrary::Arbitrary;
use chrono::NaiveDate;
use formwork_core::{
    DisplayHint, DisplayValue, Number, Projected, Value, ValueKind, from_display, to_display,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Input {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(String),
}

#[derive(Debug, Arbitrary)]
enum Target {
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

#[derive(Debug, Arbitrary)]
struct Case {
    input: Input,
    target: Target,
    is_float: bool,
    days: i32,
}

fuzz_target!(|case: Case| {
    let input = match case.input {
        Input::Text(s) => DisplayValue::Text(s),
        Input::Int(v) => DisplayValue::Int(v),
        Input::Float(v) => DisplayValue::Float(v),
        Input::Bool(b) => DisplayValue::Bool(b),
        Input::Date(s) => DisplayValue::Date(s),
    };
    let target = match case.target {
        Target::Bool => ValueKind::Bool,
        Target::Int => ValueKind::Int,
        Target::Float => ValueKind::Float,
        Target::Text => ValueKind::Text,
        Target::Date => ValueKind::Date,
        Target::OptDate => ValueKind::OptDate,
        Target::OptNumber => ValueKind::OptNumber,
        Target::File => ValueKind::File,
        Target::Unsupported => ValueKind::Unsupported,
    };
    let hint = DisplayHint::float(case.is_float);

    // Invariant: binding never panics and lands on the requested kind
    // whenever the destination is inside the matrix.
    let bound = from_display(&input, target, hint);
    if bound.issue.as_ref().is_none_or(|e| !e.is_defect()) {
        assert_eq!(bound.value.kind(), target);
    }

    // Invariant: projecting the result never panics, and dates always
    // project back to text.
    let projected = to_display(&bound.value, hint);
    if matches!(bound.value, Value::Date(_)) {
        assert!(matches!(projected.value, Projected::Text(_)));
    }

    let date = NaiveDate::from_num_days_from_ce_opt(case.days);
    let _ = to_display(&Value::OptDate(date), hint);
    let _ = to_display(&Value::OptNumber(Some(Number::Int(i64::from(case.days)))), hint);
});
