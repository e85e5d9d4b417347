//! Generic predicates specialised through bound arguments.
//!
//! Every predicate reads the model's local field values, addressed by a
//! dotted path (`"session.project.project_label"`), so one function serves
//! every model type and field.

use crate::core::model::Model;
use crate::core::validator::{Validator, ValidatorArgs};
use serde_json::Value;

/// Local value at a dotted path. Unknown and null values read as `None`.
pub fn field_value<M: Model>(model: &M, path: &str) -> Option<Value> {
    let local = serde_json::to_value(model).ok()?;
    let pointer = format!("/{}", path.replace('.', "/"));
    local.pointer(&pointer).filter(|value| !value.is_null()).cloned()
}

fn bound_field<'a>(args: &'a ValidatorArgs) -> Option<&'a str> {
    args.get("field").and_then(Value::as_str)
}

fn bound_int(args: &ValidatorArgs, key: &str) -> Option<i64> {
    args.get(key).and_then(Value::as_i64)
}

fn check_field_known<M: Model>(model: &M, args: &ValidatorArgs) -> bool {
    bound_field(args).map_or(false, |field| field_value(model, field).is_some())
}

fn check_text_not_empty<M: Model>(model: &M, args: &ValidatorArgs) -> bool {
    bound_field(args)
        .and_then(|field| field_value(model, field))
        .and_then(|value| value.as_str().map(|text| !text.trim().is_empty()))
        .unwrap_or(false)
}

fn check_text_max_len<M: Model>(model: &M, args: &ValidatorArgs) -> bool {
    let Some(max) = args.get("max").and_then(Value::as_u64) else {
        return false;
    };
    match bound_field(args).and_then(|field| field_value(model, field)) {
        Some(Value::String(text)) => (text.chars().count() as u64) <= max,
        // 未知值不違反長度上限
        None => true,
        Some(_) => false,
    }
}

fn check_int_at_least<M: Model>(model: &M, args: &ValidatorArgs) -> bool {
    let Some(min) = bound_int(args, "min") else {
        return false;
    };
    bound_field(args)
        .and_then(|field| field_value(model, field))
        .and_then(|value| value.as_i64())
        .map_or(false, |value| value >= min)
}

fn check_one_of<M: Model>(model: &M, args: &ValidatorArgs) -> bool {
    let Some(Value::Array(allowed)) = args.get("values") else {
        return false;
    };
    bound_field(args)
        .and_then(|field| field_value(model, field))
        .map_or(false, |value| allowed.contains(&value))
}

/// The field holds a known value.
pub fn field_known<M: Model>(field: &str) -> Validator<M> {
    Validator::new("field_known", check_field_known::<M>).bind("field", field)
}

/// The text field is known and not blank.
pub fn text_not_empty<M: Model>(field: &str) -> Validator<M> {
    Validator::new("text_not_empty", check_text_not_empty::<M>).bind("field", field)
}

/// The text field, when known, has at most `max` characters.
pub fn text_max_len<M: Model>(field: &str, max: usize) -> Validator<M> {
    Validator::new("text_max_len", check_text_max_len::<M>)
        .bind("field", field)
        .bind("max", max)
}

/// The integer field is known and at least `min`.
pub fn int_at_least<M: Model>(field: &str, min: i64) -> Validator<M> {
    Validator::new("int_at_least", check_int_at_least::<M>)
        .bind("field", field)
        .bind("min", min)
}

/// The field is known and equals one of `values`.
pub fn one_of<M: Model>(field: &str, values: &[&str]) -> Validator<M> {
    Validator::new("one_of", check_one_of::<M>)
        .bind("field", field)
        .bind("values", values.to_vec())
}
