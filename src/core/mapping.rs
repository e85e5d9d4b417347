//! Conversion between wire mappings and models.
//!
//! [`resolve`] rewrites a wire mapping into local field names (applying
//! factories and defaults, recursing into nested models) and [`expand`] does
//! the reverse. Both work on plain JSON objects driven by a [`Schema`]; the
//! typed entry points hand the local object to serde.

use crate::core::model::Model;
use crate::core::schema::{FieldKind, FieldSpec, Schema};
use crate::utils::error::{ModelError, Result};
use serde_json::{Map, Value};

/// Flat, string-keyed mapping as sent and received by the remote service.
pub type WireMapping = Map<String, Value>;

pub fn from_mapping<M: Model>(mapping: WireMapping) -> Result<M> {
    let schema = M::schema();
    let local = resolve(schema, mapping)?;
    tracing::debug!("📥 {}: resolved {} field(s)", schema.model(), local.len());
    Ok(serde_json::from_value(Value::Object(local))?)
}

pub fn into_mapping<M: Model>(model: &M) -> Result<WireMapping> {
    let schema = M::schema();
    let local = match serde_json::to_value(model)? {
        Value::Object(local) => local,
        other => {
            return Err(ModelError::UnsupportedValueConversion {
                model: schema.model().to_string(),
                field: String::new(),
                reason: format!("model serialized to {} instead of a mapping", other),
            })
        }
    };
    let wire = expand(schema, local)?;
    tracing::debug!("📤 {}: expanded {} field(s)", schema.model(), wire.len());
    Ok(wire)
}

/// Wire names -> local names.
pub fn resolve(schema: &Schema, mut wire: WireMapping) -> Result<Map<String, Value>> {
    let mut local = Map::new();

    for field in schema.fields() {
        // 遠端的 null 與缺少欄位同樣處理
        let raw = wire.remove(field.wire_key()).filter(|value| !value.is_null());

        let value = match raw {
            Some(raw) => resolve_value(schema, field, raw)?,
            None if field.is_required() => {
                return Err(ModelError::MissingRequiredField {
                    model: schema.model().to_string(),
                    field: field.name().to_string(),
                })
            }
            None => match field.alias().and_then(|alias| alias.default().to_value()) {
                Some(default) => default,
                None => continue,
            },
        };
        local.insert(field.name().to_string(), value);
    }

    for key in wire.keys() {
        tracing::debug!("{}: ignoring unknown wire key '{}'", schema.model(), key);
    }

    Ok(local)
}

fn resolve_value(schema: &Schema, field: &FieldSpec, raw: Value) -> Result<Value> {
    match field.kind() {
        FieldKind::Model(nested) => match raw {
            Value::Object(sub) => Ok(Value::Object(resolve(nested(), sub)?)),
            other => Err(malformed(schema, field, &other)),
        },
        FieldKind::Value => match field.alias() {
            Some(alias) => alias
                .parse(&raw)
                .map_err(|reason| unsupported(schema, field, reason)),
            None => Ok(raw),
        },
    }
}

/// Local names -> wire names. Aliased scalar values are rendered as text.
pub fn expand(schema: &Schema, mut local: Map<String, Value>) -> Result<WireMapping> {
    let mut wire = WireMapping::new();

    for field in schema.fields() {
        let value = match local.remove(field.name()) {
            Some(Value::Null) | None => continue,
            Some(value) => value,
        };

        let rendered = match field.kind() {
            FieldKind::Model(nested) => match value {
                Value::Object(sub) => Value::Object(expand(nested(), sub)?),
                other => return Err(malformed(schema, field, &other)),
            },
            FieldKind::Value => match field.alias() {
                Some(alias) => alias
                    .render(&value)
                    .map_err(|reason| unsupported(schema, field, reason))?,
                None => value,
            },
        };
        wire.insert(field.wire_key().to_string(), rendered);
    }

    for key in local.keys() {
        tracing::debug!("{}: field '{}' has no schema entry", schema.model(), key);
    }

    Ok(wire)
}

fn unsupported(schema: &Schema, field: &FieldSpec, reason: String) -> ModelError {
    ModelError::UnsupportedValueConversion {
        model: schema.model().to_string(),
        field: field.name().to_string(),
        reason,
    }
}

fn malformed(schema: &Schema, field: &FieldSpec, value: &Value) -> ModelError {
    ModelError::MalformedMapping {
        model: schema.model().to_string(),
        field: field.name().to_string(),
        reason: format!("expected a nested mapping, got {}", value),
    }
}
