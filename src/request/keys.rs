//! Key renaming for outgoing fields

use serde_json::{Map, Value};

/// Rename keys of `fields` according to `mapping` (input name -> wire name).
///
/// Unmapped keys pass through unchanged. When a renamed key lands on a key
/// the input already has, the renamed value wins.
pub fn transform_keys(fields: Map<String, Value>, mapping: &[(&str, &str)]) -> Map<String, Value> {
    if mapping.is_empty() {
        return fields;
    }

    let (renamed, kept): (Vec<_>, Vec<_>) = fields
        .into_iter()
        .map(|(key, value)| match wire_name(&key, mapping) {
            Some(wire) => (true, wire, value),
            None => (false, key, value),
        })
        .partition(|(renamed, _, _)| *renamed);

    let mut out: Map<String, Value> = kept.into_iter().map(|(_, key, value)| (key, value)).collect();
    out.extend(renamed.into_iter().map(|(_, key, value)| (key, value)));
    out
}

/// Rename the keys of a composite value; scalars and arrays are returned as-is
pub fn transform_value(value: Value, mapping: &[(&str, &str)]) -> Value {
    match value {
        Value::Object(map) => Value::Object(transform_keys(map, mapping)),
        other => other,
    }
}

fn wire_name(key: &str, mapping: &[(&str, &str)]) -> Option<String> {
    mapping
        .iter()
        .find(|(from, _)| *from == key)
        .map(|(_, to)| to.to_string())
}
