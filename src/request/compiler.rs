//! Request compilation
//!
//! Turns an [`EndpointDescriptor`] plus a per-call input object into a
//! [`ResolvedRequest`]. Compilation is pure: the same descriptor, bound params
//! and input always produce an identical request.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use super::descriptor::{EndpointDescriptor, Method};
use super::keys::{transform_keys, transform_value};
use super::path::resolve_path;
use crate::error::{Error, Result};

/// A fully resolved request, ready for dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    pub method: Method,
    /// Path relative to the API base URL, placeholders substituted and encoded
    pub path: String,
    /// Query pairs in wire form (after key transform)
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ResolvedRequest {
    /// `application/x-www-form-urlencoded` query string without the leading `?`
    pub fn query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish()
    }

    /// Absolute URL under `base_url`
    pub fn url(&self, base_url: &str) -> String {
        let mut url = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        if !self.query.is_empty() {
            url.push('?');
            url.push_str(&self.query_string());
        }
        url
    }
}

/// Serialize a call input into its key/value form.
///
/// `()` and `None` become the empty object; any other non-object is rejected.
pub fn to_call_input<I: Serialize + ?Sized>(input: &I) -> Result<Map<String, Value>> {
    match serde_json::to_value(input).map_err(|e| Error::InvalidInput(e.to_string()))? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(Error::InvalidInput(format!(
            "expected an object, got {}",
            kind_of(&other)
        ))),
    }
}

/// Compile a descriptor whose body is drawn from the call input itself
pub fn compile(
    base_path: &str,
    base_params: &BTreeMap<String, String>,
    descriptor: &EndpointDescriptor,
    input: Map<String, Value>,
) -> Result<ResolvedRequest> {
    let path = resolve_request_path(base_path, base_params, descriptor, &input)?;
    let mut query = pick(&input, descriptor.querystring);

    let payload = descriptor
        .payload_key
        .and_then(|key| input.get(key))
        .filter(|value| !value.is_null())
        .cloned();

    let remaining: Map<String, Value> = input
        .into_iter()
        .filter(|(field, _)| {
            !descriptor.is_url_param(field)
                && !descriptor.is_query_field(field)
                && descriptor.payload_key != Some(field.as_str())
        })
        .collect();

    let body = match (descriptor.method, descriptor.payload_key) {
        (Method::Get, _) => {
            query.extend(remaining);
            None
        },
        (_, Some(_)) => payload.map(|value| transform_value(value, descriptor.key_transform)),
        (Method::Delete, None) if remaining.is_empty() => None,
        (_, None) => Some(Value::Object(transform_keys(remaining, descriptor.key_transform))),
    };

    Ok(ResolvedRequest {
        method: descriptor.method,
        path,
        query: query_pairs(transform_keys(query, descriptor.key_transform)),
        body,
    })
}

/// Compile an update-style descriptor: `params` supplies path and query
/// fields, `payload` is the whole body.
pub fn compile_update(
    base_path: &str,
    base_params: &BTreeMap<String, String>,
    descriptor: &EndpointDescriptor,
    params: Map<String, Value>,
    payload: Value,
) -> Result<ResolvedRequest> {
    let path = resolve_request_path(base_path, base_params, descriptor, &params)?;
    let query = pick(&params, descriptor.querystring);

    Ok(ResolvedRequest {
        method: descriptor.method,
        path,
        query: query_pairs(transform_keys(query, descriptor.key_transform)),
        body: Some(transform_value(payload, descriptor.key_transform)),
    })
}

fn resolve_request_path(
    base_path: &str,
    base_params: &BTreeMap<String, String>,
    descriptor: &EndpointDescriptor,
    input: &Map<String, Value>,
) -> Result<String> {
    let mut path_values = base_params.clone();
    for name in descriptor.url_params {
        let value = input.get(*name).and_then(scalar_text);
        match value {
            Some(value) => {
                path_values.insert((*name).to_string(), value);
            },
            None if base_params.contains_key(*name) => {},
            None => {
                return Err(Error::MissingParameter {
                    name: (*name).to_string(),
                })
            },
        }
    }

    let template = format!("{}{}", base_path, descriptor.path);
    resolve_path(&template, |name| path_values.get(name).cloned())
}

fn pick(input: &Map<String, Value>, fields: &[&str]) -> Map<String, Value> {
    fields
        .iter()
        .filter_map(|field| {
            input
                .get(*field)
                .filter(|value| !value.is_null())
                .map(|value| ((*field).to_string(), value.clone()))
        })
        .collect()
}

/// Flatten query fields; arrays repeat the key, nulls are dropped.
/// Pairs are ordered by key regardless of the map's iteration order.
fn query_pairs(fields: Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in fields {
        match value {
            Value::Array(items) => {
                pairs.extend(items.iter().filter_map(scalar_text).map(|v| (key.clone(), v)));
            },
            other => {
                if let Some(text) = scalar_text(&other) {
                    pairs.push((key, text));
                }
            },
        }
    }
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    pairs
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
