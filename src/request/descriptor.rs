//! Endpoint descriptors
//!
//! A descriptor is the static shape of one remote operation. Resource modules
//! declare them as `const` items; nothing here performs I/O.

use std::fmt;

/// HTTP methods used by the admin API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Declarative description of a single remote operation
///
/// Built with the `const fn` constructors so a resource's descriptor table is
/// plain data:
///
/// ```
/// use kcadm::request::EndpointDescriptor;
///
/// const FIND_ONE: EndpointDescriptor = EndpointDescriptor::get("/{id}")
///     .url_params(&["id"])
///     .catch_not_found();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub method: Method,
    /// Appended to the resource base path; may contain `{name}` placeholders
    pub path: &'static str,
    /// Input fields consumed as path placeholders
    pub url_params: &'static [&'static str],
    /// Input field promoted to be the whole request body
    pub payload_key: Option<&'static str>,
    /// Input fields serialized into the query string
    pub querystring: &'static [&'static str],
    /// Input field name -> wire field name
    pub key_transform: &'static [(&'static str, &'static str)],
    /// Decode a 404 as the absent result instead of failing
    pub catch_not_found: bool,
}

impl EndpointDescriptor {
    pub const fn new(method: Method, path: &'static str) -> Self {
        Self {
            method,
            path,
            url_params: &[],
            payload_key: None,
            querystring: &[],
            key_transform: &[],
            catch_not_found: false,
        }
    }

    pub const fn get(path: &'static str) -> Self {
        Self::new(Method::Get, path)
    }

    pub const fn post(path: &'static str) -> Self {
        Self::new(Method::Post, path)
    }

    pub const fn put(path: &'static str) -> Self {
        Self::new(Method::Put, path)
    }

    pub const fn delete(path: &'static str) -> Self {
        Self::new(Method::Delete, path)
    }

    pub const fn url_params(mut self, params: &'static [&'static str]) -> Self {
        self.url_params = params;
        self
    }

    pub const fn payload_key(mut self, key: &'static str) -> Self {
        self.payload_key = Some(key);
        self
    }

    pub const fn querystring(mut self, fields: &'static [&'static str]) -> Self {
        self.querystring = fields;
        self
    }

    pub const fn key_transform(mut self, mapping: &'static [(&'static str, &'static str)]) -> Self {
        self.key_transform = mapping;
        self
    }

    pub const fn catch_not_found(mut self) -> Self {
        self.catch_not_found = true;
        self
    }

    pub(crate) fn is_url_param(&self, field: &str) -> bool {
        self.url_params.contains(&field)
    }

    pub(crate) fn is_query_field(&self, field: &str) -> bool {
        self.querystring.contains(&field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXECUTE_ACTIONS: EndpointDescriptor = EndpointDescriptor::put("/{id}/execute-actions-email")
        .url_params(&["id"])
        .payload_key("actions")
        .querystring(&["lifespan"])
        .key_transform(&[("clientId", "client_id")]);

    #[test]
    fn builder_defaults() {
        let d = EndpointDescriptor::get("");
        assert_eq!(d.method, Method::Get);
        assert!(d.url_params.is_empty());
        assert!(d.payload_key.is_none());
        assert!(d.querystring.is_empty());
        assert!(d.key_transform.is_empty());
        assert!(!d.catch_not_found);
    }

    #[test]
    fn const_builder_sets_every_field() {
        assert_eq!(EXECUTE_ACTIONS.method, Method::Put);
        assert_eq!(EXECUTE_ACTIONS.payload_key, Some("actions"));
        assert!(EXECUTE_ACTIONS.is_url_param("id"));
        assert!(EXECUTE_ACTIONS.is_query_field("lifespan"));
        assert!(!EXECUTE_ACTIONS.is_query_field("actions"));
    }

    #[test]
    fn method_names() {
        assert_eq!(Method::Delete.to_string(), "DELETE");
        assert_eq!(reqwest::Method::from(Method::Put), reqwest::Method::PUT);
    }
}
