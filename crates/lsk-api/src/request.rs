//! Request construction

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

/// Request parameters (insertion-ordered)
pub type Params = Map<String, Value>;

/// HTTP verb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// GET: parameters go to the query string
    Get,
    /// POST: parameters go to the body
    Post,
    /// PUT: parameters go to the body
    Put,
}

impl Verb {
    /// Upper-case method name
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
        }
    }

    /// Whether parameters are encoded into the query string
    pub fn is_get(&self) -> bool {
        matches!(self, Verb::Get)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Verb::Get),
            "POST" => Ok(Verb::Post),
            "PUT" => Ok(Verb::Put),
            other => Err(ApiError::InvalidRequest(format!("unsupported verb: {}", other))),
        }
    }
}

/// Fully-formed request
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// HTTP verb
    pub verb: Verb,
    /// Absolute URL, including any query string
    pub url: String,
    /// Network identity headers
    pub headers: BTreeMap<String, String>,
    /// JSON body (always empty for GET)
    pub body: Params,
}

/// Builds requests against one peer
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: String,
    headers: BTreeMap<String, String>,
}

impl RequestBuilder {
    /// Create a builder for `scheme://peer[:port]` with the given headers
    pub fn new(base_url: impl Into<String>, headers: BTreeMap<String, String>) -> Self {
        Self {
            base_url: base_url.into(),
            headers,
        }
    }

    /// Build a request for `endpoint`
    pub fn build(&self, verb: Verb, endpoint: &str, params: &Params) -> RequestDescriptor {
        let mut url = format!("{}/api/{}", self.base_url, endpoint);
        let body = if verb.is_get() {
            if !params.is_empty() {
                url.push('?');
                url.push_str(&encode_query(params));
            }
            Params::new()
        } else {
            params.clone()
        };

        RequestDescriptor {
            verb,
            url,
            headers: self.headers.clone(),
            body,
        }
    }
}

/// `key=value` pairs joined by `&`
pub fn encode_query(params: &Params) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", form_encode(key), form_encode(&render_value(value))))
        .collect::<Vec<_>>()
        .join("&")
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn form_encode(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
}
