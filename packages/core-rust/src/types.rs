use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// HTTP method of an inbound API request.
///
/// Parsed case-sensitively: API Gateway always sends upper-case verbs, so
/// `"post"` is carried as [`HttpMethod::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Options,
    /// Any other verb, including an explicit `null` method.
    Other(String),
}

impl HttpMethod {
    /// Returns the verb as it appears on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Other(verb) => verb,
        }
    }
}

impl From<String> for HttpMethod {
    fn from(verb: String) -> Self {
        match verb.as_str() {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "DELETE" => Self::Delete,
            "OPTIONS" => Self::Options,
            _ => Self::Other(verb),
        }
    }
}

impl From<&str> for HttpMethod {
    fn from(verb: &str) -> Self {
        Self::from(verb.to_string())
    }
}

impl From<HttpMethod> for String {
    fn from(method: HttpMethod) -> Self {
        method.as_str().to_string()
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An API Gateway style request.
///
/// Only `httpMethod` is needed to recognise a payload as a request; every
/// other field has a default. Unknown fields (`requestContext`,
/// `multiValueHeaders`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundRequest {
    #[serde(rename = "httpMethod", default, deserialize_with = "method_or_other")]
    pub method: HttpMethod,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default, deserialize_with = "lenient_map")]
    pub headers: HashMap<String, String>,
    #[serde(default, deserialize_with = "lenient_optional_map")]
    pub query_string_parameters: Option<HashMap<String, String>>,
    /// Raw body; JSON decoding is the router's job.
    #[serde(default)]
    pub body: Option<String>,
}

impl InboundRequest {
    /// Creates a request with no headers, query parameters or body.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HashMap::new(),
            query_string_parameters: None,
            body: None,
        }
    }

    /// Sets the raw body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns the body when it is present and non-empty.
    #[must_use]
    pub fn non_empty_body(&self) -> Option<&str> {
        self.body.as_deref().filter(|b| !b.is_empty())
    }
}

/// An event-bus message.
///
/// `source` and `detail-type` accept any JSON value; non-strings are kept in
/// their compact JSON form so they never match a routing constant. `detail`
/// is kept as an arbitrary JSON value: handlers that read fields from it
/// reject non-object details themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundEvent {
    #[serde(default, deserialize_with = "lenient_string")]
    pub source: String,
    #[serde(rename = "detail-type", default, deserialize_with = "lenient_string")]
    pub detail_type: String,
    #[serde(default = "empty_object")]
    pub detail: Value,
}

impl InboundEvent {
    /// Creates an event from its three routing fields.
    #[must_use]
    pub fn new(source: impl Into<String>, detail_type: impl Into<String>, detail: Value) -> Self {
        Self {
            source: source.into(),
            detail_type: detail_type.into(),
            detail,
        }
    }
}

fn default_path() -> String {
    "/".to_string()
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Renders a scalar the way it reads on the wire: strings bare, `null` as
/// absent, anything else as compact JSON.
fn render(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// A present-but-null method is not a GET; it matches no verb. Other
/// non-strings are carried in their compact JSON form.
fn method_or_other<'de, D>(deserializer: D) -> Result<HttpMethod, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(render(Value::deserialize(deserializer)?)
        .map_or_else(|| HttpMethod::Other(String::new()), HttpMethod::from))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(render(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// A non-object reads as absent; null entries are dropped.
fn lenient_optional_map<'de, D>(deserializer: D) -> Result<Option<HashMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(entries) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        entries
            .into_iter()
            .filter_map(|(name, value)| render(value).map(|value| (name, value)))
            .collect(),
    ))
}

fn lenient_map<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_map(deserializer)?.unwrap_or_default())
}
