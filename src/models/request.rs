//! Request data models.
//!
//! This module defines the input of every snippet formatter: the request URL,
//! the HTTP method, an ordered header list and an optional payload. All fields
//! are optional because the embedding application may set them one at a time.

use serde::{Deserialize, Deserializer, Serialize};

/// A single HTTP header as supplied by the embedding application.
///
/// Header lists keep the order they were given in and may contain the same
/// name more than once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Header {
    /// Header name, emitted verbatim.
    pub name: String,
    /// Header value, emitted verbatim.
    pub value: String,
}

impl Header {
    /// Creates a new header.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The four inputs of a snippet: url, method, headers and payload.
///
/// A `RequestSpec` is a snapshot. Formatters receive it by reference and never
/// mutate it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// Request URL. Snippets are empty while this is absent or empty.
    #[serde(default)]
    pub url: Option<String>,

    /// HTTP method, used as given (no case folding, no validation).
    #[serde(default)]
    pub method: Option<String>,

    /// Ordered header list.
    ///
    /// When deserializing, any JSON value other than an array of headers is
    /// treated as absent.
    #[serde(default, deserialize_with = "lenient_headers")]
    pub headers: Option<Vec<Header>>,

    /// Message body.
    #[serde(default)]
    pub payload: Option<String>,
}

impl RequestSpec {
    /// Creates a request with a URL and a method and nothing else.
    pub fn new(url: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            method: Some(method.into()),
            headers: None,
            payload: None,
        }
    }

    /// Appends a header, keeping any previous header with the same name.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers
            .get_or_insert_with(Vec::new)
            .push(Header::new(name, value));
    }

    /// Sets the payload.
    pub fn set_payload(&mut self, payload: impl Into<String>) {
        self.payload = Some(payload.into());
    }

    /// Builder form of [`RequestSpec::add_header`].
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_header(name, value);
        self
    }

    /// Builder form of [`RequestSpec::set_payload`].
    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.set_payload(payload);
        self
    }

    /// Returns the URL if it is present and non-empty.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }

    /// Returns the method if it is present and non-empty.
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref().filter(|m| !m.is_empty())
    }

    /// Returns the header list, or an empty slice when absent.
    pub fn headers(&self) -> &[Header] {
        self.headers.as_deref().unwrap_or(&[])
    }

    /// Returns `true` if at least one header is present.
    pub fn has_headers(&self) -> bool {
        !self.headers().is_empty()
    }

    /// Returns the payload if it is present and non-empty.
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref().filter(|p| !p.is_empty())
    }

    /// Returns `true` when both URL and method are set, the only requirement
    /// for a non-empty snippet.
    pub fn is_complete(&self) -> bool {
        self.url().is_some() && self.method().is_some()
    }
}

fn lenient_headers<'de, D>(deserializer: D) -> Result<Option<Vec<Header>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match &value {
        serde_json::Value::Array(_) => Ok(serde_json::from_value(value).ok()),
        _ => Ok(None),
    }
}
