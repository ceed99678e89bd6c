//! Code snippet formatters.
//!
//! Each formatter is a pure function from a [`RequestSpec`] to the source code
//! of an HTTP call in one language/library idiom. Formatters never fail: a
//! request without URL or method produces an empty string, and missing
//! optional inputs simply leave out the matching section of the template.
//!
//! Interpolated values (URL, header names and values, payload) are inserted
//! into the generated source as given. Only the Java formatters escape double
//! quotes inside payload lines.

pub mod java;
pub mod javascript;

use crate::models::RequestSpec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub use java::{JavaPlatform, JavaSpring};
pub use javascript::{FetchJs, NodeJs};

/// A generator of HTTP client code for one target idiom.
pub trait SnippetFormatter: Send + Sync {
    /// Syntax identifier handed to the highlighter, e.g. `"javascript"`.
    fn lang(&self) -> &'static str;

    /// Renders the snippet, or an empty string when URL or method is missing.
    fn format(&self, request: &RequestSpec) -> String;
}

/// Generated source code tagged with its syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedSnippet {
    /// Generated code.
    pub code: String,
    /// Syntax identifier of `code`.
    pub lang: &'static str,
}

impl FormattedSnippet {
    /// Returns `true` when nothing was generated.
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

/// The snippet targets this crate can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnippetTarget {
    /// JavaScript Fetch API
    FetchJs,
    /// Node.js native `http` module
    NodeJs,
    /// Java `HttpURLConnection`
    JavaPlatform,
    /// Java Spring `RestTemplate`
    JavaSpring,
}

impl SnippetTarget {
    /// Returns the identifier used on the command line and in settings.
    pub fn as_str(&self) -> &'static str {
        match self {
            SnippetTarget::FetchJs => "fetch-js",
            SnippetTarget::NodeJs => "node-js",
            SnippetTarget::JavaPlatform => "java-platform",
            SnippetTarget::JavaSpring => "java-spring",
        }
    }

    /// Returns a human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SnippetTarget::FetchJs => "Fetch (JavaScript)",
            SnippetTarget::NodeJs => "Node (JavaScript)",
            SnippetTarget::JavaPlatform => "Java (Platform)",
            SnippetTarget::JavaSpring => "Java (Spring)",
        }
    }

    /// Returns all targets.
    pub fn all() -> Vec<SnippetTarget> {
        vec![
            SnippetTarget::FetchJs,
            SnippetTarget::NodeJs,
            SnippetTarget::JavaPlatform,
            SnippetTarget::JavaSpring,
        ]
    }

    /// Returns the syntax identifier of the generated code.
    pub fn lang(&self) -> &'static str {
        self.formatter().lang()
    }

    /// Returns the formatter implementing this target.
    pub fn formatter(&self) -> Arc<dyn SnippetFormatter> {
        match self {
            SnippetTarget::FetchJs => Arc::new(FetchJs),
            SnippetTarget::NodeJs => Arc::new(NodeJs),
            SnippetTarget::JavaPlatform => Arc::new(JavaPlatform),
            SnippetTarget::JavaSpring => Arc::new(JavaSpring),
        }
    }
}

impl fmt::Display for SnippetTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SnippetTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SnippetTarget::all()
            .into_iter()
            .find(|target| target.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown snippet target '{}'", s))
    }
}

/// Renders `request` for `target`.
///
/// # Examples
///
/// ```
/// use http_code_snippets::models::RequestSpec;
/// use http_code_snippets::snippets::{generate_snippet, SnippetTarget};
///
/// let request = RequestSpec::new("http://x", "GET");
/// let snippet = generate_snippet(&request, SnippetTarget::FetchJs);
/// assert!(snippet.code.starts_with("fetch('http://x')"));
/// assert_eq!(snippet.lang, "javascript");
/// ```
pub fn generate_snippet(request: &RequestSpec, target: SnippetTarget) -> FormattedSnippet {
    let formatter = target.formatter();
    FormattedSnippet {
        code: formatter.format(request),
        lang: formatter.lang(),
    }
}
