//! HTTP Code Snippets
//!
//! Ready-to-copy HTTP client code for a request given as URL, method, header
//! list and payload. Nothing is sent over the network; the output is source
//! text for another language.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - **models**: The request snapshot (`RequestSpec`, `Header`)
//! - **snippets**: Pure formatters for Fetch, Node, Java Platform and Java Spring
//! - **url_details**: Host/port/path decomposition with a bounded LRU cache
//! - **bridge**: Highlighter, copy interceptor and clipboard collaborators
//! - **widget**: A formatter plus debounced recomputation and copy support
//! - **tabs**: A selector showing one of several widgets (e.g. Java flavors)
//! - **config**: Global settings such as the debounce delay
//! - **parser**: `.http` style request text for the command-line tool
//!
//! # Pipeline
//!
//! 1. The embedding application sets any of the four inputs on a widget
//! 2. The widget waits for input to settle (25ms by default)
//! 3. The formatter renders the latest snapshot
//! 4. An optional highlighter rewrites the code for display
//! 5. On copy, an optional interceptor may take over before the clipboard is used
//!
//! # Usage
//!
//! ```
//! use http_code_snippets::models::RequestSpec;
//! use http_code_snippets::snippets::{generate_snippet, SnippetTarget};
//!
//! let request = RequestSpec::new("https://api.example.com/users", "POST")
//!     .with_header("Content-Type", "application/json")
//!     .with_payload("{\"name\": \"John\"}");
//!
//! let snippet = generate_snippet(&request, SnippetTarget::JavaSpring);
//! assert!(snippet.code.contains("headers.add(\"Content-Type\", \"application/json\");"));
//! ```

pub mod bridge;
pub mod config;
pub mod models;
pub mod parser;
pub mod snippets;
pub mod tabs;
pub mod url_details;
pub mod widget;

pub use bridge::{
    ClipboardError, ClipboardHost, ContentCopy, CopyInterceptor, CopyOutcome, HighlightRequest,
    Highlighter, MemoryClipboard,
};
pub use models::{Header, RequestSpec};
pub use snippets::{generate_snippet, FormattedSnippet, SnippetFormatter, SnippetTarget};
pub use tabs::{SnippetTab, SnippetTabs};
pub use url_details::{url_details, UrlDetails, UrlDetailsCache};
pub use widget::SnippetWidget;
