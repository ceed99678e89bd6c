//! Error types for request text parsing.

use thiserror::Error;

/// Errors that can occur while parsing `.http` style request text.
///
/// Each variant carries the 1-based line number it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The request line has no URL or its method is not a word.
    #[error(
        "Invalid request line '{text}' at line {line}. Expected format: 'METHOD URL [HTTP/VERSION]'"
    )]
    InvalidRequestLine {
        /// The offending line
        text: String,
        /// Line number in the source text (1-based)
        line: usize,
    },

    /// A header line without a `Name: value` shape.
    #[error("Invalid header format '{header}' at line {line}. Expected format: 'Header-Name: value'")]
    InvalidHeader {
        /// The offending header line
        header: String,
        /// Line number in the source text (1-based)
        line: usize,
    },

    /// A request block without a request line.
    #[error("Empty request block at line {line}")]
    EmptyRequest {
        /// Line number where the empty block starts (1-based)
        line: usize,
    },
}

impl ParseError {
    /// Returns the line number associated with this error.
    pub fn line(&self) -> usize {
        match self {
            ParseError::InvalidRequestLine { line, .. } => *line,
            ParseError::InvalidHeader { line, .. } => *line,
            ParseError::EmptyRequest { line } => *line,
        }
    }
}
