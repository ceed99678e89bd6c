//! Request text parser.
//!
//! Turns `.http` style text into [`RequestSpec`] values so that snippets can
//! be produced from files and standard input:
//!
//! ```text
//! # comment
//! POST https://api.example.com/users HTTP/1.1
//! Content-Type: application/json
//!
//! {"name": "John"}
//! ```
//!
//! Requests are separated by lines containing only `###`. Comment lines
//! (`#` or `//`) are skipped before the body starts; the body is kept
//! verbatim.

pub mod error;

use crate::models::{Header, RequestSpec};
pub use error::ParseError;
use once_cell::sync::Lazy;
use regex::Regex;

/// `METHOD URL [HTTP/VERSION]`, or a bare URL.
static REQUEST_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:([A-Za-z]+)\s+)?(\S+)(?:\s+HTTP/\d+(?:\.\d+)?)?$")
        .expect("request line pattern is valid")
});

/// `Name: value`
static HEADER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^:\s][^:]*?)\s*:\s*(.*?)\s*$").expect("header pattern is valid")
});

/// Method used when the request line is a bare URL.
const DEFAULT_METHOD: &str = "GET";

/// Parses every request in `content`.
///
/// # Examples
///
/// ```
/// use http_code_snippets::parser::parse_requests;
///
/// let content = "GET https://api.example.com/users\n\n###\n\nDELETE https://api.example.com/users/1\n";
/// let requests = parse_requests(content).unwrap();
/// assert_eq!(requests.len(), 2);
/// assert_eq!(requests[1].method(), Some("DELETE"));
/// ```
pub fn parse_requests(content: &str) -> Result<Vec<RequestSpec>, ParseError> {
    let normalized = content.replace("\r\n", "\n");
    let mut requests = Vec::new();
    let mut block: Vec<(usize, &str)> = Vec::new();

    for (idx, line) in normalized.lines().enumerate() {
        if line.trim() == "###" {
            if has_content(&block) {
                requests.push(parse_block(&block)?);
            }
            block.clear();
        } else {
            block.push((idx + 1, line));
        }
    }
    if has_content(&block) {
        requests.push(parse_block(&block)?);
    }

    Ok(requests)
}

/// Parses the first request in `content`.
pub fn parse_request(content: &str) -> Result<RequestSpec, ParseError> {
    parse_requests(content)?
        .into_iter()
        .next()
        .ok_or(ParseError::EmptyRequest { line: 1 })
}

/// Parses a raw header block leniently.
///
/// Lines that are not `Name: value` are skipped.
pub fn parse_headers(text: &str) -> Vec<Header> {
    text.lines()
        .filter_map(|line| parse_header_line(line.trim()))
        .collect()
}

fn parse_header_line(line: &str) -> Option<Header> {
    let captures = HEADER_LINE.captures(line)?;
    Some(Header::new(&captures[1], &captures[2]))
}

fn is_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with('#') || trimmed.starts_with("//")
}

fn has_content(block: &[(usize, &str)]) -> bool {
    block
        .iter()
        .any(|(_, line)| !line.trim().is_empty() && !is_comment(line))
}

fn parse_block(lines: &[(usize, &str)]) -> Result<RequestSpec, ParseError> {
    let block_start = lines.first().map(|(n, _)| *n).unwrap_or(1);
    let request_idx = lines
        .iter()
        .position(|(_, line)| !line.trim().is_empty() && !is_comment(line))
        .ok_or(ParseError::EmptyRequest { line: block_start })?;

    let (line_num, request_line) = lines[request_idx];
    let captures = REQUEST_LINE.captures(request_line.trim()).ok_or_else(|| {
        ParseError::InvalidRequestLine {
            text: request_line.trim().to_string(),
            line: line_num,
        }
    })?;
    let method = captures
        .get(1)
        .map_or(DEFAULT_METHOD, |m| m.as_str())
        .to_string();
    let url = captures[2].to_string();

    let mut request = RequestSpec {
        url: Some(url),
        method: Some(method),
        headers: None,
        payload: None,
    };

    let mut body_start = None;
    for (offset, (line_num, line)) in lines[request_idx + 1..].iter().enumerate() {
        if line.trim().is_empty() {
            body_start = Some(request_idx + 1 + offset + 1);
            break;
        }
        if is_comment(line) {
            continue;
        }
        let header = parse_header_line(line.trim()).ok_or_else(|| ParseError::InvalidHeader {
            header: line.trim().to_string(),
            line: *line_num,
        })?;
        request.headers.get_or_insert_with(Vec::new).push(header);
    }

    if let Some(start) = body_start {
        let body: Vec<&str> = lines[start..].iter().map(|(_, line)| *line).collect();
        let body = body.join("\n");
        let body = body.trim_end_matches('\n');
        if !body.trim().is_empty() {
            request.payload = Some(body.to_string());
        }
    }

    Ok(request)
}
