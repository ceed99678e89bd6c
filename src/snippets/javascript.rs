//! JavaScript snippets.
//!
//! This module provides formatters for the browser Fetch API and for the
//! native `http` module of Node.js.

use super::SnippetFormatter;
use crate::models::{Header, RequestSpec};
use crate::url_details::url_details;

/// Method for which the Fetch snippet needs no `init` object.
const FETCH_DEFAULT_METHOD: &str = "GET";

/// JavaScript code using the Fetch API.
///
/// The `init` object is only emitted when the request has headers, a payload
/// or a method other than `GET`; otherwise `fetch()` is called with the URL
/// alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchJs;

impl SnippetFormatter for FetchJs {
    fn lang(&self) -> &'static str {
        "javascript"
    }

    fn format(&self, request: &RequestSpec) -> String {
        let (Some(url), Some(method)) = (request.url(), request.method()) else {
            return String::new();
        };
        let has_headers = request.has_headers();
        let payload = request.payload();
        let has_init = has_headers || payload.is_some() || method != FETCH_DEFAULT_METHOD;

        let mut code = String::new();

        // Headers, body and init object come before the call
        if has_init {
            if has_headers {
                code.push_str(&fetch_headers(request.headers()));
            }
            if let Some(payload) = payload {
                code.push_str(&format!("const body = `{}`;\n\n", payload));
            }
            code.push_str("const init = {\n");
            code.push_str(&format!("\tmethod: '{}'", method));
            if has_headers {
                code.push_str(",\n\theaders");
            }
            if payload.is_some() {
                code.push_str(",\n\tbody");
            }
            code.push('\n');
            code.push_str("}\n\n");
        }

        // Make the fetch call
        code.push_str(&format!("fetch('{}'", url));
        if has_init {
            code.push_str(", init");
        }
        code.push_str(")\n");
        // Response handling chain
        code.push_str(".then((response) => {\n");
        code.push_str("\treturn response.text(); // or .json() or .blob() ...\n");
        code.push_str("})\n");
        code.push_str(".then((text) => {\n");
        code.push_str("\t// text is the response body\n");
        code.push_str("})\n");
        code.push_str(".catch((e) => {\n");
        code.push_str("\t// error in e.message\n");
        code.push_str("});\n");

        code
    }
}

/// Builds the `Headers` object declaration.
///
/// # Returns
///
/// The declaration, one `append()` per header and a trailing blank line
fn fetch_headers(headers: &[Header]) -> String {
    let mut code = String::from("const headers = new Headers();\n");
    for header in headers {
        code.push_str(&format!(
            "headers.append('{}', '{}');\n",
            header.name, header.value
        ));
    }
    code.push('\n');
    code
}

/// JavaScript code using the Node.js `http` module.
///
/// `http.request()` takes host, port and path separately, so the URL is
/// decomposed through the shared URL details cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeJs;

impl SnippetFormatter for NodeJs {
    fn lang(&self) -> &'static str {
        "javascript"
    }

    fn format(&self, request: &RequestSpec) -> String {
        let (Some(url), Some(method)) = (request.url(), request.method()) else {
            return String::new();
        };
        let details = url_details(url);

        // Request options
        let mut code = String::from("const http = require('http');\n");
        code.push_str("const init = {\n");
        code.push_str(&format!("  host: '{}',\n", details.host_value));
        code.push_str(&format!("  path: '{}',\n", details.path));
        code.push_str(&format!("  port: {},\n", details.port_text()));
        code.push_str(&format!("  method: '{}',\n", method));
        code.push_str(&node_headers(request.headers()));
        code.push_str("};\n");
        // Collect the response body into a buffer
        code.push_str("const callback = function(response) {\n");
        code.push_str("  let result = Buffer.alloc(0);\n");
        code.push_str("  response.on('data', function(chunk) {\n");
        code.push_str("    result = Buffer.concat([result, chunk]);\n");
        code.push_str("  });\n");
        code.push_str("  \n");
        code.push_str("  response.on('end', function() {\n");
        code.push_str("    // result has response body buffer\n");
        code.push_str("    console.log(result.toString());\n");
        code.push_str("  });\n");
        code.push_str("};\n");
        code.push('\n');
        // Send the request, writing the body if there is one
        code.push_str("const req = http.request(init, callback);\n");
        if let Some(payload) = request.payload() {
            code.push_str(&format!("const body = `{}`;\n", payload));
            code.push_str("req.write(body);\n");
        }
        code.push_str("req.end();\n");

        code
    }
}

fn node_headers(headers: &[Header]) -> String {
    if headers.is_empty() {
        return String::new();
    }

    let entries: Vec<String> = headers
        .iter()
        .map(|h| format!("    '{}': '{}'", h.name, h.value))
        .collect();

    let mut code = String::from("  headers: {\n");
    code.push_str(&entries.join(",\n"));
    code.push('\n');
    code.push_str("  }\n");
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_simple_get_has_no_init() {
        let request = RequestSpec::new("http://x", "GET");

        let code = FetchJs.format(&request);

        assert!(code.starts_with("fetch('http://x')\n"));
        assert!(!code.contains("init"));
        assert!(code.contains(".then((response) => {"));
        assert!(code.ends_with("});\n"));
    }

    #[test]
    fn test_fetch_non_get_method_adds_init() {
        let request = RequestSpec::new("http://x", "DELETE");

        let code = FetchJs.format(&request);

        assert!(code.starts_with("const init = {\n\tmethod: 'DELETE'\n}\n\n"));
        assert!(code.contains("fetch('http://x', init)"));
        assert!(!code.contains("headers"));
    }

    #[test]
    fn test_fetch_method_comparison_is_case_sensitive() {
        let request = RequestSpec::new("http://x", "get");
        assert!(FetchJs.format(&request).contains("method: 'get'"));
    }

    #[test]
    fn test_fetch_headers_and_body() {
        let request = RequestSpec::new("https://api.example.com/users", "POST")
            .with_header("Content-Type", "application/json")
            .with_header("X-Trace", "1")
            .with_payload("{\"name\": \"John\"}");

        let code = FetchJs.format(&request);

        let expected_prefix = "const headers = new Headers();\n\
            headers.append('Content-Type', 'application/json');\n\
            headers.append('X-Trace', '1');\n\
            \n\
            const body = `{\"name\": \"John\"}`;\n\
            \n\
            const init = {\n\
            \tmethod: 'POST',\n\
            \theaders,\n\
            \tbody\n\
            }\n\
            \n\
            fetch('https://api.example.com/users', init)\n";
        assert!(code.starts_with(expected_prefix), "{}", code);
    }

    #[test]
    fn test_fetch_values_are_not_escaped() {
        let request = RequestSpec::new("http://x/it's", "PUT")
            .with_header("X-Quote", "a'b")
            .with_payload("line `one`");

        let code = FetchJs.format(&request);

        assert!(code.contains("headers.append('X-Quote', 'a'b');"));
        assert!(code.contains("const body = `line `one``;"));
        assert!(code.contains("fetch('http://x/it's', init)"));
    }

    #[test]
    fn test_node_basic_scaffold() {
        let request = RequestSpec::new("https://domain.com/path?a=b", "GET");

        let code = NodeJs.format(&request);

        assert!(code.starts_with("const http = require('http');\nconst init = {\n"));
        assert!(code.contains("  host: 'domain.com',\n"));
        assert!(code.contains("  path: '/path?a=b',\n"));
        assert!(code.contains("  port: 443,\n"));
        assert!(code.contains("  method: 'GET',\n};\n"));
        assert!(code.contains("const req = http.request(init, callback);\n"));
        assert!(!code.contains("req.write"));
        assert!(code.ends_with("req.end();\n"));
    }

    #[test]
    fn test_node_headers_have_no_trailing_comma() {
        let request = RequestSpec::new("http://domain.com", "POST")
            .with_header("Content-Type", "text/plain")
            .with_header("Accept", "*/*");

        let code = NodeJs.format(&request);

        assert!(code.contains(
            "  headers: {\n    'Content-Type': 'text/plain',\n    'Accept': '*/*'\n  }\n};\n"
        ));
    }

    #[test]
    fn test_node_payload() {
        let request = RequestSpec::new("http://domain.com", "POST").with_payload("hello");

        let code = NodeJs.format(&request);

        assert!(code.contains("const body = `hello`;\nreq.write(body);\nreq.end();\n"));
    }

    #[test]
    fn test_node_end_callback_logs_collected_buffer() {
        let request = RequestSpec::new("http://domain.com", "GET");

        let code = NodeJs.format(&request);

        assert!(code.contains(
            "  response.on('end', function() {\n\
             \x20   // result has response body buffer\n\
             \x20   console.log(result.toString());\n\
             \x20 });\n"
        ));
        assert!(!code.contains("str.toString()"));
    }

    #[test]
    fn test_node_relative_url() {
        let request = RequestSpec::new("/api/items", "GET");

        let code = NodeJs.format(&request);

        assert!(code.contains("  host: '',\n"));
        assert!(code.contains("  path: '/api/items',\n"));
        assert!(code.contains("  port: 80,\n"));
    }
}
