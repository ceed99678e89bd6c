//! Integration tests for snippet generation.
//!
//! These tests check the generated text of each target against the exact
//! templates and write the output to `target/snippet-test-output` for manual
//! inspection.

use http_code_snippets::models::RequestSpec;
use http_code_snippets::parser::parse_request;
use http_code_snippets::snippets::{generate_snippet, SnippetTarget};
use http_code_snippets::url_details::UrlDetails;
use proptest::prelude::*;
use std::fs;
use std::path::PathBuf;

/// Helper function to create a test output directory
fn get_test_output_dir() -> PathBuf {
    let dir = PathBuf::from("target/snippet-test-output");
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_output(name: &str, code: &str) {
    let output_path = get_test_output_dir().join(name);
    fs::write(&output_path, code).unwrap();
}

#[test]
fn test_fetch_get_request() {
    let request = RequestSpec::new("http://x", "GET");

    let code = generate_snippet(&request, SnippetTarget::FetchJs).code;
    write_output("fetch_get.js", &code);

    assert_eq!(
        code,
        "fetch('http://x')\n\
         .then((response) => {\n\
         \treturn response.text(); // or .json() or .blob() ...\n\
         })\n\
         .then((text) => {\n\
         \t// text is the response body\n\
         })\n\
         .catch((e) => {\n\
         \t// error in e.message\n\
         });\n"
    );
}

#[test]
fn test_fetch_post_with_headers_and_payload() {
    let request = RequestSpec::new("https://jsonplaceholder.typicode.com/posts", "POST")
        .with_header("Content-Type", "application/json")
        .with_payload(r#"{"title": "Test Post", "userId": 1}"#);

    let code = generate_snippet(&request, SnippetTarget::FetchJs).code;
    write_output("fetch_post.js", &code);

    assert!(code.contains("headers.append('Content-Type', 'application/json');"));
    assert!(code.contains(r#"const body = `{"title": "Test Post", "userId": 1}`;"#));
    assert!(code.contains("\tmethod: 'POST',\n\theaders,\n\tbody\n}"));
    assert!(code.contains("fetch('https://jsonplaceholder.typicode.com/posts', init)"));
}

#[test]
fn test_node_full_request() {
    let request = RequestSpec::new("http://localhost:8080/api/items?page=2", "PUT")
        .with_header("Authorization", "Bearer token")
        .with_payload("data");

    let code = generate_snippet(&request, SnippetTarget::NodeJs).code;
    write_output("node_put.js", &code);

    assert_eq!(
        code,
        "const http = require('http');\n\
         const init = {\n\
         \x20 host: 'localhost',\n\
         \x20 path: '/api/items?page=2',\n\
         \x20 port: 8080,\n\
         \x20 method: 'PUT',\n\
         \x20 headers: {\n\
         \x20   'Authorization': 'Bearer token'\n\
         \x20 }\n\
         };\n\
         const callback = function(response) {\n\
         \x20 let result = Buffer.alloc(0);\n\
         \x20 response.on('data', function(chunk) {\n\
         \x20   result = Buffer.concat([result, chunk]);\n\
         \x20 });\n\
         \x20 \n\
         \x20 response.on('end', function() {\n\
         \x20   // result has response body buffer\n\
         \x20   console.log(result.toString());\n\
         \x20 });\n\
         };\n\
         \n\
         const req = http.request(init, callback);\n\
         const body = `data`;\n\
         req.write(body);\n\
         req.end();\n"
    );
}

#[test]
fn test_java_spring_payload_lines() {
    let request = RequestSpec::new("http://x", "POST").with_payload("a\nb");

    let code = generate_snippet(&request, SnippetTarget::JavaSpring).code;
    write_output("spring_post.java", &code);

    assert!(code.contains("sb.append(\"a\\n\");\nsb.append(\"b\");\n"));
    assert!(!code.contains("sb.append(\"b\\n\")"));
}

#[test]
fn test_java_spring_escapes_payload_quotes() {
    let request = RequestSpec::new("http://x", "POST").with_payload(r#"{"id": "1"}"#);

    let code = generate_snippet(&request, SnippetTarget::JavaSpring).code;

    assert!(code.contains(r#"sb.append("{\"id\": \"1\"}");"#));
}

#[test]
fn test_java_platform_from_request_file() {
    let request = parse_request(
        "POST https://api.example.com/users\n\
         Content-Type: application/json\n\
         \n\
         {\"name\": \"John\"}\n",
    )
    .unwrap();

    let code = generate_snippet(&request, SnippetTarget::JavaPlatform).code;
    write_output("platform_post.java", &code);

    assert!(code.contains("URL url = new URL(\"https://api.example.com/users\");"));
    assert!(code.contains("con.setRequestMethod(\"POST\");"));
    assert!(code.contains("con.setRequestProperty(\"Content-Type\", \"application/json\");"));
    assert!(code.contains(r#"sb.append("{\"name\": \"John\"}");"#));
    assert!(code.contains("con.setDoOutput(true);"));
}

#[test]
fn test_every_target_generates_for_same_request() {
    let request = RequestSpec::new("https://api.example.com/users/1", "DELETE")
        .with_header("Accept", "application/json");

    for target in SnippetTarget::all() {
        let snippet = generate_snippet(&request, target);
        assert!(!snippet.code.is_empty(), "{} produced no code", target);
        assert!(snippet.code.contains("DELETE"), "{} lost the method", target);
        assert!(snippet.code.contains("Accept"), "{} lost the header", target);
        assert_eq!(snippet.lang, target.lang());
    }
}

proptest! {
    #[test]
    fn prop_formatters_never_panic(
        url in proptest::option::of(".*"),
        method in proptest::option::of("[A-Za-z]{0,8}"),
        header in proptest::option::of(("[^\n]{0,16}", "[^\n]{0,16}")),
        payload in proptest::option::of(".*"),
    ) {
        let mut request = RequestSpec { url, method, headers: None, payload };
        if let Some((name, value)) = header {
            request.add_header(name, value);
        }
        for target in SnippetTarget::all() {
            let code = generate_snippet(&request, target).code;
            prop_assert_eq!(code.is_empty(), !request.is_complete());
        }
    }

    #[test]
    fn prop_spring_emits_one_append_per_payload_line(payload in "[a-z\"\n]{1,40}") {
        let request = RequestSpec::new("http://x", "POST").with_payload(payload.clone());
        let code = generate_snippet(&request, SnippetTarget::JavaSpring).code;

        let appends = code.matches("sb.append(").count();
        prop_assert_eq!(appends, payload.split('\n').count());
        prop_assert_eq!(code.matches("\\n\");").count(), appends - 1);
    }

    #[test]
    fn prop_url_details_for_absolute_urls(
        secure in any::<bool>(),
        host in "[a-z]{1,10}\\.(com|org|test)",
        port in proptest::option::of(1u16..),
        path in "(/[a-z0-9]{0,6}){0,3}",
    ) {
        let scheme = if secure { "https" } else { "http" };
        let authority = match port {
            Some(port) => format!("{}:{}", host, port),
            None => host.clone(),
        };
        let details = UrlDetails::parse(&format!("{}://{}{}", scheme, authority, path));

        let default_port = if secure { 443 } else { 80 };
        prop_assert_eq!(details.host_value, host);
        prop_assert_eq!(details.port, Some(port.unwrap_or(default_port)));
        prop_assert!(details.path.starts_with('/'));
    }

    #[test]
    fn prop_url_details_never_panics(url in ".*") {
        let details = UrlDetails::parse(&url);
        prop_assert_eq!(details.port_text().is_empty(), details.port.is_none());
        if url.starts_with('/') && details.host_value.is_empty() {
            prop_assert_eq!(details.port, Some(80));
        }
    }
}
