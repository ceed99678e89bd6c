//! Java snippets.
//!
//! Two flavors are available: the JDK's own `HttpURLConnection` ("Platform")
//! and Spring's `RestTemplate`. Both turn the payload into a sequence of
//! `StringBuilder.append()` calls, one per payload line.

use super::SnippetFormatter;
use crate::models::RequestSpec;

/// Java code using `java.net.HttpURLConnection`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaPlatform;

impl SnippetFormatter for JavaPlatform {
    fn lang(&self) -> &'static str {
        "java"
    }

    fn format(&self, request: &RequestSpec) -> String {
        let (Some(url), Some(method)) = (request.url(), request.method()) else {
            return String::new();
        };

        let mut code = format!("URL url = new URL(\"{}\");\n", url);
        code.push_str("HttpURLConnection con = (HttpURLConnection) url.openConnection();\n");
        code.push_str(&format!("con.setRequestMethod(\"{}\");\n", method));
        // Headers
        for header in request.headers() {
            code.push_str(&format!(
                "con.setRequestProperty(\"{}\", \"{}\");\n",
                header.name, header.value
            ));
        }
        // Write the body only when there is one
        if let Some(payload) = request.payload() {
            code.push_str(&string_builder_body(payload));
            code.push('\n');
            code.push_str("con.setDoOutput(true);\n");
            code.push_str("DataOutputStream out = new DataOutputStream(con.getOutputStream());\n");
            code.push_str("out.writeBytes(body);\n");
            code.push_str("out.flush();\n");
            code.push_str("out.close();\n");
        }
        code.push('\n');
        // Read status and body
        code.push_str("int status = con.getResponseCode();\n");
        code.push_str(
            "BufferedReader in = new BufferedReader(new InputStreamReader(con.getInputStream()));\n",
        );
        code.push_str("String inputLine;\n");
        code.push_str("StringBuilder response = new StringBuilder();\n");
        code.push_str("while ((inputLine = in.readLine()) != null) {\n");
        code.push_str("    response.append(inputLine);\n");
        code.push_str("}\n");
        code.push_str("in.close();\n");
        code.push_str("con.disconnect();\n");
        code.push_str("System.out.println(\"Response status: \" + status);\n");
        code.push_str("System.out.println(response.toString());");

        code
    }
}

/// Java code using Spring's `RestTemplate`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaSpring;

impl SnippetFormatter for JavaSpring {
    fn lang(&self) -> &'static str {
        "java"
    }

    fn format(&self, request: &RequestSpec) -> String {
        let (Some(url), Some(method)) = (request.url(), request.method()) else {
            return String::new();
        };

        let mut code = String::from("RestTemplate rest = new RestTemplate();\n");
        code.push_str("HttpHeaders headers = new HttpHeaders();\n");
        for header in request.headers() {
            code.push_str(&format!(
                "headers.add(\"{}\", \"{}\");\n",
                header.name, header.value
            ));
        }
        // Spring always needs a body for the entity
        match request.payload() {
            Some(payload) => code.push_str(&string_builder_body(payload)),
            None => code.push_str("String body = \"\";\n"),
        }
        code.push('\n');
        code.push_str("HttpEntity<String> requestEntity = new HttpEntity<String>(body, headers);\n");
        code.push_str("ResponseEntity<String> responseEntity = rest.exchange(");
        code.push_str(&format!(
            "\"{}\", HttpMethod.{}, requestEntity, String.class);\n",
            url, method
        ));
        code.push_str("HttpStatus httpStatus = responseEntity.getStatusCode();\n");
        code.push_str("int status = httpStatus.value();\n");
        code.push_str("String response = responseEntity.getBody();\n");
        code.push_str("System.out.println(\"Response status: \" + status);\n");
        code.push_str("System.out.println(response);");

        code
    }
}

/// Emits `String body` built from one `sb.append()` per payload line.
///
/// Every line but the last gets a literal `\n` appended; double quotes are
/// escaped.
fn string_builder_body(payload: &str) -> String {
    let lines = payload_to_lines(payload);
    let last = lines.len().saturating_sub(1);

    let mut code = String::from("\nStringBuilder sb = new StringBuilder();\n");
    for (i, line) in lines.iter().enumerate() {
        let newline = if i == last { "" } else { "\\n" };
        code.push_str(&format!("sb.append(\"{}{}\");\n", line, newline));
    }
    code.push_str("String body = sb.toString();\n");
    code
}

fn payload_to_lines(payload: &str) -> Vec<String> {
    payload
        .split('\n')
        .map(|line| line.replace('"', "\\\""))
        .collect()
}
