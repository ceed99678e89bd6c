//! Command-line front end: prints a code snippet for a request.
//!
//! Reads one `.http` style request from a file or standard input and writes
//! the snippet for the chosen target to standard output. Logging goes to
//! stderr and is controlled with `RUST_LOG`.

use clap::Parser;
use http_code_snippets::config::load_config_file;
use http_code_snippets::parser::parse_request;
use http_code_snippets::snippets::{generate_snippet, SnippetTarget};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "http-snippet", version, about)]
struct Cli {
    /// Snippet flavor: fetch-js, node-js, java-platform or java-spring
    #[arg(short, long, default_value = "fetch-js")]
    target: SnippetTarget,

    /// Request file; standard input when omitted
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(path) = &cli.config {
        if let Err(e) = load_config_file(path) {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    }

    let content = match read_input(cli.file.as_ref()) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Failed to read request: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let request = match parse_request(&content) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    log::debug!("Parsed request: {:?}", request);

    let snippet = generate_snippet(&request, cli.target);
    println!("{}", snippet.code);
    ExitCode::SUCCESS
}

fn read_input(file: Option<&PathBuf>) -> std::io::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            Ok(content)
        }
    }
}
