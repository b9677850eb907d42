//! Main CLI application structure

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use super::output::{Output, OutputFormat};
use crate::domain::Diagnostic;
use crate::linter::Linter;

#[derive(Parser)]
#[command(name = "cilint")]
#[command(author, version, about = "Validate GitLab CI/CD configuration files offline")]
pub struct Cli {
    /// Configuration files to validate
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Main entry point for the CLI
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("compiling bundled schema");
    let linter = Linter::new().context("failed to load the bundled GitLab CI schema")?;

    let mut results: Vec<(PathBuf, Vec<Diagnostic>)> = Vec::new();
    for file in cli.files {
        output.verbose_ctx("lint", &format!("checking {}", file.display()));
        let diagnostics = linter.lint_file(&file);
        output.verbose_ctx("lint", &format!("{} diagnostics", diagnostics.len()));
        results.push((file, diagnostics));
    }

    let has_errors = results
        .iter()
        .any(|(_, diagnostics)| !diagnostics.is_empty());

    if output.is_json() {
        output.data(&json_report(&results));
    } else {
        render_text(&output, &results);
    }

    Ok(if has_errors {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// One JSON object keyed by input path, each value the diagnostic list.
fn json_report(results: &[(PathBuf, Vec<Diagnostic>)]) -> serde_json::Value {
    let report: serde_json::Map<String, serde_json::Value> = results
        .iter()
        .map(|(file, diagnostics)| {
            let entries: Vec<serde_json::Value> = diagnostics
                .iter()
                .map(|d| {
                    serde_json::json!({
                        "kind": d.kind(),
                        "message": d.to_string(),
                    })
                })
                .collect();
            (
                file.display().to_string(),
                serde_json::Value::Array(entries),
            )
        })
        .collect();
    serde_json::Value::Object(report)
}

fn render_text(output: &Output, results: &[(PathBuf, Vec<Diagnostic>)]) {
    for (file, diagnostics) in results {
        if diagnostics.is_empty() {
            println!("{} {} is valid", "✓".green(), file.display());
        } else {
            println!(
                "{} {} has {} errors:",
                "✗".red(),
                file.display(),
                diagnostics.len()
            );
            for diagnostic in diagnostics {
                println!("  - {}", diagnostic);
            }
            output.blank();
        }
    }
}
