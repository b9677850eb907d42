//! cilint - Offline linter for GitLab CI configuration files

use std::process::ExitCode;

fn main() -> ExitCode {
    match cilint::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
