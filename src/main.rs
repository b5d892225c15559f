//! Seminars CLI - seminar booking queries and registration handling

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = seminars_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
