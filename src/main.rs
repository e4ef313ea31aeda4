//! crease - live cricket scoring from the terminal

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = crease::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
