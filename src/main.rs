//! reorder - drag-and-drop ordering for item collections

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = reorder::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
