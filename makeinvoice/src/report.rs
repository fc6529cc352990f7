//! Error reporting: one styled line on stderr and a per-class exit code.

use std::process::ExitCode;

use console::Style;
use makeinvoicelib::MakeinvoiceError;

/// Exit code for failures that do not come from the library (JSON output, stdout).
const GENERIC_FAILURE: u8 = 1;

/// Exit code for `err`: the library's failure class, or 1.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<MakeinvoiceError>()
        .map(|e| e.kind().exit_code())
        .unwrap_or(GENERIC_FAILURE)
}

/// Print `err` and return the matching exit code.
pub fn fail(err: &anyhow::Error) -> ExitCode {
    let prefix = Style::new().red().bold().for_stderr().apply_to("Error:");
    eprintln!("{prefix} {err}");
    ExitCode::from(exit_code(err))
}
