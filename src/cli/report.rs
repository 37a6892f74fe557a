//! Human-facing diagnostics. JSON results go to stdout; everything here goes to stderr,
//! except the `init` confirmation.

use std::io::{self, Write};

use colored::Colorize;

use crate::collect::CollectError;
use crate::config::CONFIG_FILE_NAME;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Print a note shown only with `-v`.
pub fn print_note(message: &str, verbose: bool) {
    if verbose {
        let _ = writeln!(io::stderr().lock(), "{} {}", "note:".bold().cyan(), message);
    }
}

/// Print one line per failed file, then the failure count.
pub fn print_collect_errors(errors: &[CollectError]) {
    print_collect_errors_to(errors, &mut io::stderr().lock());
}

pub fn print_collect_errors_to<W: Write>(errors: &[CollectError], writer: &mut W) {
    print_errors_to(errors, &format!("Failed in {} file(s).", errors.len()), writer);
}

/// Print one line per phrase whose enums could not be shifted, then the failure count.
pub fn print_shift_errors(errors: &[CollectError]) {
    print_shift_errors_to(errors, &mut io::stderr().lock());
}

pub fn print_shift_errors_to<W: Write>(errors: &[CollectError], writer: &mut W) {
    print_errors_to(
        errors,
        &format!("Failed to shift {} phrase(s).", errors.len()),
        writer,
    );
}

fn print_errors_to<W: Write>(errors: &[CollectError], summary: &str, writer: &mut W) {
    if errors.is_empty() {
        return;
    }

    for CollectError { file, error } in errors {
        let _ = writeln!(
            writer,
            "{} [file=\"{}\"]: {:#}",
            "error:".bold().red(),
            file,
            error
        );
    }
    let _ = writeln!(writer, "{} {}", "error:".bold().red(), summary);
}

/// Print a success line summarizing a collection run (verbose only).
pub fn print_collected(phrases: usize, files: usize, verbose: bool) {
    if verbose {
        let _ = writeln!(
            io::stderr().lock(),
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Collected {} phrase(s) from {} {}",
                phrases,
                files,
                if files == 1 { "input" } else { "inputs" }
            )
            .green()
        );
    }
}

pub fn print_init() {
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );
}
