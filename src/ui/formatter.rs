//! Pure formatting functions for UI output.
//!
//! Status lines and errors are decorated with `console` styles, which turn
//! themselves off when the stream is not a terminal.

use console::style;

/// Build an error line with a red `ERROR:` label.
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

/// Build a success line with a green checkmark.
pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

/// Build a status line with a yellow arrow.
pub fn format_status(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{}", format_success(message));
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{}", format_status(message));
}

/// Print a command result as-is, so it can be captured by scripts.
pub fn display_result(message: &str) {
    println!("{}", message);
}
