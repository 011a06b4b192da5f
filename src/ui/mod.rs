//! User interface module.
//!
//! `formatter` holds the output helpers; this module re-exports them.

pub mod formatter;

pub use formatter::{display_error, display_result, display_status, display_success};
