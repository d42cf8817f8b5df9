//! Utility functions for string formatting.

pub mod format;

pub use format::{single_line, truncate_string, yes_no};
