//! Invoice Text - formatting and line breaking for invoice documents
//!
//! This crate provides:
//! - Currency formatting with South-Asian digit grouping (`₹12,34,567.89`)
//! - Quantity formatting
//! - Lenient date parsing and long-form date formatting
//! - Greedy word wrapping against any text measure
//!
//! # Example
//!
//! ```
//! use invoice_text::{format_currency, wrap_text, Currency};
//!
//! assert_eq!(format_currency(1234567.89, &Currency::Inr), "₹12,34,567.89");
//!
//! // One unit of width per character
//! let measure = |s: &str| s.chars().count() as f64;
//! let lines = wrap_text("Hello world this is a test", 12.0, &measure);
//! assert_eq!(lines, vec!["Hello world", "this is a", "test"]);
//! ```

mod date;
mod formatter;
mod linebreak;

pub use date::{due_date, format_long_date, parse_date, parse_date_strict};
pub use formatter::{format_currency, format_currency_code, format_quantity, Currency};
pub use linebreak::{measure_block_height, wrap_text, TextMeasure};

use thiserror::Error;

/// Errors that can occur during strict text parsing
#[derive(Debug, Error)]
pub enum TextError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Result type for text operations
pub type Result<T> = std::result::Result<T, TextError>;
