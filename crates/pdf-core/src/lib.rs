//! PDF Core - Low-level PDF writing
//!
//! This crate provides functionality for:
//! - Creating documents from blank pages
//! - Standard Type1 fonts with metrics and WinAnsi encoding
//! - Inserting text at specific coordinates
//! - Drawing lines and rectangles
//! - Deterministic serialization (no timestamps, ordered objects)
//!
//! # Example
//!
//! ```
//! use pdf_core::{Align, PdfDocument, StandardFont};
//!
//! let mut doc = PdfDocument::new();
//! let page = doc.add_a4_page()?;
//! doc.set_font(StandardFont::HelveticaBold, 26.0);
//! doc.insert_text("INVOICE", page, 297.64, 56.69, Align::Center)?;
//! let bytes = doc.into_bytes()?;
//! assert!(bytes.starts_with(b"%PDF-1.4"));
//! # Ok::<(), pdf_core::PdfError>(())
//! ```

mod document;
mod font;
mod graphics;
mod text;

pub use document::{Color, PdfDocument, A4_HEIGHT, A4_WIDTH};
pub use font::{encode_win_ansi, win_ansi_code, FontFamily, FontWeight, StandardFont};
pub use graphics::{RectStyle, StrokeStyle};
pub use text::{calculate_x_offset, format_number, generate_text_operators, TextRenderContext};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Invalid page size: {0} x {1} points")]
    InvalidPageSize(f64, f64),

    #[error("PDF structure error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Millimetres to points
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * 72.0 / 25.4
}
