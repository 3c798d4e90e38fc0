//! Invoice PDF - deterministic invoice layout and rendering
//!
//! This crate provides:
//! - The invoice data model (flat storage record and normalised document)
//! - A theme object that parameterises one section pipeline
//! - A layout cursor with page-break bookkeeping
//! - Section renderers (header, parties, line-item table, totals, notes, footer)
//! - A document assembler that paints the laid-out canvas into PDF bytes
//!
//! # Example
//!
//! ```
//! use invoice_pdf::{InvoiceRecord, InvoiceRenderer};
//!
//! let record = InvoiceRecord::from_json(r#"{
//!     "invoiceNumber": 7,
//!     "invoiceName": "Website Design",
//!     "currency": "USD",
//!     "date": "2025-03-01T00:00:00.000Z",
//!     "dueDate": 30,
//!     "invoiceItemDescription": "Design work",
//!     "invoiceItemQuantity": 2,
//!     "invoiceItemRate": 50,
//!     "total": 100
//! }"#)?;
//!
//! let rendered = InvoiceRenderer::default().render(&record.into())?;
//! assert_eq!(rendered.page_count, 1);
//! assert_eq!(rendered.content_disposition(), "inline; filename=\"Invoice-7.pdf\"");
//! # Ok::<(), invoice_pdf::InvoiceError>(())
//! ```

mod assembler;
mod canvas;
mod cursor;
mod model;
mod painter;
pub mod sections;
mod theme;

pub use assembler::{render_invoice, InvoiceRenderer, LaidOutInvoice, RenderedInvoice};
pub use canvas::{Canvas, DrawOp, FontMetrics, TextStyle};
pub use cursor::{LayoutCursor, PageGeometry};
pub use model::{InvoiceDocument, InvoiceRecord, InvoiceStatus, LineItem, Party, Tax};
pub use painter::paint;
pub use theme::{ColumnAlign, FontChoice, Labels, Palette, PageSetup, Rgb, Spacing, TableLayout, Theme, Typography};

pub use invoice_text::Currency;

use thiserror::Error;

/// Errors that can occur while loading input or producing PDF bytes
#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("Invalid theme: {0}")]
    InvalidTheme(String),

    #[error("PDF error: {0}")]
    PdfError(#[from] pdf_core::PdfError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for invoice operations
pub type Result<T> = std::result::Result<T, InvoiceError>;
