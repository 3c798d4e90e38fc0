//! Invoice Renderer Demo
//!
//! Renders an invoice record to PDF. With no arguments a built-in sample is
//! used; otherwise the first argument is a JSON invoice record and the
//! optional second argument a theme JSON file.
//!
//! Run with: cargo run -p invoice-pdf --example render_invoice -- [record.json] [theme.json]
//! Set RUST_LOG=debug to see section and page-break logging.

use anyhow::Context;
use invoice_pdf::{InvoiceDocument, InvoiceRecord, InvoiceRenderer, Theme};

const SAMPLE_RECORD: &str = r#"{
    "invoiceName": "Website Redesign",
    "invoiceNumber": 1001,
    "currency": "INR",
    "fromName": "Acme Studio",
    "fromEmail": "billing@acme.example",
    "fromAddress": "12 Park Street, Kolkata 700016",
    "clientName": "Globex Ltd",
    "clientEmail": "accounts@globex.example",
    "clientAddress": "88 Ring Road, Pune 411001",
    "date": "2025-03-01T00:00:00.000Z",
    "dueDate": 15,
    "invoiceItemDescription": "Design and build of the marketing site, including three rounds of revisions",
    "invoiceItemQuantity": 3,
    "invoiceItemRate": 1500,
    "total": 4500,
    "note": "Payment by bank transfer within the due date. Thank you for choosing Acme Studio.",
    "status": "PENDING"
}"#;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);

    let record_json = match args.next() {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?,
        None => SAMPLE_RECORD.to_string(),
    };
    let theme = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            Theme::from_json(&json)?
        }
        None => Theme::classic(),
    };

    let doc: InvoiceDocument = InvoiceRecord::from_json(&record_json)?.into();
    let rendered = InvoiceRenderer::new(theme)?.render(&doc)?;

    std::fs::create_dir_all("output")?;
    let output_path = format!("output/{}", rendered.file_name);
    std::fs::write(&output_path, &rendered.bytes)?;

    println!(
        "Generated: {output_path} ({} pages, {})",
        rendered.page_count,
        rendered.content_type()
    );

    Ok(())
}
