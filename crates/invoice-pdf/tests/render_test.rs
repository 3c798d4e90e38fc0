//! Integration tests for invoice rendering
//!
//! Layout assertions use the canvas; PDF assertions load the output back
//! with lopdf and look for the hex-encoded text runs.

use invoice_pdf::{
    Currency, DrawOp, InvoiceDocument, InvoiceRecord, InvoiceRenderer, LaidOutInvoice, LineItem,
    Party, Tax, Theme,
};
use invoice_text::format_currency;
use lopdf::Document;
use pretty_assertions::assert_eq;
use serde_json::json;

fn sample_record() -> InvoiceRecord {
    serde_json::from_value(json!({
        "invoiceName": "Website Redesign",
        "invoiceNumber": 42,
        "currency": "INR",
        "fromName": "Acme Studio",
        "fromEmail": "billing@acme.example",
        "fromAddress": "12 Park Street, Kolkata",
        "clientName": "Globex Ltd",
        "clientEmail": "accounts@globex.example",
        "clientAddress": "88 Ring Road, Pune",
        "date": "2025-03-01T00:00:00.000Z",
        "dueDate": 15,
        "invoiceItemDescription": "Design and build of the marketing site",
        "invoiceItemQuantity": 3,
        "invoiceItemRate": 1500,
        "total": 4500,
        "note": "Payment by bank transfer.",
        "status": "PENDING"
    }))
    .unwrap()
}

fn sample() -> InvoiceDocument {
    sample_record().into()
}

/// Text as the PDF content stream shows it
fn hex(text: &str) -> String {
    let bytes = pdf_core::encode_win_ansi(text);
    let digits: String = bytes.iter().map(|b| format!("{b:02X}")).collect();
    format!("<{digits}> Tj")
}

fn page_contents(bytes: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(bytes).expect("rendered PDF should parse");
    doc.get_pages()
        .values()
        .map(|page_id| {
            let page = doc.get_object(*page_id).unwrap().as_dict().unwrap();
            let contents_id = page.get(b"Contents").unwrap().as_reference().unwrap();
            let stream = doc.get_object(contents_id).unwrap().as_stream().unwrap();
            let data = stream
                .decompressed_content()
                .unwrap_or_else(|_| stream.content.clone());
            String::from_utf8_lossy(&data).into_owned()
        })
        .collect()
}

fn long_note(lines: usize) -> String {
    (1..=lines)
        .map(|i| format!("Note line {i} about delivery terms"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn numbered_lines(prefix: &str, count: usize) -> String {
    (1..=count)
        .map(|i| format!("{prefix} {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Texts of a page other than the footer
fn body_texts(laid_out: &LaidOutInvoice, page: usize) -> Vec<String> {
    let theme = Theme::classic();
    let page_label = theme.labels.page_number(page + 1, laid_out.page_count);
    laid_out
        .texts(page)
        .into_iter()
        .filter(|text| *text != theme.labels.thank_you && *text != page_label)
        .map(str::to_string)
        .collect()
}

fn assert_every_page_has_body(laid_out: &LaidOutInvoice, case: &str) {
    assert_eq!(laid_out.canvas.page_count(), laid_out.page_count, "{case}");
    for page in 0..laid_out.page_count {
        assert!(
            !body_texts(laid_out, page).is_empty(),
            "{case}: page {} of {} holds only the footer",
            page + 1,
            laid_out.page_count
        );
    }
}

#[test]
fn test_single_page_invoice() {
    let rendered = InvoiceRenderer::default().render(&sample()).unwrap();
    assert_eq!(rendered.page_count, 1);
    assert_eq!(rendered.file_name, "Invoice-42.pdf");

    let pages = page_contents(&rendered.bytes);
    assert_eq!(pages.len(), 1);
    for text in [
        "INVOICE",
        "Invoice Number: 42",
        "Issue Date: March 1, 2025",
        "Due Date: March 16, 2025",
        "Status: PENDING",
        "PAY TO:",
        "BILLED TO:",
        "Email: accounts@globex.example",
        "Rs.4,500.00",
        "Total Due Amount",
        "Notes:",
        "Thank you for your business!",
        "Page 1 of 1",
    ] {
        assert!(pages[0].contains(&hex(text)), "missing {text:?}");
    }
}

#[test]
fn test_rendering_is_byte_identical() {
    let renderer = InvoiceRenderer::new(Theme::accent()).unwrap();
    let mut doc = sample();
    doc.note = Some(long_note(70));

    let first = renderer.render(&doc).unwrap();
    let second = renderer.render(&doc).unwrap();
    assert!(first.page_count > 1);
    assert_eq!(first.bytes, second.bytes);
}

#[test]
fn test_multi_page_footer_numbering() {
    let mut doc = sample();
    doc.note = Some(long_note(120));

    let rendered = InvoiceRenderer::default().render(&doc).unwrap();
    let pages = page_contents(&rendered.bytes);
    let total = pages.len();

    assert!(total > 1);
    assert_eq!(rendered.page_count, total);
    for (index, content) in pages.iter().enumerate() {
        let label = format!("Page {} of {}", index + 1, total);
        assert!(content.contains(&hex(&label)), "page {} lacks {label:?}", index + 1);
        assert!(content.contains(&hex("Thank you for your business!")));
    }
}

#[test]
fn test_layout_page_count_matches_footer() {
    let mut doc = sample();
    doc.line_items[0].description = Some(long_note(90));

    let laid_out = InvoiceRenderer::default().layout(&doc);
    assert!(laid_out.page_count > 1);
    for page in 0..laid_out.page_count {
        let texts = laid_out.texts(page);
        let expected = format!("Page {} of {}", page + 1, laid_out.page_count);
        assert_eq!(texts.last().copied(), Some(expected.as_str()));
        // the table header is repeated wherever the row continues
        if page > 0 && texts.iter().any(|t| t.starts_with("Note line")) {
            assert!(texts.contains(&"Description"));
        }
    }
}

#[test]
fn test_empty_note_is_absent_and_takes_no_space() {
    let renderer = InvoiceRenderer::default();
    let mut without = sample();
    without.note = None;
    let mut empty = sample();
    empty.note = Some(String::new());

    let a = renderer.layout(&without);
    let b = renderer.layout(&empty);
    assert_eq!(a, b);
    assert!(!a.texts(0).contains(&"Notes:"));
}

#[test]
fn test_table_amount_is_independent_of_total() {
    let renderer = InvoiceRenderer::default();
    for (quantity, rate, total) in [(3.0, 1500.0, 1.0), (2.5, 99.99, 0.0), (10.0, 0.5, 1e6)] {
        let doc = InvoiceDocument {
            line_items: [LineItem::new("Work", quantity, rate)],
            total,
            ..sample()
        };
        let texts = renderer.layout(&doc).texts(0).join("\n");
        let amount = format_currency(quantity * rate, &Currency::Inr);
        let stored = format_currency(total, &Currency::Inr);

        assert!(texts.contains(&amount), "missing amount {amount}");
        assert!(texts.contains(&stored), "missing stored total {stored}");
        assert!(doc.total_mismatch().is_some());
    }
}

#[test]
fn test_well_formed_totals_match() {
    let doc = sample();
    assert_eq!(doc.total_mismatch(), None);
    assert_eq!(doc.line_item().amount(), doc.total);
}

#[test]
fn test_long_word_sits_on_its_own_line() {
    let word = "Supercalifragilisticexpialidocious".repeat(3);
    let mut doc = sample();
    doc.line_items[0].description = Some(format!("Item {word} done"));

    let laid_out = InvoiceRenderer::default().layout(&doc);
    let texts = laid_out.texts(0);
    assert!(texts.contains(&word.as_str()));
    assert!(texts.contains(&"Item"));
    assert!(texts.contains(&"done"));
}

#[test]
fn test_missing_fields_render_empty() {
    let doc: InvoiceDocument = InvoiceRecord::from_json("{}").unwrap().into();
    let laid_out = InvoiceRenderer::default().layout(&doc);
    let texts = laid_out.texts(0);

    assert!(texts.contains(&"Issue Date:"));
    assert!(texts.contains(&"Due Date:"));
    assert!(texts.contains(&"₹0.00"));
    assert!(!texts.iter().any(|t| t.contains("undefined") || t.contains("null")));
    assert!(!texts.contains(&"Notes:"));
}

#[test]
fn test_invalid_date_still_renders() {
    let mut doc = sample();
    doc.issue_date = Some("31/02/2025".into());

    let rendered = InvoiceRenderer::default().render(&doc).unwrap();
    let pages = page_contents(&rendered.bytes);
    assert!(pages[0].contains(&hex("Issue Date:")));
    assert!(!pages[0].contains(&hex("Due Date: March 16, 2025")));
}

#[test]
fn test_tax_row_and_other_currency() {
    let mut doc = sample();
    doc.currency = Currency::Other("JPY".into());
    doc.total = 5310.0;
    doc.tax = Some(Tax {
        percentage: 18.0,
        amount: 810.0,
    });

    let texts = InvoiceRenderer::default().layout(&doc).texts(0).join("\n");
    assert!(texts.contains("Tax (18%)"));
    assert!(texts.contains("JPY 810.00"));
    assert!(texts.contains("JPY 4,500.00"));
    assert!(texts.contains("JPY 5,310.00"));
}

#[test]
fn test_theme_from_json_drives_labels() {
    let theme = Theme::from_json(r#"{ "labels": { "title": "TAX INVOICE", "pageNumber": "{page}/{pages}" } }"#)
        .unwrap();
    let laid_out = InvoiceRenderer::new(theme).unwrap().layout(&sample());
    let texts = laid_out.texts(0);

    assert_eq!(texts[0], "TAX INVOICE");
    assert_eq!(texts.last(), Some(&"1/1"));
}

#[test]
fn test_courier_theme_renders() {
    let theme = Theme::from_json(r#"{ "typography": { "font": "courier" } }"#).unwrap();
    let rendered = InvoiceRenderer::new(theme).unwrap().render(&sample()).unwrap();

    let doc = Document::load_mem(&rendered.bytes).unwrap();
    let has_courier = doc.objects.values().any(|object| {
        object
            .as_dict()
            .ok()
            .and_then(|dict| dict.get(b"BaseFont").ok())
            .and_then(|name| name.as_name().ok())
            .map(|name| name == b"Courier" || name == b"Courier-Bold")
            .unwrap_or(false)
    });
    assert!(has_courier);
}

#[test]
fn test_no_footer_only_pages_as_the_table_grows() {
    let renderer = InvoiceRenderer::default();
    for lines in 1..=90 {
        let doc = InvoiceDocument {
            line_items: [LineItem::new(numbered_lines("Item", lines), 1.0, 1.0)],
            total: 1.0,
            note: None,
            ..sample()
        };
        assert_every_page_has_body(&renderer.layout(&doc), &format!("{lines} description lines"));
    }
}

#[test]
fn test_no_footer_only_pages_as_the_note_grows() {
    let renderer = InvoiceRenderer::default();
    for lines in 1..=120 {
        let doc = InvoiceDocument {
            note: Some(numbered_lines("Note", lines)),
            ..sample()
        };
        assert_every_page_has_body(&renderer.layout(&doc), &format!("{lines} note lines"));
    }
}

#[test]
fn test_tall_party_address_stays_inside_the_body_area() {
    let theme = Theme::classic();
    let renderer = InvoiceRenderer::default();
    for lines in [40, 49, 50, 51, 52, 70, 80, 120] {
        let doc = InvoiceDocument {
            from: Party {
                name: Some("Acme Studio".into()),
                email: None,
                address: Some(numbered_lines("Street", lines)),
            },
            ..sample()
        };
        let laid_out = renderer.layout(&doc);
        let last = format!("Street {lines}");
        assert!(laid_out.canvas.find_text(&last).is_some(), "{last} missing");
        assert_every_page_has_body(&laid_out, &format!("{lines} address lines"));

        for (page, ops) in laid_out.canvas.pages().iter().enumerate() {
            let body = body_texts(&laid_out, page);
            for op in ops {
                if let DrawOp::Text { text, y, .. } = op {
                    if body.contains(text) {
                        assert!(
                            *y <= theme.content_bottom(),
                            "{lines} address lines: {text:?} at {y} on page {}",
                            page + 1
                        );
                    }
                }
            }
        }
    }
}

