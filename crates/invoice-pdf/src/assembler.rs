//! Document assembler: runs the section pipeline and produces PDF bytes

use invoice_text::parse_date_strict;
use log::{debug, info, warn};

use crate::canvas::Canvas;
use crate::cursor::PageGeometry;
use crate::model::InvoiceDocument;
use crate::painter::paint;
use crate::sections::{default_sections, FooterSection, RenderState, SectionRenderer};
use crate::theme::Theme;
use crate::Result;

/// Finished layout: every page with its footer stamped
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutInvoice {
    pub canvas: Canvas,
    pub page_count: usize,
}

impl LaidOutInvoice {
    /// Text runs of one page (0-based), in drawing order
    pub fn texts(&self, page: usize) -> Vec<&str> {
        self.canvas.texts(page)
    }
}

/// PDF bytes plus what an HTTP layer needs to serve them
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedInvoice {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub file_name: String,
}

impl RenderedInvoice {
    pub fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    /// `inline; filename="Invoice-<number>.pdf"`
    pub fn content_disposition(&self) -> String {
        format!("inline; filename=\"{}\"", self.file_name)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Lays out invoices with one theme
///
/// Holds no per-render state, so one renderer can serve concurrent renders.
pub struct InvoiceRenderer {
    theme: Theme,
    sections: Vec<Box<dyn SectionRenderer + Send + Sync>>,
    footer: FooterSection,
}

impl Default for InvoiceRenderer {
    fn default() -> Self {
        Self {
            theme: Theme::classic(),
            sections: default_sections(),
            footer: FooterSection,
        }
    }
}

impl InvoiceRenderer {
    /// Create a renderer, rejecting themes the layout cannot use
    pub fn new(theme: Theme) -> Result<Self> {
        theme.validate()?;
        Ok(Self {
            theme,
            ..Self::default()
        })
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Run every section, then stamp the footer on every page
    pub fn layout(&self, doc: &InvoiceDocument) -> LaidOutInvoice {
        self.report_degraded_input(doc);

        let mut state = RenderState::new(PageGeometry::from_theme(&self.theme));
        for section in &self.sections {
            let y = section.render(doc, &mut state, &self.theme);
            debug!(
                "Rendered {} section, cursor at page {} y {:.2}",
                section.name(),
                state.cursor.page_count(),
                y
            );
        }

        // pages come from what was drawn, so a break with nothing after it
        // adds no page
        let mut canvas = state.canvas;
        if canvas.page_count() < state.cursor.page_count() {
            debug!(
                "Dropping {} trailing empty page(s)",
                state.cursor.page_count() - canvas.page_count()
            );
        }
        let page_count = self.footer.stamp(&mut canvas, &self.theme);

        LaidOutInvoice { canvas, page_count }
    }

    /// Lay out and serialise to PDF
    pub fn render(&self, doc: &InvoiceDocument) -> Result<RenderedInvoice> {
        let laid_out = self.layout(doc);
        let file_name = doc.file_name();
        let title = file_name.trim_end_matches(".pdf");

        let bytes = paint(&laid_out.canvas, &self.theme, title)?.into_bytes()?;
        info!(
            "Rendered invoice {}: {} pages, {} bytes",
            doc.invoice_number,
            laid_out.page_count,
            bytes.len()
        );

        Ok(RenderedInvoice {
            bytes,
            page_count: laid_out.page_count,
            file_name,
        })
    }

    fn report_degraded_input(&self, doc: &InvoiceDocument) {
        if let Some(raw) = doc.issue_date.as_deref().filter(|raw| !raw.trim().is_empty()) {
            if let Err(err) = parse_date_strict(raw) {
                warn!("Invoice {}: {err}, dates render empty", doc.invoice_number);
            }
        }
        if !doc.currency.is_known() {
            warn!(
                "Invoice {}: unknown currency code {:?}, printing it verbatim",
                doc.invoice_number,
                doc.currency.code()
            );
        }
        if let Some(diff) = doc.total_mismatch() {
            warn!(
                "Invoice {}: stored total {} differs from quantity x rate by {:.2}",
                doc.invoice_number, doc.total, diff
            );
        }
    }
}

/// Render with the classic theme
pub fn render_invoice(doc: &InvoiceDocument) -> Result<RenderedInvoice> {
    InvoiceRenderer::default().render(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineItem;
    use crate::InvoiceError;
    use pretty_assertions::assert_eq;

    fn doc() -> InvoiceDocument {
        InvoiceDocument {
            invoice_number: "5".into(),
            invoice_name: "Consulting".into(),
            issue_date: Some("2025-01-10".into()),
            due_date_offset_days: 30,
            line_items: [LineItem::new("Advisory", 2.0, 250.0)],
            total: 500.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_layout_single_page() {
        let laid_out = InvoiceRenderer::default().layout(&doc());
        assert_eq!(laid_out.page_count, 1);
        assert_eq!(laid_out.canvas.page_count(), 1);

        let texts = laid_out.texts(0);
        assert_eq!(texts[0], "INVOICE");
        assert!(texts.contains(&"Due Date: February 9, 2025"));
        assert!(texts.contains(&"₹500.00"));
        assert_eq!(texts.last(), Some(&"Page 1 of 1"));
    }

    #[test]
    fn test_response_metadata() {
        let rendered = render_invoice(&doc()).unwrap();
        assert_eq!(rendered.content_type(), "application/pdf");
        assert_eq!(rendered.file_name, "Invoice-5.pdf");
        assert_eq!(
            rendered.content_disposition(),
            "inline; filename=\"Invoice-5.pdf\""
        );
        assert!(rendered.bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_new_rejects_invalid_theme() {
        let mut theme = Theme::classic();
        theme.typography.body_size = 0.0;
        assert!(matches!(
            InvoiceRenderer::new(theme),
            Err(InvoiceError::InvalidTheme(_))
        ));
    }

    #[test]
    fn test_renderer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InvoiceRenderer>();
    }
}
