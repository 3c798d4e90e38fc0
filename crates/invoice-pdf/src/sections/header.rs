//! Title and invoice metadata

use invoice_text::format_long_date;
use pdf_core::{Align, FontWeight};

use super::{labeled, RenderState, SectionRenderer};
use crate::model::InvoiceDocument;
use crate::theme::Theme;

/// Centred title, then metadata rows (left and right aligned) and a rule
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderSection;

impl HeaderSection {
    /// Left/right text pairs under the title
    pub fn meta_rows(doc: &InvoiceDocument, theme: &Theme) -> Vec<(String, String)> {
        let labels = &theme.labels;
        let issue = doc.issue_date().map(format_long_date).unwrap_or_default();
        let due = doc.due_date().map(format_long_date).unwrap_or_default();

        let mut rows = vec![
            (
                labeled(&labels.invoice_number, doc.invoice_number.trim()),
                labeled(&labels.issue_date, &issue),
            ),
            (doc.invoice_name.trim().to_string(), labeled(&labels.due_date, &due)),
        ];
        if let Some(status) = doc.status {
            rows.push((labeled(&labels.status, status.label()), String::new()));
        }
        rows
    }
}

impl SectionRenderer for HeaderSection {
    fn name(&self) -> &'static str {
        "header"
    }

    fn render(&self, doc: &InvoiceDocument, state: &mut RenderState, theme: &Theme) -> f64 {
        let geometry = state.geometry();
        let spacing = &theme.spacing;
        let rows = Self::meta_rows(doc, theme);

        let height = spacing.after_title + rows.len() as f64 * spacing.meta_row + spacing.after_rule;
        state.cursor.ensure_space(height);

        let title_style = theme.text_style(
            FontWeight::Bold,
            theme.typography.title_size,
            theme.palette.title,
        );
        let y = state.cursor.y();
        state.text(&theme.labels.title, geometry.center_x(), y, Align::Center, title_style);
        state.cursor.advance(spacing.after_title);

        let body = theme.body_style(FontWeight::Regular);
        for (left, right) in &rows {
            let y = state.cursor.y();
            state.text(left, geometry.content_left(), y, Align::Left, body);
            state.text(right, geometry.content_right(), y, Align::Right, body);
            state.cursor.advance(spacing.meta_row);
        }

        let y = state.cursor.y();
        state.rule(y, spacing.rule_width, theme.palette.rule);
        state.cursor.skip(spacing.after_rule);
        state.cursor.y()
    }
}
