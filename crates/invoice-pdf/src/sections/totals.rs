//! Totals block in the right half of the page

use invoice_text::{format_currency, format_quantity};
use pdf_core::{Align, FontWeight};

use super::{RenderState, SectionRenderer};
use crate::model::InvoiceDocument;
use crate::theme::Theme;

/// Share of the row height between the row top and the text baseline
const BASELINE_RATIO: f64 = 0.65;

#[derive(Debug, Clone, Copy, Default)]
pub struct TotalsSection;

#[derive(Debug, Clone, PartialEq)]
pub struct TotalsRow {
    pub label: String,
    pub value: String,
    pub highlight: bool,
}

impl TotalsSection {
    /// Sub Total, Tax when its percentage is positive, then Total Due
    pub fn rows(doc: &InvoiceDocument, theme: &Theme) -> Vec<TotalsRow> {
        let labels = &theme.labels;
        let tax = doc.tax();

        let mut rows = vec![TotalsRow {
            label: labels.sub_total.clone(),
            value: format_currency(doc.sub_total(), &doc.currency),
            highlight: false,
        }];
        if tax.is_shown() {
            rows.push(TotalsRow {
                label: format!("{} ({}%)", labels.tax, format_quantity(tax.percentage)),
                value: format_currency(tax.amount, &doc.currency),
                highlight: false,
            });
        }
        rows.push(TotalsRow {
            label: labels.total_due.clone(),
            value: format_currency(doc.total, &doc.currency),
            highlight: true,
        });
        rows
    }
}

impl SectionRenderer for TotalsSection {
    fn name(&self) -> &'static str {
        "totals"
    }

    fn render(&self, doc: &InvoiceDocument, state: &mut RenderState, theme: &Theme) -> f64 {
        let geometry = state.geometry();
        let rows = Self::rows(doc, theme);
        let row_height = theme.spacing.totals_row;
        let padding = theme.table.cell_padding;
        let left = geometry.content_left() + geometry.content_width() / 2.0;
        let width = geometry.content_right() - left;

        state.cursor.ensure_space(rows.len() as f64 * row_height);

        let body = theme.body_style(FontWeight::Regular);
        for row in &rows {
            let top = state.cursor.y();
            let baseline = top + row_height * BASELINE_RATIO;
            let style = if row.highlight {
                if let Some(fill) = theme.palette.total_fill {
                    state.rect(left, top, width, row_height, Some(fill), None);
                }
                body.bold().with_color(theme.palette.total_text)
            } else {
                body
            };

            state.text(&row.label, left + padding, baseline, Align::Left, style);
            state.text(&row.value, geometry.content_right() - padding, baseline, Align::Right, style);
            state.cursor.advance(row_height);
        }

        state.cursor.skip(theme.spacing.after_totals);
        state.cursor.y()
    }
}
