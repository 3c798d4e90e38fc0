//! Line-item table
//!
//! One header row and one body row. The body row splits at line
//! granularity when it does not fit, and the header is repeated at the
//! top of every continuation page.

use invoice_text::{format_currency, format_quantity, wrap_text};
use log::debug;
use pdf_core::{Align, FontWeight};

use super::{RenderState, SectionRenderer};
use crate::canvas::TextStyle;
use crate::model::InvoiceDocument;
use crate::theme::{ColumnAlign, Theme};

const EPSILON: f64 = 1e-6;

/// Share of a line height between the line top and its baseline
const BASELINE_RATIO: f64 = 0.75;

#[derive(Debug, Clone, Copy, Default)]
pub struct TableSection;

/// Cell contents of the body row
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub description: Vec<String>,
    pub quantity: String,
    pub rate: String,
    pub amount: String,
}

impl TableRow {
    /// Format the line item; the amount is quantity x rate, never the stored total
    pub fn from_document(doc: &InvoiceDocument, theme: &Theme) -> Self {
        let item = doc.line_item();
        let padding = theme.table.cell_padding;
        let width = (theme.table.column_widths[0] - 2.0 * padding).max(0.0);
        let metrics = theme.metrics(FontWeight::Regular, theme.typography.table_size);

        let mut description = wrap_text(item.description(), width, &metrics);
        if description.is_empty() {
            description.push(String::new());
        }

        Self {
            description,
            quantity: format_quantity(item.quantity),
            rate: format_currency(item.unit_rate, &doc.currency),
            amount: format_currency(item.amount(), &doc.currency),
        }
    }
}

/// Left edge of every column
fn column_lefts(left: f64, widths: &[f64; 4]) -> [f64; 4] {
    let mut lefts = [left; 4];
    for i in 1..4 {
        lefts[i] = lefts[i - 1] + widths[i - 1];
    }
    lefts
}

/// Anchor x for text in a cell
fn anchor(left: f64, width: f64, padding: f64, align: ColumnAlign) -> f64 {
    match align {
        ColumnAlign::Left => left + padding,
        ColumnAlign::Center => left + width / 2.0,
        ColumnAlign::Right => left + width - padding,
    }
}

impl TableSection {
    fn row_height(line_count: usize, theme: &Theme) -> f64 {
        line_count as f64 * theme.typography.table_line_height + 2.0 * theme.table.cell_padding
    }

    /// Baseline of line `index` in a row whose top edge is `top`
    fn baseline(top: f64, index: usize, theme: &Theme) -> f64 {
        let line_height = theme.typography.table_line_height;
        top + theme.table.cell_padding + (index as f64 + BASELINE_RATIO) * line_height
    }

    fn draw_header(state: &mut RenderState, theme: &Theme) {
        let table = &theme.table;
        let palette = &theme.palette;
        let lefts = column_lefts(state.geometry().content_left(), &table.column_widths);
        let top = state.cursor.y();
        let height = Self::row_height(1, theme);
        let style = theme.text_style(
            FontWeight::Bold,
            theme.typography.table_size,
            palette.table_header_text,
        );
        let labels = [
            &theme.labels.description,
            &theme.labels.quantity,
            &theme.labels.rate,
            &theme.labels.amount,
        ];

        for (i, label) in labels.into_iter().enumerate() {
            let width = table.column_widths[i];
            state.rect(
                lefts[i],
                top,
                width,
                height,
                Some(palette.table_header_fill),
                Some((palette.table_border, table.border_width)),
            );
            let x = anchor(lefts[i], width, table.cell_padding, table.column_aligns[i]);
            state.text(label, x, Self::baseline(top, 0, theme), table.column_aligns[i].into(), style);
        }

        state.cursor.advance(height);
    }

    /// Draw one slice of the body row at the cursor
    fn draw_body(state: &mut RenderState, theme: &Theme, row: &TableRow, lines: &[String], first: bool) {
        let table = &theme.table;
        let lefts = column_lefts(state.geometry().content_left(), &table.column_widths);
        let top = state.cursor.y();
        let height = Self::row_height(lines.len(), theme);
        let style: TextStyle = theme.text_style(
            FontWeight::Regular,
            theme.typography.table_size,
            theme.palette.text,
        );

        for (i, left) in lefts.iter().enumerate() {
            state.rect(
                *left,
                top,
                table.column_widths[i],
                height,
                None,
                Some((theme.palette.table_border, table.border_width)),
            );
        }

        let x = anchor(lefts[0], table.column_widths[0], table.cell_padding, table.column_aligns[0]);
        for (index, line) in lines.iter().enumerate() {
            let y = Self::baseline(top, index, theme);
            state.text(line, x, y, table.column_aligns[0].into(), style);
        }

        if first {
            let cells = [&row.quantity, &row.rate, &row.amount];
            for (offset, text) in cells.into_iter().enumerate() {
                let i = offset + 1;
                let x = anchor(lefts[i], table.column_widths[i], table.cell_padding, table.column_aligns[i]);
                let align: Align = table.column_aligns[i].into();
                state.text(text, x, Self::baseline(top, 0, theme), align, style);
            }
        }

        state.cursor.advance(height);
    }
}

impl SectionRenderer for TableSection {
    fn name(&self) -> &'static str {
        "table"
    }

    fn render(&self, doc: &InvoiceDocument, state: &mut RenderState, theme: &Theme) -> f64 {
        let row = TableRow::from_document(doc, theme);
        let line_height = theme.typography.table_line_height;
        let padding = theme.table.cell_padding;

        // header plus at least one body line
        state
            .cursor
            .ensure_space(Self::row_height(1, theme) + Self::row_height(1, theme));
        Self::draw_header(state, theme);

        let mut rest: &[String] = &row.description;
        let mut first = true;
        let mut fresh_page = false;
        while !rest.is_empty() {
            let available = state.cursor.remaining() - 2.0 * padding;
            let fit = ((available + EPSILON) / line_height).floor().max(0.0) as usize;
            if fit == 0 && !fresh_page {
                state.cursor.break_page();
                Self::draw_header(state, theme);
                fresh_page = true;
                continue;
            }

            let take = fit.clamp(1, rest.len());
            Self::draw_body(state, theme, &row, &rest[..take], first);
            rest = &rest[take..];
            first = false;
            fresh_page = false;

            if !rest.is_empty() {
                debug!("Table row continues on the next page ({} lines left)", rest.len());
                state.cursor.break_page();
                Self::draw_header(state, theme);
                fresh_page = true;
            }
        }

        state.cursor.skip(theme.spacing.after_table);
        state.cursor.y()
    }
}
