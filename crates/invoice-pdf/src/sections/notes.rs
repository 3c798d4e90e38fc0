//! Free-text notes

use invoice_text::{measure_block_height, wrap_text};
use log::debug;
use pdf_core::{Align, FontWeight};

use super::{RenderState, SectionRenderer};
use crate::model::InvoiceDocument;
use crate::theme::Theme;

/// `Notes:` label and the wrapped note, absent when the note is blank
///
/// The block is never split across pages unless it is taller than a whole
/// page, in which case it continues line by line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotesSection;

impl NotesSection {
    pub fn lines(doc: &InvoiceDocument, width: f64, theme: &Theme) -> Vec<String> {
        let metrics = theme.metrics(FontWeight::Regular, theme.typography.body_size);
        doc.note()
            .map(|note| wrap_text(note, width, &metrics))
            .unwrap_or_default()
    }

    /// Height of the whole block; zero without a note
    pub fn height(lines: &[String], theme: &Theme) -> f64 {
        if lines.is_empty() {
            0.0
        } else {
            theme.spacing.note_label + measure_block_height(lines.len(), theme.spacing.note_line)
        }
    }
}

impl SectionRenderer for NotesSection {
    fn name(&self) -> &'static str {
        "notes"
    }

    fn render(&self, doc: &InvoiceDocument, state: &mut RenderState, theme: &Theme) -> f64 {
        let geometry = state.geometry();
        let lines = Self::lines(doc, geometry.content_width(), theme);
        if lines.is_empty() {
            return state.cursor.y();
        }

        let spacing = &theme.spacing;
        let height = Self::height(&lines, theme);
        if height <= geometry.printable_height() {
            state.cursor.ensure_space(height);
        } else {
            debug!("Note is taller than a page, continuing it line by line");
            state.cursor.ensure_space(spacing.note_label + spacing.note_line);
        }

        let body = theme.body_style(FontWeight::Regular);
        let x = geometry.content_left();
        let y = state.cursor.y();
        state.text(&theme.labels.notes, x, y, Align::Left, body.bold());
        state.cursor.advance(spacing.note_label);

        for line in &lines {
            if !state.cursor.fits(spacing.note_line) {
                state.cursor.break_page();
            }
            let y = state.cursor.y();
            state.text(line, x, y, Align::Left, body);
            state.cursor.advance(spacing.note_line);
        }

        state.cursor.y()
    }
}
