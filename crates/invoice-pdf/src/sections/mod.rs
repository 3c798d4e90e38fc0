//! Section renderers
//!
//! Each section reads the invoice and the theme, draws onto the shared
//! [`RenderState`] at the cursor and leaves the cursor below what it drew.
//! The footer is different: it runs once after every other section, when
//! the final page count is known.

mod divider;
mod footer;
mod header;
mod notes;
mod parties;
mod table;
mod totals;

pub use divider::DividerSection;
pub use footer::FooterSection;
pub use header::HeaderSection;
pub use notes::NotesSection;
pub use parties::{ColumnLine, PartiesSection};
pub use table::{TableRow, TableSection};
pub use totals::{TotalsRow, TotalsSection};

use pdf_core::Align;

use crate::canvas::{Canvas, TextStyle};
use crate::cursor::{LayoutCursor, PageGeometry};
use crate::model::InvoiceDocument;
use crate::theme::{Rgb, Theme};

/// Mutable state of one render: the cursor and everything drawn so far
#[derive(Debug, Clone)]
pub struct RenderState {
    pub cursor: LayoutCursor,
    pub canvas: Canvas,
}

impl RenderState {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            cursor: LayoutCursor::new(geometry),
            canvas: Canvas::new(),
        }
    }

    pub fn geometry(&self) -> PageGeometry {
        *self.cursor.geometry()
    }

    /// Draw text on the cursor's page
    pub fn text(&mut self, text: &str, x: f64, y: f64, align: Align, style: TextStyle) {
        self.canvas.text(self.cursor.page(), text, x, y, align, style);
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: Option<Rgb>, stroke: Option<(Rgb, f64)>) {
        self.canvas
            .rect(self.cursor.page(), x, y, width, height, fill, stroke);
    }

    /// Full-width horizontal rule at `y` on the cursor's page
    pub fn rule(&mut self, y: f64, width: f64, color: Rgb) {
        let geometry = self.geometry();
        self.canvas.line(
            self.cursor.page(),
            geometry.content_left(),
            y,
            geometry.content_right(),
            y,
            width,
            color,
        );
    }
}

/// One step of the invoice pipeline
pub trait SectionRenderer {
    fn name(&self) -> &'static str;

    /// Draw at the cursor; returns the cursor y afterwards
    fn render(&self, doc: &InvoiceDocument, state: &mut RenderState, theme: &Theme) -> f64;
}

/// Body sections in drawing order
pub fn default_sections() -> Vec<Box<dyn SectionRenderer + Send + Sync>> {
    vec![
        Box::new(HeaderSection),
        Box::new(PartiesSection),
        Box::new(DividerSection),
        Box::new(TableSection),
        Box::new(TotalsSection),
        Box::new(NotesSection),
    ]
}

/// `"<label> <value>"`, or just the label when the value is empty
pub(crate) fn labeled(label: &str, value: &str) -> String {
    if value.is_empty() {
        label.to_string()
    } else if label.is_empty() {
        value.to_string()
    } else {
        format!("{label} {value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pipeline_order() {
        let names: Vec<_> = default_sections().iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec!["header", "parties", "divider", "table", "totals", "notes"]
        );
    }

    #[test]
    fn test_labeled() {
        assert_eq!(labeled("Issue Date:", "March 1, 2025"), "Issue Date: March 1, 2025");
        assert_eq!(labeled("Issue Date:", ""), "Issue Date:");
        assert_eq!(labeled("", "x"), "x");
    }

    #[test]
    fn test_state_draws_on_cursor_page() {
        let mut state = RenderState::new(PageGeometry::from_theme(&Theme::classic()));
        state.cursor.break_page();
        state.rule(100.0, 0.5, Rgb::BLACK);
        assert_eq!(state.canvas.page_count(), 2);
        assert_eq!(state.canvas.pages()[1].len(), 1);
    }
}
