//! Rule between the parties and the line-item table

use super::{RenderState, SectionRenderer};
use crate::model::InvoiceDocument;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, Default)]
pub struct DividerSection;

impl SectionRenderer for DividerSection {
    fn name(&self) -> &'static str {
        "divider"
    }

    fn render(&self, _doc: &InvoiceDocument, state: &mut RenderState, theme: &Theme) -> f64 {
        state.cursor.ensure_space(theme.spacing.after_rule);
        let y = state.cursor.y();
        state.rule(y, theme.spacing.rule_width, theme.palette.rule);
        state.cursor.skip(theme.spacing.after_rule);
        state.cursor.y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawOp;
    use crate::cursor::PageGeometry;

    #[test]
    fn test_rule_spans_content_width() {
        let theme = Theme::classic();
        let mut state = RenderState::new(PageGeometry::from_theme(&theme));
        state.cursor.set_y(80.0);

        let y = DividerSection.render(&InvoiceDocument::default(), &mut state, &theme);
        assert_eq!(y, 88.0);
        assert!(matches!(
            state.canvas.pages()[0][0],
            DrawOp::Line { x1, x2, y1, .. } if x1 == 20.0 && x2 == 190.0 && y1 == 80.0
        ));
    }
}
