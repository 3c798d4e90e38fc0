//! Footer stamped on every page once the page count is final

use pdf_core::{Align, FontWeight};

use crate::canvas::Canvas;
use crate::cursor::PageGeometry;
use crate::theme::Theme;

/// Rule, thank-you text and `Page i of N` at fixed positions
#[derive(Debug, Clone, Copy, Default)]
pub struct FooterSection;

impl FooterSection {
    /// Stamp every page of `canvas`; returns the page count used for `N`
    pub fn stamp(&self, canvas: &mut Canvas, theme: &Theme) -> usize {
        let geometry = PageGeometry::from_theme(theme);
        let page = &theme.page;
        let pages = canvas.page_count();
        let style = theme.text_style(
            FontWeight::Regular,
            theme.typography.footer_size,
            theme.palette.text,
        );

        for index in 0..pages {
            canvas.line(
                index,
                geometry.content_left(),
                page.footer_rule_y,
                geometry.content_right(),
                page.footer_rule_y,
                theme.spacing.rule_width,
                theme.palette.rule,
            );
            canvas.text(
                index,
                &theme.labels.thank_you,
                geometry.content_left(),
                page.footer_text_y,
                Align::Left,
                style,
            );
            canvas.text(
                index,
                &theme.labels.page_number(index + 1, pages),
                geometry.content_right(),
                page.footer_page_y,
                Align::Right,
                style,
            );
        }

        pages
    }
}
