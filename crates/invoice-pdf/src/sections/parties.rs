//! Sender and recipient columns

use invoice_text::wrap_text;
use log::debug;
use pdf_core::{Align, FontWeight};

use super::{labeled, RenderState, SectionRenderer};
use crate::model::{InvoiceDocument, Party};
use crate::theme::Theme;

/// `PAY TO:` on the left, `BILLED TO:` on the right
///
/// Kept on one page unless the taller column exceeds a whole page, in which
/// case both columns continue line by line.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartiesSection;

/// A laid-out line of one column: text, style and the advance below it
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLine {
    pub text: String,
    pub bold: bool,
    pub advance: f64,
}

impl PartiesSection {
    /// Lines of one party column, wrapped to `width`
    pub fn column(label: &str, party: &Party, width: f64, theme: &Theme) -> Vec<ColumnLine> {
        let spacing = &theme.spacing;
        let metrics = theme.metrics(FontWeight::Regular, theme.typography.body_size);

        let mut lines = vec![
            ColumnLine {
                text: label.to_string(),
                bold: true,
                advance: spacing.party_label,
            },
            ColumnLine {
                text: party.name().trim().to_string(),
                bold: false,
                advance: spacing.party_name,
            },
        ];

        lines.extend(
            wrap_text(party.address(), width, &metrics)
                .into_iter()
                .map(|text| ColumnLine {
                    text,
                    bold: false,
                    advance: spacing.party_line,
                }),
        );

        if let Some(email) = party.email() {
            let text = labeled(&theme.labels.email, email);
            lines.extend(wrap_text(&text, width, &metrics).into_iter().map(|text| ColumnLine {
                text,
                bold: false,
                advance: spacing.party_line,
            }));
        }

        lines
    }
}

/// Pairs up both columns line by line with the taller advance of each pair
fn paired_rows<'a>(left: &'a [ColumnLine], right: &'a [ColumnLine]) -> Vec<[Option<&'a ColumnLine>; 2]> {
    (0..left.len().max(right.len()))
        .map(|i| [left.get(i), right.get(i)])
        .collect()
}

fn row_advance(row: &[Option<&ColumnLine>; 2]) -> f64 {
    row.iter().flatten().map(|line| line.advance).fold(0.0, f64::max)
}

fn column_height(lines: &[ColumnLine]) -> f64 {
    lines.iter().map(|line| line.advance).sum()
}

impl SectionRenderer for PartiesSection {
    fn name(&self) -> &'static str {
        "parties"
    }

    fn render(&self, doc: &InvoiceDocument, state: &mut RenderState, theme: &Theme) -> f64 {
        let geometry = state.geometry();
        let column_width = geometry.content_width() / 2.0;
        let wrap_width = (column_width - theme.spacing.party_gutter).max(0.0);

        let left = Self::column(&theme.labels.pay_to, &doc.from, wrap_width, theme);
        let right = Self::column(&theme.labels.billed_to, &doc.to, wrap_width, theme);
        let height = column_height(&left).max(column_height(&right));
        let rows = paired_rows(&left, &right);

        if height <= geometry.printable_height() {
            state.cursor.ensure_space(height);
        } else {
            debug!("Parties block is taller than a page, continuing it line by line");
            let heading: f64 = rows.iter().take(2).map(row_advance).sum();
            state.cursor.ensure_space(heading);
        }

        let style = theme.body_style(FontWeight::Regular);
        let lefts = [geometry.content_left(), geometry.content_left() + column_width];
        for row in &rows {
            let advance = row_advance(row);
            if !state.cursor.fits(advance) && !state.cursor.at_page_top() {
                state.cursor.break_page();
            }
            let y = state.cursor.y();
            for (line, x) in row.iter().zip(lefts) {
                if let Some(line) = line {
                    let style = if line.bold { style.bold() } else { style };
                    state.text(&line.text, x, y, Align::Left, style);
                }
            }
            state.cursor.advance(advance);
        }

        state.cursor.skip(theme.spacing.after_parties);
        state.cursor.y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawOp;
    use crate::cursor::PageGeometry;
    use pretty_assertions::assert_eq;

    fn party(address: &str, email: Option<&str>) -> Party {
        Party {
            name: Some("Company Inc".into()),
            email: email.map(Into::into),
            address: Some(address.into()),
        }
    }

    #[test]
    fn test_column_lines() {
        let theme = Theme::classic();
        let lines = PartiesSection::column("PAY TO:", &party("456 Business Ave", Some("a@b.co")), 80.0, &theme);
        let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["PAY TO:", "Company Inc", "456 Business Ave", "Email: a@b.co"]);
        assert!(lines[0].bold);
        assert_eq!(column_height(&lines), 20.0);
    }

    #[test]
    fn test_missing_fields_render_empty() {
        let theme = Theme::classic();
        let lines = PartiesSection::column("BILLED TO:", &Party::default(), 80.0, &theme);
        let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["BILLED TO:", ""]);
    }

    #[test]
    fn test_cursor_ends_below_taller_column() {
        let theme = Theme::classic();
        let doc = InvoiceDocument {
            from: party("Short", None),
            to: party("Line one\nLine two\nLine three", Some("x@y.z")),
            ..Default::default()
        };
        let mut state = RenderState::new(PageGeometry::from_theme(&theme));
        state.cursor.set_y(50.0);

        let y = PartiesSection.render(&doc, &mut state, &theme);
        // label 5 + name 5 + three address lines 15 + email 5, then the gap
        assert_eq!(y, 50.0 + 30.0 + 6.0);
        assert!(!state.canvas.texts(0).contains(&"undefined"));
    }

    #[test]
    fn test_block_moves_to_next_page_whole() {
        let theme = Theme::classic();
        let doc = InvoiceDocument {
            from: party("A\nB\nC\nD", Some("x@y.z")),
            ..Default::default()
        };
        let mut state = RenderState::new(PageGeometry::from_theme(&theme));
        state.cursor.set_y(260.0);

        PartiesSection.render(&doc, &mut state, &theme);
        assert!(state.canvas.texts(0).is_empty());
        assert_eq!(state.canvas.texts(1)[0], "PAY TO:");
    }

    #[test]
    fn test_oversized_block_continues_on_next_page() {
        let theme = Theme::classic();
        let address: Vec<String> = (1..=70).map(|i| format!("Line {i}")).collect();
        let doc = InvoiceDocument {
            from: party(&address.join("\n"), None),
            ..Default::default()
        };
        let mut state = RenderState::new(PageGeometry::from_theme(&theme));

        PartiesSection.render(&doc, &mut state, &theme);
        assert_eq!(state.canvas.page_count(), 2);
        assert_eq!(state.canvas.texts(0)[0], "PAY TO:");
        assert!(state.canvas.texts(0).contains(&"BILLED TO:"));
        assert!(state.canvas.texts(0).contains(&"Line 49"));
        assert_eq!(state.canvas.texts(1).first(), Some(&"Line 50"));
        assert!(state.canvas.texts(1).contains(&"Line 70"));

        let bottom = theme.content_bottom();
        for ops in state.canvas.pages() {
            for op in ops {
                if let DrawOp::Text { text, y, .. } = op {
                    assert!(*y <= bottom, "{text:?} at {y} is below the body area");
                }
            }
        }
    }
}
