//! Paint a laid-out canvas into a PDF document

use pdf_core::{mm_to_pt, PdfDocument, RectStyle};

use crate::canvas::{Canvas, DrawOp};
use crate::theme::Theme;
use crate::Result;

/// Replay every draw instruction onto fresh pages, converting mm to points
pub fn paint(canvas: &Canvas, theme: &Theme, title: &str) -> Result<PdfDocument> {
    let mut pdf = PdfDocument::new();
    pdf.set_title(title);

    for ops in canvas.pages() {
        let page = pdf.add_page(mm_to_pt(theme.page.width), mm_to_pt(theme.page.height))?;
        for op in ops {
            paint_op(&mut pdf, page, op)?;
        }
    }

    Ok(pdf)
}

fn paint_op(pdf: &mut PdfDocument, page: usize, op: &DrawOp) -> Result<()> {
    match op {
        DrawOp::Text {
            text,
            x,
            y,
            align,
            style,
        } => {
            pdf.set_font(style.font(), style.size);
            pdf.set_text_color(style.color.to_color());
            pdf.insert_text(text, page, mm_to_pt(*x), mm_to_pt(*y), *align)?;
        }
        DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            width,
            color,
        } => {
            pdf.set_stroke_color(color.to_color());
            pdf.set_line_width(mm_to_pt(*width));
            pdf.draw_line(page, mm_to_pt(*x1), mm_to_pt(*y1), mm_to_pt(*x2), mm_to_pt(*y2))?;
        }
        DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        } => {
            let style = match (fill, stroke) {
                (Some(fill), None) => RectStyle::Fill(fill.to_color()),
                (None, Some(_)) => RectStyle::Stroke,
                (Some(fill), Some(_)) => RectStyle::FillStroke(fill.to_color()),
                (None, None) => return Ok(()),
            };
            if let Some((color, line_width)) = stroke {
                pdf.set_stroke_color(color.to_color());
                pdf.set_line_width(mm_to_pt(*line_width));
            }
            pdf.draw_rect(
                page,
                mm_to_pt(*x),
                mm_to_pt(*y),
                mm_to_pt(*width),
                mm_to_pt(*height),
                style,
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::TextStyle;
    use crate::theme::Rgb;
    use pdf_core::{Align, FontFamily, FontWeight};

    #[test]
    fn test_one_pdf_page_per_canvas_page() {
        let mut canvas = Canvas::new();
        canvas.ensure_pages(3);
        let pdf = paint(&canvas, &Theme::classic(), "Invoice-1.pdf").unwrap();
        assert_eq!(pdf.page_count(), 3);
    }

    #[test]
    fn test_paints_every_op_kind() {
        let style = TextStyle {
            family: FontFamily::Helvetica,
            weight: FontWeight::Bold,
            size: 26.0,
            color: Rgb::BLACK,
        };
        let mut canvas = Canvas::new();
        canvas.text(0, "INVOICE", 105.0, 20.0, Align::Center, style);
        canvas.line(0, 20.0, 40.0, 190.0, 40.0, 0.5, Rgb::BLACK);
        canvas.rect(0, 20.0, 50.0, 80.0, 11.0, Some(Rgb(240, 240, 240)), Some((Rgb::BLACK, 0.2)));

        let pdf = paint(&canvas, &Theme::classic(), "Invoice-1.pdf").unwrap();
        let bytes = pdf.into_bytes().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
    }
}
