//! Line and rectangle operators

use crate::document::Color;
use crate::text::format_number;

/// How a rectangle is painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RectStyle {
    /// Fill with the given color
    Fill(Color),
    /// Outline with the current stroke color and line width
    Stroke,
    /// Fill, then outline
    FillStroke(Color),
}

/// Stroke settings shared by lines and outlined rectangles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::black(),
            width: 1.0,
        }
    }
}

fn color_operands(color: &Color) -> String {
    format!(
        "{} {} {}",
        format_number(color.r as f64),
        format_number(color.g as f64),
        format_number(color.b as f64)
    )
}

/// Generate operators for a straight line (PDF coordinates)
pub fn generate_line_operators(x1: f64, y1: f64, x2: f64, y2: f64, stroke: &StrokeStyle) -> Vec<u8> {
    format!(
        "q\n{} w\n{} RG\n{} {} m\n{} {} l\nS\nQ\n",
        format_number(stroke.width),
        color_operands(&stroke.color),
        format_number(x1),
        format_number(y1),
        format_number(x2),
        format_number(y2),
    )
    .into_bytes()
}

/// Generate operators for a rectangle (PDF coordinates, lower-left corner)
pub fn generate_rect_operators(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    style: RectStyle,
    stroke: &StrokeStyle,
) -> Vec<u8> {
    let mut ops = String::from("q\n");

    let paint = match style {
        RectStyle::Fill(fill) => {
            ops.push_str(&format!("{} rg\n", color_operands(&fill)));
            "f"
        }
        RectStyle::Stroke => {
            ops.push_str(&format!(
                "{} w\n{} RG\n",
                format_number(stroke.width),
                color_operands(&stroke.color)
            ));
            "S"
        }
        RectStyle::FillStroke(fill) => {
            ops.push_str(&format!(
                "{} rg\n{} w\n{} RG\n",
                color_operands(&fill),
                format_number(stroke.width),
                color_operands(&stroke.color)
            ));
            "B"
        }
    };

    ops.push_str(&format!(
        "{} {} {} {} re\n{paint}\nQ\n",
        format_number(x),
        format_number(y),
        format_number(width),
        format_number(height)
    ));

    ops.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_line_operators() {
        let stroke = StrokeStyle {
            color: Color::black(),
            width: 0.5,
        };
        let ops = generate_line_operators(10.0, 20.0, 110.0, 20.0, &stroke);
        assert_eq!(
            String::from_utf8(ops).unwrap(),
            "q\n0.5 w\n0 0 0 RG\n10 20 m\n110 20 l\nS\nQ\n"
        );
    }

    #[test]
    fn test_rect_fill() {
        let ops = generate_rect_operators(
            0.0,
            0.0,
            50.0,
            10.0,
            RectStyle::Fill(Color::white()),
            &StrokeStyle::default(),
        );
        assert_eq!(
            String::from_utf8(ops).unwrap(),
            "q\n1 1 1 rg\n0 0 50 10 re\nf\nQ\n"
        );
    }

    #[test]
    fn test_rect_fill_stroke() {
        let ops = generate_rect_operators(
            1.0,
            2.0,
            3.0,
            4.0,
            RectStyle::FillStroke(Color::red()),
            &StrokeStyle::default(),
        );
        let ops = String::from_utf8(ops).unwrap();
        assert!(ops.contains("1 0 0 rg\n1 w\n0 0 0 RG\n"));
        assert!(ops.contains("1 2 3 4 re\nB\n"));
    }
}
