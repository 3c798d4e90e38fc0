//! Positioned draw instructions, collected per page before painting

use invoice_text::TextMeasure;
use pdf_core::{Align, FontFamily, FontWeight, StandardFont};

use crate::theme::Rgb;

/// Points to millimetres
fn pt_to_mm(pt: f64) -> f64 {
    pt * 25.4 / 72.0
}

/// Font, size and color of one text run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub family: FontFamily,
    pub weight: FontWeight,
    pub size: f32,
    pub color: Rgb,
}

impl TextStyle {
    pub fn font(&self) -> StandardFont {
        StandardFont::new(self.family, self.weight)
    }

    pub fn bold(self) -> Self {
        Self {
            weight: FontWeight::Bold,
            ..self
        }
    }

    pub fn with_color(self, color: Rgb) -> Self {
        Self { color, ..self }
    }

    pub fn metrics(&self) -> FontMetrics {
        FontMetrics::new(self.family, self.weight, self.size)
    }
}

/// One drawing instruction; coordinates are mm from the top-left corner
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Text with its baseline at `y`; `x` is the anchor for `align`
    Text {
        text: String,
        x: f64,
        y: f64,
        align: Align,
        style: TextStyle,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
        color: Rgb,
    },
    /// Rectangle by its top-left corner
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<Rgb>,
        stroke: Option<(Rgb, f64)>,
    },
}

/// Draw instructions grouped by page
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pages: Vec<Vec<DrawOp>>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// A canvas with one empty page
    pub fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Vec<DrawOp>] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&[DrawOp]> {
        self.pages.get(index).map(Vec::as_slice)
    }

    /// Grow to at least `count` pages
    pub fn ensure_pages(&mut self, count: usize) {
        if self.pages.len() < count {
            self.pages.resize_with(count, Vec::new);
        }
    }

    /// Append an instruction, opening pages up to `page` as needed
    pub fn push(&mut self, page: usize, op: DrawOp) {
        self.ensure_pages(page + 1);
        self.pages[page].push(op);
    }

    /// Text, skipping runs with nothing to show
    pub fn text(&mut self, page: usize, text: &str, x: f64, y: f64, align: Align, style: TextStyle) {
        if text.is_empty() {
            return;
        }
        self.push(
            page,
            DrawOp::Text {
                text: text.to_string(),
                x,
                y,
                align,
                style,
            },
        );
    }

    #[allow(clippy::too_many_arguments)]
    pub fn line(&mut self, page: usize, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: Rgb) {
        self.push(
            page,
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            },
        );
    }

    #[allow(clippy::too_many_arguments)]
    pub fn rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<Rgb>,
        stroke: Option<(Rgb, f64)>,
    ) {
        if fill.is_none() && stroke.is_none() {
            return;
        }
        self.push(
            page,
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                fill,
                stroke,
            },
        );
    }

    /// All text runs on a page, in drawing order
    pub fn texts(&self, page: usize) -> Vec<&str> {
        self.page(page)
            .unwrap_or_default()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The first text op whose content equals `needle`, with its page
    pub fn find_text(&self, needle: &str) -> Option<(usize, &DrawOp)> {
        self.pages.iter().enumerate().find_map(|(page, ops)| {
            ops.iter()
                .find(|op| matches!(op, DrawOp::Text { text, .. } if text == needle))
                .map(|op| (page, op))
        })
    }
}

/// Width measurement in millimetres for one font and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    font: StandardFont,
    size: f32,
}

impl FontMetrics {
    pub fn new(family: FontFamily, weight: FontWeight, size: f32) -> Self {
        Self {
            font: StandardFont::new(family, weight),
            size,
        }
    }

    pub fn width_mm(&self, text: &str) -> f64 {
        pt_to_mm(self.font.text_width_points(text, self.size))
    }
}

impl TextMeasure for FontMetrics {
    fn text_width(&self, text: &str) -> f64 {
        self.width_mm(text)
    }
}
