//! PDF Document builder

use crate::font::{encode_win_ansi, StandardFont};
use crate::graphics::{generate_line_operators, generate_rect_operators, RectStyle, StrokeStyle};
use crate::text::{generate_text_operators, hex_string, TextRenderContext};
use crate::{Align, PdfError, Result};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use log::debug;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

/// A4 width in points
pub const A4_WIDTH: f64 = 595.28;
/// A4 height in points
pub const A4_HEIGHT: f64 = 841.89;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    /// Red color
    pub fn red() -> Self {
        Self::rgb(1.0, 0.0, 0.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// A page created by this document
#[derive(Debug, Clone, Copy)]
struct PageRef {
    page_id: ObjectId,
    contents_id: ObjectId,
    height: f64,
}

/// PDF Document builder
///
/// Pages are created blank, drawing operators are buffered per page and
/// written once in [`PdfDocument::into_bytes`]. Every map is ordered, so
/// the same sequence of calls always yields the same bytes.
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Root Pages node
    pages_id: ObjectId,
    /// Pages in order (index 0 is page 1)
    pages: Vec<PageRef>,
    /// Current font
    current_font: StandardFont,
    /// Current font size
    current_font_size: f32,
    /// Current text color
    current_text_color: Color,
    /// Current stroke settings
    current_stroke: StrokeStyle,
    /// Font resource names (font -> "F1", "F2", ...)
    font_resources: BTreeMap<StandardFont, String>,
    /// Fonts used per page (page number -> fonts)
    page_fonts: BTreeMap<usize, Vec<StandardFont>>,
    /// Buffered content operators per page (page number -> operators)
    page_content_buffer: BTreeMap<usize, Vec<u8>>,
    /// Document title for the Info dictionary
    title: Option<String>,
    /// Compress content streams with FlateDecode
    compress: bool,
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfDocument {
    /// Create an empty document with no pages
    pub fn new() -> Self {
        let mut inner = Document::with_version("1.4");

        let pages_id = inner.new_object_id();
        inner.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0,
            }),
        );

        let catalog_id = inner.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        inner.trailer.set("Root", catalog_id);

        Self {
            inner,
            pages_id,
            pages: Vec::new(),
            current_font: StandardFont::Helvetica,
            current_font_size: 12.0,
            current_text_color: Color::default(),
            current_stroke: StrokeStyle::default(),
            font_resources: BTreeMap::new(),
            page_fonts: BTreeMap::new(),
            page_content_buffer: BTreeMap::new(),
            title: None,
            compress: true,
        }
    }

    /// Enable or disable FlateDecode on content streams (on by default)
    pub fn set_compression(&mut self, compress: bool) {
        self.compress = compress;
    }

    /// Set the title written to the Info dictionary
    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Add a blank page of the given size in points
    ///
    /// # Returns
    /// New page number (1-indexed)
    pub fn add_page(&mut self, width: f64, height: f64) -> Result<usize> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(PdfError::InvalidPageSize(width, height));
        }

        let contents_id = self
            .inner
            .add_object(Object::Stream(Stream::new(Dictionary::new(), vec![])));

        let page_id = self.inner.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::from(width),
                Object::from(height),
            ],
            "Resources" => Dictionary::new(),
            "Contents" => contents_id,
        });

        let pages_dict = self
            .inner
            .get_object_mut(self.pages_id)?
            .as_dict_mut()
            .map_err(|_| PdfError::ParseError("Pages object is not a dictionary".to_string()))?;

        let mut kids = pages_dict
            .get(b"Kids")
            .and_then(Object::as_array)
            .map_err(|_| PdfError::ParseError("Pages object missing Kids array".to_string()))?
            .clone();
        kids.push(Object::Reference(page_id));
        let count = kids.len() as i64;

        pages_dict.set("Kids", Object::Array(kids));
        pages_dict.set("Count", Object::Integer(count));

        self.pages.push(PageRef {
            page_id,
            contents_id,
            height,
        });

        Ok(self.pages.len())
    }

    /// Add a blank A4 portrait page
    pub fn add_a4_page(&mut self) -> Result<usize> {
        self.add_page(A4_WIDTH, A4_HEIGHT)
    }

    /// Set the current font and size
    pub fn set_font(&mut self, font: StandardFont, size: f32) {
        self.current_font = font;
        self.current_font_size = size;
    }

    /// Set only the font size
    pub fn set_font_size(&mut self, size: f32) {
        self.current_font_size = size;
    }

    /// Set the text color
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Set the color used by lines and outlines
    pub fn set_stroke_color(&mut self, color: Color) {
        self.current_stroke.color = color;
    }

    /// Set the line width in points
    pub fn set_line_width(&mut self, width: f64) {
        self.current_stroke.width = width;
    }

    /// Width of text in points with the current font and size
    pub fn get_text_width(&self, text: &str) -> f64 {
        self.current_font
            .text_width_points(text, self.current_font_size)
    }

    /// Insert text at a specific position
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Baseline Y coordinate in points (from top)
    /// * `align` - Text alignment relative to `x`
    pub fn insert_text(&mut self, text: &str, page: usize, x: f64, y: f64, align: Align) -> Result<()> {
        let page_ref = self.page_ref(page)?;

        // Skip empty text - nothing to render
        if text.is_empty() {
            return Ok(());
        }

        let font = self.current_font;
        let font_resource_name = self.get_or_create_font_ref(font, page);

        let ctx = TextRenderContext {
            font_name: font_resource_name,
            font_size: self.current_font_size,
            text_width: self.get_text_width(text),
            color: self.current_text_color,
        };

        let text_hex = hex_string(&encode_win_ansi(text));
        let operators = generate_text_operators(&text_hex, x, page_ref.height - y, align, &ctx);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Draw a straight line between two points (from top)
    pub fn draw_line(&mut self, page: usize, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<()> {
        let height = self.page_ref(page)?.height;
        let operators =
            generate_line_operators(x1, height - y1, x2, height - y2, &self.current_stroke);
        self.buffer_content(page, &operators);
        Ok(())
    }

    /// Draw a rectangle whose top-left corner is at `(x, y)` (from top)
    pub fn draw_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        style: RectStyle,
    ) -> Result<()> {
        let page_height = self.page_ref(page)?.height;
        let operators = generate_rect_operators(
            x,
            page_height - y - height,
            width,
            height,
            style,
            &self.current_stroke,
        );
        self.buffer_content(page, &operators);
        Ok(())
    }

    /// Save the document to a file
    pub fn save<P: AsRef<Path>>(self, path: P) -> Result<()> {
        let bytes = self.into_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Finish the document and serialize it
    pub fn into_bytes(mut self) -> Result<Vec<u8>> {
        // 1. Write buffered operators into each page's content stream
        self.flush_content_buffers()?;

        // 2. Add font objects and page resources
        self.embed_fonts()?;

        // 3. Document info
        if let Some(title) = self.title.take() {
            let info_id = self.inner.add_object(dictionary! {
                "Title" => Object::string_literal(title),
                "Producer" => Object::string_literal("pdf-core"),
            });
            self.inner.trailer.set("Info", info_id);
        }

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        debug!(
            "serialized PDF: {} pages, {} bytes",
            self.pages.len(),
            buffer.len()
        );

        Ok(buffer)
    }

    /// Get a reference to the underlying lopdf document
    pub fn inner(&self) -> &Document {
        &self.inner
    }

    fn page_ref(&self, page: usize) -> Result<PageRef> {
        if page == 0 || page > self.pages.len() {
            return Err(PdfError::InvalidPage(page, self.pages.len()));
        }
        Ok(self.pages[page - 1])
    }

    /// Get or create the resource name for a font and note its use on a page
    fn get_or_create_font_ref(&mut self, font: StandardFont, page: usize) -> String {
        let next = self.font_resources.len() + 1;
        let resource_name = self
            .font_resources
            .entry(font)
            .or_insert_with(|| format!("F{next}"))
            .clone();

        let fonts = self.page_fonts.entry(page).or_default();
        if !fonts.contains(&font) {
            fonts.push(font);
        }

        resource_name
    }

    /// Buffer content operators for a page (written at save time)
    fn buffer_content(&mut self, page: usize, content: &[u8]) {
        self.page_content_buffer
            .entry(page)
            .or_default()
            .extend_from_slice(content);
    }

    /// Replace each page's empty content stream with its buffered operators
    fn flush_content_buffers(&mut self) -> Result<()> {
        let buffers = std::mem::take(&mut self.page_content_buffer);

        for (page, content) in buffers {
            if content.is_empty() {
                continue;
            }
            let page_ref = self.page_ref(page)?;
            let stream = if self.compress {
                let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(&content)?;
                let compressed = encoder.finish()?;
                Stream::new(dictionary! { "Filter" => "FlateDecode" }, compressed)
            } else {
                Stream::new(Dictionary::new(), content)
            };
            self.inner
                .objects
                .insert(page_ref.contents_id, Object::Stream(stream));
        }

        Ok(())
    }

    /// Add font dictionaries and reference them from page resources
    fn embed_fonts(&mut self) -> Result<()> {
        let mut embedded: BTreeMap<StandardFont, ObjectId> = BTreeMap::new();
        for font in self.font_resources.keys() {
            let id = self.inner.add_object(font.to_pdf_object());
            embedded.insert(*font, id);
        }

        let page_fonts = std::mem::take(&mut self.page_fonts);
        for (page, fonts) in page_fonts {
            let page_ref = self.page_ref(page)?;

            let mut font_dict = Dictionary::new();
            for font in fonts {
                let (Some(name), Some(id)) = (self.font_resources.get(&font), embedded.get(&font))
                else {
                    return Err(PdfError::FontNotFound(font.base_font().to_string()));
                };
                font_dict.set(name.as_bytes(), Object::Reference(*id));
            }

            let page_dict = self
                .inner
                .get_object_mut(page_ref.page_id)?
                .as_dict_mut()
                .map_err(|_| PdfError::SaveError("Page object is not a dictionary".to_string()))?;
            page_dict.set(
                "Resources",
                dictionary! { "Font" => Object::Dictionary(font_dict) },
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_document_has_no_pages() {
        let doc = PdfDocument::new();
        assert_eq!(doc.page_count(), 0);
    }

    #[test]
    fn test_add_pages() {
        let mut doc = PdfDocument::new();
        assert_eq!(doc.add_a4_page().unwrap(), 1);
        assert_eq!(doc.add_a4_page().unwrap(), 2);
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.inner().get_pages().len(), 2);
    }

    #[test]
    fn test_invalid_page_size() {
        let mut doc = PdfDocument::new();
        assert!(matches!(
            doc.add_page(0.0, 100.0),
            Err(PdfError::InvalidPageSize(_, _))
        ));
    }

    #[test]
    fn test_insert_text_invalid_page() {
        let mut doc = PdfDocument::new();
        let result = doc.insert_text("Hello", 1, 10.0, 10.0, Align::Left);
        assert!(matches!(result, Err(PdfError::InvalidPage(1, 0))));
    }

    #[test]
    fn test_font_resource_names_are_stable() {
        let mut doc = PdfDocument::new();
        assert_eq!(doc.get_or_create_font_ref(StandardFont::HelveticaBold, 1), "F1");
        assert_eq!(doc.get_or_create_font_ref(StandardFont::Helvetica, 1), "F2");
        assert_eq!(doc.get_or_create_font_ref(StandardFont::HelveticaBold, 2), "F1");
    }

    #[test]
    fn test_text_width_uses_current_font() {
        let mut doc = PdfDocument::new();
        doc.set_font(StandardFont::Courier, 10.0);
        assert_eq!(doc.get_text_width("abcd"), 24.0);
    }
}
