//! Standard Type1 fonts, metrics and WinAnsi encoding

use lopdf::{dictionary, Dictionary};

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Font family available without embedding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum FontFamily {
    #[default]
    Helvetica,
    Courier,
}

/// One of the standard 14 fonts every PDF viewer ships
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    Courier,
    CourierBold,
}

/// Helvetica advance widths for codes 32..=126 (1/1000 em)
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for codes 32..=126 (1/1000 em)
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Courier is monospaced
const COURIER_WIDTH: u16 = 600;

impl StandardFont {
    /// Pick the font for a family and weight
    pub fn new(family: FontFamily, weight: FontWeight) -> Self {
        match (family, weight) {
            (FontFamily::Helvetica, FontWeight::Regular) => StandardFont::Helvetica,
            (FontFamily::Helvetica, FontWeight::Bold) => StandardFont::HelveticaBold,
            (FontFamily::Courier, FontWeight::Regular) => StandardFont::Courier,
            (FontFamily::Courier, FontWeight::Bold) => StandardFont::CourierBold,
        }
    }

    /// PostScript name used as `/BaseFont`
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, StandardFont::HelveticaBold | StandardFont::CourierBold)
    }

    /// Advance width of one WinAnsi code (1/1000 em)
    pub fn glyph_width(&self, code: u8) -> u16 {
        let table = match self {
            StandardFont::Courier | StandardFont::CourierBold => return COURIER_WIDTH,
            StandardFont::Helvetica => &HELVETICA_WIDTHS,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };

        match code {
            32..=126 => table[(code - 32) as usize],
            _ => high_code_width(code, self.is_bold()),
        }
    }

    /// Width of text in 1/1000 em, measured on the glyphs actually shown
    pub fn text_width(&self, text: &str) -> u32 {
        encode_win_ansi(text)
            .into_iter()
            .map(|code| u32::from(self.glyph_width(code)))
            .sum()
    }

    /// Width of text in points at the given size
    pub fn text_width_points(&self, text: &str, font_size: f32) -> f64 {
        self.text_width(text) as f64 * font_size as f64 / 1000.0
    }

    /// Font dictionary for the page resources
    pub fn to_pdf_object(&self) -> Dictionary {
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => self.base_font(),
            "Encoding" => "WinAnsiEncoding",
        }
    }
}

/// Widths for the WinAnsi upper half (Helvetica metrics)
fn high_code_width(code: u8, bold: bool) -> u16 {
    match code {
        0x85 | 0x89 | 0x97 | 0x99 => 1000,
        0x91 | 0x92 => {
            if bold {
                278
            } else {
                222
            }
        }
        0x93 | 0x94 => {
            if bold {
                500
            } else {
                333
            }
        }
        0x95 => 350,
        0xA0 => 278,
        0xA9 | 0xAE => 737,
        0xB0 => 400,
        _ => 556,
    }
}

/// Map a character to its WinAnsiEncoding code
pub fn win_ansi_code(c: char) -> Option<u8> {
    let code = match c {
        ' '..='~' | '\u{A0}'..='\u{FF}' => return Some(c as u32 as u8),
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(code)
}

/// Replacement for characters the standard fonts cannot show
fn substitute(c: char) -> &'static str {
    match c {
        '₹' => "Rs.",
        '\t' | '\n' | '\r' => " ",
        _ => "?",
    }
}

/// Encode text as WinAnsi bytes, substituting unsupported characters
///
/// `₹` becomes `Rs.`, control whitespace becomes a space and anything
/// else outside the encoding becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    for c in text.chars() {
        match win_ansi_code(c) {
            Some(code) => bytes.push(code),
            None => bytes.extend_from_slice(substitute(c).as_bytes()),
        }
    }
    bytes
}
