//! Theme: everything the section pipeline needs besides the invoice itself
//!
//! All lengths are millimetres, font sizes are points and colors are
//! 0-255 RGB triples. Every field has a default, so a theme JSON only
//! needs to name what it overrides.

use pdf_core::{Align, Color, FontFamily, FontWeight};
use serde::{Deserialize, Serialize};

use crate::canvas::{FontMetrics, TextStyle};
use crate::{InvoiceError, Result};

/// RGB color, 0-255 per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    pub fn to_color(self) -> Color {
        Color::from_rgb(self.0, self.1, self.2)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::BLACK
    }
}

/// Horizontal alignment of a table column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl From<ColumnAlign> for Align {
    fn from(align: ColumnAlign) -> Self {
        match align {
            ColumnAlign::Left => Align::Left,
            ColumnAlign::Center => Align::Center,
            ColumnAlign::Right => Align::Right,
        }
    }
}

/// Font family choice; only the standard PDF fonts are available
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontChoice {
    #[default]
    Helvetica,
    Courier,
}

impl From<FontChoice> for FontFamily {
    fn from(choice: FontChoice) -> Self {
        match choice {
            FontChoice::Helvetica => FontFamily::Helvetica,
            FontChoice::Courier => FontFamily::Courier,
        }
    }
}

/// Page size, margins and fixed footer positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSetup {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    /// Y of the footer rule
    pub footer_rule_y: f64,
    /// Baseline of the thank-you text
    pub footer_text_y: f64,
    /// Baseline of `Page i of N`
    pub footer_page_y: f64,
    /// Clearance kept between body content and the footer rule
    pub footer_gap: f64,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            margin_left: 20.0,
            margin_right: 20.0,
            margin_top: 20.0,
            footer_rule_y: 280.0,
            footer_text_y: 286.0,
            footer_page_y: 290.0,
            footer_gap: 5.0,
        }
    }
}

/// Font family, sizes (pt) and line heights (mm)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Typography {
    pub font: FontChoice,
    pub title_size: f32,
    pub body_size: f32,
    pub table_size: f32,
    pub footer_size: f32,
    pub table_line_height: f64,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            font: FontChoice::Helvetica,
            title_size: 26.0,
            body_size: 12.0,
            table_size: 10.0,
            footer_size: 9.0,
            table_line_height: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Palette {
    pub text: Rgb,
    pub title: Rgb,
    pub rule: Rgb,
    pub table_header_fill: Rgb,
    pub table_header_text: Rgb,
    pub table_border: Rgb,
    /// Background of the Total Due row; `None` leaves it unfilled
    pub total_fill: Option<Rgb>,
    pub total_text: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text: Rgb::BLACK,
            title: Rgb::BLACK,
            rule: Rgb::BLACK,
            table_header_fill: Rgb(240, 240, 240),
            table_header_text: Rgb::BLACK,
            table_border: Rgb(200, 200, 200),
            total_fill: Some(Rgb(240, 240, 240)),
            total_text: Rgb::BLACK,
        }
    }
}

/// Line-item table columns: Description, Quantity, Rate, Amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableLayout {
    pub column_widths: [f64; 4],
    pub column_aligns: [ColumnAlign; 4],
    pub cell_padding: f64,
    pub border_width: f64,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            column_widths: [80.0, 25.0, 30.0, 35.0],
            column_aligns: [
                ColumnAlign::Left,
                ColumnAlign::Center,
                ColumnAlign::Right,
                ColumnAlign::Right,
            ],
            cell_padding: 3.0,
            border_width: 0.2,
        }
    }
}

impl TableLayout {
    pub fn total_width(&self) -> f64 {
        self.column_widths.iter().sum()
    }
}

/// Vertical advances between and inside sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Spacing {
    pub after_title: f64,
    pub meta_row: f64,
    pub after_rule: f64,
    pub party_label: f64,
    pub party_name: f64,
    pub party_line: f64,
    pub party_gutter: f64,
    pub after_parties: f64,
    pub after_table: f64,
    pub totals_row: f64,
    pub after_totals: f64,
    pub note_label: f64,
    pub note_line: f64,
    pub rule_width: f64,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            after_title: 10.0,
            meta_row: 6.0,
            after_rule: 8.0,
            party_label: 5.0,
            party_name: 5.0,
            party_line: 5.0,
            party_gutter: 5.0,
            after_parties: 6.0,
            after_table: 8.0,
            totals_row: 8.0,
            after_totals: 10.0,
            note_label: 6.0,
            note_line: 5.0,
            rule_width: 0.5,
        }
    }
}

/// Every fixed string printed on the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Labels {
    pub title: String,
    pub invoice_number: String,
    pub issue_date: String,
    pub due_date: String,
    pub status: String,
    pub pay_to: String,
    pub billed_to: String,
    pub email: String,
    pub description: String,
    pub quantity: String,
    pub rate: String,
    pub amount: String,
    pub sub_total: String,
    pub tax: String,
    pub total_due: String,
    pub notes: String,
    pub thank_you: String,
    /// `{page}` and `{pages}` are replaced during the footer pass
    pub page_number: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            title: "INVOICE".into(),
            invoice_number: "Invoice Number:".into(),
            issue_date: "Issue Date:".into(),
            due_date: "Due Date:".into(),
            status: "Status:".into(),
            pay_to: "PAY TO:".into(),
            billed_to: "BILLED TO:".into(),
            email: "Email:".into(),
            description: "Description".into(),
            quantity: "Quantity".into(),
            rate: "Rate".into(),
            amount: "Amount".into(),
            sub_total: "Sub Total".into(),
            tax: "Tax".into(),
            total_due: "Total Due Amount".into(),
            notes: "Notes:".into(),
            thank_you: "Thank you for your business!".into(),
            page_number: "Page {page} of {pages}".into(),
        }
    }
}

impl Labels {
    pub fn page_number(&self, page: usize, pages: usize) -> String {
        self.page_number
            .replace("{page}", &page.to_string())
            .replace("{pages}", &pages.to_string())
    }
}

/// Style object for the invoice pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub page: PageSetup,
    pub typography: Typography,
    pub palette: Palette,
    pub table: TableLayout,
    pub spacing: Spacing,
    pub labels: Labels,
}

impl Theme {
    /// Black on white with a grey table header
    pub fn classic() -> Self {
        Self::default()
    }

    /// Blue accented variant with a highlighted total row
    pub fn accent() -> Self {
        let accent = Rgb(0x14, 0xA8, 0xDE);
        Self {
            palette: Palette {
                title: accent,
                rule: accent,
                table_header_fill: accent,
                table_header_text: Rgb::WHITE,
                table_border: accent,
                total_fill: Some(accent),
                total_text: Rgb::WHITE,
                ..Palette::default()
            },
            labels: Labels {
                description: "DESCRIPTION".into(),
                quantity: "QUANTITY".into(),
                rate: "RATE".into(),
                amount: "AMOUNT".into(),
                ..Labels::default()
            },
            ..Self::default()
        }
    }

    /// Load a theme from JSON, on top of the classic defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let theme: Theme = serde_json::from_str(json)?;
        theme.validate()?;
        Ok(theme)
    }

    /// Reject geometry the layout cannot place anything on
    pub fn validate(&self) -> Result<()> {
        let page = &self.page;
        let invalid = |msg: &str| Err(InvoiceError::InvalidTheme(msg.to_string()));

        if !(page.width > 0.0 && page.height > 0.0) {
            return invalid("page size must be positive");
        }
        if page.margin_left < 0.0 || page.margin_right < 0.0 || page.margin_top < 0.0 {
            return invalid("margins must not be negative");
        }
        if page.margin_left + page.margin_right >= page.width {
            return invalid("margins leave no content width");
        }
        if self.content_bottom() - page.margin_top < self.min_block_height() {
            return invalid("footer leaves no room for content");
        }
        if self.typography.table_line_height <= 0.0
            || self.spacing.note_line <= 0.0
            || self.spacing.party_line <= 0.0
            || self.spacing.totals_row <= 0.0
        {
            return invalid("line heights must be positive");
        }
        let sizes = [
            self.typography.title_size,
            self.typography.body_size,
            self.typography.table_size,
            self.typography.footer_size,
        ];
        if sizes.iter().any(|size| *size <= 0.0) {
            return invalid("font sizes must be positive");
        }
        if self.table.column_widths.iter().any(|w| *w <= 0.0) || self.table.cell_padding < 0.0 {
            return invalid("table columns must be positive");
        }
        Ok(())
    }

    /// Lowest y body content may reach
    pub fn content_bottom(&self) -> f64 {
        self.page.footer_rule_y - self.page.footer_gap
    }

    /// A table header plus one body line; any page must hold at least that
    fn min_block_height(&self) -> f64 {
        2.0 * (self.typography.table_line_height + 2.0 * self.table.cell_padding)
    }

    pub fn font_family(&self) -> FontFamily {
        self.typography.font.into()
    }

    pub fn text_style(&self, weight: FontWeight, size: f32, color: Rgb) -> TextStyle {
        TextStyle {
            family: self.font_family(),
            weight,
            size,
            color,
        }
    }

    pub fn body_style(&self, weight: FontWeight) -> TextStyle {
        self.text_style(weight, self.typography.body_size, self.palette.text)
    }

    pub fn metrics(&self, weight: FontWeight, size: f32) -> FontMetrics {
        FontMetrics::new(self.font_family(), weight, size)
    }
}
