//! Layout cursor with page-break bookkeeping

use log::debug;

use crate::theme::Theme;

/// Slack for floating point comparisons against the bottom bound (mm)
const EPSILON: f64 = 1e-6;

/// Fixed page bounds for one render, in millimetres from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    /// Lowest y body content may reach
    pub content_bottom: f64,
}

impl PageGeometry {
    pub fn from_theme(theme: &Theme) -> Self {
        let page = &theme.page;
        Self {
            width: page.width,
            height: page.height,
            margin_left: page.margin_left,
            margin_right: page.margin_right,
            margin_top: page.margin_top,
            content_bottom: theme.content_bottom(),
        }
    }

    pub fn content_left(&self) -> f64 {
        self.margin_left
    }

    pub fn content_right(&self) -> f64 {
        self.width - self.margin_right
    }

    pub fn content_width(&self) -> f64 {
        self.content_right() - self.content_left()
    }

    pub fn center_x(&self) -> f64 {
        self.width / 2.0
    }

    /// Height available to body content on a fresh page
    pub fn printable_height(&self) -> f64 {
        self.content_bottom - self.margin_top
    }
}

/// Position within the current page plus the page counter
///
/// Pages are only ever appended, so the page count is always the index of
/// the current page plus one.
#[derive(Debug, Clone)]
pub struct LayoutCursor {
    geometry: PageGeometry,
    x: f64,
    y: f64,
    page: usize,
}

impl LayoutCursor {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            x: geometry.margin_left,
            y: geometry.margin_top,
            page: 0,
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Current page, 0-based
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.page + 1
    }

    /// Space left above the bottom bound on this page
    pub fn remaining(&self) -> f64 {
        self.geometry.content_bottom - self.y
    }

    pub fn at_page_top(&self) -> bool {
        (self.y - self.geometry.margin_top).abs() < EPSILON
    }

    /// Whether a block of this height fits below the cursor
    pub fn fits(&self, height: f64) -> bool {
        self.y + height <= self.geometry.content_bottom + EPSILON
    }

    /// Move down; crossing the bottom bound starts a new page
    ///
    /// Returns `true` when a page break happened.
    pub fn advance(&mut self, delta: f64) -> bool {
        self.y += delta;
        if self.y > self.geometry.content_bottom + EPSILON {
            self.break_page();
            true
        } else {
            false
        }
    }

    /// Move down by a gap between blocks, stopping at the bottom bound
    ///
    /// A gap never opens a page on its own; the next block's
    /// [`ensure_space`](Self::ensure_space) breaks if it has to.
    pub fn skip(&mut self, gap: f64) {
        self.y = (self.y + gap).min(self.geometry.content_bottom);
    }

    /// Break before a block that would not fit
    ///
    /// A block taller than a whole page is placed at the top of the current
    /// page when the cursor is already there, so this never loops.
    /// Returns `true` when a page break happened.
    pub fn ensure_space(&mut self, height: f64) -> bool {
        if self.fits(height) || self.at_page_top() {
            false
        } else {
            self.break_page();
            true
        }
    }

    /// Open a new page and move to its top margin
    pub fn break_page(&mut self) {
        self.page += 1;
        self.x = self.geometry.margin_left;
        self.y = self.geometry.margin_top;
        debug!("Page break, now on page {}", self.page_count());
    }

    /// Jump to an absolute y on the current page
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }
}
