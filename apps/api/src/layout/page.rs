//! Page geometry for a worksheet page.
//!
//! All measurements are PDF points (1/72"). The default is US letter with
//! 50pt margins and three equation columns.

use serde::{Deserialize, Serialize};

/// Layout parameters for a single worksheet page.
///
/// `column_count` only drives the column width. A batch that needs more
/// columns than this keeps stepping right by one column width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub margin_pt: f32,
    pub column_count: u8,
    /// Baseline of the first line in every column.
    pub start_y_pt: f32,
    pub leading_pt: f32,
    pub base_font_size_pt: f32,
    /// Operators and `=` are one point larger than numbers.
    pub operator_font_size_pt: f32,
}

impl Default for PageConfig {
    fn default() -> Self {
        default_page_config()
    }
}

/// US letter (612 × 792pt), 12pt numbers, 13pt operators, 14.5pt leading.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        page_width_pt: 612.0,
        page_height_pt: 792.0,
        margin_pt: 50.0,
        column_count: 3,
        start_y_pt: 725.0,
        leading_pt: 14.5,
        base_font_size_pt: 12.0,
        operator_font_size_pt: 13.0,
    }
}

impl PageConfig {
    /// `(page_width - (column_count + 1) * margin) / column_count`.
    ///
    /// With three columns this is `(page_width - 4 * margin) / 3`.
    pub fn column_width(&self) -> f32 {
        let columns = f32::from(self.column_count.max(1));
        (self.page_width_pt - (columns + 1.0) * self.margin_pt) / columns
    }

    /// Left edge of column `index`; the first column sits on the margin.
    pub fn column_x(&self, index: usize) -> f32 {
        self.margin_pt + index as f32 * self.column_width()
    }
}
