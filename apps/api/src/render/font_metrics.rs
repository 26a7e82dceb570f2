//! Static glyph widths for the built-in Helvetica face.
//!
//! Widths are in thousandths of an em, taken from the standard Helvetica AFM.
//! Worksheets only print digits, operators and spaces, so the table covers
//! those. Anything else falls back to the digit width.

/// Width table for the glyphs a worksheet line can contain.
#[derive(Debug, Clone, Copy)]
pub struct FontMetricTable {
    /// Fallback for glyphs not in the table.
    pub average_char_width: u16,
}

pub const HELVETICA: FontMetricTable = FontMetricTable {
    average_char_width: 556,
};

impl FontMetricTable {
    fn glyph_width(&self, c: char) -> u16 {
        match c {
            '0'..='9' => 556,
            ' ' => 278,
            '+' | '=' | '×' | '÷' => 584,
            '-' => 333,
            _ => self.average_char_width,
        }
    }

    /// Rendered width of `s` in points at `font_size_pt`.
    pub fn measure_str(&self, s: &str, font_size_pt: f32) -> f32 {
        let units: u32 = s.chars().map(|c| u32::from(self.glyph_width(c))).sum();
        units as f32 / 1000.0 * font_size_pt
    }
}
