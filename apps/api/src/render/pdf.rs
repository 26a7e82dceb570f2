//! PDF renderer built on `printpdf`.
//!
//! Each page gets one column per `WorksheetColumn`, starting at
//! `PageConfig::column_x(i)` on the first baseline and stepping down by the
//! leading. Tokens are drawn left to right with a base-size space between
//! them. The built-in Helvetica face has no box glyph, so the placeholder is
//! stroked as a small square sitting on the baseline.

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point,
};

use crate::errors::WorksheetError;
use crate::layout::{PageConfig, RenderLine, WorksheetColumn, PLACEHOLDER};
use crate::render::font_metrics::{FontMetricTable, HELVETICA};
use crate::render::{ensure_printable, WorksheetRenderer};

const DOCUMENT_TITLE: &str = "Math Exercises";
const LAYER_NAME: &str = "Worksheet";

/// Side of the placeholder square, in ems of the base font.
const PLACEHOLDER_EM: f32 = 0.7;

#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    pub page: PageConfig,
}

fn mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

impl PdfRenderer {
    pub fn new(page: PageConfig) -> Self {
        PdfRenderer { page }
    }

    fn draw_page(
        &self,
        layer: &PdfLayerReference,
        font: &IndirectFontRef,
        columns: &[WorksheetColumn],
    ) {
        for (index, column) in columns.iter().enumerate() {
            let x = self.page.column_x(index);
            for (row, line) in column.lines.iter().enumerate() {
                let y = self.page.start_y_pt - row as f32 * self.page.leading_pt;
                self.draw_line(layer, font, line, x, y);
            }
        }
    }

    fn draw_line(
        &self,
        layer: &PdfLayerReference,
        font: &IndirectFontRef,
        line: &RenderLine,
        x: f32,
        y: f32,
    ) {
        let metrics: &FontMetricTable = &HELVETICA;
        let space = metrics.measure_str(" ", self.page.base_font_size_pt);
        let mut cursor = x;

        for token in &line.tokens {
            let size = if token.operator_style {
                self.page.operator_font_size_pt
            } else {
                self.page.base_font_size_pt
            };

            if token.text == PLACEHOLDER {
                let side = PLACEHOLDER_EM * self.page.base_font_size_pt;
                draw_box(layer, cursor, y, side);
                cursor += side;
            } else {
                layer.use_text(token.text.as_str(), size, mm(cursor), mm(y), font);
                cursor += metrics.measure_str(&token.text, size);
            }
            cursor += space;
        }
    }
}

/// Stroked square sitting on the baseline at `(x, y)`.
fn draw_box(layer: &PdfLayerReference, x: f32, y: f32, side: f32) {
    let corners = [(x, y), (x + side, y), (x + side, y + side), (x, y + side)];
    let outline = Line {
        points: corners
            .iter()
            .map(|&(px, py)| (Point::new(mm(px), mm(py)), false))
            .collect(),
        is_closed: true,
    };
    layer.set_outline_thickness(0.8);
    layer.add_line(outline);
}

impl WorksheetRenderer for PdfRenderer {
    fn render(&self, pages: &[Vec<WorksheetColumn>]) -> Result<Vec<u8>, WorksheetError> {
        ensure_printable(pages)?;

        let width = mm(self.page.page_width_pt);
        let height = mm(self.page.page_height_pt);
        let (doc, first_page, first_layer) =
            PdfDocument::new(DOCUMENT_TITLE, width, height, LAYER_NAME);
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| WorksheetError::Render(e.to_string()))?;

        for (index, columns) in pages.iter().enumerate() {
            let (page, layer) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(width, height, LAYER_NAME)
            };
            let layer = doc.get_page(page).get_layer(layer);
            self.draw_page(&layer, &font, columns);
        }

        doc.save_to_bytes()
            .map_err(|e| WorksheetError::Render(e.to_string()))
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn content_type(&self) -> &'static str {
        "application/pdf"
    }
}
