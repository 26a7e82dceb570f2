//! Plain-text renderer. Columns are printed side by side, pages are separated
//! by a form feed.

use crate::errors::WorksheetError;
use crate::layout::{RenderLine, WorksheetColumn};
use crate::render::{ensure_printable, WorksheetRenderer};

const PAGE_BREAK: &str = "\u{0C}";

#[derive(Debug, Clone)]
pub struct TextRenderer {
    /// Characters reserved per column, gap included. Wider cells still get one
    /// separating space.
    pub column_width: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        TextRenderer { column_width: 24 }
    }
}

impl TextRenderer {
    fn render_page(&self, columns: &[WorksheetColumn]) -> String {
        let rows = columns.iter().map(WorksheetColumn::len).max().unwrap_or(0);
        let mut out = String::new();

        for row in 0..rows {
            let mut line = String::new();
            for column in columns {
                let cell = column.lines.get(row).map(line_text).unwrap_or_default();
                let pad = self.column_width.saturating_sub(cell.chars().count()).max(1);
                line.push_str(&cell);
                line.extend(std::iter::repeat(' ').take(pad));
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

/// Tokens joined by single spaces.
pub fn line_text(line: &RenderLine) -> String {
    line.texts().join(" ")
}

impl WorksheetRenderer for TextRenderer {
    fn render(&self, pages: &[Vec<WorksheetColumn>]) -> Result<Vec<u8>, WorksheetError> {
        ensure_printable(pages)?;

        let rendered: Vec<String> = pages.iter().map(|page| self.render_page(page)).collect();
        Ok(rendered.join(PAGE_BREAK).into_bytes())
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }
}
