//! Rendering adapters — turn laid-out columns into document bytes.
//!
//! One page per generated batch. Multi-page documents come from running the
//! whole generate → layout pipeline once per page and handing every page here.

pub mod font_metrics;
pub mod pdf;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::errors::WorksheetError;
use crate::layout::{PageConfig, WorksheetColumn};

pub use pdf::PdfRenderer;
pub use text::TextRenderer;

/// A backend that draws worksheet pages.
pub trait WorksheetRenderer: Send + Sync {
    /// Renders every page (a page is its list of columns) into one document.
    fn render(&self, pages: &[Vec<WorksheetColumn>]) -> Result<Vec<u8>, WorksheetError>;

    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    fn content_type(&self) -> &'static str;
}

/// Output document format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pdf,
    Text,
}

impl OutputFormat {
    pub fn renderer(self, page: &PageConfig) -> Box<dyn WorksheetRenderer> {
        match self {
            OutputFormat::Pdf => Box::new(PdfRenderer::new(page.clone())),
            OutputFormat::Text => Box::new(TextRenderer::default()),
        }
    }
}

/// `"{base}_{iteration}{suffix}.{extension}"`, e.g. `MathExercises_1.pdf`.
pub fn output_file_name(base: &str, iteration: u32, suffix: &str, extension: &str) -> String {
    format!("{base}_{iteration}{suffix}.{extension}")
}

/// Rejects an empty document or any page without equations.
pub(crate) fn ensure_printable(pages: &[Vec<WorksheetColumn>]) -> Result<(), WorksheetError> {
    let empty_page = pages
        .iter()
        .any(|columns| columns.iter().all(WorksheetColumn::is_empty));
    if pages.is_empty() || empty_page {
        return Err(WorksheetError::EmptyEquationList);
    }
    Ok(())
}
