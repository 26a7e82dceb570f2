// Worksheet layout: column partitioning, masking and styled token streams.
// Page geometry is kept separate so renderers can place columns on the page.

pub mod columns;
pub mod page;

// Re-export the public API consumed by the pipeline and the renderers.
pub use columns::{layout, RenderLine, WorksheetColumn, DEFAULT_COLUMN_CAPACITY, PLACEHOLDER};
pub use page::{default_page_config, PageConfig};
