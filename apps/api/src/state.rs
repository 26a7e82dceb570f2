use crate::config::Config;
use crate::layout::PageConfig;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds no RNG: handlers create one inside their blocking task.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Page geometry handed to the PDF renderer.
    pub page_config: PageConfig,
}
