//! Axum route handlers for the Worksheet API.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use tracing::info;

use crate::errors::{AppError, WorksheetError};
use crate::layout::DEFAULT_COLUMN_CAPACITY;
use crate::models::{parse_operations, Operation, OperationSet};
use crate::render::OutputFormat;
use crate::state::AppState;
use crate::worksheet::{
    build_pages, build_worksheet, checked_iterations, Worksheet, WorksheetRequest,
};

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

fn one() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDocumentQuery {
    pub limit: i64,
    pub number_of_exercises: i64,
    #[serde(default = "one")]
    pub iterations: i64,
    /// Comma-separated operation names.
    pub operations: Option<String>,
    pub seed: Option<u64>,
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Deserialize)]
pub struct CreateWorksheetRequest {
    pub limit: i64,
    pub count: i64,
    /// `null` entries are dropped; missing or empty means addition and subtraction.
    #[serde(default)]
    pub operations: Option<Vec<Option<Operation>>>,
    pub column_capacity: Option<usize>,
    pub seed: Option<u64>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/pdf/generate
///
/// Renders `iterations` worksheet pages into one document (PDF unless
/// `format=text`). Each page is an independent batch.
pub async fn handle_generate_document(
    State(state): State<AppState>,
    Query(query): Query<GenerateDocumentQuery>,
) -> Result<Response, AppError> {
    let operations = parse_operations(query.operations.as_deref().unwrap_or(""))?;
    let mut request =
        WorksheetRequest::from_raw(query.limit, query.number_of_exercises, operations)?;
    request.policy = state.config.sampling_policy();
    let iterations = checked_iterations(query.iterations)?;

    let renderer = query.format.unwrap_or_default().renderer(&state.page_config);
    let seed = query.seed;

    // CPU-bound — keep it off the async executor.
    let (bytes, content_type) = tokio::task::spawn_blocking(move || {
        let pages = match seed {
            Some(seed) => build_pages(&request, iterations, &mut StdRng::seed_from_u64(seed)),
            None => build_pages(&request, iterations, &mut rand::thread_rng()),
        }?;
        let bytes = renderer.render(&pages)?;
        Ok::<_, WorksheetError>((bytes, renderer.content_type()))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in rendering: {e}")))??;

    info!(
        pages = iterations,
        bytes = bytes.len(),
        "Rendered worksheet document"
    );

    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

/// POST /api/v1/worksheets
///
/// Returns the generated equations and their laid-out columns as JSON.
pub async fn handle_create_worksheet(
    State(state): State<AppState>,
    Json(body): Json<CreateWorksheetRequest>,
) -> Result<Json<Worksheet>, AppError> {
    let operations = OperationSet::from_optional(body.operations.unwrap_or_default());
    let mut request = WorksheetRequest::from_raw(body.limit, body.count, operations)?;
    request.column_capacity = body.column_capacity.unwrap_or(DEFAULT_COLUMN_CAPACITY);
    request.policy = state.config.sampling_policy();
    let seed = body.seed;

    let worksheet = tokio::task::spawn_blocking(move || match seed {
        Some(seed) => build_worksheet(&request, &mut StdRng::seed_from_u64(seed)),
        None => build_worksheet(&request, &mut rand::thread_rng()),
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in generation: {e}")))??;

    Ok(Json(worksheet))
}
