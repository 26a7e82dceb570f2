//! Worksheet pipeline — generate a batch, lay it out, render it.
//!
//! One iteration = one page = one independent run of generate → layout.
//! The CLI writes one file per iteration; the HTTP API renders all iterations
//! as pages of a single document.

use std::fs;
use std::path::PathBuf;

use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::errors::WorksheetError;
use crate::generation::{generate_batch, SamplingPolicy};
use crate::layout::{layout, WorksheetColumn, DEFAULT_COLUMN_CAPACITY};
use crate::models::{Equation, OperationSet, MIN_LIMIT};
use crate::render::{output_file_name, WorksheetRenderer};

/// Most equations a single page may request.
pub const MAX_COUNT: u32 = 10_000;

/// Most pages a single run may request.
pub const MAX_ITERATIONS: u32 = 100;

/// Everything needed to produce one worksheet page.
#[derive(Debug, Clone)]
pub struct WorksheetRequest {
    pub limit: u32,
    pub count: u32,
    pub operations: OperationSet,
    pub column_capacity: usize,
    pub policy: SamplingPolicy,
}

impl WorksheetRequest {
    pub fn new(limit: u32, count: u32, operations: OperationSet) -> Self {
        WorksheetRequest {
            limit,
            count,
            operations,
            column_capacity: DEFAULT_COLUMN_CAPACITY,
            policy: SamplingPolicy::default(),
        }
    }

    /// Builds a request from caller-supplied integers, which may be negative
    /// or out of range. The limit is checked before the count.
    pub fn from_raw(
        limit: i64,
        count: i64,
        operations: OperationSet,
    ) -> Result<Self, WorksheetError> {
        let limit = u32::try_from(limit)
            .ok()
            .filter(|&l| l >= MIN_LIMIT)
            .ok_or(WorksheetError::InvalidLimit(limit))?;
        let count = u32::try_from(count)
            .ok()
            .filter(|c| (1..=MAX_COUNT).contains(c))
            .ok_or(WorksheetError::InvalidCount(count))?;
        Ok(Self::new(limit, count, operations))
    }
}

/// Validates a caller-supplied iteration count.
pub fn checked_iterations(iterations: i64) -> Result<u32, WorksheetError> {
    u32::try_from(iterations)
        .ok()
        .filter(|i| (1..=MAX_ITERATIONS).contains(i))
        .ok_or(WorksheetError::InvalidIterations(iterations))
}

/// A generated batch and its laid-out columns.
#[derive(Debug, Clone, Serialize)]
pub struct Worksheet {
    pub equations: Vec<Equation>,
    pub columns: Vec<WorksheetColumn>,
}

/// Where generated files go: `{dir}/{base_name}_{iteration}{suffix}.{ext}`.
#[derive(Debug, Clone)]
pub struct OutputTarget {
    pub dir: PathBuf,
    pub base_name: String,
    pub suffix: String,
}

pub fn build_worksheet<R: Rng + ?Sized>(
    request: &WorksheetRequest,
    rng: &mut R,
) -> Result<Worksheet, WorksheetError> {
    let equations = generate_batch(
        request.limit,
        request.count,
        &request.operations,
        request.policy,
        rng,
    )?;
    let columns = layout(&equations, request.column_capacity, rng)?;
    Ok(Worksheet { equations, columns })
}

/// Runs the pipeline `iterations` times, one page each.
pub fn build_pages<R: Rng + ?Sized>(
    request: &WorksheetRequest,
    iterations: u32,
    rng: &mut R,
) -> Result<Vec<Vec<WorksheetColumn>>, WorksheetError> {
    checked_iterations(iterations.into())?;
    (0..iterations)
        .map(|_| build_worksheet(request, &mut *rng).map(|sheet| sheet.columns))
        .collect()
}

/// Writes one rendered file per iteration and returns the written paths.
pub fn write_worksheets<R: Rng + ?Sized>(
    request: &WorksheetRequest,
    iterations: u32,
    renderer: &dyn WorksheetRenderer,
    target: &OutputTarget,
    rng: &mut R,
) -> Result<Vec<PathBuf>, WorksheetError> {
    let pages = build_pages(request, iterations, rng)?;
    fs::create_dir_all(&target.dir)?;

    let mut written = Vec::with_capacity(pages.len());
    for (iteration, columns) in (1..).zip(pages) {
        let bytes = renderer.render(std::slice::from_ref(&columns))?;
        let name = output_file_name(
            &target.base_name,
            iteration,
            &target.suffix,
            renderer.extension(),
        );
        let path = target.dir.join(name);
        fs::write(&path, bytes)?;
        info!("Wrote worksheet {iteration}/{iterations} to {}", path.display());
        written.push(path);
    }
    Ok(written)
}
