//! Equation and batch generation.
//!
//! Flow: validate limit/count → pick an operation per equation → delegate to
//! its rule in `rules.rs`. Equations are generated sequentially so that a
//! seeded RNG always yields the same batch in the same order.

use rand::Rng;

use crate::errors::WorksheetError;
use crate::generation::rules::{generate_equation, validate_limit, SamplingPolicy};
use crate::models::{Equation, Operation, OperationSet};

/// Generates one equation using an operation picked from `operations`.
///
/// `{ADDITION, SUBTRACTION}` takes a coin flip; any other set picks uniformly by index.
pub fn generate_one<R: Rng + ?Sized>(
    limit: u32,
    operations: &OperationSet,
    policy: SamplingPolicy,
    rng: &mut R,
) -> Result<Equation, WorksheetError> {
    validate_limit(limit)?;

    let operation = if operations.is_sum_or_difference() {
        if rng.gen_bool(0.5) {
            Operation::Addition
        } else {
            Operation::Subtraction
        }
    } else {
        operations.as_slice()[rng.gen_range(0..operations.len())]
    };

    generate_equation(operation, limit, policy, rng)
}

/// Generates `count` independent equations, in generation order.
///
/// Preconditions are checked before any sampling, so a failure never leaves a
/// partial batch behind.
pub fn generate_batch<R: Rng + ?Sized>(
    limit: u32,
    count: u32,
    operations: &OperationSet,
    policy: SamplingPolicy,
    rng: &mut R,
) -> Result<Vec<Equation>, WorksheetError> {
    validate_limit(limit)?;
    if count < 1 {
        return Err(WorksheetError::InvalidCount(count.into()));
    }

    (0..count)
        .map(|_| generate_one(limit, operations, policy, &mut *rng))
        .collect()
}
