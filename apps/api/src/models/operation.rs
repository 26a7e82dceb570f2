use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::WorksheetError;

/// Smallest limit a worksheet may be generated for.
pub const MIN_LIMIT: u32 = 10;

/// The four supported arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    /// `+`
    Addition,
    /// `-`
    Subtraction,
    /// `×`
    Multiplication,
    /// `÷`
    Division,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
    ];

    /// Symbol printed on the worksheet.
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Addition => "+",
            Operation::Subtraction => "-",
            Operation::Multiplication => "×",
            Operation::Division => "÷",
        }
    }

    /// Configuration name (`ADDITION`, `SUBTRACTION`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Operation::Addition => "ADDITION",
            Operation::Subtraction => "SUBTRACTION",
            Operation::Multiplication => "MULTIPLICATION",
            Operation::Division => "DIVISION",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = WorksheetError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_uppercase();
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == key)
            .ok_or(WorksheetError::InvalidOperationName(key))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Operation set
// ────────────────────────────────────────────────────────────────────────────

/// A non-empty, duplicate-free set of operations in first-seen order.
///
/// Every constructor falls back to `{ADDITION, SUBTRACTION}` when it would
/// otherwise end up empty, so generation never sees an empty set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationSet(Vec<Operation>);

impl Default for OperationSet {
    fn default() -> Self {
        OperationSet(vec![Operation::Addition, Operation::Subtraction])
    }
}

impl OperationSet {
    pub fn new(ops: impl IntoIterator<Item = Operation>) -> Self {
        Self::from_optional(ops.into_iter().map(Some))
    }

    /// Builds a set from possibly-missing entries (e.g. JSON `null`s).
    /// Missing entries are dropped before the emptiness check.
    pub fn from_optional(ops: impl IntoIterator<Item = Option<Operation>>) -> Self {
        let mut unique: Vec<Operation> = Vec::with_capacity(Operation::ALL.len());
        for op in ops.into_iter().flatten() {
            if !unique.contains(&op) {
                unique.push(op);
            }
        }
        if unique.is_empty() {
            Self::default()
        } else {
            OperationSet(unique)
        }
    }

    pub fn as_slice(&self) -> &[Operation] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, op: Operation) -> bool {
        self.0.contains(&op)
    }

    /// Exactly `{ADDITION, SUBTRACTION}`, in either order.
    pub fn is_sum_or_difference(&self) -> bool {
        self.0.len() == 2
            && self.contains(Operation::Addition)
            && self.contains(Operation::Subtraction)
    }
}

/// Parses a comma-separated list of operation names.
///
/// Blank input (or input made only of separators) yields the default set.
/// An unknown name fails with `InvalidOperationName`.
pub fn parse_operations(arg: &str) -> Result<OperationSet, WorksheetError> {
    let ops = arg
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Operation::from_str)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(OperationSet::new(ops))
}
