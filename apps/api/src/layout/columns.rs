//! Column layout — splits a batch into columns and turns every equation into a
//! five-token render line with one masked position.
//!
//! The layout decides column membership and styling flags only. Where a column
//! lands on the page is `PageConfig`'s business.

use rand::Rng;
use serde::Serialize;

use crate::errors::WorksheetError;
use crate::models::{Equation, Operation};

/// Equations per column unless the caller says otherwise.
pub const DEFAULT_COLUMN_CAPACITY: usize = 50;

/// Glyph printed in place of the hidden number.
pub const PLACEHOLDER: &str = "□";

pub const EQUALS: &str = "=";

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Which number of the equation the student has to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskPosition {
    First,
    Second,
    Result,
}

impl MaskPosition {
    /// 1 = first operand, 2 = second operand, 3 = result.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(MaskPosition::First),
            2 => Some(MaskPosition::Second),
            3 => Some(MaskPosition::Result),
            _ => None,
        }
    }

    /// Uniform 1-in-3 pick.
    pub fn choose<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_index(rng.gen_range(1..=3u8)).unwrap_or(MaskPosition::Result)
    }

    /// Index of the masked token within a `RenderLine`.
    pub fn token_index(self) -> usize {
        match self {
            MaskPosition::First => 0,
            MaskPosition::Second => 2,
            MaskPosition::Result => 4,
        }
    }
}

/// One styled text run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    /// Operator and `=` tokens are drawn slightly larger.
    pub operator_style: bool,
}

impl Token {
    fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let operator_style = is_operator_token(&text);
        Token {
            text,
            operator_style,
        }
    }
}

/// `[a, op, b, "=", c]` with exactly one of a, b, c replaced by the placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderLine {
    pub tokens: [Token; 5],
    pub masked: MaskPosition,
}

impl RenderLine {
    pub fn texts(&self) -> [&str; 5] {
        let [a, b, c, d, e] = &self.tokens;
        [
            a.text.as_str(),
            b.text.as_str(),
            c.text.as_str(),
            d.text.as_str(),
            e.text.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorksheetColumn {
    pub lines: Vec<RenderLine>,
}

impl WorksheetColumn {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

/// Lays out `equations` into columns of at most `column_capacity` lines.
///
/// Masks are drawn from `rng` in equation order, so the same seed and the same
/// equations always give the same token stream. Empty input yields no columns.
pub fn layout<R: Rng + ?Sized>(
    equations: &[Equation],
    column_capacity: usize,
    rng: &mut R,
) -> Result<Vec<WorksheetColumn>, WorksheetError> {
    let chunks = partition(equations, column_capacity)?;
    let mut masks = placeholder_sequence(rng, equations.len()).into_iter();
    Ok(chunks
        .into_iter()
        .map(|chunk| WorksheetColumn {
            lines: chunk
                .iter()
                .zip(&mut masks)
                .map(|(eq, mask)| format_tokens(eq, mask))
                .collect(),
        })
        .collect())
}

/// Consecutive chunks of at most `size` items; the last one may be shorter.
pub fn partition<T>(items: &[T], size: usize) -> Result<Vec<&[T]>, WorksheetError> {
    if size == 0 {
        return Err(WorksheetError::InvalidColumnCapacity);
    }
    Ok(items.chunks(size).collect())
}

/// Builds the render line for `equation` with `mask` hidden.
pub fn format_tokens(equation: &Equation, mask: MaskPosition) -> RenderLine {
    let mut tokens = [
        Token::new(equation.first().to_string()),
        Token::new(equation.operator()),
        Token::new(equation.second().to_string()),
        Token::new(EQUALS),
        Token::new(equation.result().to_string()),
    ];
    tokens[mask.token_index()] = Token::new(PLACEHOLDER);

    RenderLine {
        tokens,
        masked: mask,
    }
}

/// Whether a token is drawn with operator styling.
pub fn is_operator_token(token: &str) -> bool {
    token == EQUALS || Operation::ALL.iter().any(|op| op.symbol() == token)
}

/// Draws `n` masks, one per equation, in order.
pub fn placeholder_sequence<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<MaskPosition> {
    (0..n).map(|_| MaskPosition::choose(&mut *rng)).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
