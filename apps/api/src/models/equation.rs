use serde::Serialize;

use crate::models::operation::Operation;

/// A single two-operand equation.
///
/// `result` is always the exact integer outcome of `first <op> second`; for
/// division `first == second * result` with `second != 0`. The fields are
/// private so the identity cannot be broken after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Equation {
    first: u32,
    second: u32,
    result: u32,
    operation: Operation,
}

impl Equation {
    /// Builds an equation, computing the result.
    ///
    /// Returns `None` when the operation has no exact non-negative integer
    /// result (negative difference, inexact or by-zero division, overflow).
    pub fn new(first: u32, second: u32, operation: Operation) -> Option<Self> {
        let result = match operation {
            Operation::Addition => first.checked_add(second)?,
            Operation::Subtraction => first.checked_sub(second)?,
            Operation::Multiplication => first.checked_mul(second)?,
            Operation::Division => {
                if second == 0 || first % second != 0 {
                    return None;
                }
                first / second
            }
        };
        Some(Equation {
            first,
            second,
            result,
            operation,
        })
    }

    pub fn first(&self) -> u32 {
        self.first
    }

    pub fn second(&self) -> u32 {
        self.second
    }

    pub fn result(&self) -> u32 {
        self.result
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn operator(&self) -> &'static str {
        self.operation().symbol()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_is_computed() {
        let eq = Equation::new(6, 2, Operation::Division).unwrap();
        assert_eq!((eq.first(), eq.second(), eq.result()), (6, 2, 3));
        assert_eq!(eq.operator(), "÷");

        assert_eq!(Equation::new(3, 4, Operation::Multiplication).unwrap().result(), 12);
        assert_eq!(Equation::new(7, 5, Operation::Subtraction).unwrap().result(), 2);
        assert_eq!(Equation::new(6, 2, Operation::Addition).unwrap().result(), 8);
    }

    #[test]
    fn test_invalid_identities_are_rejected() {
        assert!(Equation::new(2, 5, Operation::Subtraction).is_none());
        assert!(Equation::new(7, 2, Operation::Division).is_none());
        assert!(Equation::new(4, 0, Operation::Division).is_none());
        assert!(Equation::new(u32::MAX, 2, Operation::Multiplication).is_none());
    }

    #[test]
    fn test_zero_quotient_is_a_valid_division() {
        let eq = Equation::new(0, 7, Operation::Division).unwrap();
        assert_eq!(eq.result(), 0);
    }
}
