pub mod equation;
pub mod operation;

pub use equation::Equation;
pub use operation::{parse_operations, Operation, OperationSet, MIN_LIMIT};
