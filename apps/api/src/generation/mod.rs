// Equation generation: per-operation rejection sampling plus batch orchestration.
// Everything here is synchronous and takes its RNG as a parameter.

pub mod generator;
pub mod handlers;
pub mod rules;

pub use generator::generate_batch;
pub use rules::SamplingPolicy;
