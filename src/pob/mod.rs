//! Path of Building evaluator: resolve a build reference to markup, read its
//! player stats and condense them into headline metrics.

pub mod codec;
pub mod evaluator;
pub mod markup;
pub mod metrics;
pub mod resolver;

pub use evaluator::evaluate;
pub use resolver::{BuildInput, BuildResolver, ResolvedBuild};
