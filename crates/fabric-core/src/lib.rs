pub mod catalog;
pub mod delivery;
pub mod engine;
pub mod error;
pub mod model;
pub mod request;

use std::path::Path;

use catalog::Catalog;
use engine::{EvaluateOptions, Evaluation};
use error::FabricError;
use request::schema::EvaluationRequest;

pub use engine::evaluate;

/// Main API entry point: load a catalog file once per process and run one
/// evaluation pass over it.
///
/// The catalog stays cached for the life of the process, so repeated passes
/// with different requests only pay for filtering and scoring.
pub fn evaluate_file(
    path: &Path,
    request: &EvaluationRequest,
    options: &EvaluateOptions,
) -> Result<(&'static Catalog, Evaluation), FabricError> {
    let catalog = catalog::cache::load_shared(path)?;
    let evaluation = engine::evaluate(catalog, request, options)?;
    Ok((catalog, evaluation))
}
