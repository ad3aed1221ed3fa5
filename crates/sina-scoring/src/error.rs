use sina_core::error::CoreError;
use sina_core::models::scale::ScaleId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("scale {0} has no normalized value of its own")]
    NotScored(ScaleId),
}
