use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),
    #[error("empty request: all entity types suppressed")]
    EmptyRequest,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
