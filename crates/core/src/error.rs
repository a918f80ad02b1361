use std::path::PathBuf;

/// Errors raised while loading the model artifact from disk.
///
/// Any of these is fatal to prediction: no partial or default model is ever
/// produced, and the caller must stop offering evaluations until a load
/// succeeds.
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("model artifact not found: {path}", path = path.display())]
    Missing { path: PathBuf },
    #[error("failed to read model artifact: {0}")]
    Read(std::io::Error),
    #[error("failed to parse model artifact: {0}")]
    Parse(serde_json::Error),
    #[error("model artifact is incompatible: {0}")]
    Incompatible(String),
}

/// Errors raised while evaluating a single record.
///
/// Recoverable: the caller reports the message to the user, who may retry
/// with a new submission. Never terminates the process.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("model invocation failed: {0}")]
    Model(String),
    #[error("model returned an invalid label: {0} (expected 0 or 1)")]
    InvalidLabel(i64),
    #[error("model returned an invalid probability: {0} (expected [0, 1])")]
    InvalidProbability(f64),
}

pub type LoadResult<T> = std::result::Result<T, ModelLoadError>;
pub type EvalResult<T> = std::result::Result<T, PredictionError>;
