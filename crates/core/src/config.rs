//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! core services. Environment variables are read in the binary, not during
//! request handling, which keeps behaviour consistent across multi-threaded
//! runtimes and test harnesses.

use crate::constants::DEFAULT_MODEL_PATH;
use crate::error::{LoadResult, ModelLoadError};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    model_path: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(model_path: PathBuf) -> LoadResult<Self> {
        if model_path.as_os_str().is_empty() {
            return Err(ModelLoadError::Incompatible(
                "model path cannot be empty".into(),
            ));
        }
        Ok(Self { model_path })
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

/// Resolve the model artifact path from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, falls back to
/// [`DEFAULT_MODEL_PATH`].
pub fn model_path_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH))
}
