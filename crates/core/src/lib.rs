//! # CHD Core
//!
//! Core inference logic for the CHD risk application.
//!
//! This crate contains the inference request contract and nothing else:
//! - Clinical record assembly with clamped bounds ([`record`])
//! - Model artifact loading and the [`Predictor`] boundary ([`model`])
//! - The risk evaluator and decision policy ([`evaluate`])
//!
//! **No API concerns**: HTTP serving and page rendering belong in `api-rest`.

#![warn(rust_2018_idioms)]

pub mod config;
pub mod constants;
pub mod error;
pub mod evaluate;
pub mod model;
pub mod record;

pub use config::CoreConfig;
pub use constants::{DEFAULT_MODEL_PATH, FEATURE_COLUMNS};
pub use error::{ModelLoadError, PredictionError};
pub use evaluate::{evaluate, format_percent, PredictionResult, Severity, Verdict};
pub use model::{Artifact, ArtifactModel, ModelCell, Predictor};
pub use record::{ClinicalRecord, RecordForm};
