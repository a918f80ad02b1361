//! Model artifact loading and inference boundary.
//!
//! The pre-trained classifier lives on disk as a JSON artifact describing a
//! standardize + encode + logistic-regression pipeline. This module loads it
//! once, validates it against the record schema, and exposes it behind the
//! [`Predictor`] capability the evaluator consumes. Training and export of
//! the artifact happen elsewhere; this crate only reads it.

use crate::constants::FEATURE_COLUMNS;
use crate::error::{EvalResult, LoadResult, ModelLoadError, PredictionError};
use crate::record::ClinicalRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// Classification capability over a clinical record.
///
/// `predict` returns the binary label, `predict_proba` the estimated
/// probability of the positive class (label 1), both for the same record.
pub trait Predictor {
    fn predict(&self, record: &ClinicalRecord) -> EvalResult<u8>;
    fn predict_proba(&self, record: &ClinicalRecord) -> EvalResult<f64>;
}

/// On-disk artifact contents.
///
/// `feature_names` must match the record schema exactly; `means`, `scales`
/// and `coefficients` are indexed by the same order. `famhist` is encoded
/// 1.0/0.0 before standardization, matching the training export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub feature_names: Vec<String>,
    pub means: Vec<f64>,
    pub scales: Vec<f64>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

/// A loaded, schema-validated model. Read-only after construction.
#[derive(Debug)]
pub struct ArtifactModel {
    artifact: Artifact,
}

impl ArtifactModel {
    /// Validate an artifact against the record schema.
    pub fn try_new(artifact: Artifact) -> LoadResult<Self> {
        if artifact.feature_names != FEATURE_COLUMNS {
            return Err(ModelLoadError::Incompatible(format!(
                "feature names {:?} do not match expected schema {:?}",
                artifact.feature_names, FEATURE_COLUMNS
            )));
        }
        let n = FEATURE_COLUMNS.len();
        for (field, len) in [
            ("means", artifact.means.len()),
            ("scales", artifact.scales.len()),
            ("coefficients", artifact.coefficients.len()),
        ] {
            if len != n {
                return Err(ModelLoadError::Incompatible(format!(
                    "{field} has {len} entries, expected {n}"
                )));
            }
        }
        if artifact.scales.iter().any(|s| *s == 0.0 || !s.is_finite()) {
            return Err(ModelLoadError::Incompatible(
                "scales must be finite and non-zero".into(),
            ));
        }
        if !(0.0..=1.0).contains(&artifact.threshold) {
            return Err(ModelLoadError::Incompatible(format!(
                "threshold {} outside [0, 1]",
                artifact.threshold
            )));
        }
        Ok(Self { artifact })
    }

    /// Load and validate the artifact at `path`.
    pub fn load(path: &Path) -> LoadResult<Self> {
        if !path.is_file() {
            return Err(ModelLoadError::Missing {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path).map_err(ModelLoadError::Read)?;
        let artifact: Artifact = serde_json::from_str(&contents).map_err(ModelLoadError::Parse)?;
        let model = Self::try_new(artifact)?;
        tracing::info!("loaded model artifact from {}", path.display());
        Ok(model)
    }

    /// Linear score of the standardized feature row.
    fn score(&self, record: &ClinicalRecord) -> EvalResult<f64> {
        let mut score = self.artifact.intercept;
        for (i, name) in FEATURE_COLUMNS.iter().enumerate() {
            let raw = record
                .feature(name)
                .ok_or_else(|| PredictionError::Model(format!("unknown feature {name:?}")))?;
            let standardized = (raw - self.artifact.means[i]) / self.artifact.scales[i];
            score += self.artifact.coefficients[i] * standardized;
        }
        Ok(score)
    }
}

impl Predictor for ArtifactModel {
    fn predict(&self, record: &ClinicalRecord) -> EvalResult<u8> {
        let proba = self.predict_proba(record)?;
        Ok(u8::from(proba >= self.artifact.threshold))
    }

    fn predict_proba(&self, record: &ClinicalRecord) -> EvalResult<f64> {
        let score = self.score(record)?;
        Ok(sigmoid(score))
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Process-wide lazy holder for the loaded model.
///
/// Initialized at most once per process; thereafter the model is immutable
/// and shared freely across concurrent evaluations without locking. Under a
/// racing first use two loads may run, but only one result is retained.
#[derive(Debug, Default)]
pub struct ModelCell {
    cell: OnceLock<Arc<ArtifactModel>>,
}

impl ModelCell {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// The shared model, loading it from `path` on first use.
    ///
    /// Load failures are not cached: a later call may succeed once the
    /// artifact appears at `path`.
    pub fn get_or_load(&self, path: &Path) -> LoadResult<Arc<ArtifactModel>> {
        if let Some(model) = self.cell.get() {
            return Ok(Arc::clone(model));
        }
        let loaded = Arc::new(ArtifactModel::load(path)?);
        Ok(Arc::clone(self.cell.get_or_init(|| loaded)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordForm;
    use std::io::Write;

    fn identity_artifact() -> Artifact {
        Artifact {
            feature_names: FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect(),
            means: vec![0.0; 6],
            scales: vec![1.0; 6],
            coefficients: vec![0.0; 6],
            intercept: 0.0,
            threshold: 0.5,
        }
    }

    fn write_artifact(artifact: &Artifact) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string_pretty(artifact).unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn zero_weights_give_even_odds() {
        let model = ArtifactModel::try_new(identity_artifact()).unwrap();
        let record = RecordForm::default().collect();

        let proba = model.predict_proba(&record).unwrap();
        assert!((proba - 0.5).abs() < 1e-12);
        // proba == threshold counts as positive.
        assert_eq!(model.predict(&record).unwrap(), 1);
    }

    #[test]
    fn intercept_drives_the_label() {
        let mut artifact = identity_artifact();
        artifact.intercept = -3.0;
        let model = ArtifactModel::try_new(artifact).unwrap();
        let record = RecordForm::default().collect();

        let proba = model.predict_proba(&record).unwrap();
        assert!(proba < 0.1);
        assert_eq!(model.predict(&record).unwrap(), 0);
    }

    #[test]
    fn famhist_weight_shifts_probability() {
        let mut artifact = identity_artifact();
        artifact.coefficients[3] = 2.0; // famhist column
        let model = ArtifactModel::try_new(artifact).unwrap();

        let present = RecordForm::default().collect();
        let absent = RecordForm {
            famhist: chd_types::FamilyHistory::Absent,
            ..RecordForm::default()
        }
        .collect();

        let p_present = model.predict_proba(&present).unwrap();
        let p_absent = model.predict_proba(&absent).unwrap();
        assert!(p_present > p_absent);
    }

    #[test]
    fn prediction_is_deterministic() {
        let mut artifact = identity_artifact();
        artifact.coefficients = vec![0.02, 0.3, 0.1, 0.9, -0.05, 0.04];
        artifact.intercept = -1.2;
        let model = ArtifactModel::try_new(artifact).unwrap();
        let record = RecordForm::default().collect();

        let first = model.predict_proba(&record).unwrap();
        for _ in 0..10 {
            assert_eq!(model.predict_proba(&record).unwrap(), first);
            assert_eq!(
                model.predict(&record).unwrap(),
                model.predict(&record).unwrap()
            );
        }
    }

    #[test]
    fn load_missing_artifact() {
        let err = ArtifactModel::load(Path::new("/nonexistent/chd-model.json")).unwrap_err();
        assert!(matches!(err, ModelLoadError::Missing { .. }));
    }

    #[test]
    fn load_corrupt_artifact() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json at all").unwrap();
        file.flush().unwrap();

        let err = ArtifactModel::load(file.path()).unwrap_err();
        assert!(matches!(err, ModelLoadError::Parse(_)));
    }

    #[test]
    fn load_valid_artifact_round_trip() {
        let file = write_artifact(&identity_artifact());
        let model = ArtifactModel::load(file.path()).unwrap();
        let record = RecordForm::default().collect();
        assert!((model.predict_proba(&record).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn rejects_foreign_feature_names() {
        let mut artifact = identity_artifact();
        artifact.feature_names[1] = "cholesterol".into();
        let err = ArtifactModel::try_new(artifact).unwrap_err();
        assert!(matches!(err, ModelLoadError::Incompatible(_)));
    }

    #[test]
    fn rejects_reordered_feature_names() {
        let mut artifact = identity_artifact();
        artifact.feature_names.swap(0, 5);
        assert!(ArtifactModel::try_new(artifact).is_err());
    }

    #[test]
    fn rejects_coefficient_count_mismatch() {
        let mut artifact = identity_artifact();
        artifact.coefficients.pop();
        let err = ArtifactModel::try_new(artifact).unwrap_err();
        assert!(err.to_string().contains("coefficients"));
    }

    #[test]
    fn rejects_zero_scale() {
        let mut artifact = identity_artifact();
        artifact.scales[2] = 0.0;
        assert!(ArtifactModel::try_new(artifact).is_err());
    }

    #[test]
    fn rejects_threshold_outside_unit_interval() {
        let mut artifact = identity_artifact();
        artifact.threshold = 1.5;
        assert!(ArtifactModel::try_new(artifact).is_err());
    }

    #[test]
    fn threshold_defaults_when_absent_from_json() {
        let mut json = serde_json::to_value(identity_artifact()).unwrap();
        json.as_object_mut().unwrap().remove("threshold");
        let artifact: Artifact = serde_json::from_value(json).unwrap();
        assert_eq!(artifact.threshold, 0.5);
    }

    #[test]
    fn model_cell_memoizes() {
        let file = write_artifact(&identity_artifact());
        let cell = ModelCell::new();

        let first = cell.get_or_load(file.path()).unwrap();
        let second = cell.get_or_load(file.path()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn model_cell_does_not_cache_failures() {
        let cell = ModelCell::new();
        let missing = Path::new("/nonexistent/chd-model.json");
        assert!(cell.get_or_load(missing).is_err());

        let file = write_artifact(&identity_artifact());
        assert!(cell.get_or_load(file.path()).is_ok());
    }
}
