//! Risk evaluation.
//!
//! A pure, stateless, single-shot transformation: one record in, one result
//! out. The evaluator invokes the model's classification and probability
//! operations on the same record, checks the output invariants, and applies
//! the fixed decision policy mapping the label to a user-facing verdict.

use crate::error::{EvalResult, PredictionError};
use crate::model::Predictor;
use crate::record::ClinicalRecord;
use serde::Serialize;

/// Advisory shown alongside an elevated-risk verdict.
pub const ELEVATED_RISK_ADVICE: &str =
    "Please consult a cardiologist for further examination.";

/// Outcome of one evaluation. Ephemeral, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Binary label: 0 no elevated risk, 1 elevated risk.
    pub label: u8,
    /// Estimated probability of label 1, in [0, 1].
    pub probability: f64,
}

impl PredictionResult {
    /// Fixed decision policy: label 1 is elevated risk, anything else low.
    pub fn verdict(&self) -> Verdict {
        if self.label == 1 {
            Verdict::ElevatedRisk
        } else {
            Verdict::LowRisk
        }
    }
}

/// User-facing categorical outcome derived from the model's label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    ElevatedRisk,
    LowRisk,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ElevatedRisk => "Elevated Risk",
            Self::LowRisk => "Low Risk",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::ElevatedRisk => Severity::High,
            Self::LowRisk => Severity::Normal,
        }
    }

    /// Advisory message, present only for elevated risk.
    pub fn advice(&self) -> Option<&'static str> {
        match self {
            Self::ElevatedRisk => Some(ELEVATED_RISK_ADVICE),
            Self::LowRisk => None,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity attached to a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    High,
    Normal,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Normal => "normal",
        }
    }
}

/// Evaluate one record against the loaded model.
///
/// Calls `predict` then `predict_proba` on the same record. Model failures
/// surface as [`PredictionError`]; so do outputs that violate the result
/// invariants (label outside {0, 1}, probability outside [0, 1]).
pub fn evaluate(record: &ClinicalRecord, model: &impl Predictor) -> EvalResult<PredictionResult> {
    let label = model.predict(record)?;
    if label > 1 {
        return Err(PredictionError::InvalidLabel(i64::from(label)));
    }

    let probability = model.predict_proba(record)?;
    if !(0.0..=1.0).contains(&probability) || probability.is_nan() {
        return Err(PredictionError::InvalidProbability(probability));
    }

    Ok(PredictionResult { label, probability })
}

/// Format a probability as a percentage with one decimal, e.g. "12.0%".
pub fn format_percent(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}
