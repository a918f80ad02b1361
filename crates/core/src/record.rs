//! Clinical record assembly.
//!
//! [`RecordForm`] carries the six raw user-supplied values exactly as they
//! arrive from the form, with the defaults the form presents. Collecting a
//! form produces a [`ClinicalRecord`], the single-row structured record the
//! model consumes. Out-of-range numeric entry is clamped to the declared
//! bounds at this boundary rather than rejected; no cross-field validation
//! is performed.

use crate::constants::{
    DEFAULT_ADIPOSITY, DEFAULT_AGE, DEFAULT_LDL, DEFAULT_OBESITY, DEFAULT_SBP, FEATURE_COLUMNS,
};
use chd_types::{Age, FamilyHistory, Sbp};
use serde::{Deserialize, Serialize};

/// Raw form values, one per input field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordForm {
    pub sbp: i64,
    pub ldl: f64,
    pub adiposity: f64,
    pub famhist: FamilyHistory,
    pub obesity: f64,
    pub age: i64,
}

impl Default for RecordForm {
    fn default() -> Self {
        Self {
            sbp: DEFAULT_SBP,
            ldl: DEFAULT_LDL,
            adiposity: DEFAULT_ADIPOSITY,
            famhist: FamilyHistory::Present,
            obesity: DEFAULT_OBESITY,
            age: DEFAULT_AGE,
        }
    }
}

impl RecordForm {
    /// Assemble the typed single-row record, clamping bounded fields.
    pub fn collect(&self) -> ClinicalRecord {
        ClinicalRecord {
            sbp: Sbp::clamped(self.sbp),
            ldl: self.ldl,
            adiposity: self.adiposity,
            famhist: self.famhist,
            obesity: self.obesity,
            age: Age::clamped(self.age),
        }
    }
}

/// One submission's worth of clinical measurements, typed and validated.
///
/// Created fresh per submission, immutable thereafter. The field set, names,
/// and order match [`FEATURE_COLUMNS`]; the model's preprocessing pipeline
/// indexes features by name, so the evaluator trusts this shape without
/// re-validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalRecord {
    pub sbp: Sbp,
    pub ldl: f64,
    pub adiposity: f64,
    pub famhist: FamilyHistory,
    pub obesity: f64,
    pub age: Age,
}

impl Default for ClinicalRecord {
    fn default() -> Self {
        RecordForm::default().collect()
    }
}

impl ClinicalRecord {
    /// Numeric value of a feature column, by name.
    ///
    /// `famhist` is returned in its model encoding (1.0 Present, 0.0 Absent).
    /// Returns `None` for names outside the schema.
    pub fn feature(&self, name: &str) -> Option<f64> {
        match name {
            "sbp" => Some(self.sbp.get() as f64),
            "ldl" => Some(self.ldl),
            "adiposity" => Some(self.adiposity),
            "famhist" => Some(self.famhist.encoded()),
            "obesity" => Some(self.obesity),
            "age" => Some(self.age.get() as f64),
            _ => None,
        }
    }

    /// The record's feature values in schema order.
    pub fn feature_row(&self) -> [f64; 6] {
        let mut row = [0.0; 6];
        for (slot, name) in row.iter_mut().zip(FEATURE_COLUMNS) {
            // Every schema name resolves; `feature` only fails on foreign names.
            *slot = self.feature(name).unwrap_or_default();
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_form_matches_declared_defaults() {
        let form = RecordForm::default();
        assert_eq!(form.sbp, 130);
        assert_eq!(form.ldl, 4.0);
        assert_eq!(form.adiposity, 25.0);
        assert_eq!(form.famhist, FamilyHistory::Present);
        assert_eq!(form.obesity, 25.0);
        assert_eq!(form.age, 45);
    }

    #[test]
    fn collect_preserves_in_range_values() {
        let form = RecordForm {
            sbp: 142,
            ldl: 6.21,
            adiposity: 30.5,
            famhist: FamilyHistory::Absent,
            obesity: 27.3,
            age: 61,
        };
        let record = form.collect();
        assert_eq!(record.sbp.get(), 142);
        assert_eq!(record.ldl, 6.21);
        assert_eq!(record.famhist, FamilyHistory::Absent);
        assert_eq!(record.age.get(), 61);
    }

    #[test]
    fn collect_clamps_bounded_fields() {
        let form = RecordForm {
            sbp: 79,
            age: 251,
            ..RecordForm::default()
        };
        let record = form.collect();
        assert_eq!(record.sbp.get(), 80);
        assert_eq!(record.age.get(), 100);

        let form = RecordForm {
            sbp: 251,
            age: 14,
            ..RecordForm::default()
        };
        let record = form.collect();
        assert_eq!(record.sbp.get(), 250);
        assert_eq!(record.age.get(), 15);
    }

    #[test]
    fn collect_accepts_exact_bounds() {
        let low = RecordForm {
            sbp: 80,
            age: 15,
            ..RecordForm::default()
        }
        .collect();
        assert_eq!(low.sbp.get(), 80);
        assert_eq!(low.age.get(), 15);

        let high = RecordForm {
            sbp: 250,
            age: 100,
            ..RecordForm::default()
        }
        .collect();
        assert_eq!(high.sbp.get(), 250);
        assert_eq!(high.age.get(), 100);
    }

    #[test]
    fn feature_lookup_by_schema_name() {
        let record = ClinicalRecord::default();
        assert_eq!(record.feature("sbp"), Some(130.0));
        assert_eq!(record.feature("famhist"), Some(1.0));
        assert_eq!(record.feature("age"), Some(45.0));
        assert_eq!(record.feature("cholesterol"), None);
    }

    #[test]
    fn feature_row_follows_schema_order() {
        let record = ClinicalRecord::default();
        assert_eq!(record.feature_row(), [130.0, 4.0, 25.0, 1.0, 25.0, 45.0]);
    }

    #[test]
    fn record_serializes_with_schema_field_names() {
        let record = ClinicalRecord::default();
        let json = serde_json::to_value(&record).unwrap();
        for name in FEATURE_COLUMNS {
            assert!(json.get(name).is_some(), "missing field {name}");
        }
    }
}
