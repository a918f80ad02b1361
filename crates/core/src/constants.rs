//! Constants used throughout the CHD core crate.
//!
//! This module contains the record schema and default values in one place
//! so that the collector, the model boundary, and the tests stay consistent.

/// Feature columns in the exact order the model's pipeline expects.
///
/// The model indexes features by name, so both the names and the order are
/// part of the inference contract and must never change independently of a
/// retrained artifact.
pub const FEATURE_COLUMNS: [&str; 6] = ["sbp", "ldl", "adiposity", "famhist", "obesity", "age"];

/// Default model artifact path when no explicit path is configured.
pub const DEFAULT_MODEL_PATH: &str = "model/chd-model.json";

/// Default systolic blood pressure (mmHg) presented by the form.
pub const DEFAULT_SBP: i64 = 130;

/// Default LDL cholesterol presented by the form.
pub const DEFAULT_LDL: f64 = 4.0;

/// Default adiposity index presented by the form.
pub const DEFAULT_ADIPOSITY: f64 = 25.0;

/// Default obesity index presented by the form.
pub const DEFAULT_OBESITY: f64 = 25.0;

/// Default age (years) presented by the form.
pub const DEFAULT_AGE: i64 = 45;
