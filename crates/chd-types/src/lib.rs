//! Validated clinical field types.
//!
//! These types guarantee their invariants at construction so that downstream
//! code (the record assembly and the risk evaluator) never has to re-check
//! ranges or enum membership.

/// Errors that can occur when creating validated clinical field types.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// A numeric value fell outside the declared clinical range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },
    /// A family-history value was not one of the accepted labels.
    #[error("family history must be \"Present\" or \"Absent\", got {0:?}")]
    UnknownFamilyHistory(String),
}

/// Systolic blood pressure in mmHg, guaranteed within [80, 250].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sbp(i64);

impl Sbp {
    pub const MIN: i64 = 80;
    pub const MAX: i64 = 250;

    /// Creates an `Sbp`, rejecting values outside the clinical range.
    pub fn new(value: i64) -> Result<Self, FieldError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(FieldError::OutOfRange {
                field: "sbp",
                min: Self::MIN,
                max: Self::MAX,
                value,
            });
        }
        Ok(Self(value))
    }

    /// Creates an `Sbp`, clamping out-of-range values to the nearest bound.
    ///
    /// Used at the input-collection boundary, where out-of-range entry is
    /// corrected rather than rejected.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

/// Age in whole years, guaranteed within [15, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age(i64);

impl Age {
    pub const MIN: i64 = 15;
    pub const MAX: i64 = 100;

    /// Creates an `Age`, rejecting values outside the supported range.
    pub fn new(value: i64) -> Result<Self, FieldError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(FieldError::OutOfRange {
                field: "age",
                min: Self::MIN,
                max: Self::MAX,
                value,
            });
        }
        Ok(Self(value))
    }

    /// Creates an `Age`, clamping out-of-range values to the nearest bound.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

/// Family history of heart disease.
///
/// Exactly two labels exist; no other value is constructible. The string
/// forms "Present"/"Absent" are the wire and display representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FamilyHistory {
    #[default]
    Present,
    Absent,
}

impl FamilyHistory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
        }
    }

    /// Numeric encoding used by the model: 1.0 for Present, 0.0 for Absent.
    pub fn encoded(&self) -> f64 {
        match self {
            Self::Present => 1.0,
            Self::Absent => 0.0,
        }
    }
}

impl std::str::FromStr for FamilyHistory {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Present" => Ok(Self::Present),
            "Absent" => Ok(Self::Absent),
            other => Err(FieldError::UnknownFamilyHistory(other.to_string())),
        }
    }
}

impl std::fmt::Display for FamilyHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl serde::Serialize for FamilyHistory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for FamilyHistory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl serde::Serialize for Sbp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Sbp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = i64::deserialize(deserializer)?;
        Sbp::new(v).map_err(serde::de::Error::custom)
    }
}

impl serde::Serialize for Age {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Age {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = i64::deserialize(deserializer)?;
        Age::new(v).map_err(serde::de::Error::custom)
    }
}
