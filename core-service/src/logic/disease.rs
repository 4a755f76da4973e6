//! Disease Identifier
//!
//! Closed set of prediction targets. Every schema, label and model lookup is
//! keyed by `DiseaseId`, so a lookup can never miss.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// DISEASE ID
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiseaseId {
    Parkinsons,
    HeartDisease,
    LungCancer,
}

impl DiseaseId {
    /// All supported diseases, in menu order
    pub const ALL: [DiseaseId; 3] = [
        DiseaseId::Parkinsons,
        DiseaseId::HeartDisease,
        DiseaseId::LungCancer,
    ];

    /// Stable wire name (`parkinsons`, `heart_disease`, `lung_cancer`)
    pub fn as_str(&self) -> &'static str {
        match self {
            DiseaseId::Parkinsons => "parkinsons",
            DiseaseId::HeartDisease => "heart_disease",
            DiseaseId::LungCancer => "lung_cancer",
        }
    }

    /// Human readable title for menus and page headers
    pub fn title(&self) -> &'static str {
        match self {
            DiseaseId::Parkinsons => "Parkinson's Disease Prediction",
            DiseaseId::HeartDisease => "Heart Disease Prediction",
            DiseaseId::LungCancer => "Lung Cancer Prediction",
        }
    }

    /// Position in `ALL`, used for fixed-size per-disease tables
    pub(crate) fn index(&self) -> usize {
        match self {
            DiseaseId::Parkinsons => 0,
            DiseaseId::HeartDisease => 1,
            DiseaseId::LungCancer => 2,
        }
    }
}

impl fmt::Display for DiseaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown disease name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown disease: {0}")]
pub struct UnknownDiseaseError(pub String);

impl FromStr for DiseaseId {
    type Err = UnknownDiseaseError;

    /// Accepts the wire name, case-insensitive, with `-` or `_` separators
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        DiseaseId::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == normalized)
            .ok_or_else(|| UnknownDiseaseError(s.to_string()))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, disease) in DiseaseId::ALL.iter().enumerate() {
            assert_eq!(disease.index(), i);
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("parkinsons".parse::<DiseaseId>(), Ok(DiseaseId::Parkinsons));
        assert_eq!("Heart-Disease".parse::<DiseaseId>(), Ok(DiseaseId::HeartDisease));
        assert_eq!(" lung_cancer ".parse::<DiseaseId>(), Ok(DiseaseId::LungCancer));
        assert!("diabetes".parse::<DiseaseId>().is_err());
    }

    #[test]
    fn test_serde_wire_names() {
        let json = serde_json::to_string(&DiseaseId::HeartDisease).unwrap();
        assert_eq!(json, "\"heart_disease\"");

        let parsed: DiseaseId = serde_json::from_str("\"lung_cancer\"").unwrap();
        assert_eq!(parsed, DiseaseId::LungCancer);
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for disease in DiseaseId::ALL {
            assert_eq!(disease.to_string().parse::<DiseaseId>(), Ok(disease));
        }
    }
}
