//! Feature Vector - Core data structure for model input
//!
//! **Layout-checked feature vector**
//!
//! A vector is only constructible with exactly one value per schema field,
//! and remembers the disease and layout hash it was assembled against.

use serde::Serialize;

use crate::logic::disease::DiseaseId;
use super::layout::{feature_count, fields_for, layout_hash, validate_layout, LayoutMismatchError};

// ============================================================================
// ASSEMBLY ERROR
// ============================================================================

/// Vector does not line up with the schema (programming defect, not user error)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VectorError {
    #[error("{disease} expects {expected} features, got {actual}")]
    LengthMismatch {
        disease: DiseaseId,
        expected: usize,
        actual: usize,
    },
    #[error("{disease} feature `{field}` (index {index}) was never set")]
    Unset {
        disease: DiseaseId,
        field: &'static str,
        index: usize,
    },
}

// ============================================================================
// FEATURE VECTOR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    pub disease: DiseaseId,
    /// CRC32 hash of the layout the values follow
    pub layout_hash: u32,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Build from fully ordered values
    pub fn from_values(disease: DiseaseId, values: Vec<f64>) -> Result<Self, VectorError> {
        let expected = feature_count(disease);
        if values.len() != expected {
            return Err(VectorError::LengthMismatch {
                disease,
                expected,
                actual: values.len(),
            });
        }

        Ok(Self {
            disease,
            layout_hash: layout_hash(disease),
            values,
        })
    }

    /// Build from per-index slots; every slot must be filled
    pub fn from_slots(disease: DiseaseId, slots: Vec<Option<f64>>) -> Result<Self, VectorError> {
        let fields = fields_for(disease);
        if slots.len() != fields.len() {
            return Err(VectorError::LengthMismatch {
                disease,
                expected: fields.len(),
                actual: slots.len(),
            });
        }

        let mut values = Vec::with_capacity(slots.len());
        for (field, slot) in fields.iter().zip(slots) {
            match slot {
                Some(v) => values.push(v),
                None => {
                    return Err(VectorError::Unset {
                        disease,
                        field: field.name,
                        index: field.index,
                    })
                }
            }
        }

        Self::from_values(disease, values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Validate that this vector is compatible with the current layout
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.disease, self.layout_hash)
    }

    /// Values as f32 for tensor backends
    pub fn to_f32(&self) -> Vec<f32> {
        self.values.iter().map(|v| *v as f32).collect()
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "disease": self.disease,
            "layout_hash": self.layout_hash,
            "values": self.values,
            "named_values": fields_for(self.disease).iter()
                .zip(self.values.iter())
                .map(|(field, value)| (field.name.to_string(), *value))
                .collect::<std::collections::BTreeMap<_, _>>(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
