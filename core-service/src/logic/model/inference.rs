//! Inference Engine - Classifier abstraction
//!
//! Every backend (linear export, ONNX Runtime) implements `Classifier`.
//! Models are immutable after load, so a classifier is shared read-only
//! across requests and must be `Send + Sync`.

use serde::{Deserialize, Serialize};

use crate::error::InferenceError;
use crate::logic::disease::DiseaseId;
use crate::logic::features::FeatureVector;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Serialization format of a model artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactFormat {
    /// JSON export of a linear decision function
    Linear,
    /// ONNX graph executed by ONNX Runtime
    Onnx,
    /// Classifier constructed in memory by the host
    InMemory,
}

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub disease: DiseaseId,
    /// Artifact path, or `<memory>`
    pub source: String,
    pub format: ArtifactFormat,
    /// Hex SHA-256 of the artifact bytes
    pub sha256: Option<String>,
    pub feature_count: usize,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

impl ModelMetadata {
    pub fn in_memory(disease: DiseaseId, feature_count: usize) -> Self {
        Self {
            disease,
            source: "<memory>".to_string(),
            format: ArtifactFormat::InMemory,
            sha256: None,
            feature_count,
            loaded_at: chrono::Utc::now(),
        }
    }
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Binary classifier over a fixed-length feature vector
pub trait Classifier: Send + Sync {
    /// Number of features the model consumes
    fn feature_count(&self) -> usize;

    /// Raw class label; well-behaved models return 0 or 1
    fn classify(&self, input: &FeatureVector) -> Result<i64, InferenceError>;
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn feature_count(&self) -> usize {
        (**self).feature_count()
    }

    fn classify(&self, input: &FeatureVector) -> Result<i64, InferenceError> {
        (**self).classify(input)
    }
}

/// Convert a float class label to an integer label.
///
/// Non-finite or fractional outputs are errors, never rounded.
pub fn label_from_float(value: f32) -> Result<i64, InferenceError> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(InferenceError(format!("expected an integral class label, got {}", value)));
    }
    Ok(value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_float() {
        assert_eq!(label_from_float(0.0), Ok(0));
        assert_eq!(label_from_float(1.0), Ok(1));
        assert_eq!(label_from_float(2.0), Ok(2));
    }

    #[test]
    fn test_label_from_float_rejects_scores() {
        assert!(label_from_float(f32::NAN).is_err());
        assert!(label_from_float(f32::INFINITY).is_err());
        assert!(label_from_float(0.51).is_err());
        assert!(label_from_float(-0.2).is_err());
    }
}
