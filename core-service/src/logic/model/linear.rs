//! Linear Model - JSON export of a linear decision function
//!
//! Covers logistic regression and linear-kernel SVM exports:
//! `predict = 1 if w · z + b > 0 else 0`, where `z` is the input after the
//! optional standard scaling `(x - mean) / scale` fitted at training time.

use serde::{Deserialize, Serialize};

use crate::error::InferenceError;
use crate::logic::disease::DiseaseId;
use crate::logic::features::FeatureVector;
use super::inference::Classifier;

/// Value of the `format` field in a linear artifact
pub const LINEAR_FORMAT: &str = "linear";

// ============================================================================
// ARTIFACT
// ============================================================================

/// Standard scaling parameters from training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standardization {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// On-disk representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearArtifact {
    pub format: String,
    #[serde(default)]
    pub disease: Option<DiseaseId>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub standardize: Option<Standardization>,
    /// CRC32 of the feature layout the model was exported against
    #[serde(default)]
    pub layout_hash: Option<u32>,
}

// ============================================================================
// MODEL
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    coefficients: Vec<f64>,
    intercept: f64,
    standardize: Option<Standardization>,
}

impl LinearModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
            standardize: None,
        }
    }

    pub fn with_standardization(mut self, mean: Vec<f64>, scale: Vec<f64>) -> Self {
        self.standardize = Some(Standardization { mean, scale });
        self
    }

    /// Validate an artifact and build the model. Returns the reason on failure.
    pub fn from_artifact(artifact: LinearArtifact) -> Result<Self, String> {
        let n = artifact.coefficients.len();
        if n == 0 {
            return Err("no coefficients".to_string());
        }
        if !artifact.intercept.is_finite() || artifact.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("coefficients must be finite".to_string());
        }

        if let Some(scaling) = &artifact.standardize {
            if scaling.mean.len() != n || scaling.scale.len() != n {
                return Err(format!(
                    "standardize has {} means and {} scales, expected {}",
                    scaling.mean.len(),
                    scaling.scale.len(),
                    n
                ));
            }
            if scaling.mean.iter().any(|m| !m.is_finite()) {
                return Err("standardize means must be finite".to_string());
            }
            if scaling.scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
                return Err("standardize scales must be finite and non-zero".to_string());
            }
        }

        Ok(Self {
            coefficients: artifact.coefficients,
            intercept: artifact.intercept,
            standardize: artifact.standardize,
        })
    }

    /// Signed distance to the decision boundary
    pub fn decision_function(&self, x: &[f64]) -> f64 {
        let dot: f64 = match &self.standardize {
            Some(s) => x
                .iter()
                .zip(&self.coefficients)
                .zip(s.mean.iter().zip(&s.scale))
                .map(|((v, w), (mean, scale))| w * (v - mean) / scale)
                .sum(),
            None => x.iter().zip(&self.coefficients).map(|(v, w)| w * v).sum(),
        };
        dot + self.intercept
    }
}

impl Classifier for LinearModel {
    fn feature_count(&self) -> usize {
        self.coefficients.len()
    }

    fn classify(&self, input: &FeatureVector) -> Result<i64, InferenceError> {
        let x = input.as_slice();
        if x.len() != self.coefficients.len() {
            return Err(InferenceError(format!(
                "expected {} features, got {}",
                self.coefficients.len(),
                x.len()
            )));
        }

        let score = self.decision_function(x);
        if !score.is_finite() {
            return Err(InferenceError(format!("non-finite decision score {}", score)));
        }

        Ok(if score > 0.0 { 1 } else { 0 })
    }
}

// ============================================================================
// TESTS
// ============================================================================
