//! Prediction Dispatcher
//!
//! validate → assemble → classify → label. Stateless; the registry it holds
//! is immutable, so one dispatcher can serve concurrent requests.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::PredictionError;
use crate::logic::disease::DiseaseId;
use crate::logic::features::{fields_for, parse_value, FeatureField, FeatureVector, FieldValue};
use crate::logic::model::ModelRegistry;
use super::labels::label_for;

// ============================================================================
// RESULT
// ============================================================================

/// Labeled outcome of one prediction request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub disease: DiseaseId,
    pub verdict: bool,
    pub label: String,
}

// ============================================================================
// DISPATCHER
// ============================================================================

#[derive(Debug, Clone)]
pub struct PredictionDispatcher {
    registry: Arc<ModelRegistry>,
}

impl PredictionDispatcher {
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Ordered input fields for a disease
    pub fn fields_for(&self, disease: DiseaseId) -> &'static [FeatureField] {
        fields_for(disease)
    }

    /// Validate named values, run the disease model and label the verdict
    pub fn predict(
        &self,
        disease: DiseaseId,
        named_values: &HashMap<String, FieldValue>,
    ) -> Result<PredictionResult, PredictionError> {
        let vector = assemble(disease, named_values).map_err(|e| {
            log::warn!("Rejected {} input: {}", disease, e);
            e
        })?;
        self.classify(&vector)
    }

    /// Run the disease model over an already assembled vector
    pub fn classify(&self, vector: &FeatureVector) -> Result<PredictionResult, PredictionError> {
        let start_time = std::time::Instant::now();
        let disease = vector.disease;
        let classifier = self.registry.get(disease);

        vector.validate().map_err(|e| {
            log::error!("{} vector rejected: {}", disease, e);
            PredictionError::SchemaMismatch {
                disease,
                detail: e.to_string(),
            }
        })?;

        if classifier.feature_count() != vector.len() {
            let err = PredictionError::SchemaMismatch {
                disease,
                detail: format!(
                    "model expects {} features, vector has {}",
                    classifier.feature_count(),
                    vector.len()
                ),
            };
            log::error!("{}", err);
            return Err(err);
        }

        log::debug!("{} input: {}", disease, vector.to_log_entry());

        let raw = classifier.classify(vector).map_err(|source| {
            log::error!("{} inference failed: {}", disease, source);
            PredictionError::ModelInference { disease, source }
        })?;

        let verdict = match raw {
            0 => false,
            1 => true,
            other => {
                log::error!("{} model returned non-binary label {}", disease, other);
                return Err(PredictionError::ModelInference {
                    disease,
                    source: crate::error::InferenceError(format!("expected label 0 or 1, got {}", other)),
                });
            }
        };

        log::debug!(
            "{} prediction: verdict={} ({}us)",
            disease,
            verdict,
            start_time.elapsed().as_micros()
        );

        Ok(PredictionResult {
            disease,
            verdict,
            label: label_for(disease, verdict).to_string(),
        })
    }
}

// ============================================================================
// VALIDATION & ASSEMBLY
// ============================================================================

/// Parse named values and place them in schema order
pub fn assemble(
    disease: DiseaseId,
    named_values: &HashMap<String, FieldValue>,
) -> Result<FeatureVector, PredictionError> {
    let fields = fields_for(disease);
    let mut slots: Vec<Option<f64>> = vec![None; fields.len()];

    // Presence is checked for every field before any value is parsed
    if let Some(missing) = fields.iter().find(|f| !named_values.contains_key(f.name)) {
        return Err(PredictionError::MissingField {
            disease,
            field: missing.name,
        });
    }

    for field in fields {
        let Some(raw) = named_values.get(field.name) else {
            continue;
        };

        let value = parse_value(field, raw).map_err(|reason| PredictionError::InvalidValue {
            disease,
            field: field.name,
            value: raw.display(),
            reason,
        })?;

        slots[field.index] = Some(value);
    }

    // Sorted so the reported name does not depend on map order
    let mut unknown: Vec<&String> = named_values
        .keys()
        .filter(|name| !fields.iter().any(|f| f.name == name.as_str()))
        .collect();
    unknown.sort();
    if let Some(name) = unknown.first() {
        return Err(PredictionError::UnknownField {
            disease,
            field: name.to_string(),
        });
    }

    FeatureVector::from_slots(disease, slots).map_err(|e| {
        log::error!("Vector assembly failed: {}", e);
        PredictionError::SchemaMismatch {
            disease,
            detail: e.to_string(),
        }
    })
}

// ============================================================================
// TESTS
// ============================================================================
