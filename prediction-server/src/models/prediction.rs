//! Prediction models

use std::collections::HashMap;

use diagnosis_core::FieldValue;
use serde::Deserialize;

/// Body of `POST /api/v1/diseases/:disease/predict`
///
/// Values may be JSON numbers or strings as typed by the user.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub values: HashMap<String, FieldValue>,
}
