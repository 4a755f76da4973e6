//! Central Configuration Constants
//!
//! Single source of truth for model locations and their environment
//! variable names.

use crate::logic::disease::DiseaseId;

/// Directory searched for model artifacts when no path is configured
pub const DEFAULT_MODEL_DIR: &str = "models";

/// Crate version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default artifact file name for a disease
pub fn default_model_file(disease: DiseaseId) -> &'static str {
    match disease {
        DiseaseId::Parkinsons => "parkinsons_model.json",
        DiseaseId::HeartDisease => "heart_disease_model.json",
        DiseaseId::LungCancer => "lung_cancer_model.json",
    }
}

/// Environment variable holding the artifact path
pub fn model_path_env(disease: DiseaseId) -> &'static str {
    match disease {
        DiseaseId::Parkinsons => "PARKINSONS_MODEL_PATH",
        DiseaseId::HeartDisease => "HEART_DISEASE_MODEL_PATH",
        DiseaseId::LungCancer => "LUNG_CANCER_MODEL_PATH",
    }
}

/// Environment variable holding the expected artifact SHA-256
pub fn model_sha256_env(disease: DiseaseId) -> &'static str {
    match disease {
        DiseaseId::Parkinsons => "PARKINSONS_MODEL_SHA256",
        DiseaseId::HeartDisease => "HEART_DISEASE_MODEL_SHA256",
        DiseaseId::LungCancer => "LUNG_CANCER_MODEL_SHA256",
    }
}
