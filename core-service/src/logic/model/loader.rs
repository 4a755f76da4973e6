//! Model Loader - artifact file → classifier
//!
//! Reads the artifact once, checks its digest, picks the backend from the
//! file extension and verifies the model matches the disease schema.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::config::ModelSource;
use crate::error::ModelLoadError;
use crate::logic::disease::DiseaseId;
use crate::logic::features::layout::{feature_count, validate_layout};
use super::inference::{ArtifactFormat, Classifier, ModelMetadata};
use super::linear::{LinearArtifact, LinearModel, LINEAR_FORMAT};
use super::registry::LoadedModel;

/// Hex SHA-256 of a byte slice
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Load one model artifact for `disease`
pub fn load(disease: DiseaseId, source: &ModelSource) -> Result<LoadedModel, ModelLoadError> {
    let path = source.path.as_path();
    log::info!("Loading {} model from: {}", disease, path.display());

    if !path.exists() {
        return Err(ModelLoadError::NotFound {
            disease,
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path).map_err(|source| ModelLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let digest = sha256_hex(&bytes);
    if let Some(expected) = &source.sha256 {
        if !expected.trim().eq_ignore_ascii_case(&digest) {
            return Err(ModelLoadError::ChecksumMismatch {
                path: path.to_path_buf(),
                expected: expected.trim().to_ascii_lowercase(),
                actual: digest,
            });
        }
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let (classifier, format): (Box<dyn Classifier>, ArtifactFormat) = match extension.as_deref() {
        Some("json") => {
            let model = load_linear(disease, path, &bytes)?;
            (Box::new(model) as Box<dyn Classifier>, ArtifactFormat::Linear)
        }
        Some("onnx") => (load_onnx(disease, path, &bytes)?, ArtifactFormat::Onnx),
        other => {
            return Err(ModelLoadError::Unsupported {
                path: path.to_path_buf(),
                reason: format!("unknown artifact extension {:?}", other.unwrap_or("")),
            })
        }
    };

    let expected = feature_count(disease);
    if classifier.feature_count() != expected {
        return Err(ModelLoadError::Malformed {
            path: path.to_path_buf(),
            reason: format!(
                "model expects {} features, {} schema has {}",
                classifier.feature_count(),
                disease,
                expected
            ),
        });
    }

    let metadata = ModelMetadata {
        disease,
        source: path.display().to_string(),
        format,
        sha256: Some(digest),
        feature_count: expected,
        loaded_at: chrono::Utc::now(),
    };

    log::info!(
        "{} model loaded ({:?}, {} features, sha256 {})",
        disease,
        format,
        expected,
        metadata.sha256.as_deref().unwrap_or("-")
    );

    Ok(LoadedModel::new(metadata, classifier))
}

fn load_linear(disease: DiseaseId, path: &Path, bytes: &[u8]) -> Result<LinearModel, ModelLoadError> {
    let artifact: LinearArtifact = serde_json::from_slice(bytes).map_err(|e| ModelLoadError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if artifact.format != LINEAR_FORMAT {
        return Err(ModelLoadError::Unsupported {
            path: path.to_path_buf(),
            reason: format!("unknown JSON model format {:?}", artifact.format),
        });
    }

    if let Some(found) = artifact.disease {
        if found != disease {
            return Err(ModelLoadError::DiseaseMismatch {
                path: path.to_path_buf(),
                expected: disease,
                found,
            });
        }
    }

    if let Some(hash) = artifact.layout_hash {
        validate_layout(disease, hash).map_err(|source| ModelLoadError::LayoutMismatch {
            path: path.to_path_buf(),
            source,
        })?;
    }

    LinearModel::from_artifact(artifact).map_err(|reason| ModelLoadError::Malformed {
        path: path.to_path_buf(),
        reason,
    })
}

#[cfg(feature = "onnx")]
fn load_onnx(disease: DiseaseId, path: &Path, bytes: &[u8]) -> Result<Box<dyn Classifier>, ModelLoadError> {
    let model = super::onnx::OnnxModel::from_bytes(bytes, feature_count(disease)).map_err(|reason| {
        ModelLoadError::Malformed {
            path: path.to_path_buf(),
            reason,
        }
    })?;
    Ok(Box::new(model))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(_disease: DiseaseId, path: &Path, _bytes: &[u8]) -> Result<Box<dyn Classifier>, ModelLoadError> {
    Err(ModelLoadError::Unsupported {
        path: path.to_path_buf(),
        reason: "built without the `onnx` feature".to_string(),
    })
}

// ============================================================================
// TESTS
// ============================================================================
