//! Error handling
//!
//! `ModelLoadError` is startup-fatal. `PredictionError` is returned per
//! request; `kind()` tells hosts whether the user can fix it.

use std::path::PathBuf;

use serde::Serialize;

use crate::logic::disease::DiseaseId;
use crate::logic::features::{InvalidValueReason, LayoutMismatchError};

// ============================================================================
// MODEL LOADING
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("model artifact for {disease} not found: {}", .path.display())]
    NotFound { disease: DiseaseId, path: PathBuf },

    #[error("failed to read model artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed model artifact {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("unsupported model artifact {}: {reason}", .path.display())]
    Unsupported { path: PathBuf, reason: String },

    #[error("checksum mismatch for {}: expected {expected}, got {actual}", .path.display())]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("model artifact {} was exported for {found}, expected {expected}", .path.display())]
    DiseaseMismatch {
        path: PathBuf,
        expected: DiseaseId,
        found: DiseaseId,
    },

    #[error("model artifact {} has incompatible layout: {source}", .path.display())]
    LayoutMismatch {
        path: PathBuf,
        #[source]
        source: LayoutMismatchError,
    },

    #[error("no model configured for {0}")]
    NotConfigured(DiseaseId),
}

// ============================================================================
// INFERENCE
// ============================================================================

/// Failure raised by a classifier backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("InferenceError: {0}")]
pub struct InferenceError(pub String);

// ============================================================================
// PREDICTION
// ============================================================================

/// Coarse error category for hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingField,
    InvalidValue,
    UnknownField,
    SchemaMismatch,
    ModelInference,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MissingField => "missing_field",
            ErrorKind::InvalidValue => "invalid_value",
            ErrorKind::UnknownField => "unknown_field",
            ErrorKind::SchemaMismatch => "schema_mismatch",
            ErrorKind::ModelInference => "model_inference",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("missing field `{field}` for {disease}")]
    MissingField {
        disease: DiseaseId,
        field: &'static str,
    },

    #[error("invalid value {value:?} for field `{field}` ({disease}): {reason}")]
    InvalidValue {
        disease: DiseaseId,
        field: &'static str,
        value: String,
        reason: InvalidValueReason,
    },

    #[error("unknown field `{field}` for {disease}")]
    UnknownField { disease: DiseaseId, field: String },

    #[error("schema mismatch for {disease}: {detail}")]
    SchemaMismatch { disease: DiseaseId, detail: String },

    #[error("prediction unavailable for {disease}: {source}")]
    ModelInference {
        disease: DiseaseId,
        #[source]
        source: InferenceError,
    },
}

impl PredictionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PredictionError::MissingField { .. } => ErrorKind::MissingField,
            PredictionError::InvalidValue { .. } => ErrorKind::InvalidValue,
            PredictionError::UnknownField { .. } => ErrorKind::UnknownField,
            PredictionError::SchemaMismatch { .. } => ErrorKind::SchemaMismatch,
            PredictionError::ModelInference { .. } => ErrorKind::ModelInference,
        }
    }

    /// True when the cause is user data and can be corrected by the user
    pub fn is_user_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::MissingField | ErrorKind::InvalidValue | ErrorKind::UnknownField
        )
    }

    pub fn disease(&self) -> DiseaseId {
        match self {
            PredictionError::MissingField { disease, .. }
            | PredictionError::InvalidValue { disease, .. }
            | PredictionError::UnknownField { disease, .. }
            | PredictionError::SchemaMismatch { disease, .. }
            | PredictionError::ModelInference { disease, .. } => *disease,
        }
    }
}
