//! HTTP handlers

pub mod health;
pub mod diseases;
pub mod predict;

use diagnosis_core::DiseaseId;

use crate::{AppError, AppResult};

/// Resolve the `:disease` path segment
pub(crate) fn parse_disease(raw: &str) -> AppResult<DiseaseId> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("Unknown disease: {}", raw)))
}
