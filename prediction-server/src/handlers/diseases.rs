//! Disease catalogue handlers

use axum::{extract::{Path, State}, Json};
use diagnosis_core::{DiseaseId, ModelMetadata};

use crate::{AppState, AppResult};
use crate::models::{DiseaseSummary, FieldsResponse};
use super::parse_disease;

/// List supported diseases
pub async fn list() -> Json<Vec<DiseaseSummary>> {
    Json(DiseaseId::ALL.into_iter().map(DiseaseSummary::new).collect())
}

/// Ordered input fields for a disease
pub async fn fields(Path(disease): Path<String>) -> AppResult<Json<FieldsResponse>> {
    let disease = parse_disease(&disease)?;
    Ok(Json(FieldsResponse::new(disease)))
}

/// Metadata of the loaded model
pub async fn model(
    State(state): State<AppState>,
    Path(disease): Path<String>,
) -> AppResult<Json<ModelMetadata>> {
    let disease = parse_disease(&disease)?;
    Ok(Json(state.dispatcher.registry().metadata(disease).clone()))
}
