//! Prediction handler

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use diagnosis_core::PredictionResult;

use crate::{AppState, AppResult};
use crate::models::PredictRequest;
use super::parse_disease;

/// Run a prediction for one disease
pub async fn predict(
    State(state): State<AppState>,
    Path(disease): Path<String>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> AppResult<Json<PredictionResult>> {
    let disease = parse_disease(&disease)?;
    let Json(req) = body?;
    let result = state.dispatcher.predict(disease, &req.values)?;

    tracing::info!("Prediction for {}: verdict={}", disease, result.verdict);

    Ok(Json(result))
}
