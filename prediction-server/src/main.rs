//! Disease Prediction Server
//!
//! HTTP presentation host for the disease prediction core.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  PREDICTION SERVER                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────────┐  ┌─────────────────┐   │
//! │  │  API      │  │  Prediction      │  │  Model          │   │
//! │  │  (Axum)   │─▶│  Dispatcher      │─▶│  Registry       │   │
//! │  └───────────┘  └──────────────────┘  └────────┬────────┘   │
//! │                                                ▼            │
//! │                                   ┌───────────────────────┐ │
//! │                                   │ model artifacts (fs)  │ │
//! │                                   └───────────────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod error;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use diagnosis_core::{ModelRegistry, PredictionDispatcher};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

const DEFAULT_LOG_FILTER: &str = "prediction_server=debug,diagnosis_core=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    let json_logs = config.is_production();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!("Disease Prediction Server starting ({})...", config.environment);

    // Load every model before accepting requests
    let registry = match ModelRegistry::load_all(&config.models) {
        Ok(registry) => registry,
        Err(e) => {
            tracing::error!("Model loading failed: {}", e);
            return Err(e).context("refusing to serve predictions without all models");
        }
    };

    // Build application state
    let state = AppState {
        dispatcher: PredictionDispatcher::new(Arc::new(registry)),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.host, config.port);
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: PredictionDispatcher,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/diseases", get(handlers::diseases::list))
        .route("/api/v1/diseases/:disease/fields", get(handlers::diseases::fields))
        .route("/api/v1/diseases/:disease/model", get(handlers::diseases::model))
        .route("/api/v1/diseases/:disease/predict", post(handlers::predict::predict))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use diagnosis_core::{fields_for, DiseaseId, LinearModel, RegistryConfig};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    /// Positive iff `field` exceeds `threshold`
    fn threshold_model(disease: DiseaseId, field: &str, threshold: f64) -> LinearModel {
        let mut coefficients = vec![0.0; fields_for(disease).len()];
        let index = fields_for(disease).iter().position(|f| f.name == field).unwrap();
        coefficients[index] = 1.0;
        LinearModel::new(coefficients, -threshold)
    }

    fn test_app() -> Router {
        let registry = ModelRegistry::builder()
            .with_classifier(DiseaseId::Parkinsons, threshold_model(DiseaseId::Parkinsons, "spread1", -5.0))
            .with_classifier(DiseaseId::HeartDisease, threshold_model(DiseaseId::HeartDisease, "cp", 2.5))
            .with_classifier(DiseaseId::LungCancer, threshold_model(DiseaseId::LungCancer, "smoke", 0.5))
            .build()
            .unwrap();

        let config = config::Config {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            models: RegistryConfig::default(),
            environment: "test".to_string(),
        };

        create_router(AppState {
            dispatcher: PredictionDispatcher::new(Arc::new(registry)),
            config,
        })
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = test_app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn predict_request(disease: &str, values: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/api/v1/diseases/{}/predict", disease))
            .header("content-type", "application/json")
            .body(Body::from(json!({ "values": values }).to_string()))
            .unwrap()
    }

    fn heart_values() -> Value {
        json!({
            "age": 63, "sex": 1, "cp": 3, "trestbps": 145, "chol": 233, "fbs": 1,
            "restecg": 0, "thalach": 150, "exang": 0, "oldpeak": 2.3, "slope": 0,
            "ca": 0, "thal": 1
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["environment"], "test");
        assert_eq!(body["version"], diagnosis_core::constants::APP_VERSION);
    }

    #[tokio::test]
    async fn test_list_diseases() {
        let (status, body) = send(get_request("/api/v1/diseases")).await;
        assert_eq!(status, StatusCode::OK);

        let ids: Vec<&str> = body.as_array().unwrap().iter().map(|d| d["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["parkinsons", "heart_disease", "lung_cancer"]);
        assert_eq!(body[0]["field_count"], 22);
    }

    #[tokio::test]
    async fn test_fields() {
        let (status, body) = send(get_request("/api/v1/diseases/lung_cancer/fields")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fields"].as_array().unwrap().len(), 15);
        assert_eq!(body["fields"][0]["name"], "age");
        assert_eq!(body["fields"][2]["kind"]["codes"], json!([0, 1]));
        assert_eq!(body["layout"]["feature_count"], 15);
    }

    #[tokio::test]
    async fn test_unknown_disease_is_404() {
        let (status, body) = send(get_request("/api/v1/diseases/diabetes/fields")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], 404);

        let (status, _) = send(predict_request("diabetes", json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_model_metadata() {
        let (status, body) = send(get_request("/api/v1/diseases/heart_disease/model")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["format"], "in_memory");
        assert_eq!(body["feature_count"], 13);
    }

    #[tokio::test]
    async fn test_predict_heart_disease() {
        let (status, body) = send(predict_request("heart_disease", heart_values())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["disease"], "heart_disease");
        assert_eq!(body["verdict"], true);
        assert_eq!(body["label"], "The person has heart disease");
    }

    #[tokio::test]
    async fn test_predict_accepts_text_values() {
        let mut values = json!({});
        for field in fields_for(DiseaseId::LungCancer) {
            values[field.name] = json!("0");
        }
        values["age"] = json!(" 45 ");

        let (status, body) = send(predict_request("lung_cancer", values)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["verdict"], false);
        assert_eq!(body["label"], "The person does not have lung cancer");
    }

    #[tokio::test]
    async fn test_predict_missing_field() {
        let mut values = heart_values();
        values.as_object_mut().unwrap().remove("thal");

        let (status, body) = send(predict_request("heart_disease", values)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["kind"], "missing_field");
        assert!(body["error"].as_str().unwrap().contains("thal"));
    }

    #[tokio::test]
    async fn test_predict_invalid_code() {
        let mut values = heart_values();
        values["sex"] = json!(2);

        let (status, body) = send(predict_request("heart_disease", values)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["kind"], "invalid_value");
    }

    #[tokio::test]
    async fn test_predict_null_value_is_invalid() {
        let mut values = heart_values();
        values["chol"] = Value::Null;

        let (status, body) = send(predict_request("heart_disease", values)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["kind"], "invalid_value");
        assert!(body["error"].as_str().unwrap().contains("chol"));
    }

    #[tokio::test]
    async fn test_predict_malformed_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/diseases/heart_disease/predict")
            .header("content-type", "application/json")
            .body(Body::from("{ \"values\": "))
            .unwrap();

        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
    }
}
