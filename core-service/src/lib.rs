//! Disease Prediction - Core Service
//!
//! Maps (disease, named clinical values) to a labeled binary verdict using
//! pre-trained classifiers loaded once at startup.
//!
//! ```ignore
//! use std::sync::Arc;
//! use diagnosis_core::{DiseaseId, ModelRegistry, PredictionDispatcher, RegistryConfig};
//!
//! let registry = ModelRegistry::load_all(&RegistryConfig::from_env())?;
//! let dispatcher = PredictionDispatcher::new(Arc::new(registry));
//! let result = dispatcher.predict(DiseaseId::HeartDisease, &values)?;
//! println!("{}", result.label);
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod logic;

pub use config::{ModelSource, RegistryConfig};
pub use error::{ErrorKind, InferenceError, ModelLoadError, PredictionError};
pub use logic::disease::{DiseaseId, UnknownDiseaseError};
pub use logic::features::{
    fields_for, FeatureField, FeatureVector, FieldKind, FieldValue, InvalidValueReason, LayoutInfo,
};
pub use logic::model::{ArtifactFormat, Classifier, LinearModel, LoadedModel, ModelMetadata, ModelRegistry};
pub use logic::predict::{PredictionDispatcher, PredictionResult};
