//! Model Registry - one loaded classifier per disease
//!
//! Built once at startup and never mutated afterwards. A registry can only be
//! constructed when every disease has a model, so `get` is total.

use std::fmt;

use crate::config::{ModelSource, RegistryConfig};
use crate::error::ModelLoadError;
use crate::logic::disease::DiseaseId;
use super::inference::{Classifier, ModelMetadata};

// ============================================================================
// LOADED MODEL
// ============================================================================

/// A classifier together with where it came from
pub struct LoadedModel {
    pub metadata: ModelMetadata,
    classifier: Box<dyn Classifier>,
}

impl LoadedModel {
    pub fn new(metadata: ModelMetadata, classifier: Box<dyn Classifier>) -> Self {
        Self { metadata, classifier }
    }

    /// Wrap a classifier built by the host
    pub fn in_memory<C: Classifier + 'static>(disease: DiseaseId, classifier: C) -> Self {
        let metadata = ModelMetadata::in_memory(disease, classifier.feature_count());
        Self::new(metadata, Box::new(classifier))
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }
}

impl fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedModel")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

#[derive(Debug)]
pub struct ModelRegistry {
    /// Indexed by `DiseaseId::index()`
    models: Vec<LoadedModel>,
}

impl ModelRegistry {
    /// Load a single artifact
    pub fn load(disease: DiseaseId, source: &ModelSource) -> Result<LoadedModel, ModelLoadError> {
        super::loader::load(disease, source)
    }

    /// Load every configured artifact; the first failure aborts
    pub fn load_all(config: &RegistryConfig) -> Result<Self, ModelLoadError> {
        let mut builder = Self::builder();
        for disease in DiseaseId::ALL {
            builder = builder.with_model(Self::load(disease, config.source(disease))?);
        }

        let registry = builder.build()?;
        log::info!("Model registry ready ({} models)", registry.models.len());
        Ok(registry)
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Classifier for a disease
    pub fn get(&self, disease: DiseaseId) -> &dyn Classifier {
        self.models[disease.index()].classifier()
    }

    pub fn metadata(&self, disease: DiseaseId) -> &ModelMetadata {
        &self.models[disease.index()].metadata
    }
}

// ============================================================================
// BUILDER
// ============================================================================

#[derive(Default)]
pub struct RegistryBuilder {
    slots: [Option<LoadedModel>; 3],
}

impl RegistryBuilder {
    /// Register a model; replaces any previous model for the same disease
    pub fn with_model(mut self, model: LoadedModel) -> Self {
        let index = model.metadata.disease.index();
        self.slots[index] = Some(model);
        self
    }

    pub fn with_classifier<C: Classifier + 'static>(self, disease: DiseaseId, classifier: C) -> Self {
        self.with_model(LoadedModel::in_memory(disease, classifier))
    }

    pub fn build(self) -> Result<ModelRegistry, ModelLoadError> {
        let mut models = Vec::with_capacity(DiseaseId::ALL.len());
        for (disease, slot) in DiseaseId::ALL.into_iter().zip(self.slots) {
            models.push(slot.ok_or(ModelLoadError::NotConfigured(disease))?);
        }
        Ok(ModelRegistry { models })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::{feature_count, FeatureVector};
    use crate::logic::model::inference::ArtifactFormat;
    use crate::logic::model::LinearModel;
    use serde_json::json;
    use tempfile::TempDir;

    fn zero_model(disease: DiseaseId, intercept: f64) -> LinearModel {
        LinearModel::new(vec![0.0; feature_count(disease)], intercept)
    }

    #[test]
    fn test_builder_requires_every_disease() {
        let err = ModelRegistry::builder()
            .with_classifier(DiseaseId::Parkinsons, zero_model(DiseaseId::Parkinsons, 1.0))
            .with_classifier(DiseaseId::LungCancer, zero_model(DiseaseId::LungCancer, 1.0))
            .build()
            .unwrap_err();

        assert!(matches!(err, ModelLoadError::NotConfigured(DiseaseId::HeartDisease)));
    }

    #[test]
    fn test_get_returns_model_per_disease() {
        let registry = ModelRegistry::builder()
            .with_classifier(DiseaseId::Parkinsons, zero_model(DiseaseId::Parkinsons, 1.0))
            .with_classifier(DiseaseId::HeartDisease, zero_model(DiseaseId::HeartDisease, -1.0))
            .with_classifier(DiseaseId::LungCancer, zero_model(DiseaseId::LungCancer, 1.0))
            .build()
            .unwrap();

        for disease in DiseaseId::ALL {
            assert_eq!(registry.get(disease).feature_count(), feature_count(disease));
            assert_eq!(registry.metadata(disease).disease, disease);
            assert_eq!(registry.metadata(disease).format, ArtifactFormat::InMemory);
        }

        let heart = FeatureVector::from_values(DiseaseId::HeartDisease, vec![0.0; 13]).unwrap();
        assert_eq!(registry.get(DiseaseId::HeartDisease).classify(&heart), Ok(0));
    }

    #[test]
    fn test_load_all_from_dir() {
        let dir = TempDir::new().unwrap();
        for disease in DiseaseId::ALL {
            let artifact = json!({
                "format": "linear",
                "disease": disease,
                "coefficients": vec![0.0; feature_count(disease)],
                "intercept": 0.0,
            });
            let path = dir.path().join(crate::constants::default_model_file(disease));
            std::fs::write(path, artifact.to_string()).unwrap();
        }

        let registry = ModelRegistry::load_all(&RegistryConfig::in_dir(dir.path())).unwrap();
        for disease in DiseaseId::ALL {
            assert_eq!(registry.metadata(disease).format, ArtifactFormat::Linear);
            assert!(registry.metadata(disease).sha256.is_some());
        }
    }

    #[test]
    fn test_load_all_fails_on_missing_artifact() {
        let dir = TempDir::new().unwrap();
        let err = ModelRegistry::load_all(&RegistryConfig::in_dir(dir.path())).unwrap_err();
        assert!(matches!(err, ModelLoadError::NotFound { disease: DiseaseId::Parkinsons, .. }));
    }
}
