//! Configuration module
//!
//! Where each disease model lives. Paths come from the environment with a
//! fallback under `models/`; nothing is hardcoded at the call sites.

use std::path::{Path, PathBuf};

use crate::constants::{default_model_file, model_path_env, model_sha256_env, DEFAULT_MODEL_DIR};
use crate::logic::disease::DiseaseId;

/// Location (and optional expected digest) of one model artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSource {
    pub path: PathBuf,
    /// Expected hex SHA-256 of the artifact bytes
    pub sha256: Option<String>,
}

impl ModelSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sha256: None,
        }
    }

    pub fn with_sha256(mut self, digest: impl Into<String>) -> Self {
        self.sha256 = Some(digest.into());
        self
    }
}

/// Model locations for every disease
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    pub parkinsons: ModelSource,
    pub heart_disease: ModelSource,
    pub lung_cancer: ModelSource,
}

impl RegistryConfig {
    pub fn new(parkinsons: ModelSource, heart_disease: ModelSource, lung_cancer: ModelSource) -> Self {
        Self {
            parkinsons,
            heart_disease,
            lung_cancer,
        }
    }

    /// Default file names under `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let source = |d: DiseaseId| ModelSource::new(dir.join(default_model_file(d)));
        Self::new(
            source(DiseaseId::Parkinsons),
            source(DiseaseId::HeartDisease),
            source(DiseaseId::LungCancer),
        )
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = |disease: DiseaseId| {
            let path = lookup(model_path_env(disease))
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| Path::new(DEFAULT_MODEL_DIR).join(default_model_file(disease)));

            ModelSource {
                path,
                sha256: lookup(model_sha256_env(disease)).filter(|s| !s.trim().is_empty()),
            }
        };

        Self::new(
            source(DiseaseId::Parkinsons),
            source(DiseaseId::HeartDisease),
            source(DiseaseId::LungCancer),
        )
    }

    pub fn source(&self, disease: DiseaseId) -> &ModelSource {
        match disease {
            DiseaseId::Parkinsons => &self.parkinsons,
            DiseaseId::HeartDisease => &self.heart_disease,
            DiseaseId::LungCancer => &self.lung_cancer,
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::in_dir(DEFAULT_MODEL_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = RegistryConfig::from_lookup(|_| None);
        assert_eq!(config, RegistryConfig::default());
        assert_eq!(
            config.source(DiseaseId::HeartDisease).path,
            Path::new("models").join("heart_disease_model.json")
        );
        assert!(config.parkinsons.sha256.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("LUNG_CANCER_MODEL_PATH", "/srv/models/lung.onnx"),
            ("LUNG_CANCER_MODEL_SHA256", "abcd"),
            ("PARKINSONS_MODEL_PATH", "  "),
        ]);
        let config = RegistryConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.lung_cancer.path, PathBuf::from("/srv/models/lung.onnx"));
        assert_eq!(config.lung_cancer.sha256.as_deref(), Some("abcd"));
        // Blank values fall back to the default
        assert_eq!(
            config.parkinsons.path,
            Path::new("models").join("parkinsons_model.json")
        );
    }

    #[test]
    fn test_in_dir() {
        let config = RegistryConfig::in_dir("/opt/diagnosis");
        assert_eq!(
            config.source(DiseaseId::LungCancer).path,
            PathBuf::from("/opt/diagnosis/lung_cancer_model.json")
        );
    }
}
