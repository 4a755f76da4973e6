//! Model Module - Classifier backends & registry
//!
//! Tách backend inference khỏi prediction dispatch.
//! Swap backend (linear export, ONNX Runtime) không ảnh hưởng schema.

pub mod inference;
pub mod linear;
pub mod loader;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod registry;

// Re-export common types
pub use inference::{label_from_float, ArtifactFormat, Classifier, ModelMetadata};
pub use linear::{LinearArtifact, LinearModel, Standardization};
pub use loader::sha256_hex;
#[cfg(feature = "onnx")]
pub use onnx::OnnxModel;
pub use registry::{LoadedModel, ModelRegistry, RegistryBuilder};
