//! ONNX Runtime backend
//!
//! Runs classifier graphs exported to ONNX (e.g. with skl2onnx). The input is
//! a `1 × N` float32 tensor and the first graph output carries the class label.
//! `Session::run` needs exclusive access, so the session sits behind a mutex.

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use crate::error::InferenceError;
use crate::logic::features::FeatureVector;
use super::inference::{label_from_float, Classifier};

pub struct OnnxModel {
    session: Mutex<Session>,
    output_name: String,
    feature_count: usize,
}

impl OnnxModel {
    /// Load an ONNX model from bytes. Returns the reason on failure.
    pub fn from_bytes(model_bytes: &[u8], feature_count: usize) -> Result<Self, String> {
        log::debug!("Loading ONNX model from memory ({} bytes)", model_bytes.len());

        let session = Session::builder()
            .map_err(|e| format!("session builder error: {}", e))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| format!("optimization error: {}", e))?
            .commit_from_memory(model_bytes)
            .map_err(|e| format!("load from memory error: {}", e))?;

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| "graph defines no output".to_string())?;

        Ok(Self {
            session: Mutex::new(session),
            output_name,
            feature_count,
        })
    }
}

impl Classifier for OnnxModel {
    fn feature_count(&self) -> usize {
        self.feature_count
    }

    fn classify(&self, input: &FeatureVector) -> Result<i64, InferenceError> {
        let input_array = Array2::<f32>::from_shape_vec((1, input.len()), input.to_f32())
            .map_err(|e| InferenceError(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| InferenceError("No output".to_string()))?;

        // skl2onnx emits int64 labels; some converters emit float labels
        if let Ok((_, labels)) = output.try_extract_tensor::<i64>() {
            return labels
                .first()
                .copied()
                .ok_or_else(|| InferenceError("Empty label tensor".to_string()));
        }

        let (_, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError(format!("Extract error: {}", e)))?;

        let label = data
            .first()
            .copied()
            .ok_or_else(|| InferenceError("Empty label tensor".to_string()))?;
        label_from_float(label)
    }
}
