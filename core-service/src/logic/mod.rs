//! Logic Module - Business Logic & Engines
//!
//! - `disease` - closed set of prediction targets
//! - `features/` - per-disease schema, value parsing, vector assembly
//! - `model/` - classifier backends (linear, ONNX) and the model registry
//! - `predict/` - prediction dispatch and verdict labels

pub mod disease;
pub mod features;
pub mod model;
pub mod predict;
