//! Predict Module - validate, assemble, classify, label

pub mod dispatcher;
pub mod labels;

pub use dispatcher::{assemble, PredictionDispatcher, PredictionResult};
pub use labels::label_for;
