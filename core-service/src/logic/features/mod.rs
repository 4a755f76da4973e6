//! Features Module - Feature Schema & Vector Assembly
//!
//! Per-disease ordered field layouts, raw value parsing, and the
//! layout-checked vector handed to a model.

pub mod layout;
pub mod value;
pub mod vector;

// Re-export common types
pub use layout::{
    feature_count, fields_for, layout_hash, FeatureField, FieldKind, LayoutInfo,
    LayoutMismatchError, FEATURE_VERSION,
};
pub use value::{parse_value, FieldValue, InvalidValueReason};
pub use vector::{FeatureVector, VectorError};
