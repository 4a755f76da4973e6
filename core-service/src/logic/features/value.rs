//! Raw Field Values - parse & validate user input
//!
//! Hosts hand over whatever the user typed (text) or already-typed numbers.
//! Nothing is coerced silently: a value either parses into the field's kind
//! or is rejected with a reason.

use serde::{Deserialize, Serialize};

use super::layout::{FeatureField, FieldKind};

/// A raw input value as collected by the presentation host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    /// null, booleans, arrays or objects; always rejected by `parse_value`
    Other(serde_json::Value),
}

impl FieldValue {
    /// Value as shown in error messages
    pub fn display(&self) -> String {
        match self {
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Other(v) => v.to_string(),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// Why a raw value was rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidValueReason {
    #[error("not a number")]
    NotNumeric,
    #[error("not a finite number")]
    NotFinite,
    #[error("expected an integer code")]
    NotInteger,
    #[error("expected one of {codes:?}")]
    OutOfRange { codes: &'static [i64] },
}

/// Parse a raw value according to the field's kind
pub fn parse_value(field: &FeatureField, raw: &FieldValue) -> Result<f64, InvalidValueReason> {
    let value = match raw {
        FieldValue::Number(n) => *n,
        FieldValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| InvalidValueReason::NotNumeric)?,
        FieldValue::Other(_) => return Err(InvalidValueReason::NotNumeric),
    };

    // "NaN" and "inf" parse successfully as f64
    if !value.is_finite() {
        return Err(InvalidValueReason::NotFinite);
    }

    match field.kind {
        FieldKind::Continuous => Ok(value),
        FieldKind::Coded { codes } => {
            if value.fract() != 0.0 {
                return Err(InvalidValueReason::NotInteger);
            }
            let code = value as i64;
            if codes.contains(&code) {
                Ok(value)
            } else {
                Err(InvalidValueReason::OutOfRange { codes })
            }
        }
    }
}
