//! Feature Layout - Centralized Feature Schema per Disease
//!
//! **CRITICAL: This file controls the order of every model input vector**
//!
//! ## Rules (NEVER break these):
//! 1. Field order must match the column order the model was trained on
//! 2. Add, remove or reorder a field → increment FEATURE_VERSION
//! 3. `index` of every field must equal its position in the layout
//!
//! The layout hash (CRC32 over version + ordered names) lets a model artifact
//! declare which layout it was exported against.

use crc32fast::Hasher;
use serde::Serialize;

use crate::logic::disease::DiseaseId;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when any layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FIELD DEFINITION
// ============================================================================

/// Boolean-style clinical flag (0 = no/female, 1 = yes/male)
pub const BINARY_CODES: &[i64] = &[0, 1];
/// Ordinal code in 0..=2
pub const CODES_0_TO_2: &[i64] = &[0, 1, 2];
/// Ordinal code in 0..=3
pub const CODES_0_TO_3: &[i64] = &[0, 1, 2, 3];

/// Value kind of a feature field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Any finite floating-point measurement
    Continuous,
    /// Integer-coded categorical; value must be one of `codes`
    Coded { codes: &'static [i64] },
}

impl FieldKind {
    pub fn is_coded(&self) -> bool {
        matches!(self, FieldKind::Coded { .. })
    }
}

/// A single named input of a disease model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureField {
    /// Key used in `named_values`
    pub name: &'static str,
    /// Position in the feature vector
    pub index: usize,
    /// Display label
    pub label: &'static str,
    /// Tooltip text for the input
    pub help: &'static str,
    pub kind: FieldKind,
}

const fn continuous(index: usize, name: &'static str, label: &'static str, help: &'static str) -> FeatureField {
    FeatureField { name, index, label, help, kind: FieldKind::Continuous }
}

const fn coded(
    index: usize,
    name: &'static str,
    label: &'static str,
    help: &'static str,
    codes: &'static [i64],
) -> FeatureField {
    FeatureField { name, index, label, help, kind: FieldKind::Coded { codes } }
}

// ============================================================================
// FEATURE LAYOUTS (Authoritative source)
// ============================================================================

/// Parkinson's voice measurements (UCI Parkinsons dataset column order)
pub const PARKINSONS_LAYOUT: &[FeatureField] = &[
    // === Fundamental frequency (0-2) ===
    continuous(0, "fo", "MDVP:Fo(Hz)", "Fundamental frequency"),
    continuous(1, "fhi", "MDVP:Fhi(Hz)", "Highest fundamental frequency"),
    continuous(2, "flo", "MDVP:Flo(Hz)", "Lowest fundamental frequency"),

    // === Jitter (3-7) ===
    continuous(3, "jitter", "MDVP:Jitter(%)", "Jitter percentage"),
    continuous(4, "jitter_abs", "MDVP:Jitter(Abs)", "Absolute jitter"),
    continuous(5, "rap", "MDVP:RAP", "Relative amplitude perturbation"),
    continuous(6, "ppq", "MDVP:PPQ", "Pitch period perturbation quotient"),
    continuous(7, "ddp", "Jitter:DDP", "Divergence from DDP"),

    // === Shimmer (8-13) ===
    continuous(8, "shimmer", "MDVP:Shimmer", "Shimmer value"),
    continuous(9, "shimmer_db", "MDVP:Shimmer(dB)", "Shimmer in dB"),
    continuous(10, "apq3", "Shimmer:APQ3", "Three-point Amplitude Perturbation Quotient"),
    continuous(11, "apq5", "Shimmer:APQ5", "Five-point Amplitude Perturbation Quotient"),
    continuous(12, "apq", "MDVP:APQ", "MDVP Amplitude Perturbation Quotient"),
    continuous(13, "dda", "Shimmer:DDA", "Average absolute differences of differences"),

    // === Noise ratios (14-15) ===
    continuous(14, "nhr", "NHR", "Noise-to-Harmonics Ratio"),
    continuous(15, "hnr", "HNR", "Harmonics-to-Noise Ratio"),

    // === Nonlinear measures (16-21) ===
    continuous(16, "rpde", "RPDE", "Recurrence period density entropy"),
    continuous(17, "dfa", "DFA", "Detrended fluctuation analysis"),
    continuous(18, "spread1", "spread1", "First spread measure"),
    continuous(19, "spread2", "spread2", "Second spread measure"),
    continuous(20, "d2", "D2", "Correlation dimension"),
    continuous(21, "ppe", "PPE", "Pitch period entropy"),
];

/// Heart disease clinical record (Cleveland dataset column order)
pub const HEART_DISEASE_LAYOUT: &[FeatureField] = &[
    continuous(0, "age", "Age", "Enter age of the person"),
    coded(1, "sex", "Sex", "1 = male, 0 = female", BINARY_CODES),
    coded(2, "cp", "Chest Pain types", "Type (0-3)", CODES_0_TO_3),
    continuous(3, "trestbps", "Resting Blood Pressure", "Blood pressure"),
    continuous(4, "chol", "Serum Cholesterol", "mg/dl"),
    coded(5, "fbs", "Fasting Blood Sugar", ">120 mg/dl (1 = true, 0 = false)", BINARY_CODES),
    coded(6, "restecg", "Resting ECG", "ECG results (0-2)", CODES_0_TO_2),
    continuous(7, "thalach", "Max Heart Rate", "Achieved"),
    coded(8, "exang", "Exercise-Induced Angina", "1 = Yes, 0 = No", BINARY_CODES),
    continuous(9, "oldpeak", "Oldpeak", "ST depression"),
    coded(10, "slope", "Slope", "Slope value (0-2)", CODES_0_TO_2),
    coded(11, "ca", "Major Vessels", "Number (0-3)", CODES_0_TO_3),
    coded(12, "thal", "Thalassemia", "Type (0-3)", CODES_0_TO_3),
];

/// Lung cancer survey answers
pub const LUNG_CANCER_LAYOUT: &[FeatureField] = &[
    continuous(0, "age", "Age", "Enter age of the person"),
    coded(1, "gender", "Gender", "1 = Male, 0 = Female", BINARY_CODES),
    coded(2, "smoke", "Smoking", "1 = Yes, 0 = No", BINARY_CODES),
    coded(3, "yellow_fingers", "Yellow Fingers", "1 = Yes, 0 = No", BINARY_CODES),
    coded(4, "chest_pain", "Chest Pain", "1 = Yes, 0 = No", BINARY_CODES),
    coded(5, "anxiety", "Anxiety", "1 = Yes, 0 = No", BINARY_CODES),
    coded(6, "peer_pressure", "Peer Pressure", "1 = Yes, 0 = No", BINARY_CODES),
    coded(7, "chronic_disease", "Chronic Disease", "1 = Yes, 0 = No", BINARY_CODES),
    coded(8, "fatigue", "Fatigue", "1 = Yes, 0 = No", BINARY_CODES),
    coded(9, "allergy", "Allergy", "1 = Yes, 0 = No", BINARY_CODES),
    coded(10, "wheezing", "Wheezing", "1 = Yes, 0 = No", BINARY_CODES),
    coded(11, "alcohol", "Alcohol Consumption", "1 = Yes, 0 = No", BINARY_CODES),
    coded(12, "coughing_blood", "Coughing Blood", "1 = Yes, 0 = No", BINARY_CODES),
    coded(13, "swallowing_diff", "Swallowing Difficulty", "1 = Yes, 0 = No", BINARY_CODES),
    coded(14, "short_breath", "Shortness of Breath", "1 = Yes, 0 = No", BINARY_CODES),
];

/// Ordered fields for a disease
pub fn fields_for(disease: DiseaseId) -> &'static [FeatureField] {
    match disease {
        DiseaseId::Parkinsons => PARKINSONS_LAYOUT,
        DiseaseId::HeartDisease => HEART_DISEASE_LAYOUT,
        DiseaseId::LungCancer => LUNG_CANCER_LAYOUT,
    }
}

/// Number of features the model for `disease` expects
pub fn feature_count(disease: DiseaseId) -> usize {
    fields_for(disease).len()
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of a disease layout
pub fn compute_layout_hash(disease: DiseaseId) -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);
    hasher.update(disease.as_str().as_bytes());
    hasher.update(&[0]);

    for field in fields_for(disease) {
        hasher.update(field.name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

pub fn layout_hash(disease: DiseaseId) -> u32 {
    compute_layout_hash(disease)
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutInfo {
    pub disease: DiseaseId,
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn for_disease(disease: DiseaseId) -> Self {
        Self {
            disease,
            version: FEATURE_VERSION,
            hash: layout_hash(disease),
            feature_count: feature_count(disease),
            feature_names: fields_for(disease).iter().map(|f| f.name.to_string()).collect(),
        }
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when a declared layout hash doesn't match the current schema
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("feature layout mismatch for {disease}: expected hash {expected_hash:08x}, got {actual_hash:08x}")]
pub struct LayoutMismatchError {
    pub disease: DiseaseId,
    pub expected_hash: u32,
    pub actual_hash: u32,
}

/// Validate that an incoming layout hash matches the current layout
pub fn validate_layout(disease: DiseaseId, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash(disease);

    if incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            disease,
            expected_hash: current_hash,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Look up a field by name (O(n) but layouts are small)
pub fn field(disease: DiseaseId, name: &str) -> Option<&'static FeatureField> {
    fields_for(disease).iter().find(|f| f.name == name)
}

/// Get feature index by name
pub fn field_index(disease: DiseaseId, name: &str) -> Option<usize> {
    field(disease, name).map(|f| f.index)
}

/// Get feature name by index
pub fn field_name(disease: DiseaseId, index: usize) -> Option<&'static str> {
    fields_for(disease).get(index).map(|f| f.name)
}

// ============================================================================
// TESTS
// ============================================================================
