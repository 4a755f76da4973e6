//! Verdict labels
//!
//! Static table indexed by (disease, verdict). This is the only text the core
//! produces for display.

use crate::logic::disease::DiseaseId;

/// `[negative, positive]` per disease, in `DiseaseId::ALL` order
const LABELS: [[&str; 2]; 3] = [
    [
        "The person does not have Parkinson's disease",
        "The person has Parkinson's disease",
    ],
    [
        "The person does not have heart disease",
        "The person has heart disease",
    ],
    [
        "The person does not have lung cancer",
        "The person has lung cancer",
    ],
];

pub fn label_for(disease: DiseaseId, verdict: bool) -> &'static str {
    LABELS[disease.index()][verdict as usize]
}
