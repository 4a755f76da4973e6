//! Disease catalogue models

use diagnosis_core::{fields_for, DiseaseId, FeatureField, LayoutInfo};
use serde::Serialize;

/// Entry of the disease selection menu
#[derive(Debug, Serialize)]
pub struct DiseaseSummary {
    pub id: DiseaseId,
    pub title: &'static str,
    pub field_count: usize,
}

impl DiseaseSummary {
    pub fn new(id: DiseaseId) -> Self {
        Self {
            id,
            title: id.title(),
            field_count: fields_for(id).len(),
        }
    }
}

/// Input form for one disease
#[derive(Debug, Serialize)]
pub struct FieldsResponse {
    pub disease: DiseaseId,
    pub title: &'static str,
    pub layout: LayoutInfo,
    pub fields: &'static [FeatureField],
}

impl FieldsResponse {
    pub fn new(disease: DiseaseId) -> Self {
        Self {
            disease,
            title: disease.title(),
            layout: LayoutInfo::for_disease(disease),
            fields: fields_for(disease),
        }
    }
}
