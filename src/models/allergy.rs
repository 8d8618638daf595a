use serde::{Deserialize, Serialize};

/// An allergy confirmed for a patient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Allergy {
    pub allergy_id: String,
    pub patient_id: String,
    pub allergen: String,
    pub reaction: Option<String>,
    pub severity: Option<String>,
    pub confirmed_date: Option<String>,
    pub notes: Option<String>,
    pub confirmed_by: Option<String>,
}
