use serde::{Deserialize, Serialize};

use crate::grouping::Dated;

/// A lab report issued for a patient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabReport {
    pub lab_report_id: String,
    pub patient_id: String,
    pub nurse_id: Option<String>,
    pub lab_report_type: String,
    pub lab_report_description: Option<String>,
    pub lab_report_date: Option<String>,
    pub lab_report_results: Option<String>,
    pub file_url: Option<String>,
    pub comments: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
}

impl Dated for LabReport {
    fn event_date(&self) -> Option<&str> {
        self.lab_report_date.as_deref()
    }
}
