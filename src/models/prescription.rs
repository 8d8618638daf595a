use serde::{Deserialize, Serialize};

use crate::grouping::Dated;

/// A prescription issued for a patient.
///
/// `qr_code` carries a ready-made QR payload string from the prescription
/// service when present; the client passes it through without rebuilding it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Prescription {
    pub prescription_id: String,
    pub patient_id: String,
    pub doctor_id: Option<String>,
    pub issue_date: Option<String>,
    pub next_review_date: Option<i64>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub qr_code: Option<String>,
    pub medication_name: Option<String>,
}

impl Dated for Prescription {
    fn event_date(&self) -> Option<&str> {
        self.issue_date.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_record_with_embedded_qr_payload() {
        let prescription: Prescription = serde_json::from_str(
            r#"{
                "prescriptionId": "rx-1",
                "patientId": "101",
                "issueDate": "2025-10-02T09:30:00.000+00:00",
                "category": "Viral Fever",
                "medicationName": "Paracetamol",
                "qrCode": "{\"patientId\":\"101\",\"accessKey\":\"k\",\"type\":\"medical_id\",\"timestamp\":\"0\"}"
            }"#,
        )
        .unwrap();
        assert_eq!(prescription.prescription_id, "rx-1");
        assert_eq!(prescription.event_date(), Some("2025-10-02T09:30:00.000+00:00"));
        assert!(prescription.qr_code.as_deref().unwrap().contains("accessKey"));
    }
}
