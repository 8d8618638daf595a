//! Medical data form: the ML intake record behind MedBot's prediction.
//!
//! Numeric fields are held as entry strings and parsed on save; the
//! categorical fields mirror the form's pickers and always carry a value.

use super::Alert;
use crate::config::ServiceEndpoints;
use crate::models::HealthRecord;
use crate::net::{ApiClient, ErrorCategory, NetworkResult};
use crate::session::{NavigationRequest, ScreenId};

/// Local copy of the intake form.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthForm {
    pub age: String,
    pub thalach: String,
    pub oldpeak: String,
    pub trestbps: String,
    pub bmi: String,
    pub chol: String,
    /// Major vessels, 0-4.
    pub ca: i32,
    /// Thalassemia: 3 normal, 6 fixed defect, 7 reversible defect.
    pub thal: i32,
    /// Resting ECG, 0-2.
    pub restecg: i32,
    /// Chest pain type, 1-4.
    pub cp: i32,
}

impl Default for HealthForm {
    fn default() -> Self {
        Self {
            age: String::new(),
            thalach: String::new(),
            oldpeak: String::new(),
            trestbps: String::new(),
            bmi: String::new(),
            chol: String::new(),
            ca: 0,
            thal: 3,
            restecg: 0,
            cp: 1,
        }
    }
}

impl HealthForm {
    fn from_record(record: &HealthRecord) -> Self {
        let number = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
        Self {
            age: number(record.age),
            thalach: number(record.thalach),
            oldpeak: number(record.oldpeak),
            trestbps: number(record.trestbps),
            bmi: number(record.bmi),
            chol: number(record.chol),
            ca: record.ca.unwrap_or(0),
            thal: record.thal.unwrap_or(3),
            restecg: record.restecg.unwrap_or(0),
            cp: record.cp.unwrap_or(1),
        }
    }

    /// Parse the entry strings into a wire record.
    fn to_record(&self) -> Result<HealthRecord, Alert> {
        let number = |field: &str, value: &str| -> Result<Option<f64>, Alert> {
            let value = value.trim();
            if value.is_empty() {
                return Ok(None);
            }
            value.parse::<f64>().map(Some).map_err(|_| {
                Alert::error(format!("Please enter a valid number for {field}."))
            })
        };
        Ok(HealthRecord {
            age: number("age", &self.age)?,
            thalach: number("max heart rate", &self.thalach)?,
            oldpeak: number("ST depression", &self.oldpeak)?,
            trestbps: number("resting BP", &self.trestbps)?,
            bmi: number("BMI", &self.bmi)?,
            chol: number("cholesterol", &self.chol)?,
            ca: Some(self.ca),
            thal: Some(self.thal),
            restecg: Some(self.restecg),
            cp: Some(self.cp),
            user_id: None,
            timestamp: None,
        })
    }
}

pub struct HealthFormScreen {
    pub form: HealthForm,
    saving: bool,
    alert: Option<Alert>,
}

impl HealthFormScreen {
    pub fn new() -> Self {
        Self {
            form: HealthForm::default(),
            saving: false,
            alert: None,
        }
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Prefill from the most recent saved record. A 404 just means the
    /// patient has never filled the form, so the empty form stands.
    pub async fn load_latest(
        &mut self,
        client: &ApiClient,
        endpoints: &ServiceEndpoints,
        patient_id: Option<&str>,
    ) {
        let Some(id) = patient_id.filter(|id| !id.is_empty()) else {
            return;
        };
        let url = format!("{}/health/record/latest?userId={}", endpoints.mldata, id);
        match client.get_json::<HealthRecord>(&url).await {
            Ok(record) => self.form = HealthForm::from_record(&record),
            Err(err) if err.is(ErrorCategory::NotFound) => {}
            Err(err) => self.alert = Some(Alert::from_api_error(&err)),
        }
    }

    /// Save the intake record, returning to Home on success.
    pub async fn save(
        &mut self,
        client: &ApiClient,
        endpoints: &ServiceEndpoints,
        patient_id: Option<&str>,
    ) -> Option<NavigationRequest> {
        let Some(id) = patient_id.filter(|id| !id.is_empty()) else {
            self.alert = Some(Alert::error("No patient ID available. Please log in."));
            return None;
        };
        if self.form.age.trim().is_empty() {
            self.alert = Some(Alert::error("Age is required."));
            return None;
        }
        let record = match self.form.to_record() {
            Ok(record) => record,
            Err(alert) => {
                self.alert = Some(alert);
                return None;
            }
        };

        self.alert = None;
        self.saving = true;
        let url = format!("{}/health/record?userId={}", endpoints.mldata, id);
        let body = serde_json::to_value(&record).unwrap_or_default();
        let result: NetworkResult<HealthRecord> = client.post_json(&url, &body).await;
        self.saving = false;

        match result {
            Ok(_) => {
                self.alert = Some(Alert::success("Medical data saved successfully!"));
                Some(NavigationRequest::to(ScreenId::Home))
            }
            Err(err) => {
                self.alert = Some(Alert::new("Save Error", err.message.clone()));
                None
            }
        }
    }

    pub fn back(&self) -> NavigationRequest {
        NavigationRequest::to(ScreenId::Home)
    }
}

impl Default for HealthFormScreen {
    fn default() -> Self {
        Self::new()
    }
}
