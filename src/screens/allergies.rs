//! Allergies screen: fetch the list, and add confirmed entries.

use serde_json::json;

use super::{Alert, ResourceState};
use crate::config::ServiceEndpoints;
use crate::models::Allergy;
use crate::net::{ApiClient, NetworkResult};
use crate::session::{NavigationRequest, ScreenId};

/// Local copy of the add-allergy form.
#[derive(Debug, Default)]
pub struct AllergyForm {
    pub allergen: String,
    pub reaction: String,
    pub severity: String,
    pub notes: String,
}

impl AllergyForm {
    fn clear(&mut self) {
        *self = Self::default();
    }
}

pub struct AllergiesScreen {
    allergies: ResourceState<Vec<Allergy>>,
    pub form: AllergyForm,
    saving: bool,
    alert: Option<Alert>,
}

impl AllergiesScreen {
    pub fn new() -> Self {
        Self {
            allergies: ResourceState::new(),
            form: AllergyForm::default(),
            saving: false,
            alert: None,
        }
    }

    pub fn state(&self) -> &ResourceState<Vec<Allergy>> {
        &self.allergies
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Fetch on activation; skipped entirely without a patient id.
    pub async fn activate(
        &mut self,
        client: &ApiClient,
        endpoints: &ServiceEndpoints,
        patient_id: Option<&str>,
    ) {
        let Some(id) = patient_id.filter(|id| !id.is_empty()) else {
            tracing::debug!("no patient id, skipping allergy fetch");
            self.allergies.missing_identity();
            return;
        };

        let ticket = self.allergies.begin();
        let result = client.get_json(&resource_url(endpoints, id)).await;
        self.allergies.complete(ticket, result);
    }

    pub async fn retry(
        &mut self,
        client: &ApiClient,
        endpoints: &ServiceEndpoints,
        patient_id: Option<&str>,
    ) {
        self.activate(client, endpoints, patient_id).await;
    }

    /// Submit the add-allergy form. The created record comes back from the
    /// service and is appended to the loaded list.
    pub async fn add(
        &mut self,
        client: &ApiClient,
        endpoints: &ServiceEndpoints,
        patient_id: Option<&str>,
    ) {
        let Some(id) = patient_id.filter(|id| !id.is_empty()) else {
            self.alert = Some(Alert::error("No patient ID available. Please log in."));
            return;
        };
        if self.form.allergen.trim().is_empty() {
            self.alert = Some(Alert::error("Allergen is a required field."));
            return;
        }

        self.alert = None;
        self.saving = true;
        let body = json!({
            "allergen": self.form.allergen.trim(),
            "reaction": self.form.reaction.trim(),
            "severity": self.form.severity.trim(),
            "notes": self.form.notes.trim(),
        });
        let result = client.post_json(&resource_url(endpoints, id), &body).await;
        self.saving = false;
        self.handle_add_result(result);
    }

    fn handle_add_result(&mut self, result: NetworkResult<Allergy>) {
        match result {
            Ok(created) => {
                if let Some(list) = self.allergies.data_mut() {
                    list.push(created);
                }
                self.form.clear();
                self.alert = Some(Alert::success("Allergy added successfully!"));
            }
            Err(err) => {
                self.alert = Some(Alert::from_api_error(&err));
            }
        }
    }

    /// Alert for a failed list fetch (the add flow has its own).
    pub fn fetch_alert(&self) -> Option<Alert> {
        self.allergies.error().map(Alert::from_api_error)
    }

    pub fn back(&self) -> NavigationRequest {
        NavigationRequest::to(ScreenId::Home)
    }

    pub fn open_reports(&self) -> NavigationRequest {
        NavigationRequest::to(ScreenId::Reports)
    }

    pub fn open_prescriptions(&self) -> NavigationRequest {
        NavigationRequest::to(ScreenId::Prescriptions)
    }
}

impl Default for AllergiesScreen {
    fn default() -> Self {
        Self::new()
    }
}

fn resource_url(endpoints: &ServiceEndpoints, patient_id: &str) -> String {
    format!("{}/patients/{}/allergies", endpoints.allergy, patient_id)
}
