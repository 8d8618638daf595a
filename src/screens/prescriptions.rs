//! Prescriptions screen: fetch, day-bucket by issue date, and hand any
//! embedded QR payload over to the QR screen untouched.

use super::{Alert, ResourceState};
use crate::config::ServiceEndpoints;
use crate::grouping::{group_by_date, DateGroup};
use crate::models::Prescription;
use crate::net::ApiClient;
use crate::session::{NavigationRequest, ScreenId};

pub struct PrescriptionsScreen {
    prescriptions: ResourceState<Vec<Prescription>>,
    /// Prescription expanded via "View More", if any.
    pub selected: Option<String>,
}

impl PrescriptionsScreen {
    pub fn new() -> Self {
        Self {
            prescriptions: ResourceState::new(),
            selected: None,
        }
    }

    pub fn state(&self) -> &ResourceState<Vec<Prescription>> {
        &self.prescriptions
    }

    /// Fetch on activation; skipped entirely without a patient id.
    pub async fn activate(
        &mut self,
        client: &ApiClient,
        endpoints: &ServiceEndpoints,
        patient_id: Option<&str>,
    ) {
        let Some(id) = patient_id.filter(|id| !id.is_empty()) else {
            tracing::debug!("no patient id, skipping prescription fetch");
            self.prescriptions.missing_identity();
            return;
        };

        let ticket = self.prescriptions.begin();
        let result = client.get_json(&resource_url(endpoints, id)).await;
        self.prescriptions.complete(ticket, result);
    }

    pub async fn retry(
        &mut self,
        client: &ApiClient,
        endpoints: &ServiceEndpoints,
        patient_id: Option<&str>,
    ) {
        self.activate(client, endpoints, patient_id).await;
    }

    /// Fetched prescriptions as day buckets, newest day first.
    pub fn grouped(&self) -> Vec<DateGroup<Prescription>> {
        self.prescriptions
            .data()
            .map(|prescriptions| group_by_date(prescriptions))
            .unwrap_or_default()
    }

    /// The embedded QR payload string for one prescription, when the
    /// backend supplied it. Passed through as-is, never rebuilt.
    pub fn qr_payload(&self, prescription_id: &str) -> Option<&str> {
        self.prescriptions.data().and_then(|prescriptions| {
            prescriptions
                .iter()
                .find(|p| p.prescription_id == prescription_id)
                .and_then(|p| p.qr_code.as_deref())
        })
    }

    pub fn alert(&self) -> Option<Alert> {
        self.prescriptions.error().map(Alert::from_api_error)
    }

    pub fn back(&self) -> NavigationRequest {
        NavigationRequest::to(ScreenId::Home)
    }

    pub fn open_reports(&self) -> NavigationRequest {
        NavigationRequest::to(ScreenId::Reports)
    }

    pub fn open_allergies(&self) -> NavigationRequest {
        NavigationRequest::to(ScreenId::Allergies)
    }

    pub fn open_qr_code(&self) -> NavigationRequest {
        NavigationRequest::to(ScreenId::QrCode)
    }
}

impl Default for PrescriptionsScreen {
    fn default() -> Self {
        Self::new()
    }
}

fn resource_url(endpoints: &ServiceEndpoints, patient_id: &str) -> String {
    format!(
        "{}/patients/{}/prescriptions",
        endpoints.prescription, patient_id
    )
}
