//! Lab reports screen: fetch, then render as day buckets, newest first.

use super::{Alert, ResourceState};
use crate::config::ServiceEndpoints;
use crate::grouping::{group_by_date, DateGroup};
use crate::models::LabReport;
use crate::net::ApiClient;
use crate::session::{NavigationRequest, ScreenId};

pub struct ReportsScreen {
    reports: ResourceState<Vec<LabReport>>,
}

impl ReportsScreen {
    pub fn new() -> Self {
        Self {
            reports: ResourceState::new(),
        }
    }

    pub fn state(&self) -> &ResourceState<Vec<LabReport>> {
        &self.reports
    }

    /// Fetch on activation. Without a patient id the request is skipped and
    /// the screen shows its explanatory empty state instead.
    pub async fn activate(
        &mut self,
        client: &ApiClient,
        endpoints: &ServiceEndpoints,
        patient_id: Option<&str>,
    ) {
        let Some(id) = patient_id.filter(|id| !id.is_empty()) else {
            tracing::debug!("no patient id, skipping lab report fetch");
            self.reports.missing_identity();
            return;
        };

        let ticket = self.reports.begin();
        let result = client.get_json(&resource_url(endpoints, id)).await;
        self.reports.complete(ticket, result);
    }

    /// User-triggered retry: the same fetch again.
    pub async fn retry(
        &mut self,
        client: &ApiClient,
        endpoints: &ServiceEndpoints,
        patient_id: Option<&str>,
    ) {
        self.activate(client, endpoints, patient_id).await;
    }

    /// Fetched reports as day buckets, newest day first.
    pub fn grouped(&self) -> Vec<DateGroup<LabReport>> {
        self.reports
            .data()
            .map(|reports| group_by_date(reports))
            .unwrap_or_default()
    }

    pub fn alert(&self) -> Option<Alert> {
        self.reports.error().map(Alert::from_api_error)
    }

    pub fn back(&self) -> NavigationRequest {
        NavigationRequest::to(ScreenId::Home)
    }

    pub fn open_prescriptions(&self) -> NavigationRequest {
        NavigationRequest::to(ScreenId::Prescriptions)
    }

    pub fn open_allergies(&self) -> NavigationRequest {
        NavigationRequest::to(ScreenId::Allergies)
    }
}

impl Default for ReportsScreen {
    fn default() -> Self {
        Self::new()
    }
}

fn resource_url(endpoints: &ServiceEndpoints, patient_id: &str) -> String {
    format!("{}/patients/{}/lab-reports", endpoints.lab, patient_id)
}
