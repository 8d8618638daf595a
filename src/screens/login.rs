//! Login screen: email + password against the patient service.

use serde::Deserialize;
use serde_json::json;

use super::Alert;
use crate::config::ServiceEndpoints;
use crate::models::Patient;
use crate::net::{ApiClient, ApiError, ErrorCategory, NetworkResult};
use crate::session::{NavPayload, NavigationRequest, ScreenId};

/// Successful login body from `POST /patients/login`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginResponse {
    pub patient_id: String,
    pub email: String,
    pub full_name: String,
    pub message: String,
}

/// Local state of the login screen.
#[derive(Debug, Default)]
pub struct LoginScreen {
    pub email: String,
    pub password: String,
    pub show_password: bool,
    submitting: bool,
    alert: Option<Alert>,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Submit the form. Emits a navigation request to `Home` carrying the
    /// authenticated identity on success; on any failure the screen stays
    /// put and surfaces an alert.
    pub async fn submit(
        &mut self,
        client: &ApiClient,
        endpoints: &ServiceEndpoints,
    ) -> Option<NavigationRequest> {
        if let Some(alert) = self.validate() {
            self.alert = Some(alert);
            return None;
        }

        self.alert = None;
        self.submitting = true;
        let body = json!({
            "email": self.email.trim(),
            "password": self.password,
        });
        let result = client.post_json(&login_url(endpoints), &body).await;
        self.submitting = false;
        self.handle_result(result)
    }

    fn validate(&self) -> Option<Alert> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Some(Alert::error("Please enter both email and password"));
        }
        None
    }

    fn handle_result(&mut self, result: NetworkResult<LoginResponse>) -> Option<NavigationRequest> {
        match result {
            Ok(response) => {
                tracing::info!(patient_id = %response.patient_id, "login succeeded");
                let patient = Patient {
                    patient_id: response.patient_id.clone(),
                    full_name: response.full_name,
                    email: response.email,
                    ..Patient::default()
                };
                Some(NavigationRequest::with_payload(
                    ScreenId::Home,
                    NavPayload::patient(response.patient_id, patient),
                ))
            }
            Err(err) => {
                self.alert = Some(login_alert(&err));
                None
            }
        }
    }
}

fn login_url(endpoints: &ServiceEndpoints) -> String {
    format!("{}/patients/login", endpoints.patient)
}

/// Login-specific remap: a missing account reads better than a bare 404.
fn login_alert(err: &ApiError) -> Alert {
    match err.category {
        ErrorCategory::NotFound => Alert::error("Account not found"),
        _ => Alert::from_api_error(err),
    }
}
