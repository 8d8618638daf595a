//! MedBot: the risk prediction overlay.
//!
//! Usable from any screen that shows the floating button. The widget walks
//! `Idle → PopupShown → Loading → ResultShown`, and a new diagnosis can be
//! requested straight from a shown result.

use crate::config::ServiceEndpoints;
use crate::models::Prediction;
use crate::net::{ApiClient, ApiError, ErrorCategory, Method, NetworkResult};
use crate::screens::Alert;

/// Where the overlay currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum MedBotState {
    Idle,
    PopupShown,
    Loading,
    ResultShown(Prediction),
}

pub struct MedBot {
    state: MedBotState,
    alert: Option<Alert>,
}

impl MedBot {
    pub fn new() -> Self {
        Self {
            state: MedBotState::Idle,
            alert: None,
        }
    }

    pub fn state(&self) -> &MedBotState {
        &self.state
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Open the popup, clearing any previous result.
    pub fn open(&mut self) {
        self.state = MedBotState::PopupShown;
        self.alert = None;
    }

    /// Close the popup and drop the result.
    pub fn close(&mut self) {
        self.state = MedBotState::Idle;
        self.alert = None;
    }

    /// Run a diagnosis for the session's patient.
    ///
    /// Without a known identity this is rejected locally; no request is
    /// issued. Only reachable while the popup is open.
    pub async fn diagnose(
        &mut self,
        client: &ApiClient,
        endpoints: &ServiceEndpoints,
        patient_id: Option<&str>,
    ) {
        if !matches!(
            self.state,
            MedBotState::PopupShown | MedBotState::ResultShown(_)
        ) {
            tracing::debug!("diagnose pressed while popup closed, ignoring");
            return;
        }
        let Some(id) = patient_id.filter(|id| !id.is_empty()) else {
            self.alert = Some(Alert::new(
                "Diagnosis Error",
                "No patient ID available. Please log in.",
            ));
            return;
        };

        self.alert = None;
        self.state = MedBotState::Loading;

        // The service answers its health probe before any prediction runs.
        // A failed probe always reads as unreachable, whatever the status.
        let health_url = format!("{}/api/health", endpoints.medbot);
        if let Err(err) = client.request(Method::GET, &health_url, None).await {
            self.state = MedBotState::PopupShown;
            self.alert = Some(Alert::new(
                "Diagnosis Error",
                format!("Unable to connect to diagnosis service: {}", err.message),
            ));
            return;
        }

        let url = format!("{}/api/predict?patientId={}", endpoints.medbot, id);
        let result = client.get_json(&url).await;
        self.handle_result(result);
    }

    fn handle_result(&mut self, result: NetworkResult<Prediction>) {
        match result {
            Ok(prediction) => {
                tracing::info!(risk = prediction.risk, "diagnosis received");
                self.state = MedBotState::ResultShown(prediction);
            }
            Err(err) => {
                self.state = MedBotState::PopupShown;
                self.alert = Some(diagnosis_alert(&err));
            }
        }
    }
}

impl Default for MedBot {
    fn default() -> Self {
        Self::new()
    }
}

/// Prediction-specific remap: a 404 means the intake form was never filled.
fn diagnosis_alert(err: &ApiError) -> Alert {
    match err.category {
        ErrorCategory::NotFound => Alert::new(
            "Diagnosis Error",
            "No health records found. Please complete the health form first.",
        ),
        _ => Alert::new(
            "Diagnosis Error",
            format!("Unable to connect to diagnosis service: {}", err.message),
        ),
    }
}
