//! Home screen: the hub. No fetch of its own; everything it shows comes
//! from the session carried in at login, plus the MedBot overlay.

use crate::medbot::MedBot;
use crate::session::{NavigationRequest, ScreenId, Session};

pub struct HomeScreen {
    /// Diagnosis overlay, opened from the hub.
    pub medbot: MedBot,
}

impl HomeScreen {
    pub fn new() -> Self {
        Self {
            medbot: MedBot::new(),
        }
    }

    /// Greeting line built from the session identity.
    pub fn greeting(&self, session: &Session) -> String {
        match session.patient_data.as_ref() {
            Some(patient) if !patient.full_name.is_empty() => {
                format!("Hi, {}", patient.full_name)
            }
            _ => "Hi, Welcome Back".to_string(),
        }
    }

    pub fn open_reports(&self) -> NavigationRequest {
        NavigationRequest::to(ScreenId::Reports)
    }

    pub fn open_prescriptions(&self) -> NavigationRequest {
        NavigationRequest::to(ScreenId::Prescriptions)
    }

    pub fn open_allergies(&self) -> NavigationRequest {
        NavigationRequest::to(ScreenId::Allergies)
    }

    pub fn open_profile(&self) -> NavigationRequest {
        NavigationRequest::to(ScreenId::Profile)
    }

    pub fn open_qr_code(&self) -> NavigationRequest {
        NavigationRequest::to(ScreenId::QrCode)
    }

    pub fn open_health_form(&self) -> NavigationRequest {
        NavigationRequest::to(ScreenId::HealthForm)
    }
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new()
    }
}
