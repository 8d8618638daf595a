//! Session state and the navigation controller.
//!
//! One `Session` exists per app run. Screens read it, but only the
//! [`SessionController`] writes it, and only while handling a navigation
//! action, so no two mutations can interleave and screens cannot smuggle
//! state past the controller. Logout resets the session to its initial value.

use serde::{Deserialize, Serialize};

use crate::models::Patient;

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

/// Every screen the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScreenId {
    Welcome,
    Login,
    Signup,
    SetPassword,
    Consent,
    Home,
    Reports,
    Prescriptions,
    Allergies,
    Profile,
    QrCode,
    HealthForm,
}

impl std::fmt::Display for ScreenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Welcome => "welcome",
            Self::Login => "login",
            Self::Signup => "signup",
            Self::SetPassword => "setPassword",
            Self::Consent => "consent",
            Self::Home => "home",
            Self::Reports => "reports",
            Self::Prescriptions => "prescriptions",
            Self::Allergies => "allergies",
            Self::Profile => "profile",
            Self::QrCode => "qrCode",
            Self::HealthForm => "healthForm",
        };
        write!(f, "{name}")
    }
}

/// Role the logged-in user holds on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Patient,
    Doctor,
    Radiologist,
    LabTechnician,
}

/// In-memory identity and navigation state for one app run.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub current_screen: ScreenId,
    pub patient_id: Option<String>,
    pub patient_data: Option<Patient>,
    pub user_role: Option<UserRole>,
}

impl Session {
    /// Fresh session at process start: welcome screen, no identity.
    pub fn new() -> Self {
        Self {
            current_screen: ScreenId::Welcome,
            patient_id: None,
            patient_data: None,
            user_role: None,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Session fields a navigation request may carry along.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavPayload {
    pub patient_id: Option<String>,
    pub patient_data: Option<Patient>,
    pub user_role: Option<UserRole>,
}

impl NavPayload {
    /// Payload carrying a freshly authenticated patient identity.
    pub fn patient(patient_id: impl Into<String>, patient_data: Patient) -> Self {
        Self {
            patient_id: Some(patient_id.into()),
            patient_data: Some(patient_data),
            user_role: Some(UserRole::Patient),
        }
    }
}

/// A screen's request to move somewhere else. Screens emit these;
/// only the controller consumes them.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationRequest {
    pub target: ScreenId,
    pub payload: Option<NavPayload>,
}

impl NavigationRequest {
    pub fn to(target: ScreenId) -> Self {
        Self {
            target,
            payload: None,
        }
    }

    pub fn with_payload(target: ScreenId, payload: NavPayload) -> Self {
        Self {
            target,
            payload: Some(payload),
        }
    }
}

/// Errors from navigation actions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Navigation from {from} to {to} is not allowed")]
    InvalidTransition { from: ScreenId, to: ScreenId },
}

// ═══════════════════════════════════════════════════════════
// SessionController
// ═══════════════════════════════════════════════════════════

/// Owns the session and applies navigation requests to it.
pub struct SessionController {
    session: Session,
}

impl SessionController {
    pub fn new() -> Self {
        Self {
            session: Session::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_screen(&self) -> ScreenId {
        self.session.current_screen
    }

    /// Switch to `target`, merging any payload fields into the session first
    /// so the destination observes fresh data on its first render.
    ///
    /// The transition must be listed in the topology table; anything else is
    /// rejected and leaves the session untouched.
    pub fn navigate(
        &mut self,
        target: ScreenId,
        payload: Option<NavPayload>,
    ) -> Result<(), SessionError> {
        let from = self.session.current_screen;
        if !transition_allowed(from, target) {
            tracing::warn!(%from, to = %target, "rejected navigation");
            return Err(SessionError::InvalidTransition { from, to: target });
        }

        if let Some(payload) = payload {
            if let Some(patient_id) = payload.patient_id {
                self.session.patient_id = Some(patient_id);
            }
            if let Some(patient_data) = payload.patient_data {
                self.session.patient_data = Some(patient_data);
            }
            if let Some(user_role) = payload.user_role {
                self.session.user_role = Some(user_role);
            }
        }

        self.session.current_screen = target;
        tracing::debug!(%from, to = %target, "navigated");
        Ok(())
    }

    /// Consume a request emitted by a screen.
    pub fn apply(&mut self, request: NavigationRequest) -> Result<(), SessionError> {
        self.navigate(request.target, request.payload)
    }

    /// Unconditionally return to the welcome screen and drop all identity.
    pub fn logout(&mut self) {
        self.session = Session::new();
        tracing::info!("logged out, session cleared");
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

/// Topology: onboarding chain into the `Home` hub, record spokes
/// cross-linked through the bottom navigation bar.
fn transition_allowed(from: ScreenId, to: ScreenId) -> bool {
    use ScreenId::*;

    if from == to {
        return true;
    }
    match from {
        Welcome => matches!(to, Login | Signup),
        Login => matches!(to, Welcome | Signup | SetPassword | Home),
        Signup => matches!(to, Welcome | Login | SetPassword),
        SetPassword => matches!(to, Welcome | Login | Consent),
        Consent => matches!(to, SetPassword | Home),
        Home => matches!(
            to,
            Reports | Prescriptions | Allergies | Profile | QrCode | HealthForm | Welcome
        ),
        Reports => matches!(to, Home | Prescriptions | Allergies),
        Prescriptions => matches!(to, Home | Reports | Allergies | QrCode),
        Allergies => matches!(to, Home | Reports | Prescriptions),
        Profile => matches!(to, Home),
        QrCode => matches!(to, Home | Prescriptions),
        HealthForm => matches!(to, Home),
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_in_controller(patient_id: &str) -> SessionController {
        let mut controller = SessionController::new();
        controller.navigate(ScreenId::Login, None).unwrap();
        controller
            .navigate(
                ScreenId::Home,
                Some(NavPayload::patient(patient_id, Patient::default())),
            )
            .unwrap();
        controller
    }

    #[test]
    fn new_session_starts_at_welcome_with_no_identity() {
        let controller = SessionController::new();
        assert_eq!(controller.current_screen(), ScreenId::Welcome);
        assert!(controller.session().patient_id.is_none());
        assert!(controller.session().patient_data.is_none());
        assert!(controller.session().user_role.is_none());
    }

    #[test]
    fn onboarding_chain_reaches_home() {
        let mut controller = SessionController::new();
        controller.navigate(ScreenId::Signup, None).unwrap();
        controller.navigate(ScreenId::SetPassword, None).unwrap();
        controller.navigate(ScreenId::Consent, None).unwrap();
        controller.navigate(ScreenId::Home, None).unwrap();
        assert_eq!(controller.current_screen(), ScreenId::Home);
    }

    #[test]
    fn payload_updates_session_before_screen_switch() {
        let controller = logged_in_controller("101");
        assert_eq!(controller.current_screen(), ScreenId::Home);
        assert_eq!(controller.session().patient_id.as_deref(), Some("101"));
        assert_eq!(controller.session().user_role, Some(UserRole::Patient));
    }

    #[test]
    fn hub_round_trip_preserves_patient_id() {
        let mut controller = logged_in_controller("101");
        controller.navigate(ScreenId::Reports, None).unwrap();
        assert_eq!(controller.session().patient_id.as_deref(), Some("101"));
        controller.navigate(ScreenId::Home, None).unwrap();
        assert_eq!(controller.session().patient_id.as_deref(), Some("101"));
    }

    #[test]
    fn spokes_cross_link_without_passing_home() {
        let mut controller = logged_in_controller("101");
        controller.navigate(ScreenId::Reports, None).unwrap();
        controller.navigate(ScreenId::Prescriptions, None).unwrap();
        controller.navigate(ScreenId::Allergies, None).unwrap();
        assert_eq!(controller.current_screen(), ScreenId::Allergies);
    }

    #[test]
    fn invalid_transition_is_rejected_and_session_untouched() {
        let mut controller = SessionController::new();
        let err = controller
            .navigate(
                ScreenId::Reports,
                Some(NavPayload::patient("999", Patient::default())),
            )
            .unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidTransition {
                from: ScreenId::Welcome,
                to: ScreenId::Reports,
            }
        );
        assert_eq!(controller.current_screen(), ScreenId::Welcome);
        assert!(controller.session().patient_id.is_none());
    }

    #[test]
    fn logout_from_any_state_resets_everything() {
        let mut controller = logged_in_controller("101");
        controller.navigate(ScreenId::Profile, None).unwrap();

        controller.logout();
        assert_eq!(controller.current_screen(), ScreenId::Welcome);
        assert!(controller.session().patient_id.is_none());
        assert!(controller.session().patient_data.is_none());
        assert!(controller.session().user_role.is_none());
    }

    #[test]
    fn apply_consumes_a_screen_request() {
        let mut controller = logged_in_controller("101");
        let request = NavigationRequest::to(ScreenId::QrCode);
        controller.apply(request).unwrap();
        assert_eq!(controller.current_screen(), ScreenId::QrCode);
    }

    #[test]
    fn navigating_to_current_screen_is_allowed() {
        let mut controller = logged_in_controller("101");
        controller.navigate(ScreenId::Home, None).unwrap();
        assert_eq!(controller.current_screen(), ScreenId::Home);
    }

    #[test]
    fn screen_id_serializes_camel_case() {
        assert_eq!(
            serde_json::to_string(&ScreenId::SetPassword).unwrap(),
            "\"setPassword\""
        );
        assert_eq!(
            serde_json::to_string(&ScreenId::QrCode).unwrap(),
            "\"qrCode\""
        );
    }

    #[test]
    fn session_error_display_names_both_screens() {
        let err = SessionError::InvalidTransition {
            from: ScreenId::Welcome,
            to: ScreenId::Reports,
        };
        assert_eq!(
            err.to_string(),
            "Navigation from welcome to reports is not allowed"
        );
    }
}
