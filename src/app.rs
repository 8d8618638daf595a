//! Top-level wiring: one client, one session controller, one instance of
//! every screen.
//!
//! The app owns the only mutable handle to the session and is the single
//! place where a screen's navigation request turns into a screen switch.
//! Activating the destination screen kicks off its resource fetch with the
//! session identity injected as a plain argument.

use crate::config::ServiceEndpoints;
use crate::net::ApiClient;
use crate::screens::allergies::AllergiesScreen;
use crate::screens::consent::ConsentScreen;
use crate::screens::health_form::HealthFormScreen;
use crate::screens::home::HomeScreen;
use crate::screens::login::LoginScreen;
use crate::screens::prescriptions::PrescriptionsScreen;
use crate::screens::profile::ProfileScreen;
use crate::screens::qr_code::QrCodeScreen;
use crate::screens::reports::ReportsScreen;
use crate::screens::set_password::SetPasswordScreen;
use crate::screens::signup::SignupScreen;
use crate::session::{NavigationRequest, ScreenId, SessionController, SessionError};

pub struct App {
    controller: SessionController,
    client: ApiClient,
    endpoints: ServiceEndpoints,
    pub login: LoginScreen,
    pub signup: SignupScreen,
    pub set_password: SetPasswordScreen,
    pub consent: ConsentScreen,
    pub home: HomeScreen,
    pub reports: ReportsScreen,
    pub prescriptions: PrescriptionsScreen,
    pub allergies: AllergiesScreen,
    pub profile: ProfileScreen,
    pub qr_code: QrCodeScreen,
    pub health_form: HealthFormScreen,
}

impl App {
    pub fn new(endpoints: ServiceEndpoints) -> Self {
        Self {
            controller: SessionController::new(),
            client: ApiClient::new(),
            endpoints,
            login: LoginScreen::new(),
            signup: SignupScreen::new(),
            set_password: SetPasswordScreen::new(),
            consent: ConsentScreen::new(),
            home: HomeScreen::new(),
            reports: ReportsScreen::new(),
            prescriptions: PrescriptionsScreen::new(),
            allergies: AllergiesScreen::new(),
            profile: ProfileScreen::new(),
            qr_code: QrCodeScreen::new(),
            health_form: HealthFormScreen::new(),
        }
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn endpoints(&self) -> &ServiceEndpoints {
        &self.endpoints
    }

    /// Consume a navigation request from the active screen, then activate
    /// the destination so it observes the fresh session on first render.
    pub async fn navigate(&mut self, request: NavigationRequest) -> Result<(), SessionError> {
        self.controller.apply(request)?;
        self.activate_current().await;
        Ok(())
    }

    /// Kick off the current screen's activation fetch, if it has one.
    pub async fn activate_current(&mut self) {
        let patient_id = self.controller.session().patient_id.clone();
        let patient_id = patient_id.as_deref();
        match self.controller.current_screen() {
            ScreenId::Reports => {
                self.reports
                    .activate(&self.client, &self.endpoints, patient_id)
                    .await;
            }
            ScreenId::Prescriptions => {
                self.prescriptions
                    .activate(&self.client, &self.endpoints, patient_id)
                    .await;
            }
            ScreenId::Allergies => {
                self.allergies
                    .activate(&self.client, &self.endpoints, patient_id)
                    .await;
            }
            ScreenId::Profile => {
                self.profile
                    .activate(&self.client, &self.endpoints, patient_id)
                    .await;
            }
            ScreenId::QrCode => self.qr_code.activate(patient_id, None),
            ScreenId::HealthForm => {
                self.health_form
                    .load_latest(&self.client, &self.endpoints, patient_id)
                    .await;
            }
            // Welcome, onboarding screens and the hub fetch nothing on entry.
            _ => {}
        }
    }

    /// Log out and return to the welcome screen.
    pub fn logout(&mut self) {
        self.controller.logout();
    }
}
